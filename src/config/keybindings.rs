use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::config::key::{Key, KeyBinding};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub suspend: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationKeybindings {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub page_up: KeyBinding,
    pub page_down: KeyBinding,
    pub home: KeyBinding,
    pub end: KeyBinding,
    pub select: KeyBinding,
}

/// Trigger keys on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingKeybindings {
    pub login: KeyBinding,
    pub consultation: KeyBinding,
    pub menu: KeyBinding,
    pub search: KeyBinding,
    pub next_condition: KeyBinding,
    pub prev_condition: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogKeybindings {
    pub close: KeyBinding,
    pub next_field: KeyBinding,
    pub prev_field: KeyBinding,
    pub confirm: KeyBinding,
    pub submit: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub navigation: NavigationKeybindings,
    pub landing: LandingKeybindings,
    pub dialog: DialogKeybindings,
}

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            suspend: Key::with_ctrl(KeyCode::Char('z')).into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: KeyBinding::multiple(vec![Key::new(KeyCode::Char('k')), Key::new(KeyCode::Up)]),
            down: KeyBinding::multiple(vec![Key::new(KeyCode::Char('j')), Key::new(KeyCode::Down)]),
            page_up: Key::new(KeyCode::PageUp).into(),
            page_down: Key::new(KeyCode::PageDown).into(),
            home: KeyBinding::multiple(vec![Key::new(KeyCode::Char('g')), Key::new(KeyCode::Home)]),
            end: KeyBinding::multiple(vec![Key::new(KeyCode::Char('G')), Key::new(KeyCode::End)]),
            select: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for LandingKeybindings {
    fn default() -> Self {
        Self {
            login: Key::new(KeyCode::Char('l')).into(),
            consultation: Key::new(KeyCode::Char('b')).into(),
            menu: Key::new(KeyCode::Char('m')).into(),
            search: Key::new(KeyCode::Char('/')).into(),
            next_condition: KeyBinding::multiple(vec![
                Key::new(KeyCode::Tab),
                Key::new(KeyCode::Right),
            ]),
            prev_condition: KeyBinding::multiple(vec![
                Key::new(KeyCode::BackTab),
                Key::new(KeyCode::Left),
            ]),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            close: Key::new(KeyCode::Esc).into(),
            next_field: KeyBinding::multiple(vec![Key::new(KeyCode::Tab), Key::new(KeyCode::Down)]),
            prev_field: KeyBinding::multiple(vec![
                Key::new(KeyCode::BackTab),
                Key::new(KeyCode::Up),
            ]),
            confirm: Key::new(KeyCode::Enter).into(),
            submit: Key::with_ctrl(KeyCode::Char('s')).into(),
        }
    }
}
