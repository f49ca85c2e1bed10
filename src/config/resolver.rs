use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{DialogAction, GlobalAction, LandingAction, NavAction};
use crate::config::keybindings::KeybindingsConfig;

/// Resolves key events against the configured keybindings.
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    // Global actions
    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.matches(event),
            GlobalAction::Suspend => kb.suspend.matches(event),
        }
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.display(),
            GlobalAction::Suspend => kb.suspend.display(),
        }
    }

    // Navigation actions
    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => kb.up.matches(event),
            NavAction::Down => kb.down.matches(event),
            NavAction::PageUp => kb.page_up.matches(event),
            NavAction::PageDown => kb.page_down.matches(event),
            NavAction::Home => kb.home.matches(event),
            NavAction::End => kb.end.matches(event),
            NavAction::Select => kb.select.matches(event),
        }
    }

    // Landing actions
    pub fn matches_landing(&self, event: &KeyEvent, action: LandingAction) -> bool {
        let kb = &self.keybindings.landing;
        match action {
            LandingAction::Login => kb.login.matches(event),
            LandingAction::Consultation => kb.consultation.matches(event),
            LandingAction::ToggleMenu => kb.menu.matches(event),
            LandingAction::Search => kb.search.matches(event),
            LandingAction::NextCondition => kb.next_condition.matches(event),
            LandingAction::PrevCondition => kb.prev_condition.matches(event),
        }
    }

    pub fn display_landing(&self, action: LandingAction) -> String {
        let kb = &self.keybindings.landing;
        match action {
            LandingAction::Login => kb.login.display(),
            LandingAction::Consultation => kb.consultation.display(),
            LandingAction::ToggleMenu => kb.menu.display(),
            LandingAction::Search => kb.search.display(),
            LandingAction::NextCondition => kb.next_condition.display(),
            LandingAction::PrevCondition => kb.prev_condition.display(),
        }
    }

    // Dialog actions
    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Close => kb.close.matches(event),
            DialogAction::NextField => kb.next_field.matches(event),
            DialogAction::PrevField => kb.prev_field.matches(event),
            DialogAction::Confirm => kb.confirm.matches(event),
            DialogAction::Submit => kb.submit.matches(event),
        }
    }

    pub fn display_dialog(&self, action: DialogAction) -> String {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Close => kb.close.display(),
            DialogAction::NextField => kb.next_field.display(),
            DialogAction::PrevField => kb.prev_field.display(),
            DialogAction::Confirm => kb.confirm.display(),
            DialogAction::Submit => kb.submit.display(),
        }
    }
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn test_default_dialog_bindings() {
        let resolver = KeyResolver::default();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(resolver.matches_dialog(&esc, DialogAction::Close));
        assert!(resolver.matches_dialog(&save, DialogAction::Submit));
        assert!(!resolver.matches_dialog(&esc, DialogAction::Submit));
    }

    #[test]
    fn test_landing_triggers() {
        let resolver = KeyResolver::default();
        let l = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        let b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE);

        assert!(resolver.matches_landing(&l, LandingAction::Login));
        assert!(resolver.matches_landing(&b, LandingAction::Consultation));
        assert_eq!(resolver.display_landing(LandingAction::Login), "l");
    }
}
