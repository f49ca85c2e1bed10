pub mod actions;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

use std::time::Duration;

pub use actions::*;
use keybindings::KeybindingsConfig;
pub use loader::load;
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Latte".to_string(),
        }
    }
}

/// Behaviour of the dialog system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Hide every other dialog when one is opened.
    pub exclusive: bool,
    /// How long the simulated submission takes before it is acknowledged.
    pub submit_delay_ms: u64,
    /// Message shown once a submission has been acknowledged.
    pub acknowledgement: String,
}

impl ModalConfig {
    pub const fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            exclusive: false,
            submit_delay_ms: 2000,
            acknowledgement: "Vielen Dank! Wir werden Sie in Kürze kontaktieren.".to_string(),
        }
    }
}

/// Timing of toast notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub enter_ms: u64,
    pub dwell_ms: u64,
    pub exit_ms: u64,
    pub max_visible: usize,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            enter_ms: 300,
            dwell_ms: 3000,
            exit_ms: 300,
            max_visible: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub theme: ThemeConfig,
    pub modals: ModalConfig,
    pub toasts: ToastConfig,
    pub keybindings: KeybindingsConfig,
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(!config.modals.exclusive);
        assert_eq!(config.modals.submit_delay(), Duration::from_millis(2000));
        assert_eq!(config.toasts.dwell_ms, 3000);
        assert_eq!(config.theme.name, "Catppuccin Latte");
    }

    #[test]
    fn test_partial_config_overrides() {
        let config: AppConfig = toml::from_str(
            r#"
            [modals]
            exclusive = true

            [keybindings.landing]
            login = "ctrl+l"
            "#,
        )
        .unwrap();

        assert!(config.modals.exclusive);
        assert_eq!(config.modals.submit_delay_ms, 2000);

        let ctrl_l = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert!(config.keybindings.landing.login.matches(&ctrl_l));
        // Untouched bindings keep their defaults
        let b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE);
        assert!(config.keybindings.landing.consultation.matches(&b));
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
            [keybindings.dialog]
            close = "hyper+q"
            "#,
        );
        assert!(result.is_err());
    }
}
