//! Key bindings.
//!
//! A [`Binding`] maps one or more key codes to an action and carries the help
//! text describing it. Components expose their bindings through the
//! [`KeyMap`] trait so help views can list them.

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// A set of keys bound to one action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Keys that trigger the action.
    pub keys: Vec<KeyCode>,
    /// Short key label for help views, e.g. `"enter"`.
    pub help: String,
    /// What the action does, e.g. `"highlight"`.
    pub description: String,
    enabled: bool,
}

impl Binding {
    /// Creates an enabled binding without help text.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: String::new(),
            description: String::new(),
            enabled: true,
        }
    }

    /// Sets the help label and description.
    pub fn with_help(mut self, help: impl Into<String>, description: impl Into<String>) -> Self {
        self.help = help.into();
        self.description = description.into();
        self
    }

    /// Whether the binding reacts to key presses.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether `key_msg` triggers this binding.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        self.enabled && self.keys.contains(&key_msg.key)
    }
}

/// Bindings a component exposes for help views.
pub trait KeyMap {
    /// Bindings for a compact, single-line help view.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped into columns for an expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(key: KeyCode) -> KeyMsg {
        KeyMsg {
            key,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_matches_any_bound_key() {
        let binding = Binding::new(vec![KeyCode::Enter, KeyCode::Char(' ')]);
        assert!(binding.matches(&press(KeyCode::Enter)));
        assert!(binding.matches(&press(KeyCode::Char(' '))));
        assert!(!binding.matches(&press(KeyCode::Char('x'))));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut binding = Binding::new(vec![KeyCode::Enter]);
        binding.set_enabled(false);
        assert!(!binding.enabled());
        assert!(!binding.matches(&press(KeyCode::Enter)));
    }

    #[test]
    fn test_help_text() {
        let binding = Binding::new(vec![KeyCode::Enter]).with_help("enter", "highlight");
        assert_eq!(binding.help, "enter");
        assert_eq!(binding.description, "highlight");
    }
}
