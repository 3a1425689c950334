//! Default keybindings for the application.
//!
//! Maps key combinations to [`Command`]s. Global bindings win over the
//! bindings of the focused pane; printable characters typed into the input
//! pane become [`Command::InsertChar`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use super::command::Command;
use crate::app::Focus;

/// Represents a key combination (key code + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Creates a key combo with no modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Creates a key combo with Control modifier.
    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }
}

impl From<KeyEvent> for KeyCombo {
    fn from(key: KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

/// Keybinding configuration for the application.
#[derive(Debug, Clone)]
pub struct KeybindingConfig {
    /// Global keybindings (always active)
    pub global: HashMap<KeyCombo, Command>,
    /// Keybindings per focus state
    pub focus: HashMap<Focus, HashMap<KeyCombo, Command>>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingConfig {
    /// Creates a new keybinding configuration with default bindings.
    pub fn new() -> Self {
        let mut config = Self {
            global: HashMap::new(),
            focus: HashMap::new(),
        };
        config.setup_global_bindings();
        config.setup_sidebar_bindings();
        config.setup_input_bindings();
        config
    }

    fn setup_global_bindings(&mut self) {
        self.global
            .insert(KeyCombo::ctrl(KeyCode::Char('c')), Command::Quit);
        self.global.insert(KeyCombo::plain(KeyCode::Esc), Command::Quit);
        self.global
            .insert(KeyCombo::plain(KeyCode::Tab), Command::CycleFocus);
        self.global
            .insert(KeyCombo::new(KeyCode::BackTab, KeyModifiers::SHIFT), Command::CycleFocus);
    }

    fn setup_sidebar_bindings(&mut self) {
        let mut sidebar = HashMap::new();
        sidebar.insert(KeyCombo::plain(KeyCode::Up), Command::MoveUp);
        sidebar.insert(KeyCombo::plain(KeyCode::Down), Command::MoveDown);
        sidebar.insert(KeyCombo::plain(KeyCode::Char('k')), Command::MoveUp);
        sidebar.insert(KeyCombo::plain(KeyCode::Char('j')), Command::MoveDown);
        sidebar.insert(KeyCombo::plain(KeyCode::Enter), Command::OpenSelectedContact);
        sidebar.insert(KeyCombo::plain(KeyCode::Char('r')), Command::Retry);
        self.focus.insert(Focus::Sidebar, sidebar);
    }

    fn setup_input_bindings(&mut self) {
        let mut input = HashMap::new();
        input.insert(KeyCombo::plain(KeyCode::Enter), Command::Submit);
        input.insert(KeyCombo::plain(KeyCode::Backspace), Command::Backspace);
        input.insert(KeyCombo::plain(KeyCode::Delete), Command::DeleteChar);
        input.insert(KeyCombo::plain(KeyCode::Left), Command::MoveCursorLeft);
        input.insert(KeyCombo::plain(KeyCode::Right), Command::MoveCursorRight);
        input.insert(KeyCombo::plain(KeyCode::Home), Command::MoveCursorHome);
        input.insert(KeyCombo::plain(KeyCode::End), Command::MoveCursorEnd);
        input.insert(KeyCombo::ctrl(KeyCode::Char('a')), Command::MoveCursorHome);
        input.insert(KeyCombo::ctrl(KeyCode::Char('e')), Command::MoveCursorEnd);
        input.insert(KeyCombo::ctrl(KeyCode::Char('u')), Command::ClearInput);
        self.focus.insert(Focus::Input, input);
    }

    /// Gets the focus-specific command for a key combo.
    pub fn get_focus(&self, focus: Focus, combo: &KeyCombo) -> Option<&Command> {
        self.focus.get(&focus).and_then(|m| m.get(combo))
    }

    /// Resolve a key press in the given focus.
    pub fn resolve(&self, key: KeyEvent, focus: Focus) -> Option<Command> {
        let combo = KeyCombo::from(key);
        if let Some(cmd) = self.global.get(&combo) {
            return Some(*cmd);
        }
        if let Some(cmd) = self.get_focus(focus, &combo) {
            return Some(*cmd);
        }

        match (focus, key.code) {
            (Focus::Input, KeyCode::Char(c))
                if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() =>
            {
                Some(Command::InsertChar(c))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_combo_plain() {
        let combo = KeyCombo::plain(KeyCode::Enter);
        assert_eq!(combo.code, KeyCode::Enter);
        assert_eq!(combo.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_global_bindings_win_in_every_focus() {
        let config = KeybindingConfig::new();
        for focus in [Focus::Sidebar, Focus::Input] {
            assert_eq!(
                config.resolve(key(KeyCode::Char('c'), KeyModifiers::CONTROL), focus),
                Some(Command::Quit)
            );
            assert_eq!(
                config.resolve(key(KeyCode::Tab, KeyModifiers::NONE), focus),
                Some(Command::CycleFocus)
            );
        }
    }

    #[test]
    fn test_enter_depends_on_focus() {
        let config = KeybindingConfig::new();
        let enter = key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            config.resolve(enter, Focus::Sidebar),
            Some(Command::OpenSelectedContact)
        );
        assert_eq!(config.resolve(enter, Focus::Input), Some(Command::Submit));
    }

    #[test]
    fn test_r_retries_in_sidebar_but_types_in_input() {
        let config = KeybindingConfig::new();
        let r = key(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(config.resolve(r, Focus::Sidebar), Some(Command::Retry));
        assert_eq!(config.resolve(r, Focus::Input), Some(Command::InsertChar('r')));
    }

    #[test]
    fn test_shifted_chars_are_inserted() {
        let config = KeybindingConfig::new();
        assert_eq!(
            config.resolve(key(KeyCode::Char('H'), KeyModifiers::SHIFT), Focus::Input),
            Some(Command::InsertChar('H'))
        );
        assert_eq!(
            config.resolve(key(KeyCode::Char('x'), KeyModifiers::ALT), Focus::Input),
            None
        );
    }

    #[test]
    fn test_unbound_key_in_sidebar() {
        let config = KeybindingConfig::new();
        assert_eq!(
            config.resolve(key(KeyCode::Char('z'), KeyModifiers::NONE), Focus::Sidebar),
            None
        );
    }
}
