//! Input handling module for keyboard and command processing.
//!
//! Key presses are translated to a [`Command`] by the [`KeybindingConfig`]
//! and then executed against the [`App`].
//!
//! ```text
//! KeyEvent -> KeybindingConfig::resolve() -> Command -> App::execute_command()
//! ```

pub mod buffer;
pub mod command;
pub mod keybindings;

pub use buffer::InputBuffer;
pub use command::Command;
pub use keybindings::{KeyCombo, KeybindingConfig};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::app::App;

impl App {
    /// Handle a key press. Returns `true` if it was bound to something.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Only react to presses; some terminals also report releases
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match self.keybindings.resolve(key, self.focus) {
            Some(cmd) => {
                self.execute_command(cmd);
                true
            }
            None => false,
        }
    }

    /// Insert bracketed-paste text into the input line. The input is a
    /// single line, so line breaks become spaces.
    pub fn handle_paste(&mut self, text: &str) {
        self.focus = crate::app::Focus::Input;
        self.notice = None;
        for c in text.chars() {
            match c {
                '\r' => {}
                '\n' | '\t' => self.input.insert(' '),
                c if c.is_control() => {}
                c => self.input.insert(c),
            }
        }
        self.mark_dirty();
    }

    /// Execute a command against the app state.
    pub fn execute_command(&mut self, cmd: Command) {
        self.mark_dirty();
        if cmd.is_editing() {
            self.notice = None;
        }

        match cmd {
            Command::Quit => self.should_quit = true,
            Command::CycleFocus => self.cycle_focus(),
            Command::MoveUp => self.move_up(),
            Command::MoveDown => self.move_down(),
            Command::OpenSelectedContact => self.open_selected_contact(),
            Command::Retry => self.retry(),
            Command::InsertChar(c) => self.input.insert(c),
            Command::Backspace => self.input.backspace(),
            Command::DeleteChar => self.input.delete(),
            Command::MoveCursorLeft => self.input.move_left(),
            Command::MoveCursorRight => self.input.move_right(),
            Command::MoveCursorHome => self.input.move_home(),
            Command::MoveCursorEnd => self.input.move_end(),
            Command::ClearInput => self.input.clear(),
            Command::Submit => self.submit_input(),
        }
    }
}
