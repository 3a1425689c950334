//! Command definitions for keyboard input handling.
//!
//! The [`Command`] enum decouples key bindings from their effects.

/// Every action a key press can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // =========================================================================
    // Global
    // =========================================================================
    /// Quit the application (Esc, Ctrl+C)
    Quit,
    /// Toggle focus between sidebar and input (Tab)
    CycleFocus,

    // =========================================================================
    // Sidebar
    // =========================================================================
    /// Move the contact cursor up
    MoveUp,
    /// Move the contact cursor down
    MoveDown,
    /// Open the thread with the contact under the cursor (Enter)
    OpenSelectedContact,
    /// Retry a failed contacts or history fetch (r)
    Retry,

    // =========================================================================
    // Input editing
    // =========================================================================
    /// Insert a character at the cursor
    InsertChar(char),
    /// Delete the character before the cursor
    Backspace,
    /// Delete the character at the cursor
    DeleteChar,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,
    /// Clear the whole line (Ctrl+U)
    ClearInput,
    /// Send the input line (Enter)
    Submit,
}

impl Command {
    /// Whether this command edits the input line.
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            Command::InsertChar(_)
                | Command::Backspace
                | Command::DeleteChar
                | Command::MoveCursorLeft
                | Command::MoveCursorRight
                | Command::MoveCursorHome
                | Command::MoveCursorEnd
                | Command::ClearInput
        )
    }
}
