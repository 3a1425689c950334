//! Navigation methods for the App.

use super::{App, Focus};

impl App {
    /// Toggle focus between the sidebar and the input line
    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.toggled();
    }

    /// Move the contact cursor up
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the contact cursor down
    pub fn move_down(&mut self) {
        if !self.contacts.is_empty() && self.cursor < self.contacts.len() - 1 {
            self.cursor += 1;
        }
    }

    /// Open the highlighted contact's thread and move focus to the input.
    pub fn open_selected_contact(&mut self) {
        let Some(contact) = self.highlighted_contact().cloned() else {
            return;
        };
        let ticket = self.thread.select_contact(&contact);
        self.request_history(ticket);
        self.focus = Focus::Input;
    }
}
