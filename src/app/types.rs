//! Type definitions for the application state.

/// Which pane receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Focus {
    #[default]
    Sidebar,
    Input,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Input,
            Focus::Input => Focus::Sidebar,
        }
    }
}

/// State of the contact list
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContactsState {
    #[default]
    Loading,
    Loaded,
    Failed(crate::error::FetchFailure),
}
