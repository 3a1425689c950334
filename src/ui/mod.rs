//! UI rendering for chitchat
//!
//! One screen:
//! - Left: contact sidebar with unread badges
//! - Right: thread header, messages, status line and input box

mod conversation;
mod helpers;
mod sidebar;
mod status;
mod theme;

pub use helpers::{truncate_string, wrap_text};
pub use theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_LOCAL, COLOR_REMOTE};

use ratatui::{
    layout::{Constraint, Direction, Layout, Position},
    Frame,
};

use crate::app::App;
use conversation::{render_header, render_messages};
use sidebar::render_sidebar;
use status::{render_input, render_status};

/// Width of the contact sidebar
pub const SIDEBAR_WIDTH: u16 = 28;

/// Render the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(frame.area());

    render_sidebar(frame, columns[0], app);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(columns[1]);

    render_header(frame, rows[0], app);
    render_messages(frame, rows[1], app);
    render_status(frame, rows[2], app);
    if let Some((x, y)) = render_input(frame, rows[3], app) {
        frame.set_cursor_position(Position::new(x, y));
    }
}
