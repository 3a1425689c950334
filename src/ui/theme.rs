//! Color theme constants
//!
//! Minimal dark palette used throughout the UI.

use ratatui::style::Color;

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border of the focused pane
pub const COLOR_BORDER_FOCUSED: Color = Color::White;

/// Accent color for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Messages typed by the session user
pub const COLOR_LOCAL: Color = Color::Cyan;

/// Messages from the peer
pub const COLOR_REMOTE: Color = Color::White;

/// Unread badge
pub const COLOR_BADGE: Color = Color::Yellow;

/// Connected indicator
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Reconnecting indicator
pub const COLOR_WARNING: Color = Color::Yellow;

/// Errors and failed deliveries
pub const COLOR_ERROR: Color = Color::Red;
