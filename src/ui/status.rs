//! Status line and input box.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Focus};
use crate::traits::ConnectionState;

use super::theme::{
    COLOR_ACTIVE, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM, COLOR_ERROR, COLOR_WARNING,
};

fn connection_span(state: &ConnectionState) -> Span<'static> {
    match state {
        ConnectionState::Connected => Span::styled("● online", Style::default().fg(COLOR_ACTIVE)),
        ConnectionState::Reconnecting { attempt } => Span::styled(
            format!("◌ reconnecting ({})", attempt),
            Style::default().fg(COLOR_WARNING),
        ),
        ConnectionState::Disconnected => {
            Span::styled("○ offline", Style::default().fg(COLOR_ERROR))
        }
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![connection_span(&app.connection)];
    if let Some(notice) = &app.notice {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.clone(), Style::default().fg(COLOR_WARNING)));
    } else {
        spans.push(Span::styled(
            "  tab: switch pane  esc: quit",
            Style::default().fg(COLOR_DIM),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Input box. Returns the absolute cursor position when the input has focus.
pub fn render_input(frame: &mut Frame, area: Rect, app: &App) -> Option<(u16, u16)> {
    let focused = app.focus == Focus::Input;
    let border = if focused { COLOR_BORDER_FOCUSED } else { COLOR_BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let inner_width = area.width.saturating_sub(2) as usize;
    let column = app.input.cursor_column();
    // Scroll horizontally so the cursor stays inside the box
    let offset = column.saturating_sub(inner_width.saturating_sub(1));

    let content = if app.input.is_empty() && !focused {
        Line::styled("Type a message…", Style::default().fg(COLOR_DIM))
    } else {
        Line::raw(app.input.text().to_string())
    };
    let paragraph = Paragraph::new(content)
        .block(block)
        .scroll((0, offset as u16));
    frame.render_widget(paragraph, area);

    focused.then(|| {
        let x = area.x + 1 + (column - offset) as u16;
        (x, area.y + 1)
    })
}
