//! Thread header and message pane.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::{DeliveryState, Message};
use crate::thread::ThreadPhase;

use super::helpers::wrap_text;
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_LOCAL, COLOR_REMOTE};

/// Header line: the selected contact, or a prompt to pick one.
pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = match app.thread.selected_contact() {
        Some(contact) => Line::styled(
            contact.display_name.clone(),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ),
        None => Line::styled("Select a contact", Style::default().fg(COLOR_DIM)),
    };
    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(COLOR_BORDER)),
    );
    frame.render_widget(header, area);
}

pub fn render_messages(frame: &mut Frame, area: Rect, app: &App) {
    let width = area.width as usize;
    let lines: Vec<Line> = match app.thread.phase() {
        ThreadPhase::Idle => vec![placeholder("Pick someone on the left to start chatting")],
        ThreadPhase::Loading { .. } => {
            let mut lines = vec![placeholder("Loading messages…")];
            lines.extend(buffered_lines(app, width));
            lines
        }
        ThreadPhase::Failed { error } => {
            let mut lines = vec![
                Line::styled(error.user_message(), Style::default().fg(COLOR_ERROR))
                    .alignment(Alignment::Center),
                placeholder("Press r in the sidebar to retry"),
            ];
            lines.extend(buffered_lines(app, width));
            lines
        }
        ThreadPhase::Populated if app.thread.messages().is_empty() => {
            vec![placeholder("No messages yet. Say hi!")]
        }
        ThreadPhase::Populated => app
            .thread
            .messages()
            .iter()
            .flat_map(|m| message_lines(m, app.thread.delivery(&m.id), width, false))
            .collect(),
    };

    let scroll = bottom_offset(lines.len(), area.height);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

/// Vertical scroll that keeps the last line in view, saturating at `u16::MAX`.
fn bottom_offset(total_lines: usize, height: u16) -> u16 {
    u16::try_from(total_lines.saturating_sub(height as usize)).unwrap_or(u16::MAX)
}

/// Messages held back until history lands, dimmed, with their markers.
fn buffered_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    app.thread
        .buffered()
        .iter()
        .flat_map(|m| message_lines(m, app.thread.delivery(&m.id), width, true))
        .collect()
}

fn placeholder(text: &str) -> Line<'static> {
    Line::styled(text.to_string(), Style::default().fg(COLOR_DIM)).alignment(Alignment::Center)
}

fn delivery_marker(state: Option<DeliveryState>) -> Span<'static> {
    match state {
        Some(DeliveryState::Pending) => Span::styled(" …", Style::default().fg(COLOR_DIM)),
        Some(DeliveryState::Sent) => Span::styled(" ✓", Style::default().fg(COLOR_DIM)),
        Some(DeliveryState::Failed) => Span::styled(" ✗ not sent", Style::default().fg(COLOR_ERROR)),
        None => Span::raw(""),
    }
}

/// Lines for one message: wrapped body plus a timestamp line. Local messages
/// are right-aligned, remote ones left-aligned.
fn message_lines(
    message: &Message,
    delivery: Option<DeliveryState>,
    width: usize,
    dimmed: bool,
) -> Vec<Line<'static>> {
    let (color, alignment) = if message.is_local() {
        (COLOR_LOCAL, Alignment::Right)
    } else {
        (COLOR_REMOTE, Alignment::Left)
    };
    let mut style = Style::default().fg(color);
    if dimmed {
        style = style.add_modifier(Modifier::DIM);
    }

    // Leave a margin so the two sides stay visually apart
    let bubble_width = (width * 3 / 4).max(10);
    let mut lines: Vec<Line<'static>> = wrap_text(&message.body, bubble_width)
        .into_iter()
        .map(|text| Line::styled(text, style).alignment(alignment))
        .collect();

    let time = message.timestamp.with_timezone(&chrono::Local).format("%H:%M").to_string();
    let meta = Line::from(vec![
        Span::styled(time, Style::default().fg(COLOR_DIM)),
        delivery_marker(delivery),
    ])
    .alignment(alignment);
    lines.push(meta);
    lines.push(Line::raw(""));
    lines
}
