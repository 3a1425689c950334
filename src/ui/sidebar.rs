//! Contact sidebar: session user on top, contacts with unread badges below.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, ContactsState, Focus};

use super::helpers::truncate_string;
use super::theme::{
    COLOR_ACCENT, COLOR_BADGE, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM, COLOR_ERROR,
};

pub fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let border = if app.focus == Focus::Sidebar {
        COLOR_BORDER_FOCUSED
    } else {
        COLOR_BORDER
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", app.session.user.display_name),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ));

    let inner_width = area.width.saturating_sub(2) as usize;

    match &app.contacts_state {
        ContactsState::Loading => {
            let text = Paragraph::new(Line::styled("Loading contacts…", Style::default().fg(COLOR_DIM)))
                .block(block);
            frame.render_widget(text, area);
        }
        ContactsState::Failed(error) => {
            let text = Paragraph::new(vec![
                Line::styled(
                    truncate_string(&error.user_message(), inner_width),
                    Style::default().fg(COLOR_ERROR),
                ),
                Line::styled("r to retry", Style::default().fg(COLOR_DIM)),
            ])
            .block(block);
            frame.render_widget(text, area);
        }
        ContactsState::Loaded if app.contacts.is_empty() => {
            let text = Paragraph::new(Line::styled("No contacts yet", Style::default().fg(COLOR_DIM)))
                .block(block);
            frame.render_widget(text, area);
        }
        ContactsState::Loaded => {
            let selected_id = app.thread.selected_contact().map(|c| c.id.as_str());
            let items: Vec<ListItem> = app
                .contacts
                .iter()
                .map(|contact| {
                    let unread = app.thread.unread(&contact.id);
                    let badge = if unread > 0 {
                        format!(" ({})", unread)
                    } else {
                        String::new()
                    };
                    let name_width = inner_width.saturating_sub(badge.len() + 2);
                    let mut name_style = Style::default().fg(COLOR_ACCENT);
                    if Some(contact.id.as_str()) == selected_id {
                        name_style = name_style.add_modifier(Modifier::BOLD);
                    }
                    ListItem::new(Line::from(vec![
                        Span::styled(truncate_string(&contact.display_name, name_width), name_style),
                        Span::styled(badge, Style::default().fg(COLOR_BADGE)),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_symbol("> ")
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            let mut state = ListState::default().with_selected(Some(app.cursor));
            frame.render_stateful_widget(list, area, &mut state);
        }
    }
}
