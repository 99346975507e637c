use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::super::formatting::{truncate_to_width, MAX_CHIP_WIDTH};
use super::super::theme::get_theme_colors;
use super::utils::centered_rect;
use crate::app::App;
use crate::tagging::view::{self, PickerView};

/// Render the friend picker over the composer
pub fn render_tag_picker_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let Some(tags) = app.active_tags() else {
        return;
    };
    let picker = view::picker(tags);
    if picker == PickerView::Hidden {
        return;
    }

    let modal_area = centered_rect(50, 60, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Tag Friends ")
        .title_bottom(Line::from(" Space: Toggle | Enter: Done | Esc: Cancel ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(theme.background));

    match picker {
        PickerView::Hidden => {}
        PickerView::Loading => {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("Loading friends...", Style::default().fg(theme.text_dim))),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(loading, modal_area);
        }
        PickerView::Failed(message) => {
            let failed = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(message.to_string(), Style::default().fg(theme.error))),
                Line::from(""),
                Line::from(Span::styled(
                    "Close and reopen the picker to retry",
                    Style::default().fg(theme.text_dim),
                )),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(failed, modal_area);
        }
        PickerView::Rows(rows) if rows.is_empty() => {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("No friends yet", Style::default().fg(theme.text_dim))),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, modal_area);
        }
        PickerView::Rows(rows) => {
            let items: Vec<ListItem> = rows
                .iter()
                .map(|row| {
                    let (mark, mark_style) = if row.checked {
                        ("[x] ", Style::default().fg(theme.success).add_modifier(Modifier::BOLD))
                    } else {
                        ("[ ] ", Style::default().fg(theme.text_dim))
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(mark, mark_style),
                        Span::styled(format!("{} ", row.avatar_marker()), Style::default().fg(theme.accent)),
                        Span::styled(
                            truncate_to_width(row.label, MAX_CHIP_WIDTH * 2),
                            Style::default().fg(theme.text),
                        ),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().bg(theme.highlight_bg).add_modifier(Modifier::BOLD))
                .highlight_symbol("> ");

            let mut state = ListState::default();
            state.select(Some(app.composer_state.picker_index.min(rows.len() - 1)));
            frame.render_stateful_widget(list, modal_area, &mut state);
        }
    }
}
