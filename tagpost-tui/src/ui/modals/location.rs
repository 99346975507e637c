use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::super::theme::get_theme_colors;
use super::utils::centered_fixed;
use crate::app::App;
use crate::tagging::view;

/// Render the one-line location editor
pub fn render_location_editor_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let Some(editor) = app.active_tags().and_then(view::location_editor) else {
        return;
    };

    let modal_area = centered_fixed(60, 8, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Location ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let input = Paragraph::new(Line::from(vec![
        Span::styled(editor.input.to_string(), Style::default().fg(theme.text)),
        Span::styled("█", Style::default().fg(theme.primary)),
    ]))
    .wrap(Wrap { trim: false })
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border)));
    frame.render_widget(input, chunks[0]);

    let counter_color = if editor.over_limit() { theme.error } else { theme.text_dim };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{}/{}", editor.char_count, editor.max_chars),
            Style::default().fg(counter_color),
        ))
        .right_aligned(),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(Span::styled("Enter: Save | Esc: Cancel", Style::default().fg(theme.text_dim))).centered(),
        chunks[2],
    );
}
