use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::formatting::{chip_spans, tag_chip_row};
use super::super::theme::{get_theme_colors, ThemeColors};
use super::utils::centered_rect;
use crate::app::{App, ComposerFocus};
use crate::tagging::{view, TagSession};

/// Render the composer: content, tag chips, location chip, counter and hints
pub fn render_composer_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    let (Some(mode), Some(tags)) = (&app.composer_state.mode, app.active_tags()) else {
        return;
    };

    let modal_area = centered_rect(70, 80, area);
    frame.render_widget(Clear, modal_area);

    let outer_block = Block::default()
        .title(format!(" {} ", mode.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(theme.background));

    let inner = outer_block.inner(modal_area);
    frame.render_widget(outer_block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Content
            Constraint::Length(3), // Tagged friends
            Constraint::Length(3), // Location
            Constraint::Length(3), // Character counter / error
            Constraint::Length(3), // Instructions
        ])
        .split(inner);

    let focus = app.composer_state.focus;

    let content_block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(&theme, focus == ComposerFocus::Content))
        .title(" Content ");
    let content_inner = content_block.inner(chunks[0]);
    frame.render_widget(content_block, chunks[0]);
    frame.render_widget(&app.composer_state.textarea, content_inner);

    render_tag_row(frame, app, tags, &theme, chunks[1]);
    render_location_row(frame, tags, &theme, focus == ComposerFocus::Location, chunks[2]);

    let status = match &app.composer_state.error {
        Some(err) => Line::from(Span::styled(err.clone(), Style::default().fg(theme.error))),
        None => {
            let count = app.composer_state.char_count();
            let max = app.composer_state.max_chars;
            let color = if count >= max {
                theme.error
            } else if count + 20 >= max {
                theme.warning
            } else {
                theme.text_dim
            };
            Line::from(Span::styled(format!("{}/{}", count, max), Style::default().fg(color)))
        }
    };
    frame.render_widget(
        Paragraph::new(status)
            .alignment(Alignment::Right)
            .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme.border))),
        chunks[3],
    );

    let instructions = match focus {
        ComposerFocus::Content => "Ctrl+S: Save | Ctrl+T: Tag friends | Ctrl+L: Location | Tab: Next | Esc: Cancel",
        ComposerFocus::Tags => "←/→: Select chip | x: Remove | Enter: Tag friends | Tab: Next | Esc: Cancel",
        ComposerFocus::Location => "Enter: Edit location | x: Remove | Tab: Next | Esc: Cancel",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(instructions, Style::default().fg(theme.text_dim))))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme.border))),
        chunks[4],
    );
}

fn focus_border(theme: &ThemeColors, focused: bool) -> Style {
    if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border)
    }
}

fn render_tag_row(frame: &mut Frame, app: &App, tags: &TagSession, theme: &ThemeColors, area: Rect) {
    let focused = app.composer_state.focus == ComposerFocus::Tags;
    let chips = view::tag_chips(tags);

    let line = if chips.resolving {
        Line::from(Span::styled(
            "Loading tagged friends...",
            Style::default().fg(theme.text_dim).add_modifier(Modifier::ITALIC),
        ))
    } else if chips.is_empty() {
        Line::from(Span::styled("No friends tagged", Style::default().fg(theme.text_dim)))
    } else {
        let highlighted = focused.then_some(app.composer_state.selected_chip);
        Line::from(tag_chip_row(chips.chips, highlighted, theme))
    };

    frame.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(theme, focused))
                .title(" With "),
        ),
        area,
    );
}

fn render_location_row(frame: &mut Frame, tags: &TagSession, theme: &ThemeColors, focused: bool, area: Rect) {
    let line = match view::location_chip(tags) {
        Some(location) => Line::from(chip_spans(&format!("📍 {}", location), focused, theme)),
        None => Line::from(Span::styled("No location", Style::default().fg(theme.text_dim))),
    };

    frame.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(theme, focused))
                .title(" At "),
        ),
        area,
    );
}
