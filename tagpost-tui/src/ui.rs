// UI module, split into cohesive submodules
mod formatting;
mod modals;
pub mod theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::tagging::TagSelection;
use formatting::format_timestamp;
use modals::{
    render_alert_modal, render_composer_modal, render_help_modal, render_location_editor_modal,
    render_tag_picker_modal,
};
use theme::get_theme_colors;

const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 20;

/// Render the UI
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let theme = get_theme_colors(app);

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Terminal Too Small",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Minimum size: {}x{}", MIN_WIDTH, MIN_HEIGHT),
                Style::default().fg(theme.text),
            )),
            Line::from(Span::styled(
                format!("Current size: {}x{}", area.width, area.height),
                Style::default().fg(theme.warning),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error)),
        );
        frame.render_widget(warning, area);
        return;
    }

    render_main_screen(frame, app, area);

    // Overlays, bottom to top
    if app.composer_state.is_open() {
        render_composer_modal(frame, app, area);
        render_tag_picker_modal(frame, app, area);
        render_location_editor_modal(frame, app, area);
        render_alert_modal(frame, app, area);
    }
    if app.show_help {
        render_help_modal(frame, app, area);
    }
}

fn render_main_screen(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled("tagpost", Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", app.api_client.base_url()), Style::default().fg(theme.text_dim)),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border)));
    frame.render_widget(header, chunks[0]);

    let mut lines = Vec::new();
    if let Some(message) = &app.status_message {
        lines.push(Line::from(Span::styled(message.clone(), Style::default().fg(theme.success))));
        lines.push(Line::from(""));
    }
    match &app.last_saved {
        Some(post) => {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("@{}", post.author_username),
                    Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", format_timestamp(&post.created_at)), Style::default().fg(theme.text_dim)),
            ]));
            lines.push(Line::from(Span::styled(post.content.clone(), Style::default().fg(theme.text))));
            if let Some(location) = post.location.as_deref().filter(|l| !l.is_empty()) {
                lines.push(Line::from(Span::styled(
                    format!("📍 {}", location),
                    Style::default().fg(theme.accent),
                )));
            }
            if let Some(tagged) = &post.tagged_friends {
                let count = TagSelection::from_tagged(tagged).len();
                if count > 0 {
                    lines.push(Line::from(Span::styled(
                        format!("with {} friend(s)", count),
                        Style::default().fg(theme.text_dim),
                    )));
                }
            }
        }
        None => lines.push(Line::from(Span::styled(
            "Nothing saved yet. Press n to write a post.",
            Style::default().fg(theme.text_dim),
        ))),
    }

    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Last saved ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(body, chunks[1]);

    let hints = Paragraph::new(Span::styled(
        "n: New post | e: Edit last post | c: Colors | ?: Help | q: Quit",
        Style::default().fg(theme.text_dim),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme.border)));
    frame.render_widget(hints, chunks[2]);
}
