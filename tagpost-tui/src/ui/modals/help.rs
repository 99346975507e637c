use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::theme::get_theme_colors;
use super::utils::centered_rect;
use crate::app::App;

/// Render help modal
pub fn render_help_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    let modal_area = centered_rect(80, 85, area);
    frame.render_widget(Clear, modal_area);

    let mut lines = vec![Line::from("")];

    for (category, items) in get_shortcuts_for_context(app) {
        lines.push(Line::from(Span::styled(
            category,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        for (key, description) in items {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<15}", key), Style::default().fg(theme.success)),
                Span::styled(description, Style::default().fg(theme.text)),
            ]));
        }

        lines.push(Line::from(""));
    }

    let help_content = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
            .title(" Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(theme.background)),
    );

    frame.render_widget(help_content, modal_area);
}

type Shortcuts = Vec<(&'static str, Vec<(&'static str, &'static str)>)>;

fn get_shortcuts_for_context(app: &App) -> Shortcuts {
    let general = (
        "General",
        vec![("?", "Toggle this help"), ("c", "Cycle color scheme"), ("q / Esc", "Quit")],
    );

    if !app.composer_state.is_open() {
        return vec![
            ("Posts", vec![("n", "New post"), ("e", "Edit last saved post")]),
            general,
        ];
    }

    vec![
        (
            "Composer",
            vec![
                ("Ctrl+S", "Save post"),
                ("Ctrl+T", "Tag friends"),
                ("Ctrl+L", "Edit location"),
                ("Tab / S-Tab", "Move focus"),
                ("Esc", "Discard and close"),
            ],
        ),
        (
            "Tagged friends",
            vec![("← / →", "Select chip"), ("x / Del", "Remove chip"), ("Enter", "Open picker")],
        ),
        (
            "Friend picker",
            vec![("↑ / ↓", "Move"), ("Space", "Toggle friend"), ("Enter", "Done"), ("Esc", "Cancel")],
        ),
        ("Location", vec![("Enter", "Edit / save"), ("x / Del", "Remove"), ("Esc", "Cancel")]),
    ]
}
