use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::super::theme::get_theme_colors;
use super::utils::centered_fixed;
use crate::app::App;

/// Blocking alert; any key dismisses it
pub fn render_alert_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let Some(message) = app.active_alert() else {
        return;
    };

    let modal_area = centered_fixed(50, 7, area);
    frame.render_widget(Clear, modal_area);

    let alert = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key", Style::default().fg(theme.text_dim))),
    ])
    .centered()
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Alert ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.warning))
            .style(Style::default().bg(theme.background)),
    );
    frame.render_widget(alert, modal_area);
}
