use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rectangle of `percent_x` by `percent_y` centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Fixed-height rectangle, `percent_x` wide, centered in `area`
pub fn centered_fixed(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let y = area.y + (area.height - height) / 2;
    let full_row = Rect::new(area.x, y, area.width, height);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(full_row)[1]
}
