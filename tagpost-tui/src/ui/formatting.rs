use ratatui::{
    style::{Modifier, Style},
    text::Span,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::ThemeColors;
use crate::tagging::view::Chip;

/// Widest a single chip label may render, in terminal cells
pub const MAX_CHIP_WIDTH: usize = 24;

/// Format timestamp for display
pub fn format_timestamp(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// Cut `text` to at most `max_width` cells, ending in an ellipsis when cut
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Spans for one removable chip, e.g. ` Alice × `
pub fn chip_spans(label: &str, highlighted: bool, theme: &ThemeColors) -> Vec<Span<'static>> {
    let mut style = Style::default().fg(theme.text).bg(theme.chip_bg);
    if highlighted {
        style = style.bg(theme.highlight_bg).fg(theme.accent).add_modifier(Modifier::BOLD);
    }
    vec![
        Span::styled(format!(" {} ×", truncate_to_width(label, MAX_CHIP_WIDTH)), style),
        Span::styled(" ", style),
        Span::raw(" "),
    ]
}

/// Spans for a row of tag chips; `highlighted` is the chip under the cursor
pub fn tag_chip_row(chips: &[Chip], highlighted: Option<usize>, theme: &ThemeColors) -> Vec<Span<'static>> {
    chips
        .iter()
        .enumerate()
        .flat_map(|(i, chip)| chip_spans(&chip.label, highlighted == Some(i), theme))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_to_width("Alice", 10), "Alice");
    }

    #[test]
    fn test_long_text_gets_ellipsis() {
        let cut = truncate_to_width("Bartholomew Fitzgerald", 8);
        assert_eq!(cut, "Barthol…");
        assert_eq!(cut.width(), 8);
    }

    #[test]
    fn test_wide_characters_respect_cells() {
        let cut = truncate_to_width("東京都渋谷区", 5);
        assert!(cut.width() <= 5);
        assert!(cut.ends_with('…'));
    }
}
