use ratatui::style::Color;
use tagpost_types::ColorScheme;

use crate::app::App;

pub struct ThemeColors {
    pub primary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_dim: Color,
    pub background: Color,
    pub border: Color,
    pub chip_bg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub highlight_bg: Color,
}

/// Get theme colors based on the configured color scheme
pub fn get_theme_colors(app: &App) -> ThemeColors {
    theme_for(app.color_scheme)
}

pub fn theme_for(scheme: ColorScheme) -> ThemeColors {
    match scheme {
        // Terminal green
        ColorScheme::Default => ThemeColors {
            primary: Color::Rgb(0, 255, 0),
            accent: Color::Rgb(0, 255, 100),
            text: Color::Rgb(0, 255, 0),
            text_dim: Color::Rgb(0, 150, 0),
            background: Color::Black,
            border: Color::Rgb(0, 200, 0),
            chip_bg: Color::Rgb(0, 70, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            highlight_bg: Color::Rgb(0, 50, 0),
        },

        // Dark with blue accents
        ColorScheme::Dark => ThemeColors {
            primary: Color::Rgb(100, 200, 255),
            accent: Color::Rgb(255, 100, 200),
            text: Color::Rgb(220, 220, 220),
            text_dim: Color::Rgb(120, 120, 120),
            background: Color::Rgb(20, 20, 25),
            border: Color::Rgb(60, 60, 70),
            chip_bg: Color::Rgb(45, 60, 90),
            success: Color::Rgb(100, 255, 150),
            warning: Color::Rgb(255, 200, 100),
            error: Color::Rgb(255, 100, 100),
            highlight_bg: Color::Rgb(40, 40, 50),
        },

        // Light with dark text
        ColorScheme::Light => ThemeColors {
            primary: Color::Rgb(0, 100, 200),
            accent: Color::Rgb(200, 0, 100),
            text: Color::Rgb(30, 30, 30),
            text_dim: Color::Rgb(100, 100, 100),
            background: Color::Rgb(250, 250, 250),
            border: Color::Rgb(180, 180, 180),
            chip_bg: Color::Rgb(215, 230, 250),
            success: Color::Rgb(0, 150, 50),
            warning: Color::Rgb(200, 150, 0),
            error: Color::Rgb(200, 0, 0),
            highlight_bg: Color::Rgb(230, 240, 255),
        },
    }
}
