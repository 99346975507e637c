use serde::{Deserialize, Serialize};

/// Color scheme used by the terminal client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorScheme {
    #[default]
    Default,
    Dark,
    Light,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Default => "Default",
            ColorScheme::Dark => "Dark",
            ColorScheme::Light => "Light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Default" => Some(ColorScheme::Default),
            "Dark" => Some(ColorScheme::Dark),
            "Light" => Some(ColorScheme::Light),
            _ => None,
        }
    }

    /// Next scheme in cycling order
    pub fn next(self) -> Self {
        match self {
            ColorScheme::Default => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Default,
        }
    }
}
