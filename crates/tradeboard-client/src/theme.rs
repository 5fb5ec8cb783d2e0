// crates/tradeboard-client/src/theme.rs

//! Colour palettes for the dashboard.

use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Palette selector as written in config files and env vars.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {0:?} (expected \"dark\" or \"light\")")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeName {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeName::Dark),
            "light" => Ok(ThemeName::Light),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Borders of focused widgets, titles.
    pub accent: Color,
    pub text: Color,
    /// Secondary text, hints.
    pub muted: Color,
    /// Success, backend online.
    pub positive: Color,
    /// Errors, backend offline.
    pub negative: Color,
    pub warning: Color,
    /// First comparison instrument and the close line.
    pub series_a: Color,
    /// Second comparison instrument and volume bars.
    pub series_b: Color,
    /// Background of the selected table row.
    pub highlight: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl From<ThemeName> for Theme {
    fn from(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Theme::dark(),
            ThemeName::Light => Theme::light(),
        }
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            accent: Color::Cyan,
            text: Color::White,
            muted: Color::Gray,
            positive: Color::Green,
            negative: Color::Red,
            warning: Color::Yellow,
            series_a: Color::Rgb(0, 200, 255),
            series_b: Color::Rgb(255, 120, 200),
            highlight: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            accent: Color::Blue,
            text: Color::Black,
            muted: Color::DarkGray,
            positive: Color::Rgb(0, 128, 0),
            negative: Color::Rgb(180, 0, 0),
            warning: Color::Rgb(170, 110, 0),
            series_a: Color::Rgb(0, 90, 200),
            series_b: Color::Rgb(200, 0, 120),
            highlight: Color::Rgb(210, 210, 210),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_parse_case_insensitively() {
        assert_eq!("Light".parse::<ThemeName>(), Ok(ThemeName::Light));
        let err = "neon".parse::<ThemeName>().unwrap_err();
        assert_eq!(err.to_string(), "unknown theme \"neon\" (expected \"dark\" or \"light\")");
    }
}
