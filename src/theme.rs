use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An `r, g, b` color variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const DARK: Rgb = Rgb(10, 10, 20);
    pub const LIGHT: Rgb = Rgb(255, 255, 255);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// The pair of color variables every widget is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    /// Foreground: text and borders.
    pub dark: Rgb,
    /// Background.
    pub light: Rgb,
}

/// Day or night appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ThemeChoice {
    #[default]
    Day,
    Night,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown theme '{0}', expected 'day' or 'night'")]
pub struct ParseThemeError(pub String);

impl FromStr for ThemeChoice {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ThemeChoice::Day),
            "night" => Ok(ThemeChoice::Night),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 2] = [Self::Day, Self::Night];

    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Night => "Night",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }

    /// Night swaps the two variables.
    pub fn colors(self) -> ThemeColors {
        match self {
            Self::Day => ThemeColors {
                dark: Rgb::DARK,
                light: Rgb::LIGHT,
            },
            Self::Night => ThemeColors {
                dark: Rgb::LIGHT,
                light: Rgb::DARK,
            },
        }
    }

    /// Guess the terminal background from `COLORFGBG` (`"fg;bg"`).
    pub fn detect() -> Option<Self> {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| Self::from_colorfgbg(&v))
    }

    fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        // ANSI 0-6 and 8 are dark backgrounds
        if bg <= 6 || bg == 8 {
            Some(Self::Night)
        } else {
            Some(Self::Day)
        }
    }
}
