//! Color themes for console output
//!
//! Each theme maps every severity and every record column to a crossterm
//! style. File output is never styled.

use crossterm::style::{Attribute, Color, ContentStyle, Stylize};
use serde::{Deserialize, Serialize};

use crate::error::LoggerError;
use crate::severity::Severity;

/// Named color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorTheme {
    #[default]
    Classic,
    DarkMode,
    Neon,
    Pastel,
    Cyberpunk,
}

/// Resolved styles for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Style per severity, indexed like [`Severity::ALL`]
    levels: [ContentStyle; 6],
    /// Timestamp column
    pub date: ContentStyle,
    /// Identifier column
    pub identifier: ContentStyle,
    /// File name part of the location column
    pub filename: ContentStyle,
    /// Line number part of the location column
    pub lineno: ContentStyle,
    /// Message text
    pub message: ContentStyle,
}

impl Palette {
    /// Get the style for a severity label
    pub fn level(&self, severity: Severity) -> ContentStyle {
        self.levels[severity as usize]
    }
}

fn fg(color: Color) -> ContentStyle {
    ContentStyle::new().with(color)
}

fn bg(color: Color) -> ContentStyle {
    ContentStyle::new().on(color)
}

impl ColorTheme {
    /// Get the theme name used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTheme::Classic => "classic",
            ColorTheme::DarkMode => "dark-mode",
            ColorTheme::Neon => "neon",
            ColorTheme::Pastel => "pastel",
            ColorTheme::Cyberpunk => "cyberpunk",
        }
    }

    /// Parse a theme name
    pub fn try_parse(name: &str) -> Result<Self, LoggerError> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "classic" => Ok(ColorTheme::Classic),
            "dark-mode" | "dark" => Ok(ColorTheme::DarkMode),
            "neon" => Ok(ColorTheme::Neon),
            "pastel" => Ok(ColorTheme::Pastel),
            "cyberpunk" => Ok(ColorTheme::Cyberpunk),
            _ => Err(LoggerError::ConfigurationDefault {
                field: "theme",
                value: name.to_string(),
                default: ColorTheme::Classic.as_str().to_string(),
            }),
        }
    }

    /// Build the styles for this theme
    pub fn palette(&self) -> Palette {
        // FATAL looks the same in every theme
        let fatal = bg(Color::DarkRed)
            .with(Color::White)
            .attribute(Attribute::Bold)
            .attribute(Attribute::SlowBlink);

        match self {
            ColorTheme::Classic => Palette {
                levels: [
                    fg(Color::Blue),
                    bg(Color::DarkBlue),
                    bg(Color::DarkYellow),
                    bg(Color::DarkRed),
                    bg(Color::DarkRed).with(Color::Yellow),
                    fatal,
                ],
                date: fg(Color::DarkYellow),
                identifier: fg(Color::Green).attribute(Attribute::Bold),
                filename: fg(Color::Cyan),
                lineno: fg(Color::Magenta),
                message: ContentStyle::new(),
            },
            ColorTheme::DarkMode => Palette {
                levels: [
                    fg(Color::DarkGrey).attribute(Attribute::Dim),
                    fg(Color::DarkCyan),
                    fg(Color::Yellow).attribute(Attribute::Bold),
                    fg(Color::Red).attribute(Attribute::Bold),
                    fg(Color::DarkRed).on(Color::Black).attribute(Attribute::Bold),
                    fatal,
                ],
                date: fg(Color::White).attribute(Attribute::Dim),
                identifier: fg(Color::Blue).attribute(Attribute::Bold),
                filename: fg(Color::Cyan).attribute(Attribute::Bold),
                lineno: fg(Color::Magenta).attribute(Attribute::Bold),
                message: fg(Color::White).attribute(Attribute::Bold),
            },
            ColorTheme::Neon => Palette {
                levels: [
                    fg(Color::Cyan),
                    fg(Color::Green).attribute(Attribute::Bold),
                    fg(Color::Yellow).attribute(Attribute::Bold),
                    fg(Color::Magenta).attribute(Attribute::Bold),
                    bg(Color::Magenta).with(Color::White),
                    fatal,
                ],
                date: fg(Color::Magenta),
                identifier: fg(Color::Cyan).attribute(Attribute::Bold),
                filename: fg(Color::Green),
                lineno: fg(Color::Yellow),
                message: fg(Color::White),
            },
            ColorTheme::Pastel => Palette {
                levels: [
                    fg(Color::Rgb { r: 174, g: 198, b: 207 }),
                    fg(Color::Rgb { r: 119, g: 221, b: 119 }),
                    fg(Color::Rgb { r: 253, g: 253, b: 150 }),
                    fg(Color::Rgb { r: 255, g: 105, b: 97 }),
                    bg(Color::Rgb { r: 255, g: 179, b: 71 }).with(Color::Black),
                    fatal,
                ],
                date: fg(Color::Rgb { r: 207, g: 207, b: 196 }),
                identifier: fg(Color::Rgb { r: 179, g: 158, b: 181 }).attribute(Attribute::Bold),
                filename: fg(Color::Rgb { r: 150, g: 111, b: 214 }),
                lineno: fg(Color::Rgb { r: 244, g: 154, b: 194 }),
                message: ContentStyle::new(),
            },
            ColorTheme::Cyberpunk => Palette {
                levels: [
                    fg(Color::Rgb { r: 0, g: 255, b: 159 }),
                    fg(Color::Rgb { r: 0, g: 184, b: 255 }),
                    fg(Color::Rgb { r: 255, g: 240, b: 31 }).attribute(Attribute::Bold),
                    fg(Color::Rgb { r: 255, g: 0, b: 110 }).attribute(Attribute::Bold),
                    bg(Color::Rgb { r: 214, g: 0, b: 255 }).with(Color::Black),
                    fatal,
                ],
                date: fg(Color::Rgb { r: 189, g: 0, b: 255 }),
                identifier: fg(Color::Rgb { r: 0, g: 255, b: 255 }).attribute(Attribute::Bold),
                filename: fg(Color::Rgb { r: 255, g: 0, b: 200 }),
                lineno: fg(Color::Rgb { r: 255, g: 240, b: 31 }),
                message: fg(Color::White),
            },
        }
    }
}

impl From<String> for ColorTheme {
    fn from(s: String) -> Self {
        ColorTheme::try_parse(&s).unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            ColorTheme::Classic
        })
    }
}

impl From<ColorTheme> for String {
    fn from(theme: ColorTheme) -> Self {
        theme.as_str().to_string()
    }
}
