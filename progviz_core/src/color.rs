//! Color table and ANSI colorization
//!
//! The palette is fixed: eight base foreground colors, `pink` (bright
//! magenta) and `reset`. Names are validated when parsed, so a [`ColorName`]
//! value can always be rendered.

use crate::error::ValidationError;
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ANSI reset sequence appended after every colorized span
pub const RESET: &str = "\x1b[0m";

/// Supported color names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorName {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Pink,
    Reset,
}

impl ColorName {
    /// Every supported color, in table order
    pub const ALL: [ColorName; 10] = [
        ColorName::Black,
        ColorName::Red,
        ColorName::Green,
        ColorName::Yellow,
        ColorName::Blue,
        ColorName::Magenta,
        ColorName::Cyan,
        ColorName::White,
        ColorName::Pink,
        ColorName::Reset,
    ];

    /// Lowercase name as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::Black => "black",
            ColorName::Red => "red",
            ColorName::Green => "green",
            ColorName::Yellow => "yellow",
            ColorName::Blue => "blue",
            ColorName::Magenta => "magenta",
            ColorName::Cyan => "cyan",
            ColorName::White => "white",
            ColorName::Pink => "pink",
            ColorName::Reset => "reset",
        }
    }

    /// Full start sequence for this color, e.g. `\x1b[35m`
    pub fn start_code(&self) -> String {
        let sgr = match self.as_colored() {
            Some(color) => color.to_fg_str(),
            None => "0".into(),
        };
        format!("\x1b[{sgr}m")
    }

    fn as_colored(&self) -> Option<Color> {
        match self {
            ColorName::Black => Some(Color::Black),
            ColorName::Red => Some(Color::Red),
            ColorName::Green => Some(Color::Green),
            ColorName::Yellow => Some(Color::Yellow),
            ColorName::Blue => Some(Color::Blue),
            ColorName::Magenta => Some(Color::Magenta),
            ColorName::Cyan => Some(Color::Cyan),
            ColorName::White => Some(Color::White),
            ColorName::Pink => Some(Color::BrightMagenta),
            ColorName::Reset => None,
        }
    }
}

impl FromStr for ColorName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorName::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| ValidationError::unsupported_color(s))
    }
}

impl TryFrom<String> for ColorName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorName> for String {
    fn from(color: ColorName) -> Self {
        color.as_str().to_string()
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap `text` in the color's start code and a trailing reset
pub fn colorize(text: &str, color: ColorName) -> String {
    format!("{}{text}{RESET}", color.start_code())
}
