//! Validation related error types

use thiserror::Error;

/// Validation and configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Color name outside the supported table
    #[error(
        "Unsupported color: {name} (expected one of black, red, green, yellow, blue, magenta, cyan, white, pink, reset)"
    )]
    UnsupportedColor { name: String },

    /// Fill string that is not exactly one character
    #[error("The fill character must be a single character, got {length} in '{value}'")]
    InvalidFillChar { value: String, length: usize },

    /// Bar length of zero
    #[error("Bar length must be greater than 0")]
    InvalidBarLength,

    /// Throttle interval that is negative or not finite
    #[error("Invalid throttle interval: {reason}")]
    InvalidThrottleInterval { reason: String },
}

impl ValidationError {
    /// Create an unsupported color error
    pub fn unsupported_color(name: &str) -> Self {
        Self::UnsupportedColor {
            name: name.to_string(),
        }
    }

    /// Create an invalid fill character error
    pub fn invalid_fill_char(value: &str) -> Self {
        Self::InvalidFillChar {
            value: value.to_string(),
            length: value.chars().count(),
        }
    }

    /// Create an invalid throttle interval error
    pub fn invalid_throttle_interval(reason: &str) -> Self {
        Self::InvalidThrottleInterval {
            reason: reason.to_string(),
        }
    }
}
