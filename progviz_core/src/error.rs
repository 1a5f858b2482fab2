//! Error types for the progviz core library
//!
//! Errors fall into two categories: configuration problems detected before
//! anything is drawn, and terminal failures raised while drawing.

use thiserror::Error;

pub mod terminal;
pub mod validation;

pub use self::terminal::TerminalError;
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the progviz core library
///
/// - Validation errors: bad colors, fill characters, bar lengths, intervals
/// - Terminal errors: failed writes and failed cursor-position queries
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration and input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Terminal I/O errors
    #[error(transparent)]
    Terminal(#[from] TerminalError),
}

impl Error {
    /// Whether this error was raised by configuration validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
