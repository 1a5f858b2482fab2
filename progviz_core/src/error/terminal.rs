//! Terminal I/O error types

use thiserror::Error;

/// Failures talking to the terminal
#[derive(Error, Debug)]
pub enum TerminalError {
    /// Writing an escape sequence or line failed
    #[error("Failed to write to terminal: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },

    /// The cursor-position query got no usable reply
    #[error("Failed to query cursor position after {attempts} attempt(s): {source}")]
    CursorQuery {
        attempts: u32,
        #[source]
        source: std::io::Error,
    },
}

impl TerminalError {
    /// Create a write error
    pub fn write(source: std::io::Error) -> Self {
        Self::Write { source }
    }

    /// Create a cursor query error
    pub fn cursor_query(attempts: u32, source: std::io::Error) -> Self {
        Self::CursorQuery { attempts, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;

    #[test]
    fn test_write_error() {
        let error = TerminalError::write(io::Error::other("disk full"));
        assert!(error.to_string().contains("Failed to write to terminal"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_cursor_query_error() {
        let error = TerminalError::cursor_query(
            1,
            io::Error::new(io::ErrorKind::InvalidData, "malformed reply"),
        );

        match &error {
            TerminalError::CursorQuery { attempts, source } => {
                assert_eq!(*attempts, 1);
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
            _ => panic!("Expected CursorQuery error"),
        }
        assert!(error.to_string().contains("malformed reply"));
    }
}
