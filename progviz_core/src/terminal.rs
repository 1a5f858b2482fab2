//! Terminal capability used by the driver
//!
//! The driver never touches stdout directly. It writes escape sequences and
//! asks for the cursor position through [`Terminal`], which lets tests swap
//! in a fake terminal.

use crate::error::{Result, TerminalError};
use std::fmt;
use std::io::{self, Stdout, Write};

/// How many times [`StdTerminal`] asks for the cursor position before giving up
pub const CURSOR_QUERY_ATTEMPTS: u32 = 2;

/// 1-based cursor coordinates, as used by the ANSI protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorPosition {
    pub row: u16,
    pub col: u16,
}

impl CursorPosition {
    /// Create a position from 1-based coordinates
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Same column, one row down
    pub fn next_row(self) -> Self {
        Self {
            row: self.row.saturating_add(1),
            col: self.col,
        }
    }

    /// Absolute cursor movement sequence (`CSI row ; col H`)
    pub fn move_sequence(&self) -> String {
        format!("\x1b[{};{}H", self.row, self.col)
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.row, self.col)
    }
}

/// Write access and cursor queries for one terminal
pub trait Terminal {
    /// Write raw text or escape sequences
    fn write_str(&mut self, text: &str) -> Result<()>;

    /// Flush buffered output to the device
    fn flush(&mut self) -> Result<()>;

    /// Ask the terminal where the cursor currently is
    fn cursor_position(&mut self) -> Result<CursorPosition>;

    /// Move the cursor to an absolute position
    fn move_to(&mut self, position: CursorPosition) -> Result<()> {
        self.write_str(&position.move_sequence())
    }
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn write_str(&mut self, text: &str) -> Result<()> {
        (**self).write_str(text)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn cursor_position(&mut self) -> Result<CursorPosition> {
        (**self).cursor_position()
    }

    fn move_to(&mut self, position: CursorPosition) -> Result<()> {
        (**self).move_to(position)
    }
}

/// The process's stdout, with cursor queries answered through crossterm
pub struct StdTerminal {
    out: Stdout,
}

impl StdTerminal {
    /// Terminal writing to stdout
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for StdTerminal {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .map_err(|e| TerminalError::write(e).into())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(|e| TerminalError::write(e).into())
    }

    fn cursor_position(&mut self) -> Result<CursorPosition> {
        // the reply reflects only what the terminal has already received
        self.flush()?;

        let mut attempt = 1;
        loop {
            match crossterm::cursor::position() {
                Ok((col, row)) => {
                    return Ok(CursorPosition::new(
                        row.saturating_add(1),
                        col.saturating_add(1),
                    ));
                }
                Err(e) if attempt < CURSOR_QUERY_ATTEMPTS => {
                    log::debug!("Cursor position query failed (attempt {attempt}): {e}");
                    attempt += 1;
                }
                Err(e) => return Err(TerminalError::cursor_query(attempt, e).into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_sequence() {
        assert_eq!(CursorPosition::new(12, 5).move_sequence(), "\x1b[12;5H");
        assert_eq!(CursorPosition::new(1, 1).move_sequence(), "\x1b[1;1H");
    }

    #[test]
    fn test_next_row_keeps_column() {
        let anchor = CursorPosition::new(7, 3);
        assert_eq!(anchor.next_row(), CursorPosition::new(8, 3));
        assert_eq!(
            CursorPosition::new(u16::MAX, 1).next_row(),
            CursorPosition::new(u16::MAX, 1)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CursorPosition::new(4, 10).to_string(), "4;10");
    }

    #[test]
    fn test_std_terminal_writes_without_panic() {
        let mut terminal = StdTerminal::new();
        terminal.write_str("").unwrap();
        terminal.flush().unwrap();
    }
}
