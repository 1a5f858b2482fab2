//! Fake terminal for testing

use progviz_core::error::TerminalError;
use progviz_core::progress::renderer::CLEAR_LINE;
use progviz_core::{CursorPosition, Result, Terminal};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// Everything the driver did to the terminal, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// Text written by the driver (move sequences are recorded as `MoveTo`)
    Write(String),
    /// Absolute cursor move
    MoveTo(CursorPosition),
    /// Cursor position query and the answer given
    Query(CursorPosition),
    /// Flush
    Flush,
    /// Output printed by the code under test between items
    CallerOutput(String),
}

#[derive(Debug)]
struct State {
    events: Vec<TerminalEvent>,
    cursor: CursorPosition,
    queries: usize,
    writes: usize,
    fail_query_at: Option<usize>,
    fail_write_at: Option<usize>,
}

/// In-memory terminal that tracks a simulated cursor
///
/// Clones share state, so a test can keep one handle while the visualizer
/// borrows another, then print "caller output" between items.
#[derive(Debug, Clone)]
pub struct FakeTerminal {
    state: Rc<RefCell<State>>,
}

impl FakeTerminal {
    /// Fake terminal with the cursor at `row;col`
    pub fn new(row: u16, col: u16) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                events: Vec::new(),
                cursor: CursorPosition::new(row, col),
                queries: 0,
                writes: 0,
                fail_query_at: None,
                fail_write_at: None,
            })),
        }
    }

    /// Make the `n`th cursor query (1-based) fail
    pub fn fail_query_at(self, n: usize) -> Self {
        self.state.borrow_mut().fail_query_at = Some(n);
        self
    }

    /// Make the `n`th write (1-based, moves included) fail
    pub fn fail_write_at(self, n: usize) -> Self {
        self.state.borrow_mut().fail_write_at = Some(n);
        self
    }

    /// Simulate the code under test printing one line
    pub fn print_line(&self, text: &str) {
        let mut state = self.state.borrow_mut();
        state.cursor = CursorPosition::new(state.cursor.row.saturating_add(1), 1);
        state
            .events
            .push(TerminalEvent::CallerOutput(format!("{text}\n")));
    }

    /// Current simulated cursor
    pub fn cursor(&self) -> CursorPosition {
        self.state.borrow().cursor
    }

    /// All recorded events
    pub fn events(&self) -> Vec<TerminalEvent> {
        self.state.borrow().events.clone()
    }

    /// Number of cursor queries answered or failed
    pub fn query_count(&self) -> usize {
        self.state.borrow().queries
    }

    /// Rendered progress lines, raw
    pub fn renders(&self) -> Vec<String> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                TerminalEvent::Write(text) if text.starts_with(CLEAR_LINE) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Rendered progress lines with escape sequences removed
    pub fn visible_renders(&self) -> Vec<String> {
        self.renders().iter().map(|line| strip_ansi(line)).collect()
    }

    /// Whether the driver produced any output at all
    pub fn is_untouched(&self) -> bool {
        self.state
            .borrow()
            .events
            .iter()
            .all(|event| matches!(event, TerminalEvent::CallerOutput(_)))
    }

    fn record_write(&self, event: TerminalEvent) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.writes += 1;
        if state.fail_write_at == Some(state.writes) {
            return Err(TerminalError::write(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "fake terminal write failure",
            ))
            .into());
        }
        if let TerminalEvent::MoveTo(position) = event {
            state.cursor = position;
        }
        state.events.push(event);
        Ok(())
    }
}

impl Terminal for FakeTerminal {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.record_write(TerminalEvent::Write(text.to_string()))
    }

    fn flush(&mut self) -> Result<()> {
        self.state.borrow_mut().events.push(TerminalEvent::Flush);
        Ok(())
    }

    fn cursor_position(&mut self) -> Result<CursorPosition> {
        let mut state = self.state.borrow_mut();
        state.queries += 1;
        if state.fail_query_at == Some(state.queries) {
            return Err(TerminalError::cursor_query(
                1,
                io::Error::new(io::ErrorKind::InvalidData, "malformed cursor report"),
            )
            .into());
        }
        let cursor = state.cursor;
        state.events.push(TerminalEvent::Query(cursor));
        Ok(cursor)
    }

    fn move_to(&mut self, position: CursorPosition) -> Result<()> {
        self.record_write(TerminalEvent::MoveTo(position))
    }
}

/// Remove CSI escape sequences (`ESC [ ... final-byte`) and carriage returns
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\x1b' if chars.peek() == Some(&'[') => {
                chars.next();
                // parameters and intermediates, then one final byte in @..~
                for next in chars.by_ref() {
                    if ('@'..='~').contains(&next) {
                        break;
                    }
                }
            }
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}
