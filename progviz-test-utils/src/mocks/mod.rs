//! Mock implementations for testing

mod clock;
mod terminal;

pub use clock::ManualClock;
pub use terminal::{FakeTerminal, TerminalEvent, strip_ansi};
