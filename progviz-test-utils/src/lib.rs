//! Test utilities for progviz
//!
//! This crate provides a scripted fake terminal and a manually driven clock
//! for testing the progress driver without a real TTY.

pub mod mocks;

// Re-export commonly used types
pub use mocks::{FakeTerminal, ManualClock, TerminalEvent, strip_ansi};
