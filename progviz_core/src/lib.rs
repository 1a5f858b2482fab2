//! progviz Core Library
//!
//! Draws a single-line, colorized progress bar in the terminal while a
//! caller iterates over a sequence. Items pass through untouched; the bar is
//! redrawn at a fixed anchor row and the cursor is put back where the
//! caller's output left it before each item is handed out.

pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod progress;
pub mod terminal;
pub mod visualizer;

// Re-export main types
pub use clock::{Clock, SystemClock};
pub use color::{ColorName, colorize};
pub use config::{BarConfig, VisualizeOptions, parse_fill_char, throttle_from_secs};
pub use error::{Error, Result};
pub use progress::{ProgressSnapshot, Renderer, format_duration};
pub use terminal::{CursorPosition, StdTerminal, Terminal};
pub use visualizer::{Phase, ProgressVisualizer, Visualize};
