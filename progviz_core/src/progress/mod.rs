//! Progress state and line rendering
//!
//! A [`ProgressSnapshot`] is the input to one render; the [`Renderer`]
//! turns it into a single terminal line.

pub mod renderer;
pub mod utils;

pub use renderer::Renderer;
pub use utils::{bar_fill, format_duration, percentage};

use std::time::Duration;

/// Point-in-time view of a run, derived for each render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub current: usize,
    pub total: usize,
    pub elapsed: Duration,
}

impl ProgressSnapshot {
    /// Create a snapshot; `current` is clamped to `total`
    pub fn new(current: usize, total: usize, elapsed: Duration) -> Self {
        Self {
            current: current.min(total),
            total,
            elapsed,
        }
    }

    /// Whether every item has been reached
    pub fn is_complete(&self) -> bool {
        self.current == self.total
    }

    /// Linear projection of the remaining time
    ///
    /// `None` until at least one item has completed. Saturates at
    /// [`Duration::MAX`] when the projection does not fit.
    pub fn eta(&self) -> Option<Duration> {
        if self.current == 0 {
            return None;
        }
        let remaining = (self.total - self.current) as f64;
        let secs = self.elapsed.as_secs_f64() * remaining / self.current as f64;
        Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
    }
}
