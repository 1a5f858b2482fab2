//! Iteration driver
//!
//! [`ProgressVisualizer::visualize`] wraps a sequence in a [`Visualize`]
//! iterator. Every call to `next` may redraw the bar at a fixed anchor row,
//! then puts the cursor back where the caller's own output left it before
//! the item is handed out.
//!
//! ```no_run
//! use progviz_core::{BarConfig, ProgressVisualizer, VisualizeOptions};
//!
//! # fn main() -> progviz_core::Result<()> {
//! let mut visualizer = ProgressVisualizer::stdout(BarConfig::default())?;
//! for item in visualizer.visualize(vec![10, 20, 30], &VisualizeOptions::new("Load"))? {
//!     let item = item?;
//!     println!("got {item}");
//! }
//! # Ok(())
//! # }
//! ```

use crate::clock::{Clock, SystemClock};
use crate::config::{BarConfig, VisualizeOptions};
use crate::error::Result;
use crate::progress::{ProgressSnapshot, Renderer};
use crate::terminal::{CursorPosition, StdTerminal, Terminal};
use std::iter::FusedIterator;
use std::time::{Duration, Instant};

/// Owns a terminal and a clock and draws one bar per `visualize` call
pub struct ProgressVisualizer<T: Terminal = StdTerminal, C: Clock = SystemClock> {
    config: BarConfig,
    terminal: T,
    clock: C,
}

impl ProgressVisualizer {
    /// Visualizer drawing on stdout with the wall clock
    pub fn stdout(config: BarConfig) -> Result<Self> {
        Self::new(config, StdTerminal::new(), SystemClock)
    }
}

impl<T: Terminal, C: Clock> ProgressVisualizer<T, C> {
    /// Create a visualizer; the configuration is validated here
    pub fn new(config: BarConfig, terminal: T, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            terminal,
            clock,
        })
    }

    /// Bar configuration shared by every call
    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    /// The terminal this visualizer draws on
    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Mutable access to the terminal between calls
    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    /// Give back the terminal and clock
    pub fn into_parts(self) -> (T, C) {
        (self.terminal, self.clock)
    }

    /// Wrap a sequence whose length is known up front
    pub fn visualize<I>(
        &mut self,
        items: I,
        options: &VisualizeOptions,
    ) -> Result<Visualize<'_, I::IntoIter, T, C>>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let total = items.len();
        self.start(items, total, options)
    }

    /// Wrap a sequence of unknown length against a caller-supplied total
    ///
    /// Progress never goes past `total`. If the source ends early, the last
    /// reached count is drawn once more on exhaustion.
    pub fn visualize_with_total<I>(
        &mut self,
        items: I,
        total: usize,
        options: &VisualizeOptions,
    ) -> Result<Visualize<'_, I::IntoIter, T, C>>
    where
        I: IntoIterator,
    {
        self.start(items.into_iter(), total, options)
    }

    fn start<I: Iterator>(
        &mut self,
        items: I,
        total: usize,
        options: &VisualizeOptions,
    ) -> Result<Visualize<'_, I, T, C>> {
        // configuration first: nothing may reach the terminal on bad input
        let fill_char = options.fill_char(self.config.fill_char)?;
        let renderer = Renderer::new(BarConfig {
            fill_char,
            ..self.config.clone()
        });

        let Self {
            terminal, clock, ..
        } = self;

        let run = if total == 0 {
            log::debug!("Nothing to visualize for '{}'", options.description);
            None
        } else {
            let anchor = terminal.cursor_position()?;
            log::debug!(
                "Visualizing '{}' over {total} item(s), anchored at {anchor}",
                options.description
            );
            Some(RunState {
                start_time: clock.now(),
                last_render: None,
                rendered_progress: 0,
                anchor,
            })
        };

        Ok(Visualize {
            items,
            total,
            yielded: 0,
            description: options.description.clone(),
            track_time: options.track_time,
            throttle_interval: options.throttle_interval,
            renderer,
            terminal,
            clock,
            run,
            phase: Phase::NotStarted,
            pending_restore: None,
        })
    }
}

/// Where a [`Visualize`] iterator is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Complete,
}

/// Per-call state, created by `visualize` and dropped with the iterator
#[derive(Debug, Clone, Copy)]
struct RunState {
    start_time: Instant,
    last_render: Option<Instant>,
    rendered_progress: usize,
    anchor: CursorPosition,
}

/// Pass-through iterator that draws the bar as items are taken
///
/// Yields `Ok(item)` for every source item, in order. A terminal failure is
/// yielded once as `Err` and ends the iteration. The source item pulled for
/// that step is dropped, and later source items are never pulled.
pub struct Visualize<'a, I: Iterator, T: Terminal, C: Clock> {
    items: I,
    total: usize,
    yielded: usize,
    description: String,
    track_time: bool,
    throttle_interval: Duration,
    renderer: Renderer,
    terminal: &'a mut T,
    clock: &'a C,
    run: Option<RunState>,
    phase: Phase,
    // set while the cursor sits on the bar line
    pending_restore: Option<CursorPosition>,
}

impl<I: Iterator, T: Terminal, C: Clock> Visualize<'_, I, T, C> {
    /// Total the bar counts towards
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of items handed out so far
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Redraw for `progress` if the throttle allows it
    fn step(&mut self, progress: usize) -> Result<()> {
        let Some(run) = self.run else {
            return Ok(());
        };

        let now = self.clock.now();
        let due = run
            .last_render
            .is_none_or(|last| now.saturating_duration_since(last) >= self.throttle_interval);
        let is_final = progress == self.total && run.rendered_progress != progress;
        if !due && !is_final {
            log::trace!("Throttled render at {progress}/{}", self.total);
            return Ok(());
        }

        // nothing has been printed by the caller before the first item
        let caller = match run.last_render {
            None => run.anchor.next_row(),
            Some(_) => self.terminal.cursor_position()?,
        };
        self.draw(run, progress, now, caller)
    }

    fn draw(
        &mut self,
        run: RunState,
        progress: usize,
        now: Instant,
        caller: CursorPosition,
    ) -> Result<()> {
        let snapshot = ProgressSnapshot::new(
            progress,
            self.total,
            now.saturating_duration_since(run.start_time),
        );
        let line = self
            .renderer
            .render_line(&snapshot, &self.description, self.track_time);

        self.pending_restore = Some(caller);
        self.terminal.move_to(run.anchor)?;
        self.terminal.write_str(&line)?;
        self.terminal.move_to(caller)?;
        self.terminal.flush()?;
        self.pending_restore = None;

        self.run = Some(RunState {
            last_render: Some(now),
            rendered_progress: snapshot.current,
            ..run
        });
        Ok(())
    }

    /// Source exhausted: draw the reached count if it was throttled away
    fn finish(&mut self) -> Result<()> {
        let Some(run) = self.run else {
            return Ok(());
        };

        let reached = self.yielded.min(self.total);
        if reached > 0 && run.rendered_progress != reached {
            let caller = self.terminal.cursor_position()?;
            let now = self.clock.now();
            self.draw(run, reached, now, caller)?;
        }

        log::debug!(
            "Finished '{}' at {reached}/{} after {:?}",
            self.description,
            self.total,
            self.clock.now().saturating_duration_since(run.start_time)
        );
        Ok(())
    }
}

impl<I: Iterator, T: Terminal, C: Clock> Iterator for Visualize<'_, I, T, C> {
    type Item = Result<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.phase == Phase::Complete {
            return None;
        }

        let Some(item) = self.items.next() else {
            self.phase = Phase::Complete;
            return self.finish().err().map(Err);
        };

        self.phase = Phase::Running;
        self.yielded += 1;
        let progress = self.yielded.min(self.total);

        match self.step(progress) {
            Ok(()) => Some(Ok(item)),
            Err(e) => {
                self.phase = Phase::Complete;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.phase {
            Phase::Complete => (0, Some(0)),
            _ => self.items.size_hint(),
        }
    }
}

impl<I: Iterator, T: Terminal, C: Clock> FusedIterator for Visualize<'_, I, T, C> {}

impl<I: Iterator, T: Terminal, C: Clock> Drop for Visualize<'_, I, T, C> {
    fn drop(&mut self) {
        if let Some(position) = self.pending_restore.take() {
            let restored = self
                .terminal
                .move_to(position)
                .and_then(|()| self.terminal.flush());
            if let Err(e) = restored {
                log::warn!("Failed to restore cursor to {position}: {e}");
            }
        }
    }
}
