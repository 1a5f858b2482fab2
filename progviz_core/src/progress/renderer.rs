//! Progress line rendering
//!
//! Turns a [`ProgressSnapshot`] into one terminal line: description, bar,
//! percentage, count and an optional time field.

use super::ProgressSnapshot;
use super::utils::{bar_fill, format_duration, percentage};
use crate::color::{ColorName, colorize};
use crate::config::BarConfig;

/// Carriage return followed by erase-entire-line
pub const CLEAR_LINE: &str = "\r\x1b[2K";
/// Move the cursor far right; terminals clamp it to the last column
pub const CURSOR_TO_LINE_END: &str = "\x1b[999C";

/// Formats progress lines for one bar configuration
#[derive(Debug, Clone)]
pub struct Renderer {
    config: BarConfig,
}

impl Renderer {
    /// Create a renderer for the given configuration
    pub fn new(config: BarConfig) -> Self {
        Self { config }
    }

    /// The configuration this renderer draws with
    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    /// Render a full line, including the clear prefix and the trailing
    /// cursor-to-end-of-line sequence
    pub fn render_line(
        &self,
        snapshot: &ProgressSnapshot,
        description: &str,
        show_time: bool,
    ) -> String {
        let complete = snapshot.is_complete();
        let (bar_color, text_color) = if complete {
            (self.config.done_color, self.config.done_color)
        } else {
            (self.config.progress_color, ColorName::Reset)
        };

        let mut line = String::with_capacity(self.config.bar_length + description.len() + 64);
        line.push_str(CLEAR_LINE);
        line.push_str(description);
        line.push_str(": [");
        line.push_str(&colorize(&self.bar_body(snapshot), bar_color));
        line.push_str("] ");
        line.push_str(&colorize(
            &format!("{:.2}%", percentage(snapshot.current, snapshot.total)),
            text_color,
        ));
        line.push(' ');
        line.push_str(&colorize(
            &format!("({}/{})", snapshot.current, snapshot.total),
            text_color,
        ));

        if show_time && let Some(field) = time_field(snapshot) {
            line.push(' ');
            line.push_str(&colorize(&field, text_color));
        }

        line.push_str(CURSOR_TO_LINE_END);
        line
    }

    /// Fill characters followed by padding spaces, without brackets
    fn bar_body(&self, snapshot: &ProgressSnapshot) -> String {
        let (filled, pending) = bar_fill(self.config.bar_length, snapshot.current, snapshot.total);
        let mut body = String::with_capacity(self.config.bar_length * self.config.fill_char.len_utf8());
        body.extend(std::iter::repeat_n(self.config.fill_char, filled));
        body.extend(std::iter::repeat_n(' ', pending));
        body
    }
}

/// `ETA: ...` while running, `Elapsed: ...` once complete
fn time_field(snapshot: &ProgressSnapshot) -> Option<String> {
    if snapshot.is_complete() {
        return Some(format!(
            "Elapsed: {}",
            format_duration(snapshot.elapsed.as_secs())
        ));
    }
    snapshot
        .eta()
        .map(|eta| format!("ETA: {}", format_duration(eta.as_secs())))
}
