//! Bar and per-call configuration

use crate::color::ColorName;
use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default bar width in cells
pub const DEFAULT_BAR_LENGTH: usize = 50;
/// Default description printed before the bar
pub const DEFAULT_DESCRIPTION: &str = "Progress";
/// Default fill character
pub const DEFAULT_FILL_CHAR: char = '=';
/// Default minimum time between two redraws
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_millis(80);

/// Appearance of the bar, fixed for the lifetime of a visualizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    pub bar_length: usize,
    pub done_color: ColorName,
    pub progress_color: ColorName,
    pub fill_char: char,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            bar_length: DEFAULT_BAR_LENGTH,
            done_color: ColorName::Green,
            progress_color: ColorName::Magenta,
            fill_char: DEFAULT_FILL_CHAR,
        }
    }
}

impl BarConfig {
    /// Build a config from color names, validating every field
    pub fn from_names(bar_length: usize, done_color: &str, progress_color: &str) -> Result<Self> {
        let config = Self {
            bar_length,
            done_color: done_color.parse()?,
            progress_color: progress_color.parse()?,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the bar length
    pub fn with_bar_length(mut self, bar_length: usize) -> Self {
        self.bar_length = bar_length;
        self
    }

    /// Set the color used once the run is complete
    pub fn with_done_color(mut self, color: ColorName) -> Self {
        self.done_color = color;
        self
    }

    /// Set the color used while the run is in progress
    pub fn with_progress_color(mut self, color: ColorName) -> Self {
        self.progress_color = color;
        self
    }

    /// Check invariants that the type system does not cover
    pub fn validate(&self) -> Result<()> {
        if self.bar_length == 0 {
            return Err(ValidationError::InvalidBarLength.into());
        }
        Ok(())
    }
}

/// Options for a single `visualize` call
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizeOptions {
    pub description: String,
    /// Overrides [`BarConfig::fill_char`] for this call when set
    pub fill: Option<String>,
    pub track_time: bool,
    pub throttle_interval: Duration,
}

impl Default for VisualizeOptions {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
            fill: None,
            track_time: true,
            throttle_interval: DEFAULT_THROTTLE_INTERVAL,
        }
    }
}

impl VisualizeOptions {
    /// Options with the given description and defaults elsewhere
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            ..Self::default()
        }
    }

    /// Set the fill string; it is validated when the call starts
    pub fn with_fill(mut self, fill: &str) -> Self {
        self.fill = Some(fill.to_string());
        self
    }

    /// Enable or disable the ETA / elapsed field
    pub fn with_track_time(mut self, track_time: bool) -> Self {
        self.track_time = track_time;
        self
    }

    /// Set the minimum time between redraws
    pub fn with_throttle_interval(mut self, interval: Duration) -> Self {
        self.throttle_interval = interval;
        self
    }

    /// Set the minimum time between redraws from fractional seconds
    pub fn with_throttle_secs(mut self, seconds: f64) -> Result<Self> {
        self.throttle_interval = throttle_from_secs(seconds)?;
        Ok(self)
    }

    /// The fill character for this call, falling back to `default`
    pub fn fill_char(&self, default: char) -> Result<char> {
        match &self.fill {
            Some(fill) => parse_fill_char(fill),
            None => Ok(default),
        }
    }
}

/// Accept exactly one character
pub fn parse_fill_char(fill: &str) -> Result<char> {
    let mut chars = fill.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ValidationError::invalid_fill_char(fill).into()),
    }
}

/// Convert fractional seconds to a throttle interval
pub fn throttle_from_secs(seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds).map_err(|_| {
        ValidationError::invalid_throttle_interval(&format!(
            "{seconds} is not a finite, non-negative number of seconds"
        ))
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_bar_config_defaults() {
        let config = BarConfig::default();
        assert_eq!(config.bar_length, 50);
        assert_eq!(config.done_color, ColorName::Green);
        assert_eq!(config.progress_color, ColorName::Magenta);
        assert_eq!(config.fill_char, '=');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_names_accepts_known_colors() {
        let config = BarConfig::from_names(20, "cyan", "pink").unwrap();
        assert_eq!(config.bar_length, 20);
        assert_eq!(config.done_color, ColorName::Cyan);
        assert_eq!(config.progress_color, ColorName::Pink);
    }

    #[test]
    fn test_from_names_rejects_unknown_color() {
        let err = BarConfig::from_names(20, "green", "purple").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnsupportedColor { ref name }) if name == "purple"
        ));
    }

    #[test]
    fn test_zero_bar_length_rejected() {
        let err = BarConfig::from_names(0, "green", "magenta").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidBarLength)
        ));
    }

    #[test]
    fn test_visualize_options_defaults() {
        let options = VisualizeOptions::default();
        assert_eq!(options.description, "Progress");
        assert_eq!(options.fill, None);
        assert!(options.track_time);
        assert_eq!(options.throttle_interval, Duration::from_millis(80));
    }

    #[test]
    fn test_fill_char_override() {
        let options = VisualizeOptions::new("Load");
        assert_eq!(options.fill_char('=').unwrap(), '=');

        let options = options.with_fill("#");
        assert_eq!(options.fill_char('=').unwrap(), '#');

        let options = VisualizeOptions::new("Load").with_fill("##");
        assert!(options.fill_char('=').is_err());
    }

    #[test]
    fn test_parse_fill_char() {
        assert_eq!(parse_fill_char("#").unwrap(), '#');
        assert_eq!(parse_fill_char("█").unwrap(), '█');
        assert!(parse_fill_char("").is_err());
        assert!(parse_fill_char("==").is_err());
    }

    #[test]
    fn test_throttle_from_secs() {
        assert_eq!(throttle_from_secs(0.5).unwrap(), Duration::from_millis(500));
        assert_eq!(throttle_from_secs(0.0).unwrap(), Duration::ZERO);
        assert!(throttle_from_secs(-1.0).is_err());
        assert!(throttle_from_secs(f64::NAN).is_err());
        assert!(throttle_from_secs(f64::INFINITY).is_err());
    }

    #[test]
    fn test_bar_config_deserializes_partial_input() {
        let config: BarConfig =
            serde_json::from_str(r#"{"bar_length": 10, "done_color": "blue"}"#).unwrap();
        assert_eq!(config.bar_length, 10);
        assert_eq!(config.done_color, ColorName::Blue);
        assert_eq!(config.progress_color, ColorName::Magenta);
        assert_eq!(config.fill_char, '=');
    }
}
