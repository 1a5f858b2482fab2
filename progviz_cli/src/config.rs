use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use progviz_core::config::{DEFAULT_DESCRIPTION, DEFAULT_THROTTLE_INTERVAL};
use progviz_core::{BarConfig, ColorName, VisualizeOptions, parse_fill_char};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Prefix for environment overrides, e.g. `PROGVIZ_BAR__BAR_LENGTH=30`
pub const ENV_PREFIX: &str = "PROGVIZ_";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub bar: BarConfig,

    #[serde(default)]
    pub run: RunConfig,
}

/// Defaults for a single visualize call
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RunConfig {
    pub description: String,
    pub track_time: bool,
    pub throttle_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
            track_time: true,
            throttle_ms: DEFAULT_THROTTLE_INTERVAL.as_millis() as u64,
        }
    }
}

/// Command-line values that win over every other layer
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub bar_length: Option<usize>,
    pub done_color: Option<ColorName>,
    pub progress_color: Option<ColorName>,
    pub description: Option<String>,
    pub track_time: Option<bool>,
    pub throttle_ms: Option<u64>,
}

impl AppConfig {
    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(&mut self, overrides: Overrides) {
        if let Some(bar_length) = overrides.bar_length {
            self.bar.bar_length = bar_length;
        }
        if let Some(color) = overrides.done_color {
            self.bar.done_color = color;
        }
        if let Some(color) = overrides.progress_color {
            self.bar.progress_color = color;
        }
        if let Some(description) = overrides.description {
            self.run.description = description;
        }
        if let Some(track_time) = overrides.track_time {
            self.run.track_time = track_time;
        }
        if let Some(throttle_ms) = overrides.throttle_ms {
            self.run.throttle_ms = throttle_ms;
        }
    }

    /// Per-call options built from the `[run]` section
    pub fn visualize_options(&self) -> VisualizeOptions {
        VisualizeOptions::new(&self.run.description)
            .with_track_time(self.run.track_time)
            .with_throttle_interval(Duration::from_millis(self.run.throttle_ms))
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Get the default XDG-compliant configuration path
    fn default_config_path() -> PathBuf {
        // Check for XDG_CONFIG_HOME override first (Linux/macOS)
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("progviz/config.toml");
        }

        #[cfg(target_os = "linux")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config/progviz/config.toml")
        }

        #[cfg(target_os = "macos")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Library/Application Support/progviz/config.toml")
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("progviz")
                .join("config.toml")
        }
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    ///
    /// Command-line overrides are applied on top by the caller.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: AppConfig = figment
            .extract()
            .with_context(|| format!("Failed to load {}", self.config_path.display()))?;
        config
            .bar
            .validate()
            .context("Invalid [bar] configuration")?;
        Ok(config)
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let toml_string = toml::to_string(&self.load()?)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(i) => Ok(i.to_string()),
            toml::Value::Boolean(b) => Ok(b.to_string()),
            _ => anyhow::bail!("Value at '{}' is not a simple type", key),
        }
    }

    /// Set a configuration value by key (dot notation) and save the file
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed_value = parse_config_value(key, value)?;

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)
                .with_context(|| format!("Failed to read {}", self.config_path.display()))?;
            toml::from_str(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let Some((section, field)) = key.split_once('.') else {
            anyhow::bail!("Invalid key path: {}", key);
        };
        let toml::Value::Table(root) = &mut config else {
            anyhow::bail!("Configuration file is not a table");
        };
        match root
            .entry(section.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()))
        {
            toml::Value::Table(table) => {
                table.insert(field.to_string(), parsed_value);
            }
            _ => anyhow::bail!("Invalid key path: expected table at '{}'", section),
        }

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))?;

        Ok(())
    }

    /// List all resolved configuration values, sorted by key
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let toml_string = toml::to_string(&self.load()?)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        match value {
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    Self::collect_values(val, new_prefix, items);
                }
            }
            toml::Value::String(s) => items.push((prefix, s.clone())),
            toml::Value::Integer(i) => items.push((prefix, i.to_string())),
            toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
            _ => {}
        }
    }
}

/// Validate a value for a known key and convert it to its TOML type
fn parse_config_value(key: &str, value: &str) -> Result<toml::Value> {
    match key {
        "bar.bar_length" => {
            let length: i64 = value
                .parse()
                .context("bar_length must be a positive integer")?;
            if length < 1 {
                anyhow::bail!("bar_length must be at least 1");
            }
            Ok(toml::Value::Integer(length))
        }
        "bar.done_color" | "bar.progress_color" => {
            let color: ColorName = value.parse()?;
            Ok(toml::Value::String(color.to_string()))
        }
        "bar.fill_char" => Ok(toml::Value::String(parse_fill_char(value)?.to_string())),
        "run.description" => Ok(toml::Value::String(value.to_string())),
        "run.track_time" => {
            let enabled: bool = value.parse().context("Value must be 'true' or 'false'")?;
            Ok(toml::Value::Boolean(enabled))
        }
        "run.throttle_ms" => {
            let millis: i64 = value
                .parse()
                .context("throttle_ms must be a non-negative integer")?;
            if millis < 0 {
                anyhow::bail!("throttle_ms must be a non-negative integer");
            }
            Ok(toml::Value::Integer(millis))
        }
        _ => anyhow::bail!("Unknown configuration key '{}'", key),
    }
}
