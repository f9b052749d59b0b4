use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub puzzle: PuzzleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    /// Minimum columns shown for the walker, even before any cell is set
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_path_index")]
    pub show_path_index: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct PuzzleConfig {
    /// Puzzle text file preloaded into the walker
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Fallback tracing filter when RUST_LOG is unset
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_cols() -> i32 { 5 }
fn default_rows() -> i32 { 5 }
fn default_cell_size() -> f32 { 40.0 }
fn default_window_title() -> String { "Pipe Maze".to_string() }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_show_path_index() -> bool { true }
fn default_filter() -> String { "pipemaze=info".to_string() }
fn default_enable_action_log() -> bool { true }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_path_index: default_show_path_index(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from `path`, or use defaults if it is missing or
    /// unreadable
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::or_default(Self::try_load_from(path), path)
    }

    /// Read and parse a config file without logging or falling back
    pub fn try_load_from(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Settle a `try_load_from` result, logging the outcome. A missing file
    /// or a parse failure both fall back to defaults.
    pub fn or_default(loaded: Result<Self>, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match loaded {
            Ok(config) => {
                info!(path = %path.display(), "loaded configuration");
                config
            }
            Err(Error::Io(_)) => {
                info!(path = %path.display(), "no config found, using defaults");
                Config::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                Config::default()
            }
        }
    }
}
