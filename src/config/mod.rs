//! Configuration management for Gazette.
//!
//! Configuration is read from `~/.config/gazette/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! Key bindings are fixed and deliberately absent from the file.

pub mod colors;

pub use colors::ColorConfig;

use crate::fetcher::FeedConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub colors: ColorConfig,
    pub feed: FeedConfig,
    pub reader: ReaderConfig,
}

/// Settings for the article viewer and loading animation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Column at which converted articles are wrapped (default: 100)
    pub wrap_width: usize,

    /// Loading spinner frame interval in milliseconds (default: 100)
    pub tick_interval_ms: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wrap_width: 100,
            tick_interval_ms: 100,
        }
    }
}

impl ReaderConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl Config {
    /// Load configuration from the default path, creating it on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file. Missing fields use defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/gazette/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gazette").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn default_config_content() -> &'static str {
        r##"# Gazette Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
# - 256-color palette indices: "170"

[colors]
# List title badge
title_fg = "#FFFDF5"
title_bg = "#25A065"

# Highlighted row
selected = "170"

# List rows
item_title = "Reset"
item_detail = "DarkGray"

# Loading screen
header = "Reset"
spinner = "5"

# Viewer footer hint
pager_help = "#5C5C5C"

# Status bar
filter_prompt = "Yellow"
status_fg = "Gray"
status_bg = "Reset"

# Fatal error text
error = "LightRed"

[feed]
# API root and story list to read
base_url = "https://hacker-news.firebaseio.com/v0"
story_list = "topstories"

# Entries fetched at startup
limit = 30

# Per-request timeout in seconds
timeout_secs = 10

[reader]
# Column at which articles are wrapped
wrap_width = 100

# Loading spinner frame interval (milliseconds)
tick_interval_ms = 100
"##
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
