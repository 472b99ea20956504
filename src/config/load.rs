//! The main config loading module for trek.
//!
//! Handles loading and deserializing settings from `trek.toml`.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig] used for parsing.
//! A missing or invalid file never stops trek: the internal defaults are used instead.
//!
//! Also implements default config generation for `trek --init`.

use crate::config::{General, InternalGeneral, InternalPreview, Preview};
use crate::utils::get_home;

use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Raw configuration as read from the toml file.
/// It is converted into the main [Config] struct, which clamps out of range values.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    preview: Preview,
}

/// Main configuration struct for trek.
#[derive(Debug, Clone)]
pub struct Config {
    general: InternalGeneral,
    preview: InternalPreview,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            preview: InternalPreview::from(raw.preview),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// If the file does not exist or fails to parse, returns the default configuration.
    ///
    /// Called by the entry point to load config at startup.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::info!("no config at {}, using internal defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("invalid config {}: {}", path.display(), e);
                    eprintln!("Error parsing config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("cannot read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses a config from toml text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn preview(&self) -> &InternalPreview {
        &self.preview
    }

    /// Determine the default configuration file path.
    /// Checks the TREK_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/trek/trek.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("TREK_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("trek/trek.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/trek/trek.toml");
        }
        PathBuf::from("trek.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from(RawConfig::default())
    }
}

const DEFAULT_TOML: &str = r##"# trek.toml - default configuration for trek
#
# Commented values are the internal defaults.

[general]
# show_hidden = false
# Entries kept per directory read, sorted first
# max_entries = 300
# max_search_results = 150
# max_visited_dirs = 5000
# Characters needed before a search starts
# search_min_chars = 2
# search_debounce_ms = 400

[preview]
# enabled = true
# max_lines = 100
# max_bytes = 2000
# Entries listed when previewing a directory
# dir_entries = 80
"##;
