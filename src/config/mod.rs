// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language
//! - `[history]` - Undo stack capacity
//! - `[autosave]` - Whether and how eagerly the board is persisted
//! - `[canvas]` - Layout spacing and the size of newly created segments
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `MOODBOARD_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use moodboard::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.history.capacity = Some(250);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::board::HistoryCapacity;
use crate::domain::settings::AutosaveDelay;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Undo/redo settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryConfig {
    /// Number of snapshots kept before the oldest are evicted.
    #[serde(
        default = "default_history_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

impl HistoryConfig {
    /// Returns the configured capacity, clamped to the valid range.
    #[must_use]
    pub fn capacity(&self) -> HistoryCapacity {
        self.capacity.map(HistoryCapacity::new).unwrap_or_default()
    }
}

/// Autosave settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutosaveConfig {
    /// Whether committed board changes are written automatically.
    #[serde(default = "default_autosave_enabled")]
    pub enabled: bool,

    /// Quiet period in milliseconds before a burst of changes is written.
    #[serde(
        default = "default_autosave_debounce_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub debounce_ms: Option<u64>,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: default_autosave_enabled(),
            debounce_ms: default_autosave_debounce_ms(),
        }
    }
}

impl AutosaveConfig {
    /// Returns the configured debounce, clamped to the valid range.
    #[must_use]
    pub fn delay(&self) -> AutosaveDelay {
        self.debounce_ms.map(AutosaveDelay::new).unwrap_or_default()
    }
}

/// Canvas layout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanvasConfig {
    /// Horizontal gap between segments in the stacked layout.
    #[serde(
        default = "default_segment_gap",
        skip_serializing_if = "Option::is_none"
    )]
    pub segment_gap: Option<f64>,

    /// Width given to newly created segments.
    #[serde(
        default = "default_segment_width",
        skip_serializing_if = "Option::is_none"
    )]
    pub segment_width: Option<f64>,

    /// Height given to newly created segments.
    #[serde(
        default = "default_segment_height",
        skip_serializing_if = "Option::is_none"
    )]
    pub segment_height: Option<f64>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            segment_gap: default_segment_gap(),
            segment_width: default_segment_width(),
            segment_height: default_segment_height(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Undo/redo settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Autosave settings.
    #[serde(default)]
    pub autosave: AutosaveConfig,

    /// Canvas layout settings.
    #[serde(default)]
    pub canvas: CanvasConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_history_capacity() -> Option<usize> {
    Some(DEFAULT_HISTORY_CAPACITY)
}

fn default_autosave_enabled() -> bool {
    true
}

fn default_autosave_debounce_ms() -> Option<u64> {
    Some(DEFAULT_AUTOSAVE_DEBOUNCE_MS)
}

fn default_segment_gap() -> Option<f64> {
    Some(DEFAULT_SEGMENT_GAP)
}

fn default_segment_width() -> Option<f64> {
    Some(DEFAULT_SEGMENT_WIDTH)
}

fn default_segment_height() -> Option<f64> {
    Some(DEFAULT_SEGMENT_HEIGHT)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
            },
            history: HistoryConfig {
                capacity: Some(42),
            },
            autosave: AutosaveConfig {
                enabled: false,
                debounce_ms: Some(1500),
            },
            canvas: CanvasConfig {
                segment_gap: Some(12.0),
                ..CanvasConfig::default()
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[history]\ncapacity = 20\n").expect("write config");

        let loaded = load_from_path(&config_path).expect("load config");
        assert_eq!(loaded.history.capacity, Some(20));
        assert_eq!(loaded.autosave, AutosaveConfig::default());
        assert_eq!(loaded.canvas, CanvasConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped_on_access() {
        let config = Config {
            history: HistoryConfig { capacity: Some(1) },
            autosave: AutosaveConfig {
                enabled: true,
                debounce_ms: Some(1_000_000),
            },
            ..Config::default()
        };

        assert_eq!(config.history.capacity().value(), MIN_HISTORY_CAPACITY);
        assert_eq!(
            config.autosave.delay().as_millis(),
            MAX_AUTOSAVE_DEBOUNCE_MS
        );
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let (config, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let config_path = base_dir.join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert_eq!(
            warning.as_deref(),
            Some("notification-config-load-error"),
            "should warn about parse error"
        );
        assert_eq!(config, Config::default());
    }

    #[test]
    fn saved_config_uses_sectioned_format() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save config");
        let content = fs::read_to_string(&config_path).expect("read config");

        assert!(content.contains("[history]"), "should have [history] section");
        assert!(
            content.contains("[autosave]"),
            "should have [autosave] section"
        );
        assert!(content.contains("[canvas]"), "should have [canvas] section");
    }
}
