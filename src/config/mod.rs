// SPDX-License-Identifier: MPL-2.0
//! This module handles the engine's configuration, including loading and saving
//! provider settings to a `toasts.toml` file.
//!
//! A [`Config`] is the raw, possibly invalid, user input; every field is
//! optional and numbers are signed so that negative values can be reported
//! instead of failing to parse. [`Config::apply_to`] validates it against the
//! current [`Settings`] and yields the new settings, or an error leaving the
//! caller's settings untouched.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `TOAST_ENGINE_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use toast_engine::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.max_toasts = Some(3);
//! config.position = Some("bottom-right".to_string());
//! let settings = config.validate().expect("valid settings");
//! assert_eq!(settings.max_toasts, 3);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::notifications::{Position, ToastKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{fmt, fs, io};
use std::time::Duration;

const CONFIG_FILE: &str = "toasts.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "ToastEngine";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TOAST_ENGINE_CONFIG_DIR";

// =============================================================================
// Raw Configuration
// =============================================================================

/// Provider configuration as written by users or passed at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Anchor name, e.g. `"bottom-center"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_toasts: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_duration_ms: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_duration_ms: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_duration_ms: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_duration_ms: Option<i64>,
}

impl Config {
    /// Validates against the built-in defaults.
    pub fn validate(&self) -> Result<Settings> {
        self.apply_to(&Settings::default())
    }

    /// Overlays the fields that are set onto `base`.
    ///
    /// Fails on the first invalid field; `base` is never modified.
    pub fn apply_to(&self, base: &Settings) -> Result<Settings> {
        let mut settings = base.clone();

        if let Some(position) = &self.position {
            settings.position = position.parse()?;
        }
        if let Some(max) = self.max_toasts {
            settings.max_toasts = usize::try_from(max).map_err(|_| {
                Error::InvalidConfig(format!("max_toasts must not be negative, got {max}"))
            })?;
        }

        let durations = &mut settings.durations;
        for (field, value, slot) in [
            ("success_duration_ms", self.success_duration_ms, &mut durations.success),
            ("error_duration_ms", self.error_duration_ms, &mut durations.error),
            ("warning_duration_ms", self.warning_duration_ms, &mut durations.warning),
            ("info_duration_ms", self.info_duration_ms, &mut durations.info),
        ] {
            if let Some(ms) = value {
                let ms = u64::try_from(ms).map_err(|_| {
                    Error::InvalidConfig(format!("{field} must not be negative, got {ms}"))
                })?;
                *slot = Duration::from_millis(ms);
            }
        }

        Ok(settings)
    }
}

// =============================================================================
// Validated Settings
// =============================================================================

/// Default auto-dismiss delay for each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub success: Duration,
    pub error: Duration,
    pub warning: Duration,
    pub info: Duration,
}

impl Durations {
    #[must_use]
    pub fn for_kind(&self, kind: ToastKind) -> Duration {
        match kind {
            ToastKind::Success => self.success,
            ToastKind::Error => self.error,
            ToastKind::Warning => self.warning,
            ToastKind::Info => self.info,
            ToastKind::Loading => Duration::from_millis(DEFAULT_LOADING_DURATION_MS),
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            success: Duration::from_millis(DEFAULT_SUCCESS_DURATION_MS),
            error: Duration::from_millis(DEFAULT_ERROR_DURATION_MS),
            warning: Duration::from_millis(DEFAULT_WARNING_DURATION_MS),
            info: Duration::from_millis(DEFAULT_INFO_DURATION_MS),
        }
    }
}

/// Configuration the engine actually runs with. Always valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub position: Position,
    pub max_toasts: usize,
    pub durations: Durations,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            max_toasts: DEFAULT_MAX_TOASTS,
            durations: Durations::default(),
        }
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Locates `toasts.toml`: an explicit directory first, then
/// [`ENV_CONFIG_DIR`], then the platform config directory.
fn config_file(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    let dir = base_dir
        .or_else(|| std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from))
        .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_NAME)))?;
    Some(dir.join(CONFIG_FILE))
}

// =============================================================================
// Load Functions
// =============================================================================

/// A provider file that exists but could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub path: PathBuf,
    pub error: Error,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ignored {}: {}", self.path.display(), self.error)
    }
}

/// Loads the provider file from the default location.
///
/// A missing file yields the defaults silently. An unreadable or malformed
/// one yields the defaults plus a [`ConfigWarning`], so the engine can
/// still start.
pub fn load() -> (Config, Option<ConfigWarning>) {
    load_with_override(None)
}

/// Same as [`load`], reading from `base_dir` when given.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<ConfigWarning>) {
    let Some(path) = config_file(base_dir) else {
        return (Config::default(), None);
    };
    match read_if_present(&path) {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "falling back to default toast config");
            (Config::default(), Some(ConfigWarning { path, error }))
        }
    }
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn read_if_present(path: &Path) -> Result<Option<Config>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(toml::from_str(&content)?)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns [`Error::Config`] when no config directory can be determined.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Same as [`save`], writing into `base_dir` when given.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    let path = config_file(base_dir)
        .ok_or_else(|| Error::Config("no config directory on this platform".to_string()))?;
    save_to_path(config, &path)
}

/// Saves configuration to a specific path, creating parent directories.
/// Nothing is written if the config fails to serialize.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
