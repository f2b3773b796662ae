//! Site configuration (`sccd.json`).
//!
//! # Responsibility
//! - Describe where the site lives on disk and how pages behave
//!   (breakpoint, page size, animation mode, resize debounce).
//! - Load and validate the JSON file; every field has a default.
//!
//! # Invariants
//! - A loaded config always has a non-zero page size and breakpoint.
//! - Unknown keys are rejected so typos do not silently fall back.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default config file name looked up in the site root.
pub const CONFIG_FILE_NAME: &str = "sccd.json";

/// Configuration load/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: Option<PathBuf>, message: String },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::Parse {
                path: Some(path),
                message,
            } => write!(f, "config {} is invalid JSON: {message}", path.display()),
            Self::Parse { path: None, message } => write!(f, "config is invalid JSON: {message}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// How animated transitions are carried out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationMode {
    /// Timed tweens advanced by the page clock.
    #[default]
    Tween,
    /// Every transition lands immediately.
    Instant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site_root: PathBuf,
    pub pages_dir: String,
    pub data_dir: String,
    pub mobile_breakpoint_px: u32,
    pub admission_page_size: usize,
    pub animations: AnimationMode,
    pub resize_debounce_ms: u64,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            pages_dir: "pages".to_string(),
            data_dir: "data".to_string(),
            mobile_breakpoint_px: 768,
            admission_page_size: 10,
            animations: AnimationMode::Tween,
            resize_debounce_ms: 150,
            log_level: None,
            log_dir: None,
        }
    }
}

impl SiteConfig {
    /// Reads and validates a config file. A relative `site_root` is taken
    /// relative to the file's folder.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = serde_json::from_str(&raw).map_err(|err| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            message: err.to_string(),
        })?;
        if config.site_root.is_relative() {
            if let Some(parent) = path.parent() {
                config.site_root = parent.join(&config.site_root);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Loads `sccd.json` from `site_root` when present, defaults otherwise.
    pub fn discover(site_root: &Path) -> Result<Self, ConfigError> {
        let candidate = site_root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        Ok(Self {
            site_root: site_root.to_path_buf(),
            ..Self::default()
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|err| ConfigError::Parse {
            path: None,
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admission_page_size == 0 {
            return Err(ConfigError::Invalid(
                "admission_page_size must be greater than zero".to_string(),
            ));
        }
        if self.mobile_breakpoint_px == 0 {
            return Err(ConfigError::Invalid(
                "mobile_breakpoint_px must be greater than zero".to_string(),
            ));
        }
        if self.pages_dir.contains("..") || self.data_dir.contains("..") {
            return Err(ConfigError::Invalid(
                "pages_dir and data_dir must stay inside the site root".to_string(),
            ));
        }
        Ok(())
    }
}
