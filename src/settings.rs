use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::constants::*;
use crate::dsp::spectrum::Scaling;
use crate::params::Params;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Where the values returned by [`Settings::load`] came from.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(PathBuf),
    Missing(PathBuf),
    NoConfigDir,
    /// The file exists but could not be used; defaults were taken instead
    Fallback(SettingsError),
}

impl LoadOutcome {
    pub fn log(&self) {
        match self {
            LoadOutcome::Loaded(path) => info!(path = %path.display(), "loaded settings"),
            LoadOutcome::Missing(path) => {
                info!(path = %path.display(), "no config file, using defaults")
            }
            LoadOutcome::NoConfigDir => {
                warn!("could not determine config directory, using defaults")
            }
            LoadOutcome::Fallback(e) => warn!(error = %e, "using default settings"),
        }
    }
}

/// Persistent defaults, read from `config.toml`. Every field is optional in
/// the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sample_rate: u32,
    pub duration_secs: u32,
    pub min_hz: u32,
    pub max_hz: u32,
    pub scaling: Scaling,
    /// Filter directive for the log, e.g. `info` or `freqscope=debug`
    pub log_level: String,
    /// Where the interactive UI writes its log
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration_secs: DEFAULT_DURATION_SECS,
            min_hz: DEFAULT_MIN_HZ,
            max_hz: DEFAULT_MAX_HZ,
            scaling: Scaling::Raw,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, or the platform config file when `None`. A missing
    /// or unreadable file falls back to defaults. Settings are read before
    /// the logger exists, so the outcome is returned for the caller to log.
    pub fn load(path: Option<&Path>) -> (Self, LoadOutcome) {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match config_path() {
                Some(p) => p,
                None => return (Self::default(), LoadOutcome::NoConfigDir),
            },
        };

        if !path.exists() {
            return (Self::default(), LoadOutcome::Missing(path));
        }

        match Self::from_path(&path) {
            Ok(settings) => (settings, LoadOutcome::Loaded(path)),
            Err(e) => (Self::default(), LoadOutcome::Fallback(e)),
        }
    }

    /// Clamped panel values for these settings.
    pub fn params(&self) -> Params {
        let mut params = Params::default();
        params.set_sample_rate(self.sample_rate);
        params.set_duration(self.duration_secs);
        params.set_min_hz(self.min_hz);
        params.set_max_hz(self.max_hz);
        params
    }

    /// Log file path: the configured one, else `<data dir>/freqscope.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            ProjectDirs::from("", "", APP_NAME)
                .map(|dirs| dirs.data_local_dir().join(format!("{APP_NAME}.log")))
        })
    }
}

/// `~/.config/freqscope/config.toml` or the platform equivalent
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
}
