//! # Application Configuration
//!
//! Builds the daemon configuration from the process environment with
//! fail-fast validation: every required value is checked before the
//! rest of the system is wired up, so a misconfigured deployment dies
//! at startup instead of mid-cycle.
//!
//! ## Environment variables
//!
//! | Variable             | Required | Default      |
//! |----------------------|----------|--------------|
//! | `GDRIVE_FOLDER`      | yes      | —            |
//! | `GAPI_KEY`           | yes      | —            |
//! | `DB_FILE`            | no       | `files.db`   |
//! | `THUMBNAIL_DIR`      | no       | `thumbnails` |
//! | `POLL_INTERVAL_SECS` | no       | `60`         |

use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Longest side of a generated thumbnail, in pixels.
pub const DEFAULT_MAX_THUMBNAIL_DIMENSION: u32 = 400;

/// Configuration for the gallery mirror daemon.
///
/// Use [`AppConfig::builder`] to construct instances, or
/// [`AppConfig::from_env`] to populate one from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Google Drive folder id to mirror (non-recursive)
    pub drive_folder_id: String,

    /// Google API key used for the Drive v3 listing call
    pub api_key: String,

    /// Path to the SQLite catalog database file
    pub database_path: PathBuf,

    /// Directory where generated thumbnails are written
    pub thumbnail_dir: PathBuf,

    /// Fixed delay between reconciliation cycles
    pub poll_interval: Duration,

    /// Longest side of a generated thumbnail, in pixels
    pub max_thumbnail_dimension: u32,
}

impl AppConfig {
    /// Start building a configuration.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Populate the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEnv`] if `GDRIVE_FOLDER` or `GAPI_KEY` is
    /// unset, or [`Error::Config`] if an optional value fails to parse.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder()
            .drive_folder_id(require_env("GDRIVE_FOLDER")?)
            .api_key(require_env("GAPI_KEY")?);

        if let Ok(path) = env::var("DB_FILE") {
            builder = builder.database_path(path);
        }
        if let Ok(dir) = env::var("THUMBNAIL_DIR") {
            builder = builder.thumbnail_dir(dir);
        }
        if let Ok(secs) = env::var("POLL_INTERVAL_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                Error::Config(format!("POLL_INTERVAL_SECS is not a number: {secs}"))
            })?;
            builder = builder.poll_interval(Duration::from_secs(secs));
        }

        builder.build()
    }
}

/// Builder for [`AppConfig`].
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    drive_folder_id: Option<String>,
    api_key: Option<String>,
    database_path: Option<PathBuf>,
    thumbnail_dir: Option<PathBuf>,
    poll_interval: Option<Duration>,
    max_thumbnail_dimension: Option<u32>,
}

impl AppConfigBuilder {
    pub fn drive_folder_id(mut self, id: impl Into<String>) -> Self {
        self.drive_folder_id = Some(id.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    pub fn thumbnail_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.thumbnail_dir = Some(dir.into());
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn max_thumbnail_dimension(mut self, dimension: u32) -> Self {
        self.max_thumbnail_dimension = Some(dimension);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a required field is missing or a
    /// provided value is unusable (empty folder id, zero interval).
    pub fn build(self) -> Result<AppConfig> {
        let drive_folder_id = self
            .drive_folder_id
            .ok_or_else(|| Error::Config("drive_folder_id is required".into()))?;
        if drive_folder_id.is_empty() {
            return Err(Error::Config("drive_folder_id must not be empty".into()));
        }

        let api_key = self
            .api_key
            .ok_or_else(|| Error::Config("api_key is required".into()))?;
        if api_key.is_empty() {
            return Err(Error::Config("api_key must not be empty".into()));
        }

        let poll_interval = self.poll_interval.unwrap_or(Duration::from_secs(60));
        if poll_interval.is_zero() {
            return Err(Error::Config("poll_interval must be non-zero".into()));
        }

        let max_thumbnail_dimension = self
            .max_thumbnail_dimension
            .unwrap_or(DEFAULT_MAX_THUMBNAIL_DIMENSION);
        if max_thumbnail_dimension == 0 {
            return Err(Error::Config(
                "max_thumbnail_dimension must be non-zero".into(),
            ));
        }

        Ok(AppConfig {
            drive_folder_id,
            api_key,
            database_path: self.database_path.unwrap_or_else(|| "files.db".into()),
            thumbnail_dir: self.thumbnail_dir.unwrap_or_else(|| "thumbnails".into()),
            poll_interval,
            max_thumbnail_dimension,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::MissingEnv(name.to_string()))
}
