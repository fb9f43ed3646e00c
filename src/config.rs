//! Configuration for the buildpack binary
//!
//! Settings come from the environment the lifecycle hands to the buildpack.
//!
//! # Environment Variables
//!
//! - `BP_LOG_LEVEL`: Logging level (trace|debug|info|warn|error), case-insensitive - default: "info"
//! - `BP_LOG_JSON`: Emit diagnostics as JSON (true|false) - default: "false"
//! - `CNB_BUILDPACK_DIR`: Buildpack root holding `buildpack.toml` - set by the lifecycle
//!
//! `BP_LIVE_RELOAD_ENABLED` is not read here; each phase reads it
//! through [`crate::env::live_reload_enabled`] when it needs it.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::env::{parse_bool, Environment};
use crate::fs::FileSystem;
use crate::util::logging::parse_level;

pub const LOG_LEVEL_ENV: &str = "BP_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "BP_LOG_JSON";
pub const BUILDPACK_DIR_ENV: &str = "CNB_BUILDPACK_DIR";

const DEFAULT_LOG_LEVEL: &str = "info";
const BUILDPACK_DESCRIPTOR: &str = "buildpack.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Valid options: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Failed to parse {field}: {value} is not a boolean")]
    InvalidBool { field: String, value: String },

    #[error("Failed to read {}: {source}", .path.display())]
    DescriptorRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", .path.display())]
    DescriptorParse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit diagnostics as JSON lines
    pub log_json: bool,

    /// Buildpack root directory, when running under the lifecycle
    pub buildpack_dir: Option<PathBuf>,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
            buildpack_dir: None,
        }
    }
}

impl StartConfig {
    pub fn from_env(env: &dyn Environment) -> Result<Self, ConfigError> {
        let log_level = env
            .var(LOG_LEVEL_ENV)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = match env.var(LOG_JSON_ENV).filter(|v| !v.is_empty()) {
            None => false,
            Some(value) => parse_bool(&value).ok_or_else(|| ConfigError::InvalidBool {
                field: LOG_JSON_ENV.to_string(),
                value,
            })?,
        };

        let buildpack_dir = env
            .var(BUILDPACK_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            log_level,
            log_json,
            buildpack_dir,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match parse_level(&self.log_level) {
            Some(_) => Ok(()),
            None => Err(ConfigError::InvalidLogLevel(self.log_level.clone())),
        }
    }

    /// Identity of the running buildpack, used for the build title line
    ///
    /// Falls back to the crate name and version when no descriptor exists.
    /// A descriptor that exists but cannot be inspected is an error.
    pub fn buildpack_info(&self, fs: &dyn FileSystem) -> Result<BuildpackInfo, ConfigError> {
        let Some(dir) = &self.buildpack_dir else {
            return Ok(BuildpackInfo::fallback());
        };

        let path = dir.join(BUILDPACK_DESCRIPTOR);
        match fs.metadata(&path) {
            Ok(_) => BuildpackInfo::load(fs, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BuildpackInfo::fallback()),
            Err(source) => Err(ConfigError::DescriptorRead { path, source }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BuildpackDescriptor {
    buildpack: BuildpackInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildpackInfo {
    pub id: String,
    pub name: String,
    pub version: String,
}

impl BuildpackInfo {
    pub fn fallback() -> Self {
        Self {
            id: crate::NAME.to_string(),
            name: crate::NAME.to_string(),
            version: crate::VERSION.to_string(),
        }
    }

    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, ConfigError> {
        let content = fs
            .read_to_string(path)
            .map_err(|source| ConfigError::DescriptorRead {
                path: path.to_path_buf(),
                source,
            })?;

        let descriptor: BuildpackDescriptor =
            toml::from_str(&content).map_err(|e| ConfigError::DescriptorParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(descriptor.buildpack)
    }

    /// Title line printed at the start of the build phase
    pub fn title(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
