//! Error types for detection and build
//!
//! Every variant is fatal for the phase that raised it. The lifecycle edge
//! maps [`StartError::NoPythonProjectDetected`] to a detect *fail* and every
//! other variant to an error exit.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartError {
    /// A marker could not be inspected for a reason other than absence
    #[error("failed to stat {}: {source}", .path.display())]
    StatFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The `*.py` glob could not be evaluated
    #[error("failed to evaluate glob {pattern}: {message}")]
    GlobFailure { pattern: String, message: String },

    /// None of the accepted markers exist in the working directory
    #[error("No *.py, environment.yml, requirements.txt, package-list.txt, or pyproject.toml found")]
    NoPythonProjectDetected,

    /// `BP_LIVE_RELOAD_ENABLED` is set to something that is not a boolean
    #[error("failed to parse BP_LIVE_RELOAD_ENABLED value {value}: invalid boolean syntax")]
    InvalidLiveReloadValue { value: String },
}

impl StartError {
    /// Whether detection should report "not applicable" rather than an error
    pub fn is_detect_failure(&self) -> bool {
        matches!(self, StartError::NoPythonProjectDetected)
    }
}

pub type Result<T> = std::result::Result<T, StartError>;
