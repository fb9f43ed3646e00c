//! python-start - Cloud Native Buildpack that assigns the launch process for Python images
//!
//! The buildpack has two phases:
//!
//! - **Detect**: [`PlanResolver`] looks for Python project markers
//!   (`*.py`, `environment.yml`, `requirements.txt`, `package-list.txt`,
//!   `pyproject.toml`) and, when any is present, offers a build plan whose
//!   alternatives cover pip, conda, poetry and a bare interpreter.
//! - **Build**: [`ProcessResolver`] assigns the `web` launch process. With
//!   `BP_LIVE_RELOAD_ENABLED=true` the interpreter runs under `watchexec` and
//!   the bare interpreter stays available as `no-reload`.
//!
//! # Example Usage
//!
//! ```no_run
//! use python_start::{MockEnvironment, PlanResolver, RealFileSystem};
//! use std::path::Path;
//!
//! let fs = RealFileSystem::new();
//! let env = MockEnvironment::new().with("BP_LIVE_RELOAD_ENABLED", "true");
//! let plan = PlanResolver::new(&fs, &env).resolve(Path::new("/workspace"))?;
//! println!("{}", plan.to_toml()?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod build;
pub mod cli;
pub mod config;
pub mod detect;
pub mod emitter;
pub mod env;
pub mod error;
pub mod fs;
pub mod launch;
pub mod lifecycle;
pub mod plan;
pub mod util;

pub use build::ProcessResolver;
pub use config::{BuildpackInfo, ConfigError, StartConfig};
pub use detect::PlanResolver;
pub use emitter::Emitter;
pub use env::{live_reload_enabled, Environment, MockEnvironment, ProcessEnvironment};
pub use error::StartError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use launch::{LaunchMetadata, Process};
pub use plan::{BuildPlan, Requirement};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_python_start() {
        assert_eq!(NAME, "python-start");
    }
}
