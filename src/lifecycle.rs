//! Buildpack lifecycle contract
//!
//! `detect` is invoked as `detect <platform> <plan>` and must write its build
//! plan to `<plan>`; `build` is invoked as `build <layers> <platform> <plan>`
//! and records launch processes in `<layers>/launch.toml`. Both run with the
//! application directory as their working directory.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::build::ProcessResolver;
use crate::config::StartConfig;
use crate::detect::PlanResolver;
use crate::emitter::Emitter;
use crate::env::Environment;
use crate::fs::FileSystem;
use crate::launch::LaunchMetadata;
use crate::plan::BuildPlan;

/// Exit code for a passing detect and a successful build
pub const EXIT_PASS: i32 = 0;

/// Exit code telling the lifecycle this buildpack does not apply
pub const EXIT_DETECT_FAIL: i32 = 100;

/// Exit code for any error
pub const EXIT_ERROR: i32 = 1;

pub const LAUNCH_FILE: &str = "launch.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectOutcome {
    Pass(BuildPlan),
    /// Detection did not apply; carries the explanation shown to the user
    Fail(String),
}

impl DetectOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            DetectOutcome::Pass(_) => EXIT_PASS,
            DetectOutcome::Fail(_) => EXIT_DETECT_FAIL,
        }
    }
}

/// Runs detection in `working_dir` and writes the plan to `plan_path` on a pass
pub fn detect(
    fs: &dyn FileSystem,
    env: &dyn Environment,
    working_dir: &Path,
    plan_path: &Path,
) -> Result<DetectOutcome> {
    match PlanResolver::new(fs, env).resolve(working_dir) {
        Ok(plan) => {
            let rendered = plan.to_toml()?;
            std::fs::write(plan_path, rendered)
                .with_context(|| format!("Failed to write build plan to {}", plan_path.display()))?;
            info!(plan = %plan_path.display(), "Detection passed");
            Ok(DetectOutcome::Pass(plan))
        }
        Err(e) if e.is_detect_failure() => {
            info!(reason = %e, "Detection failed");
            Ok(DetectOutcome::Fail(e.to_string()))
        }
        Err(e) => Err(e).context("Detection error"),
    }
}

/// Assigns launch processes and writes them to `<layers_dir>/launch.toml`
pub fn build<W: Write>(
    fs: &dyn FileSystem,
    env: &dyn Environment,
    config: &StartConfig,
    working_dir: &Path,
    layers_dir: &Path,
    emitter: &mut Emitter<W>,
) -> Result<LaunchMetadata> {
    let info = config.buildpack_info(fs)?;
    emitter.title(info.title());

    let processes = ProcessResolver::new(env)
        .resolve(working_dir, emitter)
        .context("Failed to assign launch processes")?;
    emitter.break_line();

    let launch = LaunchMetadata::new(processes);
    let launch_path = layers_dir.join(LAUNCH_FILE);
    std::fs::create_dir_all(layers_dir)
        .with_context(|| format!("Failed to create layers directory {}", layers_dir.display()))?;
    std::fs::write(&launch_path, launch.to_toml()?)
        .with_context(|| format!("Failed to write {}", launch_path.display()))?;
    debug!(path = %launch_path.display(), "Wrote launch metadata");

    Ok(launch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MockEnvironment, LIVE_RELOAD_ENV};
    use crate::fs::RealFileSystem;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detect_pass_writes_plan() {
        let app = TempDir::new().unwrap();
        fs::write(app.path().join("app.py"), "print('hi')\n").unwrap();
        let out = TempDir::new().unwrap();
        let plan_path = out.path().join("plan.toml");

        let outcome = detect(
            &RealFileSystem::new(),
            &MockEnvironment::new(),
            app.path(),
            &plan_path,
        )
        .unwrap();

        assert_eq!(outcome.exit_code(), EXIT_PASS);
        let written: BuildPlan = toml::from_str(&fs::read_to_string(&plan_path).unwrap()).unwrap();
        match outcome {
            DetectOutcome::Pass(plan) => assert_eq!(written, plan),
            DetectOutcome::Fail(msg) => panic!("unexpected fail: {msg}"),
        }
    }

    #[test]
    fn test_detect_fail_writes_nothing() {
        let app = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let plan_path = out.path().join("plan.toml");

        let outcome = detect(
            &RealFileSystem::new(),
            &MockEnvironment::new(),
            app.path(),
            &plan_path,
        )
        .unwrap();

        assert_eq!(outcome.exit_code(), EXIT_DETECT_FAIL);
        assert!(!plan_path.exists());
    }

    #[test]
    fn test_detect_error_is_propagated() {
        let app = TempDir::new().unwrap();
        fs::write(app.path().join("app.py"), "").unwrap();
        let out = TempDir::new().unwrap();
        let env = MockEnvironment::new().with(LIVE_RELOAD_ENV, "not-a-bool");

        let err = detect(
            &RealFileSystem::new(),
            &env,
            app.path(),
            &out.path().join("plan.toml"),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse BP_LIVE_RELOAD_ENABLED value not-a-bool"));
    }

    #[test]
    fn test_build_writes_launch_toml() {
        let app = TempDir::new().unwrap();
        let layers = TempDir::new().unwrap();
        let mut emitter = Emitter::new(Vec::new());

        let launch = build(
            &RealFileSystem::new(),
            &MockEnvironment::new(),
            &StartConfig::default(),
            app.path(),
            layers.path(),
            &mut emitter,
        )
        .unwrap();

        let written: LaunchMetadata =
            toml::from_str(&fs::read_to_string(layers.path().join(LAUNCH_FILE)).unwrap()).unwrap();
        assert_eq!(written, launch);

        let output = String::from_utf8(emitter.into_inner()).unwrap();
        assert!(output.starts_with(&format!("{} {}\n", crate::NAME, crate::VERSION)));
        assert!(output.contains("web: python"));
    }
}
