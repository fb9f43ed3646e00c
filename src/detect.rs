//! Detect phase: decides whether the app is a Python project and what it needs at launch
//!
//! Marker files only gate pass/fail. A passing app is always offered every
//! packaging strategy as an alternative; the lifecycle keeps whichever one
//! other buildpacks can provide.

use glob::Pattern;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::env::{live_reload_enabled, Environment};
use crate::error::{Result, StartError};
use crate::fs::FileSystem;
use crate::plan::{BuildPlan, Requirement};

pub const CPYTHON: &str = "cpython";
pub const SITE_PACKAGES: &str = "site-packages";
pub const CONDA_ENVIRONMENT: &str = "conda-environment";
pub const POETRY: &str = "poetry";
pub const POETRY_VENV: &str = "poetry-venv";
pub const WATCHEXEC: &str = "watchexec";

/// Files whose presence marks a Python project
pub const MARKER_FILES: [&str; 4] = [
    "environment.yml",
    "requirements.txt",
    "package-list.txt",
    "pyproject.toml",
];

/// Source files that mark a Python project, matched in the app root only
pub const PYTHON_SOURCE_GLOB: &str = "*.py";

/// Packaging strategies offered to the lifecycle; the first is the primary plan
pub const CANDIDATES: [(&str, &[&str]); 4] = [
    ("pip", &[CPYTHON, SITE_PACKAGES]),
    ("conda", &[CONDA_ENVIRONMENT]),
    ("poetry", &[CPYTHON, POETRY, POETRY_VENV]),
    ("simple", &[CPYTHON]),
];

pub struct PlanResolver<'a> {
    fs: &'a dyn FileSystem,
    env: &'a dyn Environment,
}

impl<'a> PlanResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, env: &'a dyn Environment) -> Self {
        Self { fs, env }
    }

    /// Builds the launch-time requirement plan for `working_dir`
    pub fn resolve(&self, working_dir: &Path) -> Result<BuildPlan> {
        let markers = self.detected_markers(working_dir)?;
        if markers.is_empty() {
            info!(dir = %working_dir.display(), "No Python project markers found");
            return Err(StartError::NoPythonProjectDetected);
        }
        debug!(markers = ?markers, "Python project markers found");

        let reload = live_reload_enabled(self.env)?;

        let [primary, alternatives @ ..] = &CANDIDATES;
        let plan = BuildPlan::or(
            candidate_plan(primary, reload),
            alternatives.iter().map(|c| candidate_plan(c, reload)),
        );

        info!(
            primary = primary.0,
            alternatives = alternatives.len(),
            live_reload = reload,
            "Resolved build plan"
        );
        Ok(plan)
    }

    /// Names of the markers present in `working_dir`, in probe order
    ///
    /// Marker files come first, then every matching source file name.
    pub fn detected_markers(&self, working_dir: &Path) -> Result<Vec<String>> {
        let mut found = Vec::new();

        for marker in MARKER_FILES {
            if self.marker_exists(&working_dir.join(marker))? {
                found.push(marker.to_string());
            }
        }

        for source in self.python_sources(working_dir)? {
            if let Some(name) = source.file_name().and_then(|n| n.to_str()) {
                found.push(name.to_string());
            }
        }

        Ok(found)
    }

    fn marker_exists(&self, path: &Path) -> Result<bool> {
        match self.fs.metadata(path) {
            Ok(_) => {
                debug!(path = %path.display(), "Marker present");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StartError::StatFailure {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Entries of `dir` matching [`PYTHON_SOURCE_GLOB`]; a missing directory has none
    fn python_sources(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let glob_failure = |message: String| StartError::GlobFailure {
            pattern: dir.join(PYTHON_SOURCE_GLOB).display().to_string(),
            message,
        };

        let pattern = Pattern::new(PYTHON_SOURCE_GLOB).map_err(|e| glob_failure(e.to_string()))?;

        let entries = match self.fs.read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(glob_failure(e.to_string())),
        };

        let mut matches: Vec<PathBuf> = entries
            .into_iter()
            .filter(|entry| pattern.matches(entry.file_name()))
            .map(|entry| entry.path)
            .collect();
        matches.sort();
        Ok(matches)
    }
}

fn candidate_plan((name, requirements): &(&str, &[&str]), reload: bool) -> BuildPlan {
    let mut requires: Vec<Requirement> = requirements.iter().map(|r| Requirement::launch(r)).collect();
    if reload {
        requires.push(Requirement::launch(WATCHEXEC));
    }
    debug!(candidate = name, requires = requires.len(), "Candidate plan");
    BuildPlan::requiring(requires)
}
