//! Output formatting for the `inspect` dry run
//!
//! ```ignore
//! use python_start::cli::output::{InspectReport, OutputFormat, OutputFormatter};
//!
//! let report = InspectReport::collect(&fs, &env, &app_dir)?;
//! println!("{}", OutputFormatter::new(OutputFormat::Json).format(&report)?);
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use crate::build::ProcessResolver;
use crate::detect::PlanResolver;
use crate::emitter::Emitter;
use crate::env::Environment;
use crate::fs::FileSystem;
use crate::launch::LaunchMetadata;
use crate::plan::BuildPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// TOML, the format the lifecycle itself reads
    Toml,
    /// Human-readable formatted text
    Human,
}

/// What detect and build would produce for one directory
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub working_dir: PathBuf,
    pub markers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detect_failure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<BuildPlan>,
    pub launch: LaunchMetadata,
}

impl InspectReport {
    pub fn collect(fs: &dyn FileSystem, env: &dyn Environment, working_dir: &Path) -> Result<Self> {
        let resolver = PlanResolver::new(fs, env);
        let markers = resolver.detected_markers(working_dir)?;

        let (plan, detect_failure) = match resolver.resolve(working_dir) {
            Ok(plan) => (Some(plan), None),
            Err(e) if e.is_detect_failure() => (None, Some(e.to_string())),
            Err(e) => return Err(e.into()),
        };

        let mut sink = Emitter::new(io::sink());
        let processes = ProcessResolver::new(env).resolve(working_dir, &mut sink)?;

        Ok(Self {
            working_dir: working_dir.to_path_buf(),
            markers,
            detect_failure,
            plan,
            launch: LaunchMetadata::new(processes),
        })
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, report: &InspectReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize inspect report to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize inspect report to YAML")
            }
            OutputFormat::Toml => {
                toml::to_string(report).context("Failed to serialize inspect report to TOML")
            }
            OutputFormat::Human => Ok(self.format_human(report)),
        }
    }

    fn format_human(&self, report: &InspectReport) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "Application:  {}", report.working_dir.display());
        if report.markers.is_empty() {
            let _ = writeln!(output, "Markers:      (none)");
        } else {
            let _ = writeln!(output, "Markers:      {}", report.markers.join(", "));
        }
        output.push('\n');

        match (&report.plan, &report.detect_failure) {
            (Some(plan), _) => {
                output.push_str("Build Plan (any one of):\n");
                for (i, branch) in plan.branches().enumerate() {
                    let names: Vec<&str> = branch.iter().map(|r| r.name.as_str()).collect();
                    let label = if i == 0 { "primary" } else { "or" };
                    let _ = writeln!(output, "  {:<8} {}", label, names.join(" + "));
                }
            }
            (None, Some(reason)) => {
                let _ = writeln!(output, "Detection:    fail ({})", reason);
            }
            (None, None) => {}
        }
        output.push('\n');

        output.push_str("Launch Processes:\n");
        for process in &report.launch.processes {
            let mut flags = Vec::new();
            if process.default {
                flags.push("default");
            }
            if process.direct {
                flags.push("direct");
            }
            if flags.is_empty() {
                let _ = writeln!(output, "  {}: {}", process.process_type, process.command);
            } else {
                let _ = writeln!(
                    output,
                    "  {} ({}): {}",
                    process.process_type,
                    flags.join(", "),
                    process.command
                );
            }
        }

        output
    }
}
