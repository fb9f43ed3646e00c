//! Subcommand handlers; each returns the process exit code

use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, error};

use super::commands::{BuildArgs, DetectArgs, InspectArgs};
use super::output::{InspectReport, OutputFormatter};
use crate::config::StartConfig;
use crate::emitter::Emitter;
use crate::env::Environment;
use crate::fs::FileSystem;
use crate::lifecycle::{self, DetectOutcome, EXIT_ERROR, EXIT_PASS};

pub fn handle_detect(
    args: &DetectArgs,
    working_dir: &Path,
    fs: &dyn FileSystem,
    env: &dyn Environment,
) -> i32 {
    debug!(platform = %args.platform.display(), "Running detect");

    match lifecycle::detect(fs, env, working_dir, &args.plan) {
        Ok(outcome) => {
            if let DetectOutcome::Fail(reason) = &outcome {
                let mut emitter = Emitter::new(io::stdout().lock());
                emitter.title(reason);
            }
            outcome.exit_code()
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    }
}

pub fn handle_build(
    args: &BuildArgs,
    working_dir: &Path,
    config: &StartConfig,
    fs: &dyn FileSystem,
    env: &dyn Environment,
) -> i32 {
    debug!(
        layers = %args.layers.display(),
        platform = %args.platform.display(),
        plan = %args.plan.display(),
        "Running build"
    );

    let mut emitter = Emitter::new(io::stdout().lock());
    match lifecycle::build(fs, env, config, working_dir, &args.layers, &mut emitter) {
        Ok(_) => EXIT_PASS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    }
}

pub fn handle_inspect(
    args: &InspectArgs,
    working_dir: &Path,
    fs: &dyn FileSystem,
    env: &dyn Environment,
) -> i32 {
    let target = args.path.as_deref().unwrap_or(working_dir);

    let rendered = InspectReport::collect(fs, env, target)
        .and_then(|report| OutputFormatter::new(args.format.into()).format(&report));

    match rendered {
        Ok(text) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = stdout.write_all(text.as_bytes()) {
                error!("Failed to write output: {}", e);
                return EXIT_ERROR;
            }
            EXIT_PASS
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    }
}
