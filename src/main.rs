use python_start::cli::handlers::{handle_build, handle_detect, handle_inspect};
use python_start::cli::{normalize_args, CliArgs, Commands};
use python_start::util::{init_logging, LoggingConfig};
use python_start::{ProcessEnvironment, RealFileSystem, StartConfig, VERSION};

use clap::Parser;
use std::env;
use tracing::debug;

fn main() {
    let args = CliArgs::parse_from(normalize_args(env::args_os().collect()));
    let environment = ProcessEnvironment;
    let fs = RealFileSystem::new();

    let mut config = match StartConfig::from_env(&environment) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(level) = &args.log_level {
        config.log_level = level.to_lowercase();
    }
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    init_logging(LoggingConfig::from_config(&config));
    debug!("python-start v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let working_dir = match args.working_dir.clone().map_or_else(env::current_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to determine working directory: {}", e);
            std::process::exit(1);
        }
    };

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args, &working_dir, &fs, &environment),
        Commands::Build(build_args) => {
            handle_build(build_args, &working_dir, &config, &fs, &environment)
        }
        Commands::Inspect(inspect_args) => handle_inspect(inspect_args, &working_dir, &fs, &environment),
    };

    std::process::exit(exit_code);
}
