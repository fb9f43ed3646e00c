pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{normalize_args, BuildArgs, CliArgs, Commands, DetectArgs, InspectArgs};
pub use output::{InspectReport, OutputFormat, OutputFormatter};
