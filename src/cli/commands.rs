use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Cloud Native Buildpack that assigns the launch process for Python apps
#[derive(Parser, Debug)]
#[command(
    name = "python-start",
    version,
    about = "Cloud Native Buildpack that assigns the launch process for Python apps",
    long_about = "python-start decides whether an application directory is a Python project \
                  and which process the resulting image runs. The lifecycle normally invokes \
                  it as bin/detect and bin/build; the subcommands below mirror those entry \
                  points and add a dry-run inspector."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "Application directory (defaults to the current directory)"
    )]
    pub working_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run the detect phase",
        long_about = "Checks the application for Python project markers and writes the \
                      launch-time build plan. Exits 0 on pass, 100 when the app is not a \
                      Python project, 1 on error."
    )]
    Detect(DetectArgs),

    #[command(
        about = "Run the build phase",
        long_about = "Assigns the image's launch processes and writes them to \
                      <LAYERS>/launch.toml. Set BP_LIVE_RELOAD_ENABLED=true to wrap the \
                      interpreter in watchexec."
    )]
    Build(BuildArgs),

    #[command(
        about = "Show the plan and processes for a directory without writing anything",
        long_about = "Runs both phases as a dry run.\n\n\
                      Examples:\n  \
                      python-start inspect\n  \
                      python-start inspect /path/to/app --format json"
    )]
    Inspect(InspectArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(value_name = "PLATFORM", help = "Platform directory")]
    pub platform: PathBuf,

    #[arg(value_name = "PLAN", help = "Path the build plan is written to")]
    pub plan: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    #[arg(value_name = "LAYERS", help = "Layers directory")]
    pub layers: PathBuf,

    #[arg(value_name = "PLATFORM", help = "Platform directory")]
    pub platform: PathBuf,

    #[arg(value_name = "PLAN", help = "Buildpack plan provided by the lifecycle")]
    pub plan: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    #[arg(value_name = "PATH", help = "Application directory to inspect")]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Toml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Toml => super::output::OutputFormat::Toml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

/// Subcommand implied by the executable name (`bin/detect`, `bin/build`)
pub fn phase_from_program(program: &Path) -> Option<&'static str> {
    match program.file_name().and_then(|n| n.to_str()) {
        Some("detect") => Some("detect"),
        Some("build") => Some("build"),
        _ => None,
    }
}

/// Rewrites lifecycle-style invocations into subcommand form
pub fn normalize_args(mut args: Vec<OsString>) -> Vec<OsString> {
    let phase = args
        .first()
        .and_then(|program| phase_from_program(Path::new(program)));
    if let Some(phase) = phase {
        args.insert(1, OsString::from(phase));
    }
    args
}
