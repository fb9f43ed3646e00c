//! Build phase: assigns the image's launch processes
//!
//! The image runs the Python interpreter. With live reload enabled the
//! interpreter is wrapped in `watchexec`, which restarts it whenever the app
//! directory changes, and the bare interpreter stays available as
//! `no-reload`.

use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::emitter::Emitter;
use crate::env::{live_reload_enabled, Environment};
use crate::error::Result;
use crate::launch::{Process, NO_RELOAD_PROCESS, WEB_PROCESS};

/// Interpreter invocation used as the launch command
pub const PYTHON_COMMAND: &str = "python";

/// Supervisor command that restarts `command` on every change under `working_dir`
pub fn reload_command(working_dir: &Path, command: &str) -> String {
    format!(
        r#"watchexec --restart --watch {} "{}""#,
        working_dir.display(),
        command
    )
}

pub struct ProcessResolver<'a> {
    env: &'a dyn Environment,
}

impl<'a> ProcessResolver<'a> {
    pub fn new(env: &'a dyn Environment) -> Self {
        Self { env }
    }

    /// Decides the launch processes and reports them on `emitter`
    pub fn resolve<W: Write>(
        &self,
        working_dir: &Path,
        emitter: &mut Emitter<W>,
    ) -> Result<Vec<Process>> {
        let reload = live_reload_enabled(self.env)?;

        let processes = if reload {
            vec![
                Process::new(WEB_PROCESS, reload_command(working_dir, PYTHON_COMMAND))
                    .with_default(true),
                Process::new(NO_RELOAD_PROCESS, PYTHON_COMMAND).with_direct(true),
            ]
        } else {
            vec![Process::new(WEB_PROCESS, PYTHON_COMMAND)
                .with_default(true)
                .with_direct(true)]
        };

        info!(
            live_reload = reload,
            processes = processes.len(),
            "Assigned launch processes"
        );
        emitter.launch_processes(&processes);

        Ok(processes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MockEnvironment, LIVE_RELOAD_ENV};
    use crate::error::StartError;

    fn run(env: &MockEnvironment, dir: &Path) -> (Result<Vec<Process>>, String) {
        let mut emitter = Emitter::new(Vec::new());
        let result = ProcessResolver::new(env).resolve(dir, &mut emitter);
        let output = String::from_utf8(emitter.into_inner()).unwrap();
        (result, output)
    }

    #[test]
    fn test_default_is_single_direct_web_process() {
        let (result, output) = run(&MockEnvironment::new(), Path::new("/workspace"));

        assert_eq!(
            result.unwrap(),
            vec![Process {
                process_type: "web".to_string(),
                command: "python".to_string(),
                default: true,
                direct: true,
            }]
        );
        assert!(output.contains("Assigning launch process"));
        assert!(output.contains("web: python"));
    }

    #[test]
    fn test_live_reload_wraps_interpreter() {
        let env = MockEnvironment::new().with(LIVE_RELOAD_ENV, "true");
        let (result, output) = run(&env, Path::new("/workspace"));
        let processes = result.unwrap();

        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0].process_type, "web");
        assert_eq!(
            processes[0].command,
            r#"watchexec --restart --watch /workspace "python""#
        );
        assert!(processes[0].default);
        assert!(!processes[0].direct);

        assert_eq!(processes[1].process_type, "no-reload");
        assert_eq!(processes[1].command, "python");
        assert!(!processes[1].default);

        assert!(output.contains(r#"web (default): watchexec --restart --watch /workspace "python""#));
        assert!(output.contains("no-reload: python"));
    }

    #[test]
    fn test_reload_command_embeds_dir_and_command_once() {
        let command = reload_command(Path::new("/srv/app"), "python");
        assert_eq!(command.matches("/srv/app").count(), 1);
        assert_eq!(command.matches("\"python\"").count(), 1);
    }

    #[test]
    fn test_invalid_live_reload_value_is_error() {
        let env = MockEnvironment::new().with(LIVE_RELOAD_ENV, "not-a-bool");
        let (result, output) = run(&env, Path::new("/workspace"));

        let err = result.unwrap_err();
        assert!(matches!(err, StartError::InvalidLiveReloadValue { .. }));
        assert!(err
            .to_string()
            .contains("failed to parse BP_LIVE_RELOAD_ENABLED value not-a-bool"));
        assert!(output.is_empty());
    }
}
