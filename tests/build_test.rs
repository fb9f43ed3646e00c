//! Build phase integration tests, including the detect-then-build scenario

use python_start::config::BUILDPACK_DIR_ENV;
use python_start::env::LIVE_RELOAD_ENV;
use python_start::lifecycle::{self, DetectOutcome, LAUNCH_FILE};
use python_start::{
    Emitter, LaunchMetadata, MockEnvironment, Process, ProcessResolver, RealFileSystem,
    StartConfig,
};
use std::fs;
use tempfile::TempDir;
use yare::parameterized;

const DESCRIPTOR: &str = r#"api = "0.7"

[buildpack]
  id = "paketo-buildpacks/python-start"
  name = "Some Buildpack"
  version = "some-version"
"#;

struct Workspace {
    app: TempDir,
    layers: TempDir,
    cnb: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let cnb = TempDir::new().unwrap();
        fs::write(cnb.path().join("buildpack.toml"), DESCRIPTOR).unwrap();
        Self {
            app: TempDir::new().unwrap(),
            layers: TempDir::new().unwrap(),
            cnb,
        }
    }

    fn env(&self) -> MockEnvironment {
        MockEnvironment::new().with(BUILDPACK_DIR_ENV, &self.cnb.path().display().to_string())
    }

    fn build(&self, env: &MockEnvironment) -> (anyhow::Result<LaunchMetadata>, String) {
        let config = StartConfig::from_env(env).unwrap();
        let mut emitter = Emitter::new(Vec::new());
        let result = lifecycle::build(
            &RealFileSystem::new(),
            env,
            &config,
            self.app.path(),
            self.layers.path(),
            &mut emitter,
        );
        (result, String::from_utf8(emitter.into_inner()).unwrap())
    }
}

#[test]
fn test_build_sets_python_launch_command() {
    let ws = Workspace::new();
    let (result, output) = ws.build(&ws.env());

    assert_eq!(
        result.unwrap().processes,
        vec![Process::new("web", "python").with_default(true).with_direct(true)]
    );
    assert!(output.contains("Some Buildpack some-version"));
    assert!(output.contains("Assigning launch process"));
    assert!(output.contains("web: python"));
}

#[test]
fn test_build_with_live_reload_uses_watchexec() {
    let ws = Workspace::new();
    let env = ws.env().with(LIVE_RELOAD_ENV, "true");
    let (result, output) = ws.build(&env);

    let reload = format!(
        r#"watchexec --restart --watch {} "python""#,
        ws.app.path().display()
    );
    assert_eq!(
        result.unwrap().processes,
        vec![
            Process::new("web", reload.clone()).with_default(true),
            Process::new("no-reload", "python").with_direct(true),
        ]
    );
    assert!(output.contains("Some Buildpack some-version"));
    assert!(output.contains("Assigning launch process"));
    assert!(output.contains(&format!("web (default): {reload}")));
    assert!(output.contains("no-reload: python"));

    let launch_toml = fs::read_to_string(ws.layers.path().join(LAUNCH_FILE)).unwrap();
    assert!(launch_toml.contains("no-reload"));
    assert!(launch_toml.contains("watchexec --restart --watch"));
}

#[parameterized(
    not_a_bool = { "not-a-bool" },
    set_but_empty = { "" },
)]
fn test_build_with_invalid_live_reload_value_fails(value: &str) {
    let ws = Workspace::new();
    let env = ws.env().with(LIVE_RELOAD_ENV, value);
    let (result, _) = ws.build(&env);

    let err = result.unwrap_err();
    let expected = format!("failed to parse BP_LIVE_RELOAD_ENABLED value {value}: invalid boolean syntax");
    assert!(format!("{err:#}").contains(&expected));
    assert!(!ws.layers.path().join(LAUNCH_FILE).exists());
}

#[test]
fn test_resolvers_report_identical_flag_errors() {
    let ws = Workspace::new();
    fs::write(ws.app.path().join("app.py"), "").unwrap();
    let env = MockEnvironment::new().with(LIVE_RELOAD_ENV, "not-a-bool");
    let fs = RealFileSystem::new();

    let detect_err = python_start::PlanResolver::new(&fs, &env)
        .resolve(ws.app.path())
        .unwrap_err();
    let build_err = ProcessResolver::new(&env)
        .resolve(ws.app.path(), &mut Emitter::new(Vec::new()))
        .unwrap_err();

    assert_eq!(detect_err.to_string(), build_err.to_string());
}

#[test]
fn test_detect_then_build_for_single_script_app() {
    let ws = Workspace::new();
    fs::write(ws.app.path().join("app.py"), "print('hello')\n").unwrap();
    let env = ws.env();
    let plan_path = ws.layers.path().join("plan.toml");

    let outcome = lifecycle::detect(&RealFileSystem::new(), &env, ws.app.path(), &plan_path).unwrap();
    let plan = match outcome {
        DetectOutcome::Pass(plan) => plan,
        DetectOutcome::Fail(reason) => panic!("detect failed: {reason}"),
    };
    assert_eq!(plan.requirement_names(), vec!["cpython", "site-packages"]);
    let alternatives: Vec<Vec<&str>> = plan.or.iter().map(|p| p.requirement_names()).collect();
    assert_eq!(
        alternatives,
        vec![
            vec!["conda-environment"],
            vec!["cpython", "poetry", "poetry-venv"],
            vec!["cpython"],
        ]
    );

    let (result, output) = ws.build(&env);
    assert_eq!(result.unwrap().processes.len(), 1);
    assert!(output.contains("Assigning launch process"));
    assert!(output.contains("web: python"));
}
