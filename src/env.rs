//! Environment variable access and the live reload toggle
//!
//! Resolvers read `BP_LIVE_RELOAD_ENABLED` through the [`Environment`] trait so
//! tests can hand them a fixed map instead of mutating the process
//! environment.

use std::collections::HashMap;
use std::env;

use crate::error::{Result, StartError};

/// Build-time toggle that wraps the launch process in a restart supervisor
pub const LIVE_RELOAD_ENV: &str = "BP_LIVE_RELOAD_ENABLED";

/// Read-only view of environment variables
pub trait Environment: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// Fixed set of variables for tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl Environment for MockEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Parses the boolean spellings build tooling conventionally accepts
///
/// Matches `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts. Anything else, including `yes`/`no`, is rejected.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Reads the live reload toggle
///
/// Unset means disabled. A set value must parse, so an empty string is
/// rejected like any other malformed value.
pub fn live_reload_enabled(env: &dyn Environment) -> Result<bool> {
    match env.var(LIVE_RELOAD_ENV) {
        None => Ok(false),
        Some(value) => {
            parse_bool(&value).ok_or(StartError::InvalidLiveReloadValue { value })
        }
    }
}
