//! Launch process records written to `launch.toml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process type the lifecycle starts by default
pub const WEB_PROCESS: &str = "web";

/// Unwrapped interpreter process offered alongside a live-reload `web`
pub const NO_RELOAD_PROCESS: &str = "no-reload";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    #[serde(rename = "type")]
    pub process_type: String,
    pub command: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub direct: bool,
}

impl Process {
    pub fn new(process_type: &str, command: impl Into<String>) -> Self {
        Self {
            process_type: process_type.to_string(),
            command: command.into(),
            default: false,
            direct: false,
        }
    }

    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn with_direct(mut self, direct: bool) -> Self {
        self.direct = direct;
        self
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.process_type, self.command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaunchMetadata {
    #[serde(default)]
    pub processes: Vec<Process>,
}

impl LaunchMetadata {
    pub fn new(processes: Vec<Process>) -> Self {
        Self { processes }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize launch metadata to TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_flags() {
        let process = Process::new(WEB_PROCESS, "python")
            .with_default(true)
            .with_direct(true);
        assert_eq!(process.process_type, "web");
        assert!(process.default);
        assert!(process.direct);
        assert_eq!(process.to_string(), "web: python");
    }

    #[test]
    fn test_launch_toml_uses_type_key() {
        let launch = LaunchMetadata::new(vec![
            Process::new(WEB_PROCESS, "python").with_default(true).with_direct(true),
            Process::new(NO_RELOAD_PROCESS, "python"),
        ]);
        let rendered = launch.to_toml().unwrap();

        assert!(rendered.contains("[[processes]]"));
        assert!(rendered.contains("type = \"web\""));
        assert!(rendered.contains("type = \"no-reload\""));
        assert!(rendered.contains("default = true"));

        let parsed: LaunchMetadata = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, launch);
    }
}
