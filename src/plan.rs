//! Build plan records
//!
//! A [`BuildPlan`] is a conjunction of requirements plus a list of alternative
//! plans. The lifecycle reads it structurally, so field names and the
//! `launch = true` metadata convention are part of the wire format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Something this buildpack contributes to the build (never used here)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provision {
    pub name: String,
}

/// Per-requirement metadata read by the providing buildpack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequirementMetadata {
    /// The dependency must be available in the launch image
    pub launch: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub metadata: RequirementMetadata,
}

impl Requirement {
    /// Requirement that must be present at container launch
    pub fn launch(name: &str) -> Self {
        Self {
            name: name.to_string(),
            metadata: RequirementMetadata { launch: true },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildPlan {
    #[serde(default)]
    pub provides: Vec<Provision>,
    #[serde(default)]
    pub requires: Vec<Requirement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub or: Vec<BuildPlan>,
}

impl BuildPlan {
    pub fn requiring(requires: Vec<Requirement>) -> Self {
        Self {
            provides: Vec::new(),
            requires,
            or: Vec::new(),
        }
    }

    /// Merges candidates into a single disjunction rooted at `primary`
    ///
    /// Each alternative becomes one flat entry in `or`; alternatives that
    /// carry their own `or` branches are flattened into the same list.
    pub fn or(primary: BuildPlan, alternatives: impl IntoIterator<Item = BuildPlan>) -> BuildPlan {
        let mut combined = primary;
        for mut alternative in alternatives {
            let nested = std::mem::take(&mut alternative.or);
            combined.or.push(alternative);
            combined.or.extend(nested);
        }
        combined
    }

    /// Every requirement list in the plan: the primary branch first, then each alternative
    pub fn branches(&self) -> impl Iterator<Item = &[Requirement]> {
        std::iter::once(self.requires.as_slice()).chain(self.or.iter().map(|p| p.requires.as_slice()))
    }

    pub fn requirement_names(&self) -> Vec<&str> {
        self.requires.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize build plan to TOML")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize build plan to JSON")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize build plan to YAML")
    }
}
