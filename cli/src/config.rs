//! Saved CLI defaults in TOML, so later runs can omit --org/--project/--token.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("qore").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".qore").join("config.toml"))
}

impl CliConfig {
    /// Missing file reads as empty defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!(path = %path.display(), "saved cli defaults");
        Ok(())
    }

    pub fn reset(path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Overwrite saved values with the ones used in this run.
    pub fn remember(&mut self, org: &str, project: Option<&str>, token: &str, endpoint: Option<&str>) {
        self.organization_id = Some(org.to_string());
        if let Some(project) = project {
            self.project_id = Some(project.to_string());
        }
        self.token = Some(token.to_string());
        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint.to_string());
        }
    }
}

/// Flag value, else saved default, else a `Missing` error naming the flag.
pub fn pick(flag_value: Option<String>, saved: &Option<String>, flag: &'static str, env: &'static str) -> Result<String> {
    flag_value
        .or_else(|| saved.clone())
        .filter(|v| !v.is_empty())
        .ok_or(CliError::Missing { flag, env })
}
