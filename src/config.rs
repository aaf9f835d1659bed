//! Configuration Management
//!
//! Persistent defaults for the conveyor CLI. Command line flags and their
//! environment variables take precedence over anything stored here.

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:9999/v1";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Conveyor API endpoint, including the version prefix
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    /// `table`, `json` or `yaml`
    #[serde(default)]
    pub output: Option<String>,
    /// Seconds between status polls of `--wait`
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("conveyor").join("config.json"))
    }

    /// Load configuration from disk, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file: {:#}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Get effective endpoint (CLI > config > default)
    pub fn effective_endpoint(&self, cli: Option<&str>) -> String {
        cli.or(self.endpoint.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string()
    }

    pub fn effective_token(&self, cli: Option<&str>) -> Option<String> {
        cli.or(self.token.as_deref()).map(str::to_string)
    }

    pub fn effective_project_id(&self, cli: Option<&str>) -> Option<String> {
        cli.or(self.project_id.as_deref()).map(str::to_string)
    }

    pub fn effective_output(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.unwrap_or_else(|| {
            self.output
                .as_deref()
                .map(OutputFormat::parse)
                .unwrap_or_default()
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(
            self.poll_interval_secs
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
        )
    }
}
