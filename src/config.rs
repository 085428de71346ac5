//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default conversations service address
pub const DEFAULT_API_ADDRESS: &str = "http://127.0.0.1:50061";

/// Default per-request timeout of the service client
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const API_ADDRESS_ENV: &str = "CONVERSATIONS_API_ADDRESS";
const COLLECTIVE_ID_ENV: &str = "CONVERSATIONS_COLLECTIVE_ID";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Conversations service address
    pub api_address: Option<String>,
    /// Collective new conversations are created under
    pub collective_id: Option<String>,
    /// Timeout applied to each service request
    pub request_timeout_secs: Option<u64>,
    /// Tags suggested in addition to the collective's own
    pub suggested_tags: Option<Vec<String>>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "opencollective", "conversation-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load_with_env() -> Result<Self> {
        Ok(Self::load()?.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Override file values with the variables `lookup` resolves
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(address) = lookup(API_ADDRESS_ENV).filter(|v| !v.is_empty()) {
            self.api_address = Some(address);
        }
        if let Some(collective_id) = lookup(COLLECTIVE_ID_ENV).filter(|v| !v.is_empty()) {
            self.collective_id = Some(collective_id);
        }
        self
    }

    pub fn api_address(&self) -> &str {
        self.api_address.as_deref().unwrap_or(DEFAULT_API_ADDRESS)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn suggested_tags(&self) -> &[String] {
        self.suggested_tags.as_deref().unwrap_or_default()
    }
}
