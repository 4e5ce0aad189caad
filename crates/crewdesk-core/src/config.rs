use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::provider::Provider;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4111";
pub const DEFAULT_PROVIDER_NAME: &str = "mastra";
pub const DEFAULT_USER_ID: &str = "Test User";
pub const DEFAULT_THREAD_ID: &str = "Test Thread";
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;

/// Checked in order; the first one set wins
pub const BASE_URL_ENV_VARS: [&str; 2] = ["CREWDESK_WORKFLOW_URL", "MASTRA_URL"];
pub const PROVIDER_ENV_VAR: &str = "CREWDESK_PROVIDER";

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 28).unwrap_or_default()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub provider: Option<String>,
    pub base_url: String,
    pub provider_name: String,
    pub user_id: String,
    pub thread_id: String,
    pub reply_delay_ms: u64,
    pub default_start_date: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            provider: Some(Provider::Workflow.as_str().to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
            provider_name: DEFAULT_PROVIDER_NAME.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            thread_id: DEFAULT_THREAD_ID.to_string(),
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            default_start_date: default_start_date(),
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    pub fn save_provider(provider: Provider) -> Result<()> {
        let mut config = Self::load().unwrap_or_else(|_| Self::new());
        config.provider = Some(provider.as_str().to_string());
        config.save()
    }

    /// Apply environment overrides using `lookup` (normally `std::env::var`)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = BASE_URL_ENV_VARS
            .iter()
            .filter_map(|key| lookup(*key))
            .find(|v| !v.trim().is_empty())
        {
            self.base_url = url;
        }
        if let Some(provider) = lookup(PROVIDER_ENV_VAR) {
            self.provider = Some(provider);
        }
    }

    /// Configured provider, falling back to the workflow engine
    pub fn provider(&self) -> Provider {
        self.provider
            .as_deref()
            .and_then(Provider::from_str)
            .unwrap_or(Provider::Workflow)
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("crewdesk").join("config.json"))
    }
}
