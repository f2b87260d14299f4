use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::core_types::{DEFAULT_PAGE_LIMIT, PageLimit};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    #[serde(default)]
    pub rotation: LogRotation,
    pub api: ApiConfig,
    #[serde(default)]
    pub lists: ListConfig,
}

/// Rolling policy for the log file
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token attached to every request when present
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

/// List view defaults shared by every table
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListConfig {
    pub default_page_limit: PageLimit,
    /// Payload key that partitions a list (never counts as a user filter)
    pub structural_key: String,
    /// Pseudo-field that moves the page cursor instead of editing a filter
    pub page_field: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_page_limit: DEFAULT_PAGE_LIMIT,
            structural_key: crate::filter::STRUCTURAL_KEY.to_string(),
            page_field: crate::table::PAGE_FIELD.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config yaml: {}", config_path))
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}
