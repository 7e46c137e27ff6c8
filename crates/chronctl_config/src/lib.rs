pub mod definitions;

use std::fs::read_to_string;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Connection settings for the scheduler's API. Loaded once per invocation
/// and handed to the http client, never read from ambient state.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChronConfig {
    #[serde(default = "ChronConfig::default_url")]
    pub url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

impl Default for ChronConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl ChronConfig {
    fn default_url() -> String {
        definitions::DEFAULT_SCHEDULER_URL.to_owned()
    }

    fn search_paths() -> Result<Vec<PathBuf>> {
        Ok(vec![
            std::env::current_dir()?.join(definitions::TOOL_CONFIG_FILE),
            PathBuf::from(definitions::SYSTEM_CONFIG_DIR).join(definitions::TOOL_CONFIG_FILE),
        ])
    }

    /// Looks for chronctl.yaml in the current directory and then in /etc. A
    /// missing file falls back to the defaults, a malformed file is an error.
    pub fn load() -> Result<Self> {
        for path in Self::search_paths()? {
            if !path.is_file() {
                continue;
            }
            debug!("loading config file from: {}", path.display());
            return serde_yaml_ng::from_str(&read_to_string(&path)?).map_err(|e| anyhow!(e));
        }
        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Credentials count as configured only when both parts are non empty.
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        if self.username.is_empty() || self.password.is_empty() {
            return None;
        }
        Some((&self.username, &self.password))
    }
}
