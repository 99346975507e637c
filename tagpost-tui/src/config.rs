use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tagpost_types::ColorScheme;

use crate::api::DEFAULT_SERVER_URL;

/// Client settings stored locally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub server_url: String,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            color_scheme: ColorScheme::default(),
            last_updated: chrono::Utc::now(),
        }
    }
}

/// Configuration manager for the .tagpost directory
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Config manager rooted at `~/.tagpost`, created if missing
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        Self::with_dir(home_dir.join(".tagpost"))
    }

    /// Config manager rooted at `config_dir`, created if missing
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        }
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    fn get_client_config_file(&self) -> PathBuf {
        self.config_dir.join("client_config.json")
    }

    /// Save client configuration
    pub fn save_client_config(&self, config: &ClientConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config).context("Failed to serialize client config")?;
        fs::write(self.get_client_config_file(), json).context("Failed to write client config file")?;
        Ok(())
    }

    /// Load client configuration, `None` if nothing was saved yet
    pub fn load_client_config(&self) -> Result<Option<ClientConfig>> {
        let config_file = self.get_client_config_file();

        if !config_file.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&config_file).context("Failed to read client config file")?;
        let config: ClientConfig = serde_json::from_str(&json).context("Failed to parse client config")?;

        Ok(Some(config))
    }
}
