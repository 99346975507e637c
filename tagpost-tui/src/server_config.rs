use crate::api::DEFAULT_SERVER_URL;
use crate::config::{ClientConfig, ConfigManager};
use anyhow::Result;
use tagpost_types::ColorScheme;

/// Environment variable overriding the server URL
pub const SERVER_URL_ENV: &str = "TAGPOST_SERVER_URL";

/// Server configuration utility for managing server URL settings
pub struct ServerConfigManager {
    config_manager: ConfigManager,
}

impl ServerConfigManager {
    /// Create a new server configuration manager
    pub fn new() -> Result<Self> {
        Ok(Self::with_config_manager(ConfigManager::new()?))
    }

    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// Determine the server URL to use based on priority:
    /// 1. CLI argument (highest priority)
    /// 2. Environment variable TAGPOST_SERVER_URL
    /// 3. Saved configuration file
    /// 4. Default (lowest priority)
    pub fn determine_server_url(&self, cli_override: Option<String>) -> Result<String> {
        self.resolve_server_url(cli_override, std::env::var(SERVER_URL_ENV).ok())
    }

    fn resolve_server_url(&self, cli_override: Option<String>, env_override: Option<String>) -> Result<String> {
        if let Some(url) = cli_override.or(env_override) {
            return Ok(url);
        }

        if let Some(config) = self.config_manager.load_client_config()? {
            return Ok(config.server_url);
        }

        Ok(DEFAULT_SERVER_URL.to_string())
    }

    /// Save server URL to configuration file, keeping the other settings
    pub fn save_server_url(&self, server_url: String) -> Result<()> {
        let mut config = self.config_manager.load_client_config()?.unwrap_or_default();
        config.server_url = server_url;
        config.last_updated = chrono::Utc::now();
        self.config_manager.save_client_config(&config)
    }

    /// Saved color scheme, default when none is saved
    pub fn color_scheme(&self) -> Result<ColorScheme> {
        Ok(self
            .config_manager
            .load_client_config()?
            .map(|c| c.color_scheme)
            .unwrap_or_default())
    }

    pub fn save_color_scheme(&self, color_scheme: ColorScheme) -> Result<()> {
        let mut config = self
            .config_manager
            .load_client_config()?
            .unwrap_or_else(ClientConfig::default);
        config.color_scheme = color_scheme;
        config.last_updated = chrono::Utc::now();
        self.config_manager.save_client_config(&config)
    }
}
