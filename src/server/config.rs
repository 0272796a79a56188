//! Service configuration
//!
//! Port and credentials, loaded from a YAML settings file with environment
//! variable overrides for deployed instances.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default port
pub const DEFAULT_PORT: u16 = 8787;

/// Config file name
const CONFIG_FILENAME: &str = "settings.yaml";

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// API listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// GitHub token; optional, raises rate limits and unlocks day details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    /// Resend API key for the contact relay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resend_api_key: Option<String>,

    /// Inbox that receives contact form submissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            github_token: None,
            resend_api_key: None,
            contact_email: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the config directory
    ///
    /// # Arguments
    /// * `config_dir` - Configuration directory path
    ///
    /// # Returns
    /// The parsed configuration, or defaults when the file is missing
    pub fn load(config_dir: &Path) -> Self {
        let config_path = Self::config_path(config_dir);

        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Applies environment overrides on top of the file values
    ///
    /// Recognized variables: `AML_WEB_PORT`, `GITHUB_TOKEN`,
    /// `RESEND_API_KEY`, `CONTACT_EMAIL`. Empty or unparsable values are
    /// ignored. Secrets are expected to arrive this way in deployment;
    /// the settings file covers local development.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("AML_WEB_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.port = port;
            }
        }
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                self.github_token = Some(token);
            }
        }
        if let Ok(key) = std::env::var("RESEND_API_KEY") {
            if !key.is_empty() {
                self.resend_api_key = Some(key);
            }
        }
        if let Ok(email) = std::env::var("CONTACT_EMAIL") {
            if !email.is_empty() {
                self.contact_email = Some(email);
            }
        }
    }

    /// Saves configuration to the config directory
    ///
    /// # Arguments
    /// * `config_dir` - Configuration directory path
    pub fn save(&self, config_dir: &Path) -> Result<(), String> {
        let config_path = Self::config_path(config_dir);

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(&config_path, content).map_err(|e| format!("Failed to write config file: {}", e))
    }

    /// Validates a listen port
    ///
    /// Ports must be in the 1024-65535 range; 0 is handled separately by
    /// the server as "pick any free port".
    pub fn validate_port(port: u16) -> Result<(), String> {
        if port < 1024 {
            return Err("Port must be >= 1024 (non-privileged ports)".to_string());
        }
        Ok(())
    }

    /// Full path of the settings file inside a config directory
    pub fn config_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILENAME)
    }
}

/// Default configuration directory (`~/.config/aml-web` on Linux)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aml-web")
}
