//! Process-level settings
//!
//! Loaded once at startup with file and environment layering:
//! `config/default.yaml`, then `config/{env}.yaml`, then
//! `CHATAI_`-prefixed environment variables (highest priority).

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmSettings,

    #[serde(default)]
    pub gateway: GatewaySettings,

    #[serde(default)]
    pub telegram: TelegramSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    /// Path to the hot-reloadable business configuration file (JSON).
    #[serde(default = "default_business_config_path")]
    pub business_config_path: String,
}

fn default_business_config_path() -> String {
    "config/business.json".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: RuntimeEnvironment::default(),
            server: ServerConfig::default(),
            llm: LlmSettings::default(),
            gateway: GatewaySettings::default(),
            telegram: TelegramSettings::default(),
            auth: AuthSettings::default(),
            business_config_path: default_business_config_path(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_enabled: bool,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: false,
            cors_origins: Vec::new(),
        }
    }
}

/// Language-model collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Mandatory request timeout; a timeout is a collaborator failure.
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,
}

fn default_llm_endpoint() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_llm_model() -> String {
    "qwen3:4b-instruct-2507-q4_K_M".to_string()
}

fn default_llm_timeout_secs() -> u64 {
    15
}

fn default_llm_max_tokens() -> usize {
    256
}

fn default_llm_temperature() -> f32 {
    0.3
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            api_key: None,
            timeout_secs: default_llm_timeout_secs(),
            max_tokens: default_llm_max_tokens(),
            temperature: default_llm_temperature(),
        }
    }
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Internal status-service gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    #[serde(default = "default_gateway_endpoint")]
    pub endpoint: String,
    /// Shared secret for payload signing.
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_gateway_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_gateway_endpoint() -> String {
    "http://localhost:9000".to_string()
}

fn default_gateway_timeout_secs() -> u64 {
    10
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            endpoint: default_gateway_endpoint(),
            secret: String::new(),
            timeout_secs: default_gateway_timeout_secs(),
        }
    }
}

impl GatewaySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Staff notification channel settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelegramSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
}

/// Token auth settings for the HTTP surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_auth_secret")]
    pub secret_key: String,
    #[serde(default = "default_auth_max_age")]
    pub max_age_secs: u64,
}

fn default_auth_secret() -> String {
    "ChatAI_Secret_Key_2025".to_string()
}

fn default_auth_max_age() -> u64 {
    3600
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            secret_key: default_auth_secret(),
            max_age_secs: default_auth_max_age(),
        }
    }
}

impl Settings {
    /// Validate settings; strict checks only fail in production.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.timeout_secs".to_string(),
                message: "collaborator timeouts are mandatory".to_string(),
            });
        }
        if self.gateway.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gateway.timeout_secs".to_string(),
                message: "collaborator timeouts are mandatory".to_string(),
            });
        }
        if self.environment.is_production() {
            if self.auth.enabled && self.auth.secret_key == default_auth_secret() {
                return Err(ConfigError::InvalidValue {
                    field: "auth.secret_key".to_string(),
                    message: "default secret key is not allowed in production".to_string(),
                });
            }
            if self.telegram.enabled && self.telegram.bot_token.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "telegram.bot_token".to_string(),
                    message: "telegram is enabled but no bot token is set".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Load settings with file + environment layering.
///
/// Priority: env vars > `config/{env}.yaml` > `config/default.yaml` >
/// built-in defaults. Missing files are fine; defaults apply.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if Path::new("config/default.yaml").exists() {
        builder = builder.add_source(File::with_name("config/default"));
    }
    if let Some(env_name) = env {
        let path = format!("config/{}", env_name);
        if Path::new(&format!("{}.yaml", path)).exists() {
            builder = builder.add_source(File::with_name(&path));
        }
    }

    builder = builder.add_source(Environment::with_prefix("CHATAI").separator("__"));

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.business_config_path, "config/business.json");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut settings = Settings::default();
        settings.llm.timeout_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn production_rejects_default_auth_secret() {
        let mut settings = Settings::default();
        settings.environment = RuntimeEnvironment::Production;
        settings.auth.enabled = true;
        assert!(settings.validate().is_err());
    }
}
