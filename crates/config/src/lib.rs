//! Configuration management for the support dialogue service
//!
//! Two kinds of configuration live here:
//!
//! - [`Settings`]: process-level settings (server, collaborator
//!   endpoints, auth) loaded once at startup from YAML files and
//!   `CHATAI_` environment variables.
//! - [`BusinessConfig`]: the data-driven dialogue tables (keyword lists,
//!   per-stage scripts, status-message mappings). Hot-reloadable at
//!   runtime through [`ConfigStore`], which swaps an `Arc` snapshot
//!   atomically so in-flight requests keep the table they started with.

pub mod business;
pub mod constants;
pub mod settings;
pub mod store;

pub use business::{
    BusinessConfig, BusinessEntry, LocalizedText, Menu, MessageTable, StageScript, StatusMapping,
};
pub use settings::{
    load_settings, AuthSettings, GatewaySettings, LlmSettings, RuntimeEnvironment, ServerConfig,
    Settings, TelegramSettings,
};
pub use store::ConfigStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for chatai_core::Error {
    fn from(err: ConfigError) -> Self {
        chatai_core::Error::Config(err.to_string())
    }
}
