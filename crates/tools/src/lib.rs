//! External collaborator integrations
//!
//! The internal status service (signed RPC) and the staff notification
//! channel. Both are consumed by the engine through the traits in
//! `chatai-core`; everything here is transport detail.

pub mod gateway;
pub mod telegram;

pub use gateway::HttpBackendGateway;
pub use telegram::{NullNotifier, TelegramNotifier};

use thiserror::Error;

/// Integration errors
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("invalid reply: {0}")]
    InvalidReply(String),

    #[error("timeout")]
    Timeout,

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for IntegrationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IntegrationError::Timeout
        } else {
            IntegrationError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<IntegrationError> for chatai_core::Error {
    fn from(err: IntegrationError) -> Self {
        match err {
            IntegrationError::Timeout => chatai_core::Error::Timeout,
            other => chatai_core::Error::Gateway(other.to_string()),
        }
    }
}
