//! Language-model collaborator
//!
//! A single-shot, timeout-bound text-completion client plus the prompt
//! builders for every model call the engine makes. The engine treats
//! every completion as fallible and validates whatever comes back
//! against a legal-value set; nothing here retries.

pub mod backend;
pub mod prompt;

pub use backend::{OpenAiBackend, OpenAiConfig};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("api error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("timeout")]
    Timeout,

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for chatai_core::Error {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout => chatai_core::Error::Timeout,
            other => chatai_core::Error::Llm(other.to_string()),
        }
    }
}
