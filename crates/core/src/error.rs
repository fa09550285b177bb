//! Error types shared across the workspace

use thiserror::Error;

/// Top-level error type
///
/// Collaborator failures are caught at the call site inside the workflow
/// machine and converted into a safe escalation result; the only variant
/// that surfaces to the transport layer is `InvalidRequest`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("language model error: {0}")]
    Llm(String),

    #[error("backend gateway error: {0}")]
    Gateway(String),

    #[error("notification error: {0}")]
    Notify(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("collaborator timeout")]
    Timeout,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the error came from an out-of-process collaborator
    /// (model, gateway, notifier) rather than from caller input.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Error::Llm(_) | Error::Gateway(_) | Error::Notify(_) | Error::Timeout
        )
    }
}
