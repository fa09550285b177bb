//! Collaborator traits
//!
//! Every out-of-process dependency of the engine is consumed through one
//! of these traits so the workflow machine can be exercised with mocks.
//! Implementations must enforce their own timeouts; the engine treats a
//! timeout like any other collaborator failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Single-shot text completion against the language-model backend.
///
/// The engine never branches on unvalidated free text: every call site
/// validates the returned string against a legal-value set or treats it
/// as an explicit "invalid" outcome.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Backend call codes for the internal status service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallCode {
    /// Deposit order status
    #[serde(rename = "A001")]
    DepositStatus,
    /// Withdrawal order status
    #[serde(rename = "A002")]
    WithdrawalStatus,
    /// List of running activities
    #[serde(rename = "A003")]
    ActivityList,
    /// Whether the user qualifies for an activity
    #[serde(rename = "A004")]
    UserEligibility,
}

impl CallCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallCode::DepositStatus => "A001",
            CallCode::WithdrawalStatus => "A002",
            CallCode::ActivityList => "A003",
            CallCode::UserEligibility => "A004",
        }
    }
}

/// Reply envelope from the internal status service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendReply {
    /// 0 = success, 886 = missing/invalid parameter, anything else is a
    /// system failure.
    #[serde(rename = "resultCode")]
    pub code: i64,
    /// Call-specific payload
    #[serde(default)]
    pub data: serde_json::Value,
}

impl BackendReply {
    pub const OK: i64 = 0;
    /// User-correctable: the supplied parameter did not resolve.
    pub const INVALID_PARAM: i64 = 886;

    pub fn is_ok(&self) -> bool {
        self.code == Self::OK
    }

    pub fn is_invalid_param(&self) -> bool {
        self.code == Self::INVALID_PARAM
    }
}

/// Encrypted RPC to the internal business API
#[async_trait]
pub trait BackendGateway: Send + Sync {
    async fn query(
        &self,
        session_id: &str,
        code: CallCode,
        params: serde_json::Value,
        site: i64,
    ) -> Result<BackendReply>;
}

/// Fire-and-forget alert channel to human staff
///
/// Delivery is best-effort by design; callers spawn these and log
/// failures without failing the turn.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_text(&self, message: &str) -> Result<()>;

    async fn notify_images(&self, caption: &str, images: &[String]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_reply_codes() {
        let reply: BackendReply =
            serde_json::from_value(serde_json::json!({"resultCode": 886})).unwrap();
        assert!(reply.is_invalid_param());
        assert!(!reply.is_ok());

        let ok: BackendReply =
            serde_json::from_value(serde_json::json!({"resultCode": 0, "data": {"status": "x"}}))
                .unwrap();
        assert!(ok.is_ok());
        assert_eq!(ok.data["status"], "x");
    }

    #[test]
    fn call_codes_serialize_to_platform_codes() {
        assert_eq!(
            serde_json::to_string(&CallCode::WithdrawalStatus).unwrap(),
            "\"A002\""
        );
        assert_eq!(CallCode::ActivityList.as_str(), "A003");
    }
}
