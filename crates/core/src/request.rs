//! Wire types for a single dialogue turn
//!
//! Field names follow the platform contract of the original service
//! (`messages`, `status`, `type`, `transfer_human`). All state needed to
//! process a turn arrives in the request; nothing outlives the response.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::business::{BusinessType, ResponseStage};
use crate::conversation::Turn;
use crate::error::{Error, Result};
use crate::language::Language;

/// Whether the platform reports the user as logged in
///
/// The wire value is an integer and only 0/1 are legal; anything else is
/// rejected before business logic runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginStatus(pub i64);

impl LoginStatus {
    pub const LOGGED_OUT: LoginStatus = LoginStatus(0);
    pub const LOGGED_IN: LoginStatus = LoginStatus(1);

    pub fn is_logged_in(&self) -> bool {
        self.0 == 1
    }

    pub fn is_valid(&self) -> bool {
        self.0 == 0 || self.0 == 1
    }
}

impl Default for LoginStatus {
    fn default() -> Self {
        LoginStatus::LOGGED_IN
    }
}

/// Advisory hints attached to the request by upstream systems
///
/// Loosely-typed on the wire; modeled here as explicit optional fields
/// so nothing downstream has to poke at untyped maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestMetadata {
    /// Classifier hint: a category name the upstream router guessed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One inbound dialogue turn
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRequest {
    pub session_id: String,
    pub user_id: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub language: Language,
    /// 0 = logged out, 1 = logged in
    #[serde(default)]
    pub status: LoginStatus,
    /// Preset business type; when present, classification is skipped.
    #[serde(rename = "type", default)]
    pub business_type: Option<BusinessType>,
    /// Current user message text
    pub messages: String,
    /// Conversation history, most recent last
    #[serde(default)]
    pub history: Vec<Turn>,
    /// URLs of images the user uploaded this turn
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub metadata: Option<RequestMetadata>,
    #[serde(default = "default_site")]
    pub site: i64,
}

fn default_site() -> i64 {
    1
}

impl ProcessRequest {
    /// Boundary validation; rejected requests never reach the engine.
    pub fn validate(&self) -> Result<()> {
        if self.session_id.trim().is_empty() {
            return Err(Error::InvalidRequest("session_id must not be empty".into()));
        }
        if self.messages.trim().is_empty() {
            return Err(Error::InvalidRequest("messages must not be empty".into()));
        }
        if !self.status.is_valid() {
            return Err(Error::InvalidRequest(format!(
                "status must be 0 or 1, got {}",
                self.status.0
            )));
        }
        Ok(())
    }

    /// Classifier hint category, if the upstream router attached one.
    pub fn category_hint(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.category.as_deref())
    }
}

/// Metadata echoed back with every response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Resolved intent (business code), if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    /// Unix timestamp of response construction
    pub timestamp: f64,
    /// Rounds completed before this turn
    pub round_count: usize,
}

impl ResponseMetadata {
    pub fn new(intent: Option<String>, round_count: usize) -> Self {
        Self {
            intent,
            timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
            round_count,
        }
    }
}

/// One outbound dialogue turn
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResponse {
    pub session_id: String,
    /// Always "success"; transport errors never take this shape.
    pub status: String,
    pub response: String,
    pub stage: ResponseStage,
    pub metadata: ResponseMetadata,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub site: i64,
    /// Resolved business code, or "unauthenticated" for login gating
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    pub transfer_human: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(session: &str, message: &str, status: i64) -> ProcessRequest {
        ProcessRequest {
            session_id: session.into(),
            user_id: "u1".into(),
            platform: "web".into(),
            language: Language::En,
            status: LoginStatus(status),
            business_type: None,
            messages: message.into(),
            history: Vec::new(),
            images: Vec::new(),
            metadata: None,
            site: 1,
        }
    }

    #[test]
    fn rejects_empty_session_and_message() {
        assert!(request("", "hello", 1).validate().is_err());
        assert!(request("s1", "  ", 1).validate().is_err());
        assert!(request("s1", "hello", 1).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_login_status() {
        assert!(request("s1", "hello", 2).validate().is_err());
        assert!(request("s1", "hello", 0).validate().is_ok());
    }

    #[test]
    fn deserializes_wire_shape() {
        let raw = serde_json::json!({
            "session_id": "abc",
            "user_id": "u-9",
            "platform": "app",
            "language": "zh",
            "status": 1,
            "type": "S001",
            "messages": "充值没到账",
            "history": [{"role": "user", "content": "hi"}],
            "metadata": {"category": "payments"},
            "site": 2
        });
        let req: ProcessRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(req.business_type, Some(BusinessType::DepositQuery));
        assert_eq!(req.category_hint(), Some("payments"));
        assert_eq!(req.site, 2);
        assert!(req.validate().is_ok());
    }
}
