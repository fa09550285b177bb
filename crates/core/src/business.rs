//! Business types and workflow stages
//!
//! `BusinessType` is the closed set of supported intents. Once resolved
//! for a turn it never changes, except when the ambiguity resolver
//! explicitly re-routes a clarified inquiry.
//!
//! Stage numbering is workflow-local: stage 0 always means "the message
//! is unrelated to the active business type", everything else is private
//! to the owning workflow.

use serde::{Deserialize, Serialize};

/// Closed enumeration of supported business intents
///
/// Wire codes (`S001`..) are kept from the upstream platform contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessType {
    /// Deposit inquiries (order status, how-to)
    #[serde(rename = "S001")]
    DepositQuery,
    /// Withdrawal inquiries
    #[serde(rename = "S002")]
    WithdrawalQuery,
    /// Promotion / activity eligibility inquiries
    #[serde(rename = "S003")]
    ActivityQuery,
    /// Explicit request for a human agent
    #[serde(rename = "S004")]
    HumanHandoff,
    /// Chit-chat and everything without a business signal
    #[serde(rename = "S005")]
    SmallTalk,
}

impl BusinessType {
    /// All members, in deterministic classification order.
    pub const ALL: [BusinessType; 5] = [
        BusinessType::DepositQuery,
        BusinessType::WithdrawalQuery,
        BusinessType::ActivityQuery,
        BusinessType::HumanHandoff,
        BusinessType::SmallTalk,
    ];

    /// Wire code for the platform contract
    pub fn code(&self) -> &'static str {
        match self {
            BusinessType::DepositQuery => "S001",
            BusinessType::WithdrawalQuery => "S002",
            BusinessType::ActivityQuery => "S003",
            BusinessType::HumanHandoff => "S004",
            BusinessType::SmallTalk => "S005",
        }
    }

    /// Short English name, used in prompts and guidance templates
    pub fn name(&self) -> &'static str {
        match self {
            BusinessType::DepositQuery => "deposit",
            BusinessType::WithdrawalQuery => "withdrawal",
            BusinessType::ActivityQuery => "activity",
            BusinessType::HumanHandoff => "human service",
            BusinessType::SmallTalk => "small talk",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.code() == code)
    }

    /// The two order-number driven workflows share one state machine.
    pub fn is_order_flow(&self) -> bool {
        matches!(
            self,
            BusinessType::DepositQuery | BusinessType::WithdrawalQuery
        )
    }
}

impl std::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Stage of the deposit/withdrawal order workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderFlowStage {
    /// Message unrelated to the active business type
    Unrelated,
    /// Greet and ask for the order number
    #[default]
    AskOrder,
    /// User does not know where to find the order number
    NotKnowWhere,
    /// An order number was provided; query the backend
    OrderProvided,
    /// Resolution confirmed; ask whether anything else is needed
    SuccessFollowup,
}

impl OrderFlowStage {
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            0 => Some(OrderFlowStage::Unrelated),
            1 => Some(OrderFlowStage::AskOrder),
            2 => Some(OrderFlowStage::NotKnowWhere),
            3 => Some(OrderFlowStage::OrderProvided),
            4 => Some(OrderFlowStage::SuccessFollowup),
            _ => None,
        }
    }

    pub fn number(&self) -> i64 {
        match self {
            OrderFlowStage::Unrelated => 0,
            OrderFlowStage::AskOrder => 1,
            OrderFlowStage::NotKnowWhere => 2,
            OrderFlowStage::OrderProvided => 3,
            OrderFlowStage::SuccessFollowup => 4,
        }
    }
}

/// Stage of the activity workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActivityStage {
    /// Message unrelated to the active business type
    Unrelated,
    /// Fetch the activity list and identify the one the user means
    #[default]
    ListAndIdentify,
    /// User is answering a clarification after the list was shown
    ClarifyAfterList,
}

impl ActivityStage {
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            0 => Some(ActivityStage::Unrelated),
            1 => Some(ActivityStage::ListAndIdentify),
            2 => Some(ActivityStage::ClarifyAfterList),
            _ => None,
        }
    }

    pub fn number(&self) -> i64 {
        match self {
            ActivityStage::Unrelated => 0,
            ActivityStage::ListAndIdentify => 1,
            ActivityStage::ClarifyAfterList => 2,
        }
    }
}

/// Outcome of stage classification
///
/// Model output that fails validation against the legal stage set does
/// not crash the turn: it degrades to a human-handoff sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageDecision<S> {
    Stage(S),
    Handoff,
}

/// Coarse lifecycle stage reported back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStage {
    /// The conversation continues
    #[default]
    Working,
    /// Terminal for the automated flow
    Finish,
    /// The caller must log in before any business logic runs
    Unauthenticated,
}

impl ResponseStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStage::Working => "working",
            ResponseStage::Finish => "finish",
            ResponseStage::Unauthenticated => "unauthenticated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_codes_round_trip() {
        for b in BusinessType::ALL {
            assert_eq!(BusinessType::from_code(b.code()), Some(b));
        }
        assert_eq!(BusinessType::from_code("S999"), None);
    }

    #[test]
    fn business_type_serializes_as_code() {
        let json = serde_json::to_string(&BusinessType::DepositQuery).unwrap();
        assert_eq!(json, "\"S001\"");
        let back: BusinessType = serde_json::from_str("\"S002\"").unwrap();
        assert_eq!(back, BusinessType::WithdrawalQuery);
    }

    #[test]
    fn order_flow_stage_numbers() {
        assert_eq!(OrderFlowStage::from_number(3), Some(OrderFlowStage::OrderProvided));
        assert_eq!(OrderFlowStage::from_number(5), None);
        assert_eq!(OrderFlowStage::SuccessFollowup.number(), 4);
    }

    #[test]
    fn response_stage_wire_values() {
        assert_eq!(
            serde_json::to_string(&ResponseStage::Unauthenticated).unwrap(),
            "\"unauthenticated\""
        );
    }
}
