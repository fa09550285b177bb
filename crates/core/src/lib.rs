//! Core traits and types for the ChatAI support dialogue engine
//!
//! This crate provides foundational types used across all other crates:
//! - Request/response wire types for a single dialogue turn
//! - The closed business-type and workflow-stage enumerations
//! - Conversation turns and round counting
//! - Collaborator traits (language model, backend gateway, staff notifier)
//! - Error types

pub mod business;
pub mod conversation;
pub mod error;
pub mod language;
pub mod request;
pub mod traits;

pub use business::{ActivityStage, BusinessType, OrderFlowStage, ResponseStage, StageDecision};
pub use conversation::{round_count, Turn, TurnRole};
pub use error::{Error, Result};
pub use language::Language;
pub use request::{LoginStatus, ProcessRequest, ProcessResponse, ResponseMetadata};
pub use traits::{BackendGateway, BackendReply, CallCode, LanguageModel, Notifier};
