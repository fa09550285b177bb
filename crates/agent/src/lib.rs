//! Conversation orchestration engine
//!
//! Stateless per turn: the caller supplies the full history, the engine
//! reconstructs everything it needs, produces one response, and forgets.
//!
//! Pipeline for a logged-in turn: validate, round governor, satisfaction
//! check, ambiguity resolver, business-type classification, workflow
//! state machine, composer. Each step depends on the previous step's
//! output; nothing is parallelized inside a turn.
//!
//! Collaborator failures (model, gateway) are converted at the call site
//! into a terminal escalation result; nothing unwinds past the workflow
//! machine, and the only error the transport layer ever sees is request
//! validation.

pub mod agent;
pub mod ambiguity;
pub mod classify;
pub mod compose;
pub mod extract;
pub mod governor;
pub mod status;
pub mod workflow;

pub use agent::SupportAgent;
pub use status::{map_status, MappingResult};
pub use workflow::ProcessingResult;
