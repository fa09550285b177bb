//! HTTP transport for the support dialogue engine
//!
//! Thin by design: routing, CORS, process-time and auth middleware, and
//! the mapping from engine errors to HTTP status codes. All dialogue
//! behavior lives in `chatai-agent`.

pub mod auth;
pub mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;
