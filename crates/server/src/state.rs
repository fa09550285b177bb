//! Shared application state

use std::sync::Arc;

use chatai_agent::SupportAgent;
use chatai_config::{ConfigStore, Settings};

/// State shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<SupportAgent>,
    pub config: ConfigStore,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(agent: Arc<SupportAgent>, config: ConfigStore, settings: Arc<Settings>) -> Self {
        Self {
            agent,
            config,
            settings,
        }
    }
}
