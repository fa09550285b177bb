//! Status-to-response mapping
//!
//! The single place that interprets raw backend status strings. Workflow
//! code branches on the returned `MappingResult`, never on the raw
//! status itself. Unknown statuses always map to a conservative
//! escalate-and-notify entry, never to silence.

use chatai_config::BusinessConfig;
use chatai_core::{BusinessType, Language};

/// Resolved interpretation of a backend status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingResult {
    /// Localized user-facing message.
    pub message: String,
    /// Terminal for the automated flow.
    pub terminal: bool,
    pub escalate: bool,
    pub notify: bool,
    /// False when the status was not in the table and the conservative
    /// fallback applied.
    pub known: bool,
}

/// Pure lookup over the configured status table.
pub fn map_status(
    config: &BusinessConfig,
    business: BusinessType,
    raw_status: &str,
    language: Language,
) -> MappingResult {
    let raw = raw_status.trim();
    if let Some(entry) = config.entry(business) {
        if let Some(mapping) = entry.status_map.iter().find(|m| m.status == raw) {
            return MappingResult {
                message: config.text(&mapping.message, language),
                terminal: mapping.terminal,
                escalate: mapping.escalate,
                notify: mapping.notify,
                known: true,
            };
        }
    }

    tracing::warn!(
        business = business.code(),
        status = raw,
        "unmapped backend status, applying conservative escalation"
    );
    MappingResult {
        message: config.text(&config.messages.status_forwarded, language),
        terminal: true,
        escalate: true,
        notify: true,
        known: false,
    }
}
