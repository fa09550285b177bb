//! Round and session governance
//!
//! Rounds are derived from the caller-supplied history every turn, never
//! stored. The hard cap is unconditional: past it, every business type
//! and every stage escalates.

use chatai_config::constants::{MAX_ROUNDS, SMALL_TALK_MAX_ROUNDS};
use chatai_config::BusinessConfig;
use chatai_core::{conversation, Turn};

/// Hard cap reached: escalate regardless of classification outcome.
pub fn over_round_cap(rounds: usize) -> bool {
    rounds >= MAX_ROUNDS
}

/// Small-talk sub-cap reached: close politely, no escalation.
pub fn small_talk_exhausted(rounds: usize) -> bool {
    rounds >= SMALL_TALK_MAX_ROUNDS
}

/// True when the previous assistant turn asked the "anything else?"
/// follow-up, in any configured language. The current user message is
/// then a satisfaction reply, not a fresh inquiry.
pub fn awaiting_satisfaction_reply(config: &BusinessConfig, history: &[Turn]) -> bool {
    conversation::last_assistant_turn(history)
        .map(|text| config.messages.follow_up.appears_in(text))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatai_core::Language;

    #[test]
    fn cap_is_inclusive_at_seven() {
        assert!(!over_round_cap(6));
        assert!(over_round_cap(7));
        assert!(over_round_cap(12));
    }

    #[test]
    fn satisfaction_signature_is_detected_across_languages() {
        let config = BusinessConfig::default();
        let follow_up_en = config.text(&config.messages.follow_up, Language::En);
        let follow_up_zh = config.text(&config.messages.follow_up, Language::Zh);

        let history = vec![
            Turn::user("checking my order"),
            Turn::assistant(format!("Your order is fine. {follow_up_en}")),
        ];
        assert!(awaiting_satisfaction_reply(&config, &history));

        let history = vec![Turn::user("订单"), Turn::assistant(follow_up_zh)];
        assert!(awaiting_satisfaction_reply(&config, &history));

        let history = vec![Turn::user("hi"), Turn::assistant("hello there")];
        assert!(!awaiting_satisfaction_reply(&config, &history));

        assert!(!awaiting_satisfaction_reply(&config, &[]));
    }
}
