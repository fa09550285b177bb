//! Centralized engine constants
//!
//! Tuning knobs that are policy, not deployment configuration. Anything
//! a deployment may want to vary lives in [`crate::Settings`] instead.

/// Exact length of a platform order number. Digit runs of any other
/// length are never treated as order numbers.
pub const ORDER_NUMBER_LEN: usize = 18;

/// Hard cap on conversation rounds before unconditional escalation.
pub const MAX_ROUNDS: usize = 7;

/// Rounds of small talk before the polite close.
pub const SMALL_TALK_MAX_ROUNDS: usize = 7;

/// From this round on, drift guidance names the specific missing datum.
pub const GUIDANCE_DIRECT_ROUNDS: usize = 5;

/// Maximum number of near-match activity names proposed for confirmation.
pub const NEAR_MATCH_LIMIT: usize = 3;

/// A business mention counts as "bare" when the message is at most this
/// many whitespace-separated words...
pub const BARE_MENTION_MAX_WORDS: usize = 2;

/// ...or, for unspaced scripts, at most this many characters.
pub const BARE_MENTION_MAX_CHARS: usize = 4;
