//! Conversation turns and round counting
//!
//! The engine is stateless between HTTP calls: the caller owns the
//! history and supplies it whole on every turn. Turns are never mutated
//! or persisted here.

use serde::{Deserialize, Serialize};

/// Role in a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single turn in the caller-supplied history, most recent last
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Number of completed rounds: one user + assistant pair per round.
///
/// Derived from the history every turn, never stored server-side.
pub fn round_count(history: &[Turn]) -> usize {
    history.len() / 2
}

/// Content of the most recent assistant turn, if any.
pub fn last_assistant_turn(history: &[Turn]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|t| t.role == TurnRole::Assistant)
        .map(|t| t.content.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_are_pairs() {
        assert_eq!(round_count(&[]), 0);
        assert_eq!(round_count(&[Turn::user("hi")]), 0);
        assert_eq!(
            round_count(&[Turn::user("hi"), Turn::assistant("hello")]),
            1
        );
        let mut history = Vec::new();
        for _ in 0..7 {
            history.push(Turn::user("q"));
            history.push(Turn::assistant("a"));
        }
        assert_eq!(round_count(&history), 7);
    }

    #[test]
    fn finds_last_assistant_turn() {
        let history = vec![
            Turn::user("a"),
            Turn::assistant("first"),
            Turn::user("b"),
            Turn::assistant("second"),
            Turn::user("c"),
        ];
        assert_eq!(last_assistant_turn(&history), Some("second"));
        assert_eq!(last_assistant_turn(&[Turn::user("x")]), None);
    }
}
