//! Entity extraction: order numbers and activity names
//!
//! Pure functions over text. The order-number policy is deliberately
//! exact: only digit runs of exactly [`ORDER_NUMBER_LEN`] characters
//! count, so phone numbers and other IDs never false-positive.

use once_cell::sync::Lazy;
use regex::Regex;

use chatai_config::constants::ORDER_NUMBER_LEN;
use chatai_core::Turn;

// ASCII digits only; order numbers never use other numeral scripts.
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("static pattern"));

/// First digit run of exactly the configured order-number length.
///
/// Runs of any other length (17, 19, ...) are ignored entirely.
pub fn order_number_in(text: &str) -> Option<String> {
    DIGIT_RUN
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|run| run.len() == ORDER_NUMBER_LEN)
        .map(str::to_string)
}

/// Order number from the current message, then the history.
///
/// Current message and history contents are scanned as separate texts
/// (joining them could fuse digit runs across boundaries).
pub fn extract_order_number(message: &str, history: &[Turn]) -> Option<String> {
    if let Some(order) = order_number_in(message) {
        return Some(order);
    }
    history.iter().find_map(|turn| order_number_in(&turn.content))
}

/// Exact activity-name match: the candidate equals a running activity,
/// or a running activity name appears verbatim inside the candidate.
///
/// Near-matching is a model concern and lives in the activity workflow;
/// it only ever proposes, never selects.
pub fn match_activity_exact(candidate: &str, available: &[String]) -> Option<String> {
    let trimmed = candidate.trim();
    if let Some(name) = available.iter().find(|name| name.as_str() == trimmed) {
        return Some(name.clone());
    }
    available
        .iter()
        .find(|name| !name.is_empty() && trimmed.contains(name.as_str()))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_eighteen_digits_extracts() {
        assert_eq!(
            order_number_in("123456789012345678"),
            Some("123456789012345678".to_string())
        );
        assert_eq!(
            order_number_in("my order is 123456789012345678 thanks"),
            Some("123456789012345678".to_string())
        );
    }

    #[test]
    fn seventeen_and_nineteen_digit_runs_never_match() {
        assert_eq!(order_number_in("12345678901234567"), None);
        assert_eq!(order_number_in("1234567890123456789"), None);
    }

    #[test]
    fn first_exact_run_wins_among_several() {
        let text = "ids: 12345678901234567, 111111111111111111, 222222222222222222";
        assert_eq!(order_number_in(text), Some("111111111111111111".to_string()));
    }

    #[test]
    fn history_is_scanned_after_current_message() {
        let history = vec![
            Turn::user("my order 333333333333333333"),
            Turn::assistant("checking"),
        ];
        assert_eq!(
            extract_order_number("any update?", &history),
            Some("333333333333333333".to_string())
        );
        assert_eq!(
            extract_order_number("444444444444444444", &history),
            Some("444444444444444444".to_string())
        );
    }

    #[test]
    fn runs_do_not_fuse_across_turns() {
        // 9 digits at the end of one turn + 9 at the start of the next
        // must not combine into a fake 18-digit order number.
        let history = vec![
            Turn::user("code 123456789"),
            Turn::user("987654321 is the rest"),
        ];
        assert_eq!(extract_order_number("hello", &history), None);
    }

    #[test]
    fn activity_exact_and_containment() {
        let available = vec![
            "First Deposit Bonus".to_string(),
            "Weekly Rebate".to_string(),
        ];
        assert_eq!(
            match_activity_exact("First Deposit Bonus", &available),
            Some("First Deposit Bonus".to_string())
        );
        assert_eq!(
            match_activity_exact("tell me about the Weekly Rebate please", &available),
            Some("Weekly Rebate".to_string())
        );
        assert_eq!(match_activity_exact("Weekly Rabate", &available), None);
    }
}
