//! Prompt builders for every model call the engine makes
//!
//! Each prompt constrains the model to a closed answer space (a code, a
//! number, a short list) so the caller can validate the output instead
//! of branching on free text. Reply-generation prompts carry the chat
//! history and the scripted suggestion.

use chatai_core::{Language, Turn};

fn render_history(history: &[Turn]) -> String {
    let mut out = String::new();
    for turn in history {
        out.push_str(turn.role.as_str());
        out.push_str(": ");
        out.push_str(&turn.content);
        out.push('\n');
    }
    out
}

/// Business-type classification with a closed code list.
///
/// `options` pairs wire codes with short descriptions. The category
/// hint, when present, is advisory context only.
pub fn business_type(
    message: &str,
    history: &[Turn],
    language: Language,
    category_hint: Option<&str>,
    options: &[(String, String)],
) -> String {
    let mut listed = String::new();
    for (code, name) in options {
        listed.push_str(&format!("- {code}: {name}\n"));
    }
    let hint = category_hint
        .map(|h| format!("An upstream router suggested the category \"{h}\"; treat it as a hint, not a decision.\n"))
        .unwrap_or_default();

    format!(
        "You are a customer-service intent classifier. Choose the single business type \
that best matches the user's latest message.\n\n\
Business types:\n{listed}\n{hint}\
Conversation so far:\n{history}\n\
Latest user message ({lang}): {message}\n\n\
Reply with exactly one code from the list above and nothing else. \
If none fits, reply with NONE.",
        history = render_history(history),
        lang = language.display_name(),
    )
}

/// Stage classification for a fixed business type.
///
/// `options` pairs stage numbers with step descriptions; 0 is always
/// "the message is unrelated to this business type".
pub fn stage(
    business_name: &str,
    message: &str,
    history: &[Turn],
    options: &[(i64, String)],
) -> String {
    let mut listed = String::from("0. The message is unrelated to this business type\n");
    for (number, step) in options {
        listed.push_str(&format!("{number}. {step}\n"));
    }

    format!(
        "You are tracking a customer-service workflow for a {business_name} inquiry. \
Decide which step the user's latest message belongs to.\n\n\
Steps:\n{listed}\n\
Conversation so far:\n{history}\n\
Latest user message: {message}\n\n\
Reply with the step number only, nothing else.",
        history = render_history(history),
    )
}

/// Satisfaction check after an "anything else?" follow-up.
pub fn satisfaction(message: &str) -> String {
    format!(
        "The assistant just asked the user whether anything else is needed. \
Based on the user's reply, is the user finished and satisfied?\n\n\
User reply: {message}\n\n\
Reply with 1 if the user is satisfied and done, or 0 if the user wants to continue. \
Reply with the digit only."
    )
}

/// Small-talk appropriateness check.
pub fn smalltalk_appropriate(message: &str) -> String {
    format!(
        "You are moderating a customer-service chat. Decide whether the user's message \
is appropriate casual conversation.\n\n\
User message: {message}\n\n\
Reply with 1 if it is appropriate, or 0 if it is abusive, offensive or nonsensical. \
Reply with the digit only."
    )
}

/// Contextual small-talk reply in the user's language.
pub fn smalltalk_reply(history: &[Turn], message: &str, language: Language) -> String {
    format!(
        "You are a friendly customer-service assistant. Reply briefly and naturally to \
the user's message in {lang}. Stay polite and do not invent account information.\n\n\
Conversation so far:\n{history}\n\
User message: {message}\n\n\
Reply with the assistant's answer only.",
        lang = language.display_name(),
        history = render_history(history),
    )
}

/// Near-match proposals for an unresolved activity name.
pub fn activity_near_match(candidate: &str, available: &[String], limit: usize) -> String {
    let listed = available.join("\n");
    format!(
        "A user mentioned an activity called \"{candidate}\" but it does not exactly match \
any running activity.\n\n\
Running activities:\n{listed}\n\n\
List up to {limit} activities from the list above that the user most likely means, \
one name per line, copied exactly. If nothing is plausibly similar, reply with NONE."
    )
}

/// Language-consistency re-rendering of a composed reply.
pub fn language_consistency(text: &str, language: Language) -> String {
    format!(
        "Rewrite the following customer-service reply in natural {lang}, keeping the \
meaning identical. Do not add or remove information.\n\n\
Reply:\n{text}\n\n\
Output the rewritten reply only.",
        lang = language.display_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_type_prompt_lists_codes_and_hint() {
        let options = vec![
            ("S001".to_string(), "deposit inquiries".to_string()),
            ("S005".to_string(), "small talk".to_string()),
        ];
        let prompt = business_type("my money", &[], Language::En, Some("payments"), &options);
        assert!(prompt.contains("- S001: deposit inquiries"));
        assert!(prompt.contains("payments"));
        assert!(prompt.contains("NONE"));
    }

    #[test]
    fn stage_prompt_always_offers_unrelated() {
        let prompt = stage("deposit", "hello", &[], &[(1, "ask order number".to_string())]);
        assert!(prompt.contains("0. The message is unrelated"));
        assert!(prompt.contains("1. ask order number"));
    }

    #[test]
    fn consistency_pass_names_the_target_language() {
        let th = language_consistency("Your order is fine.", Language::Th);
        assert!(th.contains("Thai"));
        assert!(th.contains("Your order is fine."));
    }

    #[test]
    fn history_is_rendered_with_roles() {
        let history = vec![Turn::user("hi"), Turn::assistant("hello")];
        let rendered = render_history(&history);
        assert!(rendered.contains("user: hi"));
        assert!(rendered.contains("assistant: hello"));
    }
}
