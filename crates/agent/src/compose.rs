//! Response composition
//!
//! Two final touches before a result leaves the engine:
//!
//! 1. A terminal, non-escalating result gets the scripted follow-up
//!    question appended and converts back to "working" so the
//!    conversation ends gracefully instead of abruptly.
//! 2. A language-consistency pass re-renders non-escalating text in the
//!    request language, unless the text carries a literal status token
//!    whose exact wording must survive.
//!
//! The consistency pass is cosmetic: if the model call fails, the
//! composed text ships as-is rather than voiding a successful turn.

use chatai_config::BusinessConfig;
use chatai_core::{LanguageModel, ResponseStage};
use chatai_llm::prompt;

use crate::workflow::{ProcessingResult, TurnCtx};

/// True when the reply contains a protected status token.
fn contains_protected_token(config: &BusinessConfig, text: &str) -> bool {
    let lowered = text.to_lowercase();
    config
        .protected_status_tokens
        .iter()
        .any(|token| lowered.contains(&token.to_lowercase()))
}

pub async fn finalize(ctx: &TurnCtx<'_>, mut result: ProcessingResult) -> ProcessingResult {
    // Re-open gracefully: finish without escalation becomes a follow-up.
    if result.stage == ResponseStage::Finish && !result.escalate && !result.closing {
        let follow_up = ctx.text(&ctx.config.messages.follow_up);
        if !follow_up.is_empty() {
            if !result.reply.is_empty() {
                result.reply.push(' ');
            }
            result.reply.push_str(&follow_up);
        }
        result.stage = ResponseStage::Working;
    }

    if !result.escalate
        && !result.reply.is_empty()
        && !contains_protected_token(ctx.config, &result.reply)
    {
        result.reply = regenerate(ctx.llm, &result.reply, ctx).await;
    }

    result
}

async fn regenerate(llm: &dyn LanguageModel, text: &str, ctx: &TurnCtx<'_>) -> String {
    match llm
        .complete(&prompt::language_consistency(text, ctx.language()))
        .await
    {
        Ok(rendered) if !rendered.trim().is_empty() => rendered.trim().to_string(),
        Ok(_) => text.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "language-consistency pass failed, keeping composed text");
            text.to_string()
        }
    }
}
