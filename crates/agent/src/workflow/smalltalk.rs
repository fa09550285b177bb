//! Small-talk workflow
//!
//! Inappropriate messages get a rational redirect with no escalation;
//! appropriate messages that still ask for a person escalate; everything
//! else gets a contextual model reply. Seven rounds of chit-chat end
//! with a polite close, not an escalation.

use chatai_core::BusinessType;
use chatai_llm::prompt;

use crate::{classify, governor, workflow};

use super::{ProcessingResult, TurnCtx};

const BUSINESS: BusinessType = BusinessType::SmallTalk;

pub async fn run(ctx: &TurnCtx<'_>) -> ProcessingResult {
    if governor::small_talk_exhausted(ctx.rounds) {
        return ProcessingResult::finish(
            ctx.text(&ctx.config.messages.small_talk_close),
            Some(BUSINESS),
        )
        .as_closing();
    }

    let appropriate = match classify::smalltalk_appropriate(ctx.llm, &ctx.req.messages).await {
        Ok(appropriate) => appropriate,
        Err(e) => {
            tracing::error!(error = %e, "small-talk moderation failed");
            return workflow::system_error(ctx, Some(BUSINESS));
        }
    };
    if !appropriate {
        return ProcessingResult::working(
            ctx.text(&ctx.config.messages.smalltalk_redirect),
            Some(BUSINESS),
        );
    }

    let wants_human = ctx
        .config
        .human_keywords_for(ctx.language())
        .iter()
        .any(|k| ctx.req.messages.contains(k.as_str()));
    if wants_human {
        return workflow::handoff(ctx).await;
    }

    let reply = match ctx
        .llm
        .complete(&prompt::smalltalk_reply(
            &ctx.req.history,
            &ctx.req.messages,
            ctx.language(),
        ))
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "small-talk reply generation failed");
            return workflow::system_error(ctx, Some(BUSINESS));
        }
    };

    // Finish + no escalation: the composer appends the follow-up
    // question and re-opens the conversation.
    ProcessingResult::finish(reply, Some(BUSINESS))
}
