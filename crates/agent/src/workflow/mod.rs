//! Per-business workflow state machines
//!
//! Each business type is a small explicit automaton producing a
//! [`ProcessingResult`]. Collaborator failures are converted right here
//! into the system-error escalation result; nothing propagates further
//! up as an error.

pub mod activity;
pub mod order;
pub mod smalltalk;

use chatai_config::BusinessConfig;
use chatai_core::{
    BackendGateway, BusinessType, Language, LanguageModel, Notifier, ProcessRequest, ResponseStage,
};

/// Everything a workflow needs for one turn
pub struct TurnCtx<'a> {
    pub req: &'a ProcessRequest,
    pub config: &'a BusinessConfig,
    pub rounds: usize,
    pub llm: &'a dyn LanguageModel,
    pub gateway: &'a dyn BackendGateway,
    pub notifier: &'a dyn Notifier,
}

impl<'a> TurnCtx<'a> {
    pub fn language(&self) -> Language {
        self.req.language
    }

    /// Localized text with the configured fallback.
    pub fn text(&self, text: &chatai_config::LocalizedText) -> String {
        self.config.text(text, self.language())
    }

    /// Fire-and-forget staff alert: awaited for backpressure, but a
    /// delivery failure only logs; the turn never fails on it.
    pub async fn notify_staff(&self, message: &str) {
        if let Err(e) = self.notifier.notify_text(message).await {
            tracing::warn!(error = %e, "staff notification failed");
        }
    }

    pub async fn notify_staff_images(&self, caption: &str, images: &[String]) {
        if let Err(e) = self.notifier.notify_images(caption, images).await {
            tracing::warn!(error = %e, "staff image notification failed");
        }
    }
}

/// Engine-internal result of one turn, constructed fresh every time
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub reply: String,
    pub images: Vec<String>,
    pub stage: ResponseStage,
    pub escalate: bool,
    pub business_type: Option<BusinessType>,
    /// Designed closing: the composer must not re-open the conversation
    /// with a follow-up question.
    pub closing: bool,
}

impl ProcessingResult {
    pub fn working(reply: impl Into<String>, business: Option<BusinessType>) -> Self {
        Self {
            reply: reply.into(),
            images: Vec::new(),
            stage: ResponseStage::Working,
            escalate: false,
            business_type: business,
            closing: false,
        }
    }

    pub fn finish(reply: impl Into<String>, business: Option<BusinessType>) -> Self {
        Self {
            stage: ResponseStage::Finish,
            ..Self::working(reply, business)
        }
    }

    pub fn escalation(reply: impl Into<String>, business: Option<BusinessType>) -> Self {
        Self {
            escalate: true,
            ..Self::finish(reply, business)
        }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn as_closing(mut self) -> Self {
        self.closing = true;
        self
    }
}

/// Dispatch one turn to the owning state machine.
pub async fn run(ctx: &TurnCtx<'_>, business: BusinessType) -> ProcessingResult {
    match business {
        BusinessType::DepositQuery | BusinessType::WithdrawalQuery => {
            order::run(ctx, business, None).await
        }
        BusinessType::ActivityQuery => activity::run(ctx).await,
        BusinessType::HumanHandoff => handoff(ctx).await,
        BusinessType::SmallTalk => smalltalk::run(ctx).await,
    }
}

/// Terminal human handoff: always escalates, alerts the staff channel.
pub async fn handoff(ctx: &TurnCtx<'_>) -> ProcessingResult {
    ctx.notify_staff(&format!(
        "[ChatAI] human handoff requested, session={} user={}",
        ctx.req.session_id, ctx.req.user_id
    ))
    .await;
    ProcessingResult::escalation(
        ctx.text(&ctx.config.messages.transfer_human),
        Some(BusinessType::HumanHandoff),
    )
}

/// Collaborator failure became this turn's outcome: terminal escalation
/// with the scripted system-error apology.
pub fn system_error(ctx: &TurnCtx<'_>, business: Option<BusinessType>) -> ProcessingResult {
    ProcessingResult::escalation(ctx.text(&ctx.config.messages.system_error), business)
}
