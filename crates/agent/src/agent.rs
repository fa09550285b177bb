//! The support agent: one entry point per dialogue turn
//!
//! Owns the collaborators and the configuration store, reconstructs all
//! conversational state from the request, and walks the pipeline:
//! validate, login gate, round governor, satisfaction check, ambiguity
//! resolver, classification, workflow, composer.

use std::sync::Arc;

use chatai_config::ConfigStore;
use chatai_core::{
    round_count, BackendGateway, BusinessType, LanguageModel, Notifier, OrderFlowStage,
    ProcessRequest, ProcessResponse, ResponseMetadata, ResponseStage, Result,
};

use crate::ambiguity::{self, AmbiguityOutcome, MenuChoice};
use crate::workflow::{self, ProcessingResult, TurnCtx};
use crate::{classify, compose, extract, governor};

pub struct SupportAgent {
    llm: Arc<dyn LanguageModel>,
    gateway: Arc<dyn BackendGateway>,
    notifier: Arc<dyn Notifier>,
    config: ConfigStore,
}

impl SupportAgent {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        gateway: Arc<dyn BackendGateway>,
        notifier: Arc<dyn Notifier>,
        config: ConfigStore,
    ) -> Self {
        Self {
            llm,
            gateway,
            notifier,
            config,
        }
    }

    /// Process one turn. The only error that escapes is request
    /// validation; every other failure becomes a safe response.
    pub async fn process(&self, req: ProcessRequest) -> Result<ProcessResponse> {
        req.validate()?;

        // One immutable snapshot for the whole turn; a concurrent
        // reload never changes tables mid-pipeline.
        let config = self.config.snapshot();
        let rounds = round_count(&req.history);

        tracing::info!(
            session_id = %req.session_id,
            user_id = %req.user_id,
            language = %req.language,
            rounds,
            preset = req.business_type.map(|b| b.code()),
            "processing turn"
        );

        // Login gate: before any business logic.
        if !req.status.is_logged_in() {
            let reply = config.text(&config.messages.unauthenticated, req.language);
            return Ok(ProcessResponse {
                session_id: req.session_id.clone(),
                status: "success".to_string(),
                response: reply,
                stage: ResponseStage::Unauthenticated,
                metadata: ResponseMetadata::new(None, rounds),
                images: Vec::new(),
                site: req.site,
                business_type: Some("unauthenticated".to_string()),
                transfer_human: 0,
            });
        }

        let ctx = TurnCtx {
            req: &req,
            config: &config,
            rounds,
            llm: self.llm.as_ref(),
            gateway: self.gateway.as_ref(),
            notifier: self.notifier.as_ref(),
        };

        let result = self.run_pipeline(&ctx).await;
        let result = compose::finalize(&ctx, result).await;

        tracing::info!(
            session_id = %req.session_id,
            stage = result.stage.as_str(),
            escalate = result.escalate,
            business = result.business_type.map(|b| b.code()),
            "turn processed"
        );

        Ok(to_response(&req, result, rounds))
    }

    async fn run_pipeline(&self, ctx: &TurnCtx<'_>) -> ProcessingResult {
        let config = ctx.config;
        let req = ctx.req;

        // Hard round cap beats everything, including classification.
        if governor::over_round_cap(ctx.rounds) {
            return ProcessingResult::escalation(
                ctx.text(&config.messages.round_cap),
                req.business_type,
            );
        }

        // Reply to our own "anything else?" question.
        if governor::awaiting_satisfaction_reply(config, &req.history) {
            match classify::is_satisfied(ctx.llm, &req.messages).await {
                Ok(true) => {
                    return ProcessingResult::escalation(
                        ctx.text(&config.messages.satisfaction_close),
                        req.business_type,
                    )
                }
                Ok(false) => {} // carry on with the normal pipeline
                Err(e) => {
                    tracing::error!(error = %e, "satisfaction check failed");
                    return workflow::system_error(ctx, req.business_type);
                }
            }
        }

        // Ambiguity handling runs before any generic classification.
        if let Some(outcome) = ambiguity::resolve(
            config,
            &req.messages,
            &req.history,
            req.language,
            req.business_type,
        ) {
            return self.run_ambiguity(ctx, outcome).await;
        }

        let business = match req.business_type {
            Some(business) => business,
            None => {
                match classify::business_type(
                    ctx.llm,
                    config,
                    &req.messages,
                    &req.history,
                    req.language,
                    req.category_hint(),
                )
                .await
                {
                    Ok(business) => business,
                    Err(e) => {
                        tracing::error!(error = %e, "business-type classification failed");
                        return workflow::system_error(ctx, None);
                    }
                }
            }
        };

        workflow::run(ctx, business).await
    }

    async fn run_ambiguity(
        &self,
        ctx: &TurnCtx<'_>,
        outcome: AmbiguityOutcome,
    ) -> ProcessingResult {
        match outcome {
            // Straight into the order workflow; the stage depends only
            // on whether the current message already has the number.
            AmbiguityOutcome::NotReceived(business) => {
                workflow::order::run(ctx, business, Some(order_entry_stage(ctx))).await
            }
            AmbiguityOutcome::Menu(business) => {
                let menu = ctx
                    .config
                    .entry(business)
                    .and_then(|e| e.menu.as_ref())
                    .map(|m| ctx.text(&m.text))
                    .unwrap_or_default();
                // The business type stays unresolved until the user picks.
                ProcessingResult::working(menu, None)
            }
            AmbiguityOutcome::MenuChoice { business, choice } => match choice {
                MenuChoice::NotReceived => {
                    workflow::order::run(ctx, business, Some(order_entry_stage(ctx))).await
                }
                MenuChoice::HowTo => {
                    workflow::order::run(ctx, business, Some(OrderFlowStage::NotKnowWhere)).await
                }
                MenuChoice::Other => workflow::handoff(ctx).await,
            },
        }
    }
}

/// Entry stage for a not-received routing: order-provided when the
/// current message already carries the number, otherwise ask for it.
fn order_entry_stage(ctx: &TurnCtx<'_>) -> OrderFlowStage {
    if extract::order_number_in(&ctx.req.messages).is_some() {
        OrderFlowStage::OrderProvided
    } else {
        OrderFlowStage::AskOrder
    }
}

fn to_response(req: &ProcessRequest, result: ProcessingResult, rounds: usize) -> ProcessResponse {
    let intent = result.business_type.map(|b| b.code().to_string());
    ProcessResponse {
        session_id: req.session_id.clone(),
        status: "success".to_string(),
        response: result.reply,
        stage: result.stage,
        metadata: ResponseMetadata::new(intent.clone(), rounds),
        images: result.images,
        site: req.site,
        business_type: intent,
        transfer_human: if result.escalate { 1 } else { 0 },
    }
}
