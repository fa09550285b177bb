//! Deposit/withdrawal order workflow
//!
//! Stages: ask-order (1), not-know-where (2), order-provided (3),
//! success-followup (4). Stage 0 means the message drifted off-topic and
//! gets guidance instead of escalation.
//!
//! An uploaded image preempts staging entirely: screenshots cannot be
//! auto-triaged, so the turn escalates and the images go to staff.

use chatai_core::{BusinessType, CallCode, OrderFlowStage, StageDecision};

use crate::{ambiguity, classify, extract, status, workflow};

use super::{ProcessingResult, TurnCtx};

/// Run one turn of the order workflow. `forced_stage` comes from the
/// ambiguity resolver when it routed here past classification.
pub async fn run(
    ctx: &TurnCtx<'_>,
    business: BusinessType,
    forced_stage: Option<OrderFlowStage>,
) -> ProcessingResult {
    let entry = match ctx.config.entry(business) {
        Some(entry) => entry,
        None => {
            tracing::error!(business = business.code(), "no configuration entry");
            return workflow::system_error(ctx, Some(business));
        }
    };

    // Images preempt normal staging at any stage.
    if !ctx.req.images.is_empty() {
        ctx.notify_staff_images(
            &format!(
                "[ChatAI] user screenshots, session={} user={} business={}",
                ctx.req.session_id,
                ctx.req.user_id,
                business.code()
            ),
            &ctx.req.images,
        )
        .await;
        return ProcessingResult::escalation(
            ctx.text(&ctx.config.messages.image_received),
            Some(business),
        );
    }

    let stage = match forced_stage {
        Some(stage) => StageDecision::Stage(stage),
        None => {
            match classify::order_flow_stage(
                ctx.llm,
                ctx.config,
                business,
                &ctx.req.messages,
                &ctx.req.history,
            )
            .await
            {
                Ok(decision) => decision,
                Err(e) => {
                    tracing::error!(error = %e, business = business.code(), "stage classification failed");
                    return workflow::system_error(ctx, Some(business));
                }
            }
        }
    };

    let stage = match stage {
        StageDecision::Stage(stage) => stage,
        StageDecision::Handoff => return workflow::handoff(ctx).await,
    };

    match stage {
        OrderFlowStage::Unrelated => ProcessingResult::working(
            ambiguity::guidance_reply(ctx.config, business, ctx.language(), ctx.rounds),
            Some(business),
        ),
        OrderFlowStage::AskOrder => {
            let script = entry.stage_script(1);
            ProcessingResult::working(
                script.map(|s| ctx.text(&s.text)).unwrap_or_default(),
                Some(business),
            )
        }
        OrderFlowStage::NotKnowWhere => {
            let script = entry.stage_script(2);
            let images = script
                .and_then(|s| s.image.clone())
                .map(|image| vec![image])
                .unwrap_or_default();
            ProcessingResult::working(
                script.map(|s| ctx.text(&s.text)).unwrap_or_default(),
                Some(business),
            )
            .with_images(images)
        }
        OrderFlowStage::OrderProvided => query_order_status(ctx, business).await,
        OrderFlowStage::SuccessFollowup => {
            let script = entry.stage_script(4);
            ProcessingResult::finish(
                script.map(|s| ctx.text(&s.text)).unwrap_or_default(),
                Some(business),
            )
        }
    }
}

/// Stage 3: extract the order number, query the backend, map the status.
async fn query_order_status(ctx: &TurnCtx<'_>, business: BusinessType) -> ProcessingResult {
    let order = match extract::extract_order_number(&ctx.req.messages, &ctx.req.history) {
        Some(order) => order,
        None => {
            // User-correctable: ask again rather than escalate.
            return ProcessingResult::working(
                ctx.text(&ctx.config.messages.invalid_order),
                Some(business),
            );
        }
    };

    let code = if business == BusinessType::DepositQuery {
        CallCode::DepositStatus
    } else {
        CallCode::WithdrawalStatus
    };

    let reply = match ctx
        .gateway
        .query(
            &ctx.req.session_id,
            code,
            serde_json::json!({ "orderNo": order }),
            ctx.req.site,
        )
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, %order, "status query failed");
            return workflow::system_error(ctx, Some(business));
        }
    };

    if reply.is_invalid_param() {
        // The order number did not resolve: let the user re-check it.
        return ProcessingResult::working(
            ctx.text(&ctx.config.messages.invalid_order),
            Some(business),
        );
    }
    if !reply.is_ok() {
        tracing::error!(
            result_code = reply.code,
            %order,
            "status service reported a system failure"
        );
        return workflow::system_error(ctx, Some(business));
    }

    let raw_status = reply.data["status"].as_str().unwrap_or_default();
    let mapping = status::map_status(ctx.config, business, raw_status, ctx.language());

    if mapping.notify {
        ctx.notify_staff(&format!(
            "[ChatAI] order needs review, session={} user={} business={} order={} status={}",
            ctx.req.session_id,
            ctx.req.user_id,
            business.code(),
            order,
            raw_status
        ))
        .await;
    }

    ProcessingResult {
        reply: mapping.message,
        images: Vec::new(),
        stage: if mapping.terminal {
            chatai_core::ResponseStage::Finish
        } else {
            chatai_core::ResponseStage::Working
        },
        escalate: mapping.escalate,
        business_type: Some(business),
        closing: false,
    }
}
