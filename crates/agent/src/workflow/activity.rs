//! Activity (promotion) workflow
//!
//! Stage 1 fetches the running activities and tries to identify the one
//! the user means, from the upstream category hint first and then the
//! message itself. Exact matches go straight to the eligibility check;
//! near matches are proposed for confirmation, never auto-selected;
//! still-unresolved names escalate.

use chatai_config::constants::NEAR_MATCH_LIMIT;
use chatai_core::{ActivityStage, BusinessType, CallCode, StageDecision};
use chatai_llm::prompt;

use crate::{ambiguity, classify, extract, workflow};

use super::{ProcessingResult, TurnCtx};

const BUSINESS: BusinessType = BusinessType::ActivityQuery;

pub async fn run(ctx: &TurnCtx<'_>) -> ProcessingResult {
    let stage = match classify::activity_stage(
        ctx.llm,
        ctx.config,
        &ctx.req.messages,
        &ctx.req.history,
    )
    .await
    {
        Ok(decision) => decision,
        Err(e) => {
            tracing::error!(error = %e, "activity stage classification failed");
            return workflow::system_error(ctx, Some(BUSINESS));
        }
    };

    let stage = match stage {
        StageDecision::Stage(stage) => stage,
        StageDecision::Handoff => return workflow::handoff(ctx).await,
    };

    if stage == ActivityStage::Unrelated {
        return ProcessingResult::working(
            ambiguity::guidance_reply(ctx.config, BUSINESS, ctx.language(), ctx.rounds),
            Some(BUSINESS),
        );
    }

    let activities = match fetch_activities(ctx).await {
        Ok(activities) => activities,
        Err(result) => return *result,
    };
    if activities.is_empty() {
        tracing::warn!("no running activities returned by the backend");
        return workflow::handoff(ctx).await;
    }

    // The upstream category hint may already name the activity.
    let hinted = ctx
        .req
        .category_hint()
        .and_then(|hint| extract::match_activity_exact(hint, &activities));
    let matched =
        hinted.or_else(|| extract::match_activity_exact(&ctx.req.messages, &activities));

    if let Some(activity) = matched {
        return check_eligibility(ctx, &activity).await;
    }

    match stage {
        ActivityStage::ListAndIdentify => {
            if mentions_activity_generically(ctx) {
                // Nothing specific named yet: show the list and wait.
                return ProcessingResult::working(render_list(ctx, &activities), Some(BUSINESS));
            }
            near_match_or_escalate(ctx, &activities).await
        }
        // The user already saw the list and we still cannot resolve the
        // name: a human sorts it out.
        ActivityStage::ClarifyAfterList => workflow::handoff(ctx).await,
        ActivityStage::Unrelated => unreachable!("handled above"),
    }
}

async fn fetch_activities(ctx: &TurnCtx<'_>) -> Result<Vec<String>, Box<ProcessingResult>> {
    let reply = match ctx
        .gateway
        .query(
            &ctx.req.session_id,
            CallCode::ActivityList,
            serde_json::json!({}),
            ctx.req.site,
        )
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "activity list query failed");
            return Err(Box::new(workflow::system_error(ctx, Some(BUSINESS))));
        }
    };
    if !reply.is_ok() {
        tracing::error!(result_code = reply.code, "activity list query rejected");
        return Err(Box::new(workflow::system_error(ctx, Some(BUSINESS))));
    }

    let activities = reply.data["activities"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    Ok(activities)
}

async fn check_eligibility(ctx: &TurnCtx<'_>, activity: &str) -> ProcessingResult {
    let reply = match ctx
        .gateway
        .query(
            &ctx.req.session_id,
            CallCode::UserEligibility,
            serde_json::json!({ "activity": activity }),
            ctx.req.site,
        )
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, activity, "eligibility query failed");
            return workflow::system_error(ctx, Some(BUSINESS));
        }
    };

    if reply.is_invalid_param() {
        // The backend did not recognize the name after all: re-ask.
        let script = ctx
            .config
            .entry(BUSINESS)
            .and_then(|e| e.stage_script(2))
            .map(|s| ctx.text(&s.text))
            .unwrap_or_default();
        return ProcessingResult::working(script, Some(BUSINESS));
    }
    if !reply.is_ok() {
        tracing::error!(result_code = reply.code, activity, "eligibility query rejected");
        return workflow::system_error(ctx, Some(BUSINESS));
    }

    let eligible = reply.data["eligible"].as_bool().unwrap_or(false);
    let template = if eligible {
        &ctx.config.messages.activity_eligible
    } else {
        &ctx.config.messages.activity_not_eligible
    };
    let reason = reply.data["reason"].as_str().unwrap_or_default();
    let message = ctx
        .text(template)
        .replace("{activity}", activity)
        .replace("{reason}", reason);

    ProcessingResult::finish(message, Some(BUSINESS))
}

/// Model-proposed near matches for user confirmation.
async fn near_match_or_escalate(ctx: &TurnCtx<'_>, activities: &[String]) -> ProcessingResult {
    let reply = match ctx
        .llm
        .complete(&prompt::activity_near_match(
            &ctx.req.messages,
            activities,
            NEAR_MATCH_LIMIT,
        ))
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "near-match proposal failed");
            return workflow::system_error(ctx, Some(BUSINESS));
        }
    };

    // Only names actually in the available set survive validation.
    let proposals: Vec<&String> = reply
        .lines()
        .map(str::trim)
        .filter_map(|line| activities.iter().find(|a| a.as_str() == line))
        .take(NEAR_MATCH_LIMIT)
        .collect();

    if proposals.is_empty() {
        return workflow::handoff(ctx).await;
    }

    let options = proposals
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect::<Vec<_>>()
        .join("\n");
    let message = ctx
        .text(&ctx.config.messages.near_match_intro)
        .replace("{options}", &options);
    ProcessingResult::working(message, Some(BUSINESS))
}

fn mentions_activity_generically(ctx: &TurnCtx<'_>) -> bool {
    ctx.config
        .entry(BUSINESS)
        .map(|entry| {
            entry
                .keywords_for(ctx.language())
                .iter()
                .any(|k| ctx.req.messages.contains(k.as_str()))
        })
        .unwrap_or(false)
}

fn render_list(ctx: &TurnCtx<'_>, activities: &[String]) -> String {
    let header = ctx
        .config
        .entry(BUSINESS)
        .and_then(|e| e.stage_script(1))
        .map(|s| ctx.text(&s.text))
        .unwrap_or_default();
    let listed = activities
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{header}\n{listed}")
}
