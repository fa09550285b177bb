//! Two-tier classification: keyword tables first, model second
//!
//! The keyword tier is deterministic and auditable; the model tier is
//! constrained to a closed option list and validated, so a misbehaving
//! model can never introduce an illegal business type or stage. When
//! both tiers could apply, the deterministic signal wins and a
//! disagreement is logged rather than silently resolved.

use chatai_config::BusinessConfig;
use chatai_core::{
    ActivityStage, BusinessType, Language, LanguageModel, OrderFlowStage, Result, StageDecision,
    Turn,
};
use chatai_llm::prompt;

use crate::extract;

/// Deterministic keyword scan; table order decides ties.
pub fn keyword_business_type(
    config: &BusinessConfig,
    message: &str,
    language: Language,
) -> Option<BusinessType> {
    for (code, entry) in &config.businesses {
        let Some(business) = BusinessType::from_code(code) else {
            continue;
        };
        for keyword in entry.keywords_for(language) {
            if message.contains(keyword.as_str()) {
                tracing::debug!(
                    business = business.code(),
                    %keyword,
                    "keyword tier matched business type"
                );
                return Some(business);
            }
        }
    }
    None
}

/// Keyword fallback when the model returns garbage: explicit requests
/// for a person go to human handoff, everything else is small talk.
fn fallback_business_type(
    config: &BusinessConfig,
    message: &str,
    language: Language,
) -> BusinessType {
    let wants_human = config
        .human_keywords_for(language)
        .iter()
        .any(|k| message.contains(k.as_str()));
    if wants_human {
        BusinessType::HumanHandoff
    } else {
        BusinessType::SmallTalk
    }
}

/// Resolve the business type for a turn.
///
/// Tier 1: per-language keyword table, first match wins.
/// Tier 2: constrained model call, accepted only when the output is a
/// legal code. Anything else degrades to the keyword heuristic.
pub async fn business_type(
    llm: &dyn LanguageModel,
    config: &BusinessConfig,
    message: &str,
    history: &[Turn],
    language: Language,
    category_hint: Option<&str>,
) -> Result<BusinessType> {
    if let Some(business) = keyword_business_type(config, message, language) {
        return Ok(business);
    }

    let options: Vec<(String, String)> = config
        .businesses
        .iter()
        .filter_map(|(code, entry)| {
            BusinessType::from_code(code).map(|_| (code.clone(), entry.name.clone()))
        })
        .collect();

    let reply = llm
        .complete(&prompt::business_type(
            message,
            history,
            language,
            category_hint,
            &options,
        ))
        .await?;

    let candidate = reply.trim();
    if let Some(business) = BusinessType::from_code(candidate) {
        tracing::debug!(business = business.code(), "model tier resolved business type");
        return Ok(business);
    }

    tracing::warn!(
        model_output = candidate,
        "model returned no legal business code, using keyword heuristic"
    );
    Ok(fallback_business_type(config, message, language))
}

/// Stage classification for the deposit/withdrawal order flow.
///
/// Deterministic override first: an exact-length order number in the
/// *current message alone* forces the order-provided stage regardless of
/// anything the model might say.
pub async fn order_flow_stage(
    llm: &dyn LanguageModel,
    config: &BusinessConfig,
    business: BusinessType,
    message: &str,
    history: &[Turn],
) -> Result<StageDecision<OrderFlowStage>> {
    if extract::order_number_in(message).is_some() {
        tracing::debug!(
            business = business.code(),
            "order number present, stage forced to order-provided"
        );
        return Ok(StageDecision::Stage(OrderFlowStage::OrderProvided));
    }

    let entry = match config.entry(business) {
        Some(entry) => entry,
        None => return Ok(StageDecision::Handoff),
    };
    let options: Vec<(i64, String)> = entry
        .workflow
        .iter()
        .filter_map(|(number, script)| {
            number.parse::<i64>().ok().map(|n| (n, script.step.clone()))
        })
        .collect();

    let reply = llm
        .complete(&prompt::stage(&entry.name, message, history, &options))
        .await?;

    match parse_stage_number(&reply).and_then(OrderFlowStage::from_number) {
        Some(stage) => Ok(StageDecision::Stage(stage)),
        None => {
            tracing::warn!(
                business = business.code(),
                model_output = reply.trim(),
                "model returned no legal stage, degrading to handoff"
            );
            Ok(StageDecision::Handoff)
        }
    }
}

/// Stage classification for the activity flow.
pub async fn activity_stage(
    llm: &dyn LanguageModel,
    config: &BusinessConfig,
    message: &str,
    history: &[Turn],
) -> Result<StageDecision<ActivityStage>> {
    let entry = match config.entry(BusinessType::ActivityQuery) {
        Some(entry) => entry,
        None => return Ok(StageDecision::Handoff),
    };
    let options: Vec<(i64, String)> = entry
        .workflow
        .iter()
        .filter_map(|(number, script)| {
            number.parse::<i64>().ok().map(|n| (n, script.step.clone()))
        })
        .collect();

    let reply = llm
        .complete(&prompt::stage(&entry.name, message, history, &options))
        .await?;

    match parse_stage_number(&reply).and_then(ActivityStage::from_number) {
        Some(stage) => Ok(StageDecision::Stage(stage)),
        None => {
            tracing::warn!(
                model_output = reply.trim(),
                "model returned no legal activity stage, degrading to handoff"
            );
            Ok(StageDecision::Handoff)
        }
    }
}

/// Satisfaction check after an "anything else?" follow-up.
/// Unparseable model output counts as "not satisfied" and the turn
/// proceeds normally.
pub async fn is_satisfied(llm: &dyn LanguageModel, message: &str) -> Result<bool> {
    let reply = llm.complete(&prompt::satisfaction(message)).await?;
    Ok(parse_binary(&reply).unwrap_or(false))
}

/// Small-talk appropriateness. Unparseable output counts as appropriate
/// so a flaky model never accuses a harmless user.
pub async fn smalltalk_appropriate(llm: &dyn LanguageModel, message: &str) -> Result<bool> {
    let reply = llm.complete(&prompt::smalltalk_appropriate(message)).await?;
    Ok(parse_binary(&reply).unwrap_or(true))
}

fn parse_stage_number(reply: &str) -> Option<i64> {
    reply.trim().parse::<i64>().ok()
}

fn parse_binary(reply: &str) -> Option<bool> {
    match reply.trim() {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedModel {
        replies: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().rev().map(|s| s.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.replies.lock().unwrap().pop().unwrap_or_default())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl LanguageModel for FailingModel {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(chatai_core::Error::Timeout)
        }
    }

    #[test]
    fn keyword_tier_matches_per_language() {
        let config = BusinessConfig::default();
        assert_eq!(
            keyword_business_type(&config, "our deposit is late", Language::En),
            Some(BusinessType::DepositQuery)
        );
        assert_eq!(
            keyword_business_type(&config, "提现没到账", Language::Zh),
            Some(BusinessType::WithdrawalQuery)
        );
        assert_eq!(
            keyword_business_type(&config, "nice weather", Language::En),
            None
        );
    }

    #[tokio::test]
    async fn keyword_tier_skips_the_model_entirely() {
        let config = BusinessConfig::default();
        // FailingModel would error if consulted.
        let business = business_type(
            &FailingModel,
            &config,
            "I want to withdraw my winnings",
            &[],
            Language::En,
            None,
        )
        .await
        .unwrap();
        assert_eq!(business, BusinessType::WithdrawalQuery);
    }

    #[tokio::test]
    async fn model_tier_accepts_only_legal_codes() {
        let config = BusinessConfig::default();
        let model = ScriptedModel::new(&["S003"]);
        let business = business_type(&model, &config, "about that thing", &[], Language::En, None)
            .await
            .unwrap();
        assert_eq!(business, BusinessType::ActivityQuery);
    }

    #[tokio::test]
    async fn garbage_model_output_falls_back_to_heuristic() {
        let config = BusinessConfig::default();
        // "complaint" is a needs-human keyword but not a classification
        // keyword, so the keyword tier stays silent here.
        let model = ScriptedModel::new(&["the user clearly wants S001 maybe"]);
        let business = business_type(
            &model,
            &config,
            "I have a complaint about all this",
            &[],
            Language::En,
            None,
        )
        .await
        .unwrap();
        assert_eq!(business, BusinessType::HumanHandoff);

        let model = ScriptedModel::new(&["NONE"]);
        let business = business_type(&model, &config, "lovely day", &[], Language::En, None)
            .await
            .unwrap();
        assert_eq!(business, BusinessType::SmallTalk);
    }

    #[tokio::test]
    async fn order_number_overrides_model_staging() {
        let config = BusinessConfig::default();
        // Model would answer "1", but the override must win without a call.
        let decision = order_flow_stage(
            &FailingModel,
            &config,
            BusinessType::DepositQuery,
            "123456789012345678",
            &[],
        )
        .await
        .unwrap();
        assert_eq!(decision, StageDecision::Stage(OrderFlowStage::OrderProvided));
    }

    #[tokio::test]
    async fn seventeen_digits_do_not_trigger_the_override() {
        let config = BusinessConfig::default();
        let model = ScriptedModel::new(&["1"]);
        let decision = order_flow_stage(
            &model,
            &config,
            BusinessType::DepositQuery,
            "12345678901234567",
            &[],
        )
        .await
        .unwrap();
        assert_eq!(decision, StageDecision::Stage(OrderFlowStage::AskOrder));
    }

    #[tokio::test]
    async fn invalid_stage_output_degrades_to_handoff() {
        let config = BusinessConfig::default();
        let model = ScriptedModel::new(&["seven"]);
        let decision = order_flow_stage(
            &model,
            &config,
            BusinessType::WithdrawalQuery,
            "where is my money",
            &[],
        )
        .await
        .unwrap();
        assert_eq!(decision, StageDecision::Handoff);

        let model = ScriptedModel::new(&["9"]);
        let decision = activity_stage(&model, &config, "bonus?", &[]).await.unwrap();
        assert_eq!(decision, StageDecision::Handoff);
    }

    #[tokio::test]
    async fn satisfaction_defaults_to_continue() {
        assert!(is_satisfied(&ScriptedModel::new(&["1"]), "all good").await.unwrap());
        assert!(!is_satisfied(&ScriptedModel::new(&["0"]), "one more thing").await.unwrap());
        assert!(!is_satisfied(&ScriptedModel::new(&["dunno"]), "hm").await.unwrap());
    }
}
