//! End-to-end engine tests with mock collaborators
//!
//! Each test drives `SupportAgent::process` through the full pipeline
//! and asserts on the wire-level response, the staff notifications, and
//! which collaborators were (or were not) consulted.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use chatai_agent::SupportAgent;
use chatai_config::ConfigStore;
use chatai_core::{
    BackendGateway, BackendReply, BusinessType, CallCode, Error, Language, LanguageModel,
    LoginStatus, Notifier, ProcessRequest, ResponseStage, Result, Turn,
};

/// Model mock driven by a prompt-inspecting closure.
struct FnModel(Box<dyn Fn(&str) -> Result<String> + Send + Sync>);

impl FnModel {
    fn new(f: impl Fn(&str) -> Result<String> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self(Box::new(f)))
    }

    /// Fails every call; proves a path never consults the model
    /// (the cosmetic language pass tolerates the failure).
    fn unavailable() -> Arc<Self> {
        Self::new(|_| Err(Error::Llm("model unavailable".into())))
    }
}

#[async_trait]
impl LanguageModel for FnModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        (self.0)(prompt)
    }
}

/// Gateway mock: scripted reply per call code, records invocations.
struct MockGateway {
    calls: Mutex<Vec<(CallCode, serde_json::Value)>>,
    reply: Box<dyn Fn(CallCode, &serde_json::Value) -> Result<BackendReply> + Send + Sync>,
}

impl MockGateway {
    fn new(
        reply: impl Fn(CallCode, &serde_json::Value) -> Result<BackendReply> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Box::new(reply),
        })
    }

    fn unused() -> Arc<Self> {
        Self::new(|code, _| {
            panic!("backend gateway must not be called, got {}", code.as_str())
        })
    }

    fn calls(&self) -> Vec<(CallCode, serde_json::Value)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl BackendGateway for MockGateway {
    async fn query(
        &self,
        _session_id: &str,
        code: CallCode,
        params: serde_json::Value,
        _site: i64,
    ) -> Result<BackendReply> {
        self.calls.lock().push((code, params.clone()));
        (self.reply)(code, &params)
    }
}

/// Notifier mock recording every alert.
#[derive(Default)]
struct MockNotifier {
    texts: Mutex<Vec<String>>,
    images: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify_text(&self, message: &str) -> Result<()> {
        self.texts.lock().push(message.to_string());
        Ok(())
    }

    async fn notify_images(&self, _caption: &str, images: &[String]) -> Result<()> {
        self.images.lock().push(images.to_vec());
        Ok(())
    }
}

fn agent(
    llm: Arc<FnModel>,
    gateway: Arc<MockGateway>,
    notifier: Arc<MockNotifier>,
) -> SupportAgent {
    SupportAgent::new(llm, gateway, notifier, ConfigStore::with_defaults())
}

fn request(message: &str) -> ProcessRequest {
    ProcessRequest {
        session_id: "sess-42".into(),
        user_id: "user-7".into(),
        platform: "web".into(),
        language: Language::En,
        status: LoginStatus::LOGGED_IN,
        business_type: None,
        messages: message.into(),
        history: Vec::new(),
        images: Vec::new(),
        metadata: None,
        site: 1,
    }
}

const ORDER: &str = "123456789012345678";

#[tokio::test]
async fn keyword_match_starts_deposit_flow_with_order_prompt() {
    // "our deposit is late", login=1, empty history.
    let notifier = Arc::new(MockNotifier::default());
    let agent = agent(FnModel::unavailable(), MockGateway::unused(), notifier);

    let response = agent.process(request("our deposit is late")).await.unwrap();

    assert_eq!(response.stage, ResponseStage::Working);
    assert_eq!(response.transfer_human, 0);
    assert_eq!(response.business_type.as_deref(), Some("S001"));
    assert!(response.response.contains("order number"));
}

#[tokio::test]
async fn disambiguation_round_trip() {
    // Turn 1: bare "deposit" yields the three-option menu and leaves
    // the business type unresolved.
    let notifier = Arc::new(MockNotifier::default());
    let agent_t1 = agent(
        FnModel::unavailable(),
        MockGateway::unused(),
        notifier.clone(),
    );
    let first = agent_t1.process(request("deposit")).await.unwrap();
    assert_eq!(first.stage, ResponseStage::Working);
    assert_eq!(first.transfer_human, 0);
    assert_eq!(first.business_type, None);
    assert!(first.response.contains("1."));
    assert!(first.response.contains("3."));

    // Turn 2: replying "1" routes into the deposit workflow at the
    // order-ask stage without re-invoking full classification.
    let llm = FnModel::new(|prompt| {
        assert!(
            !prompt.contains("intent classifier"),
            "classification must not run for a menu reply"
        );
        Err(Error::Llm("model unavailable".into()))
    });
    let agent_t2 = agent(llm, MockGateway::unused(), notifier);
    let mut req = request("1");
    req.history = vec![Turn::user("deposit"), Turn::assistant(first.response)];
    let second = agent_t2.process(req).await.unwrap();

    assert_eq!(second.stage, ResponseStage::Working);
    assert_eq!(second.transfer_human, 0);
    assert_eq!(second.business_type.as_deref(), Some("S001"));
    assert!(second.response.contains("order number"));
}

#[tokio::test]
async fn images_force_escalation_even_with_order_number() {
    let notifier = Arc::new(MockNotifier::default());
    let agent = agent(
        FnModel::unavailable(),
        MockGateway::unused(),
        notifier.clone(),
    );

    let mut req = request(&format!("here is my proof {ORDER}"));
    req.business_type = Some(BusinessType::DepositQuery);
    req.images = vec!["https://cdn.example/shot.png".to_string()];

    let response = agent.process(req).await.unwrap();
    assert_eq!(response.transfer_human, 1);
    assert_eq!(response.stage, ResponseStage::Finish);
    assert_eq!(notifier.images.lock().len(), 1);
}

#[tokio::test]
async fn round_cap_escalates_for_every_business_type() {
    for preset in [None, Some(BusinessType::SmallTalk), Some(BusinessType::DepositQuery)] {
        let notifier = Arc::new(MockNotifier::default());
        let agent = agent(FnModel::unavailable(), MockGateway::unused(), notifier);

        let mut req = request("anything");
        req.business_type = preset;
        for _ in 0..7 {
            req.history.push(Turn::user("ping"));
            req.history.push(Turn::assistant("pong"));
        }

        let response = agent.process(req).await.unwrap();
        assert_eq!(response.stage, ResponseStage::Finish);
        assert_eq!(response.transfer_human, 1);
    }
}

#[tokio::test]
async fn invalid_parameter_result_lets_the_user_retry() {
    // Backend result code 886 never escalates an order query.
    let gateway = MockGateway::new(|_, _| {
        Ok(BackendReply {
            code: 886,
            data: serde_json::Value::Null,
        })
    });
    let notifier = Arc::new(MockNotifier::default());
    let agent = agent(FnModel::unavailable(), gateway.clone(), notifier);

    let mut req = request(ORDER);
    req.business_type = Some(BusinessType::DepositQuery);

    let response = agent.process(req).await.unwrap();
    assert_eq!(response.transfer_human, 0);
    assert_eq!(response.stage, ResponseStage::Working);
    assert!(response.response.contains("re-check"));
    assert_eq!(gateway.calls().len(), 1);
    assert_eq!(gateway.calls()[0].0, CallCode::DepositStatus);
}

#[tokio::test]
async fn withdrawal_failed_notifies_and_escalates() {
    // 18-digit message with prior withdrawal context; backend returns a
    // terminal failure status.
    let gateway = MockGateway::new(|code, params| {
        assert_eq!(code, CallCode::WithdrawalStatus);
        assert_eq!(params["orderNo"], ORDER);
        Ok(BackendReply {
            code: 0,
            data: serde_json::json!({"status": "Withdrawal failed"}),
        })
    });
    let notifier = Arc::new(MockNotifier::default());
    let agent = agent(FnModel::unavailable(), gateway, notifier.clone());

    let mut req = request(ORDER);
    req.business_type = Some(BusinessType::WithdrawalQuery);
    req.history = vec![
        Turn::user("my withdrawal has a problem"),
        Turn::assistant("Could you please provide the 18-digit order number of your withdrawal?"),
    ];

    let response = agent.process(req).await.unwrap();
    assert_eq!(response.stage, ResponseStage::Finish);
    assert_eq!(response.transfer_human, 1);
    let alerts = notifier.texts.lock();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("Withdrawal failed"));
    assert!(alerts[0].contains(ORDER));
}

#[tokio::test]
async fn seventeen_digit_run_is_not_an_order_number() {
    // The stage classifier answers "order provided", but extraction
    // finds no exact-length run, so the user is asked to correct it.
    let llm = FnModel::new(|prompt| {
        if prompt.contains("step number") {
            Ok("3".to_string())
        } else {
            Err(Error::Llm("model unavailable".into()))
        }
    });
    let notifier = Arc::new(MockNotifier::default());
    let agent = agent(llm, MockGateway::unused(), notifier);

    let mut req = request("my order is 12345678901234567");
    req.business_type = Some(BusinessType::DepositQuery);

    let response = agent.process(req).await.unwrap();
    assert_eq!(response.transfer_human, 0);
    assert_eq!(response.stage, ResponseStage::Working);
    assert!(response.response.contains("re-check"));
}

#[tokio::test]
async fn gateway_failure_is_a_terminal_escalation() {
    let gateway = MockGateway::new(|_, _| Err(Error::Timeout));
    let notifier = Arc::new(MockNotifier::default());
    let agent = agent(FnModel::unavailable(), gateway, notifier);

    let mut req = request(ORDER);
    req.business_type = Some(BusinessType::WithdrawalQuery);

    let response = agent.process(req).await.unwrap();
    assert_eq!(response.stage, ResponseStage::Finish);
    assert_eq!(response.transfer_human, 1);
}

#[tokio::test]
async fn satisfaction_reply_closes_with_handoff_for_ticket_closure() {
    let llm = FnModel::new(|prompt| {
        if prompt.contains("satisfied") {
            Ok("1".to_string())
        } else {
            Err(Error::Llm("model unavailable".into()))
        }
    });
    let notifier = Arc::new(MockNotifier::default());
    let agent = agent(llm, MockGateway::unused(), notifier);

    let mut req = request("no that's all, thanks");
    req.history = vec![
        Turn::user("checking my order"),
        Turn::assistant("All done. Is there anything else I can help you with?"),
    ];

    let response = agent.process(req).await.unwrap();
    assert_eq!(response.stage, ResponseStage::Finish);
    assert_eq!(response.transfer_human, 1);
}

#[tokio::test]
async fn activity_eligibility_happy_path() {
    let gateway = MockGateway::new(|code, _| match code {
        CallCode::ActivityList => Ok(BackendReply {
            code: 0,
            data: serde_json::json!({"activities": ["First Deposit Bonus", "Weekly Rebate"]}),
        }),
        CallCode::UserEligibility => Ok(BackendReply {
            code: 0,
            data: serde_json::json!({"eligible": true}),
        }),
        other => panic!("unexpected call {}", other.as_str()),
    });
    let llm = FnModel::new(|prompt| {
        if prompt.contains("step number") {
            Ok("1".to_string())
        } else {
            Err(Error::Llm("model unavailable".into()))
        }
    });
    let notifier = Arc::new(MockNotifier::default());
    let agent = agent(llm, gateway.clone(), notifier);

    let mut req = request("am I eligible for the Weekly Rebate?");
    req.business_type = Some(BusinessType::ActivityQuery);

    let response = agent.process(req).await.unwrap();
    assert_eq!(response.transfer_human, 0);
    assert!(response.response.contains("Weekly Rebate"));
    // Finish without escalation re-opens with the follow-up question.
    assert_eq!(response.stage, ResponseStage::Working);
    assert!(response.response.contains("anything else"));
    assert_eq!(gateway.calls().len(), 2);
}

#[tokio::test]
async fn human_keywords_in_small_talk_escalate() {
    let llm = FnModel::new(|prompt| {
        if prompt.contains("appropriate casual conversation") {
            Ok("1".to_string())
        } else if prompt.contains("intent classifier") {
            Ok("S005".to_string())
        } else {
            Err(Error::Llm("model unavailable".into()))
        }
    });
    let notifier = Arc::new(MockNotifier::default());
    let agent = agent(llm, MockGateway::unused(), notifier.clone());

    let response = agent
        .process(request("I want to make a complaint to a real person"))
        .await
        .unwrap();
    // "complaint" is in the needs-human keyword set.
    assert_eq!(response.transfer_human, 1);
    assert_eq!(response.stage, ResponseStage::Finish);
    assert_eq!(notifier.texts.lock().len(), 1);
}

#[tokio::test]
async fn identical_inputs_produce_identical_decisions() {
    // Determinism of the non-model path: same request, same outcome.
    for _ in 0..2 {
        let notifier = Arc::new(MockNotifier::default());
        let agent = agent(FnModel::unavailable(), MockGateway::unused(), notifier);
        let response = agent.process(request("our deposit is late")).await.unwrap();
        assert_eq!(response.business_type.as_deref(), Some("S001"));
        assert_eq!(response.stage, ResponseStage::Working);
        assert_eq!(response.transfer_human, 0);
    }
}
