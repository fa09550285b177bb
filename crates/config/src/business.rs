//! Hot-reloadable business configuration
//!
//! Keyword tables, per-stage scripts, disambiguation menus, and
//! status-message mappings are data, not code: the engine only ever
//! reads them through an immutable snapshot. Built-in defaults mirror
//! the production config file so the service runs without one.
//!
//! The file format is JSON (`config/business.json`); missing fields fall
//! back to the defaults below.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chatai_core::{BusinessType, Language};

use crate::ConfigError;

/// Text in several languages, keyed by language code
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(pub HashMap<String, String>);

impl LocalizedText {
    pub fn of(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Resolve for a language, falling back to the default language,
    /// then to any variant at all.
    pub fn resolve(&self, language: Language, default_language: &str) -> &str {
        self.0
            .get(language.as_str())
            .or_else(|| self.0.get(default_language))
            .or_else(|| self.0.values().next())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// True when any language variant occurs inside `text`.
    ///
    /// Used to recognize our own scripted messages (menus, follow-up
    /// questions) in the assistant turn the caller echoes back.
    pub fn appears_in(&self, text: &str) -> bool {
        self.0.values().any(|v| !v.is_empty() && text.contains(v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Scripted content for one workflow stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageScript {
    /// Short description of what the stage does; also shown to the
    /// model as a stage option during stage classification.
    pub step: String,
    #[serde(default)]
    pub text: LocalizedText,
    /// Optional illustration (e.g. where to find the order number).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One row of the status-mapping table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMapping {
    /// Raw status string returned by the backend service.
    pub status: String,
    pub message: LocalizedText,
    /// Terminal for the automated flow.
    pub terminal: bool,
    /// Hand off to a human agent.
    pub escalate: bool,
    /// Alert the staff channel.
    pub notify: bool,
}

/// Disambiguation menu for vague business mentions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Menu {
    pub text: LocalizedText,
    /// Phrase that identifies this menu in a previous assistant turn.
    pub signature: LocalizedText,
}

/// Everything configured for a single business type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessEntry {
    pub name: String,
    #[serde(default)]
    pub display_name: LocalizedText,
    /// Classification keywords per language; scan order is table order.
    #[serde(default)]
    pub keywords: HashMap<String, Vec<String>>,
    /// "not received" phrasings per language.
    #[serde(default)]
    pub not_received: HashMap<String, Vec<String>>,
    /// Per-stage scripts, keyed by stage number.
    #[serde(default)]
    pub workflow: BTreeMap<String, StageScript>,
    #[serde(default)]
    pub status_map: Vec<StatusMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<Menu>,
    /// What drift guidance should ask for once it gets directive.
    #[serde(default)]
    pub missing_datum: LocalizedText,
}

impl BusinessEntry {
    /// Keywords for a language, empty when none are configured.
    pub fn keywords_for(&self, language: Language) -> &[String] {
        self.keywords
            .get(language.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn not_received_for(&self, language: Language) -> &[String] {
        self.not_received
            .get(language.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn stage_script(&self, stage: i64) -> Option<&StageScript> {
        self.workflow.get(&stage.to_string())
    }
}

/// Fixed message table shared by all workflows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTable {
    pub unauthenticated: LocalizedText,
    pub round_cap: LocalizedText,
    pub satisfaction_close: LocalizedText,
    pub small_talk_close: LocalizedText,
    /// The "anything else?" follow-up; also the satisfaction signature.
    pub follow_up: LocalizedText,
    pub invalid_order: LocalizedText,
    pub system_error: LocalizedText,
    pub transfer_human: LocalizedText,
    pub image_received: LocalizedText,
    /// `{business}` placeholder.
    pub guidance_gentle: LocalizedText,
    /// `{business}` and `{datum}` placeholders.
    pub guidance_direct: LocalizedText,
    pub smalltalk_redirect: LocalizedText,
    /// `{options}` placeholder.
    pub near_match_intro: LocalizedText,
    /// `{activity}` placeholder.
    pub activity_eligible: LocalizedText,
    /// `{activity}` and `{reason}` placeholders.
    pub activity_not_eligible: LocalizedText,
    /// Conservative reply for unknown backend statuses.
    pub status_forwarded: LocalizedText,
}

impl Default for MessageTable {
    fn default() -> Self {
        Self {
            unauthenticated: LocalizedText::of(&[
                ("zh", "您尚未登录，请先登录"),
                ("en", "You are not logged in, please log in first"),
                ("th", "คุณยังไม่ได้เข้าสู่ระบบ กรุณาเข้าสู่ระบบก่อน"),
                ("tl", "Hindi ka pa naka-login, mangyaring mag-login muna."),
                ("ja", "ログインしていません。まずログインしてください。"),
            ]),
            round_cap: LocalizedText::of(&[
                ("zh", "非常抱歉让您久等了，我们已为您转接人工客服跟进处理。"),
                (
                    "en",
                    "We are sorry this is taking so long. A human agent will take over from here.",
                ),
                (
                    "th",
                    "ขออภัยที่ใช้เวลานาน เจ้าหน้าที่จะดูแลคุณต่อจากนี้",
                ),
                (
                    "tl",
                    "Paumanhin sa tagal. Isang ahente ang tutulong sa inyo mula dito.",
                ),
                (
                    "ja",
                    "お待たせして申し訳ございません。ここからは担当者が対応いたします。",
                ),
            ]),
            satisfaction_close: LocalizedText::of(&[
                ("zh", "感谢您的咨询！工单将由工作人员为您关闭，祝您生活愉快！"),
                (
                    "en",
                    "Thank you for contacting us! A staff member will close your ticket shortly. Have a great day!",
                ),
            ]),
            small_talk_close: LocalizedText::of(&[
                ("zh", "和您聊天很愉快！如有需要欢迎随时咨询，再见！"),
                (
                    "en",
                    "It was nice chatting with you! Feel free to reach out any time. Goodbye!",
                ),
            ]),
            follow_up: LocalizedText::of(&[
                ("zh", "请问还有什么可以帮您？"),
                ("en", "Is there anything else I can help you with?"),
                ("th", "มีอะไรให้ช่วยเพิ่มเติมไหมคะ"),
                ("tl", "May iba pa ba akong maitutulong sa inyo?"),
                ("ja", "他にお手伝いできることはございますか？"),
            ]),
            invalid_order: LocalizedText::of(&[
                ("zh", "未能查询到该订单，请重新核对您的订单编号后再发送一次。"),
                (
                    "en",
                    "We couldn't find an order with that number. Please re-check the order number and send it again.",
                ),
            ]),
            system_error: LocalizedText::of(&[
                ("zh", "系统处理中遇到问题，已为您转接人工客服。"),
                (
                    "en",
                    "We encountered an issue while processing. You have been transferred to customer service.",
                ),
                (
                    "th",
                    "เราประสบปัญหาขณะดำเนินการ คุณได้ถูกโอนไปยังฝ่ายบริการลูกค้าแล้ว",
                ),
                (
                    "tl",
                    "May naranasan kaming problema habang nagpoproseso. Na-transfer na kayo sa customer service.",
                ),
                (
                    "ja",
                    "処理中に問題が発生しました。カスタマーサービスに転送されました。",
                ),
            ]),
            transfer_human: LocalizedText::of(&[
                ("zh", "您的请求较为复杂，正在为您转接人工客服，请稍候..."),
                (
                    "en",
                    "Your request is complex. We are connecting you to a human agent. Please wait...",
                ),
                (
                    "th",
                    "คำขอของคุณซับซ้อน เรากำลังเชื่อมต่อคุณกับเจ้าหน้าที่ โปรดรอสักครู่...",
                ),
                (
                    "tl",
                    "Ang iyong kahilingan ay komplikado. Kinokonekta ka namin sa isang ahente. Mangyaring maghintay...",
                ),
                (
                    "ja",
                    "ご要望が複雑なため、オペレーターに接続しています。少々お待ちください...",
                ),
            ]),
            image_received: LocalizedText::of(&[
                ("zh", "我们已收到您的截图并转交给工作人员核实，稍后会有专员跟进。"),
                (
                    "en",
                    "We have received your screenshots and forwarded them to our staff for review. An agent will follow up with you shortly.",
                ),
            ]),
            guidance_gentle: LocalizedText::of(&[
                ("zh", "我们先继续处理您的{business}问题吧，可以再描述一下具体情况吗？"),
                (
                    "en",
                    "Let's stay with your {business} inquiry. Could you tell me a bit more about the problem?",
                ),
            ]),
            guidance_direct: LocalizedText::of(&[
                ("zh", "为了查询您的{business}问题，请直接提供{datum}。"),
                (
                    "en",
                    "To look into your {business} issue I need {datum}. Please send it here.",
                ),
            ]),
            smalltalk_redirect: LocalizedText::of(&[
                ("zh", "我们还是聊回您的账户问题吧，请问有什么可以帮您？"),
                (
                    "en",
                    "Let's keep things on track. How can I help you with your account today?",
                ),
            ]),
            near_match_intro: LocalizedText::of(&[
                ("zh", "没有找到完全一致的活动，您是指下面哪一个？\n{options}\n请回复准确的活动名称。"),
                (
                    "en",
                    "I couldn't find that exact activity. Did you mean one of these?\n{options}\nPlease reply with the exact name.",
                ),
            ]),
            activity_eligible: LocalizedText::of(&[
                ("zh", "好消息！您符合参加“{activity}”的条件，奖励将按活动规则发放。"),
                (
                    "en",
                    "Good news! You are eligible for \"{activity}\". The reward will be applied according to the activity rules.",
                ),
            ]),
            activity_not_eligible: LocalizedText::of(&[
                ("zh", "很抱歉，您暂时不满足“{activity}”的参与条件：{reason}"),
                (
                    "en",
                    "Unfortunately you don't currently meet the requirements for \"{activity}\": {reason}",
                ),
            ]),
            status_forwarded: LocalizedText::of(&[
                ("zh", "暂时无法自动确认该订单状态，已将您的问题转交工作人员处理。"),
                (
                    "en",
                    "We could not determine the order status automatically, so your case has been forwarded to our staff.",
                ),
            ]),
        }
    }
}

/// Top-level business configuration snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    pub default_language: String,
    /// Keyed by wire code (`S001`..); BTreeMap keeps the keyword scan
    /// order deterministic.
    pub businesses: BTreeMap<String, BusinessEntry>,
    pub messages: MessageTable,
    /// Small-talk messages matching these still need a human.
    pub human_service_keywords: HashMap<String, Vec<String>>,
    /// Status words whose exact wording must survive the
    /// language-consistency pass.
    pub protected_status_tokens: Vec<String>,
}

impl BusinessConfig {
    /// Load from a JSON file; missing fields take defaults.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn entry(&self, business: BusinessType) -> Option<&BusinessEntry> {
        self.businesses.get(business.code())
    }

    /// Resolve localized text with the configured fallback language.
    pub fn text(&self, text: &LocalizedText, language: Language) -> String {
        text.resolve(language, &self.default_language).to_string()
    }

    pub fn human_keywords_for(&self, language: Language) -> &[String] {
        self.human_service_keywords
            .get(language.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        let mut businesses = BTreeMap::new();
        businesses.insert(
            BusinessType::DepositQuery.code().to_string(),
            default_deposit_entry(),
        );
        businesses.insert(
            BusinessType::WithdrawalQuery.code().to_string(),
            default_withdrawal_entry(),
        );
        businesses.insert(
            BusinessType::ActivityQuery.code().to_string(),
            default_activity_entry(),
        );
        businesses.insert(
            BusinessType::HumanHandoff.code().to_string(),
            default_handoff_entry(),
        );
        businesses.insert(
            BusinessType::SmallTalk.code().to_string(),
            BusinessEntry {
                name: "small talk".to_string(),
                display_name: LocalizedText::of(&[("zh", "闲聊"), ("en", "small talk")]),
                ..Default::default()
            },
        );

        Self {
            default_language: "en".to_string(),
            businesses,
            messages: MessageTable::default(),
            human_service_keywords: lang_lists(&[
                ("zh", &["人工", "客服", "投诉", "举报"]),
                ("en", &["human", "agent", "staff", "complaint", "customer service"]),
                ("ja", &["オペレーター", "担当者"]),
                ("th", &["พนักงาน", "เจ้าหน้าที่"]),
                ("tl", &["ahente", "customer service"]),
            ]),
            protected_status_tokens: [
                "successful",
                "failed",
                "canceled",
                "refunded",
                "processing",
                "成功",
                "失败",
                "取消",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

fn lang_lists(pairs: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    pairs
        .iter()
        .map(|(lang, words)| {
            (
                lang.to_string(),
                words.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect()
}

fn order_flow_workflow(
    ask_zh: &str,
    ask_en: &str,
    where_zh: &str,
    where_en: &str,
    guide_image: &str,
    done_zh: &str,
    done_en: &str,
) -> BTreeMap<String, StageScript> {
    let mut workflow = BTreeMap::new();
    workflow.insert(
        "1".to_string(),
        StageScript {
            step: "ask for the 18-digit order number".to_string(),
            text: LocalizedText::of(&[("zh", ask_zh), ("en", ask_en)]),
            image: None,
        },
    );
    workflow.insert(
        "2".to_string(),
        StageScript {
            step: "user does not know where to find the order number".to_string(),
            text: LocalizedText::of(&[("zh", where_zh), ("en", where_en)]),
            image: Some(guide_image.to_string()),
        },
    );
    workflow.insert(
        "3".to_string(),
        StageScript {
            step: "an order number was provided".to_string(),
            text: LocalizedText::default(),
            image: None,
        },
    );
    workflow.insert(
        "4".to_string(),
        StageScript {
            step: "issue confirmed resolved".to_string(),
            text: LocalizedText::of(&[("zh", done_zh), ("en", done_en)]),
            image: None,
        },
    );
    workflow
}

fn default_deposit_entry() -> BusinessEntry {
    BusinessEntry {
        name: "deposit".to_string(),
        display_name: LocalizedText::of(&[("zh", "充值"), ("en", "deposit")]),
        keywords: lang_lists(&[
            ("zh", &["充值", "充钱", "存款"]),
            ("en", &["deposit", "recharge", "top up"]),
            ("ja", &["入金", "チャージ"]),
            ("th", &["เติมเงิน", "ฝากเงิน"]),
            ("tl", &["deposito", "mag-deposit"]),
        ]),
        not_received: lang_lists(&[
            ("zh", &["没到账", "未到账", "没有到账"]),
            (
                "en",
                &["not received", "not arrived", "hasn't arrived", "didn't arrive", "is late"],
            ),
            ("ja", &["反映されていません", "届いていません"]),
        ]),
        workflow: order_flow_workflow(
            "请提供您需要查询的18位【订单编号】。",
            "Could you please provide the 18-digit order number of your deposit?",
            "您可以在 交易记录-充值记录 中找到订单编号，请按下图指引操作。",
            "You can find the order number under Transaction History > Deposit Records. Please follow the picture guide below.",
            "https://static.chatai.example/guide/deposit_order.png",
            "好的，您的充值问题已解决。",
            "Great, your deposit issue looks resolved.",
        ),
        status_map: vec![
            StatusMapping {
                status: "Payment received".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "您的款项已到账，请查看账户余额。"),
                    (
                        "en",
                        "Your payment has been received and credited. Please check your balance.",
                    ),
                ]),
                terminal: true,
                escalate: false,
                notify: false,
            },
            StatusMapping {
                status: "Deposit successful".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "您的充值已成功，请查看账户余额。"),
                    ("en", "Your deposit was successful. Please check your balance."),
                ]),
                terminal: true,
                escalate: false,
                notify: false,
            },
            StatusMapping {
                status: "Deposit processing".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "您的充值正在处理中，请耐心等待几分钟。"),
                    ("en", "Your deposit is processing. Please allow a few minutes."),
                ]),
                terminal: false,
                escalate: false,
                notify: false,
            },
            StatusMapping {
                status: "Waiting for third party".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "正在等待第三方支付确认，请稍候。"),
                    (
                        "en",
                        "We are waiting for the third-party payment provider to confirm your deposit.",
                    ),
                ]),
                terminal: false,
                escalate: false,
                notify: false,
            },
            StatusMapping {
                status: "Deposit failed".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "您的充值订单失败，已升级给工作人员核实处理。"),
                    (
                        "en",
                        "Your deposit order failed. We have escalated it to our staff for review.",
                    ),
                ]),
                terminal: true,
                escalate: true,
                notify: true,
            },
            StatusMapping {
                status: "Order canceled".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "该充值订单已取消。"),
                    ("en", "This deposit order has been canceled."),
                ]),
                terminal: true,
                escalate: false,
                notify: false,
            },
        ],
        menu: Some(Menu {
            text: LocalizedText::of(&[
                (
                    "zh",
                    "请问您想咨询哪类充值问题？\n1. 充值没到账\n2. 如何充值\n3. 其他充值问题",
                ),
                (
                    "en",
                    "Which deposit issue can I help you with?\n1. Deposit not received\n2. How to make a deposit\n3. Other deposit questions",
                ),
            ]),
            signature: LocalizedText::of(&[
                ("zh", "哪类充值问题"),
                ("en", "Which deposit issue"),
            ]),
        }),
        missing_datum: LocalizedText::of(&[
            ("zh", "18位充值【订单编号】"),
            ("en", "the 18-digit deposit order number"),
        ]),
    }
}

fn default_withdrawal_entry() -> BusinessEntry {
    BusinessEntry {
        name: "withdrawal".to_string(),
        display_name: LocalizedText::of(&[("zh", "提现"), ("en", "withdrawal")]),
        keywords: lang_lists(&[
            ("zh", &["提现", "取钱", "出款"]),
            ("en", &["withdraw", "withdrawal", "cash out"]),
            ("ja", &["出金", "引き出し"]),
            ("th", &["ถอนเงิน"]),
            ("tl", &["mag-withdraw"]),
        ]),
        not_received: lang_lists(&[
            ("zh", &["没到账", "未到账", "没有到账"]),
            (
                "en",
                &["not received", "not arrived", "hasn't arrived", "didn't arrive", "is late"],
            ),
            ("ja", &["着金していません", "届いていません"]),
        ]),
        workflow: order_flow_workflow(
            "请提供您需要查询的18位【订单编号】。",
            "Could you please provide the 18-digit order number of your withdrawal?",
            "您可以在 交易记录-提现记录 中找到订单编号，请按下图指引操作。",
            "You can find the order number under Transaction History > Withdrawal Records. Please follow the picture guide below.",
            "https://static.chatai.example/guide/withdrawal_order.png",
            "好的，您的提现问题已解决。",
            "Great, your withdrawal issue looks resolved.",
        ),
        status_map: vec![
            StatusMapping {
                status: "Withdrawal processing".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "您的提现正在处理中，请耐心等待。"),
                    ("en", "Your withdrawal is processing. Please wait a little longer."),
                ]),
                terminal: false,
                escalate: false,
                notify: false,
            },
            StatusMapping {
                status: "Withdrawal successful".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "您的提现已成功出款，请检查您的收款账户。"),
                    (
                        "en",
                        "Your withdrawal was successful. Please check your receiving account.",
                    ),
                ]),
                terminal: true,
                escalate: false,
                notify: false,
            },
            StatusMapping {
                status: "Withdrawal failed".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "您的提现订单失败，已升级给工作人员核实处理。"),
                    (
                        "en",
                        "Your withdrawal order failed. We have escalated it to our staff for review.",
                    ),
                ]),
                terminal: true,
                escalate: true,
                notify: true,
            },
            StatusMapping {
                status: "Waiting for third party".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "正在等待第三方支付处理，请稍候。"),
                    ("en", "We are waiting for the third-party payment provider."),
                ]),
                terminal: false,
                escalate: false,
                notify: false,
            },
            StatusMapping {
                status: "Card number error".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "您的收款卡号有误，请在个人中心更新卡号后重新提交提现。"),
                    (
                        "en",
                        "The receiving card number looks incorrect. Please update your card details and submit the withdrawal again.",
                    ),
                ]),
                terminal: false,
                escalate: false,
                notify: false,
            },
            StatusMapping {
                status: "Card limit exceeded".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "您的收款卡已达到限额，请更换收款卡后重新提交。"),
                    (
                        "en",
                        "Your receiving card has reached its limit. Please switch cards and submit again.",
                    ),
                ]),
                terminal: false,
                escalate: false,
                notify: false,
            },
            StatusMapping {
                status: "Bank maintenance".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "收款银行维护中，请稍后重新提交提现申请。"),
                    (
                        "en",
                        "The receiving bank is under maintenance. Please resubmit your withdrawal later.",
                    ),
                ]),
                terminal: false,
                escalate: false,
                notify: false,
            },
            StatusMapping {
                status: "Resubmit after daily cutoff".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "请在日切后重新提交该订单。"),
                    ("en", "Please resubmit this order after the daily cutoff."),
                ]),
                terminal: false,
                escalate: false,
                notify: false,
            },
            StatusMapping {
                status: "Order refunded".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "该订单款项已回冲至您的余额。"),
                    ("en", "The funds of this order have been refunded to your balance."),
                ]),
                terminal: true,
                escalate: false,
                notify: false,
            },
            StatusMapping {
                status: "Order re-dispatched".to_string(),
                message: LocalizedText::of(&[
                    ("zh", "该订单已重新出款，请耐心等待到账。"),
                    (
                        "en",
                        "Your order has been re-submitted for payout. Please wait for it to arrive.",
                    ),
                ]),
                terminal: false,
                escalate: false,
                notify: false,
            },
        ],
        menu: Some(Menu {
            text: LocalizedText::of(&[
                (
                    "zh",
                    "请问您想咨询哪类提现问题？\n1. 提现没到账\n2. 如何提现\n3. 其他提现问题",
                ),
                (
                    "en",
                    "Which withdrawal issue can I help you with?\n1. Withdrawal not received\n2. How to make a withdrawal\n3. Other withdrawal questions",
                ),
            ]),
            signature: LocalizedText::of(&[
                ("zh", "哪类提现问题"),
                ("en", "Which withdrawal issue"),
            ]),
        }),
        missing_datum: LocalizedText::of(&[
            ("zh", "18位提现【订单编号】"),
            ("en", "the 18-digit withdrawal order number"),
        ]),
    }
}

fn default_activity_entry() -> BusinessEntry {
    let mut workflow = BTreeMap::new();
    workflow.insert(
        "1".to_string(),
        StageScript {
            step: "list running activities and identify the one the user means".to_string(),
            text: LocalizedText::of(&[
                ("zh", "当前正在进行的活动如下："),
                ("en", "Here are the activities currently running:"),
            ]),
            image: None,
        },
    );
    workflow.insert(
        "2".to_string(),
        StageScript {
            step: "user is clarifying which activity they mean".to_string(),
            text: LocalizedText::of(&[
                ("zh", "请问您指的是哪一个活动？"),
                ("en", "Which of these activities do you mean?"),
            ]),
            image: None,
        },
    );

    BusinessEntry {
        name: "activity".to_string(),
        display_name: LocalizedText::of(&[("zh", "活动"), ("en", "activity")]),
        keywords: lang_lists(&[
            ("zh", &["活动", "优惠", "红利"]),
            ("en", &["activity", "promotion", "bonus", "event"]),
            ("ja", &["イベント", "キャンペーン"]),
            ("th", &["กิจกรรม", "โปรโมชั่น"]),
            ("tl", &["promo", "aktibidad"]),
        ]),
        not_received: HashMap::new(),
        workflow,
        status_map: Vec::new(),
        menu: None,
        missing_datum: LocalizedText::of(&[
            ("zh", "活动的准确名称"),
            ("en", "the exact name of the activity"),
        ]),
    }
}

fn default_handoff_entry() -> BusinessEntry {
    BusinessEntry {
        name: "human service".to_string(),
        display_name: LocalizedText::of(&[("zh", "人工客服"), ("en", "human service")]),
        keywords: lang_lists(&[
            ("zh", &["人工", "客服", "转人工", "人员"]),
            ("en", &["agent", "human", "staff", "customer service"]),
            ("ja", &["オペレーター", "担当者"]),
            ("th", &["พนักงาน", "เจ้าหน้าที่"]),
            ("tl", &["tao", "ahente"]),
        ]),
        not_received: HashMap::new(),
        workflow: BTreeMap::new(),
        status_map: Vec::new(),
        menu: None,
        missing_datum: LocalizedText::default(),
    }
}
