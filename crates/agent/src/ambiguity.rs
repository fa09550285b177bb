//! Ambiguity and guidance resolution
//!
//! Three situations are recognized before any generic classification
//! runs, in priority order:
//!
//! 1. explicit "not received" phrasing routes straight into the
//!    matching business workflow at the order-query stage;
//! 2. a bare business mention emits a disambiguation menu and waits;
//! 3. a reply to a pending menu parses the choice, or gives up and
//!    escalates rather than loop.
//!
//! Drift guidance lives here too: once a business type is fixed and the
//! stage classifier says "unrelated", the reply nudges the user back,
//! gently at first, naming the missing datum from round five on.

use chatai_config::constants::{
    BARE_MENTION_MAX_CHARS, BARE_MENTION_MAX_WORDS, GUIDANCE_DIRECT_ROUNDS,
};
use chatai_config::{BusinessConfig, BusinessEntry};
use chatai_core::{conversation, BusinessType, Language, Turn};

/// "How do I ..." markers used to parse menu option 2 from free text.
const HOW_TO_MARKERS: &[(&str, &[&str])] = &[
    ("zh", &["如何", "怎么", "怎样"]),
    ("en", &["how"]),
    ("ja", &["方法", "どうやって"]),
    ("th", &["อย่างไร", "ยังไง"]),
    ("tl", &["paano"]),
];

/// What the resolver decided for this turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmbiguityOutcome {
    /// Route into `business` at the order-query stage, skipping
    /// classification entirely.
    NotReceived(BusinessType),
    /// Emit the disambiguation menu for `business`; the business type
    /// stays unresolved until the user picks.
    Menu(BusinessType),
    /// The user answered a pending menu.
    MenuChoice {
        business: BusinessType,
        choice: MenuChoice,
    },
}

/// Parsed menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    NotReceived,
    HowTo,
    /// "Other questions", or nothing we could parse: hand to a human
    /// instead of looping.
    Other,
}

/// Run the priority chain. `None` means no ambiguity handling applies
/// and normal classification should proceed.
pub fn resolve(
    config: &BusinessConfig,
    message: &str,
    history: &[Turn],
    language: Language,
    preset: Option<BusinessType>,
) -> Option<AmbiguityOutcome> {
    // 1. Explicit not-received phrasing.
    if let Some(business) = detect_not_received(config, message, language, preset) {
        return Some(AmbiguityOutcome::NotReceived(business));
    }

    // 2. Bare mention without specifics. A preset business type means
    //    the caller already disambiguated for us.
    if preset.is_none() {
        if let Some(business) = detect_bare_mention(config, message, language) {
            return Some(AmbiguityOutcome::Menu(business));
        }
    }

    // 3. Reply to a pending menu, recognized by the menu signature in
    //    the last assistant turn.
    if let Some(business) = pending_menu_business(config, history) {
        let entry = config.entry(business)?;
        let choice = parse_menu_choice(message, entry, language);
        return Some(AmbiguityOutcome::MenuChoice { business, choice });
    }

    None
}

fn detect_not_received(
    config: &BusinessConfig,
    message: &str,
    language: Language,
    preset: Option<BusinessType>,
) -> Option<BusinessType> {
    for (code, entry) in &config.businesses {
        let Some(business) = BusinessType::from_code(code) else {
            continue;
        };
        if !business.is_order_flow() {
            continue;
        }
        let phrase_hit = entry
            .not_received_for(language)
            .iter()
            .any(|p| message.contains(p.as_str()));
        if !phrase_hit {
            continue;
        }
        let keyword_hit = entry
            .keywords_for(language)
            .iter()
            .any(|k| message.contains(k.as_str()));
        // A bare "not received" with no business word still routes when
        // the business type is already fixed.
        if keyword_hit || preset == Some(business) {
            return Some(business);
        }
    }
    None
}

fn detect_bare_mention(
    config: &BusinessConfig,
    message: &str,
    language: Language,
) -> Option<BusinessType> {
    let trimmed = message.trim();
    let is_short = trimmed.split_whitespace().count() <= BARE_MENTION_MAX_WORDS
        || trimmed.chars().count() <= BARE_MENTION_MAX_CHARS;
    if !is_short {
        return None;
    }

    for (code, entry) in &config.businesses {
        let Some(business) = BusinessType::from_code(code) else {
            continue;
        };
        if entry.menu.is_none() {
            continue;
        }
        let keyword_hit = entry
            .keywords_for(language)
            .iter()
            .any(|k| trimmed.contains(k.as_str()));
        let status_words = entry
            .not_received_for(language)
            .iter()
            .any(|p| trimmed.contains(p.as_str()));
        if keyword_hit && !status_words {
            return Some(business);
        }
    }
    None
}

/// Which business's menu, if any, the last assistant turn showed.
pub fn pending_menu_business(config: &BusinessConfig, history: &[Turn]) -> Option<BusinessType> {
    let last = conversation::last_assistant_turn(history)?;
    for (code, entry) in &config.businesses {
        if let Some(menu) = &entry.menu {
            if menu.signature.appears_in(last) {
                return BusinessType::from_code(code);
            }
        }
    }
    None
}

fn parse_menu_choice(message: &str, entry: &BusinessEntry, language: Language) -> MenuChoice {
    let trimmed = message.trim();

    let not_received_text = entry
        .not_received_for(language)
        .iter()
        .any(|p| trimmed.contains(p.as_str()));
    if trimmed.starts_with('1') || not_received_text {
        return MenuChoice::NotReceived;
    }

    let how_to_text = HOW_TO_MARKERS
        .iter()
        .find(|(lang, _)| *lang == language.as_str())
        .map(|(_, markers)| markers.iter().any(|m| trimmed.contains(m)))
        .unwrap_or(false);
    if trimmed.starts_with('2') || how_to_text {
        return MenuChoice::HowTo;
    }

    MenuChoice::Other
}

/// Drift-guidance reply for a fixed business type whose stage came back
/// "unrelated". Directiveness scales with the round count.
pub fn guidance_reply(
    config: &BusinessConfig,
    business: BusinessType,
    language: Language,
    rounds: usize,
) -> String {
    let (template, datum) = match config.entry(business) {
        Some(entry) if rounds >= GUIDANCE_DIRECT_ROUNDS => (
            config.text(&config.messages.guidance_direct, language),
            config.text(&entry.missing_datum, language),
        ),
        Some(_) | None => (config.text(&config.messages.guidance_gentle, language), String::new()),
    };
    let display = config
        .entry(business)
        .map(|e| config.text(&e.display_name, language))
        .unwrap_or_else(|| business.name().to_string());
    template
        .replace("{business}", &display)
        .replace("{datum}", &datum)
}
