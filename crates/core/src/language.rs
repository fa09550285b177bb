//! Supported reply languages
//!
//! The service answers in the language the platform reports for the user.
//! Unknown codes fall back to English, matching the behavior of the
//! original deployment.

use serde::{Deserialize, Serialize};

/// Language of the user-facing reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    #[default]
    En,
    Th,
    Tl,
    Ja,
    /// Anything the platform sends that we do not localize for.
    #[serde(other)]
    Unknown,
}

impl Language {
    /// Lookup key used in localized message tables
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
            Language::Th => "th",
            Language::Tl => "tl",
            Language::Ja => "ja",
            Language::Unknown => "en",
        }
    }

    /// Human-readable name, used in generation prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Zh => "Chinese",
            Language::En => "English",
            Language::Th => "Thai",
            Language::Tl => "Filipino",
            Language::Ja => "Japanese",
            Language::Unknown => "English",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_fall_back_to_english() {
        let lang: Language = serde_json::from_str("\"ko\"").unwrap();
        assert_eq!(lang, Language::Unknown);
        assert_eq!(lang.as_str(), "en");
    }

    #[test]
    fn known_codes_round_trip() {
        let lang: Language = serde_json::from_str("\"zh\"").unwrap();
        assert_eq!(lang, Language::Zh);
        assert_eq!(serde_json::to_string(&lang).unwrap(), "\"zh\"");
    }
}
