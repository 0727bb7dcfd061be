use std::fmt;
use std::str::FromStr;

use crate::error::VoiceError;

/// Languages the translator offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Bengali,
    Spanish,
    French,
    German,
    Hindi,
    Arabic,
    Japanese,
    Chinese,
    Portuguese,
    Russian,
    Italian,
}

impl Language {
    pub const ALL: [Language; 12] = [
        Language::English,
        Language::Bengali,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Hindi,
        Language::Arabic,
        Language::Japanese,
        Language::Chinese,
        Language::Portuguese,
        Language::Russian,
        Language::Italian,
    ];

    /// Two-letter code sent in `langpair`.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Bengali => "bn",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Hindi => "hi",
            Language::Arabic => "ar",
            Language::Japanese => "ja",
            Language::Chinese => "zh",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Italian => "it",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Bengali => "Bengali",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Hindi => "Hindi",
            Language::Arabic => "Arabic",
            Language::Japanese => "Japanese",
            Language::Chinese => "Chinese",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Italian => "Italian",
        }
    }

    /// `"{from}|{to}"` as expected by the translation endpoint.
    pub fn pair(from: Language, to: Language) -> String {
        format!("{}|{}", from.code(), to.code())
    }
}

impl FromStr for Language {
    type Err = VoiceError;

    /// Accepts a code (`"bn"`) or an English name (`"Bengali"`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Language::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(s) || l.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| VoiceError::InvalidParameter(format!("unsupported language {s:?}")))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
