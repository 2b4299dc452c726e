use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "tr")]
    Turkish,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Turkish => "tr",
        }
    }

    pub fn language_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Turkish => "Turkish",
        }
    }
}

/// Picks the locale used for prompts and fallback copy.
pub trait LocaleDetector: Send + Sync {
    fn detect(&self, text: &str) -> Locale;
}

const TURKISH_DIACRITICS: &[char] = &[
    'ç', 'ğ', 'ı', 'ö', 'ş', 'ü', 'Ç', 'Ğ', 'İ', 'Ö', 'Ş', 'Ü',
];

/// Turkish when any Turkish-specific letter appears, English otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiacriticDetector;

impl LocaleDetector for DiacriticDetector {
    fn detect(&self, text: &str) -> Locale {
        if text.chars().any(|c| TURKISH_DIACRITICS.contains(&c)) {
            Locale::Turkish
        } else {
            Locale::English
        }
    }
}
