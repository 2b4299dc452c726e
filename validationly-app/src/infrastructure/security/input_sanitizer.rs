use regex_lite::Regex;
use std::sync::LazyLock;
use validationly_errors::AppError;

const BLOCKED_KEYWORDS: &[&str] = &[
    "ignore previous",
    "ignore all",
    "disregard",
    "forget your",
    "new instructions",
    "system prompt",
    "you are now",
    "pretend to be",
    "jailbreak",
    "developer mode",
    "önceki talimatları",
    "yeni talimat",
];

const PII_TEXT_CAP: usize = 5000;

static BLOCKED_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let alternatives: Vec<String> = BLOCKED_KEYWORDS
        .iter()
        .map(|kw| regex_lite::escape(kw))
        .collect();
    Regex::new(&format!("(?i){}", alternatives.join("|"))).ok()
});

static MARKUP_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*script|javascript:|\bon\w+\s*=").ok());

static PII_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b", "[CARD_NUMBER]"),
        (r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b", "[EMAIL]"),
        (r"\b\d{3}-\d{2}-\d{4}\b", "[SSN]"),
    ]
    .into_iter()
    .filter_map(|(pattern, label)| Regex::new(pattern).ok().map(|re| (re, label)))
    .collect()
});

pub struct InputSanitizer;

impl InputSanitizer {
    /// Trimmed text cut to `max_chars`, or `InvalidInput(missing)` when blank.
    pub fn required_text(
        raw: Option<&str>,
        max_chars: usize,
        missing: &str,
    ) -> Result<String, AppError> {
        Self::optional_text(raw, max_chars).ok_or_else(|| AppError::InvalidInput(missing.to_string()))
    }

    pub fn optional_text(raw: Option<&str>, max_chars: usize) -> Option<String> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self::truncate_chars(trimmed, max_chars))
    }

    pub fn truncate_chars(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => text[..idx].to_string(),
            None => text.to_string(),
        }
    }

    pub fn email(raw: Option<&str>) -> Option<String> {
        let email = raw?.trim();
        if email.contains('@') && email.len() <= 320 {
            Some(email.to_string())
        } else {
            None
        }
    }

    /// Clamps into `[0, max]` and rounds. Non-finite input is dropped.
    pub fn clamp_score(raw: Option<f64>, max: u8) -> Option<u8> {
        let value = raw.filter(|v| v.is_finite())?;
        Some(value.clamp(0.0, max as f64).round() as u8)
    }

    pub fn reject_markup(text: &str) -> Result<(), AppError> {
        let flagged = MARKUP_PATTERN
            .as_ref()
            .is_some_and(|re| re.is_match(text));
        if flagged {
            tracing::warn!("Rejected input containing markup");
            return Err(AppError::InvalidInput("Invalid input detected".to_string()));
        }
        Ok(())
    }

    pub fn contains_injection_attempt(input: &str) -> bool {
        let lower = input.to_lowercase();
        BLOCKED_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }

    /// Masks instruction-override phrases and strips control characters
    /// before text is embedded in a prompt.
    pub fn neutralize_injection(text: &str) -> String {
        if Self::contains_injection_attempt(text) {
            tracing::warn!("Masked instruction-override phrase in prompt input");
        }
        let filtered = match BLOCKED_PATTERN.as_ref() {
            Some(re) => re.replace_all(text, "[FILTERED]").into_owned(),
            None => text.to_string(),
        };

        filtered
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect()
    }

    pub fn scrub_pii(text: &str) -> String {
        let mut scrubbed = text.to_string();
        for (re, label) in PII_PATTERNS.iter() {
            scrubbed = re.replace_all(&scrubbed, *label).into_owned();
        }

        if scrubbed.chars().count() > PII_TEXT_CAP {
            let mut capped = Self::truncate_chars(&scrubbed, PII_TEXT_CAP);
            capped.push_str("...");
            capped
        } else {
            scrubbed
        }
    }
}
