use super::ports::TextGenerator;
use super::{with_deadline, Dependency};
use crate::domain::{
    Locale, LocaleDetector, Platform, PlatformAnalysis, ValidationResult, MAX_IDEA_CHARS,
};
use crate::infrastructure::gemini::prompt::validation_request;
use crate::infrastructure::security::InputSanitizer;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use validationly_errors::AppError;

const CLONE_SCORE_CAP: u8 = 40;
const DEFAULT_DEMAND_SCORE: f64 = 50.0;
const DEFAULT_PLATFORM_SCORE: f64 = 3.0;
const CLONE_MARKERS: &[&str] = &[
    "facebook clone",
    "instagram clone",
    "tiktok clone",
    "twitter clone",
    "linkedin clone",
    "snapchat clone",
    "discord clone",
    "reddit clone",
    "facebook but for",
    "instagram but for",
    "tiktok but for",
    "twitter but for",
    "like facebook but",
    "like instagram but",
    "like tiktok but",
    "like twitter but",
];

pub struct ValidateIdea {
    generator: Dependency<dyn TextGenerator>,
    detector: Arc<dyn LocaleDetector>,
    timeout: Duration,
}

impl ValidateIdea {
    pub fn new(
        generator: Dependency<dyn TextGenerator>,
        detector: Arc<dyn LocaleDetector>,
        timeout: Duration,
    ) -> Self {
        Self {
            generator,
            detector,
            timeout,
        }
    }

    pub async fn execute(&self, idea: Option<&str>) -> Result<ValidationResult, AppError> {
        let idea =
            InputSanitizer::required_text(idea, MAX_IDEA_CHARS, "Idea or content is required")?;
        InputSanitizer::reject_markup(&idea)?;
        let generator = self.generator.get()?;

        let locale = self.detector.detect(&idea);
        let request = validation_request(&idea, locale);
        let reply = with_deadline(self.timeout, generator.generate(&request)).await?;

        let result = parse_validation(&reply, &idea, locale)?;
        tracing::info!(
            "Validated idea ({} chars, {}) with demand score {}",
            idea.chars().count(),
            locale.code(),
            result.demand_score
        );
        Ok(result)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawValidation {
    demand_score: Option<f64>,
    score_justification: Option<String>,
    platform_analyses: Option<HashMap<String, RawPlatformAnalysis>>,
    tweet_suggestion: Option<String>,
    reddit_title_suggestion: Option<String>,
    reddit_body_suggestion: Option<String>,
    linkedin_suggestion: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawPlatformAnalysis {
    platform_name: Option<String>,
    score: Option<f64>,
    summary: Option<String>,
    key_findings: Option<Vec<String>>,
    content_suggestion: Option<String>,
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_obvious_clone(idea: &str) -> bool {
    let lower = idea.to_lowercase();
    CLONE_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Normalizes a model reply into a complete [`ValidationResult`].
fn parse_validation(reply: &str, idea: &str, locale: Locale) -> Result<ValidationResult, AppError> {
    let raw: RawValidation = serde_json::from_str(strip_code_fences(reply)).map_err(|e| {
        AppError::Generation(format!("unparseable validation reply: {}", e))
    })?;

    let mut demand_score = InputSanitizer::clamp_score(
        Some(raw.demand_score.unwrap_or(DEFAULT_DEMAND_SCORE)),
        ValidationResult::MAX_DEMAND_SCORE,
    )
    .unwrap_or(DEFAULT_DEMAND_SCORE as u8);
    if is_obvious_clone(idea) && demand_score > CLONE_SCORE_CAP {
        tracing::info!("Clone detected, demand score capped at {}", CLONE_SCORE_CAP);
        demand_score = CLONE_SCORE_CAP;
    }

    let mut raw_analyses: HashMap<String, RawPlatformAnalysis> = raw
        .platform_analyses
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect();
    let platform_analyses: BTreeMap<Platform, PlatformAnalysis> = Platform::ALL
        .into_iter()
        .map(|platform| {
            let analysis = match raw_analyses.remove(platform.key()) {
                Some(raw) => normalize_platform(raw, platform, locale),
                None => default_platform_analysis(platform, locale),
            };
            (platform, analysis)
        })
        .collect();

    let defaults = default_suggestions(idea, locale);
    Ok(ValidationResult {
        idea: idea.to_string(),
        demand_score,
        score_justification: non_empty(raw.score_justification)
            .unwrap_or_else(|| general_assessment(locale).to_string()),
        platform_analyses,
        tweet_suggestion: non_empty(raw.tweet_suggestion).unwrap_or(defaults.tweet),
        reddit_title_suggestion: non_empty(raw.reddit_title_suggestion)
            .unwrap_or(defaults.reddit_title),
        reddit_body_suggestion: non_empty(raw.reddit_body_suggestion)
            .unwrap_or(defaults.reddit_body),
        linkedin_suggestion: non_empty(raw.linkedin_suggestion).unwrap_or(defaults.linkedin),
        language: locale,
    })
}

fn normalize_platform(raw: RawPlatformAnalysis, platform: Platform, locale: Locale) -> PlatformAnalysis {
    let fallback = default_platform_analysis(platform, locale);
    let key_findings: Vec<String> = raw
        .key_findings
        .unwrap_or_default()
        .into_iter()
        .filter(|f| !f.trim().is_empty())
        .collect();

    PlatformAnalysis {
        platform_name: non_empty(raw.platform_name).unwrap_or(fallback.platform_name),
        score: InputSanitizer::clamp_score(
            Some(raw.score.unwrap_or(DEFAULT_PLATFORM_SCORE)),
            PlatformAnalysis::MAX_SCORE,
        )
        .unwrap_or(DEFAULT_PLATFORM_SCORE as u8),
        summary: non_empty(raw.summary).unwrap_or(fallback.summary),
        key_findings: if key_findings.is_empty() {
            fallback.key_findings
        } else {
            key_findings
        },
        content_suggestion: non_empty(raw.content_suggestion)
            .unwrap_or(fallback.content_suggestion),
    }
}

fn general_assessment(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "General assessment",
        Locale::Turkish => "Genel değerlendirme",
    }
}

fn default_platform_analysis(platform: Platform, locale: Locale) -> PlatformAnalysis {
    let name = platform.display_name();
    let (summary, findings, suggestion) = match locale {
        Locale::English => (
            format!("{} analysis temporarily unavailable. Expect moderate interest for a new startup idea.", name),
            vec![
                "Audience interest: moderate (typical for startup ideas)".to_string(),
                "Lead with the problem, not the product".to_string(),
            ],
            format!("Share a short, concrete post about the problem on {} and ask for feedback.", name),
        ),
        Locale::Turkish => (
            format!("{} analizi geçici olarak mevcut değil. Yeni bir girişim fikri için orta seviyede ilgi beklenir.", name),
            vec![
                "Kitle ilgisi: orta seviye (girişim fikirleri için tipik)".to_string(),
                "Ürünle değil, problemle başlayın".to_string(),
            ],
            format!("{} üzerinde problemi anlatan kısa ve net bir gönderi paylaşın ve geri bildirim isteyin.", name),
        ),
    };

    PlatformAnalysis {
        platform_name: name.to_string(),
        score: DEFAULT_PLATFORM_SCORE as u8,
        summary,
        key_findings: findings,
        content_suggestion: suggestion,
    }
}

struct Suggestions {
    tweet: String,
    reddit_title: String,
    reddit_body: String,
    linkedin: String,
}

fn default_suggestions(idea: &str, locale: Locale) -> Suggestions {
    let short = InputSanitizer::truncate_chars(idea, 100);
    let title = InputSanitizer::truncate_chars(idea, 80);
    let medium = InputSanitizer::truncate_chars(idea, 150);

    match locale {
        Locale::English => Suggestions {
            tweet: format!("Working on a new idea: \"{}\"\n\nAnyone with experience in this area? Would love your thoughts!\n\n#startup #idea #validation", short),
            reddit_title: format!("[Idea Sharing] {} - Seeking community feedback", title),
            reddit_body: format!("Hi r/startups!\n\nI'm working on this idea and would love your feedback:\n\n**Idea:** {}\n\n- Has anyone experienced this problem?\n- Have you used similar solutions?\n- What features would matter most?", idea),
            linkedin: format!("Developing a new business idea and looking for insights from people in the field:\n\n\"{}\"\n\nWould you share your thoughts?\n\n#entrepreneurship #startup", medium),
        },
        Locale::Turkish => Suggestions {
            tweet: format!("Yeni bir fikir üzerinde çalışıyorum: \"{}\"\n\nBu konuda deneyimi olan var mı? Görüşlerinizi merak ediyorum!\n\n#startup #girişim #fikir", short),
            reddit_title: format!("[Fikir Paylaşımı] {} - Topluluktan geri bildirim arıyorum", title),
            reddit_body: format!("Merhaba r/startups!\n\nŞu fikir üzerinde çalışıyorum ve görüşlerinizi almak istiyorum:\n\n**Fikir:** {}\n\n- Bu problemi yaşayan var mı?\n- Benzer çözümler kullandınız mı?\n- Hangi özellikler en önemli olurdu?", idea),
            linkedin: format!("Yeni bir iş fikri geliştiriyorum ve alandaki profesyonellerin görüşlerini almak istiyorum:\n\n\"{}\"\n\nYorumlarınızı paylaşır mısınız?\n\n#girişimcilik #startup", medium),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::GenerationRequest;
    use crate::domain::DiacriticDetector;
    use async_trait::async_trait;

    struct CannedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, AppError> {
            Ok(self.0.to_string())
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, AppError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("{}".to_string())
        }
    }

    fn use_case(generator: Arc<dyn TextGenerator>, timeout: Duration) -> ValidateIdea {
        ValidateIdea::new(
            Dependency::new("AI generation", Some(generator)),
            Arc::new(DiacriticDetector),
            timeout,
        )
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {} "), "{}");
    }

    #[test]
    fn test_fills_missing_platforms_and_clamps() {
        let reply = r#"{"demandScore": 140, "platformAnalyses": {"Reddit": {"score": 9, "summary": "Active threads"}}}"#;
        let result = parse_validation(reply, "Meal planner for shift workers", Locale::English).unwrap();

        assert_eq!(result.demand_score, 100);
        assert_eq!(result.idea, "Meal planner for shift workers");
        assert_eq!(result.platform_analyses.len(), 3);

        let reddit = &result.platform_analyses[&Platform::Reddit];
        assert_eq!(reddit.score, 5);
        assert_eq!(reddit.summary, "Active threads");
        assert!(!reddit.key_findings.is_empty());

        let twitter = &result.platform_analyses[&Platform::Twitter];
        assert_eq!(twitter.score, 3);
        assert!(twitter.summary.contains("unavailable"));
        assert!(result.tweet_suggestion.contains("Meal planner"));
    }

    #[test]
    fn test_turkish_defaults() {
        let result = parse_validation("{}", "Öğrenciler için not paylaşımı", Locale::Turkish).unwrap();
        assert_eq!(result.demand_score, 50);
        assert_eq!(result.score_justification, "Genel değerlendirme");
        assert!(result.platform_analyses[&Platform::Linkedin]
            .summary
            .contains("mevcut değil"));
    }

    #[test]
    fn test_clone_score_is_capped() {
        let result = parse_validation(r#"{"demandScore": 85}"#, "An Instagram clone for pets", Locale::English).unwrap();
        assert_eq!(result.demand_score, 40);

        let low = parse_validation(r#"{"demandScore": 12}"#, "A TikTok clone", Locale::English).unwrap();
        assert_eq!(low.demand_score, 12);
    }

    #[test]
    fn test_unparseable_reply_is_an_error() {
        let err = parse_validation("Sorry, I can't help with that.", "idea", Locale::English);
        assert!(matches!(err, Err(AppError::Generation(_))));
    }

    #[tokio::test]
    async fn test_missing_idea_is_rejected_before_generation() {
        let validate = ValidateIdea::new(
            Dependency::missing("AI generation"),
            Arc::new(DiacriticDetector),
            Duration::from_secs(1),
        );
        let err = validate.execute(Some("   ")).await.unwrap_err();
        assert_eq!(err.user_message(), "Idea or content is required");

        let err = validate.execute(Some("real idea")).await.unwrap_err();
        assert!(matches!(err, AppError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_executes_against_generator() {
        let validate = use_case(
            Arc::new(CannedGenerator(r#"```json
{"demandScore": 72, "scoreJustification": "Strong niche interest"}
```"#)),
            Duration::from_secs(1),
        );
        let result = validate.execute(Some("  B2B invoicing for freelancers ")).await.unwrap();
        assert_eq!(result.demand_score, 72);
        assert_eq!(result.idea, "B2B invoicing for freelancers");
        assert_eq!(result.language, Locale::English);
    }

    #[tokio::test]
    async fn test_slow_generator_times_out() {
        let validate = use_case(Arc::new(SlowGenerator), Duration::from_millis(20));
        let err = validate.execute(Some("idea")).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout(_)));
    }
}
