use super::ports::TextGenerator;
use super::{with_deadline, Dependency};
use crate::domain::{LocaleDetector, MAX_IDEA_CHARS};
use crate::infrastructure::gemini::prompt::message_simulator_request;
use crate::infrastructure::security::InputSanitizer;
use std::sync::Arc;
use std::time::Duration;
use validationly_errors::AppError;

const MAX_AUDIENCE_CHARS: usize = 120;
const MAX_TONE_CHARS: usize = 60;

#[derive(Debug, Default, Clone)]
pub struct SimulationInput {
    pub idea: Option<String>,
    pub audience: Option<String>,
    pub tone: Option<String>,
}

/// Drafts landing copy, an email, a demo script and ICP variants. The model
/// reply is returned verbatim.
pub struct SimulateMessages {
    generator: Dependency<dyn TextGenerator>,
    detector: Arc<dyn LocaleDetector>,
    timeout: Duration,
}

impl SimulateMessages {
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

    pub async fn execute(&self, input: SimulationInput) -> Result<String, AppError> {
        let idea = InputSanitizer::required_text(
            input.idea.as_deref(),
            MAX_IDEA_CHARS,
            "Idea or content is required",
        )?;
        let audience = InputSanitizer::optional_text(input.audience.as_deref(), MAX_AUDIENCE_CHARS);
        let tone = InputSanitizer::optional_text(input.tone.as_deref(), MAX_TONE_CHARS);
        let generator = self.generator.get()?;

        let locale = self.detector.detect(&idea);
        let request =
            message_simulator_request(&idea, audience.as_deref(), tone.as_deref(), locale);
        let reply = with_deadline(self.timeout, generator.generate(&request)).await?;

        tracing::info!("Simulated messages ({})", locale.code());
        Ok(reply.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::GenerationRequest;
    use crate::domain::DiacriticDetector;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            Ok("  {\"landingCopy\":{}}\n".to_string())
        }
    }

    #[tokio::test]
    async fn test_returns_trimmed_raw_reply_and_truncates_optionals() {
        let generator = Arc::new(RecordingGenerator::default());
        let simulate = SimulateMessages::new(
            Dependency::new("AI generation", Some(generator.clone() as Arc<dyn TextGenerator>)),
            Arc::new(DiacriticDetector),
            Duration::from_secs(1),
        );

        let result = simulate
            .execute(SimulationInput {
                idea: Some("Shift scheduling for clinics".to_string()),
                audience: Some("a".repeat(500)),
                tone: None,
            })
            .await
            .unwrap();

        assert_eq!(result, "{\"landingCopy\":{}}");
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains(&"a".repeat(120)));
        assert!(!prompts[0].contains(&"a".repeat(121)));
    }

    #[tokio::test]
    async fn test_requires_idea() {
        let simulate = SimulateMessages::new(
            Dependency::missing("AI generation"),
            Arc::new(DiacriticDetector),
            Duration::from_secs(1),
        );
        let err = simulate.execute(SimulationInput::default()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
