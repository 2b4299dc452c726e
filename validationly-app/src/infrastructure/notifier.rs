use crate::domain::FeedbackItem;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use validationly_errors::AppError;

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
struct FeedbackPayload<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
    contact: Option<&'a str>,
    score: Option<u8>,
    timestamp: String,
}

/// Posts new feedback to an outbound webhook (Slack-compatible).
pub struct FeedbackNotifier {
    http_client: reqwest::Client,
    webhook_url: String,
}

impl FeedbackNotifier {
    pub fn new(webhook_url: String) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(NOTIFY_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            webhook_url,
        }
    }

    pub async fn notify(&self, item: &FeedbackItem) -> Result<(), AppError> {
        let payload = FeedbackPayload {
            kind: "validationly_feedback",
            text: &item.message,
            contact: item.contact.as_deref(),
            score: item.score,
            timestamp: item.timestamp.to_rfc3339(),
        };

        let response = self
            .http_client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("feedback webhook: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "feedback webhook returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Fire-and-forget delivery. Failures are logged only.
    pub fn notify_detached(self: &Arc<Self>, item: FeedbackItem) {
        let notifier = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&item).await {
                tracing::warn!("Feedback notification failed: {}", e);
            }
        });
    }
}
