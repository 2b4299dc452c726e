use super::ports::ListStore;
use super::{with_deadline, BoundedList, Dependency};
use crate::domain::{FeedbackItem, FEEDBACK_LIST_CAP};
use crate::infrastructure::notifier::FeedbackNotifier;
use crate::infrastructure::security::InputSanitizer;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use validationly_errors::AppError;

const FEEDBACK_KEY: &str = "feedback";

#[derive(Debug, Default, Clone)]
pub struct FeedbackInput {
    pub message: Option<String>,
    pub contact: Option<String>,
    pub score: Option<f64>,
}

pub struct FeedbackBoard {
    lists: Dependency<dyn ListStore>,
    notifier: Option<Arc<FeedbackNotifier>>,
    timeout: Duration,
}

impl FeedbackBoard {
    pub fn new(
        lists: Dependency<dyn ListStore>,
        notifier: Option<Arc<FeedbackNotifier>>,
        timeout: Duration,
    ) -> Self {
        Self {
            lists,
            notifier,
            timeout,
        }
    }

    pub async fn submit(&self, input: FeedbackInput) -> Result<FeedbackItem, AppError> {
        let message = input.message.as_deref().map(str::trim).unwrap_or_default();
        if message.chars().count() < FeedbackItem::MIN_MESSAGE_CHARS {
            return Err(AppError::InvalidInput("Invalid feedback".to_string()));
        }

        let item = FeedbackItem {
            message: InputSanitizer::truncate_chars(message, FeedbackItem::MAX_MESSAGE_CHARS),
            contact: InputSanitizer::optional_text(
                input.contact.as_deref(),
                FeedbackItem::MAX_CONTACT_CHARS,
            ),
            score: InputSanitizer::clamp_score(input.score, FeedbackItem::MAX_SCORE),
            timestamp: Utc::now(),
        };

        let store = self.lists.get()?;
        let list = BoundedList::new(store, FEEDBACK_KEY, FEEDBACK_LIST_CAP);
        with_deadline(self.timeout, list.append(&item)).await?;
        tracing::info!("Stored feedback ({} chars)", item.message.chars().count());

        if let Some(notifier) = &self.notifier {
            notifier.notify_detached(item.clone());
        }
        Ok(item)
    }

    /// Most recent feedback, newest first.
    pub async fn recent(&self) -> Result<Vec<FeedbackItem>, AppError> {
        let store = self.lists.get()?;
        let list: BoundedList<'_, FeedbackItem> =
            BoundedList::new(store, FEEDBACK_KEY, FEEDBACK_LIST_CAP);
        with_deadline(self.timeout, list.recent()).await
    }
}
