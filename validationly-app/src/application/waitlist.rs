use super::ports::ListStore;
use super::{with_deadline, BoundedList, Dependency};
use crate::domain::{WaitlistEntry, WAITLIST_CAP};
use crate::infrastructure::security::InputSanitizer;
use chrono::Utc;
use std::time::Duration;
use validationly_errors::AppError;

const MAX_LP_ID_CHARS: usize = 120;

/// Per landing page signup lists.
pub struct Waitlist {
    lists: Dependency<dyn ListStore>,
    timeout: Duration,
}

impl Waitlist {
    pub fn new(lists: Dependency<dyn ListStore>, timeout: Duration) -> Self {
        Self { lists, timeout }
    }

    pub async fn join(
        &self,
        lp_id: Option<&str>,
        email: Option<&str>,
    ) -> Result<WaitlistEntry, AppError> {
        let invalid = || AppError::InvalidInput("Valid lpId and email are required".to_string());
        let lp_id = InputSanitizer::optional_text(lp_id, MAX_LP_ID_CHARS).ok_or_else(invalid)?;
        let email = InputSanitizer::email(email).ok_or_else(invalid)?;

        let entry = WaitlistEntry {
            lp_id,
            email,
            ts: Utc::now(),
        };

        let store = self.lists.get()?;
        let list = BoundedList::new(store, WaitlistEntry::list_key(&entry.lp_id), WAITLIST_CAP);
        with_deadline(self.timeout, list.append(&entry)).await?;
        tracing::info!("Waitlist signup for landing page {}", entry.lp_id);
        Ok(entry)
    }

    pub async fn entries(&self, lp_id: &str) -> Result<Vec<WaitlistEntry>, AppError> {
        let store = self.lists.get()?;
        let list: BoundedList<'_, WaitlistEntry> =
            BoundedList::new(store, WaitlistEntry::list_key(lp_id), WAITLIST_CAP);
        with_deadline(self.timeout, list.recent()).await
    }
}
