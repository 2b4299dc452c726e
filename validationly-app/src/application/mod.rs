mod auth;
mod billing;
mod bounded_list;
mod feedback;
mod pain_mining;
pub mod ports;
mod simulate_messages;
mod validate_idea;
mod waitlist;

pub use auth::{AuthService, TrialGrant};
pub use billing::{Billing, BillingEvent, CheckoutInput};
pub use bounded_list::BoundedList;
pub use feedback::{FeedbackBoard, FeedbackInput};
pub use pain_mining::{PainMining, PainRequest};
pub use simulate_messages::{SimulateMessages, SimulationInput};
pub use validate_idea::ValidateIdea;
pub use waitlist::Waitlist;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use validationly_errors::AppError;

/// An adapter that may be absent from the running configuration.
pub struct Dependency<T: ?Sized> {
    name: &'static str,
    inner: Option<Arc<T>>,
}

impl<T: ?Sized> Dependency<T> {
    pub fn new(name: &'static str, inner: Option<Arc<T>>) -> Self {
        Self { name, inner }
    }

    pub fn missing(name: &'static str) -> Self {
        Self { name, inner: None }
    }

    /// Fails with `NotConfigured` when the adapter was not provided.
    pub fn get(&self) -> Result<&T, AppError> {
        self.inner.as_deref().ok_or(AppError::NotConfigured(self.name))
    }

    pub fn optional(&self) -> Option<&T> {
        self.inner.as_deref()
    }
}

impl<T: ?Sized> Clone for Dependency<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: self.inner.clone(),
        }
    }
}

pub async fn with_deadline<T, F>(limit: Duration, call: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| AppError::Timeout(limit))?
}
