//! Adapter seams. Use cases hold these behind `Arc<dyn _>` so tests can swap
//! in fakes.

use crate::domain::{DocumentQuery, IdeaFilter, PainAnalysis, PainDocument, PainIdea, UserRecord};
use async_trait::async_trait;
use validationly_errors::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub json_response: bool,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
    pub customer_email: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn upsert(&self, record: &UserRecord) -> Result<UserRecord, AppError>;
    async fn find_by_customer(&self, customer_id: &str) -> Result<Option<UserRecord>, AppError>;
}

/// Redis-style list operations. `range` is inclusive on both ends.
#[async_trait]
pub trait ListStore: Send + Sync {
    async fn push(&self, key: &str, item: &str) -> Result<(), AppError>;
    async fn trim(&self, key: &str, max_len: usize) -> Result<(), AppError>;
    async fn range(&self, key: &str, start: usize, end: usize) -> Result<Vec<String>, AppError>;
}

#[async_trait]
pub trait PainStore: Send + Sync {
    async fn list_ideas(&self, filter: &IdeaFilter) -> Result<Vec<PainIdea>, AppError>;
    async fn fetch_documents(&self, query: &DocumentQuery) -> Result<Vec<PainDocument>, AppError>;
    async fn record_analysis(&self, analysis: &PainAnalysis) -> Result<(), AppError>;
}
