#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use validationly_api::create_app;
use validationly_app::application::ports::{
    CheckoutRequest, CheckoutSession, GenerationRequest, ListStore, PainStore, PaymentGateway,
    TextGenerator, UserStore,
};
use validationly_app::domain::{
    DocumentQuery, IdeaFilter, PainAnalysis, PainDocument, PainIdea, UserRecord,
};
use validationly_app::infrastructure::auth::TokenService;
use validationly_app::infrastructure::kv::MemoryListStore;
use validationly_app::infrastructure::security::RateLimiter;
use validationly_app::infrastructure::stripe::WebhookVerifier;
use validationly_app::{Adapters, AppContext, Settings};
use validationly_errors::AppError;

pub const JWT_SECRET: &str = "test-secret";
pub const WEBHOOK_SECRET: &str = "whsec_test";

/// Replies with a canned text and records every request.
#[derive(Default)]
pub struct FakeGenerator {
    pub reply: Mutex<String>,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    pub fn set_reply(&self, reply: &str) {
        *self.reply.lock().unwrap() = reply.to_string();
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.reply.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct FakePayments {
    pub requests: Mutex<Vec<CheckoutRequest>>,
}

#[async_trait]
impl PaymentGateway for FakePayments {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(CheckoutSession {
            id: "cs_test_123".to_string(),
            url: Some("https://checkout.stripe.com/c/pay/cs_test_123".to_string()),
        })
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    pub users: Mutex<HashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    pub fn get_user(&self, id: &str) -> Option<UserRecord> {
        self.users.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn upsert(&self, record: &UserRecord) -> Result<UserRecord, AppError> {
        let mut users = self.users.lock().unwrap();
        let mut record = record.clone();
        if let Some(existing) = users.get(&record.id) {
            if record.stripe_customer_id.is_none() {
                record.stripe_customer_id = existing.stripe_customer_id.clone();
            }
        }
        users.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_customer(&self, customer_id: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.stripe_customer_id.as_deref() == Some(customer_id))
            .cloned())
    }
}

#[derive(Default)]
pub struct FakePainStore {
    pub ideas: Mutex<Vec<PainIdea>>,
    pub documents: Mutex<Vec<PainDocument>>,
    pub filters: Mutex<Vec<IdeaFilter>>,
    pub queries: Mutex<Vec<DocumentQuery>>,
    pub analyses: Mutex<Vec<PainAnalysis>>,
}

#[async_trait]
impl PainStore for FakePainStore {
    async fn list_ideas(&self, filter: &IdeaFilter) -> Result<Vec<PainIdea>, AppError> {
        self.filters.lock().unwrap().push(filter.clone());
        Ok(self
            .ideas
            .lock()
            .unwrap()
            .iter()
            .take(filter.limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_documents(&self, query: &DocumentQuery) -> Result<Vec<PainDocument>, AppError> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn record_analysis(&self, analysis: &PainAnalysis) -> Result<(), AppError> {
        self.analyses.lock().unwrap().push(analysis.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub generator: Arc<FakeGenerator>,
    pub payments: Arc<FakePayments>,
    pub users: Arc<MemoryUserStore>,
    pub lists: Arc<MemoryListStore>,
    pub pain: Arc<FakePainStore>,
    pub tokens: Arc<TokenService>,
    pub verifier: Arc<WebhookVerifier>,
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_limiter(RateLimiter::new())
}

pub fn setup_test_app_with_limiter(rate_limiter: RateLimiter) -> TestApp {
    let generator = Arc::new(FakeGenerator::default());
    let payments = Arc::new(FakePayments::default());
    let users = Arc::new(MemoryUserStore::default());
    let lists = Arc::new(MemoryListStore::new());
    let pain = Arc::new(FakePainStore::default());
    let tokens = Arc::new(TokenService::new(JWT_SECRET));
    let verifier = Arc::new(WebhookVerifier::new(WEBHOOK_SECRET));

    let adapters = Adapters {
        generator: Some(generator.clone() as Arc<dyn TextGenerator>),
        tokens: Some(tokens.clone()),
        payments: Some(payments.clone() as Arc<dyn PaymentGateway>),
        webhook_verifier: Some(verifier.clone()),
        users: Some(users.clone() as Arc<dyn UserStore>),
        lists: Some(lists.clone() as Arc<dyn ListStore>),
        pain: Some(pain.clone() as Arc<dyn PainStore>),
        ..Adapters::default()
    };
    let settings = Settings {
        default_price_id: None,
        public_base_url: "https://validationly.com".to_string(),
        adapter_timeout: Duration::from_secs(5),
        rate_limiter,
    };

    TestApp {
        router: create_app(AppContext::new(adapters, settings)),
        generator,
        payments,
        users,
        lists,
        pain,
        tokens,
        verifier,
    }
}

/// App with no adapters configured at all.
pub fn setup_bare_app() -> Router {
    create_app(AppContext::new(Adapters::default(), Settings::default()))
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends one request and returns the status with the body parsed as JSON
/// (`Value::Null` for an empty body).
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let body = serde_json::from_slice(&bytes).expect("Failed to parse JSON");
    (status, body)
}
