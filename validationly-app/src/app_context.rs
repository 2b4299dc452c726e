use crate::application::ports::{ListStore, PainStore, PaymentGateway, TextGenerator, UserStore};
use crate::application::{
    AuthService, Billing, Dependency, FeedbackBoard, PainMining, SimulateMessages, ValidateIdea,
    Waitlist,
};
use crate::config::AppConfig;
use crate::domain::{DiacriticDetector, LocaleDetector};
use crate::infrastructure::auth::TokenService;
use crate::infrastructure::db::{self, PainRepository, UserRepository};
use crate::infrastructure::gemini::GeminiClient;
use crate::infrastructure::kv::UpstashListStore;
use crate::infrastructure::notifier::FeedbackNotifier;
use crate::infrastructure::security::RateLimiter;
use crate::infrastructure::stripe::{StripeClient, WebhookVerifier};
use std::sync::Arc;
use std::time::Duration;
use validationly_errors::AppError;

/// External adapters. `None` means the adapter is not configured.
pub struct Adapters {
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub tokens: Option<Arc<TokenService>>,
    pub payments: Option<Arc<dyn PaymentGateway>>,
    pub webhook_verifier: Option<Arc<WebhookVerifier>>,
    pub users: Option<Arc<dyn UserStore>>,
    pub lists: Option<Arc<dyn ListStore>>,
    pub pain: Option<Arc<dyn PainStore>>,
    pub notifier: Option<Arc<FeedbackNotifier>>,
    pub locale_detector: Arc<dyn LocaleDetector>,
}

impl Default for Adapters {
    fn default() -> Self {
        Self {
            generator: None,
            tokens: None,
            payments: None,
            webhook_verifier: None,
            users: None,
            lists: None,
            pain: None,
            notifier: None,
            locale_detector: Arc::new(DiacriticDetector),
        }
    }
}

#[derive(Clone)]
pub struct Settings {
    pub default_price_id: Option<String>,
    pub public_base_url: String,
    pub adapter_timeout: Duration,
    pub rate_limiter: RateLimiter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_price_id: None,
            public_base_url: "https://validationly.com".to_string(),
            adapter_timeout: Duration::from_secs(30),
            rate_limiter: RateLimiter::new(),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub validate_idea: Arc<ValidateIdea>,
    pub simulate_messages: Arc<SimulateMessages>,
    pub auth: Arc<AuthService>,
    pub billing: Arc<Billing>,
    pub feedback: Arc<FeedbackBoard>,
    pub waitlist: Arc<Waitlist>,
    pub pain_mining: Arc<PainMining>,
    pub rate_limiter: RateLimiter,
}

impl AppContext {
    pub fn new(adapters: Adapters, settings: Settings) -> Self {
        let timeout = settings.adapter_timeout;
        let generator = Dependency::new("AI generation", adapters.generator);
        let tokens = Dependency::new("Token signing", adapters.tokens);
        let users = Dependency::new("User store", adapters.users);
        let lists = Dependency::new("List store", adapters.lists);

        Self {
            validate_idea: Arc::new(ValidateIdea::new(
                generator.clone(),
                adapters.locale_detector.clone(),
                timeout,
            )),
            simulate_messages: Arc::new(SimulateMessages::new(
                generator,
                adapters.locale_detector,
                timeout,
            )),
            auth: Arc::new(AuthService::new(tokens, users.clone(), timeout)),
            billing: Arc::new(Billing::new(
                Dependency::new("Stripe", adapters.payments),
                Dependency::new("Stripe webhook", adapters.webhook_verifier),
                users,
                settings.default_price_id,
                settings.public_base_url,
                timeout,
            )),
            feedback: Arc::new(FeedbackBoard::new(lists.clone(), adapters.notifier, timeout)),
            waitlist: Arc::new(Waitlist::new(lists, timeout)),
            pain_mining: Arc::new(PainMining::new(
                Dependency::new("Database", adapters.pain),
                timeout,
            )),
            rate_limiter: settings.rate_limiter,
        }
    }

    /// Builds the production adapters. Connects to the database (and applies
    /// the schema) when `DATABASE_URL` is set.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        config.log_summary();

        let mut adapters = Adapters {
            generator: config.gemini_api_key.clone().map(|key| {
                Arc::new(GeminiClient::new(key, config.gemini_model.clone())) as Arc<dyn TextGenerator>
            }),
            tokens: config
                .jwt_secret
                .as_deref()
                .map(|secret| Arc::new(TokenService::new(secret))),
            payments: config.stripe.secret_key.clone().map(|key| {
                Arc::new(StripeClient::new(key)) as Arc<dyn PaymentGateway>
            }),
            webhook_verifier: config
                .stripe
                .webhook_secret
                .clone()
                .map(|secret| Arc::new(WebhookVerifier::new(secret))),
            lists: config.kv.as_ref().map(|kv| {
                Arc::new(UpstashListStore::new(kv.url.clone(), kv.token.clone()))
                    as Arc<dyn ListStore>
            }),
            notifier: config
                .feedback_webhook_url
                .clone()
                .map(|url| Arc::new(FeedbackNotifier::new(url))),
            ..Adapters::default()
        };

        if let Some(database_url) = &config.database_url {
            let conn = db::create_connection(database_url)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            db::run_migrations(&conn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            tracing::info!("Connected to database");

            adapters.users = Some(Arc::new(UserRepository::new(conn.clone())));
            adapters.pain = Some(Arc::new(PainRepository::new(conn)));
        }

        Ok(Self::new(
            adapters,
            Settings {
                default_price_id: config.stripe.price_id.clone(),
                public_base_url: config.public_base_url.clone(),
                adapter_timeout: config.adapter_timeout,
                rate_limiter: RateLimiter::new(),
            },
        ))
    }
}
