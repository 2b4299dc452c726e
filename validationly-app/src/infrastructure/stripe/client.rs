use super::types::CheckoutSessionResponse;
use crate::application::ports::{CheckoutRequest, CheckoutSession, PaymentGateway};
use async_trait::async_trait;
use validationly_errors::AppError;

const STRIPE_API_URL: &str = "https://api.stripe.com/v1";
const STRIPE_API_VERSION: &str = "2024-06-20";

pub struct StripeClient {
    http_client: reqwest::Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            secret_key,
        }
    }

    fn checkout_form(request: &CheckoutRequest) -> Vec<(&'static str, String)> {
        vec![
            ("mode", "subscription".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][price]", request.price_id.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("customer_email", request.customer_email.clone()),
            ("success_url", request.success_url.clone()),
            ("cancel_url", request.cancel_url.clone()),
            ("metadata[userId]", request.user_id.clone()),
            ("metadata[email]", request.customer_email.clone()),
            ("subscription_data[metadata][userId]", request.user_id.clone()),
            ("subscription_data[metadata][email]", request.customer_email.clone()),
        ]
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, AppError> {
        let response = self
            .http_client
            .post(format!("{}/checkout/sessions", STRIPE_API_URL))
            .bearer_auth(&self.secret_key)
            .header("Stripe-Version", STRIPE_API_VERSION)
            .form(&Self::checkout_form(request))
            .send()
            .await
            .map_err(|e| AppError::Payment(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Stripe error: {} - {}", status, body);
            return Err(AppError::Payment(format!("API error: {}", status)));
        }

        let session: CheckoutSessionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Payment(e.to_string()))?;

        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
        })
    }
}
