use super::ports::{CheckoutRequest, CheckoutSession, PaymentGateway, UserStore};
use super::{with_deadline, Dependency};
use crate::domain::{Plan, UserClaims, UserRecord};
use crate::infrastructure::stripe::types::{CheckoutSessionObject, StripeEvent, SubscriptionObject};
use crate::infrastructure::stripe::WebhookVerifier;
use std::time::Duration;
use validationly_errors::AppError;

#[derive(Debug, Default, Clone)]
pub struct CheckoutInput {
    pub price_id: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
    /// Value of the request's `Origin` header.
    pub origin: Option<String>,
}

/// What a webhook delivery changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingEvent {
    PlanChanged { user_id: String, plan: Plan },
    Ignored(String),
}

pub struct Billing {
    payments: Dependency<dyn PaymentGateway>,
    verifier: Dependency<WebhookVerifier>,
    users: Dependency<dyn UserStore>,
    default_price_id: Option<String>,
    public_base_url: String,
    timeout: Duration,
}

impl Billing {
    pub fn new(
        payments: Dependency<dyn PaymentGateway>,
        verifier: Dependency<WebhookVerifier>,
        users: Dependency<dyn UserStore>,
        default_price_id: Option<String>,
        public_base_url: String,
        timeout: Duration,
    ) -> Self {
        Self {
            payments,
            verifier,
            users,
            default_price_id,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub async fn create_checkout(
        &self,
        user: &UserClaims,
        input: CheckoutInput,
    ) -> Result<CheckoutSession, AppError> {
        let payments = self.payments.get()?;
        let price_id = input
            .price_id
            .filter(|p| !p.trim().is_empty())
            .or_else(|| self.default_price_id.clone())
            .ok_or_else(|| AppError::InvalidInput("Price ID is required".to_string()))?;

        let origin = input
            .origin
            .filter(|o| !o.trim().is_empty())
            .map(|o| o.trim_end_matches('/').to_string())
            .unwrap_or_else(|| self.public_base_url.clone());

        let request = CheckoutRequest {
            price_id,
            success_url: input
                .success_url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| format!("{}/dashboard?success=true", origin)),
            cancel_url: input
                .cancel_url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| format!("{}/pricing?canceled=true", origin)),
            customer_email: user.email.clone(),
            user_id: user.id.clone(),
        };

        let session = with_deadline(self.timeout, payments.create_checkout_session(&request)).await?;
        tracing::info!("Created checkout session {} for user {}", session.id, user.id);
        Ok(session)
    }

    /// Verifies the signature over the raw body, then applies the event.
    pub async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<BillingEvent, AppError> {
        let verifier = self.verifier.get()?;
        let users = self.users.get()?;
        verifier.verify(payload, signature)?;

        let event: StripeEvent = serde_json::from_slice(payload)
            .map_err(|_| AppError::InvalidInput("Invalid event payload".to_string()))?;
        tracing::info!("Stripe event {} ({})", event.id, event.event_type);

        let outcome = match event.event_type.as_str() {
            "checkout.session.completed" => {
                let session: CheckoutSessionObject =
                    serde_json::from_value(event.data.object).unwrap_or_default();
                self.complete_checkout(users, session).await?
            }
            "customer.subscription.updated" | "customer.subscription.deleted" => {
                let subscription: SubscriptionObject =
                    serde_json::from_value(event.data.object).unwrap_or_default();
                let plan = if event.event_type.ends_with("updated") && subscription.is_entitled() {
                    Plan::Pro
                } else {
                    Plan::Free
                };
                self.set_customer_plan(users, subscription.customer.as_deref(), plan)
                    .await?
            }
            other => {
                tracing::debug!("Unhandled Stripe event type {}", other);
                BillingEvent::Ignored(other.to_string())
            }
        };

        Ok(outcome)
    }

    async fn complete_checkout(
        &self,
        users: &dyn UserStore,
        session: CheckoutSessionObject,
    ) -> Result<BillingEvent, AppError> {
        let (Some(user_id), Some(email)) = (
            session.metadata.get("userId").cloned(),
            session.metadata.get("email").cloned(),
        ) else {
            tracing::warn!("Checkout completed without user metadata");
            return Ok(BillingEvent::Ignored("checkout.session.completed".to_string()));
        };

        let record = UserRecord::new(user_id.clone(), email, Plan::Pro)
            .with_customer(session.customer);
        with_deadline(self.timeout, users.upsert(&record)).await?;
        tracing::info!("User {} upgraded to pro", user_id);

        Ok(BillingEvent::PlanChanged {
            user_id,
            plan: Plan::Pro,
        })
    }

    async fn set_customer_plan(
        &self,
        users: &dyn UserStore,
        customer_id: Option<&str>,
        plan: Plan,
    ) -> Result<BillingEvent, AppError> {
        let Some(customer_id) = customer_id else {
            tracing::warn!("Subscription event without customer id");
            return Ok(BillingEvent::Ignored("subscription without customer".to_string()));
        };

        let Some(mut record) =
            with_deadline(self.timeout, users.find_by_customer(customer_id)).await?
        else {
            tracing::warn!("No user for Stripe customer {}", customer_id);
            return Ok(BillingEvent::Ignored(format!("unknown customer {}", customer_id)));
        };

        record.plan = plan;
        with_deadline(self.timeout, users.upsert(&record)).await?;
        tracing::info!("User {} plan set to {}", record.id, plan);

        Ok(BillingEvent::PlanChanged {
            user_id: record.id,
            plan,
        })
    }
}
