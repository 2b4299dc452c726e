use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct CheckoutSessionResponse {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Deserialize)]
pub struct EventData {
    pub object: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckoutSessionObject {
    pub customer: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionObject {
    pub customer: Option<String>,
    pub status: Option<String>,
}

impl SubscriptionObject {
    pub fn is_entitled(&self) -> bool {
        matches!(self.status.as_deref(), Some("active") | Some("trialing"))
    }
}
