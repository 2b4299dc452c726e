mod client;
mod signature;
pub mod types;

pub use client::StripeClient;
pub use signature::WebhookVerifier;
