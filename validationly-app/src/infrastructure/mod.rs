pub mod auth;
pub mod db;
pub mod gemini;
pub mod kv;
pub mod notifier;
pub mod security;
pub mod stripe;
