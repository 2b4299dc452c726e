use crate::application::ports::ListStore;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use validationly_errors::AppError;

/// List store speaking the Upstash / Vercel KV REST protocol: one command per
/// POST, encoded as a JSON array.
pub struct UpstashListStore {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
}

#[derive(Deserialize)]
struct CommandResponse {
    #[serde(default)]
    result: Value,
    error: Option<String>,
}

impl UpstashListStore {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    async fn command(&self, args: Value) -> Result<Value, AppError> {
        let response = self
            .http_client
            .post(&self.base_url)
            .bearer_auth(&self.token)
            .json(&args)
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("KV store error: {} - {}", status, body);
            return Err(AppError::Storage(format!("API error: {}", status)));
        }

        let reply: CommandResponse = response
            .json()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        match reply.error {
            Some(err) => Err(AppError::Storage(err)),
            None => Ok(reply.result),
        }
    }
}

#[async_trait]
impl ListStore for UpstashListStore {
    async fn push(&self, key: &str, item: &str) -> Result<(), AppError> {
        self.command(json!(["LPUSH", key, item])).await.map(|_| ())
    }

    async fn trim(&self, key: &str, max_len: usize) -> Result<(), AppError> {
        let stop = max_len.saturating_sub(1);
        self.command(json!(["LTRIM", key, 0, stop])).await.map(|_| ())
    }

    async fn range(&self, key: &str, start: usize, end: usize) -> Result<Vec<String>, AppError> {
        let result = self.command(json!(["LRANGE", key, start, end])).await?;
        match result {
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect()),
            Value::Null => Ok(vec![]),
            other => Err(AppError::Storage(format!(
                "unexpected LRANGE reply: {}",
                other
            ))),
        }
    }
}
