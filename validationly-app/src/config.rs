use crate::infrastructure::gemini::DEFAULT_MODEL;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PUBLIC_BASE_URL: &str = "https://validationly.com";
const DEFAULT_ADAPTER_TIMEOUT_SECS: u64 = 30;
const INSECURE_JWT_SECRET: &str = "dev-super-secret-change-in-production";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("JWT_SECRET is set to the public development value; choose a real secret")]
    InsecureJwtSecret,

    #[error("{0} is set without {1}")]
    Incomplete(&'static str, &'static str),
}

#[derive(Clone)]
pub struct StripeConfig {
    pub secret_key: Option<String>,
    pub webhook_secret: Option<String>,
    pub price_id: Option<String>,
}

#[derive(Clone)]
pub struct KvConfig {
    pub url: String,
    pub token: String,
}

/// Process configuration. Absent optional secrets leave their adapter
/// unconfigured.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub public_base_url: String,
    pub jwt_secret: Option<String>,
    pub stripe: StripeConfig,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub feedback_webhook_url: Option<String>,
    pub kv: Option<KvConfig>,
    pub database_url: Option<String>,
    pub adapter_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("'{}' is not a port number", raw),
            })?,
            None => DEFAULT_PORT,
        };

        let adapter_timeout = match get("ADAPTER_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "ADAPTER_TIMEOUT_SECS",
                        reason: format!("'{}' is not a positive number of seconds", raw),
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_ADAPTER_TIMEOUT_SECS),
        };

        let jwt_secret = get("JWT_SECRET");
        if jwt_secret.as_deref() == Some(INSECURE_JWT_SECRET) {
            return Err(ConfigError::InsecureJwtSecret);
        }

        let public_base_url = match get("PUBLIC_BASE_URL") {
            Some(raw) => validate_url("PUBLIC_BASE_URL", &raw)?,
            None => DEFAULT_PUBLIC_BASE_URL.to_string(),
        };

        let feedback_webhook_url = get("FEEDBACK_WEBHOOK_URL")
            .or_else(|| get("SLACK_WEBHOOK_URL"))
            .map(|raw| validate_url("FEEDBACK_WEBHOOK_URL", &raw))
            .transpose()?;

        let kv = match (get("KV_REST_API_URL"), get("KV_REST_API_TOKEN")) {
            (Some(url), Some(token)) => Some(KvConfig {
                url: validate_url("KV_REST_API_URL", &url)?,
                token,
            }),
            (Some(_), None) => {
                return Err(ConfigError::Incomplete("KV_REST_API_URL", "KV_REST_API_TOKEN"))
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete("KV_REST_API_TOKEN", "KV_REST_API_URL"))
            }
            (None, None) => None,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            public_base_url,
            jwt_secret,
            stripe: StripeConfig {
                secret_key: get("STRIPE_SECRET_KEY"),
                webhook_secret: get("STRIPE_WEBHOOK_SECRET"),
                price_id: get("STRIPE_PRICE_ID"),
            },
            gemini_api_key: get("GEMINI_API_KEY").or_else(|| get("GOOGLE_API_KEY")),
            gemini_model: get("GEMINI_MODEL_PRIMARY").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            feedback_webhook_url,
            kv,
            database_url: get("DATABASE_URL"),
            adapter_timeout,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Logs which adapters are available without printing secrets.
    pub fn log_summary(&self) {
        let state = |configured: bool| if configured { "configured" } else { "not configured" };
        tracing::info!("AI generation ({}): {}", self.gemini_model, state(self.gemini_api_key.is_some()));
        tracing::info!("Token signing: {}", state(self.jwt_secret.is_some()));
        tracing::info!("Stripe checkout: {}", state(self.stripe.secret_key.is_some()));
        tracing::info!("Stripe webhook: {}", state(self.stripe.webhook_secret.is_some()));
        tracing::info!("List store: {}", state(self.kv.is_some()));
        tracing::info!("Database: {}", state(self.database_url.is_some()));
        tracing::info!("Feedback notifications: {}", state(self.feedback_webhook_url.is_some()));
    }
}

fn validate_url(name: &'static str, raw: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(raw).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            name,
            reason: "only http and https are allowed".to_string(),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.adapter_timeout, Duration::from_secs(30));
        assert!(config.jwt_secret.is_none());
        assert!(config.kv.is_none());
    }

    #[test]
    fn test_refuses_development_secret() {
        let err = config(&[("JWT_SECRET", "dev-super-secret-change-in-production")]);
        assert!(matches!(err, Err(ConfigError::InsecureJwtSecret)));
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("ADAPTER_TIMEOUT_SECS", "0")]).is_err());
        assert!(config(&[("PUBLIC_BASE_URL", "not a url")]).is_err());
        assert!(config(&[("KV_REST_API_URL", "https://kv.example.com")]).is_err());
    }

    #[test]
    fn test_fallback_variables() {
        let config = config(&[
            ("GOOGLE_API_KEY", "g-key"),
            ("SLACK_WEBHOOK_URL", "https://hooks.slack.com/services/x"),
            ("PUBLIC_BASE_URL", "https://app.example.com/"),
        ])
        .unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("g-key"));
        assert_eq!(
            config.feedback_webhook_url.as_deref(),
            Some("https://hooks.slack.com/services/x")
        );
        assert_eq!(config.public_base_url, "https://app.example.com");
    }
}
