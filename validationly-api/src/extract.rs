use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::{header, request::Parts, HeaderMap};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::convert::Infallible;
use validationly_app::domain::UserClaims;
use validationly_app::AppContext;
use validationly_errors::AppError;

/// JSON body parsed leniently: an empty or `null` body yields
/// `T::default()`, anything that is not a JSON object is a 400.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Unreadable request body: {}", e);
            AppError::InvalidInput("Invalid request body".to_string())
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!("Malformed JSON body: {}", e);
            AppError::InvalidInput("Invalid JSON body".to_string())
        })?;
        if value.is_null() {
            return Ok(Self(T::default()));
        }
        if !value.is_object() {
            tracing::debug!("JSON body is not an object");
            return Err(AppError::InvalidInput("Invalid JSON body".to_string()));
        }

        serde_json::from_value(value).map(Self).map_err(|e| {
            tracing::debug!("Unexpected JSON body shape: {}", e);
            AppError::InvalidInput("Invalid JSON body".to_string())
        })
    }
}

/// Claims of a verified `Authorization: Bearer` token.
pub struct AuthUser(pub UserClaims);

impl FromRequestParts<AppContext> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        state.auth.authenticate(authorization).map(AuthUser)
    }
}

/// Caller address as reported by the proxy in front of the service.
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(client_ip(&parts.headers)))
    }
}

pub fn client_ip(headers: &HeaderMap) -> String {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header_value("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header_value("x-real-ip"))
        .unwrap_or("unknown")
        .to_string()
}

/// Field deserializers that treat a value of the wrong JSON type as absent.
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    /// Strings and numbers, the latter rendered as text.
    pub fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            _ => None,
        })
    }

    /// String elements of an array; anything else yields an empty list.
    pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => vec![],
        })
    }
}
