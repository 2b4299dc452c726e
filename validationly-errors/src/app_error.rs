use std::time::Duration;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid webhook signature: {0}")]
    InvalidSignature(String),

    #[error("Route not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Rate limit exceeded, retry in {}s", .0.as_secs())]
    RateLimited(Duration),

    #[error("{0} not configured")]
    NotConfigured(&'static str),

    #[error("AI generation failed: {0}")]
    Generation(String),

    #[error("Payment provider error: {0}")]
    Payment(String),

    #[error("List store error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Upstream call timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message safe to show to the caller. Adapter details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::InvalidSignature(_) => "Invalid signature".to_string(),
            Self::NotFound => "Not found".to_string(),
            Self::MethodNotAllowed => "Method not allowed".to_string(),
            Self::RateLimited(_) => "Rate limit exceeded. Please try again later.".to_string(),
            Self::NotConfigured(what) => format!("{what} not configured"),
            Self::Generation(_) => "Analysis failed. Please try again later.".to_string(),
            Self::Payment(_) => "Payment provider request failed".to_string(),
            Self::Storage(_) | Self::Database(_) => "Storage is temporarily unavailable".to_string(),
            Self::Timeout(_) => "Upstream service timed out. Please try again.".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::NotConfigured(_)
                | Self::Generation(_)
                | Self::Payment(_)
                | Self::Storage(_)
                | Self::Database(_)
                | Self::Timeout(_)
                | Self::Internal(_)
        )
    }
}

#[cfg(feature = "http")]
mod http_impl {
    use super::AppError;
    use axum::http::{header, HeaderValue, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        ok: bool,
        error: &'static str,
        message: String,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::InvalidInput(_) | AppError::InvalidSignature(_) => {
                    StatusCode::BAD_REQUEST
                }
                AppError::Unauthorized => StatusCode::UNAUTHORIZED,
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
                AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                AppError::NotConfigured(_)
                | AppError::Generation(_)
                | AppError::Payment(_)
                | AppError::Storage(_)
                | AppError::Database(_)
                | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            if self.is_server_error() {
                tracing::error!(status = status.as_u16(), "{}", self);
            } else {
                tracing::debug!(status = status.as_u16(), "{}", self);
            }

            let body = ErrorResponse {
                ok: false,
                error: status.canonical_reason().unwrap_or("Error"),
                message: self.user_message(),
            };
            let mut response = (status, Json(body)).into_response();

            if let AppError::RateLimited(retry_after) = &self {
                if let Ok(value) = HeaderValue::from_str(&retry_after.as_secs().to_string()) {
                    response.headers_mut().insert(header::RETRY_AFTER, value);
                }
            }
            response
        }
    }
}
