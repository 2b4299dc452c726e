use crate::extract::{lenient, AuthUser, JsonBody};
use crate::response::ApiResponse;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use validationly_app::application::CheckoutInput;
use validationly_app::AppContext;
use validationly_errors::AppError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default, deserialize_with = "lenient::string")]
    price_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    success_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    cancel_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    session_id: String,
    url: Option<String>,
}

#[derive(Serialize)]
pub struct WebhookResponse {
    received: bool,
}

pub async fn create_checkout(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    JsonBody(body): JsonBody<CheckoutRequest>,
) -> Result<ApiResponse<CheckoutResponse>, AppError> {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let session = ctx
        .billing
        .create_checkout(
            &user,
            CheckoutInput {
                price_id: body.price_id,
                success_url: body.success_url,
                cancel_url: body.cancel_url,
                origin,
            },
        )
        .await?;

    Ok(ApiResponse(CheckoutResponse {
        session_id: session.id,
        url: session.url,
    }))
}

/// Stripe webhook. The raw body is needed for signature verification.
pub async fn webhook(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ApiResponse<WebhookResponse>, AppError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok());
    ctx.billing.handle_webhook(&body, signature).await?;
    Ok(ApiResponse(WebhookResponse { received: true }))
}
