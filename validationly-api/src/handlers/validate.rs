use crate::extract::{lenient, ClientIp, JsonBody};
use crate::response::ApiResponse;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validationly_app::domain::ValidationResult;
use validationly_app::AppContext;
use validationly_errors::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct ValidateRequest {
    #[serde(default, deserialize_with = "lenient::string")]
    idea: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    content: Option<String>,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    result: ValidationResult,
}

pub async fn validate_idea(
    State(ctx): State<AppContext>,
    ClientIp(ip): ClientIp,
    JsonBody(body): JsonBody<ValidateRequest>,
) -> Result<ApiResponse<ValidateResponse>, AppError> {
    ctx.rate_limiter.check_rate_limit(&ip)?;

    let idea = body
        .idea
        .filter(|i| !i.trim().is_empty())
        .or(body.content);
    let result = ctx.validate_idea.execute(idea.as_deref()).await?;

    Ok(ApiResponse(ValidateResponse { result }))
}
