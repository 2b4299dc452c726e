use crate::extract::{lenient, JsonBody};
use crate::response::ApiResponse;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validationly_app::domain::TrialUser;
use validationly_app::AppContext;
use validationly_errors::AppError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTokenRequest {
    #[serde(default, deserialize_with = "lenient::string")]
    email: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar_string")]
    user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StartTrialRequest {
    #[serde(default, deserialize_with = "lenient::string")]
    email: Option<String>,
}

#[derive(Serialize)]
pub struct TokenResponse {
    token: String,
}

#[derive(Serialize)]
pub struct TrialResponse {
    token: String,
    user: TrialUser,
}

pub async fn issue_token(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<IssueTokenRequest>,
) -> Result<ApiResponse<TokenResponse>, AppError> {
    let token = ctx
        .auth
        .issue_token(body.email.as_deref(), body.user_id.as_deref())?;
    Ok(ApiResponse(TokenResponse { token }))
}

pub async fn start_trial(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<StartTrialRequest>,
) -> Result<ApiResponse<TrialResponse>, AppError> {
    let grant = ctx.auth.start_trial(body.email.as_deref()).await?;
    Ok(ApiResponse(TrialResponse {
        token: grant.token,
        user: grant.user,
    }))
}
