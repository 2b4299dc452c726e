use crate::extract::{lenient, JsonBody};
use crate::response::{Ack, ApiResponse};
use axum::extract::State;
use serde::Deserialize;
use validationly_app::AppContext;
use validationly_errors::AppError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistRequest {
    #[serde(default, deserialize_with = "lenient::scalar_string")]
    lp_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    email: Option<String>,
}

pub async fn join_waitlist(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<WaitlistRequest>,
) -> Result<ApiResponse<Ack>, AppError> {
    ctx.waitlist
        .join(body.lp_id.as_deref(), body.email.as_deref())
        .await?;
    Ok(ApiResponse(Ack {}))
}
