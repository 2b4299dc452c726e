use crate::extract::{lenient, ClientIp, JsonBody};
use crate::response::ApiResponse;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validationly_app::application::SimulationInput;
use validationly_app::AppContext;
use validationly_errors::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct SimulateRequest {
    #[serde(default, deserialize_with = "lenient::string")]
    idea: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    content: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    audience: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    tone: Option<String>,
}

#[derive(Serialize)]
pub struct SimulateResponse {
    result: String,
}

pub async fn simulate_messages(
    State(ctx): State<AppContext>,
    ClientIp(ip): ClientIp,
    JsonBody(body): JsonBody<SimulateRequest>,
) -> Result<ApiResponse<SimulateResponse>, AppError> {
    ctx.rate_limiter.check_rate_limit(&ip)?;

    let input = SimulationInput {
        idea: body.idea.filter(|i| !i.trim().is_empty()).or(body.content),
        audience: body.audience,
        tone: body.tone,
    };
    let result = ctx.simulate_messages.execute(input).await?;

    Ok(ApiResponse(SimulateResponse { result }))
}
