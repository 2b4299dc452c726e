use crate::extract::{lenient, JsonBody};
use crate::response::{Ack, ApiResponse};
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validationly_app::application::FeedbackInput;
use validationly_app::domain::FeedbackItem;
use validationly_app::AppContext;
use validationly_errors::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default, deserialize_with = "lenient::string")]
    message: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    contact: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    score: Option<f64>,
}

#[derive(Serialize)]
pub struct FeedbackList {
    items: Vec<FeedbackItem>,
}

pub async fn submit_feedback(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<FeedbackRequest>,
) -> Result<ApiResponse<Ack>, AppError> {
    ctx.feedback
        .submit(FeedbackInput {
            message: body.message,
            contact: body.contact,
            score: body.score,
        })
        .await?;
    Ok(ApiResponse(Ack {}))
}

pub async fn list_feedback(
    State(ctx): State<AppContext>,
) -> Result<ApiResponse<FeedbackList>, AppError> {
    let items = ctx.feedback.recent().await?;
    Ok(ApiResponse(FeedbackList { items }))
}
