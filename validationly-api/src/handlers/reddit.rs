use crate::extract::{lenient, JsonBody};
use crate::response::ApiResponse;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use validationly_app::application::PainRequest;
use validationly_app::domain::{IdeaFilter, PainIdea, PainInsights, PainMetrics};
use validationly_app::AppContext;
use validationly_errors::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct IdeasQuery {
    cluster: Option<String>,
    q: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PainBody {
    #[serde(default, deserialize_with = "lenient::string")]
    idea: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    target_segments: Vec<String>,
}

#[derive(Serialize)]
pub struct IdeasResponse {
    items: Vec<PainIdea>,
    total: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PainResponse {
    run_id: String,
    score: f64,
    breakdown: PainMetrics,
    insights: PainInsights,
}

pub async fn list_ideas(
    State(ctx): State<AppContext>,
    query: Result<Query<IdeasQuery>, QueryRejection>,
) -> Result<ApiResponse<IdeasResponse>, AppError> {
    // An unparseable query string browses with the defaults.
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let limit = query.limit.and_then(|l| l.trim().parse::<i64>().ok());

    let items = ctx
        .pain_mining
        .browse(IdeaFilter::new(query.cluster, query.q, limit))
        .await?;

    Ok(ApiResponse(IdeasResponse {
        total: items.len(),
        items,
    }))
}

pub async fn analyze_pain(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<PainBody>,
) -> Result<ApiResponse<PainResponse>, AppError> {
    let analysis = ctx
        .pain_mining
        .analyze(PainRequest {
            idea: body.idea,
            keywords: body.keywords,
            target_segments: body.target_segments,
        })
        .await?;

    Ok(ApiResponse(PainResponse {
        run_id: analysis.run_id.to_string(),
        score: analysis.score,
        breakdown: analysis.metrics,
        insights: analysis.insights,
    }))
}
