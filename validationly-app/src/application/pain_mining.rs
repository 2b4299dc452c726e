use super::ports::PainStore;
use super::{with_deadline, Dependency};
use crate::domain::{
    DocumentQuery, IdeaFilter, PainAnalysis, PainDocument, PainExample, PainIdea, PainInsights,
    PainMetrics,
};
use crate::infrastructure::security::InputSanitizer;
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;
use validationly_errors::AppError;

const LOOKBACK_DAYS: i64 = 90;
const DOCUMENT_LIMIT: u64 = 500;
const TOP_PAIN_SOURCE_DOCS: usize = 10;
const TOP_PAIN_LIMIT: usize = 8;
const EXAMPLE_LIMIT: usize = 5;
const MAX_TERMS: usize = 20;
const MAX_TERM_CHARS: usize = 80;
const COMPLIANCE_NOTE: &str =
    "Data sourced from Reddit public API. Personal information removed for privacy compliance.";

#[derive(Debug, Default, Clone)]
pub struct PainRequest {
    pub idea: Option<String>,
    pub keywords: Vec<String>,
    pub target_segments: Vec<String>,
}

/// Browses mined ideas and scores an idea against recent pain documents.
pub struct PainMining {
    store: Dependency<dyn PainStore>,
    timeout: Duration,
}

impl PainMining {
    pub fn new(store: Dependency<dyn PainStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn browse(&self, filter: IdeaFilter) -> Result<Vec<PainIdea>, AppError> {
        let store = self.store.get()?;
        with_deadline(self.timeout, store.list_ideas(&filter)).await
    }

    pub async fn analyze(&self, request: PainRequest) -> Result<PainAnalysis, AppError> {
        let idea = InputSanitizer::required_text(request.idea.as_deref(), 2000, "Idea is required")?;
        let keywords = clean_terms(request.keywords);
        let target_segments = clean_terms(request.target_segments);
        let store = self.store.get()?;

        let now = Utc::now();
        let query = DocumentQuery {
            keywords: keywords.clone(),
            segments: target_segments.clone(),
            since: now - ChronoDuration::days(LOOKBACK_DAYS),
            limit: DOCUMENT_LIMIT,
        };
        let documents = with_deadline(self.timeout, store.fetch_documents(&query)).await?;

        let metrics = PainMetrics::from_documents(&documents, now);
        let analysis = PainAnalysis {
            run_id: Uuid::new_v4(),
            idea,
            keywords,
            target_segments,
            metrics,
            score: metrics.score(),
            insights: build_insights(&documents),
        };

        with_deadline(self.timeout, store.record_analysis(&analysis)).await?;
        tracing::info!(
            "Pain analysis {} over {} documents scored {:.3}",
            analysis.run_id,
            documents.len(),
            analysis.score
        );
        Ok(analysis)
    }
}

fn clean_terms(terms: Vec<String>) -> Vec<String> {
    terms
        .iter()
        .filter_map(|t| InputSanitizer::optional_text(Some(t.as_str()), MAX_TERM_CHARS))
        .take(MAX_TERMS)
        .collect()
}

fn scrub_pain_point(point: &Value) -> Value {
    let mut point = point.clone();
    if let Some(Value::String(quote)) = point.get_mut("quote") {
        *quote = InputSanitizer::scrub_pii(quote);
    }
    point
}

fn build_insights(documents: &[PainDocument]) -> PainInsights {
    let top_pains = documents
        .iter()
        .take(TOP_PAIN_SOURCE_DOCS)
        .flat_map(|doc| doc.pain_points.iter())
        .take(TOP_PAIN_LIMIT)
        .map(scrub_pain_point)
        .collect();

    let examples = documents
        .iter()
        .take(EXAMPLE_LIMIT)
        .map(|doc| PainExample {
            title: InputSanitizer::scrub_pii(&doc.title),
            subreddit: doc.subreddit.clone(),
            created_utc: doc.created_utc,
            permalink: doc.permalink(),
        })
        .collect();

    PainInsights {
        top_pains,
        examples,
        aggregate_engagement: documents.iter().map(PainDocument::engagement).sum(),
        total_documents: documents.len(),
        compliance_note: COMPLIANCE_NOTE,
    }
}
