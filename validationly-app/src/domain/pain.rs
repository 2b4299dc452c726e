use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of the public ideas view, produced by the ingestion worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainIdea {
    pub id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub subreddit: String,
    pub permalink: Option<String>,
    pub created_utc: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaFilter {
    pub cluster: Option<String>,
    pub query: Option<String>,
    pub limit: u64,
}

impl IdeaFilter {
    pub const DEFAULT_LIMIT: u64 = 50;
    pub const MAX_LIMIT: u64 = 200;

    pub fn new(cluster: Option<String>, query: Option<String>, limit: Option<i64>) -> Self {
        let limit = limit
            .map(|l| l.clamp(1, Self::MAX_LIMIT as i64) as u64)
            .unwrap_or(Self::DEFAULT_LIMIT);
        Self {
            cluster: cluster.filter(|c| !c.trim().is_empty()),
            query: query.filter(|q| !q.trim().is_empty()),
            limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PainDocument {
    pub document_id: String,
    pub subreddit: String,
    pub title: String,
    pub reddit_score: i64,
    pub reddit_comments: i64,
    pub created_utc: DateTime<Utc>,
    pub pain_points: Vec<serde_json::Value>,
}

impl PainDocument {
    pub fn engagement(&self) -> f64 {
        (0.6 * self.reddit_score as f64 + 0.4 * self.reddit_comments as f64).max(0.0)
    }

    pub fn permalink(&self) -> String {
        format!(
            "https://reddit.com/r/{}/comments/{}",
            self.subreddit, self.document_id
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    pub keywords: Vec<String>,
    pub segments: Vec<String>,
    pub since: DateTime<Utc>,
    pub limit: u64,
}

/// Signal quality of a document set. Every field is within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PainMetrics {
    pub strength: f64,
    pub freshness: f64,
    pub confidence: f64,
}

impl PainMetrics {
    const FRESHNESS_DECAY_DAYS: f64 = 30.0;
    const VOLUME_SATURATION: f64 = 50.0;
    const ENGAGEMENT_SATURATION: f64 = 1000.0;
    const CONFIDENCE_SATURATION: f64 = 20.0;
    const MIN_CONFIDENCE: f64 = 0.4;

    pub fn from_documents(documents: &[PainDocument], now: DateTime<Utc>) -> Self {
        let count = documents.len() as f64;
        let mut engagement_sum = 0.0;
        let mut freshness_sum = 0.0;

        for doc in documents {
            let age_days = ((now - doc.created_utc).num_milliseconds() as f64 / 86_400_000.0).max(1.0);
            freshness_sum += (-age_days / Self::FRESHNESS_DECAY_DAYS).exp();
            engagement_sum += doc.engagement();
        }

        let strength = 0.4 * (count.ln_1p() / Self::VOLUME_SATURATION.ln())
            + 0.6 * (engagement_sum.ln_1p() / Self::ENGAGEMENT_SATURATION.ln());
        let freshness = freshness_sum / count.max(1.0);
        let confidence = count.ln_1p() / Self::CONFIDENCE_SATURATION.ln();

        Self {
            strength: strength.clamp(0.0, 1.0),
            freshness: freshness.clamp(0.0, 1.0),
            confidence: confidence.clamp(Self::MIN_CONFIDENCE, 1.0),
        }
    }

    pub fn score(&self) -> f64 {
        0.5 * self.strength + 0.3 * self.freshness + 0.2 * self.confidence
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PainExample {
    pub title: String,
    pub subreddit: String,
    pub created_utc: DateTime<Utc>,
    pub permalink: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PainInsights {
    pub top_pains: Vec<serde_json::Value>,
    pub examples: Vec<PainExample>,
    pub aggregate_engagement: f64,
    pub total_documents: usize,
    pub compliance_note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PainAnalysis {
    pub run_id: Uuid,
    pub idea: String,
    pub keywords: Vec<String>,
    pub target_segments: Vec<String>,
    pub metrics: PainMetrics,
    pub score: f64,
    pub insights: PainInsights,
}
