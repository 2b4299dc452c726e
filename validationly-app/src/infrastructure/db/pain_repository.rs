use super::db_error;
use super::entities::{
    idea, reddit_document, signal, validation_run, validation_score, Idea, RedditDocument,
};
use crate::application::ports::PainStore;
use crate::domain::{DocumentQuery, IdeaFilter, PainAnalysis, PainDocument, PainIdea};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{entity::*, query::*, Condition, DatabaseConnection, TransactionTrait};
use serde_json::{json, Value};
use uuid::Uuid;
use validationly_errors::AppError;

const PROVIDER: &str = "reddit_pain";

#[derive(Clone)]
pub struct PainRepository {
    db: DatabaseConnection,
}

impl PainRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `lower(column) LIKE '%needle%'`
fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", needle.to_lowercase()))
}

fn to_idea(model: idea::Model) -> PainIdea {
    PainIdea {
        id: model.id,
        title: model.title,
        summary: model.summary,
        subreddit: model.subreddit,
        permalink: model.permalink,
        created_utc: model.created_utc,
    }
}

fn to_document(model: reddit_document::Model) -> PainDocument {
    let pain_points = match model.pain_points {
        Value::Array(items) => items,
        _ => vec![],
    };
    PainDocument {
        document_id: model.document_id,
        subreddit: model.subreddit,
        title: model.title,
        reddit_score: model.reddit_score,
        reddit_comments: model.reddit_comments,
        created_utc: model.created_utc,
        pain_points,
    }
}

#[async_trait]
impl PainStore for PainRepository {
    async fn list_ideas(&self, filter: &IdeaFilter) -> Result<Vec<PainIdea>, AppError> {
        let mut select = Idea::find()
            .order_by_desc(idea::Column::CreatedUtc)
            .limit(filter.limit);

        if let Some(cluster) = &filter.cluster {
            select = select.filter(idea::Column::Subreddit.eq(cluster.as_str()));
        }
        if let Some(query) = &filter.query {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(idea::Column::Title, query))
                    .add(contains_ci(idea::Column::Summary, query)),
            );
        }

        let rows = select.all(&self.db).await.map_err(db_error)?;
        Ok(rows.into_iter().map(to_idea).collect())
    }

    async fn fetch_documents(&self, query: &DocumentQuery) -> Result<Vec<PainDocument>, AppError> {
        let mut select = RedditDocument::find()
            .filter(reddit_document::Column::CreatedUtc.gte(query.since))
            .order_by_desc(reddit_document::Column::CreatedUtc)
            .limit(query.limit);

        if !query.keywords.is_empty() {
            let any_keyword = query.keywords.iter().fold(Condition::any(), |cond, kw| {
                cond.add(contains_ci(reddit_document::Column::Title, kw))
            });
            select = select.filter(any_keyword);
        }
        if !query.segments.is_empty() {
            select = select.filter(reddit_document::Column::Subreddit.is_in(query.segments.clone()));
        }

        let rows = select.all(&self.db).await.map_err(db_error)?;
        Ok(rows.into_iter().map(to_document).collect())
    }

    async fn record_analysis(&self, analysis: &PainAnalysis) -> Result<(), AppError> {
        let now = Utc::now();
        let payload = serde_json::to_value(&analysis.insights)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let metrics = analysis.metrics;

        let txn = self.db.begin().await.map_err(db_error)?;

        validation_run::ActiveModel {
            id: Set(analysis.run_id),
            idea: Set(analysis.idea.clone()),
            keywords: Set(json!(analysis.keywords)),
            target_segments: Set(json!(analysis.target_segments)),
            status: Set("done".to_string()),
            created_at: Set(Some(now)),
        }
        .insert(&txn)
        .await
        .map_err(db_error)?;

        signal::ActiveModel {
            id: Set(Uuid::new_v4()),
            run_id: Set(analysis.run_id),
            provider: Set(PROVIDER.to_string()),
            strength: Set(metrics.strength),
            freshness: Set(metrics.freshness),
            confidence: Set(metrics.confidence),
            payload: Set(payload),
            created_at: Set(Some(now)),
        }
        .insert(&txn)
        .await
        .map_err(db_error)?;

        validation_score::ActiveModel {
            id: Set(Uuid::new_v4()),
            run_id: Set(analysis.run_id),
            score: Set(analysis.score),
            breakdown: Set(json!({
                PROVIDER: {
                    "strength": metrics.strength,
                    "freshness": metrics.freshness,
                    "confidence": metrics.confidence,
                    "score": analysis.score,
                }
            })),
            created_at: Set(Some(now)),
        }
        .insert(&txn)
        .await
        .map_err(db_error)?;

        txn.commit().await.map_err(db_error)?;
        tracing::info!("Recorded pain analysis run {}", analysis.run_id);
        Ok(())
    }
}
