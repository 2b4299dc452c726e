mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{empty_request, json_request, send, setup_bare_app, setup_test_app};
use serde_json::json;
use uuid::Uuid;
use validationly_app::domain::{PainDocument, PainIdea};

fn idea(title: &str) -> PainIdea {
    PainIdea {
        id: Uuid::new_v4(),
        title: title.to_string(),
        summary: Some("People keep asking for this".to_string()),
        subreddit: "SaaS".to_string(),
        permalink: Some("https://reddit.com/r/SaaS/comments/x1".to_string()),
        created_utc: Utc::now() - Duration::days(1),
    }
}

fn document(id: &str, days_old: i64) -> PainDocument {
    PainDocument {
        document_id: id.to_string(),
        subreddit: "freelance".to_string(),
        title: "Clients pay late, email me at pat@example.com".to_string(),
        reddit_score: 120,
        reddit_comments: 40,
        created_utc: Utc::now() - Duration::days(days_old),
        pain_points: vec![json!({"quote": "I chase invoices every Friday"})],
    }
}

#[tokio::test]
async fn test_ideas_clamp_limit_and_pass_filters() {
    let app = setup_test_app();
    app.pain
        .ideas
        .lock()
        .unwrap()
        .extend([idea("Invoice chaser"), idea("Churn alerts")]);

    let (status, body) = send(
        &app.router,
        empty_request("GET", "/api/reddit/ideas?cluster=SaaS&q=invoice&limit=9999"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["items"][0]["title"], "Invoice chaser");

    let filters = app.pain.filters.lock().unwrap();
    assert_eq!(filters[0].limit, 200);
    assert_eq!(filters[0].cluster.as_deref(), Some("SaaS"));
    assert_eq!(filters[0].query.as_deref(), Some("invoice"));
}

#[tokio::test]
async fn test_ideas_default_limit() {
    let app = setup_test_app();

    let (status, body) = send(&app.router, empty_request("GET", "/api/reddit/ideas?limit=abc")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(app.pain.filters.lock().unwrap()[0].limit, 50);
}

#[tokio::test]
async fn test_pain_analysis_scores_and_records_run() {
    let app = setup_test_app();
    app.pain
        .documents
        .lock()
        .unwrap()
        .extend([document("d1", 2), document("d2", 10), document("d3", 40)]);

    let (status, body) = send(
        &app.router,
        json_request(
            "POST",
            "/api/reddit/pain",
            &json!({
                "idea": "Invoice reminders for freelancers",
                "keywords": ["invoice", 3, "late payment"],
                "target_segments": ["freelancers"]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let score = body["score"].as_f64().unwrap();
    let breakdown = &body["breakdown"];
    for key in ["strength", "freshness", "confidence"] {
        let value = breakdown[key].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&value), "{} = {}", key, value);
    }
    let expected = 0.5 * breakdown["strength"].as_f64().unwrap()
        + 0.3 * breakdown["freshness"].as_f64().unwrap()
        + 0.2 * breakdown["confidence"].as_f64().unwrap();
    assert!((score - expected).abs() < 1e-9);

    let insights = &body["insights"];
    assert_eq!(insights["total_documents"], 3);
    assert!(insights["examples"][0]["title"]
        .as_str()
        .unwrap()
        .contains("[EMAIL]"));

    let queries = app.pain.queries.lock().unwrap();
    assert_eq!(queries[0].keywords, vec!["invoice", "late payment"]);
    assert_eq!(queries[0].segments, vec!["freelancers"]);

    let analyses = app.pain.analyses.lock().unwrap();
    assert_eq!(analyses.len(), 1);
    assert_eq!(body["runId"], analyses[0].run_id.to_string());
}

#[tokio::test]
async fn test_pain_requires_idea() {
    let app = setup_test_app();

    let (status, body) = send(
        &app.router,
        json_request("POST", "/api/reddit/pain", &json!({"keywords": ["crm"]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Idea is required");
    assert!(app.pain.analyses.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_pain_without_database_is_500() {
    let router = setup_bare_app();

    let (status, body) = send(
        &router,
        json_request("POST", "/api/reddit/pain", &json!({"idea": "CRM for plumbers"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Database not configured");
}
