//! Integration tests for the processing endpoint: submission
//! validation, entitlement gating, and the SSE error path. Happy-path
//! pipeline behaviour is covered by the orchestrator's own tests;
//! these exercise the HTTP surface.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, post_json, seed_lecture};
use lectern_db::repositories::EntitlementRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn sourceless_submission_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/process", None, serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("required"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn conflicting_sources_are_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/process",
        None,
        serde_json::json!({
            "rawText": "notes",
            "youtubeUrl": "https://youtu.be/dQw4w9WgXcQ"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Exactly one content source"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_submission_spends_no_credit(pool: PgPool) {
    EntitlementRepo::upsert(&pool, "user-payg", "payg", 2)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/process",
        Some("user-payg"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let row = EntitlementRepo::find(&pool, "user-payg")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.credits, 2, "validation must run before the gate");
}

// ---------------------------------------------------------------------------
// Gating
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn free_tier_fourth_lecture_is_refused(pool: PgPool) {
    for i in 0..3 {
        seed_lecture(&pool, "user-free", &format!("L{i}"), None).await;
    }

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/process",
        Some("user-free"),
        serde_json::json!({"rawText": "some notes"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["limitReached"], true);
    assert!(json["error"].as_str().unwrap().contains("limit"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn payg_without_credits_is_refused(pool: PgPool) {
    EntitlementRepo::upsert(&pool, "user-payg", "payg", 0)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/process",
        Some("user-payg"),
        serde_json::json!({"rawText": "some notes"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["limitReached"], true);
    assert_eq!(json["creditsRemaining"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn whitespace_paste_is_rejected_before_the_gate(pool: PgPool) {
    EntitlementRepo::upsert(&pool, "user-payg", "payg", 2)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/process",
        Some("user-payg"),
        serde_json::json!({"rawText": "  \n\t "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("no usable text"));

    let row = EntitlementRepo::find(&pool, "user-payg")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.credits, 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn payg_run_spends_one_credit(pool: PgPool) {
    EntitlementRepo::upsert(&pool, "user-payg", "payg", 2)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    // The URL passes source selection, so the gate runs and the stream
    // starts; video-id extraction then fails inside the run without
    // touching the network.
    let response = post_json(
        app,
        "/api/v1/process",
        Some("user-payg"),
        serde_json::json!({"youtubeUrl": "https://example.com/not-a-video"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let row = EntitlementRepo::find(&pool, "user-payg")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.credits, 1);
}

// ---------------------------------------------------------------------------
// SSE error path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unresolvable_video_url_streams_an_error_event(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/process",
        None,
        serde_json::json!({"youtubeUrl": "https://example.com/not-a-video"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));

    let body = body_text(response).await;
    assert!(body.contains(r#""stage":"error""#));
    assert!(body.contains("not a recognizable video URL"));
    assert!(!body.contains(r#""stage":"done""#));
}
