//! Shared helpers for API integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use lectern_api::config::ServerConfig;
use lectern_api::router::build_app_router;
use lectern_api::state::AppState;
use lectern_db::models::lecture::NewLecture;
use lectern_db::repositories::LectureRepo;

/// Build a test `ServerConfig` with safe defaults and no provider keys.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        groq_api_key: String::new(),
        google_ai_api_key: String::new(),
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Mirrors production router construction so
/// tests exercise the same stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request"),
    )
    .await
    .expect("request failed")
}

/// Issue a GET request with an `x-user-id` header.
pub async fn get_as(app: Router, uri: &str, user_id: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("x-user-id", user_id)
            .body(Body::empty())
            .expect("failed to build request"),
    )
    .await
    .expect("request failed")
}

/// Issue a POST request with a JSON body, optionally as a user.
pub async fn post_json(
    app: Router,
    uri: &str,
    user_id: Option<&str>,
    body: serde_json::Value,
) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }
    app.oneshot(
        builder
            .body(Body::from(body.to_string()))
            .expect("failed to build request"),
    )
    .await
    .expect("request failed")
}

/// Collect the response body as a string.
pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body was not UTF-8")
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).expect("body was not valid JSON")
}

/// Insert a lecture row directly, returning its id.
pub async fn seed_lecture(
    pool: &PgPool,
    user_id: &str,
    title: &str,
    slug: Option<&str>,
) -> uuid::Uuid {
    let input = NewLecture {
        user_id: user_id.to_string(),
        title: title.to_string(),
        course_name: Some("BIO 101".to_string()),
        professor_name: None,
        file_url: "pasted-text".to_string(),
        transcript: serde_json::json!([
            {"id": "1", "start": 0.0, "end": 15.0, "text": "Welcome."}
        ]),
        summary: serde_json::json!({
            "executiveSummary": "An overview.",
            "keyTopics": [{"timestamp": 0, "topic": "Intro"}],
            "takeaways": ["One"],
            "definitions": []
        }),
        quiz: serde_json::json!([
            {
                "id": "1",
                "question": "Q?",
                "options": ["A", "B", "C", "D"],
                "correctAnswer": 2,
                "explanation": "Because.",
                "difficulty": "medium"
            }
        ]),
        duration: 15.0,
        slug: slug.map(str::to_string),
    };
    LectureRepo::insert(pool, &input)
        .await
        .expect("failed to seed lecture")
        .id
}
