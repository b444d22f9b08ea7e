//! Integration tests for the lecture repository.
//!
//! Exercises insert/lookup/count/list against a real database,
//! including the slug uniqueness constraint and JSONB round-tripping
//! back into the typed domain aggregate.

use lectern_db::models::lecture::NewLecture;
use lectern_db::repositories::LectureRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_lecture(user_id: &str, title: &str, slug: Option<&str>) -> NewLecture {
    NewLecture {
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
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn insert_and_find_by_id(pool: PgPool) {
    let row = LectureRepo::insert(&pool, &new_lecture("user-1", "Osmosis", Some("abc123")))
        .await
        .unwrap();

    let found = LectureRepo::find_by_id(&pool, row.id).await.unwrap();
    let found = found.expect("inserted lecture must be findable");
    assert_eq!(found.title, "Osmosis");
    assert_eq!(found.user_id, "user-1");
    assert_eq!(found.slug.as_deref(), Some("abc123"));
}

#[sqlx::test(migrations = "./migrations")]
async fn find_by_slug(pool: PgPool) {
    LectureRepo::insert(&pool, &new_lecture("user-1", "Shared", Some("zzz999")))
        .await
        .unwrap();

    let found = LectureRepo::find_by_slug(&pool, "zzz999").await.unwrap();
    assert_eq!(found.unwrap().title, "Shared");

    let missing = LectureRepo::find_by_slug(&pool, "nosuch").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_slug_is_rejected(pool: PgPool) {
    LectureRepo::insert(&pool, &new_lecture("user-1", "First", Some("dupdup")))
        .await
        .unwrap();

    let err = LectureRepo::insert(&pool, &new_lecture("user-2", "Second", Some("dupdup"))).await;
    assert!(err.is_err(), "duplicate slug must violate uq_lectures_slug");
}

#[sqlx::test(migrations = "./migrations")]
async fn null_slugs_do_not_collide(pool: PgPool) {
    LectureRepo::insert(&pool, &new_lecture("user-1", "First", None))
        .await
        .unwrap();
    LectureRepo::insert(&pool, &new_lecture("user-1", "Second", None))
        .await
        .unwrap();

    assert_eq!(LectureRepo::count_by_user(&pool, "user-1").await.unwrap(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn count_by_user_is_scoped(pool: PgPool) {
    for i in 0..3 {
        LectureRepo::insert(&pool, &new_lecture("user-a", &format!("L{i}"), None))
            .await
            .unwrap();
    }
    LectureRepo::insert(&pool, &new_lecture("user-b", "Other", None))
        .await
        .unwrap();

    assert_eq!(LectureRepo::count_by_user(&pool, "user-a").await.unwrap(), 3);
    assert_eq!(LectureRepo::count_by_user(&pool, "user-b").await.unwrap(), 1);
    assert_eq!(LectureRepo::count_by_user(&pool, "nobody").await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_by_user_returns_newest_first(pool: PgPool) {
    for i in 0..3 {
        LectureRepo::insert(&pool, &new_lecture("user-a", &format!("Lecture {i}"), None))
            .await
            .unwrap();
    }

    let rows = LectureRepo::list_by_user(&pool, "user-a", None, None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
    for pair in rows.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn row_round_trips_into_typed_lecture(pool: PgPool) {
    let row = LectureRepo::insert(&pool, &new_lecture("user-1", "Typed", Some("typed1")))
        .await
        .unwrap();

    let lecture = row.into_lecture().unwrap();
    assert_eq!(lecture.title, "Typed");
    assert_eq!(lecture.transcript.len(), 1);
    assert_eq!(lecture.transcript[0].text, "Welcome.");
    assert_eq!(lecture.summary.key_topics[0].topic, "Intro");
    assert_eq!(lecture.quiz[0].correct_answer, 2);
    assert_eq!(lecture.duration, 15.0);
}
