//! Repository for the `lectures` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::lecture::{LectureRow, NewLecture};

/// Column list for `lectures` queries.
const COLUMNS: &str = "\
    id, user_id, title, course_name, professor_name, file_url, \
    transcript, summary, quiz, duration, slug, created_at";

/// Maximum page size for lecture listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for lecture listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides read/insert operations for persisted lectures. Lectures are
/// write-once: there is no update path.
pub struct LectureRepo;

impl LectureRepo {
    /// Insert a finished lecture and return the stored row.
    pub async fn insert(pool: &PgPool, input: &NewLecture) -> Result<LectureRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO lectures \
                 (user_id, title, course_name, professor_name, file_url, \
                  transcript, summary, quiz, duration, slug) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LectureRow>(&query)
            .bind(&input.user_id)
            .bind(&input.title)
            .bind(&input.course_name)
            .bind(&input.professor_name)
            .bind(&input.file_url)
            .bind(&input.transcript)
            .bind(&input.summary)
            .bind(&input.quiz)
            .bind(input.duration)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    /// Find a lecture by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<LectureRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lectures WHERE id = $1");
        sqlx::query_as::<_, LectureRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a lecture by its share slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<LectureRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lectures WHERE slug = $1");
        sqlx::query_as::<_, LectureRow>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Count a user's historical lectures (the free-tier usage gate).
    pub async fn count_by_user(pool: &PgPool, user_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM lectures WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// List a user's lectures, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<LectureRow>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {COLUMNS} FROM lectures \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, LectureRow>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
