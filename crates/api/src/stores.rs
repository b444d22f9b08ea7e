//! Database-backed implementations of the pipeline storage traits.

use async_trait::async_trait;
use lectern_core::{EntitlementState, Lecture};
use lectern_db::models::lecture::NewLecture;
use lectern_db::repositories::{EntitlementRepo, LectureRepo};
use lectern_db::DbPool;
use lectern_pipeline::traits::{EntitlementStore, LectureStore};

/// Persists finished lectures into the `lectures` table.
#[derive(Clone)]
pub struct DbLectureStore {
    pool: DbPool,
}

impl DbLectureStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LectureStore for DbLectureStore {
    async fn save(&self, lecture: &Lecture) -> anyhow::Result<String> {
        let input = NewLecture {
            user_id: lecture.user_id.clone(),
            title: lecture.title.clone(),
            course_name: lecture.course.clone(),
            professor_name: lecture.professor.clone(),
            file_url: lecture.file_url.clone(),
            transcript: serde_json::to_value(&lecture.transcript)?,
            summary: serde_json::to_value(&lecture.summary)?,
            quiz: serde_json::to_value(&lecture.quiz)?,
            duration: lecture.duration,
            slug: lecture.slug.clone(),
        };
        let row = LectureRepo::insert(&self.pool, &input).await?;
        Ok(row.id.to_string())
    }
}

/// Reads and spends entitlement records for the usage gate.
#[derive(Clone)]
pub struct DbEntitlementStore {
    pool: DbPool,
}

impl DbEntitlementStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntitlementStore for DbEntitlementStore {
    async fn entitlement(&self, user_id: &str) -> anyhow::Result<Option<EntitlementState>> {
        let row = EntitlementRepo::find(&self.pool, user_id).await?;
        Ok(row.map(|r| r.state()))
    }

    async fn lecture_count(&self, user_id: &str) -> anyhow::Result<i64> {
        Ok(LectureRepo::count_by_user(&self.pool, user_id).await?)
    }

    async fn consume_credit(&self, user_id: &str) -> anyhow::Result<Option<i64>> {
        Ok(EntitlementRepo::consume_credit(&self.pool, user_id).await?)
    }
}
