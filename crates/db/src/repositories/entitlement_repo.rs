//! Repository for the `user_entitlements` table.

use sqlx::PgPool;

use crate::models::entitlement::EntitlementRow;

/// Column list for `user_entitlements` queries.
const COLUMNS: &str = "user_id, tier, credits, created_at, updated_at";

/// Read and mutate caller entitlement records. Users without a row are
/// free tier by default; the repository never materializes a row for
/// them.
pub struct EntitlementRepo;

impl EntitlementRepo {
    /// Find a user's entitlement row.
    pub async fn find(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<EntitlementRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_entitlements WHERE user_id = $1");
        sqlx::query_as::<_, EntitlementRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace a user's entitlement record.
    pub async fn upsert(
        pool: &PgPool,
        user_id: &str,
        tier: &str,
        credits: i64,
    ) -> Result<EntitlementRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_entitlements (user_id, tier, credits) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO UPDATE \
                 SET tier = EXCLUDED.tier, \
                     credits = EXCLUDED.credits, \
                     updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EntitlementRow>(&query)
            .bind(user_id)
            .bind(tier)
            .bind(credits)
            .fetch_one(pool)
            .await
    }

    /// Atomically consume one pay-as-you-go credit.
    ///
    /// A single conditional UPDATE, so two concurrent submissions from
    /// the same account cannot both spend the last credit. Returns the
    /// new balance, or `None` when the user has no row or no credits
    /// left.
    pub async fn consume_credit(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE user_entitlements \
             SET credits = credits - 1, updated_at = NOW() \
             WHERE user_id = $1 AND credits > 0 \
             RETURNING credits",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
