//! Entitlement entity model.

use lectern_core::types::Timestamp;
use lectern_core::{EntitlementState, Tier};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_entitlements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EntitlementRow {
    pub user_id: String,
    pub tier: String,
    pub credits: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl EntitlementRow {
    /// Map the row to the domain snapshot. Unknown tier strings fall
    /// back to free (most restrictive).
    pub fn state(&self) -> EntitlementState {
        EntitlementState {
            tier: Tier::parse(&self.tier),
            credits: self.credits,
        }
    }
}
