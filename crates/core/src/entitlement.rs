//! Caller entitlement state, consulted (not owned) by the pipeline.

use serde::{Deserialize, Serialize};

/// Subscription tier of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Capped at 3 historical lectures.
    Free,
    /// Unlimited.
    Pro,
    /// Pay-as-you-go: one credit per run.
    Payg,
}

impl Tier {
    /// Parse a stored tier string. Unknown values map to `Free`, the
    /// most restrictive tier, rather than failing the lookup.
    pub fn parse(value: &str) -> Self {
        match value {
            "pro" => Self::Pro,
            "payg" => Self::Payg,
            _ => Self::Free,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Payg => "payg",
        }
    }
}

/// Snapshot of one caller's entitlement record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntitlementState {
    pub tier: Tier,
    /// Remaining credits; only meaningful for [`Tier::Payg`].
    pub credits: i64,
}

impl Default for EntitlementState {
    fn default() -> Self {
        Self {
            tier: Tier::Free,
            credits: 0,
        }
    }
}
