//! Entitlement gate: may this caller start another run?
//!
//! Consulted once, before the pipeline starts. Free-tier callers are
//! capped by lecture count, pro is unlimited, and pay-as-you-go spends
//! one credit per run via an atomic decrement so concurrent
//! submissions cannot overspend a balance.

use std::sync::Arc;

use lectern_core::Tier;

use crate::traits::EntitlementStore;

/// Maximum stored lectures for free-tier callers.
pub const FREE_TIER_LIMIT: i64 = 3;

/// Why a run was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Free tier and already at [`FREE_TIER_LIMIT`] stored lectures.
    UsageLimit,
    /// Pay-as-you-go with a zero credit balance.
    NoCredits,
}

impl DenyReason {
    /// Caller-facing denial message.
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::UsageLimit => {
                "Free tier limit reached. Upgrade to process more lectures."
            }
            DenyReason::NoCredits => "No credits remaining. Purchase credits to continue.",
        }
    }
}

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Deny(DenyReason),
}

/// The gate itself. Cheap to clone; holds only the store handle.
#[derive(Clone)]
pub struct UsageGate {
    store: Arc<dyn EntitlementStore>,
}

impl UsageGate {
    pub fn new(store: Arc<dyn EntitlementStore>) -> Self {
        Self { store }
    }

    /// Decide whether `user_id` may start a run. `None` is an
    /// anonymous caller, who is always allowed (their results are not
    /// counted against any account).
    ///
    /// Store failures fail open: refusing paying users because the
    /// entitlement lookup was briefly down is the worse error, so the
    /// run is allowed and the failure logged.
    pub async fn check(&self, user_id: Option<&str>) -> GateDecision {
        let Some(user_id) = user_id else {
            return GateDecision::Allow;
        };

        let state = match self.store.entitlement(user_id).await {
            Ok(state) => state.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(user_id, error = %err, "entitlement lookup failed, allowing run");
                return GateDecision::Allow;
            }
        };

        match state.tier {
            Tier::Pro => GateDecision::Allow,
            Tier::Free => match self.store.lecture_count(user_id).await {
                Ok(count) if count >= FREE_TIER_LIMIT => {
                    GateDecision::Deny(DenyReason::UsageLimit)
                }
                Ok(_) => GateDecision::Allow,
                Err(err) => {
                    tracing::warn!(user_id, error = %err, "usage count failed, allowing run");
                    GateDecision::Allow
                }
            },
            Tier::Payg => match self.store.consume_credit(user_id).await {
                Ok(Some(remaining)) => {
                    tracing::debug!(user_id, remaining, "consumed one credit");
                    GateDecision::Allow
                }
                Ok(None) => GateDecision::Deny(DenyReason::NoCredits),
                Err(err) => {
                    tracing::warn!(user_id, error = %err, "credit decrement failed, allowing run");
                    GateDecision::Allow
                }
            },
        }
    }
}
