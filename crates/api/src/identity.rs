//! Caller identity extractor.
//!
//! Identity rides in the `x-user-id` header, set by the fronting app
//! after its own session handling. There is no token to validate here,
//! so extraction never rejects: a missing or unreadable header simply
//! yields an anonymous caller.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Who is making this request, if anyone.
///
/// ```ignore
/// async fn my_handler(caller: CallerIdentity) -> AppResult<Json<()>> {
///     tracing::info!(user_id = ?caller.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    /// `None` means anonymous.
    pub user_id: Option<String>,
}

impl CallerIdentity {
    /// The user id recorded against stored data; `"anonymous"` for
    /// unauthenticated callers.
    pub fn owner(&self) -> &str {
        self.user_id.as_deref().unwrap_or("anonymous")
    }
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        Ok(CallerIdentity { user_id })
    }
}
