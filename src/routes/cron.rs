//! Cron-triggered batch endpoints
//!
//! Both endpoints require a bearer-token shared secret; a mismatch is a 401
//! with no side effects.

use axum::{extract::State, http::HeaderMap, Json};

use crate::routes::{ApiError, AppState};
use crate::services::maintenance::{self, BatchSummary};

/// Compare the Authorization header against the configured shared secret
fn require_cron_auth(headers: &HeaderMap, secret: &str) -> Result<(), ApiError> {
    let provided = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match provided {
        Some(token) if token == secret => Ok(()),
        _ => Err(ApiError::unauthorized()),
    }
}

/// Handler for POST /api/cron/sync-balances
pub async fn sync_balances(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<BatchSummary>, ApiError> {
    require_cron_auth(&headers, &state.cron_secret)?;
    let summary = maintenance::sync_all_balances(state.store.as_ref()).await?;
    Ok(Json(summary))
}

/// Handler for POST /api/cron/fix-design-costs
pub async fn fix_design_costs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<BatchSummary>, ApiError> {
    require_cron_auth(&headers, &state.cron_secret)?;
    let summary = maintenance::fix_design_costs(state.store.as_ref()).await?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn missing_header_is_rejected() {
        let headers = HeaderMap::new();
        assert!(require_cron_auth(&headers, "s3cret").is_err());
    }

    #[test]
    fn wrong_token_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer nope"));
        assert!(require_cron_auth(&headers, "s3cret").is_err());
    }

    #[test]
    fn matching_token_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer s3cret"));
        assert!(require_cron_auth(&headers, "s3cret").is_ok());
    }
}
