//! Search Analytics Routes
//!
//! - POST /api/search/analytics - Record a search event
//! - GET /api/search/analytics - Popular and recent searches

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::analytics::AnalyticsSummary;
use crate::api::dto::{RecordSearchRequest, RecordSearchResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::storage::NewSearchEvent;

/// POST /api/search/analytics
///
/// Validates the body before touching storage. A failed save is a 500.
pub async fn record_search(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecordSearchRequest>, JsonRejection>,
) -> ApiResult<Json<RecordSearchResponse>> {
    let Json(req) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let event = validate_record_request(req)?;

    let stored = state.recorder.record(event).await?;
    tracing::info!(event_id = %stored.id, result_count = stored.result_count, "Search recorded");

    Ok(Json(RecordSearchResponse { success: true }))
}

/// GET /api/search/analytics
///
/// Always 200. Storage trouble yields the zero-value summary.
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<AnalyticsSummary> {
    Json(state.aggregator.aggregate().await)
}

/// Turn a submission into a recordable event
fn validate_record_request(req: RecordSearchRequest) -> ApiResult<NewSearchEvent> {
    let query = req
        .query
        .ok_or_else(|| ApiError::Validation("query is required".to_string()))?;

    let result_count = match req.result_count {
        None => return Err(ApiError::Validation("resultCount is required".to_string())),
        Some(n) if n < 0 => {
            return Err(ApiError::Validation(
                "resultCount must be non-negative".to_string(),
            ))
        }
        Some(n) => n as u64,
    };

    let mut event = NewSearchEvent::new(query, result_count);

    match req.filters {
        None | Some(Value::Null) => {}
        Some(Value::Object(filters)) => event = event.filters(filters),
        Some(_) => {
            return Err(ApiError::Validation(
                "filters must be a JSON object".to_string(),
            ))
        }
    }

    if let Some(session_id) = req.session_id {
        event = event.session_id(session_id);
    }
    if let Some(user_agent) = req.user_agent {
        event = event.user_agent(user_agent);
    }

    Ok(event)
}
