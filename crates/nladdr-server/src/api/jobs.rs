use axum::{
    extract::{Query, State},
    Extension, Json,
};
use nladdr_lookup::{run_geocode_batch_paced, GeocodeSummary};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

const MAX_PAGE_SIZE: i64 = 1_000;

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeJobQuery {
    pub limit: Option<i64>,
}

pub(super) fn normalize_page_size(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_PAGE_SIZE)
}

/// Runs one geocode page synchronously and reports its summary.
pub(super) async fn trigger_geocode(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<GeocodeJobQuery>,
) -> Result<Json<ApiResponse<GeocodeSummary>>, ApiError> {
    let page_size = normalize_page_size(query.limit, state.jobs.page_size);
    tracing::info!(page_size, "geocode job triggered over HTTP");

    let summary = run_geocode_batch_paced(
        state.store.as_ref(),
        state.geocoder.as_ref(),
        page_size,
        &state.geocode_throttle,
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "geocode job failed");
        ApiError::new(req_id.0.clone(), "internal_error", "failed to load pending records")
    })?;

    Ok(Json(ApiResponse {
        data: summary,
        meta: ResponseMeta::new(req_id.0),
    }))
}
