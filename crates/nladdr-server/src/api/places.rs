use axum::{
    extract::{Query, State},
    Extension, Json,
};
use nladdr_core::PlaceCandidate;
use nladdr_lookup::SearchError;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct PlacesQuery {
    pub q: Option<String>,
}

pub(super) async fn search_places(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<PlacesQuery>,
) -> Result<Json<ApiResponse<Vec<PlaceCandidate>>>, ApiError> {
    let q = query.q.unwrap_or_default();
    let data = state.places.search(&q).await.map_err(|e| match e {
        SearchError::QueryTooShort { .. } => {
            ApiError::new(req_id.0.clone(), "query_too_short", e.to_string())
        }
    })?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
