use axum::{
    extract::{Query, State},
    Extension, Json,
};
use nladdr_core::Address;
use nladdr_lookup::LookupError;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AddressQuery {
    pub postcode: Option<String>,
    pub house_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct AddressItem {
    pub street: String,
    pub house_number: String,
    pub house_number_addition: Option<String>,
    pub postcode: String,
    pub city: String,
    pub municipality: Option<String>,
    pub province: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub full_address: String,
    pub provider_id: Option<String>,
    pub source: String,
}

impl From<Address> for AddressItem {
    fn from(address: Address) -> Self {
        let full_address = address.full_address();
        Self {
            street: address.street,
            house_number: address.house_number,
            house_number_addition: address.house_number_addition,
            postcode: address.postcode,
            city: address.city,
            municipality: address.municipality,
            province: address.province,
            latitude: address.latitude,
            longitude: address.longitude,
            full_address,
            provider_id: address.provider_id,
            source: address.source,
        }
    }
}

pub(super) async fn lookup_address(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<ApiResponse<AddressItem>>, ApiError> {
    let postcode = query.postcode.unwrap_or_default();
    let house_number = query.house_number.unwrap_or_default();

    let address = state
        .cascade
        .lookup(&postcode, &house_number)
        .await
        .map_err(|e| map_lookup_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: AddressItem::from(address),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) fn map_lookup_error(request_id: String, error: &LookupError) -> ApiError {
    match error {
        LookupError::Invalid(e) => ApiError::new(request_id, "validation_error", e.to_string()),
        LookupError::NotFound { reason, .. } => {
            ApiError::new(request_id, "not_found", reason.to_string())
        }
        LookupError::AllProvidersFailed { attempts } => {
            tracing::error!(
                attempts = attempts.len(),
                "address lookup: every provider failed on configuration"
            );
            ApiError::new(request_id, "providers_unavailable", error.to_string())
        }
    }
}
