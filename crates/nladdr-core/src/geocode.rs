//! Types shared between the batch geocoding pipeline and its record store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A stored record whose coordinates are still to be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeJobRecord {
    pub id: i64,
    /// Free-text address used as the geocoding query.
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeocodeJobRecord {
    /// The trimmed address text, or `None` when there is nothing to geocode.
    #[must_use]
    pub fn address_text(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Record store operations used by the batch geocoding pipeline.
///
/// The store owns the records; the pipeline only reads a bounded page of
/// pending rows and writes coordinates back to individual rows.
#[async_trait]
pub trait GeocodeStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns at most `limit` records that still lack coordinates and have
    /// address text. Records never attempted come first, then those whose
    /// last attempt is oldest, so unresolvable records cannot pin the page.
    async fn select_pending_geocode(&self, limit: i64)
        -> Result<Vec<GeocodeJobRecord>, Self::Error>;

    /// Stamps record `id` as attempted without resolving it.
    async fn mark_geocode_attempted(&self, id: i64) -> Result<(), Self::Error>;

    /// Writes coordinates to the record `id` only.
    async fn update_coordinates(
        &self,
        id: i64,
        coordinates: Coordinates,
    ) -> Result<(), Self::Error>;
}
