use async_trait::async_trait;
use sqlx::PgPool;

use nladdr_core::{Coordinates, GeocodeJobRecord, GeocodeStore};

use crate::businesses::{
    list_pending_geocode, mark_geocode_attempted, update_business_coordinates,
};
use crate::DbError;

/// [`GeocodeStore`] backed by the `businesses` table.
#[derive(Debug, Clone)]
pub struct PgGeocodeStore {
    pool: PgPool,
}

impl PgGeocodeStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GeocodeStore for PgGeocodeStore {
    type Error = DbError;

    async fn select_pending_geocode(&self, limit: i64) -> Result<Vec<GeocodeJobRecord>, DbError> {
        let rows = list_pending_geocode(&self.pool, limit).await?;
        Ok(rows.into_iter().map(GeocodeJobRecord::from).collect())
    }

    async fn update_coordinates(&self, id: i64, coordinates: Coordinates) -> Result<(), DbError> {
        update_business_coordinates(&self.pool, id, coordinates.latitude, coordinates.longitude)
            .await
    }

    async fn mark_geocode_attempted(&self, id: i64) -> Result<(), DbError> {
        mark_geocode_attempted(&self.pool, id).await
    }
}
