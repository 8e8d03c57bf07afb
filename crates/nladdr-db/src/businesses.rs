//! Database operations for the `businesses` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use nladdr_core::GeocodeJobRecord;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// The subset of a `businesses` row the geocoding backlog needs.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PendingGeocodeRow {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub geocode_attempted_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<PendingGeocodeRow> for GeocodeJobRecord {
    fn from(row: PendingGeocodeRow) -> Self {
        Self {
            id: row.id,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns up to `limit` businesses missing either coordinate.
///
/// Rows without address text are left out since they can never resolve.
/// Never-attempted rows come first, then the longest-unattempted ones, so a
/// page of unresolvable rows cannot hide the rest of the backlog.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_pending_geocode(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<PendingGeocodeRow>, DbError> {
    let rows = sqlx::query_as::<_, PendingGeocodeRow>(
        "SELECT id, name, address, latitude, longitude, geocode_attempted_at, updated_at \
         FROM businesses \
         WHERE (latitude IS NULL OR longitude IS NULL) \
           AND NULLIF(btrim(address), '') IS NOT NULL \
         ORDER BY geocode_attempted_at ASC NULLS FIRST, id ASC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Writes coordinates to a single business and stamps `geocoded_at`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has the given `id`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn update_business_coordinates(
    pool: &PgPool,
    id: i64,
    latitude: f64,
    longitude: f64,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE businesses \
         SET latitude = $1, longitude = $2, geocoded_at = NOW(), geocode_attempted_at = NOW(), \
             updated_at = NOW() \
         WHERE id = $3",
    )
    .bind(latitude)
    .bind(longitude)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Stamps `geocode_attempted_at` on a business whose geocoding did not
/// produce coordinates.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has the given `id`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn mark_geocode_attempted(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("UPDATE businesses SET geocode_attempted_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
