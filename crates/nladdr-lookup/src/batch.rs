//! One page of backlog geocoding.

use std::time::Duration;

use serde::Serialize;

use nladdr_core::{GeocodeJobRecord, GeocodeStore};

use crate::error::BatchError;
use crate::geocoder::Geocoder;
use crate::rate_limit::Throttle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GeocodeSummary {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl GeocodeSummary {
    fn record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Updated => self.updated += 1,
            RecordOutcome::Skipped(_) => self.skipped += 1,
            RecordOutcome::Failed => self.failed += 1,
        }
    }

    #[must_use]
    pub fn processed(&self) -> usize {
        self.updated + self.skipped + self.failed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoAddress,
    NoResult,
}

/// Terminal state of one record within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Updated,
    Skipped(SkipReason),
    Failed,
}

/// Geocodes one bounded page of records that lack coordinates.
///
/// Records are processed one at a time. Provider calls are spaced by
/// `per_call_delay`, including after skips and failures. A record that
/// cannot be resolved or written is counted, stamped as attempted and
/// otherwise left untouched; the run carries on with the next one.
///
/// The spacing only covers this run. Callers that may start runs
/// concurrently against the same provider share one [`Throttle`] through
/// [`run_geocode_batch_paced`] instead.
///
/// # Errors
///
/// Returns [`BatchError::Store`] only if the page itself cannot be fetched.
pub async fn run_geocode_batch<S, G>(
    store: &S,
    geocoder: &G,
    page_size: i64,
    per_call_delay: Duration,
) -> Result<GeocodeSummary, BatchError>
where
    S: GeocodeStore + ?Sized,
    G: Geocoder + ?Sized,
{
    let throttle = Throttle::new(per_call_delay);
    run_geocode_batch_paced(store, geocoder, page_size, &throttle).await
}

/// Same as [`run_geocode_batch`], pacing provider calls through a
/// caller-owned [`Throttle`] that may be shared with other runs.
///
/// # Errors
///
/// Returns [`BatchError::Store`] only if the page itself cannot be fetched.
pub async fn run_geocode_batch_paced<S, G>(
    store: &S,
    geocoder: &G,
    page_size: i64,
    throttle: &Throttle,
) -> Result<GeocodeSummary, BatchError>
where
    S: GeocodeStore + ?Sized,
    G: Geocoder + ?Sized,
{
    let records = store
        .select_pending_geocode(page_size.max(1))
        .await
        .map_err(|e| BatchError::Store(Box::new(e)))?;

    tracing::info!(
        pending = records.len(),
        page_size,
        geocoder = geocoder.name(),
        "starting geocode batch"
    );

    let mut summary = GeocodeSummary::default();

    for record in &records {
        let outcome = process_record(store, geocoder, throttle, record).await;
        if outcome != RecordOutcome::Updated {
            mark_attempted(store, record.id).await;
        }
        summary.record(outcome);
    }

    tracing::info!(
        updated = summary.updated,
        skipped = summary.skipped,
        failed = summary.failed,
        "geocode batch finished"
    );
    Ok(summary)
}

async fn process_record<S, G>(
    store: &S,
    geocoder: &G,
    throttle: &Throttle,
    record: &GeocodeJobRecord,
) -> RecordOutcome
where
    S: GeocodeStore + ?Sized,
    G: Geocoder + ?Sized,
{
    let Some(address) = record.address_text() else {
        tracing::debug!(record_id = record.id, "no address text; skipping");
        return RecordOutcome::Skipped(SkipReason::NoAddress);
    };

    match throttle.pace(geocoder.geocode(address)).await {
        Ok(Some(coordinates)) => match store.update_coordinates(record.id, coordinates).await {
            Ok(()) => {
                tracing::debug!(
                    record_id = record.id,
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "coordinates stored"
                );
                RecordOutcome::Updated
            }
            Err(e) => {
                tracing::warn!(record_id = record.id, error = %e, "failed to store coordinates");
                RecordOutcome::Failed
            }
        },
        Ok(None) => {
            tracing::debug!(record_id = record.id, "geocoder found no result");
            RecordOutcome::Skipped(SkipReason::NoResult)
        }
        Err(e) => {
            tracing::warn!(record_id = record.id, error = %e, "geocoding failed");
            RecordOutcome::Failed
        }
    }
}

/// Moves an unresolved record behind the rest of the backlog. A failure here
/// only delays rotation, so it is logged and not counted.
async fn mark_attempted<S>(store: &S, id: i64)
where
    S: GeocodeStore + ?Sized,
{
    if let Err(e) = store.mark_geocode_attempted(id).await {
        tracing::warn!(record_id = id, error = %e, "failed to mark geocode attempt");
    }
}
