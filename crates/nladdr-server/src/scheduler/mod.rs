//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring backlog geocoding job.

use std::sync::Arc;

use nladdr_lookup::{run_geocode_batch_paced, Geocoder, Throttle};
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::api::{JobSettings, SharedStore};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process; dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(
    store: SharedStore,
    geocoder: Arc<dyn Geocoder>,
    throttle: Arc<Throttle>,
    settings: JobSettings,
    cron: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_geocode_job(&scheduler, store, geocoder, throttle, settings, cron).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the recurring geocode job. Each tick processes one page of the
/// backlog; later ticks pick up whatever is still pending.
async fn register_geocode_job(
    scheduler: &JobScheduler,
    store: SharedStore,
    geocoder: Arc<dyn Geocoder>,
    throttle: Arc<Throttle>,
    settings: JobSettings,
    cron: &str,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(cron, move |_uuid, _lock| {
        let store = Arc::clone(&store);
        let geocoder = Arc::clone(&geocoder);
        let throttle = Arc::clone(&throttle);

        Box::pin(async move {
            tracing::info!(
                page_size = settings.page_size,
                "scheduler: starting geocode run"
            );
            match run_geocode_batch_paced(
                store.as_ref(),
                geocoder.as_ref(),
                settings.page_size,
                &throttle,
            )
            .await
            {
                Ok(summary) => tracing::info!(
                    updated = summary.updated,
                    skipped = summary.skipped,
                    failed = summary.failed,
                    "scheduler: geocode run complete"
                ),
                Err(e) => tracing::error!(error = %e, "scheduler: geocode run failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron, "scheduler: geocode job registered");
    Ok(())
}
