use std::time::Duration;

use nladdr_core::AppConfig;
use nladdr_lookup::{build_http_client, run_geocode_batch, NominatimGeocoder};

/// Run a single geocode page against the configured database and print the
/// summary.
///
/// # Errors
///
/// Returns an error if the pool cannot be opened, the HTTP client cannot be
/// built, or the pending page cannot be fetched. Per-record failures are
/// counted in the summary, not propagated.
pub(crate) async fn run_geocode(
    config: &AppConfig,
    page_size: Option<i64>,
    delay_ms: Option<u64>,
) -> anyhow::Result<()> {
    let page_size = page_size.unwrap_or(config.geocode_page_size);
    let delay = Duration::from_millis(delay_ms.unwrap_or(config.geocode_delay_ms));

    let pool_config = nladdr_db::PoolConfig::from_app_config(config);
    let pool = nladdr_db::connect_pool(config.require_database_url()?, pool_config).await?;
    let store = nladdr_db::PgGeocodeStore::new(pool.clone());

    let client = build_http_client(config.provider_timeout_secs, &config.user_agent)?;
    let geocoder = NominatimGeocoder::new(client, &config.nominatim_url);

    tracing::info!(page_size, delay = ?delay, "starting geocode run");
    let summary = run_geocode_batch(&store, &geocoder, page_size, delay).await?;
    pool.close().await;

    println!(
        "geocoded {} records: {} updated, {} skipped, {} failed",
        summary.processed(),
        summary.updated,
        summary.skipped,
        summary.failed
    );
    Ok(())
}
