mod api;
mod middleware;
mod scheduler;

use std::sync::Arc;

use nladdr_lookup::{
    build_http_client, AddressCascade, Geocoder, LocalPlaceIndex, NominatimGeocoder,
    PdokPlaceProvider, PlaceSearchResolver, Throttle,
};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState, JobSettings, SharedStore},
    middleware::JobAuth,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(nladdr_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting nladdr-server");

    let pool_config = nladdr_db::PoolConfig::from_app_config(&config);
    let pool = nladdr_db::connect_pool(config.require_database_url()?, pool_config).await?;
    let applied = nladdr_db::run_migrations(&pool).await?;
    tracing::info!(applied, "database migrations complete");

    let client = build_http_client(config.provider_timeout_secs, &config.user_agent)?;
    let cascade = Arc::new(AddressCascade::from_config(&client, &config));
    tracing::info!(providers = ?cascade.provider_names(), "address cascade ready");

    let local = LocalPlaceIndex::from_config(&config)?;
    let places = Arc::new(PlaceSearchResolver::new(
        Some(Box::new(PdokPlaceProvider::new(
            client.clone(),
            &config.pdok_url,
        ))),
        local,
    ));

    let geocoder: Arc<dyn Geocoder> = Arc::new(NominatimGeocoder::new(client, &config.nominatim_url));
    let store: SharedStore = Arc::new(nladdr_db::PgGeocodeStore::new(pool.clone()));
    let jobs = JobSettings::from_config(&config);
    let geocode_throttle = Arc::new(Throttle::new(jobs.per_call_delay));

    let _scheduler = scheduler::build_scheduler(
        Arc::clone(&store),
        Arc::clone(&geocoder),
        Arc::clone(&geocode_throttle),
        jobs,
        &config.geocode_cron,
    )
    .await?;

    let auth = JobAuth::new(config.job_secret.as_deref());
    let state = AppState {
        pool,
        cascade,
        places,
        geocoder,
        geocode_throttle,
        store,
        jobs,
    };
    let app = build_app(state, auth, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
