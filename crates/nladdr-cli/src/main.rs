mod db;
mod geocode;

use clap::{Parser, Subcommand};
use nladdr_core::AppConfig;
use nladdr_lookup::{
    build_http_client, AddressCascade, LocalPlaceIndex, PdokPlaceProvider, PlaceSearchResolver,
};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;

#[derive(Debug, Parser)]
#[command(name = "nladdr-cli")]
#[command(about = "Dutch address lookup and geocoding command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a postcode and house number to a full address
    Lookup {
        postcode: String,
        house_number: String,
    },
    /// Search Dutch places by name
    Places { query: String },
    /// Run one geocode page over records missing coordinates
    Geocode {
        /// Number of pending records to fetch (defaults to config)
        #[arg(long)]
        page_size: Option<i64>,

        /// Spacing between geocoder calls in milliseconds (defaults to config)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("nladdr-cli: no command given, see --help");
        return Ok(());
    };

    let config = nladdr_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Lookup {
            postcode,
            house_number,
        } => run_lookup(&config, &postcode, &house_number).await,
        Commands::Places { query } => run_places(&config, &query).await,
        Commands::Geocode {
            page_size,
            delay_ms,
        } => geocode::run_geocode(&config, page_size, delay_ms).await,
        Commands::Db { command } => db::run_db(&config, command).await,
    }
}

async fn run_lookup(config: &AppConfig, postcode: &str, house_number: &str) -> anyhow::Result<()> {
    let client = build_http_client(config.provider_timeout_secs, &config.user_agent)?;
    let cascade = AddressCascade::from_config(&client, config);
    let address = cascade.lookup(postcode, house_number).await?;

    println!("{}", address.full_address());
    println!("{}", serde_json::to_string_pretty(&address)?);
    Ok(())
}

async fn run_places(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let client = build_http_client(config.provider_timeout_secs, &config.user_agent)?;
    let resolver = PlaceSearchResolver::new(
        Some(Box::new(PdokPlaceProvider::new(client, &config.pdok_url))),
        LocalPlaceIndex::from_config(config)?,
    );

    let candidates = resolver.search(query).await?;
    if candidates.is_empty() {
        println!("no places found for '{query}'");
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&candidates)?);
    Ok(())
}
