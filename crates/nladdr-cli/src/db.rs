//! Database maintenance commands.

use clap::Subcommand;
use nladdr_core::AppConfig;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

pub(crate) async fn run_db(config: &AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let pool_config = nladdr_db::PoolConfig::from_app_config(config);
    let pool = nladdr_db::connect_pool(config.require_database_url()?, pool_config).await?;

    match command {
        DbCommands::Ping => {
            nladdr_db::health_check(&pool).await?;
            println!("database reachable");
        }
        DbCommands::Migrate => {
            let applied = nladdr_db::run_migrations(&pool).await?;
            println!("migrations complete ({applied} applied)");
        }
    }

    pool.close().await;
    Ok(())
}
