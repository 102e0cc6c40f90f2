//! `jobly` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`  : start the API server.
//! - `migrate`: run pending database migrations.

use std::net::SocketAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use db::pool::PoolSettings;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jobly", about = "Job board REST backend", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3001")]
        bind: SocketAddr,
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
        #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
        max_connections: u32,
        /// Shared secret used to verify bearer tokens.
        #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
        secret_key: String,
    },
    /// Run pending database migrations.
    Migrate {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            bind,
            database_url,
            max_connections,
            secret_key,
        } => {
            info!("Starting API server on {bind}");
            let settings = PoolSettings::new(database_url, max_connections);
            let pool = db::pool::create_pool(&settings)
                .await
                .context("failed to connect to database")?;
            let config = api::ApiConfig {
                bind_addr: bind,
                jwt_secret: secret_key,
            };
            api::serve(&config, pool).await.context("server error")?;
        }
        Command::Migrate { database_url } => {
            info!("Running migrations");
            let pool = db::pool::create_pool(&PoolSettings::new(database_url, 2))
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool)
                .await
                .context("migration failed")?;
            info!("Migrations applied successfully");
        }
    }

    Ok(())
}
