//! `jobly` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — start the API server.
//! - `migrate` — run pending database migrations.
//! - `token`   — mint a bearer token for local use.
//!
//! Every flag can also come from the environment (or a `.env` file).

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::{AppState, AuthConfig};
use db::PoolConfig;

#[derive(Parser)]
#[command(name = "jobly", about = "Companies and jobs REST API", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, env = "JOBLY_BIND", default_value = "0.0.0.0:3001")]
        bind: String,
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
        #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = db::pool::DEFAULT_MAX_CONNECTIONS)]
        max_connections: u32,
        /// Seconds a request waits for a free database connection.
        #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 30)]
        acquire_timeout_secs: u64,
        /// HS256 signing secret for bearer tokens.
        #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
        secret_key: String,
    },
    /// Run pending database migrations.
    Migrate {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
    /// Print a signed bearer token.
    Token {
        username: String,
        /// Grant admin rights.
        #[arg(long)]
        admin: bool,
        #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
        secret_key: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            bind,
            database_url,
            max_connections,
            acquire_timeout_secs,
            secret_key,
        } => {
            info!("Starting API server on {bind}");
            let pool = PoolConfig::new(database_url)
                .with_max_connections(max_connections)
                .with_acquire_timeout(Duration::from_secs(acquire_timeout_secs))
                .connect()
                .await
                .context("failed to connect to database")?;
            let state = AppState::new(pool, AuthConfig::new(secret_key));
            api::serve(&bind, state).await.context("server error")?;
        }
        Command::Migrate { database_url } => {
            info!("Running migrations");
            let pool = PoolConfig::new(database_url)
                .with_max_connections(2)
                .connect()
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool)
                .await
                .context("migration failed")?;
            info!("Migrations applied successfully");
        }
        Command::Token {
            username,
            admin,
            secret_key,
        } => {
            let token = AuthConfig::new(secret_key)
                .issue_token(&username, admin)
                .context("failed to sign token")?;
            println!("{token}");
        }
    }

    Ok(())
}
