//! CSE Motors review back office server.
//!
//! Main entry point: loads configuration, initialises logging, connects to
//! PostgreSQL, applies migrations, and serves the review API.

use tracing_subscriber::{EnvFilter, fmt};

use csemotors_core::config::AppConfig;
use csemotors_core::error::AppError;
use csemotors_database::DatabasePool;
use csemotors_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `CSEMOTORS_ENV` overlay, and
/// `CSEMOTORS__*` environment variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CSEMOTORS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting CSE Motors review API");

    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    csemotors_api::run_server(config, db).await
}
