use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod models;
mod pages;
mod repositories;
mod routes;
mod state;
mod templates;

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use omdb::OmdbClient;
use tokio::net::TcpListener;

use crate::{config::AppConfig, repositories::SqliteDataManager, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting movie web service");

    let app_config = AppConfig::load()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    if app_config.omdb_api_key.is_empty() {
        warn!("OMDB_API_KEY is not set; movie lookups will be rejected by OMDb");
    }
    let omdb_client = OmdbClient::with_timeout(
        app_config.omdb_api_key.clone(),
        app_config.omdb_timeout(),
    )?
    .with_base_url(app_config.omdb_base_url.clone());

    let app_state = AppState {
        db_pool: pool.clone(),
        data_manager: Arc::new(SqliteDataManager::new(pool)),
        metadata: Arc::new(omdb_client),
        templates: Arc::new(templates::load()?),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&app_config.bind_address).await?;
    info!("Movie web service listening on {}", app_config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
