//! Clinic API server: loads `.env` and the environment, bootstraps the database, serves the API.

use clinic_api::{app, ensure_database_exists, ensure_tables, AppState, Config, PgStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clinic_api=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await?;
    ensure_tables(&pool).await?;

    let state = AppState::new(Arc::new(PgStore::new(pool)));
    let router = app(state, &config.api_prefix);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(prefix = %config.api_prefix, "listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
