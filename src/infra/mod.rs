use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::{adapters::persistence::PostgresPersistence, infra::config::AppConfig};

pub mod app;
pub mod config;
pub mod setup;

/// Connect to the media-record database described by `config`.
pub async fn postgres_persistence(config: &AppConfig) -> anyhow::Result<PostgresPersistence> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("could not reach the circle database: {e}"))?;
    info!(max_connections = config.db_max_connections, "database pool ready");
    Ok(PostgresPersistence::new(pool))
}
