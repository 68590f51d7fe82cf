use anyhow::Result;
use ::config::{Config, Environment};
use model::SeaOrmLedgerStore;
use moka::future::Cache;
use sea_orm::Database;
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::time::Duration;
use crate::schemas::{AppState, CachedData};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://cashflow.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Runtime settings, read from `CASHFLOW_*` environment variables (a `.env` file is honored).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    /// Seconds a computed report stays cached
    pub cache_ttl_secs: u64,
    /// Maximum number of cached reports
    pub cache_capacity: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("cache_ttl_secs", 300)?
            .set_default("cache_capacity", 1000)?
            .add_source(Environment::with_prefix("CASHFLOW"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Builds the report cache.
pub fn build_cache(config: &AppConfig) -> Cache<String, CachedData> {
    Cache::builder()
        .max_capacity(config.cache_capacity)
        .time_to_live(Duration::from_secs(config.cache_ttl_secs))
        .build()
}

/// Connects to the configured database and assembles the shared state.
pub async fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;

    Ok(AppState {
        store: Arc::new(SeaOrmLedgerStore::new(db.clone())),
        db,
        cache: build_cache(config),
        generation: Arc::new(AtomicU64::new(0)),
    })
}
