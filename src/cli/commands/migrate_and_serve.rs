use anyhow::Result;
use tracing::{debug, info, trace};

use super::{init_database, serve};
use crate::config::AppConfig;

/// Brings the schema up to date, then serves on the same database.
pub async fn migrate_and_serve(config: &AppConfig) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");
    debug!("Database URL: {}", config.database_url);

    init_database(&config.database_url).await?;
    serve(config).await
}
