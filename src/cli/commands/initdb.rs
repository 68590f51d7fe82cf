use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::path::Path;
use tracing::{debug, error, info, trace};

/// File path of a `sqlite://` URL, without query parameters.
fn sqlite_path(database_url: &str) -> Option<&str> {
    let rest = database_url.strip_prefix("sqlite://")?;
    let path = rest.split('?').next()?;
    (!path.is_empty()).then_some(path)
}

/// Runs every pending migration, including the seed of default classifications and settings.
///
/// For SQLite files the parent directory is created first.
pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");
    debug!("Database URL: {}", database_url);

    if let Some(parent) = sqlite_path(database_url)
        .and_then(|path| Path::new(path).parent())
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        debug!("Ensuring directory {} exists", parent.display());
        std::fs::create_dir_all(parent)?;
    }

    let db: DatabaseConnection = match Database::connect(database_url).await {
        Ok(connection) => {
            info!("Successfully connected to database");
            connection
        }
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    let pending = Migrator::get_pending_migrations(&db).await?;
    info!("Running {} pending migrations", pending.len());
    match Migrator::up(&db, None).await {
        Ok(_) => {
            info!("Database migrations completed successfully");
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    info!("Database initialization completed successfully!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_path() {
        assert_eq!(sqlite_path("sqlite://data/cashflow.db?mode=rwc"), Some("data/cashflow.db"));
        assert_eq!(sqlite_path("sqlite:///var/lib/cashflow.db"), Some("/var/lib/cashflow.db"));
        assert_eq!(sqlite_path("sqlite::memory:"), None);
        assert_eq!(sqlite_path("postgresql://localhost/cashflow"), None);
    }

    #[tokio::test]
    async fn test_init_database_is_idempotent() {
        init_database("sqlite::memory:").await.unwrap();
        init_database("sqlite::memory:").await.unwrap();
    }
}
