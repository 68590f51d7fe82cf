#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use chrono::{Datelike, NaiveDate, Utc};
    use migration::{Migrator, MigratorTrait};
    use model::entities::{classification, entry};
    use model::{EntryKind, FlowCategory, SeaOrmLedgerStore};
    use moka::future::Cache;
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set};
    use std::sync::Arc;
    use std::sync::atomic::AtomicU64;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations, including the default taxonomy and settings
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;

        AppState {
            store: Arc::new(SeaOrmLedgerStore::new(db.clone())),
            db,
            cache: Cache::new(100),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let state = setup_test_app_state().await;
        create_router(state)
    }

    /// App plus a handle on its state, for tests that seed rows directly.
    pub async fn setup_test_app_with_state() -> (Router, AppState) {
        let state = setup_test_app_state().await;
        (create_router(state.clone()), state)
    }

    /// Writes an entry row as-is, bypassing request validation.
    ///
    /// `recorded` overrides the stored day/month/year to simulate drift.
    pub async fn insert_raw_entry(
        db: &DatabaseConnection,
        date: NaiveDate,
        kind: EntryKind,
        amount: Decimal,
        state: &str,
        classification_name: Option<&str>,
        recorded: Option<(i32, i32, i32)>,
    ) -> entry::Model {
        let classification_id = match classification_name {
            Some(name) => classification::Entity::find()
                .filter(classification::Column::Name.eq(name))
                .one(db)
                .await
                .expect("Failed to look up classification")
                .map(|c| c.id),
            None => None,
        };
        let (day, month, year) =
            recorded.unwrap_or((date.day() as i32, date.month() as i32, date.year()));
        let now = Utc::now().naive_utc();

        entry::ActiveModel {
            date: Set(date),
            day: Set(day),
            month: Set(month),
            year: Set(year),
            kind: Set(kind),
            category: Set(FlowCategory::Operational),
            classification_id: Set(classification_id),
            item: Set(None),
            amount: Set(amount),
            settlement_state: Set(state.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to insert entry")
    }
}
