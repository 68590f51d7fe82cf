use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::{debug, instrument, trace};

use crate::entities::setting::keys;
use crate::entities::{classification, entry, setting};
use crate::error::Result;
use crate::ledger::{Classification, Entry, EntryFilter};

/// Raw cash-policy thresholds as found in the settings table.
///
/// Values are kept as strings; parsing and validation belong to the cash-policy evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CashPolicySettings {
    pub minimum: Option<String>,
    pub return_point: Option<String>,
    pub maximum: Option<String>,
}

/// Read access to the ledger: entries, the classification taxonomy and settings.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Entries matching `filter`, ordered by date ascending (ties by id).
    async fn fetch_entries(&self, filter: &EntryFilter) -> Result<Vec<Entry>>;

    /// Looks up a classification by its exact name.
    async fn fetch_classification_type(&self, name: &str) -> Result<Option<Classification>>;

    /// The whole taxonomy, active and inactive, ordered by name.
    async fn fetch_classifications(&self) -> Result<Vec<Classification>>;

    /// Raw value of a setting key.
    async fn fetch_setting(&self, key: &str) -> Result<Option<String>>;

    /// The three cash-policy thresholds.
    async fn fetch_cash_policy_settings(&self) -> Result<CashPolicySettings> {
        Ok(CashPolicySettings {
            minimum: self.fetch_setting(keys::CASH_POLICY_MINIMUM).await?,
            return_point: self.fetch_setting(keys::CASH_POLICY_RETURN_POINT).await?,
            maximum: self.fetch_setting(keys::CASH_POLICY_MAXIMUM).await?,
        })
    }
}

/// `LedgerStore` backed by a SeaORM connection.
#[derive(Debug, Clone)]
pub struct SeaOrmLedgerStore {
    db: DatabaseConnection,
}

impl SeaOrmLedgerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Translates calendar filters into date bounds so selection follows `date`, not the
/// denormalized day/month/year columns.
fn date_bounds(filter: &EntryFilter) -> (Option<NaiveDate>, Option<NaiveDate>) {
    match (filter.year, filter.month, filter.day) {
        (Some(year), Some(month), Some(day)) => {
            let date = NaiveDate::from_ymd_opt(year, month, day);
            (date, date)
        }
        (Some(year), Some(month), None) => (
            NaiveDate::from_ymd_opt(year, month, 1),
            last_day_of_month(year, month),
        ),
        (Some(year), None, _) => (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ),
        _ => (None, None),
    }
}

#[async_trait]
impl LedgerStore for SeaOrmLedgerStore {
    #[instrument(skip(self))]
    async fn fetch_entries(&self, filter: &EntryFilter) -> Result<Vec<Entry>> {
        let mut query = entry::Entity::find().find_also_related(classification::Entity);

        let (from, to) = date_bounds(filter);
        if filter.year.is_some() && from.is_none() {
            // An impossible calendar date selects nothing.
            debug!("Filter {:?} does not name a valid date", filter);
            return Ok(Vec::new());
        }
        if let Some(from) = from {
            query = query.filter(entry::Column::Date.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(entry::Column::Date.lte(to));
        }
        if filter.year.is_none() {
            if let Some(month) = filter.month {
                query = query.filter(entry::Column::Month.eq(month as i32));
            }
            if let Some(day) = filter.day {
                query = query.filter(entry::Column::Day.eq(day as i32));
            }
        } else if filter.month.is_none() {
            if let Some(day) = filter.day {
                query = query.filter(entry::Column::Day.eq(day as i32));
            }
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(entry::Column::Date.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(entry::Column::Date.lte(date_to));
        }
        if let Some(state) = &filter.settlement_state {
            query = query.filter(entry::Column::SettlementState.eq(state.code().to_string()));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(entry::Column::Kind.eq(kind));
        }
        if let Some(category) = filter.category {
            query = query.filter(entry::Column::Category.eq(category));
        }
        if let Some(name) = &filter.classification {
            query = query.filter(classification::Column::Name.eq(name.as_str()));
        }
        if let Some(item) = &filter.item {
            query = query.filter(entry::Column::Item.contains(item.as_str()));
        }

        query = query
            .order_by_asc(entry::Column::Date)
            .order_by_asc(entry::Column::Id);
        if let Some(skip) = filter.skip {
            query = query.offset(skip);
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let rows = query.all(&self.db).await?;
        debug!("Fetched {} entries", rows.len());

        let entries = rows
            .into_iter()
            .map(|(model, classification)| {
                trace!("Entry id={} date={} amount={}", model.id, model.date, model.amount);
                Entry::from_record(model, classification.map(|c| c.name))
            })
            .collect();

        Ok(entries)
    }

    #[instrument(skip(self))]
    async fn fetch_classification_type(&self, name: &str) -> Result<Option<Classification>> {
        let found = classification::Entity::find()
            .filter(classification::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(found.map(Classification::from))
    }

    #[instrument(skip(self))]
    async fn fetch_classifications(&self) -> Result<Vec<Classification>> {
        let all = classification::Entity::find()
            .order_by_asc(classification::Column::Name)
            .all(&self.db)
            .await?;

        debug!("Fetched {} classifications", all.len());
        Ok(all.into_iter().map(Classification::from).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_setting(&self, key: &str) -> Result<Option<String>> {
        let found = setting::Entity::find()
            .filter(setting::Column::Key.eq(key))
            .one(&self.db)
            .await?;

        Ok(found.map(|s| s.value))
    }
}

/// Reads the opening balance of a tracked year, if configured.
pub async fn opening_balance_setting(store: &dyn LedgerStore) -> Result<Option<String>> {
    store.fetch_setting(keys::OPENING_BALANCE).await
}
