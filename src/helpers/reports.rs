//! Glue between the ledger store and the compute crate.
//!
//! Every report fetches a snapshot from the store, runs the pure computations on it
//! and converts the result into its DTO. Results are cached in [`AppState::cache`]
//! until the next write. Cache keys carry the write generation read before the
//! snapshot, so a report computed across a concurrent write is never served after it.

use std::str::FromStr;
use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use chrono::{Datelike, NaiveDate};
use common::{
    AnnualSummaryDto, CashFlowReport, DashboardDto, MonthlyChartReport, MonthlySummariesReport,
    TopOutflowsReport,
};
use compute::{
    CashPolicyConfig, ComputeError, ConfigurationError, MonthPeriod, Taxonomy, build_dashboard,
    chain_year, compute_annual_summary, compute_daily_balances, opening_balance_for, top_outflows,
};
use model::entities::setting::keys;
use model::store::opening_balance_setting;
use model::{EntryFilter, LedgerStore, StoreError};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use crate::helpers::converters::{
    annual_summary_to_dto, classification_total_to_dto, daily_balance_to_dto, dashboard_to_dto,
    issues_to_dto, month_row_to_dto, monthly_summary_to_dto,
};
use crate::schemas::{ApiError, AppState, CachedData, api_error};

/// Errors raised while building a report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Compute(#[from] ComputeError),

    #[error("Setting '{key}' has an invalid value '{value}'")]
    InvalidSetting { key: String, value: String },
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match &err {
            ReportError::Store(e) => {
                error!("Store error while building report: {}", e);
                api_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Failed to read the ledger",
                )
            }
            ReportError::Configuration(e) => {
                warn!("Cash policy configuration rejected: {}", e);
                api_error(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "CASH_POLICY_CONFIGURATION",
                    e.to_string(),
                )
            }
            ReportError::Compute(ComputeError::InvalidPeriod(period)) => api_error(
                StatusCode::BAD_REQUEST,
                "INVALID_PERIOD",
                format!("Invalid period: {}", period),
            ),
            ReportError::Compute(e) => {
                error!("Compute error: {}", e);
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "COMPUTE_ERROR", e.to_string())
            }
            ReportError::InvalidSetting { .. } => {
                warn!("{}", err);
                api_error(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_SETTING", err.to_string())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// Drops every cached report. Called after any write, once it is committed.
pub async fn invalidate_reports(state: &AppState) {
    let generation = state.generation.fetch_add(1, Ordering::SeqCst) + 1;
    debug!(
        "Invalidating {} cached reports, now at generation {}",
        state.cache.entry_count(),
        generation
    );
    state.cache.invalidate_all();
}

/// Cache key of a report under the current write generation.
///
/// Must be taken before the snapshot is read.
pub fn report_key(state: &AppState, report: &str) -> String {
    format!("{}@{}", report, state.generation.load(Ordering::SeqCst))
}

/// Taxonomy of every classification, active or not.
pub async fn load_taxonomy(store: &dyn LedgerStore) -> Result<Taxonomy> {
    Ok(store.fetch_classifications().await?.into_iter().collect())
}

/// Cash policy from the settings table.
pub async fn load_cash_policy(store: &dyn LedgerStore) -> Result<CashPolicyConfig> {
    let settings = store.fetch_cash_policy_settings().await?;
    Ok(CashPolicyConfig::from_settings(&settings)?)
}

/// Balance January opens with; zero when not configured.
pub async fn initial_opening(store: &dyn LedgerStore) -> Result<Decimal> {
    match opening_balance_setting(store).await? {
        None => Ok(Decimal::ZERO),
        Some(raw) => Decimal::from_str(raw.trim()).map_err(|_| ReportError::InvalidSetting {
            key: keys::OPENING_BALANCE.to_string(),
            value: raw,
        }),
    }
}

/// The configured current year, or the year of `today`.
pub async fn default_year(store: &dyn LedgerStore, today: NaiveDate) -> Result<i32> {
    let configured = store.fetch_setting(keys::CURRENT_YEAR).await?;
    Ok(configured
        .and_then(|raw| match raw.trim().parse::<i32>() {
            Ok(year) => Some(year),
            Err(_) => {
                warn!("Ignoring unparsable {} setting '{}'", keys::CURRENT_YEAR, raw);
                None
            }
        })
        .unwrap_or_else(|| today.year()))
}

#[instrument(skip(state))]
pub async fn dashboard_report(state: &AppState, today: NaiveDate) -> Result<DashboardDto> {
    let key = report_key(state, &format!("dashboard:{}", today));
    if let Some(CachedData::Dashboard(cached)) = state.cache.get(&key).await {
        debug!("Serving dashboard from cache");
        return Ok(cached);
    }

    let store = state.store.as_ref();
    let config = load_cash_policy(store).await?;
    let entries = store.fetch_entries(&EntryFilter::all()).await?;
    let dashboard = build_dashboard(&entries, &config, today)?;

    let dto = dashboard_to_dto(&dashboard.value, &dashboard.issues);
    state.cache.insert(key, CachedData::Dashboard(dto.clone())).await;
    Ok(dto)
}

#[instrument(skip(state))]
pub async fn cash_flow_report(state: &AppState, period: MonthPeriod) -> Result<CashFlowReport> {
    let key = report_key(state, &format!("cash-flow:{}", period));
    if let Some(CachedData::CashFlow(cached)) = state.cache.get(&key).await {
        debug!("Serving cash flow from cache");
        return Ok(cached);
    }

    let store = state.store.as_ref();
    let initial = initial_opening(store).await?;
    let year_entries = store.fetch_entries(&EntryFilter::for_year(period.year())).await?;
    let opening = opening_balance_for(&year_entries, period.month(), period.year(), initial);

    let month_entries: Vec<_> = year_entries
        .into_iter()
        .filter(|e| period.contains(e.date()))
        .collect();
    let daily = compute_daily_balances(&month_entries, opening);

    let report = CashFlowReport {
        year: period.year(),
        month: period.month(),
        opening_balance: daily.value.opening,
        closing_balance: daily.value.closing,
        days: daily.value.days.iter().map(daily_balance_to_dto).collect(),
        issues: issues_to_dto(&daily.issues),
    };
    state.cache.insert(key, CachedData::CashFlow(report.clone())).await;
    Ok(report)
}

/// Chained summaries of a year, narrowed to one month when `month` is given.
#[instrument(skip(state))]
pub async fn monthly_summaries_report(
    state: &AppState,
    year: i32,
    month: Option<u32>,
) -> Result<MonthlySummariesReport> {
    if let Some(month) = month {
        MonthPeriod::new(month, year)?;
    }
    let key = match month {
        Some(month) => report_key(state, &format!("summaries:{}-{:02}", year, month)),
        None => report_key(state, &format!("summaries:{}", year)),
    };
    if let Some(CachedData::MonthlySummaries(cached)) = state.cache.get(&key).await {
        debug!("Serving monthly summaries from cache");
        return Ok(cached);
    }

    let store = state.store.as_ref();
    let taxonomy = load_taxonomy(store).await?;
    let initial = initial_opening(store).await?;
    let entries = store.fetch_entries(&EntryFilter::for_year(year)).await?;
    let chained = chain_year(&entries, year, initial, &taxonomy);

    let months = chained
        .value
        .iter()
        .filter(|s| month.is_none_or(|m| s.month == m))
        .map(monthly_summary_to_dto)
        .collect();
    let issues = chained
        .issues
        .iter()
        .filter(|issue| match month {
            Some(m) => issue.date().month() == m,
            None => true,
        })
        .cloned()
        .collect::<Vec<_>>();

    let report = MonthlySummariesReport {
        year,
        months,
        issues: issues_to_dto(&issues),
    };
    state
        .cache
        .insert(key, CachedData::MonthlySummaries(report.clone()))
        .await;
    Ok(report)
}

#[instrument(skip(state))]
pub async fn annual_report(state: &AppState, year: i32) -> Result<AnnualSummaryDto> {
    let key = report_key(state, &format!("annual:{}", year));
    if let Some(CachedData::AnnualSummary(cached)) = state.cache.get(&key).await {
        debug!("Serving annual summary from cache");
        return Ok(cached);
    }

    let store = state.store.as_ref();
    let taxonomy = load_taxonomy(store).await?;
    let initial = initial_opening(store).await?;
    let entries = store.fetch_entries(&EntryFilter::for_year(year)).await?;
    let chained = chain_year(&entries, year, initial, &taxonomy);
    let annual = compute_annual_summary(&chained.value);

    let dto = annual_summary_to_dto(&annual, &chained.issues);
    state.cache.insert(key, CachedData::AnnualSummary(dto.clone())).await;
    Ok(dto)
}

#[instrument(skip(state))]
pub async fn monthly_chart_report(state: &AppState, year: i32) -> Result<MonthlyChartReport> {
    let key = report_key(state, &format!("chart:{}", year));
    if let Some(CachedData::MonthlyChart(cached)) = state.cache.get(&key).await {
        debug!("Serving monthly chart from cache");
        return Ok(cached);
    }

    let store = state.store.as_ref();
    let initial = initial_opening(store).await?;
    let entries = store.fetch_entries(&EntryFilter::for_year(year)).await?;
    let chained = chain_year(&entries, year, initial, &Taxonomy::new());
    let annual = compute_annual_summary(&chained.value);

    let report = MonthlyChartReport {
        year,
        months: annual.months.iter().map(month_row_to_dto).collect(),
        issues: issues_to_dto(&chained.issues),
    };
    state
        .cache
        .insert(key, CachedData::MonthlyChart(report.clone()))
        .await;
    Ok(report)
}

#[instrument(skip(state))]
pub async fn top_outflows_report(
    state: &AppState,
    period: MonthPeriod,
    limit: usize,
) -> Result<TopOutflowsReport> {
    let key = report_key(state, &format!("top-outflows:{}:{}", period, limit));
    if let Some(CachedData::TopOutflows(cached)) = state.cache.get(&key).await {
        debug!("Serving top outflows from cache");
        return Ok(cached);
    }

    let entries = state
        .store
        .fetch_entries(&EntryFilter::for_month(period.year(), period.month()))
        .await?;
    let top = top_outflows(&entries, period.month(), period.year(), limit);

    let report = TopOutflowsReport {
        year: period.year(),
        month: period.month(),
        items: top.value.iter().map(classification_total_to_dto).collect(),
        issues: issues_to_dto(&top.issues),
    };
    state
        .cache
        .insert(key, CachedData::TopOutflows(report.clone()))
        .await;
    Ok(report)
}
