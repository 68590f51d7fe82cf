use chrono::{Datelike, NaiveDate};
use model::Entry;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::balance::{PeriodTotals, compute_current_balance, compute_day_totals, compute_month_to_date};
use crate::cash_policy::{CashPolicyConfig, CashPosition, evaluate};
use crate::checks::Checked;
use crate::error::ConfigurationError;

/// Everything the landing screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub today: NaiveDate,
    /// Settled, all-time
    pub current_balance: Decimal,
    pub position: CashPosition,
    /// All but obsolete, current month
    pub month_to_date: PeriodTotals,
    /// Settled, today only
    pub today_totals: PeriodTotals,
}

/// Builds the dashboard from the complete entry history.
///
/// Fails only when the cash policy is invalid. Malformed entries are reported once,
/// from the pass over the whole history.
#[instrument(skip(entries, config), fields(num_entries = entries.len(), today = %today))]
pub fn build_dashboard(
    entries: &[Entry],
    config: &CashPolicyConfig,
    today: NaiveDate,
) -> Result<Checked<Dashboard>, ConfigurationError> {
    let (current_balance, issues) = compute_current_balance(entries).into_parts();
    let position = evaluate(current_balance, config)?;
    let month_to_date = compute_month_to_date(entries, today.month(), today.year()).value;
    let today_totals = compute_day_totals(entries, today).value;

    info!("Dashboard: balance {} is {}", current_balance, position.band);

    Ok(Checked::new(
        Dashboard {
            today,
            current_balance,
            position,
            month_to_date,
            today_totals,
        },
        issues,
    ))
}
