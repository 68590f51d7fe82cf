//! Ledger aggregation and cash-position evaluation.
//!
//! Everything here is a pure function over a snapshot of entries handed in by the
//! caller. Nothing is read from or written to storage, so any function can run
//! concurrently with any other.
//!
//! Malformed entries never fail a computation: results come wrapped in
//! [`Checked`], which carries the problems found next to the value.

pub mod annual;
pub mod balance;
pub mod breakdown;
pub mod cash_policy;
pub mod checks;
pub mod daily;
pub mod dashboard;
pub mod error;
pub mod monthly;
pub mod period;

pub use annual::{AnnualSummary, MonthRow, compute_annual_summary};
pub use balance::{PeriodTotals, compute_current_balance, compute_day_totals, compute_month_to_date};
pub use breakdown::{ClassificationTotal, UNCLASSIFIED, top_outflows};
pub use cash_policy::{CashBand, CashPolicyConfig, CashPosition, evaluate};
pub use checks::Checked;
pub use daily::{DailyBalance, DailyBalances, compute_daily_balances};
pub use dashboard::{Dashboard, build_dashboard};
pub use error::{ComputeError, ConfigurationError, MalformedEntryError};
pub use monthly::{
    CategoryFlows, MonthlySummary, Taxonomy, TypeTotals, chain_year, compute_monthly_summary,
    opening_balance_for,
};
pub use period::MonthPeriod;
