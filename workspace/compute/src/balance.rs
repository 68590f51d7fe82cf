//! Two accounting rules live here and must not be merged.
//!
//! The current balance counts settled entries only, over the whole history.
//! Month-to-date totals count everything except obsolete entries, within one month.

use chrono::NaiveDate;
use model::{Entry, EntryKind};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::checks::{Checked, screen};

/// Inflow and outflow totals over some period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodTotals {
    pub inflows: Decimal,
    pub outflows: Decimal,
}

impl PeriodTotals {
    pub fn net(&self) -> Decimal {
        self.inflows - self.outflows
    }

    fn add(&mut self, entry: &Entry) {
        match entry.kind() {
            EntryKind::Inflow => self.inflows += entry.amount(),
            EntryKind::Outflow => self.outflows += entry.amount(),
        }
    }
}

/// Settled inflows minus settled outflows, over every entry given.
#[instrument(skip(entries), fields(num_entries = entries.len()))]
pub fn compute_current_balance(entries: &[Entry]) -> Checked<Decimal> {
    let (usable, issues) = screen(entries);

    let mut totals = PeriodTotals::default();
    usable
        .into_iter()
        .filter(|e| e.settlement_state().is_settled())
        .for_each(|e| totals.add(e));

    debug!("Current balance: {}", totals.net());
    Checked::new(totals.net(), issues)
}

/// Totals of one month, settled and unsettled alike. Obsolete entries do not count.
#[instrument(skip(entries), fields(num_entries = entries.len()))]
pub fn compute_month_to_date(entries: &[Entry], month: u32, year: i32) -> Checked<PeriodTotals> {
    let (usable, issues) = screen(entries.iter().filter(|e| e.in_month(month, year)));

    let mut totals = PeriodTotals::default();
    usable
        .into_iter()
        .filter(|e| !e.settlement_state().is_obsolete())
        .for_each(|e| totals.add(e));

    Checked::new(totals, issues)
}

/// Settled totals of a single day.
#[instrument(skip(entries), fields(num_entries = entries.len()))]
pub fn compute_day_totals(entries: &[Entry], date: NaiveDate) -> Checked<PeriodTotals> {
    let (usable, issues) = screen(entries.iter().filter(|e| e.date() == date));

    let mut totals = PeriodTotals::default();
    usable
        .into_iter()
        .filter(|e| e.settlement_state().is_settled())
        .for_each(|e| totals.add(e));

    Checked::new(totals, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monthly::{Taxonomy, compute_monthly_summary};
    use model::SettlementState;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn one_of_each_state(amount: Decimal) -> Vec<Entry> {
        vec![
            Entry::inflow(date(2025, 6, 1), amount),
            Entry::inflow(date(2025, 6, 2), amount).with_state(SettlementState::Unsettled),
            Entry::inflow(date(2025, 6, 3), amount).with_state(SettlementState::Obsolete),
        ]
    }

    #[test]
    fn test_current_balance_counts_settled_only() {
        let entries = vec![
            Entry::inflow(date(2024, 1, 1), dec!(1000)),
            Entry::outflow(date(2025, 6, 1), dec!(250)),
            Entry::outflow(date(2025, 6, 2), dec!(80)).with_state(SettlementState::Unsettled),
            Entry::inflow(date(2025, 6, 3), dec!(500)).with_state(SettlementState::Obsolete),
            Entry::inflow(date(2025, 6, 4), dec!(9)).with_state(SettlementState::Other("X".into())),
        ];

        assert_eq!(compute_current_balance(&entries).value, dec!(750));
    }

    #[test]
    fn test_dual_accounting_differs_by_unsettled_amount() {
        let entries = one_of_each_state(dec!(123.45));

        let current = compute_current_balance(&entries).value;
        let summary = compute_monthly_summary(&entries, 6, 2025, dec!(0), &Taxonomy::new()).value;

        assert_eq!(summary.closing_balance - current, dec!(123.45));
        assert_eq!(compute_month_to_date(&entries, 6, 2025).value.net() - current, dec!(123.45));
    }

    #[test]
    fn test_month_to_date_scope() {
        let entries = vec![
            Entry::inflow(date(2025, 6, 1), dec!(10)),
            Entry::outflow(date(2025, 6, 30), dec!(4)).with_state(SettlementState::Unsettled),
            Entry::inflow(date(2025, 7, 1), dec!(1000)),
        ];

        let totals = compute_month_to_date(&entries, 6, 2025).value;

        assert_eq!(totals.inflows, dec!(10));
        assert_eq!(totals.outflows, dec!(4));
        assert_eq!(totals.net(), dec!(6));
    }

    #[test]
    fn test_day_totals_settled_only() {
        let entries = vec![
            Entry::inflow(date(2025, 6, 5), dec!(10)),
            Entry::inflow(date(2025, 6, 5), dec!(20)).with_state(SettlementState::Unsettled),
            Entry::outflow(date(2025, 6, 5), dec!(3)),
            Entry::outflow(date(2025, 6, 6), dec!(300)),
        ];

        let totals = compute_day_totals(&entries, date(2025, 6, 5)).value;

        assert_eq!(totals, PeriodTotals { inflows: dec!(10), outflows: dec!(3) });
    }

    #[test]
    fn test_empty_history_is_zero() {
        assert_eq!(compute_current_balance(&[]).value, Decimal::ZERO);
        assert_eq!(compute_month_to_date(&[], 1, 2025).value, PeriodTotals::default());
    }
}
