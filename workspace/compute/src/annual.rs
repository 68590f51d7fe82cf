use rust_decimal::Decimal;
use tracing::instrument;

use crate::monthly::{CategoryFlows, MonthlySummary, TypeTotals};

/// One row of the yearly report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRow {
    pub month: u32,
    pub inflows: Decimal,
    pub outflows: Decimal,
    pub closing_balance: Decimal,
}

/// A year rolled up from its chained monthly summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnualSummary {
    pub year: i32,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub total_inflows: Decimal,
    pub total_outflows: Decimal,
    pub by_type: TypeTotals,
    pub flows: CategoryFlows,
    pub months: Vec<MonthRow>,
}

impl AnnualSummary {
    pub fn net(&self) -> Decimal {
        self.total_inflows - self.total_outflows
    }
}

/// Rolls chained monthly summaries of one year into a yearly report.
///
/// Expects the output of [`crate::chain_year`]: months in order, each opening with
/// the previous closing. Opening and closing come from the first and last month.
#[instrument(skip(months), fields(num_months = months.len()))]
pub fn compute_annual_summary(months: &[MonthlySummary]) -> AnnualSummary {
    let year = months.first().map(|m| m.year).unwrap_or_default();
    let opening_balance = months.first().map(|m| m.opening_balance).unwrap_or_default();
    let closing_balance = months
        .last()
        .map(|m| m.closing_balance)
        .unwrap_or(opening_balance);

    let mut by_type = TypeTotals::default();
    let mut flows = CategoryFlows::default();
    let mut total_inflows = Decimal::ZERO;
    let mut total_outflows = Decimal::ZERO;

    let rows = months
        .iter()
        .map(|m| {
            total_inflows += m.total_inflows;
            total_outflows += m.total_outflows;
            by_type.add(&m.by_type);
            flows.add(&m.flows);
            MonthRow {
                month: m.month,
                inflows: m.total_inflows,
                outflows: m.total_outflows,
                closing_balance: m.closing_balance,
            }
        })
        .collect();

    AnnualSummary {
        year,
        opening_balance,
        closing_balance,
        total_inflows,
        total_outflows,
        by_type,
        flows,
        months: rows,
    }
}
