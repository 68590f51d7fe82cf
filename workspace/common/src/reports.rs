use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored entry that broke a ledger rule while a report was computed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MalformedEntryDto {
    pub entry_id: Option<i32>,
    pub date: NaiveDate,
    /// NEGATIVE_AMOUNT or PERIOD_MISMATCH
    pub reason: String,
    pub message: String,
    /// Whether the entry was left out of the figures
    pub excluded: bool,
}

/// Inflow and outflow totals of a period.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PeriodTotalsDto {
    pub inflows: Decimal,
    pub outflows: Decimal,
    pub net: Decimal,
}

// ===================== Cash flow =====================

/// A day with activity and the balance after it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DailyBalanceDto {
    pub date: NaiveDate,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub inflow_total: Decimal,
    pub outflow_total: Decimal,
    pub net: Decimal,
    pub running_balance: Decimal,
}

/// Daily cash flow of a month.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CashFlowReport {
    pub year: i32,
    pub month: u32,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub days: Vec<DailyBalanceDto>,
    pub issues: Vec<MalformedEntryDto>,
}

// ===================== Summaries =====================

/// Totals per cost and expense type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TypeTotalsDto {
    pub fixed_cost: Decimal,
    pub variable_cost: Decimal,
    pub fixed_expense: Decimal,
    pub variable_expense: Decimal,
    pub tax: Decimal,
}

/// Net flow per category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryFlowsDto {
    pub operational: Decimal,
    pub financial: Decimal,
    pub investment: Decimal,
}

/// Summary of one month.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthlySummaryDto {
    pub month: u32,
    pub year: i32,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub total_inflows: Decimal,
    pub total_outflows: Decimal,
    pub net: Decimal,
    pub by_type: TypeTotalsDto,
    pub flows: CategoryFlowsDto,
}

/// Chained monthly summaries of a year, or a single month of it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthlySummariesReport {
    pub year: i32,
    pub months: Vec<MonthlySummaryDto>,
    pub issues: Vec<MalformedEntryDto>,
}

/// A month in the yearly overview.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthRowDto {
    pub month: u32,
    pub inflows: Decimal,
    pub outflows: Decimal,
    pub closing_balance: Decimal,
}

/// Yearly report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AnnualSummaryDto {
    pub year: i32,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub total_inflows: Decimal,
    pub total_outflows: Decimal,
    pub net: Decimal,
    pub by_type: TypeTotalsDto,
    pub flows: CategoryFlowsDto,
    pub months: Vec<MonthRowDto>,
    pub issues: Vec<MalformedEntryDto>,
}

// ===================== Dashboard =====================

/// Position of the balance relative to the cash policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashBandDto {
    Low,
    Normal,
    High,
}

/// Landing screen figures.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardDto {
    pub today: NaiveDate,
    /// Settled entries only, whole history
    pub current_balance: Decimal,
    pub band: CashBandDto,
    pub minimum: Decimal,
    pub return_point: Decimal,
    pub maximum: Decimal,
    /// Everything but obsolete entries, current month
    pub month_to_date: PeriodTotalsDto,
    /// Settled entries of today
    pub today_totals: PeriodTotalsDto,
    pub issues: Vec<MalformedEntryDto>,
}

/// Month by month inflows, outflows and closing balances for charting.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthlyChartReport {
    pub year: i32,
    pub months: Vec<MonthRowDto>,
    pub issues: Vec<MalformedEntryDto>,
}

/// Outflow total of one classification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClassificationTotalDto {
    pub classification: String,
    pub total: Decimal,
    pub count: usize,
}

/// Largest outflows of a month, grouped by classification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TopOutflowsReport {
    pub year: i32,
    pub month: u32,
    pub items: Vec<ClassificationTotalDto>,
    pub issues: Vec<MalformedEntryDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_serializes_as_string() {
        let totals = PeriodTotalsDto {
            inflows: dec!(10.50),
            outflows: dec!(0.25),
            net: dec!(10.25),
        };

        let json = serde_json::to_value(&totals).unwrap();

        assert_eq!(json["inflows"], "10.50");
        assert_eq!(json["net"], "10.25");
    }

    #[test]
    fn test_band_wire_names() {
        assert_eq!(serde_json::to_string(&CashBandDto::Normal).unwrap(), "\"NORMAL\"");
    }
}
