//! Conversions from domain and compute types into transport DTOs.

use common::{
    AnnualSummaryDto, CashBandDto, CategoryFlowsDto, ClassificationDto, ClassificationTotalDto,
    ClassificationTypeDto, DailyBalanceDto, DashboardDto, EntryDto, EntryKindDto, FlowCategoryDto,
    MalformedEntryDto, MonthRowDto, MonthlySummaryDto, PeriodTotalsDto, TypeTotalsDto,
};
use compute::{
    AnnualSummary, CashBand, CategoryFlows, ClassificationTotal, DailyBalance, Dashboard,
    MalformedEntryError, MonthRow, MonthlySummary, PeriodTotals, TypeTotals,
};
use model::{Classification, ClassificationType, Entry, EntryKind, FlowCategory};

pub fn entry_kind_to_dto(kind: EntryKind) -> EntryKindDto {
    match kind {
        EntryKind::Inflow => EntryKindDto::Inflow,
        EntryKind::Outflow => EntryKindDto::Outflow,
    }
}

pub fn entry_kind_from_dto(kind: EntryKindDto) -> EntryKind {
    match kind {
        EntryKindDto::Inflow => EntryKind::Inflow,
        EntryKindDto::Outflow => EntryKind::Outflow,
    }
}

pub fn category_to_dto(category: FlowCategory) -> FlowCategoryDto {
    match category {
        FlowCategory::Operational => FlowCategoryDto::Operational,
        FlowCategory::Financial => FlowCategoryDto::Financial,
        FlowCategory::Investment => FlowCategoryDto::Investment,
    }
}

pub fn category_from_dto(category: FlowCategoryDto) -> FlowCategory {
    match category {
        FlowCategoryDto::Operational => FlowCategory::Operational,
        FlowCategoryDto::Financial => FlowCategory::Financial,
        FlowCategoryDto::Investment => FlowCategory::Investment,
    }
}

pub fn classification_type_to_dto(kind: ClassificationType) -> ClassificationTypeDto {
    match kind {
        ClassificationType::FixedCost => ClassificationTypeDto::FixedCost,
        ClassificationType::VariableCost => ClassificationTypeDto::VariableCost,
        ClassificationType::FixedExpense => ClassificationTypeDto::FixedExpense,
        ClassificationType::VariableExpense => ClassificationTypeDto::VariableExpense,
        ClassificationType::Tax => ClassificationTypeDto::Tax,
        ClassificationType::Revenue => ClassificationTypeDto::Revenue,
        ClassificationType::Financial => ClassificationTypeDto::Financial,
        ClassificationType::Investment => ClassificationTypeDto::Investment,
    }
}

pub fn classification_type_from_dto(kind: ClassificationTypeDto) -> ClassificationType {
    match kind {
        ClassificationTypeDto::FixedCost => ClassificationType::FixedCost,
        ClassificationTypeDto::VariableCost => ClassificationType::VariableCost,
        ClassificationTypeDto::FixedExpense => ClassificationType::FixedExpense,
        ClassificationTypeDto::VariableExpense => ClassificationType::VariableExpense,
        ClassificationTypeDto::Tax => ClassificationType::Tax,
        ClassificationTypeDto::Revenue => ClassificationType::Revenue,
        ClassificationTypeDto::Financial => ClassificationType::Financial,
        ClassificationTypeDto::Investment => ClassificationType::Investment,
    }
}

pub fn band_to_dto(band: CashBand) -> CashBandDto {
    match band {
        CashBand::Low => CashBandDto::Low,
        CashBand::Normal => CashBandDto::Normal,
        CashBand::High => CashBandDto::High,
    }
}

pub fn entry_to_dto(entry: &Entry) -> Option<EntryDto> {
    Some(EntryDto {
        id: entry.id()?,
        date: entry.date(),
        day: entry.day(),
        month: entry.month(),
        year: entry.year(),
        kind: entry_kind_to_dto(entry.kind()),
        category: category_to_dto(entry.category()),
        classification: entry.classification().map(str::to_string),
        item: entry.item().map(str::to_string),
        amount: entry.amount(),
        settlement_state: entry.settlement_state().code().to_string(),
    })
}

pub fn classification_to_dto(classification: Classification) -> ClassificationDto {
    ClassificationDto {
        id: classification.id,
        name: classification.name,
        kind: classification_type_to_dto(classification.kind),
        default_category: category_to_dto(classification.default_category),
        active: classification.active,
    }
}

pub fn issue_to_dto(issue: &MalformedEntryError) -> MalformedEntryDto {
    let reason = match issue {
        MalformedEntryError::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
        MalformedEntryError::PeriodMismatch { .. } => "PERIOD_MISMATCH",
    };
    MalformedEntryDto {
        entry_id: issue.entry_id(),
        date: issue.date(),
        reason: reason.to_string(),
        message: issue.to_string(),
        excluded: issue.excluded(),
    }
}

pub fn issues_to_dto(issues: &[MalformedEntryError]) -> Vec<MalformedEntryDto> {
    issues.iter().map(issue_to_dto).collect()
}

pub fn totals_to_dto(totals: &PeriodTotals) -> PeriodTotalsDto {
    PeriodTotalsDto {
        inflows: totals.inflows,
        outflows: totals.outflows,
        net: totals.net(),
    }
}

pub fn daily_balance_to_dto(day: &DailyBalance) -> DailyBalanceDto {
    DailyBalanceDto {
        date: day.date,
        day: day.day(),
        month: day.month(),
        year: day.year(),
        inflow_total: day.inflow_total,
        outflow_total: day.outflow_total,
        net: day.net,
        running_balance: day.running_balance,
    }
}

fn type_totals_to_dto(totals: &TypeTotals) -> TypeTotalsDto {
    TypeTotalsDto {
        fixed_cost: totals.fixed_cost,
        variable_cost: totals.variable_cost,
        fixed_expense: totals.fixed_expense,
        variable_expense: totals.variable_expense,
        tax: totals.tax,
    }
}

fn flows_to_dto(flows: &CategoryFlows) -> CategoryFlowsDto {
    CategoryFlowsDto {
        operational: flows.operational,
        financial: flows.financial,
        investment: flows.investment,
    }
}

pub fn monthly_summary_to_dto(summary: &MonthlySummary) -> MonthlySummaryDto {
    MonthlySummaryDto {
        month: summary.month,
        year: summary.year,
        opening_balance: summary.opening_balance,
        closing_balance: summary.closing_balance,
        total_inflows: summary.total_inflows,
        total_outflows: summary.total_outflows,
        net: summary.net(),
        by_type: type_totals_to_dto(&summary.by_type),
        flows: flows_to_dto(&summary.flows),
    }
}

pub fn month_row_to_dto(row: &MonthRow) -> MonthRowDto {
    MonthRowDto {
        month: row.month,
        inflows: row.inflows,
        outflows: row.outflows,
        closing_balance: row.closing_balance,
    }
}

pub fn annual_summary_to_dto(
    annual: &AnnualSummary,
    issues: &[MalformedEntryError],
) -> AnnualSummaryDto {
    AnnualSummaryDto {
        year: annual.year,
        opening_balance: annual.opening_balance,
        closing_balance: annual.closing_balance,
        total_inflows: annual.total_inflows,
        total_outflows: annual.total_outflows,
        net: annual.net(),
        by_type: type_totals_to_dto(&annual.by_type),
        flows: flows_to_dto(&annual.flows),
        months: annual.months.iter().map(month_row_to_dto).collect(),
        issues: issues_to_dto(issues),
    }
}

pub fn dashboard_to_dto(dashboard: &Dashboard, issues: &[MalformedEntryError]) -> DashboardDto {
    DashboardDto {
        today: dashboard.today,
        current_balance: dashboard.current_balance,
        band: band_to_dto(dashboard.position.band),
        minimum: dashboard.position.minimum,
        return_point: dashboard.position.return_point,
        maximum: dashboard.position.maximum,
        month_to_date: totals_to_dto(&dashboard.month_to_date),
        today_totals: totals_to_dto(&dashboard.today_totals),
        issues: issues_to_dto(issues),
    }
}

pub fn classification_total_to_dto(total: &ClassificationTotal) -> ClassificationTotalDto {
    ClassificationTotalDto {
        classification: total.classification.clone(),
        total: total.total,
        count: total.count,
    }
}
