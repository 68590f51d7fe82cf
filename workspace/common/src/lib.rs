//! Transport-layer types of the cash-management API.
//!
//! These are the JSON shapes handlers accept and return. They carry no behavior;
//! conversion from the domain and compute types lives with the server.

mod ledger;
mod reports;

pub use ledger::{
    ClassificationDto, ClassificationTypeDto, ClassificationTypeInfo, CreateClassificationRequest,
    CreateEntryRequest, EntryDto, EntryKindDto, FlowCategoryDto, SettingDto,
    UpdateClassificationRequest, UpdateEntryRequest, UpdateSettingRequest,
};
pub use reports::{
    AnnualSummaryDto, CashBandDto, CashFlowReport, CategoryFlowsDto, ClassificationTotalDto,
    DailyBalanceDto, DashboardDto, MalformedEntryDto, MonthRowDto, MonthlyChartReport,
    MonthlySummariesReport, MonthlySummaryDto, PeriodTotalsDto, TopOutflowsReport, TypeTotalsDto,
};
