use crate::helpers::reports::{ReportError, cash_flow_report, default_year};
use crate::schemas::{ApiError, ApiResponse, AppState};
use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use chrono::{Datelike, Local};
use common::CashFlowReport;
use compute::MonthPeriod;
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters for the daily cash flow
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams, Validate)]
pub struct CashFlowQuery {
    /// Year (default: configured current year)
    pub year: Option<i32>,
    /// Month 1-12 (default: current month)
    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,
}

/// Day-by-day running balance of a month
///
/// Every entry of the month counts, whatever its settlement state. The month opens
/// with the closing balance of the previous month of the same year.
#[utoipa::path(
    get,
    path = "/api/v1/cash-flow",
    params(CashFlowQuery),
    responses(
        (status = 200, description = "Daily balances of the month", body = CashFlowResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 422, description = "Opening balance setting is invalid", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
#[instrument(skip(state))]
pub async fn get_cash_flow(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<CashFlowQuery>>,
) -> Result<Json<ApiResponse<CashFlowReport>>, ApiError> {
    let today = Local::now().date_naive();
    let year = match query.year {
        Some(year) => year,
        None => default_year(state.store.as_ref(), today).await?,
    };
    let month = query.month.unwrap_or_else(|| today.month());
    let period = MonthPeriod::new(month, year).map_err(ReportError::from)?;

    let report = cash_flow_report(&state, period).await?;
    info!(
        "Cash flow for {} has {} days, closing at {}",
        period,
        report.days.len(),
        report.closing_balance
    );
    Ok(Json(ApiResponse::ok(report, "Cash flow retrieved successfully")))
}
