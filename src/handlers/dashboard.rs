use crate::helpers::reports::{
    ReportError, dashboard_report, default_year, monthly_chart_report, top_outflows_report,
};
use crate::schemas::{ApiError, ApiResponse, AppState};
use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use chrono::{Datelike, Local, NaiveDate};
use common::{DashboardDto, MonthlyChartReport, TopOutflowsReport};
use compute::MonthPeriod;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

const DEFAULT_TOP_OUTFLOWS: usize = 10;

/// Query parameters for the dashboard
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct DashboardQuery {
    /// Reference date (default: today)
    pub date: Option<NaiveDate>,
}

/// Query parameters for the monthly chart
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ChartQuery {
    /// Year to chart (default: configured current year)
    pub year: Option<i32>,
}

/// Query parameters for the largest outflows of a month
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams, Validate)]
pub struct TopOutflowsQuery {
    /// Year (default: configured current year)
    pub year: Option<i32>,
    /// Month 1-12 (default: current month)
    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,
    /// Number of classifications to return (default: 10)
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

/// Current cash position and today's figures
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard figures", body = DashboardResponse),
        (status = 422, description = "Cash policy thresholds are invalid", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardDto>>, ApiError> {
    let today = query.date.unwrap_or_else(|| Local::now().date_naive());
    debug!("Building dashboard for {}", today);

    let dashboard = dashboard_report(&state, today).await?;
    info!(
        "Balance {} is {:?} against the cash policy",
        dashboard.current_balance, dashboard.band
    );
    Ok(Json(ApiResponse::ok(dashboard, "Dashboard retrieved successfully")))
}

/// Inflows, outflows and closing balance of every month of a year
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/monthly-chart",
    params(ChartQuery),
    responses(
        (status = 200, description = "Twelve monthly rows", body = MonthlyChartResponse),
        (status = 422, description = "Opening balance setting is invalid", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
#[instrument(skip(state))]
pub async fn get_monthly_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ApiResponse<MonthlyChartReport>>, ApiError> {
    let year = match query.year {
        Some(year) => year,
        None => default_year(state.store.as_ref(), Local::now().date_naive()).await?,
    };

    let chart = monthly_chart_report(&state, year).await?;
    Ok(Json(ApiResponse::ok(chart, "Monthly chart retrieved successfully")))
}

/// Classifications with the largest outflows in a month
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/top-outflows",
    params(TopOutflowsQuery),
    responses(
        (status = 200, description = "Outflow totals by classification, largest first", body = TopOutflowsResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
#[instrument(skip(state))]
pub async fn get_top_outflows(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<TopOutflowsQuery>>,
) -> Result<Json<ApiResponse<TopOutflowsReport>>, ApiError> {
    let today = Local::now().date_naive();
    let year = match query.year {
        Some(year) => year,
        None => default_year(state.store.as_ref(), today).await?,
    };
    let month = query.month.unwrap_or_else(|| today.month());
    let period = MonthPeriod::new(month, year).map_err(ReportError::from)?;

    let report =
        top_outflows_report(&state, period, query.limit.unwrap_or(DEFAULT_TOP_OUTFLOWS)).await?;
    Ok(Json(ApiResponse::ok(report, "Top outflows retrieved successfully")))
}
