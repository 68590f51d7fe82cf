use crate::helpers::reports::{annual_report, default_year, monthly_summaries_report};
use crate::schemas::{ApiError, ApiResponse, AppState};
use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use chrono::Local;
use common::{AnnualSummaryDto, MonthlySummariesReport};
use serde::Deserialize;
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters for the monthly summaries
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams, Validate)]
pub struct SummaryQuery {
    /// Year (default: configured current year)
    pub year: Option<i32>,
    /// Only this month (1-12); every month when absent
    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,
}

/// Query parameters for the annual summary
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct AnnualQuery {
    /// Year (default: configured current year)
    pub year: Option<i32>,
}

async fn resolve_year(state: &AppState, year: Option<i32>) -> Result<i32, ApiError> {
    match year {
        Some(year) => Ok(year),
        None => Ok(default_year(state.store.as_ref(), Local::now().date_naive()).await?),
    }
}

/// Monthly summaries of a year, each opening with the previous month's closing balance
#[utoipa::path(
    get,
    path = "/api/v1/summaries/monthly",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Chained monthly summaries", body = MonthlySummariesResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 422, description = "Opening balance setting is invalid", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
#[instrument(skip(state))]
pub async fn get_monthly_summaries(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<SummaryQuery>>,
) -> Result<Json<ApiResponse<MonthlySummariesReport>>, ApiError> {
    let year = resolve_year(&state, query.year).await?;
    debug!("Monthly summaries for {} month {:?}", year, query.month);

    let report = monthly_summaries_report(&state, year, query.month).await?;
    Ok(Json(ApiResponse::ok(report, "Monthly summaries retrieved successfully")))
}

/// Totals of a whole year
#[utoipa::path(
    get,
    path = "/api/v1/summaries/annual",
    params(AnnualQuery),
    responses(
        (status = 200, description = "Annual totals", body = AnnualSummaryResponse),
        (status = 422, description = "Opening balance setting is invalid", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
#[instrument(skip(state))]
pub async fn get_annual_summary(
    State(state): State<AppState>,
    Query(query): Query<AnnualQuery>,
) -> Result<Json<ApiResponse<AnnualSummaryDto>>, ApiError> {
    let year = resolve_year(&state, query.year).await?;

    let summary = annual_report(&state, year).await?;
    Ok(Json(ApiResponse::ok(summary, "Annual summary retrieved successfully")))
}
