use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{http::StatusCode, response::Json};
use common::{
    AnnualSummaryDto, CashBandDto, CashFlowReport, CategoryFlowsDto, ClassificationDto,
    ClassificationTotalDto, ClassificationTypeDto, ClassificationTypeInfo,
    CreateClassificationRequest, CreateEntryRequest, DailyBalanceDto, DashboardDto, EntryDto,
    EntryKindDto, FlowCategoryDto, MalformedEntryDto, MonthRowDto, MonthlyChartReport,
    MonthlySummariesReport, MonthlySummaryDto, PeriodTotalsDto, SettingDto, TopOutflowsReport,
    TypeTotalsDto, UpdateClassificationRequest, UpdateEntryRequest, UpdateSettingRequest,
};
use model::LedgerStore;
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection, used for writes
    pub db: DatabaseConnection,
    /// Read access for the reports
    pub store: Arc<dyn LedgerStore>,
    /// Cache for derived reports, cleared on every write
    pub cache: Cache<String, CachedData>,
    /// Bumped on every write; part of each report cache key
    pub generation: Arc<AtomicU64>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("cached_reports", &self.cache.entry_count())
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish()
    }
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Dashboard(DashboardDto),
    CashFlow(CashFlowReport),
    MonthlySummaries(MonthlySummariesReport),
    AnnualSummary(AnnualSummaryDto),
    MonthlyChart(MonthlyChartReport),
    TopOutflows(TopOutflowsReport),
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[aliases(
    EntryResponse = ApiResponse<EntryDto>,
    EntryListResponse = ApiResponse<Vec<EntryDto>>,
    ClassificationResponse = ApiResponse<ClassificationDto>,
    ClassificationListResponse = ApiResponse<Vec<ClassificationDto>>,
    ClassificationTypesResponse = ApiResponse<Vec<ClassificationTypeInfo>>,
    SettingResponse = ApiResponse<SettingDto>,
    SettingListResponse = ApiResponse<Vec<SettingDto>>,
    DashboardResponse = ApiResponse<DashboardDto>,
    MonthlyChartResponse = ApiResponse<MonthlyChartReport>,
    TopOutflowsResponse = ApiResponse<TopOutflowsReport>,
    CashFlowResponse = ApiResponse<CashFlowReport>,
    MonthlySummariesResponse = ApiResponse<MonthlySummariesReport>,
    AnnualSummaryResponse = ApiResponse<AnnualSummaryDto>,
)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Builds an [`ApiError`].
pub fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::entries::get_entries,
        crate::handlers::entries::get_entry,
        crate::handlers::entries::create_entry,
        crate::handlers::entries::update_entry,
        crate::handlers::entries::delete_entry,
        crate::handlers::entries::toggle_settlement,
        crate::handlers::classifications::get_classifications,
        crate::handlers::classifications::get_classification_types,
        crate::handlers::classifications::create_classification,
        crate::handlers::classifications::update_classification,
        crate::handlers::classifications::deactivate_classification,
        crate::handlers::settings::get_settings,
        crate::handlers::settings::update_setting,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::dashboard::get_monthly_chart,
        crate::handlers::dashboard::get_top_outflows,
        crate::handlers::cash_flow::get_cash_flow,
        crate::handlers::summaries::get_monthly_summaries,
        crate::handlers::summaries::get_annual_summary,
    ),
    components(
        schemas(
            EntryResponse,
            EntryListResponse,
            ClassificationResponse,
            ClassificationListResponse,
            ClassificationTypesResponse,
            SettingResponse,
            SettingListResponse,
            DashboardResponse,
            MonthlyChartResponse,
            TopOutflowsResponse,
            CashFlowResponse,
            MonthlySummariesResponse,
            AnnualSummaryResponse,
            ErrorResponse,
            HealthResponse,
            EntryDto,
            EntryKindDto,
            FlowCategoryDto,
            CreateEntryRequest,
            UpdateEntryRequest,
            ClassificationDto,
            ClassificationTypeDto,
            ClassificationTypeInfo,
            CreateClassificationRequest,
            UpdateClassificationRequest,
            SettingDto,
            UpdateSettingRequest,
            DashboardDto,
            CashBandDto,
            PeriodTotalsDto,
            MalformedEntryDto,
            MonthlyChartReport,
            MonthRowDto,
            TopOutflowsReport,
            ClassificationTotalDto,
            CashFlowReport,
            DailyBalanceDto,
            MonthlySummariesReport,
            MonthlySummaryDto,
            TypeTotalsDto,
            CategoryFlowsDto,
            AnnualSummaryDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "entries", description = "Ledger entry management"),
        (name = "classifications", description = "Classification taxonomy"),
        (name = "settings", description = "Cash policy and ledger settings"),
        (name = "reports", description = "Dashboard, cash flow and summaries"),
    ),
    info(
        title = "Cashflow API",
        description = "Cash management for a small business: ledger entries, daily cash flow, monthly summaries and a three-threshold cash policy",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
