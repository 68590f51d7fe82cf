use crate::handlers::{
    cash_flow::get_cash_flow,
    classifications::{
        create_classification, deactivate_classification, get_classification_types,
        get_classifications, update_classification,
    },
    dashboard::{get_dashboard, get_monthly_chart, get_top_outflows},
    entries::{
        create_entry, delete_entry, get_entries, get_entry, toggle_settlement, update_entry,
    },
    health::health_check,
    settings::{get_settings, update_setting},
    summaries::{get_annual_summary, get_monthly_summaries},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, patch, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Entry routes
        .route("/api/v1/entries", get(get_entries).post(create_entry))
        .route(
            "/api/v1/entries/:id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/api/v1/entries/:id/settle", patch(toggle_settlement))
        // Classification routes
        .route(
            "/api/v1/classifications",
            get(get_classifications).post(create_classification),
        )
        .route("/api/v1/classifications/types", get(get_classification_types))
        .route(
            "/api/v1/classifications/:id",
            put(update_classification).delete(deactivate_classification),
        )
        // Settings
        .route("/api/v1/settings", get(get_settings))
        .route("/api/v1/settings/:key", put(update_setting))
        // Reports
        .route("/api/v1/dashboard", get(get_dashboard))
        .route("/api/v1/dashboard/monthly-chart", get(get_monthly_chart))
        .route("/api/v1/dashboard/top-outflows", get(get_top_outflows))
        .route("/api/v1/cash-flow", get(get_cash_flow))
        .route("/api/v1/summaries/monthly", get(get_monthly_summaries))
        .route("/api/v1/summaries/annual", get(get_annual_summary))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
