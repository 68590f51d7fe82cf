use std::str::FromStr;

use crate::helpers::reports::{ReportError, invalidate_reports};
use crate::schemas::{ApiError, ApiResponse, AppState, api_error};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use common::{SettingDto, UpdateSettingRequest};
use compute::CashPolicyConfig;
use model::entities::setting::{self, keys};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{debug, error, info, instrument, warn};

fn setting_to_dto(model: setting::Model) -> SettingDto {
    SettingDto {
        key: model.key,
        value: model.value,
        description: model.description,
    }
}

fn db_error(context: &str, e: impl std::fmt::Display) -> ApiError {
    error!("{}: {}", context, e);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", context)
}

fn invalid_setting(key: &str, value: &str) -> ApiError {
    ReportError::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

/// Checks a new value against the rules of its key before it is stored.
///
/// Threshold changes are validated together with the two thresholds already stored,
/// so the policy stays ordered.
async fn validate_value(state: &AppState, key: &str, value: &str) -> Result<(), ApiError> {
    match key {
        keys::CASH_POLICY_MINIMUM | keys::CASH_POLICY_RETURN_POINT | keys::CASH_POLICY_MAXIMUM => {
            let mut policy = state
                .store
                .fetch_cash_policy_settings()
                .await
                .map_err(|e| db_error("Failed to read cash policy", e))?;
            let candidate = Some(value.to_string());
            match key {
                keys::CASH_POLICY_MINIMUM => policy.minimum = candidate,
                keys::CASH_POLICY_RETURN_POINT => policy.return_point = candidate,
                _ => policy.maximum = candidate,
            }
            CashPolicyConfig::from_settings(&policy)
                .map(|_| ())
                .map_err(|e| ReportError::from(e).into())
        }
        keys::OPENING_BALANCE => Decimal::from_str(value.trim())
            .map(|_| ())
            .map_err(|_| invalid_setting(key, value)),
        keys::CURRENT_YEAR => value
            .trim()
            .parse::<i32>()
            .map(|_| ())
            .map_err(|_| invalid_setting(key, value)),
        _ => Ok(()),
    }
}

/// List all settings
#[utoipa::path(
    get,
    path = "/api/v1/settings",
    responses(
        (status = 200, description = "Settings ordered by key", body = SettingListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "settings"
)]
#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SettingDto>>>, ApiError> {
    let all = setting::Entity::find()
        .order_by_asc(setting::Column::Key)
        .all(&state.db)
        .await
        .map_err(|e| db_error("Failed to fetch settings", e))?;

    debug!("Found {} settings", all.len());
    let dtos = all.into_iter().map(setting_to_dto).collect();
    Ok(Json(ApiResponse::ok(dtos, "Settings retrieved successfully")))
}

/// Change a setting value
#[utoipa::path(
    put,
    path = "/api/v1/settings/{key}",
    params(("key" = String, Path, description = "Setting key, e.g. cash_policy.minimum")),
    request_body = UpdateSettingRequest,
    responses(
        (status = 200, description = "Setting updated", body = SettingResponse),
        (status = 404, description = "Unknown setting key", body = ErrorResponse),
        (status = 422, description = "Value rejected for this key", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "settings"
)]
#[instrument(skip(state))]
pub async fn update_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<UpdateSettingRequest>,
) -> Result<Json<ApiResponse<SettingDto>>, ApiError> {
    let existing = setting::Entity::find()
        .filter(setting::Column::Key.eq(key.as_str()))
        .one(&state.db)
        .await
        .map_err(|e| db_error("Failed to fetch setting", e))?
        .ok_or_else(|| {
            warn!("Setting '{}' not found", key);
            api_error(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Setting '{}' not found", key),
            )
        })?;

    let value = request.value.trim().to_string();
    validate_value(&state, &key, &value).await?;

    let mut active: setting::ActiveModel = existing.into();
    active.value = Set(value);
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = active
        .update(&state.db)
        .await
        .map_err(|e| db_error("Failed to update setting", e))?;
    invalidate_reports(&state).await;

    info!("Setting '{}' set to '{}'", updated.key, updated.value);
    Ok(Json(ApiResponse::ok(
        setting_to_dto(updated),
        "Setting updated successfully",
    )))
}
