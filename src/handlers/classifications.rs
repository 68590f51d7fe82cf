use crate::helpers::converters::{
    category_from_dto, classification_to_dto, classification_type_from_dto,
    classification_type_to_dto,
};
use crate::helpers::reports::invalidate_reports;
use crate::schemas::{ApiError, ApiResponse, AppState, api_error};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use common::{
    ClassificationDto, ClassificationTypeDto, ClassificationTypeInfo, CreateClassificationRequest,
    UpdateClassificationRequest,
};
use model::Classification;
use model::entities::classification::{self, ClassificationType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Iterable, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing classifications
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ClassificationQuery {
    /// Only classifications of this type
    pub kind: Option<ClassificationTypeDto>,
    /// Include deactivated classifications (default: false)
    pub include_inactive: Option<bool>,
}

fn db_error(context: &str, e: impl std::fmt::Display) -> ApiError {
    error!("{}: {}", context, e);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", context)
}

fn not_found(id: i32) -> ApiError {
    warn!("Classification {} not found", id);
    api_error(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        format!("Classification with ID {} not found", id),
    )
}

/// Trimmed, non-empty name.
fn normalize_name(name: &str) -> Result<String, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        warn!("Rejecting empty classification name");
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "INVALID_NAME",
            "Classification name must not be empty",
        ));
    }
    Ok(trimmed.to_string())
}

/// Fails with 409 when another classification already uses `name`.
async fn ensure_name_free(
    db: &DatabaseConnection,
    name: &str,
    except: Option<i32>,
) -> Result<(), ApiError> {
    let mut query = classification::Entity::find().filter(classification::Column::Name.eq(name));
    if let Some(id) = except {
        query = query.filter(classification::Column::Id.ne(id));
    }

    match query.one(db).await {
        Ok(None) => Ok(()),
        Ok(Some(existing)) => {
            warn!("Classification name '{}' already used by {}", name, existing.id);
            Err(api_error(
                StatusCode::CONFLICT,
                "DUPLICATE_NAME",
                format!("Classification '{}' already exists", name),
            ))
        }
        Err(e) => Err(db_error("Failed to check classification name", e)),
    }
}

/// List classifications
#[utoipa::path(
    get,
    path = "/api/v1/classifications",
    params(ClassificationQuery),
    responses(
        (status = 200, description = "Classifications ordered by name", body = ClassificationListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "classifications"
)]
#[instrument(skip(state))]
pub async fn get_classifications(
    State(state): State<AppState>,
    Query(query): Query<ClassificationQuery>,
) -> Result<Json<ApiResponse<Vec<ClassificationDto>>>, ApiError> {
    let mut select = classification::Entity::find().order_by_asc(classification::Column::Name);
    if let Some(kind) = query.kind {
        select = select.filter(classification::Column::Kind.eq(classification_type_from_dto(kind)));
    }
    if !query.include_inactive.unwrap_or(false) {
        select = select.filter(classification::Column::Active.eq(true));
    }

    let found = select
        .all(&state.db)
        .await
        .map_err(|e| db_error("Failed to fetch classifications", e))?;

    debug!("Found {} classifications", found.len());
    let dtos = found
        .into_iter()
        .map(|model| classification_to_dto(Classification::from(model)))
        .collect();
    Ok(Json(ApiResponse::ok(dtos, "Classifications retrieved successfully")))
}

/// List the classification types with their labels
#[utoipa::path(
    get,
    path = "/api/v1/classifications/types",
    responses(
        (status = 200, description = "Every classification type", body = ClassificationTypesResponse)
    ),
    tag = "classifications"
)]
#[instrument]
pub async fn get_classification_types() -> Json<ApiResponse<Vec<ClassificationTypeInfo>>> {
    let types = ClassificationType::iter()
        .map(|kind| ClassificationTypeInfo {
            code: classification_type_to_dto(kind),
            label: kind.label().to_string(),
        })
        .collect();
    Json(ApiResponse::ok(types, "Classification types retrieved successfully"))
}

/// Create a classification
#[utoipa::path(
    post,
    path = "/api/v1/classifications",
    request_body = CreateClassificationRequest,
    responses(
        (status = 201, description = "Classification created", body = ClassificationResponse),
        (status = 400, description = "Empty name", body = ErrorResponse),
        (status = 409, description = "Name already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "classifications"
)]
#[instrument(skip(state))]
pub async fn create_classification(
    State(state): State<AppState>,
    Json(request): Json<CreateClassificationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ClassificationDto>>), ApiError> {
    let name = normalize_name(&request.name)?;
    ensure_name_free(&state.db, &name, None).await?;

    let kind = classification_type_from_dto(request.kind);
    let default_category = request
        .default_category
        .map(category_from_dto)
        .unwrap_or_else(|| kind.default_category());

    let created = classification::ActiveModel {
        name: Set(name),
        kind: Set(kind),
        default_category: Set(default_category),
        active: Set(true),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| db_error("Failed to create classification", e))?;
    invalidate_reports(&state).await;

    info!("Classification '{}' created with ID: {}", created.name, created.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            classification_to_dto(created.into()),
            "Classification created successfully",
        )),
    ))
}

/// Update a classification
#[utoipa::path(
    put,
    path = "/api/v1/classifications/{id}",
    params(("id" = i32, Path, description = "Classification ID")),
    request_body = UpdateClassificationRequest,
    responses(
        (status = 200, description = "Classification updated", body = ClassificationResponse),
        (status = 400, description = "Empty name", body = ErrorResponse),
        (status = 404, description = "Classification not found", body = ErrorResponse),
        (status = 409, description = "Name already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "classifications"
)]
#[instrument(skip(state))]
pub async fn update_classification(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateClassificationRequest>,
) -> Result<Json<ApiResponse<ClassificationDto>>, ApiError> {
    let existing = classification::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| db_error("Failed to fetch classification", e))?
        .ok_or_else(|| not_found(id))?;

    let mut active: classification::ActiveModel = existing.into();
    if let Some(name) = request.name.as_deref() {
        let name = normalize_name(name)?;
        ensure_name_free(&state.db, &name, Some(id)).await?;
        active.name = Set(name);
    }
    if let Some(kind) = request.kind {
        active.kind = Set(classification_type_from_dto(kind));
    }
    if let Some(category) = request.default_category {
        active.default_category = Set(category_from_dto(category));
    }
    if let Some(flag) = request.active {
        active.active = Set(flag);
    }

    let updated = active
        .update(&state.db)
        .await
        .map_err(|e| db_error("Failed to update classification", e))?;
    invalidate_reports(&state).await;

    info!("Classification {} updated", id);
    Ok(Json(ApiResponse::ok(
        classification_to_dto(updated.into()),
        "Classification updated successfully",
    )))
}

/// Deactivate a classification
///
/// Classifications are never removed: entries keep pointing at them and reports
/// keep resolving their type. Deactivated ones are hidden from listings.
#[utoipa::path(
    delete,
    path = "/api/v1/classifications/{id}",
    params(("id" = i32, Path, description = "Classification ID")),
    responses(
        (status = 204, description = "Classification deactivated"),
        (status = 404, description = "Classification not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "classifications"
)]
#[instrument(skip(state))]
pub async fn deactivate_classification(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let existing = classification::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| db_error("Failed to fetch classification", e))?
        .ok_or_else(|| not_found(id))?;

    if !existing.active {
        debug!("Classification {} already inactive", id);
        return Ok(StatusCode::NO_CONTENT);
    }

    let mut active: classification::ActiveModel = existing.into();
    active.active = Set(false);
    active
        .update(&state.db)
        .await
        .map_err(|e| db_error("Failed to deactivate classification", e))?;
    invalidate_reports(&state).await;

    info!("Classification {} deactivated", id);
    Ok(StatusCode::NO_CONTENT)
}
