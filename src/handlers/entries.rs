use crate::helpers::converters::{category_from_dto, entry_kind_from_dto, entry_to_dto};
use crate::helpers::reports::invalidate_reports;
use crate::schemas::{ApiError, ApiResponse, AppState, api_error};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDate, Utc};
use common::{CreateEntryRequest, EntryDto, EntryKindDto, FlowCategoryDto, UpdateEntryRequest};
use model::entities::{classification, entry};
use model::{Entry, EntryFilter, FlowCategory, RecordedPeriod, SettlementState};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters for listing entries
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams, Validate)]
pub struct EntryQuery {
    /// Calendar year
    pub year: Option<i32>,
    /// Month (1-12)
    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,
    /// Day of month (1-31)
    #[validate(range(min = 1, max = 31))]
    pub day: Option<u32>,
    /// Settlement state code, e.g. SETTLED
    pub settlement_state: Option<String>,
    /// Earliest date (inclusive)
    pub date_from: Option<NaiveDate>,
    /// Latest date (inclusive)
    pub date_to: Option<NaiveDate>,
    pub kind: Option<EntryKindDto>,
    pub category: Option<FlowCategoryDto>,
    /// Exact classification name
    pub classification: Option<String>,
    /// Substring of the item description
    pub item: Option<String>,
    /// Number of entries to skip
    pub skip: Option<u64>,
    /// Maximum number of entries to return
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
}

impl EntryQuery {
    fn into_filter(self) -> EntryFilter {
        EntryFilter {
            year: self.year,
            month: self.month,
            day: self.day,
            settlement_state: parse_state(self.settlement_state.as_deref()),
            date_from: self.date_from,
            date_to: self.date_to,
            kind: self.kind.map(entry_kind_from_dto),
            category: self.category.map(category_from_dto),
            classification: self.classification.filter(|c| !c.trim().is_empty()),
            item: self.item.filter(|i| !i.trim().is_empty()),
            skip: self.skip,
            limit: self.limit,
        }
    }
}

/// Blank codes mean "not given".
fn parse_state(code: Option<&str>) -> Option<SettlementState> {
    code.filter(|c| !c.trim().is_empty())
        .map(SettlementState::from_code)
}

fn db_error(context: &str, e: impl std::fmt::Display) -> ApiError {
    error!("{}: {}", context, e);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", context)
}

fn not_found(id: i32) -> ApiError {
    warn!("Entry {} not found", id);
    api_error(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        format!("Entry with ID {} not found", id),
    )
}

fn check_amount(amount: Decimal) -> Result<(), ApiError> {
    if amount < Decimal::ZERO {
        warn!("Rejecting negative amount {}", amount);
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "NEGATIVE_AMOUNT",
            format!("Amount must not be negative, got {}", amount),
        ));
    }
    Ok(())
}

/// Looks a classification up by name. Blank names resolve to no classification.
async fn resolve_classification(
    db: &DatabaseConnection,
    name: Option<&str>,
) -> Result<Option<classification::Model>, ApiError> {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    match classification::Entity::find()
        .filter(classification::Column::Name.eq(name))
        .one(db)
        .await
    {
        Ok(Some(found)) => Ok(Some(found)),
        Ok(None) => {
            warn!("Unknown classification '{}'", name);
            Err(api_error(
                StatusCode::BAD_REQUEST,
                "UNKNOWN_CLASSIFICATION",
                format!("Classification '{}' does not exist", name),
            ))
        }
        Err(e) => Err(db_error("Failed to look up classification", e)),
    }
}

/// Reads one entry with its classification name.
async fn load_entry(db: &DatabaseConnection, id: i32) -> Result<EntryDto, ApiError> {
    let found = entry::Entity::find_by_id(id)
        .find_also_related(classification::Entity)
        .one(db)
        .await
        .map_err(|e| db_error("Failed to fetch entry", e))?;

    let (model, classification) = found.ok_or_else(|| not_found(id))?;
    let domain = Entry::from_record(model, classification.map(|c| c.name));
    entry_to_dto(&domain).ok_or_else(|| not_found(id))
}

/// List entries
#[utoipa::path(
    get,
    path = "/api/v1/entries",
    params(EntryQuery),
    responses(
        (status = 200, description = "Entries in date order", body = EntryListResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "entries"
)]
#[instrument(skip(state))]
pub async fn get_entries(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<EntryQuery>>,
) -> Result<Json<ApiResponse<Vec<EntryDto>>>, ApiError> {
    let filter = query.into_filter();
    debug!("Listing entries with {:?}", filter);

    let entries = state
        .store
        .fetch_entries(&filter)
        .await
        .map_err(|e| db_error("Failed to fetch entries", e))?;

    let dtos: Vec<EntryDto> = entries.iter().filter_map(entry_to_dto).collect();
    info!("Retrieved {} entries", dtos.len());
    Ok(Json(ApiResponse::ok(dtos, "Entries retrieved successfully")))
}

/// Get a single entry
#[utoipa::path(
    get,
    path = "/api/v1/entries/{id}",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Entry found", body = EntryResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "entries"
)]
#[instrument(skip(state))]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EntryDto>>, ApiError> {
    let dto = load_entry(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(dto, "Entry retrieved successfully")))
}

/// Create an entry
#[utoipa::path(
    post,
    path = "/api/v1/entries",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = EntryResponse),
        (status = 400, description = "Negative amount or unknown classification", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "entries"
)]
#[instrument(skip(state))]
pub async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EntryDto>>), ApiError> {
    debug!("Creating entry on {} for {}", request.date, request.amount);
    check_amount(request.amount)?;

    let classification = resolve_classification(&state.db, request.classification.as_deref()).await?;
    let category = request
        .category
        .map(category_from_dto)
        .or(classification.as_ref().map(|c| c.default_category))
        .unwrap_or(FlowCategory::Operational);
    let state_code = parse_state(request.settlement_state.as_deref()).unwrap_or_default();

    let period = RecordedPeriod::of(request.date);
    let now = Utc::now().naive_utc();
    let new_entry = entry::ActiveModel {
        date: Set(request.date),
        day: Set(period.day),
        month: Set(period.month),
        year: Set(period.year),
        kind: Set(entry_kind_from_dto(request.kind)),
        category: Set(category),
        classification_id: Set(classification.map(|c| c.id)),
        item: Set(request.item.filter(|i| !i.trim().is_empty())),
        amount: Set(request.amount),
        settlement_state: Set(state_code.code().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = new_entry
        .insert(&state.db)
        .await
        .map_err(|e| db_error("Failed to create entry", e))?;
    invalidate_reports(&state).await;

    info!("Entry created with ID: {}", created.id);
    let dto = load_entry(&state.db, created.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(dto, "Entry created successfully")),
    ))
}

/// Update an entry
#[utoipa::path(
    put,
    path = "/api/v1/entries/{id}",
    params(("id" = i32, Path, description = "Entry ID")),
    request_body = UpdateEntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = EntryResponse),
        (status = 400, description = "Negative amount or unknown classification", body = ErrorResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "entries"
)]
#[instrument(skip(state))]
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateEntryRequest>,
) -> Result<Json<ApiResponse<EntryDto>>, ApiError> {
    let existing = entry::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| db_error("Failed to fetch entry", e))?
        .ok_or_else(|| not_found(id))?;

    if let Some(amount) = request.amount {
        check_amount(amount)?;
    }

    let date = request.date.unwrap_or(existing.date);
    let mut active: entry::ActiveModel = existing.into();

    // Day, month and year always follow the date.
    let period = RecordedPeriod::of(date);
    active.date = Set(date);
    active.day = Set(period.day);
    active.month = Set(period.month);
    active.year = Set(period.year);

    if let Some(kind) = request.kind {
        active.kind = Set(entry_kind_from_dto(kind));
    }
    if let Some(category) = request.category {
        active.category = Set(category_from_dto(category));
    }
    if let Some(name) = request.classification.as_deref() {
        let classification = resolve_classification(&state.db, Some(name)).await?;
        active.classification_id = Set(classification.map(|c| c.id));
    }
    if let Some(item) = request.item {
        active.item = Set(Some(item).filter(|i| !i.trim().is_empty()));
    }
    if let Some(amount) = request.amount {
        active.amount = Set(amount);
    }
    if let Some(state_code) = parse_state(request.settlement_state.as_deref()) {
        active.settlement_state = Set(state_code.code().to_string());
    }
    active.updated_at = Set(Utc::now().naive_utc());

    active
        .update(&state.db)
        .await
        .map_err(|e| db_error("Failed to update entry", e))?;
    invalidate_reports(&state).await;

    info!("Entry {} updated", id);
    let dto = load_entry(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(dto, "Entry updated successfully")))
}

/// Delete an entry
#[utoipa::path(
    delete,
    path = "/api/v1/entries/{id}",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Entry not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "entries"
)]
#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let result = entry::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(|e| db_error("Failed to delete entry", e))?;

    if result.rows_affected == 0 {
        return Err(not_found(id));
    }
    invalidate_reports(&state).await;

    info!("Entry {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle the settlement state of an entry
///
/// Settled entries become unsettled; any other state becomes settled.
#[utoipa::path(
    patch,
    path = "/api/v1/entries/{id}/settle",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Settlement state toggled", body = EntryResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "entries"
)]
#[instrument(skip(state))]
pub async fn toggle_settlement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EntryDto>>, ApiError> {
    let existing = entry::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| db_error("Failed to fetch entry", e))?
        .ok_or_else(|| not_found(id))?;

    let toggled = SettlementState::from_code(&existing.settlement_state).toggled();
    let mut active: entry::ActiveModel = existing.into();
    active.settlement_state = Set(toggled.code().to_string());
    active.updated_at = Set(Utc::now().naive_utc());

    active
        .update(&state.db)
        .await
        .map_err(|e| db_error("Failed to update entry", e))?;
    invalidate_reports(&state).await;

    info!("Entry {} is now {}", id, toggled);
    let dto = load_entry(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(
        dto,
        format!("Settlement state changed to {}", toggled),
    )))
}
