use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Direction of an entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKindDto {
    Inflow,
    Outflow,
}

/// Cash-flow category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowCategoryDto {
    Operational,
    Financial,
    Investment,
}

/// Type of a classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationTypeDto {
    FixedCost,
    VariableCost,
    FixedExpense,
    VariableExpense,
    Tax,
    Revenue,
    Financial,
    Investment,
}

// ===================== Entries =====================

/// A ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct EntryDto {
    pub id: i32,
    pub date: NaiveDate,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub kind: EntryKindDto,
    pub category: FlowCategoryDto,
    /// Name of the classification, resolved at read time
    pub classification: Option<String>,
    pub item: Option<String>,
    pub amount: Decimal,
    /// SETTLED, UNSETTLED, OBSOLETE or another stored code
    pub settlement_state: String,
}

/// Request body for creating an entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateEntryRequest {
    pub date: NaiveDate,
    pub kind: EntryKindDto,
    /// Defaults to the classification's category, or OPERATIONAL
    pub category: Option<FlowCategoryDto>,
    /// Classification name
    pub classification: Option<String>,
    pub item: Option<String>,
    /// Non-negative amount
    pub amount: Decimal,
    /// Defaults to SETTLED
    pub settlement_state: Option<String>,
}

/// Request body for updating an entry. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct UpdateEntryRequest {
    pub date: Option<NaiveDate>,
    pub kind: Option<EntryKindDto>,
    pub category: Option<FlowCategoryDto>,
    /// Classification name; an empty string clears it
    pub classification: Option<String>,
    pub item: Option<String>,
    pub amount: Option<Decimal>,
    pub settlement_state: Option<String>,
}

// ===================== Classifications =====================

/// A classification of the taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClassificationDto {
    pub id: i32,
    pub name: String,
    pub kind: ClassificationTypeDto,
    pub default_category: FlowCategoryDto,
    pub active: bool,
}

/// Request for creating a classification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateClassificationRequest {
    pub name: String,
    pub kind: ClassificationTypeDto,
    pub default_category: Option<FlowCategoryDto>,
}

/// Request for updating a classification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct UpdateClassificationRequest {
    pub name: Option<String>,
    pub kind: Option<ClassificationTypeDto>,
    pub default_category: Option<FlowCategoryDto>,
    pub active: Option<bool>,
}

/// A classification type with its display label.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClassificationTypeInfo {
    pub code: ClassificationTypeDto,
    pub label: String,
}

// ===================== Settings =====================

/// A configuration setting.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SettingDto {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

/// Request for changing a setting value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdateSettingRequest {
    pub value: String,
}
