use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::classification;

/// Direction of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum EntryKind {
    #[sea_orm(string_value = "INFLOW")]
    Inflow,
    #[sea_orm(string_value = "OUTFLOW")]
    Outflow,
}

/// Cash-flow category used for the operational / financial / investment split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum FlowCategory {
    #[sea_orm(string_value = "OPERATIONAL")]
    Operational,
    #[sea_orm(string_value = "FINANCIAL")]
    Financial,
    #[sea_orm(string_value = "INVESTMENT")]
    Investment,
}

/// A single ledger record: money coming in or going out on a given date.
///
/// `day`, `month` and `year` duplicate `date` so the store can filter on them
/// cheaply. They are always written from `date` and the domain layer re-derives
/// them on read, reporting any drift.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: NaiveDate,
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub kind: EntryKind,
    pub category: FlowCategory,
    /// Link into the classification taxonomy. The name is read through the join.
    pub classification_id: Option<i32>,
    /// Free-text description or supplier name.
    pub item: Option<String>,
    /// Non-negative value of the entry; the sign comes from `kind`.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    /// Open set of settlement codes (`SETTLED`, `UNSETTLED`, `OBSOLETE`, ...).
    pub settlement_state: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "classification::Entity",
        from = "Column::ClassificationId",
        to = "classification::Column::Id",
        on_delete = "SetNull"
    )]
    Classification,
}

impl Related<classification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
