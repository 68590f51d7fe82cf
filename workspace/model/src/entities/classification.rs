use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

use super::entry::{self, FlowCategory};

/// Taxonomy bucket a classification rolls up into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
pub enum ClassificationType {
    #[sea_orm(string_value = "FIXED_COST")]
    FixedCost,
    #[sea_orm(string_value = "VARIABLE_COST")]
    VariableCost,
    #[sea_orm(string_value = "FIXED_EXPENSE")]
    FixedExpense,
    #[sea_orm(string_value = "VARIABLE_EXPENSE")]
    VariableExpense,
    #[sea_orm(string_value = "TAX")]
    Tax,
    #[sea_orm(string_value = "REVENUE")]
    Revenue,
    #[sea_orm(string_value = "FINANCIAL")]
    Financial,
    #[sea_orm(string_value = "INVESTMENT")]
    Investment,
}

impl ClassificationType {
    /// Human readable label shown next to the storage code.
    pub fn label(&self) -> &'static str {
        match self {
            ClassificationType::FixedCost => "Fixed Cost",
            ClassificationType::VariableCost => "Variable Cost",
            ClassificationType::FixedExpense => "Fixed Expense",
            ClassificationType::VariableExpense => "Variable Expense",
            ClassificationType::Tax => "Tax",
            ClassificationType::Revenue => "Revenue",
            ClassificationType::Financial => "Financial",
            ClassificationType::Investment => "Investment",
        }
    }

    /// Category new classifications of this type start with.
    pub fn default_category(&self) -> FlowCategory {
        match self {
            ClassificationType::Financial => FlowCategory::Financial,
            ClassificationType::Investment => FlowCategory::Investment,
            _ => FlowCategory::Operational,
        }
    }
}

/// A named classification from the fixed taxonomy, e.g. "RENT" as a fixed cost.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "classifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub kind: ClassificationType,
    /// Category suggested for new entries using this classification.
    pub default_category: FlowCategory,
    /// Deactivated classifications stay resolvable for old entries but are hidden from listings.
    #[sea_orm(default_value = "true")]
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "entry::Entity")]
    Entry,
}

impl Related<entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
