use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

/// Well-known setting keys.
pub mod keys {
    pub const CASH_POLICY_MINIMUM: &str = "cash_policy.minimum";
    pub const CASH_POLICY_RETURN_POINT: &str = "cash_policy.return_point";
    pub const CASH_POLICY_MAXIMUM: &str = "cash_policy.maximum";
    /// Balance the first month of every tracked year opens with.
    pub const OPENING_BALANCE: &str = "ledger.opening_balance";
    pub const CURRENT_YEAR: &str = "ledger.current_year";

    pub const CASH_POLICY: [&str; 3] = [CASH_POLICY_MINIMUM, CASH_POLICY_RETURN_POINT, CASH_POLICY_MAXIMUM];
}

/// A key/value configuration record.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
