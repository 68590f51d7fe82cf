use chrono::NaiveDate;
use model::RecordedPeriod;
use rust_decimal::Decimal;
use thiserror::Error;

/// Invalid cash-policy thresholds.
///
/// Aborts any evaluation; a dashboard cannot render until the configuration is fixed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `minimum < return_point < maximum` does not hold
    #[error(
        "Cash policy thresholds must satisfy minimum < return point < maximum, got {minimum} / {return_point} / {maximum}"
    )]
    ThresholdsNotOrdered {
        minimum: Decimal,
        return_point: Decimal,
        maximum: Decimal,
    },

    /// A threshold value that is not a decimal number
    #[error("Cash policy threshold '{name}' is not a valid amount: '{value}'")]
    InvalidThreshold { name: String, value: String },

    /// A threshold that has to be present but is not
    #[error("Cash policy threshold '{0}' is missing")]
    MissingThreshold(String),
}

/// A stored entry that violates the ledger invariants.
///
/// These never fail an aggregation. They are collected next to the result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedEntryError {
    /// Excluded from every total
    #[error("Entry {} on {date} has a negative amount {amount}", display_id(.entry_id))]
    NegativeAmount {
        entry_id: Option<i32>,
        date: NaiveDate,
        amount: Decimal,
    },

    /// Counted using its date; the stored day/month/year are ignored
    #[error("Entry {} is dated {date} but was recorded as {recorded}", display_id(.entry_id))]
    PeriodMismatch {
        entry_id: Option<i32>,
        date: NaiveDate,
        recorded: RecordedPeriod,
    },
}

impl MalformedEntryError {
    pub fn entry_id(&self) -> Option<i32> {
        match self {
            MalformedEntryError::NegativeAmount { entry_id, .. }
            | MalformedEntryError::PeriodMismatch { entry_id, .. } => *entry_id,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            MalformedEntryError::NegativeAmount { date, .. }
            | MalformedEntryError::PeriodMismatch { date, .. } => *date,
        }
    }

    /// Whether the offending entry was left out of the totals.
    pub fn excluded(&self) -> bool {
        matches!(self, MalformedEntryError::NegativeAmount { .. })
    }
}

fn display_id(id: &Option<i32>) -> String {
    match id {
        Some(id) => format!("#{}", id),
        None => "(unsaved)".to_string(),
    }
}

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    MalformedEntry(#[from] MalformedEntryError),

    /// A month outside 1..=12 or a date chrono cannot represent
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
