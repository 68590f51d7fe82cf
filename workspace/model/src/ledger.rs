use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::entities::{classification, entry};

pub use crate::entities::classification::ClassificationType;
pub use crate::entities::entry::{EntryKind, FlowCategory};

/// Settlement state of an entry.
///
/// The store keeps this as an open set of codes. Besides the two regular
/// states there is `Obsolete`, a terminal state for entries that stay in storage
/// but no longer count towards period totals. Unknown codes are preserved as
/// `Other` and are treated like unsettled entries by every report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SettlementState {
    #[default]
    Settled,
    Unsettled,
    Obsolete,
    Other(String),
}

impl SettlementState {
    pub const SETTLED: &'static str = "SETTLED";
    pub const UNSETTLED: &'static str = "UNSETTLED";
    pub const OBSOLETE: &'static str = "OBSOLETE";

    /// Parses a storage code. Matching is case-insensitive and ignores surrounding whitespace.
    pub fn from_code(code: &str) -> Self {
        let normalized = code.trim().to_uppercase();
        match normalized.as_str() {
            Self::SETTLED => SettlementState::Settled,
            Self::UNSETTLED => SettlementState::Unsettled,
            Self::OBSOLETE => SettlementState::Obsolete,
            _ => SettlementState::Other(normalized),
        }
    }

    /// Storage code of this state.
    pub fn code(&self) -> &str {
        match self {
            SettlementState::Settled => Self::SETTLED,
            SettlementState::Unsettled => Self::UNSETTLED,
            SettlementState::Obsolete => Self::OBSOLETE,
            SettlementState::Other(code) => code,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, SettlementState::Settled)
    }

    pub fn is_obsolete(&self) -> bool {
        matches!(self, SettlementState::Obsolete)
    }

    /// State after a settle toggle: settled entries become unsettled, anything else settles.
    pub fn toggled(&self) -> Self {
        match self {
            SettlementState::Settled => SettlementState::Unsettled,
            _ => SettlementState::Settled,
        }
    }
}

impl fmt::Display for SettlementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Day, month and year exactly as they were found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedPeriod {
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

impl RecordedPeriod {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            day: date.day() as i32,
            month: date.month() as i32,
            year: date.year(),
        }
    }

    /// Whether these fields agree with `date`.
    pub fn matches(&self, date: NaiveDate) -> bool {
        *self == Self::of(date)
    }
}

impl fmt::Display for RecordedPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A ledger entry as seen by the compute layer.
///
/// Day, month and year are never stored on the entry itself; they are always
/// derived from `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    id: Option<i32>,
    date: NaiveDate,
    kind: EntryKind,
    category: FlowCategory,
    classification: Option<String>,
    item: Option<String>,
    amount: Decimal,
    settlement_state: SettlementState,
    recorded: Option<RecordedPeriod>,
}

impl Entry {
    /// Creates a settled, unclassified entry.
    pub fn new(date: NaiveDate, kind: EntryKind, category: FlowCategory, amount: Decimal) -> Self {
        Self {
            id: None,
            date,
            kind,
            category,
            classification: None,
            item: None,
            amount,
            settlement_state: SettlementState::Settled,
            recorded: None,
        }
    }

    /// Shorthand for an operational inflow.
    pub fn inflow(date: NaiveDate, amount: Decimal) -> Self {
        Self::new(date, EntryKind::Inflow, FlowCategory::Operational, amount)
    }

    /// Shorthand for an operational outflow.
    pub fn outflow(date: NaiveDate, amount: Decimal) -> Self {
        Self::new(date, EntryKind::Outflow, FlowCategory::Operational, amount)
    }

    /// Builds a domain entry from a stored row and the name of its classification, if any.
    pub fn from_record(model: entry::Model, classification: Option<String>) -> Self {
        Self {
            id: Some(model.id),
            date: model.date,
            kind: model.kind,
            category: model.category,
            classification,
            item: model.item,
            amount: model.amount,
            settlement_state: SettlementState::from_code(&model.settlement_state),
            recorded: Some(RecordedPeriod {
                day: model.day,
                month: model.month,
                year: model.year,
            }),
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_category(mut self, category: FlowCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_classification(mut self, name: impl Into<String>) -> Self {
        self.classification = Some(name.into());
        self
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn with_state(mut self, state: SettlementState) -> Self {
        self.settlement_state = state;
        self
    }

    pub fn with_recorded(mut self, recorded: RecordedPeriod) -> Self {
        self.recorded = Some(recorded);
        self
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Whether the entry falls in the given calendar month.
    pub fn in_month(&self, month: u32, year: i32) -> bool {
        self.month() == month && self.year() == year
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn category(&self) -> FlowCategory {
        self.category
    }

    pub fn classification(&self) -> Option<&str> {
        self.classification.as_deref()
    }

    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Amount with the sign of its direction: positive for inflows, negative for outflows.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            EntryKind::Inflow => self.amount,
            EntryKind::Outflow => -self.amount,
        }
    }

    pub fn settlement_state(&self) -> &SettlementState {
        &self.settlement_state
    }

    /// Day/month/year as stored alongside the date, when the entry came from storage.
    pub fn recorded(&self) -> Option<RecordedPeriod> {
        self.recorded
    }
}

/// A classification from the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub id: i32,
    pub name: String,
    pub kind: ClassificationType,
    pub default_category: FlowCategory,
    pub active: bool,
}

impl From<classification::Model> for Classification {
    fn from(model: classification::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            kind: model.kind,
            default_category: model.default_category,
            active: model.active,
        }
    }
}

/// Selection criteria for fetching entries. Every field is optional; unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub settlement_state: Option<SettlementState>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub kind: Option<EntryKind>,
    pub category: Option<FlowCategory>,
    /// Exact classification name.
    pub classification: Option<String>,
    /// Substring of the item description.
    pub item: Option<String>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl EntryFilter {
    /// Everything in the ledger.
    pub fn all() -> Self {
        Self::default()
    }

    /// Every entry of one calendar month.
    pub fn for_month(year: i32, month: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            ..Self::default()
        }
    }

    /// Every entry of one calendar year.
    pub fn for_year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }
}
