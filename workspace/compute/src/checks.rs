//! Entry screening shared by every aggregation.
//!
//! A negative amount takes the entry out of the computation. A stored day/month/year
//! that drifted from `date` is reported, and the entry is counted by its date.

use model::Entry;
use rust_decimal::Decimal;
use tracing::warn;

use crate::error::MalformedEntryError;

/// An aggregate plus the malformed entries met while computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    pub value: T,
    pub issues: Vec<MalformedEntryError>,
}

impl<T> Checked<T> {
    pub fn new(value: T, issues: Vec<MalformedEntryError>) -> Self {
        Self { value, issues }
    }

    /// A result computed from clean data.
    pub fn clean(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Checked<U> {
        Checked {
            value: f(self.value),
            issues: self.issues,
        }
    }

    pub fn into_parts(self) -> (T, Vec<MalformedEntryError>) {
        (self.value, self.issues)
    }
}

/// Splits `entries` into the ones safe to aggregate and the problems found.
pub(crate) fn screen<'a, I>(entries: I) -> (Vec<&'a Entry>, Vec<MalformedEntryError>)
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut usable = Vec::new();
    let mut issues = Vec::new();

    for entry in entries {
        if entry.amount() < Decimal::ZERO {
            warn!(
                entry_id = ?entry.id(),
                date = %entry.date(),
                amount = %entry.amount(),
                "Excluding entry with negative amount"
            );
            issues.push(MalformedEntryError::NegativeAmount {
                entry_id: entry.id(),
                date: entry.date(),
                amount: entry.amount(),
            });
            continue;
        }

        if let Some(recorded) = entry.recorded().filter(|r| !r.matches(entry.date())) {
            warn!(
                entry_id = ?entry.id(),
                date = %entry.date(),
                recorded = %recorded,
                "Stored period disagrees with entry date, using the date"
            );
            issues.push(MalformedEntryError::PeriodMismatch {
                entry_id: entry.id(),
                date: entry.date(),
                recorded,
            });
        }

        usable.push(entry);
    }

    (usable, issues)
}
