use std::collections::HashMap;

use model::{Entry, EntryKind};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::checks::{Checked, screen};

/// Label for outflows without a classification.
pub const UNCLASSIFIED: &str = "Unclassified";

/// Outflow total of one classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTotal {
    pub classification: String,
    pub total: Decimal,
    pub count: usize,
}

/// The `limit` classifications with the largest outflows in a month.
///
/// Ordered by total descending, ties by name. Obsolete entries are left out, unlike
/// the older ranking that took every state, so the ranking agrees with the monthly
/// outflow total.
#[instrument(skip(entries), fields(num_entries = entries.len()))]
pub fn top_outflows(
    entries: &[Entry],
    month: u32,
    year: i32,
    limit: usize,
) -> Checked<Vec<ClassificationTotal>> {
    let (usable, issues) = screen(entries.iter().filter(|e| e.in_month(month, year)));

    let mut grouped: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for entry in usable {
        if entry.kind() != EntryKind::Outflow || entry.settlement_state().is_obsolete() {
            continue;
        }
        let name = entry.classification().unwrap_or(UNCLASSIFIED);
        let (total, count) = grouped.entry(name).or_default();
        *total += entry.amount();
        *count += 1;
    }

    let mut totals: Vec<ClassificationTotal> = grouped
        .into_iter()
        .map(|(name, (total, count))| ClassificationTotal {
            classification: name.to_string(),
            total,
            count,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.classification.cmp(&b.classification))
    });
    totals.truncate(limit);

    Checked::new(totals, issues)
}
