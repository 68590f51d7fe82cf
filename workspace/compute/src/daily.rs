use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use model::{Entry, EntryKind};
use rust_decimal::Decimal;
use tracing::{debug, instrument, trace};

use crate::checks::{Checked, screen};

/// Activity and running balance of one day that had entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub inflow_total: Decimal,
    pub outflow_total: Decimal,
    pub net: Decimal,
    pub running_balance: Decimal,
}

impl DailyBalance {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// The days with activity, in ascending order, and the balance after the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBalances {
    pub opening: Decimal,
    pub days: Vec<DailyBalance>,
    pub closing: Decimal,
}

/// Computes running balances day by day, starting from `opening`.
///
/// Days without entries are left out, the running balance simply carries over to
/// the next day that has activity. Settled and unsettled entries count; obsolete ones
/// are left out, as in the monthly summaries, so a month's closing here is the next
/// month's chained opening.
#[instrument(skip(entries), fields(num_entries = entries.len(), opening = %opening))]
pub fn compute_daily_balances(entries: &[Entry], opening: Decimal) -> Checked<DailyBalances> {
    let (usable, issues) = screen(entries);

    let mut per_day: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for entry in usable {
        if entry.settlement_state().is_obsolete() {
            continue;
        }
        let (inflow, outflow) = per_day.entry(entry.date()).or_default();
        match entry.kind() {
            EntryKind::Inflow => *inflow += entry.amount(),
            EntryKind::Outflow => *outflow += entry.amount(),
        }
    }

    let mut running = opening;
    let days: Vec<DailyBalance> = per_day
        .into_iter()
        .map(|(date, (inflow_total, outflow_total))| {
            let net = inflow_total - outflow_total;
            running += net;
            trace!("{}: +{} -{} => {}", date, inflow_total, outflow_total, running);
            DailyBalance {
                date,
                inflow_total,
                outflow_total,
                net,
                running_balance: running,
            }
        })
        .collect();

    debug!("Computed {} daily balances, closing at {}", days.len(), running);

    Checked::new(
        DailyBalances {
            opening,
            days,
            closing: running,
        },
        issues,
    )
}
