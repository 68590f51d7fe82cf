use std::collections::HashMap;

use model::{Classification, ClassificationType, Entry, EntryKind, FlowCategory};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::checks::{Checked, screen};
use crate::period::MonthPeriod;

/// Classification name to type lookup.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    types: HashMap<String, ClassificationType>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, kind: ClassificationType) {
        self.types.insert(name.into(), kind);
    }

    pub fn with(mut self, name: impl Into<String>, kind: ClassificationType) -> Self {
        self.insert(name, kind);
        self
    }

    pub fn type_of(&self, name: &str) -> Option<ClassificationType> {
        self.types.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Inactive classifications stay in the taxonomy; old entries still point at them.
impl FromIterator<Classification> for Taxonomy {
    fn from_iter<I: IntoIterator<Item = Classification>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().map(|c| (c.name, c.kind)).collect(),
        }
    }
}

/// Totals per cost/expense type.
///
/// Only the five cost, expense and tax types have a bucket; revenue, financial and
/// investment classifications show up in the category flows instead. Buckets sum
/// outflows only, an inflow under a cost classification leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTotals {
    pub fixed_cost: Decimal,
    pub variable_cost: Decimal,
    pub fixed_expense: Decimal,
    pub variable_expense: Decimal,
    pub tax: Decimal,
}

impl TypeTotals {
    fn bucket_mut(&mut self, kind: ClassificationType) -> Option<&mut Decimal> {
        match kind {
            ClassificationType::FixedCost => Some(&mut self.fixed_cost),
            ClassificationType::VariableCost => Some(&mut self.variable_cost),
            ClassificationType::FixedExpense => Some(&mut self.fixed_expense),
            ClassificationType::VariableExpense => Some(&mut self.variable_expense),
            ClassificationType::Tax => Some(&mut self.tax),
            ClassificationType::Revenue
            | ClassificationType::Financial
            | ClassificationType::Investment => None,
        }
    }

    pub fn total(&self) -> Decimal {
        self.fixed_cost + self.variable_cost + self.fixed_expense + self.variable_expense + self.tax
    }

    pub(crate) fn add(&mut self, other: &TypeTotals) {
        self.fixed_cost += other.fixed_cost;
        self.variable_cost += other.variable_cost;
        self.fixed_expense += other.fixed_expense;
        self.variable_expense += other.variable_expense;
        self.tax += other.tax;
    }
}

/// Net flow (inflows minus outflows) per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFlows {
    pub operational: Decimal,
    pub financial: Decimal,
    pub investment: Decimal,
}

impl CategoryFlows {
    fn flow_mut(&mut self, category: FlowCategory) -> &mut Decimal {
        match category {
            FlowCategory::Operational => &mut self.operational,
            FlowCategory::Financial => &mut self.financial,
            FlowCategory::Investment => &mut self.investment,
        }
    }

    pub fn total(&self) -> Decimal {
        self.operational + self.financial + self.investment
    }

    pub(crate) fn add(&mut self, other: &CategoryFlows) {
        self.operational += other.operational;
        self.financial += other.financial;
        self.investment += other.investment;
    }
}

/// Totals and balances of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub total_inflows: Decimal,
    pub total_outflows: Decimal,
    pub by_type: TypeTotals,
    pub flows: CategoryFlows,
}

impl MonthlySummary {
    pub fn net(&self) -> Decimal {
        self.total_inflows - self.total_outflows
    }
}

/// Totals over an arbitrary set of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Totals {
    pub total_inflows: Decimal,
    pub total_outflows: Decimal,
    pub by_type: TypeTotals,
    pub flows: CategoryFlows,
}

/// Sums every non-obsolete entry it is given.
pub(crate) fn accumulate<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    taxonomy: &Taxonomy,
) -> Totals {
    let mut totals = Totals::default();

    for entry in entries {
        if entry.settlement_state().is_obsolete() {
            continue;
        }

        let amount = entry.amount();
        match entry.kind() {
            EntryKind::Inflow => totals.total_inflows += amount,
            EntryKind::Outflow => totals.total_outflows += amount,
        }
        *totals.flows.flow_mut(entry.category()) += entry.signed_amount();

        if entry.kind() != EntryKind::Outflow {
            continue;
        }
        let bucket = entry
            .classification()
            .and_then(|name| taxonomy.type_of(name))
            .and_then(|kind| totals.by_type.bucket_mut(kind));
        if let Some(bucket) = bucket {
            *bucket += amount;
        }
    }

    totals
}

/// Summarizes one month.
///
/// Entries dated outside the month are ignored. Obsolete entries are left out of
/// every total; settled and unsettled ones both count. Chaining is up to the caller:
/// pass the previous month's closing balance as `opening`, see [`chain_year`].
#[instrument(skip(entries, taxonomy), fields(num_entries = entries.len(), opening = %opening))]
pub fn compute_monthly_summary(
    entries: &[Entry],
    month: u32,
    year: i32,
    opening: Decimal,
    taxonomy: &Taxonomy,
) -> Checked<MonthlySummary> {
    let (usable, issues) = screen(entries.iter().filter(|e| e.in_month(month, year)));
    let totals = accumulate(usable, taxonomy);

    let summary = MonthlySummary {
        month,
        year,
        opening_balance: opening,
        closing_balance: opening + totals.total_inflows - totals.total_outflows,
        total_inflows: totals.total_inflows,
        total_outflows: totals.total_outflows,
        by_type: totals.by_type,
        flows: totals.flows,
    };

    debug!(
        "Summary {}/{}: in {} out {} closing {}",
        month, year, summary.total_inflows, summary.total_outflows, summary.closing_balance
    );

    Checked::new(summary, issues)
}

/// Summarizes January to December of `year`, each month opening with the
/// previous month's closing balance.
#[instrument(skip(entries, taxonomy), fields(num_entries = entries.len()))]
pub fn chain_year(
    entries: &[Entry],
    year: i32,
    initial_opening: Decimal,
    taxonomy: &Taxonomy,
) -> Checked<Vec<MonthlySummary>> {
    info!("Chaining monthly summaries for {} from {}", year, initial_opening);

    let mut opening = initial_opening;
    let mut summaries = Vec::with_capacity(12);
    let mut issues = Vec::new();

    for period in MonthPeriod::months_of(year) {
        let (summary, mut month_issues) =
            compute_monthly_summary(entries, period.month(), year, opening, taxonomy).into_parts();
        opening = summary.closing_balance;
        summaries.push(summary);
        issues.append(&mut month_issues);
    }

    Checked::new(summaries, issues)
}

/// The opening balance of `month`, chained from January's `initial_opening`.
pub fn opening_balance_for(
    entries: &[Entry],
    month: u32,
    year: i32,
    initial_opening: Decimal,
) -> Decimal {
    let taxonomy = Taxonomy::new();
    (1..month).fold(initial_opening, |opening, earlier| {
        compute_monthly_summary(entries, earlier, year, opening, &taxonomy)
            .value
            .closing_balance
    })
}
