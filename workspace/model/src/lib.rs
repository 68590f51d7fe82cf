//! Persistence model and domain ledger types for the cash-management backend.
//!
//! `entities` holds the SeaORM table mappings, `ledger` the plain domain types the
//! compute crate works on, and `store` the read interface connecting the two.

pub mod entities;
pub mod error;
pub mod ledger;
pub mod store;

// Re-export tracing for use in this crate
pub use tracing;

pub use error::StoreError;
pub use ledger::{
    Classification, ClassificationType, Entry, EntryFilter, EntryKind, FlowCategory,
    RecordedPeriod, SettlementState,
};
pub use store::{CashPolicySettings, LedgerStore, SeaOrmLedgerStore};
