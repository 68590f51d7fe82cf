//! Root of the SeaORM entity modules.
//!
//! Three tables back the ledger: the entries themselves, the classification
//! taxonomy they point to and a small key/value settings table.

pub mod classification;
pub mod entry;
pub mod setting;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::classification::Entity as Classification;
    pub use super::entry::Entity as Entry;
    pub use super::setting::Entity as Setting;
}
