pub mod cash_flow;
pub mod classifications;
pub mod dashboard;
pub mod entries;
pub mod health;
pub mod settings;
pub mod summaries;
