pub mod converters;
pub mod reports;
