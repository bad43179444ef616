pub mod clean;
pub mod index;
pub mod query;
