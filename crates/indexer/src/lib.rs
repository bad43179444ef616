pub mod analysis;
pub mod errors;
pub mod execution;
pub mod parsing;
pub mod project;
pub mod runner;
pub mod stats;
pub mod writer;

pub use errors::{IndexerError, Result};
