pub mod library;
pub mod query_builder;
pub mod service;

pub use library::*;
pub use service::{GraphQueryService, GraphStats, StoredClass, StoredMethod};
