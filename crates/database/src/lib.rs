pub mod graph;
pub mod kuzu;
pub mod querying;
pub mod schema;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
