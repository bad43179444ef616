use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Kuzu error: {0}")]
    Kuzu(#[from] kuzu::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to open graph store at {path:?}: {error}")]
    ConnectionFailed { path: PathBuf, error: kuzu::Error },
    #[error("Failed to execute query: {query}. Error: {error}")]
    QueryExecutionError { query: String, error: kuzu::Error },
    #[error("Database initialization failed: {0}")]
    InitializationFailed(String),
    #[error("Unexpected query result: {0}")]
    UnexpectedResult(String),
}

/// Whether a generated query has anything to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryNoop {
    Yes,
    No,
}

pub type QueryGeneratorResult = (QueryNoop, String);
