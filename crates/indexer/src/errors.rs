//! Error types for the indexer crate

use crate::parsing::ParseError;
use database::kuzu::types::DatabaseError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    /// A source unit could not be parsed; the run stops here
    #[error("Failed to parse {unit_id}: {source}")]
    Parse {
        unit_id: String,
        #[source]
        source: ParseError,
    },

    /// The parser itself could not be set up
    #[error("Failed to initialize parser: {0}")]
    Grammar(#[source] ParseError),

    /// The graph store could not be opened or connected to
    #[error("Graph store unavailable: {0}")]
    StoreConnection(#[source] DatabaseError),

    #[error("Graph store error: {0}")]
    Database(#[from] DatabaseError),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl IndexerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
