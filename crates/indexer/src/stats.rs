use crate::errors::{IndexerError, Result};
use crate::writer::WriteSummary;
use chrono::{DateTime, Utc};
use database::querying::GraphStats;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsMetadata {
    pub classgraph_version: String,
    pub timestamp: DateTime<Utc>,
    pub source_directory: String,
    pub database_path: String,
    pub indexing_duration_seconds: f64,
}

/// What one source unit contributed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStatistics {
    pub unit_id: String,
    pub classes: usize,
    pub methods: usize,
    pub call_references: usize,
}

/// Summary of a completed indexing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingStatistics {
    pub metadata: StatisticsMetadata,
    pub files_processed: usize,
    pub classes_extracted: usize,
    pub methods_extracted: usize,
    pub call_references: usize,
    /// Merge statements issued across all units
    pub writes: WriteSummary,
    /// Counts read back from the store after the last unit
    pub graph: GraphStats,
    pub units: Vec<UnitStatistics>,
}

impl IndexingStatistics {
    pub fn new(source_directory: &Path, database_path: &Path) -> Self {
        Self {
            metadata: StatisticsMetadata {
                classgraph_version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
                source_directory: source_directory.display().to_string(),
                database_path: database_path.display().to_string(),
                indexing_duration_seconds: 0.0,
            },
            files_processed: 0,
            classes_extracted: 0,
            methods_extracted: 0,
            call_references: 0,
            writes: WriteSummary::default(),
            graph: GraphStats::default(),
            units: Vec::new(),
        }
    }

    pub fn add_unit(&mut self, unit: UnitStatistics, writes: WriteSummary) {
        self.files_processed += 1;
        self.classes_extracted += unit.classes;
        self.methods_extracted += unit.methods;
        self.call_references += unit.call_references;
        self.writes += writes;
        self.units.push(unit);
    }

    pub fn finish(&mut self, graph: GraphStats, duration: Duration) {
        self.graph = graph;
        self.metadata.indexing_duration_seconds = duration.as_secs_f64();
    }

    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| IndexerError::Config(format!("Failed to serialize statistics: {e}")))?;
        fs::write(path, json).map_err(|e| IndexerError::io(path, e))
    }
}
