use crate::analysis::display::ExtractionTree;
use crate::analysis::extract;
use crate::errors::{IndexerError, Result};
use crate::execution::config::IndexingConfig;
use crate::execution::registry::ClassRegistry;
use crate::parsing::SourceParser;
use crate::project::{DirectoryFileSource, FileSource, read_source_unit};
use crate::stats::{IndexingStatistics, UnitStatistics};
use crate::writer::GraphWriter;
use database::graph::GraphSession;
use database::kuzu::connection::KuzuConnection;
use database::kuzu::database::KuzuDatabase;
use database::querying::GraphQueryService;
use database::schema::manager::SchemaManager;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Runs a full rebuild of the class graph from one source directory.
///
/// The store is wiped first. Units are then parsed, extracted and written
/// one at a time, each inside its own transaction. Any failure stops the
/// run; units committed before it stay in the store.
pub struct IndexingExecutor {
    database: Arc<KuzuDatabase>,
    config: IndexingConfig,
    writer: GraphWriter,
}

impl IndexingExecutor {
    pub fn new(database: Arc<KuzuDatabase>, config: IndexingConfig) -> Self {
        Self {
            database,
            config,
            writer: GraphWriter::new(),
        }
    }

    pub fn with_writer(mut self, writer: GraphWriter) -> Self {
        self.writer = writer;
        self
    }

    pub fn config(&self) -> &IndexingConfig {
        &self.config
    }

    /// `output` receives the extracted tree of every unit when tree printing
    /// is enabled.
    pub fn execute<P, F>(&self, parser: &mut P, mut output: F) -> Result<IndexingStatistics>
    where
        P: SourceParser,
        F: FnMut(&str),
    {
        let start_time = Instant::now();
        let mut stats =
            IndexingStatistics::new(&self.config.source_directory, &self.config.database_path);

        if parser.extension() != self.config.file_extension {
            warn!(
                "Indexing .{} files with a parser for .{} sources",
                self.config.file_extension,
                parser.extension()
            );
        }

        let database = self
            .database
            .get_or_create_database(&self.config.database_config())
            .map_err(IndexerError::StoreConnection)?;
        let connection = KuzuConnection::new(&database).map_err(IndexerError::StoreConnection)?;

        let schema_manager = SchemaManager::new(&connection);
        schema_manager.initialize_schema()?;
        schema_manager.reset_graph()?;

        let files = DirectoryFileSource::new(&self.config.source_directory).get_files(&self.config)?;
        info!(
            "Indexing {} .{} files from {}",
            files.len(),
            self.config.file_extension,
            self.config.source_directory.display()
        );

        let mut registry = ClassRegistry::new();

        for path in &files {
            let unit = read_source_unit(path)?;
            info!("Processing file: {}", unit.unit_id);

            let parsed = parser.parse(&unit.text).map_err(|source| {
                error!("❌ Failed to parse {}: {source}", unit.unit_id);
                IndexerError::Parse {
                    unit_id: unit.unit_id.clone(),
                    source,
                }
            })?;
            let extraction = extract(&parsed, &unit.unit_id);

            if self.config.print_tree {
                output(&ExtractionTree::new(&unit.unit_id, &extraction).to_string());
            }

            let unit_stats = UnitStatistics {
                unit_id: unit.unit_id.clone(),
                classes: extraction.classes.len(),
                methods: extraction.method_count(),
                call_references: extraction.call_index.edge_count(),
            };

            for class in extraction.classes {
                let name = class.name.clone();
                if let Some(previous) = registry.register(&unit.unit_id, class)
                    && previous.unit_id != unit.unit_id
                {
                    warn!(
                        "Class {name} in {} shadows the one from {}; the stored node keeps the first",
                        unit.unit_id, previous.unit_id
                    );
                }
            }

            let writes = connection
                .transaction(|session| {
                    self.writer.persist(
                        session,
                        registry.iter(),
                        &extraction.call_index,
                        &unit.unit_id,
                    )
                })
                .inspect_err(|e| error!("❌ Failed to write {}: {e}", unit.unit_id))?;

            stats.add_unit(unit_stats, writes);
        }

        let graph_stats = GraphQueryService::new(&connection).graph_stats()?;
        stats.finish(graph_stats, start_time.elapsed());

        info!(
            "✅ Indexed {} files in {:.2} seconds: {graph_stats}",
            stats.files_processed, stats.metadata.indexing_duration_seconds
        );
        Ok(stats)
    }
}
