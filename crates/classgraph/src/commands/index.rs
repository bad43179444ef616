use anyhow::Result;
use database::kuzu::database::KuzuDatabase;
use indexer::execution::config::IndexingConfigBuilder;
use indexer::runner::run_client_indexer;
use indexer::stats::IndexingStatistics;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

pub struct IndexArgs {
    pub source_directory: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_tree: bool,
    pub stats: Option<Option<PathBuf>>,
}

fn handle_statistics_output(stats: &IndexingStatistics, stats_output: Option<Option<PathBuf>>) {
    let Some(stats_path_option) = stats_output else {
        return;
    };

    if let Some(stats_path) = stats_path_option {
        match stats.export_to_file(&stats_path) {
            Ok(_) => info!("Statistics saved to: {}", stats_path.display()),
            Err(e) => error!("Failed to save statistics: {e}"),
        }
    }

    info!("Indexing Summary:");
    info!("  - Files: {}", stats.files_processed);
    info!("  - Classes extracted: {}", stats.classes_extracted);
    info!("  - Methods extracted: {}", stats.methods_extracted);
    info!("  - Call references: {}", stats.call_references);
    info!(
        "  - Merge statements: {} ({} class, {} method, {} CALLS, {} EXTENDS)",
        stats.writes.total(),
        stats.writes.class_merges,
        stats.writes.method_merges,
        stats.writes.calls_merges,
        stats.writes.extends_merges
    );
    info!("  - Stored graph: {}", stats.graph);

    if !stats.units.is_empty() {
        info!("Files:");
        for unit in &stats.units {
            info!(
                "  - {}: {} classes, {} methods, {} call references",
                unit.unit_id, unit.classes, unit.methods, unit.call_references
            );
        }
    }
}

pub fn run(args: IndexArgs) -> Result<()> {
    let IndexArgs {
        source_directory,
        database,
        config,
        no_tree,
        stats,
    } = args;

    let mut builder = IndexingConfigBuilder::from_file(config.as_deref())?
        .source_directory(source_directory)
        .database_path(database);
    if no_tree {
        builder = builder.print_tree(false);
    }
    let config = builder.build()?;

    let workspace_stats =
        run_client_indexer(Arc::new(KuzuDatabase::new()), config, |msg| println!("{msg}"))?;
    handle_statistics_output(&workspace_stats, stats);
    Ok(())
}
