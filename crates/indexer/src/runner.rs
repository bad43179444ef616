use crate::errors::{IndexerError, Result};
use crate::execution::config::IndexingConfig;
use crate::execution::executor::IndexingExecutor;
use crate::parsing::JavaParser;
use crate::stats::IndexingStatistics;
use database::kuzu::database::KuzuDatabase;
use std::sync::Arc;
use tracing::{Level, error, info, warn};

fn progress_with_tracing<F>(message: &str, progress: &mut F, level: Level)
where
    F: FnMut(&str),
{
    progress(message);
    match level {
        Level::WARN => warn!("{message}"),
        Level::ERROR => error!("{message}"),
        _ => info!("{message}"),
    }
}

/// Indexes the configured directory with the Java parser, reporting progress
/// lines and extracted trees through `progress`.
pub fn run_client_indexer<F>(
    database: Arc<KuzuDatabase>,
    config: IndexingConfig,
    mut progress: F,
) -> Result<IndexingStatistics>
where
    F: FnMut(&str),
{
    progress_with_tracing(
        "🚀 Starting class graph indexing...",
        &mut progress,
        Level::INFO,
    );
    progress_with_tracing(
        &format!("📂 Source directory: {}", config.source_directory.display()),
        &mut progress,
        Level::INFO,
    );
    progress_with_tracing(
        &format!("🗄️ Database: {}", config.database_path.display()),
        &mut progress,
        Level::INFO,
    );
    if config.respect_gitignore {
        progress_with_tracing("  • Respecting .gitignore", &mut progress, Level::INFO);
    }

    let mut parser = JavaParser::new().map_err(IndexerError::Grammar)?;
    let executor = IndexingExecutor::new(database, config);

    match executor.execute(&mut parser, &mut progress) {
        Ok(stats) => {
            progress_with_tracing(
                &format!(
                    "✅ All .{} files have been processed and the class graph was created ({})",
                    executor.config().file_extension,
                    stats.graph
                ),
                &mut progress,
                Level::INFO,
            );
            Ok(stats)
        }
        Err(e) => {
            progress_with_tracing(
                &format!("❌ Indexing failed: {e}"),
                &mut progress,
                Level::ERROR,
            );
            Err(e)
        }
    }
}
