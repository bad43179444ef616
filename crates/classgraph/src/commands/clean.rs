use anyhow::Result;
use database::kuzu::database::remove_database_files;
use std::path::Path;
use tracing::info;

pub fn run(database: &Path) -> Result<()> {
    if remove_database_files(database)? {
        info!("Clean completed: removed {}", database.display());
    } else {
        info!("Nothing to clean at {}", database.display());
    }
    Ok(())
}
