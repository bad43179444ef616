use crate::kuzu::config::DatabaseConfig;
use crate::kuzu::types::DatabaseError;
use kuzu::Database;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

pub struct KuzuQueryResult {
    pub column_names: Vec<String>,
    pub result: Vec<Vec<kuzu::Value>>,
}

/// Keeps one open Kuzu instance per database path.
pub struct KuzuDatabase {
    databases: Mutex<HashMap<PathBuf, Arc<Database>>>,
}

impl Default for KuzuDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl KuzuDatabase {
    pub fn new() -> Self {
        Self {
            databases: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_or_create_database(
        &self,
        config: &DatabaseConfig,
    ) -> Result<Arc<Database>, DatabaseError> {
        let mut databases_guard = self
            .databases
            .lock()
            .map_err(|_| DatabaseError::InitializationFailed("database registry poisoned".into()))?;

        if let Some(database) = databases_guard.get(&config.database_path) {
            info!(
                "Reusing open database at {}",
                config.database_path.display()
            );
            return Ok(database.clone());
        }

        if let Some(parent) = config.database_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let database = Database::new(&config.database_path, config.to_system_config())
            .map_err(|error| DatabaseError::ConnectionFailed {
                path: config.database_path.clone(),
                error,
            })?;
        info!(
            "KuzuDatabase::get_or_create_database - Database opened at: {}",
            config.database_path.display()
        );

        let database = Arc::new(database);
        databases_guard.insert(config.database_path.clone(), database.clone());
        Ok(database)
    }

    /// Drops any cached handle for the path and deletes the database files from disk.
    pub fn remove_database(&self, database_path: &Path) -> Result<bool, DatabaseError> {
        if let Ok(mut databases_guard) = self.databases.lock() {
            databases_guard.remove(database_path);
        }
        remove_database_files(database_path)
    }
}

/// Deletes a Kuzu database file along with its write-ahead log.
pub fn remove_database_files(database_path: &Path) -> Result<bool, DatabaseError> {
    let mut removed = false;
    let wal_path = PathBuf::from(format!("{}.wal", database_path.display()));

    for path in [database_path.to_path_buf(), wal_path] {
        if path.is_dir() {
            std::fs::remove_dir_all(&path)?;
            removed = true;
        } else if path.exists() {
            std::fs::remove_file(&path)?;
            removed = true;
        }
    }

    if !removed {
        warn!("No database found at {}", database_path.display());
    }
    Ok(removed)
}
