use kuzu::SystemConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_PATH: &str = "classgraph.kz";

/// Settings for opening the embedded graph store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path of the Kuzu database file
    pub database_path: PathBuf,
    /// Buffer pool size in bytes (Kuzu picks a default when unset)
    pub buffer_pool_size: Option<u64>,
    pub enable_compression: bool,
    pub read_only: bool,
    /// Maximum database size in bytes
    pub max_db_size: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            buffer_pool_size: None,
            enable_compression: true,
            read_only: false,
            max_db_size: None,
        }
    }
}

impl DatabaseConfig {
    pub fn new<P: AsRef<Path>>(database_path: P) -> Self {
        Self {
            database_path: database_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn with_buffer_size(mut self, size: u64) -> Self {
        self.buffer_pool_size = Some(size);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn to_system_config(&self) -> SystemConfig {
        let mut system_config = SystemConfig::default()
            .enable_compression(self.enable_compression)
            .read_only(self.read_only);

        if let Some(buffer_size) = self.buffer_pool_size {
            system_config = system_config.buffer_pool_size(buffer_size);
        }

        if let Some(max_size) = self.max_db_size {
            system_config = system_config.max_db_size(max_size);
        }
        system_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{ "database_path": "/tmp/graph.kz" }"#).unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/graph.kz"));
        assert!(config.enable_compression);
        assert!(!config.read_only);
        assert_eq!(config.buffer_pool_size, None);
    }
}
