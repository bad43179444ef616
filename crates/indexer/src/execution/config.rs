use crate::errors::{IndexerError, Result};
use database::kuzu::config::{DEFAULT_DATABASE_PATH, DatabaseConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_EXTENSION: &str = "java";

/// Settings for one indexing run.
///
/// Every key is optional in the TOML file:
///
/// ```toml
/// source_directory = "src/main/java/com/acme"
/// database_path = "graph/classgraph.kz"
/// file_extension = "java"
/// print_tree = false
/// buffer_pool_size = 536870912
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingConfig {
    pub source_directory: PathBuf,
    pub database_path: PathBuf,
    /// Without the leading dot
    pub file_extension: String,
    pub respect_gitignore: bool,
    /// Print each unit's extracted tree to stdout
    pub print_tree: bool,
    /// Kuzu buffer pool in bytes; Kuzu picks a size when unset
    pub buffer_pool_size: Option<u64>,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            source_directory: PathBuf::from("."),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            respect_gitignore: false,
            print_tree: true,
            buffer_pool_size: None,
        }
    }
}

impl IndexingConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| IndexerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| IndexerError::io(path, e))?;
        Self::from_toml_str(&contents)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        let config = DatabaseConfig::new(&self.database_path);
        match self.buffer_pool_size {
            Some(size) => config.with_buffer_size(size),
            None => config,
        }
    }
}

/// Layers command line overrides on top of an optional config file
#[derive(Debug, Default)]
pub struct IndexingConfigBuilder {
    config: IndexingConfig,
}

impl IndexingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => IndexingConfig::load(path)?,
            None => IndexingConfig::default(),
        };
        Ok(Self { config })
    }

    pub fn source_directory(mut self, directory: Option<PathBuf>) -> Self {
        if let Some(directory) = directory {
            self.config.source_directory = directory;
        }
        self
    }

    pub fn database_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.config.database_path = path;
        }
        self
    }

    pub fn print_tree(mut self, enabled: bool) -> Self {
        self.config.print_tree = enabled;
        self
    }

    pub fn build(mut self) -> Result<IndexingConfig> {
        let extension = self.config.file_extension.trim_start_matches('.').to_string();
        if extension.is_empty() {
            return Err(IndexerError::Config(
                "file_extension must not be empty".to_string(),
            ));
        }
        self.config.file_extension = extension;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IndexingConfigBuilder::new().build().unwrap();

        assert_eq!(config.source_directory, PathBuf::from("."));
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(config.file_extension, "java");
        assert!(config.print_tree);
        assert!(!config.respect_gitignore);
        assert_eq!(config.database_config().buffer_pool_size, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = IndexingConfig::from_toml_str(
            r#"
            source_directory = "/srv/java"
            buffer_pool_size = 1048576
            "#,
        )
        .unwrap();

        assert_eq!(config.source_directory, PathBuf::from("/srv/java"));
        assert_eq!(config.file_extension, "java");
        assert_eq!(config.database_config().buffer_pool_size, Some(1_048_576));
    }

    #[test]
    fn test_cli_overrides_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("classgraph.toml");
        std::fs::write(
            &path,
            "source_directory = \"from-file\"\ndatabase_path = \"file.kz\"\nfile_extension = \".java\"\n",
        )
        .unwrap();

        let config = IndexingConfigBuilder::from_file(Some(path.as_path()))
            .unwrap()
            .source_directory(Some(PathBuf::from("from-cli")))
            .database_path(None)
            .print_tree(false)
            .build()
            .unwrap();

        assert_eq!(config.source_directory, PathBuf::from("from-cli"));
        assert_eq!(config.database_path, PathBuf::from("file.kz"));
        assert_eq!(config.file_extension, "java");
        assert!(!config.print_tree);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            IndexingConfig::from_toml_str("print_tree = \"yes\""),
            Err(IndexerError::Config(_))
        ));
        assert!(matches!(
            IndexingConfigBuilder::new().build(),
            Ok(config) if config.file_extension == "java"
        ));
        assert!(matches!(
            IndexingConfigBuilder::from_file(Some(Path::new("/nonexistent/classgraph.toml"))),
            Err(IndexerError::Io { .. })
        ));
    }
}
