use crate::errors::{IndexerError, Result};
use crate::execution::config::IndexingConfig;
use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Enumerates the source files of one run
pub trait FileSource {
    fn get_files(&self, config: &IndexingConfig) -> Result<Vec<PathBuf>>;
}

/// Files directly inside one directory, symlinks resolved. Subdirectories
/// are not entered.
pub struct DirectoryFileSource {
    directory: PathBuf,
}

impl DirectoryFileSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl FileSource for DirectoryFileSource {
    fn get_files(&self, config: &IndexingConfig) -> Result<Vec<PathBuf>> {
        let directory =
            dunce::canonicalize(&self.directory).map_err(|e| IndexerError::io(&self.directory, e))?;
        if !directory.is_dir() {
            return Err(IndexerError::Config(format!(
                "{} is not a directory",
                directory.display()
            )));
        }

        let mut files = Vec::new();
        for result in WalkBuilder::new(&directory)
            .max_depth(Some(1))
            .follow_links(true)
            .hidden(false)
            .git_ignore(config.respect_gitignore)
            .git_global(false)
            .git_exclude(config.respect_gitignore)
            .ignore(config.respect_gitignore)
            .parents(config.respect_gitignore)
            .require_git(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {e}", directory.display());
                    continue;
                }
            };

            if entry.file_type().is_some_and(|file_type| file_type.is_file())
                && has_extension(entry.path(), &config.file_extension)
            {
                files.push(entry.into_path());
            }
        }

        // Listing order is platform dependent
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        debug!(
            "Found {} .{} files in {}",
            files.len(),
            config.file_extension,
            directory.display()
        );
        Ok(files)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(OsStr::to_str) == Some(extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_lists_matching_files_sorted_without_recursion() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("Zebra.java"), "class Zebra {}").unwrap();
        fs::write(root.join("Animal.java"), "class Animal {}").unwrap();
        fs::write(root.join("notes.txt"), "not java").unwrap();
        fs::write(root.join("Readme.JAVA"), "wrong case").unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested").join("Inner.java"), "class Inner {}").unwrap();
        fs::create_dir(root.join("Dir.java")).unwrap();

        let files = DirectoryFileSource::new(root)
            .get_files(&IndexingConfig::default())
            .unwrap();

        assert_eq!(names(&files), vec!["Animal.java", "Zebra.java"]);
    }

    #[test]
    fn test_gitignore_is_opt_in() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "Generated.java\n").unwrap();
        fs::write(root.join("Generated.java"), "class Generated {}").unwrap();
        fs::write(root.join("Main.java"), "class Main {}").unwrap();

        let source = DirectoryFileSource::new(root);
        let all = source.get_files(&IndexingConfig::default()).unwrap();
        assert_eq!(names(&all), vec!["Generated.java", "Main.java"]);

        let config = IndexingConfig {
            respect_gitignore: true,
            ..IndexingConfig::default()
        };
        let filtered = source.get_files(&config).unwrap();
        assert_eq!(names(&filtered), vec!["Main.java"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_sources_are_listed() {
        let outside = tempfile::tempdir().unwrap();
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        let target = outside.path().join("Shared.java");
        fs::write(&target, "class Shared {}").unwrap();
        std::os::unix::fs::symlink(&target, root.join("Linked.java")).unwrap();
        std::os::unix::fs::symlink(outside.path().join("Gone.java"), root.join("Dangling.java"))
            .unwrap();
        fs::write(root.join("Main.java"), "class Main {}").unwrap();

        let files = DirectoryFileSource::new(root)
            .get_files(&IndexingConfig::default())
            .unwrap();

        assert_eq!(names(&files), vec!["Linked.java", "Main.java"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = DirectoryFileSource::new(temp_dir.path().join("missing"))
            .get_files(&IndexingConfig::default());

        assert!(matches!(result, Err(IndexerError::Io { .. })));
    }
}
