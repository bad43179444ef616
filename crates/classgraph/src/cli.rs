use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "classgraph",
    version,
    about = "Java class graph indexer",
    long_about = "Builds a queryable graph of classes, methods, inheritance and call edges from a directory of Java sources."
)]
pub struct ClassGraphCli {
    #[command(subcommand)]
    pub command: Commands,
}

impl ClassGraphCli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the class graph from the source files of a directory
    Index {
        /// Directory holding the source files; subdirectories are not scanned
        #[arg(value_name = "SOURCE_DIR")]
        source_directory: Option<PathBuf>,

        /// Path of the graph database
        #[arg(long, value_name = "PATH")]
        database: Option<PathBuf>,

        /// TOML file with indexing settings; command line arguments take precedence
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Do not print the extracted tree of each file
        #[arg(long)]
        no_tree: bool,

        /// Output statistics. Optionally specify a file path to save to.
        #[arg(long, value_name = "FILE", num_args = 0..=1, require_equals = true)]
        stats: Option<Option<PathBuf>>,

        /// Also write logs to a rotating file in this directory
        #[arg(long, value_name = "DIR")]
        log_dir: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
    /// Query the class graph with a query string or a query file
    Query {
        /// Path of the graph database
        #[arg(long, value_name = "PATH")]
        database: PathBuf,

        /// Query string or file path containing the query
        #[arg(value_name = "QUERY_OR_FILE")]
        query_or_file: String,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
    /// Delete the graph database
    Clean {
        /// Path of the graph database
        #[arg(long, value_name = "PATH")]
        database: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_arguments() {
        let cli = ClassGraphCli::parse_from([
            "classgraph",
            "index",
            "src/java",
            "--database",
            "graph.kz",
            "--no-tree",
            "--stats=stats.json",
        ]);

        match cli.command {
            Commands::Index {
                source_directory,
                database,
                config,
                no_tree,
                stats,
                verbose,
                ..
            } => {
                assert_eq!(source_directory, Some(PathBuf::from("src/java")));
                assert_eq!(database, Some(PathBuf::from("graph.kz")));
                assert_eq!(config, None);
                assert!(no_tree);
                assert_eq!(stats, Some(Some(PathBuf::from("stats.json"))));
                assert!(!verbose);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_stats_without_file() {
        let cli = ClassGraphCli::parse_from(["classgraph", "index", "--stats"]);

        assert!(matches!(
            cli.command,
            Commands::Index {
                source_directory: None,
                stats: Some(None),
                ..
            }
        ));
    }

    #[test]
    fn test_query_requires_database() {
        assert!(
            ClassGraphCli::try_parse_from(["classgraph", "query", "MATCH (n) RETURN n"]).is_err()
        );
    }
}
