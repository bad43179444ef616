use anyhow::Result;
use database::kuzu::{
    config::DatabaseConfig, connection::KuzuConnection, database::KuzuDatabase,
};
use database::querying::GraphQueryService;
use serde_json::Map;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct QueryArgs {
    pub database: PathBuf,
    pub query_or_file: String,
}

/// Runs a read query and returns its rows as JSON objects
pub fn execute(args: QueryArgs) -> Result<serde_json::Value> {
    if !args.database.exists() {
        anyhow::bail!("No graph database at {}", args.database.display());
    }

    // Read the query from the file if provided
    let query = if Path::new(&args.query_or_file).is_file() {
        std::fs::read_to_string(&args.query_or_file)
            .map_err(|e| anyhow::anyhow!("Failed to read query file: {}", e))?
    } else {
        args.query_or_file
    };

    if query.trim().is_empty() {
        anyhow::bail!("Empty query provided");
    }

    let config = DatabaseConfig::new(&args.database).read_only();
    let database = KuzuDatabase::new().get_or_create_database(&config)?;
    let connection = KuzuConnection::new(&database)?;
    info!("Connection created successfully");

    Ok(GraphQueryService::new(&connection).execute_query_json(&query, Map::new())?)
}

pub fn run(args: QueryArgs) -> Result<()> {
    let rows = execute(args)?;
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::index::{self, IndexArgs};

    fn indexed_graph(root: &Path) -> PathBuf {
        let source = root.join("src");
        std::fs::create_dir(&source).unwrap();
        std::fs::write(
            source.join("Cat.java"),
            "class Cat extends Pet { void meow() { purr(); } void purr() {} }",
        )
        .unwrap();
        std::fs::write(source.join("Pet.java"), "class Pet { String name; }").unwrap();

        let database = root.join("graph.kz");
        index::run(IndexArgs {
            source_directory: Some(source),
            database: Some(database.clone()),
            config: None,
            no_tree: true,
            stats: Some(Some(root.join("stats.json"))),
        })
        .unwrap();
        database
    }

    #[test]
    fn test_query_string_and_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let database = indexed_graph(temp_dir.path());
        assert!(temp_dir.path().join("stats.json").is_file());

        let rows = execute(QueryArgs {
            database: database.clone(),
            query_or_file: "MATCH (a:Method)-[:CALLS]->(b:Method) RETURN a.name AS caller, b.name AS callee"
                .to_string(),
        })
        .unwrap();
        assert_eq!(
            rows,
            serde_json::json!([{ "caller": "Cat.java.meow", "callee": "Cat.java.purr" }])
        );

        let query_file = temp_dir.path().join("extends.cypher");
        std::fs::write(
            &query_file,
            "MATCH (c:Class)-[:EXTENDS]->(p:Class) RETURN c.name AS class, p.name AS parent",
        )
        .unwrap();
        let rows = execute(QueryArgs {
            database,
            query_or_file: query_file.display().to_string(),
        })
        .unwrap();
        assert_eq!(
            rows,
            serde_json::json!([{ "class": "Cat", "parent": "Pet" }])
        );
    }

    #[test]
    fn test_missing_database_and_empty_query() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(
            execute(QueryArgs {
                database: temp_dir.path().join("missing.kz"),
                query_or_file: "MATCH (n) RETURN n".to_string(),
            })
            .is_err()
        );

        let database = indexed_graph(temp_dir.path());
        assert!(
            execute(QueryArgs {
                database,
                query_or_file: "   ".to_string(),
            })
            .is_err()
        );
    }
}
