use crate::graph::NodeLabel;
use crate::kuzu::types::{QueryGeneratorResult, QueryNoop};
use crate::schema::types::{NodeTable, RelationshipTable};
use tracing::debug;

/// Generates schema and maintenance statements. Data statements live in the
/// query library and always take bound parameters.
#[derive(Default)]
pub struct QueryBuilder {
    log_queries: bool,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self { log_queries: false }
    }

    pub fn with_logging(mut self) -> Self {
        self.log_queries = true;
        self
    }

    pub fn log_query(&self, query: &str) {
        if self.log_queries {
            debug!("Query: {query}");
        }
    }

    // SCHEMA
    pub fn create_node_table(&self, table: &NodeTable) -> QueryGeneratorResult {
        if table.columns.is_empty() {
            return (QueryNoop::Yes, String::new());
        }

        let mut columns = table
            .columns
            .iter()
            .map(|col| format!("{} {}", col.name, col.data_type))
            .collect::<Vec<_>>();

        if let Some(primary_key) = table.primary_key() {
            columns.push(format!("PRIMARY KEY ({})", primary_key.name));
        }

        let query = format!(
            "CREATE NODE TABLE IF NOT EXISTS {} ({})",
            table.name(),
            columns.join(", ")
        );

        (QueryNoop::No, query)
    }

    pub fn create_relationship_table(&self, table: &RelationshipTable) -> QueryGeneratorResult {
        if table.from_to_pairs.is_empty() {
            return (QueryNoop::Yes, String::new());
        }

        let mut query = format!("CREATE REL TABLE IF NOT EXISTS {} (", table.name());
        let from_to_clauses = table
            .from_to_pairs
            .iter()
            .map(|(from, to)| format!("FROM {} TO {}", from.name(), to.name()))
            .collect::<Vec<_>>()
            .join(", ");
        query.push_str(&from_to_clauses);
        query.push(')');

        (QueryNoop::No, query)
    }

    // MAINTENANCE
    pub fn delete_all(&self) -> QueryGeneratorResult {
        (QueryNoop::No, "MATCH (n) DETACH DELETE n".to_string())
    }

    pub fn count_nodes(&self, label: NodeLabel) -> QueryGeneratorResult {
        (
            QueryNoop::No,
            format!("MATCH (n:{}) RETURN COUNT(n)", label.as_ref()),
        )
    }

    pub fn count_relationships(&self, table: &RelationshipTable) -> QueryGeneratorResult {
        (
            QueryNoop::No,
            format!("MATCH ()-[r:{}]->() RETURN COUNT(r)", table.name()),
        )
    }
}
