use crate::graph::{NodeLabel, QueryParams};
use crate::kuzu::connection::KuzuConnection;
use crate::kuzu::database::KuzuQueryResult;
use crate::kuzu::types::DatabaseError;
use crate::querying::library::{Query, QueryLibrary};
use crate::querying::query_builder::QueryBuilder;
use crate::schema::init::{CALLS_RELATIONSHIPS, EXTENDS_RELATIONSHIPS};
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// Node and relationship counts of the class graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub class_nodes: u64,
    pub method_nodes: u64,
    pub calls_relationships: u64,
    pub extends_relationships: u64,
}

impl GraphStats {
    pub fn total_nodes(&self) -> u64 {
        self.class_nodes + self.method_nodes
    }

    pub fn total_relationships(&self) -> u64 {
        self.calls_relationships + self.extends_relationships
    }
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} classes, {} methods, {} CALLS, {} EXTENDS",
            self.class_nodes,
            self.method_nodes,
            self.calls_relationships,
            self.extends_relationships
        )
    }
}

/// Stored properties of a `Class` node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredClass {
    pub name: String,
    pub extends: Option<String>,
    pub file: String,
    pub created_at: String,
    pub fields: String,
}

/// Stored properties of a `Method` node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMethod {
    pub name: String,
    pub file: String,
    pub created_at: String,
    pub parameters: String,
    pub behavior: String,
}

/// Read access to a populated class graph
pub struct GraphQueryService<'a, 'db> {
    connection: &'a KuzuConnection<'db>,
    query_builder: QueryBuilder,
}

impl<'a, 'db> GraphQueryService<'a, 'db> {
    pub fn new(connection: &'a KuzuConnection<'db>) -> Self {
        Self {
            connection,
            query_builder: QueryBuilder::new(),
        }
    }

    pub fn graph_stats(&self) -> Result<GraphStats, DatabaseError> {
        let count = |(_, query): (_, String)| self.connection.scalar_count(&query);

        Ok(GraphStats {
            class_nodes: count(self.query_builder.count_nodes(NodeLabel::Class))?,
            method_nodes: count(self.query_builder.count_nodes(NodeLabel::Method))?,
            calls_relationships: count(
                self.query_builder
                    .count_relationships(&CALLS_RELATIONSHIPS),
            )?,
            extends_relationships: count(
                self.query_builder
                    .count_relationships(&EXTENDS_RELATIONSHIPS),
            )?,
        })
    }

    pub fn get_class(&self, name: &str) -> Result<Option<StoredClass>, DatabaseError> {
        let rows = self.run_by_name(QueryLibrary::get_class(), name)?;

        Ok(rows.result.into_iter().next().map(|row| StoredClass {
            name: string_at(&row, 0).unwrap_or_default(),
            extends: string_at(&row, 1),
            file: string_at(&row, 2).unwrap_or_default(),
            created_at: string_at(&row, 3).unwrap_or_default(),
            fields: string_at(&row, 4).unwrap_or_default(),
        }))
    }

    pub fn get_method(&self, name: &str) -> Result<Option<StoredMethod>, DatabaseError> {
        let rows = self.run_by_name(QueryLibrary::get_method(), name)?;

        Ok(rows.result.into_iter().next().map(|row| StoredMethod {
            name: string_at(&row, 0).unwrap_or_default(),
            file: string_at(&row, 1).unwrap_or_default(),
            created_at: string_at(&row, 2).unwrap_or_default(),
            parameters: string_at(&row, 3).unwrap_or_default(),
            behavior: string_at(&row, 4).unwrap_or_default(),
        }))
    }

    /// Qualified names of the methods `name` calls, sorted
    pub fn find_callees(&self, name: &str) -> Result<Vec<String>, DatabaseError> {
        let rows = self.run_by_name(QueryLibrary::get_callees(), name)?;
        Ok(rows
            .result
            .iter()
            .filter_map(|row| string_at(row, 0))
            .collect())
    }

    pub fn find_superclass(&self, name: &str) -> Result<Option<String>, DatabaseError> {
        let rows = self.run_by_name(QueryLibrary::get_superclass(), name)?;
        Ok(rows.result.first().and_then(|row| string_at(row, 0)))
    }

    /// Runs a free-form read query and renders each row as a JSON object keyed by column name
    pub fn execute_query_json(
        &self,
        query: &str,
        params: Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, DatabaseError> {
        let result = self.connection.generic_query(query, params)?;
        Ok(rows_to_json(&result))
    }

    fn run_by_name(&self, query: Query, name: &str) -> Result<KuzuQueryResult, DatabaseError> {
        self.connection
            .run(query.query, &QueryParams::new().with("name", name))
    }
}

fn string_at(row: &[kuzu::Value], index: usize) -> Option<String> {
    match row.get(index)? {
        kuzu::Value::Null(_) => None,
        kuzu::Value::String(value) => Some(value.clone()),
        other => Some(other.to_string()),
    }
}

fn rows_to_json(result: &KuzuQueryResult) -> serde_json::Value {
    let rows = result
        .result
        .iter()
        .map(|row| {
            let object = result
                .column_names
                .iter()
                .zip(row.iter())
                .map(|(column, value)| {
                    let json = match value {
                        kuzu::Value::Null(_) => serde_json::Value::Null,
                        kuzu::Value::Bool(b) => serde_json::Value::Bool(*b),
                        kuzu::Value::Int64(i) => serde_json::Value::from(*i),
                        kuzu::Value::String(s) => serde_json::Value::String(s.clone()),
                        other => serde_json::Value::String(other.to_string()),
                    };
                    (column.clone(), json)
                })
                .collect::<Map<_, _>>();
            serde_json::Value::Object(object)
        })
        .collect();

    serde_json::Value::Array(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphSession;
    use crate::kuzu::config::DatabaseConfig;
    use crate::kuzu::database::KuzuDatabase;
    use crate::schema::manager::SchemaManager;

    #[test]
    fn test_reads_back_nodes_and_edges() -> Result<(), DatabaseError> {
        let temp_dir = tempfile::tempdir()?;
        let database = KuzuDatabase::new()
            .get_or_create_database(&DatabaseConfig::new(temp_dir.path().join("graph.kz")))?;
        let connection = KuzuConnection::new(&database)?;
        SchemaManager::new(&connection).initialize_schema()?;

        for (name, extends) in [("Animal", None), ("Dog", Some("Animal"))] {
            connection.execute(
                QueryLibrary::merge_class().query,
                QueryParams::new()
                    .with("name", name)
                    .with("extends", extends)
                    .with("file", "Zoo.java")
                    .with("created_at", "2024-01-01T00:00:00Z")
                    .with("fields", "[]"),
            )?;
        }
        connection.execute(
            QueryLibrary::merge_extends().query,
            QueryParams::new()
                .with("name", "Dog")
                .with("superclass", "Animal"),
        )?;

        let service = GraphQueryService::new(&connection);
        let dog = service.get_class("Dog")?.unwrap();
        assert_eq!(dog.extends.as_deref(), Some("Animal"));
        assert_eq!(dog.file, "Zoo.java");
        assert_eq!(service.get_class("Animal")?.unwrap().extends, None);
        assert_eq!(service.get_class("Cat")?, None);
        assert_eq!(service.find_superclass("Dog")?.as_deref(), Some("Animal"));

        let stats = service.graph_stats()?;
        assert_eq!(stats.class_nodes, 2);
        assert_eq!(stats.extends_relationships, 1);
        assert_eq!(stats.total_relationships(), 1);

        let json = service.execute_query_json(
            "MATCH (c:Class) RETURN c.name AS name ORDER BY c.name",
            Map::new(),
        )?;
        assert_eq!(
            json,
            serde_json::json!([{ "name": "Animal" }, { "name": "Dog" }])
        );
        Ok(())
    }
}
