use crate::graph::GraphSession;
use crate::kuzu::connection::KuzuConnection;
use crate::kuzu::types::{DatabaseError, QueryNoop};
use crate::querying::query_builder::QueryBuilder;
use crate::schema::init::{NODE_TABLES, RELATIONSHIP_TABLES};
use crate::schema::types::{NodeTable, RelationshipTable, SchemaStats};
use tracing::info;

/// Manages schema creation and the destructive reset that starts every run
pub struct SchemaManager<'a, 'db> {
    connection: &'a KuzuConnection<'db>,
    query_builder: QueryBuilder,
}

impl<'a, 'db> SchemaManager<'a, 'db> {
    pub fn new(connection: &'a KuzuConnection<'db>) -> Self {
        Self {
            connection,
            query_builder: QueryBuilder::new().with_logging(),
        }
    }

    /// Check if the schema already exists by looking for every table
    fn schema_exists(&self) -> Result<bool, DatabaseError> {
        let table_names = self.connection.get_table_names()?;
        let has_table = |name: &str| {
            table_names
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(name))
        };

        Ok(NODE_TABLES.iter().all(|table| has_table(table.name()))
            && RELATIONSHIP_TABLES.iter().all(|table| has_table(table.name())))
    }

    /// Create the node and relationship tables of the class graph
    pub fn initialize_schema(&self) -> Result<(), DatabaseError> {
        info!("Initializing class graph schema...");

        if self.schema_exists()? {
            info!("Schema already exists, skipping creation");
            return Ok(());
        }

        // Node tables must exist before the relationship tables that reference them
        self.connection.transaction(|conn| {
            for table in NODE_TABLES.iter() {
                self.create_node_table(conn, table)?;
            }
            for table in RELATIONSHIP_TABLES.iter() {
                self.create_relationship_table(conn, table)?;
            }
            Ok::<(), DatabaseError>(())
        })?;

        info!("Class graph schema initialized successfully");
        Ok(())
    }

    fn create_node_table(
        &self,
        transaction_conn: &KuzuConnection,
        table: &NodeTable,
    ) -> Result<(), DatabaseError> {
        if let (QueryNoop::No, query) = self.query_builder.create_node_table(table) {
            self.query_builder.log_query(&query);
            transaction_conn.execute_ddl(&query)?;
            info!("Created node table: {}", table.name());
        }
        Ok(())
    }

    fn create_relationship_table(
        &self,
        transaction_conn: &KuzuConnection,
        table: &RelationshipTable,
    ) -> Result<(), DatabaseError> {
        match self.query_builder.create_relationship_table(table) {
            (QueryNoop::No, query) => {
                self.query_builder.log_query(&query);
                transaction_conn.execute_ddl(&query)?;
                info!("Created relationship table: {}", table.name());
                Ok(())
            }
            (QueryNoop::Yes, _) => Err(DatabaseError::InitializationFailed(format!(
                "RelationshipTable {} must have from_to_pairs specified",
                table.name()
            ))),
        }
    }

    /// Delete every node and relationship, keeping the tables
    pub fn reset_graph(&self) -> Result<(), DatabaseError> {
        let (_, query) = self.query_builder.delete_all();
        self.query_builder.log_query(&query);
        self.connection.execute_ddl(&query)?;
        info!("Cleared all nodes and relationships from the graph");
        Ok(())
    }

    pub fn get_schema_stats(&self) -> Result<SchemaStats, DatabaseError> {
        let table_names = self.connection.get_table_names()?;

        Ok(SchemaStats {
            node_tables: NODE_TABLES.len(),
            relationship_tables: RELATIONSHIP_TABLES.len(),
            table_names,
        })
    }
}
