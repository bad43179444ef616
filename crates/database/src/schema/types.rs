use crate::graph::{NodeLabel, RelationshipType};

/// Represents a Kuzu node table definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTable {
    pub label: NodeLabel,
    pub columns: &'static [ColumnDefinition],
}

impl NodeTable {
    pub fn name(&self) -> &'static str {
        match self.label {
            NodeLabel::Class => "Class",
            NodeLabel::Method => "Method",
        }
    }

    pub fn primary_key(&self) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|column| column.is_primary_key)
    }
}

/// Represents a Kuzu relationship table definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipTable {
    pub relationship: RelationshipType,
    pub from_to_pairs: &'static [(&'static NodeTable, &'static NodeTable)],
}

impl RelationshipTable {
    pub fn name(&self) -> &'static str {
        match self.relationship {
            RelationshipType::Calls => "CALLS",
            RelationshipType::Extends => "EXTENDS",
        }
    }
}

/// Represents a column definition in a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: &'static str,
    pub data_type: KuzuDataType,
    pub is_primary_key: bool,
}

impl ColumnDefinition {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            data_type: KuzuDataType::String,
            is_primary_key: false,
        }
    }

    pub const fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }
}

/// Column types used by the graph schema. Every stored property, including
/// the JSON snapshots and `created_at`, is a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KuzuDataType {
    String,
}

impl std::fmt::Display for KuzuDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KuzuDataType::String => write!(f, "STRING"),
        }
    }
}

/// Schema statistics
#[derive(Debug, Clone)]
pub struct SchemaStats {
    pub node_tables: usize,
    pub relationship_tables: usize,
    pub table_names: Vec<String>,
}

impl std::fmt::Display for SchemaStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Schema Stats: {} node tables, {} relationship tables\nTables: {}",
            self.node_tables,
            self.relationship_tables,
            self.table_names.join(", ")
        )
    }
}
