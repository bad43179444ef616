use crate::graph::{NodeLabel, RelationshipType};
use crate::schema::types::{ColumnDefinition, NodeTable, RelationshipTable};

// Class nodes are keyed by bare class name, so equally named classes from
// different files share one node.
pub static CLASS_TABLE: NodeTable = NodeTable {
    label: NodeLabel::Class,
    columns: &[
        ColumnDefinition::new("name").primary_key(),
        ColumnDefinition::new("extends"),
        ColumnDefinition::new("file"),
        ColumnDefinition::new("created_at"),
        ColumnDefinition::new("fields"),
    ],
};

// Method nodes are keyed by "{file}.{method}"
pub static METHOD_TABLE: NodeTable = NodeTable {
    label: NodeLabel::Method,
    columns: &[
        ColumnDefinition::new("name").primary_key(),
        ColumnDefinition::new("file"),
        ColumnDefinition::new("created_at"),
        ColumnDefinition::new("parameters"),
        ColumnDefinition::new("behavior"),
    ],
};

pub static NODE_TABLES: &[&NodeTable] = &[&CLASS_TABLE, &METHOD_TABLE];

pub static CALLS_RELATIONSHIPS: RelationshipTable = RelationshipTable {
    relationship: RelationshipType::Calls,
    from_to_pairs: &[(&METHOD_TABLE, &METHOD_TABLE)],
};

pub static EXTENDS_RELATIONSHIPS: RelationshipTable = RelationshipTable {
    relationship: RelationshipType::Extends,
    from_to_pairs: &[(&CLASS_TABLE, &CLASS_TABLE)],
};

pub static RELATIONSHIP_TABLES: &[&RelationshipTable] =
    &[&CALLS_RELATIONSHIPS, &EXTENDS_RELATIONSHIPS];
