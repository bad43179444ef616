pub struct QueryLibrary;

#[derive(Debug, Clone, Copy)]
pub struct Query {
    pub name: &'static str,
    pub description: &'static str,
    pub query: &'static str,
    pub parameters: &'static [&'static str],
}

impl QueryLibrary {
    /// Class nodes are matched by bare name. Properties are only written when
    /// the node is first created.
    pub fn merge_class() -> Query {
        Query {
            name: "merge_class",
            description: "Create a class node unless one with the same name exists.",
            query: r#"
                MERGE (c:Class {name: $name})
                ON CREATE SET
                    c.extends = $extends,
                    c.file = $file,
                    c.created_at = $created_at,
                    c.fields = $fields
            "#,
            parameters: &["name", "extends", "file", "created_at", "fields"],
        }
    }

    pub fn merge_method() -> Query {
        Query {
            name: "merge_method",
            description: "Create a method node unless one with the same qualified name exists.",
            query: r#"
                MERGE (m:Method {name: $name})
                ON CREATE SET
                    m.file = $file,
                    m.created_at = $created_at,
                    m.parameters = $parameters,
                    m.behavior = $behavior
            "#,
            parameters: &["name", "file", "created_at", "parameters", "behavior"],
        }
    }

    /// Matches both endpoints first, so a missing endpoint makes the merge a no-op.
    pub fn merge_calls() -> Query {
        Query {
            name: "merge_calls",
            description: "Link a calling method to the method it invokes.",
            query: r#"
                MATCH (a:Method {name: $caller}), (b:Method {name: $callee})
                MERGE (a)-[:CALLS]->(b)
            "#,
            parameters: &["caller", "callee"],
        }
    }

    pub fn merge_extends() -> Query {
        Query {
            name: "merge_extends",
            description: "Link a class to its superclass.",
            query: r#"
                MATCH (a:Class {name: $name}), (b:Class {name: $superclass})
                MERGE (a)-[:EXTENDS]->(b)
            "#,
            parameters: &["name", "superclass"],
        }
    }

    pub fn get_class() -> Query {
        Query {
            name: "get_class",
            description: "Read the stored properties of a class node.",
            query: r#"
                MATCH (c:Class {name: $name})
                RETURN c.name, c.extends, c.file, c.created_at, c.fields
            "#,
            parameters: &["name"],
        }
    }

    pub fn get_method() -> Query {
        Query {
            name: "get_method",
            description: "Read the stored properties of a method node.",
            query: r#"
                MATCH (m:Method {name: $name})
                RETURN m.name, m.file, m.created_at, m.parameters, m.behavior
            "#,
            parameters: &["name"],
        }
    }

    pub fn get_callees() -> Query {
        Query {
            name: "get_callees",
            description: "List the methods a method calls.",
            query: r#"
                MATCH (a:Method {name: $name})-[:CALLS]->(b:Method)
                RETURN b.name
                ORDER BY b.name
            "#,
            parameters: &["name"],
        }
    }

    pub fn get_superclass() -> Query {
        Query {
            name: "get_superclass",
            description: "Find the class a class extends.",
            query: r#"
                MATCH (a:Class {name: $name})-[:EXTENDS]->(b:Class)
                RETURN b.name
            "#,
            parameters: &["name"],
        }
    }

    pub fn all_write_queries() -> Vec<Query> {
        vec![
            Self::merge_class(),
            Self::merge_method(),
            Self::merge_calls(),
            Self::merge_extends(),
        ]
    }
}
