use crate::analysis::naming::qualify;
use crate::analysis::types::{CallIndex, ClassModel, MethodModel};
use crate::execution::registry::RegisteredClass;
use chrono::{DateTime, SecondsFormat, Utc};
use database::graph::{GraphSession, QueryParams};
use database::kuzu::types::DatabaseError;
use database::querying::QueryLibrary;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use tracing::debug;

/// Statements issued by the writer, per kind. Merges that turn out to be
/// no-ops in the store are counted too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteSummary {
    pub class_merges: usize,
    pub method_merges: usize,
    pub calls_merges: usize,
    pub extends_merges: usize,
}

impl WriteSummary {
    pub fn total(&self) -> usize {
        self.class_merges + self.method_merges + self.calls_merges + self.extends_merges
    }
}

impl AddAssign for WriteSummary {
    fn add_assign(&mut self, other: Self) {
        self.class_merges += other.class_merges;
        self.method_merges += other.method_merges;
        self.calls_merges += other.calls_merges;
        self.extends_merges += other.extends_merges;
    }
}

/// Turns extracted classes and calls into graph merge statements
#[derive(Debug, Clone, Default)]
pub struct GraphWriter {
    fixed_timestamp: Option<DateTime<Utc>>,
}

impl GraphWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp every created node with `timestamp` instead of the current time
    pub fn with_timestamp(timestamp: DateTime<Utc>) -> Self {
        Self {
            fixed_timestamp: Some(timestamp),
        }
    }

    /// Writes `classes` with their methods, the CALLS edges of `call_index`
    /// and the EXTENDS edge of every class that names a superclass.
    ///
    /// Nodes are merged by key and their properties are only set on
    /// creation. Edges whose endpoints are not in the store are dropped by
    /// the store without an error. The caller owns the transaction.
    pub fn persist<'c, S: GraphSession>(
        &self,
        session: &S,
        classes: impl IntoIterator<Item = &'c RegisteredClass>,
        call_index: &CallIndex,
        unit_id: &str,
    ) -> Result<WriteSummary, DatabaseError> {
        let created_at = self
            .fixed_timestamp
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Micros, true);
        let mut summary = WriteSummary::default();
        let classes = classes.into_iter().collect::<Vec<_>>();

        for entry in &classes {
            self.merge_class(session, entry, &created_at)?;
            summary.class_merges += 1;

            for method in &entry.model.methods {
                self.merge_method(session, &entry.unit_id, method, &created_at)?;
                summary.method_merges += 1;
            }
        }

        for (caller, callee) in call_index.edges() {
            session.execute(
                QueryLibrary::merge_calls().query,
                QueryParams::new()
                    .with("caller", caller.as_str())
                    .with("callee", callee.as_str()),
            )?;
            summary.calls_merges += 1;
        }

        for entry in &classes {
            if let Some(superclass) = &entry.model.superclass_name {
                session.execute(
                    QueryLibrary::merge_extends().query,
                    QueryParams::new()
                        .with("name", entry.model.name.as_str())
                        .with("superclass", superclass.as_str()),
                )?;
                summary.extends_merges += 1;
            }
        }

        debug!(
            "Persisted {unit_id}: {} class, {} method, {} CALLS and {} EXTENDS merges",
            summary.class_merges, summary.method_merges, summary.calls_merges, summary.extends_merges
        );
        Ok(summary)
    }

    fn merge_class<S: GraphSession>(
        &self,
        session: &S,
        entry: &RegisteredClass,
        created_at: &str,
    ) -> Result<(), DatabaseError> {
        let ClassModel {
            name,
            superclass_name,
            fields,
            ..
        } = &entry.model;

        session.execute(
            QueryLibrary::merge_class().query,
            QueryParams::new()
                .with("name", name.as_str())
                .with("extends", superclass_name.as_deref())
                .with("file", entry.unit_id.as_str())
                .with("created_at", created_at)
                .with("fields", to_json(fields)?),
        )
    }

    fn merge_method<S: GraphSession>(
        &self,
        session: &S,
        unit_id: &str,
        method: &MethodModel,
        created_at: &str,
    ) -> Result<(), DatabaseError> {
        let parameters = method
            .parameters
            .iter()
            .map(|parameter| (parameter.type_name.as_str(), parameter.param_name.as_str()))
            .collect::<Vec<_>>();

        session.execute(
            QueryLibrary::merge_method().query,
            QueryParams::new()
                .with("name", qualify(unit_id, &method.name).into_string())
                .with("file", unit_id)
                .with("created_at", created_at)
                .with("parameters", to_json(&parameters)?)
                .with("behavior", to_json(&method.behavior_summary)?),
        )
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value)
        .map_err(|e| DatabaseError::UnexpectedResult(format!("Failed to serialize snapshot: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extract;
    use crate::parsing::{JavaParser, SourceParser};
    use chrono::TimeZone;
    use database::graph::ParamValue;
    use database::kuzu::config::DatabaseConfig;
    use database::kuzu::connection::KuzuConnection;
    use database::kuzu::database::KuzuDatabase;
    use database::querying::GraphQueryService;
    use database::schema::manager::SchemaManager;
    use database::testing::{RecordedCall, RecordingSession};

    const HELLO_WORLD: &str = r#"
public class HelloWorld {
    private String message;

    public HelloWorld(String message) {
        this.message = message;
    }

    public void sayHello() {
        System.out.println("Hello, " + message);
        anotherMethod();
    }

    public void anotherMethod() {
        System.out.println("This is another method.");
    }
}
"#;

    fn registered(source: &str, unit_id: &str) -> (Vec<RegisteredClass>, CallIndex) {
        let unit = JavaParser::new().unwrap().parse(source).unwrap();
        let extraction = extract(&unit, unit_id);
        let classes = extraction
            .classes
            .into_iter()
            .map(|model| RegisteredClass {
                unit_id: unit_id.to_string(),
                model,
            })
            .collect();
        (classes, extraction.call_index)
    }

    fn fixed_writer(second: u32) -> GraphWriter {
        GraphWriter::with_timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, second).unwrap())
    }

    #[test]
    fn test_statement_order_and_bound_values() {
        let (classes, call_index) = registered(HELLO_WORLD, "HelloWorld.java");
        let session = RecordingSession::new();

        let summary = fixed_writer(0)
            .persist(&session, &classes, &call_index, "HelloWorld.java")
            .unwrap();

        assert_eq!(
            summary,
            WriteSummary {
                class_merges: 1,
                method_merges: 2,
                calls_merges: 3,
                extends_merges: 0,
            }
        );

        let executed = session.executed();
        let queries = executed
            .iter()
            .map(|(query, _)| query.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            queries,
            vec![
                QueryLibrary::merge_class().query,
                QueryLibrary::merge_method().query,
                QueryLibrary::merge_method().query,
                QueryLibrary::merge_calls().query,
                QueryLibrary::merge_calls().query,
                QueryLibrary::merge_calls().query,
            ]
        );

        let class_params = &executed[0].1;
        assert_eq!(class_params.get("extends"), Some(&ParamValue::Null));
        assert_eq!(
            class_params.get("fields"),
            Some(&ParamValue::from(r#"[{"name":"message","type":"String"}]"#))
        );
        assert_eq!(
            class_params.get("created_at"),
            Some(&ParamValue::from("2024-01-01T00:00:00.000000Z"))
        );

        let say_hello = &executed[1].1;
        assert_eq!(
            say_hello.get("name"),
            Some(&ParamValue::from("HelloWorld.java.sayHello"))
        );
        assert_eq!(say_hello.get("parameters"), Some(&ParamValue::from("[]")));
        assert_eq!(
            say_hello.get("behavior"),
            Some(&ParamValue::from(
                r#"["Calls method: println","Calls method: anotherMethod"]"#
            ))
        );

        // The writer leaves transaction control to the caller
        assert!(
            session
                .calls()
                .iter()
                .all(|call| matches!(call, RecordedCall::Execute { .. }))
        );
    }

    #[test]
    fn test_values_never_reach_query_text() {
        let (classes, call_index) = registered(
            r#"class Quote extends Base {
                String text;
                void say(String words) { label = "it's \"quoted\""; shout(); }
                void shout() {}
            }"#,
            "Quote's.java",
        );
        let session = RecordingSession::new();
        fixed_writer(0)
            .persist(&session, &classes, &call_index, "Quote's.java")
            .unwrap();

        for (query, params) in session.executed() {
            assert!(!params.is_empty());
            for (_, value) in params.iter() {
                if let ParamValue::String(text) = value {
                    assert!(!query.contains(text.as_str()), "{text} found in {query}");
                }
            }
        }
    }

    #[test]
    fn test_parameters_serialize_as_pairs() {
        let (classes, call_index) = registered(
            "class Greeter { void greet(String message, int times) {} }",
            "Greeter.java",
        );
        let session = RecordingSession::new();
        fixed_writer(0)
            .persist(&session, &classes, &call_index, "Greeter.java")
            .unwrap();

        assert_eq!(
            session.executed()[1].1.get("parameters"),
            Some(&ParamValue::from(r#"[["String","message"],["int","times"]]"#))
        );
    }

    #[test]
    fn test_failed_statement_stops_writing() {
        let (classes, call_index) = registered(HELLO_WORLD, "HelloWorld.java");
        let session = RecordingSession::failing_at(1);

        let result = fixed_writer(0).persist(&session, &classes, &call_index, "HelloWorld.java");

        assert!(result.is_err());
        assert_eq!(session.executed().len(), 1);
    }

    fn open_graph(temp_dir: &tempfile::TempDir) -> std::sync::Arc<kuzu::Database> {
        KuzuDatabase::new()
            .get_or_create_database(&DatabaseConfig::new(temp_dir.path().join("graph.kz")))
            .unwrap()
    }

    #[test]
    fn test_hello_world_end_to_end() {
        let temp_dir = tempfile::tempdir().unwrap();
        let database = open_graph(&temp_dir);
        let connection = KuzuConnection::new(&database).unwrap();
        SchemaManager::new(&connection).initialize_schema().unwrap();

        let (classes, call_index) = registered(HELLO_WORLD, "HelloWorld.java");
        connection
            .transaction(|session| {
                fixed_writer(0).persist(session, &classes, &call_index, "HelloWorld.java")
            })
            .unwrap();

        let service = GraphQueryService::new(&connection);
        let stats = service.graph_stats().unwrap();
        assert_eq!(stats.class_nodes, 1);
        assert_eq!(stats.method_nodes, 2);
        assert_eq!(stats.extends_relationships, 0);
        // println has no Method node, so only one CALLS edge survives
        assert_eq!(stats.calls_relationships, 1);

        let class = service.get_class("HelloWorld").unwrap().unwrap();
        assert_eq!(class.extends, None);
        assert_eq!(class.file, "HelloWorld.java");
        assert_eq!(
            service.find_callees("HelloWorld.java.sayHello").unwrap(),
            vec!["HelloWorld.java.anotherMethod".to_string()]
        );
        assert!(
            service
                .find_callees("HelloWorld.java.anotherMethod")
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_second_write_keeps_first_properties() {
        let temp_dir = tempfile::tempdir().unwrap();
        let database = open_graph(&temp_dir);
        let connection = KuzuConnection::new(&database).unwrap();
        SchemaManager::new(&connection).initialize_schema().unwrap();

        let (first, first_calls) = registered(
            "class Shape { int sides; void draw() {} }",
            "Shape.java",
        );
        fixed_writer(0)
            .persist(&connection, &first, &first_calls, "Shape.java")
            .unwrap();

        let (second, second_calls) = registered(
            "class Shape extends Figure { String label; void draw() { paint(); } }",
            "Shape.java",
        );
        fixed_writer(30)
            .persist(&connection, &second, &second_calls, "Shape.java")
            .unwrap();

        let service = GraphQueryService::new(&connection);
        let shape = service.get_class("Shape").unwrap().unwrap();
        assert_eq!(shape.extends, None);
        assert_eq!(shape.fields, r#"[{"name":"sides","type":"int"}]"#);
        assert_eq!(shape.created_at, "2024-01-01T00:00:00.000000Z");

        let draw = service.get_method("Shape.java.draw").unwrap().unwrap();
        assert_eq!(draw.behavior, "[]");
        assert_eq!(draw.created_at, "2024-01-01T00:00:00.000000Z");

        let stats = service.graph_stats().unwrap();
        assert_eq!(stats.class_nodes, 1);
        assert_eq!(stats.method_nodes, 1);
    }

    #[test]
    fn test_dangling_edges_are_silently_dropped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let database = open_graph(&temp_dir);
        let connection = KuzuConnection::new(&database).unwrap();
        SchemaManager::new(&connection).initialize_schema().unwrap();

        let (classes, call_index) = registered(
            "class Dog extends Animal { void bark() { howl(); } }",
            "Dog.java",
        );
        let summary = fixed_writer(0)
            .persist(&connection, &classes, &call_index, "Dog.java")
            .unwrap();
        assert_eq!(summary.calls_merges, 1);
        assert_eq!(summary.extends_merges, 1);

        let service = GraphQueryService::new(&connection);
        let stats = service.graph_stats().unwrap();
        assert_eq!(stats.class_nodes, 1);
        assert_eq!(stats.method_nodes, 1);
        assert_eq!(stats.total_relationships(), 0);
        assert_eq!(service.get_class("Animal").unwrap(), None);
        assert_eq!(service.get_method("Dog.java.howl").unwrap(), None);
    }
}
