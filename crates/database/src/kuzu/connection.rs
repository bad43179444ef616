use crate::graph::{GraphSession, ParamValue, QueryParams};
use crate::kuzu::{database::KuzuQueryResult, types::DatabaseError};

use kuzu::{Connection, Database};
use serde_json::Map;
use tracing::debug;

pub struct KuzuConnection<'a> {
    connection: Connection<'a>,
}

impl<'a> KuzuConnection<'a> {
    pub fn new(database: &'a Database) -> Result<Self, DatabaseError> {
        let connection = Connection::new(database).map_err(|e| {
            DatabaseError::InitializationFailed(format!(
                "Failed to create connection to database: {e}"
            ))
        })?;

        Ok(Self { connection })
    }

    /// Runs an arbitrary query with JSON parameters and collects every row.
    pub fn generic_query(
        &self,
        query: &str,
        params: Map<String, serde_json::Value>,
    ) -> Result<KuzuQueryResult, DatabaseError> {
        let kuzu_params = extract_kuzu_params(&params);
        let mut prepared = self.prepare(query)?;

        let result = self.connection.execute(&mut prepared, kuzu_params)?;

        Ok(KuzuQueryResult {
            column_names: result.get_column_names().to_vec(),
            result: result.into_iter().collect::<Vec<_>>(),
        })
    }

    /// Runs a prepared statement with bound parameters and collects every row.
    pub fn run(&self, query: &str, params: &QueryParams) -> Result<KuzuQueryResult, DatabaseError> {
        debug!("Executing prepared statement with {} parameters", params.len());

        let mut prepared = self.prepare(query)?;
        let kuzu_params = params
            .iter()
            .map(|(name, value)| (*name, to_kuzu_value(value)))
            .collect::<Vec<_>>();

        let result = self
            .connection
            .execute(&mut prepared, kuzu_params)
            .map_err(|error| DatabaseError::QueryExecutionError {
                query: query.trim().to_string(),
                error,
            })?;

        Ok(KuzuQueryResult {
            column_names: result.get_column_names().to_vec(),
            result: result.into_iter().collect::<Vec<_>>(),
        })
    }

    pub fn query(&self, query: &str) -> Result<kuzu::QueryResult<'_>, DatabaseError> {
        self.connection
            .query(query)
            .map_err(|e| DatabaseError::QueryExecutionError {
                query: query.to_string(),
                error: e,
            })
    }

    pub fn execute_ddl(&self, query: &str) -> Result<(), DatabaseError> {
        debug!("Executing DDL: {}", query);

        let result = self.query(query)?;
        // Consume the result to ensure the query executed
        for _ in result {}

        Ok(())
    }

    /// Runs a query expected to return a single integer, e.g. `RETURN COUNT(n)`.
    pub fn scalar_count(&self, query: &str) -> Result<u64, DatabaseError> {
        let mut result = self.query(query)?;
        match result.next().as_deref() {
            Some([kuzu::Value::Int64(count), ..]) => Ok(*count as u64),
            Some([kuzu::Value::UInt64(count), ..]) => Ok(*count),
            other => Err(DatabaseError::UnexpectedResult(format!(
                "expected a count from `{query}`, got {other:?}"
            ))),
        }
    }

    pub fn table_exists(&self, table_name: &str) -> Result<bool, DatabaseError> {
        Ok(self
            .get_table_names()?
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(table_name)))
    }

    pub fn get_table_names(&self) -> Result<Vec<String>, DatabaseError> {
        let result = self.query("CALL SHOW_TABLES() RETURN *")?;
        let mut table_names = Vec::new();

        for row in result {
            if let Some(kuzu::Value::String(table_name)) = row.get(1) {
                // Index 1 contains the table name
                table_names.push(table_name.to_string());
            }
        }

        Ok(table_names)
    }

    fn prepare(&self, query: &str) -> Result<kuzu::PreparedStatement, DatabaseError> {
        self.connection
            .prepare(query)
            .map_err(|error| DatabaseError::QueryExecutionError {
                query: query.trim().to_string(),
                error,
            })
    }
}

impl GraphSession for KuzuConnection<'_> {
    fn execute(&self, query: &str, params: QueryParams) -> Result<(), DatabaseError> {
        self.run(query, &params)?;
        Ok(())
    }

    fn begin(&self) -> Result<(), DatabaseError> {
        self.execute_ddl("BEGIN TRANSACTION;")
    }

    fn commit(&self) -> Result<(), DatabaseError> {
        self.execute_ddl("COMMIT;")
    }

    fn rollback(&self) -> Result<(), DatabaseError> {
        self.execute_ddl("ROLLBACK;")
    }
}

fn to_kuzu_value(value: &ParamValue) -> kuzu::Value {
    match value {
        ParamValue::String(s) => kuzu::Value::String(s.clone()),
        ParamValue::Null => kuzu::Value::Null(kuzu::LogicalType::String),
    }
}

fn extract_kuzu_params(
    json_params: &serde_json::Map<String, serde_json::Value>,
) -> Vec<(&str, kuzu::Value)> {
    json_params
        .iter()
        .map(|(key, value)| (key.as_str(), convert_json_to_kuzu_value(value)))
        .collect()
}

fn convert_json_to_kuzu_value(value: &serde_json::Value) -> kuzu::Value {
    match value {
        serde_json::Value::String(s) => kuzu::Value::from(s.as_str()),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                kuzu::Value::from(i)
            } else if let Some(f) = n.as_f64() {
                kuzu::Value::from(f)
            } else {
                kuzu::Value::from(0i64)
            }
        }
        serde_json::Value::Bool(b) => kuzu::Value::Bool(*b),
        serde_json::Value::Null => kuzu::Value::Null(kuzu::LogicalType::String),
        serde_json::Value::Array(arr) => {
            let values = arr
                .iter()
                .map(convert_json_to_kuzu_value)
                .collect::<Vec<_>>();

            let logical_type = match arr.first() {
                Some(serde_json::Value::String(_)) => kuzu::LogicalType::String,
                Some(serde_json::Value::Number(n)) if n.is_i64() => kuzu::LogicalType::Int64,
                Some(serde_json::Value::Number(_)) => kuzu::LogicalType::Double,
                Some(serde_json::Value::Bool(_)) => kuzu::LogicalType::Bool,
                _ => kuzu::LogicalType::Any,
            };

            kuzu::Value::List(logical_type, values)
        }
        serde_json::Value::Object(obj) => kuzu::Value::Struct(
            obj.iter()
                .map(|(key, val)| (key.to_string(), convert_json_to_kuzu_value(val)))
                .collect(),
        ),
    }
}
