use crate::kuzu::types::DatabaseError;
use tracing::warn;

/// A bound query parameter. Every property the graph stores is text, so a
/// parameter is either a string or an explicit null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    String(String),
    Null,
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

/// Named parameters for a single statement, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: Vec<(&'static str, ParamValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<ParamValue>) -> Self {
        self.values.push((name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, ParamValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An open session against the graph store. Statements are always sent with
/// their values bound as parameters.
pub trait GraphSession {
    fn execute(&self, query: &str, params: QueryParams) -> Result<(), DatabaseError>;

    fn begin(&self) -> Result<(), DatabaseError>;

    fn commit(&self) -> Result<(), DatabaseError>;

    fn rollback(&self) -> Result<(), DatabaseError>;

    /// Runs `f` inside a transaction, committing on success. On failure the
    /// transaction is rolled back and the original error returned.
    fn transaction<T, E>(&self, f: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E>
    where
        Self: Sized,
        E: From<DatabaseError>,
    {
        self.begin()?;
        match f(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = self.rollback() {
                    warn!("Failed to roll back transaction: {rollback_error}");
                }
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_values_become_null() {
        let params = QueryParams::new()
            .with("extends", None::<String>)
            .with("name", Some("Base"));

        assert_eq!(params.get("extends"), Some(&ParamValue::Null));
        assert_eq!(
            params.get("name"),
            Some(&ParamValue::String("Base".to_string()))
        );
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);
    }
}
