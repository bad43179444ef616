use crate::graph::{GraphSession, QueryParams};
use crate::kuzu::types::DatabaseError;
use std::cell::RefCell;

/// One call observed by a [`RecordingSession`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Begin,
    Execute { query: String, params: QueryParams },
    Commit,
    Rollback,
}

/// In-memory session that records every statement instead of running it.
#[derive(Debug, Default)]
pub struct RecordingSession {
    calls: RefCell<Vec<RecordedCall>>,
    fail_on_execute: Option<usize>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `n`th execute call (0-based) fail
    pub fn failing_at(n: usize) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_on_execute: Some(n),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn executed(&self) -> Vec<(String, QueryParams)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Execute { query, params } => Some((query.clone(), params.clone())),
                _ => None,
            })
            .collect()
    }

    fn execute_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, RecordedCall::Execute { .. }))
            .count()
    }
}

impl GraphSession for RecordingSession {
    fn execute(&self, query: &str, params: QueryParams) -> Result<(), DatabaseError> {
        if self.fail_on_execute == Some(self.execute_count()) {
            return Err(DatabaseError::UnexpectedResult(format!(
                "injected failure for `{}`",
                query.trim()
            )));
        }
        self.calls.borrow_mut().push(RecordedCall::Execute {
            query: query.to_string(),
            params,
        });
        Ok(())
    }

    fn begin(&self) -> Result<(), DatabaseError> {
        self.calls.borrow_mut().push(RecordedCall::Begin);
        Ok(())
    }

    fn commit(&self) -> Result<(), DatabaseError> {
        self.calls.borrow_mut().push(RecordedCall::Commit);
        Ok(())
    }

    fn rollback(&self) -> Result<(), DatabaseError> {
        self.calls.borrow_mut().push(RecordedCall::Rollback);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_records_commit() {
        let session = RecordingSession::new();
        session
            .transaction(|s| s.execute("RETURN 1", QueryParams::new()))
            .unwrap();

        assert_eq!(
            session.calls(),
            vec![
                RecordedCall::Begin,
                RecordedCall::Execute {
                    query: "RETURN 1".to_string(),
                    params: QueryParams::new()
                },
                RecordedCall::Commit,
            ]
        );
    }

    #[test]
    fn test_failed_transaction_records_rollback() {
        let session = RecordingSession::failing_at(1);
        let result = session.transaction(|s| {
            s.execute("RETURN 1", QueryParams::new())?;
            s.execute("RETURN 2", QueryParams::new())
        });

        assert!(result.is_err());
        assert_eq!(session.calls().last(), Some(&RecordedCall::Rollback));
        assert!(!session.calls().contains(&RecordedCall::Commit));
    }
}
