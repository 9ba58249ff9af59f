//! Database backend trait for abstracting the store implementations.

use super::schema::SchemaRelation;
use super::value::{Params, Value};
use super::DbError;

/// Result of a query execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A store the harness can talk to.
///
/// Query builders dispatch on `backend_name()` to pick a dialect, so every
/// implementation must report a stable name.
pub trait DatabaseBackend: Send + Sync {
    /// Execute a query with parameters, returning raw rows.
    fn execute_query(&self, script: &str, params: &Params) -> Result<QueryResult, DbError>;

    /// Execute a query without parameters.
    fn execute_query_no_params(&self, script: &str) -> Result<QueryResult, DbError> {
        self.execute_query(script, &Params::new())
    }

    /// Get the backend name for logging and dialect selection.
    fn backend_name(&self) -> &'static str;

    /// Round-trip to the store to prove the connection is usable.
    fn ping(&self) -> Result<(), DbError>;

    /// Create a relation (and any types it needs) if missing.
    /// Returns true if created, false if it already existed.
    fn try_create_relation(&self, relation: &SchemaRelation) -> Result<bool, DbError>;

    /// Insert rows into a relation.
    ///
    /// Each row holds one value per field of `relation`, keys first. A row
    /// whose key already exists fails with `DbError::DuplicateKey` and is not
    /// written; rows before it stay written.
    fn insert_rows(
        &self,
        relation: &SchemaRelation,
        rows: Vec<Vec<Value>>,
    ) -> Result<usize, DbError>;
}
