//! Backend-agnostic query building.
//!
//! A query is defined once as a `QueryBuilder` and compiled to the dialect of
//! whichever backend it runs against. Parameters can differ per dialect (LIKE
//! patterns become regexes for Cozo), so they are produced by compilation.

use crate::db::{DatabaseBackend, DbError, Params, QueryResult};

/// A compiled query ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub script: String,
    pub params: Params,
}

impl CompiledQuery {
    pub fn new(script: impl Into<String>, params: Params) -> Self {
        Self {
            script: script.into(),
            params,
        }
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

/// Backend-agnostic query definition.
pub trait QueryBuilder {
    /// Compile to CozoScript.
    fn compile_cozo(&self) -> CompiledQuery;

    /// Compile to PostgreSQL SQL with positional `$n` placeholders.
    fn compile_postgres(&self) -> CompiledQuery;

    /// Compile for the given backend.
    fn compile(&self, backend: &dyn DatabaseBackend) -> Result<CompiledQuery, DbError> {
        match backend.backend_name() {
            "CozoSqlite" | "CozoMem" => Ok(self.compile_cozo()),
            "Postgres" => Ok(self.compile_postgres()),
            other => Err(DbError::UnsupportedBackend {
                name: other.to_string(),
            }),
        }
    }

    /// Compile and execute against the backend.
    fn run(&self, backend: &dyn DatabaseBackend) -> Result<QueryResult, DbError> {
        let compiled = self.compile(backend)?;
        backend.execute_query(&compiled.script, &compiled.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_mem_db;
    use rstest::rstest;

    /// Minimal query returning a constant row on either dialect
    struct ConstQuery;

    impl QueryBuilder for ConstQuery {
        fn compile_cozo(&self) -> CompiledQuery {
            CompiledQuery::new("?[x] <- [[$x]]", Params::new().with("x", 42i64))
        }

        fn compile_postgres(&self) -> CompiledQuery {
            CompiledQuery::new("SELECT $1::bigint AS x", Params::new().with("x", 42i64))
        }
    }

    #[rstest]
    fn test_compile_dispatches_on_backend_name() {
        let backend = open_mem_db();
        let compiled = ConstQuery.compile(backend.as_ref()).unwrap();
        assert_eq!(compiled.script, "?[x] <- [[$x]]");
        assert_eq!(compiled.param_count(), 1);
    }

    #[rstest]
    fn test_run_executes_compiled_query() {
        let backend = open_mem_db();
        let result = ConstQuery.run(backend.as_ref()).unwrap();
        assert_eq!(result.headers, vec!["x"]);
        assert_eq!(result.rows, vec![vec![crate::db::Value::Int(42)]]);
    }
}
