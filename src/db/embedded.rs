//! Embedded CozoDB backend, SQLite-backed or in memory.

use std::collections::BTreeMap;
use std::path::Path;

use cozo::{DataValue, DbInstance, NamedRows, ScriptMutability};
use tracing::{debug, info};

use super::backend::{DatabaseBackend, QueryResult};
use super::schema::SchemaRelation;
use super::value::{Params, Value};
use super::DbError;

/// Backend names reported by `CozoBackend`.
pub const COZO_SQLITE: &str = "CozoSqlite";
pub const COZO_MEM: &str = "CozoMem";

pub struct CozoBackend {
    db: DbInstance,
    name: &'static str,
}

impl CozoBackend {
    /// Open (or create) a Cozo database backed by a SQLite file.
    pub fn open_sqlite(path: &Path) -> Result<Self, DbError> {
        let db = DbInstance::new("sqlite", path, "").map_err(|e| DbError::ConnectionFailed {
            target: path.display().to_string(),
            message: format!("{:?}", e),
        })?;
        info!(path = %path.display(), "opened Cozo SQLite store");
        Ok(Self {
            db,
            name: COZO_SQLITE,
        })
    }

    /// Create an in-memory Cozo database. Contents vanish on drop.
    pub fn open_mem() -> Result<Self, DbError> {
        let db = DbInstance::new("mem", "", "").map_err(|e| DbError::ConnectionFailed {
            target: ":memory:".to_string(),
            message: format!("{:?}", e),
        })?;
        Ok(Self { db, name: COZO_MEM })
    }

    fn run(&self, script: &str, params: &Params) -> Result<NamedRows, DbError> {
        debug!(backend = self.name, script, "cozo query");
        let bound: BTreeMap<String, DataValue> = params
            .iter()
            .map(|(name, value)| (name.to_string(), DataValue::from(value)))
            .collect();
        self.db
            .run_script(script, bound, ScriptMutability::Mutable)
            .map_err(|e| DbError::QueryFailed {
                message: format!("{:?}", e),
            })
    }

    fn relation_exists(&self, name: &str) -> Result<bool, DbError> {
        let rows = self.run("::relations", &Params::new())?;
        Ok(rows
            .rows
            .iter()
            .any(|row| matches!(row.first(), Some(DataValue::Str(s)) if s.as_str() == name)))
    }

    fn key_params(relation: &SchemaRelation, row: &[Value]) -> Params {
        relation
            .key_fields
            .iter()
            .zip(row)
            .fold(Params::new(), |params, (field, value)| {
                params.with(field.name, value.clone())
            })
    }
}

impl DatabaseBackend for CozoBackend {
    fn execute_query(&self, script: &str, params: &Params) -> Result<QueryResult, DbError> {
        let named = self.run(script, params)?;
        let rows = named
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&named.headers)
                    .map(|(cell, header)| {
                        Value::try_from(cell).map_err(|found| DbError::UnexpectedValue {
                            column: header.clone(),
                            expected: "int, text or null",
                            found: found.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QueryResult {
            headers: named.headers,
            rows,
        })
    }

    fn backend_name(&self) -> &'static str {
        self.name
    }

    fn ping(&self) -> Result<(), DbError> {
        self.run("?[ok] <- [[1]]", &Params::new()).map(|_| ())
    }

    fn try_create_relation(&self, relation: &SchemaRelation) -> Result<bool, DbError> {
        if self.relation_exists(relation.name)? {
            return Ok(false);
        }
        self.run(&relation.compile_cozo_create(), &Params::new())?;
        Ok(true)
    }

    fn insert_rows(
        &self,
        relation: &SchemaRelation,
        rows: Vec<Vec<Value>>,
    ) -> Result<usize, DbError> {
        let lookup = relation.compile_cozo_key_lookup();
        let put = relation.compile_cozo_put();
        let mut inserted = 0;

        for row in rows {
            if row.len() != relation.field_count() {
                return Err(DbError::QueryFailed {
                    message: format!(
                        "row for '{}' has {} values, expected {}",
                        relation.name,
                        row.len(),
                        relation.field_count()
                    ),
                });
            }

            // `:put` overwrites, so uniqueness is checked before writing.
            let key = Self::key_params(relation, &row);
            if !self.run(&lookup, &key)?.rows.is_empty() {
                let rendered: Vec<String> =
                    key.iter().map(|(n, v)| format!("{} = {}", n, v)).collect();
                return Err(DbError::DuplicateKey {
                    relation: relation.name.to_string(),
                    key: rendered.join(", "),
                });
            }

            let params = relation
                .all_fields()
                .zip(row)
                .fold(Params::new(), |params, (field, value)| params.with(field.name, value));
            self.run(&put, &params)?;
            inserted += 1;
        }

        Ok(inserted)
    }
}
