//! Store access for the foods harness.
//!
//! This module provides the database abstraction layer:
//! - Connection management (PostgreSQL, or embedded CozoDB on SQLite or in memory)
//! - Query execution with named parameters
//! - Schema creation and row insertion per backend
//!
//! # Architecture
//!
//! Every backend implements `DatabaseBackend` and reports a stable name.
//! Query builders in `crate::queries` dispatch on that name to produce SQL
//! for PostgreSQL or CozoScript for Cozo. Results come back as rows of
//! backend-neutral `Value` cells.
//!
//! # Null handling
//!
//! Cozo treats `null == null` as true, PostgreSQL does not. The equality
//! search compiles an explicit non-null guard for Cozo so both backends follow
//! SQL semantics, where a null operand never compares equal.

mod backend;
mod config;
mod embedded;
mod pg;
pub mod schema;
mod value;

pub use backend::{DatabaseBackend, QueryResult};
pub use config::{fallback_notice, DatabaseConfig, DATABASE_URL_VAR, DEFAULT_DATABASE_URL};
pub use embedded::CozoBackend;
pub use pg::PostgresBackend;
pub use value::{Params, Value};

use thiserror::Error;

use crate::types::InvalidCategory;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to connect to '{target}': {message}")]
    ConnectionFailed { target: String, message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Duplicate key {key} in '{relation}'")]
    DuplicateKey { relation: String, key: String },

    #[error(transparent)]
    InvalidCategory(#[from] InvalidCategory),

    #[error("Unexpected value in column '{column}': expected {expected}, found {found}")]
    UnexpectedValue {
        column: String,
        expected: &'static str,
        found: String,
    },

    #[error("Unsupported backend: {name}")]
    UnsupportedBackend { name: String },

    #[error("Unsupported database URL '{url}' (expected postgres://, sqlite:// or :memory:)")]
    UnsupportedUrl { url: String },
}

/// Open an in-memory Cozo backend.
///
/// Used for tests to avoid a PostgreSQL server and temp file management.
#[cfg(test)]
pub fn open_mem_db() -> Box<dyn DatabaseBackend> {
    Box::new(CozoBackend::open_mem().expect("Failed to create in-memory DB"))
}
