//! foodtype_repro library - nullable enum column harness
//!
//! Provides the store backends, typed queries over the `foods` table, the
//! seed loader and the scenario verifier used by the binary.

pub mod db;
pub mod output;
pub mod queries;
pub mod scenario;
pub mod seed;
pub mod tracing_setup;
pub mod types;

#[cfg(test)]
pub mod test_utils;
