//! Seed data for the `foods` table.
//!
//! The fixed record set lives in `foods.json` next to this module and is
//! compiled into the binary.

use thiserror::Error;
use tracing::info;

use crate::db::DbError;
use crate::queries::Queries;
use crate::types::FoodRecord;

const SEED_FOODS: &str = include_str!("foods.json");

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to parse seed data: {message}")]
    ParseFailed { message: String },

    #[error("Failed to add food {name}: {source}")]
    InsertFailed {
        name: String,
        #[source]
        source: DbError,
    },
}

/// Records inserted by a seeding run, in insertion order.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub added: Vec<FoodRecord>,
}

/// Parse a JSON array of food records.
///
/// Categories are validated during parsing, so an unknown label fails here
/// rather than at insert time.
pub fn parse_foods(json: &str) -> Result<Vec<FoodRecord>, SeedError> {
    serde_json::from_str(json).map_err(|e| SeedError::ParseFailed {
        message: e.to_string(),
    })
}

/// The built-in seed set: six foods, one of them uncategorized.
pub fn default_foods() -> Result<Vec<FoodRecord>, SeedError> {
    parse_foods(SEED_FOODS)
}

/// Insert one record, naming it in the error on failure.
pub fn seed_food(queries: &Queries<'_>, record: &FoodRecord) -> Result<(), SeedError> {
    queries
        .add_food(record)
        .map_err(|source| SeedError::InsertFailed {
            name: record.name.clone(),
            source,
        })?;
    info!(id = record.id, name = %record.name, category = record.category_label(), "seeded food");
    Ok(())
}

/// Insert records in order, stopping at the first failure.
///
/// Records inserted before the failure stay in the store.
pub fn seed_foods(queries: &Queries<'_>, records: &[FoodRecord]) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();
    for record in records {
        seed_food(queries, record)?;
        report.added.push(record.clone());
    }
    Ok(report)
}

/// One `Added: ...` line for a seeded record.
pub fn added_line(record: &FoodRecord) -> String {
    match record.category {
        Some(category) => format!("  Added: {} ({})", record.name, category),
        None => format!("  Added: {} (no type)", record.name),
    }
}
