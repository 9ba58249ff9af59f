//! Typed data access over the `foods` table.
//!
//! `Queries` borrows a backend for its whole life and holds no state of its
//! own: every read is a fresh round-trip.

pub mod builder;
pub mod foods;
pub mod pattern;

use tracing::debug;

use crate::db::schema::FOODS;
use crate::db::{DatabaseBackend, DbError, Value};
use crate::types::{Category, CategoryFilter, FoodRecord};

use builder::QueryBuilder;
use foods::{decode_food, CountFoods, ListUncategorized, SearchFood, SearchFoodFiltered};

pub struct Queries<'a> {
    backend: &'a dyn DatabaseBackend,
}

impl<'a> Queries<'a> {
    pub fn new(backend: &'a dyn DatabaseBackend) -> Self {
        Self { backend }
    }

    /// Create the `foods` table (and its enum type) if missing.
    /// Returns true if anything was created.
    pub fn ensure_schema(&self) -> Result<bool, DbError> {
        self.backend.try_create_relation(&FOODS)
    }

    /// Insert one record. An existing id fails with `DbError::DuplicateKey`.
    pub fn add_food(&self, record: &FoodRecord) -> Result<(), DbError> {
        debug!(id = record.id, name = %record.name, "add food");
        let row = vec![
            Value::Int(record.id),
            Value::from(record.name.as_str()),
            Value::from(record.category.map(|c| c.as_str())),
        ];
        self.backend.insert_rows(&FOODS, vec![row]).map(|_| ())
    }

    /// Equality-based search.
    ///
    /// With `category = None` the predicate compares against null and returns
    /// no rows at all, uncategorized ones included. Use `list_uncategorized`
    /// to find rows without a category.
    pub fn search_food(
        &self,
        pattern: &str,
        category: Option<Category>,
    ) -> Result<Vec<FoodRecord>, DbError> {
        self.fetch(&SearchFood {
            pattern: pattern.to_string(),
            category,
        })
    }

    /// Search with an explicit category filter. `CategoryFilter::Any` returns
    /// every row whose name matches, categorized or not.
    pub fn search_food_filtered(
        &self,
        pattern: &str,
        filter: CategoryFilter,
    ) -> Result<Vec<FoodRecord>, DbError> {
        self.fetch(&SearchFoodFiltered {
            pattern: pattern.to_string(),
            filter,
        })
    }

    /// Rows whose category is absent.
    pub fn list_uncategorized(&self) -> Result<Vec<FoodRecord>, DbError> {
        self.fetch(&ListUncategorized)
    }

    /// Total number of rows in `foods`.
    pub fn count_foods(&self) -> Result<usize, DbError> {
        let result = CountFoods.run(self.backend)?;
        let Some(cell) = result.rows.first().and_then(|row| row.first()) else {
            return Ok(0);
        };
        cell.as_i64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| DbError::UnexpectedValue {
                column: "count".to_string(),
                expected: "non-negative int",
                found: cell.to_string(),
            })
    }

    fn fetch(&self, query: &dyn QueryBuilder) -> Result<Vec<FoodRecord>, DbError> {
        query
            .run(self.backend)?
            .rows
            .iter()
            .map(|row| decode_food(row))
            .collect()
    }
}
