//! Queries over the `foods` table.
//!
//! Two searches exist on purpose. `SearchFood` binds the category into an
//! equality predicate, so an absent category compares against null and
//! matches nothing. `SearchFoodFiltered` branches on `CategoryFilter` and
//! never binds a null. `ListUncategorized` is the explicit absence test.

use crate::db::{DbError, Params, Value};
use crate::types::{Category, CategoryFilter, FoodRecord};

use super::builder::{CompiledQuery, QueryBuilder};
use super::pattern::like_to_regex;

const COZO_COLUMNS: &str = "?[id, food, foodtype] := *foods{id, food, foodtype}";
const POSTGRES_COLUMNS: &str = "SELECT id, food, foodtype::text AS foodtype FROM foods";

fn category_param(category: Option<Category>) -> Value {
    Value::from(category.map(|c| c.as_str()))
}

/// Equality-based search: `food LIKE $pattern AND foodtype = $foodtype`.
#[derive(Debug, Clone)]
pub struct SearchFood {
    pub pattern: String,
    pub category: Option<Category>,
}

impl QueryBuilder for SearchFood {
    fn compile_cozo(&self) -> CompiledQuery {
        // Guard keeps null rows out when `$foodtype` is null, matching SQL `=`.
        CompiledQuery::new(
            format!(
                "{},\n    regex_matches(food, $pattern),\n    !is_null(foodtype),\n    foodtype == $foodtype\n:order id",
                COZO_COLUMNS
            ),
            Params::new()
                .with("pattern", like_to_regex(&self.pattern))
                .with("foodtype", category_param(self.category)),
        )
    }

    fn compile_postgres(&self) -> CompiledQuery {
        CompiledQuery::new(
            format!(
                "{}\nWHERE food LIKE $1 AND foodtype = $2::text::food_type\nORDER BY id",
                POSTGRES_COLUMNS
            ),
            Params::new()
                .with("pattern", self.pattern.as_str())
                .with("foodtype", category_param(self.category)),
        )
    }
}

/// Filter search: `Any` leaves the category unconstrained.
#[derive(Debug, Clone)]
pub struct SearchFoodFiltered {
    pub pattern: String,
    pub filter: CategoryFilter,
}

impl QueryBuilder for SearchFoodFiltered {
    fn compile_cozo(&self) -> CompiledQuery {
        let params = Params::new().with("pattern", like_to_regex(&self.pattern));
        match self.filter {
            CategoryFilter::Any => CompiledQuery::new(
                format!(
                    "{},\n    regex_matches(food, $pattern)\n:order id",
                    COZO_COLUMNS
                ),
                params,
            ),
            CategoryFilter::Exactly(category) => CompiledQuery::new(
                format!(
                    "{},\n    regex_matches(food, $pattern),\n    foodtype == $foodtype\n:order id",
                    COZO_COLUMNS
                ),
                params.with("foodtype", category.as_str()),
            ),
        }
    }

    fn compile_postgres(&self) -> CompiledQuery {
        let params = Params::new().with("pattern", self.pattern.as_str());
        match self.filter {
            CategoryFilter::Any => CompiledQuery::new(
                format!("{}\nWHERE food LIKE $1\nORDER BY id", POSTGRES_COLUMNS),
                params,
            ),
            CategoryFilter::Exactly(category) => CompiledQuery::new(
                format!(
                    "{}\nWHERE food LIKE $1 AND foodtype = $2::text::food_type\nORDER BY id",
                    POSTGRES_COLUMNS
                ),
                params.with("foodtype", category.as_str()),
            ),
        }
    }
}

/// Rows with no category, found with an explicit null test.
#[derive(Debug, Clone, Default)]
pub struct ListUncategorized;

impl QueryBuilder for ListUncategorized {
    fn compile_cozo(&self) -> CompiledQuery {
        CompiledQuery::new(
            format!("{},\n    is_null(foodtype)\n:order id", COZO_COLUMNS),
            Params::new(),
        )
    }

    fn compile_postgres(&self) -> CompiledQuery {
        CompiledQuery::new(
            format!("{}\nWHERE foodtype IS NULL\nORDER BY id", POSTGRES_COLUMNS),
            Params::new(),
        )
    }
}

/// Total number of rows.
#[derive(Debug, Clone, Default)]
pub struct CountFoods;

impl QueryBuilder for CountFoods {
    fn compile_cozo(&self) -> CompiledQuery {
        CompiledQuery::new("?[count(id)] := *foods{id}", Params::new())
    }

    fn compile_postgres(&self) -> CompiledQuery {
        CompiledQuery::new("SELECT COUNT(*) FROM foods", Params::new())
    }
}

/// Decode an `(id, food, foodtype)` row.
///
/// The category passes through `Category::try_from`, so a label outside the
/// enumeration surfaces as `InvalidCategory` instead of being dropped.
pub fn decode_food(row: &[Value]) -> Result<FoodRecord, DbError> {
    let [id, food, foodtype] = row else {
        return Err(DbError::UnexpectedValue {
            column: "row".to_string(),
            expected: "3 columns",
            found: format!("{} columns", row.len()),
        });
    };

    let id = id.as_i64().ok_or_else(|| DbError::UnexpectedValue {
        column: "id".to_string(),
        expected: "int",
        found: id.type_name().to_string(),
    })?;
    let name = food.as_str().ok_or_else(|| DbError::UnexpectedValue {
        column: "food".to_string(),
        expected: "text",
        found: food.type_name().to_string(),
    })?;
    let category = match foodtype {
        Value::Null => None,
        Value::Text(label) => Some(Category::try_from(label.as_str())?),
        other => {
            return Err(DbError::UnexpectedValue {
                column: "foodtype".to_string(),
                expected: "text or null",
                found: other.type_name().to_string(),
            })
        }
    };

    Ok(FoodRecord::new(id, name, category))
}
