//! Shared types for food records.

mod category;
mod food;

pub use category::{Category, CategoryFilter, InvalidCategory};
pub use food::FoodRecord;
