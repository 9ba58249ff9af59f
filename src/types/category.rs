//! The closed set of food categories and the filter built on top of it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when text from outside the program names no known category.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid category '{0}' (expected one of: sandwich, salad, soup)")]
pub struct InvalidCategory(pub String);

/// A food category as stored in the `foodtype` column.
///
/// Labels are lowercase and matched case-sensitively, mirroring the
/// PostgreSQL `food_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Category {
    Sandwich,
    Salad,
    Soup,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Sandwich, Category::Salad, Category::Soup];

    /// The label written to and read from the store.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Sandwich => "sandwich",
            Category::Salad => "salad",
            Category::Soup => "soup",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| InvalidCategory(s.to_string()))
    }
}

impl TryFrom<&str> for Category {
    type Error = InvalidCategory;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Category {
    type Error = InvalidCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for &'static str {
    fn from(value: Category) -> Self {
        value.as_str()
    }
}

/// Category predicate for the filter search.
///
/// `Any` means "do not constrain the category at all", so uncategorized rows
/// are included. It is never lowered to a comparison against a null value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    Any,
    Exactly(Category),
}

impl CategoryFilter {
    /// Whether a row with the given category passes this filter.
    pub fn matches(&self, category: Option<Category>) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Exactly(wanted) => category == Some(*wanted),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        CategoryFilter::Exactly(value)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::Any => f.write_str("any"),
            CategoryFilter::Exactly(c) => write!(f, "= {}", c),
        }
    }
}
