use std::fmt;

use serde::{Deserialize, Serialize};

use super::Category;

/// One row of the `foods` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<Category>,
}

impl FoodRecord {
    pub fn new(id: i64, name: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            id,
            name: name.into(),
            category,
        }
    }

    /// Category label for display, `nil` when uncategorized.
    pub fn category_label(&self) -> &'static str {
        self.category.map(|c| c.as_str()).unwrap_or("nil")
    }
}

impl fmt::Display for FoodRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Type: {}",
            self.id,
            self.name,
            self.category_label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_display_uncategorized() {
        let record = FoodRecord::new(6, "Tungsten", None);
        assert_eq!(record.to_string(), "ID: 6, Name: Tungsten, Type: nil");
    }

    #[rstest]
    fn test_deserialize_missing_category_is_none() {
        let record: FoodRecord = serde_json::from_str(r#"{"id": 6, "name": "Tungsten"}"#).unwrap();
        assert_eq!(record, FoodRecord::new(6, "Tungsten", None));
    }

    #[rstest]
    fn test_deserialize_null_category_is_none() {
        let record: FoodRecord =
            serde_json::from_str(r#"{"id": 6, "name": "Tungsten", "category": null}"#).unwrap();
        assert!(record.category.is_none());
    }
}
