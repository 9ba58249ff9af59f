//! Output formatting for harness results.

use crate::types::FoodRecord;

/// Trait for results that render as human-readable text.
pub trait Outputable {
    /// Format as a human-readable table
    fn to_table(&self) -> String;
}

/// Render a list of records, one `- ID: .., Name: .., Type: ..` line each.
pub fn format_records(records: &[FoodRecord], indent: &str) -> Vec<String> {
    records
        .iter()
        .map(|r| format!("{}- {}", indent, r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use rstest::rstest;

    #[rstest]
    fn test_format_records() {
        let records = vec![
            FoodRecord::new(1, "Pizza", Some(Category::Sandwich)),
            FoodRecord::new(6, "Tungsten", None),
        ];
        assert_eq!(
            format_records(&records, "  "),
            vec![
                "  - ID: 1, Name: Pizza, Type: sandwich",
                "  - ID: 6, Name: Tungsten, Type: nil",
            ]
        );
    }

    #[rstest]
    fn test_format_records_empty() {
        assert!(format_records(&[], "  ").is_empty());
    }
}
