use crate::types::{Category, CategoryFilter, FoodRecord};

use super::{Query, Scenario};

/// The fixed scenario list run against the default seed set.
///
/// Counts assume the six seeded foods and no other rows. Scenario 5 adds
/// a seventh row that later scenarios see.
pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("Search with no category (equality)")
            .expect(Query::search_food("%", None), 0),
        Scenario::new("List uncategorized foods").expect(Query::ListUncategorized, 1),
        Scenario::new("Search for all sandwiches")
            .expect(Query::search_food("%", Some(Category::Sandwich)), 2),
        Scenario::new("Search for all salads")
            .expect(Query::search_food("%", Some(Category::Salad)), 2),
        Scenario::new("Search for soups containing 'a'")
            .expect(Query::search_food("%a%", Some(Category::Soup)), 1),
        Scenario::new("Add a new soup")
            .insert(FoodRecord::new(7, "Tomato Soup", Some(Category::Soup)))
            .expect(Query::search_food("%", Some(Category::Soup)), 2),
        Scenario::new("Search any category")
            .expect(Query::search_food_filtered("%", CategoryFilter::Any), 7),
        Scenario::new("Reject a duplicate id")
            .insert_rejected(FoodRecord::new(1, "Another Pizza", Some(Category::Sandwich)))
            .expect(Query::CountFoods, 7),
    ]
}
