//! Scenario verifier.
//!
//! A scenario is an ordered list of steps run against a seeded store. Each
//! `Expect` step runs one read and compares the number of rows it returned;
//! the first mismatch or failure stops the run.

mod catalog;

pub use catalog::default_scenarios;

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::db::DbError;
use crate::output::{format_records, Outputable};
use crate::queries::Queries;
use crate::seed::added_line;
use crate::types::{Category, CategoryFilter, FoodRecord};

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Test {scenario}: {query} expected {expected} rows, got {actual}")]
    AssertionMismatch {
        scenario: String,
        query: String,
        expected: usize,
        actual: usize,
    },

    #[error("Test {scenario}: {query} returned a row it should not match: {record}")]
    UnexpectedRecord {
        scenario: String,
        query: String,
        record: FoodRecord,
    },

    #[error("Test {scenario}: {query} failed: {source}")]
    QueryFailed {
        scenario: String,
        query: String,
        #[source]
        source: DbError,
    },

    #[error("Test {scenario}: failed to add {name}: {source}")]
    InsertFailed {
        scenario: String,
        name: String,
        #[source]
        source: DbError,
    },

    #[error("Test {scenario}: insert of duplicate id {id} was accepted")]
    DuplicateAccepted { scenario: String, id: i64 },
}

/// A read issued by a scenario step, with its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    SearchFood {
        pattern: String,
        category: Option<Category>,
    },
    SearchFoodFiltered {
        pattern: String,
        filter: CategoryFilter,
    },
    ListUncategorized,
    CountFoods,
}

/// What a read returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Records(Vec<FoodRecord>),
    Count(usize),
}

impl Answer {
    /// Row count for record answers, the value itself for counts.
    pub fn len(&self) -> usize {
        match self {
            Answer::Records(records) => records.len(),
            Answer::Count(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Query {
    pub fn search_food(pattern: &str, category: Option<Category>) -> Self {
        Query::SearchFood {
            pattern: pattern.to_string(),
            category,
        }
    }

    pub fn search_food_filtered(pattern: &str, filter: CategoryFilter) -> Self {
        Query::SearchFoodFiltered {
            pattern: pattern.to_string(),
            filter,
        }
    }

    pub fn execute(&self, queries: &Queries<'_>) -> Result<Answer, DbError> {
        let records = match self {
            Query::SearchFood { pattern, category } => queries.search_food(pattern, *category)?,
            Query::SearchFoodFiltered { pattern, filter } => {
                queries.search_food_filtered(pattern, *filter)?
            }
            Query::ListUncategorized => queries.list_uncategorized()?,
            Query::CountFoods => return queries.count_foods().map(Answer::Count),
        };
        Ok(Answer::Records(records))
    }

    /// Whether a returned record is consistent with this query's category
    /// predicate. Name patterns are left to the store.
    pub fn admits(&self, record: &FoodRecord) -> bool {
        match self {
            Query::SearchFood { category, .. } => {
                category.is_some() && record.category == *category
            }
            Query::SearchFoodFiltered { filter, .. } => filter.matches(record.category),
            Query::ListUncategorized => record.category.is_none(),
            Query::CountFoods => true,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::SearchFood { pattern, category } => {
                let label = category.map_or("none", |c| c.as_str());
                write!(f, "search_food({:?}, {})", pattern, label)
            }
            Query::SearchFoodFiltered { pattern, filter } => match filter {
                CategoryFilter::Any => write!(f, "search_food_filtered({:?}, any)", pattern),
                CategoryFilter::Exactly(c) => {
                    write!(f, "search_food_filtered({:?}, {})", pattern, c)
                }
            },
            Query::ListUncategorized => write!(f, "list_uncategorized()"),
            Query::CountFoods => write!(f, "count_foods()"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Insert a record; any error fails the scenario.
    Insert(FoodRecord),
    /// Insert a record whose id already exists; must fail with `DuplicateKey`.
    InsertRejected(FoodRecord),
    /// Run a read and compare its row count (or count value).
    Expect { query: Query, expected: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub title: String,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: Vec::new(),
        }
    }

    pub fn insert(mut self, record: FoodRecord) -> Self {
        self.steps.push(Step::Insert(record));
        self
    }

    pub fn insert_rejected(mut self, record: FoodRecord) -> Self {
        self.steps.push(Step::InsertRejected(record));
        self
    }

    pub fn expect(mut self, query: Query, expected: usize) -> Self {
        self.steps.push(Step::Expect { query, expected });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Inserted(FoodRecord),
    Rejected(FoodRecord),
    Answered { query: Query, answer: Answer },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    pub index: usize,
    pub title: String,
    pub steps: Vec<StepOutcome>,
}

/// Outcomes of a full run, in scenario order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub scenarios: Vec<ScenarioOutcome>,
}

impl Outputable for ScenarioOutcome {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("Test {}: {}", self.index, self.title)];
        for step in &self.steps {
            match step {
                StepOutcome::Inserted(record) => lines.push(added_line(record)),
                StepOutcome::Rejected(record) => lines.push(format!(
                    "  Rejected duplicate id {} ({})",
                    record.id, record.name
                )),
                StepOutcome::Answered {
                    query,
                    answer: Answer::Records(records),
                } => {
                    lines.push(format!("Found {} rows for {}:", records.len(), query));
                    lines.extend(format_records(records, "  "));
                }
                StepOutcome::Answered {
                    query,
                    answer: Answer::Count(n),
                } => lines.push(format!("{} = {}", query, n)),
            }
        }
        lines.join("\n")
    }
}

/// Run one scenario, stopping at its first failing step.
pub fn run_scenario(
    queries: &Queries<'_>,
    index: usize,
    scenario: &Scenario,
) -> Result<ScenarioOutcome, ScenarioError> {
    let label = format!("{} ({})", index, scenario.title);
    let mut steps = Vec::with_capacity(scenario.steps.len());

    for step in &scenario.steps {
        debug!(scenario = index, ?step, "running step");
        let outcome = match step {
            Step::Insert(record) => {
                queries
                    .add_food(record)
                    .map_err(|source| ScenarioError::InsertFailed {
                        scenario: label.clone(),
                        name: record.name.clone(),
                        source,
                    })?;
                StepOutcome::Inserted(record.clone())
            }
            Step::InsertRejected(record) => match queries.add_food(record) {
                Err(DbError::DuplicateKey { .. }) => StepOutcome::Rejected(record.clone()),
                Err(source) => {
                    return Err(ScenarioError::InsertFailed {
                        scenario: label,
                        name: record.name.clone(),
                        source,
                    });
                }
                Ok(()) => {
                    return Err(ScenarioError::DuplicateAccepted {
                        scenario: label,
                        id: record.id,
                    });
                }
            },
            Step::Expect { query, expected } => {
                let answer = query
                    .execute(queries)
                    .map_err(|source| ScenarioError::QueryFailed {
                        scenario: label.clone(),
                        query: query.to_string(),
                        source,
                    })?;
                if answer.len() != *expected {
                    return Err(ScenarioError::AssertionMismatch {
                        scenario: label,
                        query: query.to_string(),
                        expected: *expected,
                        actual: answer.len(),
                    });
                }
                if let Answer::Records(records) = &answer {
                    if let Some(record) = records.iter().find(|r| !query.admits(r)) {
                        return Err(ScenarioError::UnexpectedRecord {
                            scenario: label,
                            query: query.to_string(),
                            record: record.clone(),
                        });
                    }
                }
                StepOutcome::Answered {
                    query: query.clone(),
                    answer,
                }
            }
        };
        steps.push(outcome);
    }

    info!(scenario = index, title = %scenario.title, "scenario passed");
    Ok(ScenarioOutcome {
        index,
        title: scenario.title.clone(),
        steps,
    })
}

/// Run scenarios in order, numbering them from 0. Fails fast.
pub fn run_scenarios(
    queries: &Queries<'_>,
    scenarios: &[Scenario],
) -> Result<RunReport, ScenarioError> {
    let scenarios = scenarios
        .iter()
        .enumerate()
        .map(|(index, scenario)| run_scenario(queries, index, scenario))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RunReport { scenarios })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{seeded_db, SEEDED_COUNT};
    use rstest::rstest;

    #[rstest]
    fn test_query_display() {
        assert_eq!(
            Query::search_food("%", None).to_string(),
            r#"search_food("%", none)"#
        );
        assert_eq!(
            Query::search_food("%a%", Some(Category::Soup)).to_string(),
            r#"search_food("%a%", soup)"#
        );
        assert_eq!(
            Query::search_food_filtered("%", CategoryFilter::Any).to_string(),
            r#"search_food_filtered("%", any)"#
        );
        assert_eq!(Query::ListUncategorized.to_string(), "list_uncategorized()");
    }

    #[rstest]
    fn test_default_scenarios_pass_on_seeded_store() {
        let db = seeded_db();
        let queries = Queries::new(db.as_ref());
        let report = run_scenarios(&queries, &default_scenarios()).unwrap();
        assert_eq!(report.scenarios.len(), default_scenarios().len());
        assert_eq!(queries.count_foods().unwrap(), SEEDED_COUNT + 1);
    }

    #[rstest]
    fn test_mismatch_names_scenario_and_query() {
        let db = seeded_db();
        let queries = Queries::new(db.as_ref());
        let scenario = Scenario::new("wrong count").expect(Query::ListUncategorized, 2);

        let err = run_scenario(&queries, 3, &scenario).unwrap_err();
        match &err {
            ScenarioError::AssertionMismatch {
                scenario,
                query,
                expected,
                actual,
            } => {
                assert_eq!(scenario, "3 (wrong count)");
                assert_eq!(query, "list_uncategorized()");
                assert_eq!((*expected, *actual), (2, 1));
            }
            other => panic!("Expected AssertionMismatch, got {:?}", other),
        }
        assert!(err.to_string().contains("expected 2 rows, got 1"));
    }

    #[rstest]
    fn test_run_stops_at_first_failure() {
        let db = seeded_db();
        let queries = Queries::new(db.as_ref());
        let scenarios = vec![
            Scenario::new("fails").expect(Query::CountFoods, 0),
            Scenario::new("never runs").insert(FoodRecord::new(8, "Gazpacho", Some(Category::Soup))),
        ];
        assert!(run_scenarios(&queries, &scenarios).is_err());
        assert_eq!(queries.count_foods().unwrap(), SEEDED_COUNT);
    }

    #[rstest]
    fn test_duplicate_accepted_is_an_error() {
        let db = seeded_db();
        let queries = Queries::new(db.as_ref());
        let scenario =
            Scenario::new("fresh id").insert_rejected(FoodRecord::new(42, "Borscht", None));
        assert!(matches!(
            run_scenario(&queries, 0, &scenario),
            Err(ScenarioError::DuplicateAccepted { id: 42, .. })
        ));
    }

    #[rstest]
    fn test_insert_failure_is_reported() {
        let db = seeded_db();
        let queries = Queries::new(db.as_ref());
        let scenario = Scenario::new("clash").insert(FoodRecord::new(1, "Calzone", None));
        match run_scenario(&queries, 0, &scenario) {
            Err(ScenarioError::InsertFailed { name, source, .. }) => {
                assert_eq!(name, "Calzone");
                assert!(matches!(source, DbError::DuplicateKey { .. }));
            }
            other => panic!("Expected InsertFailed, got {:?}", other),
        }
    }

    #[rstest]
    #[case(Query::search_food("%", None), FoodRecord::new(6, "Tungsten", None), false)]
    #[case(Query::search_food("%", Some(Category::Soup)), FoodRecord::new(3, "Lasagne", Some(Category::Soup)), true)]
    #[case(Query::search_food("%", Some(Category::Soup)), FoodRecord::new(2, "Sushi", Some(Category::Salad)), false)]
    #[case(Query::search_food_filtered("%", CategoryFilter::Any), FoodRecord::new(6, "Tungsten", None), true)]
    #[case(Query::ListUncategorized, FoodRecord::new(1, "Pizza", Some(Category::Sandwich)), false)]
    fn test_admits(#[case] query: Query, #[case] record: FoodRecord, #[case] expected: bool) {
        assert_eq!(query.admits(&record), expected);
    }

    #[rstest]
    fn test_outcome_table() {
        let outcome = ScenarioOutcome {
            index: 5,
            title: "Add a new soup".to_string(),
            steps: vec![
                StepOutcome::Inserted(FoodRecord::new(7, "Tomato Soup", Some(Category::Soup))),
                StepOutcome::Answered {
                    query: Query::search_food("%", Some(Category::Soup)),
                    answer: Answer::Records(vec![
                        FoodRecord::new(3, "Lasagne", Some(Category::Soup)),
                        FoodRecord::new(7, "Tomato Soup", Some(Category::Soup)),
                    ]),
                },
                StepOutcome::Answered {
                    query: Query::CountFoods,
                    answer: Answer::Count(7),
                },
            ],
        };
        let expected = [
            "Test 5: Add a new soup",
            "  Added: Tomato Soup (soup)",
            r#"Found 2 rows for search_food("%", soup):"#,
            "  - ID: 3, Name: Lasagne, Type: soup",
            "  - ID: 7, Name: Tomato Soup, Type: soup",
            "count_foods() = 7",
        ]
        .join("\n");
        assert_eq!(outcome.to_table(), expected);
    }
}
