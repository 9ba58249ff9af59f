//! Shared helpers for unit tests.

use crate::db::{open_mem_db, DatabaseBackend};
use crate::queries::Queries;
use crate::seed::{default_foods, seed_foods};

/// Number of records in the default seed set.
pub const SEEDED_COUNT: usize = 6;

/// An in-memory store with the schema created and the default foods seeded.
pub fn seeded_db() -> Box<dyn DatabaseBackend> {
    let db = open_mem_db();
    {
        let queries = Queries::new(db.as_ref());
        queries.ensure_schema().expect("Schema creation should succeed");
        let foods = default_foods().expect("Seed data should parse");
        seed_foods(&queries, &foods).expect("Seeding should succeed");
    }
    db
}
