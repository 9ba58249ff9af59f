use std::error::Error;
use std::process::ExitCode;

use foodtype_repro::db::DatabaseConfig;
use foodtype_repro::output::Outputable;
use foodtype_repro::queries::Queries;
use foodtype_repro::scenario::{default_scenarios, run_scenario};
use foodtype_repro::seed::{added_line, default_foods, seed_food};
use foodtype_repro::tracing_setup::init_tracing;

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = DatabaseConfig::resolve()?;
    let backend = config.connect()?;
    backend.ping()?;
    println!("Successfully connected to database ({})", backend.backend_name());

    let queries = Queries::new(backend.as_ref());
    queries.ensure_schema()?;

    println!("Setting up test data...");
    for record in default_foods()? {
        seed_food(&queries, &record)?;
        println!("{}", added_line(&record));
    }

    println!("Testing query functions...");
    for (index, scenario) in default_scenarios().iter().enumerate() {
        let outcome = run_scenario(&queries, index, scenario)?;
        println!("\n{}", outcome.to_table());
    }

    println!("\nAll tests passed!");
    Ok(())
}
