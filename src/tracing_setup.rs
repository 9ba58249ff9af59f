//! Tracing setup.
//!
//! Log level comes from `RUST_LOG` (default: info). Events go to stderr so
//! that harness output on stdout stays readable.

use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. Fails if one is already installed.
pub fn init_tracing() -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
}
