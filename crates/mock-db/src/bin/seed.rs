//! Seed script - recreates the users table and fills it with fake users
//!
//! Run with:
//! ```
//! cargo run -p mock-db --bin seed
//! ```

use std::process::ExitCode;

use mock_db::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs share stderr with the error line so stdout only carries the result.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SeedConfig::from_env();
    let mut rng = rand::thread_rng();

    match seed(&config, &mut rng).await {
        Ok(summary) => {
            println!(
                "Successfully created {} table and inserted {} records",
                summary.table, summary.inserted
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", anyhow::Error::from(e));
            ExitCode::FAILURE
        }
    }
}
