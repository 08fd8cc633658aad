//! ATM Engine CLI
//!
//! Simulates a fleet of cash machines serving withdrawal requests from a CSV file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --stock stock.csv --accounts accounts.csv requests.csv > outcomes.csv
//! cargo run -- --strategy sync --currency EUR --stock stock.csv --accounts accounts.csv requests.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 --stock stock.csv --accounts accounts.csv requests.csv
//! ```
//!
//! Outcomes go to stdout as CSV. Logs go to stderr; set `RUST_LOG` (default
//! `warn`) to see more.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, file not readable, etc.)

use rust_atm_engine::cli;
use rust_atm_engine::io;
use rust_atm_engine::strategy;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let engine = match io::build_engine(&args.to_simulation_config()) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(engine, &args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
