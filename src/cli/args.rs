use crate::io::SimulationConfig;
use crate::strategy::BatchConfig;
use crate::types::Currency;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Simulate a fleet of cash machines serving withdrawal requests
#[derive(Parser, Debug)]
#[command(name = "atm-engine")]
#[command(about = "Simulate a fleet of cash machines serving withdrawal requests", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing withdrawal requests
    #[arg(value_name = "INPUT", help = "Path to the requests CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use for the requests
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for file order or 'async' for concurrent machines"
    )]
    pub strategy: StrategyType,

    /// Number of requests per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of requests per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent workers (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of runtime worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Operating currency of every machine
    #[arg(
        long = "currency",
        value_name = "CODE",
        default_value = "PLN",
        help = "Three-letter currency code the machines operate in"
    )]
    pub currency: Currency,

    /// Deposit stock of each machine
    #[arg(
        long = "stock",
        value_name = "FILE",
        help = "CSV file with rows atm,denomination,count"
    )]
    pub stock_file: PathBuf,

    /// Bank accounts served by the fleet
    #[arg(
        long = "accounts",
        value_name = "FILE",
        help = "CSV file with rows card,pin,balance,currency"
    )]
    pub accounts_file: PathBuf,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are rejected by
    /// `BatchConfig::new` with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            currency: self.currency,
            stock_path: self.stock_file.clone(),
            accounts_path: self.accounts_file.clone(),
        }
    }
}
