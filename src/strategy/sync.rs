//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. Requests are
//! streamed from the `SyncReader` one at a time and processed in file order,
//! so the outcome of every request is deterministic.

use crate::core::FleetEngine;
use crate::io::csv_format::write_outcomes_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::WithdrawalOutcome;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_atm_engine::io::{build_engine, SimulationConfig};
/// use rust_atm_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use rust_atm_engine::types::Currency;
/// use std::path::{Path, PathBuf};
/// use std::sync::Arc;
///
/// let engine = build_engine(&SimulationConfig {
///     currency: Currency::PLN,
///     stock_path: PathBuf::from("stock.csv"),
///     accounts_path: PathBuf::from("accounts.csv"),
/// })
/// .expect("Fleet could not be loaded");
///
/// SyncProcessingStrategy
///     .process(Arc::new(engine), Path::new("requests.csv"), &mut std::io::stdout())
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        engine: Arc<FleetEngine>,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let reader = SyncReader::new(input_path)?;
        let mut outcomes = Vec::new();

        for result in reader {
            match result {
                Ok(request) => {
                    let result = engine.process(&request);
                    outcomes.push(WithdrawalOutcome::new(&request, result));
                }
                Err(e) => warn!(error = %e, "Skipping request record"),
            }
        }

        write_outcomes_csv(&outcomes, output)
    }
}
