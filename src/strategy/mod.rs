//! Processing strategy module for withdrawal requests
//!
//! This module defines the Strategy pattern for complete request processing
//! pipelines, covering both CSV parsing and processing by the withdrawal engine.
//! The implementation (file-order or concurrent batches) is selected at runtime.

use crate::cli::StrategyType;
use crate::core::FleetEngine;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete request pipelines
///
/// Each strategy reads withdrawal requests from a CSV file, runs them through
/// the engine's machines and writes one outcome row per request.
pub trait ProcessingStrategy: Send + Sync {
    /// Process requests from `input_path` and write the outcomes to `output`
    ///
    /// The engine is shared, so the caller can inspect deposits and balances
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - A fatal I/O error occurs during reading or writing
    ///
    /// Malformed request rows are logged and skipped. Rejected withdrawals are
    /// not errors; they appear in the output with their status.
    fn process(
        &self,
        engine: Arc<FleetEngine>,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` is only used by the async strategy; `None` means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
