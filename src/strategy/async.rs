//! Asynchronous batch processing strategy
//!
//! Processes withdrawal requests in batches on a tokio multi-threaded runtime,
//! with machine-based partitioning inside each batch.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── BatchProcessor (machine partitioning + tasks)
//!         └── WithdrawalEngine (shared fleet, DashMap-based state)
//! ```
//!
//! # Ordering
//!
//! - Batches are processed one after another
//! - Within a batch, every machine runs on its own task
//! - Requests of one machine keep their file order across the whole input
//!
//! Machines sharing a bank account may race for its balance, so outcomes can
//! differ from the sync strategy when one card is used at several machines.

use crate::core::r#async::BatchProcessor;
use crate::core::FleetEngine;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_outcomes_csv;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for batch processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of requests per batch
    pub batch_size: usize,
    /// Number of runtime worker threads processing machines concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, replacing zero values with the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "Invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "Invalid concurrency limit, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process requests in batches
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads requests in batches using AsyncReader
    /// 3. Processes each batch to completion before reading the next one
    /// 4. Writes all outcomes sorted by request id
    fn process(
        &self,
        engine: Arc<FleetEngine>,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        let outcomes = runtime.block_on(async {
            let processor = BatchProcessor::new(engine);

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads futures::io, tokio files implement tokio::io
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut outcomes = Vec::new();
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                debug!(requests = batch.len(), "Processing batch");
                outcomes.extend(processor.process_batch(batch).await);
            }

            Ok::<_, String>(outcomes)
        })?;

        write_outcomes_csv(&outcomes, output)
    }
}
