//! Batch processing with machine-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which processes batches
//! of withdrawal requests concurrently while keeping the requests of each
//! machine in their original order.
//!
//! # Design
//!
//! A batch is split into one sub-batch per machine. Each sub-batch runs on its
//! own tokio task; different machines proceed in parallel, the requests of one
//! machine run one after another. This is the serialization the withdrawal
//! procedure itself does not provide.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<WithdrawalEngine<B>>  (shared fleet of machines + bank)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::engine::WithdrawalEngine;
use crate::core::traits::Bank;
use crate::types::{MachineId, WithdrawalOutcome, WithdrawalRequest};
use tracing::error;

/// Batch processor with machine-based partitioning
///
/// Cloning is cheap; all clones share the same engine.
pub struct BatchProcessor<B> {
    engine: Arc<WithdrawalEngine<B>>,
}

impl<B> Clone for BatchProcessor<B> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<B> BatchProcessor<B>
where
    B: Bank + Send + Sync + 'static,
{
    pub fn new(engine: Arc<WithdrawalEngine<B>>) -> Self {
        Self { engine }
    }

    /// Partition a batch of requests by machine id
    ///
    /// # Guarantees
    ///
    /// - Each request appears in exactly one sub-batch
    /// - Requests for each machine keep their original order
    pub fn partition_by_machine(
        &self,
        batch: Vec<WithdrawalRequest>,
    ) -> HashMap<MachineId, Vec<WithdrawalRequest>> {
        let mut machine_batches: HashMap<MachineId, Vec<WithdrawalRequest>> = HashMap::new();

        for request in batch {
            machine_batches
                .entry(request.atm)
                .or_default()
                .push(request);
        }

        machine_batches
    }

    /// Process all requests for a single machine sequentially
    ///
    /// Every request is processed even if earlier ones fail. Outcomes are in
    /// input order.
    pub async fn process_machine_requests(
        &self,
        requests: Vec<WithdrawalRequest>,
    ) -> Vec<WithdrawalOutcome> {
        requests
            .iter()
            .map(|request| WithdrawalOutcome::new(request, self.engine.process(request)))
            .collect()
    }

    /// Process a batch with one task per machine
    ///
    /// Outcomes of different machines may interleave in any order; callers
    /// that need a stable order sort by request id.
    pub async fn process_batch(&self, batch: Vec<WithdrawalRequest>) -> Vec<WithdrawalOutcome> {
        let machine_batches = self.partition_by_machine(batch);

        let mut tasks = Vec::with_capacity(machine_batches.len());
        for (_atm, requests) in machine_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_machine_requests(requests).await
            }));
        }

        let mut outcomes = Vec::new();
        for task in tasks {
            match task.await {
                Ok(machine_outcomes) => outcomes.extend(machine_outcomes),
                Err(e) => error!(error = ?e, "Machine task panicked"),
            }
        }

        outcomes
    }
}
