//! Concurrent processing of withdrawal requests
//!
//! The withdrawal procedure is synchronous; this module runs many machines at
//! once on a tokio runtime while keeping each machine's requests sequential.
//!
//! - **BatchProcessor**: partitions a batch by machine and spawns one task per machine

pub mod batch_processor;

pub use batch_processor::BatchProcessor;
