//! I/O module
//!
//! Handles the simulator's CSV input and output.
//!
//! # Components
//!
//! - `csv_format` - CSV record types, conversion, outcome serialization
//! - `sync_reader` - Synchronous request reader with iterator interface
//! - `async_reader` - Asynchronous request reader with batch reading interface
//! - `setup` - Loading machines and bank accounts into an engine

pub mod async_reader;
pub mod csv_format;
pub mod setup;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_request_record, write_outcomes_csv, CsvRequestRecord};
pub use setup::{build_engine, SimulationConfig};
pub use sync_reader::SyncReader;
