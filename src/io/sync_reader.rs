//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over withdrawal requests from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<WithdrawalRequest, String>` for each CSV row:
//!
//! ```no_run
//! use rust_atm_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("requests.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(request) => println!("Request {} at machine {}", request.request, request.atm),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as Err variants with their line number

use crate::io::csv_format::{convert_request_record, CsvRequestRecord};
use crate::types::WithdrawalRequest;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader over withdrawal requests
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Open a request file for streaming iteration
    ///
    /// The CSV reader trims whitespace from all fields and accepts rows
    /// without the trailing currency column.
    ///
    /// # Errors
    ///
    /// Returns an error message if the file cannot be opened.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<WithdrawalRequest, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRequestRecord>();
        let next = deserializer.next()?;

        // Line 1 is the header
        self.line_num += 1;
        let line = self.line_num + 1;

        Some(match next {
            Ok(record) => convert_request_record(record).map_err(|e| format!("Line {}: {}", line, e)),
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}
