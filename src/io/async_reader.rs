//! Asynchronous CSV reader with batch interface
//!
//! Reads withdrawal requests with csv-async so the concurrent strategy can pull
//! them in batches without blocking a runtime worker.
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of WithdrawalRequests
//!                  ↓
//!           csv_format module
//!   (CsvRequestRecord, convert_request_record)
//! ```

use crate::io::csv_format::{convert_request_record, CsvRequestRecord};
use crate::types::WithdrawalRequest;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader over withdrawal requests
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read up to `batch_size` requests
    ///
    /// Invalid records are logged and skipped. Returns an empty vector at the
    /// end of the input.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<WithdrawalRequest> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRequestRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(record)) => match convert_request_record(record) {
                    Ok(request) => batch.push(request),
                    Err(e) => warn!(error = %e, "Skipping request record"),
                },
                Some(Err(e)) => warn!(error = %e, "CSV parse error"),
                None => break,
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Currency, Money};
    use futures::io::Cursor;

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let csv_content = "atm,request,card,pin,amount,currency\n\
                           1,1,1000,1234,100,PLN\n\
                           2,2,2000,1234,200,PLN\n\
                           1,3,1000,1234,0,\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(2).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].request, 1);
        assert_eq!(batch[1].atm, 2);
        assert_eq!(batch[1].amount, Money::new(200, Currency::PLN));

        let batch = reader.read_batch(2).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].amount, Money::ZERO);

        assert!(reader.read_batch(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_records() {
        let csv_content = "atm,request,card,pin,amount,currency\n\
                           1,1,1000,1234,100,\n\
                           1,2,1000,1234,abc,PLN\n\
                           1,3,1000,1234,50,PLN\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(10).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].request, 3);
    }
}
