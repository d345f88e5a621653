//! Asynchronous CSV reader with batch interface
//!
//! Reads payment requests from any `futures::io::AsyncRead` in batches, for the
//! async encoding strategy.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of PaymentRequests
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{PaymentRequest, QrError};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader over CSV data
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read the next row as a payment request
    ///
    /// Row errors carry the line the row starts on. Returns `None` once the
    /// input is exhausted.
    pub async fn next_request(&mut self) -> Option<Result<PaymentRequest, QrError>> {
        let (row, pos) = self
            .csv_reader
            .deserialize_with_pos::<CsvRecord>()
            .next()
            .await?;

        let request = row
            .map_err(QrError::from)
            .and_then(convert_csv_record)
            .map_err(|e| e.at_line(Some(pos.line())));
        Some(request)
    }

    /// Read a batch of payment requests
    ///
    /// Reads up to `batch_size` valid requests. Rows that fail to parse or
    /// convert are logged and skipped, and do not count towards the batch.
    ///
    /// Returns an empty vector once the input is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<PaymentRequest> {
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            match self.next_request().await {
                Some(Ok(request)) => batch.push(request),
                Some(Err(e)) => warn!("Skipping record: {}", e),
                None => break,
            }
        }

        batch
    }
}
