//! Synchronous CSV reader with iterator interface
//!
//! Streams payment requests from a CSV file one row at a time. Format concerns
//! (column layout, scheme validation) are delegated to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<PaymentRequest, QrError>` for each CSV row:
//!
//! ```no_run
//! use vn_qr_pay::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("requests.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(request) => println!("Encoding request {}", request.id),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, unreadable header) are returned from `new()`
//! - Row errors are yielded as `QrError::InvalidRecord` or `QrError::Csv`,
//!   carrying the line the row starts on
//! - Iteration continues after a bad row

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{PaymentRequest, QrError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Memory usage is constant per row, not proportional to the file size.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
    record: StringRecord,
}

impl SyncReader {
    /// Open a CSV file for streaming iteration
    ///
    /// The CSV reader trims whitespace from all fields, allows rows with
    /// fewer columns than the header and uses an 8KB buffer.
    ///
    /// # Errors
    ///
    /// Returns `QrError::Io` if the file could not be opened and
    /// `QrError::Csv` if its header row is unreadable.
    pub fn new(path: &Path) -> Result<Self, QrError> {
        let file = File::open(path).map_err(|e| QrError::open_failed(path, e))?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);
        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<PaymentRequest, QrError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map(|pos| pos.line());
                let request = self
                    .record
                    .deserialize::<CsvRecord>(Some(&self.headers))
                    .map_err(QrError::from)
                    .and_then(convert_csv_record)
                    .map_err(|e| e.at_line(line));
                Some(request)
            }
            Err(e) => Some(Err(QrError::from(e))),
        }
    }
}
