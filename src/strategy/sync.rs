//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It delegates:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Payload encoding to `PayloadEncoder`
//! - CSV output to `csv_format::write_payloads_csv`

use crate::core::{PayloadConfig, PayloadEncoder};
use crate::io::csv_format::write_payloads_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use vn_qr_pay::core::PayloadConfig;
/// use vn_qr_pay::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(PayloadConfig::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("requests.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyncProcessingStrategy {
    encoder: PayloadEncoder,
}

impl SyncProcessingStrategy {
    /// Create a new SyncProcessingStrategy encoding with the given defaults
    pub fn new(payload_config: PayloadConfig) -> Self {
        Self {
            encoder: PayloadEncoder::new(payload_config),
        }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let reader = SyncReader::new(input_path).map_err(|e| e.to_string())?;

        let mut payloads = Vec::new();
        let mut skipped = 0usize;

        for result in reader {
            match result {
                Ok(request) => {
                    let request_id = request.id.clone();
                    match self.encoder.encode(request) {
                        Ok(payload) => payloads.push(payload),
                        Err(e) => {
                            warn!(request_id = %request_id, "Encoding error: {}", e);
                            skipped += 1;
                        }
                    }
                }
                Err(e) => {
                    warn!("Skipping record: {}", e);
                    skipped += 1;
                }
            }
        }

        info!(encoded = payloads.len(), skipped, "Batch encoding finished");

        write_payloads_csv(&payloads, output).map_err(|e| e.to_string())
    }
}
