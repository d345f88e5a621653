//! Asynchronous batch processing strategy
//!
//! Multi-threaded implementation of the ProcessingStrategy trait. Requests are
//! read in batches and each batch is encoded in parallel by the BatchProcessor.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── BatchProcessor (chunking + tokio tasks)
//!         └── Arc<PayloadEncoder>
//! ```
//!
//! Batches are processed one after the other and every batch comes back in
//! input order, so the output is identical to the sync strategy's.

use crate::core::{BatchProcessor, PayloadConfig, PayloadEncoder};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_payloads_csv;
use crate::strategy::ProcessingStrategy;
use crate::types::QrError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Configuration for batch processing
///
/// Controls how requests are batched and the number of worker threads
/// encoding each batch.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of requests per batch
    pub batch_size: usize,
    /// Number of worker threads (and chunks per batch)
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
    /// Create a new BatchConfig with custom values
    ///
    /// A zero value is replaced by its default with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
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
    encoder: Arc<PayloadEncoder>,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    ///
    /// # Arguments
    ///
    /// * `config` - BatchConfig with batch_size and max_concurrent_batches
    /// * `payload_config` - Serializer defaults for every encoded payload
    pub fn new(config: BatchConfig, payload_config: PayloadConfig) -> Self {
        Self {
            config,
            encoder: Arc::new(PayloadEncoder::new(payload_config)),
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Encode requests from input file and write payloads to output
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads requests in batches from CSV using AsyncReader
    /// 3. Encodes each batch in parallel, waiting for it before reading the next
    /// 4. Writes the payloads in input order
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        let payloads = runtime.block_on(async {
            let processor = BatchProcessor::new(
                Arc::clone(&self.encoder),
                self.config.max_concurrent_batches,
            );

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| QrError::open_failed(input_path, e).to_string())?;

            // csv-async reads futures::io, tokio files need the compat layer
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut payloads = Vec::new();
            let mut failed = 0usize;

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for encoding in processor.process_batch(batch).await {
                    match encoding.result {
                        Ok(payload) => payloads.push(payload),
                        Err(e) => {
                            warn!(request_id = %encoding.request_id, "Encoding error: {}", e);
                            failed += 1;
                        }
                    }
                }
            }

            info!(encoded = payloads.len(), failed, "Batch encoding finished");

            Ok::<_, String>(payloads)
        })?;

        write_payloads_csv(&payloads, output).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "id,scheme,amount,bank_bin,bank_number,service,merchant_id,merchant_name,purpose\n";

    fn create_temp_csv(rows: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(HEADER.as_bytes())
            .expect("Failed to write to temp file");
        file.write_all(rows.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn strategy(batch_size: usize, workers: usize) -> AsyncProcessingStrategy {
        AsyncProcessingStrategy::new(
            BatchConfig::new(batch_size, workers),
            PayloadConfig::default(),
        )
    }

    #[rstest]
    #[case(0, 0, 1000)]
    #[case(0, 2, 1000)]
    #[case(5, 2, 5)]
    fn test_batch_config_new(
        #[case] batch_size: usize,
        #[case] workers: usize,
        #[case] expected_batch_size: usize,
    ) {
        let config = BatchConfig::new(batch_size, workers);
        assert_eq!(config.batch_size, expected_batch_size);
        assert!(config.max_concurrent_batches >= 1);
    }

    #[test]
    fn test_async_strategy_encodes_vietqr_request() {
        let file = create_temp_csv("r1,vietqr,10000,970436,0123456789,,,,test purpose\n");

        let mut output = Vec::new();
        strategy(10, 2).process(file.path(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "id,payload\n\
             r1,00020101021238540010A00000072701240006970436011001234567890208QRIBFTTA53037045405100005802VN62160812test purpose6304F197\n"
        );
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let mut output = Vec::new();
        let result = strategy(10, 2).process(Path::new("nonexistent.csv"), &mut output);
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_async_strategy_maintains_order_across_batches() {
        let rows: String = (0..23)
            .map(|i| format!("m{},vnpay,{},,,,{:010},SHOP,\n", i, i + 1, i))
            .collect();
        let file = create_temp_csv(&rows);

        // Small batches and several workers force many chunks per run
        let mut output = Vec::new();
        strategy(5, 3).process(file.path(), &mut output).unwrap();

        let ids: Vec<String> = String::from_utf8(output)
            .unwrap()
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap().to_string())
            .collect();
        let expected: Vec<String> = (0..23).map(|i| format!("m{}", i)).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_async_strategy_skips_failed_requests() {
        let file = create_temp_csv(&format!(
            "a,vnpay,,,,,1234567890,{},\nb,vnpay,,,,,1234567890,,\nc,momo,,,,,,,\n",
            "N".repeat(120)
        ));

        let mut output = Vec::new();
        strategy(2, 2).process(file.path(), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(output.lines().nth(1).unwrap().starts_with("b,"));
    }

    #[test]
    fn test_async_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AsyncProcessingStrategy>();
    }
}
