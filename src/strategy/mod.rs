//! Processing strategy module for batch payload encoding
//!
//! This module defines the Strategy pattern for complete encoding pipelines,
//! covering CSV parsing, payload encoding and CSV output. Different
//! implementations (synchronous, asynchronous batch) can be selected at runtime.

use crate::cli::StrategyType;
use crate::core::PayloadConfig;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete encoding pipelines
///
/// Each strategy reads payment requests from a CSV file, encodes them and
/// writes one `id,payload` row per encoded request, in input order.
pub trait ProcessingStrategy: Send + Sync {
    /// Encode requests from the input file and write payloads to output
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - The async runtime cannot be created
    /// - Output cannot be written
    ///
    /// Invalid rows and requests that fail to encode are logged and skipped;
    /// they never cause this method to return an error.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
/// * `payload_config` - Serializer defaults for every encoded payload
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    payload_config: PayloadConfig,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(payload_config)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, payload_config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const INPUT: &str = "id,scheme,amount,bank_bin,bank_number,service,merchant_id,merchant_name,purpose\n\
        r1,vietqr,10000,970436,0123456789,,,,test purpose\n\
        bad,momo,1,,,,,,\n\
        m1,vnpay,10000,,,,1234567890,VNPAY,test purpose\n\
        s1,vietqr,,970436,0123456789,,,,\n\
        c1,vietqr,50000,970415,113366668888,QRIBFTTC,,,Thanh toan don hang\n";

    const EXPECTED: &str = "id,payload\n\
        r1,00020101021238540010A00000072701240006970436011001234567890208QRIBFTTA53037045405100005802VN62160812test purpose6304F197\n\
        m1,00020126280010A0000007750110123456789053037045405100005802VN5905VNPAY62160812test purpose63049357\n\
        s1,00020101021138540010A00000072701240006970436011001234567890208QRIBFTTA53037045802VN63046A15\n\
        c1,00020101021238560010A0000007270126000697041501121133666688880208QRIBFTTC53037045405500005802VN62230819Thanh toan don hang630470E5\n";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[rstest]
    #[case::sync(StrategyType::Sync, None)]
    #[case::async_default(StrategyType::Async, None)]
    #[case::async_small_batches(StrategyType::Async, Some(BatchConfig::new(1, 2)))]
    fn test_create_strategy_encodes_reference_payloads(
        #[case] strategy_type: StrategyType,
        #[case] config: Option<BatchConfig>,
    ) {
        let file = create_temp_csv(INPUT);
        let strategy = create_strategy(strategy_type, config, PayloadConfig::default());

        let mut output = Vec::new();
        strategy.process(file.path(), &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), EXPECTED);
    }

    #[test]
    fn test_strategies_produce_identical_output() {
        let rows: String = (0..250)
            .map(|i| {
                format!(
                    "r{},vietqr,{},970436,{:010},,,,order {}\n",
                    i,
                    i * 1000,
                    i,
                    i
                )
            })
            .collect();
        let file = create_temp_csv(&format!(
            "id,scheme,amount,bank_bin,bank_number,service,merchant_id,merchant_name,purpose\n{}",
            rows
        ));

        let mut sync_output = Vec::new();
        create_strategy(StrategyType::Sync, None, PayloadConfig::default())
            .process(file.path(), &mut sync_output)
            .unwrap();

        let mut async_output = Vec::new();
        create_strategy(
            StrategyType::Async,
            Some(BatchConfig::new(16, 4)),
            PayloadConfig::default(),
        )
        .process(file.path(), &mut async_output)
        .unwrap();

        assert_eq!(sync_output, async_output);
        assert_eq!(String::from_utf8(sync_output).unwrap().lines().count(), 251);
    }

    #[rstest]
    #[case::sync(StrategyType::Sync)]
    #[case::asynchronous(StrategyType::Async)]
    fn test_create_strategy_applies_payload_config(#[case] strategy_type: StrategyType) {
        let file = create_temp_csv(INPUT);
        let payload_config = PayloadConfig::new(Some("02".to_string()), Some("840".to_string()));
        let strategy = create_strategy(strategy_type, None, payload_config);

        let mut output = Vec::new();
        strategy.process(file.path(), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let first = output.lines().nth(1).unwrap();
        assert!(first.starts_with("r1,000202"));
        assert!(first.ends_with("6304D2ED"));
    }
}
