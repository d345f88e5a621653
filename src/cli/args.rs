use crate::core::PayloadConfig;
use crate::strategy::BatchConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Build and inspect VietQR / VNPay payment payloads
#[derive(Parser, Debug)]
#[command(name = "vn-qr-pay")]
#[command(about = "Build and inspect VietQR / VNPay payment payloads", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode payment requests from a CSV file into payloads
    Encode(EncodeArgs),

    /// Verify and decode a single payload
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Input CSV file path containing payment requests
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use for encoding requests
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of requests per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of requests per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads encoding each batch (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Payload format version
    #[arg(
        long = "qr-version",
        value_name = "VERSION",
        env = "QRCODE_VERSION",
        help = "Payload format version (default: 01)"
    )]
    pub qr_version: Option<String>,

    /// Currency used when a request has none
    #[arg(
        long = "currency",
        value_name = "CODE",
        env = "DEFAULT_CURRENCY",
        help = "ISO 4217 numeric currency code (default: 704)"
    )]
    pub currency: Option<String>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Payload string, checksum included
    #[arg(value_name = "PAYLOAD")]
    pub payload: String,
}

/// Available processing strategies for batch encoding
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl EncodeArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to defaults; zero values are replaced with a
    /// warning by `BatchConfig::new`.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create the serializer defaults from CLI arguments
    pub fn to_payload_config(&self) -> PayloadConfig {
        PayloadConfig::new(self.qr_version.clone(), self.currency.clone())
    }
}
