//! vn-qr-pay CLI
//!
//! Command-line interface for building and inspecting payment payloads.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- encode requests.csv > payloads.csv
//! cargo run -- encode --strategy sync requests.csv > payloads.csv
//! cargo run -- encode --strategy async --batch-size 2000 --max-concurrent 8 requests.csv
//! QRCODE_VERSION=01 DEFAULT_CURRENCY=704 cargo run -- encode requests.csv
//! cargo run -- decode '00020101021238540010A000000727...6304F197'
//! ```
//!
//! `encode` writes an `id,payload` CSV to stdout; `decode` writes a
//! `field,value` CSV. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, invalid payload, etc.)

use std::io::Write;
use std::process;
use tracing::error;
use vn_qr_pay::cli::{self, Command, DecodeArgs, EncodeArgs};
use vn_qr_pay::core::parse_qr;
use vn_qr_pay::io::write_fields_csv;
use vn_qr_pay::logging::init_logging;
use vn_qr_pay::strategy;

fn main() {
    let args = cli::parse_args();
    init_logging();

    let mut output = std::io::stdout();
    let result = match args.command {
        Command::Encode(encode) => run_encode(&encode, &mut output),
        Command::Decode(decode) => run_decode(&decode, &mut output),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}

fn run_encode(args: &EncodeArgs, output: &mut dyn Write) -> Result<(), String> {
    let config = if matches!(args.strategy, cli::StrategyType::Async) {
        Some(args.to_batch_config())
    } else {
        None
    };
    let strategy =
        strategy::create_strategy(args.strategy.clone(), config, args.to_payload_config());

    strategy.process(&args.input_file, output)
}

fn run_decode(args: &DecodeArgs, output: &mut dyn Write) -> Result<(), String> {
    let qr_code = parse_qr(args.payload.trim()).map_err(|e| format!("Invalid payload: {}", e))?;
    write_fields_csv(&qr_code, output).map_err(|e| e.to_string())
}
