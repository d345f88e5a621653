//! VietQR / VNPay Payment Payload Library
//! # Overview
//!
//! This library builds and reads the payment payloads behind Vietnamese
//! payment QR codes: EMV-style tag-length-value strings terminated by a
//! CRC-16/CCITT-FALSE checksum. Two schemes are supported, VietQR interbank
//! transfers and VNPay merchant payments, told apart by the provider GUID.
//!
//! # Architecture
//!
//! - [`types`] - QR record model, payment requests and the error type
//! - [`core`] - Payload engine:
//!   - [`core::tlv`] - Tag-length-value codec
//!   - [`core::crc`] - Checksum
//!   - [`core::fields`] - Tag registries and scheme constants
//!   - [`core::builder`] - Scheme factories and serialization
//!   - [`core::decoder`] - Checksum verification and decoding
//!   - [`core::encoder`] - Request encoding
//!   - [`core::batch_processor`] - Parallel batch encoding
//! - [`io`] - CSV input and output
//! - [`strategy`] - Sync and async batch pipelines
//! - [`cli`] - CLI arguments parsing
//! - [`logging`] - Tracing subscriber setup
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use vn_qr_pay::core::{create_vietqr_data, qr_to_str, PayloadConfig};
//! use vn_qr_pay::types::{AdditionalData, Consumer};
//!
//! let qr_code = create_vietqr_data(
//!     Some(Decimal::from(10000)),
//!     "",
//!     Consumer {
//!         bank_bin: "970436".to_string(),
//!         bank_number: "0123456789".to_string(),
//!     },
//!     &AdditionalData::with_purpose("test purpose"),
//! );
//! let payload = qr_to_str(&qr_code, &PayloadConfig::default()).unwrap();
//! assert!(payload.ends_with("6304F197"));
//! ```

pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{parse_qr, qr_to_str, verify_crc, PayloadConfig, PayloadEncoder};
pub use io::{write_fields_csv, write_payloads_csv};
pub use types::{
    AdditionalData, Consumer, EncodedPayload, Merchant, PaymentRequest, PaymentTarget, Provider,
    QrCode, QrError,
};
