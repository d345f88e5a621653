//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `record`: the QR record model (QrCode, Provider, Merchant, Consumer, AdditionalData)
//! - `request`: payment requests and encoded payloads for batch processing
//! - `error`: Error types for the payload engine

pub mod error;
pub mod record;
pub mod request;

pub use error::QrError;
pub use record::{AdditionalData, Consumer, Merchant, Provider, QrCode};
pub use request::{EncodedPayload, PaymentRequest, PaymentTarget, RequestId};
