//! Payment request types for batch encoding
//!
//! A payment request is what a caller asks the engine to encode: who gets paid,
//! how much, and why. Requests are turned into `QrCode` records by the scheme
//! factories and then serialized into payload strings.

use super::record::{AdditionalData, Consumer, Merchant};
use rust_decimal::Decimal;
use serde::Serialize;

/// Request identifier
///
/// Free-form caller reference, echoed back next to the encoded payload.
pub type RequestId = String;

/// Beneficiary of a payment, per scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentTarget {
    /// Interbank transfer to a bank account or card
    VietQr {
        /// Receiving bank and account
        consumer: Consumer,
        /// Service code; empty selects transfer by account number
        service: String,
    },

    /// Payment to a VNPay merchant
    VnPay {
        /// Receiving merchant
        merchant: Merchant,
    },
}

/// Input payment request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Caller reference for this request
    pub id: RequestId,

    /// Amount to pay; None produces a static (no amount) payload
    pub amount: Option<Decimal>,

    /// Scheme-specific beneficiary
    pub target: PaymentTarget,

    /// Additional data; only the purpose survives factory construction
    pub additional_data: AdditionalData,
}

/// Output of a successful encode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedPayload {
    /// Reference of the request this payload was built from
    pub id: RequestId,

    /// Serialized payload, checksum included
    pub payload: String,
}
