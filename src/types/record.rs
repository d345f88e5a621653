//! QR record types
//!
//! This module defines the in-memory representation of a payment payload: the
//! `QrCode` aggregate and the sub-records it is built from. The builder consumes
//! these records and the decoder reconstructs them.

use crate::core::fields::{AdditionalDataId, Scheme};

/// Payment provider block
///
/// The GUID identifies the scheme that governs how the nested data field is
/// interpreted; `field_id` is the top-level tag the whole block is wrapped in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provider {
    /// Scheme identifier, e.g. `A000000727` for VietQR
    pub guid: String,

    /// Top-level tag of the provider block (`26` or `38`)
    pub field_id: String,

    /// Human-readable provider name
    pub name: String,

    /// Service code (VietQR only)
    pub service: String,
}

impl Provider {
    /// Resolve the scheme from the provider GUID
    pub fn scheme(&self) -> Scheme {
        Scheme::from_guid(&self.guid)
    }
}

/// Merchant identity, used by the VNPay scheme
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Merchant {
    /// Merchant id, embedded as the provider's data payload
    pub id: String,

    /// Merchant name, emitted as the top-level merchant-name field
    pub name: String,
}

/// Beneficiary account, used by the VietQR scheme
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consumer {
    /// Bank Identification Number of the receiving bank
    pub bank_bin: String,

    /// Account (or card) number at that bank
    pub bank_number: String,
}

/// Additional data block (tag `62`)
///
/// Every sub-field is optional; an empty string means the sub-field is not
/// emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionalData {
    pub store: String,
    pub terminal: String,
    pub bill_number: String,
    pub mobile_number: String,
    pub loyalty_number: String,
    pub reference: String,
    pub customer_label: String,
    /// Purpose of transaction, the only sub-field the factories carry over
    pub purpose: String,
    pub data_request: String,
}

impl AdditionalData {
    /// Additional data carrying only a purpose of transaction
    pub fn with_purpose(purpose: impl Into<String>) -> Self {
        AdditionalData {
            purpose: purpose.into(),
            ..Default::default()
        }
    }

    /// Value of a sub-field by its registry id
    pub fn field(&self, id: AdditionalDataId) -> &str {
        match id {
            AdditionalDataId::BillNumber => &self.bill_number,
            AdditionalDataId::MobileNumber => &self.mobile_number,
            AdditionalDataId::StoreLabel => &self.store,
            AdditionalDataId::LoyaltyNumber => &self.loyalty_number,
            AdditionalDataId::ReferenceLabel => &self.reference,
            AdditionalDataId::CustomerLabel => &self.customer_label,
            AdditionalDataId::TerminalLabel => &self.terminal,
            AdditionalDataId::PurposeOfTransaction => &self.purpose,
            AdditionalDataId::AdditionalConsumerDataRequest => &self.data_request,
        }
    }

    /// Mutable access to a sub-field by its registry id
    pub fn field_mut(&mut self, id: AdditionalDataId) -> &mut String {
        match id {
            AdditionalDataId::BillNumber => &mut self.bill_number,
            AdditionalDataId::MobileNumber => &mut self.mobile_number,
            AdditionalDataId::StoreLabel => &mut self.store,
            AdditionalDataId::LoyaltyNumber => &mut self.loyalty_number,
            AdditionalDataId::ReferenceLabel => &mut self.reference,
            AdditionalDataId::CustomerLabel => &mut self.customer_label,
            AdditionalDataId::TerminalLabel => &mut self.terminal,
            AdditionalDataId::PurposeOfTransaction => &mut self.purpose,
            AdditionalDataId::AdditionalConsumerDataRequest => &mut self.data_request,
        }
    }
}

/// Payment QR record
///
/// Aggregate root of a payload. Exactly one of `merchant` (VNPay) and `consumer`
/// (VietQR) is meaningfully populated, depending on the provider scheme.
///
/// Records are built once by a scheme factory or by the decoder and are not
/// modified afterwards; the checksum is computed at serialization time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrCode {
    /// Set by the decoder once the checksum has been verified
    pub is_valid: bool,

    /// Payload format version as read by the decoder
    pub version: String,

    /// Point of initiation: `11` (no amount) or `12` (with amount)
    pub init_method: String,

    pub provider: Provider,
    pub merchant: Option<Merchant>,
    pub consumer: Option<Consumer>,
    pub category: String,

    /// ISO 4217 numeric currency code; empty means the configured default
    pub currency: String,

    pub amount: String,
    pub tip_and_fee_type: String,
    pub tip_and_fee_amount: String,
    pub tip_and_fee_percent: String,

    /// ISO 3166 country code; empty means the configured default
    pub nation: String,

    pub city: String,
    pub zip_code: String,
    pub additional_data: AdditionalData,

    /// Checksum as read by the decoder
    pub crc: String,
}

impl QrCode {
    /// Scheme of the record's provider
    pub fn scheme(&self) -> Scheme {
        self.provider.scheme()
    }

    /// Merchant name, empty when the record has no merchant
    pub fn merchant_name(&self) -> &str {
        self.merchant
            .as_ref()
            .map(|merchant| merchant.name.as_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::vietqr("A000000727", Scheme::VietQr)]
    #[case::vnpay("A000000775", Scheme::VnPay)]
    #[case::unknown("A000000999", Scheme::Unknown)]
    #[case::empty("", Scheme::Unknown)]
    fn test_provider_scheme(#[case] guid: &str, #[case] expected: Scheme) {
        let provider = Provider {
            guid: guid.to_string(),
            ..Default::default()
        };
        assert_eq!(provider.scheme(), expected);
    }

    #[test]
    fn test_additional_data_with_purpose() {
        let data = AdditionalData::with_purpose("test purpose");
        assert_eq!(data.purpose, "test purpose");
        assert_eq!(
            AdditionalData {
                purpose: String::new(),
                ..data
            },
            AdditionalData::default()
        );
    }

    #[test]
    fn test_additional_data_field_access() {
        let mut data = AdditionalData::default();
        for (index, id) in AdditionalDataId::ALL.into_iter().enumerate() {
            *data.field_mut(id) = format!("value{}", index);
        }

        assert_eq!(data.bill_number, "value0");
        assert_eq!(data.store, "value2");
        assert_eq!(data.terminal, "value6");
        assert_eq!(data.purpose, "value7");
        assert_eq!(data.data_request, "value8");
        for (index, id) in AdditionalDataId::ALL.into_iter().enumerate() {
            assert_eq!(data.field(id), format!("value{}", index));
        }
    }

    #[test]
    fn test_merchant_name_without_merchant() {
        let qr_code = QrCode::default();
        assert_eq!(qr_code.merchant_name(), "");

        let qr_code = QrCode {
            merchant: Some(Merchant {
                id: "1234567890".to_string(),
                name: "VNPAY".to_string(),
            }),
            ..Default::default()
        };
        assert_eq!(qr_code.merchant_name(), "VNPAY");
    }
}
