//! Payment request encoder
//!
//! This module provides the PayloadEncoder that turns payment requests into
//! payload strings by coordinating the scheme factories and the serializer.
//!
//! The encoder holds no state besides its configuration, so a single instance
//! can be shared by any number of threads.

use crate::core::builder::{create_vietqr_data, create_vnpayar_data, qr_to_str};
use crate::core::config::PayloadConfig;
use crate::types::{EncodedPayload, PaymentRequest, PaymentTarget, QrCode, QrError};

/// Payment request encoder
#[derive(Debug, Clone, Default)]
pub struct PayloadEncoder {
    config: PayloadConfig,
}

impl PayloadEncoder {
    /// Create a new PayloadEncoder with the given serializer defaults
    pub fn new(config: PayloadConfig) -> Self {
        PayloadEncoder { config }
    }

    /// Serializer defaults used by this encoder
    pub fn config(&self) -> &PayloadConfig {
        &self.config
    }

    /// Build the QR record for a request
    ///
    /// Routes the request to the factory of its scheme.
    pub fn build(&self, request: &PaymentRequest) -> QrCode {
        match &request.target {
            PaymentTarget::VietQr { consumer, service } => create_vietqr_data(
                request.amount,
                service,
                consumer.clone(),
                &request.additional_data,
            ),
            PaymentTarget::VnPay { merchant } => {
                create_vnpayar_data(request.amount, merchant.clone(), &request.additional_data)
            }
        }
    }

    /// Encode a single payment request
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails, e.g. `FieldTooLarge` when a
    /// value does not fit its length prefix.
    pub fn encode(&self, request: PaymentRequest) -> Result<EncodedPayload, QrError> {
        let qr_code = self.build(&request);
        let payload = qr_to_str(&qr_code, &self.config)?;

        Ok(EncodedPayload {
            id: request.id,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AdditionalData, Consumer, Merchant};
    use rust_decimal::Decimal;

    fn vietqr_request(id: &str, amount: Option<Decimal>) -> PaymentRequest {
        PaymentRequest {
            id: id.to_string(),
            amount,
            target: PaymentTarget::VietQr {
                consumer: Consumer {
                    bank_bin: "970436".to_string(),
                    bank_number: "0123456789".to_string(),
                },
                service: String::new(),
            },
            additional_data: AdditionalData::with_purpose("test purpose"),
        }
    }

    #[test]
    fn test_encode_vietqr_request() {
        let encoder = PayloadEncoder::default();
        let encoded = encoder
            .encode(vietqr_request("r1", Some(Decimal::from(10000))))
            .unwrap();

        assert_eq!(encoded.id, "r1");
        assert_eq!(
            encoded.payload,
            "00020101021238540010A00000072701240006970436011001234567890208QRIBFTTA53037045405100005802VN62160812test purpose6304F197"
        );
    }

    #[test]
    fn test_encode_vnpay_request() {
        let encoder = PayloadEncoder::default();
        let request = PaymentRequest {
            id: "m1".to_string(),
            amount: Some(Decimal::from(10000)),
            target: PaymentTarget::VnPay {
                merchant: Merchant {
                    id: "1234567890".to_string(),
                    name: "VNPAY".to_string(),
                },
            },
            additional_data: AdditionalData::with_purpose("test purpose"),
        };

        let encoded = encoder.encode(request).unwrap();
        assert_eq!(
            encoded.payload,
            "00020126280010A0000007750110123456789053037045405100005802VN5905VNPAY62160812test purpose63049357"
        );
    }

    #[test]
    fn test_encoder_uses_its_config() {
        let encoder = PayloadEncoder::new(PayloadConfig::new(
            Some("02".to_string()),
            Some("840".to_string()),
        ));
        let encoded = encoder
            .encode(vietqr_request("r1", Some(Decimal::from(10000))))
            .unwrap();

        assert!(encoded.payload.starts_with("000202"));
        assert!(encoded.payload.contains("5303840"));
        assert!(encoded.payload.ends_with("6304D2ED"));
    }

    #[test]
    fn test_build_static_request() {
        let encoder = PayloadEncoder::default();
        let qr_code = encoder.build(&vietqr_request("r1", None));
        assert_eq!(qr_code.init_method, "11");
        assert_eq!(qr_code.amount, "");
    }

    #[test]
    fn test_encode_reports_oversize_fields() {
        let encoder = PayloadEncoder::default();
        let mut request = vietqr_request("r1", None);
        request.additional_data = AdditionalData::with_purpose("x".repeat(100));

        assert!(matches!(
            encoder.encode(request),
            Err(QrError::FieldTooLarge { .. })
        ));
    }

    #[test]
    fn test_encoder_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PayloadEncoder>();
    }
}
