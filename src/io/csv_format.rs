//! CSV format handling for payment requests and payload output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to payment requests
//! - Payload and decoded-field output serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::core::fields::AdditionalDataId;
use crate::types::{
    AdditionalData, Consumer, EncodedPayload, Merchant, PaymentRequest, PaymentTarget, QrCode,
    QrError,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns:
/// id, scheme, amount, bank_bin, bank_number, service, merchant_id, merchant_name, purpose
///
/// Everything but `id` and `scheme` is optional; which columns are required
/// depends on the scheme and is checked by `convert_csv_record`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRecord {
    pub id: String,
    pub scheme: String,
    pub amount: Option<String>,
    pub bank_bin: Option<String>,
    pub bank_number: Option<String>,
    pub service: Option<String>,
    pub merchant_id: Option<String>,
    pub merchant_name: Option<String>,
    pub purpose: Option<String>,
}

/// Trimmed value of an optional column, None when blank
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn invalid(message: String) -> QrError {
    QrError::invalid_record(None, &message)
}

/// Convert a CsvRecord to a PaymentRequest
///
/// This function:
/// - Parses the scheme column (`vietqr` or `vnpay`, case-insensitive)
/// - Parses the amount into a Decimal (if present) and rejects negative amounts
/// - Validates that the columns the scheme needs are present
///
/// # Returns
///
/// Result containing either:
/// - Ok(PaymentRequest) - Successfully converted record
/// - Err(QrError::InvalidRecord) - What is wrong with the row, without a line
///   number; readers attach it with `QrError::at_line`
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<PaymentRequest, QrError> {
    let id = csv_record.id.trim().to_string();

    let amount = match non_empty(csv_record.amount) {
        Some(amount_str) => match Decimal::from_str(&amount_str) {
            Ok(amount) if amount.is_sign_negative() => {
                return Err(invalid(format!(
                    "Negative amount '{}' for request '{}'",
                    amount_str, id
                )))
            }
            Ok(amount) => Some(amount),
            Err(_) => {
                return Err(invalid(format!(
                    "Invalid amount '{}' for request '{}'",
                    amount_str, id
                )))
            }
        },
        None => None,
    };

    let target = match csv_record.scheme.trim().to_lowercase().as_str() {
        "vietqr" => {
            let (Some(bank_bin), Some(bank_number)) = (
                non_empty(csv_record.bank_bin),
                non_empty(csv_record.bank_number),
            ) else {
                return Err(invalid(format!(
                    "VietQR request '{}' requires bank_bin and bank_number",
                    id
                )));
            };

            PaymentTarget::VietQr {
                consumer: Consumer {
                    bank_bin,
                    bank_number,
                },
                service: non_empty(csv_record.service).unwrap_or_default(),
            }
        }
        "vnpay" => {
            let Some(merchant_id) = non_empty(csv_record.merchant_id) else {
                return Err(invalid(format!("VNPay request '{}' requires merchant_id", id)));
            };

            PaymentTarget::VnPay {
                merchant: Merchant {
                    id: merchant_id,
                    name: non_empty(csv_record.merchant_name).unwrap_or_default(),
                },
            }
        }
        _ => {
            return Err(invalid(format!(
                "Invalid scheme: '{}' for request '{}'",
                csv_record.scheme, id
            )))
        }
    };

    Ok(PaymentRequest {
        id,
        amount,
        target,
        additional_data: AdditionalData::with_purpose(
            non_empty(csv_record.purpose).unwrap_or_default(),
        ),
    })
}

/// Write encoded payloads to CSV format
///
/// Writes payloads with columns: id, payload, in the order given.
///
/// # Errors
///
/// Returns `QrError::Csv` or `QrError::Io` if the output cannot be written.
pub fn write_payloads_csv(
    payloads: &[EncodedPayload],
    output: &mut dyn Write,
) -> Result<(), QrError> {
    let mut writer = csv::Writer::from_writer(output);

    // An empty batch still gets a header
    if payloads.is_empty() {
        writer.write_record(["id", "payload"])?;
    }

    for payload in payloads {
        writer.serialize(payload)?;
    }

    writer.flush()?;

    Ok(())
}

/// Named, non-empty fields of a decoded record in payload order
pub fn decoded_fields(qr_code: &QrCode) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("version", qr_code.version.clone()),
        ("init_method", qr_code.init_method.clone()),
        ("provider", qr_code.provider.name.clone()),
        ("provider_guid", qr_code.provider.guid.clone()),
        ("provider_field", qr_code.provider.field_id.clone()),
        ("service", qr_code.provider.service.clone()),
    ];

    if let Some(consumer) = &qr_code.consumer {
        fields.push(("bank_bin", consumer.bank_bin.clone()));
        fields.push(("bank_number", consumer.bank_number.clone()));
    }
    if let Some(merchant) = &qr_code.merchant {
        fields.push(("merchant_id", merchant.id.clone()));
    }

    fields.extend([
        ("category", qr_code.category.clone()),
        ("currency", qr_code.currency.clone()),
        ("amount", qr_code.amount.clone()),
        ("tip_and_fee_type", qr_code.tip_and_fee_type.clone()),
        ("tip_and_fee_amount", qr_code.tip_and_fee_amount.clone()),
        ("tip_and_fee_percent", qr_code.tip_and_fee_percent.clone()),
        ("nation", qr_code.nation.clone()),
        ("merchant_name", qr_code.merchant_name().to_string()),
        ("city", qr_code.city.clone()),
        ("zip_code", qr_code.zip_code.clone()),
    ]);

    for id in AdditionalDataId::ALL {
        fields.push((
            additional_data_label(id),
            qr_code.additional_data.field(id).to_string(),
        ));
    }

    fields.push(("crc", qr_code.crc.clone()));
    fields.retain(|(_, value)| !value.is_empty());
    fields
}

fn additional_data_label(id: AdditionalDataId) -> &'static str {
    match id {
        AdditionalDataId::BillNumber => "bill_number",
        AdditionalDataId::MobileNumber => "mobile_number",
        AdditionalDataId::StoreLabel => "store",
        AdditionalDataId::LoyaltyNumber => "loyalty_number",
        AdditionalDataId::ReferenceLabel => "reference",
        AdditionalDataId::CustomerLabel => "customer_label",
        AdditionalDataId::TerminalLabel => "terminal",
        AdditionalDataId::PurposeOfTransaction => "purpose",
        AdditionalDataId::AdditionalConsumerDataRequest => "data_request",
    }
}

/// Write a decoded record to CSV format
///
/// Writes the non-empty fields with columns: field, value
pub fn write_fields_csv(qr_code: &QrCode, output: &mut dyn Write) -> Result<(), QrError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["field", "value"])?;
    for (field, value) in decoded_fields(qr_code) {
        writer.write_record([field, value.as_str()])?;
    }
    writer.flush()?;

    Ok(())
}
