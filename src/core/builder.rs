//! Payload builder
//!
//! Scheme factories that turn payment details into a [`QrCode`] record, and the
//! serializer that renders a record into its wire form.
//!
//! # Wire order
//!
//! ```text
//! 00 version | 01 init method | 26/38 provider block
//! 52 category | 53 currency | 54 amount | 55-57 tip and fee
//! 58 nation | 59 merchant name | 60 city | 61 zip
//! 62 additional data block | 63 04 CRC
//! ```
//!
//! Scanners depend on this order; empty fields are omitted.

use crate::core::config::PayloadConfig;
use crate::core::crc::make_crc16;
use crate::core::fields::{
    AdditionalDataId, ConsumerFieldId, FieldId, ProviderFieldId, Scheme, VietQrService,
};
use crate::core::tlv::{combine_field_data, encode_block};
use crate::types::{AdditionalData, Consumer, Merchant, Provider, QrCode, QrError};
use rust_decimal::Decimal;

/// Point of initiation for a payload without amount
pub const INIT_METHOD_STATIC: &str = "11";

/// Point of initiation for a payload with amount
pub const INIT_METHOD_DYNAMIC: &str = "12";

/// Length prefix of the checksum field, which always carries 4 hex digits
const CRC_LENGTH: &str = "04";

/// Build a VietQR record
///
/// # Arguments
///
/// * `amount` - Amount to transfer; None produces a static payload
/// * `service` - Service code; empty selects transfer by account number
/// * `consumer` - Receiving bank BIN and account number
/// * `additional_data` - Only the purpose is carried over
pub fn create_vietqr_data(
    amount: Option<Decimal>,
    service: &str,
    consumer: Consumer,
    additional_data: &AdditionalData,
) -> QrCode {
    let amount = amount.map(|a| a.to_string()).unwrap_or_default();
    let init_method = if amount.is_empty() {
        INIT_METHOD_STATIC
    } else {
        INIT_METHOD_DYNAMIC
    };

    let service = if service.is_empty() {
        VietQrService::FastTransferByAccountNumber.code()
    } else {
        service
    };

    QrCode {
        init_method: init_method.to_string(),
        provider: scheme_provider(Scheme::VietQr, service),
        consumer: Some(consumer),
        amount,
        additional_data: AdditionalData::with_purpose(additional_data.purpose.as_str()),
        ..Default::default()
    }
}

/// Build a VNPay record
///
/// The init method is left empty, so the payload carries no point of
/// initiation field.
///
/// # Arguments
///
/// * `amount` - Amount to pay; None omits the amount field
/// * `merchant` - Receiving merchant
/// * `additional_data` - Only the purpose is carried over
pub fn create_vnpayar_data(
    amount: Option<Decimal>,
    merchant: Merchant,
    additional_data: &AdditionalData,
) -> QrCode {
    QrCode {
        provider: scheme_provider(Scheme::VnPay, ""),
        merchant: Some(merchant),
        amount: amount.map(|a| a.to_string()).unwrap_or_default(),
        additional_data: AdditionalData::with_purpose(additional_data.purpose.as_str()),
        ..Default::default()
    }
}

fn scheme_provider(scheme: Scheme, service: &str) -> Provider {
    Provider {
        guid: scheme.guid().unwrap_or_default().to_string(),
        field_id: scheme
            .field_id()
            .map(FieldId::tag)
            .unwrap_or_default()
            .to_string(),
        name: scheme.name().to_string(),
        service: service.to_string(),
    }
}

/// Serialize a record into a payload string, checksum included
///
/// The record is not modified; serializing the same record twice yields the
/// same string.
///
/// # Errors
///
/// - `SchemeMismatch` if the provider GUID is unknown, or the record lacks the
///   merchant (VNPay) or consumer (VietQR) its scheme needs
/// - `FieldTooLarge` if any field or nested block exceeds 99 characters
pub fn qr_to_str(qr_code: &QrCode, config: &PayloadConfig) -> Result<String, QrError> {
    let currency = or_default(&qr_code.currency, &config.default_currency);
    let nation = or_default(&qr_code.nation, &config.default_nation);

    let mut content = String::new();
    content += &combine_field_data(FieldId::Version.tag(), &config.version)?;
    content += &combine_field_data(FieldId::InitMethod.tag(), &qr_code.init_method)?;
    content += &encode_provider(qr_code)?;

    let simple_fields = [
        (FieldId::Category, qr_code.category.as_str()),
        (FieldId::Currency, currency),
        (FieldId::Amount, qr_code.amount.as_str()),
        (FieldId::TipAndFeeType, qr_code.tip_and_fee_type.as_str()),
        (FieldId::TipAndFeeAmount, qr_code.tip_and_fee_amount.as_str()),
        (FieldId::TipAndFeePercent, qr_code.tip_and_fee_percent.as_str()),
        (FieldId::Nation, nation),
        (FieldId::MerchantName, qr_code.merchant_name()),
        (FieldId::City, qr_code.city.as_str()),
        (FieldId::ZipCode, qr_code.zip_code.as_str()),
    ];
    for (field, value) in simple_fields {
        content += &combine_field_data(field.tag(), value)?;
    }

    content += &encode_additional_data(&qr_code.additional_data)?;

    content += FieldId::Crc.tag();
    content += CRC_LENGTH;
    let crc = make_crc16(&content);
    content += &crc;

    Ok(content)
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// Provider block: GUID, scheme data and service, wrapped under the provider tag
fn encode_provider(qr_code: &QrCode) -> Result<String, QrError> {
    let provider = &qr_code.provider;
    let data = provider_data(qr_code)?;

    encode_block(
        &provider.field_id,
        &[
            (ProviderFieldId::Guid.tag(), provider.guid.as_str()),
            (ProviderFieldId::Data.tag(), data.as_str()),
            (ProviderFieldId::Service.tag(), provider.service.as_str()),
        ],
    )
}

/// Payload of the provider's data sub-field, laid out per scheme
fn provider_data(qr_code: &QrCode) -> Result<String, QrError> {
    let guid = &qr_code.provider.guid;

    match qr_code.scheme() {
        Scheme::VietQr => {
            let consumer = qr_code
                .consumer
                .as_ref()
                .ok_or_else(|| QrError::missing_consumer(guid))?;
            let bank_bin = combine_field_data(ConsumerFieldId::BankBin.tag(), &consumer.bank_bin)?;
            let bank_number =
                combine_field_data(ConsumerFieldId::BankNumber.tag(), &consumer.bank_number)?;
            Ok(bank_bin + &bank_number)
        }
        Scheme::VnPay => qr_code
            .merchant
            .as_ref()
            .map(|merchant| merchant.id.clone())
            .ok_or_else(|| QrError::missing_merchant(guid)),
        Scheme::Unknown => Err(QrError::unknown_provider(guid)),
    }
}

fn encode_additional_data(additional_data: &AdditionalData) -> Result<String, QrError> {
    let fields: Vec<(&str, &str)> = AdditionalDataId::ALL
        .into_iter()
        .map(|id| (id.tag(), additional_data.field(id)))
        .collect();

    encode_block(FieldId::AdditionalData.tag(), &fields)
}
