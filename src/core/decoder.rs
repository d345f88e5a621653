//! Payload decoder
//!
//! Inverse of the builder: verifies the trailing checksum, then walks the
//! payload with the TLV codec and rebuilds a [`QrCode`] record. Nested blocks
//! (provider, VietQR consumer, additional data) are walked with the same codec.
//!
//! Tags `02` to `51` are merchant account blocks; the first one found becomes
//! the record's provider. Tags the record has no place for are skipped.

use crate::core::crc::make_crc16;
use crate::core::fields::{AdditionalDataId, ConsumerFieldId, FieldId, ProviderFieldId, Scheme};
use crate::core::tlv;
use crate::types::{AdditionalData, Consumer, Merchant, Provider, QrCode, QrError};
use tracing::debug;

/// Header of the checksum field, which closes every payload
const CRC_HEADER: &str = "6304";
const CRC_DIGITS: usize = 4;

/// Verify the trailing `6304XXXX` checksum of a payload
///
/// The hex digits are compared case-insensitively.
///
/// # Errors
///
/// - `MissingChecksum` if the payload does not end with a checksum field
/// - `ChecksumMismatch` if the checksum does not match the contents
pub fn verify_crc(payload: &str) -> Result<(), QrError> {
    let len = payload.len();
    if len < CRC_HEADER.len() + CRC_DIGITS || !payload.is_char_boundary(len - CRC_DIGITS) {
        return Err(QrError::MissingChecksum);
    }

    let (body, crc) = payload.split_at(len - CRC_DIGITS);
    if !body.ends_with(CRC_HEADER) {
        return Err(QrError::MissingChecksum);
    }

    let expected = make_crc16(body);
    if !crc.eq_ignore_ascii_case(&expected) {
        return Err(QrError::checksum_mismatch(&expected, crc));
    }

    Ok(())
}

/// Decode a payload into a record
///
/// The returned record has `is_valid` set and carries the version and
/// checksum read from the payload. Currency and nation hold whatever the
/// payload says, defaults included.
///
/// # Errors
///
/// - checksum errors from [`verify_crc`]
/// - `DecodeTruncated` / `InvalidLength` for a malformed field at any depth
/// - `MalformedField` if the version field is missing
/// - `SchemeMismatch` if no merchant account block is present
pub fn parse_qr(payload: &str) -> Result<QrCode, QrError> {
    verify_crc(payload)?;

    let mut qr_code = QrCode::default();
    let mut provider_found = false;
    let mut merchant_id = None;
    let mut merchant_name = None;

    for field in tlv::fields(payload) {
        let (tag, value) = field?;

        if is_merchant_account_tag(tag) {
            if provider_found {
                debug!(tag, "Skipping additional merchant account block");
                continue;
            }
            let (provider, data) = decode_provider(tag, value)?;
            match data {
                ProviderData::Consumer(consumer) => qr_code.consumer = Some(consumer),
                ProviderData::MerchantId(id) => merchant_id = Some(id),
                ProviderData::Opaque => {}
            }
            qr_code.provider = provider;
            provider_found = true;
            continue;
        }

        match FieldId::from_tag(tag) {
            Some(FieldId::Version) => qr_code.version = value.to_string(),
            Some(FieldId::InitMethod) => qr_code.init_method = value.to_string(),
            Some(FieldId::Category) => qr_code.category = value.to_string(),
            Some(FieldId::Currency) => qr_code.currency = value.to_string(),
            Some(FieldId::Amount) => qr_code.amount = value.to_string(),
            Some(FieldId::TipAndFeeType) => qr_code.tip_and_fee_type = value.to_string(),
            Some(FieldId::TipAndFeeAmount) => qr_code.tip_and_fee_amount = value.to_string(),
            Some(FieldId::TipAndFeePercent) => qr_code.tip_and_fee_percent = value.to_string(),
            Some(FieldId::Nation) => qr_code.nation = value.to_string(),
            Some(FieldId::MerchantName) => merchant_name = Some(value),
            Some(FieldId::City) => qr_code.city = value.to_string(),
            Some(FieldId::ZipCode) => qr_code.zip_code = value.to_string(),
            Some(FieldId::AdditionalData) => {
                qr_code.additional_data = decode_additional_data(value)?
            }
            Some(FieldId::Crc) => qr_code.crc = value.to_string(),
            Some(FieldId::VnPayQr) | Some(FieldId::VietQr) | None => {
                debug!(tag, "Skipping unsupported field")
            }
        }
    }

    if !provider_found {
        return Err(QrError::missing_provider());
    }
    if qr_code.version.is_empty() {
        return Err(QrError::malformed_field(
            FieldId::Version.tag(),
            "missing payload format version",
        ));
    }

    if merchant_id.is_some() || merchant_name.is_some() {
        qr_code.merchant = Some(Merchant {
            id: merchant_id.unwrap_or_default().to_string(),
            name: merchant_name.unwrap_or_default().to_string(),
        });
    }
    qr_code.is_valid = true;

    Ok(qr_code)
}

/// Scheme-specific content of a provider's data sub-field
enum ProviderData<'a> {
    Consumer(Consumer),
    MerchantId(&'a str),
    Opaque,
}

fn is_merchant_account_tag(tag: &str) -> bool {
    tag.bytes().all(|b| b.is_ascii_digit()) && matches!(tag.parse::<u8>(), Ok(2..=51))
}

fn decode_provider<'a>(tag: &str, value: &'a str) -> Result<(Provider, ProviderData<'a>), QrError> {
    let mut provider = Provider {
        field_id: tag.to_string(),
        ..Default::default()
    };
    let mut data = "";

    for field in tlv::fields(value) {
        let (sub_tag, sub_value) = field?;
        match ProviderFieldId::from_tag(sub_tag) {
            Some(ProviderFieldId::Guid) => provider.guid = sub_value.to_string(),
            Some(ProviderFieldId::Data) => data = sub_value,
            Some(ProviderFieldId::Service) => provider.service = sub_value.to_string(),
            None => debug!(tag, sub_tag, "Skipping unsupported provider sub-field"),
        }
    }

    let scheme = provider.scheme();
    provider.name = scheme.name().to_string();

    let data = match scheme {
        Scheme::VietQr => ProviderData::Consumer(decode_consumer(data)?),
        Scheme::VnPay => ProviderData::MerchantId(data),
        Scheme::Unknown => ProviderData::Opaque,
    };

    Ok((provider, data))
}

fn decode_consumer(data: &str) -> Result<Consumer, QrError> {
    let mut consumer = Consumer::default();

    for field in tlv::fields(data) {
        let (tag, value) = field?;
        match ConsumerFieldId::from_tag(tag) {
            Some(ConsumerFieldId::BankBin) => consumer.bank_bin = value.to_string(),
            Some(ConsumerFieldId::BankNumber) => consumer.bank_number = value.to_string(),
            None => debug!(tag, "Skipping unsupported consumer sub-field"),
        }
    }

    Ok(consumer)
}

fn decode_additional_data(value: &str) -> Result<AdditionalData, QrError> {
    let mut additional_data = AdditionalData::default();

    for field in tlv::fields(value) {
        let (tag, sub_value) = field?;
        match AdditionalDataId::from_tag(tag) {
            Some(id) => *additional_data.field_mut(id) = sub_value.to_string(),
            None => debug!(tag, "Skipping unsupported additional data sub-field"),
        }
    }

    Ok(additional_data)
}
