//! Field registries
//!
//! Constant tag tables for the payload grammar. Each registry is a `Copy` enum
//! mapping a semantic field to its two-character tag:
//!
//! - [`FieldId`] - top-level fields
//! - [`ProviderFieldId`] - sub-fields of the provider block
//! - [`ConsumerFieldId`] - sub-fields of the VietQR provider data
//! - [`AdditionalDataId`] - sub-fields of the additional data block (tag `62`)
//!
//! [`Scheme`] and [`VietQrService`] hold the provider constants of the two
//! supported schemes.

/// Top-level field tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Version,
    InitMethod,
    VnPayQr,
    VietQr,
    Category,
    Currency,
    Amount,
    TipAndFeeType,
    TipAndFeeAmount,
    TipAndFeePercent,
    Nation,
    MerchantName,
    City,
    ZipCode,
    AdditionalData,
    Crc,
}

impl FieldId {
    /// Every top-level field, in wire order
    pub const ALL: [FieldId; 16] = [
        FieldId::Version,
        FieldId::InitMethod,
        FieldId::VnPayQr,
        FieldId::VietQr,
        FieldId::Category,
        FieldId::Currency,
        FieldId::Amount,
        FieldId::TipAndFeeType,
        FieldId::TipAndFeeAmount,
        FieldId::TipAndFeePercent,
        FieldId::Nation,
        FieldId::MerchantName,
        FieldId::City,
        FieldId::ZipCode,
        FieldId::AdditionalData,
        FieldId::Crc,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            FieldId::Version => "00",
            FieldId::InitMethod => "01",
            FieldId::VnPayQr => "26",
            FieldId::VietQr => "38",
            FieldId::Category => "52",
            FieldId::Currency => "53",
            FieldId::Amount => "54",
            FieldId::TipAndFeeType => "55",
            FieldId::TipAndFeeAmount => "56",
            FieldId::TipAndFeePercent => "57",
            FieldId::Nation => "58",
            FieldId::MerchantName => "59",
            FieldId::City => "60",
            FieldId::ZipCode => "61",
            FieldId::AdditionalData => "62",
            FieldId::Crc => "63",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.tag() == tag)
    }
}

/// Sub-field tags of the provider block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderFieldId {
    Guid,
    Data,
    Service,
}

impl ProviderFieldId {
    pub const fn tag(self) -> &'static str {
        match self {
            ProviderFieldId::Guid => "00",
            ProviderFieldId::Data => "01",
            ProviderFieldId::Service => "02",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        [Self::Guid, Self::Data, Self::Service]
            .into_iter()
            .find(|field| field.tag() == tag)
    }
}

/// Sub-field tags of the VietQR provider data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsumerFieldId {
    BankBin,
    BankNumber,
}

impl ConsumerFieldId {
    pub const fn tag(self) -> &'static str {
        match self {
            ConsumerFieldId::BankBin => "00",
            ConsumerFieldId::BankNumber => "01",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        [Self::BankBin, Self::BankNumber]
            .into_iter()
            .find(|field| field.tag() == tag)
    }
}

/// Sub-field tags of the additional data block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdditionalDataId {
    BillNumber,
    MobileNumber,
    StoreLabel,
    LoyaltyNumber,
    ReferenceLabel,
    CustomerLabel,
    TerminalLabel,
    PurposeOfTransaction,
    AdditionalConsumerDataRequest,
}

impl AdditionalDataId {
    /// Every sub-field, in wire order
    pub const ALL: [AdditionalDataId; 9] = [
        AdditionalDataId::BillNumber,
        AdditionalDataId::MobileNumber,
        AdditionalDataId::StoreLabel,
        AdditionalDataId::LoyaltyNumber,
        AdditionalDataId::ReferenceLabel,
        AdditionalDataId::CustomerLabel,
        AdditionalDataId::TerminalLabel,
        AdditionalDataId::PurposeOfTransaction,
        AdditionalDataId::AdditionalConsumerDataRequest,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            AdditionalDataId::BillNumber => "01",
            AdditionalDataId::MobileNumber => "02",
            AdditionalDataId::StoreLabel => "03",
            AdditionalDataId::LoyaltyNumber => "04",
            AdditionalDataId::ReferenceLabel => "05",
            AdditionalDataId::CustomerLabel => "06",
            AdditionalDataId::TerminalLabel => "07",
            AdditionalDataId::PurposeOfTransaction => "08",
            AdditionalDataId::AdditionalConsumerDataRequest => "09",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.tag() == tag)
    }
}

/// VietQR service codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VietQrService {
    /// Napas 247 transfer to an account number
    #[default]
    FastTransferByAccountNumber,
    /// Napas 247 transfer to a card number
    FastTransferByCardNumber,
}

impl VietQrService {
    pub const fn code(self) -> &'static str {
        match self {
            VietQrService::FastTransferByAccountNumber => "QRIBFTTA",
            VietQrService::FastTransferByCardNumber => "QRIBFTTC",
        }
    }
}

/// Payment scheme, selected by the provider GUID
///
/// The GUID decides how the provider's nested data field is laid out:
/// VietQR nests a bank BIN and account number, VNPay carries the merchant id
/// as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    VietQr,
    VnPay,
    Unknown,
}

impl Scheme {
    pub const VIETQR_GUID: &'static str = "A000000727";
    pub const VNPAY_GUID: &'static str = "A000000775";

    pub fn from_guid(guid: &str) -> Self {
        match guid {
            Self::VIETQR_GUID => Scheme::VietQr,
            Self::VNPAY_GUID => Scheme::VnPay,
            _ => Scheme::Unknown,
        }
    }

    pub const fn guid(self) -> Option<&'static str> {
        match self {
            Scheme::VietQr => Some(Self::VIETQR_GUID),
            Scheme::VnPay => Some(Self::VNPAY_GUID),
            Scheme::Unknown => None,
        }
    }

    /// Top-level field the scheme's provider block is wrapped in
    pub const fn field_id(self) -> Option<FieldId> {
        match self {
            Scheme::VietQr => Some(FieldId::VietQr),
            Scheme::VnPay => Some(FieldId::VnPayQr),
            Scheme::Unknown => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Scheme::VietQr => "VIETQR",
            Scheme::VnPay => "VNPAY",
            Scheme::Unknown => "",
        }
    }
}
