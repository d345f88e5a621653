//! Core payload engine module
//!
//! This module contains the payload encoding and decoding components:
//! - `crc` - CRC-16/CCITT-FALSE checksum
//! - `fields` - Constant tag registries and scheme constants
//! - `tlv` - Tag-length-value codec
//! - `config` - Serializer defaults
//! - `builder` - Scheme factories and payload serialization
//! - `decoder` - Payload verification and decoding
//! - `encoder` - Payment request encoding
//! - `batch_processor` - Parallel, order-preserving batch encoding

pub mod batch_processor;
pub mod builder;
pub mod config;
pub mod crc;
pub mod decoder;
pub mod encoder;
pub mod fields;
pub mod tlv;

pub use batch_processor::{BatchProcessor, EncodingResult};
pub use builder::{create_vietqr_data, create_vnpayar_data, qr_to_str};
pub use config::PayloadConfig;
pub use crc::make_crc16;
pub use decoder::{parse_qr, verify_crc};
pub use encoder::PayloadEncoder;
pub use fields::{
    AdditionalDataId, ConsumerFieldId, FieldId, ProviderFieldId, Scheme, VietQrService,
};
pub use tlv::{combine_field_data, encode_block, slide_field_data};
