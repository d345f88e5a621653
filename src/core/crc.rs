//! CRC-16 checksum engine
//!
//! EMV-style QR payloads end with a CRC-16/CCITT-FALSE checksum over everything
//! before it, including the `6304` header of the checksum field itself:
//!
//! - polynomial `0x1021`
//! - initial value `0xFFFF`
//! - no input/output reflection, no final XOR
//!
//! The CRC catalogue lists this variant as CRC-16/IBM-3740. Scanners reject
//! payloads computed with any other variant.

use crc::{Crc, CRC_16_IBM_3740};

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Checksum of a payload string as 4 uppercase hex digits
///
/// The checksum is taken over the UTF-8 bytes of `content`.
pub fn make_crc16(content: &str) -> String {
    format!("{:04X}", CRC16.checksum(content.as_bytes()))
}
