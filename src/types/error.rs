//! Error types for the VietQR / VNPay payload engine
//!
//! This module defines all error types that can occur while building, serializing
//! or decoding a payment payload, plus the I/O and CSV failures of the batch layer.
//!
//! # Error Categories
//!
//! - **Encoding Errors**: oversize values, scheme/record mismatches
//! - **Decoding Errors**: truncated buffers, non-numeric lengths, bad checksums
//! - **Batch Errors**: file I/O, CSV parsing, invalid request rows
//!
//! Every variant is recoverable: callers can always retry with corrected input.

use thiserror::Error;

/// Main error type for the payload engine
///
/// Each variant carries enough context to tell the caller which field or
/// which part of the payload was at fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// A field is present but structurally unusable
    ///
    /// Encoding never raises this: a bad tag or an empty value is silently
    /// omitted. The decoder uses it for mandatory fields that are missing or
    /// malformed.
    #[error("Malformed field '{tag}': {reason}")]
    MalformedField {
        /// Tag of the offending field
        tag: String,
        /// What is wrong with it
        reason: String,
    },

    /// Value does not fit the two-digit length prefix
    #[error("Field '{tag}' value is {length} characters long, maximum is 99")]
    FieldTooLarge {
        /// Tag of the oversize field
        tag: String,
        /// Actual value length in characters
        length: usize,
    },

    /// Provider GUID and record contents do not agree
    ///
    /// Raised for an unknown provider GUID, or when the sub-record the scheme
    /// needs (Merchant for VNPay, Consumer for VietQR) is absent.
    #[error("Scheme mismatch for provider '{guid}': {reason}")]
    SchemeMismatch {
        /// Provider GUID of the record
        guid: String,
        /// Description of the mismatch
        reason: String,
    },

    /// Buffer is shorter than the declared field
    #[error("Truncated field: needed {needed} characters, {available} available")]
    DecodeTruncated {
        /// Characters required to read the field
        needed: usize,
        /// Characters left in the buffer
        available: usize,
    },

    /// Length prefix is not two decimal digits
    #[error("Invalid length prefix '{raw}'")]
    InvalidLength {
        /// The raw length characters
        raw: String,
    },

    /// Payload does not end with a `6304XXXX` checksum field
    #[error("Missing checksum field (tag 63)")]
    MissingChecksum,

    /// Checksum field does not match the payload contents
    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Checksum computed over the payload
        expected: String,
        /// Checksum found in the payload
        actual: String,
    },

    /// A payment request row could not be turned into a request
    #[error("Invalid payment request{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidRecord {
        /// Line number where the row was read (if available)
        line: Option<u64>,
        /// Description of the problem
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Csv {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for QrError {
    fn from(error: std::io::Error) -> Self {
        QrError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for QrError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        QrError::Csv {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for QrError {
    fn from(error: csv_async::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        QrError::Csv {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl QrError {
    /// Create a MalformedField error
    pub fn malformed_field(tag: &str, reason: &str) -> Self {
        QrError::MalformedField {
            tag: tag.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a FieldTooLarge error
    pub fn field_too_large(tag: &str, length: usize) -> Self {
        QrError::FieldTooLarge {
            tag: tag.to_string(),
            length,
        }
    }

    /// Create a SchemeMismatch error for a GUID no scheme recognises
    pub fn unknown_provider(guid: &str) -> Self {
        QrError::SchemeMismatch {
            guid: guid.to_string(),
            reason: "unknown provider GUID".to_string(),
        }
    }

    /// Create a SchemeMismatch error for a VNPay record without merchant
    pub fn missing_merchant(guid: &str) -> Self {
        QrError::SchemeMismatch {
            guid: guid.to_string(),
            reason: "VNPay record has no merchant".to_string(),
        }
    }

    /// Create a SchemeMismatch error for a VietQR record without consumer
    pub fn missing_consumer(guid: &str) -> Self {
        QrError::SchemeMismatch {
            guid: guid.to_string(),
            reason: "VietQR record has no consumer".to_string(),
        }
    }

    /// Create a SchemeMismatch error for a payload without provider block
    pub fn missing_provider() -> Self {
        QrError::SchemeMismatch {
            guid: String::new(),
            reason: "payload has no merchant account information".to_string(),
        }
    }

    /// Create a DecodeTruncated error
    pub fn decode_truncated(needed: usize, available: usize) -> Self {
        QrError::DecodeTruncated { needed, available }
    }

    /// Create an InvalidLength error
    pub fn invalid_length(raw: &str) -> Self {
        QrError::InvalidLength {
            raw: raw.to_string(),
        }
    }

    /// Create a ChecksumMismatch error
    pub fn checksum_mismatch(expected: &str, actual: &str) -> Self {
        QrError::ChecksumMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an InvalidRecord error
    pub fn invalid_record(line: Option<u64>, message: &str) -> Self {
        QrError::InvalidRecord {
            line,
            message: message.to_string(),
        }
    }

    /// Create an Io error for a file that could not be opened
    pub fn open_failed(path: &std::path::Path, error: std::io::Error) -> Self {
        QrError::Io {
            message: format!("Failed to open file '{}': {}", path.display(), error),
        }
    }

    /// Attach a line number to a row error that does not carry one yet
    ///
    /// Only `InvalidRecord` and `Csv` have a line; other variants are
    /// returned unchanged.
    pub fn at_line(self, line: Option<u64>) -> Self {
        match self {
            QrError::InvalidRecord {
                line: None,
                message,
            } => QrError::InvalidRecord { line, message },
            QrError::Csv {
                line: None,
                message,
            } => QrError::Csv { line, message },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::malformed_field(
        QrError::MalformedField { tag: "00".to_string(), reason: "missing".to_string() },
        "Malformed field '00': missing"
    )]
    #[case::field_too_large(
        QrError::FieldTooLarge { tag: "62".to_string(), length: 120 },
        "Field '62' value is 120 characters long, maximum is 99"
    )]
    #[case::scheme_mismatch(
        QrError::SchemeMismatch { guid: "A000000775".to_string(), reason: "VNPay record has no merchant".to_string() },
        "Scheme mismatch for provider 'A000000775': VNPay record has no merchant"
    )]
    #[case::decode_truncated(
        QrError::DecodeTruncated { needed: 14, available: 9 },
        "Truncated field: needed 14 characters, 9 available"
    )]
    #[case::invalid_length(
        QrError::InvalidLength { raw: "x1".to_string() },
        "Invalid length prefix 'x1'"
    )]
    #[case::missing_checksum(QrError::MissingChecksum, "Missing checksum field (tag 63)")]
    #[case::checksum_mismatch(
        QrError::ChecksumMismatch { expected: "F197".to_string(), actual: "0000".to_string() },
        "Checksum mismatch: expected F197, got 0000"
    )]
    #[case::invalid_record_with_line(
        QrError::InvalidRecord { line: Some(3), message: "unknown scheme".to_string() },
        "Invalid payment request at line 3: unknown scheme"
    )]
    #[case::csv_without_line(
        QrError::Csv { line: None, message: "bad row".to_string() },
        "CSV parse error: bad row"
    )]
    #[case::io_error(
        QrError::Io { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    fn test_error_display(#[case] error: QrError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::field_too_large(
        QrError::field_too_large("59", 100),
        QrError::FieldTooLarge { tag: "59".to_string(), length: 100 }
    )]
    #[case::missing_merchant(
        QrError::missing_merchant("A000000775"),
        QrError::SchemeMismatch { guid: "A000000775".to_string(), reason: "VNPay record has no merchant".to_string() }
    )]
    #[case::missing_consumer(
        QrError::missing_consumer("A000000727"),
        QrError::SchemeMismatch { guid: "A000000727".to_string(), reason: "VietQR record has no consumer".to_string() }
    )]
    #[case::unknown_provider(
        QrError::unknown_provider("B000000001"),
        QrError::SchemeMismatch { guid: "B000000001".to_string(), reason: "unknown provider GUID".to_string() }
    )]
    #[case::decode_truncated(
        QrError::decode_truncated(8, 3),
        QrError::DecodeTruncated { needed: 8, available: 3 }
    )]
    fn test_helper_functions(#[case] result: QrError, #[case] expected: QrError) {
        assert_eq!(result, expected);
    }

    #[rstest]
    #[case::invalid_record_gets_line(
        QrError::invalid_record(None, "bad"),
        Some(4),
        QrError::InvalidRecord { line: Some(4), message: "bad".to_string() }
    )]
    #[case::csv_gets_line(
        QrError::Csv { line: None, message: "bad".to_string() },
        Some(7),
        QrError::Csv { line: Some(7), message: "bad".to_string() }
    )]
    #[case::existing_line_is_kept(
        QrError::invalid_record(Some(2), "bad"),
        Some(9),
        QrError::InvalidRecord { line: Some(2), message: "bad".to_string() }
    )]
    #[case::other_variants_unchanged(
        QrError::MissingChecksum,
        Some(3),
        QrError::MissingChecksum
    )]
    fn test_at_line(
        #[case] error: QrError,
        #[case] line: Option<u64>,
        #[case] expected: QrError,
    ) {
        assert_eq!(error.at_line(line), expected);
    }

    #[test]
    fn test_open_failed() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let error = QrError::open_failed(std::path::Path::new("missing.csv"), io_error);
        assert_eq!(
            error.to_string(),
            "I/O error: Failed to open file 'missing.csv': not found"
        );
    }

    #[test]
    fn test_csv_error_conversion_keeps_line() {
        let mut reader = csv::ReaderBuilder::new().from_reader("a,b\n1,2\n3\n".as_bytes());
        let csv_error = reader.records().find_map(Result::err).unwrap();

        let error: QrError = csv_error.into();
        assert!(matches!(error, QrError::Csv { line: Some(3), .. }));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: QrError = io_error.into();
        assert!(matches!(error, QrError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
