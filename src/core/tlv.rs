//! TLV codec
//!
//! Every payload field is `TAG LEN VALUE`: a two-character tag, the value length
//! as exactly two decimal digits, then the value. Lengths count characters, not
//! bytes, so the longest representable value is 99 characters.
//!
//! Nested blocks (provider, additional data) use the same grammar: their
//! sub-fields are encoded, concatenated and wrapped as the value of one outer
//! field with [`encode_block`].

use crate::types::QrError;

/// Longest value a two-digit length prefix can describe
pub const MAX_VALUE_LEN: usize = 99;

const TAG_LEN: usize = 2;
const LENGTH_LEN: usize = 2;
const HEADER_LEN: usize = TAG_LEN + LENGTH_LEN;

/// Encode one field as `tag + length + value`
///
/// An empty value, or a tag that is not exactly two characters, yields an empty
/// string: the field is omitted from the payload. This is how optional fields
/// disappear, not an error.
///
/// # Errors
///
/// Returns `FieldTooLarge` if the value is longer than 99 characters.
pub fn combine_field_data(tag: &str, value: &str) -> Result<String, QrError> {
    if tag.chars().count() != TAG_LEN || value.is_empty() {
        return Ok(String::new());
    }

    let length = value.chars().count();
    if length > MAX_VALUE_LEN {
        return Err(QrError::field_too_large(tag, length));
    }

    Ok(format!("{tag}{length:02}{value}"))
}

/// Encode sub-fields and wrap their concatenation as a single field
///
/// Empty sub-fields are omitted; if all of them are, the whole block is.
pub fn encode_block(tag: &str, fields: &[(&str, &str)]) -> Result<String, QrError> {
    let content = fields
        .iter()
        .map(|(sub_tag, value)| combine_field_data(sub_tag, value))
        .collect::<Result<String, QrError>>()?;

    combine_field_data(tag, &content)
}

/// Read one field from the front of a buffer
///
/// Returns `(tag, value, remainder)`; the remainder starts right after the
/// value and is what the next call should be given.
///
/// # Errors
///
/// - `DecodeTruncated` if the buffer ends before the header or the value does
/// - `InvalidLength` if the length prefix is not two decimal digits
pub fn slide_field_data(buffer: &str) -> Result<(&str, &str, &str), QrError> {
    let available = buffer.chars().count();
    let truncated = || QrError::decode_truncated(HEADER_LEN, available);

    let (tag, rest) = split_chars(buffer, TAG_LEN).ok_or_else(truncated)?;
    let (raw_length, rest) = split_chars(rest, LENGTH_LEN).ok_or_else(truncated)?;

    if !raw_length.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QrError::invalid_length(raw_length));
    }
    let length: usize = raw_length
        .parse()
        .map_err(|_| QrError::invalid_length(raw_length))?;

    let (value, remainder) = split_chars(rest, length)
        .ok_or_else(|| QrError::decode_truncated(HEADER_LEN + length, available))?;

    Ok((tag, value, remainder))
}

/// Iterate over the fields of a buffer
///
/// Yields `(tag, value)` pairs until the buffer is exhausted. After the first
/// error the iterator is fused.
pub fn fields(buffer: &str) -> TlvFields<'_> {
    TlvFields { remaining: buffer }
}

/// Iterator returned by [`fields`]
#[derive(Debug, Clone)]
pub struct TlvFields<'a> {
    remaining: &'a str,
}

impl<'a> Iterator for TlvFields<'a> {
    type Item = Result<(&'a str, &'a str), QrError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        match slide_field_data(self.remaining) {
            Ok((tag, value, rest)) => {
                self.remaining = rest;
                Some(Ok((tag, value)))
            }
            Err(e) => {
                self.remaining = "";
                Some(Err(e))
            }
        }
    }
}

/// Split after `count` characters, or None if the string is shorter
fn split_chars(s: &str, count: usize) -> Option<(&str, &str)> {
    let index = s
        .char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(s.len()))
        .nth(count)?;
    Some(s.split_at(index))
}
