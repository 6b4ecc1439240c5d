//! UTF-8 string encoding (`z`, `s[n]`, `p`, `c[n]`).
//!
//! Strings are always written as UTF-8; lengths count bytes, not characters.
//!
//! - `z`: bytes followed by a single zero byte
//! - `s[n]` / `p`: fixed-width or LEB128 length prefix, then the bytes
//! - `c[n]`: exactly `n` bytes, zero-padded; decoding strips trailing zeros

use std::borrow::Cow;

use crate::bytestream::{ByteReader, ByteWriter};
use crate::endian::Endianness;
use crate::length_prefix::LengthPrefix;
use crate::options::{PackOptions, UnterminatedStrings, Utf8Policy};
use crate::{Error, Result};

/// Converts decoded bytes to a `String` according to `policy`.
///
/// `offset` is the absolute position of `bytes` in the input, used for the
/// error report.
pub fn from_utf8(bytes: &[u8], offset: usize, policy: Utf8Policy) -> Result<String> {
    match policy {
        Utf8Policy::Strict => std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| Error::InvalidUtf8 { offset: offset + e.valid_up_to() }),
        Utf8Policy::Lossy => Ok(match String::from_utf8_lossy(bytes) {
            Cow::Borrowed(s) => s.to_owned(),
            Cow::Owned(s) => s,
        }),
    }
}

/// Encodes a zero-terminated string.
pub fn encode_terminated(writer: &mut ByteWriter, value: &str) {
    writer.write_bytes(value.as_bytes());
    writer.write_byte(0);
}

/// Decodes a zero-terminated string.
///
/// Without a terminator the outcome depends on
/// [`PackOptions::unterminated_strings`].
pub fn decode_terminated(reader: &mut ByteReader, options: &PackOptions) -> Result<String> {
    let start = reader.position();
    let (bytes, terminated) = reader.read_until_zero();
    if !terminated && options.unterminated_strings() == UnterminatedStrings::Reject {
        return Err(Error::UnterminatedString { offset: start });
    }
    from_utf8(bytes, start, options.invalid_utf8())
}

/// Number of bytes [`encode_terminated`] writes.
pub fn terminated_len(value: &str) -> usize {
    value.len() + 1
}

/// Encodes a length-prefixed string.
pub fn encode_prefixed(
    writer: &mut ByteWriter,
    value: &str,
    prefix: LengthPrefix,
    order: Endianness,
) -> Result<()> {
    prefix.encode(writer, value.len(), order)?;
    writer.write_bytes(value.as_bytes());
    Ok(())
}

/// Decodes a length-prefixed string.
pub fn decode_prefixed(
    reader: &mut ByteReader,
    prefix: LengthPrefix,
    order: Endianness,
    policy: Utf8Policy,
) -> Result<String> {
    let len = prefix.decode(reader, order)?;
    let start = reader.position();
    from_utf8(reader.read_bytes(len)?, start, policy)
}

/// Encodes `value` into a fixed buffer of `size` bytes.
///
/// Longer strings are cut at the last character boundary that fits, so the
/// buffer never ends in a partial UTF-8 sequence.
pub fn encode_fixed(writer: &mut ByteWriter, value: &str, size: usize) {
    let bytes = truncate_to_boundary(value, size).as_bytes();
    writer.write_bytes(bytes);
    writer.write_zeros(size - bytes.len());
}

/// Decodes a fixed buffer of `size` bytes, dropping trailing zero bytes.
pub fn decode_fixed(reader: &mut ByteReader, size: usize, policy: Utf8Policy) -> Result<String> {
    let start = reader.position();
    let bytes = reader.read_bytes(size)?;
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    from_utf8(&bytes[..end], start, policy)
}

fn truncate_to_boundary(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}
