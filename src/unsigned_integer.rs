//! Unsigned LEB128 varint encoding (`V`, LEB128 length prefixes).
//!
//! Each octet has a continuation bit (MSB) and 7 data bits. The least
//! significant group is written first. The last octet has continuation = 0,
//! and the encoding is always minimal.

use crate::bytestream::{ByteReader, ByteWriter};
use crate::{Error, Result};

/// Longest encoding of a `u64`.
pub const MAX_LEN: usize = 10;

/// Encodes a `u64` as an unsigned LEB128 varint.
#[inline]
pub fn encode(writer: &mut ByteWriter, value: u64) {
    let mut rest = value;
    while rest >= 0x80 {
        writer.write_byte((rest as u8) | 0x80);
        rest >>= 7;
    }
    writer.write_byte(rest as u8);
}

/// Decodes an unsigned LEB128 varint.
///
/// Returns [`Error::VarintOverflow`] when the value does not fit in 64 bits.
#[inline]
pub fn decode(reader: &mut ByteReader) -> Result<u64> {
    let start = reader.position();
    let mut value = 0u64;
    for shift in (0..64).step_by(7) {
        let byte = reader.read_byte()?;
        let payload = u64::from(byte & 0x7F);
        // 10. Byte: nur Bit 0 passt noch in 64 Bit, keine Fortsetzung erlaubt
        if shift == 63 && (payload > 1 || byte & 0x80 != 0) {
            break;
        }
        value |= payload << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(Error::VarintOverflow { offset: start })
}

/// Number of bytes [`encode`] writes for `value`.
#[inline]
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}
