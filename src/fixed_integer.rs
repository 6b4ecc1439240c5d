//! Fixed-width integer encoding (`i[n]`, `I[n]`, fixed-width length prefixes).
//!
//! A field is 1 to 8 bytes wide. Encoding writes the low `width` bytes of the
//! two's-complement value in the selected byte order; higher bytes are
//! dropped. Decoding zero-extends, or sign-extends for signed fields.

use crate::bytestream::{ByteReader, ByteWriter};
use crate::endian::Endianness;
use crate::Result;

/// Largest supported width in bytes.
pub const MAX_WIDTH: usize = 8;

/// Encodes the low `width` bytes of `value`.
#[inline]
pub fn encode(writer: &mut ByteWriter, value: u64, width: usize, order: Endianness) {
    debug_assert!((1..=MAX_WIDTH).contains(&width), "width must be 1..=8, got {width}");
    let le = value.to_le_bytes();
    if order.is_little() {
        writer.write_bytes(&le[..width]);
    } else {
        for &b in le[..width].iter().rev() {
            writer.write_byte(b);
        }
    }
}

/// Decodes a `width`-byte integer.
///
/// For `signed` fields narrower than 8 bytes the top bit of the field is
/// extended into the upper bits of the result.
#[inline]
pub fn decode(reader: &mut ByteReader, width: usize, order: Endianness, signed: bool) -> Result<i64> {
    Ok(extend(decode_unsigned(reader, width, order)?, width, signed))
}

/// Decodes a `width`-byte unsigned integer.
pub fn decode_unsigned(reader: &mut ByteReader, width: usize, order: Endianness) -> Result<u64> {
    debug_assert!((1..=MAX_WIDTH).contains(&width), "width must be 1..=8, got {width}");
    let bytes = reader.read_bytes(width)?;
    let mut le = [0u8; MAX_WIDTH];
    if order.is_little() {
        le[..width].copy_from_slice(bytes);
    } else {
        for (slot, &b) in le[..width].iter_mut().zip(bytes.iter().rev()) {
            *slot = b;
        }
    }
    Ok(u64::from_le_bytes(le))
}

/// Largest value representable in `width` bytes.
#[inline]
pub fn max_unsigned(width: usize) -> u64 {
    if width >= MAX_WIDTH {
        u64::MAX
    } else {
        (1u64 << (width * 8)) - 1
    }
}

fn extend(raw: u64, width: usize, signed: bool) -> i64 {
    if !signed || width >= MAX_WIDTH {
        return raw as i64;
    }
    let shift = 64 - width as u32 * 8;
    ((raw << shift) as i64) >> shift
}
