//! Boolean encoding (`b`, `b[n]`, `B`).
//!
//! Two representations:
//! 1. Single boolean: one byte, `0x00` = false, `0x01` = true (any non-zero
//!    byte decodes as true)
//! 2. Bit array: `ceil(n/8)` bytes, element `i` stored in bit `i % 8` of
//!    byte `i / 8` (LSB first); unused high bits of the last byte are zero

use crate::bytestream::{ByteReader, ByteWriter};
use crate::Result;

/// Encodes a single boolean as one byte.
pub fn encode(writer: &mut ByteWriter, value: bool) {
    writer.write_byte(u8::from(value));
}

/// Decodes a single boolean from one byte.
pub fn decode(reader: &mut ByteReader) -> Result<bool> {
    Ok(reader.read_byte()? != 0)
}

/// Bytes needed for a bit array of `count` elements.
#[inline]
pub fn packed_len(count: usize) -> usize {
    count.div_ceil(8)
}

/// Encodes exactly `count` booleans as an LSB-first bit array.
///
/// Elements beyond `values.len()` are written as false; elements beyond
/// `count` are ignored.
pub fn encode_bits(writer: &mut ByteWriter, values: &[bool], count: usize) {
    let used = &values[..values.len().min(count)];
    let mut chunks = used.chunks(8);
    for _ in 0..packed_len(count) {
        let byte = chunks.next().map_or(0, |chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (bit, &set)| acc | (u8::from(set) << bit))
        });
        writer.write_byte(byte);
    }
}

/// Decodes `count` booleans from an LSB-first bit array.
///
/// Unused high bits of the last byte are ignored.
pub fn decode_bits(reader: &mut ByteReader, count: usize) -> Result<Vec<bool>> {
    let bytes = reader.read_bytes(packed_len(count))?;
    Ok((0..count).map(|i| bytes[i / 8] & (1 << (i % 8)) != 0).collect())
}
