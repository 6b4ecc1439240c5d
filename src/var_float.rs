//! Tagged variable-width float encoding (`g`, `n`).
//!
//! A leading tag byte selects the payload, always little-endian:
//!
//! | tag | payload | total |
//! |-----|---------|-------|
//! | 0   | none, value is zero | 1 |
//! | 1   | binary16 | 3 |
//! | 2   | binary32 | 5 |
//! | 3   | binary64 | 9 |
//!
//! The encoder picks the smallest tag whose decoding compares equal to the
//! input. Both zeros therefore collapse into tag 0 and decode as +0.0, NaN
//! never compares equal and is always written as binary64.

use crate::bytestream::{ByteReader, ByteWriter};
use crate::float::{f16_bits_to_f64, f64_to_f16_bits};
use crate::{Error, Result};

const TAG_ZERO: u8 = 0;
const TAG_HALF: u8 = 1;
const TAG_SINGLE: u8 = 2;
const TAG_DOUBLE: u8 = 3;

/// The narrowest representation that compares equal to a value.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Repr {
    Zero,
    Half(u16),
    Single(f32),
    Double(f64),
}

fn classify(value: f64) -> Repr {
    if value == 0.0 {
        return Repr::Zero;
    }
    let half = f64_to_f16_bits(value);
    if f16_bits_to_f64(half) == value {
        return Repr::Half(half);
    }
    let single = value as f32;
    if f64::from(single) == value {
        return Repr::Single(single);
    }
    Repr::Double(value)
}

/// Encodes `value` with the smallest tag that compares equal.
pub fn encode(writer: &mut ByteWriter, value: f64) {
    match classify(value) {
        Repr::Zero => writer.write_byte(TAG_ZERO),
        Repr::Half(bits) => {
            writer.write_byte(TAG_HALF);
            writer.write_bytes(&bits.to_le_bytes());
        }
        Repr::Single(v) => {
            writer.write_byte(TAG_SINGLE);
            writer.write_bytes(&v.to_le_bytes());
        }
        Repr::Double(v) => {
            writer.write_byte(TAG_DOUBLE);
            writer.write_bytes(&v.to_le_bytes());
        }
    }
}

/// Decodes a tagged float.
///
/// Returns [`Error::InvalidVarFloatTag`] for tags above 3.
pub fn decode(reader: &mut ByteReader) -> Result<f64> {
    let offset = reader.position();
    match reader.read_byte()? {
        TAG_ZERO => Ok(0.0),
        TAG_HALF => Ok(f16_bits_to_f64(u16::from_le_bytes(reader.read_array()?))),
        TAG_SINGLE => Ok(f64::from(f32::from_le_bytes(reader.read_array()?))),
        TAG_DOUBLE => Ok(f64::from_le_bytes(reader.read_array()?)),
        tag => Err(Error::InvalidVarFloatTag { tag, offset }),
    }
}

/// Number of bytes [`encode`] writes for `value`.
pub fn encoded_len(value: f64) -> usize {
    match classify(value) {
        Repr::Zero => 1,
        Repr::Half(_) => 3,
        Repr::Single(_) => 5,
        Repr::Double(_) => 9,
    }
}
