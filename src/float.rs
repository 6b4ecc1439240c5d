//! IEEE-754 float encoding (`f16`, `f32`, `f64`).
//!
//! All floating values are carried as `f64`. Single precision uses Rust's
//! `as` conversion (round to nearest even). Half precision is converted
//! directly from the `f64` bit pattern so that rounding happens only once:
//!
//! - normals round to nearest, ties to even; overflow becomes ±infinity
//! - values below the normal range become half subnormals (or ±0)
//! - ±infinity stays infinite, NaN keeps the upper payload bits
//!
//! Decoding is exact: every half value has an exact `f64` representation.

use crate::bytestream::{ByteReader, ByteWriter};
use crate::endian::Endianness;
use crate::Result;

/// Width of a fixed float field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    Half,
    Single,
    Double,
}

impl FloatWidth {
    /// Maps a bit count to a width, `None` for anything but 16/32/64.
    pub fn from_bits(bits: usize) -> Option<Self> {
        match bits {
            16 => Some(Self::Half),
            32 => Some(Self::Single),
            64 => Some(Self::Double),
            _ => None,
        }
    }

    /// Encoded size in bytes.
    pub fn bytes(self) -> usize {
        match self {
            Self::Half => 2,
            Self::Single => 4,
            Self::Double => 8,
        }
    }
}

/// Encodes `value` with the given width and byte order.
pub fn encode(writer: &mut ByteWriter, value: f64, width: FloatWidth, order: Endianness) {
    let little = order.is_little();
    match width {
        FloatWidth::Half => {
            let bits = f64_to_f16_bits(value);
            writer.write_bytes(&if little { bits.to_le_bytes() } else { bits.to_be_bytes() });
        }
        FloatWidth::Single => {
            let v = value as f32;
            writer.write_bytes(&if little { v.to_le_bytes() } else { v.to_be_bytes() });
        }
        FloatWidth::Double => {
            writer.write_bytes(&if little { value.to_le_bytes() } else { value.to_be_bytes() });
        }
    }
}

/// Decodes a float of the given width and byte order.
pub fn decode(reader: &mut ByteReader, width: FloatWidth, order: Endianness) -> Result<f64> {
    let little = order.is_little();
    Ok(match width {
        FloatWidth::Half => {
            let b = reader.read_array::<2>()?;
            f16_bits_to_f64(if little { u16::from_le_bytes(b) } else { u16::from_be_bytes(b) })
        }
        FloatWidth::Single => {
            let b = reader.read_array::<4>()?;
            f64::from(if little { f32::from_le_bytes(b) } else { f32::from_be_bytes(b) })
        }
        FloatWidth::Double => {
            let b = reader.read_array::<8>()?;
            if little { f64::from_le_bytes(b) } else { f64::from_be_bytes(b) }
        }
    })
}

const F64_EXP_MASK: u64 = 0x7FF;
const F64_MAN_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;
const F16_INF: u16 = 0x7C00;
/// Mantissa bits dropped when going from 52 to 10 bits.
const MAN_SHIFT: u32 = 42;

/// Converts an `f64` to IEEE-754 binary16 bits.
pub fn f64_to_f16_bits(value: f64) -> u16 {
    let bits = value.to_bits();
    let sign = ((bits >> 48) & 0x8000) as u16;
    let exp = ((bits >> 52) & F64_EXP_MASK) as i32;
    let man = bits & F64_MAN_MASK;

    if exp == F64_EXP_MASK as i32 {
        if man == 0 {
            return sign | F16_INF;
        }
        // NaN: obere Payload-Bits behalten, nie zu Infinity kollabieren
        let payload = (man >> MAN_SHIFT) as u16;
        return sign | F16_INF | if payload == 0 { 0x0200 } else { payload };
    }

    let e = exp - 1023;
    if e > 15 {
        return sign | F16_INF;
    }
    if e >= -14 {
        let half = ((e + 15) as u64) << 10 | (man >> MAN_SHIFT);
        // Carry into the exponent is intended: it yields the next binade or infinity.
        return sign | round_half_even(half, man, MAN_SHIFT) as u16;
    }
    if e < -25 {
        return sign;
    }
    // Subnormal: value = full * 2^(e-52), unit of the result = 2^-24.
    let full = man | (1u64 << 52);
    let shift = (28 - e) as u32;
    sign | round_half_even(full >> shift, full, shift) as u16
}

/// Rounds `truncated` using the low `shift` bits of `source`.
#[inline]
fn round_half_even(truncated: u64, source: u64, shift: u32) -> u64 {
    let rest = source & ((1u64 << shift) - 1);
    let halfway = 1u64 << (shift - 1);
    if rest > halfway || (rest == halfway && truncated & 1 == 1) {
        truncated + 1
    } else {
        truncated
    }
}

/// Converts IEEE-754 binary16 bits to an `f64`.
pub fn f16_bits_to_f64(half: u16) -> f64 {
    let sign = u64::from(half & 0x8000) << 48;
    let exp = (half >> 10) & 0x1F;
    let man = u64::from(half & 0x03FF);
    let bits = match exp {
        0 if man == 0 => sign,
        0 => {
            let magnitude = man as f64 * 2f64.powi(-24);
            magnitude.to_bits() | sign
        }
        0x1F => sign | (F64_EXP_MASK << 52) | (man << MAN_SHIFT),
        _ => sign | ((u64::from(exp) + 1023 - 15) << 52) | (man << MAN_SHIFT),
    };
    f64::from_bits(bits)
}
