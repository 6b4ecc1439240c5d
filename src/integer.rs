//! Signed varint encoding (`v`).
//!
//! The value is zigzag-mapped (`(v << 1) ^ (v >> 63)`) so that small
//! magnitudes of either sign stay short, then written as an unsigned LEB128
//! varint.

use crate::bytestream::{ByteReader, ByteWriter};
use crate::{unsigned_integer, Result};

/// Maps a signed value onto the unsigned range: 0, -1, 1, -2, 2, ...
#[inline]
pub fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag`].
#[inline]
pub fn unzigzag(raw: u64) -> i64 {
    ((raw >> 1) as i64) ^ -((raw & 1) as i64)
}

/// Encodes a zigzag-signed varint.
pub fn encode(writer: &mut ByteWriter, value: i64) {
    unsigned_integer::encode(writer, zigzag(value));
}

/// Decodes a zigzag-signed varint.
pub fn decode(reader: &mut ByteReader) -> Result<i64> {
    unsigned_integer::decode(reader).map(unzigzag)
}

/// Number of bytes [`encode`] writes for `value`.
#[inline]
pub fn encoded_len(value: i64) -> usize {
    unsigned_integer::encoded_len(zigzag(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_to_vec(value: i64) -> Vec<u8> {
        let mut w = ByteWriter::new();
        encode(&mut w, value);
        w.into_vec()
    }

    fn round_trip(value: i64) -> i64 {
        let data = encode_to_vec(value);
        let mut r = ByteReader::new(&data, 0).unwrap();
        decode(&mut r).unwrap()
    }

    #[test]
    fn zigzag_mapping() {
        assert_eq!(zigzag(0), 0);
        assert_eq!(zigzag(-1), 1);
        assert_eq!(zigzag(1), 2);
        assert_eq!(zigzag(-2), 3);
        assert_eq!(zigzag(-128), 255);
        assert_eq!(zigzag(i64::MAX), u64::MAX - 1);
        assert_eq!(zigzag(i64::MIN), u64::MAX);
    }

    #[test]
    fn unzigzag_inverts() {
        for &v in &[0, 1, -1, 63, -64, 64, -65, i64::MAX, i64::MIN] {
            assert_eq!(unzigzag(zigzag(v)), v, "failed for {v}");
        }
    }

    #[test]
    fn minus_one_is_single_byte() {
        assert_eq!(encode_to_vec(-1), vec![0x01]);
    }

    #[test]
    fn minus_128_needs_two_bytes() {
        // zigzag(-128) = 255 = 0b1_1111111
        assert_eq!(encode_to_vec(-128), vec![0xFF, 0x01]);
        assert_eq!(encoded_len(-128), 2);
    }

    #[test]
    fn single_byte_range() {
        assert_eq!(encoded_len(-64), 1);
        assert_eq!(encoded_len(63), 1);
        assert_eq!(encoded_len(64), 2);
        assert_eq!(encoded_len(-65), 2);
    }

    #[test]
    fn round_trip_diverse() {
        for &val in &[0, 1, -1, 127, -128, 300, -300, i64::MAX, i64::MIN] {
            assert_eq!(round_trip(val), val, "failed for {val}");
            assert_eq!(encoded_len(val), encode_to_vec(val).len(), "len mismatch for {val}");
        }
    }

    #[test]
    fn decode_eof() {
        let mut r = ByteReader::new(&[], 0).unwrap();
        assert!(decode(&mut r).is_err());
    }
}
