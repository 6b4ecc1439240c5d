//! Byte blob encoding (`a[n]`, `A`, `A[n]`).
//!
//! Fixed blobs occupy exactly `n` bytes: shorter input is zero-padded on the
//! right, longer input is truncated. Prefixed blobs are a length prefix
//! followed by the raw octets.

use crate::bytestream::{ByteReader, ByteWriter};
use crate::endian::Endianness;
use crate::length_prefix::LengthPrefix;
use crate::Result;

/// Writes `value` into a fixed field of `size` bytes.
pub fn encode_fixed(writer: &mut ByteWriter, value: &[u8], size: usize) {
    let used = value.len().min(size);
    writer.write_bytes(&value[..used]);
    writer.write_zeros(size - used);
}

/// Reads a fixed field of `size` bytes, padding included.
pub fn decode_fixed(reader: &mut ByteReader, size: usize) -> Result<Vec<u8>> {
    Ok(reader.read_bytes(size)?.to_vec())
}

/// Writes a length prefix followed by `value`.
pub fn encode_prefixed(
    writer: &mut ByteWriter,
    value: &[u8],
    prefix: LengthPrefix,
    order: Endianness,
) -> Result<()> {
    prefix.encode(writer, value.len(), order)?;
    writer.write_bytes(value);
    Ok(())
}

/// Reads a length prefix and that many bytes.
pub fn decode_prefixed(reader: &mut ByteReader, prefix: LengthPrefix, order: Endianness) -> Result<Vec<u8>> {
    let len = prefix.decode(reader, order)?;
    Ok(reader.read_bytes(len)?.to_vec())
}

/// Number of bytes [`encode_prefixed`] writes for `len` payload bytes.
pub fn prefixed_len(len: usize, prefix: LengthPrefix) -> usize {
    prefix.encoded_len(len) + len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn round_trip_prefixed(value: &[u8], prefix: LengthPrefix) -> Vec<u8> {
        let mut w = ByteWriter::new();
        encode_prefixed(&mut w, value, prefix, Endianness::Little).unwrap();
        let data = w.into_vec();
        assert_eq!(data.len(), prefixed_len(value.len(), prefix));
        let mut r = ByteReader::new(&data, 0).unwrap();
        decode_prefixed(&mut r, prefix, Endianness::Little).unwrap()
    }

    #[test]
    fn fixed_pads_with_zeros() {
        let mut w = ByteWriter::new();
        encode_fixed(&mut w, &[0xDE, 0xAD], 4);
        assert_eq!(w.into_vec(), vec![0xDE, 0xAD, 0x00, 0x00]);
    }

    #[test]
    fn fixed_truncates() {
        let mut w = ByteWriter::new();
        encode_fixed(&mut w, &[1, 2, 3, 4, 5], 3);
        assert_eq!(w.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn fixed_decode_keeps_padding() {
        let mut r = ByteReader::new(&[7, 0, 0], 0).unwrap();
        assert_eq!(decode_fixed(&mut r, 3).unwrap(), vec![7, 0, 0]);
    }

    #[test]
    fn empty_prefixed() {
        assert_eq!(round_trip_prefixed(&[], LengthPrefix::Varint), Vec::<u8>::new());
        let mut w = ByteWriter::new();
        encode_prefixed(&mut w, &[], LengthPrefix::Varint, Endianness::Little).unwrap();
        assert_eq!(w.into_vec(), vec![0x00]);
    }

    #[test]
    fn prefixed_round_trips() {
        let input = vec![0xDE, 0xAD, 0xBE, 0xEF];
        assert_eq!(round_trip_prefixed(&input, LengthPrefix::Varint), input);
        assert_eq!(round_trip_prefixed(&input, LengthPrefix::Fixed(2)), input);
        let long = vec![0xFF; 200];
        assert_eq!(round_trip_prefixed(&long, LengthPrefix::Varint), long);
    }

    #[test]
    fn decode_length_exceeds_data() {
        // length=5 but only 2 octets follow
        let mut r = ByteReader::new(&[0x05, 0xAA, 0xBB], 0).unwrap();
        assert_eq!(
            decode_prefixed(&mut r, LengthPrefix::Varint, Endianness::Little).unwrap_err(),
            Error::end_of_data(1, 5, 2)
        );
    }

    #[test]
    fn huge_fixed_prefix_does_not_allocate() {
        let data = [0xFF; 8];
        let mut r = ByteReader::new(&data, 0).unwrap();
        assert!(matches!(
            decode_prefixed(&mut r, LengthPrefix::Fixed(8), Endianness::Little).unwrap_err(),
            Error::UnexpectedEndOfData { .. }
        ));
    }
}
