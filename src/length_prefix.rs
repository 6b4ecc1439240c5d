//! Length prefixes shared by `B`, `s`, `p` and `A`.
//!
//! A prefix is either an unsigned LEB128 varint or a fixed-width unsigned
//! integer of 1..=8 bytes in the active byte order.

use crate::bytestream::{ByteReader, ByteWriter};
use crate::endian::Endianness;
use crate::{fixed_integer, unsigned_integer, Error, Result};

/// How the length of a variable-size field is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthPrefix {
    /// Unsigned LEB128.
    Varint,
    /// Fixed-width unsigned integer, width in bytes (1..=8).
    Fixed(u8),
}

impl LengthPrefix {
    /// Size parameter as stored in the operation: 0 for LEB128.
    pub fn size_param(self) -> usize {
        match self {
            Self::Varint => 0,
            Self::Fixed(width) => usize::from(width),
        }
    }

    /// Fails with [`Error::LengthPrefixOverflow`] if `len` does not fit.
    pub fn check(self, len: usize) -> Result<()> {
        match self {
            Self::Fixed(width) if len as u64 > fixed_integer::max_unsigned(usize::from(width)) => {
                Err(Error::LengthPrefixOverflow { length: len, width })
            }
            _ => Ok(()),
        }
    }

    /// Number of bytes the prefix for `len` occupies.
    pub fn encoded_len(self, len: usize) -> usize {
        match self {
            Self::Varint => unsigned_integer::encoded_len(len as u64),
            Self::Fixed(width) => usize::from(width),
        }
    }

    /// Writes the prefix for `len`.
    pub fn encode(self, writer: &mut ByteWriter, len: usize, order: Endianness) -> Result<()> {
        self.check(len)?;
        match self {
            Self::Varint => unsigned_integer::encode(writer, len as u64),
            Self::Fixed(width) => fixed_integer::encode(writer, len as u64, usize::from(width), order),
        }
        Ok(())
    }

    /// Reads a prefix and returns the length it announces.
    ///
    /// Lengths that cannot be addressed on this platform are reported as
    /// [`Error::UnexpectedEndOfData`]: no input can hold that many bytes.
    pub fn decode(self, reader: &mut ByteReader, order: Endianness) -> Result<usize> {
        let raw = match self {
            Self::Varint => unsigned_integer::decode(reader)?,
            Self::Fixed(width) => fixed_integer::decode_unsigned(reader, usize::from(width), order)?,
        };
        usize::try_from(raw)
            .map_err(|_| Error::end_of_data(reader.position(), usize::MAX, reader.remaining()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_to_vec(prefix: LengthPrefix, len: usize, order: Endianness) -> Result<Vec<u8>> {
        let mut w = ByteWriter::new();
        prefix.encode(&mut w, len, order)?;
        Ok(w.into_vec())
    }

    #[test]
    fn varint_prefix() {
        assert_eq!(encode_to_vec(LengthPrefix::Varint, 5, Endianness::Big).unwrap(), vec![5]);
        assert_eq!(LengthPrefix::Varint.encoded_len(300), 2);
        let mut r = ByteReader::new(&[0xAC, 0x02], 0).unwrap();
        assert_eq!(LengthPrefix::Varint.decode(&mut r, Endianness::Little).unwrap(), 300);
    }

    #[test]
    fn fixed_prefix_follows_byte_order() {
        assert_eq!(
            encode_to_vec(LengthPrefix::Fixed(2), 5, Endianness::Big).unwrap(),
            vec![0x00, 0x05]
        );
        assert_eq!(
            encode_to_vec(LengthPrefix::Fixed(4), 5, Endianness::Little).unwrap(),
            vec![0x05, 0x00, 0x00, 0x00]
        );
        assert_eq!(LengthPrefix::Fixed(4).encoded_len(1 << 20), 4);
    }

    #[test]
    fn fixed_prefix_overflow() {
        assert_eq!(
            encode_to_vec(LengthPrefix::Fixed(1), 256, Endianness::Little).unwrap_err(),
            Error::LengthPrefixOverflow { length: 256, width: 1 }
        );
        assert!(LengthPrefix::Fixed(1).check(255).is_ok());
        assert!(LengthPrefix::Fixed(8).check(usize::MAX).is_ok());
    }

    #[test]
    fn size_params() {
        assert_eq!(LengthPrefix::Varint.size_param(), 0);
        assert_eq!(LengthPrefix::Fixed(2).size_param(), 2);
    }
}
