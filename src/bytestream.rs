//! Byte-level stream reader and writer.
//!
//! All fields produced by a format string are whole bytes, so unlike a bit
//! packer the writer is a thin wrapper around a growable buffer and the
//! reader is a cursor over a borrowed slice that reports absolute offsets.

use crate::{Error, Result};

/// Appends bytes into a growable buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: Vec::with_capacity(capacity) }
    }

    #[inline(always)]
    pub fn write_byte(&mut self, val: u8) {
        self.buf.push(val);
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes `n` zero bytes (padding, fixed-buffer fill).
    pub fn write_zeros(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Finalises the writer and returns the buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

/// Reads bytes from a slice, starting at an arbitrary offset.
///
/// Positionen sind immer absolut im gesamten Slice, damit Fehlermeldungen und
/// `next_offset` direkt auf den Eingabepuffer des Aufrufers verweisen.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at `offset`.
    ///
    /// `offset == data.len()` is valid (nothing left to read).
    pub fn new(data: &'a [u8], offset: usize) -> Result<Self> {
        if offset > data.len() {
            return Err(Error::OffsetOutOfRange { offset, len: data.len() });
        }
        Ok(Self { data, pos: offset })
    }

    /// Absolute position of the next unread byte.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Fails with `UnexpectedEndOfData` unless `n` bytes remain.
    #[inline]
    pub fn ensure(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(Error::end_of_data(self.pos, n, self.remaining()));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn read_byte(&mut self) -> Result<u8> {
        let val = *self
            .data
            .get(self.pos)
            .ok_or_else(|| Error::end_of_data(self.pos, 1, 0))?;
        self.pos += 1;
        Ok(val)
    }

    /// Returns the next `n` bytes as a borrowed slice and advances past them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Skips `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    /// Reads up to the next zero byte.
    ///
    /// Returns the bytes before the terminator and whether a terminator was
    /// found. The terminator is consumed; without one the reader ends up at
    /// the end of the data.
    pub fn read_until_zero(&mut self) -> (&'a [u8], bool) {
        let rest = &self.data[self.pos..];
        match memchr::memchr(0, rest) {
            Some(idx) => {
                self.pos += idx + 1;
                (&rest[..idx], true)
            }
            None => {
                self.pos = self.data.len();
                (rest, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_default() {
        let w = ByteWriter::default();
        assert_eq!(w.position(), 0);
        assert_eq!(w.into_vec(), Vec::<u8>::new());
    }

    #[test]
    fn writer_bytes_and_zeros() {
        let mut w = ByteWriter::with_capacity(8);
        w.write_byte(0xAB);
        w.write_bytes(&[1, 2]);
        w.write_zeros(3);
        assert_eq!(w.position(), 6);
        assert_eq!(w.as_slice(), &[0xAB, 1, 2, 0, 0, 0]);
    }

    #[test]
    fn reader_starts_at_offset() {
        let data = [1, 2, 3, 4];
        let mut r = ByteReader::new(&data, 2).unwrap();
        assert_eq!(r.position(), 2);
        assert_eq!(r.remaining(), 2);
        assert_eq!(r.read_byte().unwrap(), 3);
        assert_eq!(r.position(), 3);
    }

    #[test]
    fn reader_offset_at_end_is_valid() {
        let data = [1, 2];
        let r = ByteReader::new(&data, 2).unwrap();
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn reader_offset_beyond_end() {
        let data = [1, 2];
        assert_eq!(
            ByteReader::new(&data, 3).unwrap_err(),
            Error::OffsetOutOfRange { offset: 3, len: 2 }
        );
    }

    #[test]
    fn read_byte_eof() {
        let mut r = ByteReader::new(&[], 0).unwrap();
        assert_eq!(r.read_byte().unwrap_err(), Error::end_of_data(0, 1, 0));
    }

    #[test]
    fn read_bytes_reports_absolute_offset() {
        let data = [0u8; 5];
        let mut r = ByteReader::new(&data, 3).unwrap();
        assert_eq!(r.read_bytes(4).unwrap_err(), Error::end_of_data(3, 4, 2));
        // Zustand bleibt bei Fehler unverändert
        assert_eq!(r.position(), 3);
    }

    #[test]
    fn read_array_and_skip() {
        let data = [9, 8, 7, 6, 5];
        let mut r = ByteReader::new(&data, 0).unwrap();
        r.skip(1).unwrap();
        assert_eq!(r.read_array::<3>().unwrap(), [8, 7, 6]);
        assert!(r.skip(2).is_err());
        r.skip(1).unwrap();
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn read_until_zero_with_terminator() {
        let data = b"abc\0def";
        let mut r = ByteReader::new(data, 0).unwrap();
        let (s, terminated) = r.read_until_zero();
        assert_eq!(s, b"abc");
        assert!(terminated);
        assert_eq!(r.position(), 4);
    }

    #[test]
    fn read_until_zero_without_terminator() {
        let data = b"xyz";
        let mut r = ByteReader::new(data, 1).unwrap();
        let (s, terminated) = r.read_until_zero();
        assert_eq!(s, b"yz");
        assert!(!terminated);
        assert_eq!(r.position(), 3);
    }
}
