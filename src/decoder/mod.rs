//! Decoder: reads the fields of a [`Format`] from a byte slice.
//!
//! Decoding starts at an arbitrary offset and reports where it stopped, so
//! concatenated records can be read one after another.
//!
//! # Beispiel
//!
//! ```
//! use binpack::decoder::decode;
//! use binpack::format::Format;
//! use binpack::options::PackOptions;
//! use binpack::Value;
//!
//! let format = Format::parse(">I16").unwrap();
//! let data = [0x12, 0x34, 0x00, 0x01];
//! let first = decode(&format, &data, 0, &PackOptions::default()).unwrap();
//! let second = decode(&format, &data, first.next_offset, &PackOptions::default()).unwrap();
//! assert_eq!(first.values, [Value::Int(0x1234)]);
//! assert_eq!(second.values, [Value::Int(1)]);
//! assert_eq!(second.next_offset, 4);
//! ```

use crate::bytestream::ByteReader;
use crate::endian::Endianness;
use crate::format::{Format, Operation};
use crate::options::PackOptions;
use crate::value::Value;
use crate::{binary, boolean, fixed_integer, float, integer, string, unsigned_integer, var_float, Result};

/// Decoded values plus the offset just past the last consumed byte.
#[derive(Debug, Clone, PartialEq)]
pub struct UnpackResult {
    pub values: Vec<Value>,
    /// Start offset plus the number of bytes consumed.
    pub next_offset: usize,
}

/// Single-use traversal state of one unpack call.
pub struct Decoder<'a> {
    reader: ByteReader<'a>,
    order: Endianness,
    options: PackOptions,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder reading `data` from `offset`.
    ///
    /// Fails with [`Error::OffsetOutOfRange`](crate::Error::OffsetOutOfRange)
    /// if `offset` lies beyond the data.
    pub fn new(data: &'a [u8], offset: usize, options: PackOptions) -> Result<Self> {
        Ok(Self {
            reader: ByteReader::new(data, offset)?,
            order: Endianness::default(),
            options,
        })
    }

    /// Decodes one operation. Byte order markers and padding yield `None`.
    pub fn decode_operation(&mut self, op: &Operation) -> Result<Option<Value>> {
        let r = &mut self.reader;
        let order = self.order;
        let value = match *op {
            Operation::ByteOrder(order) => {
                self.order = order;
                return Ok(None);
            }
            Operation::Padding(n) => {
                r.skip(n)?;
                return Ok(None);
            }
            Operation::Bool => Value::Bool(boolean::decode(r)?),
            Operation::BitArray(count) => Value::Bools(boolean::decode_bits(r, count)?),
            Operation::PrefixedBitArray(prefix) => {
                let count = prefix.decode(r, order)?;
                Value::Bools(boolean::decode_bits(r, count)?)
            }
            Operation::Int { width, signed } => Value::Int(fixed_integer::decode(r, width, order, signed)?),
            Operation::Float(width) => Value::Float(float::decode(r, width, order)?),
            Operation::VarFloat => Value::Float(var_float::decode(r)?),
            Operation::SignedVarint => Value::Int(integer::decode(r)?),
            Operation::UnsignedVarint => Value::Int(unsigned_integer::decode(r)? as i64),
            Operation::TerminatedString => Value::Str(string::decode_terminated(r, &self.options)?),
            Operation::PrefixedString(prefix) => {
                Value::Str(string::decode_prefixed(r, prefix, order, self.options.invalid_utf8())?)
            }
            Operation::FixedString(size) => {
                Value::Str(string::decode_fixed(r, size, self.options.invalid_utf8())?)
            }
            Operation::FixedBytes(size) => Value::Bytes(binary::decode_fixed(r, size)?),
            Operation::PrefixedBytes(prefix) => Value::Bytes(binary::decode_prefixed(r, prefix, order)?),
        };
        Ok(Some(value))
    }

    /// Decodes every operation of `format` in order.
    pub fn decode_format(&mut self, format: &Format) -> Result<Vec<Value>> {
        let mut values = Vec::with_capacity(format.value_count());
        for op in format.operations() {
            if let Some(value) = self.decode_operation(op)? {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// Absolute offset of the next unread byte.
    pub fn byte_position(&self) -> usize {
        self.reader.position()
    }
}

// ============================================================================
// High-Level API
// ============================================================================

/// Decodes the fields of `format` from `data`, starting at `offset`.
pub fn decode(format: &Format, data: &[u8], offset: usize, options: &PackOptions) -> Result<UnpackResult> {
    let mut decoder = Decoder::new(data, offset, *options)?;
    let values = decoder.decode_format(format)?;
    let next_offset = decoder.byte_position();
    log::debug!(
        "unpacked {} values from bytes {}..{} of {}",
        values.len(),
        offset,
        next_offset,
        data.len()
    );
    Ok(UnpackResult { values, next_offset })
}
