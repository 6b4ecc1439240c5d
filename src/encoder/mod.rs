//! Encoder: drives a [`Format`] over a value list and emits bytes.
//!
//! # Beispiel
//!
//! ```
//! use binpack::encoder::encode;
//! use binpack::format::Format;
//! use binpack::options::PackOptions;
//! use binpack::Value;
//!
//! let format = Format::parse(">I16 p").unwrap();
//! let values = [Value::Int(0x1234), Value::from("ok")];
//! let bytes = encode(&format, &values, &PackOptions::default()).unwrap();
//! assert_eq!(bytes, [0x12, 0x34, 0x02, b'o', b'k']);
//! ```

mod arguments;

pub(crate) use arguments::Arguments;

use crate::bytestream::ByteWriter;
use crate::endian::Endianness;
use crate::format::{Format, Operation};
use crate::options::PackOptions;
use crate::value::Value;
use crate::{binary, boolean, fixed_integer, float, integer, string, unsigned_integer, var_float, Result};

/// Single-use traversal state of one pack call.
///
/// The byte order starts out little-endian and only lives as long as the
/// encoder.
pub struct Encoder<'v> {
    writer: ByteWriter,
    order: Endianness,
    args: Arguments<'v>,
}

impl<'v> Encoder<'v> {
    /// Creates an encoder over `values`.
    pub fn new(values: &'v [Value]) -> Self {
        Self::with_capacity(values, 0)
    }

    /// Like [`new`](Self::new), preallocating `capacity` output bytes.
    pub fn with_capacity(values: &'v [Value], capacity: usize) -> Self {
        Self {
            writer: ByteWriter::with_capacity(capacity),
            order: Endianness::default(),
            args: Arguments::new(values),
        }
    }

    /// Encodes one operation, consuming its value if it takes one.
    pub fn encode_operation(&mut self, op: &Operation) -> Result<()> {
        let w = &mut self.writer;
        match *op {
            Operation::ByteOrder(order) => self.order = order,
            Operation::Padding(n) => w.write_zeros(n),
            Operation::Bool => boolean::encode(w, self.args.bool(op)?),
            Operation::BitArray(count) => boolean::encode_bits(w, self.args.bools(op)?, count),
            Operation::PrefixedBitArray(prefix) => {
                let bits = self.args.bools(op)?;
                prefix.encode(w, bits.len(), self.order)?;
                boolean::encode_bits(w, bits, bits.len());
            }
            Operation::Int { width, .. } => {
                fixed_integer::encode(w, self.args.int(op)? as u64, width, self.order)
            }
            Operation::Float(width) => float::encode(w, self.args.float(op)?, width, self.order),
            Operation::VarFloat => var_float::encode(w, self.args.float(op)?),
            Operation::SignedVarint => integer::encode(w, self.args.int(op)?),
            Operation::UnsignedVarint => unsigned_integer::encode(w, self.args.int(op)? as u64),
            Operation::TerminatedString => string::encode_terminated(w, self.args.str(op)?),
            Operation::PrefixedString(prefix) => {
                string::encode_prefixed(w, self.args.str(op)?, prefix, self.order)?
            }
            Operation::FixedString(size) => string::encode_fixed(w, self.args.str(op)?, size),
            Operation::FixedBytes(size) => binary::encode_fixed(w, self.args.bytes(op)?, size),
            Operation::PrefixedBytes(prefix) => {
                binary::encode_prefixed(w, self.args.bytes(op)?, prefix, self.order)?
            }
        }
        Ok(())
    }

    /// Encodes every operation of `format` in order.
    pub fn encode_format(&mut self, format: &Format) -> Result<()> {
        format.operations().iter().try_for_each(|op| self.encode_operation(op))
    }

    /// Bytes written so far.
    pub fn byte_position(&self) -> usize {
        self.writer.position()
    }

    /// Checks for leftover values and returns the output.
    pub fn finish(self, options: &PackOptions) -> Result<Vec<u8>> {
        self.args.finish(options)?;
        Ok(self.writer.into_vec())
    }
}

// ============================================================================
// High-Level API
// ============================================================================

/// Upper bound for the up-front output reservation.
const MAX_PREALLOC: usize = 64 * 1024;

/// Encodes `values` according to `format`.
///
/// Arguments are validated by [`compute`](crate::size::compute) before the
/// first byte is written, so argument errors never allocate the output.
/// On error nothing is returned.
pub fn encode(format: &Format, values: &[Value], options: &PackOptions) -> Result<Vec<u8>> {
    let size = crate::size::compute(format, values, options)?;
    let mut encoder = Encoder::with_capacity(values, size.min(MAX_PREALLOC));
    encoder.encode_format(format)?;
    let bytes = encoder.writer.into_vec();
    debug_assert_eq!(bytes.len(), size);
    log::debug!(
        "packed {} values over {} operations into {} bytes",
        values.len(),
        format.operations().len(),
        bytes.len()
    );
    Ok(bytes)
}
