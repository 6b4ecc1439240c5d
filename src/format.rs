//! Format string parser.
//!
//! A format string is a sequence of opcodes, each optionally followed by a
//! decimal size parameter. Whitespace between opcodes is ignored.
//!
//! | opcode | field | size parameter |
//! |---|---|---|
//! | `<` `>` `=` | little / big / native byte order | none |
//! | `x[n]` | `n` zero bytes (default 1) | byte count |
//! | `b` / `b[n]` | single boolean / bit array of `n` booleans | element count |
//! | `B` / `B[n]` | bit array with LEB128 / `n`-byte count prefix | prefix width |
//! | `i[n]` / `I[n]` | signed / unsigned integer of `n` bits (default 32) | bits |
//! | `f[n]` | float, `n` ∈ {16, 32, 64} (default 32) | bits |
//! | `g`, `n` | tagged variable-width float | none |
//! | `v` / `V` | zigzag / unsigned LEB128 varint | none |
//! | `z` | zero-terminated string | none |
//! | `s[n]` | string with `n`-byte length prefix (default 4) | prefix width |
//! | `p` | string with LEB128 length prefix | none |
//! | `c[n]` | fixed `n`-byte string buffer (size required) | byte count |
//! | `a[n]` | fixed `n`-byte blob (size required) | byte count |
//! | `A` / `A[n]` | blob with LEB128 / `n`-byte length prefix | prefix width |
//!
//! # Beispiel
//!
//! ```
//! use binpack::format::{Format, Operation};
//! use binpack::endian::Endianness;
//!
//! let format = Format::parse(">i16 z").unwrap();
//! assert_eq!(format.operations()[0], Operation::ByteOrder(Endianness::Big));
//! assert_eq!(format.operations()[1].opcode(), 'i');
//! assert_eq!(format.operations()[1].size_param(), 2);
//! assert_eq!(format.value_count(), 2);
//! ```

use core::fmt;
use core::str::FromStr;

use crate::decoder::{self, UnpackResult};
use crate::endian::Endianness;
use crate::float::FloatWidth;
use crate::length_prefix::LengthPrefix;
use crate::options::PackOptions;
use crate::size::{self, SizePrediction};
use crate::value::{Value, ValueKind};
use crate::{boolean, encoder, Error, Result};

/// One parsed field of a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `<`, `>`, `=`: switch the byte order for the following fields.
    ByteOrder(Endianness),
    /// `x[n]`: `n` zero bytes.
    Padding(usize),
    /// `b`: one boolean in one byte.
    Bool,
    /// `b[n]`: `n` booleans packed LSB first.
    BitArray(usize),
    /// `B`, `B[n]`: bit array preceded by its element count.
    PrefixedBitArray(LengthPrefix),
    /// `i[n]`, `I[n]`: fixed-width integer, width in bytes.
    Int { width: usize, signed: bool },
    /// `f[n]`.
    Float(FloatWidth),
    /// `g`, `n`.
    VarFloat,
    /// `v`.
    SignedVarint,
    /// `V`.
    UnsignedVarint,
    /// `z`.
    TerminatedString,
    /// `s[n]` (fixed-width prefix) and `p` (LEB128 prefix).
    PrefixedString(LengthPrefix),
    /// `c[n]`.
    FixedString(usize),
    /// `a[n]`.
    FixedBytes(usize),
    /// `A`, `A[n]`.
    PrefixedBytes(LengthPrefix),
}

impl Operation {
    /// The opcode character this operation was parsed from.
    ///
    /// `n` is reported as its synonym `g`.
    pub fn opcode(&self) -> char {
        match self {
            Self::ByteOrder(order) => order.opcode(),
            Self::Padding(_) => 'x',
            Self::Bool | Self::BitArray(_) => 'b',
            Self::PrefixedBitArray(_) => 'B',
            Self::Int { signed: true, .. } => 'i',
            Self::Int { signed: false, .. } => 'I',
            Self::Float(_) => 'f',
            Self::VarFloat => 'g',
            Self::SignedVarint => 'v',
            Self::UnsignedVarint => 'V',
            Self::TerminatedString => 'z',
            Self::PrefixedString(LengthPrefix::Varint) => 'p',
            Self::PrefixedString(LengthPrefix::Fixed(_)) => 's',
            Self::FixedString(_) => 'c',
            Self::FixedBytes(_) => 'a',
            Self::PrefixedBytes(_) => 'A',
        }
    }

    /// The numeric size parameter.
    ///
    /// Byte widths for integers and floats, element count for bit arrays,
    /// byte counts for padding and fixed buffers, prefix width for prefixed
    /// fields. 0 means "no parameter": single boolean or LEB128 prefix.
    pub fn size_param(&self) -> usize {
        match self {
            Self::ByteOrder(_)
            | Self::Bool
            | Self::VarFloat
            | Self::SignedVarint
            | Self::UnsignedVarint
            | Self::TerminatedString => 0,
            Self::Padding(n) | Self::BitArray(n) | Self::FixedString(n) | Self::FixedBytes(n) => *n,
            Self::Int { width, .. } => *width,
            Self::Float(width) => width.bytes(),
            Self::PrefixedBitArray(prefix) | Self::PrefixedString(prefix) | Self::PrefixedBytes(prefix) => {
                prefix.size_param()
            }
        }
    }

    /// The value kind this operation consumes, `None` for byte order and
    /// padding.
    pub fn expected_kind(&self) -> Option<ValueKind> {
        match self {
            Self::ByteOrder(_) | Self::Padding(_) => None,
            Self::Bool => Some(ValueKind::Bool),
            Self::BitArray(_) | Self::PrefixedBitArray(_) => Some(ValueKind::Bools),
            Self::Int { .. } | Self::SignedVarint | Self::UnsignedVarint => Some(ValueKind::Int),
            Self::Float(_) | Self::VarFloat => Some(ValueKind::Float),
            Self::TerminatedString | Self::PrefixedString(_) | Self::FixedString(_) => Some(ValueKind::Str),
            Self::FixedBytes(_) | Self::PrefixedBytes(_) => Some(ValueKind::Bytes),
        }
    }

    /// Encoded size if it does not depend on the value.
    ///
    /// A fixed-width prefix does not make a field fixed: its payload length
    /// still depends on the value.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::ByteOrder(_) => Some(0),
            Self::Bool => Some(1),
            Self::BitArray(n) => Some(boolean::packed_len(*n)),
            Self::Padding(n) | Self::FixedString(n) | Self::FixedBytes(n) => Some(*n),
            Self::Int { width, .. } => Some(*width),
            Self::Float(width) => Some(width.bytes()),
            Self::PrefixedBitArray(_)
            | Self::VarFloat
            | Self::SignedVarint
            | Self::UnsignedVarint
            | Self::TerminatedString
            | Self::PrefixedString(_)
            | Self::PrefixedBytes(_) => None,
        }
    }
}

impl fmt::Display for Operation {
    /// Canonical spelling that parses back to the same operation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode();
        match self {
            Self::ByteOrder(_)
            | Self::Bool
            | Self::VarFloat
            | Self::SignedVarint
            | Self::UnsignedVarint
            | Self::TerminatedString
            | Self::PrefixedBitArray(LengthPrefix::Varint)
            | Self::PrefixedString(LengthPrefix::Varint)
            | Self::PrefixedBytes(LengthPrefix::Varint) => write!(f, "{op}"),
            Self::Int { width, .. } => write!(f, "{op}{}", width * 8),
            Self::Float(width) => write!(f, "{op}{}", width.bytes() * 8),
            _ => write!(f, "{op}{}", self.size_param()),
        }
    }
}

/// A parsed format string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Format {
    operations: Vec<Operation>,
    value_count: usize,
}

impl Format {
    /// Parses a format string.
    pub fn parse(format: &str) -> Result<Self> {
        let operations = parse(format)?;
        Ok(Self::from_operations(operations))
    }

    /// Builds a format from already parsed operations.
    pub fn from_operations(operations: Vec<Operation>) -> Self {
        let value_count = operations.iter().filter(|op| op.expected_kind().is_some()).count();
        Self { operations, value_count }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of values [`pack`](Self::pack) consumes and
    /// [`unpack`](Self::unpack) produces.
    pub fn value_count(&self) -> usize {
        self.value_count
    }

    /// Encodes `values` with default options.
    pub fn pack(&self, values: &[Value]) -> Result<Vec<u8>> {
        self.pack_with_options(values, &PackOptions::default())
    }

    pub fn pack_with_options(&self, values: &[Value], options: &PackOptions) -> Result<Vec<u8>> {
        encoder::encode(self, values, options)
    }

    /// Decodes from `data` starting at `offset` with default options.
    pub fn unpack(&self, data: &[u8], offset: usize) -> Result<UnpackResult> {
        self.unpack_with_options(data, offset, &PackOptions::default())
    }

    pub fn unpack_with_options(&self, data: &[u8], offset: usize, options: &PackOptions) -> Result<UnpackResult> {
        decoder::decode(self, data, offset, options)
    }

    pub fn predict_size(&self) -> SizePrediction {
        size::predict(self)
    }

    /// Exact size [`pack`](Self::pack) would produce for `values`.
    pub fn compute_size(&self, values: &[Value]) -> Result<usize> {
        self.compute_size_with_options(values, &PackOptions::default())
    }

    pub fn compute_size_with_options(&self, values: &[Value], options: &PackOptions) -> Result<usize> {
        size::compute(self, values, options)
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.operations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// Parses a format string into its operations.
///
/// Error positions are byte offsets into `format`.
pub fn parse(format: &str) -> Result<Vec<Operation>> {
    let mut cursor = Cursor { src: format, pos: 0 };
    let mut ops = Vec::new();

    while let Some((position, c)) = cursor.next_char() {
        let op = match c {
            '<' => Operation::ByteOrder(Endianness::Little),
            '>' => Operation::ByteOrder(Endianness::Big),
            '=' => Operation::ByteOrder(Endianness::Native),
            'x' => Operation::Padding(cursor.digits()?.unwrap_or(1)),
            'b' => match cursor.digits()? {
                None => Operation::Bool,
                Some(n) => Operation::BitArray(n),
            },
            'B' => Operation::PrefixedBitArray(cursor.prefix(c)?),
            'i' | 'I' => {
                let bits = cursor.digits()?.unwrap_or(32);
                if bits == 0 || bits % 8 != 0 || bits > 64 {
                    return Err(Error::InvalidIntegerWidth(bits));
                }
                Operation::Int { width: bits / 8, signed: c == 'i' }
            }
            'f' => {
                let bits = cursor.digits()?.unwrap_or(32);
                Operation::Float(FloatWidth::from_bits(bits).ok_or(Error::InvalidFloatWidth(bits))?)
            }
            'g' | 'n' => Operation::VarFloat,
            'v' => Operation::SignedVarint,
            'V' => Operation::UnsignedVarint,
            'z' => Operation::TerminatedString,
            'p' => Operation::PrefixedString(LengthPrefix::Varint),
            's' => {
                let width = cursor.digits()?.unwrap_or(4);
                Operation::PrefixedString(fixed_prefix(c, width)?)
            }
            'c' => Operation::FixedString(cursor.required_digits(c, position)?),
            'a' => Operation::FixedBytes(cursor.required_digits(c, position)?),
            'A' => Operation::PrefixedBytes(cursor.prefix(c)?),
            c if c.is_ascii_whitespace() => continue,
            other => return Err(Error::UnknownOpcode { opcode: other, position }),
        };
        ops.push(op);
    }
    Ok(ops)
}

fn fixed_prefix(opcode: char, width: usize) -> Result<LengthPrefix> {
    match u8::try_from(width) {
        Ok(w @ 1..=8) => Ok(LengthPrefix::Fixed(w)),
        _ => Err(Error::InvalidPrefixWidth { opcode, width }),
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn next_char(&mut self) -> Option<(usize, char)> {
        let c = self.src[self.pos..].chars().next()?;
        let at = self.pos;
        self.pos += c.len_utf8();
        Some((at, c))
    }

    /// Reads an optional decimal run.
    fn digits(&mut self) -> Result<Option<usize>> {
        let start = self.pos;
        let run = self.src[start..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if run == 0 {
            return Ok(None);
        }
        self.pos += run;
        self.src[start..self.pos]
            .bytes()
            .try_fold(0usize, |acc, d| acc.checked_mul(10)?.checked_add(usize::from(d - b'0')))
            .map(Some)
            .ok_or(Error::SizeTooLarge { position: start })
    }

    fn required_digits(&mut self, opcode: char, position: usize) -> Result<usize> {
        self.digits()?.ok_or(Error::MissingSize { opcode, position })
    }

    /// LEB128 without digits or with width 0, otherwise a fixed width of
    /// 1..=8 bytes.
    fn prefix(&mut self, opcode: char) -> Result<LengthPrefix> {
        match self.digits()? {
            None | Some(0) => Ok(LengthPrefix::Varint),
            Some(width) => fixed_prefix(opcode, width),
        }
    }
}
