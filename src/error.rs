//! Central error types for format parsing, packing and unpacking.
//!
//! Every variant belongs to exactly one [`ErrorCategory`]: a malformed format
//! string, arguments that do not match the format, or input bytes that do not
//! match the format.

use core::fmt;

use crate::value::ValueKind;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The format string itself is invalid.
    FormatSyntax,
    /// The supplied values do not fit the format.
    Argument,
    /// The input bytes do not fit the format.
    Data,
}

/// All errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A character in the format string is not a known opcode.
    UnknownOpcode {
        /// Das unbekannte Zeichen.
        opcode: char,
        /// Zeichenposition im Format-String.
        position: usize,
    },
    /// An opcode that requires a size (`c`, `a`) was given none.
    MissingSize { opcode: char, position: usize },
    /// Integer width in bits is not a positive multiple of 8 up to 64.
    InvalidIntegerWidth(usize),
    /// Float width in bits is not 16, 32 or 64.
    InvalidFloatWidth(usize),
    /// An explicit length-prefix width is outside 1..=8 bytes.
    InvalidPrefixWidth { opcode: char, width: usize },
    /// A decimal size parameter does not fit in `usize`.
    SizeTooLarge { position: usize },
    /// A value has the wrong kind for its operation.
    TypeMismatch {
        /// Index des Arguments in der Werteliste.
        index: usize,
        opcode: char,
        expected: ValueKind,
        found: ValueKind,
    },
    /// The value list ended before the format did.
    MissingArgument { index: usize, opcode: char },
    /// More values were supplied than the format consumes.
    ExtraArguments { expected: usize, supplied: usize },
    /// A payload length does not fit into its fixed-width length prefix.
    LengthPrefixOverflow { length: usize, width: u8 },
    /// Fewer bytes remain than the current read requires.
    UnexpectedEndOfData {
        /// Absolute Position im Eingabepuffer.
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// A tagged float starts with a tag other than 0..=3.
    InvalidVarFloatTag { tag: u8, offset: usize },
    /// A LEB128 varint does not fit in 64 bits.
    VarintOverflow { offset: usize },
    /// String bytes are not valid UTF-8.
    InvalidUtf8 { offset: usize },
    /// A null-terminated string ran into the end of the input.
    UnterminatedString { offset: usize },
    /// The start offset lies beyond the end of the input.
    OffsetOutOfRange { offset: usize, len: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOpcode { opcode, position } => {
                write!(f, "unknown format character {opcode:?} at position {position}")
            }
            Self::MissingSize { opcode, position } => {
                write!(f, "format character '{opcode}' at position {position} requires a size, e.g. {opcode}16")
            }
            Self::InvalidIntegerWidth(bits) => {
                write!(f, "invalid integer width {bits}: must be a positive multiple of 8 up to 64")
            }
            Self::InvalidFloatWidth(bits) => {
                write!(f, "invalid float width {bits}: only f16, f32 and f64 are supported")
            }
            Self::InvalidPrefixWidth { opcode, width } => {
                write!(f, "invalid length prefix width {width} for '{opcode}': must be 1..=8 bytes")
            }
            Self::SizeTooLarge { position } => {
                write!(f, "size parameter at position {position} is too large")
            }
            Self::TypeMismatch { index, opcode, expected, found } => write!(
                f,
                "argument {index} for '{opcode}' has wrong type: expected {expected}, found {found}"
            ),
            Self::MissingArgument { index, opcode } => {
                write!(f, "missing argument {index} for '{opcode}'")
            }
            Self::ExtraArguments { expected, supplied } => {
                write!(f, "too many arguments: format consumes {expected}, {supplied} supplied")
            }
            Self::LengthPrefixOverflow { length, width } => {
                write!(f, "length {length} does not fit into a {width}-byte length prefix")
            }
            Self::UnexpectedEndOfData { offset, needed, available } => write!(
                f,
                "unexpected end of data at offset {offset}: need {needed} bytes, {available} available"
            ),
            Self::InvalidVarFloatTag { tag, offset } => {
                write!(f, "invalid variable float tag 0x{tag:02X} at offset {offset}")
            }
            Self::VarintOverflow { offset } => {
                write!(f, "varint at offset {offset} overflows 64 bits")
            }
            Self::InvalidUtf8 { offset } => {
                write!(f, "invalid UTF-8 in string at offset {offset}")
            }
            Self::UnterminatedString { offset } => {
                write!(f, "string at offset {offset} has no zero terminator")
            }
            Self::OffsetOutOfRange { offset, len } => {
                write!(f, "offset {offset} is beyond the end of the data ({len} bytes)")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownOpcode { .. }
            | Self::MissingSize { .. }
            | Self::InvalidIntegerWidth(_)
            | Self::InvalidFloatWidth(_)
            | Self::InvalidPrefixWidth { .. }
            | Self::SizeTooLarge { .. } => ErrorCategory::FormatSyntax,
            Self::TypeMismatch { .. }
            | Self::MissingArgument { .. }
            | Self::ExtraArguments { .. }
            | Self::LengthPrefixOverflow { .. } => ErrorCategory::Argument,
            Self::UnexpectedEndOfData { .. }
            | Self::InvalidVarFloatTag { .. }
            | Self::VarintOverflow { .. }
            | Self::InvalidUtf8 { .. }
            | Self::UnterminatedString { .. }
            | Self::OffsetOutOfRange { .. } => ErrorCategory::Data,
        }
    }

    /// Erstellt einen `UnexpectedEndOfData` Fehler.
    pub fn end_of_data(offset: usize, needed: usize, available: usize) -> Self {
        Self::UnexpectedEndOfData { offset, needed, available }
    }
}

/// A convenience `Result` type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
