//! binpack – format-string driven binary serialization
//!
//! A format string such as `"<I16 z f64"` describes an ordered sequence of
//! typed fields. [`pack`] encodes a matching list of [`Value`]s into bytes,
//! [`unpack`] decodes them again starting at any offset, and
//! [`predict_size`] / [`compute_size`] report the encoded size without
//! producing output. The opcode table is documented in [`format`].
//!
//! # Beispiel
//!
//! ```
//! use binpack::{pack, unpack, compute_size, predict_size, Value};
//!
//! let values = [Value::Int(0x1234), Value::from("hi"), Value::Float(1.5)];
//! let bytes = pack(">I16 p g", &values).unwrap();
//! assert_eq!(bytes, [0x12, 0x34, 0x02, b'h', b'i', 0x01, 0x00, 0x3E]);
//!
//! let decoded = unpack(">I16 p g", &bytes, 0).unwrap();
//! assert_eq!(decoded.values, values);
//! assert_eq!(decoded.next_offset, bytes.len());
//!
//! assert_eq!(compute_size(">I16 p g", &values).unwrap(), bytes.len());
//! assert_eq!(predict_size(">I16 p g").unwrap().variable_fields, 2);
//! ```

pub mod binary;
pub mod boolean;
pub mod bytestream;
pub mod decoder;
pub mod encoder;
pub mod endian;
pub mod error;
pub mod fixed_integer;
pub mod float;
pub mod format;
pub mod format_cache;
pub mod integer;
pub mod json;
pub mod length_prefix;
pub mod options;
pub mod size;
pub mod string;
pub mod unsigned_integer;
pub mod value;
pub mod var_float;

pub use error::{Error, ErrorCategory, Result};

/// HashMap mit ahash (schnell, nicht DoS-resistent; nur für interne Tabellen).
pub(crate) type FastHashMap<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;

pub use decoder::UnpackResult;
pub use endian::Endianness;
pub use format::{Format, Operation};
pub use format_cache::FormatCache;
pub use options::{ExtraArguments, PackOptions, UnterminatedStrings, Utf8Policy};
pub use size::SizePrediction;
pub use value::{Value, ValueKind};

// ============================================================================
// High-Level API
// ============================================================================

/// Encodes `values` according to `format`.
///
/// Fails with a format syntax error for an invalid format and with an
/// argument error if the values do not match it.
pub fn pack(format: &str, values: &[Value]) -> Result<Vec<u8>> {
    pack_with_options(format, values, &PackOptions::default())
}

/// [`pack`] with explicit options.
pub fn pack_with_options(format: &str, values: &[Value], options: &PackOptions) -> Result<Vec<u8>> {
    Format::parse(format)?.pack_with_options(values, options)
}

/// Decodes the fields of `format` from `data`, starting at `offset`.
///
/// The returned [`UnpackResult::next_offset`] can be passed to the next call
/// to read concatenated records.
pub fn unpack(format: &str, data: &[u8], offset: usize) -> Result<UnpackResult> {
    unpack_with_options(format, data, offset, &PackOptions::default())
}

/// [`unpack`] with explicit options.
pub fn unpack_with_options(format: &str, data: &[u8], offset: usize, options: &PackOptions) -> Result<UnpackResult> {
    Format::parse(format)?.unpack_with_options(data, offset, options)
}

/// Static size information of `format`.
pub fn predict_size(format: &str) -> Result<SizePrediction> {
    Ok(Format::parse(format)?.predict_size())
}

/// Exact number of bytes [`pack`] produces for `values`.
pub fn compute_size(format: &str, values: &[Value]) -> Result<usize> {
    compute_size_with_options(format, values, &PackOptions::default())
}

/// [`compute_size`] with explicit options.
pub fn compute_size_with_options(format: &str, values: &[Value], options: &PackOptions) -> Result<usize> {
    Format::parse(format)?.compute_size_with_options(values, options)
}
