//! Size estimation without producing bytes.
//!
//! [`predict`] looks at the format alone; [`compute`] replays the encoder's
//! accounting for a concrete value list and always agrees with the length of
//! [`encode`](crate::encoder::encode) for the same input.

use crate::encoder::Arguments;
use crate::format::{Format, Operation};
use crate::options::PackOptions;
use crate::value::Value;
use crate::{binary, boolean, integer, string, unsigned_integer, var_float, Result};

/// Static size information of a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePrediction {
    /// Sum of all fields whose size does not depend on the value.
    pub fixed_bytes: usize,
    /// Number of fields whose size depends on the value.
    pub variable_fields: usize,
    /// Total size, known only when `variable_fields == 0`.
    pub exact: Option<usize>,
}

/// Classifies every operation of `format` as fixed or variable size.
pub fn predict(format: &Format) -> SizePrediction {
    let (fixed_bytes, variable_fields) =
        format.operations().iter().fold((0usize, 0usize), |(fixed, variable), op| match op.fixed_size() {
            Some(n) => (fixed.saturating_add(n), variable),
            None => (fixed, variable + 1),
        });
    SizePrediction {
        fixed_bytes,
        variable_fields,
        exact: (variable_fields == 0).then_some(fixed_bytes),
    }
}

/// Exact encoded size of `values` under `format`.
///
/// Validates the arguments exactly as packing does, so it fails wherever
/// [`encode`](crate::encoder::encode) would.
pub fn compute(format: &Format, values: &[Value], options: &PackOptions) -> Result<usize> {
    let mut args = Arguments::new(values);
    let mut total = 0usize;
    for op in format.operations() {
        total = total.saturating_add(operation_size(op, &mut args)?);
    }
    args.finish(options)?;
    log::trace!("computed size {total} for {} operations", format.operations().len());
    Ok(total)
}

fn operation_size(op: &Operation, args: &mut Arguments<'_>) -> Result<usize> {
    let size = match *op {
        Operation::ByteOrder(_) => 0,
        Operation::Padding(n) => n,
        Operation::Bool => {
            args.bool(op)?;
            1
        }
        Operation::BitArray(count) => {
            args.bools(op)?;
            boolean::packed_len(count)
        }
        Operation::PrefixedBitArray(prefix) => {
            let count = args.bools(op)?.len();
            prefix.check(count)?;
            prefix.encoded_len(count) + boolean::packed_len(count)
        }
        Operation::Int { width, .. } => {
            args.int(op)?;
            width
        }
        Operation::Float(width) => {
            args.float(op)?;
            width.bytes()
        }
        Operation::VarFloat => var_float::encoded_len(args.float(op)?),
        Operation::SignedVarint => integer::encoded_len(args.int(op)?),
        Operation::UnsignedVarint => unsigned_integer::encoded_len(args.int(op)? as u64),
        Operation::TerminatedString => string::terminated_len(args.str(op)?),
        Operation::PrefixedString(prefix) => {
            let len = args.str(op)?.len();
            prefix.check(len)?;
            binary::prefixed_len(len, prefix)
        }
        Operation::FixedString(size) => {
            args.str(op)?;
            size
        }
        Operation::FixedBytes(size) => {
            args.bytes(op)?;
            size
        }
        Operation::PrefixedBytes(prefix) => {
            let len = args.bytes(op)?.len();
            prefix.check(len)?;
            binary::prefixed_len(len, prefix)
        }
    };
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::Error;

    fn compute_str(format: &str, values: &[Value]) -> Result<usize> {
        compute(&Format::parse(format)?, values, &PackOptions::default())
    }

    #[test]
    fn all_fixed_format_is_exact() {
        let p = predict(&Format::parse("< x2 b b9 i16 I64 f16 f64 c5 a3").unwrap());
        assert_eq!(p.variable_fields, 0);
        assert_eq!(p.fixed_bytes, 2 + 1 + 2 + 2 + 8 + 2 + 8 + 5 + 3);
        assert_eq!(p.exact, Some(p.fixed_bytes));
    }

    #[test]
    fn variable_fields_are_counted() {
        let p = predict(&Format::parse("i32 z v V g n p s2 A A1 B B1").unwrap());
        assert_eq!(p.fixed_bytes, 4);
        assert_eq!(p.variable_fields, 11);
        assert_eq!(p.exact, None);
    }

    #[test]
    fn empty_format() {
        let p = predict(&Format::parse("").unwrap());
        assert_eq!(p, SizePrediction { fixed_bytes: 0, variable_fields: 0, exact: Some(0) });
    }

    #[test]
    fn compute_matches_encoding() {
        let format = Format::parse(">x b3 B2 i24 f16 g v V z s1 p c3 a2 A").unwrap();
        let values = vec![
            Value::Bools(vec![true, false, true]),
            Value::Bools(vec![true; 12]),
            Value::Int(-5),
            Value::Float(0.5),
            Value::Float(0.1),
            Value::Int(-300),
            Value::Int(1 << 40),
            Value::from("zero"),
            Value::from("héllo"),
            Value::from(""),
            Value::from("abcdef"),
            Value::Bytes(vec![1]),
            Value::Bytes(vec![7; 130]),
        ];
        let opts = PackOptions::default();
        let bytes = encode(&format, &values, &opts).unwrap();
        assert_eq!(compute(&format, &values, &opts).unwrap(), bytes.len());
    }

    #[test]
    fn compute_validates_like_pack() {
        assert!(matches!(
            compute_str("i", &[Value::from("x")]).unwrap_err(),
            Error::TypeMismatch { index: 0, .. }
        ));
        assert_eq!(compute_str("i i", &[Value::Int(1)]).unwrap_err(), Error::MissingArgument { index: 1, opcode: 'i' });
        assert_eq!(
            compute_str("i", &[Value::Int(1), Value::Int(2)]).unwrap_err(),
            Error::ExtraArguments { expected: 1, supplied: 2 }
        );
        assert_eq!(
            compute_str("s1", &[Value::from("x".repeat(256))]).unwrap_err(),
            Error::LengthPrefixOverflow { length: 256, width: 1 }
        );
    }

    #[test]
    fn fixed_string_checks_kind() {
        assert!(matches!(
            compute_str("c4", &[Value::Int(1)]).unwrap_err(),
            Error::TypeMismatch { opcode: 'c', .. }
        ));
        assert_eq!(compute_str("x4 c4", &[Value::from("toolong")]).unwrap(), 8);
    }
}
