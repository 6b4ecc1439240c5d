//! Positional argument cursor shared by packing and size computation.

use crate::format::Operation;
use crate::options::{ExtraArguments, PackOptions};
use crate::value::{Value, ValueKind};
use crate::{Error, Result};

/// Hands out the supplied values in order, checking each against the kind
/// its operation requires.
#[derive(Debug)]
pub(crate) struct Arguments<'v> {
    values: &'v [Value],
    next: usize,
}

impl<'v> Arguments<'v> {
    pub(crate) fn new(values: &'v [Value]) -> Self {
        Self { values, next: 0 }
    }

    fn take(&mut self, op: &Operation) -> Result<(usize, &'v Value)> {
        let index = self.next;
        let value = self
            .values
            .get(index)
            .ok_or(Error::MissingArgument { index, opcode: op.opcode() })?;
        self.next += 1;
        Ok((index, value))
    }

    pub(crate) fn bool(&mut self, op: &Operation) -> Result<bool> {
        match self.take(op)? {
            (_, Value::Bool(v)) => Ok(*v),
            (index, other) => Err(mismatch(index, op, ValueKind::Bool, other)),
        }
    }

    pub(crate) fn bools(&mut self, op: &Operation) -> Result<&'v [bool]> {
        match self.take(op)? {
            (_, Value::Bools(v)) => Ok(v),
            (index, other) => Err(mismatch(index, op, ValueKind::Bools, other)),
        }
    }

    pub(crate) fn int(&mut self, op: &Operation) -> Result<i64> {
        match self.take(op)? {
            (_, Value::Int(v)) => Ok(*v),
            (index, other) => Err(mismatch(index, op, ValueKind::Int, other)),
        }
    }

    pub(crate) fn float(&mut self, op: &Operation) -> Result<f64> {
        match self.take(op)? {
            (_, Value::Float(v)) => Ok(*v),
            (index, other) => Err(mismatch(index, op, ValueKind::Float, other)),
        }
    }

    pub(crate) fn str(&mut self, op: &Operation) -> Result<&'v str> {
        match self.take(op)? {
            (_, Value::Str(v)) => Ok(v),
            (index, other) => Err(mismatch(index, op, ValueKind::Str, other)),
        }
    }

    pub(crate) fn bytes(&mut self, op: &Operation) -> Result<&'v [u8]> {
        match self.take(op)? {
            (_, Value::Bytes(v)) => Ok(v),
            (index, other) => Err(mismatch(index, op, ValueKind::Bytes, other)),
        }
    }

    /// Applies the extra-argument policy once all operations ran.
    pub(crate) fn finish(self, options: &PackOptions) -> Result<()> {
        let supplied = self.values.len();
        if self.next == supplied {
            return Ok(());
        }
        match options.extra_arguments() {
            ExtraArguments::Reject => Err(Error::ExtraArguments { expected: self.next, supplied }),
            ExtraArguments::Ignore => {
                log::warn!(
                    "ignoring {} extra argument(s): format consumes {}, got {}",
                    supplied - self.next,
                    self.next,
                    supplied
                );
                Ok(())
            }
        }
    }
}

fn mismatch(index: usize, op: &Operation, expected: ValueKind, found: &Value) -> Error {
    Error::TypeMismatch { index, opcode: op.opcode(), expected, found: found.kind() }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INT: Operation = Operation::Int { width: 4, signed: true };

    #[test]
    fn takes_in_order() {
        let values = [Value::Int(1), Value::Str("a".into())];
        let mut args = Arguments::new(&values);
        assert_eq!(args.int(&INT).unwrap(), 1);
        assert_eq!(args.str(&Operation::TerminatedString).unwrap(), "a");
        assert!(args.finish(&PackOptions::default()).is_ok());
    }

    #[test]
    fn missing_argument_reports_index() {
        let values = [Value::Int(1)];
        let mut args = Arguments::new(&values);
        args.int(&INT).unwrap();
        assert_eq!(
            args.float(&Operation::VarFloat).unwrap_err(),
            Error::MissingArgument { index: 1, opcode: 'g' }
        );
    }

    #[test]
    fn mismatch_reports_kinds() {
        let values = [Value::Float(1.0)];
        let mut args = Arguments::new(&values);
        assert_eq!(
            args.int(&INT).unwrap_err(),
            Error::TypeMismatch { index: 0, opcode: 'i', expected: ValueKind::Int, found: ValueKind::Float }
        );
    }

    #[test]
    fn extra_arguments_policy() {
        let values = [Value::Int(1), Value::Int(2)];

        let mut args = Arguments::new(&values);
        args.int(&INT).unwrap();
        assert_eq!(
            args.finish(&PackOptions::default()).unwrap_err(),
            Error::ExtraArguments { expected: 1, supplied: 2 }
        );

        let mut args = Arguments::new(&values);
        args.int(&INT).unwrap();
        let lenient = PackOptions::default().with_extra_arguments(ExtraArguments::Ignore);
        assert!(args.finish(&lenient).is_ok());
    }
}
