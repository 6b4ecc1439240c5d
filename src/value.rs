//! Values consumed by [`pack`](crate::pack) and produced by [`unpack`](crate::unpack).
//!
//! The operation decides which kind a field needs; the value carries its
//! kind as the enum tag and is checked against the operation at the
//! encode/decode boundary.

use core::fmt;

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `b` without size.
    Bool(bool),
    /// `b[n]` and `B`.
    Bools(Vec<bool>),
    /// `i`, `I`, `v`, `V`. Unsigned 64-bit values are stored bit-for-bit.
    Int(i64),
    /// `f`, `g`, `n`.
    Float(f64),
    /// `z`, `s`, `c`, `p`.
    Str(String),
    /// `a`, `A`.
    Bytes(Vec<u8>),
}

/// The tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Bools,
    Int,
    Float,
    Str,
    Bytes,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "boolean",
            Self::Bools => "boolean array",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Str => "string",
            Self::Bytes => "byte array",
        })
    }
}

impl Value {
    /// Returns the kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Bools(_) => ValueKind::Bools,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::Str,
            Self::Bytes(_) => ValueKind::Bytes,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bools(&self) -> Option<&[bool]> {
        match self {
            Self::Bools(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Reinterprets an integer value as unsigned (two's complement bits).
    pub fn as_u64(&self) -> Option<u64> {
        self.as_i64().map(|v| v as u64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<bool>> for Value {
    fn from(v: Vec<bool>) -> Self {
        Self::Bools(v)
    }
}

impl From<&[bool]> for Value {
    fn from(v: &[bool]) -> Self {
        Self::Bools(v.to_vec())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Stores the bit pattern; values above `i64::MAX` come back negative from
/// [`Value::as_i64`] and unchanged from [`Value::as_u64`].
impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_variants() {
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(vec![true, false]).kind(), ValueKind::Bools);
        assert_eq!(Value::from(7u8).kind(), ValueKind::Int);
        assert_eq!(Value::from(1.5f32).kind(), ValueKind::Float);
        assert_eq!(Value::from("hi").kind(), ValueKind::Str);
        assert_eq!(Value::from(vec![1u8, 2]).kind(), ValueKind::Bytes);
    }

    #[test]
    fn u64_round_trips_through_bits() {
        let v = Value::from(u64::MAX);
        assert_eq!(v.as_i64(), Some(-1));
        assert_eq!(v.as_u64(), Some(u64::MAX));
    }

    #[test]
    fn accessors_reject_other_kinds() {
        let v = Value::from("text");
        assert_eq!(v.as_str(), Some("text"));
        assert_eq!(v.as_i64(), None);
        assert_eq!(v.as_bytes(), None);
        assert_eq!(v.as_bool(), None);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ValueKind::Bools.to_string(), "boolean array");
        assert_eq!(ValueKind::Bytes.to_string(), "byte array");
    }
}
