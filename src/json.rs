//! Conversion between value lists and JSON (used by the `binpack` binary).
//!
//! JSON has no distinct integer, float, or byte types, so the conversion from
//! JSON is guided by the kinds a [`Format`] expects. Values beyond the
//! format's last field are converted by their JSON shape so that packing can
//! report them as extra arguments.
//!
//! Non-finite floats are written as the strings `"NaN"`, `"inf"` and `"-inf"`
//! and read back from the same spellings.

use core::fmt;

use serde_json::{Number, Value as Json};

use crate::format::{Format, Operation};
use crate::value::{Value, ValueKind};

/// A JSON document that cannot be turned into values.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonError {
    /// The top-level document is not an array.
    NotAnArray,
    /// Element `index` does not match the kind its field expects, or has no
    /// obvious kind when no field is left.
    Unconvertible {
        index: usize,
        expected: Option<ValueKind>,
        found: String,
    },
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnArray => f.write_str("expected a JSON array of values"),
            Self::Unconvertible { index, expected: Some(kind), found } => {
                write!(f, "value {index}: cannot convert {found} to {kind}")
            }
            Self::Unconvertible { index, expected: None, found } => {
                write!(f, "value {index}: cannot infer a value kind for {found}")
            }
        }
    }
}

impl std::error::Error for JsonError {}

/// Converts a JSON array into values for `format`.
pub fn values_from_json(format: &Format, json: &Json) -> Result<Vec<Value>, JsonError> {
    let items = json.as_array().ok_or(JsonError::NotAnArray)?;
    let mut kinds = format.operations().iter().filter_map(Operation::expected_kind);
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let expected = kinds.next();
            let converted = match expected {
                Some(kind) => convert(item, kind),
                None => infer(item),
            };
            converted.ok_or_else(|| JsonError::Unconvertible { index, expected, found: item.to_string() })
        })
        .collect()
}

/// Renders values as a JSON array.
///
/// Integers are rendered signed; see [`values_to_json_for`] for a rendering
/// that honors unsigned fields.
pub fn values_to_json(values: &[Value]) -> Json {
    Json::Array(values.iter().map(|v| value_to_json(v, false)).collect())
}

/// Renders values decoded with `format`, showing `I64` and `V` fields as
/// unsigned numbers.
pub fn values_to_json_for(format: &Format, values: &[Value]) -> Json {
    let unsigned = format
        .operations()
        .iter()
        .filter(|op| op.expected_kind().is_some())
        .map(|op| matches!(op, Operation::Int { signed: false, .. } | Operation::UnsignedVarint));
    Json::Array(
        values
            .iter()
            .zip(unsigned.chain(core::iter::repeat(false)))
            .map(|(v, unsigned)| value_to_json(v, unsigned))
            .collect(),
    )
}

fn value_to_json(value: &Value, unsigned: bool) -> Json {
    match value {
        Value::Bool(b) => Json::Bool(*b),
        Value::Bools(bits) => Json::Array(bits.iter().map(|&b| Json::Bool(b)).collect()),
        Value::Int(v) if unsigned => Json::Number(Number::from(*v as u64)),
        Value::Int(v) => Json::Number(Number::from(*v)),
        Value::Float(v) => float_to_json(*v),
        Value::Str(s) => Json::String(s.clone()),
        Value::Bytes(bytes) => Json::Array(bytes.iter().map(|&b| Json::Number(Number::from(b))).collect()),
    }
}

fn float_to_json(v: f64) -> Json {
    match Number::from_f64(v) {
        Some(n) => Json::Number(n),
        None if v.is_nan() => Json::String("NaN".into()),
        None if v > 0.0 => Json::String("inf".into()),
        None => Json::String("-inf".into()),
    }
}

fn float_from_json(json: &Json) -> Option<f64> {
    match json {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => match s.as_str() {
            "NaN" | "nan" => Some(f64::NAN),
            "inf" | "+inf" | "Infinity" => Some(f64::INFINITY),
            "-inf" | "-Infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        },
        _ => None,
    }
}

fn int_from_json(json: &Json) -> Option<i64> {
    json.as_i64().or_else(|| json.as_u64().map(|v| v as i64))
}

fn convert(json: &Json, kind: ValueKind) -> Option<Value> {
    match kind {
        ValueKind::Bool => json.as_bool().map(Value::Bool),
        ValueKind::Bools => json
            .as_array()?
            .iter()
            .map(Json::as_bool)
            .collect::<Option<Vec<_>>>()
            .map(Value::Bools),
        ValueKind::Int => int_from_json(json).map(Value::Int),
        ValueKind::Float => float_from_json(json).map(Value::Float),
        ValueKind::Str => json.as_str().map(|s| Value::Str(s.to_owned())),
        ValueKind::Bytes => json
            .as_array()?
            .iter()
            .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<_>>>()
            .map(Value::Bytes),
    }
}

fn infer(json: &Json) -> Option<Value> {
    match json {
        Json::Bool(b) => Some(Value::Bool(*b)),
        Json::Number(_) => int_from_json(json).map(Value::Int).or_else(|| convert(json, ValueKind::Float)),
        Json::String(s) => Some(Value::Str(s.clone())),
        Json::Array(items) if items.iter().all(Json::is_boolean) => convert(json, ValueKind::Bools),
        Json::Array(_) => convert(json, ValueKind::Bytes),
        Json::Null | Json::Object(_) => None,
    }
}
