//! Flat record codecs.
//!
//! A [`Record`] maps a struct to the fields of one JSON object. Fields are
//! read by name and type-checked; fields the record does not declare are
//! ignored. The same trait backs both the plain payloads and the bodies of
//! polymorphic variants.

use jsonify_value::{parse, stringify, JsonKind, JsonObject, JsonValue};

use crate::error::DecodeError;

/// A struct that reads and writes its fields from/to a JSON object.
pub trait Record: Sized {
    /// JSON names of the declared fields, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Builds the record from an object, ignoring undeclared fields.
    fn read_fields(object: &JsonObject) -> Result<Self, DecodeError>;

    /// Appends the declared fields to `out` in declaration order.
    fn write_fields(&self, out: &mut JsonObject);
}

fn required<'a>(object: &'a JsonObject, field: &str) -> Result<&'a JsonValue, DecodeError> {
    object
        .get(field)
        .ok_or_else(|| DecodeError::MissingField(field.to_string()))
}

/// Reads an integer field. Integral floats in the `i64` range are accepted.
pub fn read_i64(object: &JsonObject, field: &str) -> Result<i64, DecodeError> {
    match required(object, field)? {
        JsonValue::Number(n) => n
            .as_i64()
            .ok_or_else(|| DecodeError::InvalidInteger(field.to_string())),
        other => Err(DecodeError::field_type(field, JsonKind::Number, other.kind())),
    }
}

pub fn read_bool(object: &JsonObject, field: &str) -> Result<bool, DecodeError> {
    match required(object, field)? {
        JsonValue::Bool(b) => Ok(*b),
        other => Err(DecodeError::field_type(field, JsonKind::Bool, other.kind())),
    }
}

pub fn read_string(object: &JsonObject, field: &str) -> Result<String, DecodeError> {
    match required(object, field)? {
        JsonValue::String(s) => Ok(s.clone()),
        other => Err(DecodeError::field_type(field, JsonKind::String, other.kind())),
    }
}

/// Checks that `value` is an object and returns its body.
pub fn expect_object(value: &JsonValue) -> Result<&JsonObject, DecodeError> {
    value.as_object().ok_or(DecodeError::ShapeMismatch {
        expected: JsonKind::Object,
        actual: value.kind(),
    })
}

/// Checks that `value` is an array and returns its items.
pub fn expect_array(value: &JsonValue) -> Result<&[JsonValue], DecodeError> {
    value.as_array().ok_or(DecodeError::ShapeMismatch {
        expected: JsonKind::Array,
        actual: value.kind(),
    })
}

pub fn decode_value<R: Record>(value: &JsonValue) -> Result<R, DecodeError> {
    R::read_fields(expect_object(value)?)
}

/// Parses `text` and decodes a single record from the root object.
pub fn decode<R: Record>(text: &str) -> Result<R, DecodeError> {
    decode_value(&parse(text)?)
}

/// Parses `text` and decodes every element of the root array.
///
/// The first failing element aborts the whole batch with its error.
pub fn decode_all<R: Record>(text: &str) -> Result<Vec<R>, DecodeError> {
    expect_array(&parse(text)?)?
        .iter()
        .map(decode_value::<R>)
        .collect()
}

pub fn encode_value<R: Record>(record: &R) -> JsonValue {
    let mut out = JsonObject::new();
    record.write_fields(&mut out);
    JsonValue::Object(out)
}

pub fn encode<R: Record>(record: &R) -> String {
    stringify(&encode_value(record))
}

pub fn encode_all<R: Record>(records: &[R]) -> String {
    stringify(&JsonValue::Array(records.iter().map(encode_value).collect()))
}
