//! Required-field checks for stored records.
//!
//! Stored documents are decoded through these helpers rather than a derived
//! `Deserialize` so that an absent key and a wrongly typed key produce distinct,
//! typed errors naming the record and the field.

use crate::errors::{Error, Result};
use serde_json::{Map, Value};

/// Field name reported when the record itself has the wrong shape.
pub const RECORD_ROOT: &str = "<record>";

/// Views `value` as a JSON object.
pub fn as_object<'a>(value: &'a Value, record: &'static str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or(Error::InvalidType {
        record,
        field: RECORD_ROOT,
        expected: "an object",
    })
}

/// Looks up a key that must be present.
pub fn required<'a>(
    object: &'a Map<String, Value>,
    record: &'static str,
    field: &'static str,
) -> Result<&'a Value> {
    object.get(field).ok_or(Error::MissingField { record, field })
}

/// Looks up a key that must hold a string.
pub fn required_str<'a>(
    object: &'a Map<String, Value>,
    record: &'static str,
    field: &'static str,
) -> Result<&'a str> {
    required(object, record, field)?
        .as_str()
        .ok_or(Error::InvalidType {
            record,
            field,
            expected: "a string",
        })
}

/// Looks up a key that must hold a number. Integers are widened to `f64`.
pub fn required_number(
    object: &Map<String, Value>,
    record: &'static str,
    field: &'static str,
) -> Result<f64> {
    required(object, record, field)?
        .as_f64()
        .ok_or(Error::InvalidType {
            record,
            field,
            expected: "a number",
        })
}

/// Looks up a key that must hold an array.
pub fn required_array<'a>(
    object: &'a Map<String, Value>,
    record: &'static str,
    field: &'static str,
) -> Result<&'a [Value]> {
    required(object, record, field)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or(Error::InvalidType {
            record,
            field,
            expected: "an array",
        })
}
