//! Shared response-decoding machinery.
//!
//! Every response type implements [`Decode`]: a pure function from raw body
//! bytes to a typed value. The field accessors here encode the agent's
//! tolerance rules in one place so the per-response decoders in
//! [`crate::response`] stay mechanical:
//!
//! - string fields tolerate `null`/absent and decode to `""`;
//! - numeric and boolean fields are required;
//! - [`array`] demands the named field be a JSON array and every element
//!   parse, aborting with [`DecodeError::MalformedElement`] otherwise;
//! - [`array_or_empty`] additionally treats a `null`/absent/non-array field
//!   as an empty list. Only the list-style replies (api index, dataset,
//!   drives, files) get this leniency — a transient empty state on those
//!   endpoints is legitimate, not an error.
//!
//! Unknown and extra fields are ignored everywhere.

use serde_json::Value;
use thiserror::Error;

/// A response decode failure.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("malformed '{0}' element in response array")]
    MalformedElement(&'static str),
}

/// A typed response that can be decoded from raw HTTP body bytes.
///
/// Decoding is synchronous, touches no global state, and depends on nothing
/// but the expected shape.
pub trait Decode: Sized {
    fn decode(body: &[u8]) -> Result<Self, DecodeError>;
}

/// Parse the body as a JSON document.
pub(crate) fn document(body: &[u8]) -> Result<Value, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}

/// A required non-null field.
pub(crate) fn field<'a>(value: &'a Value, name: &'static str) -> Result<&'a Value, DecodeError> {
    value
        .get(name)
        .filter(|v| !v.is_null())
        .ok_or(DecodeError::MissingField(name))
}

/// A string field; `null`/absent decodes as `""`.
pub(crate) fn string(value: &Value, name: &str) -> String {
    value
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// A nullable string field; `null`/absent decodes as `None`.
pub(crate) fn opt_string(value: &Value, name: &str) -> Option<String> {
    value.get(name).and_then(Value::as_str).map(str::to_string)
}

/// A required integer field.
pub(crate) fn int(value: &Value, name: &'static str) -> Result<i64, DecodeError> {
    field(value, name)?
        .as_i64()
        .ok_or(DecodeError::MissingField(name))
}

/// A required boolean field.
pub(crate) fn boolean(value: &Value, name: &'static str) -> Result<bool, DecodeError> {
    field(value, name)?
        .as_bool()
        .ok_or(DecodeError::MissingField(name))
}

/// A required array field, decoded element-wise. An element the parser
/// rejects aborts the whole decode.
pub(crate) fn array<T>(
    value: &Value,
    name: &'static str,
    parse: impl Fn(&Value) -> Option<T>,
) -> Result<Vec<T>, DecodeError> {
    let elements = field(value, name)?
        .as_array()
        .ok_or(DecodeError::MissingField(name))?;
    elements
        .iter()
        .map(|e| parse(e).ok_or(DecodeError::MalformedElement(name)))
        .collect()
}

/// An array field where `null`/absent/non-array decodes as an empty list.
/// Elements that are present still must parse.
pub(crate) fn array_or_empty<T>(
    value: &Value,
    name: &'static str,
    parse: impl Fn(&Value) -> Option<T>,
) -> Result<Vec<T>, DecodeError> {
    match value.get(name).and_then(Value::as_array) {
        Some(elements) => elements
            .iter()
            .map(|e| parse(e).ok_or(DecodeError::MalformedElement(name)))
            .collect(),
        None => Ok(Vec::new()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_tolerates_null_and_absent() {
        let v = json!({ "present": "x", "nulled": null });
        assert_eq!(string(&v, "present"), "x");
        assert_eq!(string(&v, "nulled"), "");
        assert_eq!(string(&v, "missing"), "");
    }

    #[test]
    fn int_rejects_null_and_absent() {
        let v = json!({ "ok": 7, "nulled": null });
        assert_eq!(int(&v, "ok").unwrap(), 7);
        assert!(matches!(
            int(&v, "nulled"),
            Err(DecodeError::MissingField("nulled"))
        ));
        assert!(matches!(
            int(&v, "gone"),
            Err(DecodeError::MissingField("gone"))
        ));
    }

    #[test]
    fn strict_array_rejects_null() {
        let v = json!({ "xs": null });
        assert!(matches!(
            array(&v, "xs", |e| e.as_i64()),
            Err(DecodeError::MissingField("xs"))
        ));
    }

    #[test]
    fn lenient_array_accepts_null_absent_and_non_array() {
        let parse = |e: &Value| e.as_i64();
        assert_eq!(array_or_empty(&json!({ "xs": null }), "xs", parse).unwrap(), Vec::<i64>::new());
        assert_eq!(array_or_empty(&json!({}), "xs", parse).unwrap(), Vec::<i64>::new());
        assert_eq!(array_or_empty(&json!({ "xs": 3 }), "xs", parse).unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn lenient_array_still_rejects_bad_elements() {
        let v = json!({ "xs": [1, "two", 3] });
        assert!(matches!(
            array_or_empty(&v, "xs", |e| e.as_i64()),
            Err(DecodeError::MalformedElement("xs"))
        ));
    }
}
