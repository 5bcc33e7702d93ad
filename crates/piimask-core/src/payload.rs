//! JSON payload codec for a single record

use crate::{
    error::{Error, Result},
    types::{FieldValue, RedactedRecord, Record},
};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io;

/// Substituted for the payload of a record that failed to decode
pub const SENTINEL_PAYLOAD: &str = r#"{"error": "JSONDecodeError"}"#;

/// Decode a flat JSON object into a record. Anything other than an object
/// (array, scalar, truncated text) is a decode error.
pub fn decode(id: &str, payload: &str) -> Result<Record> {
    // Decode as plain values first: numbers keep their exact digits that way
    let values: IndexMap<String, serde_json::Value> = serde_json::from_str(payload)?;
    Ok(Record {
        id: id.to_string(),
        fields: values
            .into_iter()
            .map(|(key, value)| (key, FieldValue::from(value)))
            .collect(),
    })
}

/// Encode with `", "` and `": "` separators, keeping field order
pub fn encode(record: &RedactedRecord) -> Result<String> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut buf, SpacedFormatter);
    record.fields.serialize(&mut ser).map_err(Error::Encode)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[derive(Debug, Clone, Copy, Default)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passthrough(record: Record) -> RedactedRecord {
        RedactedRecord {
            id: record.id.clone(),
            fields: record.fields.clone(),
        }
    }

    #[test]
    fn test_decode_keeps_field_order_and_types() {
        let record = decode("7", r#"{"phone": "9876543210", "age": 31, "vip": true}"#).unwrap();
        assert_eq!(record.id, "7");
        let keys: Vec<_> = record.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["phone", "age", "vip"]);
        assert_eq!(record.text("phone"), Some("9876543210"));
        assert_eq!(record.text("age"), None);
    }

    #[test]
    fn test_decode_rejects_malformed_and_non_object_payloads() {
        for bad in [r#"{"phone": "98765"#, "not json", "[1, 2]", r#""text""#, ""] {
            let err = decode("1", bad).unwrap_err();
            assert!(matches!(err, Error::Decode(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn test_encode_uses_spaced_separators() {
        let record = decode("1", r#"{"name":"Jane Doe","tags":["a","b"],"n":null}"#).unwrap();
        let encoded = encode(&passthrough(record)).unwrap();
        assert_eq!(
            encoded,
            r#"{"name": "Jane Doe", "tags": ["a", "b"], "n": null}"#
        );
    }

    #[test]
    fn test_encode_round_trips_unredacted_payload() {
        let payload = r#"{"address": "123 Main St", "order_id": 42}"#;
        let record = decode("1", payload).unwrap();
        assert_eq!(encode(&passthrough(record)).unwrap(), payload);
    }

    #[test]
    fn test_wide_numbers_pass_through_unchanged() {
        let payload = r#"{"address": "1 Main St", "order_id": 123456789012345678901234, "ratio": 0.10}"#;
        let record = decode("1", payload).unwrap();
        assert_eq!(encode(&passthrough(record)).unwrap(), payload);
    }

    #[test]
    fn test_sentinel_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(SENTINEL_PAYLOAD).unwrap();
        assert_eq!(value["error"], "JSONDecodeError");
    }
}
