//! Serde encodings of the value tree
//!
//! Two encodings exist:
//!
//! - **detailed**: every node is an object `{"value": ..., "secret": true,
//!   "unknown": true, "trace": {...}}`, with `secret`, `unknown` and `trace`
//!   omitted when unset. Arrays and objects inside `value` hold detailed
//!   nodes. This is what the service returns and what the `detailed` output
//!   format prints.
//! - **plain**: ordinary JSON, no metadata. Used to build trees from
//!   fixtures and literals.
//!
//! Both decoders preserve object member order.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::{ObjectMap, Value, ValueKind};
use crate::errors::{EnvxError, Result};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = 1
            + usize::from(self.secret)
            + usize::from(self.unknown)
            + usize::from(self.trace.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("value", &DetailedPayload(&self.kind))?;
        if self.secret {
            map.serialize_entry("secret", &true)?;
        }
        if self.unknown {
            map.serialize_entry("unknown", &true)?;
        }
        if let Some(trace) = &self.trace {
            map.serialize_entry("trace", trace)?;
        }
        map.end()
    }
}

struct DetailedPayload<'a>(&'a ValueKind);

impl Serialize for DetailedPayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            ValueKind::Null => serializer.serialize_unit(),
            ValueKind::Bool(b) => serializer.serialize_bool(*b),
            ValueKind::Number(n) => n.serialize(serializer),
            ValueKind::String(s) => serializer.serialize_str(s),
            ValueKind::Array(items) => serializer.collect_seq(items),
            ValueKind::Object(map) => serializer.collect_map(map.iter()),
        }
    }
}

/// Payload visitor; `T` decides how nested nodes are decoded
struct KindVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for KindVisitor<T>
where
    T: Deserialize<'de> + Into<Value>,
{
    type Value = ValueKind;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<ValueKind, E> {
        Ok(ValueKind::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<ValueKind, E> {
        Ok(ValueKind::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<ValueKind, D::Error> {
        d.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> std::result::Result<ValueKind, E> {
        Ok(ValueKind::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> std::result::Result<ValueKind, E> {
        Ok(ValueKind::Number(n.into()))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> std::result::Result<ValueKind, E> {
        Ok(ValueKind::Number(n.into()))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> std::result::Result<ValueKind, E> {
        Number::from_f64(n)
            .map(ValueKind::Number)
            .ok_or_else(|| E::custom(format!("non-finite number {}", n)))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<ValueKind, E> {
        Ok(ValueKind::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> std::result::Result<ValueKind, E> {
        Ok(ValueKind::String(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<ValueKind, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<T>()? {
            items.push(item.into());
        }
        Ok(ValueKind::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<ValueKind, A::Error> {
        let mut map = ObjectMap::new();
        while let Some((key, value)) = access.next_entry::<String, T>()? {
            map.insert(key, value.into());
        }
        Ok(ValueKind::Object(map))
    }
}

struct DetailedKind(ValueKind);

impl<'de> Deserialize<'de> for DetailedKind {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        d.deserialize_any(KindVisitor::<Value>(PhantomData)).map(DetailedKind)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        d.deserialize_map(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a value object with a `value` member")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Value, A::Error> {
        let mut node = Value::default();
        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "value" => node.kind = access.next_value::<DetailedKind>()?.0,
                "secret" => node.secret = access.next_value::<Option<bool>>()?.unwrap_or(false),
                "unknown" => node.unknown = access.next_value::<Option<bool>>()?.unwrap_or(false),
                "trace" => node.trace = access.next_value()?,
                _ => {
                    access.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(node)
    }
}

/// Decode a JSON object whose members are detailed nodes
///
/// `null` decodes as an empty map; any other non-object payload is an error.
pub fn deserialize_detailed_members<'de, D>(d: D) -> std::result::Result<ObjectMap, D::Error>
where
    D: Deserializer<'de>,
{
    match d.deserialize_any(KindVisitor::<Value>(PhantomData))? {
        ValueKind::Object(map) => Ok(map),
        ValueKind::Null => Ok(ObjectMap::new()),
        other => Err(de::Error::custom(format!(
            "expected an object of values, found {}",
            other.type_name()
        ))),
    }
}

/// A value decoded from plain JSON
struct Plain(Value);

impl From<Plain> for Value {
    fn from(plain: Plain) -> Self {
        plain.0
    }
}

impl<'de> Deserialize<'de> for Plain {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        d.deserialize_any(KindVisitor::<Plain>(PhantomData))
            .map(|kind| Plain(Value::new(kind)))
    }
}

/// Build a metadata-free tree from plain JSON text, keeping member order
///
/// # Errors
///
/// Returns `EnvxError::Serialization` when `text` is not valid JSON.
pub fn parse_plain(text: &str) -> Result<Value> {
    serde_json::from_str::<Plain>(text)
        .map(Value::from)
        .map_err(EnvxError::from)
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::null(),
            serde_json::Value::Bool(b) => Value::bool(b),
            serde_json::Value::Number(n) => Value::number(n),
            serde_json::Value::String(s) => Value::string(s),
            serde_json::Value::Array(items) => Value::array(items.into_iter().map(Value::from)),
            serde_json::Value::Object(map) => {
                Value::object(map.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Pos, Range, Trace};

    #[test]
    fn test_detailed_decode_keeps_metadata_and_order() {
        let text = r#"{
            "value": {
                "zeta": {"value": "z"},
                "alpha": {"value": "a", "secret": true},
                "list": {"value": [{"value": 1}, {"value": null, "unknown": true}]}
            },
            "trace": {"def": {"environment": "acme/dev", "begin": {"line": 1, "column": 1, "byte": 0}, "end": {"line": 9, "column": 1, "byte": 120}}}
        }"#;

        let root: Value = serde_json::from_str(text).unwrap();
        let map = root.as_object().unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "list"]);
        assert!(map.get("alpha").unwrap().is_secret());
        assert!(root.get("list").unwrap().get_index(1).unwrap().is_unknown());
        assert_eq!(
            root.trace().and_then(|t| t.def.as_ref()).map(|r| r.environment.as_str()),
            Some("acme/dev")
        );
    }

    #[test]
    fn test_detailed_decode_rejects_bare_array_elements() {
        let err = serde_json::from_str::<Value>(r#"{"value": [1, 2]}"#).unwrap_err();
        assert!(err.to_string().contains("value object"));
    }

    #[test]
    fn test_detailed_encode_omits_unset_metadata() {
        let v = Value::object([("a".to_string(), Value::string("x").with_secret(true))]);
        let text = serde_json::to_string(&v).unwrap();
        assert_eq!(text, r#"{"value":{"a":{"value":"x","secret":true}}}"#);
    }

    #[test]
    fn test_detailed_encode_includes_trace() {
        let v = Value::number(7).with_trace(Trace {
            def: Some(Range {
                environment: String::new(),
                begin: Pos {
                    line: 2,
                    column: 3,
                    byte: 10,
                },
                end: Pos {
                    line: 2,
                    column: 4,
                    byte: 11,
                },
            }),
            base: None,
        });
        let json: serde_json::Value = serde_json::to_value(&v).unwrap();
        assert_eq!(json["trace"]["def"]["begin"]["line"], 2);
        assert!(json["trace"].get("base").is_none());
    }

    #[test]
    fn test_parse_plain_preserves_order() {
        let v = parse_plain(r#"{"b": 1, "a": {"d": true, "c": null}}"#).unwrap();
        assert_eq!(v.as_object().unwrap().keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(
            v.get("a").unwrap().as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["d", "c"]
        );
    }

    #[test]
    fn test_parse_plain_rejects_invalid_json() {
        assert!(matches!(
            parse_plain("{not json"),
            Err(EnvxError::Serialization { .. })
        ));
    }

    #[test]
    fn test_from_serde_json_value() {
        let v = Value::from(serde_json::json!({"x": [1, "two", false]}));
        let items = v.get("x").and_then(Value::as_array).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].as_str(), Some("two"));
    }
}
