//! Descriptor parsing, serialization and property access.
//!
//! Descriptors are kept as ordered JSON objects so that a parsed descriptor
//! serializes back with the same key order and value types. Named fields
//! are read through typed accessors layered on the [`Properties`] trait
//! rather than by mirroring them into struct fields.

use serde_json::{Map, Value};

use crate::error::{PackageError, PackageResult};

/// An ordered JSON object holding a package or resource descriptor.
pub type Descriptor = Map<String, Value>;

/// Parse descriptor text.
///
/// `origin` names where the bytes came from (a path or URL) and is only used
/// in error messages.
pub fn parse_descriptor(bytes: &[u8], origin: &str) -> PackageResult<Descriptor> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| PackageError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(PackageError::InvalidDescriptor {
            origin: origin.to_string(),
            reason: format!("expected a JSON object, found {}", json_type_name(&other)),
        }),
    }
}

/// Serialize a descriptor to compact JSON text.
pub fn serialize_descriptor(descriptor: &Descriptor) -> String {
    Value::Object(descriptor.clone()).to_string()
}

/// Serialize a descriptor to indented JSON text.
pub fn serialize_descriptor_pretty(descriptor: &Descriptor) -> String {
    // Serializing a `Value` cannot fail: all map keys are strings.
    serde_json::to_string_pretty(descriptor).unwrap_or_default()
}

/// Human-readable name of a JSON value's type.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Property-bag access over a descriptor.
///
/// Implemented by packages and every resource variant. A `null` value is
/// treated the same as an absent key.
pub trait Properties {
    /// The underlying descriptor.
    fn properties(&self) -> &Descriptor;

    /// Mutable access to the underlying descriptor.
    fn properties_mut(&mut self) -> &mut Descriptor;

    /// Read a property, `None` when absent or null.
    fn property(&self, name: &str) -> Option<&Value> {
        self.properties().get(name).filter(|v| !v.is_null())
    }

    /// Read a property, falling back to `default` when absent or null.
    fn property_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.property(name).unwrap_or(default)
    }

    /// Set a property, returning the previous value.
    ///
    /// Existing keys keep their position; new keys are appended.
    fn set_property(&mut self, name: &str, value: Value) -> Option<Value> {
        self.properties_mut().insert(name.to_string(), value)
    }

    /// Remove a property, preserving the order of the remaining keys.
    fn remove_property(&mut self, name: &str) -> Option<Value> {
        self.properties_mut().shift_remove(name)
    }

    /// Read a string property.
    fn string_property(&self, name: &str) -> Option<&str> {
        self.property(name).and_then(Value::as_str)
    }

    /// Read an array property, empty when absent or not an array.
    fn array_property(&self, name: &str) -> &[Value] {
        self.property(name)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Read an object property, empty when absent or not an object.
    fn object_property(&self, name: &str) -> Descriptor {
        self.property(name)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Bag(Descriptor);

    impl Properties for Bag {
        fn properties(&self) -> &Descriptor {
            &self.0
        }

        fn properties_mut(&mut self) -> &mut Descriptor {
            &mut self.0
        }
    }

    fn bag(value: Value) -> Bag {
        match value {
            Value::Object(map) => Bag(map),
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn test_parse_object() {
        let map = parse_descriptor(br#"{"name":"test-package"}"#, "memory").unwrap();
        assert_eq!(map.get("name"), Some(&json!("test-package")));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_descriptor(b"{not json", "broken.json").unwrap_err();
        assert!(matches!(err, PackageError::Parse { ref origin, .. } if origin == "broken.json"));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = parse_descriptor(b"[1, 2, 3]", "list.json").unwrap_err();
        match err {
            PackageError::InvalidDescriptor { reason, .. } => assert!(reason.contains("array")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_serialize_keeps_key_order() {
        let text = r#"{"zeta":1,"alpha":[true,null,2.5],"mid":{"b":"x","a":"y"}}"#;
        let map = parse_descriptor(text.as_bytes(), "memory").unwrap();
        assert_eq!(serialize_descriptor(&map), text);
    }

    #[test]
    fn test_property_defaults() {
        let b = bag(json!({"my-property": "value", "empty": null}));
        let fallback = json!("default");

        assert_eq!(b.property("my-property"), Some(&json!("value")));
        assert_eq!(b.property("another-property"), None);
        assert_eq!(b.property("empty"), None);
        assert_eq!(b.property_or("another-property", &fallback), &fallback);
    }

    #[test]
    fn test_set_property_keeps_position() {
        let mut b = bag(json!({"name": "a", "description": "d"}));
        b.set_property("name", json!("b"));
        b.set_property("extra", json!(1));

        let keys: Vec<&String> = b.properties().keys().collect();
        assert_eq!(keys, ["name", "description", "extra"]);
    }

    #[test]
    fn test_remove_property_keeps_order() {
        let mut b = bag(json!({"a": 1, "b": 2, "c": 3}));
        assert_eq!(b.remove_property("a"), Some(json!(1)));

        let keys: Vec<&String> = b.properties().keys().collect();
        assert_eq!(keys, ["b", "c"]);
    }

    #[test]
    fn test_typed_accessors() {
        let b = bag(json!({"title": "T", "keywords": ["x"], "deps": {"a": 1}, "bad": 3}));

        assert_eq!(b.string_property("title"), Some("T"));
        assert_eq!(b.string_property("bad"), None);
        assert_eq!(b.array_property("keywords"), &[json!("x")]);
        assert!(b.array_property("bad").is_empty());
        assert_eq!(b.object_property("deps").len(), 1);
        assert!(b.object_property("missing").is_empty());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_json() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(|n| json!(n)),
                "[a-z ]{0,8}".prop_map(Value::String),
            ];
            leaf.prop_recursive(3, 32, 4, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                    prop::collection::vec(("[a-z]{1,6}", inner), 0..4)
                        .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
                ]
            })
        }

        proptest! {
            #[test]
            fn test_roundtrip_property(
                pairs in prop::collection::vec(("[a-zA-Z_-]{1,10}", arb_json()), 0..6)
            ) {
                let map: Descriptor = pairs.into_iter().collect();
                let text = serialize_descriptor(&map);
                let parsed = parse_descriptor(text.as_bytes(), "memory")?;

                prop_assert_eq!(&parsed, &map);
                prop_assert_eq!(serialize_descriptor(&parsed), text);
            }
        }
    }
}
