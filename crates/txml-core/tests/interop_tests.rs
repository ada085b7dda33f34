//! JSON interop, configuration parsing and node paths.

use serde_json::json;
use txml_core::{
    decode_from_str, encode_to_string, Charset, DecodeOptions, DuplicateKeyPolicy, Element,
    EncodeOptions, NodePath, Value, DEFAULT_DUPLICATE_KEY_POLICY, DEFAULT_MAX_DEPTH,
};

// ============================================================================
// serde_json::Value conversions
// ============================================================================

#[test]
fn json_value_converts_with_type_fidelity() {
    let json = json!({"id": 7, "ratio": 0.25, "name": "Ada", "ok": true, "gone": null, "tags": ["a"]});
    let value = Value::from(json);
    assert_eq!(value.get("id"), Some(&Value::Integer(7)));
    assert_eq!(value.get("ratio"), Some(&Value::Float(0.25)));
    assert_eq!(value.get("name"), Some(&Value::String("Ada".into())));
    assert_eq!(value.get("ok"), Some(&Value::Bool(true)));
    assert_eq!(value.get("gone"), Some(&Value::Null));
    assert_eq!(
        value.get("tags"),
        Some(&Value::List(vec![Value::String("a".into())]))
    );
}

#[test]
fn json_object_order_is_preserved() {
    let value = Value::from(json!({"z": 1, "a": 2, "m": 3}));
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn large_unsigned_json_numbers_become_floats() {
    let value = Value::from(json!(u64::MAX));
    assert_eq!(value, Value::Float(u64::MAX as f64));
}

#[test]
fn value_converts_back_to_json() {
    let value = Value::Object(vec![
        ("n".into(), Value::Integer(-1)),
        ("f".into(), Value::Float(1.5)),
        ("inf".into(), Value::Float(f64::INFINITY)),
        ("l".into(), Value::List(vec![Value::Null, Value::Bool(false)])),
    ]);
    let json = serde_json::Value::from(value);
    assert_eq!(
        json,
        json!({"n": -1, "f": 1.5, "inf": null, "l": [null, false]})
    );
}

#[test]
fn serde_json_text_roundtrip_keeps_floats() {
    let value: Value = serde_json::from_str(r#"{"whole": 5.0, "int": 5}"#).unwrap();
    assert_eq!(value.get("whole"), Some(&Value::Float(5.0)));
    assert_eq!(value.get("int"), Some(&Value::Integer(5)));
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"whole":5.0,"int":5}"#
    );
}

#[test]
fn json_to_xml_to_json() {
    let input = json!({
        "user": {"name": "Alice", "age": 30, "score": 99.5},
        "roles": ["admin", "dev"],
        "active": true,
        "manager": null
    });
    let xml = encode_to_string(&Value::from(input.clone()), &EncodeOptions::default());
    let back = serde_json::Value::from(decode_from_str(&xml).unwrap());
    assert_eq!(back, input);
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn option_defaults() {
    let decode = DecodeOptions::default();
    assert_eq!(decode.max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(decode.duplicate_keys, DEFAULT_DUPLICATE_KEY_POLICY);
    assert_eq!(DEFAULT_DUPLICATE_KEY_POLICY, DuplicateKeyPolicy::LastWins);

    let encode = EncodeOptions::default();
    assert!(encode.pretty);
    assert!(encode.declare_xml_header);
    assert_eq!(encode.encoding, Charset::Utf8);
}

#[test]
fn options_deserialize_with_defaults_for_missing_fields() {
    let encode: EncodeOptions =
        serde_json::from_str(r#"{"pretty": false, "encoding": "Latin1"}"#).unwrap();
    assert!(!encode.pretty);
    assert!(encode.declare_xml_header);
    assert_eq!(encode.encoding, Charset::Latin1);

    let decode: DecodeOptions = serde_json::from_str(r#"{"duplicate_keys": "reject"}"#).unwrap();
    assert_eq!(decode.duplicate_keys, DuplicateKeyPolicy::Reject);
    assert_eq!(decode.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn options_reject_unknown_encodings() {
    let result = serde_json::from_str::<EncodeOptions>(r#"{"encoding": "utf-16"}"#);
    assert!(result.is_err());
}

#[test]
fn options_serialize_encoding_as_label() {
    let text = serde_json::to_string(&EncodeOptions::default()).unwrap();
    assert_eq!(
        text,
        r#"{"pretty":true,"encoding":"utf-8","declare_xml_header":true}"#
    );
}

#[test]
fn charset_labels_and_aliases() {
    assert_eq!(Charset::from_label("UTF8"), Some(Charset::Utf8));
    assert_eq!(Charset::from_label("ascii"), Some(Charset::Ascii));
    assert_eq!(Charset::from_label("latin-1"), Some(Charset::Latin1));
    assert_eq!(Charset::from_label("koi8-r"), None);
    assert_eq!(Charset::Latin1.to_string(), "iso-8859-1");
}

// ============================================================================
// Node paths
// ============================================================================

#[test]
fn node_path_display() {
    let root = NodePath::root();
    assert_eq!(root.to_string(), "/");
    assert!(root.is_root());

    let path = root.key("users").index(3).key("a/b~c");
    assert_eq!(path.to_string(), "/users/3/a~1b~0c");
    assert_eq!(path.depth(), 3);
}

// ============================================================================
// Element tree
// ============================================================================

#[test]
fn set_attribute_replaces_in_place() {
    let mut element = Element::new("ITEM")
        .with_attribute("type", "string")
        .with_attribute("value", "a");
    element.set_attribute("type", "integer");
    assert_eq!(
        element.attributes,
        vec![
            ("type".to_string(), "integer".to_string()),
            ("value".to_string(), "a".to_string())
        ]
    );
}

#[test]
fn parsed_tree_keeps_attributes_and_children() {
    let root = Element::parse_str(
        r#"<root type="list" extra="kept"><a type="null"/><b type="null"/></root>"#,
        DEFAULT_MAX_DEPTH,
    )
    .unwrap();
    assert_eq!(root.name, "root");
    assert_eq!(root.attribute("extra"), Some("kept"));
    let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(root.text, None);
}
