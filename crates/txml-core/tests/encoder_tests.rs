use txml_core::{
    encode_to_element, encode_to_string, encode_to_text, write_to, Charset, Element, EncodeOptions,
    Value, ELEMENT_NAME,
};

/// Helper: compact, declaration-free UTF-8 output.
fn compact(value: &Value) -> String {
    encode_to_string(value, &EncodeOptions::compact())
}

fn s(text: &str) -> Value {
    Value::String(text.to_string())
}

// ============================================================================
// Leaves
// ============================================================================

#[test]
fn encode_null() {
    assert_eq!(compact(&Value::Null), r#"<ITEM type="null"/>"#);
}

#[test]
fn encode_booleans_canonically() {
    assert_eq!(
        compact(&Value::Bool(true)),
        r#"<ITEM type="boolean" value="true"/>"#
    );
    assert_eq!(
        compact(&Value::Bool(false)),
        r#"<ITEM type="boolean" value="false"/>"#
    );
}

#[test]
fn encode_integers() {
    assert_eq!(
        compact(&Value::Integer(5)),
        r#"<ITEM type="integer" value="5"/>"#
    );
    assert_eq!(
        compact(&Value::Integer(i64::MIN)),
        r#"<ITEM type="integer" value="-9223372036854775808"/>"#
    );
}

#[test]
fn encode_floats_keep_a_fraction() {
    assert_eq!(
        compact(&Value::Float(5.0)),
        r#"<ITEM type="float" value="5.0"/>"#
    );
    assert_eq!(
        compact(&Value::Float(2.5)),
        r#"<ITEM type="float" value="2.5"/>"#
    );
    assert_eq!(
        compact(&Value::Float(0.1)),
        r#"<ITEM type="float" value="0.1"/>"#
    );
}

#[test]
fn encode_non_finite_floats() {
    assert_eq!(
        compact(&Value::Float(f64::NAN)),
        r#"<ITEM type="float" value="NaN"/>"#
    );
    assert_eq!(
        compact(&Value::Float(f64::INFINITY)),
        r#"<ITEM type="float" value="Infinity"/>"#
    );
    assert_eq!(
        compact(&Value::Float(f64::NEG_INFINITY)),
        r#"<ITEM type="float" value="-Infinity"/>"#
    );
}

#[test]
fn encode_strings_verbatim() {
    // No re-quoting: a string that looks like a number stays bare.
    assert_eq!(compact(&s("5")), r#"<ITEM type="string" value="5"/>"#);
    assert_eq!(compact(&s("")), r#"<ITEM type="string" value=""/>"#);
}

#[test]
fn encode_escapes_markup_in_strings() {
    assert_eq!(
        compact(&s(r#"a<b & "c""#)),
        r#"<ITEM type="string" value="a&lt;b &amp; &quot;c&quot;"/>"#
    );
}

#[test]
fn encode_escapes_whitespace_controls_in_attributes() {
    assert_eq!(
        compact(&s("a\tb\nc\rd")),
        r#"<ITEM type="string" value="a&#9;b&#10;c&#13;d"/>"#
    );
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn encode_empty_containers() {
    assert_eq!(compact(&Value::List(vec![])), r#"<ITEM type="list"/>"#);
    assert_eq!(compact(&Value::Object(vec![])), r#"<ITEM type="object"/>"#);
}

#[test]
fn encode_list_without_keys() {
    let value = Value::List(vec![Value::Integer(1), s("x")]);
    assert_eq!(
        compact(&value),
        r#"<ITEM type="list"><ITEM type="integer" value="1"/><ITEM type="string" value="x"/></ITEM>"#
    );
}

#[test]
fn encode_object_in_insertion_order() {
    let value = Value::Object(vec![
        ("z".into(), Value::Integer(1)),
        ("a".into(), Value::Null),
    ]);
    assert_eq!(
        compact(&value),
        r#"<ITEM type="object"><ITEM type="integer" value="1" key="z"/><ITEM type="null" key="a"/></ITEM>"#
    );
}

#[test]
fn encode_to_element_builds_the_tree() {
    let value = Value::Object(vec![(
        "a".into(),
        Value::List(vec![Value::Integer(1), Value::Float(2.5)]),
    )]);
    let root = encode_to_element(&value);
    assert_eq!(root.name, ELEMENT_NAME);
    assert_eq!(root.attribute("type"), Some("object"));
    assert_eq!(root.attribute("key"), None);
    assert_eq!(root.attribute("value"), None);

    let list = &root.children[0];
    assert_eq!(list.attribute("type"), Some("list"));
    assert_eq!(list.attribute("key"), Some("a"));
    assert_eq!(list.children.len(), 2);
    assert_eq!(list.children[1].attribute("value"), Some("2.5"));
    assert!(list.children.iter().all(|c| c.attribute("key").is_none()));
}

#[test]
fn nested_example_has_depth_three() {
    let value = Value::Object(vec![
        (
            "a".into(),
            Value::List(vec![
                Value::Integer(1),
                Value::Float(2.5),
                s("x"),
                Value::Bool(true),
                Value::Null,
            ]),
        ),
        ("b".into(), Value::Object(vec![("c".into(), Value::Null)])),
    ]);
    assert_eq!(depth(&encode_to_element(&value)), 3);
}

fn depth(element: &Element) -> usize {
    1 + element.children.iter().map(depth).max().unwrap_or(0)
}

// ============================================================================
// Output options
// ============================================================================

#[test]
fn default_output_is_pretty_with_declaration() {
    let value = Value::Object(vec![("a".into(), Value::Integer(1))]);
    let xml = encode_to_string(&value, &EncodeOptions::default());
    assert!(
        xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#),
        "{xml}"
    );
    assert!(
        xml.contains("\n<ITEM type=\"object\">\n  <ITEM type=\"integer\" value=\"1\" key=\"a\"/>\n</ITEM>"),
        "{xml}"
    );
    assert!(xml.ends_with("</ITEM>\n"), "{xml}");
}

#[test]
fn declaration_can_be_added_to_compact_output() {
    let options = EncodeOptions::compact().with_declaration(true);
    let xml = encode_to_string(&Value::Null, &options);
    assert_eq!(
        xml,
        r#"<?xml version="1.0" encoding="utf-8"?><ITEM type="null"/>"#
    );
}

#[test]
fn pretty_without_declaration() {
    let options = EncodeOptions::default().with_declaration(false);
    let xml = encode_to_string(&Value::List(vec![Value::Null]), &options);
    assert_eq!(xml, "<ITEM type=\"list\">\n  <ITEM type=\"null\"/>\n</ITEM>\n");
}

#[test]
fn latin1_output_uses_single_bytes() {
    let options = EncodeOptions::compact()
        .with_declaration(true)
        .with_charset(Charset::Latin1);
    let bytes = encode_to_text(&s("café"), &options);
    let mut expected =
        br#"<?xml version="1.0" encoding="iso-8859-1"?><ITEM type="string" value="caf"#.to_vec();
    expected.extend_from_slice(b"\xE9\"/>");
    assert_eq!(bytes, expected);
}

#[test]
fn ascii_output_uses_character_references() {
    let options = EncodeOptions::compact().with_encoding("US-ASCII").unwrap();
    let bytes = encode_to_text(&s("café 你"), &options);
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"<ITEM type="string" value="caf&#xE9; &#x4F60;"/>"#
    );
}

#[test]
fn latin1_output_escapes_characters_beyond_latin1() {
    let options = EncodeOptions::compact().with_charset(Charset::Latin1);
    let bytes = encode_to_text(&s("€"), &options);
    assert_eq!(bytes, br#"<ITEM type="string" value="&#x20AC;"/>"#.to_vec());
}

#[test]
fn encode_to_string_is_always_utf8() {
    let options = EncodeOptions::default().with_charset(Charset::Ascii);
    let xml = encode_to_string(&s("é"), &options);
    assert!(xml.contains(r#"encoding="utf-8""#), "{xml}");
    assert!(xml.contains(r#"value="é""#), "{xml}");
}

#[test]
fn unknown_encoding_is_an_options_error() {
    let err = EncodeOptions::default().with_encoding("ebcdic").unwrap_err();
    assert!(err.to_string().contains("ebcdic"));
}

#[test]
fn write_to_streams_into_a_sink() {
    let mut sink = Vec::new();
    write_to(&Value::Integer(9), &EncodeOptions::compact(), &mut sink).unwrap();
    assert_eq!(sink, br#"<ITEM type="integer" value="9"/>"#.to_vec());
}
