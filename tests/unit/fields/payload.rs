use super::*;
use serde_json::json;

#[test]
fn empty_payload_is_empty_selection() {
    assert!(parse_tag_payload("", TagKey::Value).unwrap().is_empty());
    assert!(parse_tag_payload("   ", TagKey::ColorScale).unwrap().is_empty());
    assert!(parse_tag_payload("[]", TagKey::Value).unwrap().is_empty());
}

#[test]
fn extracts_requested_key() {
    let raw = r#"[{"value":"a","colorScale":"Viridis"},{"value":2}]"#;
    assert_eq!(
        parse_tag_payload(raw, TagKey::Value).unwrap(),
        vec![json!("a"), json!(2)]
    );
    assert_eq!(
        parse_tag_payload(raw, TagKey::ColorScale).unwrap(),
        vec![json!("Viridis")]
    );
}

#[test]
fn skips_non_objects() {
    let raw = r#"["loose", {"value":"kept"}, 3]"#;
    assert_eq!(
        parse_tag_payload(raw, TagKey::Value).unwrap(),
        vec![json!("kept")]
    );
}

#[test]
fn malformed_payload_is_a_payload_error() {
    let err = parse_tag_payload("not json", TagKey::Value).unwrap_err();
    assert!(matches!(err, FormError::Payload(_)));
    let err = parse_tag_payload(r#"{"value":"a"}"#, TagKey::Value).unwrap_err();
    assert!(matches!(err, FormError::Payload(_)));
}

#[test]
fn tag_value_unwraps_objects() {
    assert_eq!(
        tag_value(json!({"value": "x", "label": "X"}), TagKey::Value),
        Some(json!("x"))
    );
    assert_eq!(tag_value(json!("y"), TagKey::Value), Some(json!("y")));
    assert_eq!(tag_value(json!({"label": "X"}), TagKey::Value), None);
    assert_eq!(tag_value(Value::Null, TagKey::Value), None);
}
