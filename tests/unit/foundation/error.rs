use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FormError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FormError::event("x").to_string().contains("event error:"));
    assert!(
        FormError::payload("x")
            .to_string()
            .contains("payload error:")
    );
    assert!(
        FormError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FormError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = FormError::from(err);
    assert!(matches!(err, FormError::Serde(_)));
}
