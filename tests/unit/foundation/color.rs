use super::*;
use serde_json::json;

#[test]
fn parses_long_and_short_forms() {
    assert_eq!(HexColor::parse("#ff0000").unwrap(), HexColor::rgb(255, 0, 0));
    assert_eq!(HexColor::parse("00FF80").unwrap(), HexColor::rgb(0, 255, 128));
    assert_eq!(HexColor::parse("#f80").unwrap(), HexColor::rgb(0xff, 0x88, 0x00));
}

#[test]
fn display_is_lower_case_six_digits() {
    let c: HexColor = "#ABCDEF".parse().unwrap();
    assert_eq!(c.to_string(), "#abcdef");
    assert_eq!(HexColor::NEUTRAL.to_string(), "#d4d4d4");
}

#[test]
fn rejects_bad_lengths_and_digits() {
    assert!(HexColor::parse("#ff00").is_err());
    assert!(HexColor::parse("#gg0000").is_err());
    assert!(HexColor::parse("").is_err());
    assert!(HexColor::parse("#ééé").is_err());
    assert!(HexColor::parse("#+f+f+f").is_err());
    assert!(HexColor::parse("#-1-1-1").is_err());
}

#[test]
fn serde_uses_string_form() {
    let c: HexColor = serde_json::from_value(json!("#102030")).unwrap();
    assert_eq!(c, HexColor::rgb(0x10, 0x20, 0x30));
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#102030"));
    assert!(serde_json::from_value::<HexColor>(json!("nope")).is_err());
}
