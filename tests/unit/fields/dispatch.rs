use super::*;
use serde_json::json;

fn descriptor(v: serde_json::Value) -> FieldDescriptor {
    serde_json::from_value(v).unwrap()
}

#[test]
fn dispatch_covers_every_format_and_falls_back_to_text() {
    let cases = [
        (json!({"title": "a"}), "text"),
        (json!({"title": "a", "format": "color"}), "color"),
        (json!({"title": "a", "format": "tagify"}), "tags"),
        (json!({"title": "a", "format": "colorsDropdown"}), "color_scale"),
        (json!({"title": "a", "format": "slider"}), "slider"),
        (
            json!({"title": "a", "format": "customBoolean", "enum": [{"value": true, "label": "On"}]}),
            "toggle",
        ),
        (json!({"title": "a", "format": "markdown"}), "text"),
        (json!({"title": "a", "format": null}), "text"),
    ];
    for (d, expected) in cases {
        let widget = Widget::for_descriptor(&descriptor(d.clone()));
        let kind = match widget {
            Widget::Text(_) => "text",
            Widget::Color(_) => "color",
            Widget::Slider(_) => "slider",
            Widget::Toggle(_) => "toggle",
            Widget::Tags(_) => "tags",
            Widget::ColorScale(_) => "color_scale",
        };
        assert_eq!(kind, expected, "{d}");
    }
}

#[test]
fn plain_text_commits_raw_string_with_class() {
    let d = descriptor(json!({
        "title": "Name",
        "options": {"inputAttributes": {"class": "name-input"}}
    }));
    let mut w = Widget::for_descriptor(&d);
    let out = w
        .handle(None, FieldEvent::Input { text: "abc".into() })
        .unwrap();
    assert_eq!(out, Some(json!("abc")));
    assert_eq!(
        w.view(Some(&json!("abc"))),
        Control::Text {
            value: "abc".into(),
            class: "name-input".into(),
            placeholder: None,
        }
    );
}

#[test]
fn mismatched_events_are_event_errors() {
    let d = descriptor(json!({"title": "Name"}));
    let mut w = Widget::for_descriptor(&d);
    let err = w.handle(None, FieldEvent::Slide { value: 1.0 }).unwrap_err();
    assert!(matches!(err, FormError::Event(_)));
    assert!(err.to_string().contains("slide"));
}

#[test]
fn color_picker_toggles_and_commits_hex() {
    let d = descriptor(json!({"title": "Line", "format": "color"}));
    let mut w = Widget::for_descriptor(&d);

    assert_eq!(w.handle(None, FieldEvent::SwatchClick).unwrap(), None);
    let Control::Color { picker_open, .. } = w.view(None) else {
        panic!("expected color control");
    };
    assert!(picker_open);

    let picked = w
        .handle(
            None,
            FieldEvent::PickColor {
                color: HexColor::rgb(0xAA, 0x00, 0x10),
            },
        )
        .unwrap();
    assert_eq!(picked, Some(json!("#aa0010")));

    assert_eq!(w.handle(None, FieldEvent::BackdropClick).unwrap(), None);
    let typed = w
        .handle(None, FieldEvent::Input { text: "red".into() })
        .unwrap();
    assert_eq!(typed, Some(json!("red")));

    match w.view(Some(&json!("#aa0010"))) {
        Control::Color {
            title,
            value,
            swatch,
            picker_open,
        } => {
            assert_eq!(title, "Line");
            assert_eq!(value, "#aa0010");
            assert_eq!(swatch, Some(HexColor::rgb(0xaa, 0x00, 0x10)));
            assert!(!picker_open);
        }
        other => panic!("unexpected control {other:?}"),
    }
    let Control::Color { swatch, .. } = w.view(Some(&json!("red"))) else {
        panic!("expected color control");
    };
    assert_eq!(swatch, None);
}

#[test]
fn color_picker_closes_on_backdrop() {
    let d = descriptor(json!({"title": "Fill", "format": "color"}));
    let mut field = crate::fields::color::ColorField::new(&d);
    assert!(!field.is_picker_open());
    field.handle(None, FieldEvent::SwatchClick).unwrap();
    assert!(field.is_picker_open());
    field.handle(None, FieldEvent::SwatchClick).unwrap();
    assert!(!field.is_picker_open());
    field.handle(None, FieldEvent::SwatchClick).unwrap();
    field.handle(None, FieldEvent::BackdropClick).unwrap();
    assert!(!field.is_picker_open());
}

#[test]
fn slider_defaults_to_min_and_snaps() {
    let d = descriptor(json!({
        "title": "Width", "format": "slider", "minimum": 2, "maximum": 10, "step": 2
    }));
    let mut w = Widget::for_descriptor(&d);

    let Control::Slider { value, min, max, step } = w.view(None) else {
        panic!("expected slider control");
    };
    assert_eq!((value, min, max, step), (2.0, 2.0, 10.0, 2.0));

    assert_eq!(
        w.handle(None, FieldEvent::Slide { value: 8.0 }).unwrap(),
        Some(json!(8))
    );
    assert_eq!(
        w.handle(None, FieldEvent::Slide { value: 7.1 }).unwrap(),
        Some(json!(8))
    );
    assert_eq!(
        w.handle(None, FieldEvent::Slide { value: 99.0 }).unwrap(),
        Some(json!(10))
    );
    assert_eq!(
        w.handle(None, FieldEvent::Slide { value: -5.0 }).unwrap(),
        Some(json!(2))
    );
    assert_eq!(
        w.handle(None, FieldEvent::Slide { value: f64::NAN }).unwrap(),
        None
    );

    let Control::Slider { value, .. } = w.view(Some(&json!("6"))) else {
        panic!("expected slider control");
    };
    assert_eq!(value, 6.0);
}

#[test]
fn slider_fractional_steps_are_clean() {
    let d = descriptor(json!({
        "title": "Opacity", "format": "slider", "min": 0, "max": 1, "step": 0.1
    }));
    let mut w = Widget::for_descriptor(&d);
    assert_eq!(
        w.handle(None, FieldEvent::Slide { value: 0.31 }).unwrap(),
        Some(json!(0.3))
    );
}

#[test]
fn slider_huge_range_still_commits_a_number() {
    let d = descriptor(json!({
        "title": "Huge", "format": "slider", "minimum": 0, "maximum": 1e300, "step": 1
    }));
    let mut w = Widget::for_descriptor(&d);
    assert_eq!(
        w.handle(None, FieldEvent::Slide { value: 1e300 }).unwrap(),
        Some(json!(1e300))
    );
    assert_eq!(
        w.handle(None, FieldEvent::Slide { value: f64::MAX }).unwrap(),
        Some(json!(1e300))
    );
}

#[test]
fn toggle_selects_option_value_and_marks_exactly_one() {
    let d = descriptor(json!({
        "title": "Legend",
        "format": "customBoolean",
        "enum": [{"value": true, "label": "Show"}, {"value": false, "label": "Hide"}]
    }));
    let mut w = Widget::for_descriptor(&d);

    assert_eq!(
        w.handle(None, FieldEvent::Select { index: 1 }).unwrap(),
        Some(json!(false))
    );
    assert!(w.handle(None, FieldEvent::Select { index: 2 }).is_err());

    let Control::Toggle { options } = w.view(Some(&json!(false))) else {
        panic!("expected toggle control");
    };
    let selected: Vec<&str> = options
        .iter()
        .filter(|b| b.selected)
        .map(|b| b.label.as_str())
        .collect();
    assert_eq!(selected, vec!["Hide"]);

    let Control::Toggle { options } = w.view(None) else {
        panic!("expected toggle control");
    };
    assert!(options.iter().all(|b| !b.selected));
}

#[test]
fn field_events_deserialize_tagged() {
    let e: FieldEvent = serde_json::from_value(json!({"type": "slide", "value": 3})).unwrap();
    assert_eq!(e, FieldEvent::Slide { value: 3.0 });
    let e: FieldEvent =
        serde_json::from_value(json!({"type": "pick_color", "color": "#00ff00"})).unwrap();
    assert_eq!(
        e,
        FieldEvent::PickColor {
            color: HexColor::rgb(0, 255, 0)
        }
    );
    let e: FieldEvent =
        serde_json::from_value(json!({"type": "pointer", "target": "outside"})).unwrap();
    assert_eq!(
        e,
        FieldEvent::Pointer {
            target: PointerTarget::Outside
        }
    );
}
