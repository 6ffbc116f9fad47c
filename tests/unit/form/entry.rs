use super::*;
use crate::fields::dropdown::PointerTarget;
use crate::foundation::color::HexColor;
use crate::view::tree::Control;
use serde_json::{Map, json};

fn group() -> DynamicGroup {
    serde_json::from_value(json!({
        "items": {"properties": {
            "series-title": {"title": "Series name"},
            "color": {"title": "Color", "format": "color"},
            "scale": {"title": "Scale", "format": "colorsDropdown"}
        }}
    }))
    .unwrap()
}

fn entry(id: u64, title: &str) -> DynamicEntry {
    let mut values = Map::new();
    values.insert("series-title".to_owned(), json!(title));
    values.insert("color".to_owned(), json!("#ff0000"));
    DynamicEntry {
        id: EntryId(id),
        values,
    }
}

#[test]
fn starts_collapsed_with_cached_title() {
    let g = group();
    let panel = EntryPanel::new(&g, &entry(0, "Revenue"));
    assert!(!panel.is_expanded());
    assert_eq!(panel.display_title(0), "Revenue");

    let view = panel.view(&g, 0, &entry(0, "Revenue"), true, true);
    assert!(!view.expanded);
    assert!(view.title_input.is_none());
    assert!(view.fields.is_empty());
}

#[test]
fn empty_title_falls_back_to_series_number() {
    let g = group();
    let panel = EntryPanel::new(&g, &entry(3, ""));
    assert_eq!(panel.display_title(0), "Series 1");
    assert_eq!(panel.display_title(4), "Series 5");
}

#[test]
fn expanded_view_puts_title_first_and_skips_it_in_body() {
    let g = group();
    let e = entry(0, "Revenue");
    let mut panel = EntryPanel::new(&g, &e);
    panel.toggle(&g);

    let view = panel.view(&g, 2, &e, false, true);
    assert!(view.expanded);
    let title = view.title_input.as_ref().unwrap();
    assert_eq!(title.name, "dynamicForms[2].series-title");
    assert_eq!(title.label, None);
    assert_eq!(
        title.control,
        Control::Text {
            value: "Revenue".into(),
            class: String::new(),
            placeholder: Some("Series name".into()),
        }
    );
    let keys: Vec<&str> = view.fields.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, vec!["color", "scale"]);
    assert_eq!(view.fields[0].label.as_deref(), Some("Color"));
    assert_eq!(view.field("series-title").unwrap().key, "series-title");
}

#[test]
fn title_edits_update_cached_title() {
    let g = group();
    let e = entry(0, "");
    let mut panel = EntryPanel::new(&g, &e);
    panel.toggle(&g);

    let committed = panel
        .handle(
            "series-title",
            e.get("series-title"),
            FieldEvent::Input { text: "Q1".into() },
        )
        .unwrap();
    assert_eq!(committed, Some(json!("Q1")));
    assert_eq!(panel.display_title(0), "Q1");

    panel
        .handle(
            "color",
            e.get("color"),
            FieldEvent::Input {
                text: "#00ff00".into(),
            },
        )
        .unwrap();
    assert_eq!(panel.display_title(0), "Q1");

    panel
        .handle(
            "series-title",
            Some(&json!("Q1")),
            FieldEvent::Input { text: String::new() },
        )
        .unwrap();
    assert_eq!(panel.display_title(0), "");
}

#[test]
fn collapsed_or_unknown_targets_are_errors() {
    let g = group();
    let e = entry(7, "x");
    let mut panel = EntryPanel::new(&g, &e);
    let err = panel
        .handle("color", None, FieldEvent::SwatchClick)
        .unwrap_err();
    assert!(err.to_string().contains("entry-7 is collapsed"));

    panel.toggle(&g);
    let err = panel
        .handle("missing", None, FieldEvent::SwatchClick)
        .unwrap_err();
    assert!(matches!(err, FormError::Event(_)));
}

#[test]
fn collapse_drops_nested_presentation_state() {
    let g = group();
    let e = entry(0, "x");
    let mut panel = EntryPanel::new(&g, &e);
    panel.toggle(&g);
    panel
        .handle(
            "scale",
            None,
            FieldEvent::Pointer {
                target: PointerTarget::OpenChevron,
            },
        )
        .unwrap();
    let view = panel.view(&g, 0, &e, true, true);
    let Control::Tags { dropdown, .. } = &view.field("scale").unwrap().control else {
        panic!("expected tags control");
    };
    assert!(dropdown.is_some());

    panel.toggle(&g);
    panel.toggle(&g);
    let view = panel.view(&g, 0, &e, true, true);
    let Control::Tags { dropdown, .. } = &view.field("scale").unwrap().control else {
        panic!("expected tags control");
    };
    assert!(dropdown.is_none());
}

#[test]
fn action_visibility() {
    assert!(!can_remove(0));
    assert!(can_remove(1));

    assert!(can_add(true, true, false));
    assert!(!can_add(false, true, false));
    assert!(!can_add(true, false, false));
    assert!(!can_add(true, true, true));
}

#[test]
fn view_reports_actions() {
    let mut g = group();
    let e = entry(0, "x");
    let panel = EntryPanel::new(&g, &e);

    let first = panel.view(&g, 0, &e, true, true);
    assert!(!first.can_remove);
    assert!(first.can_add);

    g.only_one = true;
    let only = panel.view(&g, 1, &e, true, true);
    assert!(only.can_remove);
    assert!(!only.can_add);
}

#[test]
fn formatted_first_field_keeps_its_adapter() {
    let g: DynamicGroup = serde_json::from_value(json!({
        "items": {"properties": {
            "color": {"title": "Color", "format": "color"},
            "shape": {"title": "Shape", "format": "tagify"}
        }}
    }))
    .unwrap();
    let e = entry(1, "");
    let mut panel = EntryPanel::new(&g, &e);
    panel.toggle(&g);

    let view = panel.view(&g, 0, &e, true, true);
    assert!(view.title_input.is_none());
    assert_eq!(view.title, "Series 1");
    let keys: Vec<&str> = view.fields.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, vec!["color", "shape"]);
    assert!(matches!(
        view.field("color").unwrap().control,
        Control::Color { .. }
    ));

    let picked = panel
        .handle(
            "color",
            e.get("color"),
            FieldEvent::PickColor {
                color: HexColor::rgb(0, 0x80, 0),
            },
        )
        .unwrap();
    assert_eq!(picked, Some(json!("#008000")));
}
