use super::*;

#[test]
fn whitelist_is_ordered_with_custom_last() {
    let entries: Vec<ScaleEntry> = whitelist().collect();
    assert_eq!(entries.len(), 38);
    assert_eq!(entries.len(), whitelist_len());
    assert_eq!(entries[0], ScaleEntry { id: 1, name: "YlGnBu" });
    assert_eq!(entries[1].name, "Viridis");
    assert_eq!(entries[36], ScaleEntry { id: 37, name: "BrBG" });
    assert_eq!(entries[37], ScaleEntry { id: 38, name: CUSTOM_SCALE });
    assert!(entries[37].is_custom());
    for (i, e) in entries.iter().enumerate() {
        assert_eq!(e.id as usize, i + 1);
    }
}

#[test]
fn custom_has_no_interpolator() {
    assert!(lookup(CUSTOM_SCALE).is_none());
    assert!(whitelist_entry(CUSTOM_SCALE).is_some());
    assert_eq!(chip_color(CUSTOM_SCALE), HexColor::NEUTRAL);
    assert!(preview_strip(CUSTOM_SCALE).is_none());
}

#[test]
fn unknown_names_fall_back() {
    assert!(lookup("NotAScale").is_none());
    assert!(whitelist_entry("NotAScale").is_none());
    assert_eq!(chip_color("NotAScale"), HexColor::NEUTRAL);
    assert!(sample("NotAScale", 0.5).is_none());
}

#[test]
fn chip_color_is_midpoint_of_interpolator() {
    for entry in whitelist().filter(|e| !e.is_custom()) {
        let f = lookup(entry.name).unwrap();
        assert_eq!(chip_color(entry.name), HexColor::from(f(0.5)), "{}", entry.name);
    }
    assert_eq!(
        chip_color("Viridis"),
        HexColor::from(colorous::VIRIDIS.eval_continuous(0.5))
    );
}

#[test]
fn preview_strip_samples_ten_even_points() {
    let strip = preview_strip("Turbo").unwrap();
    let f = lookup("Turbo").unwrap();
    for (i, c) in strip.iter().enumerate() {
        assert_eq!(*c, HexColor::from(f(i as f64 / 9.0)));
    }
    assert_eq!(strip[0], sample("Turbo", 0.0).unwrap());
    assert_eq!(strip[9], sample("Turbo", 1.0).unwrap());
}

#[test]
fn sample_clamps_t() {
    assert_eq!(sample("Greys", -3.0), sample("Greys", 0.0));
    assert_eq!(sample("Greys", 7.0), sample("Greys", 1.0));
    assert_eq!(sample("Greys", f64::NAN), sample("Greys", 0.0));
}

#[test]
fn scale_labels_split_description() {
    assert_eq!(
        parse_scale_label("  Viridis <perceptual> "),
        ScaleLabel {
            name: "Viridis".to_owned(),
            description: Some("perceptual".to_owned()),
        }
    );
    assert_eq!(
        parse_scale_label("Magma"),
        ScaleLabel {
            name: "Magma".to_owned(),
            description: None,
        }
    );
    assert_eq!(parse_scale_label("Reds <>").description, None);
    assert_eq!(parse_scale_label("Reds <open").name, "Reds");
}
