use super::*;
use serde_json::json;

fn store_with_entries(n: usize) -> FormStore {
    let mut values = FormValues::new();
    for i in 0..n {
        let mut m = Map::new();
        m.insert("title".to_owned(), json!(format!("e{i}")));
        values = values.with_entry(m);
    }
    FormStore::new(values)
}

#[test]
fn set_field_commits() {
    let mut store = FormStore::default();
    let applied = store.apply(Update::SetField {
        key: "slider".to_owned(),
        value: json!(8),
    });
    assert_eq!(applied, Applied::Changed);
    assert_eq!(store.values().field("slider"), Some(&json!(8)));
}

#[test]
fn set_entry_field_misses_out_of_range() {
    let mut store = store_with_entries(1);
    let applied = store.apply(Update::SetEntryField {
        index: 3,
        key: "title".to_owned(),
        value: json!("Q1"),
    });
    assert!(!applied.committed());

    let applied = store.apply(Update::SetEntryField {
        index: 0,
        key: "title".to_owned(),
        value: json!("Q1"),
    });
    assert!(applied.committed());
    assert_eq!(store.values().entry_value(0, "title"), Some(&json!("Q1")));
}

#[test]
fn remove_preserves_relative_order() {
    for i in 0..4 {
        let mut store = store_with_entries(4);
        let before: Vec<Value> = store
            .values()
            .entries()
            .iter()
            .map(|e| e.values["title"].clone())
            .collect();

        assert!(store.apply(Update::RemoveEntry(i)).committed());

        let after: Vec<Value> = store
            .values()
            .entries()
            .iter()
            .map(|e| e.values["title"].clone())
            .collect();
        let mut expected = before.clone();
        expected.remove(i);
        assert_eq!(after, expected);
    }
}

#[test]
fn append_returns_fresh_id() {
    let mut store = store_with_entries(2);
    let applied = store.apply(Update::AppendEntry(Map::new()));
    assert_eq!(applied, Applied::Appended(EntryId(2)));
    assert_eq!(store.values().entries().len(), 3);
}
