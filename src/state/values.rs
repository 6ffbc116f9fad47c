use std::fmt;
use std::path::Path;

use anyhow::Context as _;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::foundation::error::FormResult;
use crate::schema::model::DYNAMIC_GROUP_KEY;

/// Stable identity of a dynamic entry, assigned when the entry is created.
///
/// Positions shift when entries are removed; ids do not. Ids never appear in snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry-{}", self.0)
    }
}

/// One instance of the dynamic group's nested fields.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicEntry {
    /// Identity of this entry.
    pub id: EntryId,
    /// Nested field values keyed by field key.
    pub values: Map<String, Value>,
}

impl DynamicEntry {
    /// Nested value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

/// Complete form state: static field values plus the ordered dynamic entries.
///
/// Serializes to the host-facing snapshot shape
/// `{ "<key>": value, ..., "dynamicForms": [ { ... }, ... ] }`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormValues {
    fields: Map<String, Value>,
    entries: Vec<DynamicEntry>,
    next_id: u64,
}

impl FormValues {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse initial values from a JSON string.
    pub fn from_json_str(s: &str) -> FormResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse initial values from a decoded JSON value.
    pub fn from_value(value: Value) -> FormResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read and parse an initial values file.
    pub fn from_path(path: &Path) -> FormResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read values '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Builder-style static value.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Builder-style dynamic entry.
    pub fn with_entry(mut self, values: Map<String, Value>) -> Self {
        self.push_entry(values);
        self
    }

    /// Static field value.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All static field values.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Dynamic entries in order.
    pub fn entries(&self) -> &[DynamicEntry] {
        &self.entries
    }

    /// Nested value of the entry at `index`.
    pub fn entry_value(&self, index: usize, key: &str) -> Option<&Value> {
        self.entries.get(index).and_then(|e| e.get(key))
    }

    /// Snapshot as a JSON value.
    pub fn to_json(&self) -> Value {
        let mut out = self.fields.clone();
        out.insert(
            DYNAMIC_GROUP_KEY.to_owned(),
            Value::Array(
                self.entries
                    .iter()
                    .map(|e| Value::Object(e.values.clone()))
                    .collect(),
            ),
        );
        Value::Object(out)
    }

    pub(crate) fn set_field(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_owned(), value);
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut DynamicEntry> {
        self.entries.get_mut(index)
    }

    pub(crate) fn push_entry(&mut self, values: Map<String, Value>) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(DynamicEntry { id, values });
        id
    }

    pub(crate) fn remove_entry(&mut self, index: usize) -> Option<DynamicEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }
}

impl Serialize for FormValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        let entries: Vec<&Map<String, Value>> = self.entries.iter().map(|e| &e.values).collect();
        map.serialize_entry(DYNAMIC_GROUP_KEY, &entries)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ValuesVisitor;

        impl<'de> Visitor<'de> for ValuesVisitor {
            type Value = FormValues;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of form values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = FormValues::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == DYNAMIC_GROUP_KEY {
                        let entries = map.next_value::<Option<Vec<Map<String, Value>>>>()?;
                        for values in entries.unwrap_or_default() {
                            out.push_entry(values);
                        }
                    } else {
                        let value = map.next_value::<Value>()?;
                        out.fields.insert(key, value);
                    }
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(ValuesVisitor)
    }
}

/// JSON number for `x`, integral when `x` has no fractional part.
pub fn number_value(x: f64) -> Value {
    // Integral floats within the exactly representable range print as integers.
    if x.fract() == 0.0 && x.abs() < 9_007_199_254_740_992.0 {
        return Value::from(x as i64);
    }
    serde_json::Number::from_f64(x)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
#[path = "../../tests/unit/state/values.rs"]
mod tests;
