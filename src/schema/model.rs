use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;
use serde::de::{MapAccess, Visitor};
use serde_json::Value;

use crate::foundation::error::FormResult;
use crate::state::values::number_value;

/// Reserved property key holding the repeatable field group.
pub const DYNAMIC_GROUP_KEY: &str = "dynamicForms";

/// Nested key used for entry titles when the group does not name one.
pub const SERIES_TITLE_KEY: &str = "series-title";

/// Declared rendering format of a field.
///
/// The set is closed: an absent or unrecognized `format` string maps to [`FieldFormat::Plain`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldFormat {
    /// Plain text input bound to the raw string value.
    #[default]
    Plain,
    /// Swatch + color picker popover + fallback text input.
    Color,
    /// Tag list over the descriptor's `enum` options.
    Tagify,
    /// Single tag picked from the color-scale whitelist.
    ColorsDropdown,
    /// Numeric range input.
    Slider,
    /// Mutually exclusive button group over the descriptor's `enum` options.
    CustomBoolean,
}

impl FieldFormat {
    /// Schema spelling of the format (`"plain"` for the fallback).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Color => "color",
            Self::Tagify => "tagify",
            Self::ColorsDropdown => "colorsDropdown",
            Self::Slider => "slider",
            Self::CustomBoolean => "customBoolean",
        }
    }

    /// Map a schema `format` string to a format. Never fails.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            None => Self::Plain,
            Some("color") => Self::Color,
            Some("tagify") => Self::Tagify,
            Some("colorsDropdown") => Self::ColorsDropdown,
            Some("slider") => Self::Slider,
            Some("customBoolean") => Self::CustomBoolean,
            Some(other) => {
                tracing::debug!(format = other, "unrecognized field format, using plain text");
                Self::Plain
            }
        }
    }
}

impl<'de> Deserialize<'de> for FieldFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_tag(tag.as_deref()))
    }
}

/// One `{ value, label }` choice of a boolean or tag field.
#[derive(Clone, Debug, PartialEq, Deserialize, serde::Serialize)]
pub struct EnumOption {
    /// Value committed into form state when this option is picked.
    pub value: Value,
    /// Human readable label; falls back to the value when empty.
    #[serde(default)]
    pub label: String,
}

impl EnumOption {
    /// Label shown for this option.
    pub fn display_label(&self) -> String {
        if !self.label.is_empty() {
            return self.label.clone();
        }
        display_value(&self.value)
    }
}

/// Render a JSON scalar the way an input shows it (strings unquoted).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `options` block of a field descriptor.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOptions {
    /// Attributes forwarded to the underlying input element.
    #[serde(default)]
    pub input_attributes: InputAttributes,
}

/// HTML attributes of an input element.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct InputAttributes {
    /// CSS class list.
    #[serde(default)]
    pub class: String,
}

/// Schema fragment describing one input.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FieldDescriptor {
    /// Label shown next to the control.
    #[serde(default)]
    pub title: String,
    /// Rendering format.
    #[serde(default)]
    pub format: FieldFormat,
    /// Input options.
    #[serde(default)]
    pub options: FieldOptions,
    /// Choices for `customBoolean` and `tagify` fields.
    #[serde(default, rename = "enum")]
    pub choices: Vec<EnumOption>,
    /// Any non-zero value switches tag fields to single-valued mode.
    #[serde(default)]
    pub maxtags: Option<u32>,
    /// Slider lower bound.
    #[serde(default = "default_minimum", alias = "min")]
    pub minimum: f64,
    /// Slider upper bound.
    #[serde(default = "default_maximum", alias = "max")]
    pub maximum: f64,
    /// Slider increment.
    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_minimum() -> f64 {
    0.0
}

fn default_maximum() -> f64 {
    100.0
}

fn default_step() -> f64 {
    1.0
}

impl FieldDescriptor {
    /// Descriptor with the given title and format and every other attribute defaulted.
    pub fn new(title: impl Into<String>, format: FieldFormat) -> Self {
        Self {
            title: title.into(),
            format,
            options: FieldOptions::default(),
            choices: Vec::new(),
            maxtags: None,
            minimum: default_minimum(),
            maximum: default_maximum(),
            step: default_step(),
        }
    }

    /// `true` when a tag field keeps at most one tag.
    pub fn is_single_valued(&self) -> bool {
        self.maxtags.is_some_and(|n| n > 0)
    }

    /// CSS class of the input element.
    pub fn input_class(&self) -> &str {
        &self.options.input_attributes.class
    }

    /// Value seeded into a freshly added dynamic entry.
    pub fn default_value(&self) -> Value {
        match self.format {
            FieldFormat::Slider => number_value(self.minimum),
            FieldFormat::Tagify => Value::Array(Vec::new()),
            FieldFormat::Plain
            | FieldFormat::Color
            | FieldFormat::ColorsDropdown
            | FieldFormat::CustomBoolean => Value::String(String::new()),
        }
    }
}

/// The repeatable field group stored under [`DYNAMIC_GROUP_KEY`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DynamicGroup {
    /// Limit the group to at most one entry.
    pub only_one: bool,
    /// Explicit title field key.
    pub title_key: Option<String>,
    /// Nested fields in declaration order.
    pub fields: Vec<(String, FieldDescriptor)>,
}

impl DynamicGroup {
    /// Key of the field used as the entry title.
    ///
    /// Without an explicit key or a `series-title`/`title` field, only a plain text field can
    /// become the title. Formatted fields keep their own adapters.
    pub fn title_key(&self) -> Option<&str> {
        if let Some(key) = &self.title_key {
            return Some(key.as_str());
        }
        [SERIES_TITLE_KEY, "title"]
            .into_iter()
            .find(|k| self.field(k).is_some())
            .or_else(|| {
                self.fields
                    .iter()
                    .find(|(_, d)| d.format == FieldFormat::Plain)
                    .map(|(k, _)| k.as_str())
            })
    }

    /// Nested field descriptor by key.
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, d)| d)
    }

    /// Nested fields except the title field, in declaration order.
    pub fn body_fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        let title = self.title_key();
        self.fields
            .iter()
            .filter(move |(k, _)| Some(k.as_str()) != title)
            .map(|(k, d)| (k.as_str(), d))
    }
}

impl<'de> Deserialize<'de> for DynamicGroup {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Repr {
            #[serde(default)]
            only_one: bool,
            #[serde(default)]
            title_key: Option<String>,
            #[serde(default)]
            items: Items,
        }

        #[derive(Deserialize, Default)]
        struct Items {
            #[serde(default)]
            properties: OrderedMap<FieldDescriptor>,
        }

        let repr = Repr::deserialize(deserializer)?;
        Ok(Self {
            only_one: repr.only_one,
            title_key: repr.title_key,
            fields: repr.items.properties.0,
        })
    }
}

/// A parsed form schema.
///
/// Static fields keep the declaration order of the JSON document; the entry under
/// [`DYNAMIC_GROUP_KEY`] is split out as the [`DynamicGroup`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormSchema {
    pub(crate) fields: Vec<(String, FieldDescriptor)>,
    pub(crate) dynamic: Option<DynamicGroup>,
}

impl FormSchema {
    /// Build a schema from parts.
    pub fn new(fields: Vec<(String, FieldDescriptor)>, dynamic: Option<DynamicGroup>) -> Self {
        Self { fields, dynamic }
    }

    /// Parse a schema from a JSON string.
    pub fn from_json_str(s: &str) -> FormResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a schema from an already decoded JSON value.
    pub fn from_value(value: Value) -> FormResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read and parse a schema file.
    pub fn from_path(path: &Path) -> FormResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read schema '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Static fields in declaration order.
    pub fn static_fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(k, d)| (k.as_str(), d))
    }

    /// Static field descriptor by key.
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, d)| d)
    }

    /// The repeatable group, if declared.
    pub fn dynamic_group(&self) -> Option<&DynamicGroup> {
        self.dynamic.as_ref()
    }

    /// `onlyOne` flag of the dynamic group (`false` without a group).
    pub fn only_one(&self) -> bool {
        self.dynamic.as_ref().is_some_and(|g| g.only_one)
    }
}

impl<'de> Deserialize<'de> for FormSchema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            #[serde(default)]
            properties: Properties,
        }

        let repr = Repr::deserialize(deserializer)?;
        Ok(repr.properties.0)
    }
}

/// Top-level `properties` object: the reserved key decodes as a group, every other key as a
/// field, in one pass so declaration order is kept.
#[derive(Default)]
struct Properties(FormSchema);

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of field descriptors")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut schema = FormSchema::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key == DYNAMIC_GROUP_KEY {
                        schema.dynamic = Some(map.next_value::<DynamicGroup>()?);
                        continue;
                    }
                    let field = map.next_value::<FieldDescriptor>()?;
                    if let Some(slot) = schema.fields.iter_mut().find(|(k, _)| *k == key) {
                        slot.1 = field;
                    } else {
                        schema.fields.push((key, field));
                    }
                }
                Ok(Properties(schema))
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

/// JSON object decoded into a `Vec` so document order survives.
#[derive(Clone, Debug, PartialEq)]
struct OrderedMap<V>(Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, V> Deserialize<'de> for OrderedMap<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V> Visitor<'de> for OrderedVisitor<V>
        where
            V: Deserialize<'de>,
        {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of field descriptors")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out: Vec<(String, V)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    // Later duplicates win, keeping the first position.
                    if let Some(slot) = out.iter_mut().find(|(k, _)| *k == key) {
                        slot.1 = value;
                    } else {
                        out.push((key, value));
                    }
                }
                Ok(OrderedMap(out))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/model.rs"]
mod tests;
