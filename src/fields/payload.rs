use serde_json::Value;

use crate::foundation::error::{FormError, FormResult};

/// Which property of a serialized tag object carries its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKey {
    /// `tag.value` (plain tag lists).
    Value,
    /// `tag.colorScale` (color-scale picker).
    ColorScale,
}

impl TagKey {
    /// JSON property name.
    pub fn as_str(self) -> &'static str {
        match self {
            TagKey::Value => "value",
            TagKey::ColorScale => "colorScale",
        }
    }
}

/// Parse the serialized change payload of a tag input into plain values.
///
/// The payload is a JSON array of tag objects. Empty input means "no tags". Items that are not
/// objects or lack `key` are skipped. Anything that is not a JSON array is an error.
pub fn parse_tag_payload(raw: &str, key: TagKey) -> FormResult<Vec<Value>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let parsed: Value = serde_json::from_str(raw)
        .map_err(|e| FormError::payload(format!("tag payload is not JSON: {e}")))?;
    let Value::Array(items) = parsed else {
        return Err(FormError::payload("tag payload must be a JSON array"));
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(mut obj) => obj.remove(key.as_str()),
            _ => None,
        })
        .collect())
}

/// Reduce an added tag to its value: objects yield `key`, scalars pass through.
pub(crate) fn tag_value(tag: Value, key: TagKey) -> Option<Value> {
    match tag {
        Value::Object(mut obj) => obj.remove(key.as_str()),
        Value::Null => None,
        other => Some(other),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fields/payload.rs"]
mod tests;
