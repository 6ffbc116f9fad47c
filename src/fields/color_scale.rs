use serde_json::Value;

use crate::fields::dropdown::DropdownState;
use crate::fields::payload::{TagKey, parse_tag_payload, tag_value};
use crate::fields::{FieldAdapter, FieldEvent, unsupported};
use crate::foundation::error::{FormError, FormResult};
use crate::scales::{self, CUSTOM_SCALE};
use crate::schema::model::FieldDescriptor;
use crate::view::tree::{Control, DropdownItem, TagChip};

/// Text of the dropdown item for the synthetic `Custom` scale.
pub const CUSTOM_ITEM_TEXT: &str = "Custom Colors";

/// Single tag picked from the color-scale whitelist.
///
/// The committed value is the scale name (`""` when nothing is picked).
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScaleField {
    placeholder: String,
    dropdown: DropdownState,
}

impl ColorScaleField {
    /// Mount for a descriptor; the dropdown starts closed.
    pub fn new(descriptor: &FieldDescriptor) -> Self {
        Self {
            placeholder: descriptor.title.clone(),
            dropdown: DropdownState::default(),
        }
    }

    /// Dropdown state.
    pub fn dropdown(&self) -> DropdownState {
        self.dropdown
    }
}

/// Whitelisted scale name carried by a tag, after stripping any `<description>`.
fn whitelisted_name(tag: &Value) -> Option<&'static str> {
    let Value::String(text) = tag else {
        return None;
    };
    let label = scales::parse_scale_label(text);
    scales::whitelist_entry(&label.name).map(|e| e.name)
}

/// Scale name held by a field value.
pub(crate) fn current_scale(current: Option<&Value>) -> Option<String> {
    match current {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        // Older snapshots stored the selection as a list.
        Some(Value::Array(items)) => items.iter().rev().find_map(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }),
        _ => None,
    }
}

impl FieldAdapter for ColorScaleField {
    fn handle(&mut self, current: Option<&Value>, event: FieldEvent) -> FormResult<Option<Value>> {
        match event {
            FieldEvent::AddTag { tag } => {
                let name = tag_value(tag, TagKey::ColorScale)
                    .as_ref()
                    .and_then(whitelisted_name);
                match name {
                    Some(name) => Ok(Some(Value::String(name.to_owned()))),
                    None => {
                        tracing::debug!("ignoring color scale outside the whitelist");
                        Ok(None)
                    }
                }
            }
            FieldEvent::RemoveTag { index } => {
                if index == 0 && current_scale(current).is_some() {
                    Ok(Some(Value::String(String::new())))
                } else {
                    Err(FormError::event(format!("tag {index} out of range")))
                }
            }
            FieldEvent::TagPayload { payload } => {
                match parse_tag_payload(&payload, TagKey::ColorScale) {
                    Ok(tags) => {
                        // Max one effective pick: the most recent whitelisted tag wins.
                        let name = tags.iter().rev().find_map(whitelisted_name).unwrap_or("");
                        Ok(Some(Value::String(name.to_owned())))
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "ignoring malformed color scale payload");
                        Ok(None)
                    }
                }
            }
            FieldEvent::Pointer { target } => {
                self.dropdown.pointer_down(target);
                Ok(None)
            }
            FieldEvent::Focus => {
                self.dropdown.focus();
                Ok(None)
            }
            other => Err(unsupported("color scale", &other)),
        }
    }

    fn view(&self, current: Option<&Value>) -> Control {
        let selected = current_scale(current);
        let tags = selected
            .iter()
            .map(|name| TagChip {
                text: name.clone(),
                value: Value::String(name.clone()),
                background: Some(scales::chip_color(name)),
            })
            .collect();
        let dropdown = self.dropdown.is_open().then(|| {
            scales::whitelist()
                .filter(|e| selected.as_deref() != Some(e.name))
                .map(|e| DropdownItem {
                    text: if e.name == CUSTOM_SCALE {
                        CUSTOM_ITEM_TEXT.to_owned()
                    } else {
                        e.name.to_owned()
                    },
                    value: Value::String(e.name.to_owned()),
                    preview: scales::preview_strip(e.name).map(|strip| strip.to_vec()),
                })
                .collect()
        });
        Control::Tags {
            tags,
            placeholder: self.placeholder.clone(),
            single_value: true,
            dropdown,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fields/color_scale.rs"]
mod tests;
