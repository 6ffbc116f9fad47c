use serde_json::Value;

use crate::fields::dropdown::DropdownState;
use crate::fields::payload::{TagKey, parse_tag_payload, tag_value};
use crate::fields::{FieldAdapter, FieldEvent, unsupported};
use crate::foundation::error::{FormError, FormResult};
use crate::schema::model::{EnumOption, FieldDescriptor, display_value};
use crate::view::tree::{Control, DropdownItem, TagChip};

/// Tag list over the descriptor's options.
#[derive(Clone, Debug, PartialEq)]
pub struct TagField {
    options: Vec<EnumOption>,
    single: bool,
    placeholder: String,
    dropdown: DropdownState,
}

impl TagField {
    /// Mount for a descriptor; the dropdown starts closed.
    pub fn new(descriptor: &FieldDescriptor) -> Self {
        Self {
            options: descriptor.choices.clone(),
            single: descriptor.is_single_valued(),
            placeholder: descriptor.title.clone(),
            dropdown: DropdownState::default(),
        }
    }

    /// Dropdown state.
    pub fn dropdown(&self) -> DropdownState {
        self.dropdown
    }

    fn label_for(&self, value: &Value) -> String {
        self.options
            .iter()
            .find(|o| &o.value == value)
            .map(EnumOption::display_label)
            .unwrap_or_else(|| display_value(value))
    }
}

/// Tags currently held by a field value.
///
/// Arrays are taken as-is; an empty string or null means no tags; any other scalar is one tag.
pub(crate) fn current_tags(current: Option<&Value>) -> Vec<Value> {
    match current {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
    }
}

/// Add `tag` to `tags`.
///
/// Single-valued lists evict what they held before keeping the new tag, so the result is
/// always exactly `[tag]`. Multi-valued lists append and ignore duplicates.
pub(crate) fn add_tag(mut tags: Vec<Value>, tag: Value, single: bool) -> Vec<Value> {
    if single {
        return vec![tag];
    }
    if !tags.contains(&tag) {
        tags.push(tag);
    }
    tags
}

impl FieldAdapter for TagField {
    fn handle(&mut self, current: Option<&Value>, event: FieldEvent) -> FormResult<Option<Value>> {
        match event {
            FieldEvent::AddTag { tag } => {
                let Some(tag) = tag_value(tag, TagKey::Value) else {
                    tracing::debug!("ignoring tag without a value");
                    return Ok(None);
                };
                let tags = add_tag(current_tags(current), tag, self.single);
                Ok(Some(Value::Array(tags)))
            }
            FieldEvent::RemoveTag { index } => {
                let mut tags = current_tags(current);
                if index >= tags.len() {
                    return Err(FormError::event(format!(
                        "tag {index} out of range ({} tags)",
                        tags.len()
                    )));
                }
                tags.remove(index);
                Ok(Some(Value::Array(tags)))
            }
            FieldEvent::TagPayload { payload } => match parse_tag_payload(&payload, TagKey::Value)
            {
                Ok(mut tags) => {
                    if self.single && tags.len() > 1 {
                        tags = tags.split_off(tags.len() - 1);
                    }
                    Ok(Some(Value::Array(tags)))
                }
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring malformed tag payload");
                    Ok(None)
                }
            },
            FieldEvent::Pointer { target } => {
                self.dropdown.pointer_down(target);
                Ok(None)
            }
            FieldEvent::Focus => {
                self.dropdown.focus();
                Ok(None)
            }
            other => Err(unsupported("tag", &other)),
        }
    }

    fn view(&self, current: Option<&Value>) -> Control {
        let selected = current_tags(current);
        let tags = selected
            .iter()
            .map(|v| TagChip {
                text: self.label_for(v),
                value: v.clone(),
                background: None,
            })
            .collect();
        let dropdown = self.dropdown.is_open().then(|| {
            self.options
                .iter()
                .filter(|o| !selected.contains(&o.value))
                .map(|o| DropdownItem {
                    text: o.display_label(),
                    value: o.value.clone(),
                    preview: None,
                })
                .collect()
        });
        Control::Tags {
            tags,
            placeholder: self.placeholder.clone(),
            single_value: self.single,
            dropdown,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fields/tags.rs"]
mod tests;
