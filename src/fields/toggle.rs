use serde_json::Value;

use crate::fields::{FieldAdapter, FieldEvent, unsupported};
use crate::foundation::error::{FormError, FormResult};
use crate::schema::model::{EnumOption, FieldDescriptor};
use crate::view::tree::{Control, ToggleButton};

/// Mutually exclusive button group over the descriptor's options.
#[derive(Clone, Debug, PartialEq)]
pub struct ToggleField {
    options: Vec<EnumOption>,
}

impl ToggleField {
    /// Mount for a descriptor.
    pub fn new(descriptor: &FieldDescriptor) -> Self {
        Self {
            options: descriptor.choices.clone(),
        }
    }
}

impl FieldAdapter for ToggleField {
    fn handle(&mut self, _current: Option<&Value>, event: FieldEvent) -> FormResult<Option<Value>> {
        match event {
            FieldEvent::Select { index } => match self.options.get(index) {
                Some(option) => Ok(Some(option.value.clone())),
                None => Err(FormError::event(format!(
                    "option {index} out of range ({} options)",
                    self.options.len()
                ))),
            },
            other => Err(unsupported("toggle", &other)),
        }
    }

    fn view(&self, current: Option<&Value>) -> Control {
        Control::Toggle {
            options: self
                .options
                .iter()
                .map(|o| ToggleButton {
                    label: o.display_label(),
                    value: o.value.clone(),
                    selected: current == Some(&o.value),
                })
                .collect(),
        }
    }
}
