use serde_json::Value;

use crate::fields::{FieldAdapter, FieldEvent, unsupported};
use crate::foundation::error::FormResult;
use crate::schema::model::{FieldDescriptor, display_value};
use crate::view::tree::Control;

/// Plain text input bound to the raw string value.
#[derive(Clone, Debug, PartialEq)]
pub struct TextField {
    class: String,
    placeholder: Option<String>,
}

impl TextField {
    /// Mount for a descriptor.
    pub fn new(descriptor: &FieldDescriptor) -> Self {
        Self {
            class: descriptor.input_class().to_owned(),
            placeholder: None,
        }
    }

    /// Text input with the descriptor title as placeholder (entry titles).
    pub fn with_placeholder(descriptor: &FieldDescriptor) -> Self {
        Self {
            class: descriptor.input_class().to_owned(),
            placeholder: Some(descriptor.title.clone()).filter(|t| !t.is_empty()),
        }
    }
}

impl FieldAdapter for TextField {
    fn handle(&mut self, _current: Option<&Value>, event: FieldEvent) -> FormResult<Option<Value>> {
        match event {
            FieldEvent::Input { text } => Ok(Some(Value::String(text))),
            other => Err(unsupported("text", &other)),
        }
    }

    fn view(&self, current: Option<&Value>) -> Control {
        Control::Text {
            value: current.map(display_value).unwrap_or_default(),
            class: self.class.clone(),
            placeholder: self.placeholder.clone(),
        }
    }
}
