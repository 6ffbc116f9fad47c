use serde_json::Value;

use crate::fields::{FieldAdapter, FieldEvent, unsupported};
use crate::foundation::color::HexColor;
use crate::foundation::error::FormResult;
use crate::schema::model::{FieldDescriptor, display_value};
use crate::view::tree::Control;

/// Swatch + popover picker + fallback text input.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorField {
    title: String,
    picker_open: bool,
}

impl ColorField {
    /// Mount for a descriptor; the picker starts closed.
    pub fn new(descriptor: &FieldDescriptor) -> Self {
        Self {
            title: descriptor.title.clone(),
            picker_open: false,
        }
    }

    /// Whether the picker popover is shown.
    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }
}

impl FieldAdapter for ColorField {
    fn handle(&mut self, _current: Option<&Value>, event: FieldEvent) -> FormResult<Option<Value>> {
        match event {
            FieldEvent::SwatchClick => {
                self.picker_open = !self.picker_open;
                Ok(None)
            }
            FieldEvent::BackdropClick => {
                self.picker_open = false;
                Ok(None)
            }
            FieldEvent::PickColor { color } => Ok(Some(Value::String(color.to_string()))),
            FieldEvent::Input { text } => Ok(Some(Value::String(text))),
            other => Err(unsupported("color", &other)),
        }
    }

    fn view(&self, current: Option<&Value>) -> Control {
        let value = current.map(display_value).unwrap_or_default();
        Control::Color {
            title: self.title.clone(),
            swatch: HexColor::parse(&value).ok(),
            value,
            picker_open: self.picker_open,
        }
    }
}
