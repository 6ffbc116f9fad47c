//! Field adapters: one per declared [`FieldFormat`].
//!
//! An adapter binds the generic "current value + commit" contract to one kind of control. It
//! owns only transient presentation state (popover or dropdown open); the value it edits lives in
//! the form store and is passed in on every call.

pub(crate) mod color;
pub(crate) mod color_scale;
pub(crate) mod dropdown;
pub(crate) mod payload;
pub(crate) mod slider;
pub(crate) mod tags;
pub(crate) mod text;
pub(crate) mod toggle;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::color::HexColor;
use crate::foundation::error::{FormError, FormResult};
use crate::schema::model::{FieldDescriptor, FieldFormat};
use crate::view::tree::Control;

use self::color::ColorField;
use self::color_scale::ColorScaleField;
use self::dropdown::PointerTarget;
use self::slider::SliderField;
use self::tags::TagField;
use self::text::TextField;
use self::toggle::ToggleField;

/// Discrete user input aimed at one field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldEvent {
    /// Text typed into an input (plain text, color fallback input, entry title).
    Input {
        /// Full input text after the edit.
        text: String,
    },
    /// Color swatch clicked.
    SwatchClick,
    /// Click on the backdrop behind an open color picker.
    BackdropClick,
    /// Color committed from the picker.
    PickColor {
        /// Picked color.
        color: HexColor,
    },
    /// Slider moved.
    Slide {
        /// Raw slider position.
        value: f64,
    },
    /// Toggle button clicked.
    Select {
        /// Index into the field's options.
        index: usize,
    },
    /// Tag added by the tag-input widget.
    AddTag {
        /// Tag value, or a tag object.
        tag: Value,
    },
    /// Tag removed by position.
    RemoveTag {
        /// Position in the current selection.
        index: usize,
    },
    /// Serialized change payload of the tag-input widget.
    TagPayload {
        /// JSON array of tag objects.
        payload: String,
    },
    /// Pointer-down somewhere relevant to a tag dropdown.
    Pointer {
        /// Where it landed.
        target: PointerTarget,
    },
    /// Tag input focused.
    Focus,
}

impl FieldEvent {
    /// Short name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldEvent::Input { .. } => "input",
            FieldEvent::SwatchClick => "swatch_click",
            FieldEvent::BackdropClick => "backdrop_click",
            FieldEvent::PickColor { .. } => "pick_color",
            FieldEvent::Slide { .. } => "slide",
            FieldEvent::Select { .. } => "select",
            FieldEvent::AddTag { .. } => "add_tag",
            FieldEvent::RemoveTag { .. } => "remove_tag",
            FieldEvent::TagPayload { .. } => "tag_payload",
            FieldEvent::Pointer { .. } => "pointer",
            FieldEvent::Focus => "focus",
        }
    }
}

/// Contract shared by every adapter.
pub trait FieldAdapter {
    /// React to one event. Returns the value to commit, or `None` for presentation-only or
    /// ignored input.
    fn handle(&mut self, current: Option<&Value>, event: FieldEvent) -> FormResult<Option<Value>>;

    /// Describe the control for the current value.
    fn view(&self, current: Option<&Value>) -> Control;
}

pub(crate) fn unsupported(kind: &str, event: &FieldEvent) -> FormError {
    FormError::event(format!("{kind} fields do not accept {} events", event.name()))
}

/// A mounted adapter, selected by format.
#[derive(Clone, Debug, PartialEq)]
pub enum Widget {
    /// Plain text (also the fallback).
    Text(TextField),
    /// Color swatch + picker.
    Color(ColorField),
    /// Numeric slider.
    Slider(SliderField),
    /// Exclusive button group.
    Toggle(ToggleField),
    /// Tag list.
    Tags(TagField),
    /// Color-scale picker.
    ColorScale(ColorScaleField),
}

impl Widget {
    /// Mount the adapter for a descriptor's format.
    pub fn for_descriptor(descriptor: &FieldDescriptor) -> Self {
        match descriptor.format {
            FieldFormat::Color => Widget::Color(ColorField::new(descriptor)),
            FieldFormat::Tagify => Widget::Tags(TagField::new(descriptor)),
            FieldFormat::ColorsDropdown => Widget::ColorScale(ColorScaleField::new(descriptor)),
            FieldFormat::Slider => Widget::Slider(SliderField::new(descriptor)),
            FieldFormat::CustomBoolean => Widget::Toggle(ToggleField::new(descriptor)),
            FieldFormat::Plain => Widget::Text(TextField::new(descriptor)),
        }
    }

    fn adapter(&self) -> &dyn FieldAdapter {
        match self {
            Widget::Text(w) => w,
            Widget::Color(w) => w,
            Widget::Slider(w) => w,
            Widget::Toggle(w) => w,
            Widget::Tags(w) => w,
            Widget::ColorScale(w) => w,
        }
    }

    fn adapter_mut(&mut self) -> &mut dyn FieldAdapter {
        match self {
            Widget::Text(w) => w,
            Widget::Color(w) => w,
            Widget::Slider(w) => w,
            Widget::Toggle(w) => w,
            Widget::Tags(w) => w,
            Widget::ColorScale(w) => w,
        }
    }
}

impl FieldAdapter for Widget {
    fn handle(&mut self, current: Option<&Value>, event: FieldEvent) -> FormResult<Option<Value>> {
        self.adapter_mut().handle(current, event)
    }

    fn view(&self, current: Option<&Value>) -> Control {
        self.adapter().view(current)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fields/dispatch.rs"]
mod tests;
