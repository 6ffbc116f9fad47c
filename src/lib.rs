//! Schemaform turns a JSON form schema into a live, headless form.
//!
//! A schema declares static fields plus one repeatable group of nested fields (the
//! `dynamicForms` entries). The engine:
//!
//! - Parses and validates a [`FormSchema`]
//! - Mounts it over initial [`FormValues`] as a [`Form`]
//! - Applies [`FormEvent`]s, reporting every committed edit to a [`FormObserver`]
//! - Describes the current form as a serializable [`FormView`] (or HTML via [`to_html`])
//!
//! Rendering is left to the host: each [`Control`] maps onto one concrete widget.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod fields;
mod form;
mod foundation;
mod schema;
mod state;
mod view;

/// Named color scales offered by `colorsDropdown` fields.
pub mod scales;

pub use crate::foundation::color::HexColor;
pub use crate::foundation::error::{FormError, FormResult};

pub use crate::schema::model::{
    DYNAMIC_GROUP_KEY, DynamicGroup, EnumOption, FieldDescriptor, FieldFormat, FieldOptions,
    FormSchema, InputAttributes, SERIES_TITLE_KEY, display_value,
};
pub use crate::schema::validate::{SchemaError, SchemaErrors};

pub use crate::state::store::{Applied, FormStore, Update};
pub use crate::state::values::{DynamicEntry, EntryId, FormValues, number_value};

pub use crate::fields::color::ColorField;
pub use crate::fields::color_scale::{CUSTOM_ITEM_TEXT, ColorScaleField};
pub use crate::fields::dropdown::{DropdownState, PointerTarget};
pub use crate::fields::payload::{TagKey, parse_tag_payload};
pub use crate::fields::slider::SliderField;
pub use crate::fields::tags::TagField;
pub use crate::fields::text::TextField;
pub use crate::fields::toggle::ToggleField;
pub use crate::fields::{FieldAdapter, FieldEvent, Widget};

pub use crate::form::entry::{EntryPanel, can_add, can_remove};
pub use crate::form::observer::{FnObserver, FormObserver, Notification, RecordingObserver};
pub use crate::form::orchestrator::{FieldTarget, Form, FormEvent, FormOptions};

pub use crate::view::html::to_html;
pub use crate::view::tree::{
    Control, DropdownItem, EntryView, FieldView, FormView, TagChip, ToggleButton,
};
