use serde::Serialize;
use serde_json::Value;

use crate::foundation::color::HexColor;
use crate::schema::model::FieldFormat;
use crate::state::values::EntryId;

/// Renderable description of the whole form.
///
/// The tree carries everything a host needs to draw the form; it holds no behaviour. Hosts map
/// each [`Control`] onto a concrete widget and feed user input back as events.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormView {
    /// Static fields in schema order.
    pub fields: Vec<FieldView>,
    /// One block per dynamic entry, in entry order.
    pub entries: Vec<EntryView>,
    /// `true` while a submission is being delivered.
    pub submitting: bool,
}

/// One labelled field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldView {
    /// Field key within its group.
    pub key: String,
    /// Form-state path, e.g. `speed` or `dynamicForms[1].color`.
    pub name: String,
    /// Label shown above the control.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Declared format after fallback.
    pub format: FieldFormat,
    /// The control itself.
    pub control: Control,
}

/// One block of the repeatable group.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntryView {
    /// Position in the entries list.
    pub index: usize,
    /// Stable identity.
    pub id: EntryId,
    /// Cached display title.
    pub title: String,
    /// Expanded or collapsed.
    pub expanded: bool,
    /// Title input (expanded only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_input: Option<FieldView>,
    /// Nested fields other than the title (expanded only).
    pub fields: Vec<FieldView>,
    /// Whether a `Remove` action is offered.
    pub can_remove: bool,
    /// Whether an `Add` action is offered.
    pub can_add: bool,
}

/// The control of a field, one variant per adapter.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Control {
    /// Single-line text input.
    Text {
        /// Raw input value.
        value: String,
        /// CSS class list.
        class: String,
        /// Placeholder text.
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    /// Color swatch with popover picker and fallback text input.
    Color {
        /// Inline title.
        title: String,
        /// Raw value.
        value: String,
        /// Parsed swatch color, when the value is a valid hex color.
        #[serde(skip_serializing_if = "Option::is_none")]
        swatch: Option<HexColor>,
        /// Popover state.
        picker_open: bool,
    },
    /// Numeric range input.
    Slider {
        /// Displayed value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// Increment.
        step: f64,
    },
    /// Mutually exclusive buttons.
    Toggle {
        /// One button per option.
        options: Vec<ToggleButton>,
    },
    /// Tag input with optional dropdown.
    Tags {
        /// Selected tags.
        tags: Vec<TagChip>,
        /// Placeholder text.
        placeholder: String,
        /// At most one tag is kept.
        single_value: bool,
        /// Open dropdown entries; `None` while closed.
        #[serde(skip_serializing_if = "Option::is_none")]
        dropdown: Option<Vec<DropdownItem>>,
    },
}

/// A button of a [`Control::Toggle`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToggleButton {
    /// Button text.
    pub label: String,
    /// Value committed on click.
    pub value: Value,
    /// Matches the current value.
    pub selected: bool,
}

/// A selected tag.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TagChip {
    /// Text shown in the chip.
    pub text: String,
    /// Underlying value.
    pub value: Value,
    /// Chip background (color-scale tags only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<HexColor>,
}

/// A suggestion in an open tag dropdown.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DropdownItem {
    /// Text shown for the item.
    pub text: String,
    /// Tag value added when the item is picked.
    pub value: Value,
    /// Preview strip (color scales only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Vec<HexColor>>,
}

impl FormView {
    /// Find a static field by key.
    pub fn field(&self, key: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.key == key)
    }
}

impl EntryView {
    /// Find a nested field (title included) by key.
    pub fn field(&self, key: &str) -> Option<&FieldView> {
        self.title_input
            .iter()
            .chain(self.fields.iter())
            .find(|f| f.key == key)
    }
}
