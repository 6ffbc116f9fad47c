use serde_json::Value;

use crate::fields::text::TextField;
use crate::fields::{FieldAdapter, FieldEvent, Widget};
use crate::foundation::error::{FormError, FormResult};
use crate::schema::model::{DynamicGroup, FieldDescriptor, FieldFormat, display_value};
use crate::state::values::{DynamicEntry, EntryId};
use crate::view::tree::{EntryView, FieldView};

use super::orchestrator::FieldTarget;

/// Widgets of an expanded entry. Dropped on collapse, rebuilt on expand.
#[derive(Clone, Debug, PartialEq)]
struct Mounted {
    title: Option<(String, Widget)>,
    body: Vec<(String, Widget)>,
}

impl Mounted {
    fn new(group: &DynamicGroup) -> Self {
        let title = group.title_key().and_then(|key| {
            group.field(key).map(|desc| {
                (
                    key.to_owned(),
                    Widget::Text(TextField::with_placeholder(desc)),
                )
            })
        });
        let body = group
            .body_fields()
            .map(|(key, desc)| (key.to_owned(), Widget::for_descriptor(desc)))
            .collect();
        Self { title, body }
    }

    fn widget_mut(&mut self, key: &str) -> Option<&mut Widget> {
        self.title
            .iter_mut()
            .chain(self.body.iter_mut())
            .find(|(k, _)| k == key)
            .map(|(_, w)| w)
    }
}

/// Presentation state of one dynamic entry.
///
/// Starts collapsed. Toggling never touches form state.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryPanel {
    id: EntryId,
    /// `None` until a non-empty title is loaded or any title is typed.
    title: Option<String>,
    mounted: Option<Mounted>,
}

impl EntryPanel {
    /// Panel for `entry`, caching its current title value.
    pub fn new(group: &DynamicGroup, entry: &DynamicEntry) -> Self {
        let title = group
            .title_key()
            .and_then(|key| entry.get(key))
            .map(display_value)
            .filter(|t| !t.is_empty());
        Self {
            id: entry.id,
            title,
            mounted: None,
        }
    }

    /// Identity of the entry this panel belongs to.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Expanded or collapsed.
    pub fn is_expanded(&self) -> bool {
        self.mounted.is_some()
    }

    /// Flip between collapsed and expanded.
    pub fn toggle(&mut self, group: &DynamicGroup) {
        self.mounted = match self.mounted {
            Some(_) => None,
            None => Some(Mounted::new(group)),
        };
    }

    /// Title shown in the header.
    ///
    /// `Series {index + 1}` until a title is loaded or typed. A typed title is shown verbatim,
    /// even when it was cleared to empty.
    pub fn display_title(&self, index: usize) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Series {}", index + 1))
    }

    /// Route a field event to the nested widget under `key`.
    pub fn handle(
        &mut self,
        key: &str,
        current: Option<&Value>,
        event: FieldEvent,
    ) -> FormResult<Option<Value>> {
        let Some(mounted) = self.mounted.as_mut() else {
            return Err(FormError::event(format!("{} is collapsed", self.id)));
        };
        let is_title = mounted.title.as_ref().is_some_and(|(k, _)| k == key);
        let widget = mounted
            .widget_mut(key)
            .ok_or_else(|| FormError::event(format!("{} has no field '{key}'", self.id)))?;

        let committed = widget.handle(current, event)?;
        if is_title && let Some(value) = &committed {
            self.title = Some(display_value(value));
        }
        Ok(committed)
    }

    /// Describe the panel for the entry at `index`.
    pub fn view(
        &self,
        group: &DynamicGroup,
        index: usize,
        entry: &DynamicEntry,
        is_last: bool,
        allow_add_forms: bool,
    ) -> EntryView {
        let field_view = |key: &str, widget: &Widget, desc: Option<&FieldDescriptor>| FieldView {
            key: key.to_owned(),
            name: FieldTarget::entry(index, key).name(),
            label: desc.map(|d| d.title.clone()).filter(|t| !t.is_empty()),
            format: desc.map(|d| d.format).unwrap_or_default(),
            control: widget.view(entry.get(key)),
        };

        let (title_input, fields) = match &self.mounted {
            None => (None, Vec::new()),
            Some(mounted) => (
                mounted
                    .title
                    .as_ref()
                    .map(|(key, widget)| FieldView {
                        // Always a text input; the placeholder carries the label.
                        label: None,
                        format: FieldFormat::Plain,
                        ..field_view(key.as_str(), widget, group.field(key))
                    }),
                mounted
                    .body
                    .iter()
                    .map(|(key, widget)| field_view(key.as_str(), widget, group.field(key)))
                    .collect(),
            ),
        };

        EntryView {
            index,
            id: self.id,
            title: self.display_title(index),
            expanded: self.is_expanded(),
            title_input,
            fields,
            can_remove: can_remove(index),
            can_add: can_add(is_last, allow_add_forms, group.only_one),
        }
    }
}

/// Whether the entry at `index` offers a `Remove` action.
pub fn can_remove(index: usize) -> bool {
    index != 0
}

/// Whether an entry offers an `Add` action.
pub fn can_add(is_last: bool, allow_add_forms: bool, only_one: bool) -> bool {
    allow_add_forms && is_last && !only_one
}

#[cfg(test)]
#[path = "../../tests/unit/form/entry.rs"]
mod tests;
