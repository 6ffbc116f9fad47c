use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fields::{FieldAdapter, FieldEvent, Widget};
use crate::foundation::error::{FormError, FormResult};
use crate::schema::model::{DYNAMIC_GROUP_KEY, DynamicGroup, FieldDescriptor, FormSchema};
use crate::state::store::{Applied, FormStore, Update};
use crate::state::values::FormValues;
use crate::view::tree::{FieldView, FormView};

use super::entry::EntryPanel;
use super::observer::FormObserver;

/// Host configuration of a [`Form`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormOptions {
    /// Offer the `Add` action on the last entry.
    pub allow_add_forms: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            allow_add_forms: true,
        }
    }
}

/// Which field an event is aimed at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum FieldTarget {
    /// A static field.
    Static {
        /// Field key.
        key: String,
    },
    /// A nested field of a dynamic entry.
    Entry {
        /// Entry position.
        index: usize,
        /// Nested field key.
        key: String,
    },
}

impl FieldTarget {
    /// Target a static field.
    pub fn field(key: impl Into<String>) -> Self {
        FieldTarget::Static { key: key.into() }
    }

    /// Target a nested field of the entry at `index`.
    pub fn entry(index: usize, key: impl Into<String>) -> Self {
        FieldTarget::Entry {
            index,
            key: key.into(),
        }
    }

    /// Form-state path, e.g. `speed` or `dynamicForms[1].color`.
    pub fn name(&self) -> String {
        match self {
            FieldTarget::Static { key } => key.clone(),
            FieldTarget::Entry { index, key } => format!("{DYNAMIC_GROUP_KEY}[{index}].{key}"),
        }
    }
}

/// Discrete user input aimed at a form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    /// Input on one field.
    Field {
        /// Receiving field.
        target: FieldTarget,
        /// What happened.
        event: FieldEvent,
    },
    /// Expand or collapse an entry.
    ToggleEntry {
        /// Entry position.
        index: usize,
    },
    /// Append an entry.
    AddEntry,
    /// Remove an entry.
    RemoveEntry {
        /// Entry position.
        index: usize,
    },
    /// Submit the form.
    Submit,
}

impl FormEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            FormEvent::Field { .. } => "field",
            FormEvent::ToggleEntry { .. } => "toggle_entry",
            FormEvent::AddEntry => "add_entry",
            FormEvent::RemoveEntry { .. } => "remove_entry",
            FormEvent::Submit => "submit",
        }
    }
}

#[derive(Clone, Debug)]
struct StaticField {
    key: String,
    descriptor: FieldDescriptor,
    widget: Widget,
}

/// A mounted form: state, widgets and the host observer.
///
/// All input goes through [`Form::dispatch`]. Every committed edit produces exactly one
/// [`FormObserver::form_changed`] call carrying the full updated state. Mounting never notifies.
pub struct Form<O> {
    fields: Vec<StaticField>,
    group: DynamicGroup,
    options: FormOptions,
    store: FormStore,
    panels: Vec<EntryPanel>,
    observer: O,
    submitting: bool,
    submit_count: u64,
}

impl<O: FormObserver> Form<O> {
    /// Validate `schema` and mount it over `initial`.
    #[tracing::instrument(skip_all, fields(entries = initial.entries().len()))]
    pub fn new(
        schema: FormSchema,
        initial: FormValues,
        options: FormOptions,
        observer: O,
    ) -> FormResult<Self> {
        schema.validate()?;
        let FormSchema { fields, dynamic } = schema;
        let group = dynamic
            .ok_or_else(|| FormError::validation(format!("missing \"{DYNAMIC_GROUP_KEY}\" group")))?;
        if group.only_one && initial.entries().len() > 1 {
            return Err(FormError::validation(format!(
                "onlyOne group seeded with {} entries",
                initial.entries().len()
            )));
        }

        let fields = fields
            .into_iter()
            .map(|(key, descriptor)| StaticField {
                widget: Widget::for_descriptor(&descriptor),
                key,
                descriptor,
            })
            .collect();
        let panels = initial
            .entries()
            .iter()
            .map(|entry| EntryPanel::new(&group, entry))
            .collect();

        tracing::debug!(only_one = group.only_one, "form mounted");
        Ok(Self {
            fields,
            group,
            options,
            store: FormStore::new(initial),
            panels,
            observer,
            submitting: false,
            submit_count: 0,
        })
    }

    /// Current form state.
    pub fn values(&self) -> &FormValues {
        self.store.values()
    }

    /// Host options.
    pub fn options(&self) -> FormOptions {
        self.options
    }

    /// The repeatable group.
    pub fn group(&self) -> &DynamicGroup {
        &self.group
    }

    /// Presentation state of the entry at `index`.
    pub fn panel(&self, index: usize) -> Option<&EntryPanel> {
        self.panels.get(index)
    }

    /// `true` while a submission is being delivered.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Number of completed submissions.
    pub fn submit_count(&self) -> u64 {
        self.submit_count
    }

    /// Borrow the observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutably borrow the observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Unmount, returning the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Apply one event.
    ///
    /// Ignored requests (add on a full group, remove out of range, input that commits nothing)
    /// return `Ok(())` without notifying. Events aimed at fields or entries that do not exist are
    /// errors.
    #[tracing::instrument(level = "debug", skip(self, event), fields(event = event.name()))]
    pub fn dispatch(&mut self, event: FormEvent) -> FormResult<()> {
        match event {
            FormEvent::Field { target, event } => self.field_event(target, event),
            FormEvent::ToggleEntry { index } => {
                let panel = self
                    .panels
                    .get_mut(index)
                    .ok_or_else(|| entry_out_of_range(index))?;
                panel.toggle(&self.group);
                Ok(())
            }
            FormEvent::AddEntry => {
                self.add_entry();
                Ok(())
            }
            FormEvent::RemoveEntry { index } => {
                self.remove_entry(index);
                Ok(())
            }
            FormEvent::Submit => {
                self.submit();
                Ok(())
            }
        }
    }

    /// Apply events in order, stopping at the first error.
    pub fn dispatch_all(&mut self, events: impl IntoIterator<Item = FormEvent>) -> FormResult<()> {
        events.into_iter().try_for_each(|e| self.dispatch(e))
    }

    fn field_event(&mut self, target: FieldTarget, event: FieldEvent) -> FormResult<()> {
        match target {
            FieldTarget::Static { key } => {
                let field = self
                    .fields
                    .iter_mut()
                    .find(|f| f.key == key)
                    .ok_or_else(|| FormError::event(format!("unknown field '{key}'")))?;
                let current = self.store.values().field(&key);
                if let Some(value) = field.widget.handle(current, event)? {
                    self.commit(Update::SetField { key, value });
                }
            }
            FieldTarget::Entry { index, key } => {
                let panel = self
                    .panels
                    .get_mut(index)
                    .ok_or_else(|| entry_out_of_range(index))?;
                let current = self.store.values().entry_value(index, &key);
                if let Some(value) = panel.handle(&key, current, event)? {
                    self.commit(Update::SetEntryField { index, key, value });
                }
            }
        }
        Ok(())
    }

    fn add_entry(&mut self) {
        if self.group.only_one && !self.panels.is_empty() {
            tracing::debug!("group holds its only entry, add ignored");
            return;
        }
        let seed: Map<String, Value> = self
            .group
            .fields
            .iter()
            .map(|(key, desc)| (key.clone(), desc.default_value()))
            .collect();
        if let Applied::Appended(id) = self.commit(Update::AppendEntry(seed))
            && let Some(entry) = self.store.values().entries().iter().find(|e| e.id == id)
        {
            self.panels.push(EntryPanel::new(&self.group, entry));
        }
    }

    fn remove_entry(&mut self, index: usize) {
        if index >= self.panels.len() {
            tracing::debug!(index, "no entry to remove");
            return;
        }
        if let Applied::Removed(id) = self.commit(Update::RemoveEntry(index)) {
            debug_assert_eq!(self.panels[index].id(), id);
            self.panels.remove(index);
        }
    }

    fn submit(&mut self) {
        self.submitting = true;
        self.observer.form_submitted(self.store.values());
        self.submit_count += 1;
        self.submitting = false;
    }

    fn commit(&mut self, update: Update) -> Applied {
        let applied = self.store.apply(update);
        if applied.committed() {
            self.observer.form_changed(self.store.values());
        }
        applied
    }

    /// Describe the whole form for the host.
    pub fn render(&self) -> FormView {
        let values = self.store.values();
        let fields = self
            .fields
            .iter()
            .map(|f| FieldView {
                key: f.key.clone(),
                name: f.key.clone(),
                label: Some(f.descriptor.title.clone()).filter(|t| !t.is_empty()),
                format: f.descriptor.format,
                control: f.widget.view(values.field(&f.key)),
            })
            .collect();

        let last = values.entries().len().saturating_sub(1);
        let entries = self
            .panels
            .iter()
            .zip(values.entries())
            .enumerate()
            .map(|(index, (panel, entry))| {
                panel.view(
                    &self.group,
                    index,
                    entry,
                    index == last,
                    self.options.allow_add_forms,
                )
            })
            .collect();

        FormView {
            fields,
            entries,
            submitting: self.submitting,
        }
    }
}

fn entry_out_of_range(index: usize) -> FormError {
    FormError::event(format!("entry {index} out of range"))
}

#[cfg(test)]
#[path = "../../tests/unit/form/orchestrator.rs"]
mod tests;
