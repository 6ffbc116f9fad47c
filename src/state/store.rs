use serde_json::{Map, Value};

use crate::state::values::{EntryId, FormValues};

/// A single mutation of form state.
#[derive(Clone, Debug, PartialEq)]
pub enum Update {
    /// Set a static field.
    SetField {
        /// Static field key.
        key: String,
        /// New value.
        value: Value,
    },
    /// Set one nested field of a dynamic entry.
    SetEntryField {
        /// Entry position.
        index: usize,
        /// Nested field key.
        key: String,
        /// New value.
        value: Value,
    },
    /// Append a dynamic entry.
    AppendEntry(Map<String, Value>),
    /// Remove the dynamic entry at a position.
    RemoveEntry(usize),
}

/// What an [`Update`] did to the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    /// State changed.
    Changed,
    /// A new entry was appended.
    Appended(EntryId),
    /// An entry was removed.
    Removed(EntryId),
    /// The update targeted something that does not exist; state is untouched.
    Missed,
}

impl Applied {
    /// `true` unless the update missed.
    pub fn committed(&self) -> bool {
        !matches!(self, Applied::Missed)
    }
}

/// Owner of [`FormValues`]; all mutations go through [`FormStore::apply`].
#[derive(Clone, Debug, Default)]
pub struct FormStore {
    values: FormValues,
}

impl FormStore {
    /// Wrap initial values.
    pub fn new(values: FormValues) -> Self {
        Self { values }
    }

    /// Current state.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Apply one update.
    pub fn apply(&mut self, update: Update) -> Applied {
        match update {
            Update::SetField { key, value } => {
                self.values.set_field(&key, value);
                Applied::Changed
            }
            Update::SetEntryField { index, key, value } => match self.values.entry_mut(index) {
                Some(entry) => {
                    entry.values.insert(key, value);
                    Applied::Changed
                }
                None => Applied::Missed,
            },
            Update::AppendEntry(values) => Applied::Appended(self.values.push_entry(values)),
            Update::RemoveEntry(index) => match self.values.remove_entry(index) {
                Some(entry) => Applied::Removed(entry.id),
                None => Applied::Missed,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/store.rs"]
mod tests;
