use serde::Serialize;
use serde_json::Value;

use crate::state::values::FormValues;

/// Host callbacks fired by a [`Form`](crate::Form).
///
/// Ordering contract: `form_changed` is called exactly once per committed edit, after the commit,
/// with the full updated state. `form_submitted` is called once per submit.
pub trait FormObserver {
    /// State changed.
    fn form_changed(&mut self, values: &FormValues);
    /// Submit was requested.
    fn form_submitted(&mut self, values: &FormValues) {
        let _ = values;
    }
}

/// Observer that ignores everything.
impl FormObserver for () {
    fn form_changed(&mut self, _values: &FormValues) {}
}

/// Observer built from closures.
pub struct FnObserver<C, S> {
    on_change: C,
    on_submit: S,
}

impl<C> FnObserver<C, fn(&FormValues)>
where
    C: FnMut(&FormValues),
{
    /// Observer calling `on_change` for every change; submits are ignored.
    pub fn new(on_change: C) -> Self {
        Self {
            on_change,
            on_submit: |_| {},
        }
    }
}

impl<C, S> FnObserver<C, S> {
    /// Replace the submit callback.
    pub fn on_submit<S2>(self, on_submit: S2) -> FnObserver<C, S2>
    where
        S2: FnMut(&FormValues),
    {
        FnObserver {
            on_change: self.on_change,
            on_submit,
        }
    }
}

impl<C, S> FormObserver for FnObserver<C, S>
where
    C: FnMut(&FormValues),
    S: FnMut(&FormValues),
{
    fn form_changed(&mut self, values: &FormValues) {
        (self.on_change)(values);
    }

    fn form_submitted(&mut self, values: &FormValues) {
        (self.on_submit)(values);
    }
}

/// One callback received by a [`RecordingObserver`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum Notification {
    /// `form_changed` with the state snapshot.
    Changed(Value),
    /// `form_submitted` with the state snapshot.
    Submitted(Value),
}

impl Notification {
    /// The snapshot carried by the notification.
    pub fn values(&self) -> &Value {
        match self {
            Notification::Changed(v) | Notification::Submitted(v) => v,
        }
    }
}

/// In-memory observer for tests, replay and debugging.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    notifications: Vec<Notification>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received, in order.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Snapshots of `form_changed` calls only.
    pub fn changes(&self) -> impl Iterator<Item = &Value> {
        self.notifications.iter().filter_map(|n| match n {
            Notification::Changed(v) => Some(v),
            Notification::Submitted(_) => None,
        })
    }

    /// Remove and return everything received so far.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl FormObserver for RecordingObserver {
    fn form_changed(&mut self, values: &FormValues) {
        self.notifications.push(Notification::Changed(values.to_json()));
    }

    fn form_submitted(&mut self, values: &FormValues) {
        self.notifications
            .push(Notification::Submitted(values.to_json()));
    }
}
