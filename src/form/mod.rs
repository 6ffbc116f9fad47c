//! The form engine: mounts a schema over initial values and turns events into committed state.

pub(crate) mod entry;
pub(crate) mod observer;
pub(crate) mod orchestrator;
