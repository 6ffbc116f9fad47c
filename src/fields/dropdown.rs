use serde::{Deserialize, Serialize};

/// Where a pointer-down landed, relative to a tag input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    /// The tag input itself.
    Input,
    /// The chevron shown while the dropdown is closed.
    OpenChevron,
    /// The chevron shown while the dropdown is open.
    CloseChevron,
    /// An item of the open dropdown.
    DropdownItem,
    /// Anywhere else in the document.
    Outside,
}

/// Open/closed state of a tag dropdown. Presentation only; starts closed on every mount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropdownState {
    open: bool,
}

impl DropdownState {
    /// Whether the dropdown is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Apply a pointer-down.
    ///
    /// Picking an item keeps the dropdown open so several suggestions can be browsed.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        match target {
            PointerTarget::OpenChevron => self.open = !self.open,
            PointerTarget::CloseChevron | PointerTarget::Outside => self.open = false,
            PointerTarget::Input | PointerTarget::DropdownItem => {}
        }
    }

    /// The input gained focus; suggestions are shown immediately.
    pub fn focus(&mut self) {
        self.open = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fields/dropdown.rs"]
mod tests;
