//! CAB Function State Accumulator
//!
//! Keeps the last written value of every function slot so the `<f>` code
//! always carries the union of all functions currently on in a group, not
//! just the one most recently toggled.

use crate::config::{FUNCTION_GROUPS, SLOTS_PER_GROUP};
use crate::protocol::functions::FeatureToggle;
use crate::types::FeatureGroup;

/// Result of applying a feature toggle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionCode {
    /// Group that was updated
    pub group: FeatureGroup,
    /// Group base plus the sum of its slots
    pub code: u8,
}

/// Per-group slot state, all zero at start
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionGroups {
    slots: [[u8; SLOTS_PER_GROUP]; FUNCTION_GROUPS],
}

impl FunctionGroups {
    /// Create with every function off
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [[0; SLOTS_PER_GROUP]; FUNCTION_GROUPS],
        }
    }

    /// Overwrite the toggle's slot and return the group's new code
    pub fn apply(&mut self, toggle: FeatureToggle) -> FunctionCode {
        let group = toggle.group;
        // Table slots are 0-4; clamp keeps a bad row inside its own group.
        let slot = usize::from(toggle.slot).min(SLOTS_PER_GROUP - 1);
        self.slots[group.index()][slot] = toggle.bit_value;
        FunctionCode {
            group,
            code: self.code(group),
        }
    }

    /// Current code for a group
    #[must_use]
    pub fn code(&self, group: FeatureGroup) -> u8 {
        self.slots[group.index()]
            .iter()
            .fold(group.base(), |acc, &v| acc.wrapping_add(v))
    }

    /// Raw slot values of a group
    #[must_use]
    pub fn slots(&self, group: FeatureGroup) -> &[u8; SLOTS_PER_GROUP] {
        &self.slots[group.index()]
    }

    /// Switch every function off
    pub fn reset(&mut self) {
        self.slots = [[0; SLOTS_PER_GROUP]; FUNCTION_GROUPS];
    }
}

impl Default for FunctionGroups {
    fn default() -> Self {
        Self::new()
    }
}
