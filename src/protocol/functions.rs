//! CAB Function Code Table
//!
//! Maps the 5-bit selector of an action frame onto the DCC++ `<f>` command
//! groups. Each function F0-F12 owns one slot in one of three groups; the
//! "on" selector carries the function's bit value and the "off" selector
//! carries zero for the same slot.
//!
//! Selectors 0-4 are motion/accessory opcodes and selector 31 is reserved;
//! their rows are the all-zero [`FunctionTableEntry::RESERVED`] entry.

use crate::config::MAX_SELECTOR;
use crate::types::{FeatureGroup, Selector};

/// One row of the function table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionTableEntry {
    /// Group base value (128, 176 or 160; 0 for reserved rows)
    pub group_base: u8,
    /// Contribution of the function inside its group (0 for "off")
    pub bit_value: u8,
    /// Accumulator index (0-2)
    pub group_index: u8,
    /// Slot inside the accumulator (0-4)
    pub slot_index: u8,
}

impl FunctionTableEntry {
    /// Sentinel row for selectors that are not feature toggles
    pub const RESERVED: Self = Self {
        group_base: 0,
        bit_value: 0,
        group_index: 0,
        slot_index: 0,
    };

    const fn on(group: FeatureGroup, slot: u8, bit_value: u8) -> Self {
        Self {
            group_base: group.base(),
            bit_value,
            group_index: group.index() as u8,
            slot_index: slot,
        }
    }

    const fn off(group: FeatureGroup, slot: u8) -> Self {
        Self::on(group, slot, 0)
    }

    /// Check for the sentinel row
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        self.group_base == 0
    }

    /// Typed feature toggle, None for reserved rows
    #[must_use]
    pub const fn feature(&self) -> Option<FeatureToggle> {
        let group = match self.group_index {
            0 if self.group_base == FeatureGroup::F0ToF4.base() => FeatureGroup::F0ToF4,
            1 if self.group_base == FeatureGroup::F5ToF8.base() => FeatureGroup::F5ToF8,
            2 if self.group_base == FeatureGroup::F9ToF12.base() => FeatureGroup::F9ToF12,
            _ => return None,
        };
        Some(FeatureToggle {
            group,
            slot: self.slot_index,
            bit_value: self.bit_value,
        })
    }
}

/// A validated feature write: one slot of one group
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureToggle {
    /// Target group
    pub group: FeatureGroup,
    /// Slot inside the group
    pub slot: u8,
    /// Value written into the slot
    pub bit_value: u8,
}

impl FeatureToggle {
    /// Check if this toggle switches its function on
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.bit_value != 0
    }
}

use FeatureGroup::{F0ToF4 as G0, F5ToF8 as G1, F9ToF12 as G2};

/// Selector-indexed function table
pub const FUNCTION_TABLE: [FunctionTableEntry; MAX_SELECTOR as usize + 1] = [
    FunctionTableEntry::RESERVED,   // 0  stop
    FunctionTableEntry::RESERVED,   // 1  forward
    FunctionTableEntry::RESERVED,   // 2  reverse
    FunctionTableEntry::RESERVED,   // 3  accessory off
    FunctionTableEntry::RESERVED,   // 4  accessory on
    FunctionTableEntry::on(G0, 4, 16), // 5  F0 on
    FunctionTableEntry::off(G0, 4),    // 6  F0 off
    FunctionTableEntry::on(G0, 0, 1),  // 7  F1 on
    FunctionTableEntry::off(G0, 0),    // 8  F1 off
    FunctionTableEntry::on(G0, 1, 2),  // 9  F2 on
    FunctionTableEntry::off(G0, 1),    // 10 F2 off
    FunctionTableEntry::on(G0, 2, 4),  // 11 F3 on
    FunctionTableEntry::off(G0, 2),    // 12 F3 off
    FunctionTableEntry::on(G0, 3, 8),  // 13 F4 on
    FunctionTableEntry::off(G0, 3),    // 14 F4 off
    FunctionTableEntry::on(G1, 0, 1),  // 15 F5 on
    FunctionTableEntry::off(G1, 0),    // 16 F5 off
    FunctionTableEntry::on(G1, 1, 2),  // 17 F6 on
    FunctionTableEntry::off(G1, 1),    // 18 F6 off
    FunctionTableEntry::on(G1, 2, 4),  // 19 F7 on
    FunctionTableEntry::off(G1, 2),    // 20 F7 off
    FunctionTableEntry::on(G1, 3, 8),  // 21 F8 on
    FunctionTableEntry::off(G1, 3),    // 22 F8 off
    FunctionTableEntry::on(G2, 0, 1),  // 23 F9 on
    FunctionTableEntry::off(G2, 0),    // 24 F9 off
    FunctionTableEntry::on(G2, 1, 2),  // 25 F10 on
    FunctionTableEntry::off(G2, 1),    // 26 F10 off
    FunctionTableEntry::on(G2, 2, 4),  // 27 F11 on
    FunctionTableEntry::off(G2, 2),    // 28 F11 off
    FunctionTableEntry::on(G2, 3, 8),  // 29 F12 on
    FunctionTableEntry::off(G2, 3),    // 30 F12 off
    FunctionTableEntry::RESERVED,   // 31 reserved
];

/// Look up the table row for a selector
#[must_use]
pub const fn lookup(selector: Selector) -> FunctionTableEntry {
    FUNCTION_TABLE[selector.value() as usize]
}

/// Feature toggle for a selector, None for motion and reserved selectors
#[must_use]
pub const fn feature_for(selector: Selector) -> Option<FeatureToggle> {
    if selector.is_motion() {
        return None;
    }
    lookup(selector).feature()
}

/// CAB function number (0-12) switched by a selector, with its new state
#[must_use]
pub const fn function_number(selector: Selector) -> Option<(u8, bool)> {
    match feature_for(selector) {
        Some(toggle) => {
            let offset = selector.value() - 5;
            Some((offset / 2, toggle.is_on()))
        }
        None => None,
    }
}
