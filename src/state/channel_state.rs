// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel state tracking.

use std::collections::BTreeMap;

use crate::types::{Attribute, AttributeValue};

use super::StateChange;

/// Decoded attribute values of one channel.
///
/// Every attribute starts unset; it becomes known once a datapoint carrying
/// it has been decoded or a write action stored its target value.
///
/// # Examples
///
/// ```
/// use freeathome_lib::state::ChannelState;
/// use freeathome_lib::types::{Attribute, AttributeValue};
///
/// let mut state = ChannelState::new();
/// assert_eq!(state.get(Attribute::Position), None);
///
/// state.set(Attribute::Position, AttributeValue::Int(40));
/// assert_eq!(state.int(Attribute::Position), Some(40));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelState {
    values: BTreeMap<Attribute, AttributeValue>,
}

impl ChannelState {
    /// Creates a new empty channel state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of an attribute, if known.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> Option<AttributeValue> {
        self.values.get(&attribute).copied()
    }

    /// Returns a boolean attribute.
    #[must_use]
    pub fn bool(&self, attribute: Attribute) -> Option<bool> {
        self.get(attribute).and_then(|value| value.as_bool())
    }

    /// Returns an integer attribute.
    #[must_use]
    pub fn int(&self, attribute: Attribute) -> Option<i64> {
        self.get(attribute).and_then(|value| value.as_int())
    }

    /// Returns a numeric attribute as a float.
    #[must_use]
    pub fn float(&self, attribute: Attribute) -> Option<f64> {
        self.get(attribute).and_then(|value| value.as_float())
    }

    /// Sets the value of an attribute.
    pub fn set(&mut self, attribute: Attribute, value: AttributeValue) {
        self.values.insert(attribute, value);
    }

    /// Applies a state change and returns whether the state actually changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        if self.get(change.attribute) == Some(change.value) {
            false
        } else {
            self.set(change.attribute, change.value);
            true
        }
    }
}
