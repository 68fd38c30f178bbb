// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A decoder turns one datapoint into one or more state changes. Composite
//! decoders (a status bitmask split into a raw value and a derived flag)
//! produce several changes from a single datapoint.

use crate::types::{Attribute, AttributeValue};

/// A new value for one attribute.
///
/// # Examples
///
/// ```
/// use freeathome_lib::state::{ChannelState, StateChange};
/// use freeathome_lib::types::Attribute;
///
/// let mut state = ChannelState::new();
/// assert!(state.apply(&StateChange::bool(Attribute::State, true)));
/// assert_eq!(state.bool(Attribute::State), Some(true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateChange {
    /// The attribute being changed.
    pub attribute: Attribute,
    /// Its new value.
    pub value: AttributeValue,
}

impl StateChange {
    /// Creates a state change.
    #[must_use]
    pub const fn new(attribute: Attribute, value: AttributeValue) -> Self {
        Self { attribute, value }
    }

    /// Creates a boolean state change.
    #[must_use]
    pub const fn bool(attribute: Attribute, value: bool) -> Self {
        Self::new(attribute, AttributeValue::Bool(value))
    }

    /// Creates an integer state change.
    #[must_use]
    pub const fn int(attribute: Attribute, value: i64) -> Self {
        Self::new(attribute, AttributeValue::Int(value))
    }

    /// Creates a floating point state change.
    #[must_use]
    pub const fn float(attribute: Attribute, value: f64) -> Self {
        Self::new(attribute, AttributeValue::Float(value))
    }
}
