// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by devices and channels.
//!
//! # Types
//!
//! - [`Pairing`] - Semantic tag of a datapoint
//! - [`Parameter`] - Channel configuration parameter id
//! - [`Interface`] - How a device is attached to the hub
//! - [`Attribute`] / [`AttributeValue`] - Decoded channel state
//! - [`CoverMotion`] - Movement reported by cover actuators

mod attribute;
mod interface;
mod pairing;
mod parameter;

pub use attribute::{Attribute, AttributeValue, CoverMotion, UnknownAttribute};
pub use interface::Interface;
pub use pairing::Pairing;
pub use parameter::Parameter;
