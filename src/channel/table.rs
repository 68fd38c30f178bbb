// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declarative description of a channel variant.
//!
//! A variant is pure data: which pairing ids decode into which attributes,
//! which pairing ids are read on refresh, and how each write action is
//! encoded. The generic [`Channel`](super::Channel) engine interprets it.

use std::collections::BTreeSet;
use std::fmt;

use crate::state::StateChange;
use crate::types::{Attribute, AttributeValue, Pairing};

use super::valve::ValvePosition;

// ============================================================================
// Decoding
// ============================================================================

/// How a raw datapoint value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decode {
    /// `"1"` is true, anything else false.
    Bool,
    /// Parsed as a number and truncated toward zero; malformed gives 0.
    Int,
    /// Parsed as a float; malformed gives 0.0.
    Float,
    /// Integer stored verbatim, plus `flag` set when `value & mask != 0`.
    Bitmask {
        /// Derived flag attribute.
        flag: Attribute,
        /// Bit mask selecting the flag.
        mask: i64,
    },
}

/// Maps one pairing id to the attribute it decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    /// Pairing id of the source datapoint.
    pub pairing: Pairing,
    /// Primary attribute produced.
    pub attribute: Attribute,
    /// Decode rule.
    pub decode: Decode,
}

impl Decoder {
    pub(crate) const fn bool(pairing: Pairing, attribute: Attribute) -> Self {
        Self {
            pairing,
            attribute,
            decode: Decode::Bool,
        }
    }

    pub(crate) const fn int(pairing: Pairing, attribute: Attribute) -> Self {
        Self {
            pairing,
            attribute,
            decode: Decode::Int,
        }
    }

    pub(crate) const fn float(pairing: Pairing, attribute: Attribute) -> Self {
        Self {
            pairing,
            attribute,
            decode: Decode::Float,
        }
    }

    pub(crate) const fn bitmask(
        pairing: Pairing,
        attribute: Attribute,
        flag: Attribute,
        mask: i64,
    ) -> Self {
        Self {
            pairing,
            attribute,
            decode: Decode::Bitmask { flag, mask },
        }
    }

    /// Returns every attribute this decoder may set.
    pub fn attributes(&self) -> impl Iterator<Item = Attribute> {
        let flag = match self.decode {
            Decode::Bitmask { flag, .. } => Some(flag),
            _ => None,
        };
        std::iter::once(self.attribute).chain(flag)
    }

    /// Decodes a raw value into the state changes it implies.
    ///
    /// Never fails: an empty string is the hub's "not reported yet" marker
    /// and decodes to the fallback value like any malformed payload.
    #[must_use]
    pub fn decode(&self, raw: &str) -> Vec<StateChange> {
        match self.decode {
            Decode::Bool => vec![StateChange::bool(self.attribute, raw.trim() == "1")],
            Decode::Int => vec![StateChange::int(self.attribute, parse_int(raw))],
            Decode::Float => vec![StateChange::float(self.attribute, parse_float(raw))],
            Decode::Bitmask { flag, mask } => {
                let value = parse_int(raw);
                vec![
                    StateChange::int(self.attribute, value),
                    StateChange::bool(flag, value & mask != 0),
                ]
            }
        }
    }
}

fn parse_float(raw: &str) -> f64 {
    let raw = raw.trim();
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            if !raw.is_empty() {
                tracing::debug!(raw = %raw, "Malformed numeric datapoint, using fallback");
            }
            0.0
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn parse_int(raw: &str) -> i64 {
    // Float-valued payloads are truncated, never rounded.
    parse_float(raw).trunc() as i64
}

// ============================================================================
// Writing
// ============================================================================

/// A write action a channel may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Turn on or off.
    Switch,
    /// Open a cover.
    Open,
    /// Close a cover.
    Close,
    /// Stop a moving cover.
    Stop,
    /// Fire a trigger.
    Press,
    /// Toggle eco mode.
    Eco,
    /// Raise or clear an alarm on a virtual sensor.
    Alarm,
    /// Report a virtual contact as open or closed.
    Contact,
    /// Move to a position.
    SetPosition,
    /// Move slats to a position.
    SetTiltPosition,
    /// Set dimming value.
    SetBrightness,
    /// Set color temperature.
    SetColorTemperature,
    /// Set a temperature.
    SetTemperature,
    /// Report a wind force.
    SetWindForce,
    /// Report a brightness level.
    SetBrightnessLevel,
}

impl Action {
    /// Returns the name of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Open => "open",
            Self::Close => "close",
            Self::Stop => "stop",
            Self::Press => "press",
            Self::Eco => "eco",
            Self::Alarm => "alarm",
            Self::Contact => "contact",
            Self::SetPosition => "set_position",
            Self::SetTiltPosition => "set_tilt_position",
            Self::SetBrightness => "set_brightness",
            Self::SetColorTemperature => "set_color_temperature",
            Self::SetTemperature => "set_temperature",
            Self::SetWindForce => "set_wind_force",
            Self::SetBrightnessLevel => "set_brightness_level",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which datapoint map a write targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Physical actuators receive commands on their inputs.
    Input,
    /// Virtual devices report their state on their outputs.
    Output,
}

/// Encoding of the value written for an action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload {
    /// Always the same raw value.
    Const(&'static str),
    /// `"1"` or `"0"`.
    Flag,
    /// Integer clamped to `min..=max`.
    Int {
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },
    /// Float clamped to `min..=max`.
    Float {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

/// Argument supplied by a write method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Argument {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl Argument {
    fn is_nan(self) -> bool {
        matches!(self, Self::Float(value) if value.is_nan())
    }

    fn as_bool(self) -> bool {
        match self {
            Self::Bool(value) => value,
            Self::Int(value) => value != 0,
            Self::Float(value) => value != 0.0,
            Self::Unit => true,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn as_int(self) -> i64 {
        match self {
            Self::Int(value) => value,
            Self::Float(value) => value.trunc() as i64,
            Self::Bool(value) => i64::from(value),
            Self::Unit => 0,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_float(self) -> f64 {
        match self {
            Self::Float(value) => value,
            Self::Int(value) => value as f64,
            Self::Bool(value) => f64::from(u8::from(value)),
            Self::Unit => 0.0,
        }
    }
}

impl Payload {
    /// Returns the raw value to write and the clamped value it stands for.
    ///
    /// Returns `None` for a NaN argument, which has no place in any domain.
    /// Infinities clamp to the nearest bound.
    pub(crate) fn encode(self, argument: Argument) -> Option<(String, Option<AttributeValue>)> {
        let encoded = match self {
            Self::Const(raw) => (raw.to_string(), None),
            Self::Flag => {
                let on = argument.as_bool();
                let raw = if on { "1" } else { "0" };
                (raw.to_string(), Some(AttributeValue::Bool(on)))
            }
            Self::Int { min, max } => {
                if argument.is_nan() {
                    return None;
                }
                let value = argument.as_int().clamp(min, max);
                (value.to_string(), Some(AttributeValue::Int(value)))
            }
            Self::Float { min, max } => {
                let value = argument.as_float();
                if value.is_nan() {
                    return None;
                }
                let value = value.clamp(min, max);
                (value.to_string(), Some(AttributeValue::Float(value)))
            }
        };
        Some(encoded)
    }
}

/// How one action is written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Write {
    /// The action.
    pub action: Action,
    /// Datapoint map holding the target.
    pub direction: Direction,
    /// Pairing id of the target datapoint.
    pub pairing: Pairing,
    /// Value encoding.
    pub payload: Payload,
    /// Attribute optimistically set to the written value.
    pub attribute: Option<Attribute>,
}

impl Write {
    pub(crate) const fn input(action: Action, pairing: Pairing, payload: Payload) -> Self {
        Self {
            action,
            direction: Direction::Input,
            pairing,
            payload,
            attribute: None,
        }
    }

    pub(crate) const fn output(action: Action, pairing: Pairing, payload: Payload) -> Self {
        Self {
            action,
            direction: Direction::Output,
            pairing,
            payload,
            attribute: None,
        }
    }

    pub(crate) const fn sets(mut self, attribute: Attribute) -> Self {
        self.attribute = Some(attribute);
        self
    }
}

// ============================================================================
// ChannelSpec
// ============================================================================

/// Complete description of a channel variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSpec {
    /// Decoders applied to output datapoints.
    pub outputs: &'static [Decoder],
    /// Decoders applied to input datapoints; empty unless the variant
    /// tracks commands sent to it.
    pub inputs: &'static [Decoder],
    /// Output pairing ids read by a state refresh.
    pub refresh: &'static [Pairing],
    /// Supported write actions.
    pub writes: &'static [Write],
    /// Composed valve behavior.
    pub valve: Option<ValvePosition>,
}

impl ChannelSpec {
    pub(crate) const EMPTY: Self = Self {
        outputs: &[],
        inputs: &[],
        refresh: &[],
        writes: &[],
        valve: None,
    };

    /// Returns whether input datapoints are decoded too.
    #[must_use]
    pub fn tracks_inputs(&self) -> bool {
        !self.inputs.is_empty()
    }

    /// Returns the decoder for an output pairing id.
    #[must_use]
    pub fn output_decoder(&self, pairing_id: u16) -> Option<Decoder> {
        self.outputs
            .iter()
            .copied()
            .chain(self.valve.map(|valve| valve.decoder()))
            .find(|decoder| decoder.pairing.id() == pairing_id)
    }

    /// Returns the decoder for an input pairing id.
    #[must_use]
    pub fn input_decoder(&self, pairing_id: u16) -> Option<Decoder> {
        self.inputs
            .iter()
            .copied()
            .find(|decoder| decoder.pairing.id() == pairing_id)
    }

    /// Returns how an action is written, if supported.
    #[must_use]
    pub fn write(&self, action: Action) -> Option<Write> {
        self.writes
            .iter()
            .copied()
            .chain(self.valve.map(|valve| valve.write()))
            .find(|write| write.action == action)
    }

    /// Returns the output pairing ids read by a state refresh.
    pub fn refresh_pairings(&self) -> impl Iterator<Item = Pairing> + '_ {
        self.refresh
            .iter()
            .copied()
            .chain(self.valve.map(|valve| valve.info))
    }

    /// Returns the attributes callbacks may be registered for.
    #[must_use]
    pub fn callback_attributes(&self) -> BTreeSet<Attribute> {
        self.outputs
            .iter()
            .chain(self.inputs)
            .copied()
            .chain(self.valve.map(|valve| valve.decoder()))
            .flat_map(|decoder| decoder.attributes().collect::<Vec<_>>())
            .collect()
    }
}
