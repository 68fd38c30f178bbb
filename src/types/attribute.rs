// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded channel attributes.
//!
//! Channels decode raw datapoint strings into a small set of named, typed
//! attributes. The attribute name doubles as the key listeners register
//! callbacks under.

use std::fmt;
use std::str::FromStr;

/// A semantic attribute exposed by one or more channel variants.
///
/// # Examples
///
/// ```
/// use freeathome_lib::types::Attribute;
///
/// let attribute: Attribute = "tilt_position".parse().unwrap();
/// assert_eq!(attribute, Attribute::TiltPosition);
/// assert_eq!(attribute.as_str(), "tilt_position");
/// assert!("unknown".parse::<Attribute>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    /// On/off, open/closed or detected/idle.
    State,
    /// Forced position active.
    Forced,
    /// Dimming value in percent.
    Brightness,
    /// Color temperature in percent of the supported range.
    ColorTemperature,
    /// Cover or valve position in percent.
    Position,
    /// Slat position in percent.
    TiltPosition,
    /// Raw cover movement indicator, see [`CoverMotion`].
    Motion,
    /// Measured room temperature in °C.
    CurrentTemperature,
    /// Set-point temperature in °C.
    TargetTemperature,
    /// Raw controller status bitmask.
    StateIndication,
    /// Eco mode active.
    EcoMode,
    /// Heating valve position in percent.
    HeatingValue,
    /// Cooling valve position in percent.
    CoolingValue,
    /// Brightness in lux.
    BrightnessLevel,
    /// Alarm active.
    Alarm,
    /// Measured temperature in °C.
    Temperature,
    /// Frost alarm active.
    Frost,
    /// Wind force in Beaufort.
    WindForce,
    /// Wind speed in m/s.
    WindSpeed,
    /// Rain sensor activation in percent.
    RainIntensity,
    /// Rain sensor frequency.
    RainFrequency,
    /// Last relative dimming request.
    RelativeValue,
    /// Window position: 0 closed, 1 tilted, 2 open.
    WindowPosition,
    /// CO2 concentration in ppm.
    Co2,
    /// Relative humidity in percent.
    Humidity,
    /// VOC index.
    Voc,
    /// State requested by the hub from a virtual actuator.
    RequestedState,
    /// Position requested by the hub from a virtual cover.
    RequestedPosition,
    /// Movement requested by the hub from a virtual cover.
    RequestedMotion,
}

impl Attribute {
    /// Every attribute, in declaration order.
    pub const ALL: [Self; 29] = [
        Self::State,
        Self::Forced,
        Self::Brightness,
        Self::ColorTemperature,
        Self::Position,
        Self::TiltPosition,
        Self::Motion,
        Self::CurrentTemperature,
        Self::TargetTemperature,
        Self::StateIndication,
        Self::EcoMode,
        Self::HeatingValue,
        Self::CoolingValue,
        Self::BrightnessLevel,
        Self::Alarm,
        Self::Temperature,
        Self::Frost,
        Self::WindForce,
        Self::WindSpeed,
        Self::RainIntensity,
        Self::RainFrequency,
        Self::RelativeValue,
        Self::WindowPosition,
        Self::Co2,
        Self::Humidity,
        Self::Voc,
        Self::RequestedState,
        Self::RequestedPosition,
        Self::RequestedMotion,
    ];

    /// Returns the callback name of this attribute.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Forced => "forced",
            Self::Brightness => "brightness",
            Self::ColorTemperature => "color_temperature",
            Self::Position => "position",
            Self::TiltPosition => "tilt_position",
            Self::Motion => "motion",
            Self::CurrentTemperature => "current_temperature",
            Self::TargetTemperature => "target_temperature",
            Self::StateIndication => "state_indication",
            Self::EcoMode => "eco_mode",
            Self::HeatingValue => "heating_value",
            Self::CoolingValue => "cooling_value",
            Self::BrightnessLevel => "brightness_level",
            Self::Alarm => "alarm",
            Self::Temperature => "temperature",
            Self::Frost => "frost",
            Self::WindForce => "wind_force",
            Self::WindSpeed => "wind_speed",
            Self::RainIntensity => "rain_intensity",
            Self::RainFrequency => "rain_frequency",
            Self::RelativeValue => "relative_value",
            Self::WindowPosition => "window_position",
            Self::Co2 => "co2",
            Self::Humidity => "humidity",
            Self::Voc => "voc",
            Self::RequestedState => "requested_state",
            Self::RequestedPosition => "requested_position",
            Self::RequestedMotion => "requested_motion",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown attribute name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAttribute(pub String);

impl fmt::Display for UnknownAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown attribute: {}", self.0)
    }
}

impl std::error::Error for UnknownAttribute {}

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|attribute| attribute.as_str() == s)
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

/// A decoded attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value, truncated from the wire representation.
    Int(i64),
    /// Floating point value.
    Float(f64),
}

impl AttributeValue {
    /// Returns the boolean, if this is a flag.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as a float; integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Movement reported by a cover actuator.
///
/// # Examples
///
/// ```
/// use freeathome_lib::types::CoverMotion;
///
/// assert_eq!(CoverMotion::from_raw(2), CoverMotion::Opening);
/// assert_eq!(CoverMotion::from_raw(3), CoverMotion::Closing);
/// assert_eq!(CoverMotion::from_raw(0), CoverMotion::Stopped);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverMotion {
    /// Not moving.
    Stopped,
    /// Moving up.
    Opening,
    /// Moving down.
    Closing,
    /// A value this library does not recognise.
    Unknown(i64),
}

impl CoverMotion {
    /// Maps the raw movement indicator.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        match raw {
            0 | 1 => Self::Stopped,
            2 => Self::Opening,
            3 => Self::Closing,
            other => Self::Unknown(other),
        }
    }
}
