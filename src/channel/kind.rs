// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel variants and function-id classification.

use std::fmt;

use super::catalog;
use super::table::ChannelSpec;

/// The concrete variant of a channel.
///
/// # Examples
///
/// ```
/// use freeathome_lib::channel::ChannelKind;
///
/// // Function ids are variable-length hex without leading zeros.
/// assert_eq!(ChannelKind::from_function_id("7", false), Some(ChannelKind::SwitchActuator));
/// assert_eq!(ChannelKind::from_function_id("61", false), Some(ChannelKind::BlindActuator));
/// assert_eq!(ChannelKind::from_function_id("7", true), Some(ChannelKind::VirtualSwitchActuator));
/// assert_eq!(ChannelKind::from_function_id("zz", false), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKind {
    /// On/off actuator.
    SwitchActuator,
    /// Dimmer.
    DimmingActuator,
    /// Tunable white light.
    ColorTemperatureActuator,
    /// Roller shutter.
    ShutterActuator,
    /// Venetian blind with slats.
    BlindActuator,
    /// Attic window.
    AtticWindowActuator,
    /// Awning.
    AwningActuator,
    /// Room thermostat.
    RoomTemperatureController,
    /// Heating valve actuator.
    HeatingActuator,
    /// Cooling valve actuator.
    CoolingActuator,
    /// Movement detector.
    MovementDetector,
    /// Window or door contact.
    WindowDoorSensor,
    /// Window contact reporting tilt.
    WindowDoorPositionSensor,
    /// Weather station temperature.
    TemperatureSensor,
    /// Weather station brightness.
    BrightnessSensor,
    /// Weather station rain.
    RainSensor,
    /// Weather station wind.
    WindSensor,
    /// Wall switch sensor.
    SwitchSensor,
    /// Wall dimmer sensor.
    DimmingSensor,
    /// Wall cover sensor.
    CoverSensor,
    /// Forced position sensor.
    ForceOnOffSensor,
    /// Scene or action trigger.
    Trigger,
    /// Door entry system door opener.
    DesDoorOpenerActuator,
    /// Door entry system staircase light.
    DesLightSwitchActuator,
    /// Door entry system doorbell.
    DesDoorRingingSensor,
    /// Smoke detector.
    SmokeDetector,
    /// Carbon monoxide sensor.
    CarbonMonoxideSensor,
    /// Air quality sensor.
    AirQualitySensor,
    /// Software switch actuator.
    VirtualSwitchActuator,
    /// Software cover actuator.
    VirtualCoverActuator,
    /// Software window contact.
    VirtualWindowDoorSensor,
    /// Software brightness sensor.
    VirtualBrightnessSensor,
    /// Software temperature sensor.
    VirtualTemperatureSensor,
    /// Software wind sensor.
    VirtualWindSensor,
    /// Software rain sensor.
    VirtualRainSensor,
}

/// Function ids of physical devices.
const PHYSICAL: &[(u32, ChannelKind)] = &[
    (0x0000, ChannelKind::SwitchSensor),
    (0x0001, ChannelKind::DimmingSensor),
    (0x0003, ChannelKind::CoverSensor),
    (0x0005, ChannelKind::ForceOnOffSensor),
    (0x0007, ChannelKind::SwitchActuator),
    (0x0009, ChannelKind::ShutterActuator),
    (0x000A, ChannelKind::RoomTemperatureController),
    (0x000F, ChannelKind::WindowDoorSensor),
    (0x0011, ChannelKind::MovementDetector),
    (0x0012, ChannelKind::DimmingActuator),
    (0x001A, ChannelKind::DesDoorRingingSensor),
    (0x0020, ChannelKind::DesDoorOpenerActuator),
    (0x0021, ChannelKind::DesLightSwitchActuator),
    (0x0023, ChannelKind::RoomTemperatureController),
    (0x0027, ChannelKind::HeatingActuator),
    (0x0028, ChannelKind::CoolingActuator),
    (0x002E, ChannelKind::ColorTemperatureActuator),
    (0x0041, ChannelKind::BrightnessSensor),
    (0x0042, ChannelKind::RainSensor),
    (0x0043, ChannelKind::TemperatureSensor),
    (0x0044, ChannelKind::WindSensor),
    (0x0045, ChannelKind::Trigger),
    (0x0061, ChannelKind::BlindActuator),
    (0x0062, ChannelKind::AtticWindowActuator),
    (0x0063, ChannelKind::AwningActuator),
    (0x0064, ChannelKind::WindowDoorPositionSensor),
    (0x007D, ChannelKind::SmokeDetector),
    (0x007E, ChannelKind::CarbonMonoxideSensor),
    (0x0080, ChannelKind::AirQualitySensor),
];

/// Function ids of virtual devices.
const VIRTUAL: &[(u32, ChannelKind)] = &[
    (0x0007, ChannelKind::VirtualSwitchActuator),
    (0x0009, ChannelKind::VirtualCoverActuator),
    (0x000F, ChannelKind::VirtualWindowDoorSensor),
    (0x0041, ChannelKind::VirtualBrightnessSensor),
    (0x0042, ChannelKind::VirtualRainSensor),
    (0x0043, ChannelKind::VirtualTemperatureSensor),
    (0x0044, ChannelKind::VirtualWindSensor),
    (0x0061, ChannelKind::VirtualCoverActuator),
];

impl ChannelKind {
    /// Parses a function id: hex of any length, leading zeros optional.
    #[must_use]
    pub fn parse_function_id(raw: &str) -> Option<u32> {
        u32::from_str_radix(raw.trim(), 16).ok()
    }

    /// Classifies a channel block by its raw function id.
    ///
    /// `virtual_device` selects the table for software-only devices. Returns
    /// `None` for malformed or unmapped ids.
    #[must_use]
    pub fn from_function_id(raw: &str, virtual_device: bool) -> Option<Self> {
        let id = Self::parse_function_id(raw)?;
        let table = if virtual_device { VIRTUAL } else { PHYSICAL };
        table
            .iter()
            .find(|(function_id, _)| *function_id == id)
            .map(|(_, kind)| *kind)
    }

    /// Returns whether this variant belongs to a virtual device.
    #[must_use]
    pub const fn is_virtual(self) -> bool {
        matches!(
            self,
            Self::VirtualSwitchActuator
                | Self::VirtualCoverActuator
                | Self::VirtualWindowDoorSensor
                | Self::VirtualBrightnessSensor
                | Self::VirtualTemperatureSensor
                | Self::VirtualWindSensor
                | Self::VirtualRainSensor
        )
    }

    /// Returns the declarative description of this variant.
    #[must_use]
    pub fn spec(self) -> &'static ChannelSpec {
        match self {
            Self::SwitchActuator => &catalog::SWITCH_ACTUATOR,
            Self::DimmingActuator => &catalog::DIMMING_ACTUATOR,
            Self::ColorTemperatureActuator => &catalog::COLOR_TEMPERATURE_ACTUATOR,
            Self::ShutterActuator | Self::AtticWindowActuator | Self::AwningActuator => {
                &catalog::COVER_ACTUATOR
            }
            Self::BlindActuator => &catalog::BLIND_ACTUATOR,
            Self::RoomTemperatureController => &catalog::ROOM_TEMPERATURE_CONTROLLER,
            Self::HeatingActuator => &catalog::HEATING_ACTUATOR,
            Self::CoolingActuator => &catalog::COOLING_ACTUATOR,
            Self::MovementDetector => &catalog::MOVEMENT_DETECTOR,
            Self::WindowDoorSensor => &catalog::WINDOW_DOOR_SENSOR,
            Self::WindowDoorPositionSensor => &catalog::WINDOW_DOOR_POSITION_SENSOR,
            Self::TemperatureSensor => &catalog::TEMPERATURE_SENSOR,
            Self::BrightnessSensor => &catalog::BRIGHTNESS_SENSOR,
            Self::RainSensor => &catalog::RAIN_SENSOR,
            Self::WindSensor => &catalog::WIND_SENSOR,
            Self::SwitchSensor => &catalog::SWITCH_SENSOR,
            Self::DimmingSensor => &catalog::DIMMING_SENSOR,
            Self::CoverSensor => &catalog::COVER_SENSOR,
            Self::ForceOnOffSensor => &catalog::FORCE_ON_OFF_SENSOR,
            Self::Trigger => &catalog::TRIGGER,
            Self::DesDoorOpenerActuator | Self::DesLightSwitchActuator => &catalog::DES_ACTUATOR,
            Self::DesDoorRingingSensor => &catalog::DES_DOOR_RINGING_SENSOR,
            Self::SmokeDetector => &catalog::SMOKE_DETECTOR,
            Self::CarbonMonoxideSensor => &catalog::CARBON_MONOXIDE_SENSOR,
            Self::AirQualitySensor => &catalog::AIR_QUALITY_SENSOR,
            Self::VirtualSwitchActuator => &catalog::VIRTUAL_SWITCH_ACTUATOR,
            Self::VirtualCoverActuator => &catalog::VIRTUAL_COVER_ACTUATOR,
            Self::VirtualWindowDoorSensor => &catalog::VIRTUAL_WINDOW_DOOR_SENSOR,
            Self::VirtualBrightnessSensor => &catalog::VIRTUAL_BRIGHTNESS_SENSOR,
            Self::VirtualTemperatureSensor => &catalog::VIRTUAL_TEMPERATURE_SENSOR,
            Self::VirtualWindSensor => &catalog::VIRTUAL_WIND_SENSOR,
            Self::VirtualRainSensor => &catalog::VIRTUAL_RAIN_SENSOR,
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::table::Action;
    use crate::types::{Attribute, Pairing};

    #[test]
    fn function_id_tolerates_leading_zeros() {
        assert_eq!(ChannelKind::parse_function_id("0007"), Some(7));
        assert_eq!(ChannelKind::parse_function_id("7"), Some(7));
        assert_eq!(ChannelKind::parse_function_id("2e"), Some(0x2E));
        assert_eq!(ChannelKind::parse_function_id(""), None);
    }

    #[test]
    fn unmapped_function_id_is_none() {
        assert_eq!(ChannelKind::from_function_id("ffff", false), None);
        assert_eq!(ChannelKind::from_function_id("12", true), None);
    }

    #[test]
    fn tables_are_disjoint_by_virtualness() {
        for (_, kind) in PHYSICAL {
            assert!(!kind.is_virtual(), "{kind} in physical table");
        }
        for (_, kind) in VIRTUAL {
            assert!(kind.is_virtual(), "{kind} in virtual table");
        }
    }

    #[test]
    fn display_is_variant_name() {
        assert_eq!(ChannelKind::RoomTemperatureController.to_string(), "RoomTemperatureController");
    }

    #[test]
    fn refresh_pairings_have_decoders() {
        for (_, kind) in PHYSICAL.iter().chain(VIRTUAL) {
            let spec = kind.spec();
            for pairing in spec.refresh_pairings() {
                assert!(
                    spec.output_decoder(pairing.id()).is_some(),
                    "{kind} refreshes {pairing} without a decoder"
                );
            }
        }
    }

    #[test]
    fn heating_actuator_composes_valve() {
        let spec = ChannelKind::HeatingActuator.spec();
        assert!(spec.write(Action::SetPosition).is_some());
        assert_eq!(
            spec.refresh_pairings().collect::<Vec<_>>(),
            vec![Pairing::InfoValueHeating]
        );
        assert!(spec.callback_attributes().contains(&Attribute::Position));
    }

    #[test]
    fn switch_actuator_callback_attributes() {
        let attributes = ChannelKind::SwitchActuator.spec().callback_attributes();
        assert_eq!(
            attributes.into_iter().collect::<Vec<_>>(),
            vec![Attribute::State, Attribute::Forced]
        );
    }

    #[test]
    fn controller_exposes_derived_eco_flag() {
        let attributes = ChannelKind::RoomTemperatureController
            .spec()
            .callback_attributes();
        assert!(attributes.contains(&Attribute::StateIndication));
        assert!(attributes.contains(&Attribute::EcoMode));
    }
}
