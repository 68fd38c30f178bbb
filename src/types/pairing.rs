// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pairing ids.
//!
//! A pairing id tags what a datapoint means ("on/off info", "current
//! position", ...) independently of its opaque datapoint id. Only the ids used
//! by the modelled channel variants are listed here.

use std::fmt;

/// Semantic tag of a datapoint.
///
/// # Examples
///
/// ```
/// use freeathome_lib::types::Pairing;
///
/// assert_eq!(Pairing::InfoOnOff.id(), 256);
/// assert_eq!(Pairing::from_id(0x0121), Some(Pairing::CurrentAbsolutePositionBlinds));
/// assert_eq!(Pairing::from_id(0xFFFF), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Pairing {
    /// Switch on/off request.
    SwitchOnOff = 0x0001,
    /// Timed start/stop (door opener, trigger).
    TimedStartStop = 0x0002,
    /// Forced position request.
    Forced = 0x0003,
    /// Movement detected, timed.
    TimedMovement = 0x0006,
    /// Relative dimming request.
    RelativeSetValueControl = 0x0010,
    /// Absolute dimming request.
    AbsoluteSetValueControl = 0x0011,
    /// Requested color temperature.
    ColorTemperature = 0x0017,
    /// Move up/down request.
    MoveUpDown = 0x0020,
    /// Stop or step request.
    StopStepUpDown = 0x0021,
    /// Requested blind position in percent.
    SetAbsolutePositionBlinds = 0x0024,
    /// Requested slat position in percent.
    SetAbsolutePositionSlats = 0x0025,
    /// Wind alarm.
    WindAlarm = 0x0026,
    /// Frost alarm.
    FrostAlarm = 0x0027,
    /// Rain alarm.
    RainAlarm = 0x0028,
    /// Window or door position (closed, tilted, open).
    WindowDoorPosition = 0x0029,
    /// Requested heating valve position.
    ActuatingValueHeating = 0x0030,
    /// Requested cooling valve position.
    ActuatingValueCooling = 0x0032,
    /// Current set-point temperature.
    SetPointTemperature = 0x0033,
    /// Window or door open.
    WindowDoor = 0x0035,
    /// Controller status bitmask.
    StateIndication = 0x0036,
    /// Controller on/off info.
    ControllerOnOff = 0x0038,
    /// Eco mode info.
    EcoOnOff = 0x003A,
    /// Controller on/off request.
    ControllerOnOffRequest = 0x0042,
    /// Eco mode request.
    EcoOnOffRequest = 0x0043,
    /// On/off info.
    InfoOnOff = 0x0100,
    /// Forced position info.
    InfoForce = 0x0101,
    /// Fire alarm active.
    FireAlarmActive = 0x0102,
    /// Carbon monoxide alarm active.
    CarbonMonoxideAlarmActive = 0x0103,
    /// Current dimming value.
    InfoActualDimmingValue = 0x0110,
    /// Current color temperature.
    InfoColorTemperature = 0x0118,
    /// Current movement direction.
    InfoMoveUpDown = 0x0120,
    /// Current blind position in percent.
    CurrentAbsolutePositionBlinds = 0x0121,
    /// Current slat position in percent.
    CurrentAbsolutePositionSlats = 0x0122,
    /// Measured room temperature.
    MeasuredTemperature = 0x0130,
    /// Current heating valve position.
    InfoValueHeating = 0x0131,
    /// Current cooling valve position.
    InfoValueCooling = 0x0132,
    /// Requested absolute set-point temperature.
    AbsoluteSetPointTemperature = 0x0140,
    /// Outdoor temperature.
    OutdoorTemperature = 0x0400,
    /// Brightness alarm.
    BrightnessAlarm = 0x0402,
    /// Brightness level in lux.
    BrightnessLevel = 0x0403,
    /// Wind force in Beaufort.
    WindForce = 0x0404,
    /// Rain sensor activation in percent.
    RainSensorActivationPercentage = 0x0405,
    /// Rain sensor frequency.
    RainSensorFrequency = 0x0406,
    /// Wind speed in m/s.
    WindSpeed = 0x0407,
    /// Relative humidity in percent.
    MeasuredHumidity = 0x0410,
    /// CO2 concentration in ppm.
    MeasuredCo2 = 0x0411,
    /// VOC index.
    MeasuredVoc = 0x0412,
}

impl Pairing {
    const ALL: &'static [Self] = &[
        Self::SwitchOnOff,
        Self::TimedStartStop,
        Self::Forced,
        Self::TimedMovement,
        Self::RelativeSetValueControl,
        Self::AbsoluteSetValueControl,
        Self::ColorTemperature,
        Self::MoveUpDown,
        Self::StopStepUpDown,
        Self::SetAbsolutePositionBlinds,
        Self::SetAbsolutePositionSlats,
        Self::WindAlarm,
        Self::FrostAlarm,
        Self::RainAlarm,
        Self::WindowDoorPosition,
        Self::ActuatingValueHeating,
        Self::ActuatingValueCooling,
        Self::SetPointTemperature,
        Self::WindowDoor,
        Self::StateIndication,
        Self::ControllerOnOff,
        Self::EcoOnOff,
        Self::ControllerOnOffRequest,
        Self::EcoOnOffRequest,
        Self::InfoOnOff,
        Self::InfoForce,
        Self::FireAlarmActive,
        Self::CarbonMonoxideAlarmActive,
        Self::InfoActualDimmingValue,
        Self::InfoColorTemperature,
        Self::InfoMoveUpDown,
        Self::CurrentAbsolutePositionBlinds,
        Self::CurrentAbsolutePositionSlats,
        Self::MeasuredTemperature,
        Self::InfoValueHeating,
        Self::InfoValueCooling,
        Self::AbsoluteSetPointTemperature,
        Self::OutdoorTemperature,
        Self::BrightnessAlarm,
        Self::BrightnessLevel,
        Self::WindForce,
        Self::RainSensorActivationPercentage,
        Self::RainSensorFrequency,
        Self::WindSpeed,
        Self::MeasuredHumidity,
        Self::MeasuredCo2,
        Self::MeasuredVoc,
    ];

    /// Returns the numeric pairing id used on the wire.
    #[must_use]
    pub const fn id(self) -> u16 {
        self as u16
    }

    /// Looks up a known pairing by its numeric id.
    #[must_use]
    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|pairing| pairing.id() == id)
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?} (0x{:04X})", self.id())
    }
}
