// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static descriptions of every channel variant.

use crate::types::{Attribute, Pairing};

use super::table::{Action, ChannelSpec, Decoder, Payload, Write};
use super::valve::ValvePosition;

const PERCENT: Payload = Payload::Int { min: 0, max: 100 };
const DIM: Payload = Payload::Int { min: 1, max: 100 };
const SET_POINT: Payload = Payload::Float {
    min: 7.0,
    max: 35.0,
};
const OPEN: &str = "0";
const CLOSE: &str = "1";

// ============================================================================
// Actuators
// ============================================================================

pub(super) static SWITCH_ACTUATOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::bool(Pairing::InfoOnOff, Attribute::State),
        Decoder::bool(Pairing::InfoForce, Attribute::Forced),
    ],
    refresh: &[Pairing::InfoOnOff],
    writes: &[
        Write::input(Action::Switch, Pairing::SwitchOnOff, Payload::Flag).sets(Attribute::State),
    ],
    ..ChannelSpec::EMPTY
};

pub(super) static DIMMING_ACTUATOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::bool(Pairing::InfoOnOff, Attribute::State),
        Decoder::bool(Pairing::InfoForce, Attribute::Forced),
        Decoder::int(Pairing::InfoActualDimmingValue, Attribute::Brightness),
    ],
    refresh: &[Pairing::InfoOnOff, Pairing::InfoActualDimmingValue],
    writes: &[
        Write::input(Action::Switch, Pairing::SwitchOnOff, Payload::Flag).sets(Attribute::State),
        Write::input(Action::SetBrightness, Pairing::AbsoluteSetValueControl, DIM)
            .sets(Attribute::Brightness),
    ],
    ..ChannelSpec::EMPTY
};

pub(super) static COLOR_TEMPERATURE_ACTUATOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::bool(Pairing::InfoOnOff, Attribute::State),
        Decoder::bool(Pairing::InfoForce, Attribute::Forced),
        Decoder::int(Pairing::InfoActualDimmingValue, Attribute::Brightness),
        Decoder::int(Pairing::InfoColorTemperature, Attribute::ColorTemperature),
    ],
    refresh: &[
        Pairing::InfoOnOff,
        Pairing::InfoActualDimmingValue,
        Pairing::InfoColorTemperature,
    ],
    writes: &[
        Write::input(Action::Switch, Pairing::SwitchOnOff, Payload::Flag).sets(Attribute::State),
        Write::input(Action::SetBrightness, Pairing::AbsoluteSetValueControl, DIM)
            .sets(Attribute::Brightness),
        Write::input(Action::SetColorTemperature, Pairing::ColorTemperature, PERCENT)
            .sets(Attribute::ColorTemperature),
    ],
    ..ChannelSpec::EMPTY
};

const COVER_OUTPUTS: &[Decoder] = &[
    Decoder::int(Pairing::InfoMoveUpDown, Attribute::Motion),
    Decoder::int(Pairing::CurrentAbsolutePositionBlinds, Attribute::Position),
    Decoder::bool(Pairing::InfoForce, Attribute::Forced),
];

const COVER_WRITES: &[Write] = &[
    Write::input(Action::Open, Pairing::MoveUpDown, Payload::Const(OPEN)),
    Write::input(Action::Close, Pairing::MoveUpDown, Payload::Const(CLOSE)),
    Write::input(Action::Stop, Pairing::StopStepUpDown, Payload::Const("1")),
    Write::input(
        Action::SetPosition,
        Pairing::SetAbsolutePositionBlinds,
        PERCENT,
    )
    .sets(Attribute::Position),
];

/// Shutters, attic windows and awnings share one description.
pub(super) static COVER_ACTUATOR: ChannelSpec = ChannelSpec {
    outputs: COVER_OUTPUTS,
    refresh: &[Pairing::InfoMoveUpDown, Pairing::CurrentAbsolutePositionBlinds],
    writes: COVER_WRITES,
    ..ChannelSpec::EMPTY
};

pub(super) static BLIND_ACTUATOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::int(Pairing::InfoMoveUpDown, Attribute::Motion),
        Decoder::int(Pairing::CurrentAbsolutePositionBlinds, Attribute::Position),
        Decoder::bool(Pairing::InfoForce, Attribute::Forced),
        Decoder::int(Pairing::CurrentAbsolutePositionSlats, Attribute::TiltPosition),
    ],
    refresh: &[
        Pairing::InfoMoveUpDown,
        Pairing::CurrentAbsolutePositionBlinds,
        Pairing::CurrentAbsolutePositionSlats,
    ],
    writes: &[
        Write::input(Action::Open, Pairing::MoveUpDown, Payload::Const(OPEN)),
        Write::input(Action::Close, Pairing::MoveUpDown, Payload::Const(CLOSE)),
        Write::input(Action::Stop, Pairing::StopStepUpDown, Payload::Const("1")),
        Write::input(
            Action::SetPosition,
            Pairing::SetAbsolutePositionBlinds,
            PERCENT,
        )
        .sets(Attribute::Position),
        Write::input(
            Action::SetTiltPosition,
            Pairing::SetAbsolutePositionSlats,
            PERCENT,
        )
        .sets(Attribute::TiltPosition),
    ],
    ..ChannelSpec::EMPTY
};

pub(super) static ROOM_TEMPERATURE_CONTROLLER: ChannelSpec = ChannelSpec {
    outputs: &[
        // Bit 2 of the status word is the eco flag.
        Decoder::bitmask(
            Pairing::StateIndication,
            Attribute::StateIndication,
            Attribute::EcoMode,
            0x04,
        ),
        Decoder::float(Pairing::SetPointTemperature, Attribute::TargetTemperature),
        Decoder::float(Pairing::MeasuredTemperature, Attribute::CurrentTemperature),
        Decoder::int(Pairing::InfoValueHeating, Attribute::HeatingValue),
        Decoder::int(Pairing::InfoValueCooling, Attribute::CoolingValue),
        Decoder::bool(Pairing::ControllerOnOff, Attribute::State),
        Decoder::bool(Pairing::EcoOnOff, Attribute::EcoMode),
    ],
    refresh: &[
        Pairing::StateIndication,
        Pairing::SetPointTemperature,
        Pairing::MeasuredTemperature,
    ],
    writes: &[
        Write::input(
            Action::SetTemperature,
            Pairing::AbsoluteSetPointTemperature,
            SET_POINT,
        )
        .sets(Attribute::TargetTemperature),
        Write::input(
            Action::Switch,
            Pairing::ControllerOnOffRequest,
            Payload::Flag,
        )
        .sets(Attribute::State),
        Write::input(Action::Eco, Pairing::EcoOnOffRequest, Payload::Flag)
            .sets(Attribute::EcoMode),
    ],
    ..ChannelSpec::EMPTY
};

pub(super) static HEATING_ACTUATOR: ChannelSpec = ChannelSpec {
    valve: Some(ValvePosition::HEATING),
    ..ChannelSpec::EMPTY
};

pub(super) static COOLING_ACTUATOR: ChannelSpec = ChannelSpec {
    valve: Some(ValvePosition::COOLING),
    ..ChannelSpec::EMPTY
};

pub(super) static TRIGGER: ChannelSpec = ChannelSpec {
    writes: &[Write::input(
        Action::Press,
        Pairing::TimedStartStop,
        Payload::Const("1"),
    )],
    ..ChannelSpec::EMPTY
};

/// Door opener and staircase light of a door entry system.
pub(super) static DES_ACTUATOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::bool(Pairing::InfoOnOff, Attribute::State),
        Decoder::bool(Pairing::InfoForce, Attribute::Forced),
    ],
    refresh: &[Pairing::InfoOnOff],
    writes: &[
        Write::input(Action::Switch, Pairing::TimedStartStop, Payload::Flag)
            .sets(Attribute::State),
    ],
    ..ChannelSpec::EMPTY
};

// ============================================================================
// Sensors
// ============================================================================

pub(super) static DES_DOOR_RINGING_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[Decoder::bool(Pairing::TimedStartStop, Attribute::State)],
    ..ChannelSpec::EMPTY
};

pub(super) static MOVEMENT_DETECTOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::bool(Pairing::TimedMovement, Attribute::State),
        Decoder::float(Pairing::BrightnessLevel, Attribute::BrightnessLevel),
    ],
    refresh: &[Pairing::TimedMovement],
    ..ChannelSpec::EMPTY
};

pub(super) static WINDOW_DOOR_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[Decoder::bool(Pairing::WindowDoor, Attribute::State)],
    refresh: &[Pairing::WindowDoor],
    ..ChannelSpec::EMPTY
};

pub(super) static WINDOW_DOOR_POSITION_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::bool(Pairing::WindowDoor, Attribute::State),
        Decoder::int(Pairing::WindowDoorPosition, Attribute::WindowPosition),
    ],
    refresh: &[Pairing::WindowDoor, Pairing::WindowDoorPosition],
    ..ChannelSpec::EMPTY
};

pub(super) static TEMPERATURE_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::float(Pairing::OutdoorTemperature, Attribute::Temperature),
        Decoder::bool(Pairing::FrostAlarm, Attribute::Frost),
    ],
    refresh: &[Pairing::OutdoorTemperature],
    ..ChannelSpec::EMPTY
};

pub(super) static BRIGHTNESS_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::float(Pairing::BrightnessLevel, Attribute::BrightnessLevel),
        Decoder::bool(Pairing::BrightnessAlarm, Attribute::Alarm),
    ],
    refresh: &[Pairing::BrightnessLevel],
    ..ChannelSpec::EMPTY
};

pub(super) static RAIN_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::bool(Pairing::RainAlarm, Attribute::Alarm),
        Decoder::int(
            Pairing::RainSensorActivationPercentage,
            Attribute::RainIntensity,
        ),
        Decoder::float(Pairing::RainSensorFrequency, Attribute::RainFrequency),
    ],
    refresh: &[Pairing::RainAlarm],
    ..ChannelSpec::EMPTY
};

pub(super) static WIND_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::bool(Pairing::WindAlarm, Attribute::Alarm),
        Decoder::int(Pairing::WindForce, Attribute::WindForce),
        Decoder::float(Pairing::WindSpeed, Attribute::WindSpeed),
    ],
    refresh: &[Pairing::WindAlarm, Pairing::WindForce],
    ..ChannelSpec::EMPTY
};

pub(super) static SWITCH_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[Decoder::bool(Pairing::SwitchOnOff, Attribute::State)],
    ..ChannelSpec::EMPTY
};

pub(super) static DIMMING_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::bool(Pairing::SwitchOnOff, Attribute::State),
        Decoder::int(Pairing::RelativeSetValueControl, Attribute::RelativeValue),
    ],
    ..ChannelSpec::EMPTY
};

pub(super) static COVER_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[Decoder::int(Pairing::MoveUpDown, Attribute::Motion)],
    ..ChannelSpec::EMPTY
};

pub(super) static FORCE_ON_OFF_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[Decoder::bool(Pairing::Forced, Attribute::Forced)],
    ..ChannelSpec::EMPTY
};

pub(super) static SMOKE_DETECTOR: ChannelSpec = ChannelSpec {
    outputs: &[Decoder::bool(Pairing::FireAlarmActive, Attribute::State)],
    refresh: &[Pairing::FireAlarmActive],
    ..ChannelSpec::EMPTY
};

pub(super) static CARBON_MONOXIDE_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[Decoder::bool(
        Pairing::CarbonMonoxideAlarmActive,
        Attribute::State,
    )],
    refresh: &[Pairing::CarbonMonoxideAlarmActive],
    ..ChannelSpec::EMPTY
};

pub(super) static AIR_QUALITY_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::int(Pairing::MeasuredCo2, Attribute::Co2),
        Decoder::float(Pairing::MeasuredHumidity, Attribute::Humidity),
        Decoder::int(Pairing::MeasuredVoc, Attribute::Voc),
    ],
    refresh: &[Pairing::MeasuredCo2],
    ..ChannelSpec::EMPTY
};

// ============================================================================
// Virtual devices
// ============================================================================

pub(super) static VIRTUAL_SWITCH_ACTUATOR: ChannelSpec = ChannelSpec {
    outputs: &[Decoder::bool(Pairing::InfoOnOff, Attribute::State)],
    inputs: &[Decoder::bool(Pairing::SwitchOnOff, Attribute::RequestedState)],
    refresh: &[Pairing::InfoOnOff],
    writes: &[
        Write::output(Action::Switch, Pairing::InfoOnOff, Payload::Flag).sets(Attribute::State),
    ],
    valve: None,
};

pub(super) static VIRTUAL_COVER_ACTUATOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::int(Pairing::InfoMoveUpDown, Attribute::Motion),
        Decoder::int(Pairing::CurrentAbsolutePositionBlinds, Attribute::Position),
    ],
    inputs: &[
        Decoder::int(
            Pairing::SetAbsolutePositionBlinds,
            Attribute::RequestedPosition,
        ),
        Decoder::int(Pairing::MoveUpDown, Attribute::RequestedMotion),
    ],
    refresh: &[Pairing::CurrentAbsolutePositionBlinds],
    writes: &[
        Write::output(
            Action::SetPosition,
            Pairing::CurrentAbsolutePositionBlinds,
            PERCENT,
        )
        .sets(Attribute::Position),
    ],
    valve: None,
};

pub(super) static VIRTUAL_WINDOW_DOOR_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[Decoder::bool(Pairing::WindowDoor, Attribute::State)],
    refresh: &[Pairing::WindowDoor],
    writes: &[
        Write::output(Action::Contact, Pairing::WindowDoor, Payload::Flag).sets(Attribute::State),
    ],
    ..ChannelSpec::EMPTY
};

pub(super) static VIRTUAL_BRIGHTNESS_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::float(Pairing::BrightnessLevel, Attribute::BrightnessLevel),
        Decoder::bool(Pairing::BrightnessAlarm, Attribute::Alarm),
    ],
    refresh: &[Pairing::BrightnessLevel],
    writes: &[
        Write::output(
            Action::SetBrightnessLevel,
            Pairing::BrightnessLevel,
            Payload::Float {
                min: 0.0,
                max: 100_000.0,
            },
        )
        .sets(Attribute::BrightnessLevel),
        Write::output(Action::Alarm, Pairing::BrightnessAlarm, Payload::Flag)
            .sets(Attribute::Alarm),
    ],
    ..ChannelSpec::EMPTY
};

pub(super) static VIRTUAL_TEMPERATURE_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::float(Pairing::OutdoorTemperature, Attribute::Temperature),
        Decoder::bool(Pairing::FrostAlarm, Attribute::Frost),
    ],
    refresh: &[Pairing::OutdoorTemperature],
    writes: &[
        Write::output(
            Action::SetTemperature,
            Pairing::OutdoorTemperature,
            Payload::Float {
                min: -40.0,
                max: 80.0,
            },
        )
        .sets(Attribute::Temperature),
        Write::output(Action::Alarm, Pairing::FrostAlarm, Payload::Flag).sets(Attribute::Frost),
    ],
    ..ChannelSpec::EMPTY
};

pub(super) static VIRTUAL_WIND_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[
        Decoder::bool(Pairing::WindAlarm, Attribute::Alarm),
        Decoder::int(Pairing::WindForce, Attribute::WindForce),
        Decoder::float(Pairing::WindSpeed, Attribute::WindSpeed),
    ],
    refresh: &[Pairing::WindForce],
    writes: &[
        Write::output(
            Action::SetWindForce,
            Pairing::WindForce,
            Payload::Int { min: 0, max: 12 },
        )
        .sets(Attribute::WindForce),
        Write::output(Action::Alarm, Pairing::WindAlarm, Payload::Flag).sets(Attribute::Alarm),
    ],
    ..ChannelSpec::EMPTY
};

pub(super) static VIRTUAL_RAIN_SENSOR: ChannelSpec = ChannelSpec {
    outputs: &[Decoder::bool(Pairing::RainAlarm, Attribute::Alarm)],
    refresh: &[Pairing::RainAlarm],
    writes: &[
        Write::output(Action::Alarm, Pairing::RainAlarm, Payload::Flag).sets(Attribute::Alarm),
    ],
    ..ChannelSpec::EMPTY
};
