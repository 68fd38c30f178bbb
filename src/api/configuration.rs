// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration snapshot returned by the hub.
//!
//! These types mirror the JSON the hub serves for one SysAP. Every field is
//! optional on the wire; missing fields deserialize to their defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Full configuration snapshot of one SysAP.
///
/// # Examples
///
/// ```
/// use freeathome_lib::api::Configuration;
///
/// let json = r#"{
///     "devices": {
///         "ABB700D12345": {
///             "displayName": "Hallway",
///             "interface": "TP",
///             "channels": {
///                 "ch0000": {
///                     "functionID": "7",
///                     "outputs": { "odp0000": { "pairingID": 256, "value": "1" } }
///                 }
///             }
///         }
///     },
///     "floorplan": { "floors": { "01": { "name": "Ground floor", "rooms": {} } } }
/// }"#;
///
/// let configuration: Configuration = serde_json::from_str(json).unwrap();
/// let device = &configuration.devices["ABB700D12345"];
/// assert_eq!(device.interface.as_deref(), Some("TP"));
/// assert_eq!(device.channels["ch0000"].outputs["odp0000"].pairing_id, 256);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Devices keyed by serial.
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceConfiguration>,
    /// Floors and rooms.
    #[serde(default)]
    pub floorplan: FloorplanConfiguration,
    /// Name of the SysAP.
    #[serde(default)]
    pub sysap_name: Option<String>,
}

/// One device entry of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfiguration {
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Raw interface string (`"TP"`, `"RF"`, ...).
    #[serde(default)]
    pub interface: Option<String>,
    /// Floor id.
    #[serde(default)]
    pub floor: Option<String>,
    /// Room id within the floor.
    #[serde(default)]
    pub room: Option<String>,
    /// Whether the hub currently gets no answer from the device.
    #[serde(default)]
    pub unresponsive: bool,
    /// Number of unanswered requests.
    #[serde(default)]
    pub unresponsive_counter: u32,
    /// Whether the hub flagged the device as defective.
    #[serde(default)]
    pub defect: bool,
    /// Reboot counter as reported by the hub.
    #[serde(default)]
    pub device_reboots: Option<String>,
    /// Id of the device in its native integration.
    #[serde(default)]
    pub native_id: Option<String>,
    /// Device-level parameters.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    /// Channel blocks keyed by channel id.
    #[serde(default)]
    pub channels: BTreeMap<String, ChannelConfiguration>,
}

/// One channel block of a device entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfiguration {
    /// Display name, possibly a firmware placeholder glyph.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Function id as variable-length lowercase hex.
    #[serde(default, rename = "functionID")]
    pub function_id: Option<String>,
    /// Floor id overriding the device's.
    #[serde(default)]
    pub floor: Option<String>,
    /// Room id overriding the device's.
    #[serde(default)]
    pub room: Option<String>,
    /// Input datapoints keyed by datapoint id.
    #[serde(default)]
    pub inputs: BTreeMap<String, Datapoint>,
    /// Output datapoints keyed by datapoint id.
    #[serde(default)]
    pub outputs: BTreeMap<String, Datapoint>,
    /// Parameters keyed by `"par"` + 4 hex digits.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

/// A single datapoint: its pairing id and raw value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datapoint {
    /// Semantic tag of the datapoint.
    #[serde(rename = "pairingID")]
    pub pairing_id: u16,
    /// Raw value; empty when the device has not reported yet.
    #[serde(default)]
    pub value: String,
}

impl Datapoint {
    /// Creates a datapoint.
    #[must_use]
    pub fn new(pairing_id: u16, value: impl Into<String>) -> Self {
        Self {
            pairing_id,
            value: value.into(),
        }
    }
}

/// Floors of the installation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorplanConfiguration {
    /// Floors keyed by floor id.
    #[serde(default)]
    pub floors: BTreeMap<String, FloorConfiguration>,
}

/// One floor and its rooms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorConfiguration {
    /// Floor name.
    #[serde(default)]
    pub name: String,
    /// Rooms keyed by room id.
    #[serde(default)]
    pub rooms: BTreeMap<String, RoomConfiguration>,
}

/// One room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomConfiguration {
    /// Room name.
    #[serde(default)]
    pub name: String,
}
