// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Devices and lazy channel materialization.
//!
//! A [`Device`] keeps the raw channel blocks of one configuration snapshot
//! entry and turns them into [`Channel`]s on [`Device::load_channels`]. The
//! result is cached: repeated loads hand out the same `Arc`s until
//! [`Device::clear_channels`] is called.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use freeathome_lib::api::{Api, Configuration};
//! use freeathome_lib::{Device, Floorplan};
//!
//! # fn example<A: Api>(api: Arc<A>, configuration: &Configuration) {
//! let floorplan = Floorplan::from_configuration(&configuration.floorplan);
//! for (serial, entry) in &configuration.devices {
//!     let device = Arc::new(Device::from_configuration(serial, entry, Arc::clone(&api), &floorplan));
//!     for (id, channel) in device.load_channels(&floorplan) {
//!         println!("{serial}/{id}: {} ({})", channel.name(), channel.kind());
//!     }
//! }
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::api::{Api, ChannelConfiguration, DeviceConfiguration};
use crate::channel::{Channel, ChannelKind, ChannelParts};
use crate::floorplan::Floorplan;
use crate::types::Interface;

/// Serial prefix of software-only devices.
const VIRTUAL_SERIAL_PREFIX: &str = "6000";

/// Channel names the firmware uses as "no name set".
const NAME_PLACEHOLDERS: [&str; 3] = ["", "\u{2063}", "\u{2800}"];

/// Loaded channels keyed by channel id.
pub type ChannelMap<A> = BTreeMap<String, Arc<Channel<A>>>;

/// A physical or virtual unit managed by the hub.
pub struct Device<A: Api> {
    serial: String,
    display_name: Option<String>,
    interface: Interface,
    floor: Option<String>,
    room: Option<String>,
    floor_name: Option<String>,
    room_name: Option<String>,
    unresponsive: bool,
    unresponsive_counter: u32,
    defect: bool,
    device_reboots: Option<String>,
    native_id: Option<String>,
    parameters: BTreeMap<String, String>,
    channel_configurations: BTreeMap<String, ChannelConfiguration>,
    api: Arc<A>,
    channels: RwLock<Option<ChannelMap<A>>>,
}

impl<A: Api> Device<A> {
    /// Builds a device from one snapshot entry.
    ///
    /// The interface string is matched exactly; anything unrecognized becomes
    /// [`Interface::Undefined`]. Serials starting with `6000` denote virtual
    /// devices whatever the interface string says.
    #[must_use]
    pub fn from_configuration(
        serial: &str,
        configuration: &DeviceConfiguration,
        api: Arc<A>,
        floorplan: &Floorplan,
    ) -> Self {
        let interface = if serial.starts_with(VIRTUAL_SERIAL_PREFIX) {
            Interface::VirtualDevice
        } else {
            Interface::from_raw(configuration.interface.as_deref())
        };
        let floor = configuration.floor.clone();
        let room = configuration.room.clone();

        Self {
            serial: serial.to_string(),
            display_name: configuration.display_name.clone(),
            interface,
            floor_name: floorplan
                .get_floor_name(floor.as_deref())
                .map(str::to_string),
            room_name: floorplan
                .get_room_name(floor.as_deref(), room.as_deref())
                .map(str::to_string),
            floor,
            room,
            unresponsive: configuration.unresponsive,
            unresponsive_counter: configuration.unresponsive_counter,
            defect: configuration.defect,
            device_reboots: configuration.device_reboots.clone(),
            native_id: configuration.native_id.clone(),
            parameters: configuration.parameters.clone(),
            channel_configurations: configuration.channels.clone(),
            api,
            channels: RwLock::new(None),
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Returns the serial.
    #[must_use]
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the interface classification.
    #[must_use]
    pub fn interface(&self) -> Interface {
        self.interface
    }

    /// Returns whether this is a software-only device.
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.interface == Interface::VirtualDevice
    }

    /// Returns the floor id.
    #[must_use]
    pub fn floor(&self) -> Option<&str> {
        self.floor.as_deref()
    }

    /// Returns the room id.
    #[must_use]
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// Returns the floor name.
    #[must_use]
    pub fn floor_name(&self) -> Option<&str> {
        self.floor_name.as_deref()
    }

    /// Returns the room name.
    #[must_use]
    pub fn room_name(&self) -> Option<&str> {
        self.room_name.as_deref()
    }

    /// Returns whether the hub gets no answer from the device.
    #[must_use]
    pub fn unresponsive(&self) -> bool {
        self.unresponsive
    }

    /// Returns the number of unanswered requests.
    #[must_use]
    pub fn unresponsive_counter(&self) -> u32 {
        self.unresponsive_counter
    }

    /// Returns whether the hub flagged the device as defective.
    #[must_use]
    pub fn defect(&self) -> bool {
        self.defect
    }

    /// Returns the reboot counter.
    #[must_use]
    pub fn device_reboots(&self) -> Option<&str> {
        self.device_reboots.as_deref()
    }

    /// Returns the id in the device's native integration.
    #[must_use]
    pub fn native_id(&self) -> Option<&str> {
        self.native_id.as_deref()
    }

    /// Returns the device-level parameters.
    #[must_use]
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Returns the raw channel blocks.
    #[must_use]
    pub fn channel_configurations(&self) -> &BTreeMap<String, ChannelConfiguration> {
        &self.channel_configurations
    }

    // =========================================================================
    // Channels
    // =========================================================================

    /// Materializes the channels of this device.
    ///
    /// Channel blocks with a malformed or unmapped function id are skipped.
    /// The result is cached; until [`Device::clear_channels`] is called every
    /// call returns the same channel instances.
    pub fn load_channels(self: &Arc<Self>, floorplan: &Floorplan) -> ChannelMap<A> {
        if let Some(channels) = self.channels.read().as_ref() {
            return channels.clone();
        }

        let mut channels = self.channels.write();
        // Another caller may have loaded between the two locks.
        if let Some(channels) = channels.as_ref() {
            return channels.clone();
        }

        let loaded: ChannelMap<A> = self
            .channel_configurations
            .iter()
            .filter_map(|(id, configuration)| {
                self.build_channel(id, configuration, floorplan)
                    .map(|channel| (id.clone(), Arc::new(channel)))
            })
            .collect();

        tracing::debug!(
            serial = %self.serial,
            loaded = loaded.len(),
            configured = self.channel_configurations.len(),
            "Loaded channels"
        );
        *channels = Some(loaded.clone());
        loaded
    }

    /// Drops the channel cache; the next load builds new instances.
    pub fn clear_channels(&self) {
        *self.channels.write() = None;
    }

    /// Returns the loaded channels, or `None` before the first load.
    #[must_use]
    pub fn channels(&self) -> Option<ChannelMap<A>> {
        self.channels.read().clone()
    }

    /// Returns a loaded channel.
    #[must_use]
    pub fn channel(&self, channel_id: &str) -> Option<Arc<Channel<A>>> {
        self.channels.read().as_ref()?.get(channel_id).cloned()
    }

    /// Removes a loaded channel.
    ///
    /// The removal lasts until the cache is cleared and reloaded.
    pub fn remove_channel(&self, channel_id: &str) -> Option<Arc<Channel<A>>> {
        self.channels.write().as_mut()?.remove(channel_id)
    }

    fn build_channel(
        self: &Arc<Self>,
        id: &str,
        configuration: &ChannelConfiguration,
        floorplan: &Floorplan,
    ) -> Option<Channel<A>> {
        let raw_function = configuration.function_id.as_deref().unwrap_or_default();
        let Some(kind) = ChannelKind::from_function_id(raw_function, self.is_virtual()) else {
            tracing::debug!(
                serial = %self.serial,
                channel = %id,
                function_id = %raw_function,
                "Skipping channel with unknown function id"
            );
            return None;
        };

        let floor = configuration.floor.as_deref().or(self.floor.as_deref());
        let floor_name = floorplan.get_floor_name(floor).map(str::to_string);
        // Each field falls back on its own: a channel that only overrides the
        // floor still reports the device's room.
        let room_name = match configuration.room.as_deref() {
            Some(room) => floorplan
                .get_room_name(floor, Some(room))
                .map(str::to_string),
            None => self.room_name.clone(),
        };

        Some(Channel::new(ChannelParts {
            device: Arc::downgrade(self),
            device_serial: self.serial.clone(),
            id: id.to_string(),
            name: self.channel_name(configuration.display_name.as_deref()),
            kind,
            floor_name,
            room_name,
            api: Arc::clone(&self.api),
            inputs: configuration.inputs.clone(),
            outputs: configuration.outputs.clone(),
            parameters: configuration.parameters.clone(),
        }))
    }

    fn channel_name(&self, name: Option<&str>) -> String {
        match name {
            Some(name) if !NAME_PLACEHOLDERS.contains(&name) => name.to_string(),
            _ => self.display_name.clone().unwrap_or_default(),
        }
    }
}

impl<A: Api> std::fmt::Debug for Device<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("serial", &self.serial)
            .field("display_name", &self.display_name)
            .field("interface", &self.interface)
            .field("floor_name", &self.floor_name)
            .field("room_name", &self.room_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeApi;
    use crate::types::Pairing;

    fn floorplan() -> Floorplan {
        Floorplan::new()
            .with_floor("01", "Ground floor")
            .with_room("01", "01", "Living room")
            .with_room("01", "02", "Kitchen")
            .with_floor("02", "First floor")
            .with_room("02", "01", "Bedroom")
    }

    fn configuration(value: serde_json::Value) -> DeviceConfiguration {
        serde_json::from_value(value).unwrap()
    }

    fn device(serial: &str, value: serde_json::Value) -> Arc<Device<FakeApi>> {
        Arc::new(Device::from_configuration(
            serial,
            &configuration(value),
            Arc::new(FakeApi::default()),
            &floorplan(),
        ))
    }

    fn switch_device() -> Arc<Device<FakeApi>> {
        device(
            "ABB700D12345",
            serde_json::json!({
                "displayName": "Hallway actuator",
                "interface": "TP",
                "floor": "01",
                "room": "01",
                "channels": {
                    "ch0000": {
                        "displayName": "Ceiling",
                        "functionID": "7",
                        "inputs": { "idp0000": { "pairingID": 1, "value": "" } },
                        "outputs": { "odp0000": { "pairingID": 256, "value": "1" } }
                    },
                    "ch0001": {
                        "displayName": "\u{2063}",
                        "functionID": "0007",
                        "room": "02"
                    },
                    "ch0002": { "functionID": "ffff" },
                    "ch0003": { "functionID": "not hex" },
                    "ch0004": { "displayName": "Upstairs", "functionID": "12", "floor": "02" }
                }
            }),
        )
    }

    #[test]
    fn interface_is_matched_exactly() {
        let lowercase = device("ABB700D00001", serde_json::json!({ "interface": "tp" }));
        assert_eq!(lowercase.interface(), Interface::Undefined);

        let wireless = device("ABB700D00001", serde_json::json!({ "interface": "RF" }));
        assert_eq!(wireless.interface(), Interface::WirelessRf);
    }

    #[test]
    fn serial_prefix_marks_virtual_devices() {
        let device = device("60002AE2F1BE", serde_json::json!({ "interface": "TP" }));
        assert!(device.is_virtual());
        assert_eq!(device.interface(), Interface::VirtualDevice);
    }

    #[test]
    fn unknown_function_ids_are_skipped() {
        let device = switch_device();
        let channels = device.load_channels(&floorplan());
        assert_eq!(
            channels.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["ch0000", "ch0001", "ch0004"]
        );
        assert_eq!(channels["ch0000"].kind(), ChannelKind::SwitchActuator);
        assert_eq!(channels["ch0004"].kind(), ChannelKind::DimmingActuator);
    }

    #[test]
    fn load_channels_is_identity_stable() {
        let device = switch_device();
        let first = device.load_channels(&floorplan());
        let second = device.load_channels(&floorplan());
        assert!(Arc::ptr_eq(&first["ch0000"], &second["ch0000"]));

        device.clear_channels();
        assert!(device.channels().is_none());
        let third = device.load_channels(&floorplan());
        assert!(!Arc::ptr_eq(&first["ch0000"], &third["ch0000"]));
    }

    #[test]
    fn placeholder_names_fall_back_to_device_name() {
        let device = switch_device();
        let channels = device.load_channels(&floorplan());
        assert_eq!(channels["ch0000"].name(), "Ceiling");
        assert_eq!(channels["ch0001"].name(), "Hallway actuator");
    }

    #[test]
    fn floor_and_room_resolution() {
        let device = switch_device();
        let channels = device.load_channels(&floorplan());

        // Device-level floor and room.
        assert_eq!(channels["ch0000"].floor_name(), Some("Ground floor"));
        assert_eq!(channels["ch0000"].room_name(), Some("Living room"));

        // Channel room override on the device floor.
        assert_eq!(channels["ch0001"].room_name(), Some("Kitchen"));

        // Channel floor override keeps the device room name.
        assert_eq!(channels["ch0004"].floor_name(), Some("First floor"));
        assert_eq!(channels["ch0004"].room_name(), Some("Living room"));
    }

    #[test]
    fn channel_without_location_is_orphan() {
        let device = device(
            "ABB700D00002",
            serde_json::json!({
                "interface": "TP",
                "channels": { "ch0000": { "functionID": "7" } }
            }),
        );
        let channels = device.load_channels(&floorplan());
        assert!(channels["ch0000"].is_orphan());
    }

    #[test]
    fn channels_start_decoded_and_reach_their_device() {
        let device = switch_device();
        let channel = device.load_channels(&floorplan())["ch0000"].clone();
        assert_eq!(channel.state(), Some(true));
        assert_eq!(
            channel.get_output_by_pairing(Pairing::InfoOnOff).unwrap().0,
            "odp0000"
        );
        let owner = channel.device().unwrap();
        assert_eq!(owner.serial(), "ABB700D12345");
    }

    #[test]
    fn virtual_table_is_used_for_virtual_devices() {
        let device = device(
            "60002AE2F1BE",
            serde_json::json!({
                "channels": { "ch0000": { "functionID": "7" } }
            }),
        );
        let channels = device.load_channels(&floorplan());
        assert_eq!(channels["ch0000"].kind(), ChannelKind::VirtualSwitchActuator);
    }

    #[test]
    fn remove_channel_drops_it_from_cache() {
        let device = switch_device();
        device.load_channels(&floorplan());
        assert!(device.remove_channel("ch0000").is_some());
        assert!(device.channel("ch0000").is_none());
        assert!(!device.load_channels(&floorplan()).contains_key("ch0000"));
    }
}
