// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-level aggregator of devices and channels.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;

use crate::api::{Api, DatapointPath, DatapointUpdates};
use crate::channel::{Channel, ChannelKind};
use crate::device::Device;
use crate::error::Result;
use crate::floorplan::Floorplan;

use super::config::FreeAtHomeConfig;
use super::listener::ListenerHandle;

/// Filtered channels keyed by `"serial/channelId"`.
pub type ChannelIndex<A> = BTreeMap<String, Arc<Channel<A>>>;

/// Object model of one hub.
///
/// `FreeAtHome` loads the configuration snapshot through an [`Api`], builds a
/// [`Device`] per entry, and keeps a filtered index of their channels. Push
/// updates are routed to the channel they address.
///
/// Loads, unloads and update routing assume a single writer; concurrent
/// readers are fine.
///
/// # Examples
///
/// ```no_run
/// use freeathome_lib::api::HttpApiConfig;
/// use freeathome_lib::channel::ChannelKind;
/// use freeathome_lib::{FreeAtHome, FreeAtHomeConfig};
///
/// #[tokio::main]
/// async fn main() -> freeathome_lib::Result<()> {
///     let api = HttpApiConfig::new("192.168.1.10")
///         .with_credentials("installer", "secret")
///         .into_api()?;
///
///     let hub = FreeAtHome::new(api)
///         .with_config(FreeAtHomeConfig::default().include_orphan_channels(true));
///     hub.load().await?;
///
///     for channel in hub.channels_by_kind(ChannelKind::SwitchActuator) {
///         println!("{} is {:?}", channel.name(), channel.state());
///     }
///     Ok(())
/// }
/// ```
pub struct FreeAtHome<A: Api> {
    api: Arc<A>,
    config: FreeAtHomeConfig,
    devices: RwLock<BTreeMap<String, Arc<Device<A>>>>,
    floorplan: RwLock<Floorplan>,
    index: RwLock<Option<ChannelIndex<A>>>,
}

impl<A: Api> FreeAtHome<A> {
    /// Creates an empty object model with the default filtering policy.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::from_shared(Arc::new(api))
    }

    /// Creates an empty object model around an api that is shared elsewhere.
    #[must_use]
    pub fn from_shared(api: Arc<A>) -> Self {
        Self {
            api,
            config: FreeAtHomeConfig::default(),
            devices: RwLock::new(BTreeMap::new()),
            floorplan: RwLock::new(Floorplan::new()),
            index: RwLock::new(None),
        }
    }

    /// Sets the filtering policy.
    #[must_use]
    pub fn with_config(mut self, config: FreeAtHomeConfig) -> Self {
        self.config = config;
        *self.index.get_mut() = None;
        self
    }

    /// Returns the api collaborator.
    #[must_use]
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Returns the filtering policy.
    #[must_use]
    pub fn config(&self) -> &FreeAtHomeConfig {
        &self.config
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetches the configuration snapshot and rebuilds every device.
    ///
    /// Previously loaded devices and channels are replaced.
    ///
    /// # Errors
    ///
    /// Returns the api error if the snapshot cannot be fetched; the current
    /// devices are kept in that case.
    pub async fn load(&self) -> Result<()> {
        let configuration = self.api.get_configuration().await?;
        let floorplan = Floorplan::from_configuration(&configuration.floorplan);

        let devices: BTreeMap<String, Arc<Device<A>>> = configuration
            .devices
            .iter()
            .map(|(serial, entry)| {
                let device = Arc::new(Device::from_configuration(
                    serial,
                    entry,
                    Arc::clone(&self.api),
                    &floorplan,
                ));
                device.load_channels(&floorplan);
                (serial.clone(), device)
            })
            .collect();

        tracing::info!(
            devices = devices.len(),
            floors = floorplan.floor_count(),
            "Loaded configuration"
        );

        *self.devices.write() = devices;
        *self.floorplan.write() = floorplan;
        self.invalidate_index();
        Ok(())
    }

    /// Returns the floorplan of the last load.
    #[must_use]
    pub fn floorplan(&self) -> Floorplan {
        self.floorplan.read().clone()
    }

    // =========================================================================
    // Devices
    // =========================================================================

    /// Returns every loaded device, unfiltered.
    #[must_use]
    pub fn devices(&self) -> Vec<Arc<Device<A>>> {
        self.devices.read().values().cloned().collect()
    }

    /// Returns a device by serial.
    #[must_use]
    pub fn device(&self, serial: &str) -> Option<Arc<Device<A>>> {
        self.devices.read().get(serial).cloned()
    }

    /// Removes a device and its channels.
    ///
    /// Callbacks registered on the removed channels are dropped.
    pub fn unload_device(&self, serial: &str) -> Option<Arc<Device<A>>> {
        let removed = self.devices.write().remove(serial);
        if let Some(device) = &removed {
            tracing::debug!(%serial, "Unloaded device");
            Self::detach(device);
            self.invalidate_index();
        }
        removed
    }

    /// Removes every device.
    pub fn clear_devices(&self) {
        let devices = std::mem::take(&mut *self.devices.write());
        for device in devices.values() {
            Self::detach(device);
        }
        self.invalidate_index();
    }

    fn detach(device: &Device<A>) {
        for channel in device.channels().into_iter().flat_map(BTreeMap::into_values) {
            channel.clear_callbacks();
        }
    }

    // =========================================================================
    // Channels
    // =========================================================================

    /// Returns the filtered channel index.
    ///
    /// A channel is included when its device's interface is allowed, its
    /// variant is allowed, and it has a floor or a room (unless orphans are
    /// included). The index is cached until the next load or unload.
    #[must_use]
    pub fn channels(&self) -> ChannelIndex<A> {
        self.with_index(Clone::clone)
    }

    /// Returns an indexed channel.
    #[must_use]
    pub fn channel(&self, serial: &str, channel_id: &str) -> Option<Arc<Channel<A>>> {
        let key = format!("{serial}/{channel_id}");
        self.with_index(|index| index.get(&key).cloned())
    }

    /// Returns the indexed channels of one variant.
    #[must_use]
    pub fn channels_by_kind(&self, kind: ChannelKind) -> Vec<Arc<Channel<A>>> {
        self.with_index(|index| {
            index
                .values()
                .filter(|channel| channel.kind() == kind)
                .cloned()
                .collect()
        })
    }

    /// Removes one channel from its device and from the index.
    ///
    /// Callbacks registered on the removed channel are dropped.
    pub fn unload_channel(&self, serial: &str, channel_id: &str) -> Option<Arc<Channel<A>>> {
        let removed = self.device(serial)?.remove_channel(channel_id);
        if let Some(channel) = &removed {
            tracing::debug!(%serial, channel = %channel_id, "Unloaded channel");
            channel.clear_callbacks();
            self.invalidate_index();
        }
        removed
    }

    fn with_index<R>(&self, f: impl FnOnce(&ChannelIndex<A>) -> R) -> R {
        if let Some(index) = self.index.read().as_ref() {
            return f(index);
        }
        let index = self.build_index();
        let result = f(&index);
        *self.index.write() = Some(index);
        result
    }

    fn build_index(&self) -> ChannelIndex<A> {
        let devices = self.devices.read();
        let floorplan = self.floorplan.read();
        let mut index = ChannelIndex::new();

        for (serial, device) in devices.iter() {
            if !self.config.allows_interface(device.interface()) {
                continue;
            }
            for (id, channel) in device.load_channels(&floorplan) {
                if !self.config.allows_kind(channel.kind()) {
                    continue;
                }
                if channel.is_orphan() && !self.config.includes_orphan_channels() {
                    continue;
                }
                index.insert(format!("{serial}/{id}"), channel);
            }
        }
        index
    }

    fn invalidate_index(&self) {
        *self.index.write() = None;
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Routes a batch of pushed datapoint values.
    ///
    /// Each path is resolved through the device's loaded channels, regardless
    /// of the index filter. Unknown serials, channels or datapoints are
    /// ignored. Returns the number of values that decoded into an attribute.
    pub fn update_devices(&self, updates: &DatapointUpdates) -> usize {
        let mut decoded = 0;
        for (path, value) in updates {
            let Some(address) = DatapointPath::parse(path) else {
                tracing::debug!(path = %path, "Ignoring malformed datapoint path");
                continue;
            };
            let Some(channel) = self
                .device(address.serial)
                .and_then(|device| device.channel(address.channel))
            else {
                tracing::trace!(path = %path, "Ignoring update for unknown channel");
                continue;
            };
            if channel.update_channel(path, value).is_some() {
                decoded += 1;
            }
        }
        decoded
    }

    /// Routes update batches until the sender closes or `handle` is stopped.
    ///
    /// Stopping wakes the listener even while it waits for the next batch.
    /// Returns the number of batches routed.
    pub async fn listen(
        &self,
        updates: &mut mpsc::Receiver<DatapointUpdates>,
        handle: &ListenerHandle,
    ) -> usize {
        let mut stop = handle.subscribe();
        let mut batches = 0;

        loop {
            if *stop.borrow_and_update() {
                break;
            }
            tokio::select! {
                biased;

                changed = stop.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                batch = updates.recv() => match batch {
                    Some(batch) => {
                        self.update_devices(&batch);
                        batches += 1;
                    }
                    None => break,
                },
            }
        }

        tracing::debug!(batches, "Update listener finished");
        batches
    }
}

impl<A: Api> std::fmt::Debug for FreeAtHome<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreeAtHome")
            .field("config", &self.config)
            .field("devices", &self.devices.read().len())
            .finish_non_exhaustive()
    }
}
