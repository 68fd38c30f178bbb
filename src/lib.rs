// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `FreeAtHome` Lib - A Rust object model for free@home installations.
//!
//! This library turns the configuration snapshot of a System Access Point
//! (SysAP) into typed devices and channels, keeps their state current from
//! pushed datapoint updates, and writes commands back through the hub's
//! local API.
//!
//! # Supported Features
//!
//! - **Configuration loading**: Devices, channels, floors and rooms
//! - **Typed channels**: Switches, dimmers, covers, thermostats, sensors and
//!   virtual devices, selected by function id
//! - **State tracking**: Decoded attributes with change callbacks
//! - **Commands**: Clamped writes with optimistic state updates
//! - **Filtering**: By interface, channel variant and room assignment
//!
//! # Quick Start
//!
//! ## Loading a Hub
//!
//! ```no_run
//! use freeathome_lib::{FreeAtHome, HttpApiConfig};
//! use freeathome_lib::channel::ChannelKind;
//!
//! #[tokio::main]
//! async fn main() -> freeathome_lib::Result<()> {
//!     let api = HttpApiConfig::new("192.168.1.10")
//!         .with_credentials("installer", "secret")
//!         .into_api()?;
//!
//!     let hub = FreeAtHome::new(api);
//!     hub.load().await?;
//!
//!     for channel in hub.channels_by_kind(ChannelKind::DimmingActuator) {
//!         channel.set_brightness(40).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Callbacks and Push Updates
//!
//! Updates received from the hub are routed to their channel, which decodes
//! them and notifies the callbacks registered for each changed attribute:
//!
//! ```no_run
//! use freeathome_lib::{Callback, FreeAtHome, HttpApiConfig, ListenerHandle};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> freeathome_lib::Result<()> {
//!     let api = HttpApiConfig::new("192.168.1.10").into_api()?;
//!     let hub = FreeAtHome::new(api);
//!     hub.load().await?;
//!
//!     if let Some(channel) = hub.channel("ABB700000001", "ch0000") {
//!         channel.register_callback("state", &Callback::new(|| {
//!             println!("Switch changed");
//!         }))?;
//!     }
//!
//!     let (sender, mut updates) = mpsc::channel(16);
//!     let handle = ListenerHandle::new();
//!     // `sender` is fed by the transport receiving pushed batches.
//!     drop(sender);
//!     hub.listen(&mut updates, &handle).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod channel;
pub mod device;
pub mod error;
pub mod floorplan;
pub mod hub;
pub mod state;
pub mod subscription;
pub mod types;

pub use api::Api;
#[cfg(feature = "http")]
pub use api::{HttpApi, HttpApiConfig};
pub use channel::{Channel, ChannelKind};
pub use device::Device;
pub use error::{ApiError, ChannelError, Error, Result};
pub use floorplan::Floorplan;
pub use hub::{FreeAtHome, FreeAtHomeConfig, ListenerHandle};
pub use subscription::{Callback, CallbackRegistry};
pub use types::{Attribute, AttributeValue, Interface};
