// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub-level object model: loading, filtering and update routing.
//!
//! - [`FreeAtHome`] - Devices of one hub and the filtered channel index
//! - [`FreeAtHomeConfig`] - Filtering policy of the index
//! - [`ListenerHandle`] - Stops a running update listener

mod config;
mod free_at_home;
mod listener;

pub use config::FreeAtHomeConfig;
pub use free_at_home::{ChannelIndex, FreeAtHome};
pub use listener::ListenerHandle;
