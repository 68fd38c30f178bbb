// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Filtering policy of the channel index.

use std::collections::BTreeSet;

use crate::channel::ChannelKind;
use crate::types::Interface;

/// Which channels [`FreeAtHome::channels`](super::FreeAtHome::channels)
/// exposes.
///
/// # Examples
///
/// ```
/// use freeathome_lib::FreeAtHomeConfig;
/// use freeathome_lib::channel::ChannelKind;
/// use freeathome_lib::types::Interface;
///
/// let config = FreeAtHomeConfig::default()
///     .with_interfaces([Interface::WiredBus])
///     .with_channel_kinds([ChannelKind::SwitchActuator, ChannelKind::DimmingActuator])
///     .include_orphan_channels(true);
///
/// assert!(config.allows_interface(Interface::WiredBus));
/// assert!(!config.allows_interface(Interface::WirelessRf));
/// assert!(!config.allows_kind(ChannelKind::BlindActuator));
/// assert!(config.includes_orphan_channels());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeAtHomeConfig {
    interfaces: BTreeSet<Interface>,
    channel_kinds: Option<BTreeSet<ChannelKind>>,
    include_orphan_channels: bool,
}

impl Default for FreeAtHomeConfig {
    fn default() -> Self {
        Self {
            interfaces: Interface::KNOWN.into_iter().collect(),
            channel_kinds: None,
            include_orphan_channels: false,
        }
    }
}

impl FreeAtHomeConfig {
    /// Creates the default policy: every known interface, every variant,
    /// orphans excluded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the index to devices attached through these interfaces.
    #[must_use]
    pub fn with_interfaces(mut self, interfaces: impl IntoIterator<Item = Interface>) -> Self {
        self.interfaces = interfaces.into_iter().collect();
        self
    }

    /// Restricts the index to these channel variants.
    #[must_use]
    pub fn with_channel_kinds(mut self, kinds: impl IntoIterator<Item = ChannelKind>) -> Self {
        self.channel_kinds = Some(kinds.into_iter().collect());
        self
    }

    /// Sets whether channels with neither floor nor room are included.
    #[must_use]
    pub fn include_orphan_channels(mut self, include: bool) -> Self {
        self.include_orphan_channels = include;
        self
    }

    /// Returns the allowed interfaces.
    #[must_use]
    pub fn interfaces(&self) -> &BTreeSet<Interface> {
        &self.interfaces
    }

    /// Returns the allowed variants, `None` meaning all.
    #[must_use]
    pub fn channel_kinds(&self) -> Option<&BTreeSet<ChannelKind>> {
        self.channel_kinds.as_ref()
    }

    /// Returns whether orphan channels are included.
    #[must_use]
    pub fn includes_orphan_channels(&self) -> bool {
        self.include_orphan_channels
    }

    /// Returns whether devices on this interface are indexed.
    #[must_use]
    pub fn allows_interface(&self, interface: Interface) -> bool {
        self.interfaces.contains(&interface)
    }

    /// Returns whether channels of this variant are indexed.
    #[must_use]
    pub fn allows_kind(&self, kind: ChannelKind) -> bool {
        self.channel_kinds
            .as_ref()
            .is_none_or(|kinds| kinds.contains(&kind))
    }
}
