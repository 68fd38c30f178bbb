// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device interface classification.

use std::fmt;

/// How a device is attached to the hub.
///
/// # Examples
///
/// ```
/// use freeathome_lib::types::Interface;
///
/// assert_eq!(Interface::from_raw(Some("TP")), Interface::WiredBus);
/// assert_eq!(Interface::from_raw(Some("tp")), Interface::Undefined);
/// assert_eq!(Interface::from_raw(None), Interface::Undefined);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interface {
    /// Unknown or missing interface string.
    Undefined,
    /// Wired bus (twisted pair).
    WiredBus,
    /// Wireless RF.
    WirelessRf,
    /// Philips Hue bridge integration.
    Hue,
    /// Software-only device registered through the local API.
    VirtualDevice,
}

impl Interface {
    /// Every interface except [`Interface::Undefined`].
    pub const KNOWN: [Self; 4] = [
        Self::WiredBus,
        Self::WirelessRf,
        Self::Hue,
        Self::VirtualDevice,
    ];

    /// Classifies a raw interface string by exact match.
    ///
    /// Anything unrecognized, including a missing value, is
    /// [`Interface::Undefined`].
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("TP") => Self::WiredBus,
            Some("RF") => Self::WirelessRf,
            Some("hue") => Self::Hue,
            Some("vdev") => Self::VirtualDevice,
            _ => Self::Undefined,
        }
    }

    /// Returns the raw string the hub uses for this interface.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "",
            Self::WiredBus => "TP",
            Self::WirelessRf => "RF",
            Self::Hue => "hue",
            Self::VirtualDevice => "vdev",
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            other => f.write_str(other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_is_exact() {
        assert_eq!(Interface::from_raw(Some("RF")), Interface::WirelessRf);
        assert_eq!(Interface::from_raw(Some("hue")), Interface::Hue);
        assert_eq!(Interface::from_raw(Some("vdev")), Interface::VirtualDevice);
        assert_eq!(Interface::from_raw(Some("TP ")), Interface::Undefined);
        assert_eq!(Interface::from_raw(Some("")), Interface::Undefined);
    }

    #[test]
    fn known_excludes_undefined() {
        assert!(!Interface::KNOWN.contains(&Interface::Undefined));
    }

    #[test]
    fn display() {
        assert_eq!(Interface::WiredBus.to_string(), "TP");
        assert_eq!(Interface::Undefined.to_string(), "undefined");
    }
}
