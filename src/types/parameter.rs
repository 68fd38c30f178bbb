// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel parameter ids.
//!
//! Parameters are per-channel configuration values, not live state. The hub
//! keys them as `"par"` followed by four hex digits, e.g. `"par0015"`.

use std::fmt;

/// Literal prefix of every parameter key.
const KEY_PREFIX: &str = "par";

/// A channel parameter id.
///
/// # Examples
///
/// ```
/// use freeathome_lib::types::Parameter;
///
/// assert_eq!(Parameter::AutonomousSwitchOffTime.key(), "par0015");
/// assert_eq!(Parameter::parse_key("par0015"), Some(0x0015));
/// assert_eq!(Parameter::parse_key("par15"), Some(0x0015));
/// assert_eq!(Parameter::parse_key("0015"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Parameter {
    /// Delay before an actuator switches off on its own, in seconds.
    AutonomousSwitchOffTime = 0x0015,
    /// Minimum brightness of a dimmer, in percent.
    MinimumBrightness = 0x001E,
    /// Maximum brightness of a dimmer, in percent.
    MaximumBrightness = 0x001F,
    /// Time a movement detector keeps reporting movement, in seconds.
    DetectionTime = 0x0020,
    /// Brightness threshold of a movement detector, in lux.
    BrightnessThreshold = 0x0021,
    /// Travel time of a cover from fully open to fully closed, in seconds.
    TravelTime = 0x0030,
}

impl Parameter {
    /// Returns the numeric parameter id.
    #[must_use]
    pub const fn id(self) -> u16 {
        self as u16
    }

    /// Returns the canonical key of this parameter, e.g. `"par0015"`.
    #[must_use]
    pub fn key(self) -> String {
        format!("{KEY_PREFIX}{:04x}", self.id())
    }

    /// Parses the numeric id out of a parameter key.
    ///
    /// Returns `None` for keys without the `par` prefix or with a suffix that
    /// is not hexadecimal.
    #[must_use]
    pub fn parse_key(key: &str) -> Option<u16> {
        let digits = key.strip_prefix(KEY_PREFIX)?;
        u16::from_str_radix(digits, 16).ok()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?} ({})", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_zero_padded_lowercase_hex() {
        assert_eq!(Parameter::MinimumBrightness.key(), "par001e");
        assert_eq!(Parameter::TravelTime.key(), "par0030");
    }

    #[test]
    fn parse_key_accepts_either_case() {
        assert_eq!(Parameter::parse_key("par001E"), Some(0x001E));
        assert_eq!(Parameter::parse_key("par001e"), Some(0x001E));
    }

    #[test]
    fn parse_key_rejects_garbage() {
        assert_eq!(Parameter::parse_key("par"), None);
        assert_eq!(Parameter::parse_key("parXYZ"), None);
        assert_eq!(Parameter::parse_key("idp0000"), None);
    }

    #[test]
    fn display_includes_key() {
        assert_eq!(
            Parameter::DetectionTime.to_string(),
            "DetectionTime (par0020)"
        );
    }
}
