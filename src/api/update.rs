// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Push update payloads.
//!
//! The hub pushes batches of `path -> raw value` pairs, where a path has the
//! form `"deviceSerial/channelId/datapointId"`.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::error::ApiError;

/// One batch of pushed datapoint values keyed by path.
pub type DatapointUpdates = BTreeMap<String, String>;

/// A datapoint address split into its parts.
///
/// # Examples
///
/// ```
/// use freeathome_lib::api::DatapointPath;
///
/// let path = DatapointPath::parse("ABB700D12345/ch0000/odp0000").unwrap();
/// assert_eq!(path.serial, "ABB700D12345");
/// assert_eq!(path.channel, "ch0000");
/// assert_eq!(path.datapoint, "odp0000");
///
/// assert!(DatapointPath::parse("ABB700D12345/ch0000").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatapointPath<'a> {
    /// Device serial.
    pub serial: &'a str,
    /// Channel id.
    pub channel: &'a str,
    /// Datapoint id.
    pub datapoint: &'a str,
}

impl<'a> DatapointPath<'a> {
    /// Splits a `serial/channel/datapoint` path.
    ///
    /// Returns `None` unless the path has exactly three non-empty segments.
    #[must_use]
    pub fn parse(path: &'a str) -> Option<Self> {
        let mut segments = path.split('/');
        let serial = segments.next().filter(|s| !s.is_empty())?;
        let channel = segments.next().filter(|s| !s.is_empty())?;
        let datapoint = segments.next().filter(|s| !s.is_empty())?;
        if segments.next().is_some() {
            return None;
        }
        Some(Self {
            serial,
            channel,
            datapoint,
        })
    }
}

/// Returns the trailing datapoint id of a path.
#[must_use]
pub fn datapoint_id(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[derive(Debug, Deserialize)]
struct UpdateEnvelope {
    #[serde(default)]
    datapoints: BTreeMap<String, String>,
}

/// Extracts datapoint updates from a push message.
///
/// A push message carries one entry per SysAP, each with a `datapoints`
/// object. Entries of all SysAPs are merged into one batch; other sections of
/// the message (device additions, removals) are ignored.
///
/// # Errors
///
/// Returns [`ApiError::Json`] if the message is not a valid envelope.
///
/// # Examples
///
/// ```
/// use freeathome_lib::api::parse_update_message;
///
/// let message = r#"{
///     "00000000-0000-0000-0000-000000000000": {
///         "datapoints": { "ABB700D12345/ch0000/odp0000": "1" },
///         "devices": {},
///         "devicesAdded": [],
///         "devicesRemoved": []
///     }
/// }"#;
///
/// let updates = parse_update_message(message).unwrap();
/// assert_eq!(updates["ABB700D12345/ch0000/odp0000"], "1");
/// ```
pub fn parse_update_message(message: &str) -> Result<DatapointUpdates, ApiError> {
    let envelopes: HashMap<String, UpdateEnvelope> = serde_json::from_str(message)?;
    Ok(envelopes
        .into_values()
        .flat_map(|envelope| envelope.datapoints)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_extra_segments() {
        assert!(DatapointPath::parse("a/b/c/d").is_none());
        assert!(DatapointPath::parse("a//c").is_none());
        assert!(DatapointPath::parse("").is_none());
    }

    #[test]
    fn datapoint_id_takes_last_segment() {
        assert_eq!(datapoint_id("ABB700D12345/ch0000/odp0003"), "odp0003");
        assert_eq!(datapoint_id("odp0003"), "odp0003");
    }

    #[test]
    fn message_without_datapoints_is_empty() {
        let updates =
            parse_update_message(r#"{"00000000-0000-0000-0000-000000000000": {"devices": {}}}"#)
                .unwrap();
        assert!(updates.is_empty());
    }

    #[test]
    fn invalid_message_is_an_error() {
        assert!(matches!(
            parse_update_message("not json"),
            Err(ApiError::Json(_))
        ));
    }
}
