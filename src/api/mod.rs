// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport collaborator of the object model.
//!
//! The [`Api`] trait is the only boundary through which channels and the
//! orchestrator talk to the hub. [`HttpApi`] implements it against the hub's
//! local REST interface (feature `http`, enabled by default); tests and other
//! transports provide their own implementations.
//!
//! Push updates are not part of the trait: whatever receives them (a
//! WebSocket task, a test) feeds [`DatapointUpdates`] batches to
//! [`FreeAtHome::listen`](crate::FreeAtHome::listen) or
//! [`FreeAtHome::update_devices`](crate::FreeAtHome::update_devices).

mod configuration;
#[cfg(feature = "http")]
mod http;
mod update;

pub use configuration::{
    ChannelConfiguration, Configuration, Datapoint, DeviceConfiguration, FloorConfiguration,
    FloorplanConfiguration, RoomConfiguration,
};
#[cfg(feature = "http")]
pub use http::{HttpApi, HttpApiConfig};
pub use update::{DatapointPath, DatapointUpdates, datapoint_id, parse_update_message};

use crate::error::ApiError;

/// Trait for transports that can read the hub's configuration and datapoints.
///
/// Errors are returned to the caller unchanged; this layer never retries.
#[allow(async_fn_in_trait)]
pub trait Api {
    /// Fetches the full configuration snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the transport fails.
    async fn get_configuration(&self) -> Result<Configuration, ApiError>;

    /// Reads the current values of one datapoint.
    ///
    /// The first element is the current value; the list may be empty.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the transport fails.
    async fn get_datapoint(
        &self,
        serial: &str,
        channel_id: &str,
        datapoint_id: &str,
    ) -> Result<Vec<String>, ApiError>;

    /// Writes a raw value to one datapoint.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the transport fails or the hub rejects the write.
    async fn set_datapoint(
        &self,
        serial: &str,
        channel_id: &str,
        datapoint_id: &str,
        value: &str,
    ) -> Result<(), ApiError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording in-memory [`Api`] used by unit tests.

    use std::collections::HashMap;

    use parking_lot::Mutex;

    use super::{Api, Configuration};
    use crate::error::ApiError;

    /// One recorded datapoint write.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Write {
        pub serial: String,
        pub channel: String,
        pub datapoint: String,
        pub value: String,
    }

    #[derive(Debug, Default)]
    pub struct FakeApi {
        pub configuration: Mutex<Configuration>,
        pub values: Mutex<HashMap<String, Vec<String>>>,
        pub writes: Mutex<Vec<Write>>,
        pub reads: Mutex<Vec<String>>,
        pub fail_writes: Mutex<bool>,
    }

    impl FakeApi {
        pub fn with_value(self, path: &str, value: &str) -> Self {
            self.values
                .lock()
                .insert(path.to_string(), vec![value.to_string()]);
            self
        }

        pub fn writes(&self) -> Vec<Write> {
            self.writes.lock().clone()
        }

        pub fn last_value(&self) -> Option<String> {
            self.writes.lock().last().map(|write| write.value.clone())
        }
    }

    impl Api for FakeApi {
        async fn get_configuration(&self) -> Result<Configuration, ApiError> {
            Ok(self.configuration.lock().clone())
        }

        async fn get_datapoint(
            &self,
            serial: &str,
            channel_id: &str,
            datapoint_id: &str,
        ) -> Result<Vec<String>, ApiError> {
            let path = format!("{serial}/{channel_id}/{datapoint_id}");
            self.reads.lock().push(path.clone());
            Ok(self.values.lock().get(&path).cloned().unwrap_or_default())
        }

        async fn set_datapoint(
            &self,
            serial: &str,
            channel_id: &str,
            datapoint_id: &str,
            value: &str,
        ) -> Result<(), ApiError> {
            if *self.fail_writes.lock() {
                return Err(ApiError::AuthenticationFailed);
            }
            self.writes.lock().push(Write {
                serial: serial.to_string(),
                channel: channel_id.to_string(),
                datapoint: datapoint_id.to_string(),
                value: value.to_string(),
            });
            Ok(())
        }
    }
}
