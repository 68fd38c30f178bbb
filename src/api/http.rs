// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of [`Api`] against the hub's local REST interface.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::api::{Api, Configuration};
use crate::error::ApiError;

/// Path of the REST interface below the hub's base URL.
const REST_PATH: &str = "/fhapi/v1/api/rest";

/// Acknowledgement the hub sends for an accepted write.
const WRITE_OK: &str = "OK";

// ============================================================================
// HttpApiConfig
// ============================================================================

/// Connection parameters for a hub reachable over HTTP.
///
/// # Examples
///
/// ```
/// use freeathome_lib::api::HttpApiConfig;
/// use std::time::Duration;
///
/// let config = HttpApiConfig::new("192.168.1.10")
///     .with_credentials("installer", "secret")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://192.168.1.10");
///
/// let config = HttpApiConfig::new("sysap.local").with_https();
/// assert_eq!(config.base_url(), "https://sysap.local");
/// ```
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    host: String,
    port: u16,
    use_https: bool,
    credentials: Option<(String, String)>,
    sysap_id: Uuid,
    timeout: Duration,
}

impl HttpApiConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Id under which a hub serves its own data.
    pub const DEFAULT_SYSAP_ID: Uuid = Uuid::nil();

    /// Creates a configuration for the given host.
    ///
    /// The host may carry an explicit `http://` or `https://` scheme, in which
    /// case it is used as the base URL verbatim.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            credentials: None,
            sysap_id: Self::DEFAULT_SYSAP_ID,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If the port hasn't been set explicitly, it changes to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets basic authentication credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the SysAP id used in request paths and response envelopes.
    #[must_use]
    pub fn with_sysap_id(mut self, sysap_id: Uuid) -> Self {
        self.sysap_id = sysap_id;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the credentials if set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Returns the SysAP id.
    #[must_use]
    pub fn sysap_id(&self) -> Uuid {
        self.sysap_id
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            return self.host.trim_end_matches('/').to_string();
        }
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an [`HttpApi`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidAddress`] for an empty host, or
    /// [`ApiError::Http`] if the HTTP client cannot be created.
    pub fn into_api(self) -> Result<HttpApi, ApiError> {
        if self.host.trim().is_empty() {
            return Err(ApiError::InvalidAddress("host is required".to_string()));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ApiError::Http)?;

        Ok(HttpApi {
            rest_url: format!("{}{REST_PATH}", self.base_url()),
            sysap: self.sysap_id.to_string(),
            client,
            credentials: self.credentials,
        })
    }
}

// ============================================================================
// HttpApi
// ============================================================================

/// [`Api`] implementation talking to the hub's REST interface.
///
/// # Examples
///
/// ```no_run
/// use freeathome_lib::api::{Api, HttpApiConfig};
///
/// # async fn example() -> Result<(), freeathome_lib::ApiError> {
/// let api = HttpApiConfig::new("192.168.1.10")
///     .with_credentials("installer", "secret")
///     .into_api()?;
///
/// let configuration = api.get_configuration().await?;
/// println!("{} devices", configuration.devices.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpApi {
    rest_url: String,
    sysap: String,
    client: Client,
    credentials: Option<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct DatapointValues {
    #[serde(default)]
    values: Vec<String>,
}

impl HttpApi {
    /// Returns the SysAP id this api addresses.
    #[must_use]
    pub fn sysap_id(&self) -> &str {
        &self.sysap
    }

    /// Returns the `serial.channel.datapoint` address of a datapoint.
    fn datapoint_address(serial: &str, channel_id: &str, datapoint_id: &str) -> String {
        format!(
            "{}.{}.{}",
            urlencoding::encode(serial),
            urlencoding::encode(channel_id),
            urlencoding::encode(datapoint_id)
        )
    }

    fn datapoint_url(&self, address: &str) -> String {
        format!("{}/datapoint/{}/{address}", self.rest_url, self.sysap)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.client.request(method, url);
        match &self.credentials {
            Some((username, password)) => request.basic_auth(username, Some(password)),
            None => request,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthenticationFailed);
        }

        let body = response.text().await.map_err(ApiError::Http)?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::trace!(body = %body, "Received HTTP response");
        Ok(serde_json::from_str(&body)?)
    }

    fn take_sysap<T>(&self, mut envelope: HashMap<String, T>) -> Result<T, ApiError> {
        envelope
            .remove(&self.sysap)
            .ok_or_else(|| ApiError::MissingSysap(self.sysap.clone()))
    }
}

impl Api for HttpApi {
    async fn get_configuration(&self) -> Result<Configuration, ApiError> {
        let url = format!("{}/configuration", self.rest_url);
        tracing::debug!(url = %url, "Fetching configuration");

        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(ApiError::Http)?;
        let envelope: HashMap<String, Configuration> = Self::read_json(response).await?;
        self.take_sysap(envelope)
    }

    async fn get_datapoint(
        &self,
        serial: &str,
        channel_id: &str,
        datapoint_id: &str,
    ) -> Result<Vec<String>, ApiError> {
        let address = Self::datapoint_address(serial, channel_id, datapoint_id);
        let url = self.datapoint_url(&address);
        tracing::debug!(datapoint = %address, "Reading datapoint");

        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(ApiError::Http)?;
        let envelope: HashMap<String, DatapointValues> = Self::read_json(response).await?;
        Ok(self.take_sysap(envelope)?.values)
    }

    async fn set_datapoint(
        &self,
        serial: &str,
        channel_id: &str,
        datapoint_id: &str,
        value: &str,
    ) -> Result<(), ApiError> {
        let address = Self::datapoint_address(serial, channel_id, datapoint_id);
        let url = self.datapoint_url(&address);
        tracing::debug!(datapoint = %address, value = %value, "Writing datapoint");

        let response = self
            .request(Method::PUT, &url)
            .body(value.to_string())
            .send()
            .await
            .map_err(ApiError::Http)?;
        let envelope: HashMap<String, HashMap<String, String>> =
            Self::read_json(response).await?;
        let mut acknowledgements = self.take_sysap(envelope)?;

        // The hub echoes the address in its own casing.
        let key = acknowledgements
            .keys()
            .find(|key| key.eq_ignore_ascii_case(&address))
            .cloned();
        let answer = key
            .and_then(|key| acknowledgements.remove(&key))
            .unwrap_or_default();

        if answer == WRITE_OK {
            Ok(())
        } else {
            Err(ApiError::Rejected {
                datapoint: address,
                response: answer,
            })
        }
    }
}
