// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `freeathome_lib` library.
//!
//! Errors are split by the layer that raises them: [`ChannelError`] for
//! structural problems detected by the channel engine, and [`ApiError`] for
//! anything the transport collaborator reports. Decode problems are never
//! errors; channels fall back to a default value instead.

use std::fmt;

use thiserror::Error;

use crate::channel::{Action, ChannelKind};
use crate::types::{Pairing, Parameter};

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A channel lookup, registration or action failed.
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    /// The api collaborator failed.
    #[error("api error: {0}")]
    Api(#[from] ApiError),
}

/// What a [`ChannelError::NotFound`] was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// No input datapoint carries this pairing id.
    Input(Pairing),
    /// No output datapoint carries this pairing id.
    Output(Pairing),
    /// No parameter with this id.
    Parameter(Parameter),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(pairing) => write!(f, "input pairing {pairing}"),
            Self::Output(pairing) => write!(f, "output pairing {pairing}"),
            Self::Parameter(parameter) => write!(f, "parameter {parameter}"),
        }
    }
}

/// Errors raised by the channel engine.
///
/// These indicate a mismatch between a configured channel and the variant it
/// was classified as, or a caller mistake. They are never transient.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// A pairing or parameter is absent on the channel.
    #[error("{missing} not found on device {device} channel {channel}")]
    NotFound {
        /// Serial of the owning device.
        device: String,
        /// Channel id within the device.
        channel: String,
        /// The identifier that was looked up.
        missing: Missing,
    },

    /// A callback was registered for an attribute the variant does not expose.
    #[error("{kind} has no callback attribute {attribute:?}, expected one of: {}", .valid.join(", "))]
    UnknownCallbackAttribute {
        /// The channel variant.
        kind: ChannelKind,
        /// The rejected attribute name.
        attribute: String,
        /// Attribute names the variant accepts.
        valid: Vec<&'static str>,
    },

    /// A write was given a value outside every numeric domain.
    #[error("{action} on {kind} needs a number")]
    InvalidValue {
        /// The channel variant.
        kind: ChannelKind,
        /// The requested action.
        action: Action,
    },

    /// The channel variant has no such write action.
    #[error("{kind} does not support {action}")]
    UnsupportedAction {
        /// The channel variant.
        kind: ChannelKind,
        /// The requested action.
        action: Action,
    },
}

/// Errors reported by the api collaborator.
///
/// This layer neither retries nor suppresses them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The hub rejected the credentials.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The hub answered with an unexpected HTTP status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The response did not contain the configured SysAP.
    #[error("response does not contain sysap {0}")]
    MissingSysap(String),

    /// The hub did not acknowledge a datapoint write.
    #[error("write to {datapoint} rejected: {response}")]
    Rejected {
        /// The `serial.channel.datapoint` address.
        datapoint: String,
        /// What the hub answered instead of `OK`.
        response: String,
    },

    /// A payload could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
