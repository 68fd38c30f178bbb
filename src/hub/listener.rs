// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stop handle for the update listener.

use std::sync::Arc;

use tokio::sync::watch;

/// Stops a running [`FreeAtHome::listen`](super::FreeAtHome::listen) loop.
///
/// Clones share the same flag. Stopping is idempotent and wakes a listener
/// that is suspended waiting for the next batch.
///
/// # Examples
///
/// ```
/// use freeathome_lib::ListenerHandle;
///
/// let handle = ListenerHandle::new();
/// let remote = handle.clone();
///
/// remote.stop();
/// remote.stop();
/// assert!(handle.is_stopped());
/// ```
#[derive(Debug, Clone)]
pub struct ListenerHandle {
    stop: Arc<watch::Sender<bool>>,
}

impl ListenerHandle {
    /// Creates a handle in the running state.
    #[must_use]
    pub fn new() -> Self {
        let (stop, _) = watch::channel(false);
        Self {
            stop: Arc::new(stop),
        }
    }

    /// Requests the listener to stop.
    pub fn stop(&self) {
        if !self.stop.send_replace(true) {
            tracing::debug!("Update listener stop requested");
        }
    }

    /// Returns whether a stop was requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        *self.stop.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.stop.subscribe()
    }
}

impl Default for ListenerHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stop_wakes_subscribers() {
        let handle = ListenerHandle::new();
        let mut receiver = handle.subscribe();

        let stopper = handle.clone();
        tokio::spawn(async move { stopper.stop() });

        receiver.changed().await.unwrap();
        assert!(*receiver.borrow());
    }

    #[test]
    fn new_handle_is_running() {
        assert!(!ListenerHandle::default().is_stopped());
    }
}
