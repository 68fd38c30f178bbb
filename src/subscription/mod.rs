// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for channel attribute changes.
//!
//! Listeners register a [`Callback`] under an attribute name on a channel.
//! Whenever a push update decodes into that attribute the callback is invoked
//! with no arguments; the listener then reads the current value back from the
//! channel.
//!
//! # Usage
//!
//! ```no_run
//! use freeathome_lib::subscription::Callback;
//! # fn example<A: freeathome_lib::Api>(channel: &freeathome_lib::Channel<A>) -> freeathome_lib::Result<()> {
//! let on_state = Callback::new(|| println!("state changed"));
//! channel.register_callback("state", &on_state)?;
//!
//! // Later, unsubscribe
//! channel.remove_callback("state", &on_state);
//! # Ok(())
//! # }
//! ```

mod callback;

pub use callback::{Callback, CallbackRegistry};
