// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel state management types.
//!
//! [`ChannelState`] holds the decoded attributes of a channel, while
//! [`StateChange`] represents a single decoded value that can be applied.
//!
//! # Examples
//!
//! ```
//! use freeathome_lib::state::{ChannelState, StateChange};
//! use freeathome_lib::types::Attribute;
//!
//! let mut state = ChannelState::new();
//! state.apply(&StateChange::float(Attribute::CurrentTemperature, 21.5));
//!
//! assert_eq!(state.float(Attribute::CurrentTemperature), Some(21.5));
//! ```

mod channel_state;
mod state_change;

pub use channel_state::ChannelState;
pub use state_change::StateChange;
