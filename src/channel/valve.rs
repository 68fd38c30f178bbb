// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Valve position behavior shared by heating and cooling actuators.

use crate::types::{Attribute, Pairing};

use super::table::{Action, Decoder, Payload, Write};

/// Reusable position decode/encode strategy for a valve.
///
/// A variant composing it gains a position decoder on `info`, a refresh of
/// `info`, and a [`Action::SetPosition`] write on `set` clamped to 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValvePosition {
    /// Output pairing reporting the current valve position.
    pub info: Pairing,
    /// Input pairing accepting a requested valve position.
    pub set: Pairing,
    /// Attribute holding the position.
    pub attribute: Attribute,
}

impl ValvePosition {
    /// Heating valve.
    pub const HEATING: Self = Self {
        info: Pairing::InfoValueHeating,
        set: Pairing::ActuatingValueHeating,
        attribute: Attribute::Position,
    };

    /// Cooling valve.
    pub const COOLING: Self = Self {
        info: Pairing::InfoValueCooling,
        set: Pairing::ActuatingValueCooling,
        attribute: Attribute::Position,
    };

    /// Returns the decoder for the position output.
    #[must_use]
    pub const fn decoder(&self) -> Decoder {
        Decoder::int(self.info, self.attribute)
    }

    /// Returns the position write.
    #[must_use]
    pub const fn write(&self) -> Write {
        Write::input(Action::SetPosition, self.set, Payload::Int { min: 0, max: 100 })
            .sets(self.attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::table::Direction;

    #[test]
    fn heating_valve_wiring() {
        let valve = ValvePosition::HEATING;
        assert_eq!(valve.decoder().pairing, Pairing::InfoValueHeating);

        let write = valve.write();
        assert_eq!(write.direction, Direction::Input);
        assert_eq!(write.pairing, Pairing::ActuatingValueHeating);
        assert_eq!(write.attribute, Some(Attribute::Position));
    }
}
