// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor and room name lookup.

use std::collections::BTreeMap;

use crate::api::FloorplanConfiguration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Floor {
    name: String,
    rooms: BTreeMap<String, String>,
}

/// Read-only mapping from floor and room ids to their names.
///
/// Lookups never fail: unknown or absent ids yield `None`/`false`.
///
/// # Examples
///
/// ```
/// use freeathome_lib::Floorplan;
///
/// let floorplan = Floorplan::new()
///     .with_floor("01", "Ground floor")
///     .with_room("01", "02", "Kitchen");
///
/// assert_eq!(floorplan.get_floor_name(Some("01")), Some("Ground floor"));
/// assert_eq!(floorplan.get_room_name(Some("01"), Some("02")), Some("Kitchen"));
/// assert_eq!(floorplan.get_room_name(Some("02"), Some("02")), None);
/// assert!(!floorplan.has_floor(None));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Floorplan {
    floors: BTreeMap<String, Floor>,
}

impl Floorplan {
    /// Creates an empty floorplan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a floorplan from the snapshot section.
    #[must_use]
    pub fn from_configuration(configuration: &FloorplanConfiguration) -> Self {
        let floors = configuration
            .floors
            .iter()
            .map(|(id, floor)| {
                let rooms = floor
                    .rooms
                    .iter()
                    .map(|(room_id, room)| (room_id.clone(), room.name.clone()))
                    .collect();
                (
                    id.clone(),
                    Floor {
                        name: floor.name.clone(),
                        rooms,
                    },
                )
            })
            .collect();
        Self { floors }
    }

    /// Adds a floor.
    #[must_use]
    pub fn with_floor(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.floors.entry(id.into()).or_default().name = name.into();
        self
    }

    /// Adds a room to a floor, creating the floor if needed.
    #[must_use]
    pub fn with_room(
        mut self,
        floor_id: impl Into<String>,
        room_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.floors
            .entry(floor_id.into())
            .or_default()
            .rooms
            .insert(room_id.into(), name.into());
        self
    }

    /// Returns the name of a floor.
    #[must_use]
    pub fn get_floor_name(&self, floor_id: Option<&str>) -> Option<&str> {
        self.floors.get(floor_id?).map(|floor| floor.name.as_str())
    }

    /// Returns the name of a room on a floor.
    #[must_use]
    pub fn get_room_name(&self, floor_id: Option<&str>, room_id: Option<&str>) -> Option<&str> {
        self.floors
            .get(floor_id?)?
            .rooms
            .get(room_id?)
            .map(String::as_str)
    }

    /// Returns whether a floor with this id exists.
    #[must_use]
    pub fn has_floor(&self, floor_id: Option<&str>) -> bool {
        self.get_floor_name(floor_id).is_some()
    }

    /// Returns whether a room with this id exists on the floor.
    #[must_use]
    pub fn has_room(&self, floor_id: Option<&str>, room_id: Option<&str>) -> bool {
        self.get_room_name(floor_id, room_id).is_some()
    }

    /// Returns the number of floors.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }
}
