// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for loading, filtering and update routing.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use freeathome_lib::api::{Configuration, DatapointUpdates, parse_update_message};
use freeathome_lib::channel::ChannelKind;
use freeathome_lib::types::Interface;
use freeathome_lib::{
    Api, ApiError, Callback, ChannelError, Error, FreeAtHome, FreeAtHomeConfig, ListenerHandle,
};
use parking_lot::Mutex;
use tokio::sync::mpsc;

// ============================================================================
// In-memory hub
// ============================================================================

#[derive(Debug, Default)]
struct MemoryApi {
    configuration: Mutex<Option<Configuration>>,
    writes: Mutex<Vec<(String, String)>>,
}

impl MemoryApi {
    fn with_configuration(value: serde_json::Value) -> Self {
        let api = Self::default();
        *api.configuration.lock() = Some(serde_json::from_value(value).unwrap());
        api
    }

    fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().clone()
    }
}

impl Api for MemoryApi {
    async fn get_configuration(&self) -> Result<Configuration, ApiError> {
        self.configuration
            .lock()
            .clone()
            .ok_or(ApiError::AuthenticationFailed)
    }

    async fn get_datapoint(
        &self,
        _serial: &str,
        _channel_id: &str,
        _datapoint_id: &str,
    ) -> Result<Vec<String>, ApiError> {
        Ok(Vec::new())
    }

    async fn set_datapoint(
        &self,
        serial: &str,
        channel_id: &str,
        datapoint_id: &str,
        value: &str,
    ) -> Result<(), ApiError> {
        self.writes.lock().push((
            format!("{serial}/{channel_id}/{datapoint_id}"),
            value.to_string(),
        ));
        Ok(())
    }
}

fn installation() -> serde_json::Value {
    serde_json::json!({
        "devices": {
            "ABB700D12345": {
                "displayName": "Living room actuator",
                "interface": "TP",
                "floor": "01",
                "room": "01",
                "channels": {
                    "ch0000": {
                        "displayName": "Ceiling light",
                        "functionID": "7",
                        "inputs": { "idp0000": { "pairingID": 1, "value": "0" } },
                        "outputs": { "odp0000": { "pairingID": 256, "value": "0" } }
                    },
                    "ch0001": {
                        "displayName": "\u{2063}",
                        "functionID": "61",
                        "outputs": { "odp0001": { "pairingID": 289, "value": "40" } }
                    },
                    "ch0002": {
                        "functionID": "ffff"
                    }
                }
            },
            "ABB2E0000001": {
                "displayName": "Radiator",
                "interface": "RF",
                "channels": {
                    "ch0000": {
                        "functionID": "23",
                        "outputs": { "odp0010": { "pairingID": 304, "value": "21.5" } }
                    }
                }
            },
            "600028E1ABCD": {
                "displayName": "Garden pump",
                "floor": "02",
                "channels": {
                    "ch0000": {
                        "functionID": "7",
                        "inputs": { "idp0000": { "pairingID": 1, "value": "" } },
                        "outputs": { "odp0000": { "pairingID": 256, "value": "1" } }
                    }
                }
            },
            "ABB0FFFFFFFF": {
                "interface": "??",
                "floor": "01",
                "channels": { "ch0000": { "functionID": "7" } }
            }
        },
        "floorplan": {
            "floors": {
                "01": { "name": "Ground floor", "rooms": { "01": { "name": "Living room" } } },
                "02": { "name": "Garden", "rooms": {} }
            }
        }
    })
}

async fn loaded(config: FreeAtHomeConfig) -> FreeAtHome<MemoryApi> {
    let hub = FreeAtHome::new(MemoryApi::with_configuration(installation())).with_config(config);
    hub.load().await.unwrap();
    hub
}

fn batch(entries: &[(&str, &str)]) -> DatapointUpdates {
    entries
        .iter()
        .map(|(path, value)| ((*path).to_string(), (*value).to_string()))
        .collect()
}

// ============================================================================
// Loading and filtering
// ============================================================================

mod loading {
    use super::*;

    #[tokio::test]
    async fn devices_are_loaded_unfiltered() {
        let hub = loaded(FreeAtHomeConfig::default()).await;

        assert_eq!(hub.devices().len(), 4);
        let pump = hub.device("600028E1ABCD").unwrap();
        assert!(pump.is_virtual());
        assert_eq!(pump.interface(), Interface::VirtualDevice);
        assert_eq!(
            hub.device("ABB0FFFFFFFF").unwrap().interface(),
            Interface::Undefined
        );
    }

    #[tokio::test]
    async fn unknown_function_ids_are_skipped() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let channels = hub.device("ABB700D12345").unwrap().channels().unwrap();

        assert_eq!(channels.len(), 2);
        assert!(!channels.contains_key("ch0002"));
    }

    #[tokio::test]
    async fn default_policy_drops_orphans_and_unknown_interfaces() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let keys: Vec<_> = hub.channels().into_keys().collect();

        assert_eq!(
            keys,
            vec![
                "600028E1ABCD/ch0000",
                "ABB700D12345/ch0000",
                "ABB700D12345/ch0001"
            ]
        );
    }

    #[tokio::test]
    async fn orphans_can_be_included() {
        let hub = loaded(FreeAtHomeConfig::default().include_orphan_channels(true)).await;

        let radiator = hub.channel("ABB2E0000001", "ch0000").unwrap();
        assert!(radiator.is_orphan());
        assert_eq!(radiator.kind(), ChannelKind::RoomTemperatureController);
        assert_eq!(radiator.current_temperature(), Some(21.5));
        assert_eq!(hub.channels().len(), 4);
    }

    #[tokio::test]
    async fn interface_filter() {
        let hub = loaded(
            FreeAtHomeConfig::default()
                .with_interfaces([Interface::VirtualDevice])
                .include_orphan_channels(true),
        )
        .await;

        let keys: Vec<_> = hub.channels().into_keys().collect();
        assert_eq!(keys, vec!["600028E1ABCD/ch0000"]);
        assert_eq!(
            hub.channel("600028E1ABCD", "ch0000").unwrap().kind(),
            ChannelKind::VirtualSwitchActuator
        );
    }

    #[tokio::test]
    async fn kind_filter() {
        let hub = loaded(
            FreeAtHomeConfig::default().with_channel_kinds([ChannelKind::BlindActuator]),
        )
        .await;

        assert_eq!(hub.channels_by_kind(ChannelKind::BlindActuator).len(), 1);
        assert!(hub.channels_by_kind(ChannelKind::SwitchActuator).is_empty());
    }

    #[tokio::test]
    async fn channel_names_and_locations() {
        let hub = loaded(FreeAtHomeConfig::default()).await;

        let light = hub.channel("ABB700D12345", "ch0000").unwrap();
        assert_eq!(light.name(), "Ceiling light");
        assert_eq!(light.floor_name(), Some("Ground floor"));
        assert_eq!(light.room_name(), Some("Living room"));

        let blind = hub.channel("ABB700D12345", "ch0001").unwrap();
        assert_eq!(blind.name(), "Living room actuator");
        assert_eq!(blind.position(), Some(40));

        let pump = hub.channel("600028E1ABCD", "ch0000").unwrap();
        assert_eq!(pump.floor_name(), Some("Garden"));
        assert_eq!(pump.room_name(), None);
        assert_eq!(pump.state(), Some(true));
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_devices() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        *hub.api().configuration.lock() = None;

        let result = hub.load().await;

        assert!(matches!(
            result,
            Err(Error::Api(ApiError::AuthenticationFailed))
        ));
        assert_eq!(hub.devices().len(), 4);
    }

    #[tokio::test]
    async fn reload_replaces_channels() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let before = hub.channel("ABB700D12345", "ch0000").unwrap();

        hub.load().await.unwrap();

        let after = hub.channel("ABB700D12345", "ch0000").unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn device_channels_are_built_once() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let device = hub.device("ABB700D12345").unwrap();
        let floorplan = hub.floorplan();

        let first = device.load_channels(&floorplan);
        let second = device.load_channels(&floorplan);
        assert!(Arc::ptr_eq(&first["ch0000"], &second["ch0000"]));
        assert!(Arc::ptr_eq(
            &first["ch0000"],
            &hub.channel("ABB700D12345", "ch0000").unwrap()
        ));
    }
}

// ============================================================================
// Unloading
// ============================================================================

mod unloading {
    use super::*;

    #[tokio::test]
    async fn unload_device_drops_its_channels() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        assert_eq!(hub.channels().len(), 3);

        assert!(hub.unload_device("ABB700D12345").is_some());
        assert!(hub.unload_device("ABB700D12345").is_none());

        assert!(hub.device("ABB700D12345").is_none());
        assert_eq!(hub.channels().len(), 1);
    }

    #[tokio::test]
    async fn unload_channel_keeps_siblings() {
        let hub = loaded(FreeAtHomeConfig::default()).await;

        let removed = hub.unload_channel("ABB700D12345", "ch0001").unwrap();
        assert_eq!(removed.id(), "ch0001");

        assert!(hub.channel("ABB700D12345", "ch0001").is_none());
        assert!(hub.channel("ABB700D12345", "ch0000").is_some());
        assert!(hub.unload_channel("ABB700D12345", "ch0001").is_none());
        assert!(hub.unload_channel("ABB000000000", "ch0000").is_none());
    }

    #[tokio::test]
    async fn clear_devices_empties_the_index() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        hub.clear_devices();

        assert!(hub.devices().is_empty());
        assert!(hub.channels().is_empty());
    }
}

// ============================================================================
// Updates
// ============================================================================

mod updates {
    use super::*;

    fn counting_callback(counter: &Arc<AtomicUsize>) -> Callback {
        let counter = Arc::clone(counter);
        Callback::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test]
    async fn push_message_reaches_callbacks() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let light = hub.channel("ABB700D12345", "ch0000").unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        light
            .register_callback("state", &counting_callback(&calls))
            .unwrap();

        let message = r#"{
            "00000000-0000-0000-0000-000000000000": {
                "datapoints": {
                    "ABB700D12345/ch0000/odp0000": "1",
                    "ABB700D12345/ch0001/odp0001": "75"
                }
            }
        }"#;
        let updates = parse_update_message(message).unwrap();

        assert_eq!(hub.update_devices(&updates), 2);
        assert_eq!(light.state(), Some(true));
        assert_eq!(light.outputs()["odp0000"].value, "1");
        assert_eq!(
            hub.channel("ABB700D12345", "ch0001").unwrap().position(),
            Some(75)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Same value again: no change, no callback.
        hub.update_devices(&updates);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_addresses_are_ignored() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let light = hub.channel("ABB700D12345", "ch0000").unwrap();

        let updates = batch(&[
            ("ABB000000000/ch0000/odp0000", "1"),
            ("ABB700D12345/ch0009/odp0000", "1"),
            ("ABB700D12345/ch0000/odp0099", "1"),
            ("ABB700D12345/ch0000", "1"),
        ]);

        assert_eq!(hub.update_devices(&updates), 0);
        assert_eq!(light.state(), Some(false));
        assert_eq!(light.outputs()["odp0000"].value, "0");
    }

    #[tokio::test]
    async fn filtered_channels_still_receive_updates() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        assert!(hub.channel("ABB2E0000001", "ch0000").is_none());

        hub.update_devices(&batch(&[("ABB2E0000001/ch0000/odp0010", "19")]));

        let radiator = hub
            .device("ABB2E0000001")
            .unwrap()
            .channel("ch0000")
            .unwrap();
        assert_eq!(radiator.current_temperature(), Some(19.0));
    }

    #[tokio::test]
    async fn virtual_requests_are_tracked_on_inputs() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let pump = hub.channel("600028E1ABCD", "ch0000").unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        pump.register_callback("requested_state", &counting_callback(&calls))
            .unwrap();

        hub.update_devices(&batch(&[("600028E1ABCD/ch0000/idp0000", "1")]));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(pump.state(), Some(true));
    }

    #[tokio::test]
    async fn unknown_callback_attribute_lists_valid_ones() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let light = hub.channel("ABB700D12345", "ch0000").unwrap();

        let result = light.register_callback("brightness", &Callback::new(|| {}));

        match result {
            Err(Error::Channel(ChannelError::UnknownCallbackAttribute { valid, .. })) => {
                assert_eq!(valid, vec!["forced", "state"]);
            }
            other => panic!("expected unknown attribute, got {other:?}"),
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

mod commands {
    use super::*;

    #[tokio::test]
    async fn physical_switch_writes_its_input() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let light = hub.channel("ABB700D12345", "ch0000").unwrap();

        light.turn_on().await.unwrap();

        assert_eq!(
            hub.api().writes(),
            vec![("ABB700D12345/ch0000/idp0000".to_string(), "1".to_string())]
        );
        assert_eq!(light.state(), Some(true));
    }

    #[tokio::test]
    async fn virtual_switch_writes_its_output() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let pump = hub.channel("600028E1ABCD", "ch0000").unwrap();

        pump.turn_off().await.unwrap();

        assert_eq!(
            hub.api().writes(),
            vec![("600028E1ABCD/ch0000/odp0000".to_string(), "0".to_string())]
        );
        assert_eq!(pump.state(), Some(false));
    }
}

// ============================================================================
// Listener
// ============================================================================

mod listener {
    use super::*;

    #[tokio::test]
    async fn routes_batches_until_sender_closes() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let (sender, mut receiver) = mpsc::channel(4);
        let handle = ListenerHandle::new();

        sender
            .send(batch(&[("ABB700D12345/ch0000/odp0000", "1")]))
            .await
            .unwrap();
        sender
            .send(batch(&[("ABB700D12345/ch0001/odp0001", "10")]))
            .await
            .unwrap();
        drop(sender);

        let batches = hub.listen(&mut receiver, &handle).await;

        assert_eq!(batches, 2);
        let light = hub.channel("ABB700D12345", "ch0000").unwrap();
        assert_eq!(light.state(), Some(true));
    }

    #[tokio::test]
    async fn stop_wakes_a_waiting_listener() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let (_sender, mut receiver) = mpsc::channel::<DatapointUpdates>(4);
        let handle = ListenerHandle::new();
        let remote = handle.clone();

        let (batches, ()) = tokio::join!(hub.listen(&mut receiver, &handle), async move {
            tokio::task::yield_now().await;
            remote.stop();
            remote.stop();
        });

        assert_eq!(batches, 0);
        assert!(handle.is_stopped());
    }

    #[tokio::test]
    async fn stopped_handle_skips_pending_batches() {
        let hub = loaded(FreeAtHomeConfig::default()).await;
        let (sender, mut receiver) = mpsc::channel(4);
        let handle = ListenerHandle::new();

        sender
            .send(batch(&[("ABB700D12345/ch0000/odp0000", "1")]))
            .await
            .unwrap();
        handle.stop();

        assert_eq!(hub.listen(&mut receiver, &handle).await, 0);
        assert_eq!(
            hub.channel("ABB700D12345", "ch0000").unwrap().state(),
            Some(false)
        );
    }
}
