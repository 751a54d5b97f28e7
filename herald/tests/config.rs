#![cfg(feature = "macros")]

mod common;

use common::{AuditLog, SimpleEvent, StoppableSimpleEvent};
use herald::{
    Container, Dispatcher, EventType, ListenerBinding, Registry, RegistryConfig, ServiceMap,
    testing::{CallLog, RecordingListener},
};
use std::sync::Arc;

fn services(log: &CallLog) -> Arc<dyn Container> {
    Arc::new(
        ServiceMap::new()
            .with_service("audit", AuditLog::new(log))
            .with_service("recorder", RecordingListener::typed::<SimpleEvent>("recorder", log)),
    )
}

#[test]
fn registry_from_json_config() {
    let log = CallLog::new();
    let config: RegistryConfig = serde_json::from_str(
        r#"{
            "default_priority": 50,
            "listeners": [
                { "listener": "recorder" },
                { "listener": ["audit", "on_simple"], "priority": 500 },
                { "listener": ["audit", "on_stoppable"] }
            ]
        }"#,
    )
    .unwrap();

    let registry = Registry::from_config(config, Some(services(&log))).unwrap();
    assert_eq!(registry.len(), 3);

    let dispatcher = Dispatcher::new(registry);
    let event = dispatcher.dispatch(SimpleEvent::default()).unwrap();
    assert_eq!(event.hits, 1);
    assert_eq!(log.entries(), ["audit:simple", "recorder"]);

    log.clear();
    let event = dispatcher.dispatch(StoppableSimpleEvent::default()).unwrap();
    assert!(event.stopped);
    assert_eq!(log.entries(), ["audit:stoppable"]);
}

#[test]
fn declared_event_key_adds_a_registration() {
    let log = CallLog::new();
    let config = RegistryConfig::default().with_listener(
        ListenerBinding::new(("audit", "on_simple")).event(StoppableSimpleEvent::KEY.as_str()),
    );

    let registry = Registry::from_config(config, Some(services(&log))).unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry
            .listeners_for(&StoppableSimpleEvent::default())
            .count(),
        2
    );
}

#[test]
fn inference_can_be_disabled_from_config() {
    let log = CallLog::new();
    let config: RegistryConfig = serde_json::from_str(
        r#"{
            "infer_event_type": false,
            "listeners": [ { "listener": "recorder", "event": "test::OtherEvent" } ]
        }"#,
    )
    .unwrap();

    let registry = Registry::from_config(config, Some(services(&log))).unwrap();
    let keys: Vec<_> = registry.keys().map(|key| key.as_str()).collect();
    assert_eq!(keys, ["test::OtherEvent"]);
}

#[test]
fn invalid_declaration_fails_registration() {
    let log = CallLog::new();
    let config: RegistryConfig = serde_json::from_str(
        r#"{ "listeners": [ { "listener": { "class": "Audit" } } ] }"#,
    )
    .unwrap();

    let err = Registry::from_config(config, Some(services(&log))).unwrap_err();
    assert!(err.is_incorrect_listener());
}

#[test]
fn declarations_need_a_container() {
    let config: RegistryConfig =
        serde_json::from_str(r#"{ "listeners": [ { "listener": "recorder" } ] }"#).unwrap();

    let err = Registry::from_config(config, None).unwrap_err();
    assert!(err.is_invalid_configuration());
}
