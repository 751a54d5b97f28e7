#![cfg(feature = "macros")]

mod common;

use common::{AuditLog, SimpleEvent, StoppableSimpleEvent};
use herald::{
    Container, Dispatcher, EventType, IncorrectListener, ListenerRef, RegistrationError, Registry,
    Service, ServiceMap,
    testing::{CallLog, CountingContainer, RecordingListener},
};
use std::sync::Arc;

fn incorrect(err: RegistrationError) -> IncorrectListener {
    match err {
        RegistrationError::IncorrectListener(inner) => inner,
        other => panic!("expected IncorrectListener, got {other:?}"),
    }
}

#[test]
fn container_key_without_container_is_invalid_configuration() {
    let mut registry = Registry::new();

    let err = registry.add("audit").unwrap_err();
    assert!(matches!(err, RegistrationError::InvalidConfiguration(_)));

    let err = registry.add(("audit", "on_simple")).unwrap_err();
    assert!(err.is_invalid_configuration());
    assert!(registry.is_empty());
}

#[test]
fn malformed_declaration_without_container_is_invalid_configuration() {
    let mut registry = Registry::new();

    let err = registry.add(ListenerRef::Parts(vec!["audit".into()])).unwrap_err();
    assert!(err.is_invalid_configuration(), "got {err:?}");

    let err = registry
        .add(ListenerRef::Unsupported("integer `123`".into()))
        .unwrap_err();
    assert!(err.is_invalid_configuration(), "got {err:?}");
    assert!(registry.is_empty());
}

#[test]
fn method_pair_is_resolved_through_the_container() {
    let log = CallLog::new();
    let mut registry = Registry::with_container(ServiceMap::new().with_service("audit", AuditLog::new(&log)));
    registry.add(("audit", "on_simple")).unwrap();

    let event = Dispatcher::new(registry)
        .dispatch(SimpleEvent::default())
        .unwrap();
    assert_eq!(event.hits, 1);
    assert_eq!(log.entries(), ["audit:simple"]);
}

#[test]
fn container_is_consulted_once_per_registration() {
    let log = CallLog::new();
    let container = Arc::new(CountingContainer::new(
        ServiceMap::new().with_service("audit", AuditLog::new(&log)),
    ));
    let mut registry = Registry::new().shared_container(container.clone());

    registry.add(("audit", "on_simple")).unwrap();
    registry.add(("audit", "on_stoppable")).unwrap();
    assert_eq!(container.has_calls(), 2);
    assert_eq!(container.get_calls(), 2);

    let dispatcher = Dispatcher::new(registry);
    dispatcher.dispatch(StoppableSimpleEvent::default()).unwrap();
    dispatcher.dispatch(SimpleEvent::default()).unwrap();
    assert_eq!(container.get_calls(), 2);
}

#[test]
fn bound_object_bypasses_the_container() {
    let log = CallLog::new();
    let container = Arc::new(CountingContainer::new(ServiceMap::new()));
    let mut registry = Registry::new().shared_container(container.clone());

    let audit: Arc<dyn Service> = Arc::new(AuditLog::new(&log));
    registry.add((audit, "on_stoppable")).unwrap();

    assert_eq!(container.has_calls(), 0);
    assert_eq!(container.get_calls(), 0);

    let event = Dispatcher::new(registry)
        .dispatch(StoppableSimpleEvent::default())
        .unwrap();
    assert!(event.stopped);
}

#[test]
fn invocable_service_is_registered_by_key() {
    let log = CallLog::new();
    let services = ServiceMap::new()
        .with_service("recorder", RecordingListener::typed::<SimpleEvent>("recorder", &log));
    let mut registry = Registry::with_container(services);
    registry.add("recorder").unwrap();

    assert_eq!(registry.keys().collect::<Vec<_>>(), [&SimpleEvent::KEY]);
}

#[test]
fn structural_problems_are_incorrect_listeners() {
    let log = CallLog::new();
    let services = ServiceMap::new().with_service("audit", AuditLog::new(&log));
    let mut registry = Registry::with_container(services);

    assert!(matches!(
        incorrect(registry.add("missing").unwrap_err()),
        IncorrectListener::NotFound(id) if id == "missing"
    ));
    assert!(matches!(
        incorrect(registry.add("audit").unwrap_err()),
        IncorrectListener::NotInvocable(id) if id == "audit"
    ));
    assert!(matches!(
        incorrect(registry.add(("audit", "on_unknown")).unwrap_err()),
        IncorrectListener::NoSuchMethod { method, .. } if method == "on_unknown"
    ));
    assert!(matches!(
        incorrect(
            registry
                .add(ListenerRef::Parts(vec!["audit".into(), "on_simple".into(), "x".into()]))
                .unwrap_err()
        ),
        IncorrectListener::Arity(3)
    ));
    assert!(matches!(
        incorrect(registry.add(ListenerRef::Unsupported("integer `7`".into())).unwrap_err()),
        IncorrectListener::Unsupported(_)
    ));
    assert!(registry.is_empty());
}

#[test]
fn failing_container_lookup_keeps_its_source() {
    struct Broken;

    impl Container for Broken {
        fn has(&self, _id: &str) -> bool {
            true
        }

        fn get(&self, id: &str) -> Result<Arc<dyn Service>, herald::ContainerError> {
            Err(herald::ContainerError::Failed {
                id: id.to_owned(),
                source: "connection refused".into(),
            })
        }
    }

    let mut registry = Registry::with_container(Broken);
    let err = incorrect(registry.add(("audit", "on_simple")).unwrap_err());
    assert!(matches!(err, IncorrectListener::Lookup { ref id, .. } if id == "audit"));
    assert!(std::error::Error::source(&err).is_some());
}
