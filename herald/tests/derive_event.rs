#![cfg(feature = "macros")]

mod common;

use common::{Auditable, Billable, DetailedEvent, OtherEvent, SimpleEvent, StoppableSimpleEvent};
use herald::{Capability, Event, EventType, StoppableEvent, TypeKey};

#[derive(Event)]
#[allow(dead_code)]
struct DefaultKeyed;

#[derive(Event)]
#[event(key = "test::Wrapped")]
struct Wrapped(#[event(parent)] SimpleEvent, #[event(stop)] bool);

#[derive(Event)]
#[event(key = "test::Manual", stoppable)]
struct Manual {
    halted: bool,
}

impl StoppableEvent for Manual {
    fn stop_propagation(&mut self) {
        self.halted = true;
    }

    fn is_propagation_stopped(&self) -> bool {
        self.halted
    }
}

#[derive(Event)]
#[event(key = "test::Signal", implements(dyn Auditable))]
#[allow(dead_code)]
enum Signal {
    Up,
    Down,
}

#[test]
fn explicit_keys() {
    assert_eq!(SimpleEvent::KEY, "test::SimpleEvent");
    assert_eq!(OtherEvent.type_key(), TypeKey::from_static("test::OtherEvent"));
}

#[test]
fn default_key_is_module_path_and_name() {
    assert_eq!(DefaultKeyed::KEY.as_str(), concat!(module_path!(), "::DefaultKeyed"));
}

#[test]
fn ancestry_is_nearest_first() {
    assert!(SimpleEvent::ancestry().is_empty());
    assert_eq!(StoppableSimpleEvent::ancestry(), [SimpleEvent::KEY]);
    assert_eq!(
        DetailedEvent::ancestry(),
        [StoppableSimpleEvent::KEY, SimpleEvent::KEY]
    );
}

#[test]
fn capabilities_are_own_first_then_inherited_without_duplicates() {
    let auditable = <dyn Auditable as Capability>::KEY;
    let billable = <dyn Billable as Capability>::KEY;
    let stoppable = <dyn StoppableEvent as Capability>::KEY;

    assert!(SimpleEvent::capability_keys().is_empty());
    assert_eq!(
        StoppableSimpleEvent::capability_keys(),
        [auditable.clone(), stoppable.clone()]
    );
    assert_eq!(
        DetailedEvent::capability_keys(),
        [billable, auditable.clone(), stoppable]
    );
    assert_eq!(Signal::Up.capabilities(), [auditable]);
}

#[test]
fn descendant_exposes_ancestor_views() {
    let mut event = DetailedEvent::default();
    event.inner.base.hits = 4;

    let base = event.view(&SimpleEvent::KEY).unwrap();
    assert_eq!(base.downcast_ref::<SimpleEvent>().unwrap().hits, 4);

    event
        .view_mut(&StoppableSimpleEvent::KEY)
        .and_then(|view| view.downcast_mut::<StoppableSimpleEvent>())
        .unwrap()
        .stopped = true;
    assert!(event.propagation_stopped());
    assert!(event.view(&OtherEvent::KEY).is_none());
}

#[test]
fn stop_flag_generates_stoppable_event() {
    let mut event = Wrapped(SimpleEvent::default(), false);
    assert!(!event.propagation_stopped());
    event.stop_propagation();
    assert!(event.1);
    assert!(event.as_stoppable().is_some());
    assert_eq!(Wrapped::ancestry(), [SimpleEvent::KEY]);
    assert!(event.view(&SimpleEvent::KEY).is_some());
}

#[test]
fn stoppable_flag_uses_handwritten_impl() {
    let mut event = Manual { halted: false };
    event.as_stoppable_mut().unwrap().stop_propagation();
    assert!(event.halted);
    assert_eq!(
        Manual::capability_keys(),
        [<dyn StoppableEvent as Capability>::KEY]
    );
}

#[test]
fn stop_capability_is_inherited() {
    let mut event = DetailedEvent::default();
    event.as_stoppable_mut().unwrap().stop_propagation();
    assert!(event.inner.stopped);
}

#[test]
fn plain_events_are_not_stoppable() {
    let event = SimpleEvent::default();
    assert!(event.as_stoppable().is_none());
    assert!(!event.propagation_stopped());
}
