#![allow(dead_code)]

use herald::{Event, Listener, Service, bind, testing::CallLog};
use std::sync::Arc;

// ============================================================================
// Capabilities
// ============================================================================

pub trait Auditable {}
herald::capability!(dyn Auditable => "test::Auditable");

pub trait Billable {}
herald::capability!(dyn Billable);

// ============================================================================
// Test Event Types
// ============================================================================

#[derive(Debug, Default, Event)]
#[event(key = "test::SimpleEvent")]
pub struct SimpleEvent {
    pub hits: u32,
}

/// Extends `SimpleEvent` and can be stopped.
#[derive(Debug, Default, Event)]
#[event(key = "test::StoppableSimpleEvent", implements(dyn Auditable))]
pub struct StoppableSimpleEvent {
    #[event(parent)]
    pub base: SimpleEvent,
    #[event(stop)]
    pub stopped: bool,
}

/// Extends `StoppableSimpleEvent`, inheriting its capabilities.
#[derive(Debug, Default, Event)]
#[event(key = "test::DetailedEvent", implements(dyn Billable, dyn Auditable))]
pub struct DetailedEvent {
    #[event(parent)]
    pub inner: StoppableSimpleEvent,
    pub detail: String,
}

#[derive(Debug, Default, Event)]
#[event(key = "test::OtherEvent")]
pub struct OtherEvent;

// ============================================================================
// Test Services
// ============================================================================

/// A service exposing listener methods, resolved by name.
pub struct AuditLog {
    pub log: CallLog,
}

impl AuditLog {
    pub fn new(log: &CallLog) -> Self {
        Self { log: log.clone() }
    }

    fn on_simple(&self, event: &mut SimpleEvent) {
        event.hits += 1;
        self.log.push("audit:simple");
    }

    fn on_stoppable(&self, event: &mut StoppableSimpleEvent) {
        self.log.push("audit:stoppable");
        event.stopped = true;
    }
}

impl Service for AuditLog {
    fn method(self: Arc<Self>, name: &str) -> Option<Arc<dyn Listener>> {
        match name {
            "on_simple" => Some(bind(self, AuditLog::on_simple)),
            "on_stoppable" => Some(bind(self, AuditLog::on_stoppable)),
            _ => None,
        }
    }
}

/// Listen to tracing output while a test runs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}
