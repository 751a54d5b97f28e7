//! # herald - In-Process Event Dispatcher
//!
//! `herald` delivers events to listeners registered against event types.
//! Delivery order follows the event's type hierarchy (its own type, then its
//! ancestors nearest first, then the capability sets it implements) and,
//! within one type, descending priority. Any listener can stop propagation
//! of a stoppable event.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! #[derive(Event)]
//! #[event(key = "blog::PostAdded")]
//! struct PostAdded {
//!     id: u64,
//!     #[event(stop)]
//!     stopped: bool,
//! }
//!
//! let mut registry = Registry::new();
//! registry.listen_with_priority(500, |event: &mut PostAdded| {
//!     if event.id == 0 {
//!         event.stop_propagation();
//!     }
//! });
//! registry.listen(|event: &mut PostAdded| println!("post {} added", event.id));
//!
//! let dispatcher = Dispatcher::new(registry);
//! let event = dispatcher.dispatch(PostAdded { id: 42, stopped: false })?;
//! ```
//!
//! ## Container-backed Listeners
//!
//! Listeners can also be named by container key, or as `(key, method)` pairs,
//! when the registry has a [`Container`]:
//!
//! ```rust,ignore
//! let services = ServiceMap::new().with_service("audit", AuditLog::default());
//! let mut registry = Registry::with_container(services);
//! registry.register(("audit", "on_post_added"), 100, None)?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use herald_core::{
    // Errors
    BoxError,
    // Events
    Capability,
    // Containers
    Container,
    ContainerError,
    DeliveryError,
    Event,
    EventType,
    IncorrectListener,
    // Listeners
    IntoOutcome,
    Listener,
    ListenerFn,
    // Providers
    ListenerProvider,
    MethodListener,
    NullaryFn,
    RegistrationError,
    Service,
    Signature,
    StoppableEvent,
    TypeKey,
    UntypedFn,
    bind,
    capability,
};

pub use herald_std::{
    DEFAULT_PRIORITY, Dispatcher, ListenerBinding, ListenerDecl, ListenerIter, ListenerRef,
    Registry, RegistryConfig, Resolved, Resolver, ServiceMap,
};

#[cfg(feature = "inventory")]
pub use herald_std::{CollectedListener, collected_listeners, inventory};

#[cfg(feature = "macros")]
pub use herald_macros::Event;

/// Testing utilities.
pub mod testing {
    pub use herald_std::testing::{CallLog, CountingContainer, FailingListener, RecordingListener};
}

/// Prelude module - common imports for Herald.
///
/// # Usage
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Capability, Container, Dispatcher, Event, EventType, Listener, ListenerFn,
        ListenerProvider, ListenerRef, RegistrationError, Registry, RegistryConfig, ServiceMap,
        StoppableEvent, TypeKey,
    };
}
