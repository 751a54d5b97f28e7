//! # Container Boundary
//!
//! Listeners do not have to exist when they are registered. A registry
//! configured with a [`Container`] accepts container keys and `(key, method)`
//! pairs and materializes them through the container at registration time.
//!
//! The container is an external collaborator: a key/value lookup service that
//! owns the objects it hands out. Objects it returns are [`Service`]s, which
//! can be turned into listeners either through their default call capability
//! or by binding one of their named methods.

use crate::{error::ContainerError, listener::Listener};
use std::sync::Arc;

/// An object that can be materialized into a listener.
///
/// Every [`Listener`] is a `Service` whose default call capability is itself.
/// Objects that expose several listener methods implement
/// [`method`](Service::method) instead, usually with [`bind`](crate::bind).
pub trait Service: Send + Sync + 'static {
    /// The default call capability, if the object is directly invocable.
    fn invoker(self: Arc<Self>) -> Option<Arc<dyn Listener>> {
        None
    }

    /// Bind the method called `name` as a listener.
    fn method(self: Arc<Self>, name: &str) -> Option<Arc<dyn Listener>> {
        let _ = name;
        None
    }

    /// Name used in diagnostics.
    fn service_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<L: Listener> Service for L {
    fn invoker(self: Arc<Self>) -> Option<Arc<dyn Listener>> {
        Some(self)
    }
}

/// Key/value lookup service used to resolve listeners that are not directly
/// invocable.
///
/// The resolver only ever calls [`has`](Container::has) followed by
/// [`get`](Container::get).
pub trait Container: Send + Sync {
    /// Whether an entry exists for `id`.
    fn has(&self, id: &str) -> bool;

    /// The entry for `id`.
    fn get(&self, id: &str) -> Result<Arc<dyn Service>, ContainerError>;
}

impl<C: Container + ?Sized> Container for Arc<C> {
    fn has(&self, id: &str) -> bool {
        (**self).has(id)
    }

    fn get(&self, id: &str) -> Result<Arc<dyn Service>, ContainerError> {
        (**self).get(id)
    }
}
