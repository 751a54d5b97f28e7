//! Listener provider trait.

use crate::{event::Event, listener::Listener};
use std::sync::Arc;

/// Source of the ordered listener sequence for an event.
///
/// The dispatcher is generic over this trait, so registries and test doubles
/// are interchangeable.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot provide listeners",
    label = "missing `ListenerProvider` implementation",
    note = "Implement `ListenerProvider::listeners_for` to drive a `Dispatcher`."
)]
pub trait ListenerProvider {
    /// The listeners that should receive `event`, in delivery order.
    ///
    /// The returned iterator borrows the provider only, never the event, so
    /// the caller can hand the event to each listener mutably while iterating.
    fn listeners_for<'a>(
        &'a self,
        event: &dyn Event,
    ) -> Box<dyn Iterator<Item = &'a Arc<dyn Listener>> + 'a>;
}

impl<P: ListenerProvider + ?Sized> ListenerProvider for &P {
    fn listeners_for<'a>(
        &'a self,
        event: &dyn Event,
    ) -> Box<dyn Iterator<Item = &'a Arc<dyn Listener>> + 'a> {
        (**self).listeners_for(event)
    }
}

impl<P: ListenerProvider + ?Sized> ListenerProvider for Arc<P> {
    fn listeners_for<'a>(
        &'a self,
        event: &dyn Event,
    ) -> Box<dyn Iterator<Item = &'a Arc<dyn Listener>> + 'a> {
        (**self).listeners_for(event)
    }
}

/// A fixed list of listeners returned for every event, in order.
///
/// Handy for driving a dispatcher without a registry.
impl ListenerProvider for [Arc<dyn Listener>] {
    fn listeners_for<'a>(
        &'a self,
        _event: &dyn Event,
    ) -> Box<dyn Iterator<Item = &'a Arc<dyn Listener>> + 'a> {
        Box::new(self.iter())
    }
}

impl ListenerProvider for Vec<Arc<dyn Listener>> {
    fn listeners_for<'a>(
        &'a self,
        event: &dyn Event,
    ) -> Box<dyn Iterator<Item = &'a Arc<dyn Listener>> + 'a> {
        self.as_slice().listeners_for(event)
    }
}
