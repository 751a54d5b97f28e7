//! Sequential event delivery.

use crate::registry::Registry;
use herald_core::{BoxError, Event, ListenerProvider};

/// Delivers events to the listeners a [`ListenerProvider`] yields.
///
/// Listeners run one by one, in provider order. Delivery halts as soon as the
/// event reports propagation stopped, which is checked before every
/// invocation. A listener error is returned unmodified and ends delivery;
/// listeners that already ran are not undone.
#[derive(Debug, Default, Clone)]
pub struct Dispatcher<P = Registry> {
    provider: P,
}

impl<P: ListenerProvider> Dispatcher<P> {
    /// Create a dispatcher driven by `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The listener provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the provider, e.g. to register more listeners.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Consume the dispatcher, returning the provider.
    pub fn into_inner(self) -> P {
        self.provider
    }

    /// Deliver `event` and hand it back.
    pub fn dispatch<E: Event>(&self, mut event: E) -> Result<E, BoxError> {
        self.dispatch_mut(&mut event)?;
        Ok(event)
    }

    /// Deliver a borrowed event.
    pub fn dispatch_mut(&self, event: &mut dyn Event) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        let key = event.type_key();

        for listener in self.provider.listeners_for(event) {
            if event.propagation_stopped() {
                #[cfg(feature = "tracing")]
                tracing::debug!(event = %key, "propagation stopped");
                return Ok(());
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(event = %key, listener = listener.name(), "delivering");

            listener.call(event)?;
        }
        Ok(())
    }
}
