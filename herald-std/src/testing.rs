//! Testing utilities for Herald.
//!
//! # Features
//!
//! - [`CallLog`]: a shared, ordered log of listener invocations
//! - [`RecordingListener`]: a listener that writes its label into a [`CallLog`]
//! - [`FailingListener`]: a listener that always fails
//! - [`CountingContainer`]: a container wrapper counting `has`/`get` calls

use herald_core::{
    BoxError, Container, ContainerError, DeliveryError, Event, EventType, Listener, Service,
    Signature,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Call Log
// ============================================================================

/// A shared log of invocation labels, in invocation order.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    /// A copy of the recorded entries.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget all entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

/// Fail with [`DeliveryError::EventMismatch`] unless `event` has a view of
/// the signature's key.
fn check_signature(signature: &Signature, event: &dyn Event) -> Result<(), BoxError> {
    match signature {
        Signature::Typed(expected) if event.view(expected).is_none() => {
            Err(DeliveryError::EventMismatch {
                expected: expected.clone(),
                actual: event.type_key(),
            }
            .into())
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records its label in a [`CallLog`] each time it runs.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// registry.add(RecordingListener::typed::<PostAdded>("first", &log))?;
/// registry.add(RecordingListener::typed::<PostAdded>("second", &log).stopping())?;
///
/// dispatcher.dispatch(PostAdded::default())?;
/// assert_eq!(log.entries(), ["first", "second"]);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingListener {
    label: String,
    log: CallLog,
    signature: Signature,
    stop: bool,
}

impl RecordingListener {
    /// A listener declaring `E` as its parameter.
    pub fn typed<E: EventType>(label: impl Into<String>, log: &CallLog) -> Self {
        Self {
            label: label.into(),
            log: log.clone(),
            signature: Signature::Typed(E::KEY),
            stop: false,
        }
    }

    /// A listener accepting any event.
    pub fn untyped(label: impl Into<String>, log: &CallLog) -> Self {
        Self {
            label: label.into(),
            log: log.clone(),
            signature: Signature::Untyped,
            stop: false,
        }
    }

    /// Also stop propagation after recording, when the event allows it.
    pub fn stopping(mut self) -> Self {
        self.stop = true;
        self
    }
}

impl Listener for RecordingListener {
    fn signature(&self) -> Signature {
        self.signature.clone()
    }

    fn call(&self, event: &mut dyn Event) -> Result<(), BoxError> {
        check_signature(&self.signature, event)?;
        self.log.push(self.label.as_str());
        if self.stop
            && let Some(stoppable) = event.as_stoppable_mut()
        {
            stoppable.stop_propagation();
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.label
    }
}

// ============================================================================
// Failing Listener
// ============================================================================

/// A listener that fails with a fixed message.
#[derive(Debug, Clone)]
pub struct FailingListener {
    message: String,
    signature: Signature,
}

impl FailingListener {
    /// A failing listener declaring `E` as its parameter.
    pub fn typed<E: EventType>(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            signature: Signature::Typed(E::KEY),
        }
    }

    /// A failing listener accepting any event.
    pub fn untyped(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            signature: Signature::Untyped,
        }
    }
}

impl Listener for FailingListener {
    fn signature(&self) -> Signature {
        self.signature.clone()
    }

    fn call(&self, event: &mut dyn Event) -> Result<(), BoxError> {
        check_signature(&self.signature, event)?;
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Counting Container
// ============================================================================

/// Wraps a container and counts the calls made to it.
#[derive(Debug, Default)]
pub struct CountingContainer<C> {
    inner: C,
    has_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

impl<C> CountingContainer<C> {
    /// Wrap `inner`.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            has_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `has` calls so far.
    pub fn has_calls(&self) -> usize {
        self.has_calls.load(Ordering::SeqCst)
    }

    /// Number of `get` calls so far.
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// The wrapped container.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Container> Container for CountingContainer<C> {
    fn has(&self, id: &str) -> bool {
        self.has_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.has(id)
    }

    fn get(&self, id: &str) -> Result<Arc<dyn Service>, ContainerError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::TypeKey;

    struct Ping;

    impl EventType for Ping {
        const KEY: TypeKey = TypeKey::from_static("testing::Ping");
    }

    struct Pong;

    impl EventType for Pong {
        const KEY: TypeKey = TypeKey::from_static("testing::Pong");
    }

    #[test]
    fn recording_listener_logs_in_order() {
        let log = CallLog::new();
        let first = RecordingListener::typed::<Ping>("first", &log);
        let second = RecordingListener::untyped("second", &log);

        first.call(&mut Ping).unwrap();
        second.call(&mut Ping).unwrap();
        first.call(&mut Ping).unwrap();

        assert_eq!(log.entries(), ["first", "second", "first"]);
    }

    #[test]
    fn typed_recorder_rejects_unrelated_event() {
        let log = CallLog::new();
        let listener = RecordingListener::typed::<Ping>("ping", &log);
        let err = listener.call(&mut Pong).unwrap_err();
        assert!(err.downcast_ref::<DeliveryError>().is_some());
        assert!(log.is_empty());
    }

    #[test]
    fn failing_listener_fails() {
        let err = FailingListener::untyped("boom").call(&mut Ping).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
