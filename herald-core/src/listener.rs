//! # Listener
//!
//! A listener is an invocable unit that accepts exactly one argument, the
//! event. Registries store listeners type-erased as `Arc<dyn Listener>`, so
//! every listener also reports its [`Signature`]: the declared parameter the
//! registry infers a target event type from.
//!
//! # Adapters
//!
//! - [`ListenerFn`] - closure or `fn` taking `&mut E` for a concrete event type
//! - [`MethodListener`] - a method bound to a shared object
//! - [`UntypedFn`] - closure taking `&mut dyn Event`, for capability listeners
//! - [`NullaryFn`] - closure taking no event at all
//!
//! Typed adapters capture the event type as a generic parameter, so the
//! compiler supplies the target key instead of runtime reflection.

use crate::{
    error::{BoxError, DeliveryError},
    event::{Event, EventType},
    key::TypeKey,
    outcome::IntoOutcome,
};
use std::{fmt, marker::PhantomData, sync::Arc};

/// The declared parameter of a listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// The listener declares no parameter.
    Nullary,
    /// The listener accepts any event (`&mut dyn Event`).
    Untyped,
    /// The listener accepts events of the type identified by the key.
    Typed(TypeKey),
}

impl Signature {
    /// The declared event key, if any.
    pub fn event_key(&self) -> Option<&TypeKey> {
        match self {
            Self::Typed(key) => Some(key),
            Self::Nullary | Self::Untyped => None,
        }
    }
}

/// An invocable unit that handles one event instance.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Listener`",
    label = "missing `Listener` implementation",
    note = "Wrap closures with `ListenerFn::new` or register them with `Registry::listen`."
)]
pub trait Listener: Send + Sync + 'static {
    /// The declared parameter, used for target type inference.
    fn signature(&self) -> Signature;

    /// Handle the event.
    fn call(&self, event: &mut dyn Event) -> Result<(), BoxError>;

    /// Name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl fmt::Debug for dyn Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("name", &self.name())
            .field("signature", &self.signature())
            .finish()
    }
}

/// Resolve the view of `event` a typed listener for `E` expects.
fn typed_view<E: EventType>(event: &mut dyn Event) -> Result<&mut E, BoxError> {
    let actual = event.type_key();
    event
        .view_mut(&E::KEY)
        .and_then(|view| view.downcast_mut::<E>())
        .ok_or_else(|| {
            DeliveryError::EventMismatch {
                expected: E::KEY,
                actual,
            }
            .into()
        })
}

/// A listener built from a function taking `&mut E`.
///
/// # Example
///
/// ```rust,ignore
/// let listener = ListenerFn::new(|event: &mut PostAdded| {
///     println!("post {} added", event.id);
/// });
/// assert_eq!(listener.signature(), Signature::Typed(PostAdded::KEY));
/// ```
pub struct ListenerFn<E, F> {
    f: F,
    _event: PhantomData<fn(&mut E)>,
}

impl<E, F> ListenerFn<E, F> {
    /// Wrap a function.
    pub fn new<R>(f: F) -> Self
    where
        F: Fn(&mut E) -> R,
    {
        Self {
            f,
            _event: PhantomData,
        }
    }
}

impl<E, F, R> Listener for ListenerFn<E, F>
where
    E: EventType,
    F: Fn(&mut E) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn signature(&self) -> Signature {
        Signature::Typed(E::KEY)
    }

    fn call(&self, event: &mut dyn Event) -> Result<(), BoxError> {
        let event = typed_view::<E>(event)?;
        (self.f)(event).into_outcome()
    }

    fn name(&self) -> &str {
        std::any::type_name::<F>()
    }
}

/// A listener that accepts any event, used for capability sets where no
/// single concrete type applies.
pub struct UntypedFn<F> {
    f: F,
}

impl<F> UntypedFn<F> {
    /// Wrap a function.
    pub fn new<R>(f: F) -> Self
    where
        F: Fn(&mut dyn Event) -> R,
    {
        Self { f }
    }
}

impl<F, R> Listener for UntypedFn<F>
where
    F: Fn(&mut dyn Event) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn signature(&self) -> Signature {
        Signature::Untyped
    }

    fn call(&self, event: &mut dyn Event) -> Result<(), BoxError> {
        (self.f)(event).into_outcome()
    }

    fn name(&self) -> &str {
        std::any::type_name::<F>()
    }
}

/// A listener that ignores the event.
///
/// It cannot be registered with type inference enabled, since it declares no
/// parameter to infer from.
pub struct NullaryFn<F> {
    f: F,
}

impl<F> NullaryFn<F> {
    /// Wrap a function.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, R> Listener for NullaryFn<F>
where
    F: Fn() -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn signature(&self) -> Signature {
        Signature::Nullary
    }

    fn call(&self, _event: &mut dyn Event) -> Result<(), BoxError> {
        (self.f)().into_outcome()
    }

    fn name(&self) -> &str {
        std::any::type_name::<F>()
    }
}

/// A method bound to a shared object.
///
/// Produced by [`Service::method`](crate::Service::method) implementations,
/// usually through [`bind`].
pub struct MethodListener<S, E, M> {
    object: Arc<S>,
    method: M,
    _event: PhantomData<fn(&mut E)>,
}

impl<S, E, M> MethodListener<S, E, M> {
    /// Bind `method` to `object`.
    pub fn new<R>(object: Arc<S>, method: M) -> Self
    where
        M: Fn(&S, &mut E) -> R,
    {
        Self {
            object,
            method,
            _event: PhantomData,
        }
    }

    /// The object the method is bound to.
    pub fn object(&self) -> &Arc<S> {
        &self.object
    }
}

impl<S, E, M, R> Listener for MethodListener<S, E, M>
where
    S: Send + Sync + 'static,
    E: EventType,
    M: Fn(&S, &mut E) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn signature(&self) -> Signature {
        Signature::Typed(E::KEY)
    }

    fn call(&self, event: &mut dyn Event) -> Result<(), BoxError> {
        let event = typed_view::<E>(event)?;
        (self.method)(&self.object, event).into_outcome()
    }

    fn name(&self) -> &str {
        std::any::type_name::<M>()
    }
}

/// Bind a method of `object` as a type-erased listener.
///
/// ```rust,ignore
/// impl Service for Mailer {
///     fn method(self: Arc<Self>, name: &str) -> Option<Arc<dyn Listener>> {
///         match name {
///             "on_post_added" => Some(bind(self, Mailer::on_post_added)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub fn bind<S, E, M, R>(object: Arc<S>, method: M) -> Arc<dyn Listener>
where
    S: Send + Sync + 'static,
    E: EventType,
    M: Fn(&S, &mut E) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    Arc::new(MethodListener::new(object, method))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping {
        hits: u32,
    }

    impl EventType for Ping {
        const KEY: TypeKey = TypeKey::from_static("test::Ping");
    }

    struct Pong;

    impl EventType for Pong {
        const KEY: TypeKey = TypeKey::from_static("test::Pong");
    }

    struct Counter {
        step: u32,
    }

    impl Counter {
        fn on_ping(&self, event: &mut Ping) {
            event.hits += self.step;
        }
    }

    #[test]
    fn typed_listener_reports_its_event_key() {
        let listener = ListenerFn::new(|_: &mut Ping| {});
        assert_eq!(listener.signature(), Signature::Typed(Ping::KEY));
        assert_eq!(listener.signature().event_key(), Some(&Ping::KEY));
    }

    #[test]
    fn typed_listener_mutates_event() {
        let listener = ListenerFn::new(|event: &mut Ping| event.hits += 1);
        let mut ping = Ping { hits: 0 };
        listener.call(&mut ping).unwrap();
        listener.call(&mut ping).unwrap();
        assert_eq!(ping.hits, 2);
    }

    #[test]
    fn typed_listener_rejects_unrelated_event() {
        let listener = ListenerFn::new(|_: &mut Ping| {});
        let err = listener.call(&mut Pong).unwrap_err();
        let err = err.downcast_ref::<DeliveryError>().expect("delivery error");
        assert!(matches!(
            err,
            DeliveryError::EventMismatch { expected, actual }
                if *expected == Ping::KEY && *actual == Pong::KEY
        ));
    }

    #[test]
    fn listener_errors_pass_through() {
        let listener = ListenerFn::new(|_: &mut Ping| Err::<(), _>("boom"));
        let err = listener.call(&mut Ping { hits: 0 }).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn bound_method_uses_object_state() {
        let listener = bind(Arc::new(Counter { step: 5 }), Counter::on_ping);
        assert_eq!(listener.signature(), Signature::Typed(Ping::KEY));

        let mut ping = Ping { hits: 1 };
        listener.call(&mut ping).unwrap();
        assert_eq!(ping.hits, 6);
    }

    #[test]
    fn untyped_and_nullary_signatures() {
        let untyped = UntypedFn::new(|_: &mut dyn Event| {});
        let nullary = NullaryFn::new(|| {});
        assert_eq!(untyped.signature(), Signature::Untyped);
        assert_eq!(nullary.signature(), Signature::Nullary);
        assert!(nullary.call(&mut Pong).is_ok());
        assert!(untyped.signature().event_key().is_none());
    }
}
