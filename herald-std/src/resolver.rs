//! Listener resolution.
//!
//! Normalizes the representations a listener can be registered with into an
//! invocable `Arc<dyn Listener>`, and works out the event keys it should be
//! registered under.

use crate::config::RegistryConfig;
use herald_core::{
    Container, IncorrectListener, Listener, RegistrationError, Service, Signature, TypeKey,
};
use std::{fmt, sync::Arc};

/// The ways a listener can be handed to a registry.
#[derive(Clone)]
pub enum ListenerRef {
    /// Already invocable; used as-is.
    Callable(Arc<dyn Listener>),
    /// A live object and the name of one of its methods. The container is
    /// never consulted.
    Bound {
        /// The object.
        object: Arc<dyn Service>,
        /// Method name.
        method: String,
    },
    /// A container key and the name of a method on the resolved object.
    Method {
        /// Container key.
        id: String,
        /// Method name.
        method: String,
    },
    /// A container key whose value must itself be invocable.
    Service(String),
    /// A declared `[id, method]` pair, typically read from configuration.
    /// Anything but two elements is rejected.
    Parts(Vec<String>),
    /// A declared value of a kind that cannot describe a listener.
    Unsupported(String),
}

impl ListenerRef {
    /// Wrap a listener value.
    pub fn callable(listener: impl Listener) -> Self {
        Self::Callable(Arc::new(listener))
    }

    /// A method on a live object.
    pub fn bound(object: Arc<dyn Service>, method: impl Into<String>) -> Self {
        Self::Bound {
            object,
            method: method.into(),
        }
    }

    /// A method on an object looked up in the container.
    pub fn method(id: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Method {
            id: id.into(),
            method: method.into(),
        }
    }

    /// An invocable object looked up in the container.
    pub fn service(id: impl Into<String>) -> Self {
        Self::Service(id.into())
    }

    /// Whether this representation resolves without a container.
    pub fn is_container_free(&self) -> bool {
        matches!(self, Self::Callable(_) | Self::Bound { .. })
    }
}

impl fmt::Debug for ListenerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(listener) => f.debug_tuple("Callable").field(listener).finish(),
            Self::Bound { object, method } => f
                .debug_struct("Bound")
                .field("object", &object.service_name())
                .field("method", method)
                .finish(),
            Self::Method { id, method } => f
                .debug_struct("Method")
                .field("id", id)
                .field("method", method)
                .finish(),
            Self::Service(id) => f.debug_tuple("Service").field(id).finish(),
            Self::Parts(parts) => f.debug_tuple("Parts").field(parts).finish(),
            Self::Unsupported(what) => f.debug_tuple("Unsupported").field(what).finish(),
        }
    }
}

impl From<Arc<dyn Listener>> for ListenerRef {
    fn from(listener: Arc<dyn Listener>) -> Self {
        Self::Callable(listener)
    }
}

impl From<&str> for ListenerRef {
    fn from(id: &str) -> Self {
        Self::Service(id.to_owned())
    }
}

impl From<String> for ListenerRef {
    fn from(id: String) -> Self {
        Self::Service(id)
    }
}

impl From<(&str, &str)> for ListenerRef {
    fn from((id, method): (&str, &str)) -> Self {
        Self::method(id, method)
    }
}

impl From<(Arc<dyn Service>, &str)> for ListenerRef {
    fn from((object, method): (Arc<dyn Service>, &str)) -> Self {
        Self::bound(object, method)
    }
}

/// A resolved listener together with the keys to register it under.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// The invocable listener.
    pub listener: Arc<dyn Listener>,
    /// Target event keys, inferred key first.
    pub keys: Vec<TypeKey>,
}

/// Turns [`ListenerRef`]s into invocable listeners.
#[derive(Clone)]
pub struct Resolver {
    container: Option<Arc<dyn Container>>,
    infer_event_type: bool,
}

impl Resolver {
    /// Create a resolver following `config`.
    pub fn new(config: &RegistryConfig, container: Option<Arc<dyn Container>>) -> Self {
        Self {
            container,
            infer_event_type: config.infer_event_type,
        }
    }

    /// Whether a container is configured.
    pub fn has_container(&self) -> bool {
        self.container.is_some()
    }

    pub(crate) fn set_container(&mut self, container: Arc<dyn Container>) {
        self.container = Some(container);
    }

    /// Resolve `listener` and its target keys.
    ///
    /// With inference on, the key declared by the listener's signature comes
    /// first; `event_key`, when given, is added as a second, independent key.
    /// Nothing is registered on failure.
    pub fn resolve(
        &self,
        listener: ListenerRef,
        event_key: Option<TypeKey>,
    ) -> Result<Resolved, RegistrationError> {
        let listener = self.normalize(listener)?;
        let keys = self.target_keys(listener.as_ref(), event_key)?;
        Ok(Resolved { listener, keys })
    }

    /// Normalize a representation into an invocable listener.
    ///
    /// Every representation other than `Callable` and `Bound` needs a
    /// container; without one it fails with
    /// [`RegistrationError::InvalidConfiguration`] before its shape is checked.
    pub fn normalize(&self, listener: ListenerRef) -> Result<Arc<dyn Listener>, RegistrationError> {
        if !listener.is_container_free() && self.container.is_none() {
            return Err(RegistrationError::InvalidConfiguration(
                "a container is required to resolve non-callable listeners".to_owned(),
            ));
        }
        match listener {
            ListenerRef::Callable(listener) => Ok(listener),
            ListenerRef::Bound { object, method } => {
                let target = object.service_name().to_owned();
                bind_method(object, target, method)
            }
            ListenerRef::Method { id, method } => self.resolve_method(id, method),
            ListenerRef::Parts(parts) => {
                let [id, method]: [String; 2] = parts
                    .try_into()
                    .map_err(|parts: Vec<String>| IncorrectListener::Arity(parts.len()))?;
                self.resolve_method(id, method)
            }
            ListenerRef::Service(id) => {
                let service = self.lookup(&id)?;
                service
                    .invoker()
                    .ok_or_else(|| IncorrectListener::NotInvocable(id).into())
            }
            ListenerRef::Unsupported(what) => Err(IncorrectListener::Unsupported(what).into()),
        }
    }

    fn resolve_method(
        &self,
        id: String,
        method: String,
    ) -> Result<Arc<dyn Listener>, RegistrationError> {
        let object = self.lookup(&id)?;
        bind_method(object, id, method)
    }

    fn lookup(&self, id: &str) -> Result<Arc<dyn Service>, RegistrationError> {
        let Some(container) = self.container.as_deref() else {
            return Err(RegistrationError::InvalidConfiguration(
                "a container is required to resolve non-callable listeners".to_owned(),
            ));
        };
        if !container.has(id) {
            return Err(IncorrectListener::NotFound(id.to_owned()).into());
        }
        container.get(id).map_err(|source| {
            IncorrectListener::Lookup {
                id: id.to_owned(),
                source,
            }
            .into()
        })
    }

    fn target_keys(
        &self,
        listener: &dyn Listener,
        event_key: Option<TypeKey>,
    ) -> Result<Vec<TypeKey>, RegistrationError> {
        let mut keys = Vec::with_capacity(2);
        if self.infer_event_type {
            match listener.signature() {
                Signature::Typed(key) => keys.push(key),
                Signature::Nullary => return Err(IncorrectListener::NoParameters.into()),
                Signature::Untyped => return Err(IncorrectListener::UntypedParameter.into()),
            }
        }
        keys.extend(event_key);
        if keys.is_empty() {
            return Err(IncorrectListener::NoTarget.into());
        }
        Ok(keys)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("has_container", &self.has_container())
            .field("infer_event_type", &self.infer_event_type)
            .finish()
    }
}

fn bind_method(
    object: Arc<dyn Service>,
    target: String,
    method: String,
) -> Result<Arc<dyn Listener>, RegistrationError> {
    object
        .method(&method)
        .ok_or_else(|| IncorrectListener::NoSuchMethod { target, method }.into())
}
