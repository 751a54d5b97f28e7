//! # Listener Registry
//!
//! Stores listeners by target event key and priority, and yields the ordered
//! listener sequence for an event.
//!
//! Lookup walks the event's own key, then its ancestors from nearest to most
//! distant, then its capability keys. Within one key listeners come in
//! descending priority, and in registration order within a priority.

use crate::{
    config::{ListenerBinding, RegistryConfig},
    resolver::{ListenerRef, Resolved, Resolver},
};
use herald_core::{
    Capability, Container, Event, EventType, IntoOutcome, Listener, ListenerFn, ListenerProvider,
    RegistrationError, TypeKey, UntypedFn,
};
use std::{
    cmp::Reverse,
    collections::{BTreeMap, HashMap, btree_map},
    fmt, slice,
    sync::Arc,
};

/// Listeners of one key, highest priority first.
type Buckets = BTreeMap<Reverse<i32>, Vec<Arc<dyn Listener>>>;

/// Maps event keys to prioritized listeners.
///
/// Registration takes `&mut self` and lookup `&self`; share a registry across
/// threads behind a lock.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = Registry::new();
/// registry.listen_with_priority(500, |event: &mut PostAdded| notify(event));
/// registry.listen(|event: &mut PostAdded| index(event));
///
/// let dispatcher = Dispatcher::new(registry);
/// dispatcher.dispatch(PostAdded::new(42))?;
/// ```
pub struct Registry {
    resolver: Resolver,
    default_priority: i32,
    table: HashMap<TypeKey, Buckets>,
    len: usize,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// An empty registry with the default configuration and no container.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// An empty registry following `config`.
    ///
    /// Listeners declared in `config` are not registered; use
    /// [`from_config`](Self::from_config) for that.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            resolver: Resolver::new(&config, None),
            default_priority: config.default_priority,
            table: HashMap::new(),
            len: 0,
        }
    }

    /// An empty registry resolving non-callable listeners through `container`.
    pub fn with_container(container: impl Container + 'static) -> Self {
        Self::new().container(container)
    }

    /// Build a registry from `config` and register the listeners it declares.
    ///
    /// Fails on the first declaration that cannot be registered.
    pub fn from_config(
        config: RegistryConfig,
        container: Option<Arc<dyn Container>>,
    ) -> Result<Self, RegistrationError> {
        let mut registry = Self {
            resolver: Resolver::new(&config, container),
            default_priority: config.default_priority,
            table: HashMap::new(),
            len: 0,
        };
        registry.register_bindings(config.listeners)?;
        Ok(registry)
    }

    /// Set the container used to resolve non-callable listeners.
    pub fn container(mut self, container: impl Container + 'static) -> Self {
        self.resolver.set_container(Arc::new(container));
        self
    }

    /// Set an already shared container.
    pub fn shared_container(mut self, container: Arc<dyn Container>) -> Self {
        self.resolver.set_container(container);
        self
    }

    /// Priority used by registrations that do not name one.
    pub fn default_priority(&self) -> i32 {
        self.default_priority
    }

    /// Register `listener` at `priority`.
    ///
    /// With inference on, the listener is registered under the event type its
    /// signature declares; `event_key`, when given, adds a second
    /// registration under that key. Nothing is registered on error.
    pub fn register(
        &mut self,
        listener: impl Into<ListenerRef>,
        priority: i32,
        event_key: Option<TypeKey>,
    ) -> Result<(), RegistrationError> {
        let listener = listener.into();
        match self.resolver.resolve(listener, event_key) {
            Ok(Resolved { listener, keys }) => {
                self.insert(listener, keys, priority);
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, priority, "listener registration rejected");
                Err(err)
            }
        }
    }

    /// Register `listener` at the default priority under its inferred key.
    pub fn add(&mut self, listener: impl Into<ListenerRef>) -> Result<(), RegistrationError> {
        self.register(listener, self.default_priority, None)
    }

    /// Register a closure for events of type `E` at the default priority.
    ///
    /// The target key is `E::KEY`, taken from the type rather than inferred.
    /// This never goes through the resolver, so it cannot fail and works with
    /// inference off. Use [`register`](Self::register) for an explicit key
    /// override.
    pub fn listen<E, F, R>(&mut self, f: F)
    where
        E: EventType,
        F: Fn(&mut E) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.listen_with_priority(self.default_priority, f);
    }

    /// Register a closure for events of type `E` at `priority`.
    ///
    /// Like [`listen`](Self::listen), this skips the resolver.
    pub fn listen_with_priority<E, F, R>(&mut self, priority: i32, f: F)
    where
        E: EventType,
        F: Fn(&mut E) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        let listener: Arc<dyn Listener> = Arc::new(ListenerFn::new(f));
        self.insert(listener, vec![E::KEY], priority);
    }

    /// Register a closure for every event exposing the capability `C`, at the
    /// default priority.
    pub fn listen_capability<C, F, R>(&mut self, f: F)
    where
        C: Capability + ?Sized,
        F: Fn(&mut dyn Event) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.listen_capability_with_priority::<C, F, R>(self.default_priority, f);
    }

    /// Register a closure for every event exposing the capability `C`.
    ///
    /// Skips the resolver, like [`listen`](Self::listen).
    pub fn listen_capability_with_priority<C, F, R>(&mut self, priority: i32, f: F)
    where
        C: Capability + ?Sized,
        F: Fn(&mut dyn Event) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        let listener: Arc<dyn Listener> = Arc::new(UntypedFn::new(f));
        self.insert(listener, vec![C::KEY], priority);
    }

    /// Register a declared listener.
    pub fn register_binding(&mut self, binding: ListenerBinding) -> Result<(), RegistrationError> {
        let priority = binding.priority.unwrap_or(self.default_priority);
        let event_key = binding.event_key();
        self.register(binding.listener, priority, event_key)
    }

    /// Register declared listeners in order, stopping at the first failure.
    ///
    /// Declarations before the failing one stay registered.
    pub fn register_bindings(
        &mut self,
        bindings: impl IntoIterator<Item = ListenerBinding>,
    ) -> Result<(), RegistrationError> {
        bindings
            .into_iter()
            .try_for_each(|binding| self.register_binding(binding))
    }

    fn insert(&mut self, listener: Arc<dyn Listener>, keys: Vec<TypeKey>, priority: i32) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            listener = listener.name(),
            ?keys,
            priority,
            "listener registered"
        );
        for key in keys {
            self.table
                .entry(key)
                .or_default()
                .entry(Reverse(priority))
                .or_default()
                .push(listener.clone());
            self.len += 1;
        }
    }

    /// The listeners applicable to `event`, in delivery order.
    ///
    /// The sequence is computed lazily on every call.
    pub fn listeners_for(&self, event: &dyn Event) -> ListenerIter<'_> {
        let mut keys = Vec::new();
        keys.push(event.type_key());
        keys.extend(event.ancestors());
        keys.extend(event.capabilities());
        ListenerIter {
            table: &self.table,
            keys: keys.into_iter(),
            buckets: None,
            bucket: None,
        }
    }

    /// Total number of registrations, counting each key separately.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Keys with at least one registered listener.
    pub fn keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.table.keys()
    }
}

impl ListenerProvider for Registry {
    fn listeners_for<'a>(
        &'a self,
        event: &dyn Event,
    ) -> Box<dyn Iterator<Item = &'a Arc<dyn Listener>> + 'a> {
        Box::new(Registry::listeners_for(self, event))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("resolver", &self.resolver)
            .field("default_priority", &self.default_priority)
            .field("len", &self.len)
            .finish()
    }
}

/// Iterator over the listeners for one event. See [`Registry::listeners_for`].
///
/// Borrows the registry only, so the event can be mutated while iterating.
pub struct ListenerIter<'a> {
    table: &'a HashMap<TypeKey, Buckets>,
    keys: std::vec::IntoIter<TypeKey>,
    buckets: Option<btree_map::Values<'a, Reverse<i32>, Vec<Arc<dyn Listener>>>>,
    bucket: Option<slice::Iter<'a, Arc<dyn Listener>>>,
}

impl<'a> Iterator for ListenerIter<'a> {
    type Item = &'a Arc<dyn Listener>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(listener) = self.bucket.as_mut().and_then(Iterator::next) {
                return Some(listener);
            }
            if let Some(bucket) = self.buckets.as_mut().and_then(Iterator::next) {
                self.bucket = Some(bucket.iter());
                continue;
            }
            let key = self.keys.next()?;
            self.buckets = self.table.get(&key).map(BTreeMap::values);
            self.bucket = None;
        }
    }
}

impl fmt::Debug for ListenerIter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerIter")
            .field("remaining_keys", &self.keys.as_slice())
            .finish_non_exhaustive()
    }
}
