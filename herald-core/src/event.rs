//! # Event Types
//!
//! Events are plain values owned by whoever dispatches them. What the
//! dispatcher needs from an event is static metadata about its type:
//!
//! - its own [`TypeKey`],
//! - the keys of its ancestors, nearest first,
//! - the keys of the capability sets it implements,
//! - typed views of itself and of its ancestors, so a listener declared for an
//!   ancestor type can be handed the matching part of a descendant event.
//!
//! Rust has no class inheritance, so an "ancestor" is modelled by composition:
//! a descendant event embeds its parent event as a field and exposes it
//! through [`EventType::view_ancestor`]. `#[derive(Event)]` in the `herald`
//! crate generates all of this from a `#[event(parent)]` field.
//!
//! Implement [`EventType`]; the object-safe [`Event`] trait is provided by a
//! blanket implementation.

use crate::key::TypeKey;
use std::any::Any;

/// Capability of events whose propagation can be stopped by a listener.
///
/// Events that do not expose this capability are delivered to every matching
/// listener.
pub trait StoppableEvent {
    /// Mark propagation as stopped. Remaining listeners are skipped.
    fn stop_propagation(&mut self);

    /// Whether propagation has been stopped.
    fn is_propagation_stopped(&self) -> bool;
}

/// A capability set (the equivalent of an implemented interface) that event
/// types can declare, identified by its key.
///
/// Usually implemented for a trait object type, e.g. `dyn StoppableEvent`, with
/// the [`capability!`](crate::capability) macro.
pub trait Capability: 'static {
    /// Key under which listeners for this capability are registered.
    const KEY: TypeKey;
}

impl Capability for dyn StoppableEvent {
    const KEY: TypeKey = TypeKey::from_static("herald::StoppableEvent");
}

/// Static description of an event type.
///
/// # Example
///
/// ```rust,ignore
/// struct PostAdded { id: u64 }
///
/// impl EventType for PostAdded {
///     const KEY: TypeKey = TypeKey::from_static("app::PostAdded");
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an event type",
    label = "missing `EventType` implementation",
    note = "Derive it with `#[derive(herald::Event)]` or implement `EventType` by hand."
)]
pub trait EventType: Any + Sized {
    /// Key of the concrete type.
    const KEY: TypeKey;

    /// Ancestor keys, nearest ancestor first.
    fn ancestry() -> Vec<TypeKey> {
        Vec::new()
    }

    /// Capability keys, own declarations first, then inherited ones.
    fn capability_keys() -> Vec<TypeKey> {
        Vec::new()
    }

    /// View of the ancestor identified by `key`, if this type has one.
    fn view_ancestor(&self, key: &TypeKey) -> Option<&dyn Any> {
        let _ = key;
        None
    }

    /// Mutable view of the ancestor identified by `key`, if this type has one.
    fn view_ancestor_mut(&mut self, key: &TypeKey) -> Option<&mut dyn Any> {
        let _ = key;
        None
    }

    /// The stoppable capability, if this type (or an ancestor) has it.
    fn stoppable(&self) -> Option<&dyn StoppableEvent> {
        None
    }

    /// Mutable access to the stoppable capability.
    fn stoppable_mut(&mut self) -> Option<&mut dyn StoppableEvent> {
        None
    }
}

/// Object-safe view of an event instance, used at dispatch time.
pub trait Event: Any {
    /// Key of the event's concrete type.
    fn type_key(&self) -> TypeKey;

    /// Ancestor keys, nearest first.
    fn ancestors(&self) -> Vec<TypeKey>;

    /// Capability keys in declaration order.
    fn capabilities(&self) -> Vec<TypeKey>;

    /// The event itself, or the embedded ancestor, identified by `key`.
    fn view(&self, key: &TypeKey) -> Option<&dyn Any>;

    /// Mutable counterpart of [`Event::view`].
    fn view_mut(&mut self, key: &TypeKey) -> Option<&mut dyn Any>;

    /// The stoppable capability, if exposed.
    fn as_stoppable(&self) -> Option<&dyn StoppableEvent>;

    /// Mutable access to the stoppable capability, if exposed.
    fn as_stoppable_mut(&mut self) -> Option<&mut dyn StoppableEvent>;

    /// `true` if the event is stoppable and a listener stopped it.
    fn propagation_stopped(&self) -> bool {
        self.as_stoppable()
            .is_some_and(|stoppable| stoppable.is_propagation_stopped())
    }
}

impl<T: EventType> Event for T {
    fn type_key(&self) -> TypeKey {
        T::KEY
    }

    fn ancestors(&self) -> Vec<TypeKey> {
        T::ancestry()
    }

    fn capabilities(&self) -> Vec<TypeKey> {
        T::capability_keys()
    }

    fn view(&self, key: &TypeKey) -> Option<&dyn Any> {
        if *key == T::KEY {
            Some(self)
        } else {
            self.view_ancestor(key)
        }
    }

    fn view_mut(&mut self, key: &TypeKey) -> Option<&mut dyn Any> {
        if *key == T::KEY {
            Some(self)
        } else {
            self.view_ancestor_mut(key)
        }
    }

    fn as_stoppable(&self) -> Option<&dyn StoppableEvent> {
        self.stoppable()
    }

    fn as_stoppable_mut(&mut self) -> Option<&mut dyn StoppableEvent> {
        self.stoppable_mut()
    }
}

impl dyn Event {
    /// Downcast to the event itself or one of its ancestors.
    pub fn downcast_ref<E: EventType>(&self) -> Option<&E> {
        self.view(&E::KEY).and_then(|view| view.downcast_ref())
    }

    /// Mutable counterpart of [`downcast_ref`](Self::downcast_ref).
    pub fn downcast_mut<E: EventType>(&mut self) -> Option<&mut E> {
        self.view_mut(&E::KEY).and_then(|view| view.downcast_mut())
    }
}

/// Implement [`Capability`] for a trait object type.
///
/// Without an explicit key, the key is the trait's module path and name.
///
/// ```rust,ignore
/// pub trait Auditable {}
/// herald::capability!(dyn Auditable);
/// herald::capability!(dyn Billable => "billing::Billable");
/// ```
#[macro_export]
macro_rules! capability {
    (dyn $name:ident) => {
        impl $crate::Capability for dyn $name {
            const KEY: $crate::TypeKey =
                $crate::TypeKey::from_static(concat!(module_path!(), "::", stringify!($name)));
        }
    };
    ($ty:ty => $key:expr) => {
        impl $crate::Capability for $ty {
            const KEY: $crate::TypeKey = $crate::TypeKey::from_static($key);
        }
    };
}
