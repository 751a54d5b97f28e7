//! # herald-core
//!
//! Core traits for the Herald in-process event dispatcher.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that defines events, listeners or containers without depending on the
//! registry implementation in `herald-std`.
//!
//! # Building Blocks
//!
//! ## Events ([`EventType`], [`Event`])
//!
//! An event is a plain value that describes its own type statically: its
//! [`TypeKey`], its ancestors (nearest first) and the capability sets it
//! implements. Ancestors are embedded by composition and exposed as typed
//! views, so a listener for a parent type can observe a descendant event.
//! Events may expose the [`StoppableEvent`] capability to halt delivery.
//!
//! ## Listeners ([`Listener`])
//!
//! Type-erased invocable units taking `&mut dyn Event`. Each listener reports
//! a [`Signature`], which stands in for the declared parameter type when the
//! registry infers which event type a listener targets.
//!
//! ## Services and Containers ([`Service`], [`Container`])
//!
//! Objects that are not directly invocable are materialized into listeners
//! through a container lookup and either a default call capability or a named
//! method.
//!
//! ## Providers ([`ListenerProvider`])
//!
//! Anything that yields the ordered listener sequence for an event. The
//! dispatcher in `herald-std` is generic over it.
//!
//! # Error Types
//!
//! - [`RegistrationError`] - Top-level registration error
//! - [`IncorrectListener`] - Structural listener problems
//! - [`ContainerError`] - Container lookup failures
//! - [`DeliveryError`] - Adapter failures during dispatch

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod container;
mod error;
mod event;
mod key;
mod listener;
mod outcome;
mod provider;

// Re-exports
pub use container::{Container, Service};
pub use error::{BoxError, ContainerError, DeliveryError, IncorrectListener, RegistrationError};
pub use event::{Capability, Event, EventType, StoppableEvent};
pub use key::TypeKey;
pub use listener::{
    Listener, ListenerFn, MethodListener, NullaryFn, Signature, UntypedFn, bind,
};
pub use outcome::IntoOutcome;
pub use provider::ListenerProvider;
