//! # herald-std
//!
//! Standard implementations for the Herald event dispatcher.
//!
//! This crate provides:
//! - **Resolution**: [`ListenerRef`], [`Resolver`]
//! - **Registry**: [`Registry`], ordered by type hierarchy and priority
//! - **Dispatch**: [`Dispatcher`], with stop-propagation
//! - **Configuration**: [`RegistryConfig`], [`ListenerBinding`]
//! - **Containers**: [`ServiceMap`]
//! - **Collection**: `CollectedListener` (feature `inventory`)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use herald_core;

mod config;
mod container;
mod dispatcher;
mod registry;
mod resolver;

#[cfg(feature = "inventory")]
mod collected;

pub mod testing;

pub use config::{DEFAULT_PRIORITY, ListenerBinding, ListenerDecl, RegistryConfig};
pub use container::ServiceMap;
pub use dispatcher::Dispatcher;
pub use registry::{ListenerIter, Registry};
pub use resolver::{ListenerRef, Resolved, Resolver};

#[cfg(feature = "inventory")]
pub use collected::{CollectedListener, collected_listeners};
#[cfg(feature = "inventory")]
pub use inventory;
