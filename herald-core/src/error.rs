//! Error types for Herald.
//!
//! - [`RegistrationError`] - Top-level error returned when registering a listener
//! - [`IncorrectListener`] - Why a listener representation was rejected
//! - [`ContainerError`] - Failures reported by a [`Container`](crate::Container)
//! - [`DeliveryError`] - Failures raised by the built-in listener adapters
//!
//! Listener failures during dispatch are not wrapped: they travel to the
//! caller as the [`BoxError`] the listener returned.

use crate::key::TypeKey;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while registering a listener.
///
/// A failed registration never leaves a partial entry behind.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// The listener representation or its shape is invalid.
    #[error("incorrect listener: {0}")]
    IncorrectListener(#[from] IncorrectListener),

    /// A container-backed listener was supplied but no container is configured.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl RegistrationError {
    /// `true` for [`RegistrationError::IncorrectListener`].
    pub fn is_incorrect_listener(&self) -> bool {
        matches!(self, Self::IncorrectListener(_))
    }

    /// `true` for [`RegistrationError::InvalidConfiguration`].
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}

/// Reasons a listener representation is rejected.
#[derive(Error, Debug)]
pub enum IncorrectListener {
    /// The representation is not one the resolver understands.
    #[error("unsupported type of listener: {0}")]
    Unsupported(String),

    /// A declared `[id, method]` pair had the wrong number of elements.
    #[error("listener pairs must contain 2 elements, got {0}")]
    Arity(usize),

    /// The container has no entry for the key.
    #[error("could not find listener `{0}` in container")]
    NotFound(String),

    /// The container reported the key but failed to produce it.
    #[error("could not load listener `{id}` from container")]
    Lookup {
        /// Container key.
        id: String,
        /// Underlying container failure.
        #[source]
        source: ContainerError,
    },

    /// The resolved service has no default call capability.
    #[error("`{0}` is not invocable")]
    NotInvocable(String),

    /// The object has no listener method with that name.
    #[error("`{target}` has no listener method `{method}`")]
    NoSuchMethod {
        /// Object (or container key) the method was looked up on.
        target: String,
        /// Requested method name.
        method: String,
    },

    /// The listener declares no parameter to infer an event type from.
    #[error("event listener must accept an event")]
    NoParameters,

    /// The listener's parameter is not a particular event type.
    #[error("event listener must accept an event of a particular type")]
    UntypedParameter,

    /// Inference is disabled and no explicit event key was given.
    #[error("listener has no target event type")]
    NoTarget,
}

/// Errors reported by a [`Container`](crate::Container).
#[derive(Error, Debug)]
pub enum ContainerError {
    /// No entry exists for the key.
    #[error("no entry found for `{0}`")]
    NotFound(String),

    /// The entry exists but could not be produced.
    #[error("failed to build `{id}`")]
    Failed {
        /// Container key.
        id: String,
        /// Underlying failure.
        #[source]
        source: BoxError,
    },
}

/// Errors raised by the built-in listener adapters while handling an event.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// A typed listener received an event that has no view of its type.
    ///
    /// Only possible when a listener was registered under an explicit key
    /// unrelated to its parameter type.
    #[error("listener expects `{expected}` but received `{actual}`")]
    EventMismatch {
        /// The listener's parameter type.
        expected: TypeKey,
        /// The dispatched event's concrete type.
        actual: TypeKey,
    },
}
