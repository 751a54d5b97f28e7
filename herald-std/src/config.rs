//! Registry configuration.
//!
//! Everything here deserializes with `serde`, so listener wiring can live in
//! a configuration file:
//!
//! ```json
//! {
//!     "infer_event_type": true,
//!     "default_priority": 100,
//!     "listeners": [
//!         { "listener": "mailer" },
//!         { "listener": ["audit", "on_post_added"], "priority": 500 },
//!         { "listener": ["audit", "on_any"], "event": "app::PostAdded" }
//!     ]
//! }
//! ```

use crate::resolver::ListenerRef;
use herald_core::TypeKey;
use serde::{
    Deserialize, Deserializer,
    de::{self, SeqAccess, Visitor},
};
use std::fmt;

/// Priority used when none is given. Higher priorities are delivered first.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Options for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Infer each listener's target event type from its signature.
    pub infer_event_type: bool,
    /// Priority used by registrations that do not specify one.
    pub default_priority: i32,
    /// Listeners registered when the registry is built from this config.
    pub listeners: Vec<ListenerBinding>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            infer_event_type: true,
            default_priority: DEFAULT_PRIORITY,
            listeners: Vec::new(),
        }
    }
}

impl RegistryConfig {
    /// Enable or disable event type inference.
    pub fn with_inference(mut self, enabled: bool) -> Self {
        self.infer_event_type = enabled;
        self
    }

    /// Set the default priority.
    pub fn with_default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }

    /// Add a declared listener.
    pub fn with_listener(mut self, binding: ListenerBinding) -> Self {
        self.listeners.push(binding);
        self
    }
}

/// A declared listener registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListenerBinding {
    /// What to register.
    pub listener: ListenerDecl,
    /// Priority; the registry default when absent.
    #[serde(default)]
    pub priority: Option<i32>,
    /// Explicit event key, registered in addition to any inferred one.
    #[serde(default)]
    pub event: Option<String>,
}

impl ListenerBinding {
    /// Declare `listener` with default priority and no explicit key.
    pub fn new(listener: impl Into<ListenerDecl>) -> Self {
        Self {
            listener: listener.into(),
            priority: None,
            event: None,
        }
    }

    /// Set the priority.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the explicit event key.
    pub fn event(mut self, key: impl Into<String>) -> Self {
        self.event = Some(key.into());
        self
    }

    pub(crate) fn event_key(&self) -> Option<TypeKey> {
        self.event.clone().map(TypeKey::from)
    }
}

/// A listener as it can be written in configuration.
///
/// A string is a container key, a list of strings is an `[id, method]` pair.
/// Any other value is kept as [`ListenerDecl::Unsupported`] and rejected when
/// registered, so a bad entry fails registration rather than parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerDecl {
    /// Container key of an invocable service.
    Service(String),
    /// `[id, method]`; must have exactly two elements to register.
    Parts(Vec<String>),
    /// Description of a value that cannot describe a listener.
    Unsupported(String),
}

impl From<&str> for ListenerDecl {
    fn from(id: &str) -> Self {
        Self::Service(id.to_owned())
    }
}

impl From<(&str, &str)> for ListenerDecl {
    fn from((id, method): (&str, &str)) -> Self {
        Self::Parts(vec![id.to_owned(), method.to_owned()])
    }
}

impl From<ListenerDecl> for ListenerRef {
    fn from(decl: ListenerDecl) -> Self {
        match decl {
            ListenerDecl::Service(id) => ListenerRef::Service(id),
            ListenerDecl::Parts(parts) => ListenerRef::Parts(parts),
            ListenerDecl::Unsupported(what) => ListenerRef::Unsupported(what),
        }
    }
}

impl<'de> Deserialize<'de> for ListenerDecl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ListenerDeclVisitor)
    }
}

struct ListenerDeclVisitor;

impl<'de> Visitor<'de> for ListenerDeclVisitor {
    type Value = ListenerDecl;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a container key or an [id, method] pair")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ListenerDecl::Service(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ListenerDecl::Service(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut parts = Vec::new();
        let mut unsupported = false;
        while let Some(part) = seq.next_element::<ListenerDecl>()? {
            match part {
                ListenerDecl::Service(part) => parts.push(part),
                ListenerDecl::Parts(_) | ListenerDecl::Unsupported(_) => unsupported = true,
            }
        }
        if unsupported {
            return Ok(ListenerDecl::Unsupported("list with non-string elements".to_owned()));
        }
        Ok(ListenerDecl::Parts(parts))
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map
            .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
            .is_some()
        {}
        Ok(ListenerDecl::Unsupported("map".to_owned()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(ListenerDecl::Unsupported(format!("boolean `{v}`")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ListenerDecl::Unsupported(format!("integer `{v}`")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ListenerDecl::Unsupported(format!("integer `{v}`")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(ListenerDecl::Unsupported(format!("float `{v}`")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ListenerDecl::Unsupported("null".to_owned()))
    }
}
