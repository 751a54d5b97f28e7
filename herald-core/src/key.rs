//! Type keys identifying event types and capability sets.

use std::{borrow::Borrow, borrow::Cow, fmt};

/// String identifier for an event's concrete type, one of its ancestors, or a
/// capability set it implements.
///
/// Keys built with [`TypeKey::from_static`] are usable in `const` position,
/// which is how [`EventType::KEY`] and [`Capability::KEY`] are declared.
///
/// [`EventType::KEY`]: crate::EventType::KEY
/// [`Capability::KEY`]: crate::Capability::KEY
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Cow<'static, str>);

impl TypeKey {
    /// Create a key from a static string.
    pub const fn from_static(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }

    /// Create a key from an owned string, e.g. one read from configuration.
    pub fn new(key: impl Into<String>) -> Self {
        Self(Cow::Owned(key.into()))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl Borrow<str> for TypeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TypeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TypeKey {
    fn from(key: &'static str) -> Self {
        Self::from_static(key)
    }
}

impl From<String> for TypeKey {
    fn from(key: String) -> Self {
        Self(Cow::Owned(key))
    }
}

impl PartialEq<str> for TypeKey {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TypeKey {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn static_and_owned_keys_are_equal() {
        let a = TypeKey::from_static("app::PostAdded");
        let b = TypeKey::new(String::from("app::PostAdded"));
        assert_eq!(a, b);
        assert_eq!(a, "app::PostAdded");
    }

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(TypeKey::from_static("app::PostAdded"), 1);
        assert_eq!(map.get("app::PostAdded"), Some(&1));
    }

    #[test]
    fn debug_is_quoted() {
        assert_eq!(format!("{:?}", TypeKey::from("a")), "\"a\"");
        assert_eq!(TypeKey::from("a").to_string(), "a");
    }
}
