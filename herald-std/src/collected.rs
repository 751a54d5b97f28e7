//! Listeners declared anywhere in the program, collected with `inventory`.
//!
//! # Example
//!
//! ```rust,ignore
//! fn on_post_added(event: &mut PostAdded) {
//!     println!("post {} added", event.id);
//! }
//!
//! herald::inventory::submit! {
//!     CollectedListener::new("on_post_added", 500, || {
//!         ListenerRef::callable(ListenerFn::new(on_post_added))
//!     })
//! }
//!
//! let mut registry = Registry::new();
//! registry.register_collected()?;
//! ```

use crate::{registry::Registry, resolver::ListenerRef};
use herald_core::RegistrationError;

/// A listener submitted through [`inventory::submit!`].
///
/// Holds a constructor rather than the listener, since submitted items must
/// be const-constructible.
pub struct CollectedListener {
    /// Name for debugging and tie-breaking.
    pub name: &'static str,
    /// Priority (higher runs first).
    pub priority: i32,
    /// Builds the listener representation.
    pub listener: fn() -> ListenerRef,
}

impl CollectedListener {
    /// Create a new collected listener entry.
    pub const fn new(name: &'static str, priority: i32, listener: fn() -> ListenerRef) -> Self {
        Self {
            name,
            priority,
            listener,
        }
    }
}

inventory::collect!(CollectedListener);

/// All submitted listeners, by descending priority then name.
pub fn collected_listeners() -> Vec<&'static CollectedListener> {
    let mut entries: Vec<&CollectedListener> = inventory::iter::<CollectedListener>
        .into_iter()
        .collect();
    entries.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(b.name)));
    entries
}

impl Registry {
    /// Register every listener submitted with [`inventory::submit!`].
    ///
    /// Entries are registered in [`collected_listeners`] order, so equal
    /// priorities are delivered by name. Stops at the first failure.
    pub fn register_collected(&mut self) -> Result<(), RegistrationError> {
        for entry in collected_listeners() {
            #[cfg(feature = "tracing")]
            tracing::debug!(name = entry.name, priority = entry.priority, "collected listener");
            self.register((entry.listener)(), entry.priority, None)?;
        }
        Ok(())
    }
}
