//! A map-backed [`Container`].

use herald_core::{Container, ContainerError, Service};
use std::{collections::HashMap, fmt, sync::Arc};

/// A [`Container`] holding prebuilt services by key.
///
/// # Example
///
/// ```rust,ignore
/// let services = ServiceMap::new()
///     .with_service("mailer", Mailer::default())
///     .with_service("audit", AuditLog::default());
///
/// let registry = Registry::with_container(services);
/// ```
#[derive(Default, Clone)]
pub struct ServiceMap {
    services: HashMap<String, Arc<dyn Service>>,
}

impl ServiceMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `service` under `id` (builder style).
    pub fn with_service(mut self, id: impl Into<String>, service: impl Service) -> Self {
        self.insert(id, service);
        self
    }

    /// Add `service` under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<String>, service: impl Service) {
        self.insert_arc(id, Arc::new(service));
    }

    /// Add an already shared service under `id`.
    pub fn insert_arc(&mut self, id: impl Into<String>, service: Arc<dyn Service>) {
        self.services.insert(id.into(), service);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Container for ServiceMap {
    fn has(&self, id: &str) -> bool {
        self.services.contains_key(id)
    }

    fn get(&self, id: &str) -> Result<Arc<dyn Service>, ContainerError> {
        self.services
            .get(id)
            .cloned()
            .ok_or_else(|| ContainerError::NotFound(id.to_owned()))
    }
}

impl fmt::Debug for ServiceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.services.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("ServiceMap").field("services", &ids).finish()
    }
}
