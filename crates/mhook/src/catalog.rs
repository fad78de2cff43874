//! Named handlers for settings-driven registration.
//!
//! Settings files can only refer to handlers by name. A [`HandlerCatalog`]
//! maps those names to the handlers the host application provides.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::handler::Handler;

/// Name → handler lookup table.
#[derive(Default, Clone)]
pub struct HandlerCatalog {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Add a handler under `name`, replacing any previous entry.
    pub fn insert<H: Handler + 'static>(&mut self, name: impl Into<String>, handler: H) -> &mut Self {
        self.insert_shared(name, Arc::new(handler))
    }

    /// Add an already shared handler under `name`.
    pub fn insert_shared(&mut self, name: impl Into<String>, handler: Arc<dyn Handler>) -> &mut Self {
        let name = name.into();
        if self.handlers.insert(name.clone(), handler).is_some() {
            debug!(name = %name, "replaced catalog handler");
        }
        self
    }

    /// Handler registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(name).cloned()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerCatalog")
            .field("names", &self.names())
            .finish()
    }
}
