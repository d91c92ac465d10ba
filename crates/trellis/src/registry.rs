//! Named handler lookup.

use std::collections::HashMap;

use tracing::{debug, warn};

/// A name to handler map, owned by whoever builds the scene.
///
/// Loaders refer to handlers by name (for example a node's `on_click`); the
/// registry turns those names into values at dispatch time.
#[derive(Debug, Clone)]
pub struct Registry<H> {
    /// Registered handlers.
    handlers: HashMap<String, H>,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<H> Registry<H> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, returning any handler it replaced.
    pub fn register(&mut self, name: impl Into<String>, handler: H) -> Option<H> {
        let name = name.into();
        let prev = self.handlers.insert(name.clone(), handler);
        if prev.is_some() {
            warn!(name = %name, "handler replaced");
        } else {
            debug!(name = %name, "handler registered");
        }
        prev
    }

    /// Look up a handler.
    pub fn get(&self, name: &str) -> Option<&H> {
        self.handlers.get(name)
    }

    /// Look up a handler mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut H> {
        self.handlers.get_mut(name)
    }

    /// Remove a handler.
    pub fn remove(&mut self, name: &str) -> Option<H> {
        self.handlers.remove(name)
    }

    /// Is a handler registered under this name?
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

    /// Is the registry empty?
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_replace() {
        let mut r: Registry<u32> = Registry::new();
        assert_eq!(r.register("a", 1), None);
        assert_eq!(r.register("b", 2), None);
        assert_eq!(r.register("a", 3), Some(1));
        assert_eq!(r.get("a"), Some(&3));
        assert_eq!(r.names(), vec!["a", "b"]);
        assert_eq!(r.remove("b"), Some(2));
        assert!(!r.contains("b"));
        assert_eq!(r.len(), 1);
    }
}
