//! Static registration of component scripts.
//!
//! Scene manifests point component ids at script paths. Scripts are compiled
//! into the binary, so each path is bound at startup to a constructor.

use std::collections::HashMap;
use std::sync::Arc;

use crate::component::Component;
use crate::engine::Engine;

/// Constructs a fresh, uninitialised component.
pub type ComponentFactory = Arc<dyn Fn(&Engine) -> Box<dyn Component> + Send + Sync>;

/// Script path → constructor table.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    factories: HashMap<String, ComponentFactory>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `path` (matched case-insensitively) to `factory`. A later
    /// registration for the same path replaces the earlier one.
    pub fn register<F>(&mut self, path: &str, factory: F) -> &mut Self
    where
        F: Fn(&Engine) -> Box<dyn Component> + Send + Sync + 'static,
    {
        self.factories.insert(path.to_lowercase(), Arc::new(factory));
        self
    }

    /// Bind `path` to `C::default()`.
    pub fn register_default<C>(&mut self, path: &str) -> &mut Self
    where
        C: Component + Default,
    {
        self.register(path, |_| Box::new(C::default()))
    }

    /// The constructor bound to `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<ComponentFactory> {
        self.factories.get(&path.to_lowercase()).cloned()
    }

    /// Number of registered scripts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}
