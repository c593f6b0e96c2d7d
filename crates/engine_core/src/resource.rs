//! Identifier → lazily-loaded payload cache.
//!
//! The [`ResourceManager`] is built from a manifest at startup and never
//! evicts. Each resource is fetched at most once on the happy path; after a
//! successful load every caller receives the same cached [`Payload`].
//!
//! Failed loads are *not* cached. The next `load` for that id runs the
//! loader again, and two loads that start before either finishes both run
//! it: there is no in-flight de-duplication.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, error};

use crate::config::{FileConfig, ResourceKind, SceneConfig};
use crate::error::EngineError;
use crate::loader::{Loader, Payload, PathResolver};
use crate::registry::ComponentFactory;

enum ResourceState {
    /// Not fetched yet. `None` when no loader exists for the manifest path.
    Pending(Option<Loader>),
    Loaded(Payload),
}

struct Resource {
    kind: ResourceKind,
    state: ResourceState,
}

/// Caches resources by identifier.
#[derive(Default)]
pub struct ResourceManager {
    resources: DashMap<String, Resource>,
}

impl ResourceManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every manifest entry as an unloaded resource.
    ///
    /// Each entry's loader is looked up by lower-cased path in the table the
    /// resolver produces. An entry without a loader is still registered; it
    /// fails when loaded.
    pub fn initialize(&self, manifest: &FileConfig, resolver: &impl PathResolver) {
        let loaders = resolver.resolve(manifest);
        for file in &manifest.files {
            let loader = loaders.get(&file.path);
            if loader.is_none() {
                debug!(id = %file.id, path = %file.path, "no loader for resource path");
            }
            self.resources.insert(
                file.id.clone(),
                Resource {
                    kind: file.kind,
                    state: ResourceState::Pending(loader),
                },
            );
        }
        debug!(count = self.resources.len(), "resource manager initialised");
    }

    /// Returns `true` if `id` is in the manifest. Does not load anything.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.resources.contains_key(id)
    }

    /// Returns `true` if `id` has been loaded successfully.
    #[must_use]
    pub fn is_loaded(&self, id: &str) -> bool {
        self.resources
            .get(id)
            .is_some_and(|r| matches!(r.state, ResourceState::Loaded(_)))
    }

    /// The declared kind of `id`.
    #[must_use]
    pub fn kind(&self, id: &str) -> Option<ResourceKind> {
        self.resources.get(id).map(|r| r.kind)
    }

    /// Number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if no resource is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Load a resource, fetching it on first use.
    ///
    /// Returns `None` (and logs) when `id` is unknown, has no loader, or its
    /// loader fails.
    pub async fn load(&self, id: &str) -> Option<Payload> {
        let loader = {
            let Some(resource) = self.resources.get(id) else {
                error!("Couldn't load resource: ({id})");
                return None;
            };
            match &resource.state {
                ResourceState::Loaded(payload) => return Some(payload.clone()),
                ResourceState::Pending(Some(loader)) => Arc::clone(loader),
                ResourceState::Pending(None) => {
                    error!("Couldn't load resource: ({id})");
                    return None;
                }
            }
        };

        // The map guard is released here; other loads may run meanwhile.
        match loader().await {
            Ok(payload) => {
                let Some(mut resource) = self.resources.get_mut(id) else {
                    return Some(payload);
                };
                // A concurrent load may have landed first. Keep its payload so
                // every caller shares one value.
                if let ResourceState::Loaded(existing) = &resource.state {
                    return Some(existing.clone());
                }
                resource.state = ResourceState::Loaded(payload.clone());
                debug!(id, kind = %resource.kind, "resource loaded");
                Some(payload)
            }
            Err(err) => {
                let cause = format!("{err:#}");
                error!(id, error = %cause, "Couldn't import file data {id}.");
                None
            }
        }
    }

    /// Load a scene description.
    pub async fn load_scene(&self, id: &str) -> Option<Arc<SceneConfig>> {
        match self.load(id).await? {
            Payload::Scene(scene) => Some(scene),
            Payload::Component(_) => {
                let err = EngineError::ResourceKind {
                    id: id.to_string(),
                    expected: "scene",
                };
                error!(error = %err, "Couldn't load resource: ({id})");
                None
            }
        }
    }

    /// Load a component constructor.
    pub async fn load_component(&self, id: &str) -> Option<ComponentFactory> {
        match self.load(id).await? {
            Payload::Component(factory) => Some(factory),
            Payload::Scene(_) => {
                let err = EngineError::ResourceKind {
                    id: id.to_string(),
                    expected: "component",
                };
                error!(error = %err, "Couldn't load resource: ({id})");
                None
            }
        }
    }
}

impl std::fmt::Debug for ResourceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceManager")
            .field("resources", &self.resources.len())
            .finish()
    }
}
