//! Lazy resource loaders and the path resolver that produces them.
//!
//! The [`ResourceManager`](crate::ResourceManager) never touches the file
//! system itself. At initialisation it asks a [`PathResolver`] for a
//! [`LoaderTable`]: a map from lower-cased project path to a [`Loader`], a
//! closure returning a future that produces the resource [`Payload`].

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use futures::future::BoxFuture;
use tracing::debug;

use crate::config::{FileConfig, ResourceKind, SceneConfig};
use crate::registry::{ComponentFactory, ComponentRegistry};

/// A resolved resource.
#[derive(Clone)]
pub enum Payload {
    /// A parsed scene description.
    Scene(Arc<SceneConfig>),
    /// A component script constructor.
    Component(ComponentFactory),
}

impl Payload {
    /// The kind of resource this payload is.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Scene(_) => ResourceKind::Scene,
            Self::Component(_) => ResourceKind::Component,
        }
    }
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scene(scene) => f
                .debug_struct("Scene")
                .field("entities", &scene.entities.len())
                .finish(),
            Self::Component(_) => f.write_str("Component(..)"),
        }
    }
}

/// Future returned by a [`Loader`].
pub type LoadFuture = BoxFuture<'static, anyhow::Result<Payload>>;

/// A lazily-invoked resource loader.
pub type Loader = Arc<dyn Fn() -> LoadFuture + Send + Sync>;

/// Wrap an async closure as a [`Loader`].
pub fn loader_fn<F, Fut>(f: F) -> Loader
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Payload>> + Send + 'static,
{
    Arc::new(move || -> LoadFuture { Box::pin(f()) })
}

/// Loaders keyed by lower-cased project path.
#[derive(Clone, Default)]
pub struct LoaderTable {
    loaders: HashMap<String, Loader>,
}

impl LoaderTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `loader` to `path`. The path is lower-cased.
    pub fn insert(&mut self, path: &str, loader: Loader) {
        self.loaders.insert(path.to_lowercase(), loader);
    }

    /// Builder form of [`LoaderTable::insert`].
    #[must_use]
    pub fn with(mut self, path: &str, loader: Loader) -> Self {
        self.insert(path, loader);
        self
    }

    /// Look up the loader for `path`, ignoring case.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Loader> {
        self.loaders.get(&path.to_lowercase()).cloned()
    }

    /// Number of bound paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// Returns `true` if no path is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl std::fmt::Debug for LoaderTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.loaders.keys()).finish()
    }
}

/// Turns a manifest into loaders.
pub trait PathResolver {
    /// Produce a loader for every manifest path this resolver can serve.
    fn resolve(&self, manifest: &FileConfig) -> LoaderTable;
}

/// A prebuilt table resolves to itself.
impl PathResolver for LoaderTable {
    fn resolve(&self, _manifest: &FileConfig) -> LoaderTable {
        self.clone()
    }
}

/// Resolves scene files under a project directory and component scripts
/// through a [`ComponentRegistry`].
#[derive(Debug, Clone)]
pub struct ProjectResolver {
    root: PathBuf,
    registry: ComponentRegistry,
}

impl ProjectResolver {
    /// Create a resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, registry: ComponentRegistry) -> Self {
        Self {
            root: root.into(),
            registry,
        }
    }

    /// The project directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scene_file(&self, path: &str) -> PathBuf {
        // Manifest paths are project-absolute ("/scenes/main.json").
        self.root.join(path.trim_start_matches(['/', '\\']))
    }
}

impl PathResolver for ProjectResolver {
    fn resolve(&self, manifest: &FileConfig) -> LoaderTable {
        let mut table = LoaderTable::new();
        for file in &manifest.files {
            match file.kind {
                ResourceKind::Scene => {
                    let scene_file = self.scene_file(&file.path);
                    if scene_file.is_file() {
                        table.insert(&file.path, scene_loader(scene_file));
                    } else {
                        debug!(path = %file.path, "no scene file on disk");
                    }
                }
                ResourceKind::Component => match self.registry.get(&file.path) {
                    Some(factory) => table.insert(&file.path, component_loader(factory)),
                    None => debug!(path = %file.path, "no script registered for path"),
                },
            }
        }
        table
    }
}

/// A loader that reads and parses a scene file.
#[must_use]
pub fn scene_loader(file: PathBuf) -> Loader {
    loader_fn(move || {
        let file = file.clone();
        async move {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let scene: SceneConfig = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", file.display()))?;
            Ok(Payload::Scene(Arc::new(scene)))
        }
    })
}

/// A loader that hands out a registered component constructor.
#[must_use]
pub fn component_loader(factory: ComponentFactory) -> Loader {
    loader_fn(move || {
        let factory = Arc::clone(&factory);
        async move { Ok(Payload::Component(factory)) }
    })
}
