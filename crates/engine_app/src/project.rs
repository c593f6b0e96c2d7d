//! Project directory loading.
//!
//! A project is a directory holding `resource.config.json` (the resource
//! manifest), `application.config.json` and the scene files the manifest
//! points at.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use engine_core::{AppConfig, ComponentRegistry, Engine, FileConfig, ProjectResolver, ResourceManager};
use tracing::debug;

/// Manifest file name.
pub const MANIFEST_FILE: &str = "resource.config.json";
/// Application config file name.
pub const APP_CONFIG_FILE: &str = "application.config.json";

/// A loaded project directory.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    manifest: FileConfig,
    app: AppConfig,
}

impl Project {
    /// Read both config files under `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let manifest = FileConfig::from_path(root.join(MANIFEST_FILE))
            .with_context(|| format!("loading manifest of project {}", root.display()))?;
        let app = AppConfig::from_path(root.join(APP_CONFIG_FILE))
            .with_context(|| format!("loading app config of project {}", root.display()))?;
        debug!(project = %root.display(), start_scene = %app.start_scene, "project opened");
        Ok(Self {
            root,
            manifest,
            app,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn manifest(&self) -> &FileConfig {
        &self.manifest
    }

    /// The scene to install first: `requested` if given, else the app
    /// config's start scene.
    #[must_use]
    pub fn start_scene<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.app.start_scene)
    }

    /// Build an engine whose resource manager resolves this project's
    /// manifest through `registry`.
    #[must_use]
    pub fn engine(&self, registry: ComponentRegistry) -> Engine {
        let resources = ResourceManager::new();
        resources.initialize(&self.manifest, &ProjectResolver::new(self.root.clone(), registry));
        Engine::new(Arc::new(resources))
    }
}
