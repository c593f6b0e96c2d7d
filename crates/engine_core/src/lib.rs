//! # engine_core
//!
//! Scene, entity and component lifecycle for the scene engine.
//!
//! This crate provides:
//!
//! - [`ResourceManager`] — identifier → lazily loaded, memoised payloads.
//! - [`Component`] — the capability contract every script implements.
//! - [`Entity`] — a scene node owning components in two buckets.
//! - [`World`] — the entities of one scene, updated once per frame.
//! - [`WorldManager`] — loads scenes and swaps worlds.
//! - [`EventHandler`] — typed publish/subscribe.
//!
//! Nothing here renders. A [`RenderContext`] is told when entities join or
//! leave the scene graph.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use engine_core::{ComponentRegistry, Engine, FileConfig, ProjectResolver, ResourceManager, WorldManager};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let manifest = FileConfig::from_path("demos/basic/resource.config.json")?;
//! let resources = ResourceManager::new();
//! resources.initialize(&manifest, &ProjectResolver::new("demos/basic", ComponentRegistry::new()));
//!
//! let mut manager = WorldManager::new(Engine::new(Arc::new(resources)));
//! manager.change_scene("main").await;
//! # Ok(())
//! # }
//! ```

pub mod component;
pub mod config;
pub mod context;
pub mod engine;
pub mod entity;
pub mod error;
pub mod event;
pub mod input;
pub mod loader;
pub mod registry;
pub mod render;
pub mod resource;
pub mod world;
pub mod world_manager;

#[cfg(test)]
mod test_support;

pub use component::{Component, ComponentSlot, parse_component_from_config};
pub use config::{
    AppConfig, ComponentConfig, EntityConfig, FileConfig, FileResource, ResourceKind, SceneConfig,
};
pub use context::{ComponentContext, WorldRequests};
pub use engine::Engine;
pub use entity::{Entity, EntityId, NodeKind, SceneNode, parse_entity_from_config};
pub use error::EngineError;
pub use event::{EventHandler, Listener};
pub use input::{CanvasBounds, InputManager};
pub use loader::{
    LoadFuture, Loader, LoaderTable, PathResolver, Payload, ProjectResolver, component_loader,
    loader_fn, scene_loader,
};
pub use registry::{ComponentFactory, ComponentRegistry};
pub use render::{RenderContext, RenderNode, SceneView};
pub use resource::ResourceManager;
pub use world::{EntitySummary, FrameState, World, WorldView, parse_world_from_config};
pub use world_manager::{WorldManager, load_world};
