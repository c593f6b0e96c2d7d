//! Scene transitions.

use std::sync::Arc;

use tracing::{error, info};

use crate::engine::Engine;
use crate::event::EventHandler;
use crate::render::{RenderContext, SceneView};
use crate::world::{World, parse_world_from_config};

/// Holds the live [`World`] and swaps it on scene changes.
pub struct WorldManager {
    engine: Engine,
    world: Option<World>,
    render: Option<Arc<dyn RenderContext>>,
    scene_id: Option<String>,
    /// Fired after every successful scene change, with the new scene id.
    pub on_scene_change: EventHandler<WorldManager, String>,
}

impl WorldManager {
    /// Create a manager with no scene.
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            world: None,
            render: None,
            scene_id: None,
            on_scene_change: EventHandler::new(),
        }
    }

    /// Mount every installed world on `render`.
    #[must_use]
    pub fn with_render_context(mut self, render: Arc<dyn RenderContext>) -> Self {
        self.render = Some(render);
        self
    }

    /// The engine handed to parsed entities.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Load `scene_id`, replace the current world with it and notify
    /// listeners.
    ///
    /// Returns `false` if the scene can't be loaded; the current world is
    /// then left untouched.
    ///
    /// The new scene is loaded and parsed, including every component's
    /// `initialize`, before the old world is disposed. Initializers must not
    /// rely on the previous scene being gone.
    pub async fn change_scene(&mut self, scene_id: &str) -> bool {
        match self.prepare_scene(scene_id).await {
            Some(world) => {
                self.install_scene(scene_id, world);
                true
            }
            None => false,
        }
    }

    /// Load and parse `scene_id` without touching the current world.
    ///
    /// The returned world is not started.
    pub async fn prepare_scene(&self, scene_id: &str) -> Option<World> {
        load_world(&self.engine, scene_id).await
    }

    /// Dispose the current world, then mount (or start) `world` in its place
    /// and notify listeners.
    pub fn install_scene(&mut self, scene_id: &str, mut world: World) {
        if let Some(mut previous) = self.world.take() {
            previous.dispose();
        }

        match &self.render {
            Some(render) => world.mount(Arc::clone(render)),
            None => world.start(),
        }
        info!(scene = scene_id, entities = world.len(), "scene installed");

        self.world = Some(world);
        self.scene_id = Some(scene_id.to_owned());
        self.on_scene_change.notify(self, &scene_id.to_owned());
    }

    /// The live world, if a scene is installed.
    #[must_use]
    pub fn get_world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// Mutable access to the live world.
    pub fn get_world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    /// The renderable view of the live world.
    #[must_use]
    pub fn get_scene(&self) -> Option<SceneView<'_>> {
        self.world.as_ref().map(World::view)
    }

    /// Id of the installed scene.
    #[must_use]
    pub fn current_scene(&self) -> Option<&str> {
        self.scene_id.as_deref()
    }
}

impl std::fmt::Debug for WorldManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldManager")
            .field("scene_id", &self.scene_id)
            .field("world", &self.world)
            .field("listeners", &self.on_scene_change.len())
            .finish_non_exhaustive()
    }
}

/// Load the scene `scene_id` and parse it into an unstarted world.
///
/// Only needs the engine, so a caller can run it while the current world
/// keeps ticking.
pub async fn load_world(engine: &Engine, scene_id: &str) -> Option<World> {
    info!(scene = scene_id, "changing scene");
    let Some(config) = engine.resources().load_scene(scene_id).await else {
        error!(scene = scene_id, "Failed to load world config {scene_id}");
        return None;
    };
    Some(parse_world_from_config(&config, engine).await)
}
