//! Worlds: the entities of one running scene.
//!
//! A [`World`] keeps its entities in two buckets, like an entity keeps its
//! components. Only entities live at the start of a frame are updated that
//! frame; entities added through [`World::add_entities`] (or spawned by a
//! component) join on the next [`World::update`]. Removals are flagged with
//! `Entity::destroy` and processed at the end of the frame, so a flagged
//! entity can still be referenced until then.
//!
//! An inactive world is frozen: `update` does nothing at all.
//!
//! Components see the world through a [`WorldView`]: names and transforms
//! of the live entities, captured before the entities are driven.

use std::sync::Arc;

use engine_math::Transform3D;
use futures::future::join_all;
use tracing::{debug, error, trace, warn};

use crate::config::SceneConfig;
use crate::context::WorldRequests;
use crate::engine::Engine;
use crate::entity::{Entity, EntityId, parse_entity_from_config};
use crate::render::{RenderContext, SceneView};

/// Per-frame data from the render loop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameState {
    /// Frames rendered before this one.
    pub frame: u64,
    /// Seconds since the loop started.
    pub elapsed: f64,
}

/// What a component can see of another live entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySummary {
    pub id: EntityId,
    pub name: String,
    pub transform: Transform3D,
}

/// Read-only snapshot of a world's live entities.
#[derive(Debug, Clone, Default)]
pub struct WorldView {
    entities: Vec<EntitySummary>,
}

impl WorldView {
    pub(crate) fn capture(entities: &[Entity]) -> Self {
        let entities = entities
            .iter()
            .map(|entity| EntitySummary {
                id: entity.id(),
                name: entity.name().to_owned(),
                transform: *entity.transform(),
            })
            .collect();
        Self { entities }
    }

    /// Entities called `name`, in insertion order.
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a EntitySummary> {
        self.entities.iter().filter(move |entity| entity.name == name)
    }

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&EntitySummary> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntitySummary> {
        self.entities.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// The entities of one scene.
pub struct World {
    /// Whether the world updates. An inactive world stays mounted but frozen.
    pub active: bool,
    current: Vec<Entity>,
    future: Vec<Entity>,
    render: Option<Arc<dyn RenderContext>>,
    scene_request: Option<String>,
}

impl World {
    /// Create an active world whose entities are live immediately.
    #[must_use]
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            active: true,
            current: entities,
            future: Vec::new(),
            render: None,
            scene_request: None,
        }
    }

    /// Bind the world to the render scene graph.
    ///
    /// A world is linked once. Later calls are ignored with a warning and
    /// return `false`.
    pub fn link_render_context(&mut self, render: Arc<dyn RenderContext>) -> bool {
        if self.render.is_some() {
            warn!("world is already linked to a render context");
            return false;
        }
        self.render = Some(render);
        true
    }

    /// Returns `true` once a render context is linked.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.render.is_some()
    }

    /// Link, attach every live entity, and start the world.
    pub fn mount(&mut self, render: Arc<dyn RenderContext>) {
        if self.link_render_context(render) {
            if let Some(render) = &self.render {
                for entity in &self.current {
                    render.attach(entity);
                }
            }
        }
        self.start();
    }

    /// Start every live entity.
    pub fn start(&mut self) {
        let view = WorldView::capture(&self.current);
        let mut requests = WorldRequests::default();
        for entity in &mut self.current {
            requests.merge(entity.start_in(&view));
        }
        self.apply(requests);
    }

    /// Run one frame: merge pending entities, update live ones, then remove
    /// the ones marked for destruction.
    pub fn update(&mut self, frame: &FrameState, delta: f64) {
        if !self.active {
            return;
        }
        trace!(frame = frame.frame, delta, entities = self.current.len(), "world update");

        for entity in std::mem::take(&mut self.future) {
            if let Some(render) = &self.render {
                render.attach(&entity);
            }
            self.current.push(entity);
        }

        let view = WorldView::capture(&self.current);
        let mut requests = WorldRequests::default();
        for entity in &mut self.current {
            requests.merge(entity.update_in(delta, &view));
        }
        self.apply(requests);

        self.cleanup();
    }

    /// Queue entities to join the world on the next update.
    pub fn add_entities(&mut self, entities: impl IntoIterator<Item = Entity>) {
        self.future.extend(entities);
    }

    /// Live entities called `name`. Pending entities are not searched.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Vec<&Entity> {
        self.current
            .iter()
            .filter(|entity| entity.name() == name)
            .collect()
    }

    /// The live entity with `id`.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.current.iter().find(|entity| entity.id() == id)
    }

    /// Mutable access to the live entity with `id`.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.current.iter_mut().find(|entity| entity.id() == id)
    }

    /// Live entities, in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.current.iter()
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Returns `true` if no entity is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Number of entities waiting for the next update.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.future.len()
    }

    /// Take the latest scene change a component asked for.
    pub fn take_scene_request(&mut self) -> Option<String> {
        self.scene_request.take()
    }

    /// The renderable view of this world.
    #[must_use]
    pub fn view(&self) -> SceneView<'_> {
        SceneView::new(self)
    }

    /// Dispose every entity, live and pending, and detach the live ones
    /// from the render scene graph.
    pub fn dispose(&mut self) {
        debug!(
            live = self.current.len(),
            pending = self.future.len(),
            "disposing world"
        );
        for mut entity in self.current.drain(..) {
            entity.dispose();
            if let Some(render) = &self.render {
                render.detach(&entity);
            }
        }
        for mut entity in self.future.drain(..) {
            entity.dispose();
        }
    }

    fn apply(&mut self, requests: WorldRequests) {
        let WorldRequests {
            spawn,
            destroy_named,
            change_scene,
        } = requests;
        self.add_entities(spawn);
        for name in &destroy_named {
            for entity in self.current.iter_mut().filter(|e| e.name() == name) {
                entity.destroy();
            }
        }
        if change_scene.is_some() {
            self.scene_request = change_scene;
        }
    }

    fn cleanup(&mut self) {
        let mut index = 0;
        while index < self.current.len() {
            if self.current[index].will_destroy() {
                let mut entity = self.current.remove(index);
                entity.dispose();
                if let Some(render) = &self.render {
                    render.detach(&entity);
                }
            } else {
                index += 1;
            }
        }
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("active", &self.active)
            .field("current", &self.current)
            .field("future", &self.future)
            .field("linked", &self.render.is_some())
            .finish()
    }
}

/// Build a world from a scene description, parsing every entity
/// concurrently.
///
/// An entity that fails to parse is logged once and left out; the rest of
/// the scene still loads.
pub async fn parse_world_from_config(config: &SceneConfig, engine: &Engine) -> World {
    let results = join_all(
        config
            .entities
            .iter()
            .map(|entry| parse_entity_from_config(entry, engine)),
    )
    .await;

    let mut entities = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(entity) => entities.push(entity),
            Err(err) => error!(error = %err, "Couldn't load entity."),
        }
    }
    World::new(entities)
}
