//! The context handed to component callbacks.
//!
//! A [`ComponentContext`] lends a component its entity's transform and child
//! nodes, the shared [`Engine`], and a request buffer. Structural changes
//! (adding or removing components, spawning or destroying entities,
//! switching scenes) are recorded as requests and applied by the entity or
//! world once the callback returns, so no collection is mutated while it is
//! being iterated.
//!
//! Reads are snapshots taken just before the callback: the sibling
//! components of the entity and a [`WorldView`] of the world's live
//! entities. Requests made during the callback are not reflected in them.

use engine_math::Transform3D;

use crate::component::ComponentSlot;
use crate::engine::Engine;
use crate::entity::{Entity, EntityId, SceneNode};
use crate::input::InputManager;
use crate::resource::ResourceManager;
use crate::world::WorldView;

/// Requests the owning entity applies after a callback.
#[derive(Debug, Default)]
pub(crate) struct EntityRequests {
    pub(crate) add: Vec<ComponentSlot>,
    pub(crate) remove: Vec<String>,
    pub(crate) activate: Vec<(String, bool)>,
    pub(crate) destroy_entity: bool,
}

/// Requests that reach past the entity, applied by the world after its
/// update step.
#[derive(Debug, Default)]
pub struct WorldRequests {
    pub(crate) spawn: Vec<Entity>,
    pub(crate) destroy_named: Vec<String>,
    pub(crate) change_scene: Option<String>,
}

impl WorldRequests {
    /// Entities waiting to be added to the world.
    #[must_use]
    pub fn spawned(&self) -> &[Entity] {
        &self.spawn
    }

    /// Names whose entities should be destroyed.
    #[must_use]
    pub fn destroyed_names(&self) -> &[String] {
        &self.destroy_named
    }

    /// The most recent scene change request.
    #[must_use]
    pub fn scene_request(&self) -> Option<&str> {
        self.change_scene.as_deref()
    }

    /// Returns `true` if nothing was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spawn.is_empty() && self.destroy_named.is_empty() && self.change_scene.is_none()
    }

    pub(crate) fn merge(&mut self, other: WorldRequests) {
        self.spawn.extend(other.spawn);
        self.destroy_named.extend(other.destroy_named);
        if other.change_scene.is_some() {
            self.change_scene = other.change_scene;
        }
    }
}

/// Everything a single callback asked for.
#[derive(Debug, Default)]
pub(crate) struct Requests {
    pub(crate) entity: EntityRequests,
    pub(crate) world: WorldRequests,
}

/// What a component sees of its entity and the engine during a callback.
pub struct ComponentContext<'a> {
    key: &'static str,
    entity_id: EntityId,
    entity_name: &'a str,
    transform: &'a mut Transform3D,
    children: &'a mut Vec<SceneNode>,
    siblings: &'a [SiblingState],
    world: &'a WorldView,
    engine: &'a Engine,
    requests: &'a mut Requests,
}

impl<'a> ComponentContext<'a> {
    pub(crate) fn new(
        key: &'static str,
        entity: EntityParts<'a>,
        world: &'a WorldView,
        engine: &'a Engine,
        requests: &'a mut Requests,
    ) -> Self {
        Self {
            key,
            entity_id: entity.id,
            entity_name: entity.name,
            transform: entity.transform,
            children: entity.children,
            siblings: entity.siblings,
            world,
            engine,
            requests,
        }
    }

    /// Key of the component being called.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Id of the owning entity.
    #[must_use]
    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    /// Name of the owning entity.
    #[must_use]
    pub fn entity_name(&self) -> &str {
        self.entity_name
    }

    /// The owning entity's transform.
    #[must_use]
    pub fn transform(&self) -> &Transform3D {
        self.transform
    }

    /// Mutable access to the owning entity's transform.
    pub fn transform_mut(&mut self) -> &mut Transform3D {
        self.transform
    }

    /// The owning entity's child nodes.
    #[must_use]
    pub fn children(&self) -> &[SceneNode] {
        self.children
    }

    /// Mutable access to the owning entity's child nodes.
    pub fn children_mut(&mut self) -> &mut Vec<SceneNode> {
        self.children
    }

    /// Returns `true` if the entity holds a component with `key`, pending
    /// or live. The calling component counts.
    #[must_use]
    pub fn has_component(&self, key: &str) -> bool {
        self.siblings.iter().any(|s| s.key == key)
    }

    /// Returns `true` if the component with `key` is live on the entity.
    ///
    /// During `start`, every component of the same batch is already live.
    #[must_use]
    pub fn is_live(&self, key: &str) -> bool {
        self.siblings.iter().any(|s| s.key == key && s.live)
    }

    /// Keys of every component on the entity, live first.
    pub fn component_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.siblings.iter().map(|s| s.key)
    }

    /// The world's live entities as of the start of this step.
    ///
    /// Empty when the entity is driven outside a world.
    #[must_use]
    pub fn world(&self) -> &WorldView {
        self.world
    }

    /// The shared engine services.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        self.engine
    }

    /// Shortcut for `engine().resources()`.
    #[must_use]
    pub fn resources(&self) -> &ResourceManager {
        self.engine.resources()
    }

    /// Shortcut for `engine().input()`.
    #[must_use]
    pub fn input(&self) -> &InputManager {
        self.engine.input()
    }

    /// Add a sibling component. It starts on the entity's next update.
    pub fn add_component(&mut self, slot: ComponentSlot) {
        self.requests.entity.add.push(slot);
    }

    /// Mark the sibling with `key` (or this component) for removal.
    pub fn remove_component(&mut self, key: &str) {
        self.requests.entity.remove.push(key.to_string());
    }

    /// Enable or disable updates for the component with `key`.
    pub fn set_active(&mut self, key: &str, active: bool) {
        self.requests.entity.activate.push((key.to_string(), active));
    }

    /// Mark this component for removal.
    pub fn destroy(&mut self) {
        let key = self.key;
        self.remove_component(key);
    }

    /// Mark the owning entity for removal from its world.
    pub fn destroy_entity(&mut self) {
        self.requests.entity.destroy_entity = true;
    }

    /// Add a new entity to the world. It joins on the world's next update.
    pub fn spawn(&mut self, entity: Entity) {
        self.requests.world.spawn.push(entity);
    }

    /// Mark every live entity called `name` for removal.
    pub fn destroy_entities_named(&mut self, name: &str) {
        self.requests.world.destroy_named.push(name.to_string());
    }

    /// Ask the runner to switch to another scene after this frame.
    pub fn change_scene(&mut self, scene_id: &str) {
        self.requests.world.change_scene = Some(scene_id.to_string());
    }
}

/// One component of the entity, as seen from a callback.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SiblingState {
    pub(crate) key: &'static str,
    pub(crate) live: bool,
}

/// The entity fields a context borrows.
pub(crate) struct EntityParts<'a> {
    pub(crate) id: EntityId,
    pub(crate) name: &'a str,
    pub(crate) transform: &'a mut Transform3D,
    pub(crate) children: &'a mut Vec<SceneNode>,
    pub(crate) siblings: &'a [SiblingState],
}
