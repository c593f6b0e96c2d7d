//! Entities: positioned scene-graph nodes hosting components.
//!
//! Components live in two ordered buckets. `future` holds components added
//! since the last merge; `current` holds started components. A key lives in
//! at most one bucket.
//!
//! Each [`Entity::update`] runs three passes:
//!
//! 1. **merge**: pending components not marked for removal move to
//!    `current` and are started, in insertion order;
//! 2. **update**: active live components receive `update(delta)`;
//! 3. **cleanup**: every marked component, live or pending, is disposed
//!    and dropped.
//!
//! Components added while the entity is updating therefore start on the
//! following frame, never the current one.

use std::sync::atomic::{AtomicU64, Ordering};

use engine_math::Transform3D;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::component::{Component, ComponentSlot, parse_component_from_config};
use crate::config::EntityConfig;
use crate::context::{ComponentContext, EntityParts, Requests, SiblingState, WorldRequests};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::world::WorldView;

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique entity identifier, used by render bridges to track nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// What a child node renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A grouping node with nothing to draw.
    Empty,
    /// A unit cube.
    Box,
}

/// A child node hung under an entity, typically by a script.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Node name, unique per owner by convention.
    pub name: String,
    /// What the node renders as.
    pub kind: NodeKind,
    /// Transform relative to the entity.
    pub transform: Transform3D,
}

impl SceneNode {
    /// Create a node with an identity transform.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform3D::IDENTITY,
        }
    }
}

/// A named, positioned node owning a set of components.
pub struct Entity {
    id: EntityId,
    name: String,
    transform: Transform3D,
    children: Vec<SceneNode>,
    future: Vec<ComponentSlot>,
    current: Vec<ComponentSlot>,
    death_flag: bool,
    engine: Engine,
}

// Borrow the fields a `ComponentContext` needs, leaving the buckets free.
macro_rules! parts {
    ($entity:expr, $siblings:expr) => {
        EntityParts {
            id: $entity.id,
            name: &$entity.name,
            transform: &mut $entity.transform,
            children: &mut $entity.children,
            siblings: $siblings,
        }
    };
}

impl Entity {
    /// Create an empty entity.
    pub fn new(name: impl Into<String>, engine: Engine) -> Self {
        Self {
            id: EntityId::next(),
            name: name.into(),
            transform: Transform3D::IDENTITY,
            children: Vec::new(),
            future: Vec::new(),
            current: Vec::new(),
            death_flag: false,
            engine,
        }
    }

    /// Set the initial transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    /// The entity's id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The entity's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entity's transform.
    #[must_use]
    pub fn transform(&self) -> &Transform3D {
        &self.transform
    }

    /// Mutable access to the transform.
    pub fn transform_mut(&mut self) -> &mut Transform3D {
        &mut self.transform
    }

    /// Child nodes.
    #[must_use]
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// The engine this entity's components run against.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Queue components for the next merge.
    ///
    /// A component whose key already exists on the entity (pending or live)
    /// is dropped with a warning. Returns how many were queued.
    pub fn add_components(&mut self, slots: impl IntoIterator<Item = ComponentSlot>) -> usize {
        let mut added = 0;
        for slot in slots {
            if self.has_component(slot.key()) {
                warn!("Entity {} already has {}.", self.name, slot.key());
                continue;
            }
            self.future.push(slot);
            added += 1;
        }
        added
    }

    /// Queue a single component. Returns `false` if its key was taken.
    pub fn add_component(&mut self, component: impl Component, active: bool) -> bool {
        self.add_components([ComponentSlot::of(component, active)]) == 1
    }

    /// Mark the components with the given keys for removal at the next
    /// cleanup pass. Unknown keys are ignored.
    pub fn remove_components<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            if let Some(slot) = self.slot_mut(key.as_ref()) {
                slot.destroy();
            }
        }
    }

    /// Returns `true` if a component with `key` is pending or live.
    #[must_use]
    pub fn has_component(&self, key: &str) -> bool {
        self.component(key).is_some()
    }

    /// The slot for `key`, pending or live.
    #[must_use]
    pub fn component(&self, key: &str) -> Option<&ComponentSlot> {
        self.current
            .iter()
            .chain(&self.future)
            .find(|slot| slot.key() == key)
    }

    /// Returns `true` if `key` has started and receives updates.
    #[must_use]
    pub fn is_live(&self, key: &str) -> bool {
        self.current.iter().any(|slot| slot.key() == key)
    }

    /// Returns `true` if `key` is waiting for the next merge.
    #[must_use]
    pub fn is_pending(&self, key: &str) -> bool {
        self.future.iter().any(|slot| slot.key() == key)
    }

    /// Enable or disable updates for `key`. Returns `false` if absent.
    pub fn set_component_active(&mut self, key: &str, active: bool) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                slot.set_active(active);
                true
            }
            None => false,
        }
    }

    /// Keys of all components, live first, in insertion order.
    pub fn component_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.current.iter().chain(&self.future).map(ComponentSlot::key)
    }

    /// Number of components, pending and live.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.current.len() + self.future.len()
    }

    /// Start every pending component, in insertion order.
    ///
    /// All of them are moved to the live set before the first `start` runs,
    /// so each can rely on its batch siblings being live.
    pub fn start(&mut self) -> WorldRequests {
        self.start_in(&WorldView::default())
    }

    /// [`Entity::start`] with `view` lent to the components.
    pub fn start_in(&mut self, view: &WorldView) -> WorldRequests {
        let mut world = WorldRequests::default();
        let first = self.current.len();
        self.current.append(&mut self.future);
        for index in first..self.current.len() {
            self.invoke(index, view, &mut world, |component, cx| component.start(cx));
        }
        world
    }

    /// Run one frame: merge, update, cleanup.
    ///
    /// Returns the world-level requests components made during the frame.
    pub fn update(&mut self, delta: f64) -> WorldRequests {
        self.update_in(delta, &WorldView::default())
    }

    /// [`Entity::update`] with `view` lent to the components.
    pub fn update_in(&mut self, delta: f64, view: &WorldView) -> WorldRequests {
        let mut world = WorldRequests::default();

        let first = self.current.len();
        for slot in std::mem::take(&mut self.future) {
            if slot.will_destroy() {
                // Never started; disposed by the cleanup pass below.
                self.future.push(slot);
            } else {
                self.current.push(slot);
            }
        }
        for index in first..self.current.len() {
            self.invoke(index, view, &mut world, |component, cx| component.start(cx));
        }

        for index in 0..self.current.len() {
            let slot = &self.current[index];
            if !slot.is_active() || slot.will_destroy() {
                continue;
            }
            self.invoke(index, view, &mut world, |component, cx| {
                component.update(cx, delta);
            });
        }

        self.cleanup();
        world
    }

    /// Dispose every component, pending and live, bypassing the destroy
    /// flags. Used for full teardown.
    pub fn dispose(&mut self) {
        let mut slots = std::mem::take(&mut self.current);
        slots.append(&mut self.future);
        for slot in slots {
            self.dispose_slot(slot);
        }
    }

    /// Mark the entity for removal by its world.
    pub fn destroy(&mut self) {
        self.death_flag = true;
    }

    /// Returns `true` once marked for removal.
    #[must_use]
    pub fn will_destroy(&self) -> bool {
        self.death_flag
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut ComponentSlot> {
        self.current
            .iter_mut()
            .chain(&mut self.future)
            .find(|slot| slot.key() == key)
    }

    fn siblings(&self) -> Vec<SiblingState> {
        let live = self.current.iter().map(|slot| SiblingState {
            key: slot.key(),
            live: true,
        });
        let pending = self.future.iter().map(|slot| SiblingState {
            key: slot.key(),
            live: false,
        });
        live.chain(pending).collect()
    }

    /// Call into the live component at `index`, then apply its requests.
    fn invoke<F>(&mut self, index: usize, view: &WorldView, world: &mut WorldRequests, call: F)
    where
        F: FnOnce(&mut dyn Component, &mut ComponentContext<'_>),
    {
        let siblings = self.siblings();
        let mut requests = Requests::default();
        let slot = &mut self.current[index];
        let mut cx = ComponentContext::new(
            slot.key(),
            parts!(self, &siblings),
            view,
            &self.engine,
            &mut requests,
        );
        call(slot.component_mut(), &mut cx);
        self.apply(requests, world);
    }

    fn apply(&mut self, requests: Requests, world: &mut WorldRequests) {
        let Requests {
            entity,
            world: outer,
        } = requests;
        self.remove_components(&entity.remove);
        for (key, active) in &entity.activate {
            self.set_component_active(key, *active);
        }
        if !entity.add.is_empty() {
            self.add_components(entity.add);
        }
        if entity.destroy_entity {
            self.destroy();
        }
        world.merge(outer);
    }

    fn cleanup(&mut self) {
        let mut doomed = Vec::new();
        for bucket in [&mut self.current, &mut self.future] {
            let mut index = 0;
            while index < bucket.len() {
                if bucket[index].will_destroy() {
                    doomed.push(bucket.remove(index));
                } else {
                    index += 1;
                }
            }
        }
        for slot in doomed {
            self.dispose_slot(slot);
        }
    }

    fn dispose_slot(&mut self, mut slot: ComponentSlot) {
        // Requests made while disposing are dropped.
        let siblings = self.siblings();
        let view = WorldView::default();
        let mut requests = Requests::default();
        let mut cx = ComponentContext::new(
            slot.key(),
            parts!(self, &siblings),
            &view,
            &self.engine,
            &mut requests,
        );
        slot.component_mut().dispose(&mut cx);
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("transform", &self.transform)
            .field("current", &self.current)
            .field("future", &self.future)
            .field("death_flag", &self.death_flag)
            .finish_non_exhaustive()
    }
}

/// Build an entity from one scene entry, loading its components
/// concurrently.
///
/// Components that fail to load or initialise are logged and left out; the
/// entity itself only fails if the entry is not a valid entity config.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEntity`] if `value` does not describe an
/// entity.
pub async fn parse_entity_from_config(
    value: &Value,
    engine: &Engine,
) -> Result<Entity, EngineError> {
    let config = EntityConfig::deserialize(value)
        .map_err(|err| EngineError::InvalidEntity(err.to_string()))?;

    let mut entity = Entity::new(config.name.as_str(), engine.clone()).with_transform(
        Transform3D::from_arrays(config.position, config.rotation, config.scale),
    );

    let results = join_all(
        config
            .components
            .iter()
            .map(|component| parse_component_from_config(component, engine)),
    )
    .await;

    let mut slots = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Some(slot) => slots.push(slot),
            None => error!("Component did not load."),
        }
    }
    entity.add_components(slots);
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use engine_math::{Vec2, Vec3};
    use serde_json::json;
    use tracing::Level;

    use crate::config::{FileConfig, FileResource, ResourceKind};
    use crate::input::{CanvasBounds, InputManager};
    use crate::loader::ProjectResolver;
    use crate::registry::ComponentRegistry;
    use crate::resource::ResourceManager;
    use crate::test_support::{CapturedLogs, Journal, Recorder, count, entries, journal};

    use super::*;

    fn entity() -> Entity {
        Entity::new("TestEntity", Engine::default())
    }

    #[test]
    fn test_add_goes_to_future() {
        let log = journal();
        let mut entity = entity();
        entity.start();

        assert!(entity.add_component(Recorder::named("A", &log), true));

        assert!(entity.is_pending("A"));
        assert!(!entity.is_live("A"));
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn test_start_moves_future_to_current() {
        let log = journal();
        let mut entity = entity();
        entity.add_component(Recorder::named("A", &log), true);
        entity.add_component(Recorder::named("B", &log), true);

        entity.start();
        entity.update(1.0);

        assert!(entity.is_live("A"));
        assert!(entity.is_live("B"));
        assert_eq!(entries(&log), ["A:start", "B:start", "A:update", "B:update"]);
    }

    #[test]
    fn test_duplicate_component_is_rejected() {
        let (logs, _guard) = CapturedLogs::install();
        let first = journal();
        let second = journal();
        let mut entity = entity();

        let added = entity.add_components([
            ComponentSlot::of(Recorder::named("Recorder", &first), true),
            ComponentSlot::of(Recorder::named("Recorder", &second), false),
        ]);
        entity.start();
        entity.update(0.016);

        assert_eq!(added, 1);
        assert_eq!(entity.component_count(), 1);
        assert!(entity.component("Recorder").unwrap().is_active());
        assert!(logs.contains(Level::WARN, "Entity TestEntity already has Recorder."));
        assert!(entries(&second).is_empty());
        assert_eq!(entries(&first), ["Recorder:start", "Recorder:update"]);
    }

    #[test]
    fn test_duplicate_of_live_component_is_rejected() {
        let log = journal();
        let mut entity = entity();
        entity.add_component(Recorder::named("A", &log), true);
        entity.start();

        assert!(!entity.add_component(Recorder::named("A", &log), true));
        assert_eq!(entity.component_count(), 1);
    }

    #[test]
    fn test_update_skips_inactive_components() {
        let log = journal();
        let mut entity = entity();
        entity.add_component(Recorder::named("Idle", &log), false);

        entity.update(16.0);
        assert_eq!(entries(&log), ["Idle:start"]);

        assert!(entity.set_component_active("Idle", true));
        entity.update(16.0);
        assert_eq!(count(&log, "Idle:update"), 1);
    }

    #[test]
    fn test_component_added_during_update_starts_next_frame() {
        let log = journal();
        let added_log = log.clone();
        let mut entity = entity();
        entity.add_component(
            Recorder::named("Adder", &log).on_update(move |cx, frame| {
                if frame == 0 {
                    cx.add_component(ComponentSlot::of(Recorder::named("Added", &added_log), true));
                }
            }),
            true,
        );
        entity.start();

        entity.update(0.1);
        assert!(entity.is_pending("Added"));
        assert_eq!(count(&log, "Added:start"), 0);
        assert_eq!(count(&log, "Added:update"), 0);

        entity.update(0.1);
        assert!(entity.is_live("Added"));
        assert_eq!(count(&log, "Added:start"), 1);
        assert_eq!(count(&log, "Added:update"), 1);
    }

    #[test]
    fn test_pending_component_removed_before_merge_is_only_disposed() {
        let log = journal();
        let mut entity = entity();
        entity.start();

        entity.add_component(Recorder::named("A", &log), true);
        entity.remove_components(["A"]);
        entity.update(0.0);

        assert_eq!(entries(&log), ["A:dispose"]);
        assert!(!entity.has_component("A"));
    }

    #[test]
    fn test_component_removed_during_update_is_never_started() {
        let log = journal();
        let added_log = log.clone();
        let mut entity = entity();
        entity.add_component(
            Recorder::named("Adder", &log).on_update(move |cx, frame| {
                if frame == 0 {
                    cx.add_component(ComponentSlot::of(Recorder::named("Added", &added_log), true));
                }
            }),
            true,
        );
        entity.start();
        entity.update(0.1);

        // Removed while still pending.
        entity.remove_components(["Added"]);
        entity.update(0.1);

        assert_eq!(count(&log, "Added:start"), 0);
        assert_eq!(count(&log, "Added:update"), 0);
        assert_eq!(count(&log, "Added:dispose"), 1);
    }

    #[test]
    fn test_remove_live_component() {
        let log = journal();
        let mut entity = entity();
        entity.add_component(Recorder::named("A", &log), true);
        entity.start();

        entity.remove_components(["A"]);
        assert!(entity.component("A").unwrap().will_destroy());

        entity.update(0.0);
        assert!(!entity.has_component("A"));
        assert_eq!(entries(&log), ["A:start", "A:dispose"]);
    }

    #[test]
    fn test_component_can_destroy_itself() {
        let log = journal();
        let mut entity = entity();
        entity.add_component(
            Recorder::named("Once", &log).on_update(|cx, _| cx.destroy()),
            true,
        );
        entity.start();

        entity.update(0.0);
        entity.update(0.0);

        assert_eq!(entries(&log), ["Once:start", "Once:update", "Once:dispose"]);
    }

    #[test]
    fn test_dispose_covers_both_buckets_once() {
        let log = journal();
        let mut entity = entity();
        entity.add_component(Recorder::named("Live", &log), true);
        entity.start();
        entity.add_component(Recorder::named("Pending", &log), true);

        entity.dispose();
        entity.dispose();

        assert_eq!(count(&log, "Live:dispose"), 1);
        assert_eq!(count(&log, "Pending:dispose"), 1);
        assert_eq!(entity.component_count(), 0);
    }

    #[test]
    fn test_entity_destroy_flag() {
        let mut entity = entity();
        assert!(!entity.will_destroy());
        entity.destroy();
        assert!(entity.will_destroy());
    }

    #[test]
    fn test_components_move_the_entity_and_reach_the_world() {
        let log = journal();
        let mut entity = entity();
        entity.add_component(
            Recorder::named("Mover", &log).on_update(|cx, _| {
                cx.transform_mut().position.x += 1.0;
                cx.spawn(Entity::new("Child", cx.engine().clone()));
                cx.destroy_entity();
            }),
            true,
        );
        entity.start();

        let requests = entity.update(0.0);

        assert_eq!(entity.transform().position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(requests.spawned().len(), 1);
        assert_eq!(requests.spawned()[0].name(), "Child");
        assert!(entity.will_destroy());
    }

    #[test]
    fn test_start_sees_siblings_of_the_same_batch_as_live() {
        let log = journal();
        let note = log.clone();
        let mut entity = entity();
        entity.add_components([
            ComponentSlot::of(
                Recorder::named("A", &log).on_start(move |cx, _| {
                    let line = format!("A sees B live: {}", cx.is_live("B"));
                    note.lock().unwrap().push(line);
                }),
                true,
            ),
            ComponentSlot::of(Recorder::named("B", &log), true),
        ]);

        entity.start();

        assert_eq!(entries(&log), ["A:start", "A sees B live: true", "B:start"]);
    }

    #[test]
    fn test_merged_batch_is_live_and_later_adds_are_pending() {
        let log = journal();
        let start_note = log.clone();
        let update_note = log.clone();
        let added_log = log.clone();
        let mut entity = entity();
        entity.start();
        entity.add_components([
            ComponentSlot::of(
                Recorder::named("A", &log)
                    .on_start(move |cx, _| {
                        let line = format!("A sees B live: {}", cx.is_live("B"));
                        start_note.lock().unwrap().push(line);
                    })
                    .on_update(move |cx, frame| {
                        if frame == 0 {
                            cx.add_component(ComponentSlot::of(Recorder::named("C", &added_log), true));
                        }
                    }),
                true,
            ),
            ComponentSlot::of(
                Recorder::named("B", &log).on_update(move |cx, frame| {
                    if frame == 0 {
                        let line = format!(
                            "B sees C pending: {}",
                            cx.has_component("C") && !cx.is_live("C")
                        );
                        update_note.lock().unwrap().push(line);
                    }
                }),
                true,
            ),
        ]);

        entity.update(0.1);

        assert_eq!(
            entries(&log),
            [
                "A:start",
                "A sees B live: true",
                "B:start",
                "A:update",
                "B:update",
                "B sees C pending: true",
            ]
        );
    }

    #[test]
    fn test_sibling_removed_earlier_in_the_frame_is_not_updated() {
        let log = journal();
        let mut entity = entity();
        entity.add_component(
            Recorder::named("A", &log).on_update(|cx, _| cx.remove_component("B")),
            true,
        );
        entity.add_component(Recorder::named("B", &log), true);
        entity.start();

        entity.update(0.1);

        assert_eq!(entries(&log), ["A:start", "B:start", "A:update", "B:dispose"]);
        assert!(!entity.has_component("B"));
    }

    #[test]
    fn test_components_read_shared_input() {
        let input = Arc::new(InputManager::new());
        let log = journal();
        let note = log.clone();
        let mut entity = Entity::new("Pointer", Engine::default().with_input(Arc::clone(&input)));
        entity.add_component(
            Recorder::named("Aim", &log).on_update(move |cx, _| {
                let ndc = cx.input().mouse_ndc();
                note.lock().unwrap().push(format!("ndc {} {}", ndc.x, ndc.y));
            }),
            true,
        );
        entity.start();

        let bounds = CanvasBounds {
            left: 0.0,
            top: 0.0,
            right: 100.0,
            bottom: 100.0,
        };
        input.on_mouse_move(Vec2::new(50.0, 50.0), bounds);
        entity.update(0.1);

        assert_eq!(count(&log, "ndc 0 0"), 1);
    }

    #[test]
    fn test_world_requests_collect_names_and_scene() {
        let log = journal();
        let mut entity = entity();
        entity.add_component(
            Recorder::named("Boss", &log).on_update(|cx, frame| {
                if frame == 0 {
                    cx.destroy_entities_named("Minion");
                    cx.change_scene("level-1");
                    cx.change_scene("level-2");
                }
            }),
            true,
        );
        entity.start();

        let first = entity.update(0.0);
        let second = entity.update(0.0);

        assert_eq!(first.destroyed_names(), ["Minion"]);
        assert_eq!(first.scene_request(), Some("level-2"));
        assert!(!first.is_empty());
        assert!(second.is_empty());
    }

    fn engine_with_recorder(log: &Journal) -> Engine {
        let log = Arc::clone(log);
        let mut registry = ComponentRegistry::new();
        registry.register("/scripts/recorder.rs", move |_| Box::new(Recorder::named("Recorder", &log)));

        let resources = ResourceManager::new();
        resources.initialize(
            &FileConfig {
                files: vec![FileResource::new(
                    "recorder",
                    ResourceKind::Component,
                    "/scripts/recorder.rs",
                )],
            },
            &ProjectResolver::new("/unused", registry),
        );
        Engine::new(Arc::new(resources))
    }

    #[tokio::test]
    async fn test_parse_entity_from_config() {
        let log = journal();
        let engine = engine_with_recorder(&log);
        let config = json!({
            "name": "Entity 1",
            "position": [1, 2, 3],
            "rotation": [0, 0, 0],
            "scale": [2, 2, 2],
            "components": [{ "id": "recorder", "active": true, "data": {} }]
        });

        let entity = parse_entity_from_config(&config, &engine).await.unwrap();

        assert_eq!(entity.name(), "Entity 1");
        assert_eq!(entity.transform().position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(entity.transform().scale, Vec3::splat(2.0));
        assert!(entity.is_pending("Recorder"));
        assert_eq!(entries(&log), ["Recorder:init"]);
    }

    #[tokio::test]
    async fn test_parse_entity_skips_components_that_fail() {
        let (logs, _guard) = CapturedLogs::install();
        let log = journal();
        let engine = engine_with_recorder(&log);
        let config = json!({
            "name": "Entity 1",
            "components": [
                { "id": "fake uid", "active": true },
                { "id": "recorder", "active": true }
            ]
        });

        let entity = parse_entity_from_config(&config, &engine).await.unwrap();

        assert_eq!(entity.component_count(), 1);
        assert!(logs.contains(Level::ERROR, "Component did not load."));
    }

    #[tokio::test]
    async fn test_parse_entity_rejects_malformed_entry() {
        let engine = Engine::default();
        let err = parse_entity_from_config(&Value::Null, &engine).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidEntity(_)));
    }
}
