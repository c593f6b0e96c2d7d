//! The seam to the external renderer.
//!
//! The engine never draws. A [`RenderContext`] is told when an entity joins
//! or leaves the rendered scene graph; [`SceneView`] exposes what is
//! currently mounted.

use engine_math::Transform3D;

use crate::entity::{Entity, EntityId, SceneNode};
use crate::world::World;

/// Receives scene-graph membership changes.
pub trait RenderContext: Send + Sync {
    /// `entity` joined the scene graph.
    fn attach(&self, entity: &Entity);

    /// `entity` left the scene graph.
    fn detach(&self, entity: &Entity);
}

/// A read-only view of the renderable state of a world.
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    world: &'a World,
}

/// One renderable entity.
#[derive(Debug, Clone, Copy)]
pub struct RenderNode<'a> {
    /// The entity id.
    pub id: EntityId,
    /// The entity name.
    pub name: &'a str,
    /// The entity transform.
    pub transform: &'a Transform3D,
    /// Nodes hung under the entity.
    pub children: &'a [SceneNode],
}

impl<'a> SceneView<'a> {
    pub(crate) fn new(world: &'a World) -> Self {
        Self { world }
    }

    /// Whether the world is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.world.active
    }

    /// Every live entity, in world order.
    pub fn nodes(self) -> impl Iterator<Item = RenderNode<'a>> {
        self.world.entities().map(|entity| RenderNode {
            id: entity.id(),
            name: entity.name(),
            transform: entity.transform(),
            children: entity.children(),
        })
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.world.len()
    }

    /// Returns `true` if no entity is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }
}
