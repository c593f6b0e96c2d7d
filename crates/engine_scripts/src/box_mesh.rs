//! Hangs a cube under its entity.

use engine_core::{Component, ComponentContext, NodeKind, SceneNode};
use tracing::debug;

/// Adds a unit cube child node on start and takes it away on dispose.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxMesh;

impl BoxMesh {
    pub const NAME: &'static str = "BoxMesh";

    /// Name of the child node this component owns.
    pub const NODE: &'static str = "BoxMesh.mesh";
}

impl Component for BoxMesh {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn start(&mut self, cx: &mut ComponentContext<'_>) {
        cx.children_mut().push(SceneNode::new(Self::NODE, NodeKind::Box));
        debug!(entity = cx.entity_name(), "box mesh added");
    }

    fn update(&mut self, _cx: &mut ComponentContext<'_>, _delta: f64) {}

    fn dispose(&mut self, cx: &mut ComponentContext<'_>) {
        cx.children_mut().retain(|node| node.name != Self::NODE);
    }
}
