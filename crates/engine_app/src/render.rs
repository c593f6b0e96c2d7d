//! Headless render bridge: tracks the mounted scene graph and logs changes.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use engine_core::{Entity, EntityId, RenderContext};
use tracing::debug;

/// Keeps the set of mounted entities instead of drawing them.
#[derive(Debug, Default)]
pub struct HeadlessRender {
    mounted: Mutex<BTreeMap<EntityId, String>>,
}

impl HeadlessRender {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mounted entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mounted.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Names of the mounted entities, in creation order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.mounted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}

impl RenderContext for HeadlessRender {
    fn attach(&self, entity: &Entity) {
        debug!(entity = %entity.id(), name = entity.name(), nodes = entity.children().len(), "attached");
        self.mounted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entity.id(), entity.name().to_owned());
    }

    fn detach(&self, entity: &Entity) {
        debug!(entity = %entity.id(), name = entity.name(), "detached");
        self.mounted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&entity.id());
    }
}
