//! Shared services handed to components.

use std::sync::Arc;

use crate::input::InputManager;
use crate::resource::ResourceManager;

/// The managers every component can reach.
///
/// Cheap to clone: each clone shares the same managers. Built once at
/// startup and passed to component factories and entities.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    resources: Arc<ResourceManager>,
    input: Arc<InputManager>,
}

impl Engine {
    /// Create an engine around an initialised resource manager.
    #[must_use]
    pub fn new(resources: Arc<ResourceManager>) -> Self {
        Self {
            resources,
            input: Arc::default(),
        }
    }

    /// Share an existing input manager.
    #[must_use]
    pub fn with_input(mut self, input: Arc<InputManager>) -> Self {
        self.input = input;
        self
    }

    /// The resource manager.
    #[must_use]
    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    /// The input manager.
    #[must_use]
    pub fn input(&self) -> &InputManager {
        &self.input
    }
}
