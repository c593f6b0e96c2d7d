//! The [`Component`] contract and the per-entity slot that wraps each
//! instance.
//!
//! Components are behaviour units attached to one entity. Their lifecycle:
//!
//! 1. constructed by a factory, then [`Component::initialize`] with the
//!    scene data;
//! 2. parked in the entity's pending bucket until the next merge, where
//!    [`Component::start`] runs once;
//! 3. [`Component::update`] every frame while active and live;
//! 4. [`Component::dispose`] exactly once, on removal or entity teardown.
//!
//! Active and destroy flags live on the [`ComponentSlot`], not the component,
//! so scripts only implement behaviour.

use serde_json::Value;
use tracing::error;

use crate::config::ComponentConfig;
use crate::context::ComponentContext;
use crate::engine::Engine;
use crate::error::EngineError;

/// Behaviour attached to an entity.
///
/// [`Component::name`] is the component's key. An entity holds at most one
/// component per key.
pub trait Component: Send + 'static {
    /// The key this component is registered under on its entity.
    fn name(&self) -> &'static str;

    /// One-time setup from scene data. Sibling components may not exist yet.
    ///
    /// # Errors
    ///
    /// Return [`EngineError::ComponentData`] if `data` is unusable; the
    /// component is then dropped from its entity.
    fn initialize(&mut self, data: Option<&Value>) -> Result<(), EngineError> {
        let _ = data;
        Ok(())
    }

    /// Runs once when the component joins the entity's live set. Siblings
    /// from the same parse batch are live too.
    fn start(&mut self, cx: &mut ComponentContext<'_>);

    /// Runs once per frame while active. `delta` is in seconds.
    fn update(&mut self, cx: &mut ComponentContext<'_>, delta: f64);

    /// Release whatever `start` acquired. Requests issued here are dropped.
    fn dispose(&mut self, cx: &mut ComponentContext<'_>) {
        let _ = cx;
    }
}

/// A component plus its lifecycle flags.
pub struct ComponentSlot {
    component: Box<dyn Component>,
    active: bool,
    death_flag: bool,
}

impl ComponentSlot {
    /// Wrap a component.
    #[must_use]
    pub fn new(component: Box<dyn Component>, active: bool) -> Self {
        Self {
            component,
            active,
            death_flag: false,
        }
    }

    /// Wrap a concrete component value.
    #[must_use]
    pub fn of(component: impl Component, active: bool) -> Self {
        Self::new(Box::new(component), active)
    }

    /// The component key.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.component.name()
    }

    /// Whether the component receives updates.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable updates.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Mark for removal at the entity's next cleanup pass.
    pub fn destroy(&mut self) {
        self.death_flag = true;
    }

    /// Returns `true` once marked for removal.
    #[must_use]
    pub fn will_destroy(&self) -> bool {
        self.death_flag
    }

    pub(crate) fn component_mut(&mut self) -> &mut dyn Component {
        self.component.as_mut()
    }
}

impl std::fmt::Debug for ComponentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentSlot")
            .field("key", &self.key())
            .field("active", &self.active)
            .field("death_flag", &self.death_flag)
            .finish()
    }
}

/// Load, construct and initialise one component from its scene config.
///
/// Returns `None` if the script cannot be loaded or rejects its data. The
/// caller logs the batch-level failure.
pub async fn parse_component_from_config(
    config: &ComponentConfig,
    engine: &Engine,
) -> Option<ComponentSlot> {
    let factory = engine.resources().load_component(&config.id).await?;
    let mut component = factory(engine);
    if let Err(err) = component.initialize(config.data.as_ref()) {
        error!(id = %config.id, error = %err, "Couldn't initialize component");
        return None;
    }
    Some(ComponentSlot::new(component, config.active))
}
