//! Bobs its entity up and down.

use engine_core::{Component, ComponentContext, EngineError};
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_SPEED: f64 = 1.0;

/// Sets the entity's `position.y` to `sin(speed * t)`, where `t` is the
/// time since the component started.
///
/// Scene data is either a bare number or `{ "speed": <number> }`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpDown {
    speed: f64,
    time: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UpDownData {
    Speed(f64),
    Options {
        #[serde(default = "default_speed")]
        speed: f64,
    },
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

impl UpDown {
    pub const NAME: &'static str = "UpDown";

    /// Create a component bobbing at `speed` radians per second.
    #[must_use]
    pub fn new(speed: f64) -> Self {
        Self { speed, time: 0.0 }
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }
}

impl Default for UpDown {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

impl Component for UpDown {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn initialize(&mut self, data: Option<&Value>) -> Result<(), EngineError> {
        let Some(data) = data else {
            return Ok(());
        };
        self.speed = match UpDownData::deserialize(data) {
            Ok(UpDownData::Speed(speed) | UpDownData::Options { speed }) => speed,
            Err(_) => {
                return Err(EngineError::component_data(
                    Self::NAME,
                    "expected a number or { \"speed\": <number> }",
                ));
            }
        };
        Ok(())
    }

    fn start(&mut self, _cx: &mut ComponentContext<'_>) {
        self.time = 0.0;
    }

    fn update(&mut self, cx: &mut ComponentContext<'_>, delta: f64) {
        cx.transform_mut().position.y = (self.speed * self.time).sin() as f32;
        self.time += delta;
    }
}
