//! Shared fixtures for unit tests: log capture, recorder components, and a
//! recording render context.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::component::Component;
use crate::context::ComponentContext;
use crate::entity::Entity;
use crate::error::EngineError;
use crate::render::RenderContext;

/// Records every event emitted on the current thread while installed.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl CapturedLogs {
    /// Install as the thread's default subscriber until the guard drops.
    pub(crate) fn install() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let subscriber = Registry::default().with(logs.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub(crate) fn count_matching(&self, level: Level, message: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, m)| *l == level && m == message)
            .count()
    }

    pub(crate) fn contains(&self, level: Level, message: &str) -> bool {
        self.count_matching(level, message) > 0
    }

    pub(crate) fn count(&self, level: Level) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

/// Lifecycle calls recorded by recorders, as `"<key>:<call>"`.
pub(crate) type Journal = Arc<Mutex<Vec<String>>>;

pub(crate) fn journal() -> Journal {
    Arc::default()
}

pub(crate) fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

pub(crate) fn count(journal: &Journal, entry: &str) -> usize {
    journal.lock().unwrap().iter().filter(|e| *e == entry).count()
}

type Hook = Box<dyn FnMut(&mut ComponentContext<'_>, u32) + Send>;

/// A component that journals its lifecycle and can run hooks on start and update.
pub(crate) struct Recorder {
    key: &'static str,
    journal: Journal,
    updates: u32,
    on_start: Option<Hook>,
    on_update: Option<Hook>,
}

impl Recorder {
    pub(crate) fn named(key: &'static str, journal: &Journal) -> Self {
        Self {
            key,
            journal: Arc::clone(journal),
            updates: 0,
            on_start: None,
            on_update: None,
        }
    }

    /// Run `hook` once on start, with frame 0.
    pub(crate) fn on_start<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ComponentContext<'_>, u32) + Send + 'static,
    {
        self.on_start = Some(Box::new(hook));
        self
    }

    /// Run `hook` on every update, with the number of prior updates.
    pub(crate) fn on_update<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ComponentContext<'_>, u32) + Send + 'static,
    {
        self.on_update = Some(Box::new(hook));
        self
    }

    fn record(&self, call: &str) {
        self.journal
            .lock()
            .unwrap()
            .push(format!("{}:{call}", self.key));
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::named("Recorder", &journal())
    }
}

impl Component for Recorder {
    fn name(&self) -> &'static str {
        self.key
    }

    fn initialize(&mut self, _data: Option<&Value>) -> Result<(), EngineError> {
        self.record("init");
        Ok(())
    }

    fn start(&mut self, cx: &mut ComponentContext<'_>) {
        self.record("start");
        if let Some(hook) = self.on_start.as_mut() {
            hook(cx, 0);
        }
    }

    fn update(&mut self, cx: &mut ComponentContext<'_>, _delta: f64) {
        self.record("update");
        let frame = self.updates;
        self.updates += 1;
        if let Some(hook) = self.on_update.as_mut() {
            hook(cx, frame);
        }
    }

    fn dispose(&mut self, _cx: &mut ComponentContext<'_>) {
        self.record("dispose");
    }
}

/// A component that insists on `{ "level": <u32> }` data.
#[derive(Default)]
pub(crate) struct Strict {
    level: u32,
}

#[derive(Deserialize)]
struct StrictData {
    level: u32,
}

impl Component for Strict {
    fn name(&self) -> &'static str {
        "Strict"
    }

    fn initialize(&mut self, data: Option<&Value>) -> Result<(), EngineError> {
        let data = data.ok_or_else(|| EngineError::component_data("Strict", "missing data"))?;
        let parsed = StrictData::deserialize(data)
            .map_err(|err| EngineError::component_data("Strict", err))?;
        self.level = parsed.level;
        Ok(())
    }

    fn start(&mut self, _cx: &mut ComponentContext<'_>) {}

    fn update(&mut self, cx: &mut ComponentContext<'_>, _delta: f64) {
        cx.transform_mut().position.y = self.level as f32;
    }
}

/// A render context that records `attach:<name>` / `detach:<name>`.
#[derive(Debug, Default)]
pub(crate) struct RecordingRender {
    events: Mutex<Vec<String>>,
}

impl RecordingRender {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl RenderContext for RecordingRender {
    fn attach(&self, entity: &Entity) {
        self.events
            .lock()
            .unwrap()
            .push(format!("attach:{}", entity.name()));
    }

    fn detach(&self, entity: &Entity) {
        self.events
            .lock()
            .unwrap()
            .push(format!("detach:{}", entity.name()));
    }
}
