//! Runner frame loop.
//!
//! Each tick:
//!
//! 1. Advance the frame counter and elapsed time.
//! 2. Update the live world with a fixed `dt`.
//! 3. If a component asked for a scene change, start loading it.
//!
//! Scene loads run alongside the ticks, so the previous world keeps
//! updating until the new one is parsed and installed.

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use anyhow::Result;
use engine_core::{FrameState, World, WorldManager, load_world};
use futures::future::OptionFuture;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

type SceneLoad = Pin<Box<dyn Future<Output = (String, Option<World>)>>>;

/// Configuration for the runner tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

/// The runner's tick loop state.
#[derive(Debug)]
pub struct TickLoop {
    /// Ticks run so far.
    tick_id: u64,
    /// Seconds of simulated time.
    elapsed: f64,
    config: TickConfig,
}

impl TickLoop {
    /// Create a new tick loop with the given configuration.
    #[must_use]
    pub fn new(config: TickConfig) -> Self {
        Self {
            tick_id: 0,
            elapsed: 0.0,
            config,
        }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Run one frame of the live world.
    ///
    /// Returns the scene a component asked to switch to, if any.
    pub fn tick(&mut self, manager: &mut WorldManager, dt: f64) -> Option<String> {
        let frame = FrameState {
            frame: self.tick_id,
            elapsed: self.elapsed,
        };
        self.tick_id += 1;
        self.elapsed += dt;

        let world = manager.get_world_mut()?;
        debug!(tick_id = self.tick_id, dt, entities = world.len(), "tick start");
        world.update(&frame, dt);
        world.take_scene_request()
    }

    /// Tick at the configured rate until `max_ticks` is reached or Ctrl-C
    /// is pressed.
    pub async fn run(&mut self, manager: &mut WorldManager) -> Result<()> {
        let tick_duration = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let dt = tick_duration.as_secs_f64();
        let mut interval = time::interval(tick_duration);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        let mut loading: Option<SceneLoad> = None;
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            "starting tick loop"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let start = Instant::now();
                    if let Some(scene_id) = self.tick(manager, dt) {
                        if loading.is_some() {
                            warn!(scene = %scene_id, "scene change already in flight, request dropped");
                        } else {
                            let engine = manager.engine().clone();
                            loading = Some(Box::pin(async move {
                                let world = load_world(&engine, &scene_id).await;
                                (scene_id, world)
                            }));
                        }
                    }

                    tick_count += 1;
                    if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                        info!(ticks = tick_count, "tick loop complete");
                        break;
                    }

                    let elapsed = start.elapsed();
                    if elapsed > tick_duration {
                        warn!(
                            tick_id = self.tick_id,
                            elapsed_ms = elapsed.as_millis() as u64,
                            budget_ms = tick_duration.as_millis() as u64,
                            "tick exceeded time budget"
                        );
                    }
                }
                Some((scene_id, world)) = OptionFuture::from(loading.as_mut()), if loading.is_some() => {
                    loading = None;
                    if let Some(world) = world {
                        manager.install_scene(&scene_id, world);
                    }
                }
                result = &mut shutdown => {
                    result?;
                    info!(ticks = tick_count, "interrupted, shutting down");
                    break;
                }
            }
        }
        Ok(())
    }
}
