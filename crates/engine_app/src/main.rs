//! # engine_app — Runner
//!
//! Loads a project directory, installs its start scene and drives the frame
//! loop headlessly.
//!
//! ## Startup Sequence
//!
//! 1. Read `resource.config.json` and `application.config.json`.
//! 2. Initialise the resource manager with the built-in scripts.
//! 3. Change to the start scene (or `--scene`), failing if it can't load.
//! 4. Enter the fixed-timestep tick loop.

mod project;
mod render;
mod tick;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Parser;
use engine_core::WorldManager;
use tracing::info;
use tracing_subscriber::EnvFilter;

use project::Project;
use render::HeadlessRender;
use tick::{TickConfig, TickLoop};

#[derive(Parser)]
#[command(name = "engine_app", about = "Run a scene engine project headlessly")]
struct Args {
    /// Project directory holding the manifest and app config
    #[arg(short, long, default_value = "demos/basic")]
    project: PathBuf,

    /// Scene to start with instead of the app config's start scene
    #[arg(short, long)]
    scene: Option<String>,

    /// Target ticks per second
    #[arg(short, long, default_value_t = 60.0)]
    tick_rate: f64,

    /// Stop after this many ticks (0 = run until Ctrl-C)
    #[arg(short, long, default_value_t = 0)]
    max_ticks: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("engine_app=info".parse()?)
                .add_directive("engine_core=info".parse()?),
        )
        .init();

    let args = Args::parse();
    if args.tick_rate.is_nan() || args.tick_rate <= 0.0 {
        bail!("tick rate must be positive, got {}", args.tick_rate);
    }

    let project = Project::open(&args.project)?;
    info!(
        project = %project.root().display(),
        resources = project.manifest().files.len(),
        "engine runner starting"
    );

    let engine = project.engine(engine_scripts::builtin_registry());
    let render = Arc::new(HeadlessRender::new());
    let mut manager = WorldManager::new(engine).with_render_context(render.clone());

    let start_scene = project.start_scene(args.scene.as_deref());
    if !manager.change_scene(start_scene).await {
        bail!("couldn't load start scene {start_scene}");
    }
    info!(scene = start_scene, mounted = render.len(), "start scene mounted");

    let config = TickConfig {
        tick_rate: args.tick_rate,
        max_ticks: args.max_ticks,
    };
    let mut tick_loop = TickLoop::new(config);
    tick_loop.run(&mut manager).await?;

    info!(
        ticks = tick_loop.tick_id(),
        scene = manager.current_scene().unwrap_or_default(),
        mounted = ?render.names(),
        "engine runner shut down"
    );
    Ok(())
}
