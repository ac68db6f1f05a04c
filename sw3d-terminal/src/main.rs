/// SW3D Terminal Demo - the software pipeline, one step at a time
///
/// Controls:
///   - 1-7: Select a step
///   - WASD / Arrow Keys: Rotate
///   - +/-: More or less detail
///   - f/l/p/n: Fill, wireframe, vertex markers, vertex numbers
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use sw3d_core::{Scene, SceneConfig, StepKind};
use sw3d_terminal::{config, TerminalApp};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sw3d-terminal", version, about = "Software 3D pipeline in the terminal")]
struct Args {
    /// Step to start on, by name (e.g. `torus`) or number
    #[arg(short, long, default_value_t = StepKind::Point)]
    step: StepKind,

    /// TOML file overriding the step settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Write logs to this file (the terminal itself shows the picture)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => SceneConfig::default(),
    };

    tracing::info!(step = %args.step, fps = args.fps, "starting terminal renderer");

    let scene = Scene::new(config, args.step);
    let mut app = TerminalApp::new(scene, args.fps).context("failed to query terminal size")?;
    app.run().context("terminal renderer failed")?;

    Ok(())
}
