use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use pinhole::config::SceneConfig;
use pinhole::input::InputState;
use pinhole::{Engine, Error};

/// Fixed timestep for headless frames, in seconds.
const HEADLESS_DT: f32 = 1.0 / 60.0;

/// Project a TOML-described scene and draw it.
#[derive(Parser, Debug)]
#[command(name = "pinhole", version)]
#[command(about = "CPU 3D projection pipeline")]
struct Cli {
    /// Scene file (TOML). The stock scene is used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the last headless frame
    #[arg(short, long, value_name = "FILE", default_value = "frame.png")]
    output: PathBuf,

    /// Number of frames to advance before saving (headless only)
    #[arg(short, long, default_value_t = 1)]
    frames: u32,

    /// Override the viewport width
    #[arg(long)]
    width: Option<u32>,

    /// Override the viewport height
    #[arg(long)]
    height: Option<u32>,

    /// Open an interactive window instead of rendering to a file
    #[arg(long)]
    window: bool,
}

fn load_scene(cli: &Cli) -> Result<SceneConfig, Error> {
    let mut config = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => {
            info!("No scene file given, using the stock scene");
            SceneConfig::stock()
        }
    };
    if let Some(width) = cli.width {
        config.viewport.width = width;
    }
    if let Some(height) = cli.height {
        config.viewport.height = height;
    }
    Ok(config)
}

fn run_headless(engine: &mut Engine, cli: &Cli) -> Result<(), Error> {
    let input = InputState::default();
    for frame in 0..cli.frames.max(1) {
        if frame > 0 {
            engine.update(&input, HEADLESS_DT);
        }
        engine.render();
    }
    let stats = engine.stats();
    info!(
        "Frame {}: {}/{} faces visible, {} back-facing, {} fully clipped, {}/{} vertices clipped",
        cli.frames.max(1),
        stats.visible_faces,
        stats.faces,
        stats.back_facing,
        stats.fully_clipped,
        stats.clipped_vertices,
        stats.vertices
    );
    engine.renderer().save_png(&cli.output)
}

#[cfg(feature = "window")]
fn run_window(engine: &mut Engine) -> Result<(), Error> {
    use pinhole::window::{FrameLimiter, Window, WindowEvent};

    let viewport = engine.viewport();
    let mut window = Window::new("pinhole", viewport.width as u32, viewport.height as u32)?;
    let mut limiter = FrameLimiter::new(&window);
    let mut input = InputState::default();

    info!("Controls: WASD move, Space/Shift up/down, mouse look, 1-6 render mode, C culling, P pause");

    loop {
        input.begin_frame();
        match window.poll_events(&mut input) {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                engine.resize(w, h);
            }
            WindowEvent::None => {}
        }

        let delta_ms = limiter.wait_and_get_delta(&window);
        engine.update(&input, delta_ms as f32 / 1000.0);
        engine.render();
        window.present(&engine.frame_buffer())?;
    }
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_window(_engine: &mut Engine) -> Result<(), Error> {
    Err(Error::Window(
        "built without the `window` feature; rebuild with --features window".to_string(),
    ))
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = load_scene(cli)?;
    let mut engine = Engine::from_config(&config)?;
    if cli.window {
        run_window(&mut engine)
    } else {
        run_headless(&mut engine, cli)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
