//! Interactive viewer for an `x * y * z` grid board.
//!
//! Drag to orbit, scroll to zoom, arrow keys and Page Up/Down to pan, R to
//! reset the view, F to focus the selected cell, W to cycle wrapping.
//! With `--snapshot` a single frame is rendered headless and written as PNG.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::{info, LevelFilter};

use gridscape::colors::{self, Colour};
use gridscape::prelude::*;
use gridscape::Result;

/// Command line arguments for the grid viewer.
#[derive(Parser, Debug)]
#[command(name = "gridscape")]
#[command(about = "Painter's-algorithm viewer for 3D naughts-and-crosses boards")]
#[command(version)]
struct Args {
    /// Cells along X
    #[arg(short = 'x', long, default_value_t = 3)]
    width_cells: usize,

    /// Layers along Y
    #[arg(short = 'y', long, default_value_t = 3)]
    layers: usize,

    /// Cells along Z
    #[arg(short = 'z', long, default_value_t = 3)]
    depth_cells: usize,

    /// Vertical spacing between layers
    #[arg(short, long, default_value_t = 1.0)]
    explosion: f32,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 450)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 450)]
    height: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    fov: f32,

    /// Frame rate cap, 0 for uncapped
    #[arg(long, default_value_t = 0)]
    max_fps: u32,

    /// Draw occupied cells as opaque outlined cubes instead of wireframes
    #[arg(long)]
    solid_cubes: bool,

    /// Cell the view focuses on and wraps around, as X,Y,Z
    #[arg(long, value_parser = parse_cell, default_value = "0,0,0")]
    select: (usize, usize, usize),

    /// Centre the board on the selected cell from the start
    #[arg(long)]
    focus: bool,

    /// Wrap cell positions around the selected cell
    #[arg(long, value_enum, default_value_t = WrapArg::Off)]
    wrapping: WrapArg,

    /// Render one frame to this PNG file and exit
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum WrapArg {
    Off,
    Layers,
    All,
}

impl From<WrapArg> for Wrapping {
    fn from(arg: WrapArg) -> Self {
        match arg {
            WrapArg::Off => Wrapping::Off,
            WrapArg::Layers => Wrapping::Layers,
            WrapArg::All => Wrapping::All,
        }
    }
}

fn parse_cell(s: &str) -> std::result::Result<(usize, usize, usize), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts[..] else {
        return Err(format!("expected X,Y,Z, got {s:?}"));
    };
    let index = |part: &str| part.parse::<usize>().map_err(|err| format!("{part:?}: {err}"));
    Ok((index(x)?, index(y)?, index(z)?))
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new().filter_level(args.log_level).init();

    let config = ViewConfig::new(args.width, args.height, args.fov)?;
    let scene = demo_scene(&args);
    let mut state = RenderState::new(fitted_camera(&config, &args));

    if let Some(path) = &args.snapshot {
        state.sync(&scene);
        let mut frame = FrameBuffer::new(config.width, config.height);
        state.render(&mut frame);
        frame.save_png(path)?;
        info!("wrote {}", path.display());
        return Ok(());
    }

    run_window(&args, config, scene, state)
}

fn run_window(args: &Args, mut config: ViewConfig, mut scene: GridScene, mut state: RenderState) -> Result<()> {
    let mut window = Window::new("Gridscape", config.width, config.height)?;
    let mut frame = FrameBuffer::new(config.width, config.height);
    let mut limiter = FrameLimiter::new(&window, args.max_fps);
    let mut controller = OrbitCameraController::new(&config);
    let mut input = InputState::default();
    let mut centre_on_selection = args.focus;

    info!(
        "viewing {}x{}x{} grid, explosion {}",
        args.width_cells, args.layers, args.depth_cells, args.explosion
    );

    loop {
        let delta_ms = limiter.wait_and_get_delta(&window);
        let delta = Duration::from_millis(delta_ms);

        input.begin_frame();
        match window.poll_events(&mut input) {
            WindowEvent::Quit => break,
            WindowEvent::Resize(width, height) => {
                config.resize(width, height)?;
                window.resize(width, height)?;
                frame.resize(width, height);
                controller.resize(width, height);
            }
            WindowEvent::None => {}
        }

        if input.reset {
            *state.camera_mut() = fitted_camera(&config, args);
        }
        if input.toggle_focus || input.cycle_wrapping {
            centre_on_selection ^= input.toggle_focus;
            if input.cycle_wrapping {
                scene.set_wrapping(scene.wrapping().next());
            }
            frame_view(&mut scene, args.select, centre_on_selection);
            info!("focus on selection: {centre_on_selection}, wrapping: {:?}", scene.wrapping());
            state.invalidate();
        }
        controller.update(state.camera_mut(), &input, delta.as_secs_f32());

        if state.tick(delta) {
            info!("detail level {} at {:.0} fps", state.lod(), state.fps());
        }
        state.sync(&scene);

        frame.clear(colors::BACKGROUND);
        state.render(&mut frame);
        window.present(frame.as_bytes())?;
    }

    Ok(())
}

fn fitted_camera(config: &ViewConfig, args: &Args) -> OrbitCamera {
    let mut camera = OrbitCamera::new(config, Vec3::ZERO, Rotation::IDENTITY, 0.0);
    camera.fit_grid(args.width_cells, args.layers, args.depth_cells, args.explosion);
    camera
}

/// A board with a few claimed cells, standing in for live game state.
fn demo_scene(args: &Args) -> GridScene {
    let players = [Colour::rgb(220, 40, 40), Colour::rgb(40, 80, 220)];
    let (x, y, z) = (args.width_cells, args.layers, args.depth_cells);

    let markers = (0..x.min(y).min(z))
        .flat_map(|i| [(i, i, i), (x - 1 - i, i, i)])
        .enumerate()
        .map(|(n, cell)| {
            let colour = players[n % players.len()];
            if args.solid_cubes {
                CellMarker::solid(cell, colour, 0.02, Colour::BLACK)
            } else {
                CellMarker::wireframe(cell, colour)
            }
        })
        .collect();

    let mut scene = GridScene::new(x, y, z)
        .with_explosion(args.explosion)
        .with_wrapping(args.wrapping.into());
    frame_view(&mut scene, args.select, args.focus);
    scene.set_markers(markers);
    scene
}

/// Wrapping always turns around the selection; without wrapping the board is
/// centred on the selection only when asked.
fn frame_view(scene: &mut GridScene, selection: (usize, usize, usize), centre_on_selection: bool) {
    let anchored = centre_on_selection || scene.wrapping() != Wrapping::Off;
    scene.set_focus(anchored.then_some(selection));
}
