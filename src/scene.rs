//! Frame-to-frame render state and grid scene construction.
//!
//! [`RenderState`] owns everything that lives across frames: the camera, the
//! cached solids with an explicit validity flag, the frame-rate counter and
//! the detail level. The cache is only ever replaced as a whole.
//!
//! [`GridScene`] turns a board of `x * y * z` cells plus a set of occupied
//! cells into draw requests, with gridlines whose cost depends on the detail
//! level:
//!
//! | level | each gridline segment is                   |
//! |-------|--------------------------------------------|
//! | 0     | a thin cuboid per cell                     |
//! | 1     | two crossed flat strips per cell           |
//! | 2     | one flat strip per cell                    |
//! | 3     | one flat strip for the whole row or column |

use std::time::Duration;

use log::{debug, warn};

use crate::camera::OrbitCamera;
use crate::colors::Colour;
use crate::lod::{FpsCounter, LodController};
use crate::math::{Position3, Rotation, Vec3};
use crate::render::{FrameStats, Renderer, Surface};
use crate::solid::{DrawRequest, Outline, Shape, Solid};

/// Border width at distance 1 of wireframe cell markers, in pixels.
pub const WIREFRAME_BORDER: f32 = 45.0;
/// Thickness of gridlines in world units.
pub const GRIDLINE_THICKNESS: f32 = 0.05;
/// Edge length of a cell marker in world units.
pub const MARKER_SIZE: f32 = 0.5;

// =============================================================================
// Render state
// =============================================================================

/// Camera, cached geometry and frame-rate driven detail level.
#[derive(Debug)]
pub struct RenderState {
    camera: OrbitCamera,
    renderer: Renderer,
    lod: LodController,
    fps: FpsCounter,
    solids: Vec<Solid>,
    cache_valid: bool,
}

impl RenderState {
    /// Starts with an empty, invalid cache at the finest detail level.
    pub fn new(camera: OrbitCamera) -> Self {
        Self {
            camera,
            renderer: Renderer::new(),
            lod: LodController::default(),
            fps: FpsCounter::default(),
            solids: Vec::new(),
            cache_valid: false,
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Marks the cached solids stale, e.g. after the game state or a view
    /// option changed.
    pub fn invalidate(&mut self) {
        self.cache_valid = false;
    }

    pub fn needs_rebuild(&self) -> bool {
        !self.cache_valid
    }

    /// Replaces the whole cache.
    pub fn rebuild(&mut self, solids: Vec<Solid>) {
        let faces: usize = solids.iter().map(|solid| solid.faces().len()).sum();
        debug!(
            "rebuilt scene at detail level {}: {} solids, {faces} faces",
            self.lod.level(),
            solids.len()
        );
        self.solids = solids;
        self.cache_valid = true;
    }

    /// Rebuilds from `scene` if the cache is stale.
    pub fn sync(&mut self, scene: &GridScene) {
        if self.needs_rebuild() {
            self.rebuild(scene.build(self.lod.level()));
        }
    }

    /// Records a frame's duration and updates the detail level. Returns
    /// `true` if the level changed, which also invalidates the cache.
    pub fn tick(&mut self, frame_time: Duration) -> bool {
        self.fps.tick(frame_time);
        let changed = self.lod.update(self.fps.fps());
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Draws the cached solids. Safe to call every frame.
    pub fn render<S: Surface>(&mut self, surface: &mut S) {
        self.renderer.render(surface, &self.camera, &mut self.solids);
    }

    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }

    pub fn lod(&self) -> u8 {
        self.lod.level()
    }

    pub fn last_stats(&self) -> FrameStats {
        self.renderer.last_stats()
    }
}

// =============================================================================
// Grid scene
// =============================================================================

/// How an occupied cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellStyle {
    /// Six bordered faces, see-through.
    Wireframe,
    /// An opaque cube. A positive `outline_width` adds an edge shell;
    /// otherwise the cell falls back to [`CellStyle::Wireframe`].
    Solid {
        outline_width: f32,
        outline_colour: Colour,
    },
}

/// An occupied (or highlighted) cell, supplied by the game layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMarker {
    pub cell: (usize, usize, usize),
    pub colour: Colour,
    pub style: CellStyle,
    pub size: f32,
}

impl CellMarker {
    pub fn wireframe(cell: (usize, usize, usize), colour: Colour) -> Self {
        Self {
            cell,
            colour,
            style: CellStyle::Wireframe,
            size: MARKER_SIZE,
        }
    }

    pub fn solid(
        cell: (usize, usize, usize),
        colour: Colour,
        outline_width: f32,
        outline_colour: Colour,
    ) -> Self {
        Self {
            cell,
            colour,
            style: CellStyle::Solid {
                outline_width,
                outline_colour,
            },
            size: MARKER_SIZE,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

/// How cell positions wrap around the focused cell.
///
/// Wrapping moves the cells, never the gridlines: the board keeps its shape
/// while the focused cell is brought to the middle index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wrapping {
    #[default]
    Off,
    /// Only layers move, so the focused layer is the middle one.
    Layers,
    /// Every axis moves, so the focused cell is the middle cell.
    All,
}

impl Wrapping {
    /// Off, then layers, then all, then off again.
    pub fn next(self) -> Self {
        match self {
            Wrapping::Off => Wrapping::Layers,
            Wrapping::Layers => Wrapping::All,
            Wrapping::All => Wrapping::Off,
        }
    }
}

/// A board of cells centred on the origin.
///
/// Layers along Y are spread apart by `explosion`; any value other than 1
/// draws only the vertical gridlines, one short run per layer.
///
/// With a focus cell and no wrapping the board is centred on that cell
/// instead of its middle. With wrapping the board stays centred on its middle
/// and the cells are rotated around the focus (see [`Wrapping`]). Callers
/// must invalidate any cached solids after changing either.
#[derive(Debug, Clone, PartialEq)]
pub struct GridScene {
    x: usize,
    y: usize,
    z: usize,
    explosion: f32,
    markers: Vec<CellMarker>,
    focus: Option<(usize, usize, usize)>,
    wrapping: Wrapping,
}

impl GridScene {
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self {
            x,
            y,
            z,
            explosion: 1.0,
            markers: Vec::new(),
            focus: None,
            wrapping: Wrapping::Off,
        }
    }

    pub fn with_focus(mut self, cell: (usize, usize, usize)) -> Self {
        self.focus = Some(cell);
        self
    }

    pub fn with_wrapping(mut self, wrapping: Wrapping) -> Self {
        self.wrapping = wrapping;
        self
    }

    pub fn set_focus(&mut self, focus: Option<(usize, usize, usize)>) {
        self.focus = focus;
    }

    pub fn set_wrapping(&mut self, wrapping: Wrapping) {
        self.wrapping = wrapping;
    }

    pub fn focus(&self) -> Option<(usize, usize, usize)> {
        self.focus
    }

    pub fn wrapping(&self) -> Wrapping {
        self.wrapping
    }

    pub fn with_explosion(mut self, explosion: f32) -> Self {
        self.explosion = explosion;
        self
    }

    pub fn set_markers(&mut self, markers: Vec<CellMarker>) {
        self.markers = markers;
    }

    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.x, self.y, self.z)
    }

    pub fn explosion(&self) -> f32 {
        self.explosion
    }

    pub fn markers(&self) -> &[CellMarker] {
        &self.markers
    }

    /// World position, before centring, that ends up at the origin: the
    /// focus cell when not wrapping, otherwise the grid's middle.
    pub fn centre(&self) -> Position3 {
        let (x, y, z) = match (self.focus, self.wrapping) {
            (Some((x, y, z)), Wrapping::Off) => (x as f32, y as f32, z as f32),
            _ => (
                (self.x as f32 - 1.0) / 2.0,
                (self.y as f32 - 1.0) / 2.0,
                (self.z as f32 - 1.0) / 2.0,
            ),
        };
        Vec3::new(x, y * self.explosion, z)
    }

    /// Centre of a cell after wrapping and centring the grid.
    pub fn cell_position(&self, cell: (usize, usize, usize)) -> Position3 {
        let (x, y, z) = self.placed(cell);
        Vec3::new(x as f32, y as f32 * self.explosion, z as f32) - self.centre()
    }

    /// Grid index a cell is drawn at.
    fn placed(&self, (x, y, z): (usize, usize, usize)) -> (usize, usize, usize) {
        let (fx, fy, fz) = self.focus.unwrap_or((self.x / 2, self.y / 2, self.z / 2));
        match self.wrapping {
            Wrapping::Off => (x, y, z),
            Wrapping::Layers => (x, wrap_index(y, fy, self.y), z),
            Wrapping::All => (
                wrap_index(x, fx, self.x),
                wrap_index(y, fy, self.y),
                wrap_index(z, fz, self.z),
            ),
        }
    }

    /// Corner between cells. `y` is already scaled by the explosion.
    fn edge(&self, x: f32, y: f32, z: f32) -> Position3 {
        Vec3::new(x - 0.5, y - 0.5, z - 0.5) - self.centre()
    }

    /// Builds the solids for this board at detail level `lod`.
    pub fn build(&self, lod: u8) -> Vec<Solid> {
        self.draw_requests(lod).iter().map(Solid::from).collect()
    }

    /// Markers first, then gridlines.
    pub fn draw_requests(&self, lod: u8) -> Vec<DrawRequest> {
        let mut requests = Vec::new();
        self.marker_requests(&mut requests);
        self.gridline_requests(lod, &mut requests);
        requests
    }

    fn marker_requests(&self, out: &mut Vec<DrawRequest>) {
        for marker in &self.markers {
            let (x, y, z) = marker.cell;
            if x >= self.x || y >= self.y || z >= self.z {
                warn!("ignoring marker outside the {}x{}x{} grid at {:?}", self.x, self.y, self.z, marker.cell);
                continue;
            }

            let size = Vec3::splat(marker.size);
            let shape = match marker.style {
                CellStyle::Solid {
                    outline_width,
                    outline_colour,
                } if outline_width > 0.0 => Shape::Cuboid {
                    size,
                    outline: Some(Outline {
                        width: outline_width,
                        colour: outline_colour,
                    }),
                },
                _ => Shape::WireframeCuboid {
                    size,
                    border_width: WIREFRAME_BORDER,
                },
            };
            out.push(DrawRequest {
                position: self.cell_position(marker.cell),
                rotation: Rotation::IDENTITY,
                colour: marker.colour,
                shape,
            });
        }
    }

    fn gridline_requests(&self, lod: u8, out: &mut Vec<DrawRequest>) {
        let thickness = GRIDLINE_THICKNESS;
        let layers: Vec<f32> = (0..self.y).map(|y| y as f32 * self.explosion).collect();
        let flat = self.explosion == 1.0;

        if flat {
            // Runs along Z between columns and layers
            for x in 1..self.x {
                for &y in layers.iter().skip(1) {
                    push_run(
                        out,
                        lod,
                        |t| self.edge(x as f32, y, t),
                        self.z,
                        [Vec3::UP, Vec3::RIGHT],
                        Vec3::new(thickness, thickness, 1.0),
                    );
                }
            }
            // Runs along X between layers and rows
            for &y in layers.iter().skip(1) {
                for z in 1..self.z {
                    push_run(
                        out,
                        lod,
                        |t| self.edge(t, y, z as f32),
                        self.x,
                        [Vec3::UP, Vec3::FORWARD],
                        Vec3::new(1.0, thickness, thickness),
                    );
                }
            }
        }

        // Runs along Y between columns and rows
        for x in 1..self.x {
            for z in 1..self.z {
                let across = [Vec3::RIGHT, Vec3::FORWARD];
                let bar = Vec3::new(thickness, 1.0, thickness);
                if flat {
                    push_run(out, lod, |t| self.edge(x as f32, t, z as f32), self.y, across, bar);
                } else {
                    for &y in &layers {
                        push_run(out, lod, |t| self.edge(x as f32, y + t, z as f32), 1, across, bar);
                    }
                }
            }
        }
    }
}

/// Shifts `index` so that `anchor` lands on the middle of `len` slots.
fn wrap_index(index: usize, anchor: usize, len: usize) -> usize {
    if len == 0 {
        return index;
    }
    let len = len as i64;
    (index as i64 - anchor as i64 + len / 2).rem_euclid(len) as usize
}

/// Gridline along one axis, `cells` long, starting at `at(0.0)`.
///
/// `across` holds the width directions of the flat strips; the first is used
/// alone from level 2 up. `bar` is the size of one cell's cuboid at level 0.
fn push_run(
    out: &mut Vec<DrawRequest>,
    lod: u8,
    at: impl Fn(f32) -> Position3,
    cells: usize,
    across: [Vec3; 2],
    bar: Vec3,
) {
    let line = |from: f32, to: f32, width_direction: Vec3| DrawRequest {
        position: at(from),
        rotation: Rotation::IDENTITY,
        colour: Colour::BLACK,
        shape: Shape::Line {
            end: at(to),
            thickness: GRIDLINE_THICKNESS,
            width_direction,
        },
    };

    match lod {
        0 => out.extend((0..cells).map(|i| DrawRequest {
            position: at(i as f32 + 0.5),
            rotation: Rotation::IDENTITY,
            colour: Colour::BLACK,
            shape: Shape::Cuboid {
                size: bar,
                outline: None,
            },
        })),
        1 | 2 => {
            for i in 0..cells {
                let (from, to) = (i as f32, i as f32 + 1.0);
                out.push(line(from, to, across[0]));
                if lod == 1 {
                    out.push(line(from, to, across[1]));
                }
            }
        }
        _ => out.push(line(0.0, cells as f32, across[0])),
    }
}
