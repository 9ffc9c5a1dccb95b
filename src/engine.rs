//! Frame driver.
//!
//! [`project_shape`] is the per-frame aggregation step: every model vertex
//! of a shape is projected exactly once, then each face reads the shared
//! records by index to decide whether it is drawn and to produce its screen
//! polygon and clipped edges.
//!
//! [`Engine`] owns a camera, the shapes, the viewport and a software
//! [`Renderer`], and wires projection and drawing together once per frame.

use log::{debug, info};
use serde::Deserialize;

use crate::camera::{Camera, CameraController};
use crate::clipper::{clip_edge, EdgeClip};
use crate::config::{SceneConfig, Spin};
use crate::error::Error;
use crate::face::Face;
use crate::input::InputState;
use crate::math::vec2::Vec2;
use crate::pipeline::{Projector, VertexRecord};
use crate::projection::Viewport;
use crate::render::{colors, Canvas, Renderer};
use crate::shape::Shape;

/// Rendering mode presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Wireframe only (key: 1)
    Wireframe,
    /// Wireframe + vertices (key: 2)
    WireframeVertices,
    /// Filled + wireframe (key: 3)
    #[default]
    FilledWireframe,
    /// Filled + wireframe + vertices (key: 4)
    FilledWireframeVertices,
    /// Filled only (key: 5)
    Filled,
    /// Every visible vertex as a point, no faces (key: 6)
    Points,
}

impl RenderMode {
    /// (filled, wireframe, vertices)
    fn layers(self) -> (bool, bool, bool) {
        match self {
            RenderMode::Wireframe => (false, true, false),
            RenderMode::WireframeVertices => (false, true, true),
            RenderMode::FilledWireframe => (true, true, false),
            RenderMode::FilledWireframeVertices => (true, true, true),
            RenderMode::Filled => (true, false, false),
            RenderMode::Points => (false, false, true),
        }
    }
}

/// Why a face is or is not drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceVisibility {
    Visible,
    /// Every vertex of the face was clipped.
    FullyClipped,
    /// The face is turned away from the camera.
    BackFacing,
}

/// One face after projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedFace {
    pub visibility: FaceVisibility,
    /// Screen-space vertices in index order, for filling. Empty unless visible.
    pub polygon: Vec<Vec2>,
    /// Per-edge clip results, for the wireframe. Empty unless visible.
    pub edges: Vec<EdgeClip>,
}

impl ProjectedFace {
    pub fn is_visible(&self) -> bool {
        self.visibility == FaceVisibility::Visible
    }

    fn hidden(visibility: FaceVisibility) -> Self {
        Self {
            visibility,
            polygon: Vec::new(),
            edges: Vec::new(),
        }
    }
}

/// A shape after projection: one record per model vertex and one result per face.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedShape {
    pub vertices: Vec<VertexRecord>,
    pub faces: Vec<ProjectedFace>,
}

impl ProjectedShape {
    /// `(x, y, visible)` screen points for point-only drawing.
    pub fn points(&self) -> impl Iterator<Item = (Vec2, bool)> + '_ {
        self.vertices
            .iter()
            .map(|r| (r.screen.position, r.screen.visible))
    }

    pub fn visible_faces(&self) -> impl Iterator<Item = &ProjectedFace> {
        self.faces.iter().filter(|f| f.is_visible())
    }
}

/// Projects a shape for one frame.
///
/// With `cull_backfaces` off, every face that is not fully clipped is kept.
pub fn project_shape(shape: &Shape, projector: &Projector, cull_backfaces: bool) -> ProjectedShape {
    let vertices = projector.project_all(shape.vertices(), &shape.pose);
    let faces = shape
        .faces()
        .iter()
        .map(|face| project_face(face, shape, &vertices, projector, cull_backfaces))
        .collect();
    ProjectedShape { vertices, faces }
}

fn project_face(
    face: &Face,
    shape: &Shape,
    records: &[VertexRecord],
    projector: &Projector,
    cull_backfaces: bool,
) -> ProjectedFace {
    if face.is_fully_clipped(records) {
        return ProjectedFace::hidden(FaceVisibility::FullyClipped);
    }
    if cull_backfaces
        && face.is_back_facing(shape.pose.rotation, records, projector.camera().position)
    {
        return ProjectedFace::hidden(FaceVisibility::BackFacing);
    }

    let viewport = projector.viewport();
    ProjectedFace {
        visibility: FaceVisibility::Visible,
        polygon: face
            .indices()
            .iter()
            .map(|&i| records[i].screen.position)
            .collect(),
        edges: face
            .edges()
            .map(|(a, b)| clip_edge(&records[a].screen, &records[b].screen, viewport))
            .collect(),
    }
}

/// Counts from the last projected frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub vertices: usize,
    pub clipped_vertices: usize,
    pub faces: usize,
    pub visible_faces: usize,
    pub back_facing: usize,
    pub fully_clipped: usize,
}

impl FrameStats {
    fn collect(frame: &[ProjectedShape]) -> Self {
        let mut stats = Self::default();
        for shape in frame {
            stats.vertices += shape.vertices.len();
            stats.clipped_vertices += shape.vertices.iter().filter(|r| r.clipped()).count();
            for face in &shape.faces {
                stats.faces += 1;
                match face.visibility {
                    FaceVisibility::Visible => stats.visible_faces += 1,
                    FaceVisibility::BackFacing => stats.back_facing += 1,
                    FaceVisibility::FullyClipped => stats.fully_clipped += 1,
                }
            }
        }
        stats
    }
}

/// A shape plus its animation rates.
#[derive(Debug, Clone)]
struct SceneShape {
    shape: Shape,
    spin: Spin,
}

pub struct Engine {
    renderer: Renderer,
    viewport: Viewport,
    camera: Camera,
    controller: CameraController,
    shapes: Vec<SceneShape>,
    frame: Vec<ProjectedShape>,
    stats: FrameStats,
    render_mode: RenderMode,
    paused: bool,
    pub backface_culling: bool,
    pub draw_grid: bool,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
            viewport: Viewport::new(width, height),
            camera: Camera::default(),
            controller: CameraController::default(),
            shapes: Vec::new(),
            frame: Vec::new(),
            stats: FrameStats::default(),
            render_mode: RenderMode::default(),
            paused: false,
            backface_culling: true,
            draw_grid: true,
        }
    }

    /// Builds an engine from a validated scene description.
    pub fn from_config(config: &SceneConfig) -> Result<Self, Error> {
        config.validate()?;
        let mut engine = Self::new(config.viewport.width, config.viewport.height);
        engine.camera = config.camera();
        engine.controller = config.controller();
        engine.render_mode = config.render.mode;
        engine.backface_culling = config.render.backface_culling;
        engine.draw_grid = config.render.grid;
        for (shape, spin) in config.shapes()? {
            engine.shapes.push(SceneShape { shape, spin });
        }
        info!(
            "Scene ready: {} shape(s), {}x{} viewport",
            engine.shapes.len(),
            config.viewport.width,
            config.viewport.height
        );
        Ok(engine)
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(SceneShape {
            shape,
            spin: Spin::default(),
        });
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().map(|s| &s.shape)
    }

    pub fn shape_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index).map(|s| &mut s.shape)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        if mode != self.render_mode {
            info!("Render mode: {:?}", mode);
        }
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        info!("Resizing to {}x{}", width, height);
        self.renderer.resize(width, height);
        self.viewport = Viewport::new(width, height);
    }

    /// Applies one frame of input and animation. `delta_time` is in seconds.
    pub fn update(&mut self, input: &InputState, delta_time: f32) {
        if let Some(mode) = input.render_mode {
            self.set_render_mode(mode);
        }
        if input.toggle_culling {
            self.backface_culling = !self.backface_culling;
            info!("Backface culling: {}", self.backface_culling);
        }
        if input.toggle_pause {
            self.paused = !self.paused;
        }

        self.controller.update(&mut self.camera, input, delta_time);

        if !self.paused {
            for entry in &mut self.shapes {
                entry
                    .shape
                    .pose
                    .rotate_yaw(entry.spin.yaw * delta_time)
                    .rotate_pitch(entry.spin.pitch * delta_time);
            }
        }
    }

    /// Projects every shape with the current camera and viewport.
    pub fn project(&mut self) -> &[ProjectedShape] {
        let projector = Projector::new(&self.camera, self.viewport);
        self.frame = self
            .shapes
            .iter()
            .map(|entry| project_shape(&entry.shape, &projector, self.backface_culling))
            .collect();
        self.stats = FrameStats::collect(&self.frame);
        debug!("{:?}", self.stats);
        &self.frame
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Projects and draws the current frame into the color buffer.
    pub fn render(&mut self) {
        self.project();

        self.renderer.clear(colors::BACKGROUND);
        if self.draw_grid {
            self.renderer.draw_grid(50, colors::GRID);
        }
        draw_frame(&mut self.renderer, &self.frame, self.render_mode);
    }

    /// Returns the rendered frame as bytes (ARGB8888, little endian)
    pub fn frame_buffer(&self) -> Vec<u8> {
        self.renderer.to_argb_bytes()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

/// Draws projected shapes onto any canvas.
pub fn draw_frame(canvas: &mut impl Canvas, frame: &[ProjectedShape], mode: RenderMode) {
    let (draw_filled, draw_wireframe, draw_vertices) = mode.layers();

    for shape in frame {
        if draw_filled {
            for face in shape.visible_faces() {
                canvas.fill_polygon(&face.polygon, colors::FILL);
            }
        }
        if draw_wireframe {
            for face in shape.visible_faces() {
                for segment in face.edges.iter().filter_map(EdgeClip::segment) {
                    canvas.draw_line(segment.start, segment.end, colors::WIREFRAME);
                }
            }
        }
        if draw_vertices {
            for (point, visible) in shape.points() {
                if visible {
                    canvas.draw_point(point, colors::VERTEX);
                }
            }
        }
    }
}
