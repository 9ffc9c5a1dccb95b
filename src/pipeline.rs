//! Per-vertex coordinate-space transform chain.
//!
//! ```text
//! model ─scale/yaw/pitch─▶ local ─translate─▶ world ─camera⁻¹─▶ view
//!       ─perspective─▶ clip ─÷w─▶ ndc ─viewport─▶ screen
//! ```
//!
//! Every stage is a pure function of the previous stage's output. The
//! `clipped` flag raised by the frustum test is carried forward and never
//! cleared. A [`VertexRecord`] holds the result of every stage and is built
//! in one go by [`Projector::project`], so no partially filled record is
//! ever observable.

use log::debug;

use crate::camera::Camera;
use crate::clipper::{ClipVertex, Frustum};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::projection::Viewport;
use crate::transform::Pose;

/// `|w|` below this is treated as zero during the perspective divide.
pub const W_EPSILON: f32 = 1e-6;

/// A vertex in normalized device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NdcVertex {
    pub position: Vec3,
    pub clipped: bool,
    /// The perspective divide was skipped (`w ≈ 0` or non-finite result).
    pub degenerate: bool,
}

impl NdcVertex {
    const DEGENERATE: Self = Self {
        position: Vec3::ZERO,
        clipped: true,
        degenerate: true,
    };

    /// x and y in `[-1, 1]`, z in `[0, 1]`.
    pub fn in_view_volume(&self) -> bool {
        let p = self.position;
        (-1.0..=1.0).contains(&p.x) && (-1.0..=1.0).contains(&p.y) && (0.0..=1.0).contains(&p.z)
    }
}

/// A vertex in screen space (pixels, origin top-left, y down).
///
/// `clipped` drives the edge clipper, `visible` gates point drawing. They
/// are computed independently and a drawer must check the one it needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenVertex {
    pub position: Vec2,
    pub clipped: bool,
    pub visible: bool,
}

/// Every stage of one vertex's trip through the pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexRecord {
    pub model: Vec3,
    pub local: Vec3,
    pub world: Vec3,
    pub view: Vec3,
    pub clip: ClipVertex,
    pub ndc: NdcVertex,
    pub screen: ScreenVertex,
}

impl VertexRecord {
    pub fn clipped(&self) -> bool {
        self.screen.clipped
    }
}

pub fn to_local_space(model: Vec3, pose: &Pose) -> Vec3 {
    pose.to_local(model)
}

pub fn to_world_space(local: Vec3, pose: &Pose) -> Vec3 {
    pose.to_world(local)
}

pub fn to_view_space(world: Vec3, camera: &Camera) -> Vec3 {
    camera.to_view(world)
}

pub fn to_clip_space(view: Vec3, frustum: &Frustum) -> ClipVertex {
    frustum.clip(view)
}

/// Perspective divide. Falls back to a degenerate, clipped point instead of
/// dividing by a vanishing `w`.
pub fn to_ndc(clip: ClipVertex) -> NdcVertex {
    let p = clip.position;
    if p.w.abs() < W_EPSILON {
        return NdcVertex::DEGENERATE;
    }
    let position = Vec3::new(p.x / p.w, p.y / p.w, p.z / p.w);
    if !position.is_finite() {
        return NdcVertex::DEGENERATE;
    }
    NdcVertex {
        position,
        clipped: clip.clipped,
        degenerate: false,
    }
}

/// Maps NDC onto the viewport, flipping y so the origin is top-left.
///
/// `visible` only looks at the NDC position, never at the carried
/// `clipped` flag, with one exception: a degenerate vertex is never
/// visible. Its fallback position is the NDC origin, which would
/// otherwise land inside the view volume.
pub fn to_screen_space(ndc: NdcVertex, viewport: Viewport) -> ScreenVertex {
    let x = (ndc.position.x + 1.0) * 0.5 * viewport.width;
    let y = (1.0 - ndc.position.y) * 0.5 * viewport.height;
    ScreenVertex {
        position: Vec2::new(x, y),
        clipped: ndc.clipped,
        visible: !ndc.degenerate && ndc.in_view_volume(),
    }
}

/// Camera and viewport state resolved once per frame.
#[derive(Clone, Copy, Debug)]
pub struct Projector<'a> {
    camera: &'a Camera,
    frustum: Frustum,
    viewport: Viewport,
}

impl<'a> Projector<'a> {
    pub fn new(camera: &'a Camera, viewport: Viewport) -> Self {
        Self {
            camera,
            frustum: camera.projection.frustum(viewport.aspect()),
            viewport,
        }
    }

    pub fn camera(&self) -> &Camera {
        self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Runs one model-space vertex through every stage.
    pub fn project(&self, model: Vec3, pose: &Pose) -> VertexRecord {
        let local = to_local_space(model, pose);
        let world = to_world_space(local, pose);
        let view = to_view_space(world, self.camera);
        let clip = to_clip_space(view, &self.frustum);
        let ndc = to_ndc(clip);
        let screen = to_screen_space(ndc, self.viewport);
        VertexRecord {
            model,
            local,
            world,
            view,
            clip,
            ndc,
            screen,
        }
    }

    /// Projects every vertex once, in order.
    pub fn project_all(&self, vertices: &[Vec3], pose: &Pose) -> Vec<VertexRecord> {
        let records: Vec<VertexRecord> = vertices.iter().map(|v| self.project(*v, pose)).collect();
        debug!(
            "projected {} vertices ({} clipped)",
            records.len(),
            records.iter().filter(|r| r.clipped()).count()
        );
        records
    }
}
