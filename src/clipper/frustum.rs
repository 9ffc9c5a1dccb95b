//! Perspective projection into clip space and the frustum visibility test.
//!
//! The clip volume is the homogeneous cube:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w   (OpenGL-style [-1, 1] depth range)
//! ```
//!
//! On top of the six plane tests, the view-space depth is checked directly
//! against the near and far distances so that points at or behind the camera
//! plane are always rejected, whatever their lateral offset.

use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::projection::Projection;

/// The 6 planes of the canonical clip-space cube.
///
/// The signed distance is positive when inside the clip volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// Left plane: x >= -w
    Left,
    /// Right plane: x <= w
    Right,
    /// Bottom plane: y >= -w
    Bottom,
    /// Top plane: y <= w
    Top,
    /// Near plane: z >= -w
    Near,
    /// Far plane: z <= w
    Far,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    /// Returns the signed distance from a clip-space position to this plane.
    /// Positive = inside the clip volume, Negative = outside.
    pub fn signed_distance(&self, p: Vec4) -> f32 {
        match self {
            Self::Left => p.w + p.x,   // x >= -w  =>  w + x >= 0
            Self::Right => p.w - p.x,  // x <= w   =>  w - x >= 0
            Self::Bottom => p.w + p.y, // y >= -w  =>  w + y >= 0
            Self::Top => p.w - p.y,    // y <= w   =>  w - y >= 0
            Self::Near => p.w + p.z,   // z >= -w  =>  w + z >= 0
            Self::Far => p.w - p.z,    // z <= w   =>  w - z >= 0
        }
    }
}

/// A vertex in homogeneous clip space, tagged with the frustum test result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipVertex {
    pub position: Vec4,
    pub clipped: bool,
}

/// A lens resolved against an aspect ratio.
///
/// Holds the precomputed projection factors so a shape's vertices can be
/// projected without re-deriving them per vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    focal: f32,
    aspect: f32,
    depth_scale: f32,
    depth_offset: f32,
    near: f32,
    far: f32,
}

impl Frustum {
    pub fn new(projection: &Projection, aspect: f32) -> Self {
        let Projection { near, far, .. } = *projection;
        Self {
            focal: projection.focal(),
            aspect,
            depth_scale: (far + near) / (near - far),
            depth_offset: 2.0 * far * near / (near - far),
            near,
            far,
        }
    }

    /// Projects a view-space point into clip space and runs the visibility test.
    pub fn clip(&self, view: Vec3) -> ClipVertex {
        let position = Vec4::new(
            view.x * self.focal / self.aspect,
            view.y * self.focal,
            self.depth_scale * view.z + self.depth_offset,
            -view.z,
        );
        let clipped = !position.is_finite() || self.is_outside(view, position);
        ClipVertex { position, clipped }
    }

    /// True if the point lies outside the frustum.
    ///
    /// `view` is the view-space point and `clip` its clip-space projection.
    pub fn is_outside(&self, view: Vec3, clip: Vec4) -> bool {
        // At or behind the near plane, or beyond the far plane.
        if view.z >= -self.near || -view.z > self.far {
            return true;
        }
        ClipPlane::ALL
            .iter()
            .any(|plane| plane.signed_distance(clip) < 0.0)
    }
}
