//! Pose component for shapes and cameras.
//!
//! A [`Pose`] is a position, a yaw/pitch [`Rotation`] and a uniform scale.
//! Fields are public because the per-frame driver writes them directly; the
//! fluent setters exist for building poses in one expression.
//!
//! # Rotation order
//!
//! Yaw is applied first, around world Y. Pitch is then applied around the
//! *yaw-rotated* local right axis, `rotate_y(RIGHT, yaw)`. Pitch therefore
//! tilts relative to the current facing rather than around a fixed world X.

use crate::math::vec3::Vec3;

/// Yaw/pitch orientation in radians. There is no roll.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Rotation {
    pub const IDENTITY: Self = Self {
        yaw: 0.0,
        pitch: 0.0,
    };

    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// The local right axis after yawing: `rotate_y(RIGHT, yaw)`.
    pub fn right_axis(&self) -> Vec3 {
        Vec3::RIGHT.rotate_y(self.yaw)
    }

    /// Rotates a direction by yaw, then by pitch around the yawed right axis.
    pub fn orient(&self, v: Vec3) -> Vec3 {
        v.rotate_y(self.yaw)
            .rotate_axis_angle(self.right_axis(), self.pitch)
    }

    /// Exact inverse of [`Rotation::orient`].
    ///
    /// Undoing yaw first brings the yawed right axis back onto world X, so
    /// the pitch is then undone around `RIGHT`.
    pub fn unorient(&self, v: Vec3) -> Vec3 {
        v.rotate_y(-self.yaw)
            .rotate_axis_angle(Vec3::RIGHT, -self.pitch)
    }
}

/// Position, orientation and uniform scale of a shape or camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Rotation,
    pub scale: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Rotation::IDENTITY,
            scale: 1.0,
        }
    }
}

impl Pose {
    /// Create a new pose with default values (position=0, rotation=0, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pose at `position` with no rotation and unit scale.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    // ============ Position ============

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    // ============ Rotation ============

    pub fn set_rotation(&mut self, yaw: f32, pitch: f32) -> &mut Self {
        self.rotation = Rotation::new(yaw, pitch);
        self
    }

    pub fn rotate_yaw(&mut self, angle: f32) -> &mut Self {
        self.rotation.yaw += angle;
        self
    }

    pub fn rotate_pitch(&mut self, angle: f32) -> &mut Self {
        self.rotation.pitch += angle;
        self
    }

    // ============ Scale ============

    pub fn set_scale(&mut self, scale: f32) -> &mut Self {
        self.scale = scale;
        self
    }

    // ============ Space conversion ============

    /// Model space to local space: scale, then yaw, then pitch around the
    /// yawed right axis.
    pub fn to_local(&self, model: Vec3) -> Vec3 {
        self.rotation.orient(model * self.scale)
    }

    /// Local space to world space: translate by the pose position.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        local + self.position
    }
}
