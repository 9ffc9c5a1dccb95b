//! First-person camera
//!
//! # Coordinate System
//!
//! Right-handed, the camera looks down **-Z** when yaw and pitch are zero:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer
//!
//! # Orientation
//!
//! Yaw/pitch only, no roll. Composition follows [`Rotation::orient`]: yaw
//! around world Y, then pitch around the yawed right axis.
//!
//! - **Yaw**: positive = turn right
//! - **Pitch**: positive = look up

use crate::input::InputState;
use crate::math::vec3::Vec3;
use crate::projection::Projection;
use crate::transform::Rotation;

const DEFAULT_PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// First-person camera with position, yaw/pitch orientation and lens.
///
/// The aspect ratio is not stored here; it comes from the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Rotation,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Projection::default())
    }
}

impl Camera {
    /// Creates a camera at the given position, looking along -Z.
    pub fn new(position: Vec3, projection: Projection) -> Self {
        Self {
            position,
            rotation: Rotation::IDENTITY,
            projection,
        }
    }

    /// Creates a camera at `position` looking toward `target`.
    pub fn looking_at(position: Vec3, target: Vec3, projection: Projection) -> Self {
        let mut camera = Self::new(position, projection);
        camera.look_at(target);
        camera
    }

    // =========================================================================
    // Space conversion
    // =========================================================================

    /// World space to view space: translate by -position, then undo the
    /// camera's yaw/pitch.
    pub fn to_view(&self, world: Vec3) -> Vec3 {
        self.rotation.unorient(world - self.position)
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    /// Rotates the camera by yaw (horizontal) and pitch (vertical) deltas.
    /// Pitch is clamped to ±89°.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.rotation.yaw = (self.rotation.yaw + yaw_delta).rem_euclid(std::f32::consts::TAU);
        self.rotation.pitch = (self.rotation.pitch + pitch_delta)
            .clamp(-DEFAULT_PITCH_LIMIT, DEFAULT_PITCH_LIMIT);
    }

    /// Points the camera at a world position.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        let horizontal_len = (direction.x * direction.x + direction.z * direction.z).sqrt();

        if horizontal_len > f32::EPSILON {
            self.rotation.yaw = direction.x.atan2(-direction.z);
        }

        if direction.magnitude() > f32::EPSILON {
            self.rotation.pitch = direction
                .y
                .atan2(horizontal_len)
                .clamp(-DEFAULT_PITCH_LIMIT, DEFAULT_PITCH_LIMIT);
        }
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Moves along the forward direction flattened onto the ground plane.
    pub fn move_forward(&mut self, distance: f32) {
        self.position = self.position + Vec3::FORWARD.rotate_y(self.rotation.yaw) * distance;
    }

    /// Strafes along the yawed right axis.
    pub fn move_right(&mut self, distance: f32) {
        self.position = self.position + self.rotation.right_axis() * distance;
    }

    /// Moves along world up.
    pub fn move_up(&mut self, distance: f32) {
        self.position.y += distance;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The direction the camera looks in, world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation.orient(Vec3::FORWARD)
    }
}

// =============================================================================
// Camera Controller
// =============================================================================

/// Turns per-frame input into camera motion.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraController {
    /// Movement speed in units per second.
    pub move_speed: f32,
    /// Mouse sensitivity in radians per pixel.
    pub look_sensitivity: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            look_sensitivity: 0.002,
        }
    }
}

impl CameraController {
    pub fn new(move_speed: f32, look_sensitivity: f32) -> Self {
        Self {
            move_speed,
            look_sensitivity,
        }
    }

    /// Updates the camera based on input state.
    ///
    /// # Input Mapping
    /// - W/S: Move forward/backward
    /// - A/D: Strafe left/right
    /// - Space/Shift: Move up/down
    /// - Mouse: Look around (moving the mouse down looks down)
    pub fn update(&self, camera: &mut Camera, input: &InputState, delta_time: f32) {
        let move_amount = self.move_speed * delta_time;

        if input.forward {
            camera.move_forward(move_amount);
        }
        if input.back {
            camera.move_forward(-move_amount);
        }
        if input.right {
            camera.move_right(move_amount);
        }
        if input.left {
            camera.move_right(-move_amount);
        }
        if input.up {
            camera.move_up(move_amount);
        }
        if input.down {
            camera.move_up(-move_amount);
        }

        let (dx, dy) = input.mouse_delta;
        if dx != 0 || dy != 0 {
            camera.rotate(
                dx as f32 * self.look_sensitivity,
                -(dy as f32) * self.look_sensitivity,
            );
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
