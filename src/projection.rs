//! Perspective projection parameters and the output viewport.
//!
//! [`Projection`] holds the camera's lens (vertical FOV, near and far
//! planes). The aspect ratio is not part of it: it belongs to the
//! [`Viewport`] and is supplied when the lens is resolved into a
//! [`Frustum`] for a particular frame.

use std::fmt;

use crate::clipper::Frustum;

/// Perspective lens parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians, in `(0, π)`.
    pub fov: f32,
    /// Near clipping plane distance (> 0).
    pub near: f32,
    /// Far clipping plane distance (> near).
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov: std::f32::consts::FRAC_PI_2,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn new(fov: f32, near: f32, far: f32) -> Self {
        Self { fov, near, far }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_degrees: f32, near: f32, far: f32) -> Self {
        Self::new(fov_degrees.to_radians(), near, far)
    }

    /// Focal factor `f = 1 / tan(fov / 2)`.
    pub fn focal(&self) -> f32 {
        1.0 / (self.fov * 0.5).tan()
    }

    /// Horizontal field of view in radians for the given aspect ratio.
    pub fn fov_x(&self, aspect: f32) -> f32 {
        2.0 * (aspect * (self.fov / 2.0).tan()).atan()
    }

    /// Checks the lens together with an aspect ratio.
    ///
    /// The per-frame pipeline does not call this; configuration loading does.
    pub fn validate(&self, aspect: f32) -> Result<(), ProjectionError> {
        if !(self.fov > 0.0 && self.fov < std::f32::consts::PI) {
            return Err(ProjectionError::FieldOfView(self.fov));
        }
        if !(self.near > 0.0) {
            return Err(ProjectionError::NearPlane(self.near));
        }
        if !(self.far > self.near) || !self.far.is_finite() {
            return Err(ProjectionError::FarPlane {
                near: self.near,
                far: self.far,
            });
        }
        if !(aspect > 0.0) || !aspect.is_finite() {
            return Err(ProjectionError::AspectRatio(aspect));
        }
        Ok(())
    }

    /// Resolves the lens with an aspect ratio into clip-space factors.
    pub fn frustum(&self, aspect: f32) -> Frustum {
        Frustum::new(self, aspect)
    }
}

/// Invalid projection configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionError {
    FieldOfView(f32),
    NearPlane(f32),
    FarPlane { near: f32, far: f32 },
    AspectRatio(f32),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldOfView(fov) => {
                write!(f, "field of view {fov} rad is outside (0, π)")
            }
            Self::NearPlane(near) => write!(f, "near plane {near} must be positive"),
            Self::FarPlane { near, far } => {
                write!(f, "far plane {far} must be beyond near plane {near}")
            }
            Self::AspectRatio(aspect) => write!(f, "aspect ratio {aspect} must be positive"),
        }
    }
}

impl std::error::Error for ProjectionError {}

/// The drawing surface rectangle in pixels. Origin is top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn fov_x_matches_aspect_ratio() {
        let proj = Projection::new(FRAC_PI_4, 0.1, 100.0);
        assert_relative_eq!(proj.fov_x(1.0), proj.fov, epsilon = 1e-6);
        assert!(proj.fov_x(16.0 / 9.0) > proj.fov);
    }

    #[test]
    fn from_degrees_converts_correctly() {
        let proj = Projection::from_degrees(90.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov, FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(proj.focal(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn validate_accepts_sane_lens() {
        assert!(Projection::default().validate(4.0 / 3.0).is_ok());
    }

    #[test]
    fn validate_rejects_degenerate_parameters() {
        assert_eq!(
            Projection::new(PI, 0.1, 10.0).validate(1.0),
            Err(ProjectionError::FieldOfView(PI))
        );
        assert_eq!(
            Projection::new(1.0, 0.0, 10.0).validate(1.0),
            Err(ProjectionError::NearPlane(0.0))
        );
        assert_eq!(
            Projection::new(1.0, 10.0, 10.0).validate(1.0),
            Err(ProjectionError::FarPlane {
                near: 10.0,
                far: 10.0
            })
        );
        assert_eq!(
            Projection::new(1.0, 0.1, 10.0).validate(0.0),
            Err(ProjectionError::AspectRatio(0.0))
        );
    }

    #[test]
    fn viewport_aspect() {
        assert_relative_eq!(Viewport::new(800, 400).aspect(), 2.0);
    }
}
