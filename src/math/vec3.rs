use std::ops::{Add, Div, Mul, Sub};

/// Magnitudes at or below this are treated as zero-length by [`Vec3::normalize`].
pub const LENGTH_EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const RIGHT: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// The camera looks down -Z.
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotates in the XZ plane around the Y axis.
    ///
    /// `x' = x·cosθ − z·sinθ`, `z' = x·sinθ + z·cosθ`.
    pub fn rotate_y(&self, angle: f32) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        Self {
            x: self.x * cos - self.z * sin,
            y: self.y,
            z: self.x * sin + self.z * cos,
        }
    }

    /// Rotates around an arbitrary axis using Rodrigues' rotation formula:
    ///
    /// ```text
    /// p·cosθ + (axis × p)·sinθ + axis·(axis·p)·(1 − cosθ)
    /// ```
    ///
    /// `axis` must already be unit length.
    pub fn rotate_axis_angle(&self, axis: Self, angle: f32) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        self.scale(cos) + axis.cross(*self).scale(sin) + axis.scale(axis.dot(*self) * (1.0 - cos))
    }

    pub fn magnitude(&self) -> f32 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    pub fn add(&self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    pub fn subtract(&self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    pub fn scale(&self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }

    /// Returns the unit vector in the same direction, or `None` for a
    /// (near) zero-length vector.
    pub fn normalize(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude <= LENGTH_EPSILON || !magnitude.is_finite() {
            return None;
        }
        Some(Self {
            x: self.x / magnitude,
            y: self.y / magnitude,
            z: self.z / magnitude,
        })
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Unit normal of the triangle `p1, p2, p3` by the right-hand rule.
    ///
    /// Returns `None` when the points are collinear (or coincident).
    pub fn unit_normal(p1: Self, p2: Self, p3: Self) -> Option<Self> {
        (p2 - p1).cross(p3 - p1).normalize()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Vec3::add(&self, rhs)
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        self.subtract(rhs)
    }
}

/// Scalar multiplication of a vector.
impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

/// Scalar division of a vector.
impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn rotate_y_quarter_turn_maps_x_to_z() {
        let r = Vec3::RIGHT.rotate_y(FRAC_PI_2);
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(r.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(r.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotate_y_keeps_height() {
        let p = Vec3::new(1.0, 5.0, -2.0).rotate_y(1.3);
        assert_relative_eq!(p.y, 5.0);
    }

    #[test]
    fn rotate_axis_angle_around_x() {
        let p = Vec3::UP.rotate_axis_angle(Vec3::RIGHT, FRAC_PI_2);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotate_axis_angle_leaves_axis_component() {
        let axis = Vec3::new(1.0, 1.0, 0.0).normalize().unwrap();
        let p = axis * 3.0;
        let r = p.rotate_axis_angle(axis, PI / 3.0);
        assert_relative_eq!(r.x, p.x, epsilon = 1e-5);
        assert_relative_eq!(r.y, p.y, epsilon = 1e-5);
        assert_relative_eq!(r.z, p.z, epsilon = 1e-5);
    }

    #[test]
    fn rotate_axis_angle_preserves_length() {
        let axis = Vec3::new(0.3, -0.5, 0.8).normalize().unwrap();
        let p = Vec3::new(2.0, -1.0, 4.0);
        let r = p.rotate_axis_angle(axis, 2.1);
        assert_relative_eq!(r.magnitude(), p.magnitude(), epsilon = 1e-5);
    }

    #[test]
    fn normalize_zero_is_none() {
        assert!(Vec3::ZERO.normalize().is_none());
        assert!(Vec3::new(1e-9, 0.0, 0.0).normalize().is_none());
    }

    #[test]
    fn normalize_has_unit_length() {
        let n = Vec3::new(3.0, 4.0, 12.0).normalize().unwrap();
        assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn unit_normal_follows_right_hand_rule() {
        let n = Vec3::unit_normal(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        assert_eq!(n, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn unit_normal_of_collinear_points_is_none() {
        let n = Vec3::unit_normal(
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        assert!(n.is_none());
    }

    #[test]
    fn operators_match_named_methods() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.5, 2.0);
        assert_eq!(a + b, a.add(b));
        assert_eq!(a - b, a.subtract(b));
        assert_eq!(a * 2.0, a.scale(2.0));
        assert_relative_eq!(a.dot(b), -4.0 + 1.0 + 6.0);
    }
}
