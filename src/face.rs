//! Polygonal faces and backface culling.
//!
//! A face stores indices into its shape's model vertices and a unit normal
//! cached at construction. Faces wind **clockwise seen from outside**, so
//! the right-hand normal of the first three vertices points into the
//! solid. A face is turned toward the viewer when that normal points away
//! from the camera, and back-facing when `dot(normal, to_camera) >= 0`.
//!
//! Faces never hold a pointer to their shape. Culling takes the shape's
//! rotation and the shared vertex records as arguments instead.

use std::fmt;

use crate::math::vec3::Vec3;
use crate::pipeline::VertexRecord;
use crate::transform::Rotation;

#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    indices: Vec<usize>,
    normal: Vec3,
}

impl Face {
    /// Builds a face over `vertices`, caching the unit normal of its first
    /// three vertices.
    pub fn new(indices: Vec<usize>, vertices: &[Vec3]) -> Result<Self, FaceError> {
        if indices.len() < 3 {
            return Err(FaceError::TooFewVertices(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i >= vertices.len()) {
            return Err(FaceError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }
        let normal = Vec3::unit_normal(
            vertices[indices[0]],
            vertices[indices[1]],
            vertices[indices[2]],
        )
        .ok_or(FaceError::Degenerate([indices[0], indices[1], indices[2]]))?;

        Ok(Self { indices, normal })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The cached model-space unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Consecutive index pairs, closing back to the first vertex.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| (self.indices[i], self.indices[(i + 1) % n]))
    }

    /// True when every vertex of the face was clipped.
    pub fn is_fully_clipped(&self, records: &[VertexRecord]) -> bool {
        self.indices.iter().all(|&i| records[i].clipped())
    }

    /// The culling dot product: the normal rotated by the shape's current
    /// yaw/pitch, dotted with the vector from the first vertex (world space)
    /// to the camera.
    ///
    /// Scale is not applied to the normal, which is only correct because
    /// shapes scale uniformly.
    pub fn facing(&self, rotation: Rotation, records: &[VertexRecord], camera: Vec3) -> f32 {
        let normal = rotation.orient(self.normal);
        let to_camera = camera - records[self.indices[0]].world;
        normal.dot(to_camera)
    }

    pub fn is_back_facing(
        &self,
        rotation: Rotation,
        records: &[VertexRecord],
        camera: Vec3,
    ) -> bool {
        self.facing(rotation, records, camera) >= 0.0
    }
}

/// A face that cannot be built from the given vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaceError {
    TooFewVertices(usize),
    IndexOutOfRange { index: usize, vertex_count: usize },
    /// The first three vertices are collinear, so there is no normal.
    Degenerate([usize; 3]),
}

impl fmt::Display for FaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewVertices(n) => write!(f, "face has {n} vertices, need at least 3"),
            Self::IndexOutOfRange {
                index,
                vertex_count,
            } => write!(f, "vertex index {index} out of range for {vertex_count} vertices"),
            Self::Degenerate([a, b, c]) => {
                write!(f, "vertices {a}, {b}, {c} are collinear; face has no normal")
            }
        }
    }
}

impl std::error::Error for FaceError {}
