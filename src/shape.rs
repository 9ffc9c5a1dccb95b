//! Shapes: a pose, model-space vertices and the faces over them.
//!
//! Every kind of shape goes through the same data-driven face list; the
//! [`ShapeKind`] enum only decides where the vertices and faces come from.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

use crate::error::Error;
use crate::face::{Face, FaceError};
use crate::math::vec3::Vec3;
use crate::transform::Pose;

// Faces wind clockwise seen from outside (see `face`).
const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

const CUBE_FACES: [[usize; 4]; 6] = [
    [4, 7, 6, 5], // +Z
    [0, 1, 2, 3], // -Z
    [1, 5, 6, 2], // +X
    [0, 3, 7, 4], // -X
    [3, 2, 6, 7], // +Y
    [0, 4, 5, 1], // -Y
];

const PYRAMID_VERTICES: [Vec3; 5] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(0.0, 1.0, 0.0),
];

const PYRAMID_SIDES: [[usize; 3]; 4] = [[3, 4, 2], [2, 4, 1], [1, 4, 0], [0, 4, 3]];
const PYRAMID_BASE: [usize; 4] = [0, 3, 2, 1];

/// Where a shape's geometry comes from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeKind {
    /// Axis-aligned cube of half-extent 1.
    Cube,
    /// Square-based pyramid of half-extent 1, apex on +Y.
    Pyramid,
    /// Polygons loaded from a Wavefront OBJ file.
    Obj { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub pose: Pose,
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Shape {
    /// Builds a shape from model vertices and per-face index lists.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Vec<usize>>) -> Result<Self, FaceError> {
        let faces = faces
            .into_iter()
            .map(|indices| Face::new(indices, &vertices))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            pose: Pose::default(),
            vertices,
            faces,
        })
    }

    pub fn from_kind(kind: &ShapeKind) -> Result<Self, Error> {
        match kind {
            ShapeKind::Cube => Ok(Self::cube()),
            ShapeKind::Pyramid => Ok(Self::pyramid()),
            ShapeKind::Obj { path } => Self::from_obj(path),
        }
    }

    pub fn cube() -> Self {
        Self::from_static(&CUBE_VERTICES, CUBE_FACES.iter().map(|f| f.to_vec()))
    }

    pub fn pyramid() -> Self {
        let faces = PYRAMID_SIDES
            .iter()
            .map(|f| f.to_vec())
            .chain(std::iter::once(PYRAMID_BASE.to_vec()));
        Self::from_static(&PYRAMID_VERTICES, faces)
    }

    fn from_static(vertices: &[Vec3], faces: impl Iterator<Item = Vec<usize>>) -> Self {
        let vertices = vertices.to_vec();
        let faces = faces
            .filter_map(|indices| match Face::new(indices, &vertices) {
                Ok(face) => Some(face),
                Err(e) => {
                    debug_assert!(false, "invalid built-in face: {e}");
                    warn!("Skipping invalid built-in face: {}", e);
                    None
                }
            })
            .collect();
        Self {
            pose: Pose::default(),
            vertices,
            faces,
        }
    }

    /// Loads every object in an OBJ file into one shape.
    ///
    /// OBJ polygons wind counter-clockwise, so each face's index order is
    /// reversed. Faces with collinear leading vertices are skipped.
    pub fn from_obj(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        info!("Loading OBJ file: {}", path.display());

        let load_options = tobj::LoadOptions {
            triangulate: false,
            single_index: false,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &load_options)?;

        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        let mut skipped = 0usize;

        for model in models {
            let mesh = &model.mesh;
            let offset = vertices.len();
            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );

            // Empty arities means every face is a triangle.
            let arities: Vec<usize> = if mesh.face_arities.is_empty() {
                vec![3; mesh.indices.len() / 3]
            } else {
                mesh.face_arities.iter().map(|&a| a as usize).collect()
            };

            let mut start = 0;
            for arity in arities {
                let indices: Vec<usize> = mesh.indices[start..start + arity]
                    .iter()
                    .rev()
                    .map(|&i| offset + i as usize)
                    .collect();
                start += arity;

                match Face::new(indices, &vertices) {
                    Ok(face) => faces.push(face),
                    Err(e) => {
                        skipped += 1;
                        warn!("Skipping face in '{}': {}", model.name, e);
                    }
                }
            }
        }

        info!(
            "Loaded {} vertices and {} faces from {} ({} skipped)",
            vertices.len(),
            faces.len(),
            path.display(),
            skipped
        );

        Ok(Self {
            pose: Pose::default(),
            vertices,
            faces,
        })
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cube_has_six_quads_with_inward_normals() {
        let cube = Shape::cube();
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.faces().len(), 6);
        for face in cube.faces() {
            assert_eq!(face.indices().len(), 4);
            let center = face
                .indices()
                .iter()
                .fold(Vec3::ZERO, |acc, &i| acc + cube.vertices()[i])
                / 4.0;
            // Face center points outward; the normal points back in.
            assert!(face.normal().dot(center) < 0.0);
        }
    }

    #[test]
    fn pyramid_normals_point_inward() {
        let pyramid = Shape::pyramid();
        assert_eq!(pyramid.faces().len(), 5);
        let centroid = pyramid
            .vertices()
            .iter()
            .fold(Vec3::ZERO, |acc, v| acc + *v)
            / 5.0;
        for face in pyramid.faces() {
            let on_face = pyramid.vertices()[face.indices()[0]];
            assert!(face.normal().dot(on_face - centroid) < 0.0);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid built-in face")]
    fn broken_builtin_table_fails_loudly() {
        let faces = [vec![0, 1, 2, 3], vec![0, 1, 8]];
        Shape::from_static(&CUBE_VERTICES, faces.into_iter());
    }

    #[test]
    fn builtin_tables_build_every_face() {
        assert_eq!(Shape::cube().faces().len(), CUBE_FACES.len());
        assert_eq!(Shape::pyramid().faces().len(), PYRAMID_SIDES.len() + 1);
    }

    #[test]
    fn new_rejects_invalid_face() {
        let result = Shape::new(vec![Vec3::ZERO, Vec3::RIGHT, Vec3::UP], vec![vec![0, 1, 5]]);
        assert!(matches!(result, Err(FaceError::IndexOutOfRange { .. })));
    }

    #[test]
    fn obj_faces_are_rewound_and_degenerates_skipped() {
        let path = std::env::temp_dir().join(format!("pinhole-test-{}.obj", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            // One counter-clockwise quad facing +Z and one collinear triangle.
            writeln!(file, "v -1 -1 0\nv 1 -1 0\nv 1 1 0\nv -1 1 0\nv 2 2 0\nv 3 3 0").unwrap();
            writeln!(file, "f 1 2 3 4\nf 1 5 6").unwrap();
        }
        let shape = Shape::from_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(shape.vertices().len(), 6);
        assert_eq!(shape.faces().len(), 1);
        assert_eq!(shape.faces()[0].indices(), &[3, 2, 1, 0]);
        assert_eq!(shape.faces()[0].normal(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn missing_obj_is_an_error() {
        assert!(Shape::from_obj("/definitely/not/here.obj").is_err());
    }
}
