//! A CPU-side 3D projection pipeline.
//!
//! Model-space vertices are carried through local, world, view, clip, NDC
//! and screen space one pure stage at a time. Every vertex yields a
//! read-only [`VertexRecord`](pipeline::VertexRecord) holding all six
//! positions plus its clip and visibility flags. On top of that sit a
//! viewport line clipper, backface culling and a small software renderer.
//!
//! # Quick Start
//!
//! ```no_run
//! use pinhole::prelude::*;
//!
//! let camera = Camera::new(Vec3::ZERO, Projection::default());
//! let cube = Shape::cube().with_pose(Pose::at(Vec3::new(0.0, 0.0, -5.0)));
//! let projector = Projector::new(&camera, Viewport::new(800, 600));
//! let frame = project_shape(&cube, &projector, true);
//! assert_eq!(frame.vertices.len(), 8);
//! ```

pub mod camera;
pub mod clipper;
pub mod config;
pub mod engine;
pub mod error;
pub mod face;
pub mod input;
pub mod math;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod shape;
pub mod transform;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use engine::{Engine, RenderMode};
pub use error::Error;
pub use pipeline::{Projector, VertexRecord};
pub use shape::Shape;

/// Prelude module for convenient imports.
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, CameraController};

    // Engine
    pub use crate::engine::{project_shape, Engine, ProjectedShape, RenderMode};

    // Geometry
    pub use crate::face::Face;
    pub use crate::shape::{Shape, ShapeKind};
    pub use crate::transform::{Pose, Rotation};

    // Pipeline
    pub use crate::clipper::{clip_edge, EdgeClip, Frustum};
    pub use crate::pipeline::{Projector, VertexRecord};
    pub use crate::projection::{Projection, Viewport};

    // Math
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Input & config
    pub use crate::config::SceneConfig;
    pub use crate::input::InputState;

    // Rendering
    pub use crate::render::{Canvas, Renderer};
}
