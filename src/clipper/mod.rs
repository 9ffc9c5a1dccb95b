//! Visibility tests and clipping.
//!
//! - [`frustum`]: projection into homogeneous clip space and the per-vertex
//!   frustum test that sets the `clipped` flag.
//! - [`viewport`]: 2D clipping of screen-space edges that have exactly one
//!   clipped endpoint against the viewport rectangle.

pub mod frustum;
pub mod viewport;

pub use frustum::{ClipPlane, ClipVertex, Frustum};
pub use viewport::{clip_edge, EdgeClip, Segment};
