//! Drawing of projected frames.
//!
//! The projection stages only produce screen-space data. Anything that can
//! plot lines, points and filled polygons implements [`Canvas`] and can
//! display a frame; [`Renderer`] is the built-in software implementation.

pub mod colors;
mod fill;
mod renderer;

pub use renderer::Renderer;

use crate::math::vec2::Vec2;

/// A surface that projected geometry can be drawn onto.
///
/// Colors are packed ARGB8888 (see [`colors`]). Coordinates are screen
/// pixels with the origin at the top-left; implementations ignore anything
/// that falls outside their bounds.
pub trait Canvas {
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: u32);

    fn draw_point(&mut self, at: Vec2, color: u32);

    /// Fills a convex polygon given in vertex order, either winding.
    fn fill_polygon(&mut self, points: &[Vec2], color: u32);
}
