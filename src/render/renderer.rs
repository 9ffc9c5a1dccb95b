//! Software rendering target.
//!
//! Provides the [`Renderer`] struct which owns the color buffer and implements
//! basic drawing operations like lines, rectangles, points and filled polygons.

use std::path::Path;

use log::{info, warn};

use super::colors;
use super::fill::fill_convex;
use super::Canvas;
use crate::error::Error;
use crate::math::vec2::Vec2;

/// Half-size in pixels of the square drawn for a vertex.
const POINT_RADIUS: i32 = 2;

/// Pixel count of a `width` x `height` buffer, computed in `usize` so large
/// dimensions cannot wrap. `None` if the product does not fit.
fn buffer_len(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)
}

pub struct Renderer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Renderer {
    /// Creates a `width` x `height` buffer. A size whose pixel count does
    /// not fit in memory yields an empty 0x0 renderer.
    pub fn new(width: u32, height: u32) -> Self {
        let mut renderer = Self {
            color_buffer: Vec::new(),
            width: 0,
            height: 0,
        };
        renderer.resize(width, height);
        renderer
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let Some(len) = buffer_len(width, height) else {
            warn!("Frame size {}x{} is too large, keeping an empty buffer", width, height);
            self.color_buffer = Vec::new();
            self.width = 0;
            self.height = 0;
            return;
        };
        self.color_buffer = vec![colors::BACKGROUND; len];
        self.width = width;
        self.height = height;
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(pixel) = self.index(x, y).and_then(|i| self.color_buffer.get_mut(i)) {
            *pixel = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).and_then(|i| self.color_buffer.get(i).copied())
    }

    pub fn draw_grid(&mut self, spacing: i32, color: u32) {
        if spacing <= 0 {
            return;
        }
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if x % spacing == 0 || y % spacing == 0 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    #[inline]
    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        for dy in 0..height {
            for dx in 0..width {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Draws a line between two pixels using Bresenham's line algorithm.
    ///
    /// Only integer arithmetic is used: an error term tracks the distance
    /// between the ideal line and the current pixel, and once it passes a
    /// threshold the walk also steps along the minor axis.
    pub fn draw_line_bresenham(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        // Positive favors x movement, negative favors y.
        let mut err = dx - dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;

            // Both can fire, giving a diagonal step.
            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }
            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }
    }

    /// Returns the color buffer as bytes (ARGB8888, little endian)
    pub fn to_argb_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|c| c.to_le_bytes())
            .collect()
    }

    /// Writes the color buffer to an image file; the format follows the
    /// file extension.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let mut image = image::RgbaImage::new(self.width, self.height);
        for (pixel, &color) in image.pixels_mut().zip(&self.color_buffer) {
            *pixel = image::Rgba(colors::to_rgba(color));
        }
        image.save(path)?;
        info!("Saved {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Screen coordinates far outside the surface are clamped before the
/// integer line walk so it stays short.
const LINE_LIMIT: f32 = 1.0e6;

fn to_pixel(v: f32) -> i32 {
    v.clamp(-LINE_LIMIT, LINE_LIMIT).floor() as i32
}

impl Canvas for Renderer {
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: u32) {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return;
        }
        self.draw_line_bresenham(
            to_pixel(from.x),
            to_pixel(from.y),
            to_pixel(to.x),
            to_pixel(to.y),
            color,
        );
    }

    fn draw_point(&mut self, at: Vec2, color: u32) {
        if !(at.x.is_finite() && at.y.is_finite()) {
            return;
        }
        let size = POINT_RADIUS * 2 + 1;
        self.draw_rect(
            to_pixel(at.x) - POINT_RADIUS,
            to_pixel(at.y) - POINT_RADIUS,
            size,
            size,
            color,
        );
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: u32) {
        let (width, height) = (self.width, self.height);
        fill_convex(points, width, height, |x, y| self.set_pixel(x, y, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFFFF0000;

    #[test]
    fn set_pixel_ignores_out_of_bounds() {
        let mut r = Renderer::new(4, 4);
        r.set_pixel(-1, 0, RED);
        r.set_pixel(4, 0, RED);
        r.set_pixel(1, 2, RED);
        assert_eq!(r.pixel(1, 2), Some(RED));
        assert_eq!(r.pixel(4, 0), None);
        assert_eq!(
            r.color_buffer.iter().filter(|&&c| c == RED).count(),
            1
        );
    }

    #[test]
    fn bresenham_hits_both_endpoints() {
        let mut r = Renderer::new(10, 10);
        r.draw_line_bresenham(1, 1, 8, 4, RED);
        assert_eq!(r.pixel(1, 1), Some(RED));
        assert_eq!(r.pixel(8, 4), Some(RED));
        // One pixel per column along the major axis.
        assert_eq!(r.color_buffer.iter().filter(|&&c| c == RED).count(), 8);
    }

    #[test]
    fn canvas_line_skips_non_finite() {
        let mut r = Renderer::new(10, 10);
        r.draw_line(Vec2::new(0.0, 0.0), Vec2::new(f32::NAN, 3.0), RED);
        assert!(r.color_buffer.iter().all(|&c| c == colors::BACKGROUND));
    }

    #[test]
    fn canvas_line_clamps_far_endpoints() {
        let mut r = Renderer::new(10, 10);
        r.draw_line(Vec2::new(5.5, 5.5), Vec2::new(5.5, 1.0e12), RED);
        assert_eq!(r.pixel(5, 5), Some(RED));
        assert_eq!(r.pixel(5, 9), Some(RED));
        assert_eq!(r.pixel(5, 4), Some(colors::BACKGROUND));
    }

    #[test]
    fn point_is_a_small_square() {
        let mut r = Renderer::new(10, 10);
        r.draw_point(Vec2::new(5.0, 5.0), RED);
        assert_eq!(r.color_buffer.iter().filter(|&&c| c == RED).count(), 25);
    }

    #[test]
    fn fill_polygon_covers_interior() {
        let mut r = Renderer::new(10, 10);
        r.fill_polygon(
            &[
                Vec2::new(1.0, 1.0),
                Vec2::new(9.0, 1.0),
                Vec2::new(9.0, 9.0),
                Vec2::new(1.0, 9.0),
            ],
            RED,
        );
        assert_eq!(r.pixel(5, 5), Some(RED));
        assert_eq!(r.pixel(0, 0), Some(colors::BACKGROUND));
    }

    #[test]
    fn argb_bytes_are_little_endian() {
        let mut r = Renderer::new(1, 1);
        r.clear(0xAABBCCDD);
        assert_eq!(r.to_argb_bytes(), vec![0xDD, 0xCC, 0xBB, 0xAA]);
    }

    #[test]
    fn resize_reallocates() {
        let mut r = Renderer::new(2, 2);
        r.resize(3, 5);
        assert_eq!((r.width(), r.height()), (3, 5));
        assert_eq!(r.pixel(2, 4), Some(colors::BACKGROUND));
    }

    #[test]
    fn buffer_len_is_computed_without_wrapping() {
        assert_eq!(buffer_len(800, 600), Some(480_000));
        assert_eq!(buffer_len(0, 600), Some(0));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(buffer_len(70_000, 70_000), Some(4_900_000_000));
    }

    #[test]
    fn pixel_index_uses_full_width() {
        // y * width overflows u32 for this size; the index must not.
        let r = Renderer {
            color_buffer: Vec::new(),
            width: 70_000,
            height: 70_000,
        };
        assert_eq!(r.index(1, 69_999), Some(69_999 * 70_000 + 1));
        assert_eq!(r.pixel(1, 69_999), None);
    }

    #[test]
    fn saves_png() {
        let path = std::env::temp_dir().join(format!("pinhole-frame-{}.png", std::process::id()));
        let mut r = Renderer::new(3, 2);
        r.set_pixel(0, 0, RED);
        r.save_png(&path).unwrap();

        let image = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 0).0, [0xFF, 0, 0, 0xFF]);
    }
}
