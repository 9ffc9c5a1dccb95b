//! Convex polygon filling with edge functions.
//!
//! A polygon is split into a triangle fan around its first vertex and each
//! triangle is filled by testing pixel centers inside its bounding box
//! against the three edge functions:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! A pixel is inside when all three values share the sign of the
//! triangle's signed area, so both windings are filled.

use crate::math::vec2::Vec2;

#[inline]
fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Calls `plot(x, y)` for every pixel center covered by the convex polygon,
/// clamped to a `width` x `height` surface.
pub(crate) fn fill_convex(points: &[Vec2], width: u32, height: u32, mut plot: impl FnMut(i32, i32)) {
    if points.len() < 3 || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return;
    }
    let anchor = points[0];
    for pair in points[1..].windows(2) {
        fill_triangle(anchor, pair[0], pair[1], width, height, &mut plot);
    }
}

fn fill_triangle(
    v0: Vec2,
    v1: Vec2,
    v2: Vec2,
    width: u32,
    height: u32,
    plot: &mut impl FnMut(i32, i32),
) {
    let area = edge_function(v0, v1, v2);
    if area.abs() < f32::EPSILON {
        return;
    }

    let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
    let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(width as i32 - 1);
    let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
    let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(height as i32 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge_function(v1, v2, p);
            let w1 = edge_function(v2, v0, p);
            let w2 = edge_function(v0, v1, p);

            let inside = if area > 0.0 {
                w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
            } else {
                w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
            };
            if inside {
                plot(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn covered(points: &[Vec2], width: u32, height: u32) -> HashSet<(i32, i32)> {
        let mut pixels = HashSet::new();
        fill_convex(points, width, height, |x, y| {
            pixels.insert((x, y));
        });
        pixels
    }

    #[test]
    fn fills_square_in_either_winding() {
        let square = [
            Vec2::new(2.0, 2.0),
            Vec2::new(6.0, 2.0),
            Vec2::new(6.0, 6.0),
            Vec2::new(2.0, 6.0),
        ];
        let mut reversed = square;
        reversed.reverse();

        let a = covered(&square, 10, 10);
        assert_eq!(a, covered(&reversed, 10, 10));
        assert!(a.contains(&(2, 2)));
        assert!(a.contains(&(5, 5)));
        assert!(!a.contains(&(6, 6)));
        assert!(!a.contains(&(1, 3)));
    }

    #[test]
    fn clamps_to_surface() {
        let big = [
            Vec2::new(-50.0, -50.0),
            Vec2::new(50.0, -50.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(-50.0, 50.0),
        ];
        let pixels = covered(&big, 4, 3);
        assert_eq!(pixels.len(), 12);
    }

    #[test]
    fn skips_degenerate_input() {
        let line = [Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0), Vec2::new(9.0, 9.0)];
        assert!(covered(&line, 10, 10).is_empty());
        assert!(covered(&line[..2], 10, 10).is_empty());
        let nan = [Vec2::new(f32::NAN, 0.0), Vec2::new(5.0, 0.0), Vec2::new(5.0, 5.0)];
        assert!(covered(&nan, 10, 10).is_empty());
    }
}
