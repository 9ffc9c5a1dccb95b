//! Clipping of screen-space edges against the viewport rectangle.
//!
//! Only edges with exactly one clipped endpoint are trimmed. The unclipped
//! endpoint is kept and the edge is cut at the first viewport boundary it
//! crosses on the way to the clipped endpoint. Edges with both endpoints
//! clipped are rejected outright, even if the segment between them would
//! pass through the viewport.

use crate::math::vec2::Vec2;
use crate::pipeline::ScreenVertex;
use crate::projection::Viewport;

/// Axis deltas at or below this are treated as parallel to the boundary.
pub const DELTA_EPSILON: f32 = 1e-6;

/// A drawable line segment in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }
}

/// Outcome of clipping one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeClip {
    /// Neither endpoint was clipped; draw as-is.
    Whole(Segment),
    /// One endpoint was clipped; `start` is the kept endpoint and `end` the
    /// boundary intersection.
    Trimmed(Segment),
    /// Both endpoints were clipped.
    BothClipped,
    /// One endpoint was clipped but no boundary crossing was found.
    NoCrossing,
}

impl EdgeClip {
    /// The segment to draw, if any.
    pub fn segment(&self) -> Option<Segment> {
        match self {
            Self::Whole(s) | Self::Trimmed(s) => Some(*s),
            Self::BothClipped | Self::NoCrossing => None,
        }
    }
}

/// Clips the edge `a → b` against `viewport`.
pub fn clip_edge(a: &ScreenVertex, b: &ScreenVertex, viewport: Viewport) -> EdgeClip {
    match (a.clipped, b.clipped) {
        (false, false) => EdgeClip::Whole(Segment::new(a.position, b.position)),
        (true, true) => EdgeClip::BothClipped,
        (false, true) => trim(a.position, b.position, viewport),
        (true, false) => trim(b.position, a.position, viewport),
    }
}

/// Cuts `inside → outside` at the first viewport boundary it crosses.
fn trim(inside: Vec2, outside: Vec2, viewport: Viewport) -> EdgeClip {
    match first_crossing(inside, outside, viewport) {
        Some(t) => EdgeClip::Trimmed(Segment::new(inside, inside.lerp(outside, t))),
        None => EdgeClip::NoCrossing,
    }
}

/// Smallest non-negative parameter at which the line from `inside` toward
/// `outside` meets `x = 0`, `x = width`, `y = 0` or `y = height`.
pub fn first_crossing(inside: Vec2, outside: Vec2, viewport: Viewport) -> Option<f32> {
    let delta = outside - inside;
    let mut candidates = Vec::with_capacity(4);

    if delta.x.abs() > DELTA_EPSILON {
        candidates.push((0.0 - inside.x) / delta.x);
        candidates.push((viewport.width - inside.x) / delta.x);
    }
    if delta.y.abs() > DELTA_EPSILON {
        candidates.push((0.0 - inside.y) / delta.y);
        candidates.push((viewport.height - inside.y) / delta.y);
    }

    candidates
        .into_iter()
        .filter(|t| t.is_finite() && *t >= 0.0)
        .min_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vertex(x: f32, y: f32, clipped: bool) -> ScreenVertex {
        ScreenVertex {
            position: Vec2::new(x, y),
            clipped,
            visible: !clipped,
        }
    }

    const VIEWPORT: Viewport = Viewport {
        width: 200.0,
        height: 200.0,
    };

    #[test]
    fn unclipped_edge_is_kept_whole() {
        let a = vertex(10.0, 20.0, false);
        let b = vertex(150.0, 120.0, false);
        assert_eq!(
            clip_edge(&a, &b, VIEWPORT),
            EdgeClip::Whole(Segment::new(a.position, b.position))
        );
    }

    #[test]
    fn doubly_clipped_edge_is_skipped() {
        let a = vertex(-10.0, 50.0, true);
        let b = vertex(250.0, 50.0, true);
        let clip = clip_edge(&a, &b, VIEWPORT);
        assert_eq!(clip, EdgeClip::BothClipped);
        assert!(clip.segment().is_none());
    }

    #[test]
    fn trims_at_left_boundary() {
        let inside = vertex(50.0, 50.0, false);
        let outside = vertex(-30.0, 50.0, true);
        let segment = clip_edge(&inside, &outside, VIEWPORT).segment().unwrap();
        assert_eq!(segment.start, Vec2::new(50.0, 50.0));
        assert_relative_eq!(segment.end.x, 0.0);
        assert_relative_eq!(segment.end.y, 50.0);
    }

    #[test]
    fn kept_endpoint_is_always_the_start() {
        let inside = vertex(50.0, 50.0, false);
        let outside = vertex(-30.0, 50.0, true);
        let forward = clip_edge(&inside, &outside, VIEWPORT);
        let backward = clip_edge(&outside, &inside, VIEWPORT);
        assert_eq!(forward, backward);
    }

    #[test]
    fn picks_first_boundary_on_diagonal() {
        // Leaves through the bottom (y = 200) before reaching x = 200.
        let inside = vertex(100.0, 100.0, false);
        let outside = vertex(300.0, 500.0, true);
        let segment = clip_edge(&inside, &outside, VIEWPORT).segment().unwrap();
        assert_relative_eq!(segment.end.x, 150.0, epsilon = 1e-4);
        assert_relative_eq!(segment.end.y, 200.0, epsilon = 1e-4);
    }

    #[test]
    fn vertical_edge_skips_parallel_axis() {
        let inside = vertex(80.0, 20.0, false);
        let outside = vertex(80.0, -40.0, true);
        let segment = clip_edge(&inside, &outside, VIEWPORT).segment().unwrap();
        assert_relative_eq!(segment.end.x, 80.0);
        assert_relative_eq!(segment.end.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn coincident_endpoints_have_no_crossing() {
        let inside = vertex(80.0, 20.0, false);
        let outside = vertex(80.0, 20.0, true);
        assert_eq!(clip_edge(&inside, &outside, VIEWPORT), EdgeClip::NoCrossing);
    }
}
