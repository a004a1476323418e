//! Line segment geometry and the intersection oracle
//!
//! Everything the levels are built from (walls, doors, gates, button hit
//! regions) and every piece of the snake trail is a closed line segment.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tolerance for orientation tests (world units squared)
const EPSILON: f32 = 1e-6;

/// A closed line segment from `start` to `end`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Degenerate segment covering a single point
    pub const fn point(p: Vec2) -> Self {
        Self { start: p, end: p }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Unit direction, or zero for a degenerate segment
    #[inline]
    pub fn direction(&self) -> Vec2 {
        (self.end - self.start).normalize_or_zero()
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        (self.end - self.start).length_squared() < EPSILON
    }

    /// Closest distance from a point to this segment
    pub fn distance_to_point(&self, p: Vec2) -> f32 {
        let line = self.end - self.start;
        let len_sq = line.length_squared();
        if len_sq < EPSILON {
            return self.start.distance(p);
        }
        let t = ((p - self.start).dot(line) / len_sq).clamp(0.0, 1.0);
        (self.start + line * t).distance(p)
    }

    /// Does this segment intersect any segment in the set?
    pub fn intersects_any(&self, others: &[Segment]) -> bool {
        others.iter().any(|other| intersect(self, other))
    }
}

/// Which side of line `a → b` point `p` lies on: +1, -1, or 0 when collinear
fn orientation(a: Vec2, b: Vec2, p: Vec2) -> i8 {
    let cross = (b - a).perp_dot(p - a);
    if cross > EPSILON {
        1
    } else if cross < -EPSILON {
        -1
    } else {
        0
    }
}

/// `p` is collinear with `a → b`; is it within the segment's bounding box?
fn within_bounds(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x <= a.x.max(b.x) + EPSILON
        && p.x >= a.x.min(b.x) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
}

/// Do two closed segments share at least one point?
///
/// Touching endpoints and collinear overlap both count.
pub fn intersect(a: &Segment, b: &Segment) -> bool {
    let o1 = orientation(a.start, a.end, b.start);
    let o2 = orientation(a.start, a.end, b.end);
    let o3 = orientation(b.start, b.end, a.start);
    let o4 = orientation(b.start, b.end, a.end);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear cases: an endpoint lying on the other segment
    (o1 == 0 && within_bounds(a.start, a.end, b.start))
        || (o2 == 0 && within_bounds(a.start, a.end, b.end))
        || (o3 == 0 && within_bounds(b.start, b.end, a.start))
        || (o4 == 0 && within_bounds(b.start, b.end, a.end))
}
