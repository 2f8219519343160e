//! Plane geometry helpers
//!
//! Pure functions shared by movement, perception and collision checks.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Round-off allowance for inclusive range and cone comparisons.
pub const EPSILON: f64 = 1e-9;

/// A point on the simulation plane (screen space, +y points down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by a polar displacement.
    pub fn offset(self, angle: f64, magnitude: f64) -> Self {
        let (dx, dy) = to_cartesian(angle, magnitude);
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Convert a displacement to `(angle, magnitude)`; angle is in `-π..=π`.
pub fn to_polar(dx: f64, dy: f64) -> (f64, f64) {
    (dy.atan2(dx), dx.hypot(dy))
}

/// Convert `(angle, magnitude)` back to a displacement.
pub fn to_cartesian(angle: f64, magnitude: f64) -> (f64, f64) {
    (magnitude * angle.cos(), magnitude * angle.sin())
}

/// Two circles touch when their centres are no further apart than the sum of
/// their radii. Tangent circles count as touching.
pub fn circles_touching(c1: Point, c2: Point, r1: f64, r2: f64) -> bool {
    distance(c1, c2) <= r1 + r2
}

/// Wrap an angle into `(-π, π]`.
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Signed difference `to - from`, wrapped into `(-π, π]`.
pub fn angle_between(from: f64, to: f64) -> f64 {
    wrap_angle(to - from)
}

/// Axis-aligned rectangle, inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.min_x, self.max_x),
            point.y.clamp(self.min_y, self.max_y),
        )
    }
}
