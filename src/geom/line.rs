use serde::{Deserialize, Serialize};

use super::core::Vec2;

/// A 2D line segment from `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub a: Vec2,
    pub b: Vec2,
}

impl Line {
    #[must_use]
    pub const fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Segment starting at `point`, heading `angle` radians for `distance`.
    #[must_use]
    pub fn from_point_angle(point: Vec2, angle: f32, distance: f32) -> Self {
        Self::new(point, point + Vec2::from_angle(angle) * distance)
    }

    /// `b - a`.
    #[must_use]
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self::new(self.b, self.a)
    }

    /// Point at `a + t * (b - a)`. Any real `t` is accepted.
    #[must_use]
    pub fn evaluate(&self, t: f32) -> Vec2 {
        self.a + self.direction() * t
    }

    /// Heading of the segment in radians. A zero-length line has tangent 0.
    #[must_use]
    pub fn tangent(&self) -> f32 {
        self.direction().angle()
    }

    /// Rise over run. Vertical lines give ±∞ (or NaN when also zero-length).
    #[must_use]
    pub fn slope(&self) -> f32 {
        let d = self.direction();
        d.y / d.x
    }

    /// `y` where the infinite line crosses `x = 0`. Meaningless for vertical lines.
    #[must_use]
    pub fn y_intercept(&self) -> f32 {
        self.a.y - self.slope() * self.a.x
    }

    #[must_use]
    pub fn distance(&self) -> f32 {
        self.direction().length()
    }
}
