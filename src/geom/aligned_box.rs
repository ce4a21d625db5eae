use serde::{Deserialize, Serialize};

use super::core::Vec2;
use super::cubic::Cubic;

/// How [`AlignedBox::from_cubic`] bounds a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BoundingStrategy {
    /// Bound the four control points. Always contains the curve (convex hull
    /// property) but is not tight.
    #[default]
    Fastest,
}

/// Axis-aligned box with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedBox {
    pub min: Vec2,
    pub max: Vec2,
}

/// Alternate name used by rectangle-oriented callers.
pub type AlignedRect = AlignedBox;

impl AlignedBox {
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let mut iter = points.iter().copied();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self::new(min, max))
    }

    #[must_use]
    pub fn from_cubic(cubic: &Cubic, strategy: BoundingStrategy) -> Self {
        match strategy {
            BoundingStrategy::Fastest => {
                let min = cubic.a.min(cubic.b).min(cubic.c).min(cubic.d);
                let max = cubic.a.max(cubic.b).max(cubic.c).max(cubic.d);
                Self::new(min, max)
            }
        }
    }

    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.max - self.min) * 0.5 + self.min
    }

    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// `min`, `(max.x, min.y)`, `max`, `(min.x, max.y)`.
    #[must_use]
    pub const fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// Inclusive on every edge.
    #[must_use]
    pub fn is_point_on_or_inside(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Whether any corner of `self` lies strictly closer than `distance` to
    /// any corner of `other`.
    #[must_use]
    pub fn is_corner_within_distance(&self, other: &Self, distance: f32) -> bool {
        let limit = distance * distance;
        let theirs = other.corners();
        self.corners()
            .iter()
            .any(|ours| theirs.iter().any(|t| ours.distance_squared_to(*t) < limit))
    }
}
