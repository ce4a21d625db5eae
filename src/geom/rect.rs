use serde::{Deserialize, Serialize};

use super::aligned_box::AlignedBox;
use super::core::Vec2;

/// Rounding allowance, in ULPs of the coordinate scale, before a point or a
/// projection counts as outside an edge.
const BOUNDARY_ULPS: f32 = 64.0;

/// An oriented rectangle.
///
/// `angle` is the heading in radians (0 points along +x). `lengths.x` is the
/// full extent across the heading and `lengths.y` the full extent along it.
///
/// Corners are generated on demand, counter-clockwise starting at the
/// front-right: `a` front-right, `b` front-left, `c` back-left, `d` back-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub lengths: Vec2,
    pub angle: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(center: Vec2, lengths: Vec2, angle: f32) -> Self {
        Self {
            center,
            lengths,
            angle,
        }
    }

    /// Rectangle through three consecutive corners, `a` front-right, `b`
    /// front-left and `c` back-left.
    ///
    /// Counter-clockwise input round-trips through [`Rect::points3`]; clockwise
    /// input describes the same area with the labels mirrored.
    #[must_use]
    pub fn from_corners(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self {
            center: (a + c) * 0.5,
            lengths: Vec2::new(a.distance_to(b), b.distance_to(c)),
            angle: (b - c).angle(),
        }
    }

    /// Parallelogram closure: the corner opposite `b`.
    #[must_use]
    pub fn closing_corner(a: Vec2, b: Vec2, c: Vec2) -> Vec2 {
        a + c - b
    }

    fn corner(&self, along: f32, across: f32) -> Vec2 {
        let half = self.lengths * 0.5;
        self.center + Vec2::new(along * half.y, across * half.x).rotated(self.angle)
    }

    #[must_use]
    pub fn a(&self) -> Vec2 {
        self.corner(1.0, -1.0)
    }

    #[must_use]
    pub fn b(&self) -> Vec2 {
        self.corner(1.0, 1.0)
    }

    #[must_use]
    pub fn c(&self) -> Vec2 {
        self.corner(-1.0, 1.0)
    }

    #[must_use]
    pub fn d(&self) -> Vec2 {
        self.corner(-1.0, -1.0)
    }

    #[must_use]
    pub fn points3(&self) -> [Vec2; 3] {
        [self.a(), self.b(), self.c()]
    }

    #[must_use]
    pub fn points4(&self) -> [Vec2; 4] {
        [self.a(), self.b(), self.c(), self.d()]
    }

    /// Component-wise maximum over the corners.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        let [a, b, c, d] = self.points4();
        a.max(b).max(c).max(d)
    }

    /// Component-wise minimum over the corners.
    #[must_use]
    pub fn min(&self) -> Vec2 {
        let [a, b, c, d] = self.points4();
        a.min(b).min(c).min(d)
    }

    #[must_use]
    pub fn aligned_bounds(&self) -> AlignedBox {
        AlignedBox::new(self.min(), self.max())
    }

    /// Inclusive containment test against the rectangle spanned by three
    /// consecutive corners. Points within rounding distance of an edge count
    /// as on it.
    #[must_use]
    pub fn is_point_on_or_inside(points: [Vec2; 3], point: Vec2) -> bool {
        let [a, b, c] = points;
        let scale = coordinate_scale(&[a, b, c, point]);
        let within = |edge: Vec2, from: Vec2| {
            let along = edge.dot(point - from);
            let span = edge.dot(edge);
            let slack = boundary_slack(scale) * edge.length();
            along >= -slack && along <= span + slack
        };
        within(b - a, a) && within(c - b, b)
    }

    /// Inclusive containment test in the rectangle's own frame.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let local = (point - self.center).rotated(-self.angle);
        let half = self.lengths * 0.5;
        let slack = boundary_slack(coordinate_scale(&[self.center, half, point]));
        local.x.abs() <= half.y + slack && local.y.abs() <= half.x + slack
    }

    fn axes(&self) -> [Vec2; 2] {
        let heading = Vec2::from_angle(self.angle);
        [heading, heading.perp()]
    }

    /// Separating-axis test. Touching rectangles intersect, including when
    /// rotation rounding opens a gap of a few ULPs between shared edges.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let ours = self.points4();
        let theirs = other.points4();
        let [a0, a1] = self.axes();
        let [b0, b1] = other.axes();
        [a0, a1, b0, b1].into_iter().all(|axis| {
            let (min_a, max_a) = project(&ours, axis);
            let (min_b, max_b) = project(&theirs, axis);
            let extent = min_a.abs().max(max_a.abs()).max(min_b.abs()).max(max_b.abs());
            let slack = boundary_slack(extent);
            !(max_a + slack < min_b || max_b + slack < min_a)
        })
    }
}

/// Boundary tolerance for coordinates of magnitude `scale`: a fixed number of
/// ULPs, never less than the ULPs of 1.
fn boundary_slack(scale: f32) -> f32 {
    BOUNDARY_ULPS * f32::EPSILON * scale.max(1.0)
}

fn coordinate_scale(points: &[Vec2]) -> f32 {
    points
        .iter()
        .fold(0.0_f32, |m, p| m.max(p.x.abs()).max(p.y.abs()))
}

fn project(points: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    points
        .iter()
        .map(|p| p.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}
