use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Vec2
// ─────────────────────────────────────────────────────────────────────────────

/// A 2D point or vector in single precision.
///
/// `PartialEq` is exact. Use [`Vec2::approx_eq`] or a [`Tolerance`] for the
/// epsilon-tolerant comparison the rest of the crate relies on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// Unit vector along the X axis.
    pub const X: Self = Self::new(1.0, 0.0);
    /// Unit vector along the Y axis.
    pub const Y: Self = Self::new(0.0, 1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn from_array(arr: [f32; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }

    #[must_use]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Unit vector pointing at `angle` radians from +x.
    #[must_use]
    pub fn from_angle(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, s)
    }

    /// Angle of this vector from +x, in `(-π, π]`. The zero vector, of either
    /// sign, yields 0.
    #[must_use]
    pub fn angle(self) -> f32 {
        if self == Self::ZERO {
            return 0.0;
        }
        self.y.atan2(self.x)
    }

    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub const fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Z component of the 3D cross product.
    #[must_use]
    pub const fn cross(self, rhs: Self) -> f32 {
        self.x * rhs.y - self.y * rhs.x
    }

    /// Counter-clockwise perpendicular.
    #[must_use]
    pub const fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f32 {
        (other - self).length()
    }

    #[must_use]
    pub fn distance_squared_to(self, other: Self) -> f32 {
        (other - self).length_squared()
    }

    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len.is_finite() && len > 0.0 {
            Some(Self::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Rotate counter-clockwise about the origin.
    #[must_use]
    pub fn rotated(self, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    /// Returns `self * (1 - t) + rhs * t`.
    #[must_use]
    pub fn lerp(self, rhs: Self, t: f32) -> Self {
        Self::new(
            self.x + (rhs.x - self.x) * t,
            self.y + (rhs.y - self.y) * t,
        )
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, rhs: Self) -> Self {
        Self::new(self.x.min(rhs.x), self.y.min(rhs.y))
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, rhs: Self) -> Self {
        Self::new(self.x.max(rhs.x), self.y.max(rhs.y))
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// L1 comparison within `tol`; see [`Tolerance::approx_eq_vec2`].
    #[must_use]
    pub fn approx_eq(self, other: Self, tol: Tolerance) -> bool {
        tol.approx_eq_vec2(self, other)
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(arr: [f32; 2]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(v: Vec2) -> Self {
        v.to_array()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Self::Output {
        Vec2::new(self * rhs.x, self * rhs.y)
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transform2
// ─────────────────────────────────────────────────────────────────────────────

/// 2D homogeneous transform (row-major 3x3, column vectors).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2 {
    m: [[f32; 3]; 3],
}

impl Transform2 {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    #[must_use]
    pub const fn translate(offset: Vec2) -> Self {
        Self {
            m: [[1.0, 0.0, offset.x], [0.0, 1.0, offset.y], [0.0, 0.0, 1.0]],
        }
    }

    #[must_use]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            m: [[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    #[must_use]
    pub fn rotate(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// `self * other`: applies `other` first, then `self`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        let mut out = [[0.0_f32; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        Self { m: out }
    }

    /// Multiply `(x, y, w)` by the matrix.
    #[must_use]
    pub fn apply(&self, v: [f32; 3]) -> [f32; 3] {
        let m = &self.m;
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }

    /// Transform a point (`w = 1`) and return the homogeneous result.
    #[must_use]
    pub fn apply_point(&self, p: Vec2) -> [f32; 3] {
        self.apply([p.x, p.y, 1.0])
    }
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::identity()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub eps: f32,
}

impl Tolerance {
    /// Everyday comparison tolerance (1e-3).
    pub const NEARLY: Self = Self { eps: 1e-3 };

    /// Tight tolerance for solver thresholds and regression values (1e-4).
    pub const TIGHT: Self = Self { eps: 1e-4 };

    /// Tolerance for detecting zero-length/degenerate vectors (1e-6).
    pub const ZERO_LENGTH: Self = Self { eps: 1e-6 };

    #[must_use]
    pub const fn new(eps: f32) -> Self {
        Self { eps }
    }

    #[must_use]
    pub fn approx_eq_f32(self, a: f32, b: f32) -> bool {
        (a - b).abs() < self.eps
    }

    /// `|a.x - b.x| + |a.y - b.y| < eps`.
    #[must_use]
    pub fn approx_eq_vec2(self, a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() + (a.y - b.y).abs() < self.eps
    }

    #[must_use]
    pub fn is_zero_length(self, len: f32) -> bool {
        len.abs() < self.eps
    }

    #[must_use]
    pub fn is_zero_vec2(self, v: Vec2) -> bool {
        v.length_squared() < self.eps * self.eps
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::NEARLY
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_vec2_operators() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);

        assert_eq!(a + b, Vec2::new(5.0, 8.0));
        assert_eq!(b - a, Vec2::new(3.0, 4.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(2.0 * a, Vec2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vec2::new(2.0, 3.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
        assert_eq!((b - a).length(), 5.0);
    }

    #[test]
    fn test_vec2_angle_round_trip() {
        let v = Vec2::from_angle(0.7);
        assert!((v.angle() - 0.7).abs() < 1e-6);
        assert_eq!(Vec2::ZERO.angle(), 0.0);
        assert_eq!(Vec2::new(-0.0, 0.0).angle(), 0.0);
        assert_eq!(Vec2::new(-0.0, -0.0).angle(), 0.0);
        assert!(Vec2::ZERO.normalized().is_none());
    }

    #[test]
    fn test_vec2_rotated() {
        let r = Vec2::X.rotated(FRAC_PI_2);
        assert!(r.approx_eq(Vec2::Y, Tolerance::TIGHT));
    }

    #[test]
    fn test_tolerance_is_l1() {
        let tol = Tolerance::NEARLY;
        assert!(tol.approx_eq_vec2(Vec2::new(0.0, 0.0), Vec2::new(0.0004, 0.0004)));
        // Each axis is within eps, but the sum is not.
        assert!(!tol.approx_eq_vec2(Vec2::new(0.0, 0.0), Vec2::new(0.0006, 0.0006)));
        assert!(!tol.approx_eq_f32(1.0, 1.001));
        assert_eq!(Tolerance::default(), Tolerance::NEARLY);
    }

    #[test]
    fn test_transform2_compose_and_apply() {
        let t = Transform2::translate(Vec2::new(10.0, 0.0)).compose(&Transform2::scale(2.0, 3.0));
        assert_eq!(t.apply_point(Vec2::new(1.0, 1.0)), [12.0, 3.0, 1.0]);
        assert_eq!(Transform2::identity().apply([4.0, 5.0, 1.0]), [4.0, 5.0, 1.0]);

        let r = Transform2::rotate(FRAC_PI_2).apply_point(Vec2::X);
        assert!(r[0].abs() < 1e-6 && (r[1] - 1.0).abs() < 1e-6);
    }
}
