use serde::{Deserialize, Serialize};

use super::core::{Tolerance, Vec2};
use super::cubic::{Cubic, curvature_quality};

/// Uniform samples taken before refining the maximum-curvature bracket.
pub const KAPPA_COARSE_SAMPLES: usize = 64;

/// Iteration cap for the golden-section refinement in
/// [`AlignedCubic::max_kappa_parameter`].
pub const MAX_KAPPA_ITERATIONS: usize = 64;

const INV_GOLDEN: f32 = 0.618_034;

/// A [`Cubic`] moved so that `a` is the origin and `b` lies on the positive
/// x-axis at `(b_x, 0)`.
///
/// Only used for curvature; there is no way back to world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedCubic {
    pub c: Vec2,
    pub d: Vec2,
    pub b_x: f32,
}

/// `B'`, `B''` and `B'''` at one parameter.
struct Derivatives {
    first: Vec2,
    second: Vec2,
    third: Vec2,
}

impl AlignedCubic {
    #[must_use]
    pub const fn new(c: Vec2, d: Vec2, b_x: f32) -> Self {
        Self { c, d, b_x }
    }

    /// Translate `a` to the origin and rotate `b` onto +x.
    ///
    /// A degenerate chord is only translated.
    #[must_use]
    pub fn from_cubic(cubic: &Cubic) -> Self {
        let chord = cubic.b - cubic.a;
        let theta = if Tolerance::ZERO_LENGTH.is_zero_vec2(chord) {
            log::debug!("aligning cubic with zero-length chord at {:?}", cubic.a);
            0.0
        } else {
            -chord.angle()
        };
        Self {
            c: (cubic.c - cubic.a).rotated(theta),
            d: (cubic.d - cubic.a).rotated(theta),
            b_x: chord.rotated(theta).x.max(0.0),
        }
    }

    #[must_use]
    pub const fn b(&self) -> Vec2 {
        Vec2::new(self.b_x, 0.0)
    }

    fn derivatives(&self, t: f32) -> Derivatives {
        let u = 1.0 - t;
        let (b, c, d) = (self.b(), self.c, self.d);
        Derivatives {
            first: c * (3.0 * u * u) + (d - c) * (6.0 * u * t) + (b - d) * (3.0 * t * t),
            second: (d - c * 2.0) * (6.0 * u) + (b - d * 2.0 + c) * (6.0 * t),
            third: (b - d * 3.0 + c * 3.0) * 6.0,
        }
    }

    /// Signed curvature at `t`. Zero where the curve has no speed.
    #[must_use]
    pub fn kappa(&self, t: f32) -> f32 {
        let Derivatives { first, second, .. } = self.derivatives(t);
        let speed_sq = first.length_squared();
        if speed_sq.sqrt() < Tolerance::ZERO_LENGTH.eps {
            return 0.0;
        }
        first.cross(second) / (speed_sq * speed_sq.sqrt())
    }

    /// Derivative of [`AlignedCubic::kappa`] with respect to `t`.
    #[must_use]
    pub fn kappa_prime(&self, t: f32) -> f32 {
        let Derivatives {
            first,
            second,
            third,
        } = self.derivatives(t);
        let speed_sq = first.length_squared();
        let speed = speed_sq.sqrt();
        if speed < Tolerance::ZERO_LENGTH.eps {
            return 0.0;
        }
        let n = first.cross(second);
        let n_prime = first.cross(third);
        let d_prime = 2.0 * first.dot(second);
        n_prime / (speed_sq * speed) - 1.5 * n * d_prime / (speed_sq * speed_sq * speed)
    }

    /// Radius of the osculating circle, `1 / kappa`. Infinite on straight parts.
    #[must_use]
    pub fn curve_radius(&self, t: f32) -> f32 {
        1.0 / self.kappa(t)
    }

    /// The `t` in `[0, 1]` where `|kappa|` is largest, to within `accuracy`.
    ///
    /// Coarse uniform sampling picks a bracket, then golden-section search
    /// narrows it. A curve with no curvature anywhere returns 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn max_kappa_parameter(&self, accuracy: f32) -> f32 {
        let samples = KAPPA_COARSE_SAMPLES as f32;
        let mut best = 0;
        let mut best_value = self.kappa(0.0).abs();
        for i in 1..=KAPPA_COARSE_SAMPLES {
            let value = self.kappa(i as f32 / samples).abs();
            if value > best_value {
                best = i;
                best_value = value;
            }
        }
        if best_value <= 0.0 {
            return 0.0;
        }

        let mut lo = (best.saturating_sub(1) as f32 / samples).max(0.0);
        let mut hi = ((best + 1) as f32 / samples).min(1.0);
        let mut x1 = hi - INV_GOLDEN * (hi - lo);
        let mut x2 = lo + INV_GOLDEN * (hi - lo);
        let mut f1 = self.kappa(x1).abs();
        let mut f2 = self.kappa(x2).abs();
        let mut iterations = 0;
        while hi - lo > accuracy * 0.5 {
            if iterations == MAX_KAPPA_ITERATIONS {
                log::trace!("max_kappa_parameter hit iteration cap, bracket [{lo}, {hi}]");
                break;
            }
            if f1 < f2 {
                lo = x1;
                x1 = x2;
                f1 = f2;
                x2 = lo + INV_GOLDEN * (hi - lo);
                f2 = self.kappa(x2).abs();
            } else {
                hi = x2;
                x2 = x1;
                f2 = f1;
                x1 = hi - INV_GOLDEN * (hi - lo);
                f1 = self.kappa(x1).abs();
            }
            iterations += 1;
        }
        (0.5 * (lo + hi)).clamp(0.0, 1.0)
    }

    /// Same predicate as [`Cubic::is_normalized_for_curvature`], evaluated in
    /// the aligned frame.
    #[must_use]
    pub fn is_normalized_for_curvature(&self, straight_angle: f32, curvature_error: f32) -> bool {
        curvature_quality(
            self.b(),
            self.c,
            self.b() - self.d,
            straight_angle,
            curvature_error,
        )
    }
}

impl From<Cubic> for AlignedCubic {
    fn from(cubic: Cubic) -> Self {
        Self::from_cubic(&cubic)
    }
}
