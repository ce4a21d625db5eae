use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::aligned_box::{AlignedBox, BoundingStrategy};
use super::aligned_cubic::AlignedCubic;
use super::core::{Tolerance, Vec2};
use super::line::Line;

/// Number of equal panels used by the composite arc-length quadrature.
pub const QUADRATURE_PANELS: usize = 8;

/// Iteration cap for [`Cubic::parameterization`].
pub const MAX_PARAMETERIZATION_ITERATIONS: usize = 32;

/// 5-point Gauss–Legendre nodes and weights on `[-1, 1]`.
const GAUSS_LEGENDRE_5: [(f32, f32); 5] = [
    (0.0, 0.568_888_9),
    (-0.538_469_3, 0.478_628_67),
    (0.538_469_3, 0.478_628_67),
    (-0.906_179_8, 0.236_926_89),
    (0.906_179_8, 0.236_926_89),
];

// ─────────────────────────────────────────────────────────────────────────────
// Cubic
// ─────────────────────────────────────────────────────────────────────────────

/// A cubic Bézier from `a` to `b`.
///
/// `c` is the handle leaving `a` and `d` is the handle arriving at `b`, so the
/// Bernstein control polygon is `a, c, d, b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cubic {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
    pub d: Vec2,
}

/// Both halves of a [`Cubic::split`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSplit {
    pub left: Cubic,
    pub right: Cubic,
}

impl Cubic {
    #[must_use]
    pub const fn new(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Self {
        Self { a, b, c, d }
    }

    /// Point on the curve. Exact at `t = 0` and `t = 1`.
    #[must_use]
    pub fn evaluate(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        let uu = u * u;
        let tt = t * t;
        self.a * (uu * u) + self.c * (3.0 * uu * t) + self.d * (3.0 * u * tt) + self.b * (tt * t)
    }

    /// First derivative `B'(t)`.
    #[must_use]
    pub fn derivative_at(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        (self.c - self.a) * (3.0 * u * u)
            + (self.d - self.c) * (6.0 * u * t)
            + (self.b - self.d) * (3.0 * t * t)
    }

    /// Second derivative `B''(t)`.
    #[must_use]
    pub fn second_derivative_at(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        (self.d - self.c * 2.0 + self.a) * (6.0 * u) + (self.b - self.d * 2.0 + self.c) * (6.0 * t)
    }

    /// Angle of the derivative at `t`.
    ///
    /// Short handles make this jump near the endpoints; [`Cubic::normalize`]
    /// first when that matters.
    #[must_use]
    pub fn tangent_at(&self, t: f32) -> f32 {
        self.derivative_at(t).angle()
    }

    // ── Subdivision ─────────────────────────────────────────────────────────

    /// De Casteljau subdivision. Both halves share `evaluate(t)` exactly.
    #[must_use]
    pub fn split(&self, t: f32) -> CubicSplit {
        let ac = self.a.lerp(self.c, t);
        let cd = self.c.lerp(self.d, t);
        let db = self.d.lerp(self.b, t);
        let left_d = ac.lerp(cd, t);
        let right_c = cd.lerp(db, t);
        let join = self.evaluate(t);
        CubicSplit {
            left: Self::new(self.a, join, ac, left_d),
            right: Self::new(join, self.b, right_c, db),
        }
    }

    #[must_use]
    pub fn left_split(&self, t: f32) -> Self {
        self.split(t).left
    }

    #[must_use]
    pub fn right_split(&self, t: f32) -> Self {
        self.split(t).right
    }

    // ── Tangent lines ───────────────────────────────────────────────────────

    /// `a → c`.
    #[must_use]
    pub const fn initial_tangent_line(&self) -> Line {
        Line::new(self.a, self.c)
    }

    /// `d → b`.
    #[must_use]
    pub const fn final_tangent_line(&self) -> Line {
        Line::new(self.d, self.b)
    }

    #[must_use]
    pub fn initial_tangent(&self) -> f32 {
        self.initial_tangent_line().tangent()
    }

    #[must_use]
    pub fn final_tangent(&self) -> f32 {
        self.final_tangent_line().tangent()
    }

    /// The chord `a → b`.
    #[must_use]
    pub const fn as_line(&self) -> Line {
        Line::new(self.a, self.b)
    }

    // ── Arc length ──────────────────────────────────────────────────────────

    #[must_use]
    pub fn length(&self) -> f32 {
        self.length_to(1.0)
    }

    /// Arc length over `[0, t]`, with `t` clamped into `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn length_to(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        let panel = t / QUADRATURE_PANELS as f32;
        let half = panel * 0.5;
        let mut total = 0.0;
        for i in 0..QUADRATURE_PANELS {
            let mid = panel * (i as f32 + 0.5);
            for (x, w) in GAUSS_LEGENDRE_5 {
                total += w * self.derivative_at(mid + half * x).length();
            }
        }
        total * half
    }

    /// Parameter `t` whose arc length from the start is `arclength`, within
    /// `threshold` (in length units).
    ///
    /// Lengths at or past the ends clamp to `0` and `1`.
    #[must_use]
    pub fn parameterization(&self, arclength: f32, threshold: f32) -> f32 {
        if arclength <= 0.0 {
            return 0.0;
        }
        let total = self.length();
        if arclength >= total {
            return 1.0;
        }

        let mut lo = 0.0_f32;
        let mut hi = 1.0_f32;
        let mut t = arclength / total;
        for _ in 0..MAX_PARAMETERIZATION_ITERATIONS {
            let residual = self.length_to(t) - arclength;
            if residual.abs() < threshold {
                return t;
            }
            if residual > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            let speed = self.derivative_at(t).length();
            let newton = t - residual / speed;
            t = if speed > Tolerance::ZERO_LENGTH.eps && newton > lo && newton < hi {
                newton
            } else {
                0.5 * (lo + hi)
            };
        }
        log::trace!(
            "parameterization hit iteration cap ({MAX_PARAMETERIZATION_ITERATIONS}) for arclength {arclength}"
        );
        t
    }

    // ── Shape quality ───────────────────────────────────────────────────────

    /// Place each handle `distance` from its endpoint, keeping its direction.
    ///
    /// A handle sitting on its endpoint takes the chord direction instead. If
    /// the chord is degenerate too, that handle is left where it is.
    #[must_use]
    pub fn normalize(&self, distance: f32) -> Self {
        Self {
            c: place_handle(self.a, self.c, self.b, distance),
            d: place_handle(self.b, self.d, self.a, distance),
            ..*self
        }
    }

    /// Largest distance of `c` or `d` from the line through `a` and `b`.
    #[must_use]
    pub fn linearity(&self) -> f32 {
        let chord = self.b - self.a;
        let len = chord.length();
        if Tolerance::ZERO_LENGTH.is_zero_length(len) {
            return self.a.distance_to(self.c).max(self.a.distance_to(self.d));
        }
        let dc = chord.cross(self.c - self.a).abs();
        let dd = chord.cross(self.d - self.a).abs();
        dc.max(dd) / len
    }

    #[must_use]
    pub fn is_nearly_linear(&self, accuracy: f32) -> bool {
        self.linearity() <= accuracy
    }

    /// Whether curvature results on this curve can be trusted: the chord and
    /// both handles are longer than `curvature_error`, and neither handle turns
    /// more than `straight_angle` away from the chord.
    #[must_use]
    pub fn is_normalized_for_curvature(&self, straight_angle: f32, curvature_error: f32) -> bool {
        curvature_quality(
            self.b - self.a,
            self.c - self.a,
            self.b - self.d,
            straight_angle,
            curvature_error,
        )
    }

    // ── Derived views ───────────────────────────────────────────────────────

    #[must_use]
    pub fn aligned(&self) -> AlignedCubic {
        AlignedCubic::from_cubic(self)
    }

    #[must_use]
    pub fn bounds(&self, strategy: BoundingStrategy) -> AlignedBox {
        AlignedBox::from_cubic(self, strategy)
    }

    // ── Connecting constructors ─────────────────────────────────────────────

    /// A straight cubic along `line`, handles at the chord thirds.
    #[must_use]
    pub fn connecting_line(line: Line) -> Self {
        let step = line.direction() / 3.0;
        Self::new(line.a, line.b, line.a + step, line.a + step * 2.0)
    }

    /// Cubic over `line` leaving at `initial` and arriving at `final_tangent`,
    /// with handles a third of the chord long.
    #[must_use]
    pub fn connecting_tangents(line: Line, initial: f32, final_tangent: f32) -> Self {
        Self::connecting_tangents_with_length(line, initial, final_tangent, line.distance() / 3.0)
    }

    #[must_use]
    pub fn connecting_tangents_with_length(
        line: Line,
        initial: f32,
        final_tangent: f32,
        handle_length: f32,
    ) -> Self {
        Self::new(
            line.a,
            line.b,
            line.a + Vec2::from_angle(initial) * handle_length,
            line.b - Vec2::from_angle(final_tangent) * handle_length,
        )
    }

    /// Join the end of `from` to the start of `to`, copying both tangents.
    #[must_use]
    pub fn connecting_segments(from: &Segment, to: &Segment) -> Self {
        Self::connecting_tangents(
            Line::new(from.end(), to.start()),
            from.final_tangent(),
            to.initial_tangent(),
        )
    }

    /// Build the cubic described by `connection`.
    ///
    /// # Errors
    ///
    /// Fails when a copied tangent is requested from a bare point, or when the
    /// handle length is not finite and positive.
    pub fn connect(connection: &Connection) -> Result<Self, ConnectError> {
        let line = Line::new(connection.from.point(), connection.to.point());
        let initial = match connection.initial {
            TangentRule::Explicit(angle) => angle,
            TangentRule::Copied => connection
                .from
                .outgoing_tangent()
                .ok_or(ConnectError::InitialTangentFromPoint)?,
        };
        let final_tangent = match connection.final_tangent {
            TangentRule::Explicit(angle) => angle,
            TangentRule::Copied => connection
                .to
                .incoming_tangent()
                .ok_or(ConnectError::FinalTangentFromPoint)?,
        };
        let handle_length = match connection.handle_length {
            Some(len) if !(len.is_finite() && len > 0.0) => {
                return Err(ConnectError::InvalidHandleLength(len));
            }
            Some(len) => len,
            None => line.distance() / 3.0,
        };
        Ok(Self::connecting_tangents_with_length(
            line,
            initial,
            final_tangent,
            handle_length,
        ))
    }
}

fn place_handle(anchor: Vec2, handle: Vec2, far_end: Vec2, distance: f32) -> Vec2 {
    let zero = Tolerance::ZERO_LENGTH;
    let offset = handle - anchor;
    let dir = if zero.is_zero_vec2(offset) {
        let chord = far_end - anchor;
        if zero.is_zero_vec2(chord) {
            log::debug!("normalize: handle and chord are both degenerate, leaving handle in place");
            return handle;
        }
        chord
    } else {
        offset
    };
    match dir.normalized() {
        Some(unit) => anchor + unit * distance,
        None => handle,
    }
}

/// Shared by [`Cubic`] and [`AlignedCubic`]; every input is frame independent.
pub(crate) fn curvature_quality(
    chord: Vec2,
    initial_handle: Vec2,
    final_handle: Vec2,
    straight_angle: f32,
    curvature_error: f32,
) -> bool {
    if chord.length() <= curvature_error
        || initial_handle.length() <= curvature_error
        || final_handle.length() <= curvature_error
    {
        return false;
    }
    angle_between(initial_handle, chord) <= straight_angle
        && angle_between(final_handle, chord) <= straight_angle
}

fn angle_between(u: Vec2, v: Vec2) -> f32 {
    u.cross(v).atan2(u.dot(v)).abs()
}

// ─────────────────────────────────────────────────────────────────────────────
// Connections
// ─────────────────────────────────────────────────────────────────────────────

/// Geometry a new cubic can attach to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Line),
    Cubic(Cubic),
}

impl Segment {
    #[must_use]
    pub const fn start(&self) -> Vec2 {
        match self {
            Self::Line(line) => line.a,
            Self::Cubic(cubic) => cubic.a,
        }
    }

    #[must_use]
    pub const fn end(&self) -> Vec2 {
        match self {
            Self::Line(line) => line.b,
            Self::Cubic(cubic) => cubic.b,
        }
    }

    #[must_use]
    pub fn initial_tangent(&self) -> f32 {
        match self {
            Self::Line(line) => line_tangent(line),
            Self::Cubic(cubic) => cubic.initial_tangent(),
        }
    }

    #[must_use]
    pub fn final_tangent(&self) -> f32 {
        match self {
            Self::Line(line) => line_tangent(line),
            Self::Cubic(cubic) => cubic.final_tangent(),
        }
    }
}

fn line_tangent(line: &Line) -> f32 {
    if Tolerance::ZERO_LENGTH.is_zero_length(line.distance()) {
        log::debug!("copying tangent from zero-length line at {:?}, using 0", line.a);
    }
    line.tangent()
}

impl From<Line> for Segment {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Cubic> for Segment {
    fn from(cubic: Cubic) -> Self {
        Self::Cubic(cubic)
    }
}

/// One end of a connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attachment {
    Point(Vec2),
    /// The start of a segment.
    Start(Segment),
    /// The end of a segment.
    End(Segment),
}

impl Attachment {
    #[must_use]
    pub const fn point(&self) -> Vec2 {
        match self {
            Self::Point(p) => *p,
            Self::Start(segment) => segment.start(),
            Self::End(segment) => segment.end(),
        }
    }

    /// Heading for a curve leaving this attachment.
    fn outgoing_tangent(&self) -> Option<f32> {
        match self {
            Self::Point(_) => None,
            Self::End(segment) => Some(segment.final_tangent()),
            Self::Start(segment) => Some(segment.initial_tangent() + PI),
        }
    }

    /// Heading for a curve arriving at this attachment.
    fn incoming_tangent(&self) -> Option<f32> {
        match self {
            Self::Point(_) => None,
            Self::Start(segment) => Some(segment.initial_tangent()),
            Self::End(segment) => Some(segment.final_tangent() + PI),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TangentRule {
    /// Take the tangent of the adjoining segment.
    Copied,
    /// Use this angle, in radians.
    Explicit(f32),
}

/// Description of a cubic joining two attachments.
///
/// ```ignore
/// let join = Connection::new(Attachment::End(first.into()), Attachment::Point(target))
///     .with_final_tangent(TangentRule::Explicit(0.0));
/// let cubic = Cubic::connect(&join)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: Attachment,
    pub to: Attachment,
    pub initial: TangentRule,
    pub final_tangent: TangentRule,
    /// Handle length; `None` uses a third of the chord.
    pub handle_length: Option<f32>,
}

impl Connection {
    /// Both tangents copied, default handle length.
    #[must_use]
    pub const fn new(from: Attachment, to: Attachment) -> Self {
        Self {
            from,
            to,
            initial: TangentRule::Copied,
            final_tangent: TangentRule::Copied,
            handle_length: None,
        }
    }

    #[must_use]
    pub const fn with_initial_tangent(mut self, rule: TangentRule) -> Self {
        self.initial = rule;
        self
    }

    #[must_use]
    pub const fn with_final_tangent(mut self, rule: TangentRule) -> Self {
        self.final_tangent = rule;
        self
    }

    #[must_use]
    pub const fn with_handle_length(mut self, len: f32) -> Self {
        self.handle_length = Some(len);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConnectError {
    #[error("initial tangent is copied but the start attaches to a bare point")]
    InitialTangentFromPoint,
    #[error("final tangent is copied but the end attaches to a bare point")]
    FinalTangentFromPoint,
    #[error("handle length must be finite and positive, got {0}")]
    InvalidHandleLength(f32),
}
