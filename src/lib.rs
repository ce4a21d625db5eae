//! Single-precision 2D geometry for cubic Bézier curves, line segments and
//! rectangles: evaluation, arc length, curvature, intersection and the
//! vertex-to-parameter mapping used by batched drawing.
//!
//! Every operation is a pure function over small `Copy` values.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;

pub use geom::{
    AlignedBox, AlignedCubic, AlignedRect, Attachment, BoundingStrategy, ConnectError,
    Connection, Cubic, CubicSplit, Line, ParameterError, ParameterRange, Rect, RoundingMode,
    Segment, TangentRule, Tolerance, Transform2, Vec2,
};
