mod aligned_box;
mod aligned_cubic;
mod core;
mod cubic;
mod drawing;
mod line;
mod parameter;
mod rect;

pub use aligned_box::{AlignedBox, AlignedRect, BoundingStrategy};
pub use aligned_cubic::{AlignedCubic, KAPPA_COARSE_SAMPLES, MAX_KAPPA_ITERATIONS};
pub use self::core::{Tolerance, Transform2, Vec2};
pub use cubic::{
    Attachment, ConnectError, Connection, Cubic, CubicSplit, MAX_PARAMETERIZATION_ITERATIONS,
    QUADRATURE_PANELS, Segment, TangentRule,
};
pub use drawing::{cubic_vertex, cubic_vertex_clamped_parameterization, cubic_vertex_min_delta};
pub use line::Line;
pub use parameter::{
    ParameterError, ParameterRange, RoundingMode, checked_lut_index, checked_lut_parameter,
    checked_vertex_to_bezier_parameter, lut_index, lut_parameter, vertex_to_bezier_parameter,
};
pub use rect::Rect;

#[cfg(test)]
mod tests;
