//! Per-vertex positions for callers that draw a cubic as a fixed number of
//! vertices, one invocation per vertex.

use super::core::Transform2;
use super::cubic::Cubic;
use super::parameter::{ParameterError, ParameterRange, checked_vertex_to_bezier_parameter};

/// Vertex `vertex_id` of `vertexes_per_cubic`, spread over `range` and
/// mapped through `transform`. Returns homogeneous `[x, y, w]`.
///
/// # Errors
///
/// Propagates [`ParameterError`] for an empty range or an out-of-range vertex.
pub fn cubic_vertex(
    cubic: &Cubic,
    vertex_id: u32,
    vertexes_per_cubic: u32,
    transform: &Transform2,
    range: ParameterRange,
) -> Result<[f32; 3], ParameterError> {
    let t = checked_vertex_to_bezier_parameter(vertex_id, vertexes_per_cubic, range)?;
    Ok(transform.apply_point(cubic.evaluate(t)))
}

/// Like [`cubic_vertex`], but a range narrower than `minimum_delta_t` is
/// widened by `minimum_delta_t` on each side, staying inside `[0, 1]`.
///
/// # Errors
///
/// `range.lower > range.upper`, or anything [`cubic_vertex`] rejects.
pub fn cubic_vertex_min_delta(
    cubic: &Cubic,
    vertex_id: u32,
    vertexes_per_cubic: u32,
    transform: &Transform2,
    range: ParameterRange,
    minimum_delta_t: f32,
) -> Result<[f32; 3], ParameterError> {
    if range.lower > range.upper {
        return Err(ParameterError::EmptyRange {
            lower: range.lower,
            upper: range.upper,
        });
    }
    let range = if range.span() < minimum_delta_t {
        ParameterRange::new(
            (range.lower - minimum_delta_t).max(0.0),
            (range.upper + minimum_delta_t).min(1.0),
        )
    } else {
        range
    };
    cubic_vertex(cubic, vertex_id, vertexes_per_cubic, transform, range)
}

/// Draw the stretch of `cubic` between two arc-length positions.
///
/// Positions are clamped to `[0, length]` and converted with
/// [`Cubic::parameterization`] at `threshold`, then drawn with the
/// [`cubic_vertex_min_delta`] rule.
///
/// # Errors
///
/// Same as [`cubic_vertex_min_delta`].
#[allow(clippy::too_many_arguments)]
pub fn cubic_vertex_clamped_parameterization(
    cubic: &Cubic,
    vertex_id: u32,
    vertexes_per_cubic: u32,
    transform: &Transform2,
    start_position: f32,
    end_position: f32,
    threshold: f32,
    minimum_delta: f32,
) -> Result<[f32; 3], ParameterError> {
    let length = cubic.length();
    let start = start_position.max(0.0);
    let end = end_position.min(length);
    let range = ParameterRange::new(
        cubic.parameterization(start, threshold),
        cubic.parameterization(end, threshold),
    );
    cubic_vertex_min_delta(
        cubic,
        vertex_id,
        vertexes_per_cubic,
        transform,
        range,
        minimum_delta,
    )
}
