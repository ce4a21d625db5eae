//! Mapping between lookup-table slots (or output vertices) and curve
//! parameters.
//!
//! The unchecked functions are total so they can run per vertex without
//! branching on errors; the `checked_` variants validate their arguments.

use serde::{Deserialize, Serialize};

/// Distance from an integer below which a table position snaps to it.
const INDEX_SNAP: f32 = 1e-4;

/// Closed parameter interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub lower: f32,
    pub upper: f32,
}

impl ParameterRange {
    /// `[0, 1]`.
    pub const UNIT: Self = Self::new(0.0, 1.0);

    #[must_use]
    pub const fn new(lower: f32, upper: f32) -> Self {
        Self { lower, upper }
    }

    #[must_use]
    pub fn span(self) -> f32 {
        self.upper - self.lower
    }

    fn validate(self) -> Result<Self, ParameterError> {
        if self.lower < self.upper {
            Ok(self)
        } else {
            Err(ParameterError::EmptyRange {
                lower: self.lower,
                upper: self.upper,
            })
        }
    }
}

impl Default for ParameterRange {
    fn default() -> Self {
        Self::UNIT
    }
}

/// How [`lut_index`] turns a fractional table position into a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Round to nearest.
    #[default]
    Closest,
    /// Round down.
    Least,
    /// Round up.
    Most,
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("index {index} is out of range for capacity {capacity}")]
    IndexOutOfRange { index: u32, capacity: u32 },
    #[error("capacity must be at least 2, got {0}")]
    CapacityTooSmall(u32),
    #[error("parameter range is empty: lower {lower} is not below upper {upper}")]
    EmptyRange { lower: f32, upper: f32 },
    #[error("parameter {t} lies outside [{lower}, {upper}]")]
    ParameterOutOfRange { t: f32, lower: f32, upper: f32 },
}

/// Parameter for slot `index` of a `capacity`-slot table spread over `range`,
/// inclusive at both ends.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn lut_parameter(index: u32, capacity: u32, range: ParameterRange) -> f32 {
    debug_assert!(capacity >= 2, "lut_parameter needs at least two slots");
    if capacity < 2 {
        return range.lower;
    }
    index as f32 / (capacity - 1) as f32 * range.span() + range.lower
}

/// Parameter for output vertex `vertex_index` of `vertexes_per_instance`.
#[must_use]
pub fn vertex_to_bezier_parameter(
    vertex_index: u32,
    vertexes_per_instance: u32,
    range: ParameterRange,
) -> f32 {
    lut_parameter(vertex_index, vertexes_per_instance, range)
}

/// Inverse of [`lut_parameter`].
///
/// A `t` produced by [`lut_parameter`] maps back to its own slot under every
/// rounding mode, as do positions within a hair of a slot. The result is
/// clamped to the table.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub fn lut_index(t: f32, capacity: u32, mode: RoundingMode, range: ParameterRange) -> u32 {
    debug_assert!(capacity >= 2, "lut_index needs at least two slots");
    if capacity < 2 {
        return 0;
    }
    let last = (capacity - 1) as f32;
    let position = (t - range.lower) / range.span() * last;
    let nearest = position.round();

    // Rounding in `position` can land a table-exact `t` just past its slot,
    // so the slot and its neighbours are checked against the forward map.
    if nearest.is_finite() {
        let centre = nearest.clamp(0.0, last) as u32;
        let candidates = [Some(centre), centre.checked_sub(1), centre.checked_add(1)];
        for slot in candidates.into_iter().flatten() {
            if slot < capacity && lut_parameter(slot, capacity, range) == t {
                return slot;
            }
        }
    }

    let slot = if (position - nearest).abs() < INDEX_SNAP {
        nearest
    } else {
        match mode {
            RoundingMode::Closest => nearest,
            RoundingMode::Least => position.floor(),
            RoundingMode::Most => position.ceil(),
        }
    };
    // NaN falls through `clamp` unchanged and then saturates to 0 in the cast.
    slot.clamp(0.0, last) as u32
}

/// [`lut_parameter`] with argument validation.
///
/// # Errors
///
/// Rejects tables with fewer than two slots, out-of-range indices and empty
/// ranges.
pub fn checked_lut_parameter(
    index: u32,
    capacity: u32,
    range: ParameterRange,
) -> Result<f32, ParameterError> {
    if capacity < 2 {
        return Err(ParameterError::CapacityTooSmall(capacity));
    }
    if index >= capacity {
        return Err(ParameterError::IndexOutOfRange { index, capacity });
    }
    let range = range.validate()?;
    Ok(lut_parameter(index, capacity, range))
}

/// [`vertex_to_bezier_parameter`] with argument validation.
///
/// # Errors
///
/// Same as [`checked_lut_parameter`].
pub fn checked_vertex_to_bezier_parameter(
    vertex_index: u32,
    vertexes_per_instance: u32,
    range: ParameterRange,
) -> Result<f32, ParameterError> {
    checked_lut_parameter(vertex_index, vertexes_per_instance, range)
}

/// [`lut_index`] with argument validation.
///
/// # Errors
///
/// Rejects tables with fewer than two slots, empty ranges and `t` outside the
/// range.
pub fn checked_lut_index(
    t: f32,
    capacity: u32,
    mode: RoundingMode,
    range: ParameterRange,
) -> Result<u32, ParameterError> {
    if capacity < 2 {
        return Err(ParameterError::CapacityTooSmall(capacity));
    }
    let range = range.validate()?;
    if !(range.lower..=range.upper).contains(&t) {
        return Err(ParameterError::ParameterOutOfRange {
            t,
            lower: range.lower,
            upper: range.upper,
        });
    }
    Ok(lut_index(t, capacity, mode, range))
}
