//! Clean-Air-Normalized Resistance Ratio
//!
//! The regression works on a dimensionless ratio rather than on Rs itself,
//! which cancels part-to-part variation of the sensing element:
//!
//! ```text
//! Direct family   (MQ-2, MQ-135, MQ-303A):  ratio = Rs / R0
//! Inverted family (MQ-131):                 ratio = R0 / Rs
//! ```
//!
//! A caller-supplied correction is added afterwards. The result feeds a
//! logarithm, so anything at or below zero is floored to
//! [`RATIO_FLOOR`](crate::constants::physics::RATIO_FLOOR).

use crate::constants::physics::RATIO_FLOOR;
use crate::profile::RatioFamily;

/// Ratio for a measured resistance against the baseline
///
/// Always strictly positive and finite.
pub fn compute_ratio(family: RatioFamily, r0: f32, rs: f32, correction: f32) -> f32 {
    let raw = match family {
        RatioFamily::Direct => rs / r0,
        RatioFamily::Inverted => r0 / rs,
    };
    floor_ratio(raw + correction)
}

/// Clamp a ratio into `[RATIO_FLOOR, f32::MAX]`
pub fn floor_ratio(ratio: f32) -> f32 {
    if ratio.is_nan() || ratio <= 0.0 {
        log_debug!("Ratio {} floored to {}", ratio, RATIO_FLOOR);
        RATIO_FLOOR
    } else if ratio.is_infinite() {
        f32::MAX
    } else {
        ratio
    }
}
