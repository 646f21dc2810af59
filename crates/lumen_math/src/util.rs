//! Numeric helpers shared by intersection and shading code.

use crate::{MathError, Vec3};

/// Values with a magnitude below this are treated as zero.
pub const EPSILON: f32 = 1e-5;

/// Returns true if `x` is zero within [`EPSILON`].
#[inline]
pub fn is_zero(x: f32) -> bool {
    x.abs() < EPSILON
}

/// Snaps `x` to exactly zero when it is within [`EPSILON`] of it.
///
/// Comparisons near a boundary (`t > 0`, `t <= max`) go through this so that
/// floating point noise does not flip their outcome.
#[inline]
pub fn align_zero(x: f32) -> f32 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}

/// Normalize `v`, failing for the zero vector.
pub fn direction(v: Vec3) -> Result<Vec3, MathError> {
    v.try_normalize().ok_or(MathError::ZeroVector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_zero() {
        assert_eq!(align_zero(1e-7), 0.0);
        assert_eq!(align_zero(-1e-7), 0.0);
        assert_eq!(align_zero(0.5), 0.5);
        assert_eq!(align_zero(-0.5), -0.5);
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(EPSILON / 2.0));
        assert!(!is_zero(EPSILON * 2.0));
    }
}
