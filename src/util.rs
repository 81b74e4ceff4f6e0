//! Scalar helpers shared by every conversion and composition routine.

/// Inputs whose norm falls below this are treated as degenerate (ie, the
/// identity rotation) rather than divided by.
pub(crate) const EPS_DEGENERATE: f64 = 1.0e-12;

/// Default tolerance for "is this matrix still orthonormal" style checks.
pub(crate) const EPS_UNIT: f64 = 1.0e-7;

/// Squared norms within this distance of 1 take the extrapolation fast path
/// in [`fast_square_root`].
pub(crate) const EPS_NORM_FAST_PATH: f64 = 2.107342e-8;

/// Square root specialized for squared norms that are expected to be close
/// to 1 (unit quaternions, unit axes).
///
/// When the argument is within [`EPS_NORM_FAST_PATH`] of 1, the square root
/// is computed by linear extrapolation at 1 (`√x ≈ 0.5·(1 + x)`) instead of
/// a full `sqrt`. The epsilon and the formula are load-bearing: round-trip
/// tolerances elsewhere in the crate are tuned against them, so neither may
/// be swapped for a plain `sqrt` without revisiting those tolerances.
///
/// Arguments far from 1 (including 0 and non-finite values) fall through to
/// `f64::sqrt`, so this is safe to use for arbitrary non-negative norms.
#[inline]
pub(crate) fn fast_square_root(squared: f64) -> f64 {
    if (1.0 - squared).abs() <= EPS_NORM_FAST_PATH {
        0.5 * (1.0 + squared)
    } else {
        squared.sqrt()
    }
}

/// Norm of a 3-component tuple, via [`fast_square_root`].
#[inline]
pub(crate) fn norm3(x: f64, y: f64, z: f64) -> f64 {
    fast_square_root(x * x + y * y + z * z)
}

/// Norm of a 4-component tuple, via [`fast_square_root`].
#[inline]
pub(crate) fn norm4(x: f64, y: f64, z: f64, s: f64) -> f64 {
    fast_square_root(x * x + y * y + z * z + s * s)
}

/// `asin` that saturates arguments just outside [-1, 1] instead of returning
/// NaN for them.
///
/// Rounding in upstream arithmetic can push a sine value a few ulps outside
/// the mathematical range; saturating keeps the extracted angle finite there.
/// Actual NaN input still propagates to a NaN result.
#[inline]
pub(crate) fn clamped_asin(value: f64) -> f64 {
    if value < -1.0 {
        -std::f64::consts::FRAC_PI_2
    } else if value > 1.0 {
        std::f64::consts::FRAC_PI_2
    } else {
        value.asin()
    }
}
