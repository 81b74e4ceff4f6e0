//! Feature checks over raw matrix and tuple coefficients.
//!
//! These are the validation leaf of the crate: pure, side-effect-free
//! predicates over scalars (not objects) that every conversion uses to
//! short-circuit degenerate input. They report `false` or `NaN` rather than
//! failing; the `check_*` forms at the bottom are the only ones that produce
//! an error, and they exist for the transform-application paths that must
//! refuse to proceed.
//!
//! All nine-coefficient arguments are row-major: `m00, m01, m02, m10, ...`.

use crate::error::OrientationError;

/// Returns `true` if any of the nine coefficients is NaN.
#[allow(clippy::too_many_arguments)]
pub fn matrix_contains_nan(
    m00: f64,
    m01: f64,
    m02: f64,
    m10: f64,
    m11: f64,
    m12: f64,
    m20: f64,
    m21: f64,
    m22: f64,
) -> bool {
    m00.is_nan()
        || m01.is_nan()
        || m02.is_nan()
        || m10.is_nan()
        || m11.is_nan()
        || m12.is_nan()
        || m20.is_nan()
        || m21.is_nan()
        || m22.is_nan()
}

/// Returns `true` if any of the four components is NaN.
pub fn tuple4_contains_nan(x: f64, y: f64, z: f64, s: f64) -> bool {
    x.is_nan() || y.is_nan() || z.is_nan() || s.is_nan()
}

/// Determinant of the 3×3 matrix given by its row-major coefficients.
///
/// NaN coefficients yield a NaN determinant.
#[allow(clippy::too_many_arguments)]
pub fn determinant(
    m00: f64,
    m01: f64,
    m02: f64,
    m10: f64,
    m11: f64,
    m12: f64,
    m20: f64,
    m21: f64,
    m22: f64,
) -> f64 {
    m00 * (m11 * m22 - m12 * m21) - m01 * (m10 * m22 - m12 * m20) + m02 * (m10 * m21 - m11 * m20)
}

/// Returns `true` if the rows form an orthonormal basis with determinant +1,
/// each within `epsilon`.
///
/// This is the gate between "rotation" and "not a rotation": reflections
/// (determinant −1) and sheared or scaled matrices all fail it. NaN
/// coefficients fail it too, since every comparison with NaN is false.
#[allow(clippy::too_many_arguments)]
pub fn is_rotation_matrix(
    m00: f64,
    m01: f64,
    m02: f64,
    m10: f64,
    m11: f64,
    m12: f64,
    m20: f64,
    m21: f64,
    m22: f64,
    epsilon: f64,
) -> bool {
    let row0_norm_sq = m00 * m00 + m01 * m01 + m02 * m02;
    let row1_norm_sq = m10 * m10 + m11 * m11 + m12 * m12;
    let row2_norm_sq = m20 * m20 + m21 * m21 + m22 * m22;

    let row0_dot_row1 = m00 * m10 + m01 * m11 + m02 * m12;
    let row0_dot_row2 = m00 * m20 + m01 * m21 + m02 * m22;
    let row1_dot_row2 = m10 * m20 + m11 * m21 + m12 * m22;

    let det = determinant(m00, m01, m02, m10, m11, m12, m20, m21, m22);

    (row0_norm_sq - 1.0).abs() <= epsilon
        && (row1_norm_sq - 1.0).abs() <= epsilon
        && (row2_norm_sq - 1.0).abs() <= epsilon
        && row0_dot_row1.abs() <= epsilon
        && row0_dot_row2.abs() <= epsilon
        && row1_dot_row2.abs() <= epsilon
        && (det - 1.0).abs() <= epsilon
}

/// Returns `true` if the matrix is the identity within `epsilon`, ie, the
/// zero rotation.
#[allow(clippy::too_many_arguments)]
pub fn is_zero_rotation(
    m00: f64,
    m01: f64,
    m02: f64,
    m10: f64,
    m11: f64,
    m12: f64,
    m20: f64,
    m21: f64,
    m22: f64,
    epsilon: f64,
) -> bool {
    (m00 - 1.0).abs() <= epsilon
        && (m11 - 1.0).abs() <= epsilon
        && (m22 - 1.0).abs() <= epsilon
        && m01.abs() <= epsilon
        && m02.abs() <= epsilon
        && m10.abs() <= epsilon
        && m12.abs() <= epsilon
        && m20.abs() <= epsilon
        && m21.abs() <= epsilon
}

/// Returns `true` if the matrix describes a rotation about the Z axis only,
/// ie, leaves the XY plane in place.
#[allow(clippy::too_many_arguments)]
pub fn is_matrix_2d(
    m02: f64,
    m12: f64,
    m20: f64,
    m21: f64,
    m22: f64,
    epsilon: f64,
) -> bool {
    m20.abs() <= epsilon
        && m02.abs() <= epsilon
        && m21.abs() <= epsilon
        && m12.abs() <= epsilon
        && (m22 - 1.0).abs() <= epsilon
}

/// Guard form of [`is_rotation_matrix`] for code paths that must not proceed
/// on a non-rotation.
#[allow(clippy::too_many_arguments)]
pub fn check_rotation_matrix(
    m00: f64,
    m01: f64,
    m02: f64,
    m10: f64,
    m11: f64,
    m12: f64,
    m20: f64,
    m21: f64,
    m22: f64,
    epsilon: f64,
) -> Result<(), OrientationError> {
    if is_rotation_matrix(m00, m01, m02, m10, m11, m12, m20, m21, m22, epsilon) {
        Ok(())
    } else {
        Err(OrientationError::NotRotationMatrix {
            determinant: determinant(m00, m01, m02, m10, m11, m12, m20, m21, m22),
        })
    }
}

/// Guard form of [`is_matrix_2d`] for the 2D tuple transform paths.
pub fn check_matrix_2d(
    m02: f64,
    m12: f64,
    m20: f64,
    m21: f64,
    m22: f64,
    epsilon: f64,
) -> Result<(), OrientationError> {
    if is_matrix_2d(m02, m12, m20, m21, m22, epsilon) {
        Ok(())
    } else {
        Err(OrientationError::NotZAxisRotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const IDENTITY: [f64; 9] = [1., 0., 0., 0., 1., 0., 0., 0., 1.];

    // 90° about Z
    const Z_QUARTER_TURN: [f64; 9] = [0., -1., 0., 1., 0., 0., 0., 0., 1.];

    // 180° about (1/√2, 1/√2, 0)
    const X_Y_HALF_TURN: [f64; 9] = [0., 1., 0., 1., 0., 0., 0., 0., -1.];

    // a reflection: proper rotation flipped through the XY plane
    const REFLECTION: [f64; 9] = [1., 0., 0., 0., 1., 0., 0., 0., -1.];

    fn apply9<T>(f: impl FnOnce(f64, f64, f64, f64, f64, f64, f64, f64, f64) -> T, m: [f64; 9]) -> T {
        f(m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8])
    }

    #[rstest]
    #[case(IDENTITY, 1.0)]
    #[case(Z_QUARTER_TURN, 1.0)]
    #[case(X_Y_HALF_TURN, 1.0)]
    #[case(REFLECTION, -1.0)]
    fn determinant_of_known_matrices(#[case] m: [f64; 9], #[case] expected: f64) {
        assert_relative_eq!(apply9(determinant, m), expected, epsilon = 1e-12);
    }

    #[rstest]
    #[case(IDENTITY, true)]
    #[case(Z_QUARTER_TURN, true)]
    #[case(X_Y_HALF_TURN, true)]
    // reflections are explicitly not rotations, even though they are orthonormal
    #[case(REFLECTION, false)]
    #[case([2., 0., 0., 0., 1., 0., 0., 0., 1.], false)]
    fn rotation_matrix_check(#[case] m: [f64; 9], #[case] expected: bool) {
        let got = is_rotation_matrix(m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], 1e-10);
        assert_eq!(got, expected);
    }

    #[test]
    fn nan_fails_every_predicate() {
        let mut m = IDENTITY;
        m[4] = f64::NAN;
        assert!(apply9(matrix_contains_nan, m));
        assert!(apply9(determinant, m).is_nan());
        assert!(!is_rotation_matrix(m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], 1e-10));
        assert!(!is_zero_rotation(m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], 1e-10));
    }

    #[test]
    fn zero_rotation_is_the_identity_only() {
        assert!(apply9(|a, b, c, d, e, f, g, h, i| is_zero_rotation(a, b, c, d, e, f, g, h, i, 1e-12), IDENTITY));
        assert!(!apply9(
            |a, b, c, d, e, f, g, h, i| is_zero_rotation(a, b, c, d, e, f, g, h, i, 1e-12),
            Z_QUARTER_TURN
        ));
    }

    #[test]
    fn matrix_2d_accepts_z_only_rotations() {
        let m = Z_QUARTER_TURN;
        assert!(is_matrix_2d(m[2], m[5], m[6], m[7], m[8], 1e-12));
        let m = X_Y_HALF_TURN;
        assert!(!is_matrix_2d(m[2], m[5], m[6], m[7], m[8], 1e-12));
    }

    #[test]
    fn check_forms_report_the_right_error() {
        let m = REFLECTION;
        let err = check_rotation_matrix(m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], 1e-10)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::OrientationError::NotRotationMatrix { determinant } if determinant < 0.
        ));

        let m = X_Y_HALF_TURN;
        assert_eq!(
            check_matrix_2d(m[2], m[5], m[6], m[7], m[8], 1e-12),
            Err(crate::OrientationError::NotZAxisRotation)
        );
    }
}
