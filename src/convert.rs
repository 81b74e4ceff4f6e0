//! Pairwise conversions between all five rotation representations.
//!
//! Every function here follows the same "pack" contract: it reads one
//! representation through a shared reference, resolves any degeneracy, and
//! writes the equivalent rotation into a caller-provided `&mut` destination.
//! Nothing is allocated and the source is never modified, which is what lets
//! these run inside control loops that cannot tolerate garbage.
//!
//! The uniform degeneracy policy, in priority order:
//!
//! 1. any NaN component in the source makes the destination all-NaN
//!    ("undefined orientation" flows through silently);
//! 2. a source with no usable direction (zero axis, zero quaternion, zero
//!    rotation vector) becomes the identity rotation, not NaN and not an
//!    error;
//! 3. everything else converts exactly, normalizing scale internally without
//!    touching the caller's source object.
//!
//! Conversions into [`YawPitchRoll`] add the gimbal-lock rule: when the
//! extracted pitch magnitude exceeds [`MAX_PITCH_ANGLE`], all three output
//! angles are NaN, because yaw and roll are indeterminate there rather than
//! merely inaccurate.

use crate::util::{clamped_asin, norm3, norm4, EPS_DEGENERATE, EPS_UNIT};
use crate::{AxisAngle, Quaternion, RotationMatrix, RotationVector, YawPitchRoll};
use std::f64::consts::{FRAC_PI_2, PI};

/// Width of the guard band kept between an extractable pitch and the ±90°
/// singularity.
pub const SAFE_THRESHOLD_PITCH: f64 = 0.182 * PI / 180.0;

/// Largest pitch magnitude (radians, ≈ 89.818°) for which yaw-pitch-roll
/// extraction still produces finite angles; past it the whole triple is NaN.
pub const MAX_PITCH_ANGLE: f64 = FRAC_PI_2 - SAFE_THRESHOLD_PITCH;

/// Packs the axis-angle equivalent of `quaternion` into `axis_angle`.
///
/// The quaternion does not need to be unit norm: the axis comes out of the
/// vector part divided by its own norm, and the angle out of
/// `2·atan2(‖(x,y,z)‖, s)` with `s` taken from the *original* quaternion, so
/// any positive scalar multiple of a quaternion yields the same axis-angle.
/// (Renormalizing before reading `s` would break exactly that property.)
pub fn quaternion_to_axis_angle(quaternion: &Quaternion, axis_angle: &mut AxisAngle) {
    if quaternion.contains_nan() {
        axis_angle.set_to_nan();
        return;
    }

    let u_norm = norm3(quaternion.x, quaternion.y, quaternion.z);
    if u_norm < EPS_DEGENERATE {
        // no direction to rotate about: zero rotation, not NaN
        axis_angle.set_identity();
        return;
    }

    let angle = 2.0 * u_norm.atan2(quaternion.s);
    axis_angle.set(
        quaternion.x / u_norm,
        quaternion.y / u_norm,
        quaternion.z / u_norm,
        angle,
    );
}

/// Packs the quaternion equivalent of `axis_angle` into `quaternion` via the
/// half-angle identity.
pub fn axis_angle_to_quaternion(axis_angle: &AxisAngle, quaternion: &mut Quaternion) {
    if axis_angle.contains_nan() {
        quaternion.set_to_nan();
        return;
    }

    let axis_norm = axis_angle.axis_norm();
    if axis_norm < EPS_DEGENERATE {
        quaternion.set_identity();
        return;
    }

    let half_angle = 0.5 * axis_angle.angle;
    let sin_over_norm = half_angle.sin() / axis_norm;
    quaternion.set(
        axis_angle.x * sin_over_norm,
        axis_angle.y * sin_over_norm,
        axis_angle.z * sin_over_norm,
        half_angle.cos(),
    );
}

/// Packs the axis-angle equivalent of `matrix` into `axis_angle`.
///
/// The generic path reads the angle from the skew part of the matrix. That
/// part vanishes when sin θ ≈ 0, which covers both "no rotation" and "half
/// turn"; the two are told apart by checking for the identity first and
/// otherwise extracting the axis from the symmetric part. In that branch the
/// largest diagonal entry (tried in xx, yy, zz order) is the pivot, because
/// dividing by the two smaller ones can blow up when the axis is close to a
/// coordinate plane. The pivot ordering is part of this function's contract:
/// reordering it changes which near-degenerate inputs lose precision.
pub fn matrix_to_axis_angle(matrix: &RotationMatrix, axis_angle: &mut AxisAngle) {
    if matrix.contains_nan() {
        axis_angle.set_to_nan();
        return;
    }

    let x = matrix.m21 - matrix.m12;
    let y = matrix.m02 - matrix.m20;
    let z = matrix.m10 - matrix.m01;
    let s = norm3(x, y, z);

    if s > EPS_DEGENERATE {
        let trace = matrix.m00 + matrix.m11 + matrix.m22;
        let angle = (0.5 * s).atan2(0.5 * (trace - 1.0));
        axis_angle.set(x / s, y / s, z / s, angle);
    } else if matrix.is_zero_rotation(EPS_UNIT) {
        axis_angle.set_identity();
    } else {
        // sin θ ≈ 0 without being the identity: a half turn. R = 2uuᵀ − I,
        // so the axis comes out of the symmetric part.
        let xx = 0.5 * (matrix.m00 + 1.0);
        let yy = 0.5 * (matrix.m11 + 1.0);
        let zz = 0.5 * (matrix.m22 + 1.0);
        let xy = 0.25 * (matrix.m01 + matrix.m10);
        let xz = 0.25 * (matrix.m02 + matrix.m20);
        let yz = 0.25 * (matrix.m12 + matrix.m21);

        if xx > yy && xx > zz {
            let axis_x = xx.sqrt();
            axis_angle.set(axis_x, xy / axis_x, xz / axis_x, PI);
        } else if yy > zz {
            let axis_y = yy.sqrt();
            axis_angle.set(xy / axis_y, axis_y, yz / axis_y, PI);
        } else {
            let axis_z = zz.sqrt();
            axis_angle.set(xz / axis_z, yz / axis_z, axis_z, PI);
        }
    }
}

/// Packs the matrix equivalent of `axis_angle` into `matrix`.
///
/// Routed through the quaternion so that the trigonometric expansion of the
/// Rodrigues formula lives in exactly one place
/// ([`quaternion_to_matrix`]).
pub fn axis_angle_to_matrix(axis_angle: &AxisAngle, matrix: &mut RotationMatrix) {
    let mut quaternion = Quaternion::identity();
    axis_angle_to_quaternion(axis_angle, &mut quaternion);
    quaternion_to_matrix(&quaternion, matrix);
}

/// Packs the quaternion equivalent of `matrix` into `quaternion`.
///
/// There are four algebraically equivalent extraction formulas, one per
/// quaternion component used as the divisor. Each one fails when its
/// component is near zero (the scalar's, for instance, at half turns), so
/// the divisor is picked in the fixed order s, x, y, z, taking the first
/// whose diagonal quantity exceeds −0.19. That threshold corresponds to a
/// component magnitude of 0.45 (`4·0.45² − 1 = −0.19`), which guarantees
/// the eventual division is by at least ≈0.9. The ordering and the
/// threshold are this conversion's numerical contract; neither may change.
pub fn matrix_to_quaternion(matrix: &RotationMatrix, quaternion: &mut Quaternion) {
    if matrix.contains_nan() {
        quaternion.set_to_nan();
        return;
    }

    let trace = matrix.m00 + matrix.m11 + matrix.m22;

    if trace > -0.19 {
        // trace = 4s² − 1
        let s = 0.5 * (trace + 1.0).sqrt();
        let coefficient = 0.25 / s;
        quaternion.set(
            (matrix.m21 - matrix.m12) * coefficient,
            (matrix.m02 - matrix.m20) * coefficient,
            (matrix.m10 - matrix.m01) * coefficient,
            s,
        );
        return;
    }

    let x_quantity = matrix.m00 - matrix.m11 - matrix.m22; // 4x² − 1
    if x_quantity > -0.19 {
        let x = 0.5 * (x_quantity + 1.0).sqrt();
        let coefficient = 0.25 / x;
        quaternion.set(
            x,
            (matrix.m01 + matrix.m10) * coefficient,
            (matrix.m02 + matrix.m20) * coefficient,
            (matrix.m21 - matrix.m12) * coefficient,
        );
        return;
    }

    let y_quantity = matrix.m11 - matrix.m00 - matrix.m22; // 4y² − 1
    if y_quantity > -0.19 {
        let y = 0.5 * (y_quantity + 1.0).sqrt();
        let coefficient = 0.25 / y;
        quaternion.set(
            (matrix.m01 + matrix.m10) * coefficient,
            y,
            (matrix.m12 + matrix.m21) * coefficient,
            (matrix.m02 - matrix.m20) * coefficient,
        );
        return;
    }

    let z_quantity = matrix.m22 - matrix.m00 - matrix.m11; // 4z² − 1
    let z = 0.5 * (z_quantity + 1.0).sqrt();
    let coefficient = 0.25 / z;
    quaternion.set(
        (matrix.m02 + matrix.m20) * coefficient,
        (matrix.m12 + matrix.m21) * coefficient,
        z,
        (matrix.m10 - matrix.m01) * coefficient,
    );
}

/// Packs the matrix equivalent of `quaternion` into `matrix`, normalizing
/// internally.
pub fn quaternion_to_matrix(quaternion: &Quaternion, matrix: &mut RotationMatrix) {
    if quaternion.contains_nan() {
        matrix.set_to_nan();
        return;
    }

    let norm = quaternion.norm();
    if norm < EPS_DEGENERATE {
        matrix.set_identity();
        return;
    }

    let inv = 1.0 / norm;
    let qx = quaternion.x * inv;
    let qy = quaternion.y * inv;
    let qz = quaternion.z * inv;
    let qs = quaternion.s * inv;

    let xx = 2.0 * qx * qx;
    let yy = 2.0 * qy * qy;
    let zz = 2.0 * qz * qz;
    let xy = 2.0 * qx * qy;
    let xz = 2.0 * qx * qz;
    let yz = 2.0 * qy * qz;
    let sx = 2.0 * qs * qx;
    let sy = 2.0 * qs * qy;
    let sz = 2.0 * qs * qz;

    matrix.m00 = 1.0 - yy - zz;
    matrix.m01 = xy - sz;
    matrix.m02 = xz + sy;
    matrix.m10 = xy + sz;
    matrix.m11 = 1.0 - xx - zz;
    matrix.m12 = yz - sx;
    matrix.m20 = xz - sy;
    matrix.m21 = yz + sx;
    matrix.m22 = 1.0 - xx - yy;
}

/// Packs the rotation-vector equivalent of `axis_angle` into
/// `rotation_vector`: the normalized axis scaled by the angle.
pub fn axis_angle_to_rotation_vector(axis_angle: &AxisAngle, rotation_vector: &mut RotationVector) {
    if axis_angle.contains_nan() {
        rotation_vector.set_to_nan();
        return;
    }

    let axis_norm = axis_angle.axis_norm();
    if axis_norm < EPS_DEGENERATE {
        rotation_vector.set_identity();
        return;
    }

    let scale = axis_angle.angle / axis_norm;
    rotation_vector.set(
        axis_angle.x * scale,
        axis_angle.y * scale,
        axis_angle.z * scale,
    );
}

/// Packs the axis-angle equivalent of `rotation_vector` into `axis_angle`:
/// the magnitude becomes the angle, the direction the axis.
pub fn rotation_vector_to_axis_angle(rotation_vector: &RotationVector, axis_angle: &mut AxisAngle) {
    if rotation_vector.contains_nan() {
        axis_angle.set_to_nan();
        return;
    }

    let angle = rotation_vector.norm();
    if angle < EPS_DEGENERATE {
        axis_angle.set_identity();
        return;
    }

    axis_angle.set(
        rotation_vector.x / angle,
        rotation_vector.y / angle,
        rotation_vector.z / angle,
        angle,
    );
}

/// Packs the rotation-vector equivalent of `quaternion` into
/// `rotation_vector`.
///
/// Same scale-invariant extraction as [`quaternion_to_axis_angle`], with
/// the axis scaled by the angle on the way out. This is the logarithm map
/// of SO(3).
pub fn quaternion_to_rotation_vector(
    quaternion: &Quaternion,
    rotation_vector: &mut RotationVector,
) {
    if quaternion.contains_nan() {
        rotation_vector.set_to_nan();
        return;
    }

    let u_norm = norm3(quaternion.x, quaternion.y, quaternion.z);
    if u_norm < EPS_DEGENERATE {
        rotation_vector.set_identity();
        return;
    }

    let angle_over_norm = 2.0 * u_norm.atan2(quaternion.s) / u_norm;
    rotation_vector.set(
        quaternion.x * angle_over_norm,
        quaternion.y * angle_over_norm,
        quaternion.z * angle_over_norm,
    );
}

/// Packs the quaternion equivalent of `rotation_vector` into `quaternion`.
/// This is the exponential map of SO(3).
pub fn rotation_vector_to_quaternion(
    rotation_vector: &RotationVector,
    quaternion: &mut Quaternion,
) {
    if rotation_vector.contains_nan() {
        quaternion.set_to_nan();
        return;
    }

    let angle = rotation_vector.norm();
    if angle < EPS_DEGENERATE {
        quaternion.set_identity();
        return;
    }

    let half_angle = 0.5 * angle;
    let sin_over_angle = half_angle.sin() / angle;
    quaternion.set(
        rotation_vector.x * sin_over_angle,
        rotation_vector.y * sin_over_angle,
        rotation_vector.z * sin_over_angle,
        half_angle.cos(),
    );
}

/// Packs the rotation-vector equivalent of `matrix` into `rotation_vector`.
///
/// Reuses the axis-angle extraction, including its half-turn pivot logic,
/// then folds the angle into the vector's magnitude.
pub fn matrix_to_rotation_vector(matrix: &RotationMatrix, rotation_vector: &mut RotationVector) {
    let mut axis_angle = AxisAngle::identity();
    matrix_to_axis_angle(matrix, &mut axis_angle);
    axis_angle_to_rotation_vector(&axis_angle, rotation_vector);
}

/// Packs the matrix equivalent of `rotation_vector` into `matrix`.
pub fn rotation_vector_to_matrix(rotation_vector: &RotationVector, matrix: &mut RotationMatrix) {
    let mut quaternion = Quaternion::identity();
    rotation_vector_to_quaternion(rotation_vector, &mut quaternion);
    quaternion_to_matrix(&quaternion, matrix);
}

/// Packs the yaw-pitch-roll equivalent of `matrix` into `yaw_pitch_roll`.
///
/// Euler decomposition is inherently matrix-indexed: yaw comes from m10 and
/// m00, pitch from m20, roll from m21 and m22. When the pitch magnitude
/// exceeds [`MAX_PITCH_ANGLE`] the whole triple is set to NaN; see the
/// [`YawPitchRoll`] docs for why that is all-or-nothing.
pub fn matrix_to_yaw_pitch_roll(matrix: &RotationMatrix, yaw_pitch_roll: &mut YawPitchRoll) {
    if matrix.contains_nan() {
        yaw_pitch_roll.set_to_nan();
        return;
    }

    let pitch = clamped_asin(-matrix.m20);
    if pitch.is_nan() || pitch.abs() > MAX_PITCH_ANGLE {
        yaw_pitch_roll.set_to_nan();
        return;
    }

    yaw_pitch_roll.set(
        matrix.m10.atan2(matrix.m00),
        pitch,
        matrix.m21.atan2(matrix.m22),
    );
}

/// Packs the yaw-pitch-roll equivalent of `quaternion` into
/// `yaw_pitch_roll`.
///
/// This is the algebraic shortcut that skips materializing the matrix: the
/// five matrix coefficients the ZYX decomposition needs are expanded
/// directly from the (internally normalized) quaternion components. The
/// gimbal branch is keyed on the same [`MAX_PITCH_ANGLE`] threshold as the
/// matrix path, so the two are branch-compatible on every input.
pub fn quaternion_to_yaw_pitch_roll(quaternion: &Quaternion, yaw_pitch_roll: &mut YawPitchRoll) {
    if quaternion.contains_nan() {
        yaw_pitch_roll.set_to_nan();
        return;
    }

    let norm = norm4(quaternion.x, quaternion.y, quaternion.z, quaternion.s);
    if norm < EPS_DEGENERATE {
        yaw_pitch_roll.set_identity();
        return;
    }

    let inv = 1.0 / norm;
    let qx = quaternion.x * inv;
    let qy = quaternion.y * inv;
    let qz = quaternion.z * inv;
    let qs = quaternion.s * inv;

    // −m20 expanded from the quaternion
    let pitch = clamped_asin(2.0 * (qs * qy - qx * qz));
    if pitch.is_nan() || pitch.abs() > MAX_PITCH_ANGLE {
        yaw_pitch_roll.set_to_nan();
        return;
    }

    let yaw = (2.0 * (qx * qy + qz * qs)).atan2(1.0 - 2.0 * (qy * qy + qz * qz));
    let roll = (2.0 * (qy * qz + qx * qs)).atan2(1.0 - 2.0 * (qx * qx + qy * qy));
    yaw_pitch_roll.set(yaw, pitch, roll);
}

/// Packs the yaw-pitch-roll equivalent of `axis_angle` into
/// `yaw_pitch_roll`, via the quaternion shortcut of
/// [`quaternion_to_yaw_pitch_roll`].
pub fn axis_angle_to_yaw_pitch_roll(axis_angle: &AxisAngle, yaw_pitch_roll: &mut YawPitchRoll) {
    let mut quaternion = Quaternion::identity();
    axis_angle_to_quaternion(axis_angle, &mut quaternion);
    quaternion_to_yaw_pitch_roll(&quaternion, yaw_pitch_roll);
}

/// Packs the yaw-pitch-roll equivalent of `rotation_vector` into
/// `yaw_pitch_roll`.
pub fn rotation_vector_to_yaw_pitch_roll(
    rotation_vector: &RotationVector,
    yaw_pitch_roll: &mut YawPitchRoll,
) {
    let mut quaternion = Quaternion::identity();
    rotation_vector_to_quaternion(rotation_vector, &mut quaternion);
    quaternion_to_yaw_pitch_roll(&quaternion, yaw_pitch_roll);
}

/// Packs the matrix equivalent of `yaw_pitch_roll` into `matrix` via the
/// ZYX trigonometric expansion.
pub fn yaw_pitch_roll_to_matrix(yaw_pitch_roll: &YawPitchRoll, matrix: &mut RotationMatrix) {
    if yaw_pitch_roll.contains_nan() {
        matrix.set_to_nan();
        return;
    }

    let (sin_yaw, cos_yaw) = yaw_pitch_roll.yaw.sin_cos();
    let (sin_pitch, cos_pitch) = yaw_pitch_roll.pitch.sin_cos();
    let (sin_roll, cos_roll) = yaw_pitch_roll.roll.sin_cos();

    matrix.m00 = cos_yaw * cos_pitch;
    matrix.m01 = cos_yaw * sin_pitch * sin_roll - sin_yaw * cos_roll;
    matrix.m02 = cos_yaw * sin_pitch * cos_roll + sin_yaw * sin_roll;
    matrix.m10 = sin_yaw * cos_pitch;
    matrix.m11 = sin_yaw * sin_pitch * sin_roll + cos_yaw * cos_roll;
    matrix.m12 = sin_yaw * sin_pitch * cos_roll - cos_yaw * sin_roll;
    matrix.m20 = -sin_pitch;
    matrix.m21 = cos_pitch * sin_roll;
    matrix.m22 = cos_pitch * cos_roll;
}

/// Packs the quaternion equivalent of `yaw_pitch_roll` into `quaternion`
/// via the half-angle product expansion.
pub fn yaw_pitch_roll_to_quaternion(yaw_pitch_roll: &YawPitchRoll, quaternion: &mut Quaternion) {
    if yaw_pitch_roll.contains_nan() {
        quaternion.set_to_nan();
        return;
    }

    let (sin_half_yaw, cos_half_yaw) = (0.5 * yaw_pitch_roll.yaw).sin_cos();
    let (sin_half_pitch, cos_half_pitch) = (0.5 * yaw_pitch_roll.pitch).sin_cos();
    let (sin_half_roll, cos_half_roll) = (0.5 * yaw_pitch_roll.roll).sin_cos();

    quaternion.set(
        sin_half_roll * cos_half_pitch * cos_half_yaw
            - cos_half_roll * sin_half_pitch * sin_half_yaw,
        cos_half_roll * sin_half_pitch * cos_half_yaw
            + sin_half_roll * cos_half_pitch * sin_half_yaw,
        cos_half_roll * cos_half_pitch * sin_half_yaw
            - sin_half_roll * sin_half_pitch * cos_half_yaw,
        cos_half_roll * cos_half_pitch * cos_half_yaw
            + sin_half_roll * sin_half_pitch * sin_half_yaw,
    );
}

/// Packs the axis-angle equivalent of `yaw_pitch_roll` into `axis_angle`.
pub fn yaw_pitch_roll_to_axis_angle(yaw_pitch_roll: &YawPitchRoll, axis_angle: &mut AxisAngle) {
    let mut quaternion = Quaternion::identity();
    yaw_pitch_roll_to_quaternion(yaw_pitch_roll, &mut quaternion);
    quaternion_to_axis_angle(&quaternion, axis_angle);
}

/// Packs the rotation-vector equivalent of `yaw_pitch_roll` into
/// `rotation_vector`.
pub fn yaw_pitch_roll_to_rotation_vector(
    yaw_pitch_roll: &YawPitchRoll,
    rotation_vector: &mut RotationVector,
) {
    let mut quaternion = Quaternion::identity();
    yaw_pitch_roll_to_quaternion(yaw_pitch_roll, &mut quaternion);
    quaternion_to_rotation_vector(&quaternion, rotation_vector);
}
