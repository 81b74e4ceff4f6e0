//! Orthonormal 3×3 rotation matrix representation.

use crate::checks;
use crate::convert;
use crate::error::OrientationError;
use crate::orientation::{Orientation, OrientationMut};
use crate::util;
use crate::{AxisAngle, Quaternion, RotationVector, Vector2, Vector3, YawPitchRoll};
use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rotation encoded as a row-major orthonormal 3×3 matrix with determinant
/// +1.
///
/// Unlike the other representations, a matrix can hold values that are not a
/// rotation at all (sheared, scaled, or reflected bases). The constructors
/// here don't stop you from building one -- conversions are garbage-free and
/// validating on every call would defeat that -- but [`try_new`](Self::try_new)
/// and [`is_rotation_matrix`](Self::is_rotation_matrix) are available where
/// input is untrusted, and [`normalize`](Self::normalize) projects a drifted
/// matrix back onto the nearest rotation. Reflections (determinant −1) are
/// never considered valid.
///
/// Element indices for [`element`](Self::element) and buffer packing run
/// row-major: `[m00, m01, m02, m10, m11, m12, m20, m21, m22]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub struct RotationMatrix {
    pub m00: f64,
    pub m01: f64,
    pub m02: f64,
    pub m10: f64,
    pub m11: f64,
    pub m12: f64,
    pub m20: f64,
    pub m21: f64,
    pub m22: f64,
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl RotationMatrix {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f64,
        m01: f64,
        m02: f64,
        m10: f64,
        m11: f64,
        m12: f64,
        m20: f64,
        m21: f64,
        m22: f64,
    ) -> Self {
        Self {
            m00,
            m01,
            m02,
            m10,
            m11,
            m12,
            m20,
            m21,
            m22,
        }
    }

    pub const fn identity() -> Self {
        Self::new(1., 0., 0., 0., 1., 0., 0., 0., 1.)
    }

    /// Builds a matrix from coefficients that are required to actually be a
    /// rotation, within `epsilon`.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
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
    ) -> Result<Self, OrientationError> {
        checks::check_rotation_matrix(m00, m01, m02, m10, m11, m12, m20, m21, m22, epsilon)?;
        Ok(Self::new(m00, m01, m02, m10, m11, m12, m20, m21, m22))
    }

    /// The matrix equivalent of the given axis-angle.
    pub fn from_axis_angle(axis_angle: &AxisAngle) -> Self {
        let mut out = Self::identity();
        convert::axis_angle_to_matrix(axis_angle, &mut out);
        out
    }

    /// The matrix equivalent of the given quaternion.
    pub fn from_quaternion(quaternion: &Quaternion) -> Self {
        let mut out = Self::identity();
        convert::quaternion_to_matrix(quaternion, &mut out);
        out
    }

    /// The matrix equivalent of the given rotation vector.
    pub fn from_rotation_vector(rotation_vector: &RotationVector) -> Self {
        let mut out = Self::identity();
        convert::rotation_vector_to_matrix(rotation_vector, &mut out);
        out
    }

    /// The matrix equivalent of the given yaw-pitch-roll angles.
    pub fn from_yaw_pitch_roll(yaw_pitch_roll: &YawPitchRoll) -> Self {
        let mut out = Self::identity();
        convert::yaw_pitch_roll_to_matrix(yaw_pitch_roll, &mut out);
        out
    }

    /// Reads the nine coefficients row-major from the first nine elements of
    /// `slice`.
    ///
    /// To read at an offset, pass `&slice[offset..]`. Panics if fewer than
    /// nine elements remain.
    pub fn from_slice(slice: &[f64]) -> Self {
        Self::new(
            slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
            slice[8],
        )
    }

    /// Single-precision variant of [`from_slice`](Self::from_slice).
    pub fn from_f32_slice(slice: &[f32]) -> Self {
        Self::new(
            f64::from(slice[0]),
            f64::from(slice[1]),
            f64::from(slice[2]),
            f64::from(slice[3]),
            f64::from(slice[4]),
            f64::from(slice[5]),
            f64::from(slice[6]),
            f64::from(slice[7]),
            f64::from(slice[8]),
        )
    }

    /// Writes the nine coefficients row-major into the first nine elements
    /// of `slice`.
    pub fn write_to_slice(&self, slice: &mut [f64]) {
        slice[0] = self.m00;
        slice[1] = self.m01;
        slice[2] = self.m02;
        slice[3] = self.m10;
        slice[4] = self.m11;
        slice[5] = self.m12;
        slice[6] = self.m20;
        slice[7] = self.m21;
        slice[8] = self.m22;
    }

    /// Single-precision variant of [`write_to_slice`](Self::write_to_slice).
    pub fn write_to_f32_slice(&self, slice: &mut [f32]) {
        let mut buffer = [0.0_f64; 9];
        self.write_to_slice(&mut buffer);
        for (out, coefficient) in slice.iter_mut().zip(buffer) {
            *out = coefficient as f32;
        }
    }

    /// Coefficient by row-major index in 0..9.
    ///
    /// # Panics
    ///
    /// Panics for indices past 8, like slice indexing would.
    pub fn element(&self, index: usize) -> f64 {
        match index {
            0 => self.m00,
            1 => self.m01,
            2 => self.m02,
            3 => self.m10,
            4 => self.m11,
            5 => self.m12,
            6 => self.m20,
            7 => self.m21,
            8 => self.m22,
            _ => panic!("component index out of bounds: the len is 9 but the index is {index}"),
        }
    }

    /// Sets the coefficient at the row-major `index`; same indexing and
    /// panic behavior as [`element`](Self::element).
    pub fn set_element(&mut self, index: usize, value: f64) {
        match index {
            0 => self.m00 = value,
            1 => self.m01 = value,
            2 => self.m02 = value,
            3 => self.m10 = value,
            4 => self.m11 = value,
            5 => self.m12 = value,
            6 => self.m20 = value,
            7 => self.m21 = value,
            8 => self.m22 = value,
            _ => panic!("component index out of bounds: the len is 9 but the index is {index}"),
        }
    }

    /// Coefficient by `(row, column)`, both in 0..3.
    ///
    /// # Panics
    ///
    /// Panics when either index is past 2.
    pub fn element_at(&self, row: usize, column: usize) -> f64 {
        assert!(
            row < 3 && column < 3,
            "matrix index out of bounds: ({row}, {column}) is outside 3x3"
        );
        self.element(row * 3 + column)
    }

    pub fn contains_nan(&self) -> bool {
        checks::matrix_contains_nan(
            self.m00, self.m01, self.m02, self.m10, self.m11, self.m12, self.m20, self.m21,
            self.m22,
        )
    }

    pub fn set_to_nan(&mut self) {
        *self = Self::new(
            f64::NAN,
            f64::NAN,
            f64::NAN,
            f64::NAN,
            f64::NAN,
            f64::NAN,
            f64::NAN,
            f64::NAN,
            f64::NAN,
        );
    }

    pub fn set_identity(&mut self) {
        *self = Self::identity();
    }

    pub fn determinant(&self) -> f64 {
        checks::determinant(
            self.m00, self.m01, self.m02, self.m10, self.m11, self.m12, self.m20, self.m21,
            self.m22,
        )
    }

    /// See [`checks::is_rotation_matrix`].
    pub fn is_rotation_matrix(&self, epsilon: f64) -> bool {
        checks::is_rotation_matrix(
            self.m00, self.m01, self.m02, self.m10, self.m11, self.m12, self.m20, self.m21,
            self.m22, epsilon,
        )
    }

    /// See [`checks::is_zero_rotation`].
    pub fn is_zero_rotation(&self, epsilon: f64) -> bool {
        checks::is_zero_rotation(
            self.m00, self.m01, self.m02, self.m10, self.m11, self.m12, self.m20, self.m21,
            self.m22, epsilon,
        )
    }

    /// See [`checks::is_matrix_2d`].
    pub fn is_matrix_2d(&self, epsilon: f64) -> bool {
        checks::is_matrix_2d(self.m02, self.m12, self.m20, self.m21, self.m22, epsilon)
    }

    /// Transposes in place. For a proper rotation this is the inverse.
    pub fn transpose(&mut self) {
        std::mem::swap(&mut self.m01, &mut self.m10);
        std::mem::swap(&mut self.m02, &mut self.m20);
        std::mem::swap(&mut self.m12, &mut self.m21);
    }

    /// The transposed (inverse, for a proper rotation) matrix.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self::new(
            self.m00, self.m10, self.m20, self.m01, self.m11, self.m21, self.m02, self.m12,
            self.m22,
        )
    }

    /// Inverts the rotation in place; alias for [`transpose`](Self::transpose).
    pub fn invert(&mut self) {
        self.transpose();
    }

    /// Re-orthonormalizes a matrix that has drifted off the rotation
    /// manifold, eg, through accumulated composition error.
    ///
    /// The first two rows have half of their mutual error redistributed
    /// symmetrically between them and are rescaled to unit length; the third
    /// row is rebuilt as their cross product, which also squeezes out any
    /// reflection-ward drift. For matrices near a rotation this is the
    /// nearest-rotation projection to first order. NaN stays NaN.
    pub fn normalize(&mut self) {
        if self.contains_nan() {
            self.set_to_nan();
            return;
        }

        let row0 = crate::Vector3::new(self.m00, self.m01, self.m02);
        let row1 = crate::Vector3::new(self.m10, self.m11, self.m12);

        let half_error = 0.5 * row0.dot(&row1);
        let mut new0 = crate::Vector3::new(
            row0.x - half_error * row1.x,
            row0.y - half_error * row1.y,
            row0.z - half_error * row1.z,
        );
        let mut new1 = crate::Vector3::new(
            row1.x - half_error * row0.x,
            row1.y - half_error * row0.y,
            row1.z - half_error * row0.z,
        );

        let inv0 = 1.0 / util::norm3(new0.x, new0.y, new0.z);
        let inv1 = 1.0 / util::norm3(new1.x, new1.y, new1.z);
        new0 = crate::Vector3::new(new0.x * inv0, new0.y * inv0, new0.z * inv0);
        new1 = crate::Vector3::new(new1.x * inv1, new1.y * inv1, new1.z * inv1);
        let new2 = new0.cross(&new1);

        *self = Self::new(
            new0.x, new0.y, new0.z, new1.x, new1.y, new1.z, new2.x, new2.y, new2.z,
        );
    }
}

impl Display for RotationMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:6.3}, {:6.3}, {:6.3}]\n[{:6.3}, {:6.3}, {:6.3}]\n[{:6.3}, {:6.3}, {:6.3}]",
            self.m00,
            self.m01,
            self.m02,
            self.m10,
            self.m11,
            self.m12,
            self.m20,
            self.m21,
            self.m22
        )
    }
}

impl Orientation for RotationMatrix {
    fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_rotation_matrix(self)
    }

    fn contains_nan(&self) -> bool {
        RotationMatrix::contains_nan(self)
    }

    fn to_axis_angle(&self) -> AxisAngle {
        AxisAngle::from_rotation_matrix(self)
    }

    fn to_rotation_matrix(&self) -> RotationMatrix {
        *self
    }

    fn to_rotation_vector(&self) -> RotationVector {
        RotationVector::from_rotation_matrix(self)
    }

    fn to_yaw_pitch_roll(&self) -> YawPitchRoll {
        YawPitchRoll::from_rotation_matrix(self)
    }

    /// Rotates by the plain matrix-vector product.
    fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        Vector3::new(
            self.m00 * vector.x + self.m01 * vector.y + self.m02 * vector.z,
            self.m10 * vector.x + self.m11 * vector.y + self.m12 * vector.z,
            self.m20 * vector.x + self.m21 * vector.y + self.m22 * vector.z,
        )
    }

    /// Rotates by the transpose, which for a rotation matrix is the inverse.
    fn inverse_transform_vector(&self, vector: &Vector3) -> Vector3 {
        Vector3::new(
            self.m00 * vector.x + self.m10 * vector.y + self.m20 * vector.z,
            self.m01 * vector.x + self.m11 * vector.y + self.m21 * vector.z,
            self.m02 * vector.x + self.m12 * vector.y + self.m22 * vector.z,
        )
    }

    /// Planar transform straight off the upper-left 2×2 block, guarded by
    /// [`checks::check_matrix_2d`].
    fn transform_vector2(&self, vector: &Vector2) -> Result<Vector2, OrientationError> {
        checks::check_matrix_2d(
            self.m02,
            self.m12,
            self.m20,
            self.m21,
            self.m22,
            util::EPS_UNIT,
        )?;
        Ok(Vector2::new(
            self.m00 * vector.x + self.m01 * vector.y,
            self.m10 * vector.x + self.m11 * vector.y,
        ))
    }
}

impl OrientationMut for RotationMatrix {
    fn set_quaternion(&mut self, quaternion: &Quaternion) {
        convert::quaternion_to_matrix(quaternion, self);
    }

    fn set_to_nan(&mut self) {
        RotationMatrix::set_to_nan(self);
    }

    fn set_identity(&mut self) {
        RotationMatrix::set_identity(self);
    }

    fn set_axis_angle(&mut self, axis_angle: &AxisAngle) {
        convert::axis_angle_to_matrix(axis_angle, self);
    }

    fn set_rotation_matrix(&mut self, matrix: &RotationMatrix) {
        *self = *matrix;
    }

    fn set_rotation_vector(&mut self, rotation_vector: &RotationVector) {
        convert::rotation_vector_to_matrix(rotation_vector, self);
    }

    fn set_yaw_pitch_roll(&mut self, yaw_pitch_roll: &YawPitchRoll) {
        convert::yaw_pitch_roll_to_matrix(yaw_pitch_roll, self);
    }

    // matrix operands multiply directly instead of detouring through a
    // quaternion

    fn append<O: Orientation + ?Sized>(&mut self, other: &O) {
        let left = *self;
        crate::compose::multiply_matrices(&left, false, &other.to_rotation_matrix(), false, self);
    }

    fn append_inverse<O: Orientation + ?Sized>(&mut self, other: &O) {
        let left = *self;
        crate::compose::multiply_matrices(&left, false, &other.to_rotation_matrix(), true, self);
    }

    fn prepend<O: Orientation + ?Sized>(&mut self, other: &O) {
        let right = *self;
        crate::compose::multiply_matrices(&other.to_rotation_matrix(), false, &right, false, self);
    }

    fn prepend_inverse<O: Orientation + ?Sized>(&mut self, other: &O) {
        let right = *self;
        crate::compose::multiply_matrices(&other.to_rotation_matrix(), true, &right, false, self);
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for RotationMatrix {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        (0..9).all(|i| self.element(i).abs_diff_eq(&other.element(i), epsilon))
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for RotationMatrix {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        (0..9).all(|i| {
            self.element(i)
                .relative_eq(&other.element(i), epsilon, max_relative)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn z_quarter_turn() -> RotationMatrix {
        RotationMatrix::new(0., -1., 0., 1., 0., 0., 0., 0., 1.)
    }

    #[test]
    fn identity_is_a_rotation() {
        let identity = RotationMatrix::identity();
        assert!(identity.is_rotation_matrix(1e-12));
        assert!(identity.is_zero_rotation(1e-12));
        assert_relative_eq!(identity.determinant(), 1.0);
    }

    #[test]
    fn try_new_rejects_reflections() {
        let reflection = RotationMatrix::try_new(1., 0., 0., 0., 1., 0., 0., 0., -1., 1e-10);
        assert!(matches!(
            reflection,
            Err(OrientationError::NotRotationMatrix { determinant }) if determinant < 0.
        ));
        assert!(RotationMatrix::try_new(0., -1., 0., 1., 0., 0., 0., 0., 1., 1e-10).is_ok());
    }

    #[test]
    fn transpose_is_the_inverse() {
        let matrix = z_quarter_turn();
        let mut composed = RotationMatrix::identity();
        crate::compose::multiply_matrices(&matrix, false, &matrix.transposed(), false, &mut composed);
        assert_relative_eq!(composed, RotationMatrix::identity(), epsilon = 1e-12);
    }

    #[test]
    fn element_indexing_is_row_major() {
        let matrix = z_quarter_turn();
        assert_eq!(matrix.element(1), -1.0);
        assert_eq!(matrix.element_at(1, 0), 1.0);
        assert_eq!(matrix.element(8), 1.0);
    }

    #[test]
    #[should_panic(expected = "the len is 9 but the index is 9")]
    fn element_out_of_range_panics() {
        RotationMatrix::identity().element(9);
    }

    #[test]
    #[should_panic(expected = "outside 3x3")]
    fn element_at_out_of_range_panics() {
        RotationMatrix::identity().element_at(0, 3);
    }

    #[test]
    fn normalize_restores_orthonormality() {
        // a quarter turn about Z with some accumulated drift sprinkled in
        let mut drifted = z_quarter_turn();
        drifted.m00 += 1e-4;
        drifted.m11 -= 2e-4;
        drifted.m01 += 1e-4;
        assert!(!drifted.is_rotation_matrix(1e-10));

        drifted.normalize();
        assert!(drifted.is_rotation_matrix(1e-7));
        // and it stays close to where it started
        assert_relative_eq!(drifted, z_quarter_turn(), epsilon = 1e-3);
    }

    #[test]
    fn normalize_of_nan_stays_nan() {
        let mut matrix = RotationMatrix::identity();
        matrix.m12 = f64::NAN;
        matrix.normalize();
        assert!(matrix.contains_nan());
    }

    #[test]
    fn slice_round_trip_is_row_major() {
        let matrix = z_quarter_turn();
        let mut buffer = [0.0; 9];
        matrix.write_to_slice(&mut buffer);
        assert_eq!(buffer, [0., -1., 0., 1., 0., 0., 0., 0., 1.]);
        assert_eq!(RotationMatrix::from_slice(&buffer), matrix);
    }

    #[test]
    fn packing_round_trips_through_f32() {
        let matrix = RotationMatrix::from_axis_angle(&AxisAngle::new(0., 1., 0., 0.8));
        let mut buffer = [0.0_f32; 9];
        matrix.write_to_f32_slice(&mut buffer);
        let back = RotationMatrix::from_f32_slice(&buffer);
        assert_relative_eq!(back, matrix, epsilon = 1e-6);
    }

    #[test]
    fn display_renders_three_rows() {
        let rendered = format!("{}", RotationMatrix::identity());
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "[ 1.000,  0.000,  0.000]");
    }

    #[test]
    fn rotation_of_90_degrees_about_z_is_2d() {
        assert!(z_quarter_turn().is_matrix_2d(1e-12));
        let tilted = RotationMatrix::from_axis_angle(&AxisAngle::new(1., 0., 0., FRAC_PI_2));
        assert!(!tilted.is_matrix_2d(1e-12));
    }
}
