//! Capability traits shared by every rotation representation.
//!
//! The split is read-only versus mutable. [`Orientation`] is the read-only
//! view: anything that can report itself as a quaternion gets angle
//! extraction, angular distance, geometric equality, conversion into every
//! other representation, and vector/matrix transformation for free.
//! [`OrientationMut`] adds the write side: anything that can overwrite
//! itself from a quaternion gets set-from-any-representation and in-place
//! composition for free.
//!
//! Each concrete type only has to supply the two quaternion funnels plus its
//! raw component storage; the shared algorithms live here and in
//! [`compose`](crate::compose). The concrete impls override the provided
//! methods wherever a direct conversion path exists, so that, say, composing
//! two rotation matrices never detours through a quaternion.

use crate::compose::{multiply_matrices, multiply_quaternions, rotate_vector};
use crate::error::OrientationError;
use crate::util::{norm3, EPS_UNIT};
use crate::{
    AxisAngle, Quaternion, RotationMatrix, RotationVector, Vector2, Vector3, Vector4, YawPitchRoll,
};

/// Read-only view of a 3D rotation, regardless of how it is stored.
pub trait Orientation {
    /// This rotation as a quaternion.
    ///
    /// Every provided method funnels through this, so implementations keep
    /// it cheap and allocation-free.
    fn to_quaternion(&self) -> Quaternion;

    /// Whether any stored component is NaN.
    fn contains_nan(&self) -> bool;

    /// This rotation as an axis-angle.
    fn to_axis_angle(&self) -> AxisAngle {
        AxisAngle::from_quaternion(&self.to_quaternion())
    }

    /// This rotation as a rotation matrix.
    fn to_rotation_matrix(&self) -> RotationMatrix {
        RotationMatrix::from_quaternion(&self.to_quaternion())
    }

    /// This rotation as a rotation vector.
    fn to_rotation_vector(&self) -> RotationVector {
        RotationVector::from_quaternion(&self.to_quaternion())
    }

    /// This rotation as yaw-pitch-roll angles, all-NaN inside the
    /// gimbal-lock guard band.
    fn to_yaw_pitch_roll(&self) -> YawPitchRoll {
        YawPitchRoll::from_quaternion(&self.to_quaternion())
    }

    /// The magnitude of this rotation in radians, wrapped into [0, π].
    ///
    /// Representations that store an angle directly (axis-angle, rotation
    /// vector) override this to return their stored value without wrapping.
    fn angle(&self) -> f64 {
        let quaternion = self.to_quaternion();
        let u_norm = norm3(quaternion.x, quaternion.y, quaternion.z);
        2.0 * u_norm.atan2(quaternion.s.abs())
    }

    /// Whether this rotation is within `epsilon` radians of the identity.
    ///
    /// Judged on the wrapped quaternion angle rather than [`angle`], so an
    /// axis-angle carrying `2π` verbatim still counts as zero. NaN input is
    /// never zero.
    ///
    /// [`angle`]: Orientation::angle
    fn is_zero_orientation(&self, epsilon: f64) -> bool {
        let quaternion = self.to_quaternion();
        let u_norm = norm3(quaternion.x, quaternion.y, quaternion.z);
        2.0 * u_norm.atan2(quaternion.s.abs()) <= epsilon
    }

    /// The relative rotation `self⁻¹ ⊗ other`: what has to be applied on
    /// top of this rotation to arrive at `other`.
    fn difference<O: Orientation + ?Sized>(&self, other: &O) -> Quaternion {
        let mut relative = Quaternion::identity();
        multiply_quaternions(
            &self.to_quaternion(),
            true,
            &other.to_quaternion(),
            false,
            &mut relative,
        );
        relative
    }

    /// The angular distance in radians between this rotation and `other`,
    /// in [0, π].
    ///
    /// Computed from [`difference`], taking the scalar's magnitude so that
    /// the quaternion double cover collapses: `q` and `−q` are at distance
    /// zero. NaN in either operand makes the distance NaN.
    ///
    /// [`difference`]: Orientation::difference
    fn distance<O: Orientation + ?Sized>(&self, other: &O) -> f64 {
        let relative = self.difference(other);
        let u_norm = norm3(relative.x, relative.y, relative.z);
        2.0 * u_norm.atan2(relative.s.abs())
    }

    /// Whether this rotation and `other` represent the same orientation,
    /// within `epsilon` radians of angular distance.
    ///
    /// This is equality of the rotation, not of the components: a
    /// quaternion equals its negation here, and an axis-angle equals the
    /// matrix built from it. NaN operands are never equal to anything.
    fn geometrically_equals<O: Orientation + ?Sized>(&self, other: &O, epsilon: f64) -> bool {
        self.distance(other) <= epsilon
    }

    /// Applies this rotation to a 3-vector.
    ///
    /// Uses the double-cross Rodrigues form
    /// `v + sin θ·(u×v) + (1−cos θ)·(u×(u×v))` straight from the unit axis
    /// and angle, so no matrix is materialized for a single vector.
    fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        rotate_vector(&self.to_axis_angle(), vector)
    }

    /// Applies the inverse of this rotation to a 3-vector.
    fn inverse_transform_vector(&self, vector: &Vector3) -> Vector3 {
        rotate_vector(&self.to_axis_angle().inverse(), vector)
    }

    /// Applies this rotation to the vector part of a 4-tuple, leaving the
    /// scalar untouched.
    fn transform_vector4(&self, vector: &Vector4) -> Vector4 {
        let rotated = self.transform_vector(&Vector3::new(vector.x, vector.y, vector.z));
        Vector4::new(rotated.x, rotated.y, rotated.z, vector.s)
    }

    /// Applies this rotation to a 2-vector in the XY plane.
    ///
    /// Only defined when the rotation is purely about the Z axis; anything
    /// else returns [`OrientationError::NotZAxisRotation`] without
    /// producing a partial result.
    fn transform_vector2(&self, vector: &Vector2) -> Result<Vector2, OrientationError> {
        let quaternion = self.to_quaternion();
        let norm = quaternion.norm();
        if quaternion.x.abs() > EPS_UNIT * norm || quaternion.y.abs() > EPS_UNIT * norm {
            return Err(OrientationError::NotZAxisRotation);
        }
        let angle = 2.0 * quaternion.z.atan2(quaternion.s);
        let (sin, cos) = angle.sin_cos();
        Ok(Vector2::new(
            vector.x * cos - vector.y * sin,
            vector.x * sin + vector.y * cos,
        ))
    }

    /// Conjugates `matrix` by this rotation: `R · M · Rᵀ`.
    ///
    /// This re-expresses `matrix` in the frame reached by this rotation.
    fn transform_matrix(&self, matrix: &RotationMatrix) -> RotationMatrix {
        let rotation = self.to_rotation_matrix();
        let mut rotated = RotationMatrix::identity();
        multiply_matrices(&rotation, false, matrix, false, &mut rotated);
        let mut conjugated = RotationMatrix::identity();
        multiply_matrices(&rotated, false, &rotation, true, &mut conjugated);
        conjugated
    }
}

/// Mutable view of a 3D rotation: everything in [`Orientation`] plus
/// overwrite-from-any-representation and in-place composition.
pub trait OrientationMut: Orientation {
    /// Overwrites this rotation with the one `quaternion` represents.
    fn set_quaternion(&mut self, quaternion: &Quaternion);

    /// Sets every component to NaN.
    fn set_to_nan(&mut self);

    /// Resets to the identity rotation.
    fn set_identity(&mut self);

    /// Overwrites this rotation with the one `axis_angle` represents.
    fn set_axis_angle(&mut self, axis_angle: &AxisAngle) {
        self.set_quaternion(&Quaternion::from_axis_angle(axis_angle));
    }

    /// Overwrites this rotation with the one `matrix` represents.
    fn set_rotation_matrix(&mut self, matrix: &RotationMatrix) {
        self.set_quaternion(&Quaternion::from_rotation_matrix(matrix));
    }

    /// Overwrites this rotation with the one `rotation_vector` represents.
    fn set_rotation_vector(&mut self, rotation_vector: &RotationVector) {
        self.set_quaternion(&Quaternion::from_rotation_vector(rotation_vector));
    }

    /// Overwrites this rotation with the one `yaw_pitch_roll` represents.
    fn set_yaw_pitch_roll(&mut self, yaw_pitch_roll: &YawPitchRoll) {
        self.set_quaternion(&Quaternion::from_yaw_pitch_roll(yaw_pitch_roll));
    }

    /// Overwrites this rotation with `other`, whatever its representation.
    fn set_orientation<O: Orientation + ?Sized>(&mut self, other: &O) {
        self.set_quaternion(&other.to_quaternion());
    }

    /// Overwrites this rotation with the inverse of `other`.
    fn set_and_invert<O: Orientation + ?Sized>(&mut self, other: &O) {
        self.set_quaternion(&other.to_quaternion().conjugated());
    }

    /// Overwrites this rotation with `other` renormalized onto the unit
    /// sphere, discarding any drift its components carried.
    fn set_and_normalize<O: Orientation + ?Sized>(&mut self, other: &O) {
        let mut quaternion = other.to_quaternion();
        quaternion.normalize();
        self.set_quaternion(&quaternion);
    }

    /// Composes `other` onto this rotation from the right: the result
    /// applies `other` first, then the original rotation.
    ///
    /// `other` is brought into this representation's encoding before the
    /// multiply; representations with a direct same-type product (matrices)
    /// override this to use it.
    fn append<O: Orientation + ?Sized>(&mut self, other: &O) {
        let mut composed = Quaternion::identity();
        multiply_quaternions(
            &self.to_quaternion(),
            false,
            &other.to_quaternion(),
            false,
            &mut composed,
        );
        self.set_quaternion(&composed);
    }

    /// Composes the inverse of `other` onto this rotation from the right.
    fn append_inverse<O: Orientation + ?Sized>(&mut self, other: &O) {
        let mut composed = Quaternion::identity();
        multiply_quaternions(
            &self.to_quaternion(),
            false,
            &other.to_quaternion(),
            true,
            &mut composed,
        );
        self.set_quaternion(&composed);
    }

    /// Composes `other` onto this rotation from the left: the result
    /// applies the original rotation first, then `other`.
    fn prepend<O: Orientation + ?Sized>(&mut self, other: &O) {
        let mut composed = Quaternion::identity();
        multiply_quaternions(
            &other.to_quaternion(),
            false,
            &self.to_quaternion(),
            false,
            &mut composed,
        );
        self.set_quaternion(&composed);
    }

    /// Composes the inverse of `other` onto this rotation from the left.
    fn prepend_inverse<O: Orientation + ?Sized>(&mut self, other: &O) {
        let mut composed = Quaternion::identity();
        multiply_quaternions(
            &other.to_quaternion(),
            true,
            &self.to_quaternion(),
            false,
            &mut composed,
        );
        self.set_quaternion(&composed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, PI};

    #[test]
    fn distance_is_representation_agnostic() {
        let quarter_about_z = AxisAngle::new(0., 0., 1., FRAC_PI_2);
        let as_quaternion = Quaternion::from_axis_angle(&quarter_about_z);
        let as_matrix = RotationMatrix::from_axis_angle(&quarter_about_z);
        let as_vector = RotationVector::from_axis_angle(&quarter_about_z);

        assert_relative_eq!(quarter_about_z.distance(&as_quaternion), 0.0, epsilon = 1e-12);
        assert_relative_eq!(as_quaternion.distance(&as_matrix), 0.0, epsilon = 1e-12);
        assert_relative_eq!(as_matrix.distance(&as_vector), 0.0, epsilon = 1e-12);

        let third_about_z = AxisAngle::new(0., 0., 1., FRAC_PI_2 + FRAC_PI_3);
        assert_relative_eq!(
            quarter_about_z.distance(&third_about_z),
            FRAC_PI_3,
            epsilon = 1e-12
        );
    }

    #[test]
    fn distance_collapses_the_double_cover() {
        let q = Quaternion::from_axis_angle(&AxisAngle::new(0., 1., 0., 1.1));
        let mut negated = q;
        negated.negate();
        assert_relative_eq!(q.distance(&negated), 0.0, epsilon = 1e-12);
        assert!(q.geometrically_equals(&negated, 1e-12));
    }

    #[test]
    fn distance_with_a_nan_operand_is_nan() {
        let mut poisoned = Quaternion::identity();
        poisoned.y = f64::NAN;
        assert!(Quaternion::identity().distance(&poisoned).is_nan());
        assert!(!Quaternion::identity().geometrically_equals(&poisoned, 1e-3));
    }

    #[test]
    fn wrapped_angle_from_an_overshooting_axis_angle() {
        // stored verbatim by the axis-angle, wrapped by the quaternion view
        let overshooting = AxisAngle::new(1., 0., 0., 2.0 * PI + 0.25);
        assert_relative_eq!(overshooting.angle(), 2.0 * PI + 0.25);
        assert_relative_eq!(
            overshooting.to_quaternion().angle(),
            0.25,
            epsilon = 1e-12
        );
        assert!(AxisAngle::new(0., 0., 1., 2.0 * PI).is_zero_orientation(1e-12));
    }

    #[test]
    fn transform_vector_matches_the_matrix_product() {
        let rotation = AxisAngle::new(0.5, -0.5, std::f64::consts::FRAC_1_SQRT_2, 1.3);
        let vector = Vector3::new(0.3, -1.2, 2.5);

        let direct = rotation.transform_vector(&vector);
        let matrix = rotation.to_rotation_matrix();
        let via_matrix = Vector3::new(
            matrix.m00 * vector.x + matrix.m01 * vector.y + matrix.m02 * vector.z,
            matrix.m10 * vector.x + matrix.m11 * vector.y + matrix.m12 * vector.z,
            matrix.m20 * vector.x + matrix.m21 * vector.y + matrix.m22 * vector.z,
        );
        assert_relative_eq!(direct, via_matrix, epsilon = 1e-12);

        let back = rotation.inverse_transform_vector(&direct);
        assert_relative_eq!(back, vector, epsilon = 1e-12);
    }

    #[test]
    fn transform_vector4_only_touches_the_vector_part() {
        let rotation = Quaternion::from_axis_angle(&AxisAngle::new(0., 0., 1., FRAC_PI_2));
        let rotated = rotation.transform_vector4(&Vector4::new(1., 0., 0., 42.0));
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.z, 0.0, epsilon = 1e-12);
        assert_eq!(rotated.s, 42.0);
    }

    #[test]
    fn transform_vector2_requires_a_z_axis_rotation() {
        let about_z = AxisAngle::new(0., 0., 1., FRAC_PI_2);
        let rotated = about_z
            .transform_vector2(&Vector2::new(1., 0.))
            .unwrap();
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-12);

        let tilted = AxisAngle::new(0., 1., 0., FRAC_PI_4);
        assert_eq!(
            tilted.transform_vector2(&Vector2::new(1., 0.)),
            Err(OrientationError::NotZAxisRotation)
        );
    }

    #[test]
    fn transform_matrix_is_a_similarity_conjugation() {
        let rotation = AxisAngle::new(0., 0., 1., FRAC_PI_2);
        let subject = RotationMatrix::from_axis_angle(&AxisAngle::new(1., 0., 0., FRAC_PI_3));

        let conjugated = rotation.transform_matrix(&subject);
        // conjugating the X-axis rotation by a quarter turn about Z turns
        // it into the same-angle rotation about Y
        let expected = RotationMatrix::from_axis_angle(&AxisAngle::new(0., 1., 0., FRAC_PI_3));
        assert_relative_eq!(conjugated, expected, epsilon = 1e-12);
        assert!(conjugated.is_rotation_matrix(1e-10));
    }

    #[test]
    fn append_and_prepend_are_mirror_images() {
        let first = AxisAngle::new(0., 0., 1., FRAC_PI_2);
        let second = AxisAngle::new(1., 0., 0., FRAC_PI_3);

        let mut appended = Quaternion::from_axis_angle(&second);
        appended.append(&first);

        let mut prepended = Quaternion::from_axis_angle(&first);
        prepended.prepend(&second);

        assert!(appended.geometrically_equals(&prepended, 1e-12));

        // appended applies `first` first: the X axis should land on Y, then
        // tip around X
        let landed = appended.transform_vector(&Vector3::new(1., 0., 0.));
        let by_hand = second.transform_vector(&first.transform_vector(&Vector3::new(1., 0., 0.)));
        assert_relative_eq!(landed, by_hand, epsilon = 1e-12);
    }

    #[test]
    fn append_inverse_undoes_append() {
        let base = AxisAngle::new(0.5, 0.5, std::f64::consts::FRAC_1_SQRT_2, 0.9);
        let other = AxisAngle::new(0., 1., 0., -1.4);

        let mut quaternion = Quaternion::from_axis_angle(&base);
        quaternion.append(&other);
        quaternion.append_inverse(&other);
        assert!(quaternion.geometrically_equals(&base, 1e-12));

        let mut matrix = RotationMatrix::from_axis_angle(&base);
        matrix.prepend(&other);
        matrix.prepend_inverse(&other);
        assert!(matrix.geometrically_equals(&base, 1e-12));
    }

    #[test]
    fn mixed_encoding_composition_follows_the_primary_operand() {
        let half = AxisAngle::new(0., 0., 1., FRAC_PI_4);
        let as_matrix = RotationMatrix::from_axis_angle(&half);

        // axis-angle primary, matrix operand: two eighth turns make a
        // quarter turn, written back as an axis-angle
        let mut composed = half;
        composed.append(&as_matrix);
        assert_relative_eq!(composed.angle, FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(composed.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn difference_bridges_the_two_operands() {
        let a = AxisAngle::new(0., 0., 1., FRAC_PI_4);
        let b = YawPitchRoll::new(0.7, -0.2, 0.4);

        let mut rebuilt = Quaternion::from_axis_angle(&a);
        rebuilt.append(&a.difference(&b));
        assert!(rebuilt.geometrically_equals(&b, 1e-12));

        assert_relative_eq!(
            a.difference(&b).angle(),
            a.distance(&b),
            epsilon = 1e-12
        );
    }

    #[test]
    fn set_and_invert_composes_to_identity() {
        let source = AxisAngle::new(0.5, -0.5, std::f64::consts::FRAC_1_SQRT_2, 1.2);
        let mut inverted = RotationMatrix::identity();
        inverted.set_and_invert(&source);

        let mut composed = Quaternion::from_axis_angle(&source);
        composed.append(&inverted);
        assert!(composed.is_zero_orientation(1e-12));
    }

    #[test]
    fn set_and_normalize_lands_on_the_unit_sphere() {
        let drifted = Quaternion::new(0.6, 0., 0., 1.8);
        let mut normalized = Quaternion::identity();
        normalized.set_and_normalize(&drifted);
        assert!(normalized.is_unitary(1e-12));
        assert!(normalized.geometrically_equals(&drifted, 1e-12));
    }

    #[test]
    fn set_orientation_crosses_representations() {
        let source = YawPitchRoll::new(0.3, -0.5, 0.8);
        let mut target = RotationVector::identity();
        target.set_orientation(&source);
        assert!(target.geometrically_equals(&source, 1e-12));
    }
}
