//! Composition kernels: the raw products that [`OrientationMut::append`]
//! and friends are built on.
//!
//! Each multiply takes both operands by shared reference plus a flag for
//! inverting that operand on the fly, and packs the product into a `&mut`
//! destination. Inverting through the flag (conjugating a quaternion,
//! transposing a matrix) costs a few sign flips instead of a temporary, so
//! `a⁻¹ ⊗ b` and `a ⊗ b⁻¹` are as cheap as the plain product.
//!
//! [`OrientationMut::append`]: crate::OrientationMut::append

use crate::util::EPS_DEGENERATE;
use crate::{AxisAngle, Quaternion, RotationMatrix, Vector3};

/// Packs the Hamilton product of `a` and `b` into `product`, conjugating
/// either operand first where its flag is set.
///
/// Operands are read into locals before the first write, so `product` may
/// be a copy of either operand held by the caller.
pub fn multiply_quaternions(
    a: &Quaternion,
    conjugate_a: bool,
    b: &Quaternion,
    conjugate_b: bool,
    product: &mut Quaternion,
) {
    let a_sign = if conjugate_a { -1.0 } else { 1.0 };
    let b_sign = if conjugate_b { -1.0 } else { 1.0 };

    let ax = a.x * a_sign;
    let ay = a.y * a_sign;
    let az = a.z * a_sign;
    let a_s = a.s;
    let bx = b.x * b_sign;
    let by = b.y * b_sign;
    let bz = b.z * b_sign;
    let b_s = b.s;

    product.set(
        a_s * bx + ax * b_s + ay * bz - az * by,
        a_s * by - ax * bz + ay * b_s + az * bx,
        a_s * bz + ax * by - ay * bx + az * b_s,
        a_s * b_s - ax * bx - ay * by - az * bz,
    );
}

/// Packs the matrix product of `a` and `b` into `product`, transposing
/// either operand first where its flag is set.
///
/// For proper rotation matrices the transpose is the inverse, so the flags
/// carry the same meaning as the conjugate flags of
/// [`multiply_quaternions`]. Operands are copied before the first write, so
/// in-place use through a caller-held copy is safe.
pub fn multiply_matrices(
    a: &RotationMatrix,
    transpose_a: bool,
    b: &RotationMatrix,
    transpose_b: bool,
    product: &mut RotationMatrix,
) {
    let left = if transpose_a { a.transposed() } else { *a };
    let right = if transpose_b { b.transposed() } else { *b };

    product.m00 = left.m00 * right.m00 + left.m01 * right.m10 + left.m02 * right.m20;
    product.m01 = left.m00 * right.m01 + left.m01 * right.m11 + left.m02 * right.m21;
    product.m02 = left.m00 * right.m02 + left.m01 * right.m12 + left.m02 * right.m22;
    product.m10 = left.m10 * right.m00 + left.m11 * right.m10 + left.m12 * right.m20;
    product.m11 = left.m10 * right.m01 + left.m11 * right.m11 + left.m12 * right.m21;
    product.m12 = left.m10 * right.m02 + left.m11 * right.m12 + left.m12 * right.m22;
    product.m20 = left.m20 * right.m00 + left.m21 * right.m10 + left.m22 * right.m20;
    product.m21 = left.m20 * right.m01 + left.m21 * right.m11 + left.m22 * right.m21;
    product.m22 = left.m20 * right.m02 + left.m21 * right.m12 + left.m22 * right.m22;
}

/// Packs the composition of two axis-angles into `product`, inverting
/// either operand first where its flag is set.
///
/// Axis-angles have no native product; each operand becomes its half-angle
/// quaternion, the Hamilton product runs, and the result is written back
/// through the scale-invariant angle extraction. Flag-controlled inversion
/// is handed to [`multiply_quaternions`], which conjugates the flagged
/// operand.
pub fn multiply_axis_angles(
    a: &AxisAngle,
    invert_a: bool,
    b: &AxisAngle,
    invert_b: bool,
    product: &mut AxisAngle,
) {
    let mut qa = Quaternion::identity();
    crate::convert::axis_angle_to_quaternion(a, &mut qa);
    let mut qb = Quaternion::identity();
    crate::convert::axis_angle_to_quaternion(b, &mut qb);

    let mut composed = Quaternion::identity();
    multiply_quaternions(&qa, invert_a, &qb, invert_b, &mut composed);
    crate::convert::quaternion_to_axis_angle(&composed, product);
}

/// Rotates `vector` by `axis_angle` through the double-cross Rodrigues
/// form `v + sin θ·(u×v) + (1−cos θ)·(u×(u×v))`.
///
/// The axis is normalized internally; a zero axis means the identity and
/// returns the vector unchanged. NaN anywhere flows into the result.
pub(crate) fn rotate_vector(axis_angle: &AxisAngle, vector: &Vector3) -> Vector3 {
    if axis_angle.contains_nan() {
        return Vector3::new(f64::NAN, f64::NAN, f64::NAN);
    }

    let axis_norm = axis_angle.axis_norm();
    if axis_norm < EPS_DEGENERATE {
        return *vector;
    }

    let axis = Vector3::new(
        axis_angle.x / axis_norm,
        axis_angle.y / axis_norm,
        axis_angle.z / axis_norm,
    );
    let (sin, cos) = axis_angle.angle.sin_cos();

    let first_cross = axis.cross(vector);
    let second_cross = axis.cross(&first_cross);
    Vector3::new(
        vector.x + sin * first_cross.x + (1.0 - cos) * second_cross.x,
        vector.y + sin * first_cross.y + (1.0 - cos) * second_cross.y,
        vector.z + sin * first_cross.z + (1.0 - cos) * second_cross.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Orientation;
    use approx::assert_relative_eq;
    use quickcheck::quickcheck;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, PI};

    #[test]
    fn quaternion_product_composes_the_rotations() {
        let eighth = Quaternion::from_axis_angle(&AxisAngle::new(0., 0., 1., FRAC_PI_4));
        let mut quarter = Quaternion::identity();
        multiply_quaternions(&eighth, false, &eighth, false, &mut quarter);

        let expected = Quaternion::from_axis_angle(&AxisAngle::new(0., 0., 1., FRAC_PI_2));
        assert_relative_eq!(quarter, expected, epsilon = 1e-12);
    }

    #[test]
    fn conjugate_flags_invert_their_operand() {
        let a = Quaternion::from_axis_angle(&AxisAngle::new(0.5, -0.5, 0.5, 1.1));
        let b = Quaternion::from_axis_angle(&AxisAngle::new(0., 1., 0., 0.7));

        let mut flagged = Quaternion::identity();
        multiply_quaternions(&a, true, &b, false, &mut flagged);

        let mut explicit = Quaternion::identity();
        multiply_quaternions(&a.conjugated(), false, &b, false, &mut explicit);
        assert_relative_eq!(flagged, explicit, epsilon = 1e-15);

        let mut cancelled = Quaternion::identity();
        multiply_quaternions(&a, true, &a, false, &mut cancelled);
        assert!(cancelled.geometrically_equals(&Quaternion::identity(), 1e-12));
    }

    #[test]
    fn product_destination_may_be_a_copy_of_an_operand() {
        let a = Quaternion::from_axis_angle(&AxisAngle::new(1., 0., 0., 0.4));
        let b = Quaternion::from_axis_angle(&AxisAngle::new(0., 1., 0., 0.9));

        let mut separate = Quaternion::identity();
        multiply_quaternions(&a, false, &b, false, &mut separate);

        let mut in_place = a;
        multiply_quaternions(&a, false, &b, false, &mut in_place);
        assert_eq!(in_place, separate);
    }

    #[test]
    fn matrix_product_matches_the_quaternion_product() {
        let a = AxisAngle::new(0., 0., 1., FRAC_PI_3);
        let b = AxisAngle::new(1., 0., 0., -FRAC_PI_4);

        let mut matrix_product = RotationMatrix::identity();
        multiply_matrices(
            &RotationMatrix::from_axis_angle(&a),
            false,
            &RotationMatrix::from_axis_angle(&b),
            false,
            &mut matrix_product,
        );

        let mut quaternion_product = Quaternion::identity();
        multiply_quaternions(
            &Quaternion::from_axis_angle(&a),
            false,
            &Quaternion::from_axis_angle(&b),
            false,
            &mut quaternion_product,
        );

        assert!(matrix_product.geometrically_equals(&quaternion_product, 1e-12));
        assert!(matrix_product.is_rotation_matrix(1e-10));
    }

    #[test]
    fn transpose_flags_invert_their_operand() {
        let rotation = RotationMatrix::from_axis_angle(&AxisAngle::new(0.5, 0.5, -0.5, 2.0));

        let mut should_be_identity = RotationMatrix::identity();
        multiply_matrices(&rotation, true, &rotation, false, &mut should_be_identity);
        assert!(should_be_identity.is_zero_rotation(1e-12));
    }

    #[test]
    fn axis_angle_product_adds_coaxial_angles() {
        let first = AxisAngle::new(0., 0., 1., FRAC_PI_4);
        let second = AxisAngle::new(0., 0., 2.0, FRAC_PI_3); // non-unit axis

        let mut product = AxisAngle::identity();
        multiply_axis_angles(&first, false, &second, false, &mut product);
        assert_relative_eq!(product.angle, FRAC_PI_4 + FRAC_PI_3, epsilon = 1e-12);
        assert_relative_eq!(product.z, 1.0, epsilon = 1e-12);

        let mut difference = AxisAngle::identity();
        multiply_axis_angles(&product, false, &second, true, &mut difference);
        assert!(difference.geometrically_equals(&first, 1e-12));
    }

    #[test]
    fn rotating_the_basis_by_a_quarter_turn() {
        let about_z = AxisAngle::new(0., 0., 1., FRAC_PI_2);
        let rotated = rotate_vector(&about_z, &Vector3::new(1., 0., 0.));
        assert_relative_eq!(rotated, Vector3::new(0., 1., 0.), epsilon = 1e-12);

        // half turn about the diagonal axis swaps X and Y
        let diagonal = AxisAngle::new(1., 1., 0., PI);
        let swapped = rotate_vector(&diagonal, &Vector3::new(1., 0., 0.));
        assert_relative_eq!(swapped, Vector3::new(0., 1., 0.), epsilon = 1e-12);
    }

    #[test]
    fn rotating_by_a_zero_axis_is_the_identity() {
        let degenerate = AxisAngle::new(0., 0., 0., 1.5);
        let vector = Vector3::new(0.1, -2.0, 3.5);
        assert_eq!(rotate_vector(&degenerate, &vector), vector);
    }

    #[test]
    fn rotating_by_a_nan_axis_angle_poisons_the_vector() {
        let mut poisoned = AxisAngle::identity();
        poisoned.z = f64::NAN;
        assert!(rotate_vector(&poisoned, &Vector3::new(1., 0., 0.)).contains_nan());
    }

    quickcheck! {
        fn quaternion_product_preserves_unit_norm(a: Quaternion, b: Quaternion) -> bool {
            let mut product = Quaternion::identity();
            multiply_quaternions(&a, false, &b, false, &mut product);
            product.is_unitary(1e-10)
        }

        fn product_with_own_conjugate_is_identity(q: Quaternion) -> bool {
            let mut product = Quaternion::identity();
            multiply_quaternions(&q, false, &q, true, &mut product);
            product.geometrically_equals(&Quaternion::identity(), 1e-10)
        }

        fn rotation_preserves_vector_length(aa: AxisAngle) -> bool {
            let vector = Vector3::new(0.3, -1.2, 2.5);
            let rotated = rotate_vector(&aa, &vector);
            let before = crate::util::norm3(vector.x, vector.y, vector.z);
            let after = crate::util::norm3(rotated.x, rotated.y, rotated.z);
            (before - after).abs() < 1e-10
        }
    }
}
