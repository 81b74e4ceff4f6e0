//! Unit-quaternion representation of a 3D rotation.

use crate::convert;
use crate::orientation::{Orientation, OrientationMut};
use crate::util;
use crate::{AxisAngle, RotationMatrix, RotationVector, Vector3, YawPitchRoll};
use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rotation encoded as the quaternion `x·i + y·j + z·k + s`.
///
/// The scalar component comes last, so the component order is `(x, y, z, s)`
/// everywhere: constructors, element indices, and buffer packing.
///
/// A quaternion only represents a rotation when its norm is (close to) 1,
/// but none of the conversions in this crate require their *input* to be
/// pre-normalized: they normalize internally without touching the source
/// object, so any positive scalar multiple of a quaternion converts to the
/// same axis-angle, matrix, and so on. The all-zero quaternion is treated as
/// the identity rotation rather than an error.
///
/// Note also the double cover: `q` and `-q` encode the same rotation. They
/// compare unequal with `==` (which is component-wise) but equal under
/// [`Orientation::geometrically_equals`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub s: f64,
}

impl Default for Quaternion {
    /// The identity rotation `(0, 0, 0, 1)`.
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    pub const fn new(x: f64, y: f64, z: f64, s: f64) -> Self {
        Self { x, y, z, s }
    }

    /// The identity rotation `(0, 0, 0, 1)`.
    pub const fn identity() -> Self {
        Self::new(0., 0., 0., 1.)
    }

    /// The quaternion equivalent of the given axis-angle.
    pub fn from_axis_angle(axis_angle: &AxisAngle) -> Self {
        let mut out = Self::identity();
        convert::axis_angle_to_quaternion(axis_angle, &mut out);
        out
    }

    /// The quaternion equivalent of the given rotation matrix.
    pub fn from_rotation_matrix(matrix: &RotationMatrix) -> Self {
        let mut out = Self::identity();
        convert::matrix_to_quaternion(matrix, &mut out);
        out
    }

    /// The quaternion equivalent of the given rotation vector.
    pub fn from_rotation_vector(rotation_vector: &RotationVector) -> Self {
        let mut out = Self::identity();
        convert::rotation_vector_to_quaternion(rotation_vector, &mut out);
        out
    }

    /// The quaternion equivalent of the given yaw-pitch-roll angles.
    pub fn from_yaw_pitch_roll(yaw_pitch_roll: &YawPitchRoll) -> Self {
        let mut out = Self::identity();
        convert::yaw_pitch_roll_to_quaternion(yaw_pitch_roll, &mut out);
        out
    }

    /// Reads `(x, y, z, s)` from the first four elements of `slice`.
    ///
    /// To read at an offset, pass `&slice[offset..]`. Panics if fewer than
    /// four elements remain.
    pub fn from_slice(slice: &[f64]) -> Self {
        Self::new(slice[0], slice[1], slice[2], slice[3])
    }

    /// Single-precision variant of [`from_slice`](Self::from_slice).
    pub fn from_f32_slice(slice: &[f32]) -> Self {
        Self::new(
            f64::from(slice[0]),
            f64::from(slice[1]),
            f64::from(slice[2]),
            f64::from(slice[3]),
        )
    }

    /// Writes `[x, y, z, s]` into the first four elements of `slice`.
    pub fn write_to_slice(&self, slice: &mut [f64]) {
        slice[0] = self.x;
        slice[1] = self.y;
        slice[2] = self.z;
        slice[3] = self.s;
    }

    /// Single-precision variant of [`write_to_slice`](Self::write_to_slice).
    pub fn write_to_f32_slice(&self, slice: &mut [f32]) {
        slice[0] = self.x as f32;
        slice[1] = self.y as f32;
        slice[2] = self.z as f32;
        slice[3] = self.s as f32;
    }

    /// Component by index: 0 → x, 1 → y, 2 → z, 3 → s.
    ///
    /// # Panics
    ///
    /// Panics for indices past 3, like slice indexing would.
    pub fn element(&self, index: usize) -> f64 {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            3 => self.s,
            _ => panic!("component index out of bounds: the len is 4 but the index is {index}"),
        }
    }

    /// Sets the component at `index`; same indexing and panic behavior as
    /// [`element`](Self::element).
    pub fn set_element(&mut self, index: usize, value: f64) {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            3 => self.s = value,
            _ => panic!("component index out of bounds: the len is 4 but the index is {index}"),
        }
    }

    pub fn set(&mut self, x: f64, y: f64, z: f64, s: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.s = s;
    }

    pub fn contains_nan(&self) -> bool {
        crate::checks::tuple4_contains_nan(self.x, self.y, self.z, self.s)
    }

    pub fn set_to_nan(&mut self) {
        self.set(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
    }

    pub fn set_identity(&mut self) {
        self.set(0., 0., 0., 1.);
    }

    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.s * self.s
    }

    pub fn norm(&self) -> f64 {
        util::norm4(self.x, self.y, self.z, self.s)
    }

    /// The 4D dot product with `other`.
    ///
    /// For two unit quaternions this is the cosine of half the angle between
    /// the rotations (up to double-cover sign).
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.s * other.s
    }

    /// `true` if the norm is 1 within `epsilon`.
    pub fn is_unitary(&self, epsilon: f64) -> bool {
        (self.norm_squared() - 1.0).abs() <= epsilon
    }

    /// Scales the quaternion to unit norm.
    ///
    /// Norms already within the fast-path epsilon of 1 are left untouched by
    /// more than the linear-extrapolation correction. A NaN quaternion stays
    /// NaN, and a quaternion with (near-)zero norm has no direction to keep,
    /// so it becomes NaN as well.
    pub fn normalize(&mut self) {
        if self.contains_nan() {
            return;
        }
        let norm = self.norm();
        if norm < util::EPS_DEGENERATE {
            self.set_to_nan();
            return;
        }
        let inv = 1.0 / norm;
        self.x *= inv;
        self.y *= inv;
        self.z *= inv;
        self.s *= inv;
    }

    /// Conjugates in place; for a unit quaternion this is the inverse
    /// rotation.
    pub fn conjugate(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
    }

    /// The conjugated (inverse, for unit norm) quaternion.
    #[must_use]
    pub fn conjugated(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.s)
    }

    /// Flips the sign of all four components.
    ///
    /// The result encodes the same rotation (double cover).
    pub fn negate(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
        self.s = -self.s;
    }
}

impl Display for Quaternion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:6.3}, {:6.3}, {:6.3}, {:6.3})",
            self.x, self.y, self.z, self.s
        )
    }
}

impl Orientation for Quaternion {
    fn to_quaternion(&self) -> Quaternion {
        *self
    }

    fn contains_nan(&self) -> bool {
        Quaternion::contains_nan(self)
    }

    fn to_axis_angle(&self) -> AxisAngle {
        AxisAngle::from_quaternion(self)
    }

    fn to_rotation_matrix(&self) -> RotationMatrix {
        RotationMatrix::from_quaternion(self)
    }

    fn to_rotation_vector(&self) -> RotationVector {
        RotationVector::from_quaternion(self)
    }

    fn to_yaw_pitch_roll(&self) -> YawPitchRoll {
        YawPitchRoll::from_quaternion(self)
    }

    /// Rotates with `t = 2·(u × v); v' = v + s·t + u × t`, skipping the
    /// axis-angle detour of the default path.
    fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        let norm = self.norm();
        if norm < util::EPS_DEGENERATE {
            return *vector;
        }
        let inv = 1.0 / norm;
        let (x, y, z, s) = (self.x * inv, self.y * inv, self.z * inv, self.s * inv);
        let tx = 2.0 * (y * vector.z - z * vector.y);
        let ty = 2.0 * (z * vector.x - x * vector.z);
        let tz = 2.0 * (x * vector.y - y * vector.x);
        Vector3::new(
            vector.x + s * tx + (y * tz - z * ty),
            vector.y + s * ty + (z * tx - x * tz),
            vector.z + s * tz + (x * ty - y * tx),
        )
    }

    fn inverse_transform_vector(&self, vector: &Vector3) -> Vector3 {
        self.conjugated().transform_vector(vector)
    }
}

impl OrientationMut for Quaternion {
    fn set_quaternion(&mut self, quaternion: &Quaternion) {
        *self = *quaternion;
    }

    fn set_to_nan(&mut self) {
        Quaternion::set_to_nan(self);
    }

    fn set_identity(&mut self) {
        Quaternion::set_identity(self);
    }

    fn set_axis_angle(&mut self, axis_angle: &AxisAngle) {
        convert::axis_angle_to_quaternion(axis_angle, self);
    }

    fn set_rotation_matrix(&mut self, matrix: &RotationMatrix) {
        convert::matrix_to_quaternion(matrix, self);
    }

    fn set_rotation_vector(&mut self, rotation_vector: &RotationVector) {
        convert::rotation_vector_to_quaternion(rotation_vector, self);
    }

    fn set_yaw_pitch_roll(&mut self, yaw_pitch_roll: &YawPitchRoll) {
        convert::yaw_pitch_roll_to_quaternion(yaw_pitch_roll, self);
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Quaternion {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.s.abs_diff_eq(&other.s, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Quaternion {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.s.relative_eq(&other.s, epsilon, max_relative)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Quaternion {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // quickcheck will give us awkward f64 values -- we keep drawing until
        // we have four components that make a usable unit quaternion
        loop {
            let mut components = [0.0_f64; 4];
            for component in &mut components {
                *component = loop {
                    match f64::arbitrary(g) {
                        f if f.is_finite() => break f.rem_euclid(2.0) - 1.0,
                        _ => {}
                    }
                };
            }
            let [x, y, z, s] = components;
            let norm = (x * x + y * y + z * z + s * s).sqrt();
            if norm > 0.1 {
                break Self::new(x / norm, y / norm, z / norm, s / norm);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quickcheck::quickcheck;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn default_is_identity() {
        assert_eq!(Quaternion::default(), Quaternion::new(0., 0., 0., 1.));
        assert_relative_eq!(Quaternion::identity().angle(), 0.0);
    }

    #[test]
    fn normalize_leaves_direction_untouched() {
        let mut q = Quaternion::new(2., 0., 0., 2.);
        q.normalize();
        assert_relative_eq!(
            q,
            Quaternion::new(std::f64::consts::FRAC_1_SQRT_2, 0., 0., std::f64::consts::FRAC_1_SQRT_2),
            epsilon = 1e-12
        );
        assert!(q.is_unitary(1e-12));
    }

    #[test]
    fn normalize_of_zero_is_nan() {
        let mut q = Quaternion::new(0., 0., 0., 0.);
        q.normalize();
        assert!(q.contains_nan());
    }

    #[test]
    fn normalize_keeps_nan_nan() {
        let mut q = Quaternion::new(f64::NAN, 0., 0., 1.);
        q.normalize();
        assert!(q.contains_nan());
    }

    #[test]
    fn conjugate_inverts_the_rotation() {
        let q = Quaternion::from_axis_angle(&AxisAngle::new(0., 0., 1., FRAC_PI_2));
        let mut composed = Quaternion::identity();
        crate::compose::multiply_quaternions(&q, false, &q.conjugated(), false, &mut composed);
        assert!(composed.geometrically_equals(&Quaternion::identity(), 1e-12));
    }

    #[test]
    fn angle_of_half_turn() {
        let q = Quaternion::new(1., 0., 0., 0.);
        assert_relative_eq!(q.angle(), PI);
    }

    #[test]
    fn transform_vector_matches_the_rodrigues_path() {
        let q = Quaternion::from_axis_angle(&AxisAngle::new(
            0.5,
            -0.5,
            std::f64::consts::FRAC_1_SQRT_2,
            1.3,
        ));
        let vector = Vector3::new(0.3, -1.2, 2.5);

        let direct = q.transform_vector(&vector);
        let via_axis_angle = q.to_axis_angle().transform_vector(&vector);
        assert_relative_eq!(direct, via_axis_angle, epsilon = 1e-12);
        assert_relative_eq!(q.inverse_transform_vector(&direct), vector, epsilon = 1e-12);

        // internal normalization: a scaled quaternion rotates identically
        let scaled = Quaternion::new(q.x * 3.0, q.y * 3.0, q.z * 3.0, q.s * 3.0);
        assert_relative_eq!(scaled.transform_vector(&vector), direct, epsilon = 1e-12);
    }

    #[test]
    fn element_accessors_match_component_order() {
        let mut q = Quaternion::identity();
        q.set_element(0, 0.1);
        q.set_element(3, 0.9);
        assert_eq!(q.element(0), 0.1);
        assert_eq!(q.element(3), 0.9);
    }

    #[test]
    #[should_panic(expected = "the len is 4 but the index is 4")]
    fn element_out_of_range_panics() {
        Quaternion::identity().element(4);
    }

    #[test]
    fn packing_round_trips_through_f32() {
        let q = Quaternion::new(0.5, -0.5, 0.5, 0.5);
        let mut buffer = [0.0_f32; 4];
        q.write_to_f32_slice(&mut buffer);
        let back = Quaternion::from_f32_slice(&buffer);
        assert_relative_eq!(back, q, epsilon = 1e-6);
    }

    #[test]
    fn display_is_fixed_width() {
        assert_eq!(
            format!("{}", Quaternion::identity()),
            "( 0.000,  0.000,  0.000,  1.000)"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let q = Quaternion::new(0.5, -0.5, 0.5, 0.5);
        let json = serde_json::to_string(&q).unwrap();
        let back: Quaternion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }

    quickcheck! {
        fn negated_quaternion_is_geometrically_equal(q: Quaternion) -> bool {
            let mut negated = q;
            negated.negate();
            q.geometrically_equals(&negated, 1e-12)
        }

        fn dot_of_unit_with_itself_is_one(q: Quaternion) -> bool {
            (q.dot(&q) - 1.0).abs() < 1e-12
        }
    }
}
