//! Axis-angle representation of a 3D rotation.

use crate::convert;
use crate::orientation::{Orientation, OrientationMut};
use crate::util;
use crate::{Quaternion, RotationMatrix, RotationVector, YawPitchRoll};
use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rotation of `angle` radians about the axis `(x, y, z)`.
///
/// The axis does not need to be unit length on input: every algorithm that
/// consumes an axis-angle normalizes the axis internally without modifying
/// the source. An axis with (near-)zero norm stands for the identity
/// rotation, not an error and not NaN.
///
/// Component order for element access and buffer packing is
/// `[x, y, z, angle]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisAngle {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub angle: f64,
}

impl Default for AxisAngle {
    /// The identity rotation `(1, 0, 0, 0)`: zero angle about the X axis.
    fn default() -> Self {
        Self::identity()
    }
}

impl AxisAngle {
    pub const fn new(x: f64, y: f64, z: f64, angle: f64) -> Self {
        Self { x, y, z, angle }
    }

    /// The identity rotation `(1, 0, 0, 0)`.
    pub const fn identity() -> Self {
        Self::new(1., 0., 0., 0.)
    }

    /// The axis-angle equivalent of the given quaternion.
    pub fn from_quaternion(quaternion: &Quaternion) -> Self {
        let mut out = Self::identity();
        convert::quaternion_to_axis_angle(quaternion, &mut out);
        out
    }

    /// The axis-angle equivalent of the given rotation matrix.
    pub fn from_rotation_matrix(matrix: &RotationMatrix) -> Self {
        let mut out = Self::identity();
        convert::matrix_to_axis_angle(matrix, &mut out);
        out
    }

    /// The axis-angle equivalent of the given rotation vector.
    pub fn from_rotation_vector(rotation_vector: &RotationVector) -> Self {
        let mut out = Self::identity();
        convert::rotation_vector_to_axis_angle(rotation_vector, &mut out);
        out
    }

    /// The axis-angle equivalent of the given yaw-pitch-roll angles.
    pub fn from_yaw_pitch_roll(yaw_pitch_roll: &YawPitchRoll) -> Self {
        let mut out = Self::identity();
        convert::yaw_pitch_roll_to_axis_angle(yaw_pitch_roll, &mut out);
        out
    }

    /// Reads `(x, y, z, angle)` from the first four elements of `slice`.
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

    /// Writes `[x, y, z, angle]` into the first four elements of `slice`.
    pub fn write_to_slice(&self, slice: &mut [f64]) {
        slice[0] = self.x;
        slice[1] = self.y;
        slice[2] = self.z;
        slice[3] = self.angle;
    }

    /// Single-precision variant of [`write_to_slice`](Self::write_to_slice).
    pub fn write_to_f32_slice(&self, slice: &mut [f32]) {
        slice[0] = self.x as f32;
        slice[1] = self.y as f32;
        slice[2] = self.z as f32;
        slice[3] = self.angle as f32;
    }

    /// Component by index: 0 → x, 1 → y, 2 → z, 3 → angle.
    ///
    /// # Panics
    ///
    /// Panics for indices past 3, like slice indexing would.
    pub fn element(&self, index: usize) -> f64 {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            3 => self.angle,
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
            3 => self.angle = value,
            _ => panic!("component index out of bounds: the len is 4 but the index is {index}"),
        }
    }

    pub fn set(&mut self, x: f64, y: f64, z: f64, angle: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.angle = angle;
    }

    pub fn contains_nan(&self) -> bool {
        crate::checks::tuple4_contains_nan(self.x, self.y, self.z, self.angle)
    }

    pub fn set_to_nan(&mut self) {
        self.set(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
    }

    pub fn set_identity(&mut self) {
        self.set(1., 0., 0., 0.);
    }

    /// Norm of the axis part, before any internal normalization.
    pub fn axis_norm(&self) -> f64 {
        util::norm3(self.x, self.y, self.z)
    }

    /// Scales the axis to unit length, keeping the angle.
    ///
    /// A (near-)zero axis has no direction to scale and resolves to the
    /// identity. NaN stays NaN.
    pub fn normalize_axis(&mut self) {
        if self.contains_nan() {
            return;
        }
        let norm = self.axis_norm();
        if norm < util::EPS_DEGENERATE {
            self.set_identity();
            return;
        }
        let inv = 1.0 / norm;
        self.x *= inv;
        self.y *= inv;
        self.z *= inv;
    }

    /// Negates the angle in place, producing the inverse rotation.
    pub fn invert(&mut self) {
        self.angle = -self.angle;
    }

    /// The inverse rotation: same axis, negated angle.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self::new(self.x, self.y, self.z, -self.angle)
    }

    /// `true` if this rotation is about the Z axis only (or no rotation at
    /// all), within `epsilon` on the normalized axis components.
    pub fn is_z_only(&self, epsilon: f64) -> bool {
        if self.contains_nan() {
            return false;
        }
        let norm = self.axis_norm();
        if norm < util::EPS_DEGENERATE {
            // no rotation happens around a zero axis
            return true;
        }
        (self.x / norm).abs() <= epsilon && (self.y / norm).abs() <= epsilon
    }
}

impl Display for AxisAngle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:6.3}, {:6.3}, {:6.3}, {:6.3})",
            self.x, self.y, self.z, self.angle
        )
    }
}

impl Orientation for AxisAngle {
    fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_axis_angle(self)
    }

    fn contains_nan(&self) -> bool {
        AxisAngle::contains_nan(self)
    }

    fn to_axis_angle(&self) -> AxisAngle {
        *self
    }

    fn to_rotation_matrix(&self) -> RotationMatrix {
        RotationMatrix::from_axis_angle(self)
    }

    fn to_rotation_vector(&self) -> RotationVector {
        RotationVector::from_axis_angle(self)
    }

    fn to_yaw_pitch_roll(&self) -> YawPitchRoll {
        YawPitchRoll::from_axis_angle(self)
    }

    /// The stored angle, as-is.
    ///
    /// Unlike the trait default this is signed and not wrapped into [0, π];
    /// an axis-angle is allowed to carry `-π/2` or `3π` verbatim.
    fn angle(&self) -> f64 {
        self.angle
    }
}

impl OrientationMut for AxisAngle {
    fn set_quaternion(&mut self, quaternion: &Quaternion) {
        convert::quaternion_to_axis_angle(quaternion, self);
    }

    fn set_to_nan(&mut self) {
        AxisAngle::set_to_nan(self);
    }

    fn set_identity(&mut self) {
        AxisAngle::set_identity(self);
    }

    fn set_axis_angle(&mut self, axis_angle: &AxisAngle) {
        *self = *axis_angle;
    }

    fn set_rotation_matrix(&mut self, matrix: &RotationMatrix) {
        convert::matrix_to_axis_angle(matrix, self);
    }

    fn set_rotation_vector(&mut self, rotation_vector: &RotationVector) {
        convert::rotation_vector_to_axis_angle(rotation_vector, self);
    }

    fn set_yaw_pitch_roll(&mut self, yaw_pitch_roll: &YawPitchRoll) {
        convert::yaw_pitch_roll_to_axis_angle(yaw_pitch_roll, self);
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for AxisAngle {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.angle.abs_diff_eq(&other.angle, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for AxisAngle {
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
            && self.angle.relative_eq(&other.angle, epsilon, max_relative)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for AxisAngle {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // unit axis plus an angle within (-π, π); quaternions can't round-trip
        // angles outside that range, so properties stick to it
        loop {
            let mut components = [0.0_f64; 3];
            for component in &mut components {
                *component = loop {
                    match f64::arbitrary(g) {
                        f if f.is_finite() => break f.rem_euclid(2.0) - 1.0,
                        _ => {}
                    }
                };
            }
            let [x, y, z] = components;
            let norm = (x * x + y * y + z * z).sqrt();
            if norm > 0.1 {
                let angle = loop {
                    match f64::arbitrary(g) {
                        f if f.is_finite() => {
                            break f.rem_euclid(2.0 * std::f64::consts::PI) - std::f64::consts::PI
                        }
                        _ => {}
                    }
                };
                break Self::new(x / norm, y / norm, z / norm, angle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn default_is_identity() {
        assert_eq!(AxisAngle::default(), AxisAngle::new(1., 0., 0., 0.));
    }

    #[test]
    fn normalize_axis_keeps_angle() {
        let mut axis_angle = AxisAngle::new(0., 2., 0., FRAC_PI_4);
        axis_angle.normalize_axis();
        assert_relative_eq!(axis_angle, AxisAngle::new(0., 1., 0., FRAC_PI_4));
    }

    #[test]
    fn normalize_of_zero_axis_is_identity() {
        let mut axis_angle = AxisAngle::new(0., 0., 0., FRAC_PI_4);
        axis_angle.normalize_axis();
        assert_eq!(axis_angle, AxisAngle::identity());
    }

    #[test]
    fn inverse_negates_the_angle_only() {
        let axis_angle = AxisAngle::new(0., 0., 1., FRAC_PI_2);
        assert_eq!(axis_angle.inverse(), AxisAngle::new(0., 0., 1., -FRAC_PI_2));
    }

    #[test]
    fn z_only_ignores_axis_scale() {
        assert!(AxisAngle::new(0., 0., 4., FRAC_PI_2).is_z_only(1e-12));
        assert!(!AxisAngle::new(0., 1., 1., FRAC_PI_2).is_z_only(1e-12));
        // a zero axis rotates nothing, so it is planar by definition
        assert!(AxisAngle::new(0., 0., 0., FRAC_PI_2).is_z_only(1e-12));
    }

    #[test]
    fn angle_is_reported_verbatim() {
        use crate::Orientation;
        let axis_angle = AxisAngle::new(1., 0., 0., -3.0 * FRAC_PI_2);
        assert_eq!(Orientation::angle(&axis_angle), -3.0 * FRAC_PI_2);
    }

    #[test]
    #[should_panic(expected = "the len is 4 but the index is 17")]
    fn element_out_of_range_panics() {
        AxisAngle::identity().element(17);
    }

    #[test]
    fn packing_uses_x_y_z_angle_order() {
        let axis_angle = AxisAngle::new(0.1, 0.2, 0.3, 0.4);
        let mut buffer = [0.0; 4];
        axis_angle.write_to_slice(&mut buffer);
        assert_eq!(buffer, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(AxisAngle::from_slice(&buffer), axis_angle);
    }

    #[test]
    fn display_is_fixed_width() {
        assert_eq!(
            format!("{}", AxisAngle::identity()),
            "( 1.000,  0.000,  0.000,  0.000)"
        );
    }
}
