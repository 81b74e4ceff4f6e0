//! Rotation-vector (exponential coordinates) representation.

use crate::convert;
use crate::orientation::{Orientation, OrientationMut};
use crate::util;
use crate::{AxisAngle, Quaternion, RotationMatrix, YawPitchRoll};
use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rotation encoded as axis × angle in a single 3-tuple: the direction is
/// the rotation axis and the magnitude is the angle in radians.
///
/// This is the exponential-map (Lie algebra) coordinate for SO(3). The zero
/// vector is the identity rotation.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotationVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationVector {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The identity rotation, ie, the zero vector.
    pub const fn identity() -> Self {
        Self::new(0., 0., 0.)
    }

    pub fn from_axis_angle(axis_angle: &AxisAngle) -> Self {
        let mut out = Self::identity();
        convert::axis_angle_to_rotation_vector(axis_angle, &mut out);
        out
    }

    pub fn from_quaternion(quaternion: &Quaternion) -> Self {
        let mut out = Self::identity();
        convert::quaternion_to_rotation_vector(quaternion, &mut out);
        out
    }

    pub fn from_rotation_matrix(matrix: &RotationMatrix) -> Self {
        let mut out = Self::identity();
        convert::matrix_to_rotation_vector(matrix, &mut out);
        out
    }

    pub fn from_yaw_pitch_roll(yaw_pitch_roll: &YawPitchRoll) -> Self {
        let mut out = Self::identity();
        convert::yaw_pitch_roll_to_rotation_vector(yaw_pitch_roll, &mut out);
        out
    }

    /// Reads `(x, y, z)` from the first three elements of `slice`.
    ///
    /// To read at an offset, pass `&slice[offset..]`.
    pub fn from_slice(slice: &[f64]) -> Self {
        Self::new(slice[0], slice[1], slice[2])
    }

    /// Single-precision variant of [`from_slice`](Self::from_slice).
    pub fn from_f32_slice(slice: &[f32]) -> Self {
        Self::new(f64::from(slice[0]), f64::from(slice[1]), f64::from(slice[2]))
    }

    /// Writes `[x, y, z]` into the first three elements of `slice`.
    pub fn write_to_slice(&self, slice: &mut [f64]) {
        slice[0] = self.x;
        slice[1] = self.y;
        slice[2] = self.z;
    }

    /// Single-precision variant of [`write_to_slice`](Self::write_to_slice).
    pub fn write_to_f32_slice(&self, slice: &mut [f32]) {
        slice[0] = self.x as f32;
        slice[1] = self.y as f32;
        slice[2] = self.z as f32;
    }

    /// Component by index: 0 → x, 1 → y, 2 → z.
    ///
    /// # Panics
    ///
    /// Panics for indices past 2, like slice indexing would.
    pub fn element(&self, index: usize) -> f64 {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("component index out of bounds: the len is 3 but the index is {index}"),
        }
    }

    /// Sets the component at `index`; same indexing and panic behavior as
    /// [`element`](Self::element).
    pub fn set_element(&mut self, index: usize, value: f64) {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => panic!("component index out of bounds: the len is 3 but the index is {index}"),
        }
    }

    pub fn set(&mut self, x: f64, y: f64, z: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    pub fn contains_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    pub fn set_to_nan(&mut self) {
        self.set(f64::NAN, f64::NAN, f64::NAN);
    }

    pub fn set_identity(&mut self) {
        self.set(0., 0., 0.);
    }

    /// The rotation angle, ie, the vector's norm.
    pub fn norm(&self) -> f64 {
        util::norm3(self.x, self.y, self.z)
    }

    /// Negates all components in place, producing the inverse rotation.
    pub fn invert(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
    }

    /// The inverse rotation: the negated vector.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Display for RotationVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:6.3}, {:6.3}, {:6.3})", self.x, self.y, self.z)
    }
}

impl Orientation for RotationVector {
    fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_rotation_vector(self)
    }

    fn contains_nan(&self) -> bool {
        RotationVector::contains_nan(self)
    }

    fn to_axis_angle(&self) -> AxisAngle {
        AxisAngle::from_rotation_vector(self)
    }

    fn to_rotation_matrix(&self) -> RotationMatrix {
        RotationMatrix::from_rotation_vector(self)
    }

    fn to_rotation_vector(&self) -> RotationVector {
        *self
    }

    fn to_yaw_pitch_roll(&self) -> YawPitchRoll {
        YawPitchRoll::from_rotation_vector(self)
    }

    /// The vector's norm, always non-negative.
    fn angle(&self) -> f64 {
        self.norm()
    }
}

impl OrientationMut for RotationVector {
    fn set_quaternion(&mut self, quaternion: &Quaternion) {
        convert::quaternion_to_rotation_vector(quaternion, self);
    }

    fn set_to_nan(&mut self) {
        RotationVector::set_to_nan(self);
    }

    fn set_identity(&mut self) {
        RotationVector::set_identity(self);
    }

    fn set_axis_angle(&mut self, axis_angle: &AxisAngle) {
        convert::axis_angle_to_rotation_vector(axis_angle, self);
    }

    fn set_rotation_matrix(&mut self, matrix: &RotationMatrix) {
        convert::matrix_to_rotation_vector(matrix, self);
    }

    fn set_rotation_vector(&mut self, rotation_vector: &RotationVector) {
        *self = *rotation_vector;
    }

    fn set_yaw_pitch_roll(&mut self, yaw_pitch_roll: &YawPitchRoll) {
        convert::yaw_pitch_roll_to_rotation_vector(yaw_pitch_roll, self);
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for RotationVector {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for RotationVector {
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
    }
}
