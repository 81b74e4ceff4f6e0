//! Yaw-pitch-roll (intrinsic Euler ZYX) representation.

use crate::convert;
use crate::orientation::{Orientation, OrientationMut};
use crate::{AxisAngle, Quaternion, RotationMatrix, RotationVector};
use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rotation decomposed into intrinsic rotations about Z (yaw), then Y
/// (pitch), then X (roll), all in radians.
///
/// This is the one representation that cannot encode every rotation: as the
/// pitch approaches ±90° the yaw and roll axes align (gimbal lock) and the
/// decomposition becomes indeterminate. Conversions *into* yaw-pitch-roll
/// therefore set all three angles to NaN whenever the extracted pitch
/// magnitude exceeds [`convert::MAX_PITCH_ANGLE`] -- near the singularity
/// yaw and roll are not merely imprecise but meaningless, and reporting NaN
/// is the deliberate design choice here. Conversions *out of* yaw-pitch-roll
/// have no such restriction.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct YawPitchRoll {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl YawPitchRoll {
    pub const fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }

    /// The identity rotation: all three angles zero.
    pub const fn identity() -> Self {
        Self::new(0., 0., 0.)
    }

    pub fn from_axis_angle(axis_angle: &AxisAngle) -> Self {
        let mut out = Self::identity();
        convert::axis_angle_to_yaw_pitch_roll(axis_angle, &mut out);
        out
    }

    pub fn from_quaternion(quaternion: &Quaternion) -> Self {
        let mut out = Self::identity();
        convert::quaternion_to_yaw_pitch_roll(quaternion, &mut out);
        out
    }

    pub fn from_rotation_matrix(matrix: &RotationMatrix) -> Self {
        let mut out = Self::identity();
        convert::matrix_to_yaw_pitch_roll(matrix, &mut out);
        out
    }

    pub fn from_rotation_vector(rotation_vector: &RotationVector) -> Self {
        let mut out = Self::identity();
        convert::rotation_vector_to_yaw_pitch_roll(rotation_vector, &mut out);
        out
    }

    /// Reads `(yaw, pitch, roll)` from the first three elements of `slice`.
    ///
    /// To read at an offset, pass `&slice[offset..]`.
    pub fn from_slice(slice: &[f64]) -> Self {
        Self::new(slice[0], slice[1], slice[2])
    }

    /// Single-precision variant of [`from_slice`](Self::from_slice).
    pub fn from_f32_slice(slice: &[f32]) -> Self {
        Self::new(f64::from(slice[0]), f64::from(slice[1]), f64::from(slice[2]))
    }

    /// Writes `[yaw, pitch, roll]` into the first three elements of `slice`.
    pub fn write_to_slice(&self, slice: &mut [f64]) {
        slice[0] = self.yaw;
        slice[1] = self.pitch;
        slice[2] = self.roll;
    }

    /// Single-precision variant of [`write_to_slice`](Self::write_to_slice).
    pub fn write_to_f32_slice(&self, slice: &mut [f32]) {
        slice[0] = self.yaw as f32;
        slice[1] = self.pitch as f32;
        slice[2] = self.roll as f32;
    }

    /// Component by index: 0 → yaw, 1 → pitch, 2 → roll.
    ///
    /// # Panics
    ///
    /// Panics for indices past 2, like slice indexing would.
    pub fn element(&self, index: usize) -> f64 {
        match index {
            0 => self.yaw,
            1 => self.pitch,
            2 => self.roll,
            _ => panic!("component index out of bounds: the len is 3 but the index is {index}"),
        }
    }

    /// Sets the component at `index`; same indexing and panic behavior as
    /// [`element`](Self::element).
    pub fn set_element(&mut self, index: usize, value: f64) {
        match index {
            0 => self.yaw = value,
            1 => self.pitch = value,
            2 => self.roll = value,
            _ => panic!("component index out of bounds: the len is 3 but the index is {index}"),
        }
    }

    pub fn set(&mut self, yaw: f64, pitch: f64, roll: f64) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.roll = roll;
    }

    pub fn contains_nan(&self) -> bool {
        self.yaw.is_nan() || self.pitch.is_nan() || self.roll.is_nan()
    }

    pub fn set_to_nan(&mut self) {
        self.set(f64::NAN, f64::NAN, f64::NAN);
    }

    pub fn set_identity(&mut self) {
        self.set(0., 0., 0.);
    }

    /// `true` if the stored pitch is inside the gimbal-lock guard zone, ie,
    /// converting a rotation with this pitch *into* yaw-pitch-roll would
    /// produce NaN.
    pub fn is_gimbal_locked(&self) -> bool {
        self.pitch.abs() > convert::MAX_PITCH_ANGLE
    }

    /// Inverts the rotation in place.
    ///
    /// There is no closed-form inverse in yaw-pitch-roll space, so this goes
    /// through a quaternion; if the inverse lands in the gimbal-lock zone
    /// the result is NaN like any other conversion into yaw-pitch-roll.
    pub fn invert(&mut self) {
        let mut quaternion = Quaternion::from_yaw_pitch_roll(self);
        quaternion.conjugate();
        convert::quaternion_to_yaw_pitch_roll(&quaternion, self);
    }
}

impl Display for YawPitchRoll {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "yaw-pitch-roll: ({:6.3}, {:6.3}, {:6.3})",
            self.yaw, self.pitch, self.roll
        )
    }
}

impl Orientation for YawPitchRoll {
    fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_yaw_pitch_roll(self)
    }

    fn contains_nan(&self) -> bool {
        YawPitchRoll::contains_nan(self)
    }

    fn to_axis_angle(&self) -> AxisAngle {
        AxisAngle::from_yaw_pitch_roll(self)
    }

    fn to_rotation_matrix(&self) -> RotationMatrix {
        RotationMatrix::from_yaw_pitch_roll(self)
    }

    fn to_rotation_vector(&self) -> RotationVector {
        RotationVector::from_yaw_pitch_roll(self)
    }

    fn to_yaw_pitch_roll(&self) -> YawPitchRoll {
        *self
    }
}

impl OrientationMut for YawPitchRoll {
    fn set_quaternion(&mut self, quaternion: &Quaternion) {
        convert::quaternion_to_yaw_pitch_roll(quaternion, self);
    }

    fn set_to_nan(&mut self) {
        YawPitchRoll::set_to_nan(self);
    }

    fn set_identity(&mut self) {
        YawPitchRoll::set_identity(self);
    }

    fn set_axis_angle(&mut self, axis_angle: &AxisAngle) {
        convert::axis_angle_to_yaw_pitch_roll(axis_angle, self);
    }

    fn set_rotation_matrix(&mut self, matrix: &RotationMatrix) {
        convert::matrix_to_yaw_pitch_roll(matrix, self);
    }

    fn set_rotation_vector(&mut self, rotation_vector: &RotationVector) {
        convert::rotation_vector_to_yaw_pitch_roll(rotation_vector, self);
    }

    fn set_yaw_pitch_roll(&mut self, yaw_pitch_roll: &YawPitchRoll) {
        *self = *yaw_pitch_roll;
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for YawPitchRoll {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.yaw.abs_diff_eq(&other.yaw, epsilon)
            && self.pitch.abs_diff_eq(&other.pitch, epsilon)
            && self.roll.abs_diff_eq(&other.roll, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for YawPitchRoll {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.yaw.relative_eq(&other.yaw, epsilon, max_relative)
            && self.pitch.relative_eq(&other.pitch, epsilon, max_relative)
            && self.roll.relative_eq(&other.roll, epsilon, max_relative)
    }
}
