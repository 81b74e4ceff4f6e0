//! Plain 2-, 3-, and 4-component tuples.
//!
//! These exist as the boundary between the rotation core and whatever
//! geometry types a consumer actually uses: they carry components, expose
//! index-based access and buffer packing, and nothing else. General tuple
//! arithmetic (add, scale, interpolate, ...) deliberately lives outside this
//! crate.

use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D tuple `(x, y)`, used by the Z-only (planar) transform paths.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

/// A 3D tuple `(x, y, z)`, the thing rotations are most often applied to.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A 4D tuple `(x, y, z, s)`.
///
/// When a rotation is applied to it, the `(x, y, z)` part rotates and `s`
/// passes through unchanged, matching the quaternion component layout.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub s: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reads `(x, y)` from the first two elements of `slice`.
    ///
    /// To read at an offset, pass `&slice[offset..]`. Panics if fewer than
    /// two elements remain.
    pub fn from_slice(slice: &[f64]) -> Self {
        Self::new(slice[0], slice[1])
    }

    /// Writes `[x, y]` into the first two elements of `slice`.
    ///
    /// To write at an offset, pass `&mut slice[offset..]`. Panics if fewer
    /// than two elements remain.
    pub fn write_to_slice(&self, slice: &mut [f64]) {
        slice[0] = self.x;
        slice[1] = self.y;
    }

    /// Component by index: 0 → x, 1 → y.
    ///
    /// # Panics
    ///
    /// Panics for indices past 1, like slice indexing would.
    pub fn element(&self, index: usize) -> f64 {
        match index {
            0 => self.x,
            1 => self.y,
            _ => panic!("component index out of bounds: the len is 2 but the index is {index}"),
        }
    }

    /// Sets the component at `index`; same indexing and panic behavior as
    /// [`element`](Self::element).
    pub fn set_element(&mut self, index: usize, value: f64) {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            _ => panic!("component index out of bounds: the len is 2 but the index is {index}"),
        }
    }

    pub fn contains_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Reads `(x, y, z)` from the first three elements of `slice`.
    ///
    /// To read at an offset, pass `&slice[offset..]`. Panics if fewer than
    /// three elements remain.
    pub fn from_slice(slice: &[f64]) -> Self {
        Self::new(slice[0], slice[1], slice[2])
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

    pub fn contains_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    pub(crate) fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub(crate) fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl Vector4 {
    pub const fn new(x: f64, y: f64, z: f64, s: f64) -> Self {
        Self { x, y, z, s }
    }

    /// Reads `(x, y, z, s)` from the first four elements of `slice`.
    ///
    /// To read at an offset, pass `&slice[offset..]`. Panics if fewer than
    /// four elements remain.
    pub fn from_slice(slice: &[f64]) -> Self {
        Self::new(slice[0], slice[1], slice[2], slice[3])
    }

    /// Writes `[x, y, z, s]` into the first four elements of `slice`.
    pub fn write_to_slice(&self, slice: &mut [f64]) {
        slice[0] = self.x;
        slice[1] = self.y;
        slice[2] = self.z;
        slice[3] = self.s;
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

    pub fn contains_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan() || self.s.is_nan()
    }
}

impl Display for Vector2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:6.3}, {:6.3})", self.x, self.y)
    }
}

impl Display for Vector3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:6.3}, {:6.3}, {:6.3})", self.x, self.y, self.z)
    }
}

impl Display for Vector4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:6.3}, {:6.3}, {:6.3}, {:6.3})",
            self.x, self.y, self.z, self.s
        )
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Vector3 {
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
impl RelativeEq for Vector3 {
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

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Vector2 {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Vector4 {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_round_trip() {
        let mut v = Vector3::default();
        for i in 0..3 {
            v.set_element(i, i as f64 + 1.0);
        }
        assert_eq!(v, Vector3::new(1., 2., 3.));
        assert_eq!(v.element(2), 3.0);
    }

    #[test]
    #[should_panic(expected = "the len is 3 but the index is 3")]
    fn element_out_of_range_panics() {
        Vector3::new(1., 2., 3.).element(3);
    }

    #[test]
    fn slice_packing_uses_component_order() {
        let mut buffer = [0.0; 6];
        Vector4::new(1., 2., 3., 4.).write_to_slice(&mut buffer[1..]);
        assert_eq!(buffer, [0., 1., 2., 3., 4., 0.]);
        assert_eq!(Vector4::from_slice(&buffer[1..]), Vector4::new(1., 2., 3., 4.));
    }

    #[test]
    fn cross_follows_the_right_hand_rule() {
        let x = Vector3::new(1., 0., 0.);
        let y = Vector3::new(0., 1., 0.);
        assert_eq!(x.cross(&y), Vector3::new(0., 0., 1.));
        assert_eq!(y.cross(&x), Vector3::new(0., 0., -1.));
        assert_eq!(x.dot(&y), 0.0);
    }

    #[test]
    fn display_is_fixed_width() {
        assert_eq!(
            format!("{}", Vector3::new(1., -0.5, 0.)),
            "( 1.000, -0.500,  0.000)"
        );
    }
}
