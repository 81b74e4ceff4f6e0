//! This library represents and converts 3D rotations for engineers with
//! other things to worry about than singularity structure.
//!
//! The same physical rotation can be written five ways — [`AxisAngle`],
//! unit [`Quaternion`], orthonormal [`RotationMatrix`], [`RotationVector`]
//! (exponential coordinates), and [`YawPitchRoll`] (intrinsic Euler ZYX) —
//! and each way has its own blind spot: the zero rotation has no axis, a
//! half turn has two, Euler angles lock up near ±90° pitch, and a
//! quaternion equals its own negation. The conversion algorithms in
//! [`convert`] resolve every one of these deterministically, so a value
//! that round-trips through any chain of representations comes back as the
//! same rotation.
//!
//! The degeneracy policy, everywhere and without exception:
//!
//! - NaN anywhere in a source makes the destination all-NaN — "undefined
//!   orientation" flows through silently rather than erroring;
//! - sources with no usable direction (zero axis, zero quaternion, zero
//!   rotation vector) convert to the identity rotation;
//! - scale never matters: non-unit axes and quaternions are normalized
//!   internally without touching the caller's value.
//!
//! Errors are reserved for actual programming mistakes: an out-of-range
//! component index panics, and the `check_*`/`try_*` entry points return
//! [`OrientationError`] when a matrix is not a rotation or a planar
//! transform is asked of a non-planar rotation.
//!
//! # Examples
//!
//! Converting between representations and comparing them geometrically:
//!
//! ```
//! use trunnion::{AxisAngle, Orientation, Quaternion, RotationMatrix};
//! use std::f64::consts::FRAC_PI_2;
//!
//! // a quarter turn about Z, written three ways
//! let axis_angle = AxisAngle::new(0.0, 0.0, 1.0, FRAC_PI_2);
//! let quaternion = Quaternion::from_axis_angle(&axis_angle);
//! let matrix = RotationMatrix::from_quaternion(&quaternion);
//!
//! // geometric equality is representation-blind
//! assert!(matrix.geometrically_equals(&axis_angle, 1e-12));
//!
//! // and the matrix is guaranteed orthonormal
//! assert!(matrix.is_rotation_matrix(1e-10));
//! ```
//!
//! Applying a rotation to vectors, without building a matrix:
//!
//! ```
//! use trunnion::{AxisAngle, Orientation, Vector3};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let quarter_about_z = AxisAngle::new(0.0, 0.0, 1.0, FRAC_PI_2);
//! let rotated = quarter_about_z.transform_vector(&Vector3::new(1.0, 0.0, 0.0));
//! assert!((rotated.y - 1.0).abs() < 1e-12);
//! ```
//!
//! # The "pack" calling convention
//!
//! Every conversion also exists as a free function in [`convert`] that
//! reads a source by shared reference and writes into a caller-provided
//! `&mut` destination. No conversion allocates, so the crate is usable
//! from control loops that cannot tolerate garbage; the `from_*`
//! constructors on each type are thin wrappers over these functions for
//! when a fresh value is fine:
//!
//! ```
//! use trunnion::{convert, AxisAngle, Quaternion};
//!
//! let mut scratch = Quaternion::identity();
//! convert::axis_angle_to_quaternion(&AxisAngle::new(1.0, 0.0, 0.0, 0.5), &mut scratch);
//! assert!(scratch.is_unitary(1e-12));
//! ```
//!
//! # Capability traits
//!
//! [`Orientation`] (read-only) and [`OrientationMut`] (mutable) are
//! implemented by all five representations, so code that composes or
//! compares rotations can take any of them:
//!
//! ```
//! use trunnion::{Orientation, OrientationMut, Quaternion, YawPitchRoll};
//!
//! fn level_off(orientation: &mut impl OrientationMut) {
//!     let mut angles = orientation.to_yaw_pitch_roll();
//!     angles.pitch = 0.0;
//!     angles.roll = 0.0;
//!     orientation.set_yaw_pitch_roll(&angles);
//! }
//!
//! let mut attitude = Quaternion::from_yaw_pitch_roll(&YawPitchRoll::new(0.4, 0.2, -0.1));
//! level_off(&mut attitude);
//! assert!(attitude.geometrically_equals(&YawPitchRoll::new(0.4, 0.0, 0.0), 1e-12));
//! ```
//!
//! # Feature flags
//!
//! - `serde` (default): `Serialize`/`Deserialize` on every representation;
//! - `approx` (default): `AbsDiffEq`/`RelativeEq` for component-wise
//!   comparison in tests (geometric comparison needs no feature);
//! - `nalgebra`: `From` conversions to and from
//!   [`nalgebra::UnitQuaternion`] and [`nalgebra::Rotation3`].

mod axis_angle;
pub mod checks;
pub mod compose;
pub mod convert;
mod error;
#[cfg(feature = "nalgebra")]
mod interop;
mod orientation;
mod quaternion;
mod rotation_matrix;
mod rotation_vector;
mod tuple;
mod util;
mod yaw_pitch_roll;

pub use axis_angle::AxisAngle;
pub use error::OrientationError;
pub use orientation::{Orientation, OrientationMut};
pub use quaternion::Quaternion;
pub use rotation_matrix::RotationMatrix;
pub use rotation_vector::RotationVector;
pub use tuple::{Vector2, Vector3, Vector4};
pub use yaw_pitch_roll::YawPitchRoll;
