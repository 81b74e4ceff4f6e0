//! Error type for the hard-failure class of misuse.
//!
//! Almost nothing in this crate errors: NaN input silently propagates to NaN
//! output (an "undefined orientation" is data, not a fault), and degenerate
//! inputs like a zero-length axis silently resolve to the identity rotation.
//! The variants below are reserved for actual programming errors, where the
//! caller handed us something that can never be valid for the requested
//! operation. Out-of-range component indices are the third member of that
//! class and panic instead, like slice indexing does.

use thiserror::Error;

/// Errors raised by the `check_*` guards used in transform application.
///
/// These signal caller bugs rather than bad data; no destination is written
/// before one of these is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum OrientationError {
    /// The given 3×3 matrix is not a rotation matrix: its rows are not an
    /// orthonormal right-handed basis.
    #[error("matrix is not a rotation matrix (determinant {determinant})")]
    NotRotationMatrix {
        /// Determinant of the offending matrix; +1 for a proper rotation.
        determinant: f64,
    },

    /// A 2D (XY-plane) transform was requested from a rotation that is not
    /// about the Z axis alone.
    #[error("rotation is not about the Z axis only and cannot transform 2D tuples")]
    NotZAxisRotation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        let err = OrientationError::NotRotationMatrix { determinant: -1.0 };
        assert!(format!("{err}").contains("not a rotation matrix"));
        assert!(format!("{err}").contains("-1"));

        let err = OrientationError::NotZAxisRotation;
        assert!(format!("{err}").contains("Z axis"));
    }
}
