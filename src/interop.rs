//! Conversions to and from [`nalgebra`]'s rotation types.
//!
//! Only compiled with the `nalgebra` feature. These are plain component
//! copies: the orientation semantics (degeneracy handling, NaN policy) of
//! this crate do not apply on the nalgebra side.

use crate::{Quaternion, RotationMatrix};

impl From<nalgebra::UnitQuaternion<f64>> for Quaternion {
    fn from(quaternion: nalgebra::UnitQuaternion<f64>) -> Self {
        let coords = quaternion.coords;
        Quaternion::new(coords.x, coords.y, coords.z, coords.w)
    }
}

impl From<Quaternion> for nalgebra::UnitQuaternion<f64> {
    /// Normalizes on the way in; a zero or NaN quaternion is nalgebra's
    /// problem to represent (it keeps the non-finite components).
    fn from(quaternion: Quaternion) -> Self {
        nalgebra::UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(
            quaternion.s,
            quaternion.x,
            quaternion.y,
            quaternion.z,
        ))
    }
}

impl From<nalgebra::Rotation3<f64>> for RotationMatrix {
    fn from(rotation: nalgebra::Rotation3<f64>) -> Self {
        let m = rotation.matrix();
        RotationMatrix::new(
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
            m[(2, 2)],
        )
    }
}

impl From<RotationMatrix> for nalgebra::Rotation3<f64> {
    fn from(matrix: RotationMatrix) -> Self {
        nalgebra::Rotation3::from_matrix_unchecked(nalgebra::Matrix3::new(
            matrix.m00, matrix.m01, matrix.m02, matrix.m10, matrix.m11, matrix.m12, matrix.m20,
            matrix.m21, matrix.m22,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::{AxisAngle, Orientation, Quaternion, RotationMatrix};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_3;

    #[test]
    fn quaternion_survives_the_round_trip() {
        let ours = Quaternion::from_axis_angle(&AxisAngle::new(0., 1., 0., FRAC_PI_3));
        let theirs: nalgebra::UnitQuaternion<f64> = ours.into();
        let back: Quaternion = theirs.into();
        assert!(back.geometrically_equals(&ours, 1e-12));
    }

    #[test]
    fn rotation_matrix_survives_the_round_trip() {
        let ours = RotationMatrix::from_axis_angle(&AxisAngle::new(1., 0., 0., -0.8));
        let theirs: nalgebra::Rotation3<f64> = ours.into();
        let back: RotationMatrix = theirs.into();
        assert_relative_eq!(back, ours, epsilon = 1e-15);
    }

    #[test]
    fn angles_agree_across_the_boundary() {
        let ours = Quaternion::from_axis_angle(&AxisAngle::new(0., 0., 1., 1.2));
        let theirs: nalgebra::UnitQuaternion<f64> = ours.into();
        assert_relative_eq!(theirs.angle(), ours.angle(), epsilon = 1e-12);
    }
}
