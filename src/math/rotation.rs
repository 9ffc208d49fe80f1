use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Translation3, Unit, UnitQuaternion, Vector3};

use thiserror::Error;

// Vectors shorter than this are treated as having no direction.
const MIN_AXIS_LENGTH: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    #[error("cannot rotate about a zero-length axis {0:?}")]
    DegenerateAxis([f64; 3]),
    #[error("cannot normalize a zero-length vector {0:?}")]
    ZeroLengthVector([f64; 3]),
}

fn components(v: &Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

pub fn normalize(vector: &Vector3<f64>) -> Result<Unit<Vector3<f64>>, MathError> {
    Unit::try_new(*vector, MIN_AXIS_LENGTH).ok_or(MathError::ZeroLengthVector(components(vector)))
}

pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

/// Builds the homogeneous matrix rotating by `angle` degrees, counter-clockwise,
/// about `axis`. The axis does not have to be normalized.
pub fn make_rotation_matrix(angle: f64, axis: &Vector3<f64>) -> Result<Matrix4<f64>, MathError> {
    let axis = Unit::try_new(*axis, MIN_AXIS_LENGTH)
        .ok_or(MathError::DegenerateAxis(components(axis)))?;
    Ok(axis_rotation(angle, &axis))
}

/// Same as [`make_rotation_matrix`], for axes that are known to be unit length.
pub fn axis_rotation(angle: f64, axis: &Unit<Vector3<f64>>) -> Matrix4<f64> {
    let radians = angle.to_radians();
    let (s, c) = radians.sin_cos();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    // Rodrigues' formula, written out
    let rotation = Matrix3::new(
        x * x * t + c,
        x * y * t - z * s,
        x * z * t + y * s,
        y * x * t + z * s,
        y * y * t + c,
        y * z * t - x * s,
        x * z * t - y * s,
        y * z * t + x * s,
        z * z * t + c,
    );
    rotation.to_homogeneous()
}

/// Applies the linear part of `matrix` to `vector`; the translation column is ignored.
pub fn transform_vector(vector: &Vector3<f64>, matrix: &Matrix4<f64>) -> Vector3<f64> {
    matrix.fixed_slice::<3, 3>(0, 0) * vector
}

/// Converts a rigid homogeneous transform into the single-precision isometry
/// that scene nodes expect. Any scaling or shear in `matrix` is discarded.
pub fn to_isometry(matrix: &Matrix4<f64>) -> Isometry3<f32> {
    let linear: Matrix3<f64> = matrix.fixed_slice::<3, 3>(0, 0).into_owned();
    let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(linear));
    let translation = Translation3::from(matrix.fixed_slice::<3, 1>(0, 3).into_owned());
    nalgebra::convert(Isometry3::from_parts(translation, rotation))
}

/// Returns the largest deviation of `matrix`'s linear part from an orthonormal
/// basis, along with its determinant.
pub fn orthonormality(matrix: &Matrix4<f64>) -> (f64, f64) {
    let linear: Matrix3<f64> = matrix.fixed_slice::<3, 3>(0, 0).into_owned();
    let deviation = (linear.transpose() * linear - Matrix3::identity()).amax();
    (deviation, linear.determinant())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::Point3;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_zero_angle_is_identity() {
        let m = make_rotation_matrix(0.0, &Vector3::new(3.0, -2.0, 7.0)).unwrap();
        assert_relative_eq!(m, Matrix4::identity());
    }

    #[test]
    fn test_quarter_turns() {
        let z = make_rotation_matrix(90.0, &Vector3::z()).unwrap();
        assert_abs_diff_eq!(transform_vector(&Vector3::x(), &z), Vector3::y(), epsilon = 1e-15);

        // Axis length shouldn't matter
        let x = make_rotation_matrix(90.0, &Vector3::new(5.0, 0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(transform_vector(&Vector3::y(), &x), Vector3::z(), epsilon = 1e-15);

        // Flipping the axis flips the direction
        let neg_y = make_rotation_matrix(90.0, &-Vector3::y()).unwrap();
        assert_abs_diff_eq!(transform_vector(&Vector3::x(), &neg_y), Vector3::z(), epsilon = 1e-15);
    }

    #[test]
    fn test_matches_nalgebra() {
        let axis = Vector3::new(1.0, 2.0, -0.5);
        let ours = make_rotation_matrix(37.0, &axis).unwrap();
        let theirs = Rotation3::from_axis_angle(&Unit::new_normalize(axis), 37f64.to_radians());
        assert_relative_eq!(ours, theirs.to_homogeneous(), epsilon = 1e-14);
    }

    #[test]
    fn test_degenerate_axis() {
        assert_eq!(
            make_rotation_matrix(10.0, &Vector3::zeros()),
            Err(MathError::DegenerateAxis([0.0, 0.0, 0.0]))
        );
        assert!(normalize(&Vector3::zeros()).is_err());
        assert!(normalize(&Vector3::new(1e-20, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_normalize_and_cross() {
        let v = normalize(&Vector3::new(0.0, 64.0, -16.0)).unwrap();
        assert_relative_eq!(v.norm(), 1.0);
        assert_relative_eq!(v.y / v.z, -4.0);

        assert_eq!(cross(&Vector3::x(), &Vector3::y()), Vector3::z());
        assert_eq!(cross(&Vector3::y(), &Vector3::x()), -Vector3::z());
    }

    #[test]
    fn test_random_rotations_are_proper() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let axis = Vector3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            let angle = rng.gen_range(-720.0..720.0);
            let m = make_rotation_matrix(angle, &axis).unwrap();

            let (deviation, det) = orthonormality(&m);
            assert_abs_diff_eq!(deviation, 0.0, epsilon = 1e-12);
            assert_relative_eq!(det, 1.0, epsilon = 1e-12);

            // The axis itself is left alone
            assert_relative_eq!(transform_vector(&axis, &m), axis, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_transform_ignores_translation() {
        let mut m = make_rotation_matrix(180.0, &Vector3::z()).unwrap();
        m.append_translation_mut(&Vector3::new(10.0, 20.0, 30.0));
        assert_abs_diff_eq!(
            transform_vector(&Vector3::x(), &m),
            -Vector3::x(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_to_isometry() {
        let mut m = make_rotation_matrix(90.0, &Vector3::z()).unwrap();
        m.append_translation_mut(&Vector3::new(1.0, 2.0, 3.0));
        let iso = to_isometry(&m);
        assert_relative_eq!(
            iso * Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 3.0, 3.0),
            epsilon = 1e-6
        );
    }
}
