/// Affine transform builders
use std::fmt;

use nalgebra::{Matrix4, Vector3};

use crate::matrix::Matrix;

/// Coordinate axis a rotation turns about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        };
        write!(f, "{}", c)
    }
}

/// Transform builder for 3D transformations.
///
/// Each builder returns a fresh 4x4 [`Matrix`]; none of them touch the
/// transform stack.
pub struct Transform;

impl Transform {
    /// Create a scale matrix
    pub fn scale(sx: f32, sy: f32, sz: f32) -> Matrix {
        Matrix::from_matrix4(&Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)))
    }

    /// Create a translation matrix
    pub fn translate(dx: f32, dy: f32, dz: f32) -> Matrix {
        Matrix::from_matrix4(&Matrix4::new_translation(&Vector3::new(dx, dy, dz)))
    }

    /// Create a right-handed rotation about `axis`; the angle is in degrees.
    pub fn rotate(axis: Axis, degrees: f32) -> Matrix {
        let radians = degrees.to_radians();
        let unit = match axis {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        };
        Matrix::from_matrix4(&Matrix4::from_axis_angle(&unit, radians))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{multiply, MatrixKind};
    use nalgebra::Vector4;

    fn single_point(x: f32, y: f32, z: f32) -> Matrix {
        let mut m = Matrix::new(MatrixKind::Points);
        m.push_point(x, y, z);
        m
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let mut p = single_point(1.0, 0.0, 0.0);
        multiply(&Transform::rotate(Axis::Z, 90.0), &mut p).unwrap();
        assert!((p.columns()[0] - Vector4::new(0.0, 1.0, 0.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_rotate_x_quarter_turn() {
        let mut p = single_point(0.0, 1.0, 0.0);
        multiply(&Transform::rotate(Axis::X, 90.0), &mut p).unwrap();
        assert!((p.columns()[0] - Vector4::new(0.0, 0.0, 1.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        let mut p = single_point(0.0, 0.0, 1.0);
        multiply(&Transform::rotate(Axis::Y, 90.0), &mut p).unwrap();
        assert!((p.columns()[0] - Vector4::new(1.0, 0.0, 0.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_full_turn_is_identity() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let m = Transform::rotate(axis, 360.0).to_matrix4().unwrap();
            assert!((m - Matrix4::identity()).norm() < 1e-5);
        }
    }

    #[test]
    fn test_translate_moves_points_only() {
        let mut p = single_point(1.0, 2.0, 3.0);
        multiply(&Transform::translate(10.0, -2.0, 0.5), &mut p).unwrap();
        assert_eq!(p.columns()[0], Vector4::new(11.0, 0.0, 3.5, 1.0));
    }

    #[test]
    fn test_inverse_transforms_round_trip() {
        let mut points = Matrix::new(MatrixKind::Points);
        points.push_point(1.0, 2.0, 3.0);
        points.push_point(-7.0, 0.25, 4.0);
        let original = points.clone();

        let pairs = [
            (Transform::scale(2.0, 4.0, 0.5), Transform::scale(0.5, 0.25, 2.0)),
            (
                Transform::translate(3.0, -1.0, 8.0),
                Transform::translate(-3.0, 1.0, -8.0),
            ),
            (Transform::rotate(Axis::Y, 33.0), Transform::rotate(Axis::Y, -33.0)),
        ];
        for (forward, inverse) in pairs {
            multiply(&forward, &mut points).unwrap();
            multiply(&inverse, &mut points).unwrap();
        }

        for (a, b) in points.columns().iter().zip(original.columns()) {
            assert!((a - b).norm() < 1e-5);
        }
    }

    #[test]
    fn test_axis_from_char() {
        assert_eq!(Axis::from_char('X'), Some(Axis::X));
        assert_eq!(Axis::from_char('z'), Some(Axis::Z));
        assert_eq!(Axis::from_char('w'), None);
    }
}
