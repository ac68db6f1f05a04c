/// 4x4 affine transform builders and object placement
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matrix::Matrix;

/// Euler angles in radians, applied z first, then y, then x
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_degrees(x: f64, y: f64, z: f64) -> Self {
        Self::new(x.to_radians(), y.to_radians(), z.to_radians())
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Matrix {
        let mut m = Matrix::identity(4, 4);
        m.set(0, 3, tx);
        m.set(1, 3, ty);
        m.set(2, 3, tz);
        m
    }

    /// Right-handed rotation around the x axis.
    pub fn rotation_x(angle: f64) -> Matrix {
        let (sine, cosine) = angle.sin_cos();
        Matrix::from_rows(
            4,
            4,
            &[
                1.0, 0.0, 0.0, 0.0, //
                0.0, cosine, -sine, 0.0, //
                0.0, sine, cosine, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        )
    }

    /// Right-handed rotation around the y axis.
    pub fn rotation_y(angle: f64) -> Matrix {
        let (sine, cosine) = angle.sin_cos();
        Matrix::from_rows(
            4,
            4,
            &[
                cosine, 0.0, sine, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                -sine, 0.0, cosine, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        )
    }

    /// Right-handed rotation around the z axis.
    pub fn rotation_z(angle: f64) -> Matrix {
        let (sine, cosine) = angle.sin_cos();
        Matrix::from_rows(
            4,
            4,
            &[
                cosine, -sine, 0.0, 0.0, //
                sine, cosine, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        )
    }

    pub fn scale(sx: f64, sy: f64, sz: f64) -> Matrix {
        let mut m = Matrix::zeros(4, 4);
        m.set(0, 0, sx);
        m.set(1, 1, sy);
        m.set(2, 2, sz);
        m.set(3, 3, 1.0);
        m
    }

    /// `Rx * Ry * Rz`: z is applied first.
    pub fn rotation_matrix(rotation: &RotationState) -> Result<Matrix> {
        Matrix::chain(
            &Self::rotation_x(rotation.x),
            &[&Self::rotation_y(rotation.y), &Self::rotation_z(rotation.z)],
        )
    }
}

/// Where an object sits in view space: `T * Rx * Ry * Rz * S`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub translation: [f64; 3],
    pub rotation: RotationState,
    pub scale: f64,
}

impl Placement {
    pub fn new(translation: [f64; 3], rotation: RotationState, scale: f64) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// The model matrix: scale innermost, translation outermost.
    pub fn matrix(&self) -> Result<Matrix> {
        let [tx, ty, tz] = self.translation;
        Matrix::chain(
            &Transform::translation(tx, ty, tz),
            &[
                &Transform::rotation_matrix(&self.rotation)?,
                &Transform::scale(self.scale, self.scale, self.scale),
            ],
        )
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new([0.0, 0.0, 0.0], RotationState::default(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::point;
    use std::f64::consts::FRAC_PI_2;

    fn assert_point(actual: crate::vector::Vector4, x: f64, y: f64, z: f64) {
        assert!((actual.x - x).abs() < 1e-9, "x: {} != {}", actual.x, x);
        assert!((actual.y - y).abs() < 1e-9, "y: {} != {}", actual.y, y);
        assert!((actual.z - z).abs() < 1e-9, "z: {} != {}", actual.z, z);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&RotationState::default()).unwrap();
        assert!(matrix.approx_eq(&Matrix::identity(4, 4), 1e-12));
    }

    #[test]
    fn test_translation_moves_points_not_directions() {
        let t = Transform::translation(1.0, 2.0, 3.0);
        assert_point(t.transform_point(&point(1.0, 1.0, 1.0)).unwrap(), 2.0, 3.0, 4.0);

        let direction = crate::vector::Vector4::new(1.0, 1.0, 1.0, 0.0);
        assert_point(t.transform_point(&direction).unwrap(), 1.0, 1.0, 1.0);
    }

    #[test]
    fn test_right_handed_rotations() {
        let x = point(1.0, 0.0, 0.0);
        let y = point(0.0, 1.0, 0.0);
        let z = point(0.0, 0.0, 1.0);

        assert_point(Transform::rotation_z(FRAC_PI_2).transform_point(&x).unwrap(), 0.0, 1.0, 0.0);
        assert_point(Transform::rotation_x(FRAC_PI_2).transform_point(&y).unwrap(), 0.0, 0.0, 1.0);
        assert_point(Transform::rotation_y(FRAC_PI_2).transform_point(&z).unwrap(), 1.0, 0.0, 0.0);
    }

    #[test]
    fn test_rotation_from_degrees() {
        let rotation = RotationState::from_degrees(90.0, 180.0, -45.0);
        assert!((rotation.x - FRAC_PI_2).abs() < 1e-12);
        assert!((rotation.y - std::f64::consts::PI).abs() < 1e-12);
        assert!((rotation.z + std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_scale() {
        let s = Transform::scale(2.0, 3.0, 4.0);
        assert_point(s.transform_point(&point(1.0, 1.0, 1.0)).unwrap(), 2.0, 3.0, 4.0);
        assert_eq!(s.get(3, 3), 1.0);
    }

    #[test]
    fn test_placement_scales_before_translating() {
        let placement = Placement::new([0.0, 0.0, 10.0], RotationState::default(), 5.0);
        let m = placement.matrix().unwrap();
        assert_point(m.transform_point(&point(1.0, 0.0, 0.0)).unwrap(), 5.0, 0.0, 10.0);
    }

    #[test]
    fn test_placement_rotates_before_translating() {
        let placement = Placement::new(
            [3.0, 0.0, 0.0],
            RotationState::new(0.0, 0.0, FRAC_PI_2),
            1.0,
        );
        let m = placement.matrix().unwrap();
        assert_point(m.transform_point(&point(1.0, 0.0, 0.0)).unwrap(), 3.0, 1.0, 0.0);
    }
}
