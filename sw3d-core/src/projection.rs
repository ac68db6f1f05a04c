/// Perspective projection and the homogeneous divide to screen space
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// A position on the drawing surface, relative to its centre, y down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    pub aspect: f64,
}

impl Projection {
    pub const DEFAULT_FOV: f64 = 90.0;
    pub const DEFAULT_NEAR: f64 = 0.1;
    pub const DEFAULT_FAR: f64 = 100.0;

    /// Default projection for a surface of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_fov(Self::DEFAULT_FOV, width, height)
    }

    pub fn with_fov(fov: f64, width: u32, height: u32) -> Self {
        Self {
            fov,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
            aspect: width as f64 / height as f64,
        }
    }

    pub fn matrix(&self) -> Matrix {
        perspective_projection(self.fov, self.near, self.far, self.aspect)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Perspective matrix for a vertical field of view given in degrees.
///
/// Depth goes through `far / (far - near)` and the w row carries view-space z
/// scaled by `far * near / (far - near)`, so the later divide by w shrinks
/// distant points.
pub fn perspective_projection(fov: f64, near: f64, far: f64, aspect: f64) -> Matrix {
    let tan_angle = (fov / 2.0).to_radians().tan();

    let mut m = Matrix::zeros(4, 4);
    m.set(0, 0, 1.0 / (aspect * tan_angle));
    m.set(1, 1, 1.0 / tan_angle);
    m.set(2, 2, far / (far - near));
    m.set(3, 2, far * near / (far - near));
    m.set(2, 3, 1.0);
    m
}

/// Divide a projected 4x1 point by w and scale it to pixels.
///
/// The divide is skipped when w is zero. x, y and z of `projected` are
/// overwritten in place; the returned point holds the final x and y.
pub fn project_to_screen(projected: &mut Matrix, width: u32, height: u32) -> Result<ScreenPoint> {
    if projected.size() != (1, 4) {
        return Err(Error::NotAPoint {
            width: projected.width(),
            height: projected.height(),
        });
    }

    let w = projected.get(3, 0);
    if w != 0.0 {
        for row in 0..3 {
            projected.set(row, 0, projected.get(row, 0) / w);
        }
    }

    let x = projected.get(0, 0) * width as f64 / 2.0;
    let y = -projected.get(1, 0) * height as f64 / 2.0;
    projected.set(0, 0, x);
    projected.set(1, 0, y);

    Ok(ScreenPoint::new(x, y))
}
