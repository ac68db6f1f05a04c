/// Dense matrices with checked multiplication
use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::vector::Vector4;

/// A dense `width` x `height` matrix of f64, addressed `(row, col)`.
///
/// Transform matrices are 4x4 and points travel as 4x1 column matrices, so
/// applying a transform is `transform.multiply(&Matrix::from_point(p))`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    inner: DMatrix<f64>,
}

impl Matrix {
    /// Zero-filled matrix.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            inner: DMatrix::zeros(height, width),
        }
    }

    /// Matrix with ones on the main diagonal.
    pub fn identity(width: usize, height: usize) -> Self {
        Self {
            inner: DMatrix::identity(height, width),
        }
    }

    /// Build a matrix from its rows.
    pub fn from_rows(width: usize, height: usize, values: &[f64]) -> Self {
        Self {
            inner: DMatrix::from_row_slice(height, width, values),
        }
    }

    /// A point as a 4x1 column matrix.
    pub fn from_point(point: &Vector4) -> Self {
        Self {
            inner: DMatrix::from_column_slice(4, 1, point.as_slice()),
        }
    }

    /// `(width, height)`, i.e. `(columns, rows)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn width(&self) -> usize {
        self.inner.ncols()
    }

    pub fn height(&self) -> usize {
        self.inner.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.inner[(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.inner[(row, col)] = value;
    }

    /// Standard matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.width() != rhs.height() {
            return Err(Error::DimensionMismatch {
                left_width: self.width(),
                left_height: self.height(),
                right_width: rhs.width(),
                right_height: rhs.height(),
            });
        }

        Ok(Matrix {
            inner: &self.inner * &rhs.inner,
        })
    }

    /// Multiply a chain of matrices left to right.
    pub fn chain(first: &Matrix, rest: &[&Matrix]) -> Result<Matrix> {
        rest.iter()
            .try_fold(first.clone(), |acc, next| acc.multiply(next))
    }

    /// Read a 4x1 column matrix back as a point.
    pub fn to_point(&self) -> Result<Vector4> {
        if self.size() != (1, 4) {
            return Err(Error::NotAPoint {
                width: self.width(),
                height: self.height(),
            });
        }

        Ok(Vector4::new(
            self.inner[(0, 0)],
            self.inner[(1, 0)],
            self.inner[(2, 0)],
            self.inner[(3, 0)],
        ))
    }

    /// Apply this 4x4 transform to a point.
    pub fn transform_point(&self, point: &Vector4) -> Result<Vector4> {
        self.multiply(&Matrix::from_point(point))?.to_point()
    }

    /// Element-wise comparison within `epsilon`; shapes must match.
    pub fn approx_eq(&self, other: &Matrix, epsilon: f64) -> bool {
        self.size() == other.size()
            && self
                .inner
                .iter()
                .zip(other.inner.iter())
                .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(width: usize, height: usize, seed: f64) -> Matrix {
        let values: Vec<f64> = (0..width * height)
            .map(|i| (i as f64 * 0.37 + seed).sin() * 3.0)
            .collect();
        Matrix::from_rows(width, height, &values)
    }

    #[test]
    fn test_size_and_zeros() {
        let m = Matrix::zeros(3, 2);
        assert_eq!(m.size(), (3, 2));
        assert_eq!(m.get(1, 2), 0.0);
    }

    #[test]
    fn test_identity_diagonal() {
        let m = Matrix::identity(4, 4);
        for row in 0..4 {
            for col in 0..4 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_eq!(m.get(row, col), expected);
            }
        }
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = sample(4, 4, 0.5);
        let id = Matrix::identity(4, 4);
        assert!(id.multiply(&m).unwrap().approx_eq(&m, 1e-12));
        assert!(m.multiply(&id).unwrap().approx_eq(&m, 1e-12));

        let column = sample(1, 4, 2.0);
        assert!(id.multiply(&column).unwrap().approx_eq(&column, 1e-12));
    }

    #[test]
    fn test_multiply_is_associative() {
        let a = sample(4, 4, 0.1);
        let b = sample(4, 4, 1.7);
        let c = sample(4, 4, -2.3);

        let left = a.multiply(&b).unwrap().multiply(&c).unwrap();
        let right = a.multiply(&b.multiply(&c).unwrap()).unwrap();
        assert!(left.approx_eq(&right, 1e-9));
    }

    #[test]
    fn test_multiply_rectangular() {
        // 2 rows x 3 cols times 3 rows x 1 col
        let a = Matrix::from_rows(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Matrix::from_rows(1, 3, &[1.0, 0.0, -1.0]);
        let product = a.multiply(&b).unwrap();
        assert_eq!(product.size(), (1, 2));
        assert_eq!(product.get(0, 0), -2.0);
        assert_eq!(product.get(1, 0), -2.0);
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = Matrix::zeros(4, 4);
        let b = Matrix::zeros(4, 3);
        let err = a.multiply(&b).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                left_width: 4,
                left_height: 4,
                right_width: 4,
                right_height: 3,
            }
        );
    }

    #[test]
    fn test_point_round_trip_through_identity() {
        let p = Vector4::new(1.0, -2.0, 3.0, 1.0);
        let moved = Matrix::identity(4, 4).transform_point(&p).unwrap();
        assert_eq!(moved, p);
    }

    #[test]
    fn test_to_point_rejects_non_column() {
        let err = Matrix::identity(4, 4).to_point().unwrap_err();
        assert_eq!(err, Error::NotAPoint { width: 4, height: 4 });
    }

    #[test]
    fn test_chain_matches_nested_multiply() {
        let a = sample(4, 4, 0.3);
        let b = sample(4, 4, 0.9);
        let c = sample(4, 4, 1.4);
        let chained = Matrix::chain(&a, &[&b, &c]).unwrap();
        let nested = a.multiply(&b).unwrap().multiply(&c).unwrap();
        assert!(chained.approx_eq(&nested, 1e-12));
    }
}
