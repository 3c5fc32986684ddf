//! Row-major dense matrix.

use crate::dense::vector::DenseVector;
use crate::error::{Result, SolverError};
use crate::scalar::Precision;
use alloc::vec::Vec;

/// A row-major dense matrix of [`Precision`] scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<DenseVector>,
}

impl DenseMatrix {
    /// Builds a `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        DenseMatrix { rows, cols, data: (0..rows).map(|_| DenseVector::zeros(cols)).collect() }
    }

    /// Builds a matrix from an explicit row-major nested vector.
    pub fn from_rows(rows: Vec<Vec<Precision>>) -> Self {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        DenseMatrix { rows: nrows, cols: ncols, data: rows.into_iter().map(DenseVector::from_vec).collect() }
    }

    /// Row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Reads entry `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Precision {
        self.data[i][j]
    }

    /// Sets entry `(i, j)`.
    pub fn set(&mut self, i: usize, j: usize, v: Precision) {
        self.data[i][j] = v;
    }

    /// Borrows row `i`.
    pub fn row(&self, i: usize) -> &DenseVector {
        &self.data[i]
    }

    /// Mutably borrows row `i`.
    pub fn row_mut(&mut self, i: usize) -> &mut DenseVector {
        &mut self.data[i]
    }

    /// Swaps rows `a` and `b`.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    /// Dense matrix-vector product `A * x`.
    pub fn mul_vector(&self, x: &DenseVector) -> Result<DenseVector> {
        if x.len() != self.cols {
            return Err(SolverError::DimensionMismatch {
                expected: self.cols,
                actual: x.len(),
                operation: "DenseMatrix::mul_vector".into(),
            });
        }
        let mut out = DenseVector::zeros(self.rows);
        for i in 0..self.rows {
            out[i] = self.data[i].dot(x)?;
        }
        Ok(out)
    }

    /// Dense matrix-matrix product `A * B`.
    pub fn mul_matrix(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        if self.cols != other.rows {
            return Err(SolverError::DimensionMismatch {
                expected: self.cols,
                actual: other.rows,
                operation: "DenseMatrix::mul_matrix".into(),
            });
        }
        let mut out = DenseMatrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a_ik = self.get(i, k);
                if a_ik == 0.0 {
                    continue;
                }
                for j in 0..other.cols {
                    out.data[i][j] += a_ik * other.get(k, j);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_vector_identity() {
        let mut a = DenseMatrix::zeros(2, 2);
        a.set(0, 0, 1.0);
        a.set(1, 1, 1.0);
        let x = DenseVector::from_vec(alloc::vec![3.0, 4.0]);
        let y = a.mul_vector(&x).unwrap();
        assert_eq!(y.as_slice(), &[3.0, 4.0]);
    }

    #[test]
    fn mul_matrix_dimension_mismatch() {
        let a = DenseMatrix::zeros(2, 3);
        let b = DenseMatrix::zeros(2, 2);
        assert!(a.mul_matrix(&b).is_err());
    }

    #[test]
    fn mul_matrix_product() {
        let a = DenseMatrix::from_rows(alloc::vec![alloc::vec![1.0, 2.0], alloc::vec![3.0, 4.0]]);
        let b = DenseMatrix::from_rows(alloc::vec![alloc::vec![5.0, 6.0], alloc::vec![7.0, 8.0]]);
        let c = a.mul_matrix(&b).unwrap();
        assert_eq!(c.get(0, 0), 19.0);
        assert_eq!(c.get(0, 1), 22.0);
        assert_eq!(c.get(1, 0), 43.0);
        assert_eq!(c.get(1, 1), 50.0);
    }
}
