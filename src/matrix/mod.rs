//! Matrix storage and the common trait shared by dense and sparse matrices.

use crate::dense::matrix::DenseMatrix;
use crate::error::Result;
use crate::matrix::csr::CsrMatrix;
use crate::scalar::Precision;

pub mod csr;
pub mod view;

/// Behaviour shared by [`DenseMatrix`] and [`CsrMatrix`], so the solver
/// dispatch layer (L4) can reason about either through one trait object
/// where the contract allows it.
pub trait MatrixLike {
    /// Number of rows.
    fn rows(&self) -> usize;
    /// Number of columns.
    fn cols(&self) -> usize;
    /// Reads entry `(i, j)`; absent sparse entries read as zero.
    fn get(&self, i: usize, j: usize) -> Precision;

    /// True iff the matrix is square.
    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Checks (weak) diagonal dominance: `|a_ii| >= sum_{j != i} |a_ij|` for
    /// every row.
    fn is_diagonally_dominant(&self) -> bool {
        (0..self.rows()).all(|i| self.diagonal_dominance_factor(i) >= 0.0)
    }

    /// `|a_ii| - sum_{j != i} |a_ij|` for row `i`; non-negative iff row `i`
    /// is diagonally dominant.
    fn diagonal_dominance_factor(&self, i: usize) -> Precision {
        let diag = self.get(i, i).abs();
        let off_diag: Precision = (0..self.cols()).filter(|&j| j != i).map(|j| self.get(i, j).abs()).sum();
        diag - off_diag
    }

    /// Gershgorin-circle bound on the spectral radius.
    fn spectral_radius_estimate(&self) -> Precision {
        (0..self.rows())
            .map(|i| {
                let diag = self.get(i, i).abs();
                let radius: Precision = (0..self.cols()).filter(|&j| j != i).map(|j| self.get(i, j).abs()).sum();
                diag + radius
            })
            .fold(0.0, Precision::max)
    }
}

impl MatrixLike for DenseMatrix {
    fn rows(&self) -> usize {
        DenseMatrix::rows(self)
    }
    fn cols(&self) -> usize {
        DenseMatrix::cols(self)
    }
    fn get(&self, i: usize, j: usize) -> Precision {
        DenseMatrix::get(self, i, j)
    }
}

impl MatrixLike for CsrMatrix {
    fn rows(&self) -> usize {
        self.size_row()
    }
    fn cols(&self) -> usize {
        self.size_column()
    }
    fn get(&self, i: usize, j: usize) -> Precision {
        self.at(i, j).unwrap_or(0.0)
    }
}

/// Either a sparse or a dense coefficient matrix, as accepted by
/// [`crate::solver::dispatch::Solver::solve`].
pub enum AnyMatrix<'a> {
    /// A CSR sparse matrix.
    Sparse(&'a CsrMatrix),
    /// A dense matrix.
    Dense(&'a DenseMatrix),
}

impl<'a> AnyMatrix<'a> {
    /// Rows of the underlying matrix.
    pub fn rows(&self) -> usize {
        match self {
            AnyMatrix::Sparse(m) => m.size_row(),
            AnyMatrix::Dense(m) => m.rows(),
        }
    }

    /// Columns of the underlying matrix.
    pub fn cols(&self) -> usize {
        match self {
            AnyMatrix::Sparse(m) => m.size_column(),
            AnyMatrix::Dense(m) => m.cols(),
        }
    }

    /// Matrix-vector product dispatched to the underlying storage.
    pub fn mul_vector(&self, x: &crate::dense::vector::DenseVector) -> Result<crate::dense::vector::DenseVector> {
        match self {
            AnyMatrix::Sparse(m) => m.mul_vector(x),
            AnyMatrix::Dense(m) => m.mul_vector(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_diagonal_dominance() {
        let mut m = DenseMatrix::zeros(2, 2);
        m.set(0, 0, 4.0);
        m.set(0, 1, 1.0);
        m.set(1, 0, 1.0);
        m.set(1, 1, 4.0);
        assert!(m.is_diagonally_dominant());
    }

    #[test]
    fn sparse_spectral_radius_bound() {
        let mut m = CsrMatrix::with_shape(2, 2);
        m.set(0, 0, 2.0);
        m.set(0, 1, 1.0);
        m.set(1, 1, 3.0);
        assert!(MatrixLike::spectral_radius_estimate(&m) >= 3.0);
    }
}
