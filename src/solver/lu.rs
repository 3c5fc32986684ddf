//! Direct LU(P) factorisation for dense systems (§4.10).

use crate::dense::matrix::DenseMatrix;
use crate::dense::vector::DenseVector;
use crate::error::{Result, SolverError};
use crate::scalar::{is_nearly_greater, Precision, DEFAULT_ABSOLUTE, DEFAULT_RELATIVE};
use crate::solver::config::SolverConfig;
use crate::solver::convergence::ConvergenceData;
use alloc::vec::Vec;

/// Direct solver via LU factorisation, with optional partial pivoting.
///
/// A solver instance is factorised once against a coefficient matrix and
/// can then solve for any number of right-hand sides without refactorising.
#[derive(Debug, Clone)]
pub struct LuSolver {
    pivot: bool,
    factorisation_tolerance: Precision,
    factorised: bool,
    lu_factorised: DenseMatrix,
    pivots: Vec<usize>,
}

impl LuSolver {
    /// Builds an un-factorised solver from a configuration.
    pub fn new(config: &SolverConfig) -> Self {
        LuSolver {
            pivot: config.pivot,
            factorisation_tolerance: config.factorisation_tolerance,
            factorised: false,
            lu_factorised: DenseMatrix::zeros(0, 0),
            pivots: Vec::new(),
        }
    }

    /// True once [`factorise`](Self::factorise) has succeeded.
    pub fn is_factorised(&self) -> bool {
        self.factorised
    }

    /// Factorises `a_matrix` in place into combined L/U storage, with
    /// optional partial pivoting. Returns `false`, leaving the solver
    /// un-factorised, if a pivot candidate's magnitude falls below
    /// `factorisation_tolerance` (the matrix is numerically singular for
    /// this tolerance).
    pub fn factorise(&mut self, a_matrix: &DenseMatrix) -> Result<bool> {
        if a_matrix.rows() != a_matrix.cols() {
            return Err(SolverError::DimensionMismatch {
                expected: a_matrix.rows(),
                actual: a_matrix.cols(),
                operation: "LuSolver::factorise requires a square matrix".into(),
            });
        }

        self.factorised = false;
        self.lu_factorised = a_matrix.clone();
        let n = self.lu_factorised.rows();
        self.pivots = (0..n).collect();

        for i_row in 0..n {
            if self.pivot {
                let mut max = 0.0;
                let mut i_max = i_row;
                for i_sweep in i_row..n {
                    let abs_a = self.lu_factorised.get(i_sweep, i_row).abs();
                    if is_nearly_greater(abs_a, max, DEFAULT_RELATIVE, DEFAULT_ABSOLUTE) {
                        max = abs_a;
                        i_max = i_sweep;
                    }
                }
                if i_max != i_row {
                    self.pivots.swap(i_row, i_max);
                    self.lu_factorised.swap_rows(i_row, i_max);
                }
            }

            if self.lu_factorised.get(i_row, i_row).abs() < self.factorisation_tolerance {
                return Ok(false);
            }

            for i_sweep in (i_row + 1)..n {
                let factor = self.lu_factorised.get(i_sweep, i_row) / self.lu_factorised.get(i_row, i_row);
                self.lu_factorised.set(i_sweep, i_row, factor);
                for j_sweep in (i_row + 1)..n {
                    let updated = self.lu_factorised.get(i_sweep, j_sweep) - factor * self.lu_factorised.get(i_row, j_sweep);
                    self.lu_factorised.set(i_sweep, j_sweep, updated);
                }
            }
        }

        self.factorised = true;
        Ok(true)
    }

    /// Solves `A x = b` using the stored factorisation via forward and
    /// backward substitution. Returns an un-converged [`ConvergenceData`]
    /// (iteration 0) if no factorisation has succeeded yet.
    pub fn solve_system(&self, x: &mut DenseVector, b: &DenseVector) -> Result<ConvergenceData> {
        let n = self.lu_factorised.rows();
        if b.len() != n {
            return Err(SolverError::DimensionMismatch { expected: n, actual: b.len(), operation: "LuSolver::solve_system".into() });
        }

        let mut convergence_data = ConvergenceData::default();
        if !self.factorised {
            return Ok(convergence_data);
        }

        *x = DenseVector::zeros(n);
        for i_row in 0..n {
            let pivot_row = if self.pivot { self.pivots[i_row] } else { i_row };
            x[i_row] = b[pivot_row];
            for i_col in 0..i_row {
                x[i_row] -= self.lu_factorised.get(i_row, i_col) * x[i_col];
            }
        }

        for i_row in (0..n).rev() {
            for i_col in (i_row + 1)..n {
                x[i_row] -= self.lu_factorised.get(i_row, i_col) * x[i_col];
            }
            x[i_row] /= self.lu_factorised.get(i_row, i_row);
        }

        convergence_data.iteration = 1;
        convergence_data.converged = true;
        Ok(convergence_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_pivoted_three_by_three_system() {
        let a = DenseMatrix::from_rows(alloc::vec![
            alloc::vec![2.0, 7.0, 6.0],
            alloc::vec![9.0, 5.0, 1.0],
            alloc::vec![4.0, 3.0, 8.0],
        ]);
        let b = DenseVector::from_vec(alloc::vec![6.0, 2.0, 7.0]);

        let mut solver = LuSolver::new(&SolverConfig::lu_pivoted());
        assert!(solver.factorise(&a).unwrap());

        let mut x = DenseVector::zeros(3);
        let data = solver.solve_system(&mut x, &b).unwrap();
        assert!(data.converged);
        assert_eq!(data.iteration, 1);

        assert!((x[0] - 1.0 / 24.0).abs() < 1e-9);
        assert!((x[1] - 1.0 / 6.0).abs() < 1e-9);
        assert!((x[2] - 19.0 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn unfactorised_solve_reports_zero_iterations() {
        let solver = LuSolver::new(&SolverConfig::lu());
        let mut x = DenseVector::zeros(0);
        let b = DenseVector::zeros(0);
        let data = solver.solve_system(&mut x, &b).unwrap();
        assert!(!data.converged);
        assert_eq!(data.iteration, 0);
    }

    #[test]
    fn rejects_non_square_matrix() {
        let a = DenseMatrix::zeros(2, 3);
        let mut solver = LuSolver::new(&SolverConfig::lu());
        assert!(solver.factorise(&a).is_err());
    }

    #[test]
    fn degenerate_matrix_fails_to_factorise() {
        let a = DenseMatrix::from_rows(alloc::vec![alloc::vec![0.0, 0.0], alloc::vec![0.0, 1.0]]);
        let mut solver = LuSolver::new(&SolverConfig::lu());
        assert!(!solver.factorise(&a).unwrap());
        assert!(!solver.is_factorised());
    }
}
