//! Solver selection and dispatch (§4.14): one entry point that picks the
//! right algorithm for a [`SolverConfig`] and runs it against either a
//! sparse or a dense coefficient matrix.

use crate::dense::matrix::DenseMatrix;
use crate::dense::vector::DenseVector;
use crate::error::{Result, SolverError};
use crate::matrix::AnyMatrix;
use crate::solver::config::{SolverConfig, SolverKind};
use crate::solver::convergence::ConvergenceData;
use crate::solver::fixed_point::{solve_gauss_seidel, solve_jacobi, solve_sor};
use crate::solver::lu::LuSolver;

/// A solver built from a [`SolverConfig`], ready to run against a system.
pub enum Solver {
    /// Direct LU factorisation; holds its own factorisation state, built
    /// lazily against whatever matrix is first passed to [`Solver::solve`].
    Lu(LuSolver),
    /// Jacobi fixed-point iteration.
    Jacobi(SolverConfig),
    /// Gauss-Seidel fixed-point iteration.
    GaussSeidel(SolverConfig),
    /// Successive over-relaxation.
    Sor(SolverConfig),
}

/// Builds a [`Solver`] from a configuration.
pub fn build_solver(config: SolverConfig) -> Result<Solver> {
    match config.kind {
        SolverKind::LowerUpperFactorisation => Ok(Solver::Lu(LuSolver::new(&config))),
        SolverKind::Jacobi => Ok(Solver::Jacobi(config)),
        SolverKind::GaussSeidel => Ok(Solver::GaussSeidel(config)),
        SolverKind::SuccessiveOverRelaxation => Ok(Solver::Sor(config)),
        SolverKind::Unknown => Err(SolverError::InvalidConfig { message: "no solver kind selected".into() }),
    }
}

impl Solver {
    /// Solves `A x = b` in place, dispatching on both the solver kind and
    /// the matrix representation. LU factorisation only accepts dense
    /// matrices; the fixed-point iterations accept either.
    pub fn solve(&mut self, coef: AnyMatrix, x: &mut DenseVector, b: &DenseVector) -> Result<ConvergenceData> {
        match self {
            Solver::Lu(lu) => {
                let dense = match coef {
                    AnyMatrix::Dense(m) => m,
                    AnyMatrix::Sparse(_) => {
                        return Err(SolverError::InvalidConfig { message: "LU factorisation requires a dense matrix".into() })
                    }
                };
                if !lu.is_factorised() {
                    lu.factorise(dense)?;
                }
                lu.solve_system(x, b)
            }
            Solver::Jacobi(config) => solve_jacobi(config, &coef, x, b),
            Solver::GaussSeidel(config) => solve_gauss_seidel(config, &coef, x, b),
            Solver::Sor(config) => solve_sor(config, &coef, x, b),
        }
    }

    /// Convenience for the common case of solving a dense system directly,
    /// without constructing an [`AnyMatrix`] at the call site.
    pub fn solve_dense(&mut self, a: &DenseMatrix, x: &mut DenseVector, b: &DenseVector) -> Result<ConvergenceData> {
        self.solve(AnyMatrix::Dense(a), x, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::csr::CsrMatrix;

    #[test]
    fn lu_rejects_sparse_input() {
        let mut solver = build_solver(SolverConfig::lu_pivoted()).unwrap();
        let a = CsrMatrix::with_shape(2, 2);
        let mut x = DenseVector::zeros(2);
        let b = DenseVector::zeros(2);
        assert!(solver.solve(AnyMatrix::Sparse(&a), &mut x, &b).is_err());
    }

    #[test]
    fn unknown_kind_fails_to_build() {
        assert!(build_solver(SolverConfig::default()).is_err());
    }

    #[test]
    fn dispatch_solves_dense_lu_system() {
        let mut solver = build_solver(SolverConfig::lu_pivoted()).unwrap();
        let a = DenseMatrix::from_rows(alloc::vec![alloc::vec![2.0, 0.0], alloc::vec![0.0, 4.0]]);
        let b = DenseVector::from_vec(alloc::vec![4.0, 8.0]);
        let mut x = DenseVector::zeros(2);
        let data = solver.solve_dense(&a, &mut x, &b).unwrap();
        assert!(data.converged);
        assert_eq!(x.as_slice(), &[2.0, 2.0]);
    }

    #[test]
    fn dispatch_solves_sparse_gauss_seidel_system() {
        let mut a = CsrMatrix::with_shape(2, 2);
        a.set(0, 0, 4.0);
        a.set(1, 1, 4.0);
        let b = DenseVector::from_vec(alloc::vec![4.0, 8.0]);
        let mut x = DenseVector::zeros(2);
        let mut solver = build_solver(SolverConfig::gauss_seidel(100, 1e-10)).unwrap();
        let data = solver.solve(AnyMatrix::Sparse(&a), &mut x, &b).unwrap();
        assert!(data.converged);
        assert!((x[0] - 1.0).abs() < 1e-8);
        assert!((x[1] - 2.0).abs() < 1e-8);
    }
}
