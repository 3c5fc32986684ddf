//! # disa
//!
//! A compressed-sparse-row linear algebra core: sparse matrix storage and
//! arithmetic, an adjacency graph used for reordering and partitioning, and
//! a small family of linear solvers (direct LU, and the stationary iterative
//! methods Jacobi, Gauss-Seidel and SOR) built on a shared convergence
//! tracker.
//!
//! ## Quick start
//!
//! ```rust
//! use disa::matrix::csr::CsrMatrix;
//! use disa::matrix::AnyMatrix;
//! use disa::dense::vector::DenseVector;
//! use disa::solver::{build_solver, SolverConfig};
//!
//! let mut a = CsrMatrix::with_shape(3, 3);
//! a.set(0, 0, 4.0);
//! a.set(0, 1, 1.0);
//! a.set(1, 0, 1.0);
//! a.set(1, 1, 3.0);
//! a.set(2, 2, 2.0);
//!
//! let b = DenseVector::from_vec(vec![5.0, 4.0, 2.0]);
//! let mut x = DenseVector::zeros(3);
//!
//! let mut solver = build_solver(SolverConfig::gauss_seidel(1000, 1e-8)).unwrap();
//! let convergence = solver.solve(AnyMatrix::Sparse(&a), &mut x, &b).unwrap();
//! assert!(convergence.converged);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![allow(clippy::float_cmp)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod dense;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod scalar;
pub mod solver;
pub mod types;

pub use error::{Result, SolverError};
pub use scalar::{Precision, DEFAULT_ABSOLUTE, DEFAULT_RELATIVE, SCALAR_EPSILON};

/// Crate version, from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate description, from `Cargo.toml`.
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Initializes default logging for applications embedding this crate.
///
/// Calling this is optional; the crate's own `log` calls work with whatever
/// subscriber the host application installs.
#[cfg(feature = "std")]
pub fn init() {
    #[cfg(feature = "env_logger")]
    env_logger::try_init().ok();
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
        assert!(!DESCRIPTION.is_empty());
    }
}
