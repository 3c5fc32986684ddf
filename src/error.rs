//! Error types for sparse matrix, graph and solver operations.
//!
//! Numerical outcomes (non-convergence, LU degeneracy) are not modelled as
//! errors here: a solve always returns a [`crate::solver::convergence::ConvergenceData`],
//! and callers inspect `converged` themselves. The variants below are reserved
//! for programming errors: dimension mismatches, out-of-range access, and
//! malformed structural input.

use core::fmt;
use alloc::string::String;

/// Result type alias for fallible operations in this crate.
pub type Result<T> = core::result::Result<T, SolverError>;

/// Errors raised by sparse matrix, graph and solver operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// A row or column index fell outside the matrix's declared shape.
    IndexOutOfBounds {
        /// The invalid index.
        index: usize,
        /// One past the highest valid index.
        bound: usize,
        /// Where the access occurred.
        context: String,
    },

    /// Two operands of a matrix/vector operation disagreed in shape.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Dimension actually supplied.
        actual: usize,
        /// Operation during which the mismatch was found.
        operation: String,
    },

    /// A CSR matrix's internal arrays violated one of its structural
    /// invariants (row_offset monotonicity, column ordering within a row,
    /// or array-length agreement).
    InvalidSparseMatrix {
        /// Description of which invariant failed.
        reason: String,
        /// Row at which the violation was found, if localised.
        row: Option<usize>,
    },

    /// An operation was asked to act on a graph edge or vertex that does
    /// not exist, or to insert one that would violate a graph invariant
    /// (e.g. a self-loop).
    InvalidGraphOperation {
        /// Description of the violation.
        reason: String,
    },

    /// A permutation supplied to `reorder` was not a bijection on
    /// `0..size_vertex`.
    InvalidPermutation {
        /// Description of why the permutation was rejected.
        reason: String,
    },

    /// A subgraph was asked to perform an operation against a parent graph
    /// other than the one it was built from (structural checksum mismatch).
    SubgraphParentMismatch,

    /// Caller-supplied configuration was out of the solver's valid range
    /// (e.g. `omega <= 0`).
    InvalidConfig {
        /// Description of the invalid field.
        message: String,
    },

    /// Serialization/deserialization error.
    #[cfg(feature = "serde")]
    SerializationError {
        /// Error message from serialization.
        message: String,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::IndexOutOfBounds { index, bound, context } => {
                write!(f, "index {} out of bounds in {}: valid range is [0, {})", index, context, bound)
            }
            SolverError::DimensionMismatch { expected, actual, operation } => {
                write!(f, "dimension mismatch in {}: expected {}, got {}", operation, expected, actual)
            }
            SolverError::InvalidSparseMatrix { reason, row } => match row {
                Some(r) => write!(f, "invalid sparse matrix at row {}: {}", r, reason),
                None => write!(f, "invalid sparse matrix: {}", reason),
            },
            SolverError::InvalidGraphOperation { reason } => {
                write!(f, "invalid graph operation: {}", reason)
            }
            SolverError::InvalidPermutation { reason } => {
                write!(f, "invalid permutation: {}", reason)
            }
            SolverError::SubgraphParentMismatch => {
                write!(f, "subgraph operation attempted against a non-owning parent graph")
            }
            SolverError::InvalidConfig { message } => {
                write!(f, "invalid solver configuration: {}", message)
            }
            #[cfg(feature = "serde")]
            SolverError::SerializationError { message } => {
                write!(f, "serialization error: {}", message)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SolverError {}
