//! Small shared diagnostic types that don't belong to any one module.

use crate::scalar::Precision;

/// Summary statistics about a sparse matrix's non-zero pattern, useful for
/// reporting and for picking between solver strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparsityInfo {
    /// Total number of stored non-zero elements.
    pub nnz: usize,
    /// Matrix shape as `(rows, cols)`.
    pub dimensions: (usize, usize),
    /// `nnz / (rows * cols)`.
    pub sparsity_ratio: Precision,
    /// `nnz / rows`.
    pub avg_nnz_per_row: Precision,
}

impl SparsityInfo {
    /// Builds sparsity info from raw counts.
    pub fn new(nnz: usize, rows: usize, cols: usize) -> Self {
        let total = rows * cols;
        let sparsity_ratio = if total > 0 { nnz as Precision / total as Precision } else { 0.0 };
        let avg_nnz_per_row = if rows > 0 { nnz as Precision / rows as Precision } else { 0.0 };
        Self { nnz, dimensions: (rows, cols), sparsity_ratio, avg_nnz_per_row }
    }

    /// Fewer than 10% of entries are non-zero.
    pub fn is_sparse(&self) -> bool {
        self.sparsity_ratio < 0.1
    }

    /// Fewer than 1% of entries are non-zero.
    pub fn is_very_sparse(&self) -> bool {
        self.sparsity_ratio < 0.01
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn sparsity_ratio_and_classification() {
        let info = SparsityInfo::new(100, 1000, 1000);
        assert_eq!(info.sparsity_ratio, 0.0001);
        assert!(info.is_very_sparse());
        assert!(info.is_sparse());
        assert_eq!(info.avg_nnz_per_row, 0.1);
    }
}
