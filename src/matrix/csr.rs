//! Compressed-sparse-row matrix: the core data model (§3.1) and its
//! operations (§4.1-§4.3).

use crate::dense::vector::DenseVector;
use crate::error::{Result, SolverError};
use crate::matrix::view::{ElementView, RowView};
use crate::scalar::Precision;
use alloc::vec::Vec;

/// A `rows x columns` sparse matrix stored in compressed-sparse-row form.
///
/// Invariants maintained by every public operation: `row_offset` is
/// non-decreasing with `row_offset[0] == 0` and `row_offset[rows] ==
/// column_index.len() == value.len()`; within each row slice `column_index`
/// is strictly ascending and every entry lies in `[0, columns)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CsrMatrix {
    row_offset: Vec<usize>,
    column_index: Vec<usize>,
    value: Vec<Precision>,
    columns: usize,
}

impl CsrMatrix {
    /// An empty `0x0` matrix.
    pub fn empty() -> Self {
        CsrMatrix { row_offset: Vec::new(), column_index: Vec::new(), value: Vec::new(), columns: 0 }
    }

    /// A structurally empty `rows x columns` matrix (no stored entries).
    pub fn with_shape(rows: usize, columns: usize) -> Self {
        CsrMatrix { row_offset: alloc::vec![0; rows + 1], column_index: Vec::new(), value: Vec::new(), columns }
    }

    /// Builds a matrix from raw CSR arrays, validating and repairing row
    /// ordering. This is the sole constructor that accepts unsorted column
    /// indices within a row: each row's `(column, value)` pairs are sorted
    /// by column before being accepted, and duplicate columns within a row
    /// are rejected.
    pub fn from_raw(
        row_offset: Vec<usize>,
        mut column_index: Vec<usize>,
        mut value: Vec<Precision>,
        columns: usize,
    ) -> Result<Self> {
        if row_offset.is_empty() {
            return Err(SolverError::InvalidSparseMatrix { reason: "row_offset must have at least one entry".into(), row: None });
        }
        if row_offset[0] != 0 {
            return Err(SolverError::InvalidSparseMatrix { reason: "row_offset[0] must be 0".into(), row: None });
        }
        for w in row_offset.windows(2) {
            if w[1] < w[0] {
                return Err(SolverError::InvalidSparseMatrix { reason: "row_offset must be non-decreasing".into(), row: None });
            }
        }
        let nnz = *row_offset.last().unwrap();
        if column_index.len() != nnz || value.len() != nnz {
            return Err(SolverError::InvalidSparseMatrix {
                reason: "column_index/value length must equal row_offset.back()".into(),
                row: None,
            });
        }

        let rows = row_offset.len() - 1;
        for i in 0..rows {
            let (start, end) = (row_offset[i], row_offset[i + 1]);
            let mut pairs: Vec<(usize, Precision)> =
                column_index[start..end].iter().copied().zip(value[start..end].iter().copied()).collect();
            pairs.sort_by_key(|(c, _)| *c);
            for w in pairs.windows(2) {
                if w[0].0 == w[1].0 {
                    return Err(SolverError::InvalidSparseMatrix { reason: "duplicate column within a row".into(), row: Some(i) });
                }
            }
            for &(c, _) in &pairs {
                if c >= columns {
                    return Err(SolverError::InvalidSparseMatrix { reason: "column index out of range".into(), row: Some(i) });
                }
            }
            for (slot, (c, v)) in pairs.into_iter().enumerate() {
                column_index[start + slot] = c;
                value[start + slot] = v;
            }
        }

        Ok(CsrMatrix { row_offset, column_index, value, columns })
    }

    /// Number of rows.
    pub fn size_row(&self) -> usize {
        self.row_offset.len().saturating_sub(1)
    }

    /// Number of columns.
    pub fn size_column(&self) -> usize {
        self.columns
    }

    /// Number of stored (explicit) entries.
    pub fn size_non_zero(&self) -> usize {
        self.column_index.len()
    }

    /// True iff `row_offset.len() < 2`, i.e. there are no rows at all.
    pub fn is_empty(&self) -> bool {
        self.row_offset.len() < 2
    }

    /// Summary of the matrix's non-zero pattern.
    pub fn sparsity_info(&self) -> crate::types::SparsityInfo {
        crate::types::SparsityInfo::new(self.size_non_zero(), self.size_row(), self.size_column())
    }

    /// Current storage capacity for entries.
    pub fn capacity(&self) -> usize {
        self.column_index.capacity().min(self.value.capacity())
    }

    /// Reserves storage for at least `rows` rows and `nnz` entries.
    pub fn reserve(&mut self, rows: usize, nnz: usize) {
        if rows + 1 > self.row_offset.len() {
            self.row_offset.reserve(rows + 1 - self.row_offset.len());
        }
        self.column_index.reserve(nnz);
        self.value.reserve(nnz);
    }

    /// Releases excess capacity.
    pub fn shrink_to_fit(&mut self) {
        self.row_offset.shrink_to_fit();
        self.column_index.shrink_to_fit();
        self.value.shrink_to_fit();
    }

    /// Drops all rows and entries, keeping `columns` unchanged.
    pub fn clear(&mut self) {
        self.row_offset.clear();
        self.column_index.clear();
        self.value.clear();
    }

    /// Swaps the contents of two matrices.
    pub fn swap(&mut self, other: &mut CsrMatrix) {
        core::mem::swap(self, other);
    }

    /// Grows or shrinks the matrix to `new_rows x new_columns`.
    ///
    /// Growing rows extends `row_offset` with its last value (no new
    /// entries); growing columns only widens the valid range. Shrinking
    /// rows truncates storage at `row_offset[new_rows]`. Shrinking columns
    /// walks every surviving row, binary-searches for the first entry with
    /// `column >= new_columns`, and drops the tail, carrying a running
    /// offset decrement into subsequent rows so `row_offset` stays monotone.
    pub fn resize(&mut self, new_rows: usize, new_columns: usize) {
        let old_rows = self.size_row();

        if new_columns < self.columns {
            let mut carry = 0usize;
            for i in 0..old_rows {
                let start = self.row_offset[i];
                let end = self.row_offset[i + 1] - carry;
                let row_cols = &self.column_index[start..end];
                let cut = row_cols.partition_point(|&c| c < new_columns);
                let removed = (end - start) - cut;
                if removed > 0 {
                    self.column_index.drain(start + cut..end);
                    self.value.drain(start + cut..end);
                    carry += removed;
                }
                self.row_offset[i + 1] -= carry;
            }
        }
        self.columns = new_columns;

        if new_rows > old_rows {
            let last = *self.row_offset.last().unwrap_or(&0);
            self.row_offset.resize(new_rows + 1, last);
        } else if new_rows < old_rows {
            let cut = self.row_offset[new_rows];
            self.column_index.truncate(cut);
            self.value.truncate(cut);
            self.row_offset.truncate(new_rows + 1);
        }
    }

    fn grow_for(&mut self, i: usize, j: usize) {
        let new_rows = (i + 1).max(self.size_row());
        let new_cols = (j + 1).max(self.columns);
        if new_rows > self.size_row() || new_cols > self.columns {
            self.resize(new_rows, new_cols);
        }
    }

    /// Binary-searches row `i` for the first entry with `column >= j`.
    /// Returns the absolute position into `column_index`/`value`; the
    /// out-of-bounds sentinel is the end of the row (or the end of the
    /// matrix's storage, when `i >= rows`).
    pub fn lower_bound(&self, i: usize, j: usize) -> usize {
        if i >= self.size_row() {
            return self.column_index.len();
        }
        let (start, end) = (self.row_offset[i], self.row_offset[i + 1]);
        start + self.column_index[start..end].partition_point(|&c| c < j)
    }

    /// Finds the storage position of `(i, j)`, if present.
    pub fn find(&self, i: usize, j: usize) -> Option<usize> {
        if i >= self.size_row() || j >= self.columns {
            return None;
        }
        let pos = self.lower_bound(i, j);
        if pos < self.row_offset[i + 1] && self.column_index[pos] == j {
            Some(pos)
        } else {
            None
        }
    }

    /// True iff `(i, j)` is a stored entry.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.find(i, j).is_some()
    }

    /// Bounds-checked read. Absent entries within range read as `0.0`.
    pub fn at(&self, i: usize, j: usize) -> Result<Precision> {
        if i >= self.size_row() {
            return Err(SolverError::IndexOutOfBounds { index: i, bound: self.size_row(), context: "CsrMatrix::at row".into() });
        }
        if j >= self.columns {
            return Err(SolverError::IndexOutOfBounds { index: j, bound: self.columns, context: "CsrMatrix::at column".into() });
        }
        Ok(self.find(i, j).map_or(0.0, |pos| self.value[pos]))
    }

    /// Inserts `(i, j, v)`, growing the matrix if `i` or `j` is out of
    /// range. Returns the storage position and whether a new entry was
    /// created; if `(i, j)` was already present, the existing value is left
    /// untouched and `inserted` is `false`.
    pub fn insert(&mut self, i: usize, j: usize, v: Precision) -> (usize, bool) {
        self.grow_for(i, j);
        let pos = self.lower_bound(i, j);
        if pos < self.row_offset[i + 1] && self.column_index[pos] == j {
            return (pos, false);
        }
        self.column_index.insert(pos, j);
        self.value.insert(pos, v);
        for offset in self.row_offset[i + 1..].iter_mut() {
            *offset += 1;
        }
        (pos, true)
    }

    /// Inserts `(i, j, v)`, overwriting the value if already present.
    pub fn insert_or_assign(&mut self, i: usize, j: usize, v: Precision) -> usize {
        let (pos, inserted) = self.insert(i, j, v);
        if !inserted {
            self.value[pos] = v;
        }
        pos
    }

    /// Overflow-growing assignment: `matrix.set(i, j, v)` mirrors
    /// associative-container semantics, growing the matrix just enough to
    /// admit `(i, j)` before writing.
    pub fn set(&mut self, i: usize, j: usize, v: Precision) {
        self.insert_or_assign(i, j, v);
    }

    /// Removes the entry at `(i, j)` if present, returning whether anything
    /// was removed. Removing an absent entry is a programming error in
    /// debug builds.
    pub fn erase(&mut self, i: usize, j: usize) -> bool {
        match self.find(i, j) {
            Some(pos) => {
                self.column_index.remove(pos);
                self.value.remove(pos);
                for offset in self.row_offset[i + 1..].iter_mut() {
                    *offset -= 1;
                }
                true
            }
            None => {
                debug_assert!(false, "erase of absent entry ({}, {})", i, j);
                false
            }
        }
    }

    /// A read-only view of row `i`.
    pub fn row(&self, i: usize) -> RowView<'_> {
        let (start, end) = (self.row_offset[i], self.row_offset[i + 1]);
        RowView::new(i, &self.column_index[start..end], &self.value[start..end])
    }

    /// Iterates row views in row order.
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        (0..self.size_row()).map(move |i| self.row(i))
    }

    /// Iterates element views across the whole matrix, row-major.
    pub fn elements(&self) -> impl Iterator<Item = ElementView<'_>> {
        self.rows().flat_map(|r| r.elements())
    }

    /// Scales every stored value by `scalar` in place.
    pub fn scale_assign(&mut self, scalar: Precision) {
        for v in self.value.iter_mut() {
            *v *= scalar;
        }
    }

    /// Divides every stored value by `scalar` in place. Division by zero is
    /// not trapped.
    pub fn div_scalar_assign(&mut self, scalar: Precision) {
        for v in self.value.iter_mut() {
            *v /= scalar;
        }
    }

    /// `self += other`, merging sparsity patterns row by row with a
    /// two-finger merge over each pair of sorted column lists.
    pub fn add_assign(&mut self, other: &CsrMatrix) -> Result<()> {
        self.merge_assign(other, 1.0)
    }

    /// `self -= other`.
    pub fn sub_assign(&mut self, other: &CsrMatrix) -> Result<()> {
        self.merge_assign(other, -1.0)
    }

    fn merge_assign(&mut self, other: &CsrMatrix, sign: Precision) -> Result<()> {
        if self.size_row() != other.size_row() || self.columns != other.columns {
            return Err(SolverError::DimensionMismatch {
                expected: self.size_row(),
                actual: other.size_row(),
                operation: "CsrMatrix structural addition".into(),
            });
        }
        let rows = self.size_row();
        let mut new_offset = alloc::vec![0usize; rows + 1];
        let mut new_columns = Vec::new();
        let mut new_values = Vec::new();

        for i in 0..rows {
            let a = self.row(i);
            let b = other.row(i);
            let (mut ai, mut bi) = (a.elements(), b.elements());
            let mut a_next = ai.next();
            let mut b_next = bi.next();
            loop {
                match (a_next, b_next) {
                    (Some(ae), Some(be)) => {
                        if ae.column() < be.column() {
                            new_columns.push(ae.column());
                            new_values.push(ae.value());
                            a_next = ai.next();
                        } else if ae.column() > be.column() {
                            new_columns.push(be.column());
                            new_values.push(sign * be.value());
                            b_next = bi.next();
                        } else {
                            new_columns.push(ae.column());
                            new_values.push(ae.value() + sign * be.value());
                            a_next = ai.next();
                            b_next = bi.next();
                        }
                    }
                    (Some(ae), None) => {
                        new_columns.push(ae.column());
                        new_values.push(ae.value());
                        a_next = ai.next();
                    }
                    (None, Some(be)) => {
                        new_columns.push(be.column());
                        new_values.push(sign * be.value());
                        b_next = bi.next();
                    }
                    (None, None) => break,
                }
            }
            new_offset[i + 1] = new_columns.len();
        }

        self.row_offset = new_offset;
        self.column_index = new_columns;
        self.value = new_values;
        Ok(())
    }

    /// `self *= other`, via a sparse-accumulator: for each output row, a
    /// dense scratch vector of length `other.columns` plus a list of
    /// touched columns, so the work per output row is bounded by
    /// `nnz(self[i]) * max_j nnz(other[j])`.
    pub fn mul_assign(&mut self, other: &CsrMatrix) -> Result<()> {
        if self.columns != other.size_row() {
            return Err(SolverError::DimensionMismatch {
                expected: self.columns,
                actual: other.size_row(),
                operation: "CsrMatrix::mul_assign".into(),
            });
        }
        let out_cols = other.columns;
        let mut scratch = alloc::vec![0.0 as Precision; out_cols];
        let mut is_touched = alloc::vec![false; out_cols];
        let mut touched: Vec<usize> = Vec::new();

        let mut new_offset = alloc::vec![0usize; self.size_row() + 1];
        let mut new_columns = Vec::new();
        let mut new_values = Vec::new();

        for i in 0..self.size_row() {
            touched.clear();
            for a_elem in self.row(i).elements() {
                let a_val = a_elem.value();
                for b_elem in other.row(a_elem.column()).elements() {
                    if !is_touched[b_elem.column()] {
                        is_touched[b_elem.column()] = true;
                        touched.push(b_elem.column());
                    }
                    scratch[b_elem.column()] += a_val * b_elem.value();
                }
            }
            touched.sort_unstable();
            for &col in &touched {
                new_columns.push(col);
                new_values.push(scratch[col]);
                scratch[col] = 0.0;
                is_touched[col] = false;
            }
            new_offset[i + 1] = new_columns.len();
        }

        self.row_offset = new_offset;
        self.column_index = new_columns;
        self.value = new_values;
        self.columns = out_cols;
        Ok(())
    }

    /// Sparse matrix - dense vector product: `A * x`.
    pub fn mul_vector(&self, x: &DenseVector) -> Result<DenseVector> {
        if x.len() != self.columns {
            return Err(SolverError::DimensionMismatch {
                expected: self.columns,
                actual: x.len(),
                operation: "CsrMatrix::mul_vector".into(),
            });
        }
        let mut out = DenseVector::zeros(self.size_row());
        for (i, row) in self.rows().enumerate() {
            let mut acc = 0.0;
            for e in row.elements() {
                acc += e.value() * x[e.column()];
            }
            out[i] = acc;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_from_raw() {
        let a = CsrMatrix::from_raw(
            alloc::vec![0, 2, 5, 5, 7],
            alloc::vec![1, 3, 2, 0, 3, 4, 3],
            alloc::vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            5,
        )
        .unwrap();
        assert_eq!(a.size_row(), 4);
        assert_eq!(a.size_column(), 5);
        assert_eq!(a.size_non_zero(), 7);
        assert_eq!(a.at(0, 1).unwrap(), 1.0);
        assert_eq!(a.at(1, 0).unwrap(), 4.0);
        assert_eq!(a.at(3, 4).unwrap(), 6.0);
    }

    #[test]
    fn sparsity_info_matches_raw_counts() {
        let a = CsrMatrix::from_raw(
            alloc::vec![0, 2, 5, 5, 7],
            alloc::vec![1, 3, 2, 0, 3, 4, 3],
            alloc::vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            5,
        )
        .unwrap();
        let info = a.sparsity_info();
        assert_eq!(info.nnz, 7);
        assert_eq!(info.dimensions, (4, 5));
    }

    #[test]
    fn auto_growing_insert() {
        let mut a = CsrMatrix::empty();
        a.set(3, 2, 1.0);
        a.set(3, 1, 3.0);
        a.set(2, 1, 4.0);
        a.set(2, 4, 5.0);
        a.set(4, 0, 8.0);
        a.set(4, 4, -5.0);
        a.set(6, 2, 10.0);
        a.set(2, 6, 50.0);

        assert_eq!(a.size_row(), 7);
        assert_eq!(a.size_column(), 7);
        assert_eq!(a.size_non_zero(), 8);
        for row in a.rows() {
            let cols: Vec<usize> = row.elements().map(|e| e.column()).collect();
            let mut sorted = cols.clone();
            sorted.sort_unstable();
            assert_eq!(cols, sorted);
        }
    }

    #[test]
    fn sparse_dense_product() {
        let mut a = CsrMatrix::with_shape(3, 3);
        a.set(0, 1, 3.0);
        a.set(1, 0, -4.0);
        a.set(1, 2, 5.0);
        a.set(2, 1, -2.0);
        let x = DenseVector::from_vec(alloc::vec![-1.0, 2.0, 3.0]);
        let y = a.mul_vector(&x).unwrap();
        assert_eq!(y.as_slice(), &[6.0, 19.0, -4.0]);
    }

    #[test]
    fn insert_then_find_then_reinsert() {
        let mut a = CsrMatrix::with_shape(2, 2);
        let (pos, inserted) = a.insert(0, 0, 5.0);
        assert!(inserted);
        assert_eq!(a.find(0, 0), Some(pos));
        assert_eq!(a.size_non_zero(), 1);

        let (_, inserted_again) = a.insert(0, 0, 9.0);
        assert!(!inserted_again);
        assert_eq!(a.at(0, 0).unwrap(), 5.0);
    }

    #[test]
    fn addition_is_commutative_and_invertible() {
        let mut a = CsrMatrix::with_shape(2, 2);
        a.set(0, 0, 1.0);
        a.set(1, 1, 2.0);
        let mut b = CsrMatrix::with_shape(2, 2);
        b.set(0, 0, 3.0);
        b.set(0, 1, 4.0);

        let mut a_plus_b = a.clone();
        a_plus_b.add_assign(&b).unwrap();
        let mut b_plus_a = b.clone();
        b_plus_a.add_assign(&a).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(a_plus_b.at(i, j).unwrap(), b_plus_a.at(i, j).unwrap());
            }
        }

        let mut back = a_plus_b.clone();
        back.sub_assign(&b).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(back.at(i, j).unwrap(), a.at(i, j).unwrap());
            }
        }
    }

    #[test]
    fn identity_multiplication() {
        let mut a = CsrMatrix::with_shape(2, 2);
        a.set(0, 0, 1.0);
        a.set(0, 1, 2.0);
        a.set(1, 0, 3.0);
        a.set(1, 1, 4.0);
        let mut identity = CsrMatrix::with_shape(2, 2);
        identity.set(0, 0, 1.0);
        identity.set(1, 1, 1.0);

        let mut product = a.clone();
        product.mul_assign(&identity).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(product.at(i, j).unwrap(), a.at(i, j).unwrap());
            }
        }
    }

    #[test]
    fn resize_shrinks_columns_and_keeps_rows_monotone() {
        let mut a = CsrMatrix::with_shape(2, 5);
        a.set(0, 1, 1.0);
        a.set(0, 4, 2.0);
        a.set(1, 3, 3.0);
        a.resize(2, 3);
        assert_eq!(a.size_column(), 3);
        assert!(!a.contains(0, 4));
        assert!(a.contains(0, 1));
        assert!(!a.contains(1, 3));
    }

    #[test]
    fn erase_removes_entry_and_shifts_offsets() {
        let mut a = CsrMatrix::with_shape(2, 2);
        a.set(0, 0, 1.0);
        a.set(0, 1, 2.0);
        assert!(a.erase(0, 0));
        assert!(!a.contains(0, 0));
        assert!(a.contains(0, 1));
        assert_eq!(a.size_non_zero(), 1);
    }
}
