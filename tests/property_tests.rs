//! Property-based tests for CSR structural invariants and adjacency graph
//! reorder round-trips (§8).

use disa::graph::adjacency::AdjGraph;
use disa::matrix::csr::CsrMatrix;
use proptest::prelude::*;

fn arb_entries(max_dim: usize, max_entries: usize) -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
    prop::collection::vec((0..max_dim, 0..max_dim, -1000.0f64..1000.0), 0..max_entries)
}

proptest! {
    /// After any sequence of `set` calls, every row's stored columns are
    /// strictly ascending with no duplicates, and the last value written to
    /// a position is the one read back.
    #[test]
    fn csr_rows_stay_sorted_after_arbitrary_inserts(entries in arb_entries(12, 60)) {
        let mut a = CsrMatrix::with_shape(12, 12);
        let mut expected = std::collections::HashMap::new();
        for &(i, j, v) in &entries {
            a.set(i, j, v);
            expected.insert((i, j), v);
        }
        for row in a.rows() {
            let cols: Vec<usize> = row.elements().map(|e| e.column()).collect();
            let mut sorted = cols.clone();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(&cols, &sorted);
        }
        for (&(i, j), &v) in &expected {
            prop_assert_eq!(a.at(i, j).unwrap(), v);
        }
    }

    /// Inserting an entry then erasing it returns the matrix to having no
    /// stored entry at that position, without disturbing other rows.
    #[test]
    fn csr_insert_then_erase_is_identity(i in 0usize..8, j in 0usize..8, v in -100.0f64..100.0) {
        let mut a = CsrMatrix::with_shape(8, 8);
        let nnz_before = a.size_non_zero();
        a.insert(i, j, v);
        prop_assert!(a.contains(i, j));
        a.erase(i, j);
        prop_assert!(!a.contains(i, j));
        prop_assert_eq!(a.size_non_zero(), nnz_before);
    }

    /// `resize` to a strictly smaller column count never leaves a stored
    /// column `>= new_columns`, and never touches rows entirely below the
    /// cut.
    #[test]
    fn csr_resize_never_leaves_out_of_range_columns(entries in arb_entries(10, 40), new_columns in 0usize..10) {
        let mut a = CsrMatrix::with_shape(10, 10);
        for &(i, j, v) in &entries {
            a.set(i, j, v);
        }
        a.resize(10, new_columns);
        for row in a.rows() {
            for e in row.elements() {
                prop_assert!(e.column() < new_columns);
            }
        }
    }

    /// Reordering an undirected path graph by a permutation and then by its
    /// inverse restores the original edge set exactly.
    #[test]
    fn graph_reorder_round_trips_with_inverse(seed in 0usize..64, n in 2usize..12) {
        let edges: Vec<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();
        let g = AdjGraph::from_edges(&edges, false).unwrap();

        // A deterministic shuffle of `0..n`: rotate the reversed identity by
        // `seed`. Composing a bijection (reversal) with a cyclic rotation of
        // its image is itself a bijection, with no RNG crate needed.
        let rotate = seed % n;
        let reversed: Vec<usize> = (0..n).rev().collect();
        let pi: Vec<usize> = (0..n).map(|i| reversed[(i + rotate) % n]).collect();

        let reordered = g.reorder(&pi).unwrap();
        let mut inverse = vec![0usize; n];
        for (old, &new) in pi.iter().enumerate() {
            inverse[new] = old;
        }
        let restored = reordered.reorder(&inverse).unwrap();
        prop_assert_eq!(restored, g);
    }
}
