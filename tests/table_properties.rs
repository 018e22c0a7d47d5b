use std::collections::BTreeSet;

use mesh_entsets::algs::table_ops::{mult, transpose, transpose_array};
use mesh_entsets::debug_invariants::DebugInvariants;
use mesh_entsets::topology::{dstable::DSTable, stable::STable, table::Table};
use proptest::prelude::*;

fn rows_strategy(max_col: usize) -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0..max_col, 0..6), 0..12)
}

proptest! {
    #[test]
    fn two_phase_build_keeps_rows(rows in rows_strategy(20)) {
        let t = Table::from_rows(&rows);
        prop_assert!(t.validate_invariants().is_ok());
        prop_assert_eq!(t.len(), rows.len());
        prop_assert_eq!(t.nnz(), rows.iter().map(Vec::len).sum::<usize>());
        for (i, r) in rows.iter().enumerate() {
            prop_assert_eq!(t.row(i), r.as_slice());
        }
    }

    #[test]
    fn shift_up_restores_offsets_after_make_j(rows in rows_strategy(20)) {
        let mut t = Table::new();
        t.make_i(rows.len());
        for (i, r) in rows.iter().enumerate() {
            for _ in r {
                t.add_a_column_in_row(i);
            }
        }
        t.make_j();
        let starts = t.offsets().to_vec();
        // fill rows back to front so cursors advance out of order
        for (i, r) in rows.iter().enumerate().rev() {
            for &c in r {
                t.add_connection(i, c);
            }
        }
        t.shift_up_i();
        prop_assert_eq!(t.offsets(), starts.as_slice());
        for (i, r) in rows.iter().enumerate() {
            prop_assert_eq!(t.row(i), r.as_slice());
        }
    }

    #[test]
    fn double_transpose_sorts_rows(rows in rows_strategy(15)) {
        let a = Table::from_rows(&rows);
        let at = transpose(&a, None).unwrap();
        prop_assert_eq!(at.nnz(), a.nnz());
        let att = transpose(&at, Some(a.len())).unwrap();
        for (i, r) in rows.iter().enumerate() {
            let mut sorted = r.clone();
            sorted.sort_unstable();
            prop_assert_eq!(att.row(i), sorted.as_slice());
        }
    }

    #[test]
    fn transpose_rows_are_increasing(rows in rows_strategy(15)) {
        let at = transpose(&Table::from_rows(&rows), Some(15)).unwrap();
        prop_assert_eq!(at.len(), 15);
        for (_, r) in at.iter() {
            prop_assert!(r.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn transpose_array_groups_labels(labels in prop::collection::vec(0usize..8, 0..30)) {
        let at = transpose_array(&labels, Some(8)).unwrap();
        for (p, r) in at.iter() {
            let want: Vec<usize> = (0..labels.len()).filter(|&i| labels[i] == p).collect();
            prop_assert_eq!(r, want.as_slice());
        }
    }

    #[test]
    fn mult_is_row_union(
        a_rows in rows_strategy(6),
        b_rows in prop::collection::vec(prop::collection::vec(0usize..10, 0..5), 6),
    ) {
        let a = Table::from_rows(&a_rows);
        let b = Table::from_rows(&b_rows);
        let c = mult(&a, &b).unwrap();
        prop_assert_eq!(c.len(), a.len());
        for (i, row) in a.iter() {
            let want: BTreeSet<usize> =
                row.iter().flat_map(|&k| b.row(k).iter().copied()).collect();
            let got: BTreeSet<usize> = c.row(i).iter().copied().collect();
            prop_assert_eq!(got.len(), c.row_size(i));
            prop_assert_eq!(got, want);
        }
    }

    #[test]
    fn preallocated_push_deduplicates(
        pushes in prop::collection::vec((0usize..4, 0usize..6), 0..40),
    ) {
        let mut t = Table::with_row_capacity(4, 6);
        let mut want = vec![Vec::new(); 4];
        for &(i, j) in &pushes {
            let slot = t.push(i, j).unwrap();
            prop_assert_eq!(t.get(i, j), Some(slot));
            if !want[i].contains(&j) {
                want[i].push(j);
            }
        }
        t.finalize();
        prop_assert!(t.is_packed());
        for (i, w) in want.iter().enumerate() {
            prop_assert_eq!(t.row(i), w.as_slice());
        }
    }

    #[test]
    fn stable_is_symmetric(pairs in prop::collection::vec((0usize..5, 0usize..5), 0..20)) {
        let mut t = STable::with_row_capacity(5, 5);
        for &(i, j) in &pairs {
            let slot = t.push(i, j).unwrap();
            prop_assert_eq!(t.push(j, i).unwrap(), slot);
            prop_assert_eq!(t.get(j, i), Some(slot));
        }
    }

    #[test]
    fn dstable_numbers_distinct_pairs(pairs in prop::collection::vec((0usize..8, 0usize..8), 0..40)) {
        let mut t = DSTable::new(8);
        let mut seen = BTreeSet::new();
        for &(a, b) in &pairs {
            let idx = t.push(a, b).unwrap();
            let fresh = seen.insert((a.min(b), a.max(b)));
            if fresh {
                prop_assert_eq!(idx, seen.len() - 1);
            }
            prop_assert_eq!(t.get(b, a), Some(idx));
        }
        prop_assert_eq!(t.num_entries(), seen.len());
        let mut indices: Vec<usize> = t.iter().map(|(_, _, i)| i).collect();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..seen.len()).collect::<Vec<_>>());
    }
}
