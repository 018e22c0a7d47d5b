//! Dynamic symmetric table with first-seen sequential numbering.
//!
//! Each `(row, column)` pair gets a global index the first time it is pushed;
//! indices are handed out as `0, 1, 2, …` in push order. Mesh code relies on
//! this to number edges: building the vertex-to-vertex table from the element
//! list in a fixed order yields the same edge numbering every time.
//!
//! Rows are short in practice (a vertex touches a handful of edges), so a
//! row is a plain vector scanned linearly.

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Node {
    column: usize,
    index: usize,
}

/// Incrementally built pair table; see the module docs.
#[derive(Clone, Debug, Default)]
pub struct DSTable {
    rows: Vec<Vec<Node>>,
    num_entries: usize,
}

impl DSTable {
    /// Table with `num_rows` empty rows.
    pub fn new(num_rows: usize) -> Self {
        Self {
            rows: vec![Vec::new(); num_rows],
            num_entries: 0,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of distinct pairs pushed so far (also the next index).
    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    /// Find or insert `(r, c)` as given; returns the pair's index.
    pub fn push_(&mut self, r: usize, c: usize) -> Result<usize, MeshError> {
        let rows = self.rows.len();
        let row = self
            .rows
            .get_mut(r)
            .ok_or(MeshError::RowOutOfRange { row: r, rows })?;
        if let Some(n) = row.iter().find(|n| n.column == c) {
            return Ok(n.index);
        }
        let index = self.num_entries;
        row.push(Node { column: c, index });
        self.num_entries += 1;
        Ok(index)
    }

    /// Index of `(r, c)` as given.
    ///
    /// Unlike [`DSTable::push_`], a row past the end is not an error: the
    /// pair simply does not exist.
    pub fn index(&self, r: usize, c: usize) -> Option<usize> {
        self.rows
            .get(r)?
            .iter()
            .find(|n| n.column == c)
            .map(|n| n.index)
    }

    /// Symmetric insert: stores the pair as `(min, max)`.
    pub fn push(&mut self, a: usize, b: usize) -> Result<usize, MeshError> {
        if a <= b { self.push_(a, b) } else { self.push_(b, a) }
    }

    /// Symmetric lookup.
    pub fn get(&self, a: usize, b: usize) -> Option<usize> {
        if a <= b { self.index(a, b) } else { self.index(b, a) }
    }

    /// `(column, index)` entries of row `r` in insertion order; empty for a
    /// row past the end.
    pub fn row_iter(&self, r: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .get(r)
            .into_iter()
            .flat_map(|row| row.iter().map(|n| (n.column, n.index)))
    }

    /// All `(row, column, index)` triples, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().map(move |n| (r, n.column, n.index)))
    }
}

impl DebugInvariants for DSTable {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        let mut seen = vec![false; self.num_entries];
        for (r, c, idx) in self.iter() {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(MeshError::Invariant(format!(
                        "index {idx} assigned twice (at ({r}, {c}))"
                    )));
                }
                None => {
                    return Err(MeshError::Invariant(format!(
                        "index {idx} at ({r}, {c}) exceeds entry count {}",
                        self.num_entries
                    )));
                }
            }
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(MeshError::Invariant(format!("index {missing} never assigned")));
        }
        Ok(())
    }
}
