//! Symmetric pair table: `(i, j)` and `(j, i)` address the same slot.

use std::ops::Deref;

use crate::mesh_error::MeshError;
use crate::topology::table::Table;

/// A [`Table`] keyed by unordered pairs, stored as `(min, max)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct STable {
    table: Table,
}

impl STable {
    /// Preallocates `rows` rows of `conns_per_row` free slots each.
    pub fn with_row_capacity(rows: usize, conns_per_row: usize) -> Self {
        Self {
            table: Table::with_row_capacity(rows, conns_per_row),
        }
    }

    #[inline]
    fn order(i: usize, j: usize) -> (usize, usize) {
        if i < j { (i, j) } else { (j, i) }
    }

    /// Insert the pair `{i, j}`; returns its slot.
    pub fn push(&mut self, i: usize, j: usize) -> Result<usize, MeshError> {
        let (a, b) = Self::order(i, j);
        self.table.push(a, b)
    }

    /// Slot of the pair `{i, j}`, if present.
    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        let (a, b) = Self::order(i, j);
        self.table.get(a, b)
    }

    /// Drop unused preallocated slots.
    pub fn finalize(&mut self) {
        self.table.finalize();
    }

    /// Release the underlying table.
    pub fn into_table(self) -> Table {
        self.table
    }
}

impl Deref for STable {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.table
    }
}
