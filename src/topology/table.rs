//! CSR incidence table: row index → ordered list of column indices.
//!
//! A [`Table`] is filled in one of two ways:
//!
//! * **Preallocated.** [`Table::with_row_capacity`] reserves a fixed number of
//!   slots per row; [`Table::push`] inserts idempotently into the next free
//!   slot and [`Table::finalize`] squeezes out the slots that were never used.
//!   Each row keeps an explicit fill count, so unused slots never leak into
//!   queries.
//! * **Two-phase.** [`Table::make_i`] zeroes the row counters, the caller
//!   counts connections with [`Table::add_a_column_in_row`],
//!   [`Table::make_j`] turns counts into row offsets and allocates the column
//!   array, [`Table::add_connection`] fills it (advancing each row's offset as
//!   a write cursor) and [`Table::shift_up_i`] restores the row starts.
//!
//! ```rust
//! use mesh_entsets::topology::table::Table;
//! let mut t = Table::new();
//! t.make_i(2);
//! t.add_a_column_in_row(0);
//! t.add_a_column_in_row(1);
//! t.add_a_column_in_row(1);
//! t.make_j();
//! t.add_connection(1, 7);
//! t.add_connection(0, 3);
//! t.add_connection(1, 8);
//! t.shift_up_i();
//! assert_eq!(t.row(0), &[3]);
//! assert_eq!(t.row(1), &[7, 8]);
//! ```

use std::io::{Read, Write};

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;

/// Output settings for [`Table::print_with`].
#[derive(Clone, Copy, Debug)]
pub struct PrintOptions {
    /// Entries printed per line.
    pub width: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self { width: 4 }
    }
}

/// Compressed sparse row incidence table.
///
/// Deserialized tables go through the same layout checks as
/// [`Table::set_ij`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    /// Row offsets (`rows + 1` entries).
    offsets: Vec<usize>,
    /// Column storage (`offsets[rows]` entries).
    columns: Vec<usize>,
    /// Used slots per row while the table is preallocated; `None` once packed.
    fill: Option<Vec<usize>>,
}

/// Unchecked wire form of [`Table`].
#[derive(serde::Deserialize)]
struct RawTable {
    offsets: Vec<usize>,
    columns: Vec<usize>,
    fill: Option<Vec<usize>>,
}

impl TryFrom<RawTable> for Table {
    type Error = MeshError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let t = Table {
            offsets: raw.offsets,
            columns: raw.columns,
            fill: raw.fill,
        };
        t.validate_invariants()?;
        Ok(t)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self {
            offsets: vec![0],
            columns: Vec::new(),
            fill: None,
        }
    }
}

impl Table {
    /// Creates an empty table with zero rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocates `rows` rows of `conns_per_row` free slots each.
    pub fn with_row_capacity(rows: usize, conns_per_row: usize) -> Self {
        let mut t = Self::new();
        t.set_size(rows, conns_per_row);
        t
    }

    /// One connection per row: row `i` → `[partitioning[i]]`.
    pub fn from_partitioning(partitioning: &[usize]) -> Self {
        Self {
            offsets: (0..=partitioning.len()).collect(),
            columns: partitioning.to_vec(),
            fill: None,
        }
    }

    /// Packed table with the given rows, built with the two-phase protocol.
    pub fn from_rows<R>(rows: &[R]) -> Self
    where
        R: AsRef<[usize]>,
    {
        let mut t = Self::new();
        t.make_i(rows.len());
        for (i, r) in rows.iter().enumerate() {
            t.add_columns_in_row(i, r.as_ref().len());
        }
        t.make_j();
        for (i, r) in rows.iter().enumerate() {
            t.add_connections(i, r.as_ref());
        }
        t.shift_up_i();
        t
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of column slots (`offsets[rows]`), including unused
    /// preallocated slots.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.offsets[self.len()]
    }

    /// `true` once every slot holds a connection (no preallocated slack).
    pub fn is_packed(&self) -> bool {
        self.fill.is_none()
    }

    /// Raw row offsets.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Raw column storage. Unused preallocated slots hold stale values; use
    /// [`Table::row`] for queries.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Number of connections in row `i`.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn row_size(&self, i: usize) -> usize {
        match &self.fill {
            Some(fill) => fill[i],
            None => self.offsets[i + 1] - self.offsets[i],
        }
    }

    /// Connections of row `i`, in insertion order.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[usize] {
        let start = self.offsets[i];
        &self.columns[start..start + self.row_size(i)]
    }

    /// Mutable view of the connections of row `i`.
    pub fn row_mut(&mut self, i: usize) -> &mut [usize] {
        let start = self.offsets[i];
        let n = self.row_size(i);
        &mut self.columns[start..start + n]
    }

    /// Iterate `(row, connections)` over all rows.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        (0..self.len()).map(move |i| (i, self.row(i)))
    }

    /// Resize storage to `rows` rows and `nnz` slots.
    ///
    /// Offsets and columns are reallocated only when their size changes.
    /// Reused offsets are clamped to `nnz`, so the table stays a valid
    /// layout; callers are expected to rewrite every row start afterwards.
    pub fn set_dims(&mut self, rows: usize, nnz: usize) {
        if self.len() != rows {
            self.offsets = vec![0; rows + 1];
        }
        if self.columns.len() != nnz {
            self.columns = vec![0; nnz];
        }
        self.offsets[0] = 0;
        for off in self.offsets.iter_mut().take(rows).skip(1) {
            *off = (*off).min(nnz);
        }
        self.offsets[rows] = nnz;
        self.fill = None;
    }

    /// Re-initialize as a preallocated table with `conns_per_row` free slots
    /// per row.
    pub fn set_size(&mut self, rows: usize, conns_per_row: usize) {
        self.set_dims(rows, rows * conns_per_row);
        for (i, off) in self.offsets.iter_mut().enumerate() {
            *off = i * conns_per_row;
        }
        self.fill = Some(vec![0; rows]);
    }

    /// Adopt externally built CSR arrays.
    pub fn set_ij(&mut self, offsets: Vec<usize>, columns: Vec<usize>) -> Result<(), MeshError> {
        let candidate = Table {
            offsets,
            columns,
            fill: None,
        };
        candidate.validate_invariants()?;
        *self = candidate;
        Ok(())
    }

    /// Mutable `(offsets, columns)` for algorithms that fill a table directly.
    pub(crate) fn raw_parts_mut(&mut self) -> (&mut [usize], &mut [usize]) {
        (&mut self.offsets, &mut self.columns)
    }

    // ---------------------------------------------------------------------
    // two-phase build
    // ---------------------------------------------------------------------

    /// Start a two-phase build of `rows` rows with all counters at zero.
    pub fn make_i(&mut self, rows: usize) {
        self.set_dims(rows, 0);
        self.offsets.fill(0);
    }

    /// Count one more connection in row `r`.
    #[inline]
    pub fn add_a_column_in_row(&mut self, r: usize) {
        self.offsets[r] += 1;
    }

    /// Count `n` more connections in row `r`.
    #[inline]
    pub fn add_columns_in_row(&mut self, r: usize, n: usize) {
        self.offsets[r] += n;
    }

    /// Turn per-row counts into row offsets and allocate the column array.
    pub fn make_j(&mut self) {
        let rows = self.len();
        let mut k = 0;
        for off in &mut self.offsets[..rows] {
            let n = *off;
            *off = k;
            k += n;
        }
        self.offsets[rows] = k;
        self.columns = vec![0; k];
    }

    /// Append `c` at row `r`'s write cursor.
    #[inline]
    pub fn add_connection(&mut self, r: usize, c: usize) {
        let pos = self.offsets[r];
        debug_assert!(pos < self.offsets[self.len()], "row {r} overflows its count");
        self.columns[pos] = c;
        self.offsets[r] += 1;
    }

    /// Append all of `cs` at row `r`'s write cursor.
    pub fn add_connections(&mut self, r: usize, cs: &[usize]) {
        let pos = self.offsets[r];
        self.columns[pos..pos + cs.len()].copy_from_slice(cs);
        self.offsets[r] += cs.len();
    }

    /// Restore row starts after the fill pass advanced them.
    pub fn shift_up_i(&mut self) {
        let rows = self.len();
        for i in (1..=rows).rev() {
            self.offsets[i] = self.offsets[i - 1];
        }
        self.offsets[0] = 0;
    }

    // ---------------------------------------------------------------------
    // preallocated rows
    // ---------------------------------------------------------------------

    /// Insert column `j` into row `i` unless already present; returns the slot.
    ///
    /// Only tables that still have free preallocated slots accept new
    /// columns; a packed table behaves like a full one.
    pub fn push(&mut self, i: usize, j: usize) -> Result<usize, MeshError> {
        let rows = self.len();
        if i >= rows {
            return Err(MeshError::RowOutOfRange { row: i, rows });
        }
        let start = self.offsets[i];
        let end = self.offsets[i + 1];
        let used = self.row_size(i);
        if let Some(k) = self.columns[start..start + used].iter().position(|&c| c == j) {
            return Ok(start + k);
        }
        match &mut self.fill {
            Some(fill) if start + used < end => {
                self.columns[start + used] = j;
                fill[i] += 1;
                Ok(start + used)
            }
            _ => Err(MeshError::RowFull { row: i, column: j }),
        }
    }

    /// Slot holding `(i, j)`, or `None` when absent or `i` is out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        if i >= self.len() {
            return None;
        }
        let start = self.offsets[i];
        self.row(i).iter().position(|&c| c == j).map(|k| start + k)
    }

    /// Drop unused preallocated slots, keeping the order of each row.
    pub fn finalize(&mut self) {
        let Some(fill) = self.fill.take() else {
            return;
        };
        let rows = self.len();
        let used: usize = fill.iter().sum();
        if used == self.columns.len() {
            return;
        }
        let mut packed = Vec::with_capacity(used);
        for (i, &n) in fill.iter().enumerate() {
            let start = self.offsets[i];
            self.offsets[i] = packed.len();
            packed.extend_from_slice(&self.columns[start..start + n]);
        }
        self.offsets[rows] = used;
        self.columns = packed;
        self.debug_assert_invariants();
    }

    /// One more than the largest column index (the implied column count).
    pub fn width(&self) -> usize {
        self.iter()
            .flat_map(|(_, r)| r.iter())
            .max()
            .map_or(0, |&m| m + 1)
    }

    // ---------------------------------------------------------------------
    // text output
    // ---------------------------------------------------------------------

    /// Human-readable dump with default [`PrintOptions`].
    pub fn print<W: Write>(&self, out: &mut W) -> Result<(), MeshError> {
        self.print_with(out, &PrintOptions::default())
    }

    /// Human-readable dump: `[row i]` then the row's columns, `width` per line.
    pub fn print_with<W: Write>(&self, out: &mut W, opts: &PrintOptions) -> Result<(), MeshError> {
        let width = opts.width.max(1);
        for (i, row) in self.iter() {
            writeln!(out, "[row {i}]")?;
            for (k, c) in row.iter().enumerate() {
                write!(out, "{c:>5}")?;
                if (k + 1) % width == 0 {
                    writeln!(out)?;
                }
            }
            if row.len() % width != 0 {
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Write `rows`, the `rows + 1` offsets, then every column, one per line.
    ///
    /// Unused preallocated slots are skipped, so the output always describes
    /// the packed table.
    pub fn save<W: Write>(&self, out: &mut W) -> Result<(), MeshError> {
        writeln!(out, "{}", self.len())?;
        let mut off = 0;
        writeln!(out, "{off}")?;
        for (_, row) in self.iter() {
            off += row.len();
            writeln!(out, "{off}")?;
        }
        for (_, row) in self.iter() {
            for c in row {
                writeln!(out, "{c}")?;
            }
        }
        Ok(())
    }

    /// Read a table written by [`Table::save`].
    pub fn load<R: Read>(mut input: R) -> Result<Self, MeshError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        let mut tokens = text.split_whitespace().map(|tok| {
            tok.parse::<usize>()
                .map_err(|_| MeshError::EntitySetParse(format!("invalid table entry: {tok}")))
        });
        let mut next = |what: &str| {
            tokens
                .next()
                .unwrap_or_else(|| Err(MeshError::EntitySetParse(format!("missing {what}"))))
        };
        let rows = next("row count")?;
        let offsets = (0..=rows)
            .map(|_| next("row offset"))
            .collect::<Result<Vec<_>, _>>()?;
        let nnz = offsets[rows];
        let columns = (0..nnz)
            .map(|_| next("column index"))
            .collect::<Result<Vec<_>, _>>()?;
        let mut t = Table::new();
        t.set_ij(offsets, columns)?;
        Ok(t)
    }
}

impl DebugInvariants for Table {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        let Some(&first) = self.offsets.first() else {
            return Err(MeshError::InvalidLayout("empty offset array".into()));
        };
        if first != 0 {
            return Err(MeshError::InvalidLayout(format!(
                "offsets[0] = {first}, expected 0"
            )));
        }
        if let Some(i) = self.offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(MeshError::InvalidLayout(format!(
                "offsets decrease at row {i}"
            )));
        }
        if self.nnz() != self.columns.len() {
            return Err(MeshError::InvalidLayout(format!(
                "offsets end at {} but {} columns are stored",
                self.nnz(),
                self.columns.len()
            )));
        }
        if let Some(fill) = &self.fill {
            if fill.len() != self.len() {
                return Err(MeshError::Invariant(format!(
                    "{} fill counters for {} rows",
                    fill.len(),
                    self.len()
                )));
            }
            for (i, &n) in fill.iter().enumerate() {
                if n > self.offsets[i + 1] - self.offsets[i] {
                    return Err(MeshError::Invariant(format!(
                        "row {i} holds {n} entries beyond its capacity"
                    )));
                }
            }
        }
        Ok(())
    }
}
