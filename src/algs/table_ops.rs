//! Graph operations on incidence tables: transpose and Boolean product.
//
// Both work on the CSR arrays directly and run in O(nnz) (transpose) or
// O(sum over A-entries of the matching B-row length) (product).

use crate::mesh_error::MeshError;
use crate::topology::table::Table;

/// Transpose `a` into a new table. `ncols` defaults to `a.width()`.
pub fn transpose(a: &Table, ncols: Option<usize>) -> Result<Table, MeshError> {
    let mut at = Table::new();
    transpose_into(a, &mut at, ncols)?;
    Ok(at)
}

/// Transpose `a` into `at`, reusing `at`'s storage when the sizes match.
///
/// Counting sort: column occurrences are counted one slot to the right, a
/// prefix sum turns them into row starts, and the row starts serve as write
/// cursors for the scatter before being shifted back.
pub fn transpose_into(a: &Table, at: &mut Table, ncols: Option<usize>) -> Result<(), MeshError> {
    let width = a.width();
    let ncols = ncols.unwrap_or(width);
    if width > ncols {
        return Err(MeshError::InvalidLayout(format!(
            "column {} does not fit in {ncols} transposed rows",
            width - 1
        )));
    }
    let nnz: usize = a.iter().map(|(_, r)| r.len()).sum();

    at.set_dims(ncols, nnz);
    let (i_at, j_at) = at.raw_parts_mut();

    i_at.fill(0);
    for (_, row) in a.iter() {
        for &c in row {
            i_at[c + 1] += 1;
        }
    }
    for i in 1..ncols {
        i_at[i + 1] += i_at[i];
    }

    for (i, row) in a.iter() {
        for &c in row {
            j_at[i_at[c]] = i;
            i_at[c] += 1;
        }
    }
    for i in (1..=ncols).rev() {
        i_at[i] = i_at[i - 1];
    }
    i_at[0] = 0;
    Ok(())
}

/// Transpose a one-entry-per-row labelling: row `p` of the result lists every
/// `i` with `a[i] == p`, in increasing order. `ncols` defaults to `max(a) + 1`.
pub fn transpose_array(a: &[usize], ncols: Option<usize>) -> Result<Table, MeshError> {
    let width = a.iter().max().map_or(0, |&m| m + 1);
    let ncols = ncols.unwrap_or(width);
    if width > ncols {
        return Err(MeshError::InvalidLayout(format!(
            "label {} does not fit in {ncols} transposed rows",
            width - 1
        )));
    }
    let mut at = Table::new();
    at.make_i(ncols);
    for &p in a {
        at.add_a_column_in_row(p);
    }
    at.make_j();
    for (i, &p) in a.iter().enumerate() {
        at.add_connection(p, i);
    }
    at.shift_up_i();
    Ok(at)
}

/// Boolean product pattern `C = A · B`.
pub fn mult(a: &Table, b: &Table) -> Result<Table, MeshError> {
    let mut c = Table::new();
    mult_into(a, b, &mut c)?;
    Ok(c)
}

/// Boolean product pattern into `c`.
///
/// Row `i` of `c` is the union of `b.row(j)` over `j` in `a.row(i)`, in the
/// order columns are first reached. Every column of `a` must be a row of `b`.
pub fn mult_into(a: &Table, b: &Table, c: &mut Table) -> Result<(), MeshError> {
    let cols_a = a.width();
    let rows_b = b.len();
    if cols_a > rows_b {
        return Err(MeshError::ShapeMismatch { cols_a, rows_b });
    }
    let cols_b = b.width();
    let nrows = a.len();

    // marker[m] == Some(i) once column m has been emitted for row i
    let mut marker: Vec<Option<usize>> = vec![None; cols_b];
    let mut counter = 0;
    for (i, row) in a.iter() {
        for &k in row {
            for &m in b.row(k) {
                if marker[m] != Some(i) {
                    marker[m] = Some(i);
                    counter += 1;
                }
            }
        }
    }

    c.set_dims(nrows, counter);
    marker.fill(None);
    let (i_c, j_c) = c.raw_parts_mut();
    counter = 0;
    for (i, row) in a.iter() {
        i_c[i] = counter;
        for &k in row {
            for &m in b.row(k) {
                if marker[m] != Some(i) {
                    marker[m] = Some(i);
                    j_c[counter] = m;
                    counter += 1;
                }
            }
        }
    }
    Ok(())
}
