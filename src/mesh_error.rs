//! MeshError: Unified error type for mesh-entsets public APIs
//!
//! Conditions that abort in classic mesh codes (a push into a full table row,
//! a malformed entity set file, a product of incompatible tables) are reported
//! here as recoverable errors instead.

use thiserror::Error;

use crate::topology::entity::EntityKind;

/// Unified error type for table and entity-set operations.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A row index was outside `0..rows`.
    #[error("row {row} out of range for table with {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },
    /// `push` found no free slot in a preallocated row.
    #[error("table row {row} is full; cannot insert column {column}")]
    RowFull { row: usize, column: usize },
    /// `mult(A, B)` requires every column of `A` to be a row of `B`.
    #[error("table shape mismatch: A has {cols_a} columns but B has {rows_b} rows")]
    ShapeMismatch { cols_a: usize, rows_b: usize },
    /// CSR arrays handed to a table do not describe a valid table.
    #[error("invalid CSR layout: {0}")]
    InvalidLayout(String),
    /// Malformed entity set or table text.
    #[error("entity set parse error: {0}")]
    EntitySetParse(String),
    /// Face geometry tag other than 2 (triangle) or 3 (quadrilateral).
    #[error("unknown face geometry type: {0}")]
    UnknownFaceGeometry(i64),
    /// A vertex tuple does not name an entity of the mesh.
    #[error("no {kind} with vertices {vertices:?} in mesh")]
    UnknownEntity {
        kind: EntityKind,
        vertices: Vec<usize>,
    },
    /// Set name lookup failed.
    #[error("unrecognized set name `{name}` for entity type {kind}")]
    UnknownSetName { kind: EntityKind, name: String },
    /// A derived connectivity table required by the operation is absent.
    #[error("missing {0} table")]
    MissingTable(&'static str),
    /// Mesh operation not supported for the element types present.
    #[error("unsupported mesh operation: {0}")]
    UnsupportedMesh(String),
    /// Data structure invariant violated.
    #[error("invariant violated: {0}")]
    Invariant(String),
    /// Underlying reader/writer failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
