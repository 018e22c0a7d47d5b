#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-entsets
//!
//! mesh-entsets provides sparse incidence tables for unstructured meshes and
//! named entity sets (vertex, edge, face and element groups) that survive
//! uniform and non-conforming refinement.
//!
//! ## Features
//! - [`Table`](crate::topology::table::Table): CSR row → column lists with a
//!   two-phase builder and a preallocated, idempotent `push`
//! - [`STable`](crate::topology::stable::STable) and
//!   [`DSTable`](crate::topology::dstable::DSTable): symmetric pair tables,
//!   the latter numbering pairs in first-seen order (mesh edges)
//! - [`transpose`](crate::algs::table_ops::transpose) and
//!   [`mult`](crate::algs::table_ops::mult) on incidence tables
//! - [`EntitySets`](crate::sets::EntitySets) with a text format, remapping
//!   across uniform quad/hex refinement, and
//!   [`NcEntitySets`](crate::sets::NcEntitySets) snapshots for
//!   non-conforming meshes
//!
//! ## Invariant checking
//! Tables and entity sets validate their invariants in debug builds. Enable
//! the `strict-invariants` (or `check-invariants`) feature to keep the checks
//! in release builds.

pub mod algs;
pub mod debug_invariants;
pub mod io;
pub mod mesh;
pub mod mesh_error;
pub mod sets;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::table_ops::{mult, transpose, transpose_array};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh::{ConformingMesh, Element, MeshTopology, NcMeshTopology};
    pub use crate::mesh_error::MeshError;
    pub use crate::sets::{EntitySets, NcEntitySets};
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::dstable::DSTable;
    pub use crate::topology::entity::EntityKind;
    pub use crate::topology::face_table::FaceTable;
    pub use crate::topology::stable::STable;
    pub use crate::topology::table::{PrintOptions, Table};
}
