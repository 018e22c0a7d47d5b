//! Mesh interfaces consumed by the entity-set layer.
//!
//! [`MeshTopology`] is what a conforming mesh must expose so that named
//! entity sets can resolve vertex tuples to edge/face indices and back.
//! [`NcMeshTopology`] is the corresponding view of a non-conforming
//! (hierarchically refined) mesh. [`ConformingMesh`] is a small reference
//! implementation of the former.

pub mod conforming;

pub use conforming::{ConformingMesh, Element};

use crate::mesh_error::MeshError;
use crate::topology::dstable::DSTable;
use crate::topology::face_table::FaceTable;
use crate::topology::table::Table;

/// Connectivity queries of a conforming mesh.
///
/// Edge indices are the entry indices of [`MeshTopology::vertex_to_vertex_table`]
/// and face indices those of [`MeshTopology::faces_table`]; the derived
/// tables must agree with that numbering.
pub trait MeshTopology {
    /// Spatial/topological dimension of the elements.
    fn dimension(&self) -> usize;
    fn num_vertices(&self) -> usize;
    fn num_edges(&self) -> usize;
    fn num_faces(&self) -> usize;
    fn num_elements(&self) -> usize;

    /// Build the vertex-to-vertex table (one entry per edge).
    fn vertex_to_vertex_table(&self) -> Result<DSTable, MeshError>;
    /// Build the vertex-tuple → face lookup (empty below dimension 3).
    fn faces_table(&self) -> Result<FaceTable, MeshError>;

    /// Cached edge → vertex table, if the mesh holds one.
    fn edge_vertex_table(&self) -> Option<&Table>;
    /// Cached face → vertex table, if the mesh holds one.
    fn face_vertex_table(&self) -> Option<&Table>;
    /// Cached face → edge table, if the mesh holds one.
    fn face_edge_table(&self) -> Option<&Table>;

    /// Hand over the edge → vertex table, building it if needed. The mesh's
    /// cached copy is absent afterwards.
    fn take_edge_vertex_table(&mut self) -> Result<Table, MeshError>;
    /// Hand over the face → vertex table; see [`MeshTopology::take_edge_vertex_table`].
    fn take_face_vertex_table(&mut self) -> Result<Table, MeshError>;
    /// Hand over the face → edge table; see [`MeshTopology::take_edge_vertex_table`].
    fn take_face_edge_table(&mut self) -> Result<Table, MeshError>;
}

/// Queries of a non-conforming mesh used to carry entity sets across
/// local refinement.
///
/// Entities are addressed by the raw vertex (node) indices of the coarse
/// parent; the `refined_*` methods return indices of the leaf descendants in
/// the current conforming mesh.
pub trait NcMeshTopology {
    /// Id of the edge node joining `v0` and `v1`, if they share an edge.
    fn find_edge(&self, v0: usize, v1: usize) -> Option<usize>;
    /// Leaf edges descending from the edge `(v0, v1)`.
    fn refined_edges(&self, v0: usize, v1: usize) -> Vec<usize>;
    /// Leaf faces descending from the face `(v0, v1, v2[, v3])`.
    fn refined_faces(&self, v0: usize, v1: usize, v2: usize, v3: Option<usize>) -> Vec<usize>;
    /// Leaf elements descending from coarse element `elem`.
    fn refined_elements(&self, elem: usize) -> Vec<usize>;
}
