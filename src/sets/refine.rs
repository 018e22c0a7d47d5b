//! Remapping of entity sets across uniform refinement.
//!
//! Both entry points run *after* the mesh itself was refined. The sets still
//! hold coarse indices and the tables copied from the coarse mesh, while the
//! recorded counts are the coarse ones; together with the refined mesh's
//! lookup tables that is enough to find every child entity:
//!
//! - the midpoint of coarse edge `e` is refined vertex `NV + e`,
//! - the center of coarse face `f` is refined vertex `NV + NE + f`,
//! - coarse element `i` keeps index `i` for its first child, the others are
//!   `NEL + (k - 1) i + m` for `k` children.

use crate::mesh::MeshTopology;
use crate::mesh_error::MeshError;
use crate::sets::entity_sets::EntitySets;
use crate::topology::dstable::DSTable;
use crate::topology::entity::EntityKind;
use crate::topology::face_table::FaceTable;

fn child_edge(v_to_v: &DSTable, v: usize, mid: usize) -> Result<usize, MeshError> {
    v_to_v.get(v, mid).ok_or_else(|| MeshError::UnknownEntity {
        kind: EntityKind::Edge,
        vertices: vec![v, mid],
    })
}

/// Child of a coarse quad face touching corner `v0`: the face through `v0`,
/// two of the edge midpoints and the face center.
fn child_face(
    faces: &FaceTable,
    v0: usize,
    mids: &[usize],
    center: usize,
) -> Result<usize, MeshError> {
    let n = mids.len();
    for k in 0..n {
        for l in 1..n {
            if let Some(f) = faces.get4(v0, mids[k], mids[(k + l) % n], center) {
                return Ok(f);
            }
        }
    }
    Err(MeshError::UnknownEntity {
        kind: EntityKind::Face,
        vertices: vec![v0, center],
    })
}

impl EntitySets {
    /// Remap the sets after `mesh` (all quadrilaterals) was uniformly refined.
    ///
    /// Vertex sets are unchanged. Each edge becomes its two halves: entry `i`
    /// of an `n`-edge set is replaced by the half touching the edge's first
    /// vertex and entry `n + i` holds the other half. Element sets grow to
    /// `4n`, children of entry `i` stored at `n + 3i ..= n + 3i + 2`.
    pub fn quad_uniform_refinement<M: MeshTopology>(&mut self, mesh: &mut M) -> Result<(), MeshError> {
        if self.num_sets(EntityKind::Edge) > 0 {
            let v_to_v = mesh.vertex_to_vertex_table()?;
            self.refine_edge_sets(&v_to_v)?;
        }
        self.refine_element_sets(4);
        self.copy_mesh_tables(mesh)
    }

    /// Remap the sets after `mesh` (all hexahedra) was uniformly refined.
    ///
    /// Edges and elements are remapped as in
    /// [`EntitySets::quad_uniform_refinement`], elements with 8 children.
    /// Each quad face becomes four: the child touching the face's first
    /// vertex replaces entry `i`, the children at vertices 1, 2 and 3 go to
    /// `n + 3i ..= n + 3i + 2`.
    pub fn hex_uniform_refinement<M: MeshTopology>(&mut self, mesh: &mut M) -> Result<(), MeshError> {
        if self.num_sets(EntityKind::Edge) > 0 {
            let v_to_v = mesh.vertex_to_vertex_table()?;
            self.refine_edge_sets(&v_to_v)?;
        }
        if self.num_sets(EntityKind::Face) > 0 {
            let faces = mesh.faces_table()?;
            self.refine_face_sets(&faces)?;
        }
        self.refine_element_sets(8);
        self.copy_mesh_tables(mesh)
    }

    fn refine_edge_sets(&mut self, v_to_v: &DSTable) -> Result<(), MeshError> {
        let oedge = self.num_vertices;
        let edge_vertex = self
            .edge_vertex
            .as_ref()
            .ok_or(MeshError::MissingTable("edge-vertex"))?;
        for set in self.kinds[EntityKind::Edge.index()].sets_mut() {
            let n = set.len();
            log::trace!("splitting {n} edges into {}", 2 * n);
            set.resize(2 * n, 0);
            for i in 0..n {
                let old = set[i];
                let v = edge_vertex.row(old);
                set[i] = child_edge(v_to_v, v[0], oedge + old)?;
                set[i + n] = child_edge(v_to_v, v[1], oedge + old)?;
            }
        }
        Ok(())
    }

    fn refine_face_sets(&mut self, faces: &FaceTable) -> Result<(), MeshError> {
        let oedge = self.num_vertices;
        let oface = oedge + self.num_edges;
        let (Some(face_vertex), Some(face_edge)) = (&self.face_vertex, &self.face_edge) else {
            return Err(MeshError::MissingTable("face-vertex/face-edge"));
        };
        for set in self.kinds[EntityKind::Face.index()].sets_mut() {
            let n = set.len();
            log::trace!("splitting {n} faces into {}", 4 * n);
            set.resize(4 * n, 0);
            for i in 0..n {
                let old = set[i];
                let corners = face_vertex.row(old);
                if corners.len() != 4 {
                    return Err(MeshError::UnsupportedMesh(format!(
                        "face {old} has {} vertices, uniform hex refinement needs quads",
                        corners.len()
                    )));
                }
                let mids: Vec<usize> = face_edge.row(old).iter().map(|&e| oedge + e).collect();
                let center = oface + old;
                for (j, &v0) in corners.iter().enumerate() {
                    let child = child_face(faces, v0, &mids, center)?;
                    if j == 0 {
                        set[i] = child;
                    } else {
                        set[n + 3 * i + j - 1] = child;
                    }
                }
            }
        }
        Ok(())
    }

    fn refine_element_sets(&mut self, children: usize) {
        let oelem = self.num_elements;
        let extra = children - 1;
        log::debug!("remapping element sets for a 1:{children} split of {oelem} elements");
        for set in self.kinds[EntityKind::Element.index()].sets_mut() {
            let n = set.len();
            set.resize(children * n, 0);
            for i in 0..n {
                let first = oelem + extra * set[i];
                for m in 0..extra {
                    set[n + extra * i + m] = first + m;
                }
            }
        }
    }
}
