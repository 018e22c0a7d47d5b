//! Named sets of mesh entities bound to a conforming mesh.
//!
//! Vertex and element sets hold plain vertex/element indices. Edge and face
//! sets hold indices into the edge → vertex and face → vertex tables that an
//! [`EntitySets`] keeps alongside the sets, so they are only meaningful for
//! the mesh numbering those tables were taken from. Whenever the mesh
//! renumbers its edges or faces (refinement) the sets must be remapped, see
//! [`EntitySets::quad_uniform_refinement`] and
//! [`EntitySets::hex_uniform_refinement`].

use std::io::Write;

use crate::debug_invariants::DebugInvariants;
use crate::mesh::{MeshTopology, NcMeshTopology};
use crate::mesh_error::MeshError;
use crate::sets::named::NamedSets;
use crate::sets::nc_entity_sets::NcEntitySets;
use crate::topology::entity::EntityKind;
use crate::topology::table::Table;

/// Named vertex, edge, face and element sets of one mesh.
///
/// `Clone` is a deep copy, including the derived connectivity tables.
#[derive(Clone, Debug)]
pub struct EntitySets {
    pub(crate) dim: usize,
    pub(crate) num_vertices: usize,
    pub(crate) num_edges: usize,
    pub(crate) num_elements: usize,
    pub(crate) kinds: [NamedSets<usize>; 4],
    pub(crate) edge_vertex: Option<Table>,
    pub(crate) face_vertex: Option<Table>,
    pub(crate) face_edge: Option<Table>,
}

/// Clone the mesh's cached table, or take ownership of it when the mesh has
/// none cached.
fn adopt_table<M: MeshTopology>(
    mesh: &mut M,
    cached: fn(&M) -> Option<&Table>,
    take: fn(&mut M) -> Result<Table, MeshError>,
    what: &str,
) -> Result<Table, MeshError> {
    if let Some(t) = cached(mesh) {
        return Ok(t.clone());
    }
    log::debug!("taking ownership of the mesh's {what} table");
    take(mesh)
}

impl EntitySets {
    /// Empty sets for `mesh`.
    pub fn new<M: MeshTopology>(mesh: &M) -> Self {
        Self {
            dim: mesh.dimension(),
            num_vertices: mesh.num_vertices(),
            num_edges: mesh.num_edges(),
            num_elements: mesh.num_elements(),
            kinds: Default::default(),
            edge_vertex: None,
            face_vertex: None,
            face_edge: None,
        }
    }

    /// Project non-conforming sets onto the current leaf mesh.
    ///
    /// Vertex sets are copied. Each edge, face and element of `nc_sets` is
    /// replaced by all of its leaf descendants in `mesh`, as reported by
    /// `ncmesh`.
    pub fn from_nc<M, N>(mesh: &mut M, ncmesh: &N, nc_sets: &NcEntitySets) -> Result<Self, MeshError>
    where
        M: MeshTopology,
        N: NcMeshTopology,
    {
        let mut sets = Self::new(mesh);
        for kind in EntityKind::ALL {
            for s in 0..nc_sets.num_sets(kind) {
                let mut members = Vec::new();
                for i in 0..nc_sets.num_entities(kind, s) {
                    let inds = nc_sets.entity(kind, s, i);
                    let vertex = |k: usize| {
                        inds.get(k).copied().flatten().ok_or_else(|| {
                            MeshError::Invariant(format!(
                                "{kind} {i} of set {s} lacks vertex slot {k}"
                            ))
                        })
                    };
                    match kind {
                        EntityKind::Vertex => members.push(vertex(0)?),
                        EntityKind::Edge => {
                            members.extend(ncmesh.refined_edges(vertex(0)?, vertex(1)?));
                        }
                        EntityKind::Face => {
                            let v3 = inds.get(3).copied().flatten();
                            members.extend(ncmesh.refined_faces(
                                vertex(0)?,
                                vertex(1)?,
                                vertex(2)?,
                                v3,
                            ));
                        }
                        EntityKind::Element => {
                            members.extend(ncmesh.refined_elements(vertex(0)?));
                        }
                    }
                }
                sets.kinds[kind.index()].push(nc_sets.set_name(kind, s), members);
            }
        }
        sets.copy_mesh_tables(mesh)?;
        Ok(sets)
    }

    /// Dimension of the mesh the sets were created for.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn num_sets(&self, kind: EntityKind) -> usize {
        self.kinds[kind.index()].len()
    }

    /// Name of set `s`.
    ///
    /// # Panics
    /// Panics if `s >= self.num_sets(kind)`.
    pub fn set_name(&self, kind: EntityKind, s: usize) -> &str {
        self.kinds[kind.index()].name(s)
    }

    /// Position of the set called `name`.
    pub fn set_index(&self, kind: EntityKind, name: &str) -> Result<usize, MeshError> {
        self.kinds[kind.index()]
            .index_of(name)
            .ok_or_else(|| MeshError::UnknownSetName {
                kind,
                name: name.to_string(),
            })
    }

    /// Number of entities in set `s`.
    ///
    /// # Panics
    /// Panics if `s >= self.num_sets(kind)`.
    pub fn num_entities(&self, kind: EntityKind, s: usize) -> usize {
        self.set(kind, s).len()
    }

    pub fn num_entities_by_name(&self, kind: EntityKind, name: &str) -> Result<usize, MeshError> {
        Ok(self.num_entities(kind, self.set_index(kind, name)?))
    }

    /// Entity `i` of set `s`.
    ///
    /// # Panics
    /// Panics if `s` or `i` is out of range.
    pub fn entity_index(&self, kind: EntityKind, s: usize, i: usize) -> usize {
        self.set(kind, s)[i]
    }

    pub fn entity_index_by_name(
        &self,
        kind: EntityKind,
        name: &str,
        i: usize,
    ) -> Result<usize, MeshError> {
        let s = self.set_index(kind, name)?;
        self.set(kind, s)
            .get(i)
            .copied()
            .ok_or(MeshError::RowOutOfRange {
                row: i,
                rows: self.num_entities(kind, s),
            })
    }

    /// Members of set `s`.
    pub fn set(&self, kind: EntityKind, s: usize) -> &[usize] {
        self.kinds[kind.index()].members(s)
    }

    /// Mutable members of set `s`.
    pub fn set_mut(&mut self, kind: EntityKind, s: usize) -> &mut Vec<usize> {
        self.kinds[kind.index()].members_mut(s)
    }

    /// `(name, members)` of every set of `kind`.
    pub fn sets(&self, kind: EntityKind) -> impl Iterator<Item = (&str, &[usize])> + '_ {
        self.kinds[kind.index()].iter()
    }

    /// Append a named set; returns its position.
    ///
    /// Edge and face members are indices in the mesh's current numbering;
    /// call [`EntitySets::copy_mesh_tables`] afterwards so the matching
    /// connectivity is kept.
    pub fn add_set(&mut self, kind: EntityKind, name: impl Into<String>, members: Vec<usize>) -> usize {
        self.kinds[kind.index()].push(name, members)
    }

    /// Remove every set.
    pub fn clear(&mut self) {
        for sets in &mut self.kinds {
            sets.clear();
        }
    }

    pub fn edge_vertex_table(&self) -> Option<&Table> {
        self.edge_vertex.as_ref()
    }

    pub fn face_vertex_table(&self) -> Option<&Table> {
        self.face_vertex.as_ref()
    }

    pub fn face_edge_table(&self) -> Option<&Table> {
        self.face_edge.as_ref()
    }

    /// Refresh the derived tables and the recorded entity counts from `mesh`.
    ///
    /// The edge → vertex table is kept only when there are edge sets, the
    /// face tables only when there are face sets; a kind without sets drops
    /// its tables. A table the mesh caches is cloned; otherwise the mesh
    /// builds it and hands it over.
    pub fn copy_mesh_tables<M: MeshTopology>(&mut self, mesh: &mut M) -> Result<(), MeshError> {
        self.edge_vertex = if self.num_sets(EntityKind::Edge) > 0 {
            Some(adopt_table(
                mesh,
                M::edge_vertex_table,
                M::take_edge_vertex_table,
                "edge-vertex",
            )?)
        } else {
            None
        };
        if self.num_sets(EntityKind::Face) > 0 {
            self.face_vertex = Some(adopt_table(
                mesh,
                M::face_vertex_table,
                M::take_face_vertex_table,
                "face-vertex",
            )?);
            self.face_edge = Some(adopt_table(
                mesh,
                M::face_edge_table,
                M::take_face_edge_table,
                "face-edge",
            )?);
        } else {
            self.face_vertex = None;
            self.face_edge = None;
        }
        self.dim = mesh.dimension();
        self.num_vertices = mesh.num_vertices();
        self.num_edges = mesh.num_edges();
        self.num_elements = mesh.num_elements();
        self.debug_assert_invariants();
        Ok(())
    }

    /// Summary of all sets: index, size and name, grouped by kind.
    pub fn print_set_info<W: Write>(&self, out: &mut W) -> Result<(), MeshError> {
        if EntityKind::ALL.iter().any(|&k| self.num_sets(k) > 0) {
            write!(out, "\nMFEM Entity Sets:\n")?;
        }
        for kind in EntityKind::ALL {
            if self.num_sets(kind) == 0 {
                continue;
            }
            writeln!(out, "  {kind} Sets (Index, Size, Set Name):")?;
            for (s, (name, members)) in self.sets(kind).enumerate() {
                writeln!(out, "\t{s}\t{}\t{name}", members.len())?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl DebugInvariants for EntitySets {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        let check = |kind: EntityKind, bound: Option<usize>| -> Result<(), MeshError> {
            let Some(bound) = bound else {
                return Ok(());
            };
            for (name, members) in self.sets(kind) {
                if let Some(&bad) = members.iter().find(|&&m| m >= bound) {
                    return Err(MeshError::Invariant(format!(
                        "{kind} set `{name}` holds index {bad}, limit is {bound}"
                    )));
                }
            }
            Ok(())
        };
        check(EntityKind::Vertex, Some(self.num_vertices))?;
        check(EntityKind::Element, Some(self.num_elements))?;
        check(EntityKind::Edge, self.edge_vertex.as_ref().map(Table::len))?;
        check(EntityKind::Face, self.face_vertex.as_ref().map(Table::len))?;
        for t in [&self.edge_vertex, &self.face_vertex, &self.face_edge]
            .into_iter()
            .flatten()
        {
            t.validate_invariants()?;
        }
        Ok(())
    }
}
