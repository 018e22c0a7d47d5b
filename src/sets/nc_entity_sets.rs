//! Entity sets recorded by vertex tuple, independent of edge/face numbering.
//!
//! A non-conforming mesh renumbers its leaf edges and faces on every
//! refinement, so edge and face sets are stored here by their coarse
//! vertices instead: 2 slots per edge, 4 per face (the last one `None` for a
//! triangle). Vertex and element sets keep one slot per entity. The flat
//! per-set storage is addressed in strides of [`EntityKind::nc_entity_size`].

use crate::mesh::NcMeshTopology;
use crate::mesh_error::MeshError;
use crate::sets::entity_sets::EntitySets;
use crate::sets::named::NamedSets;
use crate::topology::entity::EntityKind;

/// Vertex-tuple snapshot of an [`EntitySets`]; see the module docs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NcEntitySets {
    kinds: [NamedSets<Option<usize>>; 4],
}

impl NcEntitySets {
    /// Empty sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `sets` by vertex tuple.
    ///
    /// Quad faces are stored in cyclic order: the face → vertex table does not
    /// guarantee one, so if vertices 0 and 1 share no edge in `ncmesh` slots 1
    /// and 2 are swapped, otherwise if 0 and 3 share none slots 3 and 2 are.
    pub fn from_entity_sets<N: NcMeshTopology>(
        sets: &EntitySets,
        ncmesh: &N,
    ) -> Result<Self, MeshError> {
        let mut nc = Self::new();
        for kind in EntityKind::ALL {
            for (name, members) in sets.sets(kind) {
                let mut flat = Vec::with_capacity(kind.nc_entity_size() * members.len());
                match kind {
                    EntityKind::Vertex | EntityKind::Element => {
                        flat.extend(members.iter().map(|&m| Some(m)));
                    }
                    EntityKind::Edge => {
                        let ev = sets
                            .edge_vertex_table()
                            .ok_or(MeshError::MissingTable("edge-vertex"))?;
                        for &e in members {
                            let v = ev.row(e);
                            flat.extend([Some(v[0]), Some(v[1])]);
                        }
                    }
                    EntityKind::Face => {
                        let fv = sets
                            .face_vertex_table()
                            .ok_or(MeshError::MissingTable("face-vertex"))?;
                        for &f in members {
                            flat.extend(face_slots(fv.row(f), ncmesh)?);
                        }
                    }
                }
                nc.kinds[kind.index()].push(name, flat);
            }
        }
        log::debug!(
            "captured {} vertex, {} edge, {} face and {} element sets by vertex tuple",
            nc.num_sets(EntityKind::Vertex),
            nc.num_sets(EntityKind::Edge),
            nc.num_sets(EntityKind::Face),
            nc.num_sets(EntityKind::Element)
        );
        Ok(nc)
    }

    pub fn num_sets(&self, kind: EntityKind) -> usize {
        self.kinds[kind.index()].len()
    }

    /// Slots per entity of `kind`.
    pub fn entity_size(&self, kind: EntityKind) -> usize {
        kind.nc_entity_size()
    }

    /// # Panics
    /// Panics if `s >= self.num_sets(kind)`.
    pub fn set_name(&self, kind: EntityKind, s: usize) -> &str {
        self.kinds[kind.index()].name(s)
    }

    pub fn set_index(&self, kind: EntityKind, name: &str) -> Result<usize, MeshError> {
        self.kinds[kind.index()]
            .index_of(name)
            .ok_or_else(|| MeshError::UnknownSetName {
                kind,
                name: name.to_string(),
            })
    }

    /// Number of entities (not slots) in set `s`.
    pub fn num_entities(&self, kind: EntityKind, s: usize) -> usize {
        self.kinds[kind.index()].members(s).len() / kind.nc_entity_size()
    }

    pub fn num_entities_by_name(&self, kind: EntityKind, name: &str) -> Result<usize, MeshError> {
        Ok(self.num_entities(kind, self.set_index(kind, name)?))
    }

    /// Vertex slots of entity `i` in set `s`.
    ///
    /// # Panics
    /// Panics if `s` or `i` is out of range.
    pub fn entity(&self, kind: EntityKind, s: usize, i: usize) -> &[Option<usize>] {
        let size = kind.nc_entity_size();
        &self.kinds[kind.index()].members(s)[i * size..(i + 1) * size]
    }

    pub fn entity_by_name(
        &self,
        kind: EntityKind,
        name: &str,
        i: usize,
    ) -> Result<&[Option<usize>], MeshError> {
        let s = self.set_index(kind, name)?;
        let n = self.num_entities(kind, s);
        if i >= n {
            return Err(MeshError::RowOutOfRange { row: i, rows: n });
        }
        Ok(self.entity(kind, s, i))
    }
}

fn face_slots<N: NcMeshTopology>(v: &[usize], ncmesh: &N) -> Result<[Option<usize>; 4], MeshError> {
    match *v {
        [a, b, c] => Ok([Some(a), Some(b), Some(c), None]),
        [a, b, c, d] => {
            let mut slots = [a, b, c, d];
            if ncmesh.find_edge(a, b).is_none() {
                slots.swap(1, 2);
            } else if ncmesh.find_edge(a, d).is_none() {
                slots.swap(3, 2);
            }
            Ok(slots.map(Some))
        }
        _ => Err(MeshError::UnsupportedMesh(format!(
            "face with {} vertices",
            v.len()
        ))),
    }
}
