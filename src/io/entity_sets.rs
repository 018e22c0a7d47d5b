//! Reader and writer for the `MFEM sets v1.0` entity set format.
//!
//! ```text
//! MFEM sets v1.0
//!
//! dimension
//! 3
//!
//! vertex_sets
//! 1
//!
//! corner
//! 1
//! 0
//!
//! edge_sets
//! 0
//!
//! face_sets
//! 1
//!
//! bottom
//! 1
//! 3 0 1 3 2
//!
//! element_sets
//! 0
//! ```
//!
//! Blocks appear in the order vertex, edge (dimension > 1), face
//! (dimension > 2), element. Each block is its header, the number of sets,
//! then per set a name line, an entity count and the entities. Edges are
//! written as their two vertices, faces as a geometry tag (2 triangle,
//! 3 quadrilateral) followed by the vertices. Lines starting with `#` are
//! allowed before `dimension` and before each block header.

use std::io::{Read, Write};

use itertools::Itertools;

use crate::io::{ENTITY_SETS_MAGIC, TextCursor};
use crate::mesh::MeshTopology;
use crate::mesh_error::MeshError;
use crate::sets::entity_sets::EntitySets;
use crate::sets::named::NamedSets;
use crate::topology::cell_type::CellType;
use crate::topology::dstable::DSTable;
use crate::topology::entity::EntityKind;
use crate::topology::face_table::FaceTable;
use crate::topology::table::Table;

/// Lookups needed to turn vertex tuples back into edge/face indices.
#[derive(Default)]
struct Resolver {
    v_to_v: Option<DSTable>,
    faces: Option<FaceTable>,
}

impl Resolver {
    fn edge(&self, v0: usize, v1: usize) -> Result<usize, MeshError> {
        self.v_to_v
            .as_ref()
            .and_then(|t| t.get(v0, v1))
            .ok_or_else(|| MeshError::UnknownEntity {
                kind: EntityKind::Edge,
                vertices: vec![v0, v1],
            })
    }

    fn face(&self, vertices: &[usize]) -> Result<usize, MeshError> {
        self.faces
            .as_ref()
            .and_then(|t| t.get(vertices))
            .ok_or_else(|| MeshError::UnknownEntity {
                kind: EntityKind::Face,
                vertices: vertices.to_vec(),
            })
    }
}

fn read_block<M: MeshTopology>(
    cur: &mut TextCursor<'_>,
    mesh: &M,
    kind: EntityKind,
) -> Result<NamedSets<usize>, MeshError> {
    cur.skip_comment_lines('#');
    cur.expect(kind.header())?;
    let num_sets: usize = cur.parse("number of sets")?;

    let mut resolver = Resolver::default();
    if num_sets > 0 {
        match kind {
            EntityKind::Edge => resolver.v_to_v = Some(mesh.vertex_to_vertex_table()?),
            EntityKind::Face => resolver.faces = Some(mesh.faces_table()?),
            _ => {}
        }
    }

    let mut sets = NamedSets::default();
    for _ in 0..num_sets {
        cur.skip_ws();
        let name = cur
            .next_line()
            .ok_or_else(|| MeshError::EntitySetParse(format!("missing {kind} set name")))?;
        let n: usize = cur.parse("number of entities")?;
        // the count is untrusted; let the entities themselves size the set
        let mut members = Vec::new();
        for _ in 0..n {
            let index = match kind {
                EntityKind::Vertex => in_range(cur.parse("vertex index")?, mesh.num_vertices())?,
                EntityKind::Element => in_range(cur.parse("element index")?, mesh.num_elements())?,
                EntityKind::Edge => {
                    let v0 = cur.parse("edge vertex")?;
                    let v1 = cur.parse("edge vertex")?;
                    resolver.edge(v0, v1)?
                }
                EntityKind::Face => {
                    let tag: i64 = cur.parse("face geometry type")?;
                    let nv = CellType::from_geometry_tag(tag)
                        .ok_or(MeshError::UnknownFaceGeometry(tag))?
                        .num_vertices();
                    let vertices = (0..nv)
                        .map(|_| cur.parse("face vertex"))
                        .collect::<Result<Vec<usize>, _>>()?;
                    resolver.face(&vertices)?
                }
            };
            members.push(index);
        }
        sets.push(name, members);
    }
    Ok(sets)
}

fn in_range(i: usize, rows: usize) -> Result<usize, MeshError> {
    if i < rows {
        Ok(i)
    } else {
        Err(MeshError::RowOutOfRange { row: i, rows })
    }
}

fn table_row<'t>(table: Option<&'t Table>, what: &'static str, i: usize) -> Result<&'t [usize], MeshError> {
    let t = table.ok_or(MeshError::MissingTable(what))?;
    if i >= t.len() {
        return Err(MeshError::RowOutOfRange {
            row: i,
            rows: t.len(),
        });
    }
    Ok(t.row(i))
}

impl EntitySets {
    /// Read sets for `mesh` from `input`.
    ///
    /// Input that does not start with the `MFEM sets v1.0` line is taken to
    /// hold no entity sets: nothing is changed and `Ok` is returned. Otherwise
    /// every existing set is replaced by the file's, edge and face tuples
    /// are resolved through `mesh`, and the connectivity tables are
    /// refreshed with [`EntitySets::copy_mesh_tables`].
    pub fn load<M: MeshTopology, R: Read>(&mut self, mesh: &mut M, mut input: R) -> Result<(), MeshError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        let mut cur = TextCursor::new(&text);

        cur.skip_ws();
        let magic = cur.next_line().unwrap_or_default();
        if magic != ENTITY_SETS_MAGIC {
            log::debug!("input is not an entity set file (first line `{magic}`)");
            return Ok(());
        }

        cur.skip_comment_lines('#');
        cur.expect("dimension")?;
        let dim: usize = cur.parse("dimension")?;

        let mut kinds: [NamedSets<usize>; 4] = Default::default();
        for kind in EntityKind::ALL {
            let present = match kind {
                EntityKind::Edge => dim > 1,
                EntityKind::Face => dim > 2,
                _ => true,
            };
            if present {
                kinds[kind.index()] = read_block(&mut cur, mesh, kind)?;
            }
        }
        self.kinds = kinds;
        log::debug!(
            "loaded {} vertex, {} edge, {} face and {} element sets",
            self.num_sets(EntityKind::Vertex),
            self.num_sets(EntityKind::Edge),
            self.num_sets(EntityKind::Face),
            self.num_sets(EntityKind::Element)
        );
        self.copy_mesh_tables(mesh)
    }

    /// Sets for `mesh` read from `input`; see [`EntitySets::load`].
    pub fn from_reader<M: MeshTopology, R: Read>(mesh: &mut M, input: R) -> Result<Self, MeshError> {
        let mut sets = Self::new(mesh);
        sets.load(mesh, input)?;
        Ok(sets)
    }

    /// Write all sets in the format read by [`EntitySets::load`].
    pub fn print<W: Write>(&self, out: &mut W) -> Result<(), MeshError> {
        write!(out, "{ENTITY_SETS_MAGIC}\n\n")?;
        write!(out, "dimension\n{}\n\n", self.dim)?;
        self.print_entity_sets(out, EntityKind::Vertex)?;
        if self.dim > 1 {
            self.print_edge_sets(out)?;
        }
        if self.dim > 2 {
            self.print_face_sets(out)?;
        }
        self.print_entity_sets(out, EntityKind::Element)
    }

    /// Write the block of vertex or element sets, entities as raw indices.
    pub fn print_entity_sets<W: Write>(&self, out: &mut W, kind: EntityKind) -> Result<(), MeshError> {
        write!(out, "{}\n{}\n\n", kind.header(), self.num_sets(kind))?;
        for (name, members) in self.sets(kind) {
            write!(out, "{name}\n{}\n", members.len())?;
            if !members.is_empty() {
                write!(out, "{}\n\n", members.iter().join(" "))?;
            }
        }
        Ok(())
    }

    /// Write the edge set block, each edge as its two vertices.
    pub fn print_edge_sets<W: Write>(&self, out: &mut W) -> Result<(), MeshError> {
        let kind = EntityKind::Edge;
        write!(out, "{}\n{}\n\n", kind.header(), self.num_sets(kind))?;
        for (name, members) in self.sets(kind) {
            write!(out, "{name}\n{}\n", members.len())?;
            if members.is_empty() {
                continue;
            }
            let pairs = members
                .iter()
                .map(|&e| table_row(self.edge_vertex.as_ref(), "edge-vertex", e))
                .map_ok(|v| format!("{} {}", v[0], v[1]))
                .collect::<Result<Vec<_>, _>>()?;
            write!(out, "{}\n\n", pairs.join(" "))?;
        }
        Ok(())
    }

    /// Write the face set block, one face per line as geometry tag and
    /// vertices.
    pub fn print_face_sets<W: Write>(&self, out: &mut W) -> Result<(), MeshError> {
        let kind = EntityKind::Face;
        write!(out, "{}\n{}\n\n", kind.header(), self.num_sets(kind))?;
        for (name, members) in self.sets(kind) {
            write!(out, "{name}\n{}\n", members.len())?;
            for &f in members {
                let v = table_row(self.face_vertex.as_ref(), "face-vertex", f)?;
                // vertex count minus one is the geometry tag
                writeln!(out, "{} {}", v.len() - 1, v.iter().join(" "))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
