//! Reference conforming mesh with uniform quad/hex refinement.
//!
//! # Numbering
//! - Edges are numbered by the vertex-to-vertex table built from the element
//!   list in order, so the first element's first edge is edge 0.
//! - Faces (3D only) are numbered the same way through a [`FaceTable`]; the
//!   face → vertex row of a face follows the local face ordering of the first
//!   element that contains it.
//!
//! # Uniform refinement
//! With `NV`, `NE`, `NF` and `NEL` the coarse vertex, edge, face and element
//! counts, the refined mesh places the midpoint of edge `e` at vertex
//! `NV + e`, the center of face `f` at `NV + NE + f` and the center of element
//! `i` at `NV + NE + NF + i` (`NF = 0` in 2D). Element `i` is replaced by its
//! first child; its remaining `k - 1` children (`k` = 4 for quads, 8 for
//! hexes) are numbered `NEL + (k - 1) i + 0 ..`.

use crate::mesh::MeshTopology;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use crate::topology::dstable::DSTable;
use crate::topology::entity::EntityKind;
use crate::topology::face_table::FaceTable;
use crate::topology::table::Table;

/// A mesh element: its geometry and corner vertices in reference order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub cell_type: CellType,
    pub vertices: Vec<usize>,
}

impl Element {
    pub fn new(cell_type: CellType, vertices: Vec<usize>) -> Self {
        Self {
            cell_type,
            vertices,
        }
    }
}

/// Element-vertex mesh with lazily built, takeable derived tables.
#[derive(Clone, Debug)]
pub struct ConformingMesh {
    dim: usize,
    num_vertices: usize,
    elements: Vec<Element>,
    num_edges: usize,
    num_faces: usize,
    edge_vertex: Option<Table>,
    face_vertex: Option<Table>,
    face_edge: Option<Table>,
}

fn edge_between(v_to_v: &DSTable, a: usize, b: usize) -> Result<usize, MeshError> {
    v_to_v.get(a, b).ok_or_else(|| MeshError::UnknownEntity {
        kind: EntityKind::Edge,
        vertices: vec![a, b],
    })
}

impl ConformingMesh {
    /// Build a mesh of dimension `dim` over `num_vertices` vertices.
    pub fn new(dim: usize, num_vertices: usize, elements: Vec<Element>) -> Result<Self, MeshError> {
        for (i, el) in elements.iter().enumerate() {
            if el.cell_type.dimension() != dim {
                return Err(MeshError::UnsupportedMesh(format!(
                    "element {i} is a {:?} in a {dim}D mesh",
                    el.cell_type
                )));
            }
            if el.vertices.len() != el.cell_type.num_vertices() {
                return Err(MeshError::UnsupportedMesh(format!(
                    "element {i} has {} vertices, a {:?} needs {}",
                    el.vertices.len(),
                    el.cell_type,
                    el.cell_type.num_vertices()
                )));
            }
            if let Some(&v) = el.vertices.iter().find(|&&v| v >= num_vertices) {
                return Err(MeshError::RowOutOfRange {
                    row: v,
                    rows: num_vertices,
                });
            }
        }
        let mut mesh = Self {
            dim,
            num_vertices,
            elements,
            num_edges: 0,
            num_faces: 0,
            edge_vertex: None,
            face_vertex: None,
            face_edge: None,
        };
        mesh.update_counts()?;
        Ok(mesh)
    }

    /// `nx × ny` structured grid of quadrilaterals.
    pub fn quad_grid(nx: usize, ny: usize) -> Result<Self, MeshError> {
        let v = |i: usize, j: usize| j * (nx + 1) + i;
        let mut elements = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                elements.push(Element::new(
                    CellType::Quadrilateral,
                    vec![v(i, j), v(i + 1, j), v(i + 1, j + 1), v(i, j + 1)],
                ));
            }
        }
        Self::new(2, (nx + 1) * (ny + 1), elements)
    }

    /// `nx × ny × nz` structured grid of hexahedra.
    pub fn hex_grid(nx: usize, ny: usize, nz: usize) -> Result<Self, MeshError> {
        let v = |i: usize, j: usize, k: usize| (k * (ny + 1) + j) * (nx + 1) + i;
        let mut elements = Vec::with_capacity(nx * ny * nz);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    elements.push(Element::new(
                        CellType::Hexahedron,
                        vec![
                            v(i, j, k),
                            v(i + 1, j, k),
                            v(i + 1, j + 1, k),
                            v(i, j + 1, k),
                            v(i, j, k + 1),
                            v(i + 1, j, k + 1),
                            v(i + 1, j + 1, k + 1),
                            v(i, j + 1, k + 1),
                        ],
                    ));
                }
            }
        }
        Self::new(3, (nx + 1) * (ny + 1) * (nz + 1), elements)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Build and keep the edge → vertex, face → vertex and face → edge tables.
    pub fn cache_tables(&mut self) -> Result<(), MeshError> {
        self.edge_vertex = Some(self.build_edge_vertex()?);
        if self.dim > 2 {
            self.face_vertex = Some(self.build_face_vertex()?);
            self.face_edge = Some(self.build_face_edge()?);
        }
        Ok(())
    }

    fn update_counts(&mut self) -> Result<(), MeshError> {
        self.num_edges = self.vertex_to_vertex_table()?.num_entries();
        self.num_faces = self.faces_table()?.len();
        Ok(())
    }

    fn build_edge_vertex(&self) -> Result<Table, MeshError> {
        let v_to_v = self.vertex_to_vertex_table()?;
        let mut t = Table::new();
        t.make_i(v_to_v.num_entries());
        for (_, _, idx) in v_to_v.iter() {
            t.add_columns_in_row(idx, 2);
        }
        t.make_j();
        for (r, c, idx) in v_to_v.iter() {
            t.add_connections(idx, &[r, c]);
        }
        t.shift_up_i();
        Ok(t)
    }

    /// Vertex lists of all faces, indexed by face number.
    fn face_vertex_rows(&self) -> Vec<Vec<usize>> {
        let mut faces = FaceTable::new();
        let mut rows = Vec::new();
        for el in &self.elements {
            for local in el.cell_type.faces() {
                let verts: Vec<usize> = local.iter().map(|&k| el.vertices[k]).collect();
                if let Some(f) = faces.push(&verts) {
                    if f == rows.len() {
                        rows.push(verts);
                    }
                }
            }
        }
        rows
    }

    fn build_face_vertex(&self) -> Result<Table, MeshError> {
        Ok(Table::from_rows(&self.face_vertex_rows()))
    }

    fn build_face_edge(&self) -> Result<Table, MeshError> {
        let v_to_v = self.vertex_to_vertex_table()?;
        let rows = self
            .face_vertex_rows()
            .iter()
            .map(|verts| {
                let n = verts.len();
                (0..n)
                    .map(|k| edge_between(&v_to_v, verts[k], verts[(k + 1) % n]))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table::from_rows(&rows))
    }

    fn clear_tables(&mut self) {
        self.edge_vertex = None;
        self.face_vertex = None;
        self.face_edge = None;
    }

    /// Uniformly refine an all-quad 2D or all-hex 3D mesh in place.
    pub fn uniform_refinement(&mut self) -> Result<(), MeshError> {
        let all = |ct: CellType| self.elements.iter().all(|el| el.cell_type == ct);
        let refined = match self.dim {
            2 if all(CellType::Quadrilateral) => self.refine_quads()?,
            3 if all(CellType::Hexahedron) => self.refine_hexes()?,
            _ => {
                return Err(MeshError::UnsupportedMesh(
                    "uniform refinement needs an all-quad 2D or all-hex 3D mesh".into(),
                ));
            }
        };
        log::debug!(
            "uniform refinement: {} -> {} elements, {} -> {} vertices",
            self.elements.len(),
            refined.1.len(),
            self.num_vertices,
            refined.0
        );
        self.num_vertices = refined.0;
        self.elements = refined.1;
        self.clear_tables();
        self.update_counts()
    }

    fn refine_quads(&self) -> Result<(usize, Vec<Element>), MeshError> {
        let v_to_v = self.vertex_to_vertex_table()?;
        let oedge = self.num_vertices;
        let oelem = oedge + v_to_v.num_entries();
        let n = self.elements.len();

        let mut first = Vec::with_capacity(n);
        let mut rest = Vec::with_capacity(3 * n);
        for (i, el) in self.elements.iter().enumerate() {
            let v = &el.vertices;
            let mut m = [0usize; 4];
            for (k, mk) in m.iter_mut().enumerate() {
                *mk = oedge + edge_between(&v_to_v, v[k], v[(k + 1) % 4])?;
            }
            let c = oelem + i;
            let quad = |vs: [usize; 4]| Element::new(CellType::Quadrilateral, vs.to_vec());
            first.push(quad([v[0], m[0], c, m[3]]));
            rest.push(quad([m[0], v[1], m[1], c]));
            rest.push(quad([c, m[1], v[2], m[2]]));
            rest.push(quad([m[3], c, m[2], v[3]]));
        }
        first.extend(rest);
        Ok((oelem + n, first))
    }

    fn refine_hexes(&self) -> Result<(usize, Vec<Element>), MeshError> {
        let v_to_v = self.vertex_to_vertex_table()?;
        let faces = self.faces_table()?;
        let oedge = self.num_vertices;
        let oface = oedge + v_to_v.num_entries();
        let oelem = oface + faces.len();
        let n = self.elements.len();

        let mut first = Vec::with_capacity(n);
        let mut rest = Vec::with_capacity(7 * n);
        for (i, el) in self.elements.iter().enumerate() {
            let v = &el.vertices;
            let mut mids = [0usize; 12];
            for (mk, &[a, b]) in mids.iter_mut().zip(CellType::Hexahedron.edges()) {
                *mk = oedge + edge_between(&v_to_v, v[a], v[b])?;
            }
            let mut centers = [0usize; 6];
            for (fk, local) in centers.iter_mut().zip(CellType::Hexahedron.faces()) {
                let verts: Vec<usize> = local.iter().map(|&k| v[k]).collect();
                *fk = oface
                    + faces.get(&verts).ok_or_else(|| MeshError::UnknownEntity {
                        kind: EntityKind::Face,
                        vertices: verts.clone(),
                    })?;
            }
            let children = hex_children(v, &mids, &centers, oelem + i);
            let mut children = children.into_iter();
            if let Some(c0) = children.next() {
                first.push(Element::new(CellType::Hexahedron, c0.to_vec()));
            }
            rest.extend(children.map(|c| Element::new(CellType::Hexahedron, c.to_vec())));
        }
        first.extend(rest);
        Ok((oelem + n, first))
    }
}

/// 1→8 split of a hex on a 3×3×3 lattice of corner, mid-edge, face-center
/// and cell-center vertices. Edge and face order follow
/// [`CellType::Hexahedron`]'s templates.
fn hex_children(v: &[usize], m: &[usize; 12], f: &[usize; 6], center: usize) -> [[usize; 8]; 8] {
    let mut grid = [[[0usize; 3]; 3]; 3];
    let mut put = |x: usize, y: usize, z: usize, p: usize| grid[x][y][z] = p;

    put(0, 0, 0, v[0]);
    put(2, 0, 0, v[1]);
    put(2, 2, 0, v[2]);
    put(0, 2, 0, v[3]);
    put(0, 0, 2, v[4]);
    put(2, 0, 2, v[5]);
    put(2, 2, 2, v[6]);
    put(0, 2, 2, v[7]);

    // edges: 01 12 32 03 45 56 76 47 04 15 26 37
    put(1, 0, 0, m[0]);
    put(2, 1, 0, m[1]);
    put(1, 2, 0, m[2]);
    put(0, 1, 0, m[3]);
    put(1, 0, 2, m[4]);
    put(2, 1, 2, m[5]);
    put(1, 2, 2, m[6]);
    put(0, 1, 2, m[7]);
    put(0, 0, 1, m[8]);
    put(2, 0, 1, m[9]);
    put(2, 2, 1, m[10]);
    put(0, 2, 1, m[11]);

    // faces: bottom, front, right, back, left, top
    put(1, 1, 0, f[0]);
    put(1, 0, 1, f[1]);
    put(2, 1, 1, f[2]);
    put(1, 2, 1, f[3]);
    put(0, 1, 1, f[4]);
    put(1, 1, 2, f[5]);

    put(1, 1, 1, center);

    let mut out = [[0usize; 8]; 8];
    let octants = [
        (0, 0, 0),
        (1, 0, 0),
        (1, 1, 0),
        (0, 1, 0),
        (0, 0, 1),
        (1, 0, 1),
        (1, 1, 1),
        (0, 1, 1),
    ];
    for (child, &(ix, iy, iz)) in out.iter_mut().zip(octants.iter()) {
        let (x0, x1) = (ix, ix + 1);
        let (y0, y1) = (iy, iy + 1);
        let (z0, z1) = (iz, iz + 1);
        *child = [
            grid[x0][y0][z0],
            grid[x1][y0][z0],
            grid[x1][y1][z0],
            grid[x0][y1][z0],
            grid[x0][y0][z1],
            grid[x1][y0][z1],
            grid[x1][y1][z1],
            grid[x0][y1][z1],
        ];
    }
    out
}

impl MeshTopology for ConformingMesh {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    fn num_edges(&self) -> usize {
        self.num_edges
    }

    fn num_faces(&self) -> usize {
        self.num_faces
    }

    fn num_elements(&self) -> usize {
        self.elements.len()
    }

    fn vertex_to_vertex_table(&self) -> Result<DSTable, MeshError> {
        let mut v_to_v = DSTable::new(self.num_vertices);
        for el in &self.elements {
            for &[a, b] in el.cell_type.edges() {
                v_to_v.push(el.vertices[a], el.vertices[b])?;
            }
        }
        Ok(v_to_v)
    }

    fn faces_table(&self) -> Result<FaceTable, MeshError> {
        let mut faces = FaceTable::new();
        for el in &self.elements {
            for local in el.cell_type.faces() {
                let verts: Vec<usize> = local.iter().map(|&k| el.vertices[k]).collect();
                faces.push(&verts).ok_or_else(|| {
                    MeshError::UnsupportedMesh(format!("face with {} vertices", verts.len()))
                })?;
            }
        }
        Ok(faces)
    }

    fn edge_vertex_table(&self) -> Option<&Table> {
        self.edge_vertex.as_ref()
    }

    fn face_vertex_table(&self) -> Option<&Table> {
        self.face_vertex.as_ref()
    }

    fn face_edge_table(&self) -> Option<&Table> {
        self.face_edge.as_ref()
    }

    fn take_edge_vertex_table(&mut self) -> Result<Table, MeshError> {
        match self.edge_vertex.take() {
            Some(t) => Ok(t),
            None => self.build_edge_vertex(),
        }
    }

    fn take_face_vertex_table(&mut self) -> Result<Table, MeshError> {
        match self.face_vertex.take() {
            Some(t) => Ok(t),
            None => self.build_face_vertex(),
        }
    }

    fn take_face_edge_table(&mut self) -> Result<Table, MeshError> {
        match self.face_edge.take() {
            Some(t) => Ok(t),
            None => self.build_face_edge(),
        }
    }
}
