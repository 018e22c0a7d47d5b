//! Cell type metadata and reference-element templates.
//!
//! Local edge and face orderings follow the usual MFEM reference elements, so
//! that entity numbering derived from them matches files written by MFEM.

/// Element geometries understood by the reference mesh.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellType {
    /// 1D segment/edge.
    Segment,
    /// 2D simplex (triangle).
    Triangle,
    /// 2D tensor-product cell (quad).
    Quadrilateral,
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D tensor-product cell (hex).
    Hexahedron,
}

const SEGMENT_EDGES: &[[usize; 2]] = &[[0, 1]];
const TRIANGLE_EDGES: &[[usize; 2]] = &[[0, 1], [1, 2], [2, 0]];
const QUAD_EDGES: &[[usize; 2]] = &[[0, 1], [1, 2], [2, 3], [3, 0]];
const TET_EDGES: &[[usize; 2]] = &[[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];
const HEX_EDGES: &[[usize; 2]] = &[
    [0, 1],
    [1, 2],
    [3, 2],
    [0, 3],
    [4, 5],
    [5, 6],
    [7, 6],
    [4, 7],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

const TET_FACES: &[&[usize]] = &[&[1, 2, 3], &[0, 3, 2], &[0, 1, 3], &[0, 2, 1]];
const HEX_FACES: &[&[usize]] = &[
    &[3, 2, 1, 0],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 0, 4, 7],
    &[4, 5, 6, 7],
];

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> usize {
        match self {
            CellType::Segment => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron => 3,
        }
    }

    /// Number of corner vertices.
    pub fn num_vertices(self) -> usize {
        match self {
            CellType::Segment => 2,
            CellType::Triangle => 3,
            CellType::Quadrilateral | CellType::Tetrahedron => 4,
            CellType::Hexahedron => 8,
        }
    }

    /// Local vertex pairs of each edge.
    pub fn edges(self) -> &'static [[usize; 2]] {
        match self {
            CellType::Segment => SEGMENT_EDGES,
            CellType::Triangle => TRIANGLE_EDGES,
            CellType::Quadrilateral => QUAD_EDGES,
            CellType::Tetrahedron => TET_EDGES,
            CellType::Hexahedron => HEX_EDGES,
        }
    }

    /// Local vertex lists of each 2D face; empty below dimension 3.
    pub fn faces(self) -> &'static [&'static [usize]] {
        match self {
            CellType::Tetrahedron => TET_FACES,
            CellType::Hexahedron => HEX_FACES,
            _ => &[],
        }
    }

    /// Face geometry tag used in entity set files (2 = triangle, 3 = quad).
    pub fn geometry_tag(self) -> Option<i64> {
        match self {
            CellType::Triangle => Some(2),
            CellType::Quadrilateral => Some(3),
            _ => None,
        }
    }

    /// Inverse of [`CellType::geometry_tag`].
    pub fn from_geometry_tag(tag: i64) -> Option<CellType> {
        match tag {
            2 => Some(CellType::Triangle),
            3 => Some(CellType::Quadrilateral),
            _ => None,
        }
    }
}
