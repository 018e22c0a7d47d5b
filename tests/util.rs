#![allow(dead_code)]
use mesh_entsets::{
    mesh::{ConformingMesh, MeshTopology, NcMeshTopology},
    topology::{dstable::DSTable, face_table::FaceTable, table::Table},
};

/// A coarse mesh refined once uniformly, seen as a non-conforming mesh whose
/// leaves are the fine mesh.
pub struct UniformNc {
    pub coarse: ConformingMesh,
    pub fine: ConformingMesh,
    coarse_edges: DSTable,
    coarse_faces: FaceTable,
    fine_edges: DSTable,
    fine_faces: FaceTable,
}

impl UniformNc {
    pub fn new(coarse: ConformingMesh) -> Self {
        let mut fine = coarse.clone();
        fine.uniform_refinement().unwrap();
        Self {
            coarse_edges: coarse.vertex_to_vertex_table().unwrap(),
            coarse_faces: coarse.faces_table().unwrap(),
            fine_edges: fine.vertex_to_vertex_table().unwrap(),
            fine_faces: fine.faces_table().unwrap(),
            coarse,
            fine,
        }
    }

    fn edge_mid(&self, v0: usize, v1: usize) -> usize {
        self.coarse.num_vertices() + self.coarse_edges.get(v0, v1).unwrap()
    }

    fn children_per_element(&self) -> usize {
        if self.coarse.dimension() == 3 { 8 } else { 4 }
    }
}

impl NcMeshTopology for UniformNc {
    fn find_edge(&self, v0: usize, v1: usize) -> Option<usize> {
        self.coarse_edges.get(v0, v1)
    }

    fn refined_edges(&self, v0: usize, v1: usize) -> Vec<usize> {
        let mid = self.edge_mid(v0, v1);
        vec![
            self.fine_edges.get(v0, mid).unwrap(),
            self.fine_edges.get(v1, mid).unwrap(),
        ]
    }

    /// Corners must be given in cyclic order.
    fn refined_faces(&self, v0: usize, v1: usize, v2: usize, v3: Option<usize>) -> Vec<usize> {
        let v3 = v3.expect("uniform refinement test meshes have quad faces");
        let corners = [v0, v1, v2, v3];
        let f = self.coarse_faces.get4(v0, v1, v2, v3).unwrap();
        let center = self.coarse.num_vertices() + self.coarse.num_edges() + f;
        (0..4)
            .map(|k| {
                let next = self.edge_mid(corners[k], corners[(k + 1) % 4]);
                let prev = self.edge_mid(corners[k], corners[(k + 3) % 4]);
                self.fine_faces
                    .get4(corners[k], next, center, prev)
                    .unwrap()
            })
            .collect()
    }

    fn refined_elements(&self, elem: usize) -> Vec<usize> {
        let extra = self.children_per_element() - 1;
        let first = self.coarse.num_elements() + extra * elem;
        std::iter::once(elem).chain(first..first + extra).collect()
    }
}

/// Sorted copy of a table row.
pub fn sorted_row(t: &Table, i: usize) -> Vec<usize> {
    let mut r = t.row(i).to_vec();
    r.sort_unstable();
    r
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
