mod util;
use util::*;

use mesh_entsets::mesh::{ConformingMesh, MeshTopology};
use mesh_entsets::sets::EntitySets;
use mesh_entsets::topology::entity::EntityKind;

#[test]
fn quad_refinement_remaps_every_kind() {
    let mut mesh = ConformingMesh::quad_grid(2, 2).unwrap();
    let coarse_nv = mesh.num_vertices();
    let coarse_ne = mesh.num_elements();
    let coarse_edges = mesh.vertex_to_vertex_table().unwrap();

    let mut sets = EntitySets::new(&mesh);
    sets.add_set(EntityKind::Vertex, "pins", vec![0, 4]);
    let bottom = vec![
        coarse_edges.get(0, 1).unwrap(),
        coarse_edges.get(1, 2).unwrap(),
    ];
    sets.add_set(EntityKind::Edge, "bottom", bottom.clone());
    sets.add_set(EntityKind::Element, "odd", vec![1, 3]);
    sets.copy_mesh_tables(&mut mesh).unwrap();

    mesh.uniform_refinement().unwrap();
    sets.quad_uniform_refinement(&mut mesh).unwrap();

    assert_eq!(sets.set(EntityKind::Vertex, 0), &[0, 4]);
    assert_eq!(
        sets.set(EntityKind::Element, 0),
        &[1, 3, coarse_ne + 3, coarse_ne + 4, coarse_ne + 5, coarse_ne + 9, coarse_ne + 10, coarse_ne + 11]
    );

    let ev = sets.edge_vertex_table().unwrap();
    assert_eq!(ev.len(), mesh.num_edges());
    let halves = sets.set(EntityKind::Edge, 0);
    assert_eq!(halves.len(), 4);
    let ends = [(0, 1), (1, 2)];
    for (i, (&old, &(a, b))) in bottom.iter().zip(&ends).enumerate() {
        let mid = coarse_nv + old;
        assert_eq!(sorted_row(ev, halves[i]), vec![a.min(mid), a.max(mid)]);
        assert_eq!(sorted_row(ev, halves[i + 2]), vec![b.min(mid), b.max(mid)]);
    }
}

#[test]
fn refined_sets_survive_a_print_load_cycle() {
    let mut mesh = ConformingMesh::quad_grid(2, 1).unwrap();
    let mut sets = EntitySets::new(&mesh);
    sets.add_set(EntityKind::Edge, "all", (0..mesh.num_edges()).collect());
    sets.copy_mesh_tables(&mut mesh).unwrap();
    mesh.uniform_refinement().unwrap();
    sets.quad_uniform_refinement(&mut mesh).unwrap();

    let mut text = Vec::new();
    sets.print(&mut text).unwrap();
    let back = EntitySets::from_reader(&mut mesh, text.as_slice()).unwrap();
    assert_eq!(back.set(EntityKind::Edge, 0), sets.set(EntityKind::Edge, 0));
    // every fine edge on the coarse skeleton appears exactly once
    let mut fine = back.set(EntityKind::Edge, 0).to_vec();
    fine.sort_unstable();
    fine.dedup();
    assert_eq!(fine.len(), 14);
}

#[test]
fn hex_refinement_splits_faces_and_elements() {
    let mut mesh = ConformingMesh::hex_grid(1, 1, 2).unwrap();
    let coarse_nv = mesh.num_vertices();
    let coarse_ne = mesh.num_edges();
    let coarse_nel = mesh.num_elements();

    let mut sets = EntitySets::new(&mesh);
    sets.add_set(EntityKind::Face, "some", vec![0, 3, 7]);
    sets.add_set(EntityKind::Edge, "first", vec![0]);
    sets.add_set(EntityKind::Element, "top", vec![1]);
    sets.copy_mesh_tables(&mut mesh).unwrap();
    let coarse_fv = sets.face_vertex_table().unwrap().clone();
    let coarse_faces = sets.set(EntityKind::Face, 0).to_vec();

    mesh.uniform_refinement().unwrap();
    sets.hex_uniform_refinement(&mut mesh).unwrap();

    let children = sets.set(EntityKind::Face, 0);
    let n = coarse_faces.len();
    assert_eq!(children.len(), 4 * n);
    let fv = sets.face_vertex_table().unwrap();
    for (i, &old) in coarse_faces.iter().enumerate() {
        let center = coarse_nv + coarse_ne + old;
        let corners = coarse_fv.row(old);
        let slots = [i, n + 3 * i, n + 3 * i + 1, n + 3 * i + 2];
        for (&slot, &corner) in slots.iter().zip(corners) {
            let verts = fv.row(children[slot]);
            assert_eq!(verts.len(), 4);
            assert!(verts.contains(&corner), "child {slot} misses corner {corner}");
            assert!(verts.contains(&center), "child {slot} misses center {center}");
        }
    }
    let mut distinct = children.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(distinct.len(), 4 * n);

    assert_eq!(sets.num_entities(EntityKind::Edge, 0), 2);
    let elems = sets.set(EntityKind::Element, 0);
    assert_eq!(elems[0], 1);
    assert_eq!(&elems[1..], (coarse_nel + 7..coarse_nel + 14).collect::<Vec<_>>().as_slice());
}

#[test]
fn non_quad_meshes_are_rejected_by_the_mesh() {
    use mesh_entsets::mesh::Element;
    use mesh_entsets::topology::cell_type::CellType;
    let mut mesh = ConformingMesh::new(
        2,
        4,
        vec![
            Element::new(CellType::Triangle, vec![0, 1, 2]),
            Element::new(CellType::Triangle, vec![1, 3, 2]),
        ],
    )
    .unwrap();
    assert!(mesh.uniform_refinement().is_err());
}
