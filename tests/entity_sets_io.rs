mod util;
use util::*;

use mesh_entsets::mesh::{ConformingMesh, MeshTopology};
use mesh_entsets::mesh_error::MeshError;
use mesh_entsets::sets::EntitySets;
use mesh_entsets::topology::entity::EntityKind;

fn print_to_string(sets: &EntitySets) -> String {
    let mut out = Vec::new();
    sets.print(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn quad_sets_round_trip() {
    let mut mesh = ConformingMesh::quad_grid(3, 2).unwrap();
    let mut sets = EntitySets::new(&mesh);
    sets.add_set(EntityKind::Vertex, "origin", vec![0]);
    sets.add_set(EntityKind::Edge, "bottom", vec![0, 4, 7]);
    sets.add_set(EntityKind::Edge, "empty", vec![]);
    sets.add_set(EntityKind::Element, "left column", vec![0, 3]);
    sets.copy_mesh_tables(&mut mesh).unwrap();

    let text = print_to_string(&sets);
    let back = EntitySets::from_reader(&mut mesh, text.as_bytes()).unwrap();

    for kind in EntityKind::ALL {
        assert_eq!(back.num_sets(kind), sets.num_sets(kind));
        for s in 0..sets.num_sets(kind) {
            assert_eq!(back.set_name(kind, s), sets.set_name(kind, s));
            assert_eq!(back.set(kind, s), sets.set(kind, s));
        }
    }
    assert_eq!(print_to_string(&back), text);
}

#[test]
fn hex_face_sets_round_trip() {
    let mut mesh = ConformingMesh::hex_grid(2, 1, 1).unwrap();
    let mut sets = EntitySets::new(&mesh);
    let all_faces: Vec<usize> = (0..mesh.num_faces()).collect();
    sets.add_set(EntityKind::Face, "all faces", all_faces.clone());
    sets.add_set(EntityKind::Edge, "some edges", vec![1, 2, 3]);
    sets.copy_mesh_tables(&mut mesh).unwrap();

    let text = print_to_string(&sets);
    // quad faces carry geometry tag 3
    assert!(text.contains("\nall faces\n11\n3 "));

    let back = EntitySets::from_reader(&mut mesh, text.as_bytes()).unwrap();
    assert_eq!(back.set(EntityKind::Face, 0), all_faces.as_slice());
    assert_eq!(back.set(EntityKind::Edge, 0), &[1, 2, 3]);
    let fv = back.face_vertex_table().unwrap();
    assert_eq!(sorted_row(fv, 0), sorted_row(sets.face_vertex_table().unwrap(), 0));
}

#[test]
fn comments_and_crlf_are_accepted() {
    let mut mesh = ConformingMesh::quad_grid(1, 1).unwrap();
    let text = "MFEM sets v1.0\r\n\
                # generated by hand\r\n\
                dimension\r\n2\r\n\r\n\
                # vertices\r\n\
                vertex_sets\r\n1\r\n\r\nsw corner\r\n1\r\n0\r\n\r\n\
                edge_sets\r\n1\r\n\r\nleft\r\n1\r\n2 0\r\n\r\n\
                element_sets\r\n1\r\n\r\nall\r\n1\r\n0\r\n";
    let sets = EntitySets::from_reader(&mut mesh, text.as_bytes()).unwrap();
    assert_eq!(sets.set_name(EntityKind::Vertex, 0), "sw corner");
    assert_eq!(sets.set_index(EntityKind::Edge, "left").unwrap(), 0);
    let e = sets.entity_index_by_name(EntityKind::Edge, "left", 0).unwrap();
    assert_eq!(sorted_row(sets.edge_vertex_table().unwrap(), e), vec![0, 2]);
    assert_eq!(sets.num_entities_by_name(EntityKind::Element, "all").unwrap(), 1);
}

#[test]
fn empty_sets_do_not_swallow_names() {
    let mut mesh = ConformingMesh::quad_grid(1, 1).unwrap();
    let text = "MFEM sets v1.0\ndimension\n2\n\
                vertex_sets\n2\nnothing\n0\nsomething\n2\n1 2\n\
                edge_sets\n0\nelement_sets\n0\n";
    let sets = EntitySets::from_reader(&mut mesh, text.as_bytes()).unwrap();
    assert_eq!(sets.num_entities(EntityKind::Vertex, 0), 0);
    assert_eq!(sets.set_name(EntityKind::Vertex, 1), "something");
    assert_eq!(sets.set(EntityKind::Vertex, 1), &[1, 2]);
}

#[test]
fn unknown_format_leaves_no_sets() {
    let mut mesh = ConformingMesh::quad_grid(1, 1).unwrap();
    let sets = EntitySets::from_reader(&mut mesh, "MFEM mesh v1.0\ndimension\n2\n".as_bytes()).unwrap();
    for kind in EntityKind::ALL {
        assert_eq!(sets.num_sets(kind), 0);
    }
    let empty = EntitySets::from_reader(&mut mesh, "".as_bytes()).unwrap();
    assert_eq!(empty.num_sets(EntityKind::Element), 0);
}

#[test]
fn malformed_headers_are_rejected() {
    let mut mesh = ConformingMesh::quad_grid(1, 1).unwrap();
    let bad_dim = "MFEM sets v1.0\ndim\n2\n";
    assert!(matches!(
        EntitySets::from_reader(&mut mesh, bad_dim.as_bytes()),
        Err(MeshError::EntitySetParse(_))
    ));
    let bad_block = "MFEM sets v1.0\ndimension\n2\nvertex_sets\n0\nelement_sets\n0\n";
    assert!(matches!(
        EntitySets::from_reader(&mut mesh, bad_block.as_bytes()),
        Err(MeshError::EntitySetParse(_))
    ));
    let truncated = "MFEM sets v1.0\ndimension\n2\nvertex_sets\n1\nv\n3\n0 1\n";
    assert!(EntitySets::from_reader(&mut mesh, truncated.as_bytes()).is_err());
}

#[test]
fn huge_entity_count_is_a_parse_error() {
    let mut mesh = ConformingMesh::quad_grid(1, 1).unwrap();
    let text = "MFEM sets v1.0\ndimension\n2\nvertex_sets\n1\nv\n4611686018427387904\n0\n";
    assert!(matches!(
        EntitySets::from_reader(&mut mesh, text.as_bytes()),
        Err(MeshError::EntitySetParse(_))
    ));
}

#[test]
fn reload_without_edge_sets_drops_edge_table() {
    let mut mesh = ConformingMesh::quad_grid(1, 1).unwrap();
    let with_edges = "MFEM sets v1.0\ndimension\n2\n\
                      vertex_sets\n0\nedge_sets\n1\nleft\n1\n0 2\nelement_sets\n0\n";
    let mut sets = EntitySets::from_reader(&mut mesh, with_edges.as_bytes()).unwrap();
    assert!(sets.edge_vertex_table().is_some());

    let without = "MFEM sets v1.0\ndimension\n2\n\
                   vertex_sets\n1\nv\n1\n3\nedge_sets\n0\nelement_sets\n0\n";
    sets.load(&mut mesh, without.as_bytes()).unwrap();
    assert_eq!(sets.num_sets(EntityKind::Edge), 0);
    assert!(sets.edge_vertex_table().is_none());
    assert!(sets.face_vertex_table().is_none());
}

#[test]
fn set_info_lists_every_kind() {
    let mut mesh = ConformingMesh::quad_grid(1, 1).unwrap();
    let mut sets = EntitySets::new(&mesh);
    sets.add_set(EntityKind::Vertex, "a", vec![0, 1]);
    sets.add_set(EntityKind::Edge, "b", vec![2]);
    sets.copy_mesh_tables(&mut mesh).unwrap();
    let mut out = Vec::new();
    sets.print_set_info(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\nMFEM Entity Sets:\n\
         \x20\x20Vertex Sets (Index, Size, Set Name):\n\t0\t2\ta\n\n\
         \x20\x20Edge Sets (Index, Size, Set Name):\n\t0\t1\tb\n\n"
    );
}
