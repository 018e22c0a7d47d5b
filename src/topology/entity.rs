//! Mesh entity kinds.

use std::fmt;

/// The four kinds of mesh entity that can be grouped into named sets.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum EntityKind {
    Vertex,
    Edge,
    Face,
    Element,
}

impl EntityKind {
    /// All kinds, in storage order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Vertex,
        EntityKind::Edge,
        EntityKind::Face,
        EntityKind::Element,
    ];

    /// Position of this kind in per-kind arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            EntityKind::Vertex => 0,
            EntityKind::Edge => 1,
            EntityKind::Face => 2,
            EntityKind::Element => 3,
        }
    }

    /// Block header used by the entity set text format.
    pub const fn header(self) -> &'static str {
        match self {
            EntityKind::Vertex => "vertex_sets",
            EntityKind::Edge => "edge_sets",
            EntityKind::Face => "face_sets",
            EntityKind::Element => "element_sets",
        }
    }

    /// Number of raw vertex indices describing one entity in a
    /// non-conforming snapshot.
    pub const fn nc_entity_size(self) -> usize {
        match self {
            EntityKind::Vertex | EntityKind::Element => 1,
            EntityKind::Edge => 2,
            EntityKind::Face => 4,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Vertex => "Vertex",
            EntityKind::Edge => "Edge",
            EntityKind::Face => "Face",
            EntityKind::Element => "Element",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(EntityKind, u8);

    #[test]
    fn index_matches_all_order() {
        for (i, kind) in EntityKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&EntityKind::Face).unwrap();
        assert_eq!(serde_json::from_str::<EntityKind>(&json).unwrap(), EntityKind::Face);
    }
}
