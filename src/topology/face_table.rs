//! Vertex-tuple → face index lookup.
//!
//! Faces are keyed by their sorted vertex set, so any rotation or reflection
//! of a face's vertex list finds the same face. Indices are assigned
//! sequentially the first time a face is pushed.

use hashbrown::HashMap;

type FaceKey = (usize, usize, usize, Option<usize>);

fn tri_key(mut v: [usize; 3]) -> FaceKey {
    v.sort_unstable();
    (v[0], v[1], v[2], None)
}

fn quad_key(mut v: [usize; 4]) -> FaceKey {
    v.sort_unstable();
    (v[0], v[1], v[2], Some(v[3]))
}

/// Triangle and quadrilateral faces numbered in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct FaceTable {
    index_of: HashMap<FaceKey, usize>,
}

impl FaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct faces.
    pub fn len(&self) -> usize {
        self.index_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_of.is_empty()
    }

    fn push_key(&mut self, key: FaceKey) -> usize {
        let next = self.index_of.len();
        *self.index_of.entry(key).or_insert(next)
    }

    /// Find or number the triangle `{v0, v1, v2}`.
    pub fn push3(&mut self, v0: usize, v1: usize, v2: usize) -> usize {
        self.push_key(tri_key([v0, v1, v2]))
    }

    /// Find or number the quadrilateral `{v0, v1, v2, v3}`.
    pub fn push4(&mut self, v0: usize, v1: usize, v2: usize, v3: usize) -> usize {
        self.push_key(quad_key([v0, v1, v2, v3]))
    }

    /// Find or number a face given as a 3- or 4-vertex slice.
    pub fn push(&mut self, vertices: &[usize]) -> Option<usize> {
        match *vertices {
            [a, b, c] => Some(self.push3(a, b, c)),
            [a, b, c, d] => Some(self.push4(a, b, c, d)),
            _ => None,
        }
    }

    pub fn get3(&self, v0: usize, v1: usize, v2: usize) -> Option<usize> {
        self.index_of.get(&tri_key([v0, v1, v2])).copied()
    }

    pub fn get4(&self, v0: usize, v1: usize, v2: usize, v3: usize) -> Option<usize> {
        self.index_of.get(&quad_key([v0, v1, v2, v3])).copied()
    }

    /// Look up a face given as a 3- or 4-vertex slice.
    pub fn get(&self, vertices: &[usize]) -> Option<usize> {
        match *vertices {
            [a, b, c] => self.get3(a, b, c),
            [a, b, c, d] => self.get4(a, b, c, d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_independent_lookup() {
        let mut t = FaceTable::new();
        assert_eq!(t.push4(0, 1, 5, 4), 0);
        assert_eq!(t.push3(7, 2, 9), 1);
        assert_eq!(t.push4(4, 5, 1, 0), 0);
        assert_eq!(t.get4(1, 0, 4, 5), Some(0));
        assert_eq!(t.get3(9, 7, 2), Some(1));
        assert_eq!(t.get(&[0, 1, 5]), None);
        assert_eq!(t.len(), 2);
    }
}
