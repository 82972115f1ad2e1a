//! Facet tables and multiplicity classification for linear simplices.
//!
//! # Orientation tables
//! The local vertex orders below come from the MTC orientation convention.
//! For a tetrahedron `(v0,v1,v2,v3)` whose vertex order follows the Gmsh
//! convention they yield outward-facing triangles, and for a counter-clockwise
//! triangle they yield boundary edges that walk the outline consistently.
//! They are reproduced, not derived: swapping two entries flips every
//! boundary normal written to the `.t` file.
//!
//! | cell        | facets (local vertex indices)              |
//! |-------------|--------------------------------------------|
//! | tetrahedron | `(0,2,1)`, `(0,1,3)`, `(0,3,2)`, `(1,2,3)` |
//! | triangle    | `(0,1)`, `(2,0)`, `(1,2)`                  |
//!
//! Higher-order or other cell types extend this module with a new table of
//! the same shape.

use serde::{Deserialize, Serialize};

/// Oriented triangular faces of a tetrahedron.
pub const TETRAHEDRON_FACES: [[usize; 3]; 4] = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

/// Oriented edges of a triangle.
pub const TRIANGLE_EDGES: [[usize; 2]; 3] = [[0, 1], [2, 0], [1, 2]];

/// Pick the facet `local` out of `element`, keeping the table's vertex order.
#[inline]
pub fn oriented_facet<const N: usize, const F: usize>(
    element: &[u32; N],
    local: &[usize; F],
) -> [u32; F] {
    local.map(|i| element[i])
}

/// Ascending node tuple identifying a facet regardless of orientation.
pub type FacetKey<const F: usize> = [u32; F];

/// Ascending copy of a facet, used only for equality and multiplicity.
#[inline]
pub fn canonical_key<const F: usize>(facet: [u32; F]) -> FacetKey<F> {
    let mut key = facet;
    key.sort_unstable();
    key
}

/// How many elements share a facet, as a tagged classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Multiplicity {
    /// Owned by exactly one element: part of the boundary.
    Boundary,
    /// Shared by exactly two elements: internal to the mesh.
    Interior,
    /// Shared by three or more elements.
    NonManifold(usize),
}

impl Multiplicity {
    /// Classify a facet by its occurrence count. `count` must be non-zero.
    pub fn from_count(count: usize) -> Self {
        match count {
            1 => Multiplicity::Boundary,
            2 => Multiplicity::Interior,
            n => Multiplicity::NonManifold(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tetrahedron_faces_follow_table() {
        let tet = [10, 20, 30, 40];
        let faces: Vec<[u32; 3]> = TETRAHEDRON_FACES
            .iter()
            .map(|f| oriented_facet(&tet, f))
            .collect();
        assert_eq!(
            faces,
            vec![[10, 30, 20], [10, 20, 40], [10, 40, 30], [20, 30, 40]]
        );
    }

    #[test]
    fn triangle_edges_follow_table() {
        let tri = [7, 8, 9];
        let edges: Vec<[u32; 2]> = TRIANGLE_EDGES
            .iter()
            .map(|e| oriented_facet(&tri, e))
            .collect();
        assert_eq!(edges, vec![[7, 8], [9, 7], [8, 9]]);
    }

    #[test]
    fn canonical_key_is_sorted_copy() {
        assert_eq!(canonical_key([5, 1, 3]), [1, 3, 5]);
        assert_eq!(canonical_key([2, 1]), [1, 2]);
    }

    #[test]
    fn multiplicity_buckets() {
        assert_eq!(Multiplicity::from_count(1), Multiplicity::Boundary);
        assert_eq!(Multiplicity::from_count(2), Multiplicity::Interior);
        assert_eq!(Multiplicity::from_count(3), Multiplicity::NonManifold(3));
    }
}
