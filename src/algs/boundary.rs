//! Boundary extraction by facet multiplicity.
//!
//! Every element emits its facets through a fixed orientation table
//! ([`TETRAHEDRON_FACES`] or [`TRIANGLE_EDGES`]). A facet shared by two
//! adjacent elements is emitted twice and is interior; a facet emitted once
//! lies on the boundary. Grouping is done by sorting `(canonical key,
//! emission index)` pairs, which keeps the pass allocation-light and needs no
//! adjacency structure: `O(E log E)` for `E` emitted facets.
//!
//! Boundary facets keep the oriented vertex order they were emitted with.
//! Output is ordered by ascending canonical key.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::data::mesh::{Edge, Tetrahedron, Triangle};
use crate::mesh_error::MeshError;
use crate::topology::facet::{
    FacetKey, Multiplicity, TETRAHEDRON_FACES, TRIANGLE_EDGES, canonical_key, oriented_facet,
};

/// Behavior when a facet is shared by more than two elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NonManifoldHandling {
    /// Log a warning per offending facet and leave it out of the boundary.
    Warn,
    /// Return [`MeshError::NonManifoldFacet`] for the first offending facet.
    #[default]
    Error,
}

/// Facets grouped by multiplicity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacetClassification<const F: usize> {
    /// Oriented facets owned by exactly one element.
    pub boundary: Vec<[u32; F]>,
    /// Number of distinct facets shared by exactly two elements.
    pub interior: usize,
    /// Canonical keys of facets shared by three or more elements, with counts.
    pub non_manifold: Vec<(FacetKey<F>, usize)>,
}

/// Emit every facet of every element and group them by canonical key.
pub fn classify_facets<const N: usize, const F: usize, const K: usize>(
    elements: &[[u32; N]],
    table: &[[usize; F]; K],
) -> FacetClassification<F> {
    let mut oriented: Vec<[u32; F]> = Vec::with_capacity(elements.len() * K);
    for element in elements {
        for local in table {
            oriented.push(oriented_facet(element, local));
        }
    }

    let mut keyed: Vec<(FacetKey<F>, usize)> = oriented
        .iter()
        .enumerate()
        .map(|(idx, facet)| (canonical_key(*facet), idx))
        .collect();
    // The emission index breaks ties, so this matches a stable sort by key.
    keyed.sort_unstable();

    let mut classification = FacetClassification {
        boundary: Vec::new(),
        interior: 0,
        non_manifold: Vec::new(),
    };
    let groups = keyed.iter().chunk_by(|(key, _)| *key);
    for (key, mut group) in &groups {
        let Some(&(_, first)) = group.next() else {
            continue;
        };
        match Multiplicity::from_count(1 + group.count()) {
            Multiplicity::Boundary => classification.boundary.push(oriented[first]),
            Multiplicity::Interior => classification.interior += 1,
            Multiplicity::NonManifold(count) => classification.non_manifold.push((key, count)),
        }
    }
    classification
}

/// Boundary facets of `elements` under `table`, with non-manifold facets
/// handled according to `handling`.
pub fn extract_boundary<const N: usize, const F: usize, const K: usize>(
    elements: &[[u32; N]],
    table: &[[usize; F]; K],
    handling: NonManifoldHandling,
) -> Result<Vec<[u32; F]>, MeshError> {
    let classification = classify_facets(elements, table);
    log::debug!(
        "facets: {} boundary, {} interior, {} non-manifold",
        classification.boundary.len(),
        classification.interior,
        classification.non_manifold.len()
    );

    match (classification.non_manifold.first(), handling) {
        (None, _) => {}
        (Some((key, count)), NonManifoldHandling::Error) => {
            return Err(MeshError::NonManifoldFacet {
                facet: key.to_vec(),
                count: *count,
            });
        }
        (Some(_), NonManifoldHandling::Warn) => {
            for (key, count) in &classification.non_manifold {
                log::warn!("dropping non-manifold facet {key:?} shared by {count} elements");
            }
        }
    }
    Ok(classification.boundary)
}

/// Boundary triangles of a tetrahedral volume.
pub fn boundary_faces(
    tetrahedra: &[Tetrahedron],
    handling: NonManifoldHandling,
) -> Result<Vec<Triangle>, MeshError> {
    extract_boundary(tetrahedra, &TETRAHEDRON_FACES, handling)
}

/// Boundary edges of a triangulated surface.
pub fn boundary_edges(
    triangles: &[Triangle],
    handling: NonManifoldHandling,
) -> Result<Vec<Edge>, MeshError> {
    extract_boundary(triangles, &TRIANGLE_EDGES, handling)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_tetrahedron_keeps_all_faces_in_table_order() {
        let faces = boundary_faces(&[[1, 2, 3, 4]], NonManifoldHandling::Error).unwrap();
        // Sorted by canonical key: 123, 124, 134, 234.
        assert_eq!(faces, vec![[1, 3, 2], [1, 2, 4], [1, 4, 3], [2, 3, 4]]);
    }

    #[test]
    fn single_triangle_keeps_all_edges() {
        let edges = boundary_edges(&[[1, 2, 3]], NonManifoldHandling::Error).unwrap();
        // Sorted by canonical key: 12, 13, 23.
        assert_eq!(edges, vec![[1, 2], [3, 1], [2, 3]]);
    }

    #[test]
    fn shared_face_cancels() {
        // Two tets glued on face {2,3,4}.
        let tets = [[1, 2, 3, 4], [5, 2, 4, 3]];
        let classification = classify_facets(&tets, &TETRAHEDRON_FACES);
        assert_eq!(classification.boundary.len(), 6);
        assert_eq!(classification.interior, 1);
        assert!(classification.non_manifold.is_empty());
        assert!(
            classification
                .boundary
                .iter()
                .all(|f| canonical_key(*f) != [2, 3, 4])
        );
    }

    #[test]
    fn empty_input_is_empty_boundary() {
        assert!(boundary_faces(&[], NonManifoldHandling::Error).unwrap().is_empty());
        assert!(boundary_edges(&[], NonManifoldHandling::Error).unwrap().is_empty());
    }

    #[test]
    fn three_triangles_on_one_edge() {
        let tris = [[1, 2, 3], [2, 1, 4], [1, 2, 5]];
        let err = boundary_edges(&tris, NonManifoldHandling::Error).unwrap_err();
        assert_eq!(
            err,
            MeshError::NonManifoldFacet {
                facet: vec![1, 2],
                count: 3
            }
        );

        let edges = boundary_edges(&tris, NonManifoldHandling::Warn).unwrap();
        assert_eq!(edges.len(), 6);
        assert!(edges.iter().all(|e| canonical_key(*e) != [1, 2]));
    }
}
