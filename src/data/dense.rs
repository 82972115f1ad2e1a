//! The compacted mesh handed to the `.t` writer.

use crate::algs::dimension::Dimensionality;
use crate::data::coordinates::Coordinates;
use crate::data::mesh::{Edge, Tetrahedron, Triangle};
use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};

/// Compacted node table plus the element sets that will be written, in
/// emission order: tetrahedra, triangles, edges.
///
/// For volume meshes `triangles` holds the extracted boundary faces; for
/// planar meshes it holds the oriented interior triangles and `edges` the
/// boundary; for shells it holds the input triangles unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DenseMesh {
    /// Classification that drove extraction and output layout.
    pub dimensionality: Dimensionality,
    /// Compacted nodes (2 components for planar meshes, 3 otherwise).
    pub coordinates: Coordinates,
    /// Volume elements.
    pub tetrahedra: Vec<Tetrahedron>,
    /// Boundary faces, planar triangles or shell triangles.
    pub triangles: Vec<Triangle>,
    /// Boundary edges of a planar mesh.
    pub edges: Vec<Edge>,
}

impl DenseMesh {
    /// Number of compacted nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Sum of all element set sizes.
    pub fn element_count(&self) -> usize {
        self.tetrahedra.len() + self.triangles.len() + self.edges.len()
    }

    /// Iterate over every node index of every element.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.tetrahedra
            .iter()
            .flatten()
            .chain(self.triangles.iter().flatten())
            .chain(self.edges.iter().flatten())
            .copied()
    }

    /// Check the post-compaction invariants: every index lies in
    /// `[1, node_count]` and every node is referenced at least once.
    pub fn validate(&self) -> Result<(), MeshError> {
        let node_count = self.node_count();
        let mut referenced = vec![false; node_count];
        for index in self.indices() {
            let slot = (index as usize)
                .checked_sub(1)
                .and_then(|i| referenced.get_mut(i))
                .ok_or(MeshError::DanglingIndex {
                    index: u64::from(index),
                    node_count,
                })?;
            *slot = true;
        }
        if let Some(pos) = referenced.iter().position(|r| !r) {
            return Err(MeshError::MeshIoParse(format!(
                "node {} is not referenced by any element",
                pos + 1
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planar(coords: Vec<f64>, triangles: Vec<Triangle>, edges: Vec<Edge>) -> DenseMesh {
        DenseMesh {
            dimensionality: Dimensionality::Volume,
            coordinates: Coordinates::try_new(3, coords).unwrap(),
            tetrahedra: vec![],
            triangles,
            edges,
        }
    }

    #[test]
    fn counts_all_sets() {
        let mesh = planar(vec![0.0; 9], vec![[1, 2, 3]], vec![[1, 2], [2, 3]]);
        assert_eq!(mesh.element_count(), 3);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn validate_flags_unreferenced_node() {
        let mesh = planar(vec![0.0; 12], vec![[1, 2, 3]], vec![]);
        assert!(matches!(mesh.validate(), Err(MeshError::MeshIoParse(_))));
    }

    #[test]
    fn validate_flags_out_of_range_index() {
        let mesh = planar(vec![0.0; 9], vec![[1, 2, 4]], vec![]);
        assert_eq!(
            mesh.validate(),
            Err(MeshError::DanglingIndex {
                index: 4,
                node_count: 3
            })
        );
    }
}
