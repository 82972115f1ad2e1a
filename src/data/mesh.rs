//! Raw mesh tables as produced by a loader.
//!
//! Element connectivity stores **1-based** node positions, the same numbering
//! the `.t` format uses, so indices pass through the pipeline unshifted.

use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};

/// Tetrahedron connectivity `(v0, v1, v2, v3)`.
pub type Tetrahedron = [u32; 4];
/// Triangle connectivity `(v0, v1, v2)`.
pub type Triangle = [u32; 3];
/// Edge connectivity `(v0, v1)`.
pub type Edge = [u32; 2];

/// Node table plus interior element sets, straight from the input file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMesh {
    /// Node coordinates; position `i` is node `i + 1`.
    pub nodes: Vec<[f64; 3]>,
    /// Volume elements.
    pub tetrahedra: Vec<Tetrahedron>,
    /// Surface elements.
    pub triangles: Vec<Triangle>,
}

impl RawMesh {
    /// Bundle loader output.
    pub fn new(
        nodes: Vec<[f64; 3]>,
        tetrahedra: Vec<Tetrahedron>,
        triangles: Vec<Triangle>,
    ) -> Self {
        Self {
            nodes,
            tetrahedra,
            triangles,
        }
    }

    /// Number of nodes in the table.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when there is nothing to convert.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.tetrahedra.is_empty() && self.triangles.is_empty()
    }

    /// Check that every element index lies in `[1, node_count]`.
    pub fn validate_indices(&self) -> Result<(), MeshError> {
        let node_count = self.node_count();
        let all = self
            .tetrahedra
            .iter()
            .flatten()
            .chain(self.triangles.iter().flatten());
        for &index in all {
            if index == 0 || index as usize > node_count {
                return Err(MeshError::DanglingIndex {
                    index: u64::from(index),
                    node_count,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_in_range_indices() {
        let mesh = RawMesh::new(vec![[0.0; 3]; 3], vec![], vec![[1, 2, 3]]);
        assert!(mesh.validate_indices().is_ok());
    }

    #[test]
    fn validate_rejects_zero_and_overflow() {
        let zero = RawMesh::new(vec![[0.0; 3]; 3], vec![], vec![[0, 2, 3]]);
        assert_eq!(
            zero.validate_indices(),
            Err(MeshError::DanglingIndex {
                index: 0,
                node_count: 3
            })
        );
        let past = RawMesh::new(vec![[0.0; 3]; 3], vec![[1, 2, 3, 4]], vec![]);
        assert_eq!(
            past.validate_indices(),
            Err(MeshError::DanglingIndex {
                index: 4,
                node_count: 3
            })
        );
    }
}
