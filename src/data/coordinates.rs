//! Geometry/coordinates storage for mesh nodes.
//!
//! Coordinates are stored as one flat buffer with a fixed dimension per node.
//! Node `i` (0-based) occupies `values[i * dimension..(i + 1) * dimension]`.

use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};

/// Coordinate storage with an attached dimension.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    dimension: usize,
    values: Vec<f64>,
}

impl Coordinates {
    /// Wrap a flat buffer, validating its length against `dimension`.
    pub fn try_new(dimension: usize, values: Vec<f64>) -> Result<Self, MeshError> {
        if dimension == 0 {
            return Err(MeshError::InvalidGeometry(
                "coordinate dimension must be non-zero".into(),
            ));
        }
        if values.len() % dimension != 0 {
            return Err(MeshError::InvalidGeometry(format!(
                "{} coordinate values do not split into {dimension}-component nodes",
                values.len()
            )));
        }
        Ok(Self { dimension, values })
    }

    /// Build 3-component coordinates from node tuples.
    pub fn from_xyz(nodes: &[[f64; 3]]) -> Self {
        Self::from_axes(nodes, &[0, 1, 2])
    }

    /// Build coordinates keeping only `axes` (each `< 3`) of every node, in
    /// the given order.
    pub fn from_axes(nodes: &[[f64; 3]], axes: &[usize]) -> Self {
        Self {
            dimension: axes.len(),
            values: nodes
                .iter()
                .flat_map(|node| axes.iter().map(move |&a| node[a]))
                .collect(),
        }
    }

    /// Returns the spatial dimension per node.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of nodes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len() / self.dimension
    }

    /// `true` when no nodes are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Coordinates of the node at 0-based position `idx`.
    #[inline]
    pub fn node(&self, idx: usize) -> Option<&[f64]> {
        let start = idx.checked_mul(self.dimension)?;
        self.values.get(start..start + self.dimension)
    }

    /// Iterate over per-node coordinate slices in order.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, f64> {
        self.values.chunks_exact(self.dimension)
    }

    /// Keep only the nodes whose flag is `true`, preserving order.
    pub fn retain_nodes(self, keep: &[bool]) -> Self {
        let dimension = self.dimension;
        let values = self
            .values
            .chunks_exact(dimension)
            .zip(keep)
            .filter(|(_, keep)| **keep)
            .flat_map(|(node, _)| node.iter().copied())
            .collect();
        Self { dimension, values }
    }

    /// Flat view of all values.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_buffer() {
        let err = Coordinates::try_new(3, vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, MeshError::InvalidGeometry(_)));
    }

    #[test]
    fn node_lookup_and_retain() {
        let coords = Coordinates::try_new(2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(coords.len(), 3);
        assert_eq!(coords.node(1), Some(&[2.0, 3.0][..]));
        assert_eq!(coords.node(3), None);

        let kept = coords.retain_nodes(&[true, false, true]);
        assert_eq!(kept.as_slice(), &[0.0, 1.0, 4.0, 5.0]);
        assert_eq!(kept.len(), 2);
    }
}
