//! Intrinsic dimensionality of a mesh.
//!
//! A mesh with any tetrahedron is a volume. Otherwise the node table is
//! scanned for an axis on which every node has the *exactly* same value
//! (x, then y, then z). The first such axis is dropped and the mesh is
//! planar. With no constant axis the triangles form a shell embedded in 3D.
//!
//! Exact floating-point equality is intended: a plane meshed with rounding
//! noise on the constant axis classifies as a shell.

use crate::data::coordinates::Coordinates;
use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};

/// A coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Axes in the order they are tested for constancy.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two remaining axes, in their original order.
    pub fn remaining(self) -> [usize; 2] {
        match self {
            Axis::X => [1, 2],
            Axis::Y => [0, 2],
            Axis::Z => [0, 1],
        }
    }
}

/// Intrinsic dimensionality of a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimensionality {
    /// Triangles in a coordinate plane; `dropped` is the constant axis.
    Planar { dropped: Axis },
    /// Tetrahedral volume.
    Volume,
    /// Non-planar triangulated surface ("2.5D").
    Shell,
}

impl Dimensionality {
    /// Dimension written to the `.t` header: 2 for planar, 3 otherwise.
    pub fn effective_dim(self) -> usize {
        match self {
            Dimensionality::Planar { .. } => 2,
            Dimensionality::Volume | Dimensionality::Shell => 3,
        }
    }

    /// Human-readable label: `"2"`, `"3"` or `"2.5"`.
    pub fn label(self) -> &'static str {
        match self {
            Dimensionality::Planar { .. } => "2",
            Dimensionality::Volume => "3",
            Dimensionality::Shell => "2.5",
        }
    }
}

/// First axis on which every node has the same value, if any.
pub fn constant_axis(nodes: &[[f64; 3]]) -> Option<Axis> {
    let first = nodes.first()?;
    Axis::ALL.into_iter().find(|axis| {
        let a = axis.index();
        nodes.iter().all(|node| node[a] == first[a])
    })
}

/// Classify a mesh from its node table and whether it has volume elements.
pub fn classify(nodes: &[[f64; 3]], has_tetrahedra: bool) -> Result<Dimensionality, MeshError> {
    if has_tetrahedra {
        return Ok(Dimensionality::Volume);
    }
    if nodes.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    Ok(match constant_axis(nodes) {
        Some(dropped) => Dimensionality::Planar { dropped },
        None => Dimensionality::Shell,
    })
}

/// Build the coordinate table for `dimensionality`, dropping the constant
/// axis of a planar mesh.
pub fn project(nodes: &[[f64; 3]], dimensionality: Dimensionality) -> Coordinates {
    match dimensionality {
        Dimensionality::Planar { dropped } => Coordinates::from_axes(nodes, &dropped.remaining()),
        Dimensionality::Volume | Dimensionality::Shell => Coordinates::from_xyz(nodes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tetrahedra_force_volume() {
        let nodes = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        assert_eq!(classify(&nodes, true).unwrap(), Dimensionality::Volume);
    }

    #[test]
    fn x_axis_has_priority() {
        // Constant on both x and z: x wins.
        let nodes = [[1.0, 0.0, 5.0], [1.0, 2.0, 5.0], [1.0, 3.0, 5.0]];
        assert_eq!(
            classify(&nodes, false).unwrap(),
            Dimensionality::Planar { dropped: Axis::X }
        );
    }

    #[test]
    fn y_constant_keeps_x_then_z() {
        let nodes = [[1.0, 7.0, 2.0], [3.0, 7.0, 4.0]];
        let dim = classify(&nodes, false).unwrap();
        assert_eq!(dim, Dimensionality::Planar { dropped: Axis::Y });
        let coords = project(&nodes, dim);
        assert_eq!(coords.dimension(), 2);
        assert_eq!(coords.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn non_planar_is_shell() {
        let nodes = [[0.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 1.0, 0.5]];
        let dim = classify(&nodes, false).unwrap();
        assert_eq!(dim, Dimensionality::Shell);
        assert_eq!(dim.effective_dim(), 3);
        assert_eq!(dim.label(), "2.5");
        assert_eq!(project(&nodes, dim).dimension(), 3);
    }

    #[test]
    fn near_planar_noise_is_not_planar() {
        let nodes = [[0.0, 0.0, 0.0], [1.0, 0.0, 1e-15], [0.0, 1.0, 0.0]];
        assert_eq!(classify(&nodes, false).unwrap(), Dimensionality::Shell);
    }

    #[test]
    fn empty_without_volume_is_an_error() {
        assert_eq!(classify(&[], false), Err(MeshError::EmptyMesh));
    }
}
