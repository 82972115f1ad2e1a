//! Cell type metadata for linear simplicial elements.

use serde::{Deserialize, Serialize};

/// Linear simplex types handled by the converter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// 1D segment/edge.
    Segment,
    /// 2D simplex (triangle).
    Triangle,
    /// 3D simplex (tet).
    Tetrahedron,
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Segment => 1,
            CellType::Triangle => 2,
            CellType::Tetrahedron => 3,
        }
    }

    /// Number of vertices in the cell's connectivity.
    pub fn vertex_count(self) -> usize {
        usize::from(self.dimension()) + 1
    }

    /// Maps a Gmsh element type code to a supported cell type.
    ///
    /// Codes 1, 2 and 4 are the linear line, triangle and tetrahedron. Every
    /// other code (quads, hexes, points, higher-order cells) returns `None`.
    pub fn from_gmsh(code: u32) -> Option<Self> {
        match code {
            1 => Some(CellType::Segment),
            2 => Some(CellType::Triangle),
            4 => Some(CellType::Tetrahedron),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_counts_follow_dimension() {
        assert_eq!(CellType::Segment.vertex_count(), 2);
        assert_eq!(CellType::Triangle.vertex_count(), 3);
        assert_eq!(CellType::Tetrahedron.vertex_count(), 4);
    }

    #[test]
    fn gmsh_codes() {
        assert_eq!(CellType::from_gmsh(2), Some(CellType::Triangle));
        assert_eq!(CellType::from_gmsh(4), Some(CellType::Tetrahedron));
        assert_eq!(CellType::from_gmsh(3), None);
        assert_eq!(CellType::from_gmsh(15), None);
    }
}
