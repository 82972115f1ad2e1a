//! Data module: node coordinates, raw element tables, compacted output mesh.
#![warn(missing_docs)]

pub mod coordinates;
pub mod dense;
pub mod mesh;

pub use coordinates::Coordinates;
pub use dense::DenseMesh;
pub use mesh::{Edge, RawMesh, Tetrahedron, Triangle};
