//! Topology primitives for simplicial meshes.
//!
//! - [`cell_type`]: the supported linear simplices and their Gmsh codes.
//! - [`facet`]: oriented facet tables, canonical keys and multiplicity buckets.

pub mod cell_type;
pub mod facet;

pub use cell_type::CellType;
pub use facet::{FacetKey, Multiplicity, TETRAHEDRON_FACES, TRIANGLE_EDGES};
