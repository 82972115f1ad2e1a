//! Conversion algorithms, in pipeline order.

pub mod boundary;
pub mod compact;
pub mod convert;
pub mod dimension;
pub mod meshgen;
pub mod orientation;

pub use boundary::{NonManifoldHandling, boundary_edges, boundary_faces};
pub use compact::{IndexRemap, compact_nodes};
pub use convert::{ConversionReport, ConvertOptions, convert};
pub use dimension::{Axis, Dimensionality};
