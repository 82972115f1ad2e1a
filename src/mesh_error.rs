//! MeshError: unified error type for the conversion pipeline.
//!
//! Every stage returns `Result<_, MeshError>`. A failed stage aborts the whole
//! conversion; nothing is written until a complete [`DenseMesh`] exists.
//!
//! [`DenseMesh`]: crate::data::dense::DenseMesh

use thiserror::Error;

/// Unified error type for gmsh-mtc operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The `$MeshFormat` header declares a version other than 2.x or 4.x.
    #[error("unsupported gmsh format version `{0}` (expected 2.x or 4.x)")]
    UnsupportedSchemaVersion(String),
    /// Malformed text in a mesh file.
    #[error("mesh parse error: {0}")]
    MeshIoParse(String),
    /// Underlying I/O failure, stored as text so the error stays `Clone`.
    #[error("I/O error: {0}")]
    Io(String),
    /// An element references a node outside the node table.
    #[error("element references node {index}, but the mesh has {node_count} nodes")]
    DanglingIndex { index: u64, node_count: usize },
    /// A derived facet is shared by more than two elements.
    #[error("non-manifold facet {facet:?} is shared by {count} elements")]
    NonManifoldFacet { facet: Vec<u32>, count: usize },
    /// The reference triangle for 2D orientation has zero area.
    #[error("orientation reference triangle {triangle:?} is degenerate (zero cross product)")]
    DegenerateOrientationReference { triangle: [u32; 3] },
    /// No nodes and no elements to convert.
    #[error("mesh is empty: no nodes or elements to convert")]
    EmptyMesh,
    /// The external meshing tool could not be run or failed.
    #[error("external tool failed: {0}")]
    ExternalTool(String),
    /// Invalid parameters for a generated mesh.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl From<std::io::Error> for MeshError {
    fn from(err: std::io::Error) -> Self {
        MeshError::Io(err.to_string())
    }
}
