//! # gmsh-mtc
//!
//! Converts Gmsh `.msh` meshes (format 2 and 4, ASCII) into the MTC `.t`
//! dense format. A conversion runs in this order:
//!
//! - read nodes, triangles and tetrahedra ([`io::gmsh::GmshReader`])
//! - classify the mesh as planar (2D), volume (3D) or surface shell (2.5D)
//! - orient planar triangles consistently
//! - extract boundary faces (3D) or boundary edges (2D)
//! - drop unreferenced nodes and renumber densely
//! - write `.t` ([`io::mtc::MtcWriter`])
//!
//! STL inputs are first remeshed by an external `gmsh` executable
//! ([`io::stl::StlRemesher`]).
//!
//! ```no_run
//! use gmsh_mtc::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), MeshError> {
//! let raw = GmshReader.read_file(Path::new("part.msh"))?;
//! let conversion = convert(raw, &ConvertOptions::default())?;
//! MtcWriter.write_file(Path::new("part.t"), &conversion.mesh)?;
//! # Ok(())
//! # }
//! ```

pub mod algs;
pub mod data;
pub mod io;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::boundary::{NonManifoldHandling, boundary_edges, boundary_faces};
    pub use crate::algs::compact::{IndexRemap, compact_nodes};
    pub use crate::algs::convert::{Conversion, ConversionReport, ConvertOptions, convert};
    pub use crate::algs::dimension::{Axis, Dimensionality};
    pub use crate::algs::orientation::OrientationOutcome;
    pub use crate::data::coordinates::Coordinates;
    pub use crate::data::dense::DenseMesh;
    pub use crate::data::mesh::RawMesh;
    pub use crate::io::gmsh::{GmshReader, SchemaVersion};
    pub use crate::io::mtc::{MtcReader, MtcWriter};
    pub use crate::io::stl::StlRemesher;
    pub use crate::io::{MeshReader, MeshWriter};
    pub use crate::mesh_error::MeshError;
    pub use crate::topology::cell_type::CellType;
}
