//! Mesh I/O: Gmsh `.msh` input, MTC `.t` output, STL pre-conversion.
//!
//! Readers and writers are small trait objects over `std::io` streams so
//! tests can run on in-memory buffers. The file helpers buffer both ends.

pub mod gmsh;
pub mod mtc;
pub mod stl;

use crate::mesh_error::MeshError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Trait for mesh readers.
pub trait MeshReader {
    /// Mesh type produced by the reader.
    type Mesh;

    /// Parse mesh data from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<Self::Mesh, MeshError>;

    /// Parse mesh data from a file.
    fn read_file(&self, path: &Path) -> Result<Self::Mesh, MeshError> {
        let file = File::open(path)
            .map_err(|e| MeshError::Io(format!("{}: {e}", path.display())))?;
        self.read(BufReader::new(file))
    }
}

/// Trait for mesh writers.
pub trait MeshWriter {
    /// Mesh type expected by the writer.
    type Mesh;

    /// Write mesh data to a writer.
    fn write<W: Write>(&self, writer: W, mesh: &Self::Mesh) -> Result<(), MeshError>;

    /// Write mesh data to a file, creating or truncating it.
    fn write_file(&self, path: &Path, mesh: &Self::Mesh) -> Result<(), MeshError> {
        let file = File::create(path)
            .map_err(|e| MeshError::Io(format!("{}: {e}", path.display())))?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer, mesh)?;
        writer.flush()?;
        Ok(())
    }
}
