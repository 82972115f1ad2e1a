//! MTC `.t` dense mesh reader/writer.
//!
//! # Layout
//! ```text
//! <nodes> <dim> <elements> <dim + 1>
//! x y [z]         one line per node, 16 decimals, trailing space
//! a b c d         tetrahedra
//! a b c 0         boundary/shell triangles (dim 3)
//! a b c           planar triangles (dim 2)
//! a b 0           planar boundary edges (dim 2)
//! ```
//! `dim` is 2 for planar meshes and 3 for volumes and shells. Indices are
//! 1-based. Every line ends with a space before the newline.
//!
//! The dropped axis of a planar mesh is not stored, so [`MtcReader`] reports
//! planar meshes as lying in the `z` plane.

use crate::algs::dimension::{Axis, Dimensionality};
use crate::data::coordinates::Coordinates;
use crate::data::dense::DenseMesh;
use crate::io::{MeshReader, MeshWriter};
use crate::mesh_error::MeshError;
use std::io::{Read, Write};

#[derive(Debug, Default, Clone)]
pub struct MtcWriter;

#[derive(Debug, Default, Clone)]
pub struct MtcReader;

impl MtcWriter {
    fn write_indices<W: Write>(
        writer: &mut W,
        indices: &[u32],
        marker: bool,
    ) -> Result<(), MeshError> {
        for index in indices {
            write!(writer, "{index} ")?;
        }
        if marker {
            write!(writer, "0 ")?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl MeshWriter for MtcWriter {
    type Mesh = DenseMesh;

    fn write<W: Write>(&self, mut writer: W, mesh: &DenseMesh) -> Result<(), MeshError> {
        let dim = mesh.dimensionality.effective_dim();
        if mesh.coordinates.dimension() != dim {
            return Err(MeshError::InvalidGeometry(format!(
                "{}-component coordinates cannot be written as a {dim}D mesh",
                mesh.coordinates.dimension()
            )));
        }
        let volume_like = dim == 3;

        writeln!(
            writer,
            "{} {dim} {} {}",
            mesh.node_count(),
            mesh.element_count(),
            dim + 1
        )?;
        for node in mesh.coordinates.iter() {
            for value in node {
                write!(writer, "{value:.16} ")?;
            }
            writeln!(writer)?;
        }
        for tet in &mesh.tetrahedra {
            Self::write_indices(&mut writer, tet, false)?;
        }
        for tri in &mesh.triangles {
            Self::write_indices(&mut writer, tri, volume_like)?;
        }
        for edge in &mesh.edges {
            Self::write_indices(&mut writer, edge, true)?;
        }
        Ok(())
    }
}

fn parse_error(message: impl Into<String>) -> MeshError {
    MeshError::MeshIoParse(message.into())
}

fn parse_indices(line: &str) -> Result<Vec<u32>, MeshError> {
    line.split_whitespace()
        .map(|raw| {
            raw.parse::<u32>()
                .map_err(|_| parse_error(format!("invalid node index: {raw}")))
        })
        .collect()
}

impl MeshReader for MtcReader {
    type Mesh = DenseMesh;

    fn read<R: Read>(&self, mut reader: R) -> Result<DenseMesh, MeshError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        let mut lines = contents.lines();

        let header = lines.next().ok_or_else(|| parse_error("missing header"))?;
        let header: Vec<usize> = header
            .split_whitespace()
            .map(|raw| {
                raw.parse::<usize>()
                    .map_err(|_| parse_error(format!("invalid header field: {raw}")))
            })
            .collect::<Result<_, _>>()?;
        let [node_count, dim, element_count, arity] = header[..] else {
            return Err(parse_error("header must have 4 fields"));
        };
        if !(dim == 2 || dim == 3) || arity != dim + 1 {
            return Err(parse_error(format!("invalid header dimension {dim} / {arity}")));
        }

        let value_count = node_count
            .checked_mul(dim)
            .ok_or_else(|| parse_error(format!("node count {node_count} is too large")))?;
        // Counts come from the file; the buffer grows as lines are read.
        let mut values = Vec::with_capacity(value_count.min(1 << 20));
        for idx in 0..node_count {
            let line = lines
                .next()
                .ok_or_else(|| parse_error(format!("missing node {}", idx + 1)))?;
            let before = values.len();
            for raw in line.split_whitespace() {
                values.push(
                    raw.parse::<f64>()
                        .map_err(|_| parse_error(format!("invalid coordinate: {raw}")))?,
                );
            }
            if values.len() - before != dim {
                return Err(parse_error(format!(
                    "node {} has {} coordinates, expected {dim}",
                    idx + 1,
                    values.len() - before
                )));
            }
        }
        let coordinates = Coordinates::try_new(dim, values)?;

        let mut tetrahedra = Vec::new();
        let mut triangles = Vec::new();
        let mut edges = Vec::new();
        for idx in 0..element_count {
            let line = lines
                .next()
                .ok_or_else(|| parse_error(format!("missing element {}", idx + 1)))?;
            match (dim, parse_indices(line)?.as_slice()) {
                (3, &[a, b, c, 0]) | (2, &[a, b, c]) if c != 0 => triangles.push([a, b, c]),
                (3, &[a, b, c, d]) => tetrahedra.push([a, b, c, d]),
                (2, &[a, b, 0]) => edges.push([a, b]),
                (_, fields) => {
                    return Err(parse_error(format!(
                        "element {} has unexpected layout {fields:?}",
                        idx + 1
                    )));
                }
            }
        }

        let dimensionality = match dim {
            2 => Dimensionality::Planar { dropped: Axis::Z },
            _ if tetrahedra.is_empty() => Dimensionality::Shell,
            _ => Dimensionality::Volume,
        };
        Ok(DenseMesh {
            dimensionality,
            coordinates,
            tetrahedra,
            triangles,
            edges,
        })
    }
}
