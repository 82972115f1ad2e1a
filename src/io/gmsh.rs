//! Gmsh `.msh` reader.
//!
//! # Supported format
//! - ASCII `.msh` version **2.x** (one element per line with inline tags).
//! - ASCII `.msh` version **4.0** and **4.1** (entity blocks).
//! - Element types: 2 (triangle) and 4 (tetrahedron). Every other element
//!   type is skipped.
//! - Several `$Nodes`/`$Elements` sections are concatenated in file order.
//!
//! # Node numbering
//! Node tags need not be contiguous. Each node gets its 1-based position in
//! file order, and element connectivity is translated from tags to positions.
//! For the usual `1..=n` tagging the two are identical.
//!
//! # Limitations
//! - Binary files are not supported.
//! - Physical groups and other element tags are ignored.

use crate::data::mesh::{RawMesh, Tetrahedron, Triangle};
use crate::io::MeshReader;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use std::collections::HashMap;
use std::io::Read;
use std::str::{FromStr, Lines};

/// `.msh` schema variants understood by [`GmshReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// 2.x: `tag type ntags <tags…> <nodes…>` element lines.
    V2,
    /// 4.0: entity blocks, node tags inline with coordinates.
    V40,
    /// 4.1: entity blocks, node tags listed before coordinates.
    V41,
}

impl SchemaVersion {
    /// Parse the version field of a `$MeshFormat` line.
    pub fn parse(raw: &str) -> Result<Self, MeshError> {
        let (major, minor) = raw.split_once('.').unwrap_or((raw, "0"));
        match (major, minor) {
            ("2", _) => Ok(SchemaVersion::V2),
            ("4", "0") => Ok(SchemaVersion::V40),
            ("4", _) => Ok(SchemaVersion::V41),
            _ => Err(MeshError::UnsupportedSchemaVersion(raw.to_string())),
        }
    }
}

/// Gmsh `.msh` reader for ASCII v2 and v4 meshes.
#[derive(Debug, Default, Clone)]
pub struct GmshReader;

/// Nodes and raw element tags collected while scanning a file.
#[derive(Default)]
struct ScanState {
    version: Option<SchemaVersion>,
    positions: HashMap<u64, u32>,
    nodes: Vec<[f64; 3]>,
    tetrahedra: Vec<[u64; 4]>,
    triangles: Vec<[u64; 3]>,
    skipped_elements: usize,
}

impl ScanState {
    fn push_node(&mut self, tag: u64, xyz: [f64; 3]) -> Result<(), MeshError> {
        let position = u32::try_from(self.nodes.len() + 1)
            .map_err(|_| parse_error("too many nodes for 32-bit indices"))?;
        if self.positions.insert(tag, position).is_some() {
            return Err(parse_error(format!("duplicate node tag {tag}")));
        }
        self.nodes.push(xyz);
        Ok(())
    }

    fn push_element(&mut self, code: u32, nodes: &[u64]) -> Result<(), MeshError> {
        match CellType::from_gmsh(code) {
            Some(cell @ CellType::Tetrahedron) => self.tetrahedra.push(take_nodes(cell, nodes)?),
            Some(cell @ CellType::Triangle) => self.triangles.push(take_nodes(cell, nodes)?),
            _ => self.skipped_elements += 1,
        }
        Ok(())
    }

    fn version(&self) -> Result<SchemaVersion, MeshError> {
        self.version
            .ok_or_else(|| parse_error("section found before $MeshFormat"))
    }

    fn resolve<const N: usize>(&self, tags: &[u64; N]) -> Result<[u32; N], MeshError> {
        let mut out = [0u32; N];
        for (slot, tag) in out.iter_mut().zip(tags) {
            *slot = *self.positions.get(tag).ok_or(MeshError::DanglingIndex {
                index: *tag,
                node_count: self.nodes.len(),
            })?;
        }
        Ok(out)
    }

    fn finish(self) -> Result<RawMesh, MeshError> {
        if self.version.is_none() {
            return Err(parse_error("missing $MeshFormat section"));
        }
        let tetrahedra = self
            .tetrahedra
            .iter()
            .map(|t| self.resolve(t))
            .collect::<Result<Vec<Tetrahedron>, _>>()?;
        let triangles = self
            .triangles
            .iter()
            .map(|t| self.resolve(t))
            .collect::<Result<Vec<Triangle>, _>>()?;
        if self.skipped_elements > 0 {
            log::debug!(
                "skipped {} elements that are neither triangles nor tetrahedra",
                self.skipped_elements
            );
        }
        log::debug!(
            "read {} nodes, {} tetrahedra, {} triangles",
            self.nodes.len(),
            tetrahedra.len(),
            triangles.len()
        );
        Ok(RawMesh::new(self.nodes, tetrahedra, triangles))
    }
}

fn parse_error(message: impl Into<String>) -> MeshError {
    MeshError::MeshIoParse(message.into())
}

fn next_line<'a>(lines: &mut Lines<'a>, what: &str) -> Result<&'a str, MeshError> {
    lines
        .next()
        .ok_or_else(|| parse_error(format!("unexpected end of file while reading {what}")))
}

fn parse_field<T: FromStr>(raw: Option<&str>, what: &str) -> Result<T, MeshError> {
    let raw = raw.ok_or_else(|| parse_error(format!("missing {what}")))?;
    raw.parse::<T>()
        .map_err(|_| parse_error(format!("invalid {what}: {raw}")))
}

fn parse_fields<T: FromStr>(line: &str, what: &str) -> Result<Vec<T>, MeshError> {
    line.split_whitespace()
        .map(|raw| parse_field(Some(raw), what))
        .collect()
}

fn parse_xyz<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<[f64; 3], MeshError> {
    Ok([
        parse_field(parts.next(), "x coordinate")?,
        parse_field(parts.next(), "y coordinate")?,
        parse_field(parts.next(), "z coordinate")?,
    ])
}

fn take_nodes<const N: usize>(cell: CellType, nodes: &[u64]) -> Result<[u64; N], MeshError> {
    debug_assert_eq!(cell.vertex_count(), N);
    <[u64; N]>::try_from(nodes).map_err(|_| {
        parse_error(format!(
            "{cell:?} has {} node ids, expected {}",
            nodes.len(),
            cell.vertex_count()
        ))
    })
}

fn expect_end(lines: &mut Lines<'_>, marker: &str) -> Result<(), MeshError> {
    let line = next_line(lines, marker)?;
    if line.trim() != marker {
        return Err(parse_error(format!("expected {marker}, found `{}`", line.trim())));
    }
    Ok(())
}

impl GmshReader {
    fn parse_format(line: &str) -> Result<SchemaVersion, MeshError> {
        let mut parts = line.split_whitespace();
        let version = parts
            .next()
            .ok_or_else(|| parse_error("missing mesh format version"))?;
        let version = SchemaVersion::parse(version)?;
        let file_type = parts
            .next()
            .ok_or_else(|| parse_error("missing mesh format type"))?;
        if file_type != "0" {
            return Err(parse_error("binary .msh files are not supported"));
        }
        Ok(version)
    }

    fn read_nodes_v2(lines: &mut Lines<'_>, state: &mut ScanState) -> Result<(), MeshError> {
        let count: usize = parse_field(Some(next_line(lines, "node count")?.trim()), "node count")?;
        for _ in 0..count {
            let line = next_line(lines, "node list")?;
            let mut parts = line.split_whitespace();
            let tag: u64 = parse_field(parts.next(), "node tag")?;
            let xyz = parse_xyz(&mut parts)?;
            state.push_node(tag, xyz)?;
        }
        Ok(())
    }

    fn read_nodes_v4(
        lines: &mut Lines<'_>,
        state: &mut ScanState,
        version: SchemaVersion,
    ) -> Result<(), MeshError> {
        let header: Vec<usize> = parse_fields(next_line(lines, "node header")?, "node header")?;
        let blocks = *header
            .first()
            .ok_or_else(|| parse_error("missing node block count"))?;
        for _ in 0..blocks {
            let block: Vec<u64> =
                parse_fields(next_line(lines, "node block")?, "node block header")?;
            if block.len() != 4 {
                return Err(parse_error(format!(
                    "node block header has {} fields, expected 4",
                    block.len()
                )));
            }
            let in_block = block[3] as usize;
            if version == SchemaVersion::V40 {
                for _ in 0..in_block {
                    let line = next_line(lines, "node list")?;
                    let mut parts = line.split_whitespace();
                    let tag: u64 = parse_field(parts.next(), "node tag")?;
                    state.push_node(tag, parse_xyz(&mut parts)?)?;
                }
            } else {
                let mut tags = Vec::new();
                for _ in 0..in_block {
                    tags.push(parse_field(
                        Some(next_line(lines, "node tags")?.trim()),
                        "node tag",
                    )?);
                }
                for tag in tags {
                    let line = next_line(lines, "node coordinates")?;
                    state.push_node(tag, parse_xyz(&mut line.split_whitespace())?)?;
                }
            }
        }
        Ok(())
    }

    fn read_elements_v2(lines: &mut Lines<'_>, state: &mut ScanState) -> Result<(), MeshError> {
        let count: usize = parse_field(
            Some(next_line(lines, "element count")?.trim()),
            "element count",
        )?;
        for _ in 0..count {
            let line = next_line(lines, "element list")?;
            let mut parts = line.split_whitespace();
            let _tag: u64 = parse_field(parts.next(), "element tag")?;
            let code: u32 = parse_field(parts.next(), "element type")?;
            let ntags: usize = parse_field(parts.next(), "element tag count")?;
            // Tags may be negative (partition ghosts) and are not needed.
            for idx in 0..ntags {
                parts.next().ok_or_else(|| {
                    parse_error(format!("element declares {ntags} tags but has {idx}"))
                })?;
            }
            let nodes = parts
                .map(|raw| parse_field(Some(raw), "element node"))
                .collect::<Result<Vec<u64>, _>>()?;
            state.push_element(code, &nodes)?;
        }
        Ok(())
    }

    fn read_elements_v4(lines: &mut Lines<'_>, state: &mut ScanState) -> Result<(), MeshError> {
        let header: Vec<usize> =
            parse_fields(next_line(lines, "element header")?, "element header")?;
        let blocks = *header
            .first()
            .ok_or_else(|| parse_error("missing element block count"))?;
        for _ in 0..blocks {
            let block: Vec<u64> =
                parse_fields(next_line(lines, "element block")?, "element block header")?;
            let [_, _, code, in_block] = block.as_slice() else {
                return Err(parse_error(format!(
                    "element block header has {} fields, expected 4",
                    block.len()
                )));
            };
            let code = u32::try_from(*code)
                .map_err(|_| parse_error(format!("invalid element type: {code}")))?;
            for _ in 0..*in_block {
                let fields: Vec<u64> =
                    parse_fields(next_line(lines, "element list")?, "element field")?;
                let nodes = fields
                    .get(1..)
                    .ok_or_else(|| parse_error("empty element line"))?;
                state.push_element(code, nodes)?;
            }
        }
        Ok(())
    }
}

impl MeshReader for GmshReader {
    type Mesh = RawMesh;

    fn read<R: Read>(&self, mut reader: R) -> Result<RawMesh, MeshError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        let mut lines = contents.lines();
        let mut state = ScanState::default();

        while let Some(line) = lines.next() {
            match line.trim() {
                "$MeshFormat" => {
                    let version = Self::parse_format(next_line(&mut lines, "$MeshFormat")?)?;
                    log::debug!("gmsh schema {version:?}");
                    state.version = Some(version);
                    expect_end(&mut lines, "$EndMeshFormat")?;
                }
                "$Nodes" => {
                    match state.version()? {
                        SchemaVersion::V2 => Self::read_nodes_v2(&mut lines, &mut state)?,
                        v => Self::read_nodes_v4(&mut lines, &mut state, v)?,
                    }
                    expect_end(&mut lines, "$EndNodes")?;
                }
                "$Elements" => {
                    match state.version()? {
                        SchemaVersion::V2 => Self::read_elements_v2(&mut lines, &mut state)?,
                        _ => Self::read_elements_v4(&mut lines, &mut state)?,
                    }
                    expect_end(&mut lines, "$EndElements")?;
                }
                _ => {
                    // ignore other sections
                }
            }
        }

        state.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_versions() {
        assert_eq!(SchemaVersion::parse("2.2").unwrap(), SchemaVersion::V2);
        assert_eq!(SchemaVersion::parse("2").unwrap(), SchemaVersion::V2);
        assert_eq!(SchemaVersion::parse("4.1").unwrap(), SchemaVersion::V41);
        assert_eq!(SchemaVersion::parse("4.0").unwrap(), SchemaVersion::V40);
        assert_eq!(
            SchemaVersion::parse("3.0"),
            Err(MeshError::UnsupportedSchemaVersion("3.0".into()))
        );
    }

    #[test]
    fn binary_rejected() {
        let msh = "$MeshFormat\n4.1 1 8\n$EndMeshFormat\n";
        let err = GmshReader.read(msh.as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::MeshIoParse(_)));
    }

    #[test]
    fn nodes_before_format_rejected() {
        let msh = "$Nodes\n1\n1 0 0 0\n$EndNodes\n";
        let err = GmshReader.read(msh.as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::MeshIoParse(_)));
    }

    #[test]
    fn sparse_tags_map_to_positions() {
        let msh = "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n\
                   $Nodes\n3\n10 0 0 0\n20 1 0 0\n30 0 1 0\n$EndNodes\n\
                   $Elements\n1\n1 2 2 0 1 30 10 20\n$EndElements\n";
        let mesh = GmshReader.read(msh.as_bytes()).unwrap();
        assert_eq!(mesh.triangles, vec![[3, 1, 2]]);
    }

    #[test]
    fn negative_partition_tags_are_skipped() {
        let msh = "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n\
                   $Nodes\n3\n1 0 0 0\n2 1 0 0\n3 0 1 0\n$EndNodes\n\
                   $Elements\n1\n1 2 4 1 1 1 -2 1 2 3\n$EndElements\n";
        let mesh = GmshReader.read(msh.as_bytes()).unwrap();
        assert_eq!(mesh.triangles, vec![[1, 2, 3]]);
    }

    #[test]
    fn node_count_must_match_cell_type() {
        let msh = "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n\
                   $Nodes\n3\n1 0 0 0\n2 1 0 0\n3 0 1 0\n$EndNodes\n\
                   $Elements\n1\n1 2 2 0 1 1 2\n$EndElements\n";
        let err = GmshReader.read(msh.as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::MeshIoParse(_)));
    }

    #[test]
    fn oversized_node_block_is_a_parse_error() {
        let msh = "$MeshFormat\n4.1 0 8\n$EndMeshFormat\n\
                   $Nodes\n1 1 1 1\n2 1 0 18446744073709551615\n1\n$EndNodes\n";
        let err = GmshReader.read(msh.as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::MeshIoParse(_)));
    }

    #[test]
    fn unknown_node_tag_is_dangling() {
        let msh = "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n\
                   $Nodes\n3\n1 0 0 0\n2 1 0 0\n3 0 1 0\n$EndNodes\n\
                   $Elements\n1\n1 2 2 0 1 1 2 9\n$EndElements\n";
        let err = GmshReader.read(msh.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            MeshError::DanglingIndex {
                index: 9,
                node_count: 3
            }
        );
    }
}
