//! End-to-end conversion of a [`RawMesh`] into a [`DenseMesh`].
//!
//! Stages run in a fixed order and each consumes the previous stage's output:
//!
//! 1. index validation
//! 2. dimensionality classification ([`classify`])
//! 3. coordinate projection ([`project`])
//! 4. planar winding normalization ([`normalize_orientation`])
//! 5. boundary extraction ([`boundary_faces`] / [`boundary_edges`])
//! 6. node compaction ([`compact_nodes`])
//!
//! | dimensionality | tetrahedra | triangles              | edges          |
//! |----------------|------------|------------------------|----------------|
//! | volume         | input      | boundary of tetrahedra | none           |
//! | planar         | none       | oriented input         | boundary edges |
//! | shell          | none       | input                  | none           |

use serde::{Deserialize, Serialize};

use crate::algs::boundary::{NonManifoldHandling, boundary_edges, boundary_faces};
use crate::algs::compact::{ElementSets, compact_nodes};
use crate::algs::dimension::{Dimensionality, classify, project};
use crate::algs::orientation::{OrientationOutcome, normalize_orientation};
use crate::data::dense::DenseMesh;
use crate::data::mesh::RawMesh;
use crate::mesh_error::MeshError;

/// Knobs for [`convert`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// What to do with facets shared by more than two elements.
    pub non_manifold: NonManifoldHandling,
}

/// Summary of one conversion, suitable for logging or a JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// `"2"`, `"2.5"` or `"3"`.
    pub dimension: String,
    pub input_nodes: usize,
    pub output_nodes: usize,
    pub dropped_nodes: usize,
    pub tetrahedra: usize,
    pub triangles: usize,
    pub edges: usize,
    /// Input triangles replaced by the extracted boundary of a volume mesh.
    pub discarded_triangles: usize,
    /// Set for planar meshes only.
    pub orientation: Option<OrientationOutcome>,
}

/// Output of [`convert`].
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub mesh: DenseMesh,
    pub report: ConversionReport,
}

/// Run the full pipeline on a loaded mesh.
pub fn convert(raw: RawMesh, options: &ConvertOptions) -> Result<Conversion, MeshError> {
    if raw.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    raw.validate_indices()?;

    let RawMesh {
        nodes,
        tetrahedra,
        triangles,
    } = raw;
    let input_nodes = nodes.len();

    let dimensionality = classify(&nodes, !tetrahedra.is_empty())?;
    log::info!("dimension: {}", dimensionality.label());
    let coordinates = project(&nodes, dimensionality);
    drop(nodes);

    let mut orientation = None;
    let mut discarded_triangles = 0;
    let elements = match dimensionality {
        Dimensionality::Volume => {
            discarded_triangles = triangles.len();
            if discarded_triangles > 0 {
                log::debug!("dropping {discarded_triangles} input triangles of a volume mesh");
            }
            log::info!("detecting boundary faces of {} tetrahedra", tetrahedra.len());
            let faces = boundary_faces(&tetrahedra, options.non_manifold)?;
            ElementSets {
                tetrahedra,
                triangles: faces,
                edges: Vec::new(),
            }
        }
        Dimensionality::Planar { dropped } => {
            log::info!("checking orientation (dropped axis {dropped:?})");
            let (triangles, outcome) = normalize_orientation(&coordinates, triangles)?;
            orientation = Some(outcome);
            log::info!("detecting boundary edges of {} triangles", triangles.len());
            let edges = boundary_edges(&triangles, options.non_manifold)?;
            ElementSets {
                tetrahedra,
                triangles,
                edges,
            }
        }
        Dimensionality::Shell => ElementSets {
            tetrahedra,
            triangles,
            edges: Vec::new(),
        },
    };

    log::info!("removing unused nodes");
    let compacted = compact_nodes(coordinates, elements)?;
    let mesh = DenseMesh {
        dimensionality,
        coordinates: compacted.coordinates,
        tetrahedra: compacted.elements.tetrahedra,
        triangles: compacted.elements.triangles,
        edges: compacted.elements.edges,
    };
    debug_assert!(mesh.validate().is_ok());

    let report = ConversionReport {
        dimension: dimensionality.label().to_string(),
        input_nodes,
        output_nodes: mesh.node_count(),
        dropped_nodes: compacted.remap.dropped(),
        tetrahedra: mesh.tetrahedra.len(),
        triangles: mesh.triangles.len(),
        edges: mesh.edges.len(),
        discarded_triangles,
        orientation,
    };
    log::info!(
        "elements: {} 3d, {} 2d, {} 1d; nodes: {} kept, {} dropped",
        report.tetrahedra,
        report.triangles,
        report.edges,
        report.output_nodes,
        report.dropped_nodes
    );
    Ok(Conversion { mesh, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::dimension::Axis;

    #[test]
    fn empty_mesh_is_rejected() {
        let err = convert(RawMesh::default(), &ConvertOptions::default()).unwrap_err();
        assert_eq!(err, MeshError::EmptyMesh);
    }

    #[test]
    fn dangling_index_aborts_before_processing() {
        let raw = RawMesh::new(vec![[0.0; 3]; 3], vec![[1, 2, 3, 4]], vec![]);
        let err = convert(raw, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, MeshError::DanglingIndex { index: 4, .. }));
    }

    #[test]
    fn planar_square_gets_edges_and_orientation() {
        let nodes = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [5.0, 5.0, 0.0],
        ];
        let raw = RawMesh::new(nodes, vec![], vec![[1, 2, 3], [1, 3, 4]]);
        let out = convert(raw, &ConvertOptions::default()).unwrap();
        assert_eq!(
            out.mesh.dimensionality,
            Dimensionality::Planar { dropped: Axis::Z }
        );
        assert_eq!(out.mesh.triangles, vec![[1, 3, 2], [1, 4, 3]]);
        assert_eq!(out.mesh.edges.len(), 4);
        assert_eq!(out.report.dropped_nodes, 1);
        assert_eq!(out.report.orientation, Some(OrientationOutcome::Flipped));
        assert_eq!(out.mesh.coordinates.dimension(), 2);
    }

    #[test]
    fn shell_passes_triangles_through() {
        let nodes = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 2.0],
        ];
        let raw = RawMesh::new(nodes, vec![], vec![[1, 2, 3]]);
        let out = convert(raw, &ConvertOptions::default()).unwrap();
        assert_eq!(out.mesh.dimensionality, Dimensionality::Shell);
        assert_eq!(out.mesh.triangles, vec![[1, 2, 3]]);
        assert!(out.mesh.edges.is_empty());
        assert_eq!(out.report.orientation, None);
    }
}
