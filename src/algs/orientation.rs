//! Winding normalization for planar triangulations.
//!
//! MTC expects planar triangles whose normal points down the dropped axis,
//! i.e. a non-positive 2D cross product in the retained coordinates. Only the
//! first triangle is tested; the verdict is applied to every triangle, so the
//! input must already be consistently wound.

use crate::data::coordinates::Coordinates;
use crate::data::mesh::Triangle;
use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};

/// What the normalizer did to the triangle set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrientationOutcome {
    /// The reference normal already had the expected sign (or there was
    /// nothing to orient).
    Kept,
    /// Every triangle had its second and third vertex swapped.
    Flipped,
}

/// Scalar cross product `(b - a) × (c - a)` of a triangle in 2D coordinates.
///
/// Indices are 1-based node positions.
pub fn signed_area2(coords: &Coordinates, tri: &Triangle) -> Result<f64, MeshError> {
    let node_count = coords.len();
    let fetch = |index: u32| {
        (index as usize)
            .checked_sub(1)
            .and_then(|i| coords.node(i))
            .ok_or(MeshError::DanglingIndex {
                index: u64::from(index),
                node_count,
            })
    };
    let (a, b, c) = (fetch(tri[0])?, fetch(tri[1])?, fetch(tri[2])?);
    let (ux, uy) = (b[0] - a[0], b[1] - a[1]);
    let (vx, vy) = (c[0] - a[0], c[1] - a[1]);
    Ok(ux * vy - uy * vx)
}

/// Orient planar triangles so the reference normal is non-positive.
///
/// `coords` must be the 2-component projection of the node table.
pub fn normalize_orientation(
    coords: &Coordinates,
    mut triangles: Vec<Triangle>,
) -> Result<(Vec<Triangle>, OrientationOutcome), MeshError> {
    debug_assert_eq!(coords.dimension(), 2, "orientation expects planar coordinates");
    let Some(reference) = triangles.first().copied() else {
        return Ok((triangles, OrientationOutcome::Kept));
    };

    let cross = signed_area2(coords, &reference)?;
    if cross == 0.0 {
        return Err(MeshError::DegenerateOrientationReference {
            triangle: reference,
        });
    }
    if cross < 0.0 {
        return Ok((triangles, OrientationOutcome::Kept));
    }

    log::debug!("reference triangle {reference:?} has positive normal; flipping winding");
    for tri in &mut triangles {
        tri.swap(1, 2);
    }
    Ok((triangles, OrientationOutcome::Flipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Coordinates {
        Coordinates::try_new(2, vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn counter_clockwise_reference_flips_all() {
        let tris = vec![[1, 2, 3], [1, 3, 4]];
        let (out, outcome) = normalize_orientation(&square(), tris).unwrap();
        assert_eq!(outcome, OrientationOutcome::Flipped);
        assert_eq!(out, vec![[1, 3, 2], [1, 4, 3]]);
    }

    #[test]
    fn clockwise_reference_keeps_all() {
        let tris = vec![[1, 3, 2], [1, 4, 3]];
        let (out, outcome) = normalize_orientation(&square(), tris.clone()).unwrap();
        assert_eq!(outcome, OrientationOutcome::Kept);
        assert_eq!(out, tris);
    }

    #[test]
    fn degenerate_reference_is_reported() {
        let coords = Coordinates::try_new(2, vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0]).unwrap();
        let err = normalize_orientation(&coords, vec![[1, 2, 3]]).unwrap_err();
        assert_eq!(
            err,
            MeshError::DegenerateOrientationReference { triangle: [1, 2, 3] }
        );
    }

    #[test]
    fn empty_set_is_untouched() {
        let (out, outcome) = normalize_orientation(&square(), Vec::new()).unwrap();
        assert!(out.is_empty());
        assert_eq!(outcome, OrientationOutcome::Kept);
    }
}
