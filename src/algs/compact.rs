//! Node compaction: drop unreferenced nodes and close the numbering gaps.
//!
//! The remap is monotonic. A retained node `old` becomes
//! `old - (number of dropped nodes below old)`, so relative order survives and
//! every element keeps pointing at the same coordinates.

use crate::data::coordinates::Coordinates;
use crate::data::mesh::{Edge, Tetrahedron, Triangle};
use crate::mesh_error::MeshError;

/// Element sets that survive to the output, in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementSets {
    pub tetrahedra: Vec<Tetrahedron>,
    pub triangles: Vec<Triangle>,
    pub edges: Vec<Edge>,
}

impl ElementSets {
    /// Every node index referenced by any element.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.tetrahedra
            .iter()
            .flatten()
            .chain(self.triangles.iter().flatten())
            .chain(self.edges.iter().flatten())
            .copied()
    }
}

/// Old → new 1-based node index map, defined for retained nodes only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexRemap {
    /// `new_index[old - 1]` is the new index, or 0 when `old` was dropped.
    new_index: Vec<u32>,
    retained: usize,
}

impl IndexRemap {
    /// Build the remap for a table of `node_count` nodes from the indices
    /// that are referenced.
    pub fn from_referenced<I>(node_count: usize, referenced: I) -> Result<Self, MeshError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut keep = vec![false; node_count];
        for index in referenced {
            let slot = (index as usize)
                .checked_sub(1)
                .and_then(|i| keep.get_mut(i))
                .ok_or(MeshError::DanglingIndex {
                    index: u64::from(index),
                    node_count,
                })?;
            *slot = true;
        }

        let mut next = 0u32;
        let new_index = keep
            .iter()
            .map(|&kept| {
                if kept {
                    next += 1;
                    next
                } else {
                    0
                }
            })
            .collect();
        Ok(Self {
            new_index,
            retained: next as usize,
        })
    }

    /// New index of `old`, or `None` when `old` was dropped or out of range.
    #[inline]
    pub fn get(&self, old: u32) -> Option<u32> {
        let slot = *self.new_index.get((old as usize).checked_sub(1)?)?;
        (slot != 0).then_some(slot)
    }

    /// Per-node keep flags, in original order.
    pub fn keep_flags(&self) -> Vec<bool> {
        self.new_index.iter().map(|&n| n != 0).collect()
    }

    pub fn retained(&self) -> usize {
        self.retained
    }

    pub fn dropped(&self) -> usize {
        self.new_index.len() - self.retained
    }

    /// `true` when no node is dropped, i.e. the remap is the identity.
    pub fn is_identity(&self) -> bool {
        self.dropped() == 0
    }

    /// Rewrite every index of `elements`.
    pub fn apply<const N: usize>(
        &self,
        elements: Vec<[u32; N]>,
    ) -> Result<Vec<[u32; N]>, MeshError> {
        if self.is_identity() {
            return Ok(elements);
        }
        elements
            .into_iter()
            .map(|element| {
                let mut out = element;
                for v in &mut out {
                    *v = self.get(*v).ok_or(MeshError::DanglingIndex {
                        index: u64::from(*v),
                        node_count: self.new_index.len(),
                    })?;
                }
                Ok(out)
            })
            .collect()
    }
}

/// Result of [`compact_nodes`].
#[derive(Clone, Debug, PartialEq)]
pub struct Compacted {
    pub coordinates: Coordinates,
    pub elements: ElementSets,
    pub remap: IndexRemap,
}

/// Remove nodes that no element references and renumber all element sets.
pub fn compact_nodes(
    coordinates: Coordinates,
    elements: ElementSets,
) -> Result<Compacted, MeshError> {
    let remap = IndexRemap::from_referenced(coordinates.len(), elements.indices())?;
    log::debug!(
        "compaction keeps {} of {} nodes",
        remap.retained(),
        coordinates.len()
    );

    let coordinates = if remap.is_identity() {
        coordinates
    } else {
        coordinates.retain_nodes(&remap.keep_flags())
    };
    let elements = ElementSets {
        tetrahedra: remap.apply(elements.tetrahedra)?,
        triangles: remap.apply(elements.triangles)?,
        edges: remap.apply(elements.edges)?,
    };
    Ok(Compacted {
        coordinates,
        elements,
        remap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_closes_gaps_in_order() {
        // Nodes 2 and 4 unreferenced.
        let remap = IndexRemap::from_referenced(5, [1, 3, 5, 3]).unwrap();
        assert_eq!(remap.get(1), Some(1));
        assert_eq!(remap.get(2), None);
        assert_eq!(remap.get(3), Some(2));
        assert_eq!(remap.get(4), None);
        assert_eq!(remap.get(5), Some(3));
        assert_eq!(remap.get(0), None);
        assert_eq!(remap.get(6), None);
        assert_eq!(remap.retained(), 3);
        assert_eq!(remap.dropped(), 2);
    }

    #[test]
    fn out_of_range_reference_is_dangling() {
        let err = IndexRemap::from_referenced(2, [1, 3]).unwrap_err();
        assert_eq!(
            err,
            MeshError::DanglingIndex {
                index: 3,
                node_count: 2
            }
        );
    }

    #[test]
    fn compaction_drops_and_relabels() {
        let coords = Coordinates::try_new(2, vec![0.0, 0.0, 9.0, 9.0, 1.0, 0.0, 0.0, 1.0]).unwrap();
        let elements = ElementSets {
            tetrahedra: vec![],
            triangles: vec![[1, 3, 4]],
            edges: vec![[3, 4]],
        };
        let out = compact_nodes(coords, elements).unwrap();
        assert_eq!(out.coordinates.as_slice(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(out.elements.triangles, vec![[1, 2, 3]]);
        assert_eq!(out.elements.edges, vec![[2, 3]]);
        assert_eq!(out.remap.dropped(), 1);
    }

    #[test]
    fn fully_referenced_table_is_unchanged() {
        let coords = Coordinates::try_new(3, vec![0.0; 12]).unwrap();
        let elements = ElementSets {
            tetrahedra: vec![[4, 3, 2, 1]],
            ..Default::default()
        };
        let out = compact_nodes(coords.clone(), elements.clone()).unwrap();
        assert!(out.remap.is_identity());
        assert_eq!(out.coordinates, coords);
        assert_eq!(out.elements, elements);
    }
}
