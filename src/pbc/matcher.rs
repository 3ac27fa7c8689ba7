//! Node pair matcher

use serde::{Deserialize, Serialize};

use crate::elements::{Axis, MeshNode, SortAxes};
use crate::error::{PbcError, PbcResult};

/// A master-face node and its periodic image on the slave face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePair {
    pub master: MeshNode,
    pub slave: MeshNode,
}

impl NodePair {
    /// Absolute coordinate difference along an axis
    pub fn gap(&self, axis: Axis) -> f64 {
        (self.master.coord(axis) - self.slave.coord(axis)).abs()
    }
}

/// Pair index-aligned nodes of two faces sorted by the same axes.
///
/// Sorting congruent opposite faces by the same key puts periodic images at
/// the same index, so pairing is a single pass. Each pair is checked on both
/// transverse axes; the first gap above `tolerance` fails the whole match.
pub fn match_pairs(
    master: &[MeshNode],
    slave: &[MeshNode],
    axes: SortAxes,
    tolerance: f64,
) -> PbcResult<Vec<NodePair>> {
    for (side, nodes) in [("master", master), ("slave", slave)] {
        if nodes.is_empty() {
            return Err(PbcError::InvalidInput(format!("{} face has no nodes to match", side)));
        }
    }
    if master.len() != slave.len() {
        return Err(PbcError::CardinalityMismatch {
            master_face: face_label(master),
            master_count: master.len(),
            slave_face: face_label(slave),
            slave_count: slave.len(),
        });
    }

    let mut pairs = Vec::with_capacity(master.len());
    for (m, s) in master.iter().zip(slave) {
        let pair = NodePair {
            master: m.clone(),
            slave: s.clone(),
        };
        for axis in [axes.first(), axes.second()] {
            let gap = pair.gap(axis);
            // NaN coordinates never match
            if !(gap <= tolerance) {
                return Err(PbcError::ToleranceExceeded {
                    master: m.id,
                    slave: s.id,
                    axis,
                    gap,
                    tolerance,
                });
            }
        }
        pairs.push(pair);
    }

    Ok(pairs)
}

/// Face label of a non-empty node list
fn face_label(nodes: &[MeshNode]) -> String {
    nodes.first().map(|n| n.face.clone()).unwrap_or_default()
}
