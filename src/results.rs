//! Result types for PBC setup

use serde::{Deserialize, Serialize};

use crate::elements::{NodeId, ReferenceSlot};
use crate::loads::LoadingMode;

/// What one face pair contributed to a committed setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacePairSummary {
    pub master_face: String,
    pub slave_face: String,
    /// Nodes found on each face
    pub located: usize,
    /// Pairs kept after the forbidden filter
    pub retained: usize,
    /// Pairs dropped by the forbidden filter
    pub excluded: usize,
    /// Equations registered for this face pair
    pub equations: usize,
    pub master_set: String,
    pub slave_set: String,
}

/// Summary of a committed setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupReport {
    pub mode: LoadingMode,
    /// Host labels of the reference nodes, by slot
    pub reference_nodes: Vec<(ReferenceSlot, NodeId)>,
    /// Per face pair, in commit order
    pub face_pairs: Vec<FacePairSummary>,
    pub equation_count: usize,
}

impl SetupReport {
    /// The host label a reference slot was committed as
    pub fn reference_node(&self, slot: ReferenceSlot) -> Option<NodeId> {
        self.reference_nodes
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, id)| *id)
    }

    /// Pairs kept across all face pairs
    pub fn total_pairs(&self) -> usize {
        self.face_pairs.iter().map(|s| s.retained).sum()
    }
}
