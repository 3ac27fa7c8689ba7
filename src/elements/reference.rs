//! Master reference nodes

use std::fmt;

use serde::{Deserialize, Serialize};

/// A synthetic reference node whose DOFs carry the aggregate deformation.
///
/// Slots are resolved to host node labels only when a setup is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReferenceSlot {
    /// Mean displacement between master and slave faces
    R1,
    /// Curvature or twist carrier for bending and torsion
    R2,
    /// Neutral-axis offset carrier when bending solves for the neutral axis
    R3,
}

impl ReferenceSlot {
    /// Slot position (0 for R1, 1 for R2, 2 for R3)
    pub fn index(self) -> usize {
        match self {
            ReferenceSlot::R1 => 0,
            ReferenceSlot::R2 => 1,
            ReferenceSlot::R3 => 2,
        }
    }
}

impl fmt::Display for ReferenceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceSlot::R1 => f.write_str("R1"),
            ReferenceSlot::R2 => f.write_str("R2"),
            ReferenceSlot::R3 => f.write_str("R3"),
        }
    }
}
