//! Mesh nodes located on face regions

use std::fmt;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use super::Axis;

/// Opaque node label, unique within a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(label: u64) -> Self {
        NodeId(label)
    }
}

/// A mesh node found on a face region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshNode {
    /// Node label
    pub id: NodeId,
    /// Position in global coordinates
    pub position: Point3<f64>,
    /// Label of the face region the node was located on
    pub face: String,
}

impl MeshNode {
    /// Create a node at the given coordinates
    pub fn new(id: impl Into<NodeId>, x: f64, y: f64, z: f64, face: &str) -> Self {
        Self {
            id: id.into(),
            position: Point3::new(x, y, z),
            face: face.to_string(),
        }
    }

    /// Coordinate along a global axis
    pub fn coord(&self, axis: Axis) -> f64 {
        self.position[axis.index()]
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.position.x, self.position.y, self.position.z]
    }

    /// Copy of this node with every coordinate rounded to `decimals` places
    pub fn rounded(&self, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals as i32);
        Self {
            id: self.id,
            position: self.position.map(|c| (c * scale).round() / scale),
            face: self.face.clone(),
        }
    }
}
