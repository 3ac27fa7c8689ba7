//! Error types for periodic boundary condition setup

use thiserror::Error;

use crate::elements::{Axis, Dof, NodeId};

/// Main error type for PBC operations
#[derive(Error, Debug)]
pub enum PbcError {
    #[error("Region '{0}' has no nodes")]
    EmptyRegion(String),

    #[error("Region '{0}' not found in host model")]
    RegionNotFound(String),

    #[error(
        "Node count mismatch: master face '{master_face}' has {master_count} nodes, \
         slave face '{slave_face}' has {slave_count}"
    )]
    CardinalityMismatch {
        master_face: String,
        master_count: usize,
        slave_face: String,
        slave_count: usize,
    },

    #[error(
        "Nodes {master} (master) and {slave} (slave) differ by {gap:e} along {axis} \
         (tolerance {tolerance:e})"
    )]
    ToleranceExceeded {
        master: NodeId,
        slave: NodeId,
        axis: Axis,
        gap: f64,
        tolerance: f64,
    },

    #[error("Node {node} is already the subject of a {dof} equation")]
    DuplicateEquationMembership { node: NodeId, dof: Dof },

    #[error("Equation '{0}' already exists in host model")]
    EquationNameTaken(String),

    #[error("Invalid loading mode: {0}")]
    InvalidMode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Host model error: {0}")]
    Host(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for PBC operations
pub type PbcResult<T> = Result<T, PbcError>;
