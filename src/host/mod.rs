//! Host model collaborator boundary.
//!
//! The PBC pipeline never touches a concrete CAE model. Everything it reads
//! (face nodes, already-constrained nodes) and everything it writes (node
//! sets, equations, reference nodes) goes through [`HostModel`], so a real
//! application binding and the in-memory [`MeshHost`] are interchangeable.

mod memory;

pub use memory::{MeshHost, RecordedEquation};

use serde::{Deserialize, Serialize};

use crate::elements::NodeId;
use crate::error::PbcResult;
use crate::pbc::Term;

/// Handle to a node set created in the host model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSetHandle {
    /// Set name in the host model
    pub name: String,
    /// Number of nodes in the set
    pub len: usize,
}

/// Capabilities the PBC core needs from the host application
pub trait HostModel {
    /// Every node on a named face region as `(label, [x, y, z])`
    fn nodes_on_region(&self, label: &str) -> PbcResult<Vec<(NodeId, [f64; 3])>>;

    /// Nodes already owned by other constraints (contact interactions etc.)
    fn forbidden_node_sources(&self) -> PbcResult<Vec<NodeId>>;

    /// Master nodes of equations registered by earlier setups
    fn equation_masters(&self) -> PbcResult<Vec<NodeId>>;

    /// Names of equations already registered
    fn equation_names(&self) -> PbcResult<Vec<String>>;

    /// Create a node set, replacing any existing set of the same name
    fn create_node_set(&mut self, name: &str, nodes: &[NodeId]) -> PbcResult<NodeSetHandle>;

    /// Register one linear constraint equation `sum(coefficient * u) = 0`
    fn register_equation(&mut self, name: &str, terms: &[Term]) -> PbcResult<()>;

    /// Create a reference node off the mesh and return its label
    fn create_reference_node(&mut self) -> PbcResult<NodeId>;
}
