//! Node set registrar

use serde::{Deserialize, Serialize};

use super::NodePair;
use crate::elements::NodeId;
use crate::error::{PbcError, PbcResult};
use crate::host::{HostModel, NodeSetHandle};

/// Contents of the master and slave node sets of one face pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSetPlan {
    pub master_name: String,
    pub master_nodes: Vec<NodeId>,
    pub slave_name: String,
    pub slave_nodes: Vec<NodeId>,
}

impl NodeSetPlan {
    /// Collect pair members in pair order without touching the host
    pub fn new(pairs: &[NodePair], master_name: &str, slave_name: &str) -> PbcResult<Self> {
        if master_name.trim().is_empty() || slave_name.trim().is_empty() {
            return Err(PbcError::InvalidInput("node set names must not be empty".to_string()));
        }
        if master_name == slave_name {
            return Err(PbcError::InvalidInput(format!(
                "master and slave node sets share the name '{}'",
                master_name
            )));
        }

        let (master_nodes, slave_nodes) = pairs.iter().map(|p| (p.master.id, p.slave.id)).unzip();
        Ok(Self {
            master_name: master_name.to_string(),
            master_nodes,
            slave_name: slave_name.to_string(),
            slave_nodes,
        })
    }

    /// Create (or overwrite) both sets in the host
    pub fn commit<H: HostModel + ?Sized>(&self, host: &mut H) -> PbcResult<(NodeSetHandle, NodeSetHandle)> {
        let master = host.create_node_set(&self.master_name, &self.master_nodes)?;
        let slave = host.create_node_set(&self.slave_name, &self.slave_nodes)?;
        Ok((master, slave))
    }
}

/// Register the master and slave nodes of `pairs` as two named sets.
///
/// Re-registering under the same names replaces the previous contents.
pub fn register<H: HostModel + ?Sized>(
    host: &mut H,
    pairs: &[NodePair],
    master_name: &str,
    slave_name: &str,
) -> PbcResult<(NodeSetHandle, NodeSetHandle)> {
    NodeSetPlan::new(pairs, master_name, slave_name)?.commit(host)
}
