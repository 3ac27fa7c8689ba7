//! In-memory host model

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{HostModel, NodeSetHandle};
use crate::elements::NodeId;
use crate::error::{PbcError, PbcResult};
use crate::pbc::Term;

/// An equation as committed to a [`MeshHost`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEquation {
    /// Equation name
    pub name: String,
    /// Terms in registration order
    pub terms: Vec<Term>,
}

/// A self-contained host model backed by plain collections.
///
/// Stands in for the CAE application in tests, benches and the HTTP
/// service. It records every mutation so callers can inspect what a setup
/// committed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshHost {
    /// Mesh node coordinates by label
    pub nodes: BTreeMap<NodeId, [f64; 3]>,
    /// Face regions as lists of node labels
    pub regions: BTreeMap<String, Vec<NodeId>>,
    /// Nodes claimed by other interactions, keyed by interaction name
    #[serde(default)]
    pub interactions: BTreeMap<String, Vec<NodeId>>,
    /// Interactions that contribute forbidden nodes (`None` = all of them)
    #[serde(default)]
    pub forbidden_interactions: Option<Vec<String>>,
    /// Committed node sets
    #[serde(default)]
    pub node_sets: BTreeMap<String, Vec<NodeId>>,
    /// Committed equations in registration order
    #[serde(default)]
    pub equations: Vec<RecordedEquation>,
    /// Reference nodes created so far
    #[serde(default)]
    pub reference_nodes: Vec<NodeId>,
}

impl MeshHost {
    /// Create an empty host model
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a host model from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> PbcResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Structured hexahedral unit cell `[0, lx] x [0, ly] x [0, lz]`.
    ///
    /// Nodes are labelled from 1 with x varying fastest. Regions `x0`, `x1`,
    /// `y0`, `y1`, `z0` and `z1` hold the nodes on each boundary face, so
    /// edge and corner nodes belong to several regions.
    pub fn unit_cell(n: [usize; 3], size: [f64; 3]) -> PbcResult<Self> {
        if n.iter().any(|&count| count == 0) {
            return Err(PbcError::InvalidInput(format!(
                "unit cell needs at least one division per axis, got {:?}",
                n
            )));
        }
        if size.iter().any(|&l| !(l.is_finite() && l > 0.0)) {
            return Err(PbcError::InvalidInput(format!(
                "unit cell dimensions must be positive, got {:?}",
                size
            )));
        }

        let [nx, ny, nz] = n;
        let mut host = Self::new();
        for name in ["x0", "x1", "y0", "y1", "z0", "z1"] {
            host.regions.insert(name.to_string(), Vec::new());
        }

        for k in 0..=nz {
            for j in 0..=ny {
                for i in 0..=nx {
                    let id = NodeId((1 + i + j * (nx + 1) + k * (nx + 1) * (ny + 1)) as u64);
                    let coords = [
                        size[0] * i as f64 / nx as f64,
                        size[1] * j as f64 / ny as f64,
                        size[2] * k as f64 / nz as f64,
                    ];
                    host.nodes.insert(id, coords);

                    let faces = [
                        (i == 0, "x0"),
                        (i == nx, "x1"),
                        (j == 0, "y0"),
                        (j == ny, "y1"),
                        (k == 0, "z0"),
                        (k == nz, "z1"),
                    ];
                    for (on_face, name) in faces {
                        if on_face {
                            host.regions.entry(name.to_string()).or_default().push(id);
                        }
                    }
                }
            }
        }

        Ok(host)
    }

    /// Add a mesh node
    pub fn add_node(&mut self, id: impl Into<NodeId>, coords: [f64; 3]) -> PbcResult<()> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(PbcError::InvalidInput(format!("node {} already exists", id)));
        }
        self.nodes.insert(id, coords);
        Ok(())
    }

    /// Add or replace a face region
    pub fn add_region(&mut self, name: &str, nodes: impl IntoIterator<Item = NodeId>) -> PbcResult<()> {
        let nodes: Vec<NodeId> = nodes.into_iter().collect();
        self.check_known(&nodes)?;
        self.regions.insert(name.to_string(), nodes);
        Ok(())
    }

    /// Record nodes claimed by another interaction
    pub fn add_interaction(
        &mut self,
        name: &str,
        nodes: impl IntoIterator<Item = NodeId>,
    ) -> PbcResult<()> {
        let nodes: Vec<NodeId> = nodes.into_iter().collect();
        self.check_known(&nodes)?;
        self.interactions.insert(name.to_string(), nodes);
        Ok(())
    }

    /// Restrict which interactions contribute forbidden nodes
    pub fn with_forbidden_interactions(mut self, names: &[&str]) -> Self {
        self.forbidden_interactions = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    /// Members of a committed node set
    pub fn node_set(&self, name: &str) -> Option<&[NodeId]> {
        self.node_sets.get(name).map(Vec::as_slice)
    }

    /// Look up a committed equation by name
    pub fn equation(&self, name: &str) -> Option<&RecordedEquation> {
        self.equations.iter().find(|eq| eq.name == name)
    }

    /// Whether nothing has been committed yet
    pub fn is_pristine(&self) -> bool {
        self.node_sets.is_empty() && self.equations.is_empty() && self.reference_nodes.is_empty()
    }

    /// Node label at a position, if any node lies within `tol` of it
    pub fn node_at(&self, coords: [f64; 3], tol: f64) -> Option<NodeId> {
        self.nodes.iter().find_map(|(&id, c)| {
            let close = c.iter().zip(coords.iter()).all(|(a, b)| (a - b).abs() <= tol);
            close.then_some(id)
        })
    }

    fn check_known(&self, nodes: &[NodeId]) -> PbcResult<()> {
        match nodes
            .iter()
            .find(|id| !self.nodes.contains_key(id) && !self.reference_nodes.contains(id))
        {
            Some(id) => Err(PbcError::Host(format!("node {} does not exist", id))),
            None => Ok(()),
        }
    }

    fn next_label(&self) -> NodeId {
        let mesh_max = self.nodes.keys().next_back().map_or(0, |id| id.0);
        let ref_max = self.reference_nodes.iter().map(|id| id.0).max().unwrap_or(0);
        NodeId(mesh_max.max(ref_max) + 1)
    }
}

impl HostModel for MeshHost {
    fn nodes_on_region(&self, label: &str) -> PbcResult<Vec<(NodeId, [f64; 3])>> {
        let members = self
            .regions
            .get(label)
            .ok_or_else(|| PbcError::RegionNotFound(label.to_string()))?;

        members
            .iter()
            .map(|id| {
                self.nodes
                    .get(id)
                    .map(|coords| (*id, *coords))
                    .ok_or_else(|| PbcError::Host(format!("region '{}' refers to unknown node {}", label, id)))
            })
            .collect()
    }

    fn forbidden_node_sources(&self) -> PbcResult<Vec<NodeId>> {
        let mut forbidden = BTreeSet::new();
        match &self.forbidden_interactions {
            None => {
                for nodes in self.interactions.values() {
                    forbidden.extend(nodes.iter().copied());
                }
            }
            Some(names) => {
                for name in names {
                    let nodes = self
                        .interactions
                        .get(name)
                        .ok_or_else(|| PbcError::Host(format!("interaction '{}' not found", name)))?;
                    forbidden.extend(nodes.iter().copied());
                }
            }
        }
        Ok(forbidden.into_iter().collect())
    }

    /// Second term of each equation, the master in slave/master/reference order
    fn equation_masters(&self) -> PbcResult<Vec<NodeId>> {
        let masters: BTreeSet<NodeId> = self
            .equations
            .iter()
            .filter_map(|eq| eq.terms.get(1))
            .map(|t| t.node)
            .filter(|id| !self.reference_nodes.contains(id))
            .collect();
        Ok(masters.into_iter().collect())
    }

    fn equation_names(&self) -> PbcResult<Vec<String>> {
        Ok(self.equations.iter().map(|eq| eq.name.clone()).collect())
    }

    fn create_node_set(&mut self, name: &str, nodes: &[NodeId]) -> PbcResult<NodeSetHandle> {
        self.check_known(nodes)?;
        if self.node_sets.insert(name.to_string(), nodes.to_vec()).is_some() {
            debug!("Replaced node set '{}'", name);
        }
        Ok(NodeSetHandle {
            name: name.to_string(),
            len: nodes.len(),
        })
    }

    fn register_equation(&mut self, name: &str, terms: &[Term]) -> PbcResult<()> {
        if self.equation(name).is_some() {
            return Err(PbcError::Host(format!("equation '{}' already exists", name)));
        }
        if terms.len() < 2 {
            return Err(PbcError::Host(format!(
                "equation '{}' needs at least two terms",
                name
            )));
        }
        let nodes: Vec<NodeId> = terms.iter().map(|t| t.node).collect();
        self.check_known(&nodes)?;
        self.equations.push(RecordedEquation {
            name: name.to_string(),
            terms: terms.to_vec(),
        });
        Ok(())
    }

    fn create_reference_node(&mut self) -> PbcResult<NodeId> {
        let id = self.next_label();
        self.reference_nodes.push(id);
        Ok(id)
    }
}
