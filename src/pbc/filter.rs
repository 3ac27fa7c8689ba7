//! Forbidden node filter

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::NodePair;
use crate::elements::NodeId;

/// Master-side nodes that must not enter another periodic equation.
///
/// Seeded from nodes owned by other constraints, then grown with every
/// master node a face pair keeps, so later face pairs sharing edge nodes
/// skip them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForbiddenSet(BTreeSet<NodeId>);

impl ForbiddenSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a node is forbidden
    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains(&id)
    }

    /// Forbid a node; returns false if it already was
    pub fn insert(&mut self, id: NodeId) -> bool {
        self.0.insert(id)
    }

    /// Number of forbidden nodes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no node is forbidden
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Forbidden labels in ascending order
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().copied()
    }
}

impl Extend<NodeId> for ForbiddenSet {
    fn extend<T: IntoIterator<Item = NodeId>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<NodeId> for ForbiddenSet {
    fn from_iter<T: IntoIterator<Item = NodeId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Drop every pair whose master node is forbidden.
///
/// Whole pairs are removed, so master and slave lists stay index-aligned.
/// Kept master nodes are added to `forbidden`; a master repeated later in
/// the same list is dropped as well. Order is preserved.
pub fn filter_pairs(pairs: Vec<NodePair>, forbidden: &mut ForbiddenSet) -> Vec<NodePair> {
    pairs
        .into_iter()
        .filter(|pair| forbidden.insert(pair.master.id))
        .collect()
}
