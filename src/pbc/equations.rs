//! Constraint equation builder.
//!
//! Every equation has the shape
//!
//! ```text
//! slave.u_i - master.u_i - R1.u_i + c * R2.u_n = 0
//! ```
//!
//! where `n` is the face normal and the `R2` term only exists for bending
//! (on `u_n`, `c = 2 * lever`) and torsion (on the in-plane DOFs,
//! `c = +q` for the first sort axis and `c = -p` for the second).
//! Coefficients come from the master node's coordinates.
//!
//! Bending that solves for its neutral axis measures the lever from zero and
//! appends `- R3.u_n` to the normal equation, so `R3.u_n = 2 * y_n * R2.u_n`.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::NodePair;
use crate::elements::{Dof, NodeId, ReferenceSlot, SortAxes};
use crate::error::{PbcError, PbcResult};
use crate::loads::LoadingMode;

/// Node an equation term refers to before reference nodes exist in the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationNode {
    Mesh(NodeId),
    Reference(ReferenceSlot),
}

impl fmt::Display for EquationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquationNode::Mesh(id) => write!(f, "{}", id),
            EquationNode::Reference(slot) => write!(f, "{}", slot),
        }
    }
}

/// A term whose node may still be an unresolved reference slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannedTerm {
    pub node: EquationNode,
    pub dof: Dof,
    pub coefficient: f64,
}

/// A resolved term `coefficient * node.dof` as registered with the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub node: NodeId,
    pub dof: Dof,
    pub coefficient: f64,
}

impl Term {
    pub fn new(node: NodeId, dof: Dof, coefficient: f64) -> Self {
        Self {
            node,
            dof,
            coefficient,
        }
    }
}

/// One linear constraint `sum(terms) = 0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintEquation {
    /// Equation name, unique within a setup
    pub name: String,
    /// Master node the equation constrains
    pub master: NodeId,
    /// DOF the equation constrains
    pub dof: Dof,
    /// Terms in order: slave, master, R1, then R2 and R3 if present
    pub terms: Vec<PlannedTerm>,
}

impl ConstraintEquation {
    /// Coefficient on a node's DOF, if the equation has such a term
    pub fn coefficient(&self, node: EquationNode, dof: Dof) -> Option<f64> {
        self.terms
            .iter()
            .find(|t| t.node == node && t.dof == dof)
            .map(|t| t.coefficient)
    }

    /// Replace reference slots with host node labels.
    ///
    /// `references[i]` is the label of the slot with index `i`.
    pub fn resolve(&self, references: &[NodeId]) -> PbcResult<Vec<Term>> {
        self.terms
            .iter()
            .map(|t| {
                let node = match t.node {
                    EquationNode::Mesh(id) => id,
                    EquationNode::Reference(slot) => {
                        *references.get(slot.index()).ok_or_else(|| {
                            PbcError::InvalidInput(format!(
                                "equation '{}' refers to {} but only {} reference node(s) exist",
                                self.name,
                                slot,
                                references.len()
                            ))
                        })?
                    }
                };
                Ok(Term::new(node, t.dof, t.coefficient))
            })
            .collect()
    }
}

/// Tracks which (master node, DOF) subjects already carry an equation
#[derive(Debug, Clone, Default)]
pub struct EquationLedger {
    subjects: HashSet<(NodeId, Dof)>,
}

impl EquationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a subject is taken
    pub fn contains(&self, node: NodeId, dof: Dof) -> bool {
        self.subjects.contains(&(node, dof))
    }

    /// Number of claimed subjects
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Claim the subjects of a batch of equations, all or nothing
    pub fn claim(&mut self, equations: &[ConstraintEquation]) -> PbcResult<()> {
        let mut batch = HashSet::with_capacity(equations.len());
        for eq in equations {
            let subject = (eq.master, eq.dof);
            if self.subjects.contains(&subject) || !batch.insert(subject) {
                return Err(PbcError::DuplicateEquationMembership {
                    node: eq.master,
                    dof: eq.dof,
                });
            }
        }
        self.subjects.extend(batch);
        Ok(())
    }
}

/// Build the equation family of `mode` for every pair.
///
/// Three equations per pair in DOF order `u1, u2, u3`, named
/// `<prefix>-<index>-<dof>` with `index` the pair position. Subjects are
/// claimed in `ledger`; a subject already claimed fails the whole batch and
/// leaves the ledger unchanged.
pub fn build_equations(
    pairs: &[NodePair],
    axes: SortAxes,
    mode: &LoadingMode,
    prefix: &str,
    ledger: &mut EquationLedger,
) -> PbcResult<Vec<ConstraintEquation>> {
    mode.validate(axes)?;

    let normal = axes.normal();
    let lever_axis = mode.lever_axis(axes);
    let mut equations = Vec::with_capacity(pairs.len() * Dof::ALL.len());

    for (index, pair) in pairs.iter().enumerate() {
        let master = &pair.master;
        let slave = &pair.slave;

        for dof in Dof::ALL {
            let axis = dof.axis();
            let mut terms = vec![
                PlannedTerm {
                    node: EquationNode::Mesh(slave.id),
                    dof,
                    coefficient: 1.0,
                },
                PlannedTerm {
                    node: EquationNode::Mesh(master.id),
                    dof,
                    coefficient: -1.0,
                },
                PlannedTerm {
                    node: EquationNode::Reference(ReferenceSlot::R1),
                    dof,
                    coefficient: -1.0,
                },
            ];

            let r2_coefficient = match *mode {
                LoadingMode::Tension => None,
                LoadingMode::Bending {
                    solve_neutral_axis: true,
                    ..
                } => match lever_axis {
                    Some(lever) if axis == normal => Some(2.0 * master.coord(lever)),
                    _ => None,
                },
                LoadingMode::Bending { neutral_axis, .. } => match lever_axis {
                    Some(lever) if axis == normal => {
                        Some(2.0 * (master.coord(lever) - neutral_axis))
                    }
                    _ => None,
                },
                LoadingMode::Torsion { center } => {
                    let p = master.coord(axes.first()) - center[0];
                    let q = master.coord(axes.second()) - center[1];
                    if axis == axes.first() {
                        Some(q)
                    } else if axis == axes.second() {
                        Some(-p)
                    } else {
                        None
                    }
                }
            };

            if let Some(coefficient) = r2_coefficient {
                terms.push(PlannedTerm {
                    node: EquationNode::Reference(ReferenceSlot::R2),
                    dof: normal.dof(),
                    coefficient,
                });
            }
            if let LoadingMode::Bending {
                solve_neutral_axis: true,
                ..
            } = *mode
            {
                if axis == normal {
                    terms.push(PlannedTerm {
                        node: EquationNode::Reference(ReferenceSlot::R3),
                        dof: normal.dof(),
                        coefficient: -1.0,
                    });
                }
            }

            equations.push(ConstraintEquation {
                name: format!("{}-{}-{}", prefix, index, dof),
                master: master.id,
                dof,
                terms,
            });
        }
    }

    ledger.claim(&equations)?;
    Ok(equations)
}
