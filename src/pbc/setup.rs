//! Periodic boundary condition setup over several face pairs

use std::collections::HashSet;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::{
    build_equations, filter_pairs, locate, match_pairs, ConstraintEquation, EquationLedger,
    ForbiddenSet, NodePair, NodeSetPlan,
};
use crate::elements::SortAxes;
use crate::error::{PbcError, PbcResult};
use crate::host::HostModel;
use crate::loads::LoadingMode;
use crate::options::PbcOptions;
use crate::results::{FacePairSummary, SetupReport};

/// Two opposite faces of a periodic cell and how to pair their nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacePairSpec {
    /// Master face region label
    pub master: String,
    /// Slave face region label
    pub slave: String,
    /// Transverse axes used for ordering and matching
    pub sort_axes: SortAxes,
    /// Master node set name (default `MFNode-<master>`)
    #[serde(default)]
    pub master_set: Option<String>,
    /// Slave node set name (default `SFNode-<slave>`)
    #[serde(default)]
    pub slave_set: Option<String>,
}

impl FacePairSpec {
    pub fn new(master: &str, slave: &str, sort_axes: SortAxes) -> Self {
        Self {
            master: master.to_string(),
            slave: slave.to_string(),
            sort_axes,
            master_set: None,
            slave_set: None,
        }
    }

    /// Override the node set names
    pub fn with_set_names(mut self, master_set: &str, slave_set: &str) -> Self {
        self.master_set = Some(master_set.to_string());
        self.slave_set = Some(slave_set.to_string());
        self
    }

    pub fn master_set_name(&self) -> String {
        self.master_set
            .clone()
            .unwrap_or_else(|| format!("MFNode-{}", self.master))
    }

    pub fn slave_set_name(&self) -> String {
        self.slave_set
            .clone()
            .unwrap_or_else(|| format!("SFNode-{}", self.slave))
    }
}

/// Everything derived for one face pair, not yet committed
#[derive(Debug, Clone, Serialize)]
pub struct FacePairPlan {
    pub spec: FacePairSpec,
    /// Nodes found on each face before filtering
    pub located: usize,
    /// Pairs that survived the forbidden filter
    pub pairs: Vec<NodePair>,
    pub equations: Vec<ConstraintEquation>,
    pub node_sets: NodeSetPlan,
}

impl FacePairPlan {
    /// Pairs dropped by the forbidden filter
    pub fn excluded(&self) -> usize {
        self.located - self.pairs.len()
    }
}

/// A fully validated setup waiting to be committed
#[derive(Debug, Clone, Serialize)]
pub struct SetupPlan {
    pub mode: LoadingMode,
    pub face_pairs: Vec<FacePairPlan>,
    /// Forbidden set after every face pair was processed
    pub forbidden: ForbiddenSet,
}

impl SetupPlan {
    /// Total number of equations across face pairs
    pub fn equation_count(&self) -> usize {
        self.face_pairs.iter().map(|fp| fp.equations.len()).sum()
    }

    /// All equations in commit order
    pub fn equations(&self) -> impl Iterator<Item = &ConstraintEquation> + '_ {
        self.face_pairs.iter().flat_map(|fp| fp.equations.iter())
    }

    /// Create reference nodes, then node sets, then equations.
    ///
    /// Face pairs are committed in the order they were planned.
    pub fn commit<H: HostModel + ?Sized>(self, host: &mut H) -> PbcResult<SetupReport> {
        let slots = self.mode.reference_slots();
        let mut reference_ids = Vec::with_capacity(slots.len());
        for slot in slots {
            let id = host.create_reference_node()?;
            debug!("Reference node {} created as {}", slot, id);
            reference_ids.push(id);
        }

        let mut summaries = Vec::with_capacity(self.face_pairs.len());
        for fp in &self.face_pairs {
            fp.node_sets.commit(host)?;
        }
        for fp in &self.face_pairs {
            for eq in &fp.equations {
                let terms = eq.resolve(&reference_ids)?;
                host.register_equation(&eq.name, &terms)?;
            }
            info!(
                "PBC {} <=> {}: {} pairs ({} excluded), {} equations",
                fp.spec.master,
                fp.spec.slave,
                fp.pairs.len(),
                fp.excluded(),
                fp.equations.len()
            );
            summaries.push(FacePairSummary {
                master_face: fp.spec.master.clone(),
                slave_face: fp.spec.slave.clone(),
                located: fp.located,
                retained: fp.pairs.len(),
                excluded: fp.excluded(),
                equations: fp.equations.len(),
                master_set: fp.node_sets.master_name.clone(),
                slave_set: fp.node_sets.slave_name.clone(),
            });
        }

        Ok(SetupReport {
            mode: self.mode,
            reference_nodes: slots.iter().copied().zip(reference_ids).collect(),
            equation_count: summaries.iter().map(|s| s.equations).sum(),
            face_pairs: summaries,
        })
    }
}

/// Runs locate, match, filter and build over face pairs, then commits.
///
/// The forbidden set and the equation ledger live for one run, so a node
/// used as master by an earlier face pair is skipped by later ones.
#[derive(Debug, Clone, Default)]
pub struct PeriodicSetup {
    options: PbcOptions,
}

impl PeriodicSetup {
    pub fn new(options: PbcOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PbcOptions {
        &self.options
    }

    /// Derive and validate everything without mutating the host
    pub fn plan<H: HostModel + ?Sized>(
        &self,
        host: &H,
        face_pairs: &[FacePairSpec],
        mode: &LoadingMode,
    ) -> PbcResult<SetupPlan> {
        self.options.validate()?;
        if face_pairs.is_empty() {
            return Err(PbcError::InvalidInput("no face pairs given".to_string()));
        }
        check_set_names(face_pairs)?;

        // masters of earlier equations are forbidden whatever the source policy
        let mut forbidden: ForbiddenSet = self.options.forbidden_nodes.iter().copied().collect();
        forbidden.extend(host.equation_masters()?);
        if self.options.use_host_forbidden_sources {
            forbidden.extend(host.forbidden_node_sources()?);
        }
        debug!("Forbidden set seeded with {} nodes", forbidden.len());
        let taken: HashSet<String> = host.equation_names()?.into_iter().collect();

        let mut ledger = EquationLedger::new();
        let mut plans = Vec::with_capacity(face_pairs.len());

        for (index, spec) in face_pairs.iter().enumerate() {
            mode.validate(spec.sort_axes)?;

            let round = self.options.round_decimals;
            let master = locate(host, &spec.master, spec.sort_axes, round)?;
            let slave = locate(host, &spec.slave, spec.sort_axes, round)?;
            let located = master.len();

            let pairs = match_pairs(&master, &slave, spec.sort_axes, self.options.tolerance)?;
            let pairs = filter_pairs(pairs, &mut forbidden);
            if pairs.is_empty() {
                warn!(
                    "Every node of master face '{}' is forbidden; no equations for this pair",
                    spec.master
                );
            }

            let prefix = format!("{}-{}", self.options.equation_prefix, index);
            let equations = build_equations(&pairs, spec.sort_axes, mode, &prefix, &mut ledger)?;
            if let Some(eq) = equations.iter().find(|eq| taken.contains(&eq.name)) {
                return Err(PbcError::EquationNameTaken(eq.name.clone()));
            }
            let node_sets = NodeSetPlan::new(&pairs, &spec.master_set_name(), &spec.slave_set_name())?;

            plans.push(FacePairPlan {
                spec: spec.clone(),
                located,
                pairs,
                equations,
                node_sets,
            });
        }

        Ok(SetupPlan {
            mode: *mode,
            face_pairs: plans,
            forbidden,
        })
    }

    /// Plan, then commit. Nothing reaches the host if planning fails.
    ///
    /// Masters of equations already in the host are skipped, and a planned
    /// name that is already registered fails the plan.
    pub fn run<H: HostModel + ?Sized>(
        &self,
        host: &mut H,
        face_pairs: &[FacePairSpec],
        mode: &LoadingMode,
    ) -> PbcResult<SetupReport> {
        let plan = self.plan(&*host, face_pairs, mode)?;
        plan.commit(host)
    }
}

fn check_set_names(face_pairs: &[FacePairSpec]) -> PbcResult<()> {
    let mut seen = HashSet::new();
    for spec in face_pairs {
        for name in [spec.master_set_name(), spec.slave_set_name()] {
            if !seen.insert(name.clone()) {
                return Err(PbcError::InvalidInput(format!(
                    "node set '{}' is used by more than one face",
                    name
                )));
            }
        }
    }
    Ok(())
}
