//! Periodic boundary condition pipeline.
//!
//! Locate face nodes, match them across opposite faces, drop forbidden
//! masters, then build constraint equations and node sets. [`PeriodicSetup`]
//! runs the whole chain over several face pairs and only touches the host
//! once everything has been validated.

mod equations;
mod filter;
mod locator;
mod matcher;
mod registrar;
mod setup;

pub use equations::{
    build_equations, ConstraintEquation, EquationLedger, EquationNode, PlannedTerm, Term,
};
pub use filter::{filter_pairs, ForbiddenSet};
pub use locator::locate;
pub use matcher::{match_pairs, NodePair};
pub use registrar::{register, NodeSetPlan};
pub use setup::{FacePairPlan, FacePairSpec, PeriodicSetup, SetupPlan};
