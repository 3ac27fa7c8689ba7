//! Periodic BC - periodic boundary conditions for finite element unit cells
//!
//! This library pairs nodes on opposite faces of a periodic cell and builds
//! the linear constraint equations that tie them to master reference nodes:
//! - Coordinate-sorted node location per face region
//! - Tolerance-checked pairing of master and slave faces
//! - Forbidden-node filtering so no master DOF is constrained twice
//! - Equation families for tension, bending and torsion
//! - Node set registration and validate-then-commit against a host model
//!
//! ## Example
//! ```rust
//! use periodic_bc::prelude::*;
//!
//! // 2 x 2 x 2 hexahedral cell with faces x0, x1, y0, y1, z0, z1
//! let mut host = MeshHost::unit_cell([2, 2, 2], [1.0, 1.0, 1.0]).unwrap();
//!
//! let faces = [FacePairSpec::new("z1", "z0", SortAxes::XY)];
//! let setup = PeriodicSetup::new(PbcOptions::default().with_tolerance(1e-6));
//!
//! let report = setup.run(&mut host, &faces, &LoadingMode::Tension).unwrap();
//! assert_eq!(report.equation_count, 27);
//!
//! // Axial strain of 0.1% over a cell of length 1
//! let load = ReferenceLoad::for_mode(&LoadingMode::Tension, SortAxes::XY, 1e-3, 1.0).unwrap();
//! assert_eq!(load.dof, Dof::U3);
//! ```

pub mod elements;
pub mod error;
pub mod export;
pub mod host;
pub mod loads;
pub mod options;
pub mod pbc;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::elements::{Axis, Dof, MeshNode, NodeId, ReferenceSlot, SortAxes};
    pub use crate::error::{PbcError, PbcResult};
    pub use crate::host::{HostModel, MeshHost, NodeSetHandle};
    pub use crate::loads::{LoadingMode, ReferenceLoad};
    pub use crate::options::PbcOptions;
    pub use crate::pbc::{
        ConstraintEquation, EquationNode, FacePairSpec, ForbiddenSet, NodePair, PeriodicSetup,
        SetupPlan, Term,
    };
    pub use crate::results::{FacePairSummary, SetupReport};
}
