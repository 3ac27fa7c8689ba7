//! Prescribed displacements on master reference nodes

use serde::{Deserialize, Serialize};

use super::LoadingMode;
use crate::elements::{Dof, ReferenceSlot, SortAxes};
use crate::error::{PbcError, PbcResult};

/// The single reference DOF a loading mode is driven through, with its value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLoad {
    /// Reference node carrying the load
    pub slot: ReferenceSlot,
    /// Loaded DOF (always along the face normal)
    pub dof: Dof,
    /// Prescribed displacement
    pub value: f64,
}

impl ReferenceLoad {
    /// Convert a strain-like magnitude into the reference displacement.
    ///
    /// `magnitude` is the axial strain (tension), the curvature (bending) or
    /// the twist rate (torsion); `length` is the cell length along the face
    /// normal.
    /// - Tension: `R1.u_n = strain * L`
    /// - Bending: `R2.u_n = curvature * L / 2`, matching the `2c` coefficient
    /// - Torsion: `R2.u_n = twist_rate * L`, the twist angle across the cell
    pub fn for_mode(
        mode: &LoadingMode,
        axes: SortAxes,
        magnitude: f64,
        length: f64,
    ) -> PbcResult<Self> {
        if !(length.is_finite() && length > 0.0) {
            return Err(PbcError::InvalidInput(format!(
                "cell length must be positive, got {}",
                length
            )));
        }
        if !magnitude.is_finite() {
            return Err(PbcError::InvalidInput(format!(
                "load magnitude must be finite, got {}",
                magnitude
            )));
        }
        mode.validate(axes)?;

        let dof = axes.normal().dof();
        let load = match mode {
            LoadingMode::Tension => Self {
                slot: ReferenceSlot::R1,
                dof,
                value: magnitude * length,
            },
            LoadingMode::Bending { .. } => Self {
                slot: ReferenceSlot::R2,
                dof,
                value: 0.5 * magnitude * length,
            },
            LoadingMode::Torsion { .. } => Self {
                slot: ReferenceSlot::R2,
                dof,
                value: magnitude * length,
            },
        };
        Ok(load)
    }
}

/// Neutral-axis position recovered from solved reference displacements.
///
/// With the neutral axis left free, the normal equations pin
/// `R3.u_n = 2 * y_n * R2.u_n`, so `y_n = u_r3 / (2 * u_r2)`, measured along
/// the lever axis. Only meaningful for pure bending without rigid motion.
pub fn neutral_axis_from(u_r3: f64, u_r2: f64) -> PbcResult<f64> {
    if !(u_r3.is_finite() && u_r2.is_finite()) {
        return Err(PbcError::InvalidInput(format!(
            "reference displacements must be finite, got R3 = {}, R2 = {}",
            u_r3, u_r2
        )));
    }
    if u_r2 == 0.0 {
        return Err(PbcError::InvalidInput(
            "no curvature on R2, the neutral axis is undefined".to_string(),
        ));
    }
    Ok(u_r3 / (2.0 * u_r2))
}
