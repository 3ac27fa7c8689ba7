//! Loading modes for periodic constraint equations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::elements::{Axis, ReferenceSlot, SortAxes};
use crate::error::{PbcError, PbcResult};

/// The deformation a set of periodic equations transmits.
///
/// Every mode couples `slave - master` to reference node `R1`; bending and
/// torsion add a geometry-dependent term on `R2` along the face normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum LoadingMode {
    /// Axial tension, prescribed through `R1` along the face normal
    Tension,
    /// Bending about an in-plane axis, curvature prescribed through `R2`
    Bending {
        /// Bending axis; `None` bends about the first sort axis
        #[serde(default)]
        about: Option<Axis>,
        /// Position of the neutral axis along the lever axis
        #[serde(default)]
        neutral_axis: f64,
        /// Leave the neutral axis free, carried by `R3` on the normal DOF
        #[serde(default)]
        solve_neutral_axis: bool,
    },
    /// Torsion about the face normal, twist prescribed through `R2`
    Torsion {
        /// In-plane rotation centre in sort-axis order
        #[serde(default)]
        center: [f64; 2],
    },
}

impl Default for LoadingMode {
    fn default() -> Self {
        Self::Tension
    }
}

impl LoadingMode {
    /// Bending about the first sort axis through the origin
    pub fn bending() -> Self {
        Self::Bending {
            about: None,
            neutral_axis: 0.0,
            solve_neutral_axis: false,
        }
    }

    /// Bending about a given in-plane axis
    pub fn bending_about(axis: Axis) -> Self {
        Self::Bending {
            about: Some(axis),
            neutral_axis: 0.0,
            solve_neutral_axis: false,
        }
    }

    /// Torsion about the face normal through the origin
    pub fn torsion() -> Self {
        Self::Torsion { center: [0.0, 0.0] }
    }

    /// Move the neutral axis (bending only, other modes are unchanged)
    pub fn with_neutral_axis(mut self, offset: f64) -> Self {
        if let Self::Bending { neutral_axis, .. } = &mut self {
            *neutral_axis = offset;
        }
        self
    }

    /// Solve for the neutral axis through a third reference node (bending only)
    pub fn solving_neutral_axis(mut self) -> Self {
        if let Self::Bending {
            solve_neutral_axis, ..
        } = &mut self
        {
            *solve_neutral_axis = true;
        }
        self
    }

    /// Move the rotation centre (torsion only, other modes are unchanged)
    pub fn with_center(mut self, first: f64, second: f64) -> Self {
        if let Self::Torsion { center } = &mut self {
            *center = [first, second];
        }
        self
    }

    /// Short lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tension => "tension",
            Self::Bending { .. } => "bending",
            Self::Torsion { .. } => "torsion",
        }
    }

    /// Reference nodes the mode's equations refer to
    pub fn reference_slots(&self) -> &'static [ReferenceSlot] {
        match self {
            Self::Tension => &[ReferenceSlot::R1],
            Self::Bending {
                solve_neutral_axis: true,
                ..
            } => &[ReferenceSlot::R1, ReferenceSlot::R2, ReferenceSlot::R3],
            Self::Bending { .. } | Self::Torsion { .. } => &[ReferenceSlot::R1, ReferenceSlot::R2],
        }
    }

    /// Check the mode parameters against the faces it will be applied to
    pub fn validate(&self, axes: SortAxes) -> PbcResult<()> {
        match *self {
            Self::Tension => Ok(()),
            Self::Bending {
                about,
                neutral_axis,
                solve_neutral_axis,
            } => {
                if let Some(axis) = about {
                    if !axes.contains(axis) {
                        return Err(PbcError::InvalidMode(format!(
                            "cannot bend about {}, the normal of faces sorted by {}",
                            axis, axes
                        )));
                    }
                }
                if !neutral_axis.is_finite() {
                    return Err(PbcError::InvalidMode(format!(
                        "neutral axis offset must be finite, got {}",
                        neutral_axis
                    )));
                }
                if solve_neutral_axis && neutral_axis != 0.0 {
                    return Err(PbcError::InvalidMode(format!(
                        "neutral axis is solved for, a fixed offset of {} cannot be applied",
                        neutral_axis
                    )));
                }
                Ok(())
            }
            Self::Torsion { center } => {
                if center.iter().any(|c| !c.is_finite()) {
                    return Err(PbcError::InvalidMode(format!(
                        "rotation centre must be finite, got {:?}",
                        center
                    )));
                }
                Ok(())
            }
        }
    }

    /// In-plane axis whose coordinate scales the bending term.
    ///
    /// Returns `None` for modes other than bending.
    pub fn lever_axis(&self, axes: SortAxes) -> Option<Axis> {
        match self {
            Self::Bending { about, .. } => {
                let about = about.unwrap_or_else(|| axes.first());
                if about == axes.first() {
                    Some(axes.second())
                } else {
                    Some(axes.first())
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for LoadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LoadingMode {
    type Err = PbcError;

    fn from_str(s: &str) -> PbcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "tension" => Ok(Self::Tension),
            "bending" => Ok(Self::bending()),
            "torsion" => Ok(Self::torsion()),
            other => Err(PbcError::InvalidMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("Tension".parse::<LoadingMode>().unwrap(), LoadingMode::Tension);
        assert_eq!(" torsion ".parse::<LoadingMode>().unwrap(), LoadingMode::torsion());
        assert!(matches!(
            "shear".parse::<LoadingMode>(),
            Err(PbcError::InvalidMode(name)) if name == "shear"
        ));
    }

    #[test]
    fn test_reference_slots() {
        assert_eq!(LoadingMode::Tension.reference_slots().len(), 1);
        assert_eq!(LoadingMode::bending().reference_slots().len(), 2);
        assert_eq!(LoadingMode::torsion().reference_slots().len(), 2);
    }

    #[test]
    fn test_lever_axis() {
        assert_eq!(LoadingMode::bending().lever_axis(SortAxes::XY), Some(Axis::Y));
        assert_eq!(
            LoadingMode::bending_about(Axis::Y).lever_axis(SortAxes::XY),
            Some(Axis::X)
        );
        assert_eq!(LoadingMode::torsion().lever_axis(SortAxes::XY), None);
    }

    #[test]
    fn test_bending_about_normal_is_invalid() {
        let mode = LoadingMode::bending_about(Axis::Z);
        assert!(matches!(mode.validate(SortAxes::XY), Err(PbcError::InvalidMode(_))));
        assert!(mode.validate(SortAxes::YZ).is_ok());
    }

    #[test]
    fn test_solved_neutral_axis() {
        let mode = LoadingMode::bending().solving_neutral_axis();
        assert_eq!(
            mode.reference_slots(),
            &[ReferenceSlot::R1, ReferenceSlot::R2, ReferenceSlot::R3]
        );
        assert!(mode.validate(SortAxes::XY).is_ok());
        assert!(matches!(
            mode.with_neutral_axis(0.5).validate(SortAxes::XY),
            Err(PbcError::InvalidMode(_))
        ));
        // other modes ignore the switch
        assert_eq!(LoadingMode::torsion().solving_neutral_axis(), LoadingMode::torsion());

        let parsed: LoadingMode =
            serde_json::from_str(r#"{"mode": "bending", "solve_neutral_axis": true}"#).unwrap();
        assert_eq!(parsed, mode);
    }

    #[test]
    fn test_mode_json() {
        let mode: LoadingMode =
            serde_json::from_str(r#"{"mode": "bending", "neutral_axis": 0.5}"#).unwrap();
        assert_eq!(mode, LoadingMode::bending().with_neutral_axis(0.5));
        let json = serde_json::to_string(&LoadingMode::Tension).unwrap();
        assert_eq!(json, r#"{"mode":"tension"}"#);
    }
}
