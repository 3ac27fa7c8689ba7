//! Coordinate axes, degrees of freedom and face sort-axis pairs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PbcError, PbcResult};

/// A global coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Coordinate index (0, 1, 2)
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Translational DOF along this axis
    pub fn dof(self) -> Dof {
        match self {
            Axis::X => Dof::U1,
            Axis::Y => Dof::U2,
            Axis::Z => Dof::U3,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = PbcError;

    fn from_str(s: &str) -> PbcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "x" | "0" => Ok(Axis::X),
            "y" | "1" => Ok(Axis::Y),
            "z" | "2" => Ok(Axis::Z),
            other => Err(PbcError::InvalidInput(format!("unknown axis '{}'", other))),
        }
    }
}

/// Translational degree of freedom (u1, u2, u3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dof {
    U1,
    U2,
    U3,
}

impl Dof {
    /// All translational DOFs in solver order
    pub const ALL: [Dof; 3] = [Dof::U1, Dof::U2, Dof::U3];

    /// 1-based DOF number as used in input decks
    pub fn number(self) -> u8 {
        match self {
            Dof::U1 => 1,
            Dof::U2 => 2,
            Dof::U3 => 3,
        }
    }

    /// Axis this DOF translates along
    pub fn axis(self) -> Axis {
        match self {
            Dof::U1 => Axis::X,
            Dof::U2 => Axis::Y,
            Dof::U3 => Axis::Z,
        }
    }
}

impl fmt::Display for Dof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.number())
    }
}

/// The two transverse axes used to order and match nodes on a face.
///
/// The remaining axis is the face normal. Only the cyclic pairs are
/// allowed, so `(first, second, normal)` is always right-handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortAxes {
    /// Faces normal to z
    #[serde(rename = "xy")]
    XY,
    /// Faces normal to x
    #[serde(rename = "yz")]
    YZ,
    /// Faces normal to y
    #[serde(rename = "zx")]
    ZX,
}

impl SortAxes {
    /// Primary sort axis
    pub fn first(self) -> Axis {
        match self {
            SortAxes::XY => Axis::X,
            SortAxes::YZ => Axis::Y,
            SortAxes::ZX => Axis::Z,
        }
    }

    /// Secondary sort axis
    pub fn second(self) -> Axis {
        match self {
            SortAxes::XY => Axis::Y,
            SortAxes::YZ => Axis::Z,
            SortAxes::ZX => Axis::X,
        }
    }

    /// Face normal
    pub fn normal(self) -> Axis {
        match self {
            SortAxes::XY => Axis::Z,
            SortAxes::YZ => Axis::X,
            SortAxes::ZX => Axis::Y,
        }
    }

    /// The sort axes of faces whose normal is `normal`
    pub fn for_normal(normal: Axis) -> Self {
        match normal {
            Axis::Z => SortAxes::XY,
            Axis::X => SortAxes::YZ,
            Axis::Y => SortAxes::ZX,
        }
    }

    /// Whether `axis` lies in the face plane
    pub fn contains(self, axis: Axis) -> bool {
        axis != self.normal()
    }
}

impl fmt::Display for SortAxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first(), self.second())
    }
}

impl FromStr for SortAxes {
    type Err = PbcError;

    fn from_str(s: &str) -> PbcResult<Self> {
        let cleaned: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match cleaned.as_str() {
            "xy" | "01" => Ok(SortAxes::XY),
            "yz" | "12" => Ok(SortAxes::YZ),
            "zx" | "20" => Ok(SortAxes::ZX),
            _ => Err(PbcError::InvalidInput(format!(
                "sort axes must be one of (x, y), (y, z), (z, x), got '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_axes_are_right_handed() {
        for axes in [SortAxes::XY, SortAxes::YZ, SortAxes::ZX] {
            let (a, b, n) = (axes.first().index(), axes.second().index(), axes.normal().index());
            assert_eq!((a + 1) % 3, b);
            assert_eq!((b + 1) % 3, n);
            assert_eq!(SortAxes::for_normal(axes.normal()), axes);
        }
    }

    #[test]
    fn test_parse_sort_axes() {
        assert_eq!("(x, y)".parse::<SortAxes>().unwrap(), SortAxes::XY);
        assert_eq!("(2,0)".parse::<SortAxes>().unwrap(), SortAxes::ZX);
        assert!("xz".parse::<SortAxes>().is_err());
    }

    #[test]
    fn test_dof_display() {
        assert_eq!(Dof::U3.to_string(), "u3");
        assert_eq!(Axis::Y.dof(), Dof::U2);
    }
}
