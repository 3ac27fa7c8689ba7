//! Setup options for periodic boundary conditions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::elements::NodeId;
use crate::error::{PbcError, PbcResult};

/// Largest rounding precision before `10^n` loses meaning for `f64`
pub const MAX_ROUND_DECIMALS: u32 = 15;

/// Options controlling node matching and forbidden-node sourcing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PbcOptions {
    /// Maximum transverse coordinate gap between paired nodes
    pub tolerance: f64,
    /// Round coordinates to this many decimal places before sorting
    pub round_decimals: Option<u32>,
    /// Seed the forbidden set from the host's constrained nodes
    pub use_host_forbidden_sources: bool,
    /// Additional master-side node labels that must stay unconstrained
    pub forbidden_nodes: Vec<NodeId>,
    /// Prefix for generated equation names
    pub equation_prefix: String,
}

impl Default for PbcOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            round_decimals: None,
            use_host_forbidden_sources: true,
            forbidden_nodes: Vec::new(),
            equation_prefix: "PBC".to_string(),
        }
    }
}

impl PbcOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> PbcResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let options: Self = serde_json::from_str(&text)?;
        options.validate()?;
        Ok(options)
    }

    /// Set the matching tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Round coordinates before matching
    pub fn with_rounding(mut self, decimals: u32) -> Self {
        self.round_decimals = Some(decimals);
        self
    }

    /// Add explicitly forbidden master nodes
    pub fn with_forbidden_nodes(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.forbidden_nodes.extend(nodes);
        self
    }

    /// Ignore the host's constrained-node sources
    pub fn without_host_forbidden_sources(mut self) -> Self {
        self.use_host_forbidden_sources = false;
        self
    }

    /// Set the equation name prefix
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.equation_prefix = prefix.to_string();
        self
    }

    /// Check the option values
    pub fn validate(&self) -> PbcResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(PbcError::InvalidInput(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        if let Some(decimals) = self.round_decimals {
            if decimals > MAX_ROUND_DECIMALS {
                return Err(PbcError::InvalidInput(format!(
                    "cannot round to {} decimal places",
                    decimals
                )));
            }
        }
        if self.equation_prefix.trim().is_empty() {
            return Err(PbcError::InvalidInput(
                "equation prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PbcOptions::default();
        assert_eq!(options.tolerance, 1e-6);
        assert!(options.use_host_forbidden_sources);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let options: PbcOptions =
            serde_json::from_str(r#"{"tolerance": 1e-3, "forbidden_nodes": [4, 9]}"#).unwrap();
        assert_eq!(options.tolerance, 1e-3);
        assert_eq!(options.forbidden_nodes, vec![NodeId(4), NodeId(9)]);
        assert_eq!(options.equation_prefix, "PBC");
    }

    #[test]
    fn test_invalid_tolerance() {
        assert!(PbcOptions::new().with_tolerance(-1.0).validate().is_err());
        assert!(PbcOptions::new().with_tolerance(f64::NAN).validate().is_err());
        assert!(PbcOptions::new().with_prefix(" ").validate().is_err());
    }
}
