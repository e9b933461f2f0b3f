//! # Planner Configuration
//!
//! All tuning constants of the planning pipeline in one place.
//!
//! ## Usage
//! ```rust
//! use climb_core::config::PlannerConfig;
//!
//! let config = PlannerConfig::default();
//! let wide = PlannerConfig::lateral_averse();
//! assert!(wide.graph.horizontal_weight > config.graph.horizontal_weight);
//! ```

use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Movement graph parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GraphConfig {
    /// Cost multiplier for horizontal distance (default: 1.2).
    /// Values above 1 penalise lateral moves.
    pub horizontal_weight: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { horizontal_weight: 1.2 }
    }
}

/// Route planner parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RouteConfig {
    /// Fraction of the vertical range forming the start and finish bands (default: 0.2)
    pub candidate_band: f64,
    /// Fewest holds the pipeline will plan over (default: 2)
    pub min_holds: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self { candidate_band: 0.2, min_holds: 2 }
    }
}

/// Limb assignment parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LimbConfig {
    /// Multiplier applied to the non-preferred limb pair (default: 1.5)
    pub bias: f64,
    /// Height factor above which hands are preferred (default: 0.5)
    pub height_split: f64,
    /// Ground position sits this far below the first hold, in pixels (default: 100)
    pub ground_offset: f64,
}

impl Default for LimbConfig {
    fn default() -> Self {
        Self { bias: 1.5, height_split: 0.5, ground_offset: 100.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlannerConfig {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub route: RouteConfig,
    #[serde(default)]
    pub limbs: LimbConfig,
}

impl PlannerConfig {
    pub fn standard() -> Self {
        Self::default()
    }

    /// Strongly discourages sideways moves
    pub fn lateral_averse() -> Self {
        let mut cfg = Self::default();
        cfg.graph.horizontal_weight = 2.0;
        cfg
    }

    /// Accepts a one-hold wall as a trivial route
    pub fn single_hold() -> Self {
        let mut cfg = Self::default();
        cfg.route.min_holds = 1;
        cfg
    }

    pub fn validate(&self) -> Result<()> {
        let weight = self.graph.horizontal_weight;
        if !weight.is_finite() || weight < 0.0 {
            return Err(PlanError::InvalidConfig(format!(
                "graph.horizontal_weight must be finite and >= 0, got {}",
                weight
            )));
        }

        let band = self.route.candidate_band;
        if !(0.0..=1.0).contains(&band) {
            return Err(PlanError::InvalidConfig(format!(
                "route.candidate_band must be in [0, 1], got {}",
                band
            )));
        }

        if self.route.min_holds == 0 {
            return Err(PlanError::InvalidConfig("route.min_holds must be at least 1".to_string()));
        }

        let bias = self.limbs.bias;
        if !bias.is_finite() || bias <= 0.0 {
            return Err(PlanError::InvalidConfig(format!(
                "limbs.bias must be finite and > 0, got {}",
                bias
            )));
        }

        if !self.limbs.height_split.is_finite() {
            return Err(PlanError::InvalidConfig("limbs.height_split must be finite".to_string()));
        }

        if !self.limbs.ground_offset.is_finite() {
            return Err(PlanError::InvalidConfig("limbs.ground_offset must be finite".to_string()));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a `.json` file as JSON, anything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }
}
