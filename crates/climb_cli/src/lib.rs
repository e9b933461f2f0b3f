//! Climb CLI Library
//!
//! Hold file → route document pipeline used by the `climb` binary:
//! reads detector output, resolves the planner config, plans the route and
//! writes the resulting document.

use anyhow::{Context, Result};
use climb_core::api::{config_from_env, RouteDocument};
use climb_core::render::{sketch, DEFAULT_SKETCH_HEIGHT, DEFAULT_SKETCH_WIDTH};
use climb_core::{assign_limbs_with, plan_climb, HoldRecord, HoldSet, PlannerConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Hold files are either a bare array of records or an object with a
/// `holds` array (e.g. a saved route document).
#[derive(Deserialize)]
#[serde(untagged)]
enum HoldFile {
    Records(Vec<HoldRecord>),
    Wrapped { holds: Vec<HoldRecord> },
}

/// Read and validate a hold file
pub fn load_holds(path: &Path) -> Result<HoldSet> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read hold file: {}", path.display()))?;

    let file: HoldFile = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse hold file: {}", path.display()))?;

    let records = match file {
        HoldFile::Records(records) => records,
        HoldFile::Wrapped { holds } => holds,
    };

    let holds = HoldSet::from_records(&records)
        .with_context(|| format!("Invalid hold data in {}", path.display()))?;
    info!(count = holds.len(), path = %path.display(), "holds loaded");
    Ok(holds)
}

/// Command line overrides applied on top of the loaded config
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub horizontal_weight: Option<f64>,
    pub min_holds: Option<usize>,
}

/// Config precedence: `--config` file, then `CLIMB_CONFIG_PATH`, then
/// defaults. Flag overrides apply last.
pub fn resolve_config(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<PlannerConfig> {
    let mut config = match config_path {
        Some(path) => PlannerConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => config_from_env().context("Failed to load config from environment")?.unwrap_or_default(),
    };

    if let Some(weight) = overrides.horizontal_weight {
        config.graph.horizontal_weight = weight;
    }
    if let Some(min_holds) = overrides.min_holds {
        config.route.min_holds = min_holds;
    }

    config.validate().context("Invalid planner config")?;
    debug!(?config, "planner config resolved");
    Ok(config)
}

/// Plan a route and wrap it in a document
pub fn plan_document(
    holds: &HoldSet,
    config: &PlannerConfig,
    image: Option<String>,
    difficulty: Option<String>,
) -> Result<RouteDocument> {
    let plan = plan_climb(holds, config)?;
    let document = RouteDocument::new(holds, plan, difficulty, image)?;
    Ok(document)
}

pub fn save_document(path: &Path, document: &RouteDocument) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
        }
    }

    let json = document.to_json_pretty()?;
    fs::write(path, json).with_context(|| format!("Failed to write route file: {}", path.display()))?;
    Ok(())
}

/// Text sketch of a saved document. Limb assignment is deterministic, so
/// the steps are recomputed from the stored path.
pub fn render_sketch(document: &RouteDocument, config: &PlannerConfig) -> Result<String> {
    let holds = HoldSet::from_holds(document.holds.clone())?;
    let steps = assign_limbs_with(&document.route.path, &holds, &config.limbs);
    Ok(sketch(&steps, &holds, DEFAULT_SKETCH_WIDTH, DEFAULT_SKETCH_HEIGHT))
}

/// Human-readable instruction list
pub fn format_instructions(document: &RouteDocument) -> String {
    let mut out = String::new();
    for instruction in &document.instructions {
        out.push_str(&format!(
            "Step {}: {} ({})\n  → {}\n",
            instruction.step,
            instruction.movement,
            instruction.limb.as_str(),
            instruction.body_position
        ));
    }
    out
}
