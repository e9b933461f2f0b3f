use std::env;

use tracing::info;

use crate::config::PlannerConfig;
use crate::error::Result;

pub const CONFIG_PATH_ENV: &str = "CLIMB_CONFIG_PATH";

/// Load the planner config named by `CLIMB_CONFIG_PATH`, if set.
pub fn config_from_env() -> Result<Option<PlannerConfig>> {
    config_from_path_value(env::var(CONFIG_PATH_ENV).ok().as_deref())
}

pub(crate) fn config_from_path_value(value: Option<&str>) -> Result<Option<PlannerConfig>> {
    let Some(path) = value.map(str::trim) else {
        return Ok(None);
    };
    if path.is_empty() {
        return Ok(None);
    }

    let config = PlannerConfig::load(path)?;
    info!(path, "planner config loaded from {}", CONFIG_PATH_ENV);
    Ok(Some(config))
}
