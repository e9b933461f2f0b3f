//! JSON API for route planning
//!
//! Accepts a [`RouteRequest`] carrying detector output and returns a
//! [`RouteDocument`]: the persisted shape of a planned route.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

use crate::config::PlannerConfig;
use crate::engine::{plan_climb, Instruction, PlannedRoute, RoutePlan, RouteStatus};
use crate::error::{PlanError, Result};
use crate::models::{Hold, HoldRecord, HoldSet};
use crate::SCHEMA_VERSION;

const DEFAULT_DIFFICULTY: &str = "intermediate";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RouteRequest {
    pub schema_version: u8,
    pub holds: Vec<HoldRecord>,
    #[serde(default)]
    pub config: Option<PlannerConfig>,
    /// Source photo, passed through to the document
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteInfo {
    pub total_steps: usize,
    pub total_cost: f64,
    pub status: RouteStatus,
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// RFC3339
    pub created_at: String,
    /// SHA-256 of the serialized instruction list
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteDocument {
    pub schema_version: u8,
    pub route_info: RouteInfo,
    pub holds: Vec<Hold>,
    pub route: PlannedRoute,
    pub instructions: Vec<Instruction>,
}

impl RouteDocument {
    pub fn new(
        holds: &HoldSet,
        plan: RoutePlan,
        difficulty: Option<String>,
        image: Option<String>,
    ) -> Result<Self> {
        let fingerprint = fingerprint(&plan.instructions)?;
        Ok(Self {
            schema_version: SCHEMA_VERSION,
            route_info: RouteInfo {
                total_steps: plan.instructions.len(),
                total_cost: plan.route.cost,
                status: plan.route.status,
                difficulty: difficulty.unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
                image,
                created_at: Utc::now().to_rfc3339(),
                fingerprint,
            },
            holds: holds.as_slice().to_vec(),
            route: plan.route,
            instructions: plan.instructions,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// SHA-256 hex digest of the instruction list as compact JSON.
pub fn fingerprint(instructions: &[Instruction]) -> Result<String> {
    let bytes = serde_json::to_vec(instructions)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// JSON schema of [`RouteDocument`].
pub fn route_document_schema() -> Result<serde_json::Value> {
    let schema = schemars::schema_for!(RouteDocument);
    Ok(serde_json::to_value(schema)?)
}

/// Plan a route from a JSON [`RouteRequest`] and return the pretty-printed
/// [`RouteDocument`].
pub fn plan_route_json(request_json: &str) -> Result<String> {
    let request: RouteRequest = serde_json::from_str(request_json)?;
    plan_route_request(request)?.to_json_pretty()
}

pub fn plan_route_request(request: RouteRequest) -> Result<RouteDocument> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(PlanError::SchemaVersion {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let holds = HoldSet::from_records(&request.holds)?;
    let config = request.config.unwrap_or_default();
    let plan = plan_climb(&holds, &config)?;

    info!(steps = plan.instructions.len(), "route request planned");
    RouteDocument::new(&holds, plan, request.difficulty, request.image)
}

/// Structured API error with a stable code
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl From<&PlanError> for ApiError {
    fn from(err: &PlanError) -> Self {
        Self { code: err.code().to_string(), message: err.to_string() }
    }
}

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: u8,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: SCHEMA_VERSION,
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: SCHEMA_VERSION,
            timestamp: Utc::now(),
        }
    }
}

/// Like [`plan_route_json`] but never fails: errors come back inside an
/// [`ApiResponse`] envelope with `success: false`.
pub fn plan_route_json_envelope(request_json: &str) -> String {
    let request: RouteRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse RouteRequest: {}", e);
            let err = PlanError::from(e);
            let response: ApiResponse<RouteDocument> = ApiResponse::error(ApiError::from(&err));
            return serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string());
        }
    };

    match plan_route_request(request) {
        Ok(document) => {
            let response = ApiResponse::success(document);
            serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
        }
        Err(err) => {
            warn!(code = err.code(), "route request failed: {}", err);
            let response: ApiResponse<RouteDocument> = ApiResponse::error(ApiError::from(&err));
            serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
        }
    }
}
